//! Lane Rush - a top-down three-lane racer
//!
//! Core modules:
//! - `sim`: Simulation (lateral physics, spawning, collisions, world state)
//! - `game`: Top-level controller (frame loop, lifecycle, render hand-off)
//! - `levels`: Read-only level configuration table
//! - `persistence`: Best-effort best-score storage
//! - `settings`: Player preferences

pub mod game;
pub mod levels;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use game::{Game, RenderView};
pub use levels::{Level, level_for};
pub use settings::Settings;

/// Set up panic reporting and logging when loaded in a browser
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Game configuration constants
pub mod consts {
    /// Largest delta time fed to the simulation per frame (ms).
    /// Protects against huge jumps after tab backgrounding or a slow frame.
    pub const MAX_FRAME_DT_MS: f64 = 40.0;

    /// Time between spawn-attempt batches before level scaling (ms)
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 1100.0;
    /// Spawn interval never shrinks below this, whatever the level says (ms)
    pub const SPAWN_INTERVAL_FLOOR_MS: f64 = 220.0;

    /// Base scroll/traffic speed (px/s)
    pub const BASE_TRAFFIC_SPEED: f32 = 160.0;

    /// Lateral steering
    pub const LATERAL_ACCELERATION: f32 = 1400.0;
    pub const LATERAL_MAX_SPEED: f32 = 420.0;
    pub const LATERAL_FRICTION: f32 = 1800.0;
    /// Continuous tilt input is scaled by this before becoming acceleration
    pub const TILT_SENSITIVITY: f32 = 1.8;
    /// Tilt magnitudes below this count as "no input" (friction applies)
    pub const TILT_DEADZONE: f32 = 0.02;

    /// Player car footprint
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 110.0;
    /// Player may drift this far past the outer lane centers
    pub const LANE_BOUND_MARGIN: f32 = 120.0;

    /// Entity footprints
    pub const TRAFFIC_WIDTH: f32 = 64.0;
    pub const TRAFFIC_HEIGHT: f32 = 110.0;
    pub const COIN_RADIUS: f32 = 12.0;
    pub const OBSTACLE_WIDTH: f32 = 56.0;
    pub const OBSTACLE_HEIGHT: f32 = 28.0;

    /// Coins scroll slightly slower than the road
    pub const COIN_SPEED_FACTOR: f32 = 0.98;

    /// Scoring
    pub const COIN_SCORE: u32 = 100;
    pub const TRAFFIC_SCORE_PENALTY: u32 = 200;
    /// Fraction of forward travel converted to score
    pub const DISTANCE_SCORE_RATE: f32 = 0.06;

    /// Forward speed gains this fraction per level index
    pub const LEVEL_SPEED_TERM: f32 = 0.06;
    /// Distance (m) per level before advancing
    pub const LEVEL_DISTANCE_STEP: u64 = 3000;
    /// World speed multiplier gained per level-up
    pub const LEVEL_SPEED_MULT_STEP: f32 = 0.12;

    /// Downward particle acceleration (px/s²)
    pub const PARTICLE_GRAVITY: f32 = 400.0;

    /// A swipe holds its steering flag for this long unless renewed (ms)
    pub const SWIPE_HOLD_MS: f64 = 120.0;

    /// Lives at the start of a run
    pub const START_LIVES: u32 = 3;
}
