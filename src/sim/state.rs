//! World state and core simulation types
//!
//! Everything the tick pipeline reads or mutates lives here. The tick is
//! the only writer of `WorldState`/`PlayerState`; input producers write
//! only into `InputState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::levels;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advancing every frame
    Running,
    /// Simulation frozen, render hand-off still happens
    Paused,
    /// Lives hit zero; frozen like Paused, best score recorded
    GameOver,
}

/// Things that happened during a tick, drained by the host.
///
/// The audio collaborator keys off these; the sim never touches audio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    CoinCollected,
    ObstacleHit,
    TrafficHit,
    LevelUp { level_index: usize },
    GameOver { score: u32 },
}

/// A steering flag that can be held (keyboard) or pulsed (swipe).
///
/// A swipe sets an expiry timestamp instead of arming a timer callback,
/// so there is nothing to cancel on teardown; the flag simply lapses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteerFlag {
    held: bool,
    pulse_until_ms: Option<f64>,
}

impl SteerFlag {
    pub fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    /// Arm the flag for a short synthetic "hold" starting at `now_ms`
    pub fn pulse(&mut self, now_ms: f64) {
        self.pulse_until_ms = Some(now_ms + SWIPE_HOLD_MS);
    }

    pub fn clear(&mut self) {
        self.held = false;
        self.pulse_until_ms = None;
    }

    /// Whether the flag is active at `now_ms` (lapsed pulses are dropped)
    pub fn active(&mut self, now_ms: f64) -> bool {
        if let Some(until) = self.pulse_until_ms {
            if now_ms < until {
                return true;
            }
            self.pulse_until_ms = None;
        }
        self.held
    }
}

/// Aggregated input flags, written by input producers, read at tick time
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: SteerFlag,
    pub right: SteerFlag,
    /// Continuous tilt signal, already scaled by sensitivity upstream
    pub tilt: f32,
}

impl InputState {
    /// A swipe steers one way and releases the other
    pub fn swipe(&mut self, dx: f32, now_ms: f64) {
        if dx < 0.0 {
            self.left.pulse(now_ms);
            self.right.clear();
        } else if dx > 0.0 {
            self.right.pulse(now_ms);
            self.left.clear();
        }
    }

    /// Map a raw device tilt (degrees, clamped to ±30) to the tilt scalar
    pub fn set_tilt_degrees(&mut self, gamma: f32) {
        let gamma = gamma.clamp(-30.0, 30.0);
        self.tilt = (gamma / 30.0) * TILT_SENSITIVITY;
    }
}

/// Lane-center x coordinates, derived from viewport width.
///
/// Empty until the first resize; spawning and bounds clamping are no-ops
/// while no lanes are known.
#[derive(Debug, Clone, Default)]
pub struct LaneLayout {
    lanes: Vec<f32>,
}

impl LaneLayout {
    /// Recompute the three lane centers for a viewport width.
    /// The road occupies the middle 66% of the viewport.
    pub fn recompute(&mut self, width: f32) {
        let road_width = width * 0.66;
        let center_x = width / 2.0;
        let lane_w = road_width / 3.0;
        self.lanes = vec![
            center_x - lane_w - lane_w / 2.0,
            center_x - lane_w / 2.0,
            center_x + lane_w / 2.0,
        ];
    }

    pub fn is_ready(&self) -> bool {
        !self.lanes.is_empty()
    }

    pub fn centers(&self) -> &[f32] {
        &self.lanes
    }

    pub fn center(&self, lane: usize) -> Option<f32> {
        self.lanes.get(lane).copied()
    }

    /// Drivable x range for the player, or None before the first resize
    pub fn bounds(&self) -> Option<(f32, f32)> {
        let first = *self.lanes.first()?;
        let last = *self.lanes.last()?;
        Some((first - LANE_BOUND_MARGIN, last + LANE_BOUND_MARGIN))
    }
}

/// The player's car
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Top-left corner of the bounding box, road-plane coordinates
    pub pos: Vec2,
    /// Signed lateral velocity (px/s)
    pub velocity_x: f32,
    pub lives: u32,
    /// Reserved for a future pickup; stored and reset but never consumed
    pub shield: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            velocity_x: 0.0,
            lives: START_LIVES,
            shield: 0,
        }
    }
}

/// An oncoming traffic car
#[derive(Debug, Clone)]
pub struct TrafficCar {
    pub id: u32,
    pub lane: usize,
    pub pos: Vec2,
    pub size: Vec2,
    /// Fixed at spawn from base speed, jitter, level and world multipliers
    pub speed: f32,
    pub color: &'static str,
}

/// A collectible coin (position is the disc center)
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
}

/// A road hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

/// A visual-effect particle (not gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in seconds; removed at <= 0
    pub life: f32,
    pub size: f32,
    pub color: &'static str,
}

/// Scrolling world aggregate: camera, accounting, entity pools
#[derive(Debug, Clone)]
pub struct WorldState {
    pub camera_y: f32,
    /// Cumulative forward travel (m)
    pub distance: u64,
    pub score: u32,
    pub spawn_timer_ms: f64,
    pub spawn_interval_ms: f64,
    pub traffic: Vec<TrafficCar>,
    pub coins: Vec<Coin>,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    /// Only ever increases (level-ups); reset on restart
    pub speed_multiplier: f32,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            camera_y: 0.0,
            distance: 0,
            score: 0,
            spawn_timer_ms: 0.0,
            spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            traffic: Vec::new(),
            coins: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            speed_multiplier: 1.0,
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub world: WorldState,
    pub player: PlayerState,
    pub input: InputState,
    pub lanes: LaneLayout,
    pub level_index: usize,
    /// Viewport size in road-plane units (width, height)
    pub viewport: Vec2,
    /// Transient render hint, decays every frame
    pub camera_shake: f32,
    /// Timestamp of the previous frame; None before the first tick and
    /// after restart so the next frame only records time
    pub last_time_ms: Option<f64>,
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Running,
            world: WorldState::default(),
            player: PlayerState::default(),
            input: InputState::default(),
            lanes: LaneLayout::default(),
            level_index: 0,
            viewport: Vec2::ZERO,
            camera_shake: 0.0,
            last_time_ms: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (monotonic, never reused)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Recompute lane geometry and re-seat the player for a new viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.lanes.recompute(width);
        if let Some(center) = self.lanes.center(1) {
            self.player.pos.x = center - PLAYER_WIDTH / 2.0;
            self.player.pos.y = height - PLAYER_HEIGHT - 24.0;
        }
    }

    /// World scroll speed this tick (px/s)
    pub fn forward_speed(&self) -> f32 {
        BASE_TRAFFIC_SPEED
            * self.world.speed_multiplier
            * (1.0 + self.level_index as f32 * LEVEL_SPEED_TERM)
    }

    /// Append a burst of particles with randomized outward velocities
    pub fn emit_particles(&mut self, origin: Vec2, color: &'static str, count: usize) {
        for _ in 0..count {
            let id = self.next_entity_id();
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 300.0,
                (self.rng.random::<f32>() - 1.5) * 300.0,
            );
            self.world.particles.push(Particle {
                id,
                pos: origin,
                vel,
                life: 0.5 + self.rng.random::<f32>() * 0.6,
                size: 3.0 + self.rng.random::<f32>() * 6.0,
                color,
            });
        }
    }

    /// Begin a fresh run: clear every pool, reset accounting and the
    /// player, re-enter Running. Lane layout, viewport and the reached
    /// level survive; only the speed multiplier drops back.
    pub fn restart(&mut self) {
        self.world.traffic.clear();
        self.world.coins.clear();
        self.world.obstacles.clear();
        self.world.particles.clear();
        self.world.camera_y = 0.0;
        self.world.distance = 0;
        self.world.score = 0;
        self.world.spawn_timer_ms = 0.0;
        self.world.speed_multiplier = 1.0;
        self.player.velocity_x = 0.0;
        self.player.lives = START_LIVES;
        self.player.shield = 0;
        self.camera_shake = 0.0;
        self.last_time_ms = None;
        self.events.clear();
        self.phase = GamePhase::Running;
        log::info!("run restarted");
    }

    /// Current level record (out-of-range indices fall back to level 0)
    pub fn level(&self) -> &'static levels::Level {
        levels::level_for(self.level_index)
    }
}
