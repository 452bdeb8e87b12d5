//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform
//! dependencies:
//! - One writer per field: input producers write `InputState`, the tick
//!   pipeline is the sole reader of input and sole writer of world state
//! - Pools are iterated in reverse order so in-place removal is safe
//! - No operation blocks; a tick either runs or the run is paused

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_overlap};
pub use state::{
    Coin, GameEvent, GamePhase, GameState, InputState, LaneLayout, Obstacle, Particle,
    PlayerState, SteerFlag, TrafficCar, WorldState,
};
pub use tick::tick;
