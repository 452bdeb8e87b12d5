//! Stochastic entity spawning
//!
//! Once per spawn interval the controller makes one or two attempts, and
//! each attempt independently rolls for traffic, a coin and an obstacle.
//! Probabilities and the interval scale with the current level; the
//! interval never drops below a fixed floor. Nothing spawns until lane
//! geometry is known.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, GameState, Obstacle, TrafficCar};
use crate::consts::*;

/// Body colors cycled through by spawned traffic
pub const TRAFFIC_PALETTE: [&str; 5] = ["#ef4444", "#06b6d4", "#f59e0b", "#10b981", "#a78bfa"];

/// Level-scaled spawn interval, clamped to the global floor
pub fn spawn_interval_ms(spawn_multiplier: f32) -> f64 {
    let mult = if spawn_multiplier > 0.0 {
        spawn_multiplier as f64
    } else {
        1.0
    };
    (BASE_SPAWN_INTERVAL_MS / mult).max(SPAWN_INTERVAL_FLOOR_MS)
}

/// Advance the spawn timer and run attempt batches when it fires
pub fn update(state: &mut GameState, dt_ms: f64) {
    let level = state.level();
    state.world.spawn_interval_ms = spawn_interval_ms(level.spawn_multiplier);
    state.world.spawn_timer_ms += dt_ms;
    if state.world.spawn_timer_ms < state.world.spawn_interval_ms {
        return;
    }
    state.world.spawn_timer_ms = 0.0;

    let sm = level.spawn_multiplier;
    let attempts = if state.rng.random::<f32>() < 0.18 { 2 } else { 1 };
    for _ in 0..attempts {
        if state.rng.random::<f32>() < (0.28 + sm * 0.10).min(0.95) {
            spawn_traffic(state);
        }
        if state.rng.random::<f32>() < 0.18 + sm * 0.02 {
            spawn_coin(state);
        }
        if state.rng.random::<f32>() < 0.12 + sm * 0.03 {
            spawn_obstacle(state);
        }
    }
}

fn spawn_traffic(state: &mut GameState) {
    let centers = state.lanes.centers();
    if centers.is_empty() {
        return;
    }
    let lane = state.rng.random_range(0..centers.len());
    let x = centers[lane] - TRAFFIC_WIDTH / 2.0;
    let y = -140.0 - state.rng.random::<f32>() * 180.0;
    let speed = BASE_TRAFFIC_SPEED
        * (1.0 + state.rng.random::<f32>() * 0.18)
        * state.level().traffic_speed_multiplier
        * state.world.speed_multiplier;
    let color = TRAFFIC_PALETTE[state.rng.random_range(0..TRAFFIC_PALETTE.len())];
    let id = state.next_entity_id();
    state.world.traffic.push(TrafficCar {
        id,
        lane,
        pos: Vec2::new(x, y),
        size: Vec2::new(TRAFFIC_WIDTH, TRAFFIC_HEIGHT),
        speed,
        color,
    });
}

fn spawn_coin(state: &mut GameState) {
    let centers = state.lanes.centers();
    if centers.is_empty() {
        return;
    }
    let lane = state.rng.random_range(0..centers.len());
    let x = centers[lane];
    let y = -100.0 - state.rng.random::<f32>() * 160.0;
    let id = state.next_entity_id();
    state.world.coins.push(Coin {
        id,
        pos: Vec2::new(x, y),
    });
}

fn spawn_obstacle(state: &mut GameState) {
    let centers = state.lanes.centers();
    if centers.is_empty() {
        return;
    }
    let lane = state.rng.random_range(0..centers.len());
    let x = centers[lane] - OBSTACLE_WIDTH / 2.0;
    let y = -120.0 - state.rng.random::<f32>() * 240.0;
    let id = state.next_entity_id();
    state.world.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(x, y),
        size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interval_scales_with_level() {
        assert_eq!(spawn_interval_ms(1.0), BASE_SPAWN_INTERVAL_MS);
        assert!(spawn_interval_ms(2.0) < spawn_interval_ms(1.0));
    }

    #[test]
    fn test_interval_floor() {
        assert_eq!(spawn_interval_ms(1000.0), SPAWN_INTERVAL_FLOOR_MS);
        // A broken multiplier of zero falls back to the base interval
        assert_eq!(spawn_interval_ms(0.0), BASE_SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_no_spawning_without_lanes() {
        let mut state = GameState::new(42);
        // Never resized: lane layout unknown
        for _ in 0..100 {
            update(&mut state, 500.0);
        }
        assert!(state.world.traffic.is_empty());
        assert!(state.world.coins.is_empty());
        assert!(state.world.obstacles.is_empty());
    }

    #[test]
    fn test_spawns_land_in_offscreen_band() {
        let mut state = GameState::new(42);
        state.resize(600.0, 800.0);
        for _ in 0..200 {
            update(&mut state, 1100.0);
        }
        assert!(!state.world.traffic.is_empty());
        for t in &state.world.traffic {
            assert!(t.pos.y <= -140.0 && t.pos.y >= -320.0);
            assert!(t.lane < 3);
        }
        for c in &state.world.coins {
            assert!(c.pos.y <= -100.0 && c.pos.y >= -260.0);
        }
        for o in &state.world.obstacles {
            assert!(o.pos.y <= -120.0 && o.pos.y >= -360.0);
        }
    }

    #[test]
    fn test_traffic_speed_includes_world_multiplier() {
        let mut state = GameState::new(42);
        state.resize(600.0, 800.0);
        state.world.speed_multiplier = 2.0;
        for _ in 0..50 {
            update(&mut state, 1100.0);
        }
        // Base speed with max jitter is 160 * 1.18; doubled by the world
        // multiplier every car must be at least 320
        for t in &state.world.traffic {
            assert!(t.speed >= BASE_TRAFFIC_SPEED * 2.0);
            assert!(t.speed <= BASE_TRAFFIC_SPEED * 1.18 * 2.0);
        }
    }

    #[test]
    fn test_timer_resets_after_batch() {
        let mut state = GameState::new(42);
        state.resize(600.0, 800.0);
        update(&mut state, 1200.0);
        assert_eq!(state.world.spawn_timer_ms, 0.0);
        update(&mut state, 100.0);
        assert_eq!(state.world.spawn_timer_ms, 100.0);
    }

    proptest! {
        #[test]
        fn prop_interval_never_below_floor(mult in 0.0f32..1000.0) {
            prop_assert!(spawn_interval_ms(mult) >= SPAWN_INTERVAL_FLOOR_MS);
        }
    }
}
