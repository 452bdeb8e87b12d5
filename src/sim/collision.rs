//! Collision detection and resolution
//!
//! Everything on the road is an axis-aligned box; two boxes overlap iff
//! each one's near edge is strictly before the other's far edge on both
//! axes. Resolution effects are pool-specific and mutate player, score
//! and particles in place.

use glam::Vec2;

use super::state::{GameEvent, GameState, PlayerState};
use crate::consts::*;

/// Particle burst colors per event
pub const COIN_BURST_COLOR: &str = "#FFD166";
pub const OBSTACLE_BURST_COLOR: &str = "#F97316";
pub const TRAFFIC_BURST_COLOR: &str = "#EF4444";
pub const LEVEL_UP_BURST_COLOR: &str = "#60A5FA";

/// An axis-aligned box, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box centered on `pos` (used for coins)
    pub fn centered(pos: Vec2, half: f32) -> Self {
        Self {
            x: pos.x - half,
            y: pos.y - half,
            w: half * 2.0,
            h: half * 2.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Strict-overlap AABB test (touching edges do not collide)
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// The player's current bounding box
pub fn player_rect(player: &PlayerState) -> Rect {
    Rect::new(player.pos.x, player.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
}

/// Coin pickup: score bonus and a gold burst; no effect on the player
pub fn collect_coin(state: &mut GameState, pos: Vec2) {
    state.world.score += COIN_SCORE;
    state.emit_particles(pos, COIN_BURST_COLOR, 12);
    state.events.push(GameEvent::CoinCollected);
}

/// Obstacle hit: shake, dampened steering, one life
pub fn hit_obstacle(state: &mut GameState, center: Vec2) {
    state.camera_shake = 6.0;
    state.player.velocity_x *= 0.4;
    state.player.lives = state.player.lives.saturating_sub(1);
    state.emit_particles(center, OBSTACLE_BURST_COLOR, 16);
    state.events.push(GameEvent::ObstacleHit);
    log::debug!("obstacle hit, lives left {}", state.player.lives);
}

/// Traffic hit: the hardest penalty - stronger shake and damping, one
/// life, and a score penalty floored at zero
pub fn hit_traffic(state: &mut GameState, center: Vec2) {
    state.camera_shake = 8.0;
    state.player.velocity_x *= 0.2;
    state.player.lives = state.player.lives.saturating_sub(1);
    state.world.score = state.world.score.saturating_sub(TRAFFIC_SCORE_PENALTY);
    state.emit_particles(center, TRAFFIC_BURST_COLOR, 18);
    state.events.push(GameEvent::TrafficHit);
    log::debug!("traffic hit, lives left {}", state.player.lives);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rects_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 4.0, 4.0);
        assert!(rects_overlap(&a, &b));
        assert!(!rects_overlap(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn test_coin_collection_awards_score() {
        let mut state = GameState::new(1);
        collect_coin(&mut state, Vec2::new(50.0, 50.0));
        assert_eq!(state.world.score, COIN_SCORE);
        assert_eq!(state.world.particles.len(), 12);
        assert!(state.events.contains(&GameEvent::CoinCollected));
    }

    #[test]
    fn test_traffic_hit_floors_score_at_zero() {
        let mut state = GameState::new(1);
        state.world.score = 50;
        hit_traffic(&mut state, Vec2::ZERO);
        assert_eq!(state.world.score, 0);
        assert_eq!(state.player.lives, crate::consts::START_LIVES - 1);
        assert_eq!(state.camera_shake, 8.0);
    }

    #[test]
    fn test_obstacle_hit_dampens_velocity() {
        let mut state = GameState::new(1);
        state.player.velocity_x = 300.0;
        hit_obstacle(&mut state, Vec2::ZERO);
        assert!((state.player.velocity_x - 120.0).abs() < 0.001);
        assert_eq!(state.camera_shake, 6.0);
    }

    #[test]
    fn test_lives_never_go_negative() {
        let mut state = GameState::new(1);
        state.player.lives = 0;
        hit_traffic(&mut state, Vec2::ZERO);
        hit_obstacle(&mut state, Vec2::ZERO);
        assert_eq!(state.player.lives, 0);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.1f32..200.0, ah in 0.1f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.1f32..200.0, bh in 0.1f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
        }

        #[test]
        fn prop_score_stays_non_negative(hits in 1usize..20, start in 0u32..1000) {
            let mut state = GameState::new(1);
            state.world.score = start;
            for _ in 0..hits {
                hit_traffic(&mut state, Vec2::ZERO);
            }
            // u32 plus saturating_sub: can never wrap below zero
            prop_assert!(state.world.score <= start);
        }
    }
}
