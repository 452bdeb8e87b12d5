//! Per-frame simulation pipeline
//!
//! `tick` advances the whole world for one animation frame, strictly in
//! order: lateral physics, forward accrual, spawning, per-pool
//! advance/collide/cull, particles, level progression, game-over check.
//! Delta time is clamped so a long frame gap (backgrounded tab, slow
//! device) never produces one huge unfair step.

use glam::Vec2;

use super::collision::{self, Rect, player_rect, rects_overlap};
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::levels;

/// Advance the simulation to `now_ms`.
///
/// The first call after creation or restart only records the timestamp.
/// While paused or game-over only the camera shake decays; the caller
/// still hands the frozen state to the renderer.
pub fn tick(state: &mut GameState, now_ms: f64) {
    let Some(last) = state.last_time_ms else {
        state.last_time_ms = Some(now_ms);
        return;
    };
    let dt_ms = (now_ms - last).clamp(0.0, MAX_FRAME_DT_MS);
    state.last_time_ms = Some(now_ms);
    let dt = (dt_ms / 1000.0) as f32;

    // Decay before this frame's collisions so an impact reaches the
    // renderer at full magnitude; it keeps fading even while paused so
    // the overlay settles
    state.camera_shake *= 0.9;
    if state.camera_shake < 0.01 {
        state.camera_shake = 0.0;
    }

    if state.phase == GamePhase::Running {
        lateral_physics(state, now_ms, dt);
        advance_forward(state, dt);
        spawn::update(state, dt_ms);
        advance_traffic(state, dt);
        update_coins(state, dt);
        update_obstacles(state, dt);
        resolve_traffic_collisions(state);
        update_particles(state, dt);
        update_progression(state);
        check_game_over(state);
    }
}

/// Inertial steering: impulse/tilt acceleration, idle friction, then the
/// velocity and lane-bounds clamps
fn lateral_physics(state: &mut GameState, now_ms: f64, dt: f32) {
    let left = state.input.left.active(now_ms);
    let right = state.input.right.active(now_ms);

    let mut accel = 0.0;
    if left {
        accel -= LATERAL_ACCELERATION;
    }
    if right {
        accel += LATERAL_ACCELERATION;
    }
    accel += state.input.tilt * LATERAL_ACCELERATION;

    let player = &mut state.player;
    player.velocity_x += accel * dt;

    // Friction only when no input is live, and it never overshoots zero
    if !left && !right && state.input.tilt.abs() < TILT_DEADZONE {
        let braking = player.velocity_x.abs().min(LATERAL_FRICTION * dt);
        player.velocity_x -= player.velocity_x.signum() * braking;
    }

    player.velocity_x = player.velocity_x.clamp(-LATERAL_MAX_SPEED, LATERAL_MAX_SPEED);
    player.pos.x += player.velocity_x * dt;

    if let Some((min_x, max_x)) = state.lanes.bounds() {
        player.pos.x = player.pos.x.clamp(min_x, max_x);
    }
}

/// Scroll the camera and accrue distance/score from forward travel
fn advance_forward(state: &mut GameState, dt: f32) {
    let fwd = state.forward_speed();
    state.world.camera_y += fwd * dt;
    state.world.distance += (fwd * dt).floor() as u64;
    state.world.score += (fwd * dt * DISTANCE_SCORE_RATE).floor() as u32;
}

/// Traffic moves at its own spawn-time speed; collisions are resolved in
/// a separate pass after the other pools
fn advance_traffic(state: &mut GameState, dt: f32) {
    let cull_y = state.viewport.y + 200.0;
    state.world.traffic.retain_mut(|t| {
        t.pos.y += t.speed * dt;
        t.pos.y <= cull_y
    });
}

fn update_coins(state: &mut GameState, dt: f32) {
    let fwd = state.forward_speed();
    let p_rect = player_rect(&state.player);
    let cull_y = state.viewport.y + 80.0;

    let mut collected: Vec<Vec2> = Vec::new();
    let mut i = state.world.coins.len();
    while i > 0 {
        i -= 1;
        let coin = &mut state.world.coins[i];
        coin.pos.y += fwd * COIN_SPEED_FACTOR * dt;
        let c_rect = Rect::centered(coin.pos, COIN_RADIUS);
        if rects_overlap(&p_rect, &c_rect) {
            collected.push(coin.pos);
            state.world.coins.remove(i);
        } else if coin.pos.y > cull_y {
            state.world.coins.remove(i);
        }
    }
    for pos in collected {
        collision::collect_coin(state, pos);
    }
}

fn update_obstacles(state: &mut GameState, dt: f32) {
    let fwd = state.forward_speed();
    let p_rect = player_rect(&state.player);
    let cull_y = state.viewport.y + 120.0;

    let mut hits: Vec<Vec2> = Vec::new();
    let mut i = state.world.obstacles.len();
    while i > 0 {
        i -= 1;
        let ob = &mut state.world.obstacles[i];
        ob.pos.y += fwd * dt;
        let o_rect = Rect::new(ob.pos.x, ob.pos.y, ob.size.x, ob.size.y);
        if rects_overlap(&p_rect, &o_rect) {
            hits.push(o_rect.center());
            state.world.obstacles.remove(i);
        } else if ob.pos.y > cull_y {
            state.world.obstacles.remove(i);
        }
    }
    for center in hits {
        collision::hit_obstacle(state, center);
    }
}

fn resolve_traffic_collisions(state: &mut GameState) {
    let p_rect = player_rect(&state.player);

    let mut hits: Vec<Vec2> = Vec::new();
    let mut i = state.world.traffic.len();
    while i > 0 {
        i -= 1;
        let t = &state.world.traffic[i];
        let t_rect = Rect::new(t.pos.x, t.pos.y, t.size.x, t.size.y);
        if rects_overlap(&p_rect, &t_rect) {
            hits.push(t_rect.center());
            state.world.traffic.remove(i);
        }
    }
    for center in hits {
        collision::hit_traffic(state, center);
    }
}

/// Integrate particle motion with constant downward pull and expire by
/// remaining life
fn update_particles(state: &mut GameState, dt: f32) {
    state.world.particles.retain_mut(|p| {
        p.life -= dt;
        p.pos += p.vel * dt;
        p.vel.y += PARTICLE_GRAVITY * dt;
        p.life > 0.0
    });
}

/// Advance at most one level per tick when the distance threshold is
/// crossed and a next level exists
fn update_progression(state: &mut GameState) {
    let threshold = (state.level_index as u64 + 1) * LEVEL_DISTANCE_STEP;
    if state.world.distance > threshold && state.level_index < levels::LEVELS.len() - 1 {
        state.level_index += 1;
        state.world.speed_multiplier += LEVEL_SPEED_MULT_STEP;
        let burst = Vec2::new(
            state.player.pos.x + PLAYER_WIDTH / 2.0,
            state.player.pos.y + 20.0,
        );
        state.emit_particles(burst, collision::LEVEL_UP_BURST_COLOR, 20);
        state.events.push(GameEvent::LevelUp {
            level_index: state.level_index,
        });
        log::info!(
            "level up: {} ({})",
            state.level_index + 1,
            state.level().name
        );
    }
}

fn check_game_over(state: &mut GameState) {
    if state.player.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.world.score,
        });
        log::info!(
            "game over at score {} distance {}",
            state.world.score,
            state.world.distance
        );
    }
}
