//! Top-level game controller
//!
//! `Game` owns the simulation state, the settings and the best-score
//! store, and is what the host environment drives: one `frame` call per
//! animation tick, input setters from event handlers, and the control
//! surface (pause / restart / mute / debug). Rendering and audio stay
//! outside; they consume `RenderView` and the drained events.

use crate::levels::Level;
use crate::persistence::{self, BestScoreStore};
use crate::settings::Settings;
use crate::sim::state::{GameEvent, GamePhase, GameState, InputState, PlayerState, WorldState};
use crate::sim::tick::tick;

pub struct Game {
    state: GameState,
    settings: Settings,
    store: Box<dyn BestScoreStore>,
    best_score: u32,
}

/// Read-only snapshot handed to the renderer once per frame
pub struct RenderView<'a> {
    pub world: &'a WorldState,
    pub player: &'a PlayerState,
    pub level_index: usize,
    pub level: &'static Level,
    /// Already zeroed when the player disabled shake
    pub camera_shake: f32,
    pub paused: bool,
    pub game_over: bool,
    pub best_score: u32,
    pub muted: bool,
    pub debug_overlay: bool,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_store(seed, persistence::platform_store())
    }

    /// Construct with an explicit score store (tests inject a memory one)
    pub fn with_store(seed: u64, store: Box<dyn BestScoreStore>) -> Self {
        let best_score = store.load().unwrap_or(0);
        Self {
            state: GameState::new(seed),
            settings: Settings::load(),
            store,
            best_score,
        }
    }

    /// Advance the simulation for one animation frame.
    ///
    /// Always safe to call, paused or not; the caller renders afterwards
    /// either way. Best-score persistence happens here when the run ends.
    pub fn frame(&mut self, now_ms: f64) {
        tick(&mut self.state, now_ms);

        for event in &self.state.events {
            if let GameEvent::GameOver { score } = *event {
                if persistence::record_best(self.store.as_mut(), score) {
                    self.best_score = score;
                }
            }
        }
    }

    /// Hand the host the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Snapshot for the renderer
    pub fn render_view(&self) -> RenderView<'_> {
        let shake = if self.settings.effective_screen_shake() {
            self.state.camera_shake
        } else {
            0.0
        };
        RenderView {
            world: &self.state.world,
            player: &self.state.player,
            level_index: self.state.level_index,
            level: self.state.level(),
            camera_shake: shake,
            paused: self.state.phase != GamePhase::Running,
            game_over: self.state.phase == GamePhase::GameOver,
            best_score: self.best_score,
            muted: self.settings.muted,
            debug_overlay: self.settings.debug_overlay,
        }
    }

    /// Viewport changed: recompute lanes and re-seat the player
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Input producers write through this; the tick is the only reader
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.state.input
    }

    // --- control surface ---

    /// Running <-> Paused. A finished run only leaves via restart.
    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Fresh run from any phase
    pub fn restart(&mut self) {
        self.state.restart();
    }

    /// Audio collaborator only; no effect on the simulation
    pub fn toggle_mute(&mut self) {
        self.settings.muted = !self.settings.muted;
        self.settings.save();
    }

    /// Render collaborator only
    pub fn toggle_debug(&mut self) {
        self.settings.debug_overlay = !self.settings.debug_overlay;
        self.settings.save();
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryStore;
    use crate::sim::collision::player_rect;
    use crate::sim::state::TrafficCar;
    use glam::Vec2;

    fn ready_game() -> Game {
        let mut game = Game::with_store(99, Box::new(MemoryStore::default()));
        game.resize(600.0, 800.0);
        game.frame(0.0);
        game
    }

    #[test]
    fn test_pause_freezes_but_view_still_renders() {
        let mut game = ready_game();
        game.frame(16.0);
        let distance = game.state().world.distance;
        assert!(distance > 0);

        game.toggle_pause();
        game.frame(32.0);
        assert_eq!(game.state().world.distance, distance);

        let view = game.render_view();
        assert!(view.paused);
        assert!(!view.game_over);
    }

    #[test]
    fn test_resume_continues_simulation() {
        let mut game = ready_game();
        game.toggle_pause();
        game.toggle_pause();
        game.frame(16.0);
        assert!(game.state().world.distance > 0);
    }

    #[test]
    fn test_game_over_persists_best_when_beaten() {
        let mut game = ready_game();
        game.state_mut().world.score = 777;
        game.state_mut().player.lives = 1;
        let p = player_rect(&game.state().player);
        let id = game.state_mut().next_entity_id();
        game.state_mut().world.traffic.push(TrafficCar {
            id,
            lane: 1,
            pos: Vec2::new(p.x, p.y),
            size: Vec2::new(TRAFFIC_WIDTH, TRAFFIC_HEIGHT),
            speed: 0.0,
            color: "#ef4444",
        });

        game.frame(16.0);

        let view = game.render_view();
        assert!(view.game_over);
        // 777 plus forward accrual minus the 200 traffic penalty
        assert_eq!(view.best_score, game.state().world.score);
        assert!(view.best_score >= 577);
    }

    #[test]
    fn test_game_over_keeps_higher_stored_best() {
        let mut store = MemoryStore::default();
        store.store(100_000);
        let mut game = Game::with_store(99, Box::new(store));
        game.resize(600.0, 800.0);
        game.frame(0.0);

        game.state_mut().world.score = 300;
        game.state_mut().player.lives = 0;
        game.frame(16.0);

        assert_eq!(game.best_score(), 100_000);
    }

    #[test]
    fn test_restart_leaves_game_over() {
        let mut game = ready_game();
        game.state_mut().player.lives = 0;
        game.frame(16.0);
        assert!(game.render_view().game_over);

        // Pause toggle cannot leave a finished run
        game.toggle_pause();
        assert!(game.render_view().game_over);

        game.restart();
        assert!(!game.render_view().paused);
        assert_eq!(game.state().player.lives, START_LIVES);
    }

    #[test]
    fn test_mute_and_debug_do_not_touch_sim() {
        let mut game = ready_game();
        game.frame(16.0);
        let distance = game.state().world.distance;
        let score = game.state().world.score;
        game.toggle_mute();
        game.toggle_debug();
        assert_eq!(game.state().world.distance, distance);
        assert_eq!(game.state().world.score, score);
        let view = game.render_view();
        assert!(view.muted);
        assert!(view.debug_overlay);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut game = ready_game();
        game.state_mut().player.lives = 0;
        game.frame(16.0);
        let events = game.drain_events();
        assert!(!events.is_empty());
        assert!(game.drain_events().is_empty());
    }
}
