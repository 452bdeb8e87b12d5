//! Lane Rush entry point
//!
//! Native builds run a short headless demo: a synthetic driver weaves
//! between lanes for a while and the run summary is printed at the end.
//! The real front end (canvas renderer, DOM input) drives `Game` the same
//! way from wasm.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_rush::Game;
    use lane_rush::sim::GameEvent;
    use rand::Rng;

    env_logger::init();

    let seed: u64 = rand::rng().random();
    log::info!("starting demo run with seed {seed}");

    let mut game = Game::new(seed);
    game.resize(480.0, 800.0);

    // 30 seconds of 60 Hz frames with the driver weaving left and right
    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    for frame in 0..(30 * 60) {
        // Swap steering direction every second or so
        let steer_left = (frame / 70) % 2 == 0;
        game.input_mut().left.set_held(steer_left);
        game.input_mut().right.set_held(!steer_left);

        game.frame(now);
        now += frame_ms;

        for event in game.drain_events() {
            match event {
                GameEvent::LevelUp { level_index } => {
                    log::info!("reached level {}", level_index + 1);
                }
                GameEvent::GameOver { score } => {
                    log::info!("demo run ended early at score {score}");
                }
                _ => {}
            }
        }

        if game.render_view().game_over {
            break;
        }
    }

    let view = game.render_view();
    let summary = serde_json::json!({
        "score": view.world.score,
        "distance_m": view.world.distance,
        "level": view.level.name,
        "lives": view.player.lives,
        "best_score": view.best_score,
    });
    println!("{summary}");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is a library; the browser shell drives `Game`.
}
