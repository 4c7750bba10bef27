/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::File;
use std::time::Duration;

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, LevelFilter, WriteLogger};

use config::GameConfig;
use sim::clock::{TickSource, WallClock};
use sim::control::{self, Command};
use sim::event::GameEvent;
use sim::save::{FileStore, HighScoreStore, MemoryStore};
use sim::step;
use sim::world::WorldState;
use ui::draw::draw_frame;
use ui::gamepad::GamepadState;
use ui::hud::ScoreBoard;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);
const HELP_LINE: &str = " Arrows/WASD/click: steer   Space: pause/restart   Q/Esc: quit";

fn main() {
    let config = GameConfig::load();
    init_logging(&config);
    match &config.source {
        Some(path) => info!("config loaded from {}", path.display()),
        None => info!("using default settings"),
    }

    let mut store: Box<dyn HighScoreStore> = if config.high_score_file.as_os_str().is_empty() {
        info!("high score persistence disabled");
        Box::new(MemoryStore::default())
    } else {
        let fs = FileStore::new(&config.high_score_file);
        info!("high score file: {}", fs.path().display());
        Box::new(fs)
    };
    let high_score = store.load();
    info!(
        "starting: {} tiles, {} ms/tick, {} foods, high score {}",
        config.game.tile_count, config.game.tick_rate_ms, config.food.len(), high_score
    );

    let mut world = WorldState::new(&config, high_score, StdRng::from_entropy());
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        error!("terminal init failed: {e}");
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();
    if sound.is_none() {
        warn!("no audio output; playing silently");
    }

    let result = game_loop(&mut world, &mut renderer, sound.as_ref(), store.as_mut(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        error!("game loop aborted: {e}");
        eprintln!("Game error: {e}");
    }

    info!("exiting with score {} (high {})", world.score, world.high_score);
    println!();
    println!("Thanks for playing Snakeburst!");
    println!("Final Score: {}   High Score: {}", world.score, world.high_score);
}

/// File logger; the terminal belongs to the game. Logging is skipped
/// when no file is configured or it cannot be created.
fn init_logging(config: &GameConfig) {
    if config.log_file.as_os_str().is_empty() {
        return;
    }
    match File::create(&config.log_file) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Info, Config::default(), file) {
                eprintln!("Cannot start logger: {e}");
            }
        }
        Err(e) => eprintln!("Cannot open log file {}: {e}", config.log_file.display()),
    }
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    store: &mut dyn HighScoreStore,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    if gp.connected {
        info!("gamepad connected");
    }

    let mut clock = WallClock::new(Duration::from_millis(config.game.tick_rate_ms));
    let mut hud = ScoreBoard::new(world.high_score);

    loop {
        kb.drain_events(|col, row| renderer.pointer_to_surface(col, row));
        gp.update();

        if kb.quit || gp.cancel_pressed() {
            break;
        }

        let commands: Vec<Command> = kb.commands.iter().copied().chain(gp.commands()).collect();
        for cmd in commands {
            if let Some(event) = control::apply(world, cmd) {
                handle_event(&event, &mut hud, sound, store);
            }
        }

        if clock.poll() {
            for event in step::tick(world) {
                handle_event(&event, &mut hud, sound, store);
            }
        }

        renderer.begin_frame(world.tile_count as usize, world.cell_px)?;
        draw_frame(world, renderer.surface());
        renderer.put_status(&hud.line(), HELP_LINE);
        renderer.present()?;

        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn handle_event(
    event: &GameEvent,
    hud: &mut ScoreBoard,
    sound: Option<&SoundEngine>,
    store: &mut dyn HighScoreStore,
) {
    hud.apply(event);

    match event {
        GameEvent::FoodEaten { x, y, reward, score } => {
            log::debug!("ate +{reward} at ({x},{y}), score {score}");
            if let Some(sfx) = sound { sfx.play_eat(*reward); }
        }
        GameEvent::GameOver { score, length, cause } => {
            info!("game over: {} with score {score}, length {length}", cause.label());
            if let Some(sfx) = sound { sfx.play_game_over(); }
        }
        GameEvent::NewHighScore { score } => {
            info!("new high score {score}");
            if let Err(e) = store.store(*score) {
                warn!("{e}");
            }
            if let Some(sfx) = sound { sfx.play_high_score(); }
        }
        GameEvent::PauseToggled { paused } => info!("paused: {paused}"),
        GameEvent::Restarted => info!("restarted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collision::Collision;

    #[test]
    fn new_high_score_is_stored_and_shown() {
        let mut hud = ScoreBoard::new(40);
        let mut store = MemoryStore::default();

        handle_event(&GameEvent::FoodEaten { x: 6, y: 5, reward: 20, score: 70 }, &mut hud, None, &mut store);
        assert_eq!(store.load(), 0);
        assert_eq!(hud.line(), " Score: 70      High: 40");

        handle_event(&GameEvent::GameOver { score: 70, length: 3, cause: Collision::Wall }, &mut hud, None, &mut store);
        handle_event(&GameEvent::NewHighScore { score: 70 }, &mut hud, None, &mut store);
        assert_eq!(store.load(), 70);
        assert_eq!(hud.line(), " Score: 70      High: 70");

        handle_event(&GameEvent::Restarted, &mut hud, None, &mut store);
        assert_eq!(hud.line(), " Score: 0       High: 70");
        assert_eq!(store.load(), 70);
    }

    #[test]
    fn tick_events_reach_the_store() {
        let mut world = crate::sim::world::fixtures::world_with(&[(19, 3)], (0, 0), 10);
        world.score = 90;
        world.high_score = 50;
        let mut hud = ScoreBoard::new(world.high_score);
        let mut store = MemoryStore::default();

        for event in step::tick(&mut world) {
            handle_event(&event, &mut hud, None, &mut store);
        }
        assert_eq!(store.load(), 90);
        assert_eq!(hud.high_score, "90");
    }
}
