//! Headless demo shell for the Maze Tanks simulation
//!
//! Runs a deterministic session with scripted inputs and logs the events the
//! sim emits. A real frontend would poll controllers, feed `TickInput`s, and
//! draw the entity collections; this binary exercises the same embedding
//! contract without a window.

use std::path::Path;

use maze_tanks::sim::{GameEvent, PlayerInput};
use maze_tanks::{GameConfig, GameState, TickInput, tick};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let seed = parse_flag(&args, "--seed").unwrap_or_else(system_seed);
    let ticks = parse_flag(&args, "--ticks").unwrap_or(600);
    let config = match parse_flag_str(&args, "--config") {
        Some(path) => match GameConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    log::info!("Maze Tanks starting (seed {seed}, {ticks} ticks)");
    let mut state = GameState::new(seed, config);

    for _ in 0..ticks {
        let time_ticks = state.time_ticks;
        tick(&mut state, &scripted_input(time_ticks));
        for event in state.drain_events() {
            match event {
                GameEvent::RoundStart { round } => log::info!("Round {round} started"),
                GameEvent::Shoot { player } => log::debug!("Player {player} fired"),
                GameEvent::Ricochet => log::debug!("Ricochet"),
                GameEvent::Explode { player } => log::info!("Player {player} destroyed"),
            }
        }
    }

    log::info!(
        "Done after {} ticks: round {}, {} tanks, {} bullets live",
        state.time_ticks,
        state.round,
        state.tanks.len(),
        state.bullets.len()
    );
}

/// Canned inputs so the demo produces movement, ricochets, and the odd kill
fn scripted_input(time_ticks: u64) -> TickInput {
    let mut input = TickInput::default();
    input.players[0] = PlayerInput {
        forward: true,
        turn_right: time_ticks % 90 < 30,
        fire: time_ticks % 120 == 0,
        ..Default::default()
    };
    input.players[1] = PlayerInput {
        forward: time_ticks % 2 == 0,
        turn_left: time_ticks % 70 < 20,
        fire: time_ticks % 150 == 10,
        ..Default::default()
    };
    input
}

fn parse_flag(args: &[String], flag: &str) -> Option<u64> {
    parse_flag_str(args, flag).and_then(|v| v.parse().ok())
}

fn parse_flag_str(args: &[String], flag: &str) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            return iter.next().cloned();
        }
    }
    None
}

fn system_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
