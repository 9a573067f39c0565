//! Headless match-3 runner (default binary).
//!
//! Generates a board, then plays the first listed hint for a number of moves, logging
//! every event the engine publishes. Configure with `MATCH3_*` environment variables or
//! flags; set `RUST_LOG=debug` to watch cascades.

mod config;

use anyhow::{Context, Result};
use log::{info, warn};

use match3::core::{Board, Engine, EngineConfig, Event, EventKind, SwapOutcome};

use config::DemoConfig;

const LOGGED_EVENTS: [EventKind; 7] = [
    EventKind::Clear,
    EventKind::UseBomb,
    EventKind::UseHorizontal,
    EventKind::UseVertical,
    EventKind::FallExit,
    EventKind::NeedAdd,
    EventKind::CalculateEnd,
];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = DemoConfig::from_env().apply_args(&args)?;
    info!("starting with {:?}", config);

    let mut engine_config = EngineConfig::default().with_max_colors(config.colors);
    if let Some(seed) = config.seed {
        engine_config = engine_config.with_seed(seed);
    }
    let mut engine = Engine::with_config(engine_config);

    for kind in LOGGED_EVENTS {
        engine.subscribe(kind, |event: &Event| match event.positions() {
            Some(cells) => info!("{:?}: {} cells", event.kind(), cells.len()),
            None => info!("{:?}", event),
        });
    }
    engine.subscribe(EventKind::Refill, |_: &Event| info!("Refill"));

    engine
        .start(Board::new(config.width, config.height))
        .context("failed to generate the initial board")?;
    if !config.json {
        println!("{}", engine.board());
    }

    let mut played = 0u32;
    let mut cleared = 0u32;
    while played < config.moves {
        let Some(mv) = engine.hints().moves().next() else {
            warn!("no moves left after {} swaps", played);
            break;
        };
        let Some(target) = mv.target() else {
            warn!("hint {:?} points off the board", mv);
            break;
        };

        played += 1;
        if let SwapOutcome::Resolved { passes } = engine
            .attempt_swap(mv, target)
            .with_context(|| format!("swap {} failed", played))?
        {
            cleared += passes;
        }

        if !config.json {
            println!("move {}: ({}, {}) -> ({}, {})", played, mv.x, mv.y, target.x, target.y);
            println!("{}", engine.board());
        }
    }

    if config.json {
        let summary = serde_json::json!({
            "moves": played,
            "passes": cleared,
            "hints": engine.hints().tokens(),
            "board": engine.snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{} moves, {} clears", played, cleared);
    }
    Ok(())
}
