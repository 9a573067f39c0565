//! Core match-3 logic - pure, deterministic, and testable
//!
//! This crate holds the board, the rules that resolve a swap, and the generator that
//! keeps the board playable. It does no rendering, timing or I/O: a host calls the
//! [`Engine`] and animates the [`Event`]s it publishes.
//!
//! - **Deterministic**: the same seed produces the same boards and the same cascades
//! - **Synchronous**: a swap, with every cascade it triggers, resolves before the call returns
//! - **Isolated**: hosts only ever see copies of the board
//!
//! # Module Structure
//!
//! - [`board`]: column-major grid, compaction, text format
//! - [`grid`]: position keys, shuffling, list helpers
//! - [`events`]: per-engine publish/subscribe channel
//! - [`hints`]: legal-move scan
//! - [`runs`]: run detection and special-piece planning
//! - [`generator`]: solvable refill with retries
//! - [`engine`]: the swap/cascade state machine
//! - [`rng`]: seeded LCG
//!
//! # Rules
//!
//! - **Runs**: three or more equal colors in a row or column clear
//! - **Crystal**: a run of five leaves a crystal; swapping a crystal clears every cell of the partner's color
//! - **Bomb**: crossing horizontal and vertical runs leave a bomb that clears a 3x3 square
//! - **Boosters**: a run of four leaves a booster that clears the line across the run
//! - **Gravity**: cleared cells are removed, columns fall toward row 0, the generator refills the top
//! - **Fall markers**: reaching row 0 during a clear, they leave the board
//!
//! # Example
//!
//! ```
//! use match3_core::{Board, Engine, EngineConfig, Event, EventKind, SwapOutcome};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut engine = Engine::with_config(EngineConfig::default().with_seed(7));
//!
//! let clears = Rc::new(RefCell::new(0));
//! let counter = Rc::clone(&clears);
//! engine.subscribe(EventKind::Clear, move |_: &Event| *counter.borrow_mut() += 1);
//!
//! engine.start(Board::new(6, 6)).unwrap();
//! assert!(!engine.hints().is_empty());
//!
//! // Play the first legal move
//! let mv = engine.hints().moves().next().unwrap();
//! assert!(engine.probe_step(mv));
//! let outcome = engine.attempt_swap(mv, mv.target().unwrap()).unwrap();
//!
//! assert!(matches!(outcome, SwapOutcome::Resolved { passes } if passes >= 1));
//! assert!(*clears.borrow() >= 1);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod generator;
pub mod grid;
pub mod hints;
pub mod rng;
pub mod runs;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use engine::{Engine, SwapOutcome};
pub use error::{EngineError, GenerateError, ParseBoardError, ParseKeyError};
pub use events::{Event, EventChannel, EventKind, HandlerId};
pub use generator::{BoardGenerator, Filled};
pub use grid::{dedupe, intersection, parse_key, position_key, probe_key, shuffle};
pub use hints::{scan_hints, HintSet};
pub use rng::SimpleRng;
pub use runs::{find_runs, plan_clear, ClearPlan, Run};
