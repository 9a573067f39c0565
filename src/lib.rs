//! Match-3 engine (workspace facade crate).
//!
//! Re-exports the member crates as `match3::{core, types}` so hosts depend on a single
//! package while the implementation lives under `crates/`.

pub use match3_core as core;
pub use match3_types as types;
