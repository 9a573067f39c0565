//! Grid helpers: position keys, palette shuffling and small list utilities.
//!
//! Keys are `x_y` for plain coordinates and `x_y_dx_dy` when a swap direction is
//! attached; hint tokens are stored in the four-component form.

use std::collections::HashSet;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::ParseKeyError;
use crate::rng::SimpleRng;
use crate::types::{Direction, Position};

/// Encode a position as a key, including its direction if it has one
pub fn position_key(pos: &Position) -> String {
    match pos.direction {
        Some(dir) => format!("{}_{}_{}_{}", pos.x, pos.y, dir.dx, dir.dy),
        None => format!("{}_{}", pos.x, pos.y),
    }
}

/// Four-component key; a missing direction encodes as `0_0`
pub fn probe_key(pos: &Position) -> String {
    let dir = pos.direction.unwrap_or(Direction::new(0, 0));
    format!("{}_{}_{}_{}", pos.x, pos.y, dir.dx, dir.dy)
}

/// Decode a key produced by [`position_key`] or [`probe_key`]
pub fn parse_key(key: &str) -> Result<Position, ParseKeyError> {
    let parts: Vec<&str> = key.split('_').collect();

    fn component<T: FromStr>(s: &str) -> Result<T, ParseKeyError> {
        s.parse().map_err(|_| ParseKeyError::Component {
            component: s.to_string(),
        })
    }

    match parts.as_slice() {
        [x, y] => Ok(Position::new(component(x)?, component(y)?)),
        [x, y, dx, dy] => Ok(Position::with_direction(
            component(x)?,
            component(y)?,
            component(dx)?,
            component(dy)?,
        )),
        _ => Err(ParseKeyError::Arity(parts.len())),
    }
}

/// Shuffled copy of `values` (Fisher-Yates)
pub fn shuffle<T: Clone>(values: &[T], rng: &mut SimpleRng) -> Vec<T> {
    let mut out = values.to_vec();
    rng.shuffle(&mut out);
    out
}

/// First element of `a` that also appears in `b`
pub fn intersection<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Option<T> {
    a.iter().find(|item| b.contains(item)).cloned()
}

/// Stable de-duplication keeping the first occurrence
pub fn dedupe<T: Eq + Hash + Clone>(list: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(list.len());
    list.iter()
        .filter(|item| seen.insert((*item).clone()))
        .cloned()
        .collect()
}

/// Index of the middle of a run of `len` cells.
///
/// Odd lengths have an exact middle; for even lengths a coin flip picks one of the
/// two central cells.
pub fn middle_index(len: usize, rng: &mut SimpleRng) -> usize {
    let lower = (len.saturating_sub(1)) / 2;
    if len % 2 == 0 && rng.coin_flip() {
        lower + 1
    } else {
        lower
    }
}
