//! Run detection and special-piece planning
//!
//! A run is a maximal stretch of equal, non-zero colors along a row or column.
//! Runs of at least three clear. Some runs leave a special piece behind, checked in
//! this order:
//!
//! 1. runs of exactly five: a crystal at the middle
//! 2. a horizontal and a vertical run that cross: a bomb at the crossing
//! 3. runs of exactly four: a booster at the middle, sweeping across the run
//!
//! A run consumed by an earlier rule is not available to later ones.

use std::collections::BTreeMap;

use crate::board::Board;
use crate::grid::{dedupe, intersection, middle_index};
use crate::rng::SimpleRng;
use crate::types::{Axis, CellKind, Position, BOOSTER_RUN, CRYSTAL_RUN, MIN_RUN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub axis: Axis,
    pub cells: Vec<Position>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Cells to clear and the special pieces to leave in their place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearPlan {
    /// Every coordinate swept by the matched runs, first occurrence order
    pub targets: Vec<Position>,
    /// Coordinates that turn into a new piece instead of clearing
    pub spawns: BTreeMap<Position, CellKind>,
}

/// All runs of at least [`MIN_RUN`] along `axis`
pub fn find_runs(board: &Board, axis: Axis) -> Vec<Run> {
    let (lines, len) = match axis {
        Axis::Horizontal => (board.height(), board.width()),
        Axis::Vertical => (board.width(), board.height()),
    };
    let at = |line: usize, i: usize| match axis {
        Axis::Horizontal => Position::new(i, line),
        Axis::Vertical => Position::new(line, i),
    };

    let mut runs = Vec::new();
    for line in 0..lines {
        let mut current: Vec<Position> = Vec::new();
        for i in 1..len {
            let color = board[at(line, i)].match_color();
            let prev = board[at(line, i - 1)].match_color();
            if color != 0 && color == prev {
                if current.is_empty() {
                    current.push(at(line, i - 1));
                }
                current.push(at(line, i));
            } else if !current.is_empty() {
                if current.len() >= MIN_RUN {
                    runs.push(Run {
                        axis,
                        cells: std::mem::take(&mut current),
                    });
                }
                current.clear();
            }
        }
        if current.len() >= MIN_RUN {
            runs.push(Run {
                axis,
                cells: current,
            });
        }
    }
    runs
}

impl ClearPlan {
    fn absorb(&mut self, run: Run) {
        self.targets.extend(run.cells);
    }

    /// Turn every run of exactly `len` into a piece at its middle
    fn take_length(
        &mut self,
        runs: &mut Vec<Run>,
        len: usize,
        kind: impl Fn(Axis) -> CellKind,
        rng: &mut SimpleRng,
    ) {
        for i in (0..runs.len()).rev() {
            if runs[i].len() != len {
                continue;
            }
            let run = runs.remove(i);
            let middle = run.cells[middle_index(len, rng)];
            self.spawns.insert(middle, kind(run.axis));
            self.absorb(run);
        }
    }

    /// Pair each horizontal run with the last vertical run it crosses
    fn take_crossings(&mut self, horizontal: &mut Vec<Run>, vertical: &mut Vec<Run>) {
        for i in (0..horizontal.len()).rev() {
            let hit = vertical.iter().enumerate().rev().find_map(|(j, v)| {
                intersection(&horizontal[i].cells, &v.cells).map(|cross| (j, cross))
            });
            if let Some((j, cross)) = hit {
                self.spawns.insert(cross, CellKind::Bomb);
                let h = horizontal.remove(i);
                let v = vertical.remove(j);
                self.absorb(h);
                self.absorb(v);
            }
        }
    }
}

/// Plan the next clear, or `None` when the board has no run
pub fn plan_clear(board: &Board, rng: &mut SimpleRng) -> Option<ClearPlan> {
    let mut horizontal = find_runs(board, Axis::Horizontal);
    let mut vertical = find_runs(board, Axis::Vertical);
    if horizontal.is_empty() && vertical.is_empty() {
        return None;
    }

    let mut plan = ClearPlan::default();
    plan.take_length(&mut horizontal, CRYSTAL_RUN, |_| CellKind::Crystal, rng);
    plan.take_length(&mut vertical, CRYSTAL_RUN, |_| CellKind::Crystal, rng);
    plan.take_crossings(&mut horizontal, &mut vertical);
    plan.take_length(&mut horizontal, BOOSTER_RUN, Axis::booster, rng);
    plan.take_length(&mut vertical, BOOSTER_RUN, Axis::booster, rng);

    for run in horizontal.into_iter().chain(vertical) {
        plan.absorb(run);
    }
    plan.targets = dedupe(&plan.targets);
    Some(plan)
}
