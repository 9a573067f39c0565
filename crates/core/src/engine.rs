//! Match engine - swap resolution, cascades and special pieces
//!
//! The engine owns the only mutable board. Everything it hands out (snapshots,
//! event payloads) is a copy. A swap runs to completion before `attempt_swap`
//! returns:
//!
//! 1. the two cells are swapped on a working copy
//! 2. a crystal swap clears a whole color; otherwise runs are cleared
//! 3. columns compact, the generator refills them, the result becomes the board
//! 4. the new board is scanned again, repeating 3-4 until no run is left
//! 5. `CalculateEnd` is published
//!
//! A swap that produces no run leaves the board untouched.

use std::collections::{BTreeMap, HashSet};

use arrayvec::ArrayVec;
use log::debug;

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::events::{Event, EventChannel, EventKind, HandlerId};
use crate::generator::BoardGenerator;
use crate::hints::HintSet;
use crate::rng::SimpleRng;
use crate::runs::plan_clear;
use crate::types::{Cell, CellKind, Position};

/// What `attempt_swap` did with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Positions were not orthogonal neighbors; nothing happened
    Rejected,
    /// The swap ran; `passes` counts the clears it caused (0 when nothing matched)
    Resolved { passes: u32 },
}

/// Who triggered a resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    User,
    Cascade,
}

/// Coordinates emptied during one clear, in firing order
#[derive(Debug, Default)]
struct Fired {
    order: Vec<Position>,
    seen: HashSet<Position>,
}

impl Fired {
    fn push(&mut self, pos: Position) {
        if self.seen.insert(pos) {
            self.order.push(pos);
        }
    }

    fn contains(&self, pos: &Position) -> bool {
        self.seen.contains(pos)
    }
}

/// Clipped 3x3 square around `center`
fn bomb_area(board: &Board, center: Position) -> ArrayVec<Position, 9> {
    let mut area = ArrayVec::new();
    let xs = center.x.saturating_sub(1)..=(center.x + 1).min(board.width() - 1);
    for x in xs {
        let ys = center.y.saturating_sub(1)..=(center.y + 1).min(board.height() - 1);
        for y in ys {
            area.push(Position::new(x, y));
        }
    }
    area
}

#[derive(Debug)]
pub struct Engine {
    board: Board,
    hints: HintSet,
    generator: BoardGenerator,
    rng: SimpleRng,
    events: EventChannel,
}

impl Engine {
    /// Engine with `max_colors` colors (at least 3) and a clock seed
    pub fn new(max_colors: u8) -> Self {
        Self::with_config(EngineConfig::default().with_max_colors(max_colors))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let rng = config.seed.map_or_else(SimpleRng::from_clock, SimpleRng::new);
        Self {
            board: Board::new(0, 0),
            hints: HintSet::default(),
            generator: BoardGenerator::new(config.max_colors, config.max_fill_attempts),
            rng,
            events: EventChannel::new(),
        }
    }

    /// Fill `board`'s empty cells, adopt it and publish `Refill`
    pub fn start(&mut self, board: Board) -> Result<()> {
        self.install(board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Independent copy of the current board
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn hints(&self) -> &HintSet {
        &self.hints
    }

    pub fn palette(&self) -> &[u8] {
        self.generator.palette()
    }

    /// Whether dragging the piece at `pos` in its direction would clear something.
    /// Crystals can always be dragged.
    pub fn probe_step(&self, pos: Position) -> bool {
        assert!(
            self.board.contains(pos),
            "probe at ({}, {}) outside {}x{} board",
            pos.x,
            pos.y,
            self.board.width(),
            self.board.height()
        );
        if self.board[pos.at()].kind == CellKind::Crystal {
            return true;
        }
        self.hints.contains(&pos)
    }

    /// Swap two neighboring cells and resolve everything that follows
    pub fn attempt_swap(&mut self, a: Position, b: Position) -> Result<SwapOutcome> {
        let (a, b) = (a.at(), b.at());
        if !a.is_adjacent(&b) {
            debug!("ignoring swap {:?} <-> {:?}: not neighbors", a, b);
            return Ok(SwapOutcome::Rejected);
        }
        assert!(
            self.board.contains(a) && self.board.contains(b),
            "swap {:?} <-> {:?} outside {}x{} board",
            a,
            b,
            self.board.width(),
            self.board.height()
        );

        let mut working = self.board.clone();
        working.swap(a, b);

        let crystal = working[a].kind == CellKind::Crystal || working[b].kind == CellKind::Crystal;
        let passes = if crystal {
            self.activate_crystal(working, a, b)?
        } else {
            self.cascade(working, Pass::User)?
        };

        self.events.publish(&Event::CalculateEnd);
        Ok(SwapOutcome::Resolved { passes })
    }

    /// Resolve runs already present on the current board, then publish `CalculateEnd`.
    /// Returns the number of clears. A stable board is left untouched.
    pub fn settle(&mut self) -> Result<u32> {
        let passes = self.cascade(self.board.clone(), Pass::Cascade)?;
        self.events.publish(&Event::CalculateEnd);
        Ok(passes)
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&Event) + 'static,
    {
        self.events.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, kind: EventKind, handler: Option<HandlerId>) {
        self.events.unsubscribe(kind, handler);
    }

    fn install(&mut self, board: Board) -> Result<()> {
        let filled = self.generator.fill(&board, &mut self.rng)?;
        self.board = filled.board;
        self.hints = filled.hints;
        self.events.publish(&Event::Refill(self.board.clone()));
        Ok(())
    }

    /// Clear runs, refill and rescan until the board is stable
    fn cascade(&mut self, mut board: Board, mut pass: Pass) -> Result<u32> {
        let mut passes = 0;
        while let Some(plan) = plan_clear(&board, &mut self.rng) {
            passes += 1;
            debug!(
                "{:?} pass {}: {} cells matched, {} new pieces",
                pass,
                passes,
                plan.targets.len(),
                plan.spawns.len()
            );
            self.clear(&mut board, &plan.targets, &plan.spawns);
            self.install(board)?;
            board = self.board.clone();
            pass = Pass::Cascade;
        }
        Ok(passes)
    }

    fn activate_crystal(&mut self, mut board: Board, a: Position, b: Position) -> Result<u32> {
        let (first, second) = (board[a], board[b]);
        let clear_all = first.kind == CellKind::Crystal && second.kind == CellKind::Crystal;
        let color = first.color.or(second.color);
        if color.is_none() && !clear_all {
            return self.cascade(board, Pass::User);
        }

        let mut targets = vec![a, b];
        targets.extend(
            board
                .positions()
                .filter(|&pos| clear_all || board[pos].color == color)
                .filter(|pos| *pos != a && *pos != b),
        );
        debug!(
            "crystal at swap {:?} <-> {:?} clears {} cells",
            a,
            b,
            targets.len()
        );

        self.clear(&mut board, &targets, &BTreeMap::new());
        self.install(board)?;
        let passes = self.cascade(self.board.clone(), Pass::Cascade)?;
        Ok(passes + 1)
    }

    /// Empty `targets` (detonating specials), place `spawns`, compact and report
    fn clear(
        &mut self,
        board: &mut Board,
        targets: &[Position],
        spawns: &BTreeMap<Position, CellKind>,
    ) {
        let targeted: HashSet<Position> = targets.iter().map(Position::at).collect();
        let mut fired = Fired::default();

        for pos in board.positions() {
            if board[pos].kind == CellKind::FallMarker {
                continue;
            }
            if targeted.contains(&pos) && !spawns.contains_key(&pos) {
                fired.push(pos);
                self.detonate(board, pos, &targeted, &mut fired);
            }
        }

        for pos in &fired.order {
            board[*pos] = Cell::empty();
        }
        for (pos, kind) in spawns {
            board[*pos].become_kind(*kind);
        }
        if !fired.order.is_empty() {
            self.events.publish(&Event::Clear(fired.order));
        }

        let mut need: Vec<usize> = (0..board.width())
            .map(|x| board.compact_column(x))
            .collect();

        let mut exits = Vec::new();
        for (x, count) in need.iter_mut().enumerate() {
            let bottom = Position::new(x, 0);
            if board.height() == 0 || board[bottom].kind != CellKind::FallMarker {
                continue;
            }
            exits.push(bottom);
            board[bottom] = Cell::empty();
            board.compact_column(x);
            *count += 1;
        }

        if !exits.is_empty() {
            self.events.publish(&Event::FallExit(exits));
        }
        if need.iter().any(|&count| count > 0) {
            self.events.publish(&Event::NeedAdd(need));
        }
    }

    /// Fire everything a special piece at `pos` reaches, recursively
    fn detonate(
        &mut self,
        board: &Board,
        pos: Position,
        targeted: &HashSet<Position>,
        fired: &mut Fired,
    ) {
        let (area, report): (Vec<Position>, fn(Vec<Position>) -> Event) = match board[pos].kind {
            CellKind::Bomb => (bomb_area(board, pos).into_iter().collect(), Event::UseBomb),
            CellKind::HorizontalBooster => (
                (0..board.width()).map(|x| Position::new(x, pos.y)).collect(),
                Event::UseHorizontal,
            ),
            CellKind::VerticalBooster => (
                (0..board.height()).map(|y| Position::new(pos.x, y)).collect(),
                Event::UseVertical,
            ),
            _ => return,
        };

        let mut used = Vec::new();
        for cell in area {
            let spared = targeted.contains(&cell) || fired.contains(&cell);
            if spared || !board[cell].kind.is_comparable() {
                continue;
            }
            fired.push(cell);
            self.detonate(board, cell, targeted, fired);
            used.push(cell);
        }

        if !used.is_empty() {
            debug!("{:?} at {:?} fired {} cells", board[pos].kind, pos, used.len());
            self.events.publish(&report(used));
        }
    }
}
