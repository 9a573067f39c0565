//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine and by hosts.
//! All types are plain data with serde derives, so a host can ship them over any wire
//! format it likes without the engine knowing about it.
//!
//! # Coordinates
//!
//! Boards are addressed `[column][row]`:
//!
//! - **x**: column index, `0..width`, left to right
//! - **y**: row index, `0..height`, bottom to top (row 0 is where pieces settle)
//!
//! # Cell kinds
//!
//! | Kind | Colored | Effect when cleared |
//! |------|---------|---------------------|
//! | `Empty` | no | - |
//! | `FallMarker` | no | exits through the bottom row |
//! | `Crystal` | no | swap clears every cell of the partner's color |
//! | `Base` | yes | - |
//! | `VerticalBooster` | yes | clears its column |
//! | `HorizontalBooster` | yes | clears its row |
//! | `Bomb` | yes | clears the 3x3 square around it |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Cell, CellKind, Position};
//!
//! let cell = Cell::base(2);
//! assert_eq!(cell.kind, CellKind::Base);
//! assert_eq!(cell.match_color(), 2);
//!
//! // Crystals never carry a color
//! assert_eq!(Cell::crystal().color, None);
//!
//! let a = Position::new(1, 1);
//! assert!(a.is_adjacent(&Position::new(1, 2)));
//! assert!(!a.is_adjacent(&Position::new(2, 2)));
//! ```

use serde::{Deserialize, Serialize};

/// Smallest palette the engine will play with
pub const MIN_COLORS: u8 = 3;

/// Fill attempts before board generation is considered impossible
pub const MAX_FILL_ATTEMPTS: u32 = 5;

/// Minimum run length that clears
pub const MIN_RUN: usize = 3;

/// Run length that spawns a line booster
pub const BOOSTER_RUN: usize = 4;

/// Run length that spawns a crystal
pub const CRYSTAL_RUN: usize = 5;

/// Kind of a board cell.
///
/// The declaration order is meaningful: every kind ranked at or above [`CellKind::Base`]
/// carries a color, everything below does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    FallMarker,
    Crystal,
    Base,
    VerticalBooster,
    HorizontalBooster,
    Bomb,
}

impl CellKind {
    /// Whether cells of this kind keep a color
    pub fn is_colored(self) -> bool {
        self >= CellKind::Base
    }

    /// Whether neighbors of this kind take part in color comparisons and detonations
    pub fn is_comparable(self) -> bool {
        !matches!(
            self,
            CellKind::Empty | CellKind::FallMarker | CellKind::Crystal
        )
    }
}

/// One grid slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Palette color `1..=max_colors`, `None` for uncolored kinds
    pub color: Option<u8>,
}

impl Cell {
    pub const fn empty() -> Self {
        Self {
            kind: CellKind::Empty,
            color: None,
        }
    }

    pub const fn fall_marker() -> Self {
        Self {
            kind: CellKind::FallMarker,
            color: None,
        }
    }

    pub const fn crystal() -> Self {
        Self {
            kind: CellKind::Crystal,
            color: None,
        }
    }

    pub const fn base(color: u8) -> Self {
        Self {
            kind: CellKind::Base,
            color: Some(color),
        }
    }

    /// Create a cell of any kind, dropping the color for kinds that cannot carry one
    pub fn new(kind: CellKind, color: u8) -> Self {
        Self {
            kind,
            color: kind.is_colored().then_some(color),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }

    /// Color used for run detection; 0 means "matches nothing"
    #[inline]
    pub fn match_color(&self) -> u8 {
        self.color.unwrap_or(0)
    }

    /// Change the kind in place, dropping the color if the new kind ranks below `Base`
    pub fn become_kind(&mut self, kind: CellKind) {
        self.kind = kind;
        if !kind.is_colored() {
            self.color = None;
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// Unit step a piece takes during a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

impl Direction {
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };
    pub const DOWN: Direction = Direction { dx: 0, dy: -1 };
    pub const UP: Direction = Direction { dx: 0, dy: 1 };

    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    /// The step back to where the piece came from
    pub const fn reversed(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

/// Board coordinate, optionally carrying the direction of a prospective swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            direction: None,
        }
    }

    pub const fn with_direction(x: usize, y: usize, dx: i8, dy: i8) -> Self {
        Self {
            x,
            y,
            direction: Some(Direction { dx, dy }),
        }
    }

    /// Same coordinate without the direction hint
    pub const fn at(&self) -> Self {
        Self::new(self.x, self.y)
    }

    /// Coordinate reached by following the direction hint.
    ///
    /// Returns `None` without a direction or when the step leaves the non-negative quadrant.
    pub fn target(&self) -> Option<Position> {
        let dir = self.direction?;
        let x = self.x.checked_add_signed(dir.dx as isize)?;
        let y = self.y.checked_add_signed(dir.dy as isize)?;
        Some(Position::new(x, y))
    }

    /// Orthogonal neighbors at distance exactly one
    pub fn is_adjacent(&self, other: &Position) -> bool {
        (self.x == other.x && self.y.abs_diff(other.y) == 1)
            || (self.y == other.y && self.x.abs_diff(other.x) == 1)
    }
}

/// Scan axis for runs and line tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Booster spawned by a 4-run along this axis; it sweeps across the run
    pub fn booster(self) -> CellKind {
        match self {
            Axis::Horizontal => CellKind::VerticalBooster,
            Axis::Vertical => CellKind::HorizontalBooster,
        }
    }
}
