//! Hint scan - every swap that would immediately clear something
//!
//! A hint is encoded as a four-component key `x_y_dx_dy`: the piece at `(x, y)`
//! moving one step by `(dx, dy)` lands inside a run of three (or is a crystal
//! swap). The set is rebuilt whenever the board stabilizes.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::grid::{parse_key, probe_key};
use crate::types::{Axis, Cell, CellKind, Direction, Position};

/// Whether the cell at (x, y) sits inside a run of at least three along `axis`.
///
/// Looks two cells either way; neighbors that are empty, fall markers or crystals never
/// compare equal. A cell without a color never forms a line.
pub fn forms_line(board: &Board, x: usize, y: usize, axis: Axis) -> bool {
    let color = board.get(x, y).map_or(0, Cell::match_color);
    if color == 0 {
        return false;
    }

    let mut around: ArrayVec<u8, 4> = ArrayVec::new();
    for offset in [-2isize, -1, 1, 2] {
        let neighbor = match axis {
            Axis::Horizontal => x.checked_add_signed(offset).map(|nx| (nx, y)),
            Axis::Vertical => y.checked_add_signed(offset).map(|ny| (x, ny)),
        };
        around.push(neighbor.map_or(0, |(nx, ny)| board.comparable_color(nx, ny)));
    }

    around
        .windows(2)
        .any(|pair| pair[0] == color && pair[1] == color)
}

/// Whether the cell at (x, y) completes a line on either axis
pub fn forms_run(board: &Board, x: usize, y: usize) -> bool {
    forms_line(board, x, y, Axis::Horizontal) || forms_line(board, x, y, Axis::Vertical)
}

/// A crystal swapped with a colored cell or another crystal always clears
fn is_crystal_swap(a: &Cell, b: &Cell) -> bool {
    let activates = |crystal: &Cell, other: &Cell| {
        crystal.kind == CellKind::Crystal
            && (other.kind == CellKind::Crystal || other.color.is_some())
    };
    activates(a, b) || activates(b, a)
}

/// Key for the piece at `from` taking one step along `dir`
fn hint_key(from: Position, dir: Direction) -> String {
    probe_key(&Position::with_direction(from.x, from.y, dir.dx, dir.dy))
}

/// Encoded legal moves for one stable board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintSet {
    tokens: Vec<String>,
}

impl HintSet {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tokens.iter().any(|token| token == key)
    }

    /// Whether the piece at `pos` moving by its direction is a listed hint.
    /// A position without a direction never matches.
    pub fn contains(&self, pos: &Position) -> bool {
        self.contains_key(&probe_key(pos))
    }

    /// Hints decoded back into positions carrying their swap direction
    pub fn moves(&self) -> impl Iterator<Item = Position> + '_ {
        self.tokens.iter().filter_map(|token| parse_key(token).ok())
    }
}

/// Try every orthogonal neighbor swap and record the ones that produce a clear
pub fn scan_hints(board: &Board) -> HintSet {
    let mut scratch = board.clone();
    let mut tokens = Vec::new();

    for here in board.positions() {
        for dir in [Direction::RIGHT, Direction::UP] {
            let next = Position::with_direction(here.x, here.y, dir.dx, dir.dy).target();
            if let Some(next) = next.filter(|pos| board.contains(*pos)) {
                probe_pair(&mut scratch, here, next, dir, &mut tokens);
            }
        }
    }

    HintSet { tokens }
}

/// `b` is one step from `a` along `dir`
fn probe_pair(
    scratch: &mut Board,
    a: Position,
    b: Position,
    dir: Direction,
    tokens: &mut Vec<String>,
) {
    if is_crystal_swap(&scratch[a], &scratch[b]) {
        tokens.push(hint_key(b, dir.reversed()));
        tokens.push(hint_key(a, dir));
        return;
    }

    scratch.swap(a, b);
    // The piece now at `a` came from `b`, and vice versa.
    if forms_run(scratch, a.x, a.y) {
        tokens.push(hint_key(b, dir.reversed()));
    }
    if forms_run(scratch, b.x, b.y) {
        tokens.push(hint_key(a, dir));
    }
    scratch.swap(a, b);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_forms_line_checks_all_three_windows() {
        // Candidate at the left end, middle and right end of a run
        let b = board("2 2 2 1 3\n");
        assert!(forms_line(&b, 0, 0, Axis::Horizontal));
        assert!(forms_line(&b, 1, 0, Axis::Horizontal));
        assert!(forms_line(&b, 2, 0, Axis::Horizontal));
        assert!(!forms_line(&b, 3, 0, Axis::Horizontal));
        assert!(!forms_line(&b, 1, 0, Axis::Vertical));
    }

    #[test]
    fn test_forms_line_ignores_uncomparable_neighbors() {
        let b = board("2 C 2 F 2\n");
        assert!(!forms_line(&b, 2, 0, Axis::Horizontal));
        // Out-of-bounds and empty neighbors never pair up with a colorless center
        let b = board("C\n.\n.\n");
        assert!(!forms_line(&b, 0, 2, Axis::Vertical));
    }

    #[test]
    fn test_boosters_match_by_color() {
        let b = board("1\nH1\n1\n");
        assert!(forms_line(&b, 0, 1, Axis::Vertical));
    }

    #[test]
    fn test_scan_records_direction_of_moving_piece() {
        // Moving the 2 at (3, 0) left lands it next to two 2s.
        let b = board("3 1 3 1\n2 2 1 2\n");
        let hints = scan_hints(&b);
        assert!(hints.contains(&Position::with_direction(3, 0, -1, 0)));
        assert!(hints.contains_key("3_0_-1_0"));
        assert!(!hints.contains(&Position::new(3, 0)));
    }

    #[test]
    fn test_scan_on_dead_board_is_empty() {
        let b = board("1 2 3\n2 3 1\n3 1 2\n");
        // Latin square: after any single swap every row and column still holds two colors.
        assert!(scan_hints(&b).is_empty());
    }

    #[test]
    fn test_crystal_swaps_are_hints_both_ways() {
        let b = board("1 2\nC 3\n");
        let hints = scan_hints(&b);
        assert!(hints.contains(&Position::with_direction(0, 0, 1, 0)));
        assert!(hints.contains(&Position::with_direction(1, 0, -1, 0)));
        assert!(hints.contains(&Position::with_direction(0, 0, 0, 1)));
        assert!(hints.contains(&Position::with_direction(0, 1, 0, -1)));
    }

    #[test]
    fn test_moves_decode_tokens() {
        let b = board("3 1 3 1\n2 2 1 2\n");
        let hints = scan_hints(&b);
        assert_eq!(hints.moves().count(), hints.len());
        let units = [Direction::LEFT, Direction::RIGHT, Direction::DOWN, Direction::UP];
        for mv in hints.moves() {
            assert!(mv.direction.is_some_and(|dir| units.contains(&dir)));
            assert!(mv.target().is_some_and(|to| b.contains(to)));
        }
    }
}
