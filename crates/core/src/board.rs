//! Board module - manages the game grid
//!
//! The board is a rectangular grid stored column by column, addressed `[x][y]`.
//! Row 0 is the bottom: gravity compacts every column toward it and new cells
//! enter at the top.
//!
//! Cloning a board is a full deep copy; every board handed to a host or a
//! subscriber is a clone, so the engine's own grid is never aliased.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseBoardError;
use crate::types::{Cell, CellKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Columns left to right, each holding rows bottom to top
    columns: Vec<Vec<Cell>>,
}

impl Board {
    /// Create a board of the given size with every cell empty
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            columns: vec![vec![Cell::empty(); height]; width],
        }
    }

    /// Build from columns (`columns[x][y]`).
    ///
    /// Panics if the columns are not all the same height.
    pub fn from_columns(columns: Vec<Vec<Cell>>) -> Self {
        let height = columns.first().map_or(0, Vec::len);
        assert!(
            columns.iter().all(|column| column.len() == height),
            "board columns must all have {} rows",
            height
        );
        Self { columns }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width() && pos.y < self.height()
    }

    /// Get cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.columns.get(x).and_then(|column| column.get(y))
    }

    /// Color at (x, y) for comparisons; 0 when out of bounds or not comparable
    #[inline]
    pub fn comparable_color(&self, x: usize, y: usize) -> u8 {
        match self.get(x, y) {
            Some(cell) if cell.kind.is_comparable() => cell.match_color(),
            _ => 0,
        }
    }

    pub fn column(&self, x: usize) -> &[Cell] {
        &self.columns[x]
    }

    /// Every coordinate in column-major, row-ascending order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let height = self.height();
        (0..self.width()).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    pub fn swap(&mut self, a: Position, b: Position) {
        let tmp = self[a];
        self[a] = self[b];
        self[b] = tmp;
    }

    pub fn has_empty(&self) -> bool {
        self.columns.iter().flatten().any(Cell::is_empty)
    }

    /// Drop every empty cell of a column and pad the top back to full height.
    /// Returns how many cells were removed.
    pub fn compact_column(&mut self, x: usize) -> usize {
        let column = &mut self.columns[x];
        let height = column.len();
        column.retain(|cell| !cell.is_empty());
        let removed = height - column.len();
        column.resize(height, Cell::empty());
        removed
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        &self.columns[pos.x][pos.y]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.columns[pos.x][pos.y]
    }
}

fn cell_token(cell: &Cell) -> String {
    let color = cell.match_color();
    match cell.kind {
        CellKind::Empty => ".".to_string(),
        CellKind::FallMarker => "F".to_string(),
        CellKind::Crystal => "C".to_string(),
        CellKind::Base => color.to_string(),
        CellKind::VerticalBooster => format!("V{}", color),
        CellKind::HorizontalBooster => format!("H{}", color),
        CellKind::Bomb => format!("B{}", color),
    }
}

fn parse_token(token: &str) -> Result<Cell, ParseBoardError> {
    let bad = || ParseBoardError::Token(token.to_string());
    let colored = |kind: CellKind, digits: &str| -> Result<Cell, ParseBoardError> {
        match digits.parse::<u8>() {
            Ok(color) if color > 0 => Ok(Cell::new(kind, color)),
            _ => Err(bad()),
        }
    };

    match token {
        "." => Ok(Cell::empty()),
        "F" => Ok(Cell::fall_marker()),
        "C" => Ok(Cell::crystal()),
        _ => {
            if let Some(rest) = token.strip_prefix('V') {
                colored(CellKind::VerticalBooster, rest)
            } else if let Some(rest) = token.strip_prefix('H') {
                colored(CellKind::HorizontalBooster, rest)
            } else if let Some(rest) = token.strip_prefix('B') {
                colored(CellKind::Bomb, rest)
            } else {
                colored(CellKind::Base, token)
            }
        }
    }
}

/// One line per row, top row first, cells separated by a space
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            let row: Vec<String> = (0..self.width())
                .map(|x| cell_token(&self.columns[x][y]))
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<&str>> = s
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let width = rows.first().map(Vec::len).ok_or(ParseBoardError::Empty)?;
        let height = rows.len();
        let mut board = Board::new(width, height);

        // Text lists the top row first.
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ParseBoardError::Ragged {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            let y = height - 1 - i;
            for (x, token) in row.iter().enumerate() {
                board.columns[x][y] = parse_token(token)?;
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lists_top_row_first() {
        let board: Board = "1 2\n3 4\n".parse().unwrap();
        assert_eq!(board.width(), 2);
        assert_eq!(board.height(), 2);
        assert_eq!(board[Position::new(0, 0)], Cell::base(3));
        assert_eq!(board[Position::new(1, 0)], Cell::base(4));
        assert_eq!(board[Position::new(0, 1)], Cell::base(1));
        assert_eq!(board[Position::new(1, 1)], Cell::base(2));
    }

    #[test]
    fn test_parse_special_tokens() {
        let board: Board = ". F C\nV2 H3 B1\n".parse().unwrap();
        assert_eq!(board[Position::new(0, 1)], Cell::empty());
        assert_eq!(board[Position::new(1, 1)], Cell::fall_marker());
        assert_eq!(board[Position::new(2, 1)], Cell::crystal());
        assert_eq!(
            board[Position::new(0, 0)],
            Cell::new(CellKind::VerticalBooster, 2)
        );
        assert_eq!(
            board[Position::new(1, 0)],
            Cell::new(CellKind::HorizontalBooster, 3)
        );
        assert_eq!(board[Position::new(2, 0)], Cell::new(CellKind::Bomb, 1));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<Board>(), Err(ParseBoardError::Empty));
        assert_eq!(
            "1 2\n3\n".parse::<Board>(),
            Err(ParseBoardError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            "1 X\n".parse::<Board>(),
            Err(ParseBoardError::Token("X".to_string()))
        );
        assert_eq!(
            "0\n".parse::<Board>(),
            Err(ParseBoardError::Token("0".to_string()))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        let text = "C . F\nB2 1 H3\n";
        let board: Board = text.parse().unwrap();
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn test_compact_column_pulls_cells_down() {
        let mut board: Board = "1\n.\n2\n.\n".parse().unwrap();
        assert_eq!(board.compact_column(0), 2);
        assert_eq!(
            board.column(0),
            &[Cell::base(2), Cell::base(1), Cell::empty(), Cell::empty()]
        );
    }

    #[test]
    fn test_positions_are_column_major() {
        let board = Board::new(2, 2);
        let positions: Vec<Position> = board.positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
    }

    #[test]
    #[should_panic]
    fn test_from_columns_rejects_ragged() {
        Board::from_columns(vec![vec![Cell::empty(); 2], vec![Cell::empty(); 3]]);
    }
}
