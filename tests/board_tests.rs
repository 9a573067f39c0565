//! Board tests - grid layout, compaction and the text format

use match3::core::{Board, ParseBoardError};
use match3::types::{Cell, Position};

#[test]
fn test_board_new_empty() {
    let board = Board::new(5, 4);
    assert_eq!(board.width(), 5);
    assert_eq!(board.height(), 4);
    assert!(board.has_empty());

    for pos in board.positions() {
        assert!(board.contains(pos), "{:?} should be inside", pos);
        assert_eq!(board.get(pos.x, pos.y), Some(&Cell::empty()));
    }
    assert_eq!(board.positions().count(), 20);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(3, 3);
    assert_eq!(board.get(3, 0), None);
    assert_eq!(board.get(0, 3), None);
    assert!(!board.contains(Position::new(3, 3)));
    assert_eq!(board.comparable_color(7, 7), 0);
}

#[test]
fn test_row_zero_is_the_bottom_line_of_text() {
    let board: Board = "1 2 3\n4 5 1\n".parse().unwrap();
    assert_eq!(board[Position::new(0, 0)], Cell::base(4));
    assert_eq!(board[Position::new(2, 1)], Cell::base(3));
    assert_eq!(board.column(1), &[Cell::base(5), Cell::base(2)]);
}

#[test]
fn test_comparable_color_skips_uncolored_kinds() {
    let board: Board = "C F . H2\n".parse().unwrap();
    assert_eq!(board.comparable_color(0, 0), 0);
    assert_eq!(board.comparable_color(1, 0), 0);
    assert_eq!(board.comparable_color(2, 0), 0);
    assert_eq!(board.comparable_color(3, 0), 2);
}

#[test]
fn test_parse_rejects_malformed_specials() {
    for token in ["V", "H0", "B-1", "Vé", "CC", "2F"] {
        assert_eq!(
            token.parse::<Board>(),
            Err(ParseBoardError::Token(token.to_string())),
            "token {:?}",
            token
        );
    }
}

#[test]
fn test_blank_lines_are_ignored() {
    let board: Board = "\n1 2\n\n3 1\n\n".parse().unwrap();
    assert_eq!(board.height(), 2);
    assert_eq!(board.to_string(), "1 2\n3 1\n");
}

#[test]
fn test_swap_and_clone_are_independent() {
    let original: Board = "1 2\n".parse().unwrap();
    let mut copy = original.clone();
    copy.swap(Position::new(0, 0), Position::new(1, 0));

    assert_eq!(copy.to_string(), "2 1\n");
    assert_eq!(original.to_string(), "1 2\n");
}

#[test]
fn test_board_serializes_as_columns() {
    let board: Board = "1 2\n".parse().unwrap();
    let json = serde_json::to_value(&board).unwrap();
    assert_eq!(json["columns"].as_array().map(Vec::len), Some(2));

    let back: Board = serde_json::from_value(json).unwrap();
    assert_eq!(back, board);
}
