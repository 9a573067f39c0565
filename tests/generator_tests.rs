//! Board generator tests - stable, playable fills

use match3::core::{find_runs, scan_hints, Board, BoardGenerator, EngineError, SimpleRng};
use match3::types::{Axis, CellKind};
use proptest::prelude::*;

#[test]
fn test_fill_is_deterministic_per_seed() {
    let generator = BoardGenerator::new(4, 5);
    let a = generator.fill(&Board::new(8, 8), &mut SimpleRng::new(77)).unwrap();
    let b = generator.fill(&Board::new(8, 8), &mut SimpleRng::new(77)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_returned_hints_match_a_fresh_scan() {
    let generator = BoardGenerator::new(5, 5);
    let filled = generator
        .fill(&Board::new(7, 6), &mut SimpleRng::new(5))
        .unwrap();
    assert_eq!(filled.hints, scan_hints(&filled.board));
}

#[test]
fn test_exhaustion_reports_attempt_count() {
    let generator = BoardGenerator::new(3, 3);
    let err = generator
        .fill(&Board::new(2, 1), &mut SimpleRng::new(1))
        .unwrap_err();
    match err {
        EngineError::RetryExhausted { attempts, .. } => assert_eq!(attempts, 3),
    }
    assert!(err.to_string().contains('3'));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fill_is_stable_and_playable(
        width in 6usize..10,
        height in 6usize..10,
        colors in 3u8..=5,
        seed in any::<u32>(),
    ) {
        let generator = BoardGenerator::new(colors, 5);
        let filled = generator
            .fill(&Board::new(width, height), &mut SimpleRng::new(seed))
            .unwrap();

        prop_assert_eq!(filled.placed, width * height);
        prop_assert!(!filled.hints.is_empty());
        prop_assert!(find_runs(&filled.board, Axis::Horizontal).is_empty());
        prop_assert!(find_runs(&filled.board, Axis::Vertical).is_empty());
        for pos in filled.board.positions() {
            let cell = filled.board[pos];
            prop_assert_eq!(cell.kind, CellKind::Base);
            prop_assert!(cell.color.is_some_and(|c| (1..=colors).contains(&c)));
        }
    }
}
