//! Board generator - fills empty cells so the board is stable and playable
//!
//! Empty cells are filled column by column, bottom to top, each with the first color of
//! a freshly shuffled palette that does not complete a run of three. A fill that placed
//! at least one cell must leave at least one hint; a board that arrives already full is
//! accepted as it is.
//!
//! A single attempt can fail ([`GenerateError`]); [`BoardGenerator::fill`] retries with
//! new shuffles and only gives up once the attempt budget is spent.

use log::{error, trace, warn};

use crate::board::Board;
use crate::error::{EngineError, GenerateError};
use crate::grid::shuffle;
use crate::hints::{forms_run, scan_hints, HintSet};
use crate::rng::SimpleRng;
use crate::types::{Cell, Position, MAX_FILL_ATTEMPTS, MIN_COLORS};

/// Result of a successful fill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filled {
    pub board: Board,
    pub hints: HintSet,
    /// Number of cells that were empty and got a color
    pub placed: usize,
}

#[derive(Debug, Clone)]
pub struct BoardGenerator {
    palette: Vec<u8>,
    max_attempts: u32,
}

impl BoardGenerator {
    /// Palette `1..=max_colors` (at least [`MIN_COLORS`]), at least one attempt
    pub fn new(max_colors: u8, max_attempts: u32) -> Self {
        let max_colors = max_colors.max(MIN_COLORS);
        Self {
            palette: (1..=max_colors).collect(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn palette(&self) -> &[u8] {
        &self.palette
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fill `seed` using the configured attempt budget
    pub fn fill(&self, seed: &Board, rng: &mut SimpleRng) -> Result<Filled, EngineError> {
        self.fill_with_retries(seed, rng, self.max_attempts)
    }

    pub fn fill_with_retries(
        &self,
        seed: &Board,
        rng: &mut SimpleRng,
        attempts: u32,
    ) -> Result<Filled, EngineError> {
        let mut last = GenerateError::NoHints;
        for attempt in 1..=attempts {
            match self.try_fill(seed, rng) {
                Ok(filled) => {
                    trace!(
                        "fill placed {} cells, {} hints (attempt {})",
                        filled.placed,
                        filled.hints.len(),
                        attempt
                    );
                    return Ok(filled);
                }
                Err(err) => {
                    warn!("fill attempt {}/{} rejected: {}", attempt, attempts, err);
                    last = err;
                }
            }
        }

        error!("board generation gave up after {} attempts", attempts);
        Err(EngineError::RetryExhausted { attempts, last })
    }

    /// One fill attempt on a copy of `seed`
    pub fn try_fill(&self, seed: &Board, rng: &mut SimpleRng) -> Result<Filled, GenerateError> {
        let mut board = seed.clone();
        let mut placed = 0;

        for x in 0..board.width() {
            for y in 0..board.height() {
                if !board[Position::new(x, y)].is_empty() {
                    continue;
                }
                self.place_color(&mut board, x, y, rng)?;
                placed += 1;
            }
        }

        let hints = scan_hints(&board);
        if placed > 0 && hints.is_empty() {
            return Err(GenerateError::NoHints);
        }

        Ok(Filled {
            board,
            hints,
            placed,
        })
    }

    fn place_color(
        &self,
        board: &mut Board,
        x: usize,
        y: usize,
        rng: &mut SimpleRng,
    ) -> Result<u8, GenerateError> {
        let pos = Position::new(x, y);
        for color in shuffle(&self.palette, rng) {
            board[pos] = Cell::base(color);
            if !forms_run(board, x, y) {
                return Ok(color);
            }
        }
        board[pos] = Cell::empty();
        Err(GenerateError::NoValidColor { x, y })
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new(MIN_COLORS, MAX_FILL_ATTEMPTS)
    }
}
