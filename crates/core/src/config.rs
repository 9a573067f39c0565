use crate::types::{MAX_FILL_ATTEMPTS, MIN_COLORS};

/// Engine construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Palette size; values below [`MIN_COLORS`] are raised to it
    pub max_colors: u8,
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u32>,
    /// Fill attempts before generation fails for good
    pub max_fill_attempts: u32,
}

impl EngineConfig {
    pub fn with_max_colors(mut self, max_colors: u8) -> Self {
        self.max_colors = max_colors;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_fill_attempts(mut self, attempts: u32) -> Self {
        self.max_fill_attempts = attempts;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_colors: MIN_COLORS,
            seed: None,
            max_fill_attempts: MAX_FILL_ATTEMPTS,
        }
    }
}
