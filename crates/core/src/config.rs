//! Engine configuration
//!
//! Rule variants (relaxed matching, combo goals, score loops) are expressed
//! as parameters of a single engine rather than separate implementations.

use crate::types::{
    EngineError, BASE_SCORE, GRID_SIZE, MAX_SYMBOLS, MIN_MATCH_LEN, RELAXED_COMBO_BUDGET,
    RELAXED_UNLOCK_SCORE, SYMBOL_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub grid_size: usize,
    pub symbol_count: u8,
    pub base_unit: u32,
    pub min_match_length: usize,
    pub relaxed_unlock_score: u32,
    pub relaxed_combo_budget: u32,
    /// End the game once a cascade reaches this combo depth.
    pub combo_victory_threshold: Option<u32>,
    /// Count a loop every time the score crosses a multiple of this value.
    pub score_loop_threshold: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            symbol_count: SYMBOL_COUNT,
            base_unit: BASE_SCORE,
            min_match_length: MIN_MATCH_LEN,
            relaxed_unlock_score: RELAXED_UNLOCK_SCORE,
            relaxed_combo_budget: RELAXED_COMBO_BUDGET,
            combo_victory_threshold: None,
            score_loop_threshold: None,
        }
    }
}

impl EngineConfig {
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    pub fn with_symbol_count(mut self, count: u8) -> Self {
        self.symbol_count = count;
        self
    }

    pub fn with_combo_goal(mut self, depth: u32) -> Self {
        self.combo_victory_threshold = Some(depth);
        self
    }

    pub fn with_score_loop(mut self, threshold: u32) -> Self {
        self.score_loop_threshold = Some(threshold);
        self
    }

    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.grid_size < 3 {
            return Err(EngineError::InvalidConfig("grid_size must be at least 3"));
        }
        // Dealing a match-free board needs a third symbol wherever the left
        // and upper neighbours each rule one out.
        if !(3..=MAX_SYMBOLS).contains(&self.symbol_count) {
            return Err(EngineError::InvalidConfig("symbol_count must be within 3..=8"));
        }
        if self.min_match_length < 3 || self.min_match_length > self.grid_size {
            return Err(EngineError::InvalidConfig(
                "min_match_length must be within 3..=grid_size",
            ));
        }
        if self.base_unit == 0 {
            return Err(EngineError::InvalidConfig("base_unit must be positive"));
        }
        if self.combo_victory_threshold == Some(0) {
            return Err(EngineError::InvalidConfig("combo goal must be positive"));
        }
        if self.score_loop_threshold == Some(0) {
            return Err(EngineError::InvalidConfig("score loop threshold must be positive"));
        }
        Ok(())
    }
}
