//! Scoring module - classic Nintendo line-clear scoring
//!
//! `score += base_points(lines) * (difficulty + 1)` where base points come from
//! [`LINE_SCORES`]. Difficulty is set by the caller; the core never advances it.

use serde::{Deserialize, Serialize};

use crate::types::LINE_SCORES;

/// Base points for a clear of `lines` rows (0 for none, 4+ paid as 4)
pub fn base_points(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Points for a clear at a difficulty level
pub fn calculate_line_score(lines: usize, difficulty: u32) -> u32 {
    base_points(lines).saturating_mul(difficulty.saturating_add(1))
}

/// Current score and the difficulty level that scales awards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringState {
    score: u32,
    difficulty: u32,
}

impl ScoringState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Overwrite the score (e.g. for a loaded session)
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty;
    }

    /// Add the award for clearing `lines` rows and return it
    pub fn award(&mut self, lines: usize) -> u32 {
        let points = calculate_line_score(lines, self.difficulty);
        self.score = self.score.saturating_add(points);
        points
    }
}
