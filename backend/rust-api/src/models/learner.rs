use serde::{Deserialize, Serialize};

use super::problem::DifficultyLevel;

/// Per-learner progress snapshot.
///
/// The engine takes one by value and hands back the successor; it never keeps
/// a copy between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LearnerState {
    pub score: u32,
    pub correct_streak: u32,
    pub difficulty_level: DifficultyLevel,
}

impl LearnerState {
    pub fn new() -> Self {
        Self::default()
    }
}
