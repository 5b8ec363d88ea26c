use serde::{Deserialize, Serialize};

use crate::metrics::DIFFICULTY_TRANSITIONS_TOTAL;
use crate::models::learner::LearnerState;

/// How the controller reacts to streaks and misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyPolicy {
    /// Consecutive correct answers needed to move up one level.
    pub promote_after: u32,
    /// Drop one level on every incorrect answer.
    pub demote_on_incorrect: bool,
}

impl Default for DifficultyPolicy {
    fn default() -> Self {
        Self {
            promote_after: 3,
            demote_on_incorrect: true,
        }
    }
}

impl DifficultyPolicy {
    /// Promotes after two in a row and never demotes.
    pub fn lenient() -> Self {
        Self {
            promote_after: 2,
            demote_on_incorrect: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    Promoted,
    Demoted,
    Unchanged,
}

impl LevelChange {
    pub fn as_str(self) -> &'static str {
        match self {
            LevelChange::Promoted => "promoted",
            LevelChange::Demoted => "demoted",
            LevelChange::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DifficultyController {
    policy: DifficultyPolicy,
}

impl DifficultyController {
    pub fn new(policy: DifficultyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DifficultyPolicy {
        self.policy
    }

    /// Next learner state after one graded answer.
    pub fn advance(&self, state: LearnerState, correct: bool) -> (LearnerState, LevelChange) {
        let mut next = state;
        let mut change = LevelChange::Unchanged;

        if correct {
            next.score = next.score.saturating_add(1);
            next.correct_streak = next.correct_streak.saturating_add(1);

            let threshold = self.policy.promote_after.max(1);
            let raised = next.difficulty_level.raised();
            if next.correct_streak >= threshold && raised != next.difficulty_level {
                next.difficulty_level = raised;
                next.correct_streak = 0;
                change = LevelChange::Promoted;
            }
        } else {
            next.correct_streak = 0;

            let lowered = next.difficulty_level.lowered();
            if self.policy.demote_on_incorrect && lowered != next.difficulty_level {
                next.difficulty_level = lowered;
                change = LevelChange::Demoted;
            }
        }

        if change != LevelChange::Unchanged {
            DIFFICULTY_TRANSITIONS_TOTAL
                .with_label_values(&[change.as_str()])
                .inc();
            tracing::info!(
                "Difficulty {}: level {} -> {}",
                change.as_str(),
                state.difficulty_level,
                next.difficulty_level
            );
        }

        (next, change)
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(DifficultyPolicy::default())
    }
}
