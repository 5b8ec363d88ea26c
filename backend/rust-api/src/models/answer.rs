use serde::{Deserialize, Serialize};
use validator::Validate;

use super::hint::HintTable;
use super::problem::{DerivationStep, DifficultyLevel, ProblemParameters};
use super::learner::LearnerState;

/// Known patterns of incorrect reasoning, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MisconceptionKind {
    SimpleInterest,
    IgnoreCompoundingFrequency,
    OneYearOnly,
    WrongRateConversion,
    None,
}

impl MisconceptionKind {
    /// Stable identifier used in stored attempt records and metrics labels.
    pub fn code(self) -> Option<&'static str> {
        match self {
            Self::SimpleInterest => Some("mis_simple_interest"),
            Self::IgnoreCompoundingFrequency => Some("mis_ignore_compounding"),
            Self::OneYearOnly => Some("mis_one_year_only"),
            Self::WrongRateConversion => Some("mis_wrong_rate_conversion"),
            Self::None => None,
        }
    }

    pub fn label(self) -> &'static str {
        self.code().unwrap_or("unclassified")
    }

    /// Learner-facing explanation of the mistake.
    pub fn explanation(self) -> &'static str {
        match self {
            Self::SimpleInterest => {
                "It looks like you used simple interest, P × (1 + r × t), so interest was never earned on interest."
            }
            Self::IgnoreCompoundingFrequency => {
                "It looks like you compounded once a year instead of n times per year."
            }
            Self::OneYearOnly => {
                "It looks like you only compounded for one year instead of the full investment period."
            }
            Self::WrongRateConversion => {
                "It looks like the rate was not converted from a percentage to a decimal (divide by 100)."
            }
            Self::None => "Incorrect, and the cause could not be identified. Check each step carefully.",
        }
    }
}

/// Outcome of one graded answer, handed to the learner store for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub parameters: ProblemParameters,
    pub submitted_answer: f64,
    pub correct_amount: f64,
    pub is_correct: bool,
    pub misconception: MisconceptionKind,
    pub difficulty_at_attempt: DifficultyLevel,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub principal: f64,
    #[validate(range(min = 0.0))]
    pub rate: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub time: f64,
    #[validate(range(min = 1))]
    pub n: u32,
    pub user_answer: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub correct: bool,
    pub correct_amount: f64,
    pub steps: Vec<DerivationStep>,
    pub hints: HintTable,
    pub misconception: MisconceptionKind,
    pub misconception_code: Option<String>,
    pub feedback: String,
    pub difficulty: DifficultyLevel,
    pub score: u32,
    pub streak: u32,
}

impl SubmitAnswerResponse {
    pub fn new(
        record: &AttemptRecord,
        steps: Vec<DerivationStep>,
        state: &LearnerState,
        hints: HintTable,
    ) -> Self {
        let feedback = if record.is_correct {
            "Correct!".to_string()
        } else {
            record.misconception.explanation().to_string()
        };

        Self {
            correct: record.is_correct,
            correct_amount: record.correct_amount,
            steps,
            hints,
            misconception: record.misconception,
            misconception_code: record.misconception.code().map(str::to_string),
            feedback,
            difficulty: state.difficulty_level,
            score: state.score,
            streak: state.correct_streak,
        }
    }
}
