use serde::{Deserialize, Serialize};
use validator::Validate;

use self::hint::HintTable;
use self::problem::DerivationStep;

pub mod answer;
pub mod hint;
pub mod learner;
pub mod problem;

#[derive(Debug, Deserialize, Validate)]
pub struct CalculateRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub principal: f64,
    #[validate(range(min = 0.0))]
    pub rate: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub time: f64,
    #[serde(default = "default_periods")]
    #[validate(range(min = 1))]
    pub n: u32,
}

fn default_periods() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub amount: f64,
    pub steps: Vec<DerivationStep>,
    pub hints: HintTable,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizQuery {
    pub multiple_choice: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub question: String,
    pub principal: f64,
    pub rate: f64,
    pub time: f64,
    pub n: u32,
    pub difficulty: problem::DifficultyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<problem::MultipleChoice>,
}

impl From<problem::GeneratedProblem> for QuizResponse {
    fn from(problem: problem::GeneratedProblem) -> Self {
        Self {
            question: problem.prompt,
            principal: problem.parameters.principal(),
            rate: problem.parameters.rate_percent(),
            time: problem.parameters.years(),
            n: problem.parameters.periods_per_year(),
            difficulty: problem.level,
            choices: problem.choices,
        }
    }
}
