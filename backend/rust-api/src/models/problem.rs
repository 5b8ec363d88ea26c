use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

/// Validated input of a compound-interest problem.
///
/// Fields are private so every value in circulation has passed [`ProblemParameters::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProblemParameters {
    principal: f64,
    rate_percent: f64,
    years: f64,
    periods_per_year: u32,
}

#[derive(Debug, Deserialize)]
struct RawProblemParameters {
    principal: f64,
    rate_percent: f64,
    years: f64,
    periods_per_year: u32,
}

impl<'de> Deserialize<'de> for ProblemParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawProblemParameters::deserialize(deserializer)?;
        Self::new(raw.principal, raw.rate_percent, raw.years, raw.periods_per_year)
            .map_err(serde::de::Error::custom)
    }
}

impl ProblemParameters {
    pub fn new(
        principal: f64,
        rate_percent: f64,
        years: f64,
        periods_per_year: u32,
    ) -> EngineResult<Self> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "principal must be a positive number, got {}",
                principal
            )));
        }
        if !rate_percent.is_finite() || rate_percent < 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "rate must be zero or positive, got {}",
                rate_percent
            )));
        }
        if !years.is_finite() || years <= 0.0 {
            return Err(EngineError::InvalidParameters(format!(
                "time must be a positive number of years, got {}",
                years
            )));
        }
        if periods_per_year == 0 {
            return Err(EngineError::InvalidParameters(
                "compounding periods per year must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            principal,
            rate_percent,
            years,
            periods_per_year,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn rate_percent(&self) -> f64 {
        self.rate_percent
    }

    pub fn years(&self) -> f64 {
        self.years
    }

    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Annual rate as a decimal fraction (5% -> 0.05).
    pub fn rate_decimal(&self) -> f64 {
        self.rate_percent / 100.0
    }
}

/// Difficulty level, always within 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DifficultyLevel(u8);

impl DifficultyLevel {
    pub const EASY: Self = Self(1);
    pub const MEDIUM: Self = Self(2);
    pub const HARD: Self = Self(3);

    pub fn value(self) -> u8 {
        self.0
    }

    /// One level up, saturating at [`DifficultyLevel::HARD`].
    pub fn raised(self) -> Self {
        Self((self.0 + 1).min(Self::HARD.0))
    }

    /// One level down, saturating at [`DifficultyLevel::EASY`].
    pub fn lowered(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::EASY.0))
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self::EASY
    }
}

impl TryFrom<u8> for DifficultyLevel {
    type Error = EngineError;

    fn try_from(value: u8) -> EngineResult<Self> {
        match value {
            1..=3 => Ok(Self(value)),
            other => Err(EngineError::InvalidDifficulty(other)),
        }
    }
}

impl From<DifficultyLevel> for u8 {
    fn from(level: DifficultyLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One labelled line of a worked solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationStep {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    /// Final amount rounded to 2 decimal places.
    pub amount: f64,
    pub steps: Vec<DerivationStep>,
}

/// Shuffled answer options with the position of the correct one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoice {
    pub options: Vec<f64>,
    pub correct_index: usize,
}

impl MultipleChoice {
    pub fn correct_option(&self) -> Option<f64> {
        self.options.get(self.correct_index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedProblem {
    pub level: DifficultyLevel,
    pub parameters: ProblemParameters,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<MultipleChoice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_principal_and_time() {
        assert!(matches!(
            ProblemParameters::new(0.0, 5.0, 1.0, 1),
            Err(EngineError::InvalidParameters(_))
        ));
        assert!(matches!(
            ProblemParameters::new(100.0, 5.0, -1.0, 1),
            Err(EngineError::InvalidParameters(_))
        ));
        assert!(matches!(
            ProblemParameters::new(100.0, f64::NAN, 1.0, 1),
            Err(EngineError::InvalidParameters(_))
        ));
        assert!(matches!(
            ProblemParameters::new(100.0, 5.0, 1.0, 0),
            Err(EngineError::InvalidParameters(_))
        ));
    }

    #[test]
    fn zero_rate_is_accepted() {
        let params = ProblemParameters::new(100.0, 0.0, 1.0, 1).unwrap();
        assert_eq!(params.rate_decimal(), 0.0);
    }

    #[test]
    fn deserializing_runs_validation() {
        let ok: ProblemParameters = serde_json::from_str(
            r#"{"principal":100.0,"rate_percent":5.0,"years":2.0,"periods_per_year":4}"#,
        )
        .unwrap();
        assert_eq!(ok.periods_per_year(), 4);

        let bad = serde_json::from_str::<ProblemParameters>(
            r#"{"principal":-5.0,"rate_percent":5.0,"years":2.0,"periods_per_year":4}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn difficulty_level_bounds() {
        assert_eq!(DifficultyLevel::try_from(0), Err(EngineError::InvalidDifficulty(0)));
        assert_eq!(DifficultyLevel::try_from(4), Err(EngineError::InvalidDifficulty(4)));
        assert_eq!(DifficultyLevel::HARD.raised(), DifficultyLevel::HARD);
        assert_eq!(DifficultyLevel::EASY.lowered(), DifficultyLevel::EASY);
        assert_eq!(DifficultyLevel::EASY.raised(), DifficultyLevel::MEDIUM);
    }
}
