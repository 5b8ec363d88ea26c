use thiserror::Error;

/// Errors raised by the assessment engine.
///
/// Both variants signal bad input from the caller; neither is fatal and
/// handlers report them as rejected requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Non-positive, non-finite or otherwise unusable problem parameters.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Difficulty level outside 1..=3.
    #[error("invalid difficulty level {0}: expected 1, 2 or 3")]
    InvalidDifficulty(u8),
}

pub type EngineResult<T> = Result<T, EngineError>;
