use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::answer::AttemptRecord;
use crate::models::learner::LearnerState;

use super::assessment_service::GradedAttempt;

/// Oldest attempts are dropped past this many per learner.
pub const MAX_ATTEMPTS_PER_LEARNER: usize = 500;

#[derive(Debug, Clone, Serialize)]
pub struct StoredAttempt {
    pub id: String,
    pub learner_id: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: AttemptRecord,
}

#[derive(Debug, Default)]
struct LearnerEntry {
    state: LearnerState,
    attempts: Vec<StoredAttempt>,
}

/// Keyed in-memory persistence for learner state and attempt history.
///
/// A single lock covers the read-grade-write sequence, so two answers for the
/// same learner can never both start from the same snapshot.
#[derive(Debug, Default)]
pub struct LearnerStore {
    learners: Mutex<HashMap<String, LearnerEntry>>,
}

impl LearnerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, creating the default learner on first access.
    pub async fn load(&self, learner_id: &str) -> LearnerState {
        let mut learners = self.learners.lock().await;
        let entry = learners.entry(learner_id.to_string()).or_insert_with(|| {
            tracing::info!("Creating learner {}", learner_id);
            LearnerEntry::default()
        });
        entry.state
    }

    /// Runs `grade` against the stored state and persists its outcome.
    ///
    /// Nothing is written when `grade` fails.
    pub async fn record_attempt<F>(&self, learner_id: &str, grade: F) -> EngineResult<GradedAttempt>
    where
        F: FnOnce(LearnerState) -> EngineResult<GradedAttempt>,
    {
        let mut learners = self.learners.lock().await;
        let entry = learners.entry(learner_id.to_string()).or_default();

        let graded = grade(entry.state)?;

        entry.state = graded.state;
        entry.attempts.push(StoredAttempt {
            id: Uuid::new_v4().to_string(),
            learner_id: learner_id.to_string(),
            recorded_at: Utc::now(),
            record: graded.record.clone(),
        });
        if entry.attempts.len() > MAX_ATTEMPTS_PER_LEARNER {
            let overflow = entry.attempts.len() - MAX_ATTEMPTS_PER_LEARNER;
            entry.attempts.drain(..overflow);
        }

        tracing::info!(
            "Attempt saved: learner={}, correct={}, score={}, streak={}, level={}",
            learner_id,
            graded.record.is_correct,
            graded.state.score,
            graded.state.correct_streak,
            graded.state.difficulty_level
        );

        Ok(graded)
    }

    /// Recorded attempts, oldest first.
    pub async fn attempts(&self, learner_id: &str) -> Vec<StoredAttempt> {
        let learners = self.learners.lock().await;
        learners
            .get(learner_id)
            .map(|entry| entry.attempts.clone())
            .unwrap_or_default()
    }
}
