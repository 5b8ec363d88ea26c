use crate::config::Config;

use self::assessment_service::AssessmentService;
use self::learner_store::LearnerStore;

pub struct AppState {
    pub config: Config,
    pub assessment: AssessmentService,
    pub learners: LearnerStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        tracing::info!(
            "Difficulty policy: promote after {} correct, demote on incorrect: {}",
            config.difficulty.promote_after,
            config.difficulty.demote_on_incorrect
        );

        Self {
            assessment: AssessmentService::new(config.difficulty),
            learners: LearnerStore::new(),
            config,
        }
    }
}

pub mod assessment_service;
pub mod difficulty_service;
pub mod formula_service;
pub mod hint_service;
pub mod learner_store;
pub mod misconception_service;
pub mod problem_generator;
