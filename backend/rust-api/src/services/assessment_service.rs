use rand::Rng;

use crate::error::{EngineError, EngineResult};
use crate::metrics::{ANSWERS_GRADED_TOTAL, MISCONCEPTIONS_DETECTED_TOTAL};
use crate::models::answer::{AttemptRecord, MisconceptionKind};
use crate::models::learner::LearnerState;
use crate::models::problem::{ComputationResult, GeneratedProblem, ProblemParameters};

use super::difficulty_service::{DifficultyController, DifficultyPolicy, LevelChange};
use super::formula_service::evaluate_checked;
use super::misconception_service::{classify, is_correct};
use super::problem_generator::generate_at;

/// Everything produced by grading one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedAttempt {
    pub record: AttemptRecord,
    pub computation: ComputationResult,
    pub state: LearnerState,
    pub level_change: LevelChange,
}

/// Runs one problem/answer cycle. Holds configuration only; learner state is
/// passed in and returned on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentService {
    controller: DifficultyController,
}

impl AssessmentService {
    pub fn new(policy: DifficultyPolicy) -> Self {
        Self {
            controller: DifficultyController::new(policy),
        }
    }

    pub fn policy(&self) -> DifficultyPolicy {
        self.controller.policy()
    }

    /// Draws a problem at the learner's current level.
    pub fn next_problem<R: Rng + ?Sized>(
        &self,
        state: &LearnerState,
        with_choices: bool,
        rng: &mut R,
    ) -> EngineResult<GeneratedProblem> {
        generate_at(state.difficulty_level, with_choices, rng)
    }

    pub fn grade(
        &self,
        state: LearnerState,
        parameters: ProblemParameters,
        submitted_answer: f64,
    ) -> EngineResult<GradedAttempt> {
        if !submitted_answer.is_finite() {
            return Err(EngineError::InvalidParameters(format!(
                "submitted answer must be a finite number, got {}",
                submitted_answer
            )));
        }

        let computation = evaluate_checked(&parameters)?;
        let correct = is_correct(submitted_answer, computation.amount);
        let misconception = if correct {
            MisconceptionKind::None
        } else {
            classify(&parameters, submitted_answer, computation.amount)
        };

        let (next_state, level_change) = self.controller.advance(state, correct);

        ANSWERS_GRADED_TOTAL
            .with_label_values(&[if correct { "true" } else { "false" }])
            .inc();
        if !correct {
            MISCONCEPTIONS_DETECTED_TOTAL
                .with_label_values(&[misconception.label()])
                .inc();
        }

        tracing::info!(
            "Answer graded: submitted={}, correct_amount={}, correct={}, misconception={}, level={} -> {}",
            submitted_answer,
            computation.amount,
            correct,
            misconception.label(),
            state.difficulty_level,
            next_state.difficulty_level
        );

        let record = AttemptRecord {
            parameters,
            submitted_answer,
            correct_amount: computation.amount,
            is_correct: correct,
            misconception,
            difficulty_at_attempt: state.difficulty_level,
        };

        Ok(GradedAttempt {
            record,
            computation,
            state: next_state,
            level_change,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::problem::DifficultyLevel;
    use crate::services::formula_service::evaluate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(p: f64, rate: f64, t: f64, n: u32) -> ProblemParameters {
        ProblemParameters::new(p, rate, t, n).unwrap()
    }

    #[test]
    fn correct_answer_updates_score_and_streak() {
        let service = AssessmentService::default();
        let graded = service
            .grade(LearnerState::new(), params(100.0, 5.0, 1.0, 1), 105.0)
            .unwrap();

        assert!(graded.record.is_correct);
        assert_eq!(graded.record.misconception, MisconceptionKind::None);
        assert_eq!(graded.record.correct_amount, 105.0);
        assert_eq!(graded.record.difficulty_at_attempt, DifficultyLevel::EASY);
        assert_eq!(graded.state.score, 1);
        assert_eq!(graded.state.correct_streak, 1);
        assert_eq!(graded.computation.steps.len(), 6);
    }

    #[test]
    fn wrong_answer_is_classified_and_demotes() {
        let service = AssessmentService::default();
        let start = LearnerState {
            score: 5,
            correct_streak: 2,
            difficulty_level: DifficultyLevel::MEDIUM,
        };

        let graded = service
            .grade(start, params(100.0, 5.0, 2.0, 1), 110.0)
            .unwrap();

        assert!(!graded.record.is_correct);
        assert_eq!(graded.record.misconception, MisconceptionKind::SimpleInterest);
        assert_eq!(graded.record.difficulty_at_attempt, DifficultyLevel::MEDIUM);
        assert_eq!(graded.level_change, LevelChange::Demoted);
        assert_eq!(
            graded.state,
            LearnerState {
                score: 5,
                correct_streak: 0,
                difficulty_level: DifficultyLevel::EASY,
            }
        );
    }

    #[test]
    fn unexplained_wrong_answer_is_not_an_error() {
        let service = AssessmentService::default();
        let graded = service
            .grade(LearnerState::new(), params(100.0, 5.0, 2.0, 1), 42.0)
            .unwrap();
        assert!(!graded.record.is_correct);
        assert_eq!(graded.record.misconception, MisconceptionKind::None);
    }

    #[test]
    fn non_finite_answer_is_rejected() {
        let service = AssessmentService::default();
        let result = service.grade(LearnerState::new(), params(100.0, 5.0, 1.0, 1), f64::NAN);
        assert!(matches!(result, Err(EngineError::InvalidParameters(_))));
    }

    #[test]
    fn overflowing_problem_is_rejected() {
        let service = AssessmentService::default();
        let result = service.grade(LearnerState::new(), params(1e300, 100.0, 1000.0, 1), 1.0);
        assert!(matches!(result, Err(EngineError::InvalidParameters(_))));
    }

    #[test]
    fn full_cycle_climbs_levels() {
        let service = AssessmentService::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut state = LearnerState::new();

        for _ in 0..6 {
            let problem = service.next_problem(&state, false, &mut rng).unwrap();
            assert_eq!(problem.level, state.difficulty_level);
            let answer = evaluate(&problem.parameters).amount;
            state = service.grade(state, problem.parameters, answer).unwrap().state;
        }

        assert_eq!(state.difficulty_level, DifficultyLevel::HARD);
        assert_eq!(state.score, 6);
        let problem = service.next_problem(&state, true, &mut rng).unwrap();
        assert!(problem.parameters.periods_per_year() >= 4);
        assert!(problem.choices.is_some());
    }
}
