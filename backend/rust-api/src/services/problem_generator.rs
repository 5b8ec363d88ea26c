use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineResult;
use crate::metrics::PROBLEMS_GENERATED_TOTAL;
use crate::models::problem::{DifficultyLevel, GeneratedProblem, MultipleChoice, ProblemParameters};
use crate::services::formula_service::{evaluate, round_to_cents};
use crate::services::misconception_service::{one_year_only, simple_interest};

const OPTION_COUNT: usize = 4;

/// Padding step for multiple-choice options; the first pads are ±50 and ±75.
const PAD_STEP: f64 = 25.0;
/// Padding step as a share of the correct amount, used when that exceeds `PAD_STEP`.
const PAD_RELATIVE: f64 = 1e-6;
const MAX_PAD_ROUNDS: usize = 16;

/// Value pools and time bias for one difficulty level.
struct LevelProfile {
    principals: &'static [f64],
    rates: &'static [f64],
    periods: &'static [u32],
    /// Chance of a problem lasting longer than one year.
    multi_year_probability: f64,
    multi_year_options: &'static [f64],
}

// Level 1 keeps n = 1 and t mostly 1 so simple and compound interest stay close.
const EASY: LevelProfile = LevelProfile {
    principals: &[100.0, 200.0, 300.0],
    rates: &[2.0, 3.0, 4.0],
    periods: &[1],
    multi_year_probability: 0.25,
    multi_year_options: &[2.0],
};

// Level 2 mostly spans two years to surface the one-year-only mistake.
const MEDIUM: LevelProfile = LevelProfile {
    principals: &[300.0, 500.0, 800.0],
    rates: &[3.0, 4.0, 5.0],
    periods: &[1, 2, 4],
    multi_year_probability: 0.8,
    multi_year_options: &[2.0],
};

const HARD: LevelProfile = LevelProfile {
    principals: &[800.0, 1000.0, 1500.0],
    rates: &[5.0, 6.0, 7.0],
    periods: &[4, 6, 12],
    multi_year_probability: 1.0,
    multi_year_options: &[2.0, 3.0],
};

fn profile(level: DifficultyLevel) -> &'static LevelProfile {
    match level.value() {
        1 => &EASY,
        2 => &MEDIUM,
        _ => &HARD,
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, pool: &[T]) -> T {
    pool[rng.random_range(0..pool.len())]
}

/// Draws a problem for a raw level number, rejecting anything outside 1..=3.
pub fn generate<R: Rng + ?Sized>(
    level: u8,
    with_choices: bool,
    rng: &mut R,
) -> EngineResult<GeneratedProblem> {
    let level = DifficultyLevel::try_from(level)?;
    generate_at(level, with_choices, rng)
}

pub fn generate_at<R: Rng + ?Sized>(
    level: DifficultyLevel,
    with_choices: bool,
    rng: &mut R,
) -> EngineResult<GeneratedProblem> {
    let profile = profile(level);

    let principal = pick(rng, profile.principals);
    let rate = pick(rng, profile.rates);
    let years = if rng.random_bool(profile.multi_year_probability) {
        pick(rng, profile.multi_year_options)
    } else {
        1.0
    };
    let periods = pick(rng, profile.periods);

    let parameters = ProblemParameters::new(principal, rate, years, periods)?;
    let prompt = prompt_for(level, &parameters);
    let choices = if with_choices {
        Some(build_choices(&parameters, rng))
    } else {
        None
    };

    PROBLEMS_GENERATED_TOTAL
        .with_label_values(&[level.to_string().as_str()])
        .inc();

    tracing::debug!(
        "Generated level {} problem: P={}, rate={}, t={}, n={}",
        level,
        principal,
        rate,
        years,
        periods
    );

    Ok(GeneratedProblem {
        level,
        parameters,
        prompt,
        choices,
    })
}

/// Learner-facing question text. Deterministic for given parameters.
pub fn prompt_for(level: DifficultyLevel, params: &ProblemParameters) -> String {
    let principal = params.principal();
    let rate = params.rate_percent();
    let years = params.years();
    let year_word = if years == 1.0 { "year" } else { "years" };
    let frequency = frequency_phrase(params.periods_per_year());

    match level.value() {
        1 => format!(
            "(Level 1) If you invest £{} at {}% for {} year(s), compounded {} times per year, what is the final amount?",
            principal,
            rate,
            years,
            params.periods_per_year()
        ),
        2 => format!(
            "(Level 2) A savings account is opened with £{}. It pays {}% interest per year, compounded {}. How much will be in the account after {} {}? Give your answer to the nearest penny.",
            principal, rate, frequency, years, year_word
        ),
        _ => format!(
            "(Level 3) An investor puts £{} into a bond paying {}% a year, compounded {}. What is the bond worth after {} {}? Give your answer to the nearest penny.",
            principal, rate, frequency, years, year_word
        ),
    }
}

fn frequency_phrase(periods: u32) -> String {
    match periods {
        1 => "once per year (annually)".to_string(),
        2 => "2 times per year (every 6 months)".to_string(),
        4 => "4 times per year (quarterly)".to_string(),
        6 => "6 times per year (every 2 months)".to_string(),
        12 => "12 times per year (monthly)".to_string(),
        n => format!("{} times per year", n),
    }
}

/// Four unique options: the correct amount plus answers produced by common
/// mistakes, padded with nearby values when mistakes coincide.
pub fn build_choices<R: Rng + ?Sized>(params: &ProblemParameters, rng: &mut R) -> MultipleChoice {
    let correct = evaluate(params).amount;

    let mut options: Vec<(f64, bool)> = vec![(correct, true)];

    for wrong in [
        simple_interest(params),
        one_year_only(params),
        params.principal(),
    ] {
        push_unique(&mut options, wrong);
    }

    // Fixed offsets vanish once amounts outgrow f64 cent precision.
    let unit = PAD_STEP.max(correct.abs() * PAD_RELATIVE);
    let mut step = 2.0;
    for _ in 0..MAX_PAD_ROUNDS {
        if options.len() >= OPTION_COUNT {
            break;
        }
        let offset = step * unit;
        push_unique(&mut options, correct + offset);
        if options.len() < OPTION_COUNT {
            push_unique(&mut options, correct - offset);
        }
        step += 1.0;
    }

    options.shuffle(rng);
    let correct_index = options
        .iter()
        .position(|(_, is_correct)| *is_correct)
        .unwrap_or_default();

    MultipleChoice {
        options: options.into_iter().map(|(value, _)| value).collect(),
        correct_index,
    }
}

fn push_unique(options: &mut Vec<(f64, bool)>, value: f64) {
    let value = round_to_cents(value);
    if value.is_finite() && value > 0.0 && options.iter().all(|(existing, _)| *existing != value) {
        options.push((value, false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn rejects_unknown_levels() {
        let mut rng = seeded(1);
        assert_eq!(
            generate(0, false, &mut rng).unwrap_err(),
            EngineError::InvalidDifficulty(0)
        );
        assert_eq!(
            generate(4, false, &mut rng).unwrap_err(),
            EngineError::InvalidDifficulty(4)
        );
    }

    #[test]
    fn easy_problems_stay_in_range() {
        let mut rng = seeded(7);
        let mut single_year = 0;
        for _ in 0..400 {
            let problem = generate(1, false, &mut rng).unwrap();
            let p = problem.parameters;
            assert!([100.0, 200.0, 300.0].contains(&p.principal()));
            assert!([2.0, 3.0, 4.0].contains(&p.rate_percent()));
            assert!([1.0, 2.0].contains(&p.years()));
            assert_eq!(p.periods_per_year(), 1);
            if p.years() == 1.0 {
                single_year += 1;
            }
        }
        assert!(single_year > 200, "expected mostly one-year problems, got {}", single_year);
    }

    #[test]
    fn medium_problems_mostly_span_several_years() {
        let mut rng = seeded(11);
        let mut multi_year = 0;
        for _ in 0..1000 {
            let p = generate(2, false, &mut rng).unwrap().parameters;
            assert!([300.0, 500.0, 800.0].contains(&p.principal()));
            assert!([3.0, 4.0, 5.0].contains(&p.rate_percent()));
            assert!([1, 2, 4].contains(&p.periods_per_year()));
            if p.years() > 1.0 {
                multi_year += 1;
            }
        }
        assert!(multi_year >= 740, "multi-year share too low: {}", multi_year);
    }

    #[test]
    fn hard_problems_always_compound_often_over_several_years() {
        let mut rng = seeded(13);
        for _ in 0..400 {
            let p = generate(3, false, &mut rng).unwrap().parameters;
            assert!([800.0, 1000.0, 1500.0].contains(&p.principal()));
            assert!([5.0, 6.0, 7.0].contains(&p.rate_percent()));
            assert!(p.years() > 1.0);
            assert!([4, 6, 12].contains(&p.periods_per_year()));
        }
    }

    #[test]
    fn prompts_state_every_parameter() {
        let params = ProblemParameters::new(200.0, 3.0, 2.0, 1).unwrap();
        assert_eq!(
            prompt_for(DifficultyLevel::EASY, &params),
            "(Level 1) If you invest £200 at 3% for 2 year(s), compounded 1 times per year, what is the final amount?"
        );

        let params = ProblemParameters::new(1500.0, 7.0, 3.0, 12).unwrap();
        let prompt = prompt_for(DifficultyLevel::HARD, &params);
        assert!(prompt.starts_with("(Level 3)"));
        assert!(prompt.contains("£1500"));
        assert!(prompt.contains("7%"));
        assert!(prompt.contains("3 years"));
        assert!(prompt.contains("12 times per year"));
    }

    #[test]
    fn choices_without_request_are_absent() {
        let mut rng = seeded(3);
        assert!(generate(2, false, &mut rng).unwrap().choices.is_none());
    }

    #[test]
    fn choices_are_four_unique_values_with_correct_index() {
        for seed in 0..300 {
            let mut rng = seeded(seed);
            for level in 1..=3 {
                let problem = generate(level, true, &mut rng).unwrap();
                let choices = problem.choices.expect("choices requested");
                let correct = evaluate(&problem.parameters).amount;

                assert_eq!(choices.options.len(), 4);
                let unique: HashSet<u64> = choices.options.iter().map(|v| v.to_bits()).collect();
                assert_eq!(unique.len(), 4, "duplicate options: {:?}", choices.options);
                assert_eq!(choices.correct_option(), Some(correct));
            }
        }
    }

    #[test]
    fn coinciding_mistakes_are_padded() {
        // One year, yearly: simple interest and one-year-only both equal the answer.
        let params = ProblemParameters::new(100.0, 2.0, 1.0, 1).unwrap();
        let choices = build_choices(&params, &mut seeded(5));

        let mut sorted = choices.options.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(sorted, vec![52.0, 100.0, 102.0, 152.0]);
        assert_eq!(choices.correct_option(), Some(102.0));
    }

    #[test]
    fn huge_amounts_still_get_four_distinct_options() {
        // The single-year yearly cases collapse three options and rely on padding.
        for (principal, years, periods) in [(1e17, 2.0, 4), (1e17, 1.0, 1), (1e250, 1.0, 1)] {
            let params = ProblemParameters::new(principal, 5.0, years, periods).unwrap();
            let choices = build_choices(&params, &mut seeded(1));

            assert_eq!(choices.options.len(), 4, "P={}", principal);
            let unique: HashSet<u64> = choices.options.iter().map(|v| v.to_bits()).collect();
            assert_eq!(unique.len(), 4, "duplicate options for P={}: {:?}", principal, choices.options);
            assert_eq!(choices.correct_option(), Some(evaluate(&params).amount));
        }
    }
}
