use crate::models::answer::MisconceptionKind;
use crate::models::problem::ProblemParameters;

/// Answers closer than this to the correct amount are graded correct.
pub const CORRECTNESS_TOLERANCE: f64 = 0.01;

/// Looser match window for reconstructions; learners round intermediate steps.
pub const MATCH_TOLERANCE: f64 = 1.0;

pub fn is_correct(submitted_answer: f64, correct_amount: f64) -> bool {
    (submitted_answer - correct_amount).abs() < CORRECTNESS_TOLERANCE
}

/// P × (1 + r × t)
pub fn simple_interest(params: &ProblemParameters) -> f64 {
    params.principal() * (1.0 + params.rate_decimal() * params.years())
}

/// P × (1 + r)^t, compounding once a year whatever n is.
pub fn annual_compounding(params: &ProblemParameters) -> f64 {
    params.principal() * (1.0 + params.rate_decimal()).powf(params.years())
}

/// P × (1 + r/n)^n, stopping after the first year.
pub fn one_year_only(params: &ProblemParameters) -> f64 {
    let n = f64::from(params.periods_per_year());
    params.principal() * (1.0 + params.rate_decimal() / n).powf(n)
}

/// P × (1 + rate/n)^(n × t) with the percentage used as-is.
pub fn unconverted_rate(params: &ProblemParameters) -> f64 {
    let n = f64::from(params.periods_per_year());
    params.principal() * (1.0 + params.rate_percent() / n).powf(n * params.years())
}

struct Candidate {
    kind: MisconceptionKind,
    reconstruct: fn(&ProblemParameters) -> f64,
    /// False when the reconstruction coincides with the correct formula for these inputs.
    applies: fn(&ProblemParameters) -> bool,
}

const CANDIDATES: [Candidate; 4] = [
    Candidate {
        kind: MisconceptionKind::SimpleInterest,
        reconstruct: simple_interest,
        applies: always,
    },
    Candidate {
        kind: MisconceptionKind::IgnoreCompoundingFrequency,
        reconstruct: annual_compounding,
        applies: compounds_more_than_yearly,
    },
    Candidate {
        kind: MisconceptionKind::OneYearOnly,
        reconstruct: one_year_only,
        applies: spans_more_than_one_year,
    },
    Candidate {
        kind: MisconceptionKind::WrongRateConversion,
        reconstruct: unconverted_rate,
        applies: always,
    },
];

fn always(_: &ProblemParameters) -> bool {
    true
}

fn compounds_more_than_yearly(params: &ProblemParameters) -> bool {
    params.periods_per_year() != 1
}

fn spans_more_than_one_year(params: &ProblemParameters) -> bool {
    params.years() > 1.0
}

/// Names the mistake that reproduces `submitted_answer`, first match wins.
///
/// A correct answer and a wrong answer no reconstruction explains both yield
/// [`MisconceptionKind::None`].
pub fn classify(
    params: &ProblemParameters,
    submitted_answer: f64,
    correct_amount: f64,
) -> MisconceptionKind {
    if is_correct(submitted_answer, correct_amount) {
        return MisconceptionKind::None;
    }

    CANDIDATES
        .iter()
        .filter(|candidate| (candidate.applies)(params))
        .find(|candidate| {
            ((candidate.reconstruct)(params) - submitted_answer).abs() < MATCH_TOLERANCE
        })
        .map(|candidate| candidate.kind)
        .unwrap_or(MisconceptionKind::None)
}
