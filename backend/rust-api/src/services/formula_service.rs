use crate::error::{EngineError, EngineResult};
use crate::models::problem::{ComputationResult, DerivationStep, ProblemParameters};

/// Rounds to whole cents, ties away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Periodic compounding: A = P × (1 + r/n)^(n × t), unrounded.
pub fn compound_amount(params: &ProblemParameters) -> f64 {
    let n = f64::from(params.periods_per_year());
    let rate_per_period = params.rate_decimal() / n;
    params.principal() * (1.0 + rate_per_period).powf(n * params.years())
}

/// Validates raw values and evaluates them.
pub fn evaluate_raw(
    principal: f64,
    rate_percent: f64,
    years: f64,
    periods_per_year: u32,
) -> EngineResult<ComputationResult> {
    let params = ProblemParameters::new(principal, rate_percent, years, periods_per_year)?;
    evaluate_checked(&params)
}

/// Like [`evaluate`], but rejects parameters whose amount overflows `f64`.
pub fn evaluate_checked(params: &ProblemParameters) -> EngineResult<ComputationResult> {
    let result = evaluate(params);
    if !result.amount.is_finite() {
        return Err(EngineError::InvalidParameters(format!(
            "final amount overflows for principal {}, rate {}%, {} years, {} periods per year",
            params.principal(),
            params.rate_percent(),
            params.years(),
            params.periods_per_year()
        )));
    }
    Ok(result)
}

/// Computes the rounded final amount together with the worked solution shown to the learner.
pub fn evaluate(params: &ProblemParameters) -> ComputationResult {
    let principal = params.principal();
    let rate_percent = params.rate_percent();
    let years = params.years();
    let periods = params.periods_per_year();

    let n = f64::from(periods);
    let r = params.rate_decimal();
    let rate_per_period = r / n;
    let bracket = 1.0 + rate_per_period;
    let exponent = n * years;
    let amount = round_to_cents(compound_amount(params));

    let steps = vec![
        step("formula", "Formula: A = P × (1 + r/n)^(n × t)".to_string()),
        step(
            "rate",
            format!(
                "Step 1 – Convert rate: r = {}% = {:.4}",
                rate_percent, r
            ),
        ),
        step(
            "rate_per_period",
            format!(
                "Step 2 – Compute r/n: r/n = {}/{} = {:.5}",
                r, periods, rate_per_period
            ),
        ),
        step(
            "bracket",
            format!("Step 3 – Inside bracket: 1 + r/n = {:.5}", bracket),
        ),
        step(
            "exponent",
            format!(
                "Step 4 – Exponent: n × t = {} × {} = {}",
                periods, years, exponent
            ),
        ),
        step(
            "final",
            format!(
                "Step 5 – Final: A = {} × ({:.5})^{} = £{:.2}",
                principal, bracket, exponent, amount
            ),
        ),
    ];

    ComputationResult { amount, steps }
}

fn step(label: &str, text: String) -> DerivationStep {
    DerivationStep {
        label: label.to_string(),
        text,
    }
}
