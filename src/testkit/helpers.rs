//! Fixture builders.

use crate::core::ScoreSeries;
use crate::store::{build_catalog, IndicatorKey, Portfolio};
use serde_json::{json, Value};

/// Series with one period per value, labelled `P1`, `P2`, ...
pub fn series_from_values(values: &[f64]) -> ScoreSeries {
    let labels = (1..=values.len()).map(|n| format!("P{n}"));
    (1u32..)
        .zip(values)
        .try_fold(ScoreSeries::with_labels(labels), |series, (seq, value)| {
            series.with_value(seq, *value)
        })
        .unwrap_or_else(|e| panic!("invalid fixture values {values:?}: {e}"))
}

/// Two groupings (`alpha`, `beta`) with two indicators each over four periods.
///
/// `alpha-01` holds `[60, 70, 80, 70]`; everything else is zero.
pub fn sample_portfolio() -> Portfolio {
    let key = IndicatorKey::new("alpha", "alpha-01");
    let mut portfolio = build_catalog(
        &[("alpha", "Alpha Line"), ("beta", "Beta Line")],
        2,
        &["Jan", "Feb", "Mar", "Apr"],
    )
    .unwrap_or_else(|e| panic!("invalid sample catalog: {e}"));

    for (seq, value) in (1u32..).zip([60.0, 70.0, 80.0, 70.0]) {
        portfolio = portfolio
            .set_score(&key, seq, value)
            .unwrap_or_else(|e| panic!("invalid sample score: {e}"));
    }
    portfolio
}

/// A well-formed advisory reply.
pub fn valid_advisory_response(recommended: f64, warning: f64) -> Value {
    json!({
        "recommendedScore": recommended,
        "warningScore": warning,
        "difficulty": "Challenging",
        "reasoning": "Scores recovered over the last two periods.",
        "advice": [
            "Standardize changeover checks",
            "Review scrap causes weekly",
            "Retrain the night shift"
        ]
    })
}
