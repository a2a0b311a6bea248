//! Deterministic recommendation used whenever the advisory service is unusable.

use super::Recommendation;
use crate::stats::{round_to, StatisticalSummary};

/// Difficulty label marking a degraded, formula-based recommendation.
pub const FALLBACK_DIFFICULTY: &str = "estimated";

/// Target sits this many standard deviations above the mean.
pub const TARGET_SIGMAS: f64 = 0.5;
/// Warning threshold sits this many standard deviations below the mean.
pub const WARNING_SIGMAS: f64 = 1.0;

pub const FALLBACK_REASONING: &str = "The advisory service is temporarily unavailable. \
     Values were derived statistically: target = mean + 0.5σ, warning threshold = mean - 1.0σ.";

pub const FALLBACK_ADVICE: [&str; 3] = [
    "Maintain the current momentum",
    "Review the causes behind low-scoring periods",
    "Keep improvements continuous and measured",
];

/// `mean + 0.5σ` target and `mean - 1.0σ` warning, both rounded to 2 decimals.
///
/// Non-finite statistics are treated as zero.
pub fn fallback_recommendation(summary: &StatisticalSummary) -> Recommendation {
    let mean = finite_or_zero(summary.mean);
    let std_dev = finite_or_zero(summary.std_dev);

    Recommendation::new(
        round_to(mean + TARGET_SIGMAS * std_dev, 2),
        round_to(mean - WARNING_SIGMAS * std_dev, 2),
        FALLBACK_DIFFICULTY,
        FALLBACK_REASONING,
        FALLBACK_ADVICE.iter().map(|s| s.to_string()).collect(),
    )
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
