//! Descriptive statistics over a score series.
//!
//! Everything here is a pure function of its inputs and cheap enough to be
//! recomputed on every read.

pub mod distribution;

pub use distribution::{sample, DistributionPoint};

use crate::core::ScoreSeries;
use crate::recommend::Recommendation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean, population standard deviation and extremes of a series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize raw values.
///
/// Zeros count as real observations. The standard deviation divides by N.
/// An empty slice yields the all-zero summary.
pub fn summarize(values: &[f64]) -> StatisticalSummary {
    if values.is_empty() {
        return StatisticalSummary::default();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    StatisticalSummary {
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
    }
}

pub fn summarize_series(series: &ScoreSeries) -> StatisticalSummary {
    summarize(&series.values())
}

/// Round half away from zero to `decimals` places. Never returns `-0.0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Qualitative read of how much a series fluctuates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    /// No variation at all
    NotApplicable,
    VeryStable, // stdDev < 2
    Normal,     // stdDev < 8
    Volatile,
}

impl Stability {
    pub fn from_std_dev(std_dev: f64) -> Self {
        if std_dev == 0.0 {
            Self::NotApplicable
        } else if std_dev < 2.0 {
            Self::VeryStable
        } else if std_dev < 8.0 {
            Self::Normal
        } else {
            Self::Volatile
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotApplicable => "-",
            Self::VeryStable => "very stable",
            Self::Normal => "normal",
            Self::Volatile => "volatile",
        };
        f.write_str(label)
    }
}

/// How many standard deviations the recommended target sits above the mean,
/// rounded to one decimal.
pub fn sigma_distance(
    summary: &StatisticalSummary,
    recommendation: Option<&Recommendation>,
) -> f64 {
    match recommendation {
        Some(rec) if summary.std_dev != 0.0 => {
            round_to((rec.recommended_score() - summary.mean) / summary.std_dev, 1)
        }
        _ => 0.0,
    }
}
