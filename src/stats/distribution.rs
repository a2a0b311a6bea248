//! Gaussian density curve sampled for plotting.

use super::round_to;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Half-width of the plotted range, in standard deviations.
const SPAN_SIGMAS: f64 = 3.5;
/// Number of equal steps between the first and last sample.
const STEPS: usize = 100;
/// Half-width of the spike drawn for a zero-variance series.
const SPIKE_HALF_WIDTH: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionPoint {
    pub x: f64,
    pub density: f64,
}

impl DistributionPoint {
    fn new(x: f64, density: f64) -> Self {
        Self { x, density }
    }
}

/// Normal probability density at `x`.
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let scale = std_dev * (2.0 * PI).sqrt();
    let exponent = -((x - mean).powi(2)) / (2.0 * std_dev.powi(2));
    exponent.exp() / scale
}

/// Sample the density curve for `mean`/`std_dev`.
///
/// A zero standard deviation yields a three-point spike around the mean.
/// Otherwise 101 points cover at least ±3.5σ, widened to keep `target` plus or
/// minus one σ in view. `x` is rounded to two decimals; density is evaluated at
/// the exact sample position.
pub fn sample(mean: f64, std_dev: f64, target: Option<f64>) -> Vec<DistributionPoint> {
    if std_dev == 0.0 {
        return vec![
            DistributionPoint::new(mean - SPIKE_HALF_WIDTH, 0.0),
            DistributionPoint::new(mean, 1.0),
            DistributionPoint::new(mean + SPIKE_HALF_WIDTH, 0.0),
        ];
    }

    let (start, end) = sample_range(mean, std_dev, target);
    let step = (end - start) / STEPS as f64;

    (0..=STEPS)
        .map(|i| {
            let x = if i == STEPS {
                end
            } else {
                start + step * i as f64
            };
            DistributionPoint::new(round_to(x, 2), normal_pdf(x, mean, std_dev))
        })
        .collect()
}

fn sample_range(mean: f64, std_dev: f64, target: Option<f64>) -> (f64, f64) {
    let low = mean - SPAN_SIGMAS * std_dev;
    let high = mean + SPAN_SIGMAS * std_dev;
    match target {
        Some(t) => (low.min(t - std_dev), high.max(t + std_dev)),
        None => (low, high),
    }
}
