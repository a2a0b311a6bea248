//! Compact per-indicator summary used by list views.

use crate::core::Indicator;
use crate::status::{classify_indicator, Status};
use serde::{Deserialize, Serialize};

/// Visual weight of the latest score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Excellent, // > 90
    Good,      // > 70
    Fair,      // > 0
    NoData,
}

impl Intensity {
    pub fn from_last_value(value: f64) -> Self {
        if value > 90.0 {
            Self::Excellent
        } else if value > 70.0 {
            Self::Good
        } else if value > 0.0 {
            Self::Fair
        } else {
            Self::NoData
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOverview {
    pub indicator_id: String,
    pub name: String,
    pub last_value: f64,
    /// Average of the periods that hold a positive score.
    pub recorded_average: Option<f64>,
    pub intensity: Intensity,
    pub status: Status,
}

impl IndicatorOverview {
    pub fn of(indicator: &Indicator) -> Self {
        let recorded: Vec<f64> = indicator
            .series()
            .points()
            .map(|p| p.value)
            .filter(|v| *v > 0.0)
            .collect();
        let recorded_average = if recorded.is_empty() {
            None
        } else {
            Some(recorded.iter().sum::<f64>() / recorded.len() as f64)
        };
        let last_value = indicator.last_value();

        Self {
            indicator_id: indicator.id().to_string(),
            name: indicator.name().to_string(),
            last_value,
            recorded_average,
            intensity: Intensity::from_last_value(last_value),
            status: classify_indicator(indicator),
        }
    }
}
