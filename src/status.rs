//! Classification of an indicator's latest score against its recommendation.

use crate::core::Indicator;
use crate::recommend::Recommendation;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No recommendation yet
    Pending,
    /// Below the warning threshold
    Abnormal,
    /// At or above the recommended target
    Achieved,
    InProgress,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Abnormal,
        Status::Achieved,
        Status::InProgress,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Abnormal => "abnormal",
            Self::Achieved => "achieved",
            Self::InProgress => "in progress",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `last_value` against `recommendation`.
///
/// The warning check runs before the achievement check, so when a recommendation
/// has `warning > recommended` a value between the two is reported Abnormal.
pub fn classify(last_value: f64, recommendation: Option<&Recommendation>) -> Status {
    let Some(rec) = recommendation else {
        return Status::Pending;
    };

    if last_value < rec.warning_score() {
        Status::Abnormal
    } else if last_value >= rec.recommended_score() {
        Status::Achieved
    } else {
        Status::InProgress
    }
}

pub fn classify_indicator(indicator: &Indicator) -> Status {
    classify(indicator.last_value(), indicator.recommendation())
}
