//! Tracked indicators and their recommendation lifecycle.
//!
//! An indicator carries a version that every data edit bumps. A recommendation
//! is attached together with the version it was computed from, so a result
//! for an older version can never be observed next to newer data.

use super::series::ScoreSeries;
use crate::errors::{Error, Result};
use crate::recommend::Recommendation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque indicator identifier, unique within a portfolio.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorId(String);

impl IndicatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IndicatorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Recommendation state of one indicator.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RecommendationState {
    #[default]
    NoRecommendation,
    HasRecommendation {
        recommendation: Arc<Recommendation>,
        source_version: u64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Indicator {
    id: IndicatorId,
    name: String,
    series: ScoreSeries,
    version: u64,
    state: RecommendationState,
}

impl Indicator {
    pub fn new(id: IndicatorId, name: impl Into<String>, series: ScoreSeries) -> Self {
        Self {
            id,
            name: name.into(),
            series,
            version: 0,
            state: RecommendationState::NoRecommendation,
        }
    }

    /// Rebuild an indicator from stored data, keeping a previously saved
    /// recommendation as current.
    pub fn restore(
        id: IndicatorId,
        name: impl Into<String>,
        series: ScoreSeries,
        recommendation: Option<Recommendation>,
    ) -> Self {
        let indicator = Self::new(id, name, series);
        match recommendation {
            Some(recommendation) => Self {
                state: RecommendationState::HasRecommendation {
                    recommendation: Arc::new(recommendation),
                    source_version: indicator.version,
                },
                ..indicator
            },
            None => indicator,
        }
    }

    pub fn id(&self) -> &IndicatorId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series(&self) -> &ScoreSeries {
        &self.series
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn state(&self) -> &RecommendationState {
        &self.state
    }

    /// The current recommendation, if one was computed for the present data.
    pub fn recommendation(&self) -> Option<&Recommendation> {
        match &self.state {
            RecommendationState::HasRecommendation {
                recommendation,
                source_version,
            } if *source_version == self.version => Some(recommendation.as_ref()),
            _ => None,
        }
    }

    pub fn last_value(&self) -> f64 {
        self.series.last_value()
    }

    /// Active indicators carry data or a recommendation and show up in reports.
    pub fn is_active(&self) -> bool {
        self.series.has_data() || self.recommendation().is_some()
    }

    pub fn with_score(&self, sequence: u32, value: f64) -> Result<Self> {
        let series = self.series.with_value(sequence, value)?;
        Ok(self.with_series(series))
    }

    pub fn with_period_label(&self, sequence: u32, label: impl Into<String>) -> Result<Self> {
        let series = self.series.with_label(sequence, label)?;
        Ok(self.with_series(series))
    }

    /// Zero every score and drop the recommendation.
    pub fn reset(&self) -> Self {
        self.with_series(self.series.zeroed())
    }

    /// Renaming is not a data edit and keeps the recommendation.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Attach a recommendation computed from `source_version`.
    ///
    /// Fails with [`Error::StaleResult`] when the indicator moved on since.
    pub fn with_recommendation(
        &self,
        recommendation: Recommendation,
        source_version: u64,
    ) -> Result<Self> {
        if source_version != self.version {
            return Err(Error::StaleResult {
                indicator: self.id.to_string(),
            });
        }

        Ok(Self {
            state: RecommendationState::HasRecommendation {
                recommendation: Arc::new(recommendation),
                source_version,
            },
            ..self.clone()
        })
    }

    fn with_series(&self, series: ScoreSeries) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            series,
            version: self.version + 1,
            state: RecommendationState::NoRecommendation,
        }
    }
}
