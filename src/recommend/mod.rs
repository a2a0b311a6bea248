//! Next-period target and warning threshold for an indicator.
//!
//! [`RecommendationProvider::recommend`] asks the advisory collaborator first
//! and falls back to a closed-form formula on any failure. It never returns an
//! error; degraded results carry the [`FALLBACK_DIFFICULTY`] label.

pub mod fallback;

pub use fallback::{fallback_recommendation, FALLBACK_DIFFICULTY};

use crate::advisory::{parse_response, AdvisoryClient, AdvisoryRequest};
use crate::core::ScoreSeries;
use crate::errors::{AdvisoryFailure, Error};
use crate::stats::StatisticalSummary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on a single advisory call.
pub const DEFAULT_ADVISORY_TIMEOUT: Duration = Duration::from_secs(30);

/// Recommended target, warning threshold and supporting notes.
///
/// Immutable: a new recommendation replaces the old one as a whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    recommended_score: f64,
    warning_score: f64,
    difficulty: String,
    reasoning: String,
    advice: Vec<String>,
}

impl Recommendation {
    pub fn new(
        recommended_score: f64,
        warning_score: f64,
        difficulty: impl Into<String>,
        reasoning: impl Into<String>,
        advice: Vec<String>,
    ) -> Self {
        Self {
            recommended_score,
            warning_score,
            difficulty: difficulty.into(),
            reasoning: reasoning.into(),
            advice,
        }
    }

    pub fn recommended_score(&self) -> f64 {
        self.recommended_score
    }

    pub fn warning_score(&self) -> f64 {
        self.warning_score
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn advice(&self) -> &[String] {
        &self.advice
    }

    /// True when produced by the fallback formula rather than the advisory service.
    pub fn is_estimated(&self) -> bool {
        self.difficulty == FALLBACK_DIFFICULTY
    }
}

pub struct RecommendationProvider {
    client: Arc<dyn AdvisoryClient>,
    timeout: Duration,
}

impl RecommendationProvider {
    pub fn new(client: Arc<dyn AdvisoryClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_ADVISORY_TIMEOUT,
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Produce a recommendation for `series`. Always succeeds.
    pub async fn recommend(
        &self,
        series: &ScoreSeries,
        summary: &StatisticalSummary,
        grouping_name: &str,
        indicator_name: &str,
    ) -> Recommendation {
        let request = AdvisoryRequest::new(
            grouping_name,
            indicator_name,
            series.points().cloned().collect(),
            *summary,
        );

        match self.ask_advisory(&request).await {
            Ok(recommendation) => {
                debug!(
                    indicator = indicator_name,
                    recommended = recommendation.recommended_score(),
                    warning = recommendation.warning_score(),
                    "Advisory recommendation accepted"
                );
                recommendation
            }
            Err(AdvisoryFailure::Disabled) => {
                debug!(
                    indicator = indicator_name,
                    "Advisory service disabled, using statistical fallback"
                );
                fallback_recommendation(summary)
            }
            Err(failure) => {
                let error = Error::AdvisoryUnavailable(failure);
                warn!(
                    grouping = grouping_name,
                    indicator = indicator_name,
                    error = %error,
                    "Advisory service unavailable, using statistical fallback"
                );
                fallback_recommendation(summary)
            }
        }
    }

    async fn ask_advisory(
        &self,
        request: &AdvisoryRequest,
    ) -> Result<Recommendation, AdvisoryFailure> {
        let raw = tokio::time::timeout(self.timeout, self.client.advise(request))
            .await
            .map_err(|_| AdvisoryFailure::Timeout(self.timeout))??;
        parse_response(&raw)
    }
}
