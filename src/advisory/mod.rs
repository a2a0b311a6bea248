//! Contract with the external advisory collaborator.
//!
//! A client receives one structured [`AdvisoryRequest`] and returns raw JSON.
//! The JSON only becomes a [`Recommendation`](crate::recommend::Recommendation)
//! after [`schema::parse_response`] accepts it; anything else counts as the
//! service being unavailable.

pub mod command;
pub mod schema;

pub use command::CommandAdvisor;
pub use schema::parse_response;

use crate::core::ScorePoint;
use crate::errors::AdvisoryFailure;
use crate::stats::StatisticalSummary;
use async_trait::async_trait;
use serde::Serialize;

/// Everything the advisory service gets to see about one indicator.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryRequest {
    pub grouping_name: String,
    pub indicator_name: String,
    pub history: Vec<ScorePoint>,
    pub statistics: StatisticalSummary,
    pub prompt: String,
}

impl AdvisoryRequest {
    pub fn new(
        grouping_name: impl Into<String>,
        indicator_name: impl Into<String>,
        history: Vec<ScorePoint>,
        statistics: StatisticalSummary,
    ) -> Self {
        let grouping_name = grouping_name.into();
        let indicator_name = indicator_name.into();
        let prompt = build_prompt(&grouping_name, &indicator_name, history.len());
        Self {
            grouping_name,
            indicator_name,
            history,
            statistics,
            prompt,
        }
    }
}

fn build_prompt(grouping_name: &str, indicator_name: &str, periods: usize) -> String {
    format!(
        "You are a manufacturing quality analyst. Analyze the score history of indicator \
         \"{indicator_name}\" on platform \"{grouping_name}\" over the last {periods} periods.\n\
         1. From the trend (rising, falling, fluctuating or stable), recommend a realistic but \
         challenging target for period {next}.\n\
         2. Using normal-distribution bands (for example -1σ or -2σ), set a warning threshold \
         below which the process is abnormal and needs intervention.\n\
         3. Give a short reasoning and exactly 3 actionable improvement suggestions.\n\
         4. Rate the difficulty of reaching the target.\n\
         Reply with JSON only: {{\"recommendedScore\": number, \"warningScore\": number, \
         \"difficulty\": string, \"reasoning\": string, \"advice\": [string]}}",
        next = periods + 1,
    )
}

/// Transport to the advisory service.
#[async_trait]
pub trait AdvisoryClient: Send + Sync {
    async fn advise(&self, request: &AdvisoryRequest)
        -> Result<serde_json::Value, AdvisoryFailure>;
}

/// Client used when no advisory service is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledAdvisor;

#[async_trait]
impl AdvisoryClient for DisabledAdvisor {
    async fn advise(
        &self,
        _request: &AdvisoryRequest,
    ) -> Result<serde_json::Value, AdvisoryFailure> {
        Err(AdvisoryFailure::Disabled)
    }
}
