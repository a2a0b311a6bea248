//! `.scorecast.toml` settings.
//!
//! ```toml
//! [series]
//! labels = ["Jan", "Feb", "Mar"]
//!
//! [advisory]
//! command = "scorecast-advisor"
//! timeout_seconds = 20
//!
//! [portfolio]
//! indicators_per_grouping = 10
//!
//! [[portfolio.groupings]]
//! id = "paint"
//! name = "Paint Shop"
//! ```
//!
//! Every section and field is optional.

pub mod advisory;
pub mod loader;
pub mod validation;

pub use advisory::{AdvisoryConfig, ADVISORY_COMMAND_ENV};
pub use loader::{directory_ancestors, load_config, load_config_from_path, CONFIG_FILE_NAME};
pub use validation::{validate_config, validate_config_result};

use crate::advisory::{AdvisoryClient, CommandAdvisor, DisabledAdvisor};
use crate::errors::Result;
use crate::recommend::RecommendationProvider;
use crate::store::catalog::{DEFAULT_INDICATORS_PER_GROUPING, MONTH_LABELS};
use crate::store::{build_catalog, Portfolio, REFERENCE_GROUPINGS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorecastConfig {
    #[serde(default)]
    pub series: SeriesConfig,

    #[serde(default)]
    pub advisory: AdvisoryConfig,

    #[serde(default)]
    pub portfolio: PortfolioConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// One label per period; the count fixes the series length
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            labels: default_labels(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default = "default_indicators_per_grouping")]
    pub indicators_per_grouping: usize,

    #[serde(default = "default_groupings")]
    pub groupings: Vec<GroupingSpec>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            indicators_per_grouping: default_indicators_per_grouping(),
            groupings: default_groupings(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingSpec {
    pub id: String,
    pub name: String,
}

impl GroupingSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl ScorecastConfig {
    /// Empty portfolio laid out as configured.
    pub fn catalog(&self) -> Result<Portfolio> {
        let groupings: Vec<(&str, &str)> = self
            .portfolio
            .groupings
            .iter()
            .map(|g| (g.id.as_str(), g.name.as_str()))
            .collect();
        build_catalog(
            groupings.as_slice(),
            self.portfolio.indicators_per_grouping,
            self.series.labels.as_slice(),
        )
    }

    /// Advisory client for these settings.
    ///
    /// Falls back to [`DisabledAdvisor`] when no command is active or the
    /// command cannot be found on `PATH`.
    pub fn build_advisor(&self) -> Arc<dyn AdvisoryClient> {
        let Some(command) = self.advisory.active_command() else {
            log::debug!("No advisory command configured; using fallback recommendations");
            return Arc::new(DisabledAdvisor);
        };

        match CommandAdvisor::resolve(command, self.advisory.args.clone()) {
            Ok(advisor) => {
                log::debug!("Advisory command resolved to {}", advisor.program().display());
                Arc::new(advisor)
            }
            Err(e) => {
                log::warn!("{e}. Using fallback recommendations.");
                Arc::new(DisabledAdvisor)
            }
        }
    }

    pub fn recommendation_provider(&self) -> RecommendationProvider {
        RecommendationProvider::new(self.build_advisor()).with_timeout(self.advisory.timeout())
    }
}

fn default_labels() -> Vec<String> {
    MONTH_LABELS.iter().map(|l| l.to_string()).collect()
}

fn default_indicators_per_grouping() -> usize {
    DEFAULT_INDICATORS_PER_GROUPING
}

fn default_groupings() -> Vec<GroupingSpec> {
    REFERENCE_GROUPINGS
        .iter()
        .map(|(id, name)| GroupingSpec::new(*id, *name))
        .collect()
}
