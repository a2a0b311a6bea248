//! Per-indicator score statistics, next-period targets and portfolio status
//! reports.
//!
//! ```rust,ignore
//! use scorecast::{ScoreEngine, IndicatorKey, RecommendationProvider, DisabledAdvisor};
//!
//! let engine = ScoreEngine::new(portfolio, RecommendationProvider::new(Arc::new(DisabledAdvisor)));
//! engine.set_score(&key, 3, 82.5)?;
//! let outcome = engine.request_recommendation(&key).await?;
//! let report = engine.get_portfolio_report();
//! ```

pub mod advisory;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod io;
pub mod observability;
pub mod recommend;
pub mod report;
pub mod stats;
pub mod status;
pub mod store;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{
    Grouping, GroupingId, Indicator, IndicatorId, RecommendationState, ScorePoint, ScoreSeries,
};

pub use crate::advisory::{AdvisoryClient, AdvisoryRequest, CommandAdvisor, DisabledAdvisor};
pub use crate::config::{load_config, ScorecastConfig};
pub use crate::engine::{DiscardReason, RecommendationOutcome, ScoreEngine};
pub use crate::errors::{AdvisoryFailure, Error, Result};
pub use crate::recommend::{fallback_recommendation, Recommendation, RecommendationProvider};
pub use crate::report::{build_report, IndicatorAnalysis, PortfolioReport, StatusTally};
pub use crate::stats::{sample, summarize, summarize_series, Stability, StatisticalSummary};
pub use crate::status::{classify, Status};
pub use crate::store::{IndicatorKey, Portfolio};
