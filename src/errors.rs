//! Shared error types for scorecast.
//!
//! Most operations in this crate degrade instead of failing: summaries of an
//! empty series are all-zero and recommendation requests always come back with
//! a usable [`Recommendation`](crate::recommend::Recommendation). The variants
//! below cover what remains: bad edits, lookups of unknown entities, the
//! single-flight rule and the configuration/file edges.

use std::time::Duration;
use thiserror::Error;

/// Why the advisory collaborator could not be used.
///
/// The recommendation provider logs this and then takes the fallback path.
/// The cause never changes the fallback result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisoryFailure {
    /// No advisory transport is configured.
    #[error("advisory service is disabled")]
    Disabled,

    /// The transport failed (spawn error, non-zero exit, unreadable output).
    #[error("advisory transport failed: {0}")]
    Transport(String),

    /// The call did not complete within the configured bound.
    #[error("advisory call timed out after {0:?}")]
    Timeout(Duration),

    /// A response arrived but did not match the expected schema.
    #[error("malformed advisory response: {}", .0.join("; "))]
    Malformed(Vec<String>),
}

/// Main error type for scorecast operations
#[derive(Debug, Error)]
pub enum Error {
    /// A summary was requested over no data. `stats::summarize` never raises
    /// this; it returns an all-zero summary instead.
    #[error("no score values to summarize")]
    EmptyInput,

    /// The advisory collaborator was unusable.
    #[error(transparent)]
    AdvisoryUnavailable(#[from] AdvisoryFailure),

    /// An advisory result arrived after its indicator changed or was abandoned.
    #[error("recommendation for indicator '{indicator}' is stale and was discarded")]
    StaleResult { indicator: String },

    /// A recommendation request is already outstanding for this indicator.
    #[error("a recommendation for indicator '{indicator}' is already in progress")]
    RecommendationInFlight { indicator: String },

    /// Lookup of an unknown grouping or indicator
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// Score values must be finite numbers
    #[error("invalid score {value} for period {sequence}")]
    InvalidScore { sequence: u32, value: f64 },

    /// Edit addressed a period that is not part of the series
    #[error("period {sequence} is not part of the series")]
    UnknownPeriod { sequence: u32 },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_lists_every_problem() {
        let failure = AdvisoryFailure::Malformed(vec![
            "recommendedScore is missing".to_string(),
            "advice must be a list".to_string(),
        ]);
        let text = failure.to_string();
        assert!(text.contains("recommendedScore is missing"));
        assert!(text.contains("advice must be a list"));
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::not_found("indicator", "stamping-01"));
        let err = result.context("loading indicator").unwrap_err();
        assert_eq!(
            err.to_string(),
            "loading indicator: indicator 'stamping-01' not found"
        );
    }
}
