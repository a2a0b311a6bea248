//! Test doubles and fixtures.
//!
//! - [`ScriptedAdvisor`]: an [`AdvisoryClient`](crate::advisory::AdvisoryClient)
//!   that replays queued outcomes and records every request it receives
//! - Fixture builders for series and small portfolios
//! - Assertion macros for `Result` and `Validation` values
//!
//! ```rust,ignore
//! use scorecast::testkit::{series_from_values, ScriptedAdvisor};
//!
//! let advisor = ScriptedAdvisor::new().respond(json!({ "recommendedScore": 80.0 }));
//! let series = series_from_values(&[60.0, 70.0]);
//! ```

pub mod advisor;
pub mod assertions;
pub mod helpers;

// Assertion macros are exported at crate root via #[macro_export]
pub use advisor::ScriptedAdvisor;
pub use helpers::{sample_portfolio, series_from_values, valid_advisory_response};
