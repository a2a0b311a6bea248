//! Configuration checks that report every problem at once.
//!
//! Each section is checked independently and the failures are merged, so a
//! file with three mistakes produces three messages. Messages start with the
//! dotted path of the offending field.

use super::{AdvisoryConfig, PortfolioConfig, ScorecastConfig, SeriesConfig};
use crate::errors::{Error, Result};
use std::collections::HashSet;
use stillwater::{NonEmptyVec, Validation};

pub type ConfigValidation<T> = Validation<T, NonEmptyVec<String>>;

/// Validate the whole config, accumulating all errors.
pub fn validate_config(config: &ScorecastConfig) -> ConfigValidation<()> {
    combine(vec![
        validate_series(&config.series),
        validate_advisory(&config.advisory),
        validate_portfolio(&config.portfolio),
    ])
}

/// Fail-fast wrapper: all messages end up in one [`Error::Configuration`].
pub fn validate_config_result(config: &ScorecastConfig) -> Result<()> {
    match validate_config(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(Error::Configuration(
            errors.into_iter().collect::<Vec<_>>().join("; "),
        )),
    }
}

fn validate_series(series: &SeriesConfig) -> ConfigValidation<()> {
    if series.labels.is_empty() {
        return failure("series.labels: at least one period label is required".into());
    }

    let errors = series
        .labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.trim().is_empty())
        .map(|(i, _)| format!("series.labels[{i}]: label must not be blank"))
        .collect();
    from_errors(errors)
}

fn validate_advisory(advisory: &AdvisoryConfig) -> ConfigValidation<()> {
    if advisory.timeout_seconds == 0 {
        failure("advisory.timeout_seconds: must be greater than 0".into())
    } else {
        Validation::Success(())
    }
}

fn validate_portfolio(portfolio: &PortfolioConfig) -> ConfigValidation<()> {
    let mut errors = Vec::new();

    if portfolio.indicators_per_grouping == 0 {
        errors.push("portfolio.indicators_per_grouping: must be greater than 0".to_string());
    }
    if portfolio.groupings.is_empty() {
        errors.push("portfolio.groupings: at least one grouping is required".to_string());
    }

    let mut seen = HashSet::new();
    for (i, grouping) in portfolio.groupings.iter().enumerate() {
        let id = grouping.id.trim();
        if id.is_empty() {
            errors.push(format!("portfolio.groupings[{i}].id: must not be blank"));
        } else if !seen.insert(id) {
            errors.push(format!("portfolio.groupings[{i}].id: duplicate id '{id}'"));
        }
        if grouping.name.trim().is_empty() {
            errors.push(format!("portfolio.groupings[{i}].name: must not be blank"));
        }
    }

    from_errors(errors)
}

fn combine(validations: Vec<ConfigValidation<()>>) -> ConfigValidation<()> {
    let errors = validations
        .into_iter()
        .flat_map(|v| match v {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.into_iter().collect(),
        })
        .collect();
    from_errors(errors)
}

fn from_errors(errors: Vec<String>) -> ConfigValidation<()> {
    match NonEmptyVec::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

fn failure(message: String) -> ConfigValidation<()> {
    Validation::Failure(NonEmptyVec::new(message, vec![]))
}
