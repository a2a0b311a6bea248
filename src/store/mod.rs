//! Immutable portfolio snapshots.
//!
//! Every update returns a new [`Portfolio`]; unchanged groupings and indicators
//! are shared with the previous snapshot. Callers that hold an older snapshot
//! keep seeing the data they read.

pub mod catalog;

pub use catalog::{build_catalog, REFERENCE_GROUPINGS};

use crate::core::{Grouping, GroupingId, Indicator, IndicatorId};
use crate::errors::{Error, Result};
use crate::recommend::Recommendation;
use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Address of one indicator within a portfolio.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorKey {
    pub grouping: GroupingId,
    pub indicator: IndicatorId,
}

impl IndicatorKey {
    pub fn new(grouping: impl Into<GroupingId>, indicator: impl Into<IndicatorId>) -> Self {
        Self {
            grouping: grouping.into(),
            indicator: indicator.into(),
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.grouping, self.indicator)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Portfolio {
    groupings: Vector<Grouping>,
}

impl Portfolio {
    /// Build a portfolio, rejecting duplicate grouping or indicator ids.
    pub fn new(groupings: Vec<Grouping>) -> Result<Self> {
        let mut grouping_ids = HashSet::new();
        let mut indicator_ids = HashSet::new();
        for grouping in &groupings {
            if !grouping_ids.insert(grouping.id().clone()) {
                return Err(Error::Validation(format!(
                    "duplicate grouping id '{}'",
                    grouping.id()
                )));
            }
            for indicator in grouping.indicators() {
                if !indicator_ids.insert(indicator.id().clone()) {
                    return Err(Error::Validation(format!(
                        "duplicate indicator id '{}'",
                        indicator.id()
                    )));
                }
            }
        }

        Ok(Self {
            groupings: groupings.into_iter().collect(),
        })
    }

    pub fn groupings(&self) -> impl Iterator<Item = &Grouping> + '_ {
        self.groupings.iter()
    }

    pub fn grouping(&self, id: &GroupingId) -> Result<&Grouping> {
        self.groupings
            .iter()
            .find(|g| g.id() == id)
            .ok_or_else(|| Error::not_found("grouping", id.as_str()))
    }

    pub fn indicator(&self, key: &IndicatorKey) -> Result<(&Grouping, &Indicator)> {
        let grouping = self.grouping(&key.grouping)?;
        let indicator = grouping
            .indicator(&key.indicator)
            .ok_or_else(|| Error::not_found("indicator", key.indicator.as_str()))?;
        Ok((grouping, indicator))
    }

    /// True when no indicator anywhere holds a nonzero score.
    pub fn is_empty(&self) -> bool {
        self.groupings
            .iter()
            .all(|g| g.indicators().all(|i| !i.series().has_data()))
    }

    pub fn set_score(&self, key: &IndicatorKey, sequence: u32, value: f64) -> Result<Self> {
        self.update(key, |ind| ind.with_score(sequence, value))
    }

    pub fn set_period_label(
        &self,
        key: &IndicatorKey,
        sequence: u32,
        label: impl Into<String>,
    ) -> Result<Self> {
        let label = label.into();
        self.update(key, move |ind| ind.with_period_label(sequence, label))
    }

    pub fn rename_indicator(&self, key: &IndicatorKey, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        self.update(key, move |ind| Ok(ind.renamed(name)))
    }

    pub fn reset_indicator(&self, key: &IndicatorKey) -> Result<Self> {
        self.update(key, |ind| Ok(ind.reset()))
    }

    /// Attach `recommendation` if the indicator is still at `source_version`.
    pub fn attach_recommendation(
        &self,
        key: &IndicatorKey,
        recommendation: Recommendation,
        source_version: u64,
    ) -> Result<Self> {
        self.update(key, move |ind| {
            ind.with_recommendation(recommendation, source_version)
        })
    }

    fn update<F>(&self, key: &IndicatorKey, edit: F) -> Result<Self>
    where
        F: FnOnce(&Indicator) -> Result<Indicator>,
    {
        let index = self
            .groupings
            .iter()
            .position(|g| g.id() == &key.grouping)
            .ok_or_else(|| Error::not_found("grouping", key.grouping.as_str()))?;

        let updated = self.groupings[index].update_indicator(&key.indicator, edit)?;
        let mut groupings = self.groupings.clone();
        groupings.set(index, updated);
        Ok(Self { groupings })
    }
}
