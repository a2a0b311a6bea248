use super::indicator::{Indicator, IndicatorId};
use crate::errors::{Error, Result};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupingId(String);

impl GroupingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupingId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Organizational container ("platform") owning a set of indicators.
#[derive(Clone, Debug, PartialEq)]
pub struct Grouping {
    id: GroupingId,
    name: String,
    indicators: Vector<Indicator>,
}

impl Grouping {
    pub fn new(id: GroupingId, name: impl Into<String>, indicators: Vec<Indicator>) -> Self {
        Self {
            id,
            name: name.into(),
            indicators: indicators.into_iter().collect(),
        }
    }

    pub fn id(&self) -> &GroupingId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn indicators(&self) -> impl Iterator<Item = &Indicator> + '_ {
        self.indicators.iter()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn indicator(&self, id: &IndicatorId) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.id() == id)
    }

    pub fn active_indicators(&self) -> impl Iterator<Item = &Indicator> + '_ {
        self.indicators.iter().filter(|i| i.is_active())
    }

    /// Replace one indicator by applying `edit`, returning the new grouping.
    pub fn update_indicator<F>(&self, id: &IndicatorId, edit: F) -> Result<Self>
    where
        F: FnOnce(&Indicator) -> Result<Indicator>,
    {
        let index = self
            .indicators
            .iter()
            .position(|i| i.id() == id)
            .ok_or_else(|| Error::not_found("indicator", id.as_str()))?;

        let updated = edit(&self.indicators[index])?;
        let mut indicators = self.indicators.clone();
        indicators.set(index, updated);
        Ok(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            indicators,
        })
    }
}
