//! JSON interchange format for portfolios.
//!
//! ```json
//! { "groupings": [ { "id": "stamping", "name": "Stamping", "indicators": [
//!     { "id": "stamping-01", "name": "Scrap rate",
//!       "series": [ { "sequence": 1, "label": "Jan", "value": 82.5 } ],
//!       "recommendation": { "recommendedScore": 85.0, ... } } ] } ] }
//! ```
//!
//! A stored recommendation is taken as current for the stored series.

use crate::core::{Grouping, GroupingId, Indicator, IndicatorId, ScorePoint, ScoreSeries};
use super::{read_file, write_file};
use crate::errors::{Error, Result, ResultExt};
use crate::recommend::Recommendation;
use crate::store::Portfolio;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioFile {
    pub groupings: Vec<GroupingRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub indicators: Vec<IndicatorRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub series: Vec<ScorePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

impl PortfolioFile {
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        Self {
            groupings: portfolio
                .groupings()
                .map(|g| GroupingRecord {
                    id: g.id().to_string(),
                    name: g.name().to_string(),
                    indicators: g.indicators().map(IndicatorRecord::from_indicator).collect(),
                })
                .collect(),
        }
    }

    pub fn into_portfolio(self) -> Result<Portfolio> {
        let groupings = self
            .groupings
            .into_iter()
            .map(GroupingRecord::into_grouping)
            .collect::<Result<Vec<_>>>()?;
        Portfolio::new(groupings)
    }
}

impl GroupingRecord {
    fn into_grouping(self) -> Result<Grouping> {
        let grouping_id = self.id;
        let indicators = self
            .indicators
            .into_iter()
            .map(IndicatorRecord::into_indicator)
            .collect::<Result<Vec<_>>>()
            .context(format!("grouping '{grouping_id}'"))?;
        Ok(Grouping::new(GroupingId::new(grouping_id), self.name, indicators))
    }
}

impl IndicatorRecord {
    fn from_indicator(indicator: &Indicator) -> Self {
        Self {
            id: indicator.id().to_string(),
            name: indicator.name().to_string(),
            series: indicator.series().points().cloned().collect(),
            recommendation: indicator.recommendation().cloned(),
        }
    }

    fn into_indicator(self) -> Result<Indicator> {
        let series = ScoreSeries::from_points(self.series)
            .context(format!("indicator '{}'", self.id))?;
        Ok(Indicator::restore(
            IndicatorId::new(self.id),
            self.name,
            series,
            self.recommendation,
        ))
    }
}

pub fn read_portfolio(path: &Path) -> Result<Portfolio> {
    let contents = read_file(path).context(format!("Failed to read {}", path.display()))?;
    let file: PortfolioFile = serde_json::from_str(&contents)
        .map_err(Error::from)
        .context(format!("Failed to parse {}", path.display()))?;
    file.into_portfolio()
        .context(format!("Invalid portfolio {}", path.display()))
}

pub fn write_portfolio(path: &Path, portfolio: &Portfolio) -> Result<()> {
    let json = serde_json::to_string_pretty(&PortfolioFile::from_portfolio(portfolio))?;
    write_file(path, &(json + "\n")).context(format!("Failed to write {}", path.display()))
}
