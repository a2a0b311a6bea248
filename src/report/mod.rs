//! Portfolio status report.
//!
//! Only active indicators (nonzero data or a current recommendation) are
//! reported. Groupings without active indicators are left out entirely.

pub mod analysis;
pub mod overview;

pub use analysis::IndicatorAnalysis;
pub use overview::{IndicatorOverview, Intensity};

use crate::core::{Grouping, Indicator};
use crate::status::{classify_indicator, Status};
use crate::store::Portfolio;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub indicator_id: String,
    pub name: String,
    pub last_value: f64,
    pub recommended_score: Option<f64>,
    pub warning_score: Option<f64>,
    pub status: Status,
}

impl ReportRow {
    fn from_indicator(indicator: &Indicator) -> Self {
        let recommendation = indicator.recommendation();
        Self {
            indicator_id: indicator.id().to_string(),
            name: indicator.name().to_string(),
            last_value: indicator.last_value(),
            recommended_score: recommendation.map(|r| r.recommended_score()),
            warning_score: recommendation.map(|r| r.warning_score()),
            status: classify_indicator(indicator),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupingReport {
    pub grouping_id: String,
    pub name: String,
    pub rows: Vec<ReportRow>,
}

impl GroupingReport {
    pub fn active_count(&self) -> usize {
        self.rows.len()
    }
}

/// Count of active indicators per status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    pub pending: usize,
    pub abnormal: usize,
    pub achieved: usize,
    pub in_progress: usize,
}

impl StatusTally {
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Pending => self.pending += 1,
            Status::Abnormal => self.abnormal += 1,
            Status::Achieved => self.achieved += 1,
            Status::InProgress => self.in_progress += 1,
        }
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Pending => self.pending,
            Status::Abnormal => self.abnormal,
            Status::Achieved => self.achieved,
            Status::InProgress => self.in_progress,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.abnormal + self.achieved + self.in_progress
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub generated_at: DateTime<Utc>,
    pub tally: StatusTally,
    pub groupings: Vec<GroupingReport>,
    /// No score has been entered anywhere yet.
    pub is_empty_portfolio: bool,
}

pub fn build_report(portfolio: &Portfolio) -> PortfolioReport {
    let groupings: Vec<GroupingReport> = portfolio
        .groupings()
        .filter_map(grouping_report)
        .collect();

    let mut tally = StatusTally::default();
    groupings
        .iter()
        .flat_map(|g| g.rows.iter())
        .for_each(|row| tally.record(row.status));

    PortfolioReport {
        generated_at: Utc::now(),
        tally,
        groupings,
        is_empty_portfolio: portfolio.is_empty(),
    }
}

fn grouping_report(grouping: &Grouping) -> Option<GroupingReport> {
    let rows: Vec<ReportRow> = grouping
        .active_indicators()
        .map(ReportRow::from_indicator)
        .collect();

    if rows.is_empty() {
        return None;
    }

    Some(GroupingReport {
        grouping_id: grouping.id().to_string(),
        name: grouping.name().to_string(),
        rows,
    })
}
