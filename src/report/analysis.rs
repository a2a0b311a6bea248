//! Full read-out for a single indicator.

use crate::core::{Grouping, Indicator, ScorePoint};
use crate::recommend::Recommendation;
use crate::stats::{
    sample, sigma_distance, summarize_series, DistributionPoint, Stability, StatisticalSummary,
};
use crate::status::{classify_indicator, Status};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndicatorAnalysis {
    pub grouping_id: String,
    pub grouping_name: String,
    pub indicator_id: String,
    pub indicator_name: String,
    pub history: Vec<ScorePoint>,
    pub statistics: StatisticalSummary,
    pub stability: Stability,
    pub status: Status,
    pub recommendation: Option<Recommendation>,
    /// Distance of the target from the mean in standard deviations
    pub sigma_distance: f64,
    pub curve: Vec<DistributionPoint>,
}

impl IndicatorAnalysis {
    pub fn of(grouping: &Grouping, indicator: &Indicator) -> Self {
        let statistics = summarize_series(indicator.series());
        let recommendation = indicator.recommendation().cloned();
        let target = recommendation.as_ref().map(|r| r.recommended_score());

        Self {
            grouping_id: grouping.id().to_string(),
            grouping_name: grouping.name().to_string(),
            indicator_id: indicator.id().to_string(),
            indicator_name: indicator.name().to_string(),
            history: indicator.series().points().cloned().collect(),
            statistics,
            stability: Stability::from_std_dev(statistics.std_dev),
            status: classify_indicator(indicator),
            sigma_distance: sigma_distance(&statistics, recommendation.as_ref()),
            curve: sample(statistics.mean, statistics.std_dev, target),
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::IndicatorKey;
    use crate::testkit::sample_portfolio;

    #[test]
    fn test_analysis_without_recommendation() {
        let portfolio = sample_portfolio();
        let (grouping, indicator) = portfolio
            .indicator(&IndicatorKey::new("alpha", "alpha-01"))
            .unwrap();
        let analysis = IndicatorAnalysis::of(grouping, indicator);

        assert_eq!(analysis.grouping_name, "Alpha Line");
        assert_eq!(analysis.history.len(), 4);
        assert_eq!(analysis.statistics.mean, 70.0);
        assert_eq!(analysis.stability, Stability::Normal);
        assert_eq!(analysis.status, Status::Pending);
        assert_eq!(analysis.sigma_distance, 0.0);
        assert_eq!(analysis.curve.len(), 101);
    }

    #[test]
    fn test_flat_series_gets_spike_curve() {
        let portfolio = sample_portfolio();
        let (grouping, indicator) = portfolio
            .indicator(&IndicatorKey::new("beta", "beta-01"))
            .unwrap();
        let analysis = IndicatorAnalysis::of(grouping, indicator);
        assert_eq!(analysis.stability, Stability::NotApplicable);
        assert_eq!(analysis.curve.len(), 3);
    }
}
