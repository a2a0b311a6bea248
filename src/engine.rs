//! Consumer-facing API over a portfolio.
//!
//! Reads derive statistics, curves and statuses from the current snapshot on
//! every call. Edits swap in a new snapshot. Recommendation requests are
//! single-flight per indicator, and a result is only attached if the indicator
//! is still at the version the request was built from.

use crate::errors::{Error, Result};
use crate::recommend::{Recommendation, RecommendationProvider};
use crate::report::{build_report, IndicatorAnalysis, IndicatorOverview, PortfolioReport};
use crate::stats::{sample, summarize_series, DistributionPoint, StatisticalSummary};
use crate::status::{classify_indicator, Status};
use crate::store::{IndicatorKey, Portfolio};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, info_span, Instrument};

/// Why a finished recommendation was not attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    /// The series changed while the request was in flight.
    Stale,
    /// The request was abandoned before it completed.
    Cancelled,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecommendationOutcome {
    Applied(Recommendation),
    Discarded {
        recommendation: Recommendation,
        reason: DiscardReason,
    },
}

impl RecommendationOutcome {
    pub fn recommendation(&self) -> &Recommendation {
        match self {
            Self::Applied(recommendation) | Self::Discarded { recommendation, .. } => {
                recommendation
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

pub struct ScoreEngine {
    portfolio: RwLock<Portfolio>,
    provider: RecommendationProvider,
    in_flight: DashMap<IndicatorKey, u64>,
    next_ticket: AtomicU64,
}

impl ScoreEngine {
    pub fn new(portfolio: Portfolio, provider: RecommendationProvider) -> Self {
        Self {
            portfolio: RwLock::new(portfolio),
            provider,
            in_flight: DashMap::new(),
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Current snapshot. Cheap: storage is shared with the engine.
    pub fn snapshot(&self) -> Portfolio {
        self.portfolio.read().clone()
    }

    pub fn get_statistics(&self, key: &IndicatorKey) -> Result<StatisticalSummary> {
        let portfolio = self.portfolio.read();
        let (_, indicator) = portfolio.indicator(key)?;
        Ok(summarize_series(indicator.series()))
    }

    /// Density curve for the indicator, widened to show its current target.
    pub fn get_distribution_curve(&self, key: &IndicatorKey) -> Result<Vec<DistributionPoint>> {
        let portfolio = self.portfolio.read();
        let (_, indicator) = portfolio.indicator(key)?;
        let summary = summarize_series(indicator.series());
        let target = indicator.recommendation().map(|r| r.recommended_score());
        Ok(sample(summary.mean, summary.std_dev, target))
    }

    pub fn get_status(&self, key: &IndicatorKey) -> Result<Status> {
        let portfolio = self.portfolio.read();
        let (_, indicator) = portfolio.indicator(key)?;
        Ok(classify_indicator(indicator))
    }

    pub fn get_recommendation(&self, key: &IndicatorKey) -> Result<Option<Recommendation>> {
        let portfolio = self.portfolio.read();
        let (_, indicator) = portfolio.indicator(key)?;
        Ok(indicator.recommendation().cloned())
    }

    pub fn get_overview(&self, key: &IndicatorKey) -> Result<IndicatorOverview> {
        let portfolio = self.portfolio.read();
        let (_, indicator) = portfolio.indicator(key)?;
        Ok(IndicatorOverview::of(indicator))
    }

    pub fn get_analysis(&self, key: &IndicatorKey) -> Result<IndicatorAnalysis> {
        let portfolio = self.portfolio.read();
        let (grouping, indicator) = portfolio.indicator(key)?;
        Ok(IndicatorAnalysis::of(grouping, indicator))
    }

    pub fn get_portfolio_report(&self) -> PortfolioReport {
        build_report(&self.portfolio.read())
    }

    pub fn set_score(&self, key: &IndicatorKey, sequence: u32, value: f64) -> Result<()> {
        self.apply(|p| p.set_score(key, sequence, value))
    }

    pub fn set_period_label(&self, key: &IndicatorKey, sequence: u32, label: &str) -> Result<()> {
        self.apply(|p| p.set_period_label(key, sequence, label))
    }

    pub fn rename_indicator(&self, key: &IndicatorKey, name: &str) -> Result<()> {
        self.apply(|p| p.rename_indicator(key, name))
    }

    pub fn reset_indicator(&self, key: &IndicatorKey) -> Result<()> {
        self.apply(|p| p.reset_indicator(key))
    }

    /// True while a recommendation request for `key` is outstanding.
    pub fn is_analyzing(&self, key: &IndicatorKey) -> bool {
        self.in_flight.contains_key(key)
    }

    /// Abandon the outstanding request for `key`; its result will be discarded.
    ///
    /// Returns false when nothing was in flight.
    pub fn cancel_recommendation(&self, key: &IndicatorKey) -> bool {
        // Orders the cancel against a completing request's ticket check and attach.
        let _portfolio = self.portfolio.write();
        let cancelled = self.in_flight.remove(key).is_some();
        if cancelled {
            debug!(indicator = %key, "Recommendation request cancelled");
        }
        cancelled
    }

    /// Compute a recommendation for the indicator's current data.
    ///
    /// Fails only for unknown indicators or when another request for the same
    /// indicator is still outstanding. Advisory failures are absorbed by the
    /// provider.
    pub async fn request_recommendation(
        &self,
        key: &IndicatorKey,
    ) -> Result<RecommendationOutcome> {
        let (series, version, grouping_name, indicator_name) = {
            let portfolio = self.portfolio.read();
            let (grouping, indicator) = portfolio.indicator(key)?;
            (
                indicator.series().clone(),
                indicator.version(),
                grouping.name().to_string(),
                indicator.name().to_string(),
            )
        };

        let flight = self.begin_flight(key)?;
        let span = info_span!("recommendation", indicator = %key, version);

        async move {
            info!("Requesting recommendation");
            let summary = summarize_series(&series);
            let recommendation = self
                .provider
                .recommend(&series, &summary, &grouping_name, &indicator_name)
                .await;

            let mut portfolio = self.portfolio.write();
            let outcome = if !flight.is_current() {
                debug!("Discarding recommendation for abandoned request");
                Ok(RecommendationOutcome::Discarded {
                    recommendation,
                    reason: DiscardReason::Cancelled,
                })
            } else {
                match portfolio.attach_recommendation(key, recommendation.clone(), version) {
                    Ok(next) => {
                        *portfolio = next;
                        info!(
                            estimated = recommendation.is_estimated(),
                            "Recommendation attached"
                        );
                        Ok(RecommendationOutcome::Applied(recommendation))
                    }
                    Err(Error::StaleResult { .. }) => {
                        debug!("Discarding recommendation computed from outdated scores");
                        Ok(RecommendationOutcome::Discarded {
                            recommendation,
                            reason: DiscardReason::Stale,
                        })
                    }
                    Err(e) => Err(e),
                }
            };
            // The slot is freed while the snapshot lock is still held.
            drop(flight);
            outcome
        }
        .instrument(span)
        .await
    }

    fn apply<F>(&self, edit: F) -> Result<()>
    where
        F: FnOnce(&Portfolio) -> Result<Portfolio>,
    {
        let mut portfolio = self.portfolio.write();
        let next = edit(&portfolio)?;
        *portfolio = next;
        Ok(())
    }

    fn begin_flight(&self, key: &IndicatorKey) -> Result<FlightGuard<'_>> {
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => Err(Error::RecommendationInFlight {
                indicator: key.to_string(),
            }),
            Entry::Vacant(slot) => {
                let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
                slot.insert(ticket);
                Ok(FlightGuard {
                    in_flight: &self.in_flight,
                    key: key.clone(),
                    ticket,
                })
            }
        }
    }
}

/// Marks a request as outstanding until dropped.
struct FlightGuard<'a> {
    in_flight: &'a DashMap<IndicatorKey, u64>,
    key: IndicatorKey,
    ticket: u64,
}

impl FlightGuard<'_> {
    /// False once the request was cancelled (and possibly superseded).
    fn is_current(&self) -> bool {
        self.in_flight
            .get(&self.key)
            .is_some_and(|ticket| *ticket == self.ticket)
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight
            .remove_if(&self.key, |_, ticket| *ticket == self.ticket);
    }
}
