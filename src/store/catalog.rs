//! Default portfolio layout.

use super::Portfolio;
use crate::core::{Grouping, GroupingId, Indicator, IndicatorId, ScoreSeries};
use crate::errors::Result;

/// The seven production platforms of the reference deployment.
pub const REFERENCE_GROUPINGS: [(&str, &str); 7] = [
    ("stamping", "Stamping"),
    ("components", "Components"),
    ("electrophoresis", "Electrophoresis"),
    ("manual_assembly", "Manual Assembly"),
    ("electric_assembly", "Electric Assembly"),
    ("innovation", "Innovation Products"),
    ("new_products", "New Products"),
];

pub const DEFAULT_INDICATORS_PER_GROUPING: usize = 23;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Build an all-zero portfolio: `per_grouping` indicators in each grouping,
/// one period per label. Indicator ids are `<grouping>-NN`.
pub fn build_catalog<A, B, L>(
    groupings: &[(A, B)],
    per_grouping: usize,
    labels: &[L],
) -> Result<Portfolio>
where
    A: AsRef<str>,
    B: AsRef<str>,
    L: AsRef<str>,
{
    let series = ScoreSeries::with_labels(labels.iter().map(|l| l.as_ref().to_string()));

    let groupings = groupings
        .iter()
        .map(|(id, name)| {
            let id = id.as_ref();
            let indicators = (1..=per_grouping)
                .map(|n| {
                    Indicator::new(
                        IndicatorId::new(format!("{id}-{n:02}")),
                        format!("Indicator {n}"),
                        series.clone(),
                    )
                })
                .collect();
            Grouping::new(GroupingId::new(id), name.as_ref(), indicators)
        })
        .collect();

    Portfolio::new(groupings)
}

pub fn reference_catalog() -> Result<Portfolio> {
    build_catalog(
        &REFERENCE_GROUPINGS,
        DEFAULT_INDICATORS_PER_GROUPING,
        &MONTH_LABELS,
    )
}
