//! Data model: score series, indicators and groupings.

pub mod grouping;
pub mod indicator;
pub mod series;

pub use grouping::{Grouping, GroupingId};
pub use indicator::{Indicator, IndicatorId, RecommendationState};
pub use series::{ScorePoint, ScoreSeries};
