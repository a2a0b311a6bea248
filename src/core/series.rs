//! Ordered monthly score history for a single indicator.

use crate::errors::{Error, Result};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One recorded period of an indicator.
///
/// `sequence` is the stable 1..N ordinal; `label` is display-only and may be
/// edited without affecting ordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub sequence: u32,
    pub label: String,
    #[serde(default)]
    pub value: f64,
}

impl ScorePoint {
    pub fn new(sequence: u32, label: impl Into<String>, value: f64) -> Self {
        Self {
            sequence,
            label: label.into(),
            value,
        }
    }
}

/// Fixed-length score history, always iterated in `sequence` order.
///
/// Edits return a new series; the structure shares storage with the original
/// so snapshots stay cheap.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScorePoint>", into = "Vec<ScorePoint>")]
pub struct ScoreSeries {
    points: Vector<ScorePoint>,
}

impl ScoreSeries {
    /// Zero-valued series with one period per label, sequences starting at 1.
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let points = labels
            .into_iter()
            .zip(1u32..)
            .map(|(label, sequence)| ScorePoint::new(sequence, label, 0.0))
            .collect();
        Self { points }
    }

    /// Build a series from arbitrary points, sorting them by sequence.
    ///
    /// Duplicate sequences and non-finite values are rejected.
    pub fn from_points(points: Vec<ScorePoint>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(points.len());
        for point in &points {
            if !seen.insert(point.sequence) {
                return Err(Error::Validation(format!(
                    "duplicate period sequence {}",
                    point.sequence
                )));
            }
            ensure_finite(point.sequence, point.value)?;
        }

        let mut points = points;
        points.sort_by_key(|p| p.sequence);
        Ok(Self {
            points: points.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = &ScorePoint> + '_ {
        self.points.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn point(&self, sequence: u32) -> Option<&ScorePoint> {
        self.points.iter().find(|p| p.sequence == sequence)
    }

    /// Value of the chronologically final period, or 0 for an empty series.
    pub fn last_value(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.value)
    }

    /// True when at least one period holds a nonzero score.
    pub fn has_data(&self) -> bool {
        self.points.iter().any(|p| p.value != 0.0)
    }

    pub fn with_value(&self, sequence: u32, value: f64) -> Result<Self> {
        ensure_finite(sequence, value)?;
        self.update_point(sequence, |point| point.value = value)
    }

    pub fn with_label(&self, sequence: u32, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        self.update_point(sequence, move |point| point.label = label)
    }

    /// Same periods and labels, every value back to zero.
    pub fn zeroed(&self) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| ScorePoint::new(p.sequence, p.label.clone(), 0.0))
                .collect(),
        }
    }

    fn update_point(&self, sequence: u32, edit: impl FnOnce(&mut ScorePoint)) -> Result<Self> {
        let index = self
            .points
            .iter()
            .position(|p| p.sequence == sequence)
            .ok_or(Error::UnknownPeriod { sequence })?;

        let mut points = self.points.clone();
        let mut point = points[index].clone();
        edit(&mut point);
        points.set(index, point);
        Ok(Self { points })
    }
}

fn ensure_finite(sequence: u32, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidScore { sequence, value })
    }
}

impl TryFrom<Vec<ScorePoint>> for ScoreSeries {
    type Error = Error;

    fn try_from(points: Vec<ScorePoint>) -> Result<Self> {
        Self::from_points(points)
    }
}

impl From<ScoreSeries> for Vec<ScorePoint> {
    fn from(series: ScoreSeries) -> Self {
        series.points.into_iter().collect()
    }
}
