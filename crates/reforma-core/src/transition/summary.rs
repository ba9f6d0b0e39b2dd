use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::projection::Projection;
use crate::types::{Money, Rate};

/// Headline figures of a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub baseline_total: Money,
    pub final_year: i32,
    pub final_total: Money,
    pub final_delta: Rate,
    /// Final-year monthly difference against the baseline, annualised (x12)
    pub annual_difference: Money,
    pub peak_year: i32,
    pub peak_total: Money,
    pub lowest_year: i32,
    pub lowest_total: Money,
}

/// Summarise a projection. `None` when it has no snapshots.
///
/// Ties on peak/lowest resolve to the earliest year.
pub fn summarize(projection: &Projection) -> Option<ProjectionSummary> {
    let last = projection.snapshots.last()?;
    let first = projection.snapshots.first()?;

    let mut peak = first;
    let mut lowest = first;
    for s in &projection.snapshots[1..] {
        if s.total > peak.total {
            peak = s;
        }
        if s.total < lowest.total {
            lowest = s;
        }
    }

    Some(ProjectionSummary {
        baseline_total: projection.baseline.total,
        final_year: last.year,
        final_total: last.total,
        final_delta: last.delta_vs_baseline,
        annual_difference: (last.total - projection.baseline.total) * dec!(12),
        peak_year: peak.year,
        peak_total: peak.total,
        lowest_year: lowest.year,
        lowest_total: lowest.total,
    })
}
