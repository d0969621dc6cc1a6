//! Statistics calculation engine.
//!
//! Computes derived metrics from a division record:
//! - Outcome rates relative to total fights
//! - The combined "other" bucket (no contests + disqualifications)
//! - Percentage rounding for display

use thiserror::Error;

use crate::models::{DerivedMetrics, FightRecord, OutcomeCategory, OutcomeSlice};

/// Errors from metric derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Division '{division}' has zero total fights")]
    ZeroTotalFights { division: String },
}

/// Calculate a rate from a count and a non-zero total.
fn rate(count: u64, total: u32) -> f64 {
    count as f64 / f64::from(total)
}

/// Derive outcome rates for one division.
///
/// Rates are not normalised: a record whose counts fall short of its total
/// yields rates summing to less than 1.
pub fn derive_metrics(record: &FightRecord) -> Result<DerivedMetrics, MetricsError> {
    let total = record.total_fights;
    if total == 0 {
        return Err(MetricsError::ZeroTotalFights {
            division: record.division.clone(),
        });
    }

    Ok(DerivedMetrics {
        ko_ratio: rate(record.ko_count.into(), total),
        submission_ratio: rate(record.submission_count.into(), total),
        decision_ratio: rate(record.decision_count.into(), total),
        other_ratio: rate(record.other_count(), total),
    })
}

/// Derive metrics for every record, preserving order.
pub fn derive_all(records: &[FightRecord]) -> Result<Vec<DerivedMetrics>, MetricsError> {
    records.iter().map(derive_metrics).collect()
}

/// Absolute counts per outcome bucket, in display order.
pub fn outcome_breakdown(record: &FightRecord) -> [OutcomeSlice; 4] {
    OutcomeCategory::ALL.map(|outcome| OutcomeSlice {
        outcome,
        count: match outcome {
            OutcomeCategory::KoTko => record.ko_count.into(),
            OutcomeCategory::Submission => record.submission_count.into(),
            OutcomeCategory::Decision => record.decision_count.into(),
            OutcomeCategory::Other => record.other_count(),
        },
    })
}

/// Convert a rate to a percentage rounded to one decimal place.
///
/// Ties round to the even digit, so 1.25 becomes 1.2.
pub fn to_percentage(ratio: f64) -> f64 {
    let percentage = ratio * 100.0;
    (percentage * 10.0).round_ties_even() / 10.0
}

/// Format a percentage the way metric tiles show it, e.g. `"60.0%"`.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}
