//! Derived outcome rates.

use serde::{Deserialize, Serialize};

/// Outcome buckets shown on the dashboard.
///
/// No contests and disqualifications share the `Other` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeCategory {
    #[serde(rename = "KO/TKO")]
    KoTko,
    #[serde(rename = "Submission")]
    Submission,
    #[serde(rename = "Decision")]
    Decision,
    #[serde(rename = "Other")]
    Other,
}

impl OutcomeCategory {
    /// All buckets in display order.
    pub const ALL: [OutcomeCategory; 4] = [
        OutcomeCategory::KoTko,
        OutcomeCategory::Submission,
        OutcomeCategory::Decision,
        OutcomeCategory::Other,
    ];

    /// Buckets plotted in the stacked outcome chart.
    pub const FINISHES: [OutcomeCategory; 3] = [
        OutcomeCategory::KoTko,
        OutcomeCategory::Submission,
        OutcomeCategory::Decision,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutcomeCategory::KoTko => "KO/TKO",
            OutcomeCategory::Submission => "Submission",
            OutcomeCategory::Decision => "Decision",
            OutcomeCategory::Other => "Other",
        }
    }

    /// Caption of the metric tile for this bucket.
    pub fn rate_label(&self) -> &'static str {
        match self {
            OutcomeCategory::KoTko => "KO/TKO Rate",
            OutcomeCategory::Submission => "Submission Rate",
            OutcomeCategory::Decision => "Decision Rate",
            OutcomeCategory::Other => "Other Rate",
        }
    }
}

impl std::fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Absolute count for one outcome bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSlice {
    pub outcome: OutcomeCategory,
    pub count: u64,
}

/// Outcome rates for one division, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub ko_ratio: f64,
    pub submission_ratio: f64,
    pub decision_ratio: f64,
    /// No contests plus disqualifications over total fights
    pub other_ratio: f64,
}

impl DerivedMetrics {
    /// Rate for a single bucket.
    pub fn ratio(&self, outcome: OutcomeCategory) -> f64 {
        match outcome {
            OutcomeCategory::KoTko => self.ko_ratio,
            OutcomeCategory::Submission => self.submission_ratio,
            OutcomeCategory::Decision => self.decision_ratio,
            OutcomeCategory::Other => self.other_ratio,
        }
    }

    /// Sum of the four rates. 1.0 only when the source counts are complete.
    pub fn sum(&self) -> f64 {
        self.ko_ratio + self.submission_ratio + self.decision_ratio + self.other_ratio
    }

    /// Rates as percentages rounded to one decimal place.
    pub fn percentages(&self) -> OutcomePercentages {
        OutcomePercentages {
            ko: crate::calculate::to_percentage(self.ko_ratio),
            submission: crate::calculate::to_percentage(self.submission_ratio),
            decision: crate::calculate::to_percentage(self.decision_ratio),
            other: crate::calculate::to_percentage(self.other_ratio),
        }
    }
}

/// Display form of [`DerivedMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomePercentages {
    pub ko: f64,
    pub submission: f64,
    pub decision: f64,
    pub other: f64,
}

impl OutcomePercentages {
    pub fn get(&self, outcome: OutcomeCategory) -> f64 {
        match outcome {
            OutcomeCategory::KoTko => self.ko,
            OutcomeCategory::Submission => self.submission,
            OutcomeCategory::Decision => self.decision,
            OutcomeCategory::Other => self.other,
        }
    }
}
