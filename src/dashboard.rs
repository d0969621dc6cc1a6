//! Dashboard views over a loaded dataset.
//!
//! A [`Dashboard`] pairs a dataset with its derived metrics, computed once
//! per load. Everything the front-end draws (the raw table, the stacked
//! outcome chart, total fights per division, the metric panel and pie for a
//! selected division) is read from here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::calculate::{self, MetricsError};
use crate::models::{
    Dataset, DatasetId, DerivedMetrics, FightRecord, OutcomeCategory, OutcomePercentages,
    OutcomeSlice,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown division '{0}'")]
    UnknownDivision(String),
}

/// Table row: raw counts joined with derived rates.
#[derive(Debug, Clone, Serialize)]
pub struct DivisionRow {
    #[serde(flatten)]
    pub record: FightRecord,
    pub metrics: DerivedMetrics,
    pub percentages: OutcomePercentages,
}

/// One bar segment of the stacked outcome chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeShare {
    pub division: String,
    pub total_fights: u32,
    pub outcome: OutcomeCategory,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivisionTotal {
    pub division: String,
    pub total_fights: u32,
}

/// A metric panel tile, e.g. "KO/TKO Rate: 60.0%".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub outcome: OutcomeCategory,
    pub label: String,
    pub percentage: f64,
    pub display: String,
}

/// Everything shown for a selected division.
#[derive(Debug, Clone, Serialize)]
pub struct DivisionDetail {
    pub record: FightRecord,
    pub metrics: DerivedMetrics,
    pub tiles: Vec<MetricTile>,
    pub breakdown: [OutcomeSlice; 4],
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub id: DatasetId,
    pub source_name: Option<String>,
    pub loaded_at: DateTime<Utc>,
    pub division_count: usize,
    pub total_fights: u64,
    pub inconsistent_divisions: Vec<String>,
}

/// A dataset with its derived metrics.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    metrics: Vec<DerivedMetrics>,
}

impl Dashboard {
    /// Derive metrics for every division. Fails if any division has zero fights.
    pub fn build(dataset: Dataset) -> Result<Self, MetricsError> {
        let metrics = calculate::derive_all(dataset.records())?;
        Ok(Self { dataset, metrics })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            id: self.dataset.id.clone(),
            source_name: self.dataset.source_name.clone(),
            loaded_at: self.dataset.loaded_at,
            division_count: self.dataset.len(),
            total_fights: self.dataset.total_fights(),
            inconsistent_divisions: self
                .dataset
                .inconsistent_divisions()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    fn pairs(&self) -> impl Iterator<Item = (&FightRecord, &DerivedMetrics)> {
        self.dataset.records().iter().zip(self.metrics.iter())
    }

    pub fn rows(&self) -> Vec<DivisionRow> {
        self.pairs()
            .map(|(record, metrics)| DivisionRow {
                record: record.clone(),
                metrics: *metrics,
                percentages: metrics.percentages(),
            })
            .collect()
    }

    /// Selector options, in file order.
    pub fn divisions(&self) -> Vec<&str> {
        self.dataset.divisions().collect()
    }

    /// Detail view for one division, matched exactly.
    pub fn select(&self, division: &str) -> Result<DivisionDetail, SelectionError> {
        let idx = self
            .dataset
            .position(division)
            .ok_or_else(|| SelectionError::UnknownDivision(division.to_string()))?;
        let record = &self.dataset.records()[idx];
        let metrics = self.metrics[idx];

        let tiles = OutcomeCategory::ALL
            .iter()
            .map(|&outcome| {
                let percentage = calculate::to_percentage(metrics.ratio(outcome));
                MetricTile {
                    outcome,
                    label: outcome.rate_label().to_string(),
                    percentage,
                    display: calculate::format_percentage(percentage),
                }
            })
            .collect();

        Ok(DivisionDetail {
            record: record.clone(),
            metrics,
            tiles,
            breakdown: calculate::outcome_breakdown(record),
        })
    }

    /// Long-format rows for the stacked outcome chart.
    pub fn outcome_shares(&self) -> Vec<OutcomeShare> {
        self.pairs()
            .flat_map(|(record, metrics)| {
                let pct = metrics.percentages();
                OutcomeCategory::FINISHES.map(|outcome| OutcomeShare {
                    division: record.division.clone(),
                    total_fights: record.total_fights,
                    outcome,
                    percentage: pct.get(outcome),
                })
            })
            .collect()
    }

    /// Total fights per division, busiest first.
    pub fn totals_by_division(&self) -> Vec<DivisionTotal> {
        let mut totals: Vec<DivisionTotal> = self
            .dataset
            .records()
            .iter()
            .map(|r| DivisionTotal {
                division: r.division.clone(),
                total_fights: r.total_fights,
            })
            .collect();
        totals.sort_by(|a, b| {
            b.total_fights
                .cmp(&a.total_fights)
                .then_with(|| a.division.cmp(&b.division))
        });
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dashboard() -> Dashboard {
        let records = vec![
            FightRecord::new("Flyweight", 40).with_finishes(10, 10, 20),
            FightRecord::new("Heavyweight", 100)
                .with_finishes(60, 20, 18)
                .with_other(1, 1),
            FightRecord::new("Bantamweight", 40).with_finishes(10, 10, 10),
        ];
        Dashboard::build(Dataset::new(DatasetId::from("test"), records).unwrap()).unwrap()
    }

    #[test]
    fn test_build_rejects_zero_totals() {
        let records = vec![
            FightRecord::new("Heavyweight", 100).with_finishes(100, 0, 0),
            FightRecord::new("Catchweight", 0),
        ];
        let ds = Dataset::new(DatasetId::from("test"), records).unwrap();
        let err = Dashboard::build(ds).unwrap_err();
        assert_eq!(
            err,
            MetricsError::ZeroTotalFights {
                division: "Catchweight".to_string()
            }
        );
    }

    #[test]
    fn test_rows_join_metrics() {
        let rows = dashboard().rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].record.division, "Heavyweight");
        assert_eq!(rows[1].percentages.ko, 60.0);
        assert_eq!(rows[1].percentages.other, 2.0);
        assert_eq!(rows[2].percentages.decision, 25.0);
    }

    #[test]
    fn test_row_json_is_flat() {
        let rows = dashboard().rows();
        let json = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(json["division"], "Heavyweight");
        assert_eq!(json["ko_count"], 60);
        assert_eq!(json["percentages"]["ko"], 60.0);
    }

    #[test]
    fn test_divisions_in_file_order() {
        assert_eq!(
            dashboard().divisions(),
            vec!["Flyweight", "Heavyweight", "Bantamweight"]
        );
    }

    #[test]
    fn test_select_division() {
        let detail = dashboard().select("Heavyweight").unwrap();
        assert_eq!(detail.record.total_fights, 100);

        let tiles: Vec<(&str, &str)> = detail
            .tiles
            .iter()
            .map(|t| (t.label.as_str(), t.display.as_str()))
            .collect();
        assert_eq!(
            tiles,
            vec![
                ("KO/TKO Rate", "60.0%"),
                ("Submission Rate", "20.0%"),
                ("Decision Rate", "18.0%"),
                ("Other Rate", "2.0%"),
            ]
        );

        let counts: Vec<u64> = detail.breakdown.iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![60, 20, 18, 2]);
        assert_eq!(detail.breakdown[3].outcome, OutcomeCategory::Other);
    }

    #[test]
    fn test_select_unknown_division() {
        let err = dashboard().select("Strawweight").unwrap_err();
        assert_eq!(err, SelectionError::UnknownDivision("Strawweight".to_string()));
        assert!(dashboard().select("heavyweight").is_err());
    }

    #[test]
    fn test_outcome_shares_long_format() {
        let shares = dashboard().outcome_shares();
        assert_eq!(shares.len(), 9);
        assert_eq!(
            shares[3],
            OutcomeShare {
                division: "Heavyweight".to_string(),
                total_fights: 100,
                outcome: OutcomeCategory::KoTko,
                percentage: 60.0,
            }
        );
        assert!(shares.iter().all(|s| s.outcome != OutcomeCategory::Other));
    }

    #[test]
    fn test_totals_sorted_descending() {
        let totals = dashboard().totals_by_division();
        let names: Vec<&str> = totals.iter().map(|t| t.division.as_str()).collect();
        assert_eq!(names, vec!["Heavyweight", "Bantamweight", "Flyweight"]);
    }

    #[test]
    fn test_summary() {
        let summary = dashboard().summary();
        assert_eq!(summary.division_count, 3);
        assert_eq!(summary.total_fights, 180);
        assert_eq!(summary.inconsistent_divisions, vec!["Bantamweight".to_string()]);
    }
}
