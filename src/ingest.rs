//! CSV intake.
//!
//! Parses an uploaded fight outcome table into a [`Dataset`], checking the
//! required columns and applying the configured count-consistency policy.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Dataset, DatasetError, DatasetId, FightRecord};

/// Columns every upload must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Division",
    "Total Fights",
    "(T)KOs",
    "Submissions",
    "Total Decisions",
    "No Contests",
    "DQs",
];

/// Errors that can occur while loading a CSV.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid row at line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("Blank division name at line {line}")]
    BlankDivision { line: u64 },

    #[error("Division '{division}': outcome counts sum to {counted}, expected {total}")]
    InconsistentCounts {
        division: String,
        counted: u64,
        total: u32,
    },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// How to treat rows whose outcome counts do not add up to total fights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyPolicy {
    /// Accept silently
    Tolerate,
    /// Accept and log a warning per row
    #[default]
    Warn,
    /// Reject the whole upload
    Strict,
}

impl fmt::Display for ConsistencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyPolicy::Tolerate => write!(f, "tolerate"),
            ConsistencyPolicy::Warn => write!(f, "warn"),
            ConsistencyPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ConsistencyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tolerate" => Ok(ConsistencyPolicy::Tolerate),
            "warn" => Ok(ConsistencyPolicy::Warn),
            "strict" => Ok(ConsistencyPolicy::Strict),
            other => Err(format!(
                "unknown policy '{}' (expected tolerate, warn or strict)",
                other
            )),
        }
    }
}

/// One CSV row, keyed by the upload's column headers.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Division")]
    division: String,
    #[serde(rename = "Total Fights")]
    total_fights: u32,
    #[serde(rename = "(T)KOs")]
    ko_count: u32,
    #[serde(rename = "Submissions")]
    submission_count: u32,
    #[serde(rename = "Total Decisions")]
    decision_count: u32,
    #[serde(rename = "No Contests")]
    no_contest_count: u32,
    #[serde(rename = "DQs")]
    dq_count: u32,
}

impl From<CsvRow> for FightRecord {
    fn from(row: CsvRow) -> Self {
        FightRecord::new(row.division, row.total_fights)
            .with_finishes(row.ko_count, row.submission_count, row.decision_count)
            .with_other(row.no_contest_count, row.dq_count)
    }
}

/// Loads fight outcome tables from CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader {
    policy: ConsistencyPolicy,
}

impl CsvLoader {
    pub fn new(policy: ConsistencyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ConsistencyPolicy {
        self.policy
    }

    /// Load a dataset from raw upload bytes.
    pub fn load_bytes(
        &self,
        bytes: &[u8],
        source_name: Option<&str>,
    ) -> Result<Dataset, IngestError> {
        let records = self.load_reader(bytes)?;
        let mut dataset = Dataset::new(DatasetId::from_content(bytes), records)?;
        if let Some(name) = source_name {
            dataset = dataset.with_source_name(name);
        }

        info!(
            "Loaded dataset {} with {} divisions",
            dataset.id,
            dataset.len()
        );
        Ok(dataset)
    }

    /// Load a dataset from a file on disk.
    pub fn load_path(&self, path: &Path) -> Result<Dataset, IngestError> {
        let bytes = std::fs::read(path)?;
        let name = path.file_name().and_then(|n| n.to_str());
        self.load_bytes(&bytes, name)
    }

    /// Parse records from any reader, in file order.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<FightRecord>, IngestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            let parsed: CsvRow = row
                .deserialize(Some(&headers))
                .map_err(|e| IngestError::InvalidRow {
                    line,
                    message: e.to_string(),
                })?;

            if parsed.division.is_empty() {
                return Err(IngestError::BlankDivision { line });
            }

            let record = FightRecord::from(parsed);
            self.check_consistency(&record)?;
            records.push(record);
        }

        debug!("Parsed {} rows", records.len());
        Ok(records)
    }

    fn check_consistency(&self, record: &FightRecord) -> Result<(), IngestError> {
        if record.is_consistent() {
            return Ok(());
        }

        match self.policy {
            ConsistencyPolicy::Tolerate => {
                debug!(
                    "Division '{}' counts {} of {} fights",
                    record.division,
                    record.counted(),
                    record.total_fights
                );
                Ok(())
            }
            ConsistencyPolicy::Warn => {
                warn!(
                    "Division '{}': outcome counts sum to {}, expected {}",
                    record.division,
                    record.counted(),
                    record.total_fights
                );
                Ok(())
            }
            ConsistencyPolicy::Strict => Err(IngestError::InconsistentCounts {
                division: record.division.clone(),
                counted: record.counted(),
                total: record.total_fights,
            }),
        }
    }
}
