//! In-memory dataset of division records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{DatasetId, FightRecord};

/// Errors raised while assembling a dataset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Dataset contains no rows")]
    Empty,

    #[error("Duplicate division '{0}'")]
    DuplicateDivision(String),
}

/// An uploaded table of division records, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: DatasetId,

    /// File name or label supplied with the upload
    pub source_name: Option<String>,

    pub loaded_at: DateTime<Utc>,

    records: Vec<FightRecord>,

    index: HashMap<String, usize>,
}

impl Dataset {
    /// Build a dataset, rejecting empty tables and repeated divisions.
    pub fn new(id: DatasetId, records: Vec<FightRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.division.clone(), i).is_some() {
                return Err(DatasetError::DuplicateDivision(record.division.clone()));
            }
        }

        Ok(Self {
            id,
            source_name: None,
            loaded_at: Utc::now(),
            records,
            index,
        })
    }

    /// Builder method to set the source name.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn records(&self) -> &[FightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a division in file order.
    pub fn position(&self, division: &str) -> Option<usize> {
        self.index.get(division).copied()
    }

    /// Exact-match lookup by division name.
    pub fn get(&self, division: &str) -> Option<&FightRecord> {
        self.position(division).map(|i| &self.records[i])
    }

    /// Division names in file order.
    pub fn divisions(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.division.as_str())
    }

    /// Sum of total fights across all divisions.
    pub fn total_fights(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.total_fights)).sum()
    }

    /// Divisions whose outcome counts do not add up to their total.
    pub fn inconsistent_divisions(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| !r.is_consistent())
            .map(|r| r.division.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<FightRecord> {
        vec![
            FightRecord::new("Flyweight", 40)
                .with_finishes(10, 10, 20),
            FightRecord::new("Heavyweight", 100)
                .with_finishes(60, 20, 18)
                .with_other(1, 1),
            FightRecord::new("Bantamweight", 50).with_finishes(10, 10, 10),
        ]
    }

    #[test]
    fn test_dataset_preserves_order() {
        let ds = Dataset::new(DatasetId::from("x"), records()).unwrap();
        let names: Vec<&str> = ds.divisions().collect();
        assert_eq!(names, vec!["Flyweight", "Heavyweight", "Bantamweight"]);
        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());
    }

    #[test]
    fn test_dataset_lookup() {
        let ds = Dataset::new(DatasetId::from("x"), records()).unwrap();
        assert_eq!(ds.get("Heavyweight").unwrap().ko_count, 60);
        assert_eq!(ds.position("Bantamweight"), Some(2));
        assert!(ds.get("heavyweight").is_none());
        assert!(ds.get("Strawweight").is_none());
    }

    #[test]
    fn test_dataset_rejects_empty() {
        let err = Dataset::new(DatasetId::from("x"), Vec::new()).unwrap_err();
        assert_eq!(err, DatasetError::Empty);
    }

    #[test]
    fn test_dataset_rejects_duplicates() {
        let mut rs = records();
        rs.push(FightRecord::new("Flyweight", 1));
        let err = Dataset::new(DatasetId::from("x"), rs).unwrap_err();
        assert_eq!(err, DatasetError::DuplicateDivision("Flyweight".to_string()));
    }

    #[test]
    fn test_dataset_totals() {
        let ds = Dataset::new(DatasetId::from("x"), records()).unwrap();
        assert_eq!(ds.total_fights(), 190);
        assert_eq!(ds.inconsistent_divisions(), vec!["Bantamweight"]);
    }

    #[test]
    fn test_dataset_source_name() {
        let ds = Dataset::new(DatasetId::from("x"), records())
            .unwrap()
            .with_source_name("ufc.csv");
        assert_eq!(ds.source_name.as_deref(), Some("ufc.csv"));
    }
}
