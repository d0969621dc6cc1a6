//! Per-division fight outcome counts.

use serde::{Deserialize, Serialize};

/// Raw outcome counts for one weight division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightRecord {
    /// Weight division name, unique within a dataset
    pub division: String,

    /// Number of recorded fights
    pub total_fights: u32,

    /// Knockouts and technical knockouts
    pub ko_count: u32,

    /// Submission finishes
    pub submission_count: u32,

    /// Fights that went to the judges
    pub decision_count: u32,

    /// Overturned or no-contest results
    pub no_contest_count: u32,

    /// Disqualifications
    pub dq_count: u32,
}

impl FightRecord {
    /// Create a record with every outcome count set to zero.
    pub fn new(division: impl Into<String>, total_fights: u32) -> Self {
        Self {
            division: division.into(),
            total_fights,
            ko_count: 0,
            submission_count: 0,
            decision_count: 0,
            no_contest_count: 0,
            dq_count: 0,
        }
    }

    /// Builder method to set the finish counts.
    pub fn with_finishes(mut self, ko: u32, submission: u32, decision: u32) -> Self {
        self.ko_count = ko;
        self.submission_count = submission;
        self.decision_count = decision;
        self
    }

    /// Builder method to set the no-contest and disqualification counts.
    pub fn with_other(mut self, no_contest: u32, dq: u32) -> Self {
        self.no_contest_count = no_contest;
        self.dq_count = dq;
        self
    }

    /// No contests plus disqualifications.
    pub fn other_count(&self) -> u64 {
        u64::from(self.no_contest_count) + u64::from(self.dq_count)
    }

    /// Sum of all five outcome counts.
    pub fn counted(&self) -> u64 {
        u64::from(self.ko_count)
            + u64::from(self.submission_count)
            + u64::from(self.decision_count)
            + self.other_count()
    }

    /// True when the outcome counts add up to the total fight count.
    pub fn is_consistent(&self) -> bool {
        self.counted() == u64::from(self.total_fights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heavyweight() -> FightRecord {
        FightRecord::new("Heavyweight", 100)
            .with_finishes(60, 20, 18)
            .with_other(1, 1)
    }

    #[test]
    fn test_record_builder() {
        let r = heavyweight();
        assert_eq!(r.division, "Heavyweight");
        assert_eq!(r.total_fights, 100);
        assert_eq!(r.ko_count, 60);
        assert_eq!(r.dq_count, 1);
    }

    #[test]
    fn test_other_count() {
        let r = FightRecord::new("Flyweight", 10).with_other(2, 3);
        assert_eq!(r.other_count(), 5);
    }

    #[test]
    fn test_counted_and_consistency() {
        let r = heavyweight();
        assert_eq!(r.counted(), 100);
        assert!(r.is_consistent());

        let short = FightRecord::new("Bantamweight", 50).with_finishes(10, 10, 10);
        assert_eq!(short.counted(), 30);
        assert!(!short.is_consistent());
    }

    #[test]
    fn test_counted_does_not_overflow() {
        let r = FightRecord::new("Openweight", u32::MAX)
            .with_finishes(u32::MAX, u32::MAX, u32::MAX)
            .with_other(u32::MAX, u32::MAX);
        assert_eq!(r.counted(), 5 * u64::from(u32::MAX));
    }

    #[test]
    fn test_record_json_field_names() {
        let json = serde_json::to_value(heavyweight()).unwrap();
        assert_eq!(json["division"], "Heavyweight");
        assert_eq!(json["total_fights"], 100);
        assert_eq!(json["no_contest_count"], 1);
    }
}
