use serde::{Deserialize, Serialize};

use crate::common::DateKey;

/// Frozen budget/spend snapshot for one calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailySummaryRecord {
    pub date: DateKey,
    pub budget: f64,
    pub spent: f64,
    pub saved: f64,
}

impl DailySummaryRecord {
    pub fn new(date: DateKey, budget: f64, spent: f64) -> Self {
        Self {
            date,
            budget,
            spent,
            saved: (budget - spent).max(0.0),
        }
    }

    pub fn overspent(&self) -> bool {
        self.spent > self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn saved_never_goes_negative() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(DailySummaryRecord::new(day, 5000.0, 3500.0).saved, 1500.0);
        let over = DailySummaryRecord::new(day, 1000.0, 1500.0);
        assert_eq!(over.saved, 0.0);
        assert!(over.overspent());
    }
}
