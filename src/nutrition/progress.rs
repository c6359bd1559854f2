//! Daily intake aggregation against the calorie norm

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single logged dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub dish_name: String,
    pub calories: u32,
}

impl MealEntry {
    pub fn new(dish_name: impl Into<String>, calories: u32) -> Self {
        Self {
            dish_name: dish_name.into(),
            calories,
        }
    }
}

/// Meals eaten on one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub entries: Vec<MealEntry>,
}

impl DailyLog {
    pub fn new(date: NaiveDate, entries: Vec<MealEntry>) -> Self {
        Self { date, entries }
    }

    /// Total calories over all entries
    pub fn total_calories(&self) -> i64 {
        self.entries.iter().map(|e| i64::from(e.calories)).sum()
    }
}

/// Intake for a day compared to the norm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub eaten: i64,
    pub target: Option<i64>,
    /// eaten / target clamped to [0, 1]; absent without a positive target
    pub progress_fraction: Option<f64>,
}

impl DailyProgress {
    /// Calories left before reaching the target (negative when over)
    pub fn remaining(&self) -> Option<i64> {
        self.target.filter(|t| *t > 0).map(|t| t - self.eaten)
    }
}

/// Sum a day's intake and compare it to an optional target
pub fn aggregate_daily_progress(log: &DailyLog, target: Option<i64>) -> DailyProgress {
    let eaten = log.total_calories();

    let progress_fraction = match target {
        Some(t) if t > 0 => Some((eaten as f64 / t as f64).clamp(0.0, 1.0)),
        _ => None,
    };

    DailyProgress {
        eaten,
        target,
        progress_fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn entries() -> Vec<MealEntry> {
        vec![
            MealEntry::new("Oatmeal", 320),
            MealEntry::new("Chicken soup", 410),
            MealEntry::new("Apple", 95),
            MealEntry::new("Water", 0),
            MealEntry::new("Pasta carbonara", 780),
        ]
    }

    #[test]
    fn test_empty_log_with_target() {
        let progress = aggregate_daily_progress(&DailyLog::new(day(), Vec::new()), Some(2000));
        assert_eq!(progress.eaten, 0);
        assert_eq!(progress.target, Some(2000));
        assert_eq!(progress.progress_fraction, Some(0.0));
        assert_eq!(progress.remaining(), Some(2000));
    }

    #[test]
    fn test_partial_progress() {
        let log = DailyLog::new(day(), vec![MealEntry::new("Lunch", 500)]);
        let progress = aggregate_daily_progress(&log, Some(2000));
        assert_eq!(progress.eaten, 500);
        assert_eq!(progress.progress_fraction, Some(0.25));
    }

    #[test]
    fn test_over_target_is_clamped() {
        let log = DailyLog::new(day(), entries());
        let progress = aggregate_daily_progress(&log, Some(1000));
        assert_eq!(progress.eaten, 1605);
        assert_eq!(progress.progress_fraction, Some(1.0));
        assert_eq!(progress.remaining(), Some(-605));
    }

    #[test]
    fn test_missing_or_non_positive_target_has_no_fraction() {
        let log = DailyLog::new(day(), entries());
        for target in [None, Some(0), Some(-1500)] {
            let progress = aggregate_daily_progress(&log, target);
            assert_eq!(progress.eaten, 1605);
            assert_eq!(progress.target, target);
            assert_eq!(progress.progress_fraction, None);
            assert_eq!(progress.remaining(), None);
        }
    }

    #[test]
    fn test_entry_order_does_not_change_total() {
        let base = entries();
        let expected = aggregate_daily_progress(&DailyLog::new(day(), base.clone()), Some(2448));

        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            let progress = aggregate_daily_progress(&DailyLog::new(day(), rotated.clone()), Some(2448));
            assert_eq!(progress, expected);

            rotated.reverse();
            let progress = aggregate_daily_progress(&DailyLog::new(day(), rotated), Some(2448));
            assert_eq!(progress, expected);
        }
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let log = DailyLog::new(day(), entries());
        assert_eq!(
            aggregate_daily_progress(&log, Some(1800)),
            aggregate_daily_progress(&log, Some(1800))
        );
    }

    #[test]
    fn test_large_totals_do_not_overflow() {
        let log = DailyLog::new(day(), vec![MealEntry::new("Feast", u32::MAX); 4]);
        let progress = aggregate_daily_progress(&log, Some(2000));
        assert_eq!(progress.eaten, 4 * i64::from(u32::MAX));
        assert_eq!(progress.progress_fraction, Some(1.0));
    }
}
