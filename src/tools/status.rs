//! FitDiary Status Tool
//!
//! Runtime status of the service plus the usage guide for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::metrics::MetricsSnapshot;

/// Diary usage guide for AI assistants
pub const DIARY_INSTRUCTIONS: &str = r#"
# FitDiary Instructions

## Profile and calorie norm

1. Call `get_profile`. If it is null or `calorie_norm` is null, ask the user for
   height (cm), weight (kg), age, sex and goal, then call `update_profile`.
   The first save also needs a `nickname`.
2. Sex and goal accept free text in English or Russian:
   - sex: "male" / "Мужчина" count as male, anything else as female
   - goal: text containing "lose" / "похуд" means lose weight,
     "gain" / "набрать" means gain weight, anything else means maintain
3. The norm is Mifflin-St Jeor BMR x 1.375, then -500 kcal (lose) or
   +500 kcal (gain). `calculate_calorie_norm` computes it without saving.

## Logging meals

- `add_meal` takes `dish_name`, `calories` (whole kcal, >= 0) and an optional
  `meal_date` (YYYY-MM-DD). Without a date the meal is logged for today.
- `list_meals_by_date` shows a day; `update_meal` / `delete_meal` fix mistakes.
- After logging, `get_daily_progress` reports eaten vs. norm. The progress
  fraction is capped at 1.0; `remaining` goes negative when over the norm.

## Streaks, recipes and ratings

- `get_streaks`: current and longest runs of consecutive days with meals.
  The current streak counts back from today (or yesterday if nothing is
  logged today yet); meals dated in the future do not break it.
- `list_recipes` pages through recipes (page starts at 1, default 10 per page).
  Keep paging while `can_load_more` is true.
- `rate_app` stores a 1-5 rating; offer it after a meal is logged.

## Notes

- Dates use ISO format: YYYY-MM-DD
- `get_metrics` shows request counts, error rate and session length
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct FitDiaryStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,

    pub metrics: MetricsSnapshot,
}

/// Collects process-level status information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self, metrics: MetricsSnapshot) -> FitDiaryStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FitDiaryStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            metrics,
        }
    }
}
