//! Nutrition calculation module
//!
//! Calorie norm from biometrics and daily intake aggregation. Everything here
//! is pure: no storage, no clocks, no shared state.

pub mod calorie_norm;
pub mod profile;
pub mod progress;

pub use calorie_norm::{
    basal_metabolic_rate, calorie_breakdown, daily_calorie_target, total_daily_energy_expenditure,
    CalorieBreakdown, ACTIVITY_MULTIPLIER, GOAL_OFFSET_KCAL,
};
pub use profile::{BiometricProfile, Goal, ProfileError, Sex};
pub use progress::{aggregate_daily_progress, DailyLog, DailyProgress, MealEntry};
