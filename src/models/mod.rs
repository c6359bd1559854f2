//! Data models
//!
//! Rust structs representing database entities.

mod meal;
mod metrics_report;
mod profile;
mod rating;
mod recipe;

pub use meal::{compute_streaks, Meal, MealCreate, MealUpdate, Streaks};
pub use metrics_report::MetricsReport;
pub use profile::{ProfileSet, UserProfile};
pub use rating::{Rating, RatingSummary};
pub use recipe::{Recipe, RecipeCreate};
