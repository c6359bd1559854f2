//! Diary MCP Tools
//!
//! Meal logging, per-day listing, progress against the norm and streaks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::Database;
use crate::models::{compute_streaks, Meal, MealCreate, MealUpdate, Streaks, UserProfile};
use crate::nutrition::{aggregate_daily_progress, daily_calorie_target, DailyLog};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Response for list_meals_by_date
#[derive(Debug, Serialize)]
pub struct ListMealsResponse {
    pub date: String,
    pub meals: Vec<Meal>,
    pub total_calories: i64,
}

/// Response for delete_meal
#[derive(Debug, Serialize)]
pub struct DeleteMealResponse {
    pub id: i64,
    pub deleted: bool,
}

/// Response for get_daily_progress
#[derive(Debug, Serialize)]
pub struct DailyProgressResponse {
    pub date: String,
    pub meal_count: usize,
    pub eaten: i64,
    /// Null when the profile is missing or incomplete
    pub calorie_norm: Option<i64>,
    pub progress_fraction: Option<f64>,
    pub remaining: Option<i64>,
}

/// Response for get_streaks
#[derive(Debug, Serialize)]
pub struct StreaksResponse {
    pub as_of: String,
    #[serde(flatten)]
    pub streaks: Streaks,
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", date))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn validate_dish_name(dish_name: &str) -> Result<String, String> {
    let trimmed = dish_name.trim();
    if trimmed.is_empty() {
        return Err("dish_name cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// Meal Tools
// ============================================================================

/// Log a meal. Without a date the meal goes to `today`.
pub fn add_meal(
    db: &Database,
    dish_name: &str,
    calories: u32,
    meal_date: Option<&str>,
    today: NaiveDate,
) -> Result<Meal, String> {
    let dish_name = validate_dish_name(dish_name)?;
    let date = match meal_date {
        Some(d) => parse_date(d)?,
        None => today,
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let data = MealCreate {
        dish_name,
        calories,
        meal_date: format_date(date),
    };

    Meal::create(&conn, &data).map_err(|e| format!("Failed to add meal: {}", e))
}

/// Get a meal by ID
pub fn get_meal(db: &Database, id: i64) -> Result<Option<Meal>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Meal::get_by_id(&conn, id).map_err(|e| format!("Failed to get meal: {}", e))
}

/// List meals logged on a date
pub fn list_meals_by_date(db: &Database, date: &str) -> Result<ListMealsResponse, String> {
    let date = format_date(parse_date(date)?);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let meals = Meal::list_by_date(&conn, &date)
        .map_err(|e| format!("Failed to list meals: {}", e))?;

    let total_calories = meals.iter().map(|m| i64::from(m.calories)).sum();

    Ok(ListMealsResponse {
        date,
        meals,
        total_calories,
    })
}

/// Edit a meal. Only the given fields change.
pub fn update_meal(
    db: &Database,
    id: i64,
    dish_name: Option<&str>,
    calories: Option<u32>,
    meal_date: Option<&str>,
) -> Result<Option<Meal>, String> {
    let data = MealUpdate {
        dish_name: dish_name.map(validate_dish_name).transpose()?,
        calories,
        meal_date: meal_date.map(parse_date).transpose()?.map(format_date),
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Meal::update(&conn, id, &data).map_err(|e| format!("Failed to update meal: {}", e))
}

/// Delete a meal
pub fn delete_meal(db: &Database, id: i64) -> Result<DeleteMealResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Meal::delete(&conn, id)
        .map_err(|e| format!("Failed to delete meal: {}", e))?;

    Ok(DeleteMealResponse { id, deleted })
}

// ============================================================================
// Progress Tools
// ============================================================================

/// Calories eaten on a date against the stored profile's norm
pub fn get_daily_progress(db: &Database, date: &str) -> Result<DailyProgressResponse, String> {
    let date = parse_date(date)?;
    let date_str = format_date(date);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let meals = Meal::list_by_date(&conn, &date_str)
        .map_err(|e| format!("Failed to list meals: {}", e))?;

    let calorie_norm = UserProfile::get(&conn)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .and_then(|p| p.biometrics())
        .map(|b| daily_calorie_target(&b));

    let log = DailyLog::new(date, meals.iter().map(Meal::to_entry).collect());
    let progress = aggregate_daily_progress(&log, calorie_norm);

    Ok(DailyProgressResponse {
        date: date_str,
        meal_count: log.entries.len(),
        eaten: progress.eaten,
        calorie_norm: progress.target,
        progress_fraction: progress.progress_fraction,
        remaining: progress.remaining(),
    })
}

/// Current and longest logging streaks as of `today`
pub fn get_streaks(db: &Database, today: NaiveDate) -> Result<StreaksResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let stored = Meal::logged_dates(&conn)
        .map_err(|e| format!("Failed to list logged dates: {}", e))?;

    let mut dates = Vec::with_capacity(stored.len());
    for date in &stored {
        match parse_date(date) {
            Ok(d) => dates.push(d),
            Err(e) => tracing::warn!("Skipping meal date in streaks: {}", e),
        }
    }

    Ok(StreaksResponse {
        as_of: format_date(today),
        streaks: compute_streaks(&dates, today),
    })
}
