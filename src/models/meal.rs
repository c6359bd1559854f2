//! Meal model
//!
//! A dish eaten on a given date, plus logging streaks over those dates.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::nutrition::MealEntry;

/// A logged meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub dish_name: String,
    pub calories: u32,
    pub meal_date: String, // ISO date: "2026-03-14"
    pub created_at: String,
    pub updated_at: String,
}

/// Data for logging a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCreate {
    pub dish_name: String,
    pub calories: u32,
    pub meal_date: String,
}

/// Data for editing a meal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealUpdate {
    pub dish_name: Option<String>,
    pub calories: Option<u32>,
    pub meal_date: Option<String>,
}

/// Consecutive-day logging streaks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub current_streak: u32,
    pub max_streak: u32,
}

impl Meal {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            dish_name: row.get("dish_name")?,
            calories: row.get("calories")?,
            meal_date: row.get("meal_date")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Diary entry view used by the progress calculation
    pub fn to_entry(&self) -> MealEntry {
        MealEntry::new(self.dish_name.clone(), self.calories)
    }

    /// Log a new meal
    pub fn create(conn: &Connection, data: &MealCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO meals (dish_name, calories, meal_date)
            VALUES (?1, ?2, ?3)
            "#,
            params![data.dish_name, data.calories, data.meal_date],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a meal by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(meal) => Ok(Some(meal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Meals for one date, in logging order
    pub fn list_by_date(conn: &Connection, date: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals WHERE meal_date = ?1 ORDER BY id")?;
        let meals = stmt
            .query_map([date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(meals)
    }

    /// Every distinct date with at least one meal, ascending
    pub fn logged_dates(conn: &Connection) -> DbResult<Vec<String>> {
        let mut stmt = conn.prepare("SELECT DISTINCT meal_date FROM meals ORDER BY meal_date")?;
        let dates = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(dates)
    }

    /// Update a meal. Returns `None` if it does not exist.
    pub fn update(conn: &Connection, id: i64, data: &MealUpdate) -> DbResult<Option<Self>> {
        let mut updates = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref dish_name) = data.dish_name {
            updates.push(format!("dish_name = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(dish_name.clone()));
        }
        if let Some(calories) = data.calories {
            updates.push(format!("calories = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(calories));
        }
        if let Some(ref meal_date) = data.meal_date {
            updates.push(format!("meal_date = ?{}", params_vec.len() + 1));
            params_vec.push(Box::new(meal_date.clone()));
        }

        if updates.is_empty() {
            return Self::get_by_id(conn, id);
        }

        updates.push("updated_at = datetime('now')".to_string());

        let sql = format!(
            "UPDATE meals SET {} WHERE id = ?{}",
            updates.join(", "),
            params_vec.len() + 1
        );
        params_vec.push(Box::new(id));

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        conn.execute(&sql, params_refs.as_slice())?;

        Self::get_by_id(conn, id)
    }

    /// Delete a meal. Returns false when nothing was deleted.
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meals WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

/// Streaks over logged dates.
///
/// The current streak is the run ending at `today`, or at the day before
/// when nothing is logged yet today. Dates after `today` never break it.
/// Dates may be unsorted and repeated.
pub fn compute_streaks(dates: &[NaiveDate], today: NaiveDate) -> Streaks {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.is_empty() {
        return Streaks::default();
    }

    let mut max_streak: u32 = 0;
    let mut run: u32 = 0;
    let mut prev: Option<NaiveDate> = None;
    for &date in &sorted {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        max_streak = max_streak.max(run);
        prev = Some(date);
    }

    let logged = |day: &NaiveDate| sorted.binary_search(day).is_ok();
    let mut cursor = if logged(&today) { Some(today) } else { today.pred_opt() };
    let mut current_streak: u32 = 0;
    while let Some(day) = cursor.filter(|d| logged(d)) {
        current_streak += 1;
        cursor = day.pred_opt();
    }

    Streaks {
        current_streak,
        max_streak,
    }
}
