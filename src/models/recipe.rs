//! Recipe model
//!
//! Catalogue of dishes with their calorie content and cooking text.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A catalogue recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub meal_type: String,
    pub calories: u32,
    pub recipe_text: String,
    pub image_url: Option<String>,
    pub created_at: String,
}

/// Data for adding a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    pub meal_type: String,
    pub calories: u32,
    pub recipe_text: String,
    pub image_url: Option<String>,
}

impl Recipe {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            meal_type: row.get("meal_type")?,
            calories: row.get("calories")?,
            recipe_text: row.get("recipe_text")?,
            image_url: row.get("image_url")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, data: &RecipeCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO recipes (name, meal_type, calories, recipe_text, image_url)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                data.name,
                data.meal_type,
                data.calories,
                data.recipe_text,
                data.image_url,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM recipes WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(recipe) => Ok(Some(recipe)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// One page of recipes, oldest first. Pages start at 1.
    pub fn list_page(
        conn: &Connection,
        meal_type: Option<&str>,
        page: i64,
        limit: i64,
    ) -> DbResult<Vec<Self>> {
        // Past-the-end pages saturate to an empty result
        let offset = page.saturating_sub(1).max(0).saturating_mul(limit.max(0));

        let recipes = match meal_type {
            Some(meal_type) => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM recipes WHERE LOWER(meal_type) = LOWER(?1)
                     ORDER BY id LIMIT ?2 OFFSET ?3",
                )?;
                let rows = stmt.query_map(params![meal_type, limit, offset], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare("SELECT * FROM recipes ORDER BY id LIMIT ?1 OFFSET ?2")?;
                let rows = stmt.query_map(params![limit, offset], Self::from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(recipes)
    }

    /// Number of recipes, with the same meal type filter as `list_page`
    pub fn count(conn: &Connection, meal_type: Option<&str>) -> DbResult<i64> {
        let count = match meal_type {
            Some(meal_type) => conn.query_row(
                "SELECT COUNT(*) FROM recipes WHERE LOWER(meal_type) = LOWER(?1)",
                [meal_type],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?,
        };
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn_with_recipes(n: u32) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        for i in 0..n {
            Recipe::create(
                &conn,
                &RecipeCreate {
                    name: format!("Recipe {}", i + 1),
                    meal_type: if i % 2 == 0 { "breakfast" } else { "dinner" }.to_string(),
                    calories: 200 + i * 10,
                    recipe_text: "Mix and cook.".to_string(),
                    image_url: None,
                },
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_list_pages() {
        let conn = conn_with_recipes(12);
        let first = Recipe::list_page(&conn, None, 1, 10).unwrap();
        let second = Recipe::list_page(&conn, None, 2, 10).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 2);
        assert_eq!(first[0].name, "Recipe 1");
        assert_eq!(second[0].name, "Recipe 11");
        assert_eq!(Recipe::count(&conn, None).unwrap(), 12);
    }

    #[test]
    fn test_list_filtered_by_meal_type() {
        let conn = conn_with_recipes(5);
        let breakfasts = Recipe::list_page(&conn, Some("Breakfast"), 1, 10).unwrap();
        assert_eq!(breakfasts.len(), 3);
        assert!(breakfasts.iter().all(|r| r.meal_type == "breakfast"));
        assert_eq!(Recipe::count(&conn, Some("Breakfast")).unwrap(), 3);
        assert_eq!(Recipe::count(&conn, Some("dinner")).unwrap(), 2);
        assert_eq!(Recipe::count(&conn, Some("lunch")).unwrap(), 0);
    }

    #[test]
    fn test_list_page_far_past_the_end_is_empty() {
        let conn = conn_with_recipes(3);
        assert!(Recipe::list_page(&conn, None, i64::MAX, 100).unwrap().is_empty());
        assert!(Recipe::list_page(&conn, Some("dinner"), i64::MAX, 10).unwrap().is_empty());
    }
}
