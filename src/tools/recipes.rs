//! Recipe and Rating MCP Tools

use serde::Serialize;

use crate::db::Database;
use crate::models::{Rating, RatingSummary, Recipe, RecipeCreate};

/// Default recipes per page
pub const PAGE_SIZE: i64 = 10;

const MAX_PAGE_SIZE: i64 = 100;

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<Recipe>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    /// A full page came back, so the next one may have more
    pub can_load_more: bool,
}

/// Response for rate_app
#[derive(Debug, Serialize)]
pub struct RateAppResponse {
    pub rating: Rating,
    pub summary: RatingSummary,
}

/// Add a recipe to the catalogue
pub fn add_recipe(
    db: &Database,
    name: &str,
    meal_type: Option<&str>,
    calories: u32,
    recipe_text: &str,
    image_url: Option<String>,
) -> Result<Recipe, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Recipe name cannot be empty".to_string());
    }

    let meal_type = meal_type
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "any".to_string());

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let data = RecipeCreate {
        name: name.to_string(),
        meal_type,
        calories,
        recipe_text: recipe_text.to_string(),
        image_url: image_url.filter(|u| !u.trim().is_empty()),
    };

    Recipe::create(&conn, &data).map_err(|e| format!("Failed to add recipe: {}", e))
}

/// Get a recipe by ID
pub fn get_recipe(db: &Database, id: i64) -> Result<Option<Recipe>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Recipe::get_by_id(&conn, id).map_err(|e| format!("Failed to get recipe: {}", e))
}

/// List one page of recipes
pub fn list_recipes(
    db: &Database,
    meal_type: Option<&str>,
    page: i64,
    limit: i64,
) -> Result<ListRecipesResponse, String> {
    let page = page.max(1);
    let limit = limit.clamp(1, MAX_PAGE_SIZE);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipes = Recipe::list_page(&conn, meal_type, page, limit)
        .map_err(|e| format!("Failed to list recipes: {}", e))?;

    let total = Recipe::count(&conn, meal_type)
        .map_err(|e| format!("Failed to count recipes: {}", e))?;

    let can_load_more = recipes.len() as i64 == limit;

    Ok(ListRecipesResponse {
        recipes,
        page,
        limit,
        total,
        can_load_more,
    })
}

/// Store a 1-5 app rating
pub fn rate_app(db: &Database, rating: u8) -> Result<RateAppResponse, String> {
    if !(1..=5).contains(&rating) {
        return Err("rating must be between 1 and 5".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let rating = Rating::create(&conn, rating)
        .map_err(|e| format!("Failed to save rating: {}", e))?;

    let summary = Rating::summary(&conn)
        .map_err(|e| format!("Failed to summarize ratings: {}", e))?;

    Ok(RateAppResponse { rating, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        db
    }

    #[test]
    fn test_pagination_can_load_more() {
        let db = db();
        for i in 0..PAGE_SIZE + 3 {
            add_recipe(&db, &format!("Dish {}", i), Some("Lunch"), 300, "Cook it.", None).unwrap();
        }

        let first = list_recipes(&db, None, 1, PAGE_SIZE).unwrap();
        assert_eq!(first.recipes.len(), 10);
        assert!(first.can_load_more);
        assert_eq!(first.total, 13);

        let second = list_recipes(&db, None, 2, PAGE_SIZE).unwrap();
        assert_eq!(second.recipes.len(), 3);
        assert!(!second.can_load_more);
    }

    #[test]
    fn test_filtered_total_counts_only_that_meal_type() {
        let db = db();
        add_recipe(&db, "Soup", Some("lunch"), 320, "Simmer.", None).unwrap();
        add_recipe(&db, "Porridge", Some("breakfast"), 280, "Boil.", None).unwrap();
        add_recipe(&db, "Pancakes", Some("breakfast"), 400, "Fry.", None).unwrap();

        let lunch = list_recipes(&db, Some("lunch"), 1, PAGE_SIZE).unwrap();
        assert_eq!(lunch.recipes.len(), 1);
        assert_eq!(lunch.total, 1);

        let all = list_recipes(&db, None, 1, PAGE_SIZE).unwrap();
        assert_eq!(all.total, 3);
    }

    #[test]
    fn test_huge_page_returns_empty_page() {
        let db = db();
        add_recipe(&db, "Omelette", None, 250, "Whisk and fry.", None).unwrap();

        let listed = list_recipes(&db, None, i64::MAX, 10).unwrap();
        assert!(listed.recipes.is_empty());
        assert!(!listed.can_load_more);
        assert_eq!(listed.page, i64::MAX);
        assert_eq!(listed.total, 1);
    }

    #[test]
    fn test_page_and_limit_are_clamped() {
        let db = db();
        add_recipe(&db, "Omelette", None, 250, "Whisk and fry.", None).unwrap();
        let listed = list_recipes(&db, None, 0, 0).unwrap();
        assert_eq!(listed.page, 1);
        assert_eq!(listed.limit, 1);
        assert_eq!(listed.recipes[0].meal_type, "any");
    }

    #[test]
    fn test_add_recipe_requires_name() {
        assert!(add_recipe(&db(), " ", None, 100, "", None).is_err());
    }

    #[test]
    fn test_rate_app() {
        let db = db();
        assert!(rate_app(&db, 0).is_err());
        assert!(rate_app(&db, 6).is_err());

        rate_app(&db, 3).unwrap();
        let resp = rate_app(&db, 5).unwrap();
        assert_eq!(resp.rating.rating, 5);
        assert_eq!(resp.summary.count, 2);
        assert_eq!(resp.summary.average, Some(4.0));
    }
}
