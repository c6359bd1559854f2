//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Bring the database up to [`SCHEMA_VERSION`]
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Highest applied migration, 0 for a fresh database
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PROFILE
        -- Single row (id = 1); every biometric is optional
        -- until the user fills it in
        -- ============================================
        CREATE TABLE profile (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            nickname TEXT NOT NULL,
            height_cm INTEGER CHECK (height_cm IS NULL OR height_cm > 0),
            weight_kg REAL CHECK (weight_kg IS NULL OR weight_kg > 0),
            age INTEGER CHECK (age IS NULL OR age > 0),
            sex TEXT,
            goal TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- MEALS
        -- One row per logged dish
        -- ============================================
        CREATE TABLE meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            dish_name TEXT NOT NULL,
            calories INTEGER NOT NULL CHECK (calories >= 0),
            meal_date TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meals_date ON meals(meal_date);

        -- ============================================
        -- RECIPES
        -- ============================================
        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            meal_type TEXT NOT NULL DEFAULT 'any',
            calories INTEGER NOT NULL CHECK (calories >= 0),
            recipe_text TEXT NOT NULL,
            image_url TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_recipes_name ON recipes(name);

        -- ============================================
        -- RATINGS
        -- ============================================
        CREATE TABLE ratings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- METRICS REPORTS
        -- Saved snapshots of the in-process tracker
        -- ============================================
        CREATE TABLE metrics_reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            crash_rate REAL NOT NULL,
            start_time REAL NOT NULL,
            retention REAL NOT NULL,
            session_length REAL NOT NULL,
            error_rate REAL NOT NULL,
            total_requests INTEGER NOT NULL,
            error_requests INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}
