//! App rating model

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A 1-5 star rating left after logging a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub rating: u8,
    pub created_at: String,
}

/// Aggregate over all ratings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSummary {
    pub count: i64,
    pub average: Option<f64>,
}

impl Rating {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            rating: row.get("rating")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, rating: u8) -> DbResult<Self> {
        conn.execute("INSERT INTO ratings (rating) VALUES (?1)", [rating])?;

        let id = conn.last_insert_rowid();
        let rating = conn.query_row("SELECT * FROM ratings WHERE id = ?1", [id], Self::from_row)?;
        Ok(rating)
    }

    pub fn summary(conn: &Connection) -> DbResult<RatingSummary> {
        let summary = conn.query_row("SELECT COUNT(*), AVG(rating) FROM ratings", [], |row| {
            Ok(RatingSummary {
                count: row.get(0)?,
                average: row.get(1)?,
            })
        })?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_create_and_summarize() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let empty = Rating::summary(&conn).unwrap();
        assert_eq!(empty.count, 0);
        assert_eq!(empty.average, None);

        Rating::create(&conn, 5).unwrap();
        let saved = Rating::create(&conn, 4).unwrap();
        assert_eq!(saved.rating, 4);

        let summary = Rating::summary(&conn).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, Some(4.5));
    }

    #[test]
    fn test_out_of_range_rating_rejected_by_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert!(Rating::create(&conn, 6).is_err());
    }
}
