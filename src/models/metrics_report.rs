//! Metrics report model
//!
//! Persisted snapshots of the in-process metrics tracker.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::metrics::MetricsSnapshot;

/// A saved metrics snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub id: i64,
    #[serde(flatten)]
    pub snapshot: MetricsSnapshot,
    pub created_at: String,
}

impl MetricsReport {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let total_requests: i64 = row.get("total_requests")?;
        let error_requests: i64 = row.get("error_requests")?;
        Ok(Self {
            id: row.get("id")?,
            snapshot: MetricsSnapshot {
                crash_rate: row.get("crash_rate")?,
                start_time: row.get("start_time")?,
                retention: row.get("retention")?,
                session_length: row.get("session_length")?,
                error_rate: row.get("error_rate")?,
                total_requests: total_requests.max(0) as u64,
                error_requests: error_requests.max(0) as u64,
            },
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, snapshot: &MetricsSnapshot) -> DbResult<Self> {
        // SQLite integers are signed; request counters never get near i64::MAX.
        let total = i64::try_from(snapshot.total_requests).unwrap_or(i64::MAX);
        let errors = i64::try_from(snapshot.error_requests).unwrap_or(i64::MAX);

        conn.execute(
            r#"
            INSERT INTO metrics_reports (
                crash_rate, start_time, retention, session_length,
                error_rate, total_requests, error_requests
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                snapshot.crash_rate,
                snapshot.start_time,
                snapshot.retention,
                snapshot.session_length,
                snapshot.error_rate,
                total,
                errors,
            ],
        )?;

        let id = conn.last_insert_rowid();
        let report = conn.query_row(
            "SELECT * FROM metrics_reports WHERE id = ?1",
            [id],
            Self::from_row,
        )?;
        Ok(report)
    }

    /// Most recently saved report
    pub fn latest(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM metrics_reports ORDER BY id DESC LIMIT 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(report) => Ok(Some(report)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_latest_report() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert!(MetricsReport::latest(&conn).unwrap().is_none());

        let mut snapshot = MetricsSnapshot {
            crash_rate: 0.0,
            start_time: 0.4,
            retention: 0.0,
            session_length: 12.5,
            error_rate: 0.25,
            total_requests: 4,
            error_requests: 1,
        };
        MetricsReport::create(&conn, &snapshot).unwrap();
        snapshot.total_requests = 8;
        MetricsReport::create(&conn, &snapshot).unwrap();

        let latest = MetricsReport::latest(&conn).unwrap().unwrap();
        assert_eq!(latest.snapshot.total_requests, 8);
        assert_eq!(latest.snapshot.session_length, 12.5);
    }
}
