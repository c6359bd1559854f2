//! Metrics MCP Tools

use crate::db::Database;
use crate::metrics::{Clock, MetricsSnapshot, MetricsTracker};
use crate::models::MetricsReport;

/// Live snapshot of the tracker
pub fn get_metrics<C: Clock>(tracker: &MetricsTracker<C>) -> MetricsSnapshot {
    tracker.snapshot()
}

/// Persist the current snapshot
pub fn save_metrics_report<C: Clock>(
    db: &Database,
    tracker: &MetricsTracker<C>,
) -> Result<MetricsReport, String> {
    let snapshot = tracker.snapshot();

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let report = MetricsReport::create(&conn, &snapshot)
        .map_err(|e| format!("Failed to save metrics report: {}", e))?;

    tracing::info!(
        total_requests = snapshot.total_requests,
        error_rate = snapshot.error_rate,
        "Saved metrics report {}",
        report.id
    );

    Ok(report)
}

/// Most recently saved report
pub fn get_latest_metrics_report(db: &Database) -> Result<Option<MetricsReport>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    MetricsReport::latest(&conn).map_err(|e| format!("Failed to get metrics report: {}", e))
}
