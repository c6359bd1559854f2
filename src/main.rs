//! FitDiary
//!
//! An MCP server for food diary tracking.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use fitdiary::metrics::MetricsTracker;
use fitdiary::mcp::FitDiaryService;
use fitdiary::{build_info, config, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(MetricsTracker::new());
    metrics.mark_process_start();

    // Logs go to stderr so they do not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config::DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let db_path = config::database_path();
    tracing::info!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        tracing::info!("Database schema version: {}", version);
        Ok(())
    })?;

    let service = FitDiaryService::new(db_path, database, metrics.clone());
    metrics.mark_app_start();

    tracing::info!("Starting MCP server on stdio...");
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    metrics.on_session_start();

    let outcome = server.waiting().await;
    metrics.on_session_stop();

    let snapshot = metrics.snapshot();
    tracing::info!(
        startup_seconds = snapshot.start_time,
        session_seconds = snapshot.session_length,
        total_requests = snapshot.total_requests,
        error_rate = snapshot.error_rate,
        "MCP session ended"
    );

    outcome?;
    Ok(())
}
