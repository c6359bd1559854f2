//! Runtime configuration
//!
//! Everything comes from the environment:
//! - `FITDIARY_DATABASE_PATH`: SQLite file (default `<project>/data/fitdiary.db`)
//! - `RUST_LOG`: tracing filter directives

use std::path::{Path, PathBuf};

pub const DATABASE_PATH_ENV: &str = "FITDIARY_DATABASE_PATH";

/// Default log directive when `RUST_LOG` does not mention the crate
pub const DEFAULT_LOG_DIRECTIVE: &str = "fitdiary=info";

/// Get the database path from environment or use default
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));
            default_database_path(&exe_dir)
        })
}

/// `<project>/data/fitdiary.db`, stepping out of `target/{debug,release}`
fn default_database_path(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(project) = path.parent().and_then(|target| target.parent()) {
            path = project.to_path_buf();
        }
    }

    path.push("data");
    path.push("fitdiary.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_leaves_target_dir() {
        let path = default_database_path(Path::new("/work/fitdiary/target/release"));
        assert_eq!(path, PathBuf::from("/work/fitdiary/data/fitdiary.db"));
    }

    #[test]
    fn test_default_path_next_to_installed_binary() {
        let path = default_database_path(Path::new("/opt/fitdiary/bin"));
        assert_eq!(path, PathBuf::from("/opt/fitdiary/bin/data/fitdiary.db"));
    }
}
