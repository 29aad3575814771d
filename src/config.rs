//! Runtime configuration
//!
//! Read from environment variables, with defaults relative to the project root.

use std::path::PathBuf;
use std::time::Duration;

/// Default snapshot poll interval in seconds
const DEFAULT_REFRESH_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite document store (`PANTRY_DATABASE_PATH`)
    pub database_path: PathBuf,
    /// Catalog revision poll interval (`PANTRY_REFRESH_SECS`)
    pub refresh_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: database_path_from(std::env::var("PANTRY_DATABASE_PATH").ok()),
            refresh_interval: refresh_interval_from(std::env::var("PANTRY_REFRESH_SECS").ok()),
        }
    }
}

fn database_path_from(value: Option<String>) -> PathBuf {
    match value {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => default_database_path(),
    }
}

fn refresh_interval_from(value: Option<String>) -> Duration {
    let secs = match value.as_deref().map(str::trim) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) => secs.max(1),
            Err(_) => {
                tracing::warn!("Ignoring invalid PANTRY_REFRESH_SECS '{}'", raw);
                DEFAULT_REFRESH_SECS
            }
        },
        None => DEFAULT_REFRESH_SECS,
    };
    Duration::from_secs(secs)
}

/// `<project root>/data/pantry.db`, where the project root is found by
/// stepping out of `target/{debug,release}` next to the executable
pub fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(root) = path.parent().and_then(|target| target.parent()) {
            path = root.to_path_buf();
        }
    }

    path.push("data");
    path.push("pantry.db");
    path
}
