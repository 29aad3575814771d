//! Pantry Status Tool
//!
//! Provides runtime status information about the pantry service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::catalog::CatalogSnapshot;

/// Sizes of the published snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CatalogCounts {
    pub revision: i64,
    pub recipes: usize,
    pub ingredients: usize,
    pub suggestions: usize,
}

/// Runtime status of the pantry service
#[derive(Debug, Clone, Serialize)]
pub struct PantryStatus {
    /// Build information
    pub build: BuildInfo,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    pub catalog: CatalogCounts,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status against the given snapshot
    pub fn get_status(&self, snapshot: &CatalogSnapshot) -> PantryStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PantryStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            catalog: CatalogCounts {
                revision: snapshot.revision,
                recipes: snapshot.recipes.len(),
                ingredients: snapshot.ingredients.len(),
                suggestions: snapshot.suggestions.len(),
            },
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_snapshot_and_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/pantry.db"));
        let snapshot = CatalogSnapshot {
            revision: 12,
            ..Default::default()
        };

        let status = tracker.get_status(&snapshot);
        assert_eq!(status.catalog.revision, 12);
        assert_eq!(status.catalog.recipes, 0);
        assert!(status.database_size_bytes.is_none());
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.build.name, "pantry");
    }
}
