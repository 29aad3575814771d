//! Catalog sources
//!
//! Where snapshots come from. The server only depends on the trait; the
//! SQLite document store is the production implementation.

use async_trait::async_trait;
use thiserror::Error;

use super::snapshot::{load_snapshot, CatalogSnapshot};
use crate::db::store::get_revision;
use crate::db::{Database, DbError};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Store error: {0}")]
    Store(#[from] DbError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A provider of catalog snapshots
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Current revision, cheap enough to poll
    async fn revision(&self) -> Result<i64, CatalogError>;

    /// Load a full snapshot
    async fn load(&self) -> Result<CatalogSnapshot, CatalogError>;
}

/// Catalog source backed by the SQLite document store
#[derive(Clone)]
pub struct SqliteCatalogSource {
    database: Database,
}

impl SqliteCatalogSource {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl CatalogSource for SqliteCatalogSource {
    async fn revision(&self) -> Result<i64, CatalogError> {
        let database = self.database.clone();
        let revision = tokio::task::spawn_blocking(move || database.with_conn(get_revision)).await??;
        Ok(revision)
    }

    async fn load(&self) -> Result<CatalogSnapshot, CatalogError> {
        let database = self.database.clone();
        let snapshot = tokio::task::spawn_blocking(move || database.with_conn(load_snapshot)).await??;
        Ok(snapshot)
    }
}
