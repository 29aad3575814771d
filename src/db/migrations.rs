//! Database migrations
//!
//! Schema creation for the catalog document store.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
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
        tracing::info!("Applied catalog schema v1");
    }

    Ok(())
}

/// Migration v1: document collections and the catalog revision counter
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- DOCUMENTS
        -- One row per catalog document, body stored as JSON
        -- ============================================
        CREATE TABLE documents (
            collection TEXT NOT NULL
                CHECK(collection IN ('recipes', 'ingredients', 'suggestions')),
            id TEXT NOT NULL,
            data TEXT NOT NULL,                      -- camelCase document JSON
            is_archived INTEGER NOT NULL DEFAULT 0,  -- soft delete flag
            created_by_group_id TEXT,
            stored_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (collection, id)
        );

        CREATE INDEX idx_documents_active ON documents(collection, is_archived);
        CREATE INDEX idx_documents_group ON documents(created_by_group_id);

        -- ============================================
        -- CATALOG REVISION
        -- Bumped on every document write; viewers poll it
        -- ============================================
        CREATE TABLE catalog_revision (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            revision INTEGER NOT NULL
        );

        INSERT INTO catalog_revision (id, revision) VALUES (1, 0);

        CREATE TRIGGER documents_revision_insert AFTER INSERT ON documents
        BEGIN
            UPDATE catalog_revision SET revision = revision + 1 WHERE id = 1;
        END;

        CREATE TRIGGER documents_revision_update AFTER UPDATE ON documents
        BEGIN
            UPDATE catalog_revision SET revision = revision + 1 WHERE id = 1;
        END;

        CREATE TRIGGER documents_revision_delete AFTER DELETE ON documents
        BEGIN
            UPDATE catalog_revision SET revision = revision + 1 WHERE id = 1;
        END;
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
