//! Pantry
//!
//! An MCP server for browsing a recipe catalog with nutrition.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use pantry::build_info;
use pantry::catalog::{CatalogFeed, CatalogSource, SqliteCatalogSource};
use pantry::config::Config;
use pantry::db::{self, Database};
use pantry::mcp::PantryService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pantry=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Database path: {}", config.database_path.display());

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;

    database.with_conn(|conn| {
        if db::migrations::needs_migration(conn)? {
            tracing::info!("Applying catalog schema migrations");
        }
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    // Initial snapshot, then poll for changes
    let source: Arc<dyn CatalogSource> = Arc::new(SqliteCatalogSource::new(database));
    let initial = source.load().await?;
    tracing::info!(
        revision = initial.revision,
        recipes = initial.recipes.len(),
        ingredients = initial.ingredients.len(),
        suggestions = initial.suggestions.len(),
        "Loaded catalog"
    );
    let feed = Arc::new(CatalogFeed::new(initial));
    let refresher = feed.clone().spawn_refresh_loop(source, config.refresh_interval);

    let service = PantryService::new(config.database_path, feed);

    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    refresher.abort();
    Ok(())
}
