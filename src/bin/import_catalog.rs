//! Utility to load catalog documents into the pantry database
//!
//! Usage:
//!   import_catalog <catalog.json>
//!   import_catalog --archive <collection> <id>

use serde::Deserialize;
use serde_json::Value;

use pantry::config::Config;
use pantry::db::store::{archive_document, count_documents, get_revision, upsert_document};
use pantry::db::{migrations, Collection, Database};

/// `{ "recipes": [...], "ingredients": [...], "suggestions": [...] }`
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    recipes: Vec<Value>,
    #[serde(default)]
    ingredients: Vec<Value>,
    #[serde(default)]
    suggestions: Vec<Value>,
}

impl CatalogFile {
    fn documents(&self, collection: Collection) -> &[Value] {
        match collection {
            Collection::Recipes => &self.recipes,
            Collection::Ingredients => &self.ingredients,
            Collection::Suggestions => &self.suggestions,
        }
    }
}

fn usage() -> Box<dyn std::error::Error> {
    "usage: import_catalog <catalog.json> | import_catalog --archive <collection> <id>".into()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = Config::from_env();
    println!("Database path: {}", config.database_path.display());
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;
    database.with_conn(|conn| migrations::run_migrations(conn))?;

    match args.as_slice() {
        [flag, collection, id] if flag == "--archive" => {
            let collection = Collection::from_str(collection)
                .ok_or_else(|| format!("Unknown collection '{}'", collection))?;
            let archived = database.with_conn(|conn| archive_document(conn, collection, id))?;
            if archived {
                println!("Archived {} {}", collection, id);
            } else {
                println!("No {} document with id {}", collection, id);
            }
        }
        [path] if !path.starts_with("--") => {
            let raw = std::fs::read_to_string(path)?;
            let file: CatalogFile = serde_json::from_str(&raw)?;

            // One transaction, so a refreshing viewer sees the whole import at once
            let imported = database.with_transaction(|tx| {
                let mut imported = Vec::new();
                for collection in Collection::ALL {
                    for document in file.documents(collection) {
                        upsert_document(tx, collection, document)?;
                    }
                    imported.push((collection, file.documents(collection).len()));
                }
                Ok(imported)
            })?;

            for (collection, count) in imported {
                println!("Imported {} {}", count, collection);
            }
        }
        _ => return Err(usage()),
    }

    database.with_conn(|conn| {
        for collection in Collection::ALL {
            let active = count_documents(conn, collection, false)?;
            let total = count_documents(conn, collection, true)?;
            println!("  {}: {} active / {} stored", collection, active, total);
        }
        println!("  revision: {}", get_revision(conn)?);
        Ok(())
    })?;

    Ok(())
}
