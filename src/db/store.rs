//! Document store
//!
//! Catalog collections stored as JSON documents keyed by (collection, id),
//! with soft-delete flags and a revision counter bumped on every write.

use std::fmt;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::connection::{DbError, DbResult};

/// A catalog collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Recipes,
    Ingredients,
    Suggestions,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Recipes,
        Collection::Ingredients,
        Collection::Suggestions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Recipes => "recipes",
            Collection::Ingredients => "ingredients",
            Collection::Suggestions => "suggestions",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s.trim().to_lowercase())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert or replace a document
///
/// The id comes from the document's `id` field. `isArchived` and
/// `createdByGroupId` are mirrored into columns for filtering.
pub fn upsert_document(conn: &Connection, collection: Collection, document: &Value) -> DbResult<String> {
    let Some(object) = document.as_object() else {
        return Err(DbError::InvalidDocument(format!(
            "{} document is not a JSON object",
            collection
        )));
    };

    let id = match object.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => {
            return Err(DbError::InvalidDocument(format!(
                "{} document has no id",
                collection
            )))
        }
    };

    let is_archived = object
        .get("isArchived")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let group_id = object
        .get("createdByGroupId")
        .and_then(Value::as_str)
        .map(str::to_string);

    conn.execute(
        r#"
        INSERT INTO documents (collection, id, data, is_archived, created_by_group_id)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(collection, id) DO UPDATE SET
            data = excluded.data,
            is_archived = excluded.is_archived,
            created_by_group_id = excluded.created_by_group_id,
            stored_at = datetime('now')
        "#,
        params![
            collection.as_str(),
            id,
            serde_json::to_string(document)?,
            is_archived as i32,
            group_id,
        ],
    )?;

    Ok(id)
}

/// Mark a document archived; returns false if it does not exist
pub fn archive_document(conn: &Connection, collection: Collection, id: &str) -> DbResult<bool> {
    let data: Option<String> = conn
        .query_row(
            "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection.as_str(), id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(data) = data else {
        return Ok(false);
    };

    // Keep the JSON body consistent with the column
    let mut document: Value = serde_json::from_str(&data)?;
    if let Some(object) = document.as_object_mut() {
        object.insert("isArchived".to_string(), Value::Bool(true));
    }

    let rows = conn.execute(
        "UPDATE documents SET data = ?1, is_archived = 1, stored_at = datetime('now')
         WHERE collection = ?2 AND id = ?3",
        params![serde_json::to_string(&document)?, collection.as_str(), id],
    )?;
    Ok(rows > 0)
}

/// Load every non-archived document of a collection, ordered by id
///
/// The row id is authoritative and overrides any `id` inside the body.
/// Documents that fail to deserialize are skipped with a warning.
pub fn list_active<T: DeserializeOwned>(conn: &Connection, collection: Collection) -> DbResult<Vec<T>> {
    let mut stmt = conn.prepare(
        "SELECT id, data FROM documents WHERE collection = ?1 AND is_archived = 0 ORDER BY id",
    )?;

    let rows = stmt
        .query_map([collection.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut documents = Vec::with_capacity(rows.len());
    for (id, data) in rows {
        match decode_document(&id, &data) {
            Ok(document) => documents.push(document),
            Err(e) => {
                tracing::warn!(collection = %collection, id = %id, "Skipping malformed document: {}", e);
            }
        }
    }

    Ok(documents)
}

fn decode_document<T: DeserializeOwned>(id: &str, data: &str) -> Result<T, serde_json::Error> {
    let mut value: Value = serde_json::from_str(data)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("id".to_string(), Value::String(id.to_string()));
    }
    serde_json::from_value(value)
}

/// Count documents in a collection
pub fn count_documents(conn: &Connection, collection: Collection, include_archived: bool) -> DbResult<i64> {
    let sql = if include_archived {
        "SELECT COUNT(*) FROM documents WHERE collection = ?1"
    } else {
        "SELECT COUNT(*) FROM documents WHERE collection = ?1 AND is_archived = 0"
    };
    let count: i64 = conn.query_row(sql, [collection.as_str()], |row| row.get(0))?;
    Ok(count)
}

/// Current catalog revision
pub fn get_revision(conn: &Connection) -> DbResult<i64> {
    let revision: i64 = conn.query_row(
        "SELECT revision FROM catalog_revision WHERE id = 1",
        [],
        |row| row.get(0),
    )?;
    Ok(revision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{Ingredient, Recipe};
    use crate::nutrition::Unit;
    use serde_json::json;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_upsert_bumps_revision_and_replaces() {
        let conn = setup();
        let doc = json!({"id": "flour", "name": "Flour", "createdByGroupId": "team-a"});

        assert_eq!(upsert_document(&conn, Collection::Ingredients, &doc).unwrap(), "flour");
        let after_insert = get_revision(&conn).unwrap();
        assert!(after_insert > 0);

        let updated = json!({"id": "flour", "name": "Wheat flour"});
        upsert_document(&conn, Collection::Ingredients, &updated).unwrap();
        assert!(get_revision(&conn).unwrap() > after_insert);

        let ingredients: Vec<Ingredient> = list_active(&conn, Collection::Ingredients).unwrap();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "Wheat flour");
    }

    #[test]
    fn test_upsert_rejects_documents_without_id() {
        let conn = setup();
        assert!(upsert_document(&conn, Collection::Recipes, &json!({"name": "x"})).is_err());
        assert!(upsert_document(&conn, Collection::Recipes, &json!({"id": "  "})).is_err());
        assert!(upsert_document(&conn, Collection::Recipes, &json!([1, 2])).is_err());
        assert_eq!(get_revision(&conn).unwrap(), 0);
    }

    #[test]
    fn test_archived_documents_are_hidden() {
        let conn = setup();
        upsert_document(&conn, Collection::Ingredients, &json!({"id": "a", "name": "A"})).unwrap();
        upsert_document(&conn, Collection::Ingredients, &json!({"id": "b", "name": "B", "isArchived": true})).unwrap();
        upsert_document(&conn, Collection::Ingredients, &json!({"id": "c", "name": "C"})).unwrap();

        assert!(archive_document(&conn, Collection::Ingredients, "c").unwrap());
        assert!(!archive_document(&conn, Collection::Ingredients, "zzz").unwrap());

        let active: Vec<Ingredient> = list_active(&conn, Collection::Ingredients).unwrap();
        let ids: Vec<&str> = active.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
        assert_eq!(count_documents(&conn, Collection::Ingredients, true).unwrap(), 3);
        assert_eq!(count_documents(&conn, Collection::Ingredients, false).unwrap(), 1);
    }

    #[test]
    fn test_malformed_documents_are_skipped() {
        let conn = setup();
        upsert_document(
            &conn,
            Collection::Recipes,
            &json!({"id": "good", "name": "Soup", "ingredients": [
                {"ingredientId": "salt", "unit": "free_text", "quantityText": "to taste"}
            ]}),
        )
        .unwrap();
        upsert_document(
            &conn,
            Collection::Recipes,
            &json!({"id": "bad", "name": "Stew", "ingredients": "salt, water"}),
        )
        .unwrap();

        let recipes: Vec<Recipe> = list_active(&conn, Collection::Recipes).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, "good");
    }

    #[test]
    fn test_unrecognized_unit_keeps_document() {
        let conn = setup();
        upsert_document(
            &conn,
            Collection::Recipes,
            &json!({"id": "stew", "name": "Stew", "ingredients": [
                {"ingredientId": "flour", "quantity": 200, "unit": "g"},
                {"ingredientId": "salt", "quantity": 1, "unit": "handful"}
            ]}),
        )
        .unwrap();

        let recipes: Vec<Recipe> = list_active(&conn, Collection::Recipes).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients[0].unit, Unit::Gram);
        assert_eq!(recipes[0].ingredients[1].unit, Unit::Unknown);
    }

    #[test]
    fn test_collections_are_separate() {
        let conn = setup();
        upsert_document(&conn, Collection::Recipes, &json!({"id": "x", "name": "Recipe X"})).unwrap();
        upsert_document(&conn, Collection::Ingredients, &json!({"id": "x", "name": "Ingredient X"})).unwrap();

        assert_eq!(count_documents(&conn, Collection::Recipes, false).unwrap(), 1);
        assert_eq!(count_documents(&conn, Collection::Ingredients, false).unwrap(), 1);
        assert_eq!(count_documents(&conn, Collection::Suggestions, false).unwrap(), 0);
    }

    #[test]
    fn test_collection_from_str() {
        assert_eq!(Collection::from_str("Recipes"), Some(Collection::Recipes));
        assert_eq!(Collection::from_str(" suggestions "), Some(Collection::Suggestions));
        assert_eq!(Collection::from_str("pantries"), None);
    }
}
