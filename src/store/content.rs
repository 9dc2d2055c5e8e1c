//! Document Store
//! Mission: Schema-flexible named-collection storage over SQLite
//!
//! Each record is one JSON document in a named collection; the store
//! assigns an opaque UUID on insert. Field-match lookups go through the
//! json1 extension so filtering happens in SQL, not in Rust.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, Connection, OpenFlags};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    collection TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
) WITHOUT ROWID;

CREATE INDEX IF NOT EXISTS idx_documents_collection
    ON documents(collection, created_at);
"#;

/// Content storage with SQLite backend.
pub struct ContentStore {
    conn: Arc<Mutex<Connection>>,
}

impl ContentStore {
    /// Open (or create) the store. Failure here is startup-fatal by design.
    pub fn new(db_path: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(db_path, flags)
            .with_context(|| format!("Failed to open content database at {}", db_path))?;

        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize content schema")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert a document into a collection. Returns the assigned id.
    pub fn insert<T: Serialize>(&self, collection: &str, doc: &T) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(doc).context("Failed to serialize document")?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO documents (id, collection, body, created_at)
             VALUES (?1, ?2, ?3, strftime('%s', 'now'))",
            params![id, collection, body],
        )
        .with_context(|| format!("Failed to insert into {}", collection))?;

        Ok(id)
    }

    /// All documents in a collection, in insertion order.
    pub fn list(&self, collection: &str) -> Result<Vec<Value>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT body FROM documents WHERE collection = ?1 ORDER BY created_at, id",
        )?;

        let docs = stmt
            .query_map(params![collection], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|body| serde_json::from_str(&body).context("Corrupt document body"))
            .collect::<Result<Vec<Value>>>()?;

        Ok(docs)
    }

    /// Newest document whose top-level string fields all equal the given
    /// values. Field names are code-controlled, never request input.
    pub fn find_match(
        &self,
        collection: &str,
        fields: &[(&str, &str)],
    ) -> Result<Option<(String, Value)>> {
        let mut sql = String::from("SELECT id, body FROM documents WHERE collection = ?1");
        let mut args: Vec<String> = vec![collection.to_string()];

        for (i, (field, value)) in fields.iter().enumerate() {
            sql.push_str(&format!(
                " AND json_extract(body, '$.{}') = ?{}",
                field,
                i + 2
            ));
            args.push(value.to_string());
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT 1");

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let row = stmt.query_row(params_from_iter(args.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        });

        match row {
            Ok((id, body)) => {
                let doc = serde_json::from_str(&body).context("Corrupt document body")?;
                Ok(Some((id, doc)))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a top-level boolean field on one document in place.
    pub fn set_bool(&self, id: &str, field: &str, value: bool) -> Result<()> {
        let literal = if value { "true" } else { "false" };
        let conn = self.conn.lock();
        conn.execute(
            &format!(
                "UPDATE documents SET body = json_set(body, '$.{}', json('{}')) WHERE id = ?1",
                field, literal
            ),
            params![id],
        )
        .context("Failed to update document")?;
        Ok(())
    }

    /// Names of all non-empty collections.
    pub fn collections(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT DISTINCT collection FROM documents ORDER BY collection")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (ContentStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let store = ContentStore::new(temp_file.path().to_str().unwrap()).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_insert_and_list() {
        let (store, _temp) = create_test_store();

        let id1 = store
            .insert("lead", &json!({"name": "A", "email": "a@x.com"}))
            .unwrap();
        let id2 = store
            .insert("lead", &json!({"name": "B", "email": "b@x.com"}))
            .unwrap();
        assert_ne!(id1, id2);

        let docs = store.list("lead").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["name"], "A");

        assert!(store.list("package").unwrap().is_empty());
    }

    #[test]
    fn test_collections_are_isolated() {
        let (store, _temp) = create_test_store();

        store.insert("lead", &json!({"name": "A"})).unwrap();
        store.insert("package", &json!({"slug": "starter"})).unwrap();

        assert_eq!(store.list("lead").unwrap().len(), 1);
        assert_eq!(store.list("package").unwrap().len(), 1);
        assert_eq!(store.collections().unwrap(), vec!["lead", "package"]);
    }

    #[test]
    fn test_find_match_on_multiple_fields() {
        let (store, _temp) = create_test_store();

        store
            .insert(
                "otprequest",
                &json!({"target": "a@x.com", "code": "123456", "purpose": "signup"}),
            )
            .unwrap();

        let hit = store
            .find_match(
                "otprequest",
                &[("target", "a@x.com"), ("code", "123456"), ("purpose", "signup")],
            )
            .unwrap();
        assert!(hit.is_some());

        let miss = store
            .find_match(
                "otprequest",
                &[("target", "a@x.com"), ("code", "999999"), ("purpose", "signup")],
            )
            .unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn test_set_bool_updates_in_place() {
        let (store, _temp) = create_test_store();

        let id = store
            .insert("otprequest", &json!({"code": "123456", "verified": false}))
            .unwrap();
        store.set_bool(&id, "verified", true).unwrap();

        let (_, doc) = store
            .find_match("otprequest", &[("code", "123456")])
            .unwrap()
            .unwrap();
        assert_eq!(doc["verified"], json!(true));
    }
}
