//! Credential Store
//! Mission: Persist user accounts with SQLite, email unique at the store level

use crate::auth::models::{Role, User};
use crate::auth::password;
use anyhow::{Context, Result};
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OpenFlags};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    is_verified INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
"#;

/// User storage with SQLite backend.
///
/// Email uniqueness is enforced here by a unique index, atomically, so the
/// handler-level duplicate pre-check can never race its way to two accounts
/// with the same email.
pub struct UserStore {
    conn: Arc<Mutex<Connection>>,
}

impl UserStore {
    /// Open (or create) the store. Failure here is startup-fatal by design.
    pub fn new(db_path: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(db_path, flags)
            .with_context(|| format!("Failed to open user database at {}", db_path))?;

        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize user schema")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Seed an admin account if no admin exists yet. Registration only ever
    /// creates plain users, so this is the single path to an admin identity.
    pub fn ensure_admin(&self, email: &str, admin_password: &str) -> Result<()> {
        let admins: i64 = {
            let conn = self.conn.lock();
            conn.query_row(
                "SELECT COUNT(*) FROM users WHERE role = 'admin'",
                [],
                |row| row.get(0),
            )
            .context("Failed to check for admin users")?
        };

        if admins > 0 {
            return Ok(());
        }

        let password_hash = password::hash_password(admin_password)?;
        self.create("Admin", email, None, &password_hash, Role::Admin)?;

        info!("Default admin user created ({})", email);
        warn!("CHANGE THE DEFAULT ADMIN PASSWORD IN PRODUCTION!");
        Ok(())
    }

    /// Point lookup by email (case-sensitive, as stored).
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, email, phone, password_hash, role, is_verified, created_at
             FROM users WHERE email = ?1",
        )?;

        let user_result = stmt.query_row(params![email], |row| {
            let id_str: String = row.get(0)?;
            let role_str: String = row.get(5)?;
            Ok(User {
                id: Uuid::parse_str(&id_str).unwrap_or_default(),
                name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                password_hash: row.get(4)?,
                role: Role::from_str(&role_str).unwrap_or(Role::User),
                is_verified: row.get(6)?,
                created_at: row.get(7)?,
            })
        });

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a new user. The caller supplies an already-hashed password.
    pub fn create(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        password_hash: &str,
        role: Role,
    ) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            password_hash: password_hash.to_string(),
            role,
            is_verified: false,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO users (id, name, email, phone, password_hash, role, is_verified, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user.id.to_string(),
                user.name,
                user.email,
                user.phone,
                user.password_hash,
                user.role.as_str(),
                user.is_verified,
                user.created_at,
            ],
        )
        .context("Failed to insert user")?;

        info!("Created user: {} ({})", user.email, user.role.as_str());

        Ok(user)
    }
}

/// True when an error chain bottoms out in a SQLite uniqueness violation.
/// Used to map the insert-time duplicate-email backstop to a 409.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<rusqlite::Error>(),
            Some(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = UserStore::new(db_path).unwrap();
        (store, temp_file)
    }

    fn fast_hash(password: &str) -> String {
        bcrypt::hash(password, 4).unwrap()
    }

    #[test]
    fn test_create_and_find_by_email() {
        let (store, _temp) = create_test_store();

        let created = store
            .create("A", "a@x.com", Some("12345"), &fast_hash("pw"), Role::User)
            .unwrap();
        assert_eq!(created.role, Role::User);
        assert!(!created.is_verified);

        let found = store.find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(found.name, "A");
        assert_eq!(found.phone.as_deref(), Some("12345"));
        assert!(password::verify_password("pw", &found.password_hash));
    }

    #[test]
    fn test_unknown_email_is_none() {
        let (store, _temp) = create_test_store();
        assert!(store.find_by_email("nobody@x.com").unwrap().is_none());
    }

    #[test]
    fn test_email_lookup_is_case_sensitive() {
        let (store, _temp) = create_test_store();
        store
            .create("A", "a@x.com", None, &fast_hash("pw"), Role::User)
            .unwrap();
        assert!(store.find_by_email("A@x.com").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected_by_store() {
        let (store, _temp) = create_test_store();
        store
            .create("A", "a@x.com", None, &fast_hash("pw"), Role::User)
            .unwrap();

        // No handler pre-check here: the unique index alone must reject it.
        let err = store
            .create("B", "a@x.com", None, &fast_hash("pw2"), Role::User)
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn test_ensure_admin_seeds_once() {
        let (store, _temp) = create_test_store();

        store.ensure_admin("admin@test.local", "admin-pw").unwrap();
        let admin = store.find_by_email("admin@test.local").unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);

        // Second call is a no-op, not a duplicate insert.
        store.ensure_admin("admin@test.local", "admin-pw").unwrap();
    }
}
