//! SQLite-backed store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use super::schema::profile_entries;
use super::{NewProfileEntry, ProfileEntry, ProfileStore, StoreError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Store persisted in a SQLite file.
///
/// A connection is opened per call, which keeps the store `Send` and lets
/// several processes share one file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and applies any
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        info!(path = %store.db_path, applied = applied.len(), "Profile database ready");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Reads a full entry, including when it was last written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn entry(&self, key: &str) -> Result<Option<ProfileEntry>, StoreError> {
        let mut conn = self.connection()?;
        let entry = profile_entries::table
            .filter(profile_entries::name.eq(key))
            .select(ProfileEntry::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(entry)
    }
}

impl ProfileStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.entry(key)?.map(|entry| entry.value().clone());
        debug!(found = value.is_some(), "Entry looked up");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let entry = NewProfileEntry::new(
            key.to_string(),
            value.to_string(),
            chrono::Utc::now().naive_utc(),
        );

        diesel::replace_into(profile_entries::table)
            .values(&entry)
            .execute(&mut conn)?;

        debug!("Entry stored");
        Ok(())
    }
}
