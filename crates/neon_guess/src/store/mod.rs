//! Key-value persistence for the pilot profile.

mod error;
mod memory;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{NewProfileEntry, ProfileEntry};
pub use sqlite::SqliteStore;

/// A string-to-string store.
///
/// Only the player's name and star tally go through here; an in-progress
/// match is never saved.
pub trait ProfileStore: Send {
    /// Reads a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
