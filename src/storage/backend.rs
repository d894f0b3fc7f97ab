//! Local store abstraction.
//!
//! The client persists a handful of string values across restarts (most
//! importantly the session token). [`LocalStore`] is a minimal key/value
//! contract so the session holder does not care whether values live in a
//! JSON file or in memory.

use crate::domain::error::Result;

/// Durable string key/value storage.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): JSON file with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local, for tests
///   and ephemeral sessions
///
/// # Examples
///
/// ```no_run
/// use abtube::storage::{JsonStore, LocalStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonStore::new(PathBuf::from("/tmp/abtube/session.json"))?;
/// store.set("access_token", "alice")?;
/// assert_eq!(store.get("access_token")?, Some("alice".to_string()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait LocalStore: Send {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value. The write is
    /// durable when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted. The in-memory view
    /// is left unchanged in that case.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;
}
