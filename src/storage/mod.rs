//! Storage layer for values that must survive process restarts.
//!
//! The client keeps exactly one durable value today: the session token,
//! under [`ACCESS_TOKEN_KEY`]. The store is a plain string key/value map so
//! other preferences can join it without a format change.
//!
//! # Modules
//!
//! - `backend`: [`LocalStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-memory implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::LocalStore;
pub use json::JsonStore;
pub use memory::MemoryStore;

/// Well-known key holding the session token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// File name of the JSON store inside the data directory.
pub const STORE_FILE_NAME: &str = "session.json";
