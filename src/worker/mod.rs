//! Background execution of backend requests.
//!
//! The event loop stays synchronous; everything that talks to the network
//! goes through here.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: [`ApiWorker`] (one request → one response) and [`Dispatcher`]
//!   (many requests in flight, completion-ordered)

pub mod handler;
pub mod messages;

pub use handler::{ApiWorker, Dispatcher};
pub use messages::{ApiRequest, ApiResponse};
