//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! The runtime executes them in order; today every side effect is a backend
//! request handed to the dispatcher.
//!
//! # Example
//!
//! ```
//! use abtube::app::{Action, Catalog};
//! use abtube::worker::ApiRequest;
//!
//! let mut catalog = Catalog::new();
//! let actions = vec![Action::PostToWorker(ApiRequest::LoadCatalog {
//!     ticket: catalog.begin_load(),
//! })];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::ApiRequest;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands a request to the dispatcher. Its response comes back as
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(ApiRequest),
}
