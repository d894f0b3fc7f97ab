//! Application layer coordinating state, events, and actions.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Dispatcher
//!                           ↑                                          ↓
//!                           └──────────── API Responses ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`session`]: Session state holder (token, login, logout)
//! - [`catalog`]: Catalog view-model (videos, search, category)
//! - [`filter`]: Pure catalog filter
//! - [`player`]: Opened video detail view-model
//! - [`state`]: Container for all holders plus view model computation
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`runtime`]: Loop that drives events to quiescence
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use abtube::api::HttpApi;
//! use abtube::app::{drive, AppState, Event};
//! use abtube::storage::MemoryStore;
//! use abtube::ui::Theme;
//! use abtube::worker::Dispatcher;
//!
//! # async fn run() -> abtube::domain::Result<()> {
//! let mut state = AppState::new(Box::new(MemoryStore::new()), Theme::dark());
//! let mut dispatcher = Dispatcher::new(Arc::new(HttpApi::new("http://localhost:8000/api")?));
//! drive(&mut state, &mut dispatcher, [Event::RefreshCatalog]).await?;
//! println!("{} videos", state.catalog.videos().len());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod catalog;
pub mod filter;
pub mod handler;
pub mod player;
pub mod runtime;
pub mod session;
pub mod state;

pub use actions::Action;
pub use catalog::{Catalog, LoadTicket};
pub use handler::{handle_event, Event};
pub use player::{Player, PlayerTicket};
pub use runtime::{drive, drive_steps, execute_actions};
pub use session::SessionState;
pub use state::AppState;
