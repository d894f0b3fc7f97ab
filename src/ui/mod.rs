//! Terminal rendering layer.
//!
//! Transforms view models into ANSI-styled text through small component
//! renderers.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Section renderers (header, table, player, ...)
//! - [`helpers`]: Match highlighting and width fitting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, Screen};
pub use theme::Theme;
pub use viewmodel::{
    CommentRow, EmptyState, HeaderInfo, PlayerInfo, SearchBarInfo, UIViewModel, VideoRow,
};
