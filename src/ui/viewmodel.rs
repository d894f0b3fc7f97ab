//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings and pre-computed highlight ranges, and no business logic.
//!
//! # Example
//!
//! ```
//! use abtube::ui::viewmodel::{HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " ABTube (0/0) ".to_string(), session: "guest".to_string() },
//!     search_bar: SearchBarInfo { term: String::new(), category: "All".to_string() },
//!     rows: vec![],
//!     empty_state: None,
//!     player: None,
//!     alert: None,
//!     notice: None,
//! };
//! assert!(vm.rows.is_empty());
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Active search term and category filter.
    pub search_bar: SearchBarInfo,

    /// Visible catalog rows, in catalog order.
    pub rows: Vec<VideoRow>,

    /// Shown instead of rows when nothing is visible.
    pub empty_state: Option<EmptyState>,

    /// Detail of the opened video, if any.
    pub player: Option<PlayerInfo>,

    /// Error from the last failed action.
    pub alert: Option<String>,

    /// Confirmation from the last successful action.
    pub notice: Option<String>,
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRow {
    pub id: i64,
    pub title: String,
    pub uploader: String,
    pub category: String,
    pub duration: String,
    pub likes: usize,

    /// Relative upload age, e.g. "3d ago".
    pub age: String,

    /// Character ranges of `title` matching the search term.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text including visible/total counts.
    pub title: String,

    /// Session status ("logged in" or "guest").
    pub session: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub term: String,
    pub category: String,
}

/// Message shown when the catalog has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Detail section for the opened video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub video_id: i64,

    /// `None` while the video detail is still loading or failed to load.
    pub title: Option<String>,
    pub uploader: String,
    pub category: String,
    pub description: String,
    pub likes: usize,
    pub liked: bool,
    pub age: String,
    pub comments: Vec<CommentRow>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub id: i64,
    pub username: String,
    pub text: String,

    /// Posting time as `YYYY-MM-DD HH:MM`.
    pub posted: String,
}
