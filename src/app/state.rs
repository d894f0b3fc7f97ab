//! Application state and view model computation.
//!
//! [`AppState`] groups the state holders the event handler mutates: the
//! session, the catalog, the player, plus the transient alert/notice lines
//! and the active theme.
//!
//! # State Components
//!
//! - **Session**: access token, restored from the local store
//! - **Catalog**: fetched videos plus search term and category filter
//! - **Player**: opened video, comments and like flag
//! - **Alert / Notice**: outcome of the most recent asynchronous action
//!
//! # Example
//!
//! ```
//! use abtube::app::AppState;
//! use abtube::storage::MemoryStore;
//! use abtube::ui::Theme;
//!
//! let mut state = AppState::new(Box::new(MemoryStore::new()), Theme::dark());
//! state.catalog.set_search_term("cat");
//! let viewmodel = state.compute_viewmodel(80);
//! assert!(viewmodel.rows.is_empty());
//! ```

use chrono::NaiveDateTime;

use super::catalog::Catalog;
use super::player::Player;
use super::session::SessionState;
use crate::domain::error::ClientError;
use crate::domain::{Comment, Video};
use crate::storage::LocalStore;
use crate::ui::helpers::{match_ranges, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CommentRow, EmptyState, HeaderInfo, PlayerInfo, SearchBarInfo, UIViewModel, VideoRow,
};

/// Terminal lines the player description may occupy.
const DESCRIPTION_LINES: usize = 3;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub session: SessionState,
    pub catalog: Catalog,
    pub player: Player,
    pub theme: Theme,

    /// Error from the last failed asynchronous action.
    pub alert: Option<String>,

    /// Confirmation from the last successful asynchronous action.
    pub notice: Option<String>,
}

impl AppState {
    /// Creates the state, restoring the session from `store`.
    #[must_use]
    pub fn new(store: Box<dyn LocalStore>, theme: Theme) -> Self {
        Self {
            session: SessionState::new(store),
            catalog: Catalog::new(),
            player: Player::new(),
            theme,
            alert: None,
            notice: None,
        }
    }

    /// Clears alert and notice before a new user action.
    pub fn clear_messages(&mut self) {
        self.alert = None;
        self.notice = None;
    }

    pub fn set_alert(&mut self, err: &ClientError) {
        tracing::debug!(error = %err, "alert raised");
        self.alert = Some(err.to_string());
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Computes a renderable view model for a terminal `cols` wide.
    #[must_use]
    pub fn compute_viewmodel(&self, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(cols, chrono::Local::now().naive_local())
    }

    /// [`compute_viewmodel`](Self::compute_viewmodel) with an explicit clock,
    /// so relative ages are deterministic.
    #[must_use]
    pub fn compute_viewmodel_at(&self, cols: usize, now: NaiveDateTime) -> UIViewModel {
        let _span = tracing::debug_span!(
            "compute_viewmodel",
            visible = self.catalog.filtered_videos().len()
        )
        .entered();

        let rows: Vec<VideoRow> = self
            .catalog
            .filtered_videos()
            .iter()
            .map(|video| self.compute_row(video, now))
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                term: self.catalog.search_term().to_string(),
                category: self.catalog.selected_category().to_string(),
            },
            empty_state: if rows.is_empty() { Some(self.compute_empty_state()) } else { None },
            rows,
            player: self.compute_player(cols, now),
            alert: self.alert.clone(),
            notice: self.notice.clone(),
        }
    }

    fn compute_row(&self, video: &Video, now: NaiveDateTime) -> VideoRow {
        VideoRow {
            id: video.id,
            title: video.title.clone(),
            uploader: video.uploader.clone(),
            category: video.category.clone(),
            duration: video.duration.clone(),
            likes: video.like_count(),
            age: video.age_label(now),
            highlight_ranges: match_ranges(&video.title, self.catalog.search_term()),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let visible = self.catalog.filtered_videos().len();
        let total = self.catalog.videos().len();
        let session = if self.session.is_authenticated() { "logged in" } else { "guest" };

        HeaderInfo {
            title: format!(" ABTube ({visible}/{total}) "),
            session: session.to_string(),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.catalog.is_loading() {
            return EmptyState {
                message: "Loading videos...".to_string(),
                subtitle: String::new(),
            };
        }

        if let Some(error) = self.catalog.error() {
            return EmptyState {
                message: "Could not load videos".to_string(),
                subtitle: error.to_string(),
            };
        }

        if self.catalog.videos().is_empty() {
            EmptyState {
                message: "No videos yet".to_string(),
                subtitle: "Upload one with `abtube upload`".to_string(),
            }
        } else {
            EmptyState {
                message: "No videos match".to_string(),
                subtitle: "Try another search term or category".to_string(),
            }
        }
    }

    fn compute_player(&self, cols: usize, now: NaiveDateTime) -> Option<PlayerInfo> {
        let video_id = self.player.video_id()?;
        let video = self.player.video();

        Some(PlayerInfo {
            video_id,
            title: video.map(|v| v.title.clone()),
            uploader: video.map(|v| v.uploader.clone()).unwrap_or_default(),
            category: video.map(|v| v.category.clone()).unwrap_or_default(),
            description: video
                .map(|v| truncate(&v.description, cols.saturating_mul(DESCRIPTION_LINES)))
                .unwrap_or_default(),
            likes: video.map_or(0, Video::like_count),
            liked: self.player.is_liked(),
            age: video.map(|v| v.age_label(now)).unwrap_or_default(),
            comments: self.player.comments().iter().map(compute_comment_row).collect(),
            error: self.player.error().map(ToString::to_string),
        })
    }
}

fn compute_comment_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id,
        username: comment.username.clone(),
        text: comment.text.clone(),
        posted: comment.created_at.format("%Y-%m-%d %H:%M").to_string(),
    }
}
