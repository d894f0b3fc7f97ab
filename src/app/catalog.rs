//! Video catalog view-model.
//!
//! [`Catalog`] exclusively owns the fetched video list and the derived
//! filtered view. Every setter recomputes the view synchronously and
//! publishes it to subscribers.
//!
//! # Stale responses
//!
//! Each load takes a [`LoadTicket`] stamped with a generation number.
//! Starting a new load bumps the generation, so a slower response for an
//! earlier load is recognised and dropped instead of overwriting newer data.

use tokio::sync::watch;
use tracing::Instrument;

use super::filter::filter_videos;
use crate::api::VideoApi;
use crate::domain::error::Result;
use crate::domain::{Video, VideoId, ALL_CATEGORIES};

/// Identifies one catalog load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Fetched catalog plus filter state.
#[derive(Debug)]
pub struct Catalog {
    videos: Vec<Video>,
    filtered: Vec<Video>,
    search_term: String,
    selected_category: String,
    loading: bool,
    error: Option<String>,
    generation: u64,
    changes: watch::Sender<Vec<Video>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Creates an empty catalog showing every category.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            videos: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            loading: false,
            error: None,
            generation: 0,
            changes,
        }
    }

    #[must_use]
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed load, cleared when a load succeeds.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The visible subset, in source order.
    #[must_use]
    pub fn filtered_videos(&self) -> &[Video] {
        &self.filtered
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.recompute();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
        self.recompute();
    }

    /// Looks up a held video by id.
    #[must_use]
    pub fn find(&self, id: VideoId) -> Option<&Video> {
        self.videos.iter().find(|video| video.id == id)
    }

    /// Marks a load as in flight and returns its ticket. Any ticket issued
    /// earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        tracing::debug!(generation = self.generation, "catalog load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Applies the outcome of the load identified by `ticket`.
    ///
    /// Returns `false` without touching state if a newer load has started
    /// since. On failure the list is emptied and the error recorded.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Video>>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale catalog response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(videos) => {
                tracing::debug!(video_count = videos.len(), "catalog loaded");
                self.videos = videos;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog load failed");
                self.videos.clear();
                self.error = Some(e.to_string());
            }
        }
        self.recompute();
        true
    }

    /// Fetches the full list and applies it.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after recording it on the catalog. A result
    /// that arrives after a newer load started is ignored and reported as
    /// `Ok`.
    pub async fn load_videos(&mut self, api: &dyn VideoApi) -> Result<()> {
        let ticket = self.begin_load();
        let result = api
            .list_videos()
            .instrument(tracing::debug_span!("catalog_load", generation = ticket.generation))
            .await;

        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.finish_load(ticket, result);
        outcome
    }

    /// Receiver notified with the filtered view on every recomputation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Video>> {
        self.changes.subscribe()
    }

    fn recompute(&mut self) {
        let _span = tracing::debug_span!(
            "catalog_filter",
            total_videos = self.videos.len(),
            term_len = self.search_term.len(),
            category = %self.selected_category
        )
        .entered();

        self.filtered = filter_videos(&self.videos, &self.search_term, &self.selected_category);
        self.changes.send_replace(self.filtered.clone());

        tracing::trace!(filtered_count = self.filtered.len(), "catalog filter applied");
    }
}
