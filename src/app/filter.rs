//! Catalog filtering.
//!
//! The visible catalog is a pure function of the fetched list, the search
//! term and the selected category. Nothing here touches state.

use crate::domain::{Video, ALL_CATEGORIES};

/// Returns the videos visible under `search_term` and `category`.
///
/// # Filtering Algorithm
///
/// 1. **Category**: unless `category` is [`ALL_CATEGORIES`], keep videos whose
///    category equals it exactly (case-sensitive)
/// 2. **Search**: if `search_term` is non-empty, keep videos whose title or
///    description contains it, ignoring case
///
/// Source order is preserved. An unknown category yields an empty result.
///
/// # Examples
///
/// ```
/// use abtube::app::filter::filter_videos;
///
/// assert!(filter_videos(&[], "cat", "All").is_empty());
/// ```
#[must_use]
pub fn filter_videos(videos: &[Video], search_term: &str, category: &str) -> Vec<Video> {
    let term = search_term.to_lowercase();

    videos
        .iter()
        .filter(|video| category == ALL_CATEGORIES || video.category == category)
        .filter(|video| term.is_empty() || matches_term(video, &term))
        .cloned()
        .collect()
}

/// `term` must already be lowercased.
fn matches_term(video: &Video, term: &str) -> bool {
    video.title.to_lowercase().contains(term) || video.description.to_lowercase().contains(term)
}
