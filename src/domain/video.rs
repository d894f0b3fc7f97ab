//! Video domain model.
//!
//! Videos are created by the server; the client only ever holds read-only
//! copies that are replaced wholesale on re-fetch. Ids are unique within a
//! single fetch batch.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Server-assigned video identifier.
pub type VideoId = i64;

/// Server-assigned user identifier, as found in `likes` and `user_id`.
pub type UserId = i64;

/// Category name meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Category assigned by the upload form when none is chosen.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Categories offered by the upload form, in display order.
pub const CATEGORIES: [&str; 18] = [
    "Trending",
    "AI",
    "Comedy",
    "Crypto",
    "Fashion",
    "Finance",
    "Food",
    "Gaming",
    "Learning",
    "Movies",
    "Music",
    "News",
    "Programming",
    "Sports",
    "Technology",
    "Travel",
    "Vlog",
    "Other",
];

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// A video as listed by `GET /videos`.
///
/// `likes` holds the ids of the users who liked the video; its length is the
/// like count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    pub uploader: String,
    #[serde(rename = "user_id")]
    pub uploader_id: UserId,
    #[serde(default)]
    pub likes: Vec<UserId>,
    pub created_at: NaiveDateTime,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_duration() -> String {
    "00:00".to_string()
}

impl Video {
    /// Number of users who liked the video.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Whether the given user appears in the like set.
    #[must_use]
    pub fn is_liked_by(&self, user: UserId) -> bool {
        self.likes.contains(&user)
    }

    /// Returns a short label describing the upload age relative to `now`.
    ///
    /// - under a minute: "just now"
    /// - under an hour: "Xm ago"
    /// - under a day: "Xh ago"
    /// - otherwise: "Xd ago"
    ///
    /// Timestamps in the future (clock skew) are reported as "just now".
    ///
    /// # Examples
    ///
    /// ```
    /// use abtube::domain::Video;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let uploaded = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let video = Video {
    ///     id: 1,
    ///     title: "Cat Facts".into(),
    ///     description: String::new(),
    ///     category: "Other".into(),
    ///     duration: "1:05".into(),
    ///     uploader: "alice".into(),
    ///     uploader_id: 7,
    ///     likes: vec![],
    ///     created_at: uploaded,
    /// };
    ///
    /// assert_eq!(video.age_label(uploaded + Duration::minutes(5)), "5m ago");
    /// assert_eq!(video.age_label(uploaded + Duration::days(3)), "3d ago");
    /// ```
    #[must_use]
    pub fn age_label(&self, now: NaiveDateTime) -> String {
        let diff = (now - self.created_at).num_seconds();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}
