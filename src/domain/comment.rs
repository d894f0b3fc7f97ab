//! Comment domain model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::video::{UserId, VideoId};

/// Server-assigned comment identifier.
pub type CommentId = i64;

/// A comment as listed by `GET /comment/{video_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub video_id: VideoId,
    pub user_id: UserId,
    pub username: String,
    pub text: String,
    #[serde(with = "comment_timestamp")]
    pub created_at: NaiveDateTime,
}

/// The comment listing formats timestamps as `YYYY-MM-DD HH:MM:SS`, unlike
/// the ISO-8601 form used for videos.
mod comment_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| raw.parse::<NaiveDateTime>())
            .map_err(serde::de::Error::custom)
    }
}
