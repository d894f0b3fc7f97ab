//! Video player view-model.
//!
//! Holds the detail state of the currently opened video: the video itself,
//! its comments and whether the current user likes it. Opening a video
//! starts a new generation; responses carry the [`PlayerTicket`] they were
//! requested with and are dropped if the player has moved on.

use futures_util::future::join3;
use tracing::Instrument;

use crate::api::{LikeStatus, VideoApi};
use crate::domain::error::{ClientError, Result};
use crate::domain::{Comment, Video, VideoId};

/// Identifies the player generation a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTicket {
    video_id: VideoId,
    generation: u64,
}

impl PlayerTicket {
    #[must_use]
    pub const fn video_id(self) -> VideoId {
        self.video_id
    }

    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// Detail state of the opened video.
#[derive(Debug, Default)]
pub struct Player {
    current: Option<PlayerTicket>,
    generation: u64,
    video: Option<Video>,
    comments: Vec<Comment>,
    is_liked: bool,
    error: Option<String>,
}

impl Player {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows video `id`, discarding everything held for the previous one.
    pub fn open(&mut self, id: VideoId) -> PlayerTicket {
        self.generation += 1;
        let ticket = PlayerTicket {
            video_id: id,
            generation: self.generation,
        };

        self.current = Some(ticket);
        self.video = None;
        self.comments.clear();
        self.is_liked = false;
        self.error = None;

        tracing::debug!(video_id = id, generation = self.generation, "player opened");
        ticket
    }

    /// Closes the player. In-flight responses become stale.
    pub fn close(&mut self) {
        if self.current.take().is_some() {
            self.generation += 1;
            self.video = None;
            self.comments.clear();
            self.is_liked = false;
            self.error = None;
            tracing::debug!("player closed");
        }
    }

    /// Ticket of the open video, if any.
    #[must_use]
    pub const fn ticket(&self) -> Option<PlayerTicket> {
        self.current
    }

    #[must_use]
    pub fn video_id(&self) -> Option<VideoId> {
        self.current.map(PlayerTicket::video_id)
    }

    #[must_use]
    pub const fn video(&self) -> Option<&Video> {
        self.video.as_ref()
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[must_use]
    pub const fn is_liked(&self) -> bool {
        self.is_liked
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `ticket` belongs to the open video's current generation.
    #[must_use]
    pub fn is_current(&self, ticket: PlayerTicket) -> bool {
        self.current == Some(ticket)
    }

    /// Forgets the like flag, e.g. after the user logs out.
    pub fn clear_like(&mut self) {
        self.is_liked = false;
    }

    pub fn apply_video(&mut self, ticket: PlayerTicket, result: Result<Video>) -> bool {
        if !self.accept(ticket, "video") {
            return false;
        }
        match result {
            Ok(video) => self.video = Some(video),
            Err(e) => self.record_error(&e),
        }
        true
    }

    pub fn apply_comments(&mut self, ticket: PlayerTicket, result: Result<Vec<Comment>>) -> bool {
        if !self.accept(ticket, "comments") {
            return false;
        }
        match result {
            Ok(comments) => self.comments = comments,
            Err(e) => self.record_error(&e),
        }
        true
    }

    /// Applies a like-status check. A failed check reads as "not liked".
    pub fn apply_liked(&mut self, ticket: PlayerTicket, result: Result<bool>) -> bool {
        if !self.accept(ticket, "like status") {
            return false;
        }
        self.is_liked = result.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "like status check failed");
            false
        });
        true
    }

    /// Applies the state returned by a like toggle.
    pub fn apply_like_toggled(&mut self, ticket: PlayerTicket, status: LikeStatus) -> bool {
        if !self.accept(ticket, "like toggle") {
            return false;
        }
        self.is_liked = status.liked;
        true
    }

    /// Opens `id` and loads its video, comments and like status
    /// concurrently. The like status is only requested with a `token`.
    ///
    /// # Errors
    ///
    /// Returns the video fetch error; comment and like failures are recorded
    /// on the player but not returned.
    pub async fn load(&mut self, api: &dyn VideoApi, id: VideoId, token: Option<&str>) -> Result<()> {
        let ticket = self.open(id);

        let liked = async {
            match token {
                Some(token) => api.check_liked(id, token).await,
                None => Ok(false),
            }
        };

        let (video, comments, liked) = join3(api.get_video(id), api.list_comments(id), liked)
            .instrument(tracing::debug_span!("player_load", video_id = id))
            .await;

        let outcome = video.as_ref().map(|_| ()).map_err(ClientError::clone);
        self.apply_video(ticket, video);
        self.apply_comments(ticket, comments);
        self.apply_liked(ticket, liked);
        outcome
    }

    fn accept(&self, ticket: PlayerTicket, what: &str) -> bool {
        if self.is_current(ticket) {
            return true;
        }
        tracing::debug!(
            video_id = ticket.video_id,
            ticket = ticket.generation,
            current = self.generation,
            response = what,
            "dropping stale player response"
        );
        false
    }

    fn record_error(&mut self, err: &ClientError) {
        tracing::warn!(error = %err, "player request failed");
        self.error = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn video(id: VideoId) -> Video {
        Video {
            id,
            title: format!("video {id}"),
            description: String::new(),
            category: "Other".to_string(),
            duration: "2:00".to_string(),
            uploader: "alice".to_string(),
            uploader_id: 1,
            likes: vec![2, 3],
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn responses_for_current_ticket_apply() {
        let mut player = Player::new();
        let ticket = player.open(4);

        assert!(player.apply_video(ticket, Ok(video(4))));
        assert!(player.apply_liked(ticket, Ok(true)));
        assert_eq!(player.video().map(|v| v.id), Some(4));
        assert!(player.is_liked());
    }

    #[test]
    fn reopening_makes_earlier_responses_stale() {
        let mut player = Player::new();
        let first = player.open(1);
        let second = player.open(2);

        assert!(!player.apply_video(first, Ok(video(1))));
        assert!(player.video().is_none());

        assert!(player.apply_video(second, Ok(video(2))));
        assert_eq!(player.video_id(), Some(2));
    }

    #[test]
    fn reopening_same_video_still_invalidates() {
        let mut player = Player::new();
        let first = player.open(1);
        let _second = player.open(1);
        assert!(!player.apply_liked(first, Ok(true)));
        assert!(!player.is_liked());
    }

    #[test]
    fn closed_player_ignores_everything() {
        let mut player = Player::new();
        let ticket = player.open(1);
        player.close();

        assert!(!player.apply_comments(ticket, Ok(vec![])));
        assert_eq!(player.ticket(), None);
    }

    #[test]
    fn failed_video_fetch_is_recorded() {
        let mut player = Player::new();
        let ticket = player.open(9);
        player.apply_video(ticket, Err(ClientError::NotFound("video 9".into())));

        assert!(player.video().is_none());
        assert!(player.error().is_some_and(|e| e.contains("video 9")));
    }

    #[test]
    fn failed_like_check_reads_as_not_liked() {
        let mut player = Player::new();
        let ticket = player.open(1);
        player.apply_liked(ticket, Err(ClientError::Network("offline".into())));
        assert!(!player.is_liked());
    }
}
