//! Backend API abstraction.
//!
//! [`VideoApi`] lists exactly the HTTP operations the client consumes. The
//! backend itself is a black box; [`HttpApi`](crate::api::HttpApi) is the real
//! implementation and tests substitute in-memory fakes.

use async_trait::async_trait;

use super::models::{LikeStatus, LoginResponse, MessageResponse, UploadResponse};
use crate::domain::error::{ClientError, Result};
use crate::domain::{
    Comment, CommentId, Credentials, ForgotPassword, PasswordReset, Registration, UploadForm,
    Video, VideoId,
};

/// Operations offered by the video-sharing backend.
///
/// Methods taking a `token` send it in the request body the way the backend
/// expects; they never read the local store themselves.
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// `POST /login`.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// `POST /register`.
    async fn register(&self, form: &Registration) -> Result<MessageResponse>;

    /// `POST /forgot-password`.
    async fn forgot_password(&self, form: &ForgotPassword) -> Result<MessageResponse>;

    /// `POST /reset-password`.
    async fn reset_password(&self, form: &PasswordReset) -> Result<MessageResponse>;

    /// `GET /videos`: the full catalog.
    async fn list_videos(&self) -> Result<Vec<Video>>;

    /// Detail for one video.
    ///
    /// `GET /video/{id}` streams the media file rather than metadata, so the
    /// detail is derived from the listing.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] when no listed video has `id`.
    async fn get_video(&self, id: VideoId) -> Result<Video> {
        self.list_videos()
            .await?
            .into_iter()
            .find(|video| video.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("video {id}")))
    }

    /// `POST /upload` (multipart).
    async fn upload(&self, form: &UploadForm, token: &str) -> Result<UploadResponse>;

    /// `DELETE /video/{id}`.
    async fn delete_video(&self, id: VideoId, token: &str) -> Result<MessageResponse>;

    /// `POST /like/{id}`: toggles the caller's like.
    async fn toggle_like(&self, id: VideoId, token: &str) -> Result<LikeStatus>;

    /// `POST /liked/{id}`: whether the caller currently likes the video.
    async fn check_liked(&self, id: VideoId, token: &str) -> Result<bool>;

    /// `GET /comment/{video_id}`.
    async fn list_comments(&self, video: VideoId) -> Result<Vec<Comment>>;

    /// `POST /comment/{video_id}`.
    async fn post_comment(&self, video: VideoId, text: &str, token: &str) -> Result<MessageResponse>;

    /// `DELETE /comment/{comment_id}`.
    async fn delete_comment(&self, comment: CommentId, token: &str) -> Result<MessageResponse>;

    /// URL from which the media for `id` can be streamed.
    fn stream_url(&self, id: VideoId) -> String;
}
