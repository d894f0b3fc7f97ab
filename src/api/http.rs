//! `reqwest`-backed implementation of [`VideoApi`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::backend::VideoApi;
use super::models::{ErrorBody, LikeStatus, LikedResponse, LoginResponse, MessageResponse, UploadResponse};
use crate::domain::error::{ClientError, Result};
use crate::domain::{
    Comment, CommentId, Credentials, ForgotPassword, PasswordReset, Registration, UploadForm,
    Video, VideoId,
};

/// Default API root of a locally running backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

const USER_AGENT: &str = concat!("abtube/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the video-sharing backend.
///
/// No retries and no custom timeout: a failed request surfaces to the caller
/// immediately.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends `request` and decodes a JSON body, mapping non-2xx statuses onto
    /// the error taxonomy.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.message())
                .unwrap_or_else(|_| {
                    if body.is_empty() {
                        status.canonical_reason().unwrap_or("request failed").to_string()
                    } else {
                        body
                    }
                });
            tracing::debug!(status = status.as_u16(), detail = %detail, "backend returned an error");
            return Err(ClientError::from_status(status.as_u16(), detail));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Network(format!("failed to decode response: {e}")))
    }
}

#[async_trait]
impl VideoApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let request = self.client.post(self.url("login")).form(&[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ]);
        self.send(request).await
    }

    async fn register(&self, form: &Registration) -> Result<MessageResponse> {
        let request = self.client.post(self.url("register")).form(&[
            ("username", form.username.as_str()),
            ("email", form.email.as_str()),
            ("password", form.password.as_str()),
        ]);
        self.send(request).await
    }

    async fn forgot_password(&self, form: &ForgotPassword) -> Result<MessageResponse> {
        let request = self
            .client
            .post(self.url("forgot-password"))
            .form(&[("email", form.email.as_str())]);
        self.send(request).await
    }

    async fn reset_password(&self, form: &PasswordReset) -> Result<MessageResponse> {
        let request = self.client.post(self.url("reset-password")).form(&[
            ("token", form.token.as_str()),
            ("new_password", form.new_password.as_str()),
        ]);
        self.send(request).await
    }

    async fn list_videos(&self) -> Result<Vec<Video>> {
        self.send(self.client.get(self.url("videos"))).await
    }

    async fn upload(&self, form: &UploadForm, token: &str) -> Result<UploadResponse> {
        let bytes = tokio::fs::read(&form.file).await.map_err(|e| {
            ClientError::Validation(format!("cannot read {}: {e}", form.file.display()))
        })?;

        let file = Part::bytes(bytes)
            .file_name(form.file_name())
            .mime_str("video/mp4")?;

        let body = Form::new()
            .text("title", form.title.clone())
            .text("description", form.description.clone())
            .text("category", form.category.clone())
            .text("duration", form.duration.clone())
            .text("token", token.to_string())
            .part("file", file);

        self.send(self.client.post(self.url("upload")).multipart(body)).await
    }

    async fn delete_video(&self, id: VideoId, token: &str) -> Result<MessageResponse> {
        let request = self
            .client
            .delete(self.url(&format!("video/{id}")))
            .form(&[("token", token)]);
        self.send(request).await
    }

    async fn toggle_like(&self, id: VideoId, token: &str) -> Result<LikeStatus> {
        let request = self
            .client
            .post(self.url(&format!("like/{id}")))
            .form(&[("token", token)]);
        self.send(request).await
    }

    async fn check_liked(&self, id: VideoId, token: &str) -> Result<bool> {
        let request = self
            .client
            .post(self.url(&format!("liked/{id}")))
            .form(&[("token", token)]);
        let response: LikedResponse = self.send(request).await?;
        Ok(response.liked)
    }

    async fn list_comments(&self, video: VideoId) -> Result<Vec<Comment>> {
        self.send(self.client.get(self.url(&format!("comment/{video}")))).await
    }

    async fn post_comment(&self, video: VideoId, text: &str, token: &str) -> Result<MessageResponse> {
        let request = self
            .client
            .post(self.url(&format!("comment/{video}")))
            .form(&[("token", token), ("comment", text)]);
        self.send(request).await
    }

    async fn delete_comment(&self, comment: CommentId, token: &str) -> Result<MessageResponse> {
        let request = self
            .client
            .delete(self.url(&format!("comment/{comment}")))
            .form(&[("token", token)]);
        self.send(request).await
    }

    fn stream_url(&self, id: VideoId) -> String {
        self.url(&format!("video/{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_without_double_slashes() {
        let api = HttpApi::new("http://localhost:8000/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000/api");
        assert_eq!(api.url("/videos"), "http://localhost:8000/api/videos");
        assert_eq!(api.stream_url(12), "http://localhost:8000/api/video/12");
    }
}
