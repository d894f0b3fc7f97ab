//! API worker and concurrent dispatcher.
//!
//! [`ApiWorker`] turns one [`ApiRequest`] into one [`ApiResponse`] by calling
//! the backend. [`Dispatcher`] runs any number of those calls concurrently
//! and yields their responses in completion order, which is the only
//! ordering the event loop may rely on.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use tracing::Instrument;

use crate::api::VideoApi;
use crate::domain::error::Result;
use crate::worker::{ApiRequest, ApiResponse};

/// Executes backend requests on behalf of the event loop.
#[derive(Clone)]
pub struct ApiWorker {
    api: Arc<dyn VideoApi>,
}

impl std::fmt::Debug for ApiWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiWorker").finish_non_exhaustive()
    }
}

impl ApiWorker {
    #[must_use]
    pub fn new(api: Arc<dyn VideoApi>) -> Self {
        Self { api }
    }

    /// Logs the outcome of one backend call and wraps it into a response.
    fn handle_api_result<T, F>(operation: &str, result: Result<T>, wrap: F) -> ApiResponse
    where
        F: FnOnce(Result<T>) -> ApiResponse,
    {
        match &result {
            Ok(_) => tracing::debug!(operation = operation, "api request succeeded"),
            Err(e) => tracing::debug!(operation = operation, error = %e, "api request failed"),
        }
        wrap(result)
    }

    /// Performs `request` against the backend.
    pub async fn handle_request(&self, request: ApiRequest) -> ApiResponse {
        let operation = request.name();
        let api = self.api.as_ref();

        match request {
            ApiRequest::Login { credentials } => Self::handle_api_result(
                operation,
                api.login(&credentials).await,
                ApiResponse::LoggedIn,
            ),
            ApiRequest::Register { form } => Self::handle_api_result(
                operation,
                api.register(&form).await,
                ApiResponse::Registered,
            ),
            ApiRequest::ForgotPassword { form } => Self::handle_api_result(
                operation,
                api.forgot_password(&form).await,
                ApiResponse::PasswordResetRequested,
            ),
            ApiRequest::ResetPassword { form } => Self::handle_api_result(
                operation,
                api.reset_password(&form).await,
                ApiResponse::PasswordResetCompleted,
            ),
            ApiRequest::LoadCatalog { ticket } => {
                Self::handle_api_result(operation, api.list_videos().await, |result| {
                    ApiResponse::CatalogLoaded { ticket, result }
                })
            }
            ApiRequest::LoadVideo { ticket } => {
                Self::handle_api_result(operation, api.get_video(ticket.video_id()).await, |result| {
                    ApiResponse::VideoLoaded { ticket, result }
                })
            }
            ApiRequest::LoadComments { ticket } => Self::handle_api_result(
                operation,
                api.list_comments(ticket.video_id()).await,
                |result| ApiResponse::CommentsLoaded { ticket, result },
            ),
            ApiRequest::CheckLiked { ticket, token } => Self::handle_api_result(
                operation,
                api.check_liked(ticket.video_id(), &token).await,
                |result| ApiResponse::LikeChecked { ticket, result },
            ),
            ApiRequest::ToggleLike { ticket, token } => Self::handle_api_result(
                operation,
                api.toggle_like(ticket.video_id(), &token).await,
                |result| ApiResponse::LikeToggled { ticket, result },
            ),
            ApiRequest::PostComment { ticket, text, token } => Self::handle_api_result(
                operation,
                api.post_comment(ticket.video_id(), &text, &token).await,
                |result| ApiResponse::CommentPosted { ticket, result },
            ),
            ApiRequest::DeleteComment {
                ticket,
                comment,
                token,
            } => Self::handle_api_result(
                operation,
                api.delete_comment(comment, &token).await,
                |result| ApiResponse::CommentDeleted { ticket, result },
            ),
            ApiRequest::Upload { form, token } => Self::handle_api_result(
                operation,
                api.upload(&form, &token).await,
                ApiResponse::Uploaded,
            ),
            ApiRequest::DeleteVideo { id, token } => {
                Self::handle_api_result(operation, api.delete_video(id, &token).await, |result| {
                    ApiResponse::VideoDeleted { id, result }
                })
            }
        }
    }
}

/// Runs API requests concurrently and yields responses as they complete.
///
/// Every submitted request runs inside an `api_request` span parented to the
/// span active at submission, so backend calls show up under the event that
/// caused them.
pub struct Dispatcher {
    worker: ApiWorker,
    in_flight: FuturesUnordered<BoxFuture<'static, ApiResponse>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new(api: Arc<dyn VideoApi>) -> Self {
        Self {
            worker: ApiWorker::new(api),
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Starts `request`. It makes progress whenever
    /// [`next_response`](Self::next_response) is awaited.
    pub fn submit(&mut self, request: ApiRequest) {
        let span = tracing::debug_span!("api_request", request = request.name());
        tracing::debug!(request = request.name(), in_flight = self.in_flight.len(), "dispatching");

        let worker = self.worker.clone();
        self.in_flight
            .push(async move { worker.handle_request(request).await }.instrument(span).boxed());
    }

    /// Waits for the next request to finish. Returns `None` when nothing is
    /// in flight.
    pub async fn next_response(&mut self) -> Option<ApiResponse> {
        self.in_flight.next().await
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}
