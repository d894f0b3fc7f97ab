//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state holders are mutated in response
//! to the outside world. It runs synchronously on the event loop and
//! returns the backend requests the event calls for.
//!
//! # Architecture
//!
//! 1. Events arrive from the front-end or, as [`Event::WorkerResponse`],
//!    from the dispatcher
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via the state holders' methods
//! 4. Actions are collected and returned for execution
//!
//! # Errors
//!
//! Failures detectable before any request is sent (blank fields, missing
//! session, no open video) are returned as `Err` and leave state untouched.
//! Failures reported by the backend arrive later as responses and are
//! recorded on [`AppState::alert`].
//!
//! # Example
//!
//! ```
//! use abtube::app::{handle_event, AppState, Event};
//! use abtube::storage::MemoryStore;
//! use abtube::ui::Theme;
//!
//! let mut state = AppState::new(Box::new(MemoryStore::new()), Theme::dark());
//! let (render, actions) = handle_event(&mut state, &Event::RefreshCatalog)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), abtube::domain::ClientError>(())
//! ```

use crate::api::MessageResponse;
use crate::app::{Action, AppState, PlayerTicket};
use crate::domain::error::{ClientError, Result};
use crate::domain::{
    CommentId, Credentials, ForgotPassword, PasswordReset, Registration, UploadForm, VideoId,
};
use crate::worker::{ApiRequest, ApiResponse};

/// Events triggered by user input or backend responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LoginSubmitted(Credentials),
    LogoutRequested,
    RegisterSubmitted(Registration),
    ForgotPasswordSubmitted(ForgotPassword),
    ResetPasswordSubmitted(PasswordReset),

    /// Re-fetches the catalog. Any load still in flight becomes stale.
    RefreshCatalog,
    /// Replaces the search term; every keystroke recomputes.
    SearchChanged(String),
    CategorySelected(String),

    /// Opens a video in the player, replacing whatever was open.
    OpenVideo(VideoId),
    CloseVideo,
    /// Likes or unlikes the open video.
    ToggleLike,
    /// Posts a comment on the open video.
    CommentSubmitted(String),
    /// Deletes a comment of the open video.
    DeleteComment(CommentId),

    UploadSubmitted(UploadForm),
    DeleteVideo(VideoId),

    /// Switches between the built-in dark and light themes.
    ToggleTheme,

    /// Wraps a response from the dispatcher.
    WorkerResponse(ApiResponse),
}

impl Event {
    /// Span field value; never includes credentials.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoginSubmitted(_) => "login_submitted",
            Self::LogoutRequested => "logout_requested",
            Self::RegisterSubmitted(_) => "register_submitted",
            Self::ForgotPasswordSubmitted(_) => "forgot_password_submitted",
            Self::ResetPasswordSubmitted(_) => "reset_password_submitted",
            Self::RefreshCatalog => "refresh_catalog",
            Self::SearchChanged(_) => "search_changed",
            Self::CategorySelected(_) => "category_selected",
            Self::OpenVideo(_) => "open_video",
            Self::CloseVideo => "close_video",
            Self::ToggleLike => "toggle_like",
            Self::CommentSubmitted(_) => "comment_submitted",
            Self::DeleteComment(_) => "delete_comment",
            Self::UploadSubmitted(_) => "upload_submitted",
            Self::DeleteVideo(_) => "delete_video",
            Self::ToggleTheme => "toggle_theme",
            Self::WorkerResponse(response) => response.name(),
        }
    }
}

fn post(request: ApiRequest) -> Action {
    Action::PostToWorker(request)
}

/// Ticket of the open video, for actions that only need an id.
fn open_ticket(state: &AppState) -> Result<PlayerTicket> {
    state
        .player
        .ticket()
        .ok_or_else(|| ClientError::Validation("no video is open".to_string()))
}

/// Ticket of the open video, for actions that need its detail loaded.
fn loaded_ticket(state: &AppState) -> Result<PlayerTicket> {
    let ticket = open_ticket(state)?;
    if state.player.video().is_none() {
        return Err(ClientError::Validation("the video has not loaded".to_string()));
    }
    Ok(ticket)
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`: whether visible state changed, and the
/// requests to dispatch.
///
/// # Errors
///
/// - [`ClientError::Validation`] for blank or malformed input, or when the
///   event needs an open video and none is
/// - [`ClientError::Auth`] when the event needs a session and none exists
///
/// Worker responses never produce an error.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::LoginSubmitted(credentials) => {
            credentials.validate()?;
            state.clear_messages();
            Ok((true, vec![post(ApiRequest::Login {
                credentials: credentials.clone(),
            })]))
        }
        Event::LogoutRequested => {
            state.session.logout();
            state.player.clear_like();
            state.clear_messages();
            state.set_notice("Logged out");
            Ok((true, vec![]))
        }
        Event::RegisterSubmitted(form) => {
            form.validate()?;
            state.clear_messages();
            Ok((true, vec![post(ApiRequest::Register { form: form.clone() })]))
        }
        Event::ForgotPasswordSubmitted(form) => {
            form.validate()?;
            state.clear_messages();
            Ok((true, vec![post(ApiRequest::ForgotPassword { form: form.clone() })]))
        }
        Event::ResetPasswordSubmitted(form) => {
            form.validate()?;
            state.clear_messages();
            Ok((true, vec![post(ApiRequest::ResetPassword { form: form.clone() })]))
        }
        Event::RefreshCatalog => {
            let ticket = state.catalog.begin_load();
            Ok((true, vec![post(ApiRequest::LoadCatalog { ticket })]))
        }
        Event::SearchChanged(term) => {
            if state.catalog.search_term() == term.as_str() {
                return Ok((false, vec![]));
            }
            state.catalog.set_search_term(term.clone());
            tracing::trace!(term = %term, "search term updated");
            Ok((true, vec![]))
        }
        Event::CategorySelected(category) => {
            if state.catalog.selected_category() == category.as_str() {
                return Ok((false, vec![]));
            }
            state.catalog.set_category(category.clone());
            Ok((true, vec![]))
        }
        Event::OpenVideo(id) => {
            let ticket = state.player.open(*id);
            let mut actions = vec![
                post(ApiRequest::LoadVideo { ticket }),
                post(ApiRequest::LoadComments { ticket }),
            ];
            if let Some(token) = state.session.token() {
                actions.push(post(ApiRequest::CheckLiked {
                    ticket,
                    token: token.to_string(),
                }));
            }
            Ok((true, actions))
        }
        Event::CloseVideo => {
            state.player.close();
            Ok((true, vec![]))
        }
        Event::ToggleLike => {
            let token = state.session.require_token()?.to_string();
            let ticket = loaded_ticket(state)?;
            state.clear_messages();
            Ok((false, vec![post(ApiRequest::ToggleLike { ticket, token })]))
        }
        Event::CommentSubmitted(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ClientError::Validation("comment cannot be empty".to_string()));
            }
            let token = state.session.require_token()?.to_string();
            let ticket = open_ticket(state)?;
            state.clear_messages();
            Ok((false, vec![post(ApiRequest::PostComment {
                ticket,
                text: text.to_string(),
                token,
            })]))
        }
        Event::DeleteComment(comment) => {
            let token = state.session.require_token()?.to_string();
            let ticket = open_ticket(state)?;
            state.clear_messages();
            Ok((false, vec![post(ApiRequest::DeleteComment {
                ticket,
                comment: *comment,
                token,
            })]))
        }
        Event::UploadSubmitted(form) => {
            let token = state.session.require_token()?.to_string();
            form.validate()?;
            state.clear_messages();
            tracing::debug!(title = %form.title, category = %form.category, "uploading video");
            Ok((false, vec![post(ApiRequest::Upload {
                form: form.clone(),
                token,
            })]))
        }
        Event::DeleteVideo(id) => {
            let token = state.session.require_token()?.to_string();
            state.clear_messages();
            Ok((false, vec![post(ApiRequest::DeleteVideo { id: *id, token })]))
        }
        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
            tracing::debug!(theme = %state.theme.name, "theme toggled");
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => Ok(handle_response(state, response)),
    }
}

/// Shows the server's confirmation or the error.
fn apply_message(state: &mut AppState, result: &Result<MessageResponse>) -> (bool, Vec<Action>) {
    match result {
        Ok(response) => state.set_notice(response.message.clone()),
        Err(e) => state.set_alert(e),
    }
    (true, vec![])
}

/// Re-fetches the catalog after a change on the server.
fn refresh_catalog(state: &mut AppState) -> Action {
    post(ApiRequest::LoadCatalog {
        ticket: state.catalog.begin_load(),
    })
}

#[allow(clippy::too_many_lines)]
fn handle_response(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    match response {
        ApiResponse::LoggedIn(result) => match state.session.complete_login(result.clone()) {
            Ok(_) => {
                state.set_notice("Logged in");
                let actions = state
                    .player
                    .ticket()
                    .zip(state.session.token())
                    .map(|(ticket, token)| {
                        post(ApiRequest::CheckLiked {
                            ticket,
                            token: token.to_string(),
                        })
                    })
                    .into_iter()
                    .collect();
                (true, actions)
            }
            Err(e) => {
                state.set_alert(&ClientError::from(e));
                (true, vec![])
            }
        },
        ApiResponse::Registered(result)
        | ApiResponse::PasswordResetRequested(result)
        | ApiResponse::PasswordResetCompleted(result) => apply_message(state, result),

        ApiResponse::CatalogLoaded { ticket, result } => {
            (state.catalog.finish_load(*ticket, result.clone()), vec![])
        }
        ApiResponse::VideoLoaded { ticket, result } => {
            (state.player.apply_video(*ticket, result.clone()), vec![])
        }
        ApiResponse::CommentsLoaded { ticket, result } => {
            (state.player.apply_comments(*ticket, result.clone()), vec![])
        }
        // Like state belongs to the session; answers arriving after logout are dropped.
        ApiResponse::LikeChecked { .. } | ApiResponse::LikeToggled { .. }
            if !state.session.is_authenticated() =>
        {
            tracing::debug!(response = response.name(), "like response after logout, ignoring");
            (false, vec![])
        }
        ApiResponse::LikeChecked { ticket, result } => {
            (state.player.apply_liked(*ticket, result.clone()), vec![])
        }
        ApiResponse::LikeToggled { ticket, result } => match result {
            Ok(status) => {
                if !state.player.apply_like_toggled(*ticket, *status) {
                    return (false, vec![]);
                }
                tracing::debug!(liked = status.liked, likes = status.likes, "like toggled");
                (true, vec![post(ApiRequest::LoadVideo { ticket: *ticket })])
            }
            Err(e) => {
                state.set_alert(e);
                (true, vec![])
            }
        },
        ApiResponse::CommentPosted { ticket, result } | ApiResponse::CommentDeleted { ticket, result } => {
            let (render, mut actions) = apply_message(state, result);
            if result.is_ok() && state.player.is_current(*ticket) {
                actions.push(post(ApiRequest::LoadComments { ticket: *ticket }));
            }
            (render, actions)
        }
        ApiResponse::Uploaded(result) => match result {
            Ok(response) => {
                tracing::info!(video_id = response.video_id, "video uploaded");
                state.set_notice(format!("Uploaded video {}", response.video_id));
                (true, vec![refresh_catalog(state)])
            }
            Err(e) => {
                state.set_alert(e);
                (true, vec![])
            }
        },
        ApiResponse::VideoDeleted { id, result } => match result {
            Ok(_) => {
                tracing::info!(video_id = id, "video deleted");
                if state.player.video_id() == Some(*id) {
                    state.player.close();
                }
                state.set_notice(format!("Deleted video {id}"));
                (true, vec![refresh_catalog(state)])
            }
            Err(e) => {
                state.set_alert(e);
                (true, vec![])
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LikeStatus, LoginResponse};
    use crate::domain::{AuthError, Video};
    use crate::storage::{MemoryStore, ACCESS_TOKEN_KEY};
    use crate::ui::Theme;
    use chrono::NaiveDate;

    fn guest() -> AppState {
        AppState::new(Box::new(MemoryStore::new()), Theme::dark())
    }

    fn logged_in() -> AppState {
        AppState::new(Box::new(MemoryStore::with_entry(ACCESS_TOKEN_KEY, "alice")), Theme::dark())
    }

    fn video(id: i64) -> Video {
        Video {
            id,
            title: "Cat Facts".to_string(),
            description: String::new(),
            category: "Other".to_string(),
            duration: "1:00".to_string(),
            uploader: "alice".to_string(),
            uploader_id: 1,
            likes: vec![],
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn requests(actions: Vec<Action>) -> Vec<ApiRequest> {
        actions
            .into_iter()
            .map(|Action::PostToWorker(request)| request)
            .collect()
    }

    #[test]
    fn blank_login_is_rejected_before_any_request() {
        let mut state = guest();
        let err = handle_event(&mut state, &Event::LoginSubmitted(Credentials::new("", "pw"))).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn login_response_updates_session() {
        let mut state = guest();
        let response = ApiResponse::LoggedIn(Ok(LoginResponse {
            access_token: "alice".to_string(),
            token_type: None,
        }));
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        assert_eq!(state.session.token(), Some("alice"));
        assert_eq!(state.notice.as_deref(), Some("Logged in"));
    }

    #[test]
    fn rejected_login_raises_alert_and_keeps_session() {
        let mut state = logged_in();
        let response = ApiResponse::LoggedIn(Err(ClientError::from_status(401, "Invalid username or password".into())));
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();

        assert_eq!(state.session.token(), Some("alice"));
        assert_eq!(
            state.alert,
            Some(ClientError::Auth(AuthError::InvalidCredentials).to_string())
        );
    }

    #[test]
    fn opening_a_video_requests_like_status_only_with_session() {
        let mut state = guest();
        let (_, actions) = handle_event(&mut state, &Event::OpenVideo(3)).unwrap();
        assert_eq!(actions.len(), 2);

        let mut state = logged_in();
        let (_, actions) = handle_event(&mut state, &Event::OpenVideo(3)).unwrap();
        let requests = requests(actions);
        assert_eq!(requests.len(), 3);
        assert!(matches!(&requests[2], ApiRequest::CheckLiked { token, .. } if token == "alice"));
    }

    #[test]
    fn guarded_actions_need_a_session() {
        let mut state = guest();
        handle_event(&mut state, &Event::OpenVideo(3)).unwrap();

        for event in [
            Event::ToggleLike,
            Event::CommentSubmitted("nice".to_string()),
            Event::DeleteComment(1),
            Event::DeleteVideo(3),
        ] {
            let err = handle_event(&mut state, &event).unwrap_err();
            assert!(
                matches!(err, ClientError::Auth(AuthError::NotAuthenticated(_))),
                "{event:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn blank_comment_is_rejected() {
        let mut state = logged_in();
        handle_event(&mut state, &Event::OpenVideo(3)).unwrap();
        let err = handle_event(&mut state, &Event::CommentSubmitted("   ".to_string())).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn like_needs_loaded_video() {
        let mut state = logged_in();
        assert!(handle_event(&mut state, &Event::ToggleLike).is_err());

        let (_, actions) = handle_event(&mut state, &Event::OpenVideo(3)).unwrap();
        assert!(handle_event(&mut state, &Event::ToggleLike).is_err());

        let ticket = match &requests(actions)[0] {
            ApiRequest::LoadVideo { ticket } => *ticket,
            other => panic!("unexpected {other:?}"),
        };
        let loaded = ApiResponse::VideoLoaded { ticket, result: Ok(video(3)) };
        handle_event(&mut state, &Event::WorkerResponse(loaded)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::ToggleLike).unwrap();
        assert!(matches!(requests(actions)[0], ApiRequest::ToggleLike { .. }));
    }

    #[test]
    fn like_toggle_applies_and_reloads_video() {
        let mut state = logged_in();
        let ticket = state.player.open(3);

        let toggled = ApiResponse::LikeToggled {
            ticket,
            result: Ok(LikeStatus { liked: true, likes: 4 }),
        };
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(toggled)).unwrap();

        assert!(render);
        assert!(state.player.is_liked());
        assert_eq!(requests(actions), vec![ApiRequest::LoadVideo { ticket }]);
    }

    #[test]
    fn stale_like_toggle_is_ignored() {
        let mut state = logged_in();
        let old = state.player.open(3);
        state.player.open(4);

        let toggled = ApiResponse::LikeToggled {
            ticket: old,
            result: Ok(LikeStatus { liked: true, likes: 1 }),
        };
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(toggled)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(!state.player.is_liked());
    }

    #[test]
    fn deleting_the_open_video_closes_player_and_refreshes() {
        let mut state = logged_in();
        state.player.open(3);

        let deleted = ApiResponse::VideoDeleted {
            id: 3,
            result: Ok(MessageResponse { message: "Video deleted".to_string() }),
        };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(deleted)).unwrap();

        assert!(state.player.ticket().is_none());
        assert!(matches!(requests(actions)[0], ApiRequest::LoadCatalog { .. }));
        assert!(state.catalog.is_loading());
    }

    #[test]
    fn forbidden_delete_raises_alert() {
        let mut state = logged_in();
        let deleted = ApiResponse::VideoDeleted {
            id: 3,
            result: Err(ClientError::Forbidden("Not authorized to delete this video".to_string())),
        };
        handle_event(&mut state, &Event::WorkerResponse(deleted)).unwrap();
        assert!(state.alert.as_deref().is_some_and(|a| a.contains("Not authorized")));
    }

    #[test]
    fn unchanged_search_term_skips_render() {
        let mut state = guest();
        let (render, _) = handle_event(&mut state, &Event::SearchChanged(String::new())).unwrap();
        assert!(!render);
        let (render, _) = handle_event(&mut state, &Event::SearchChanged("c".to_string())).unwrap();
        assert!(render);
    }

    #[test]
    fn logout_clears_session_and_like() {
        let mut state = logged_in();
        let ticket = state.player.open(1);
        state.player.apply_liked(ticket, Ok(true));

        handle_event(&mut state, &Event::LogoutRequested).unwrap();
        assert!(!state.session.is_authenticated());
        assert!(!state.player.is_liked());
    }

    #[test]
    fn like_answers_arriving_after_logout_are_dropped() {
        let mut state = logged_in();
        let (_, actions) = handle_event(&mut state, &Event::OpenVideo(1)).unwrap();
        let ticket = match requests(actions).pop() {
            Some(ApiRequest::CheckLiked { ticket, .. }) => ticket,
            other => panic!("unexpected {other:?}"),
        };

        handle_event(&mut state, &Event::LogoutRequested).unwrap();

        let checked = ApiResponse::LikeChecked { ticket, result: Ok(true) };
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(checked)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(!state.player.is_liked());

        let toggled = ApiResponse::LikeToggled {
            ticket,
            result: Ok(LikeStatus { liked: true, likes: 2 }),
        };
        let (render, actions) = handle_event(&mut state, &Event::WorkerResponse(toggled)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(!state.player.is_liked());
    }
}
