//! Request/response protocol between the event loop and the API worker.
//!
//! The event handler never calls the backend itself: it emits an
//! [`ApiRequest`], the dispatcher executes it, and the outcome comes back as
//! an [`ApiResponse`]. Requests feeding a view-model carry the ticket they
//! were issued under so the reply can be matched against the current
//! generation.

use crate::api::{LikeStatus, LoginResponse, MessageResponse, UploadResponse};
use crate::app::{LoadTicket, PlayerTicket};
use crate::domain::error::Result;
use crate::domain::{
    Comment, CommentId, Credentials, ForgotPassword, PasswordReset, Registration, UploadForm,
    Video, VideoId,
};

/// Backend operations the event loop can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Login {
        credentials: Credentials,
    },
    Register {
        form: Registration,
    },
    ForgotPassword {
        form: ForgotPassword,
    },
    ResetPassword {
        form: PasswordReset,
    },

    /// Fetch the full catalog.
    LoadCatalog {
        ticket: LoadTicket,
    },

    /// Fetch the open video's detail.
    LoadVideo {
        ticket: PlayerTicket,
    },
    /// Fetch the open video's comments.
    LoadComments {
        ticket: PlayerTicket,
    },
    /// Ask whether the session user likes the open video.
    CheckLiked {
        ticket: PlayerTicket,
        token: String,
    },
    ToggleLike {
        ticket: PlayerTicket,
        token: String,
    },
    PostComment {
        ticket: PlayerTicket,
        text: String,
        token: String,
    },
    DeleteComment {
        ticket: PlayerTicket,
        comment: CommentId,
        token: String,
    },

    Upload {
        form: UploadForm,
        token: String,
    },
    DeleteVideo {
        id: VideoId,
        token: String,
    },
}

impl ApiRequest {
    /// Short name used as a span field; never includes tokens or passwords.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::ForgotPassword { .. } => "forgot_password",
            Self::ResetPassword { .. } => "reset_password",
            Self::LoadCatalog { .. } => "load_catalog",
            Self::LoadVideo { .. } => "load_video",
            Self::LoadComments { .. } => "load_comments",
            Self::CheckLiked { .. } => "check_liked",
            Self::ToggleLike { .. } => "toggle_like",
            Self::PostComment { .. } => "post_comment",
            Self::DeleteComment { .. } => "delete_comment",
            Self::Upload { .. } => "upload",
            Self::DeleteVideo { .. } => "delete_video",
        }
    }
}

/// Outcomes delivered back to the event loop, one per [`ApiRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    LoggedIn(Result<LoginResponse>),
    Registered(Result<MessageResponse>),
    PasswordResetRequested(Result<MessageResponse>),
    PasswordResetCompleted(Result<MessageResponse>),

    CatalogLoaded {
        ticket: LoadTicket,
        result: Result<Vec<Video>>,
    },

    VideoLoaded {
        ticket: PlayerTicket,
        result: Result<Video>,
    },
    CommentsLoaded {
        ticket: PlayerTicket,
        result: Result<Vec<Comment>>,
    },
    LikeChecked {
        ticket: PlayerTicket,
        result: Result<bool>,
    },
    LikeToggled {
        ticket: PlayerTicket,
        result: Result<LikeStatus>,
    },
    CommentPosted {
        ticket: PlayerTicket,
        result: Result<MessageResponse>,
    },
    CommentDeleted {
        ticket: PlayerTicket,
        result: Result<MessageResponse>,
    },

    Uploaded(Result<UploadResponse>),
    VideoDeleted {
        id: VideoId,
        result: Result<MessageResponse>,
    },
}

impl ApiResponse {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoggedIn(_) => "logged_in",
            Self::Registered(_) => "registered",
            Self::PasswordResetRequested(_) => "password_reset_requested",
            Self::PasswordResetCompleted(_) => "password_reset_completed",
            Self::CatalogLoaded { .. } => "catalog_loaded",
            Self::VideoLoaded { .. } => "video_loaded",
            Self::CommentsLoaded { .. } => "comments_loaded",
            Self::LikeChecked { .. } => "like_checked",
            Self::LikeToggled { .. } => "like_toggled",
            Self::CommentPosted { .. } => "comment_posted",
            Self::CommentDeleted { .. } => "comment_deleted",
            Self::Uploaded(_) => "uploaded",
            Self::VideoDeleted { .. } => "video_deleted",
        }
    }
}
