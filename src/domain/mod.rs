//! Domain layer for the ABTube client.
//!
//! Core types shared by every other layer, independent of HTTP, storage or
//! rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`video`]: Video model, categories
//! - [`comment`]: Comment model
//! - [`forms`]: User-submitted forms with client-side validation
//! - [`Session`]: The authenticated session handle
//!
//! # Examples
//!
//! ```
//! use abtube::domain::{Credentials, Result};
//!
//! fn check() -> Result<()> {
//!     Credentials::new("alice", "secret").validate()
//! }
//! # check().unwrap();
//! ```

pub mod comment;
pub mod error;
pub mod forms;
pub mod video;

pub use comment::{Comment, CommentId};
pub use error::{AuthError, ClientError, Result};
pub use forms::{Credentials, ForgotPassword, PasswordReset, Registration, UploadForm};
pub use video::{UserId, Video, VideoId, ALL_CATEGORIES, CATEGORIES, DEFAULT_CATEGORY};

/// An authenticated session, identified solely by its opaque token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
}
