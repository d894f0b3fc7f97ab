//! User-submitted form payloads and their client-side checks.
//!
//! Each form validates the required fields before anything is sent, so an
//! obviously incomplete submission fails with [`ClientError::Validation`]
//! instead of a round trip.

use std::fmt;
use std::path::PathBuf;

use super::error::{ClientError, Result};
use super::video::DEFAULT_CATEGORY;

/// Minimum password length accepted by the register and reset forms.
pub const MIN_PASSWORD_LEN: usize = 6;

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn valid_email(email: &str) -> Result<()> {
    required("email", email)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ClientError::Validation(format!("'{email}' is not a valid email address"))),
    }
}

fn valid_password(field: &str, password: &str) -> Result<()> {
    required(field, password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::Validation(format!(
            "{field} must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Username/password pair submitted by the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if either field is blank.
    pub fn validate(&self) -> Result<()> {
        required("username", &self.username)?;
        required("password", &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account creation form.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank username, a malformed
    /// email, or a password shorter than [`MIN_PASSWORD_LEN`].
    pub fn validate(&self) -> Result<()> {
        required("username", &self.username)?;
        valid_email(&self.email)?;
        valid_password("password", &self.password)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request for a password reset code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgotPassword {
    pub email: String,
}

impl ForgotPassword {
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a malformed email.
    pub fn validate(&self) -> Result<()> {
        valid_email(&self.email)
    }
}

/// Reset code plus the replacement password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub token: String,
    pub new_password: String,
}

impl PasswordReset {
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank code or a short password.
    pub fn validate(&self) -> Result<()> {
        required("reset code", &self.token)?;
        valid_password("new password", &self.new_password)
    }
}

impl fmt::Debug for PasswordReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordReset")
            .field("token", &"<redacted>")
            .field("new_password", &"<redacted>")
            .finish()
    }
}

/// Video upload form.
///
/// `duration` is the `m:ss` label shown on video cards; the backend stores
/// it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub file: PathBuf,
}

impl UploadForm {
    /// Creates a form with the default category and an unknown duration.
    pub fn new(title: impl Into<String>, description: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: DEFAULT_CATEGORY.to_string(),
            duration: "00:00".to_string(),
            file: file.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when the title, description or
    /// category is blank, or the file does not exist.
    pub fn validate(&self) -> Result<()> {
        required("title", &self.title)?;
        required("description", &self.description)?;
        required("category", &self.category)?;
        if !self.file.is_file() {
            return Err(ClientError::Validation(format!(
                "no video file at {}",
                self.file.display()
            )));
        }
        Ok(())
    }

    /// File name sent in the multipart body.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map_or_else(|| "video.mp4".to_string(), |n| n.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_fields() {
        assert!(Credentials::new("alice", "secret").validate().is_ok());
        assert!(matches!(
            Credentials::new("", "secret").validate(),
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            Credentials::new("alice", "   ").validate(),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("alice", "hunter22"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn registration_checks_email_and_password_length() {
        let mut form = Registration {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "123456".into(),
        };
        assert!(form.validate().is_ok());

        form.email = "alice.example.com".into();
        assert!(form.validate().is_err());

        form.email = "alice@example.com".into();
        form.password = "12345".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn upload_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");

        let form = UploadForm::new("Cat Facts", "facts about cats", &path);
        assert!(matches!(form.validate(), Err(ClientError::Validation(_))));

        std::fs::write(&path, b"not really a video").unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(form.file_name(), "clip.mp4");
        assert_eq!(form.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn upload_requires_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"x").unwrap();

        let form = UploadForm::new("Cat Facts", " ", &path);
        assert!(form.validate().is_err());
    }
}
