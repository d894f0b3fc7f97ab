//! Session state holder.
//!
//! [`SessionState`] exclusively owns the access token. The token is read
//! from the local store on construction, written back on every change, and
//! broadcast to subscribers as an authenticated flag.
//!
//! # Example
//!
//! ```
//! use abtube::app::SessionState;
//! use abtube::storage::MemoryStore;
//!
//! let mut session = SessionState::new(Box::new(MemoryStore::new()));
//! assert!(!session.is_authenticated());
//! session.logout();
//! assert_eq!(session.token(), None);
//! ```

use std::fmt;

use tokio::sync::watch;
use tracing::Instrument;

use crate::api::{LoginResponse, VideoApi};
use crate::domain::error::{AuthError, ClientError, Result};
use crate::domain::{Credentials, Session};
use crate::storage::{LocalStore, ACCESS_TOKEN_KEY};

/// Authentication state derived from the persisted token.
///
/// Invariant: `is_authenticated()` is true exactly when a token is held, and
/// the held token always matches what was last written to the store.
pub struct SessionState {
    store: Box<dyn LocalStore>,
    token: Option<String>,
    changes: watch::Sender<bool>,
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl SessionState {
    /// Creates the holder, restoring any token persisted by a previous run.
    ///
    /// A store that cannot be read is treated as empty; the failure is logged.
    #[must_use]
    pub fn new(store: Box<dyn LocalStore>) -> Self {
        let token = match store.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored session, starting logged out");
                None
            }
        };

        tracing::debug!(restored = token.is_some(), "session state initialized");

        let (changes, _) = watch::channel(token.is_some());
        Self { store, token, changes }
    }

    /// Sends `credentials` to the backend and applies the outcome.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] when the backend rejects the pair
    /// - [`AuthError::Network`] when the request fails or the server errors
    /// - [`AuthError::Storage`] when the token cannot be persisted
    ///
    /// Prior state is unchanged on every error.
    pub async fn login(
        &mut self,
        api: &dyn VideoApi,
        credentials: &Credentials,
    ) -> std::result::Result<Session, AuthError> {
        let result = api
            .login(credentials)
            .instrument(tracing::debug_span!("session_login", username = %credentials.username))
            .await;
        self.complete_login(result)
    }

    /// Applies the result of a `POST /login` request.
    ///
    /// Split from [`login`](Self::login) so the event loop can issue the
    /// request itself and feed the response back in.
    ///
    /// # Errors
    ///
    /// See [`login`](Self::login).
    pub fn complete_login(
        &mut self,
        result: Result<LoginResponse>,
    ) -> std::result::Result<Session, AuthError> {
        let response = result.map_err(classify_login_failure)?;

        if response.access_token.is_empty() {
            return Err(AuthError::Network("backend returned an empty token".to_string()));
        }

        self.store
            .set(ACCESS_TOKEN_KEY, &response.access_token)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        self.token = Some(response.access_token.clone());
        self.changes.send_replace(true);

        tracing::info!("logged in");
        Ok(Session {
            token: response.access_token,
        })
    }

    /// Clears the token from memory and from the store. Idempotent.
    ///
    /// A store failure is logged and otherwise ignored: the in-memory
    /// session is always cleared.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.remove(ACCESS_TOKEN_KEY) {
            tracing::warn!(error = %e, "failed to remove stored token");
        }

        if self.token.take().is_some() {
            self.changes.send_replace(false);
            tracing::info!("logged out");
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the token or the error every guarded action reports when
    /// nobody is logged in.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] when no token is held.
    pub fn require_token(&self) -> Result<&str> {
        self.token()
            .ok_or_else(|| ClientError::Auth(AuthError::NotAuthenticated("login required".to_string())))
    }

    /// Receiver notified with the authenticated flag on every token change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.changes.subscribe()
    }
}

fn classify_login_failure(err: ClientError) -> AuthError {
    match err {
        ClientError::Auth(_)
        | ClientError::Validation(_)
        | ClientError::NotFound(_)
        | ClientError::Forbidden(_) => AuthError::InvalidCredentials,
        ClientError::Storage(msg) => AuthError::Storage(msg),
        ClientError::Network(msg) | ClientError::Config(msg) => AuthError::Network(msg),
    }
}
