//! ABTube: client core and terminal front-end for the ABTube video-sharing
//! service.
//!
//! The crate holds everything a client needs short of the widgets:
//! - Session handling with a token persisted across restarts
//! - The video catalog with free-text search and category filtering
//! - Video detail, likes and comments for the opened video
//! - Account operations (register, password reset) and uploads
//! - A view model plus ANSI rendering for terminal output

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │ Event
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State holders
//! │  - Session, catalog, player                         │  ← Event handling
//! │  - Event handler, drive loop                        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │ Action
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON file   │   │ - Dispatcher  │
//! │ - Theming     │   │ - In-memory   │   │ - Requests    │
//! │ - Components  │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//!                                         ┌───────────────┐
//!                                         │ API (api/)    │
//!                                         │ - VideoApi    │
//!                                         │ - reqwest     │
//!                                         └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Video, comment, form models (domain/)            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - stderr logging                                   │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! `~/.config/abtube/config.toml`, every key optional:
//!
//! ```toml
//! api_url = "https://abtube.example/api"
//! data_dir = "~/.local/share/abtube"
//! theme = "light"
//! theme_file = "~/.config/abtube/theme.toml"
//! trace_level = "debug"
//! trace_export = true
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use abtube::app::{drive, Event};
//! use abtube::storage::JsonStore;
//! use abtube::worker::Dispatcher;
//! use abtube::{initialize, Config, HttpApi};
//!
//! # async fn run() -> abtube::Result<()> {
//! let config = Config::load(None)?;
//! let store = JsonStore::new(config.store_path())?;
//! let mut state = initialize(&config, Box::new(store));
//! let mut dispatcher = Dispatcher::new(Arc::new(HttpApi::new(config.api_url())?));
//!
//! drive(&mut state, &mut dispatcher, [Event::RefreshCatalog]).await?;
//! println!("{} videos", state.catalog.videos().len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use api::{HttpApi, VideoApi, DEFAULT_API_URL};
pub use app::{drive, handle_event, Action, AppState, Event};
pub use domain::{AuthError, ClientError, Result};
pub use ui::Theme;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::infrastructure::{default_config_path, expand_tilde, get_data_dir};
use crate::storage::{LocalStore, STORE_FILE_NAME};

/// Client configuration, read from `config.toml`.
///
/// Every field is optional in the file; command-line flags override what is
/// loaded here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL. Default: [`DEFAULT_API_URL`].
    pub api_url: Option<String>,

    /// Directory for `session.json` and trace export. `~` is expanded.
    pub data_dir: Option<String>,

    /// Built-in theme name, `dark` or `light`. Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Filter directive such as `debug` or `abtube=trace`. `RUST_LOG` wins
    /// over this. Default: `"info"`
    pub trace_level: Option<String>,

    /// Export spans as OTLP JSON into the data directory. Default: `true`
    pub trace_export: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            data_dir: None,
            theme: None,
            theme_file: None,
            trace_level: None,
            trace_export: true,
        }
    }
}

impl Config {
    /// Loads the configuration file.
    ///
    /// With `path` set, that file must exist. Without it the default
    /// location is tried and a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (default_config_path(), false),
        };

        if !required && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            ClientError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] on malformed TOML or mistyped keys.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ClientError::Config(format!("invalid config: {e}")))
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.as_deref().map_or_else(get_data_dir, expand_tilde)
    }

    /// Location of the persisted session.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir().join(STORE_FILE_NAME)
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// An unusable file or unknown name is logged and replaced by the
    /// default theme.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the application state for `config`, restoring the session from
/// `store`.
///
/// # Example
///
/// ```
/// use abtube::storage::MemoryStore;
/// use abtube::{initialize, Config};
///
/// let state = initialize(&Config::default(), Box::new(MemoryStore::new()));
/// assert!(!state.session.is_authenticated());
/// ```
pub fn initialize(config: &Config, store: Box<dyn LocalStore>) -> AppState {
    tracing::debug!(api_url = %config.api_url(), "initializing abtube client");
    AppState::new(store, config.resolve_theme())
}
