//! Command-line front-end.
//!
//! Every command is a short sequence of [`Event`]s run through [`drive`],
//! followed by one render of the resulting state to stdout:
//!
//! ```text
//! argv ──> Cli ──> Vec<Vec<Event>> ──drive──> AppState ──render──> stdout
//! ```
//!
//! Commands that act on a video (`like`, `comment`, `delete-comment`) first
//! open it in one `drive` pass, then submit the action in a second, so the
//! action sees the loaded player state exactly like an interactive client
//! would.
//!
//! The exit status is non-zero when a command fails synchronously (bad
//! input, no session) or when the backend reported an error.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::Instrument;

use abtube::app::{drive_steps, AppState, Event};
use abtube::domain::{
    CommentId, Credentials, ForgotPassword, PasswordReset, Registration, UploadForm, VideoId,
    ALL_CATEGORIES, DEFAULT_CATEGORY,
};
use abtube::observability::init_tracing;
use abtube::storage::{JsonStore, LocalStore, MemoryStore};
use abtube::ui::{render, Screen};
use abtube::worker::Dispatcher;
use abtube::{initialize, Config, HttpApi, Result, VideoApi};

#[derive(Parser, Debug)]
#[command(name = "abtube")]
#[command(author, version, about = "Browse, watch and upload videos on an ABTube server", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/abtube/config.toml)
    #[arg(long, env = "ABTUBE_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, env = "ABTUBE_API_URL")]
    api_url: Option<String>,

    /// Directory holding the session file and trace export
    #[arg(long, env = "ABTUBE_DATA_DIR")]
    data_dir: Option<String>,

    /// Built-in theme: dark or light
    #[arg(long, env = "ABTUBE_THEME")]
    theme: Option<String>,

    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Output width in columns
    #[arg(long, env = "COLUMNS", default_value_t = 100)]
    width: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "ABTUBE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show whether a session is stored
    Status,

    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "ABTUBE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Ask for a password reset code by email
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },

    /// Set a new password using an emailed reset code
    ResetPassword {
        /// Reset code from the email
        #[arg(short, long)]
        token: String,
        #[arg(short, long, env = "ABTUBE_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },

    /// List videos, optionally filtered
    Videos {
        /// Case-insensitive text matched against title and description
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact category name, or "All"
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,
    },

    /// Show a video with its comments and stream URL
    Watch { id: VideoId },

    /// Like or unlike a video
    Like { id: VideoId },

    /// Comment on a video
    Comment { id: VideoId, text: String },

    /// Delete one of your comments
    DeleteComment { video_id: VideoId, comment_id: CommentId },

    /// Upload a video file
    Upload {
        file: PathBuf,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        #[arg(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,
        /// Duration label shown on the video card, e.g. 3:25
        #[arg(long, default_value = "00:00")]
        duration: String,
    },

    /// Delete one of your videos
    Delete { id: VideoId },
}

impl Command {
    const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Status => "status",
            Self::Register { .. } => "register",
            Self::ForgotPassword { .. } => "forgot-password",
            Self::ResetPassword { .. } => "reset-password",
            Self::Videos { .. } => "videos",
            Self::Watch { .. } => "watch",
            Self::Like { .. } => "like",
            Self::Comment { .. } => "comment",
            Self::DeleteComment { .. } => "delete-comment",
            Self::Upload { .. } => "upload",
            Self::Delete { .. } => "delete",
        }
    }

    /// Event batches to drive, in order, and the screen to show afterwards.
    fn plan(self) -> (Vec<Vec<Event>>, Screen) {
        match self {
            Self::Login { username, password } => (
                vec![vec![Event::LoginSubmitted(Credentials::new(username, password))]],
                Screen::Messages,
            ),
            Self::Logout => (vec![vec![Event::LogoutRequested]], Screen::Messages),
            Self::Status => (vec![], Screen::Messages),
            Self::Register { username, email, password } => (
                vec![vec![Event::RegisterSubmitted(Registration { username, email, password })]],
                Screen::Messages,
            ),
            Self::ForgotPassword { email } => (
                vec![vec![Event::ForgotPasswordSubmitted(ForgotPassword { email })]],
                Screen::Messages,
            ),
            Self::ResetPassword { token, new_password } => (
                vec![vec![Event::ResetPasswordSubmitted(PasswordReset { token, new_password })]],
                Screen::Messages,
            ),
            Self::Videos { search, category } => (
                vec![vec![
                    Event::RefreshCatalog,
                    Event::SearchChanged(search),
                    Event::CategorySelected(category),
                ]],
                Screen::Catalog,
            ),
            Self::Watch { id } => (vec![vec![Event::OpenVideo(id)]], Screen::Player),
            Self::Like { id } => (
                vec![vec![Event::OpenVideo(id)], vec![Event::ToggleLike]],
                Screen::Player,
            ),
            Self::Comment { id, text } => (
                vec![vec![Event::OpenVideo(id)], vec![Event::CommentSubmitted(text)]],
                Screen::Player,
            ),
            Self::DeleteComment { video_id, comment_id } => (
                vec![vec![Event::OpenVideo(video_id)], vec![Event::DeleteComment(comment_id)]],
                Screen::Player,
            ),
            Self::Upload { file, title, description, category, duration } => {
                let form = UploadForm {
                    category,
                    duration,
                    ..UploadForm::new(title, description, file)
                };
                (vec![vec![Event::UploadSubmitted(form)]], Screen::Messages)
            }
            Self::Delete { id } => (vec![vec![Event::DeleteVideo(id)]], Screen::Messages),
        }
    }
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(api_url) = &self.api_url {
            config.api_url = Some(api_url.clone());
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = Some(data_dir.clone());
        }
        if let Some(theme) = &self.theme {
            config.theme = Some(theme.clone());
            config.theme_file = None;
        }
        if self.ephemeral {
            config.trace_export = false;
        }
        Ok(config)
    }

    fn open_store(&self, config: &Config) -> Result<Box<dyn LocalStore>> {
        if self.ephemeral {
            return Ok(Box::new(MemoryStore::new()));
        }
        Ok(Box::new(JsonStore::new(config.store_path())?))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("abtube: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.resolve_config()?;
    init_tracing(&config);

    let store = cli.open_store(&config)?;
    let mut state = initialize(&config, store);
    let api = Arc::new(HttpApi::new(config.api_url())?);
    let mut dispatcher = Dispatcher::new(api.clone());

    let width = cli.width;
    let command = cli.command;
    let span = tracing::debug_span!("command", name = command.name());

    if matches!(command, Command::Status) {
        span.in_scope(|| print_status(&state, &config));
        return Ok(ExitCode::SUCCESS);
    }

    let stream_url = match &command {
        Command::Watch { id } => Some(api.stream_url(*id)),
        _ => None,
    };

    let (steps, screen) = command.plan();
    drive_steps(&mut state, &mut dispatcher, steps)
        .instrument(span.clone())
        .await?;

    let _entered = span.entered();
    let mut stdout = io::stdout().lock();
    let written = render(&state, screen, width, &mut stdout).and_then(|()| match stream_url {
        Some(url) if state.player.video().is_some() => writeln!(stdout, "Stream: {url}"),
        _ => Ok(()),
    });
    if let Err(e) = written {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("abtube: failed to write output: {e}");
        }
        return Ok(ExitCode::FAILURE);
    }

    Ok(if state.alert.is_some() || state.player.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_status(state: &AppState, config: &Config) {
    let session = if state.session.is_authenticated() { "logged in" } else { "not logged in" };
    println!("Session: {session}");
    println!("Server:  {}", config.api_url());
    println!("Store:   {}", config.store_path().display());
}
