//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from state, then
//! hand it to the component renderers for the requested screen.
//!
//! # Example
//!
//! ```
//! use abtube::app::AppState;
//! use abtube::storage::MemoryStore;
//! use abtube::ui::{render, Screen, Theme};
//!
//! let state = AppState::new(Box::new(MemoryStore::new()), Theme::dark());
//! let mut out = Vec::new();
//! render(&state, Screen::Catalog, 80, &mut out)?;
//! assert!(!out.is_empty());
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Which part of the state to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Filtered catalog listing.
    Catalog,
    /// Opened video with comments.
    Player,
    /// Alert and notice only, for account commands.
    Messages,
}

/// Renders `screen` for `state` into `out`.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn render(state: &AppState, screen: Screen, cols: usize, out: &mut dyn Write) -> io::Result<()> {
    let viewmodel = state.compute_viewmodel(cols);
    render_viewmodel(&viewmodel, &state.theme, screen, cols, out)
}

fn render_viewmodel(
    vm: &UIViewModel,
    theme: &Theme,
    screen: Screen,
    cols: usize,
    out: &mut dyn Write,
) -> io::Result<()> {
    match screen {
        Screen::Catalog => components::render_catalog(out, vm, theme, cols),
        Screen::Player => components::render_player(out, vm, theme, cols),
        Screen::Messages => components::render_messages(out, vm, theme),
    }
}
