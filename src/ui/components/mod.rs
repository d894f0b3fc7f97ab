//! Composable UI component renderers.
//!
//! Each component writes one section of the listing to a `Write` sink, one
//! line at a time. Output is plain line-oriented text with ANSI styling, so
//! it can be captured in tests or piped.
//!
//! # Components
//!
//! - `header`: Title bar with counts and session status
//! - `search`: Active search term and category
//! - `table`: Catalog rows with match highlighting
//! - `empty`: Message shown when nothing is visible
//! - `player`: Opened video detail and comments
//! - `footer`: Alert and notice lines

mod empty;
mod footer;
mod header;
mod player;
mod search;
mod table;

use std::io::{self, Write};

use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Writes a horizontal separator in the border color.
fn render_border(out: &mut dyn Write, color: &str, cols: usize) -> io::Result<()> {
    writeln!(out, "{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())
}

/// Renders the catalog listing.
///
/// ```text
/// [Header]
/// [Search bar]
/// [Border]
/// [Table header + rows | Empty state]
/// [Footer]
/// ```
///
/// # Errors
///
/// Returns any error from the writer.
pub fn render_catalog(out: &mut dyn Write, vm: &UIViewModel, theme: &Theme, cols: usize) -> io::Result<()> {
    header::render_header(out, &vm.header, theme, cols)?;
    search::render_search_bar(out, &vm.search_bar, theme)?;
    render_border(out, &theme.colors.border, cols)?;

    if let Some(empty) = &vm.empty_state {
        empty::render_empty_state(out, empty, theme, cols)?;
    } else {
        table::render_table_headers(out, theme, cols)?;
        table::render_table_rows(out, &vm.rows, theme, cols)?;
    }

    footer::render_footer(out, vm.alert.as_deref(), vm.notice.as_deref(), theme)
}

/// Renders the opened video, falling back to the footer alone when no video
/// is open.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn render_player(out: &mut dyn Write, vm: &UIViewModel, theme: &Theme, cols: usize) -> io::Result<()> {
    if let Some(player) = &vm.player {
        player::render_player(out, player, theme, cols)?;
        render_border(out, &theme.colors.border, cols)?;
    }
    footer::render_footer(out, vm.alert.as_deref(), vm.notice.as_deref(), theme)
}

/// Renders only the alert and notice lines.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn render_messages(out: &mut dyn Write, vm: &UIViewModel, theme: &Theme) -> io::Result<()> {
    footer::render_footer(out, vm.alert.as_deref(), vm.notice.as_deref(), theme)
}
