//! Empty state component renderer.

use std::io::{self, Write};

use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Writes the centered two-line empty state.
pub fn render_empty_state(out: &mut dyn Write, empty: &EmptyState, theme: &Theme, cols: usize) -> io::Result<()> {
    let msg_padding = cols.saturating_sub(empty.message.chars().count()) / 2;
    writeln!(
        out,
        "{}{}{}{}",
        " ".repeat(msg_padding),
        Theme::fg(&theme.colors.empty_state_fg),
        empty.message,
        Theme::reset()
    )?;

    let sub_padding = cols.saturating_sub(empty.subtitle.chars().count()) / 2;
    writeln!(
        out,
        "{}{}{}{}{}",
        " ".repeat(sub_padding),
        Theme::dim(),
        Theme::fg(&theme.colors.text_dim),
        empty.subtitle,
        Theme::reset()
    )
}
