//! Header component renderer.

use std::io::{self, Write};

use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Writes the title bar: title on the left, session status right-aligned,
/// padded to `cols`.
///
/// ```text
///  ABTube (2/5)                                             logged in
/// ```
pub fn render_header(out: &mut dyn Write, header: &HeaderInfo, theme: &Theme, cols: usize) -> io::Result<()> {
    let title_len = header.title.chars().count();
    let session_len = header.session.chars().count() + 1;
    let gap = cols.saturating_sub(title_len + session_len).max(1);

    write!(out, "{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))?;
    if let Some(bg) = &theme.colors.header_bg {
        write!(out, "{}", Theme::bg(bg))?;
    }
    writeln!(
        out,
        "{}{}{} {}",
        header.title,
        " ".repeat(gap),
        header.session,
        Theme::reset()
    )
}
