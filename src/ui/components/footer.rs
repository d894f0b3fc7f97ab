//! Footer component renderer: alert and notice lines.

use std::io::{self, Write};

use crate::ui::theme::Theme;

pub fn render_footer(
    out: &mut dyn Write,
    alert: Option<&str>,
    notice: Option<&str>,
    theme: &Theme,
) -> io::Result<()> {
    if let Some(alert) = alert {
        writeln!(out, "{}{}! {alert}{}", Theme::bold(), Theme::fg(&theme.colors.alert_fg), Theme::reset())?;
    }
    if let Some(notice) = notice {
        writeln!(out, "{}{notice}{}", Theme::fg(&theme.colors.notice_fg), Theme::reset())?;
    }
    Ok(())
}
