//! Search bar component renderer.

use std::io::{self, Write};

use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Writes the active filter, e.g. `search: cat  category: Other`.
pub fn render_search_bar(out: &mut dyn Write, search: &SearchBarInfo, theme: &Theme) -> io::Result<()> {
    let term = if search.term.is_empty() { "-" } else { search.term.as_str() };
    let label = Theme::fg(&theme.colors.search_bar_border);
    let value = Theme::fg(&theme.colors.text_normal);

    writeln!(
        out,
        "{label}search:{value} {term}  {label}category:{value} {}{}",
        search.category,
        Theme::reset()
    )
}
