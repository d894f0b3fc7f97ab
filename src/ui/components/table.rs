//! Table component renderer.
//!
//! Renders catalog rows as fixed-width columns: ID, TITLE, UPLOADER,
//! CATEGORY, DURATION, LIKES, AGE. TITLE absorbs whatever width is left.

use std::io::{self, Write};

use crate::ui::helpers::{fit, truncate, write_highlighted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::VideoRow;

const ID_WIDTH: usize = 5;
const UPLOADER_WIDTH: usize = 14;
const CATEGORY_WIDTH: usize = 12;
const DURATION_WIDTH: usize = 8;
const LIKES_WIDTH: usize = 6;
const AGE_WIDTH: usize = 9;
const MIN_TITLE_WIDTH: usize = 12;

fn title_width(cols: usize) -> usize {
    let fixed = ID_WIDTH + UPLOADER_WIDTH + CATEGORY_WIDTH + DURATION_WIDTH + LIKES_WIDTH + AGE_WIDTH + 6;
    cols.saturating_sub(fixed).max(MIN_TITLE_WIDTH)
}

pub fn render_table_headers(out: &mut dyn Write, theme: &Theme, cols: usize) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{:<ID_WIDTH$} {} {:<UPLOADER_WIDTH$} {:<CATEGORY_WIDTH$} {:>DURATION_WIDTH$} {:>LIKES_WIDTH$} {:<AGE_WIDTH$}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        "ID",
        fit("TITLE", title_width(cols)),
        "UPLOADER",
        "CATEGORY",
        "DURATION",
        "LIKES",
        "AGE",
        Theme::reset()
    )
}

pub fn render_table_rows(out: &mut dyn Write, rows: &[VideoRow], theme: &Theme, cols: usize) -> io::Result<()> {
    let width = title_width(cols);
    for row in rows {
        render_table_row(out, row, theme, width)?;
    }
    Ok(())
}

/// Highlight ranges past the truncation point are clipped by the helper.
fn render_table_row(out: &mut dyn Write, row: &VideoRow, theme: &Theme, title_width: usize) -> io::Result<()> {
    write!(out, "{}{:<ID_WIDTH$} ", Theme::fg(&theme.colors.text_dim), row.id)?;
    write!(out, "{}", Theme::fg(&theme.colors.text_normal))?;

    let title = fit(&row.title, title_width);
    let visible = if row.title.chars().count() > title_width {
        title_width.saturating_sub(3)
    } else {
        title_width
    };
    let ranges: Vec<(usize, usize)> = row
        .highlight_ranges
        .iter()
        .filter(|&&(start, _)| start < visible)
        .map(|&(start, end)| (start, end.min(visible)))
        .collect();
    write_highlighted(out, &title, &ranges, theme)?;

    writeln!(
        out,
        " {}{} {} {:>DURATION_WIDTH$} {:>LIKES_WIDTH$} {}{}",
        Theme::fg(&theme.colors.text_dim),
        fit(&row.uploader, UPLOADER_WIDTH),
        fit(&row.category, CATEGORY_WIDTH),
        truncate(&row.duration, DURATION_WIDTH),
        row.likes,
        fit(&row.age, AGE_WIDTH),
        Theme::reset()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> VideoRow {
        VideoRow {
            id: 7,
            title: "Dog Tricks".to_string(),
            uploader: "bob".to_string(),
            category: "Other".to_string(),
            duration: "3:25".to_string(),
            likes: 2,
            age: "1d ago".to_string(),
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn rows_show_duration_under_its_header() {
        let theme = Theme::dark();
        let mut out = Vec::new();
        render_table_headers(&mut out, &theme, 100).unwrap();
        render_table_rows(&mut out, &[row()], &theme, 100).unwrap();
        let text = String::from_utf8(out).unwrap();

        let header = text.lines().next().unwrap();
        let body = text.lines().nth(1).unwrap();
        assert!(header.contains("DURATION"));
        assert!(body.contains("    3:25"));
    }
}
