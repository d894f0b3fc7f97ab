//! Shared rendering utilities.
//!
//! Highlight computation works on character indices so multi-byte titles
//! are never split inside a code point.

use std::io::{self, Write};

use crate::ui::theme::Theme;

/// Finds every case-insensitive occurrence of `term` in `text`.
///
/// Returns non-overlapping `(start, end)` character ranges, end exclusive.
/// An empty term matches nothing.
///
/// # Example
///
/// ```
/// use abtube::ui::helpers::match_ranges;
///
/// assert_eq!(match_ranges("Cat Facts about cats", "cat"), vec![(0, 3), (16, 19)]);
/// assert!(match_ranges("Dog Tricks", "").is_empty());
/// ```
#[must_use]
pub fn match_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return vec![];
    }

    // Lowercasing can change the char count (e.g. 'İ'), in which case the
    // indices would no longer line up with `text`.
    let haystack: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    if haystack.len() != text.chars().count() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        if haystack[pos..pos + needle.len()] == needle[..] {
            ranges.push((pos, pos + needle.len()));
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    ranges
}

/// Truncates `text` to at most `max` characters, marking the cut with "...".
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Pads `text` with spaces to exactly `width` characters, truncating first
/// if needed.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = width.saturating_sub(cut.chars().count());
    format!("{cut}{}", " ".repeat(pad))
}

/// Writes `text` with the given character ranges highlighted.
///
/// Ranges must be sorted and non-overlapping, as returned by
/// [`match_ranges`].
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_highlighted(
    out: &mut dyn Write,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
) -> io::Result<()> {
    if ranges.is_empty() {
        return write!(out, "{text}");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal: String = chars[current_pos..start].iter().collect();
            write!(out, "{normal}")?;
        }

        let highlighted: String = chars[start..end].iter().collect();
        write!(
            out,
            "{}{}{highlighted}{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset(),
            Theme::fg(&theme.colors.text_normal),
        )?;

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        write!(out, "{remaining}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ranges_ignore_case() {
        assert_eq!(match_ranges("CAT facts", "cat"), vec![(0, 3)]);
        assert_eq!(match_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert!(match_ranges("Dog", "cat").is_empty());
    }

    #[test]
    fn match_ranges_use_char_indices() {
        assert_eq!(match_ranges("café au lait", "au"), vec![(5, 7)]);
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long title here", 10), "a long ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn fit_pads_to_width() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdefgh", 6).chars().count(), 6);
    }

    #[test]
    fn highlighted_text_keeps_every_character() {
        let theme = Theme::dark();
        let mut out = Vec::new();
        write_highlighted(&mut out, "Cat Facts", &[(0, 3)], &theme).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Cat"));
        assert!(rendered.ends_with(" Facts"));
    }
}
