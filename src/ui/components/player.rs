//! Player component renderer: the opened video and its comments.

use std::io::{self, Write};

use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PlayerInfo;

pub fn render_player(out: &mut dyn Write, player: &PlayerInfo, theme: &Theme, cols: usize) -> io::Result<()> {
    match &player.title {
        Some(title) => writeln!(
            out,
            "{}{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.header_fg),
            truncate(title, cols),
            Theme::reset()
        )?,
        None => writeln!(
            out,
            "{}video {} unavailable{}",
            Theme::fg(&theme.colors.text_dim),
            player.video_id,
            Theme::reset()
        )?,
    }

    if player.title.is_some() {
        writeln!(
            out,
            "{}{} · {} · {}{}",
            Theme::fg(&theme.colors.text_dim),
            player.uploader,
            player.category,
            player.age,
            Theme::reset()
        )?;

        let heart_color = if player.liked { &theme.colors.liked_fg } else { &theme.colors.text_dim };
        let heart = if player.liked { "♥" } else { "♡" };
        writeln!(out, "{}{heart} {}{}", Theme::fg(heart_color), player.likes, Theme::reset())?;

        if !player.description.is_empty() {
            writeln!(out, "{}{}{}", Theme::fg(&theme.colors.text_normal), player.description, Theme::reset())?;
        }
    }

    if let Some(error) = &player.error {
        writeln!(out, "{}{error}{}", Theme::fg(&theme.colors.alert_fg), Theme::reset())?;
    }

    writeln!(
        out,
        "{}{}Comments ({}){}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        player.comments.len(),
        Theme::reset()
    )?;
    for comment in &player.comments {
        writeln!(
            out,
            "{}#{} {} {}{}: {}{}",
            Theme::fg(&theme.colors.text_dim),
            comment.id,
            comment.posted,
            Theme::fg(&theme.colors.text_normal),
            comment.username,
            comment.text,
            Theme::reset()
        )?;
    }
    Ok(())
}
