use ratatui::style::{Color, Modifier, Style};

use crate::{constants::Palette, domain::UrgencyTier};

pub(super) fn tier_color(tier: UrgencyTier, palette: &Palette) -> Color {
    match tier {
        UrgencyTier::Now => palette.now,
        UrgencyTier::Soon => palette.soon,
        UrgencyTier::Later => palette.later,
    }
}

pub(super) fn tier_border(tier: UrgencyTier, palette: &Palette) -> Color {
    match tier {
        UrgencyTier::Later => palette.border,
        _ => tier_color(tier, palette),
    }
}

pub(super) fn name_style(focused: bool, palette: &Palette) -> Style {
    if focused {
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    }
}

pub(super) fn cursor_style(palette: &Palette) -> Style {
    Style::default().bg(palette.highlight_bg)
}
