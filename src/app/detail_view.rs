use itertools::Itertools;
use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{domain::UrgencyTier, schedule};

use super::{App, time_format, view_style};

impl App {
    pub(super) fn render_detail(&self, f: &mut Frame, area: Rect) {
        let palette = self.theme().palette();

        let Some(entry) = self.live.focused_entry() else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.muted));
            f.render_widget(Paragraph::new("nothing in focus").block(block), area);
            return;
        };

        let tier = self
            .live
            .focused_ranked()
            .map(|ranked| ranked.tier)
            .unwrap_or(UrgencyTier::Later);
        let remaining = self.live.focused_ranked().map(|r| r.remaining_seconds);
        let tier_color = view_style::tier_color(tier, &palette);
        let label_style = Style::default().fg(palette.muted);
        let value_style = Style::default().fg(palette.text);

        let mut lines = vec![
            Line::from(Span::styled(
                entry.description().to_string(),
                value_style.add_modifier(Modifier::ITALIC),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::styled("url       ", label_style),
                Span::styled(entry.url().to_string(), value_style),
            ]),
            Line::from(vec![
                Span::styled("protocol  ", label_style),
                Span::styled(entry.protocol().to_string(), value_style),
            ]),
        ];

        if !entry.authors().is_empty() {
            let authors = entry.authors().iter().map(|author| &author.name).join(", ");
            lines.push(Line::from(vec![
                Span::styled("by        ", label_style),
                Span::styled(authors, value_style),
            ]));
        }

        lines.push(Line::from(vec![
            Span::styled("opens at  ", label_style),
            Span::styled(entry.canonical_time().to_string(), value_style),
        ]));

        if let Some(remaining) = remaining {
            lines.push(Line::from(vec![
                Span::styled("next in   ", label_style),
                Span::styled(
                    format!("{} ({})", time_format::format_remaining(remaining), tier.label()),
                    Style::default().fg(tier_color).add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        if let Some(now) = self.live.last_tick() {
            let mut upcoming = schedule::upcoming(now, entry);
            upcoming.sort_by_key(|(_, instant)| *instant);

            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("upcoming", label_style)));
            let room = area.height.saturating_sub(12).max(1) as usize;
            for (time, instant) in upcoming.iter().take(room) {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}  ", time), value_style),
                    Span::styled(
                        time_format::format_occurrence(instant, now),
                        label_style,
                    ),
                ]));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(Span::styled(
                entry.name().to_string(),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(view_style::tier_border(tier, &palette)));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}
