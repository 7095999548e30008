use chrono::Local;
use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::{App, time_format, view_style};

const HEADLINE: &str = "7:55 make a directory";
const CANONICAL_WIDTH: usize = 6;
const COUNTDOWN_WIDTH: usize = 8;

const HELP_ROWS: &[(&str, &str)] = &[
    ("up / k", "move cursor up"),
    ("down / j", "move cursor down"),
    ("enter", "show entry in the detail panel"),
    ("f", "jump cursor to the shown entry"),
    ("t", "toggle light / dark"),
    ("?", "close this help"),
    ("q / esc", "quit"),
];

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        let palette = self.theme().palette();

        let clock = self
            .live
            .last_tick()
            .copied()
            .unwrap_or_else(Local::now)
            .format("%H:%M:%S")
            .to_string();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    HEADLINE,
                    Style::default()
                        .fg(palette.text)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(clock, Style::default().fg(palette.text)))
                    .alignment(Alignment::Center),
            )
            .title(
                Line::from(Span::styled("? help", Style::default().fg(palette.muted)))
                    .alignment(Alignment::Right),
            )
            .border_style(Style::default().fg(palette.border));
        let inner = block.inner(size);
        f.render_widget(block, size);

        let columns = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);
        self.render_ranking(f, columns[0]);
        self.render_detail(f, columns[1]);

        if self.in_help() {
            self.render_help(f, size);
        }
    }

    fn render_ranking(&self, f: &mut Frame, area: Rect) {
        let palette = self.theme().palette();
        let focused_id = self.live.focus_state().entry_id();
        let ranking = self.live.current_ranking();

        if ranking.is_empty() {
            let message = if self.live.catalog().is_empty() {
                "the catalog is empty"
            } else {
                "waiting for the clock..."
            };
            f.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(palette.muted))
                    .alignment(Alignment::Center),
                area,
            );
            return;
        }

        let name_width = (area.width as usize)
            .saturating_sub(2 + CANONICAL_WIDTH + COUNTDOWN_WIDTH + 4)
            .max(4);

        let items: Vec<ListItem> = ranking
            .iter()
            .map(|ranked| {
                let entry = &ranked.entry;
                let focused = focused_id == Some(entry.id());
                let tier_color = view_style::tier_color(ranked.tier, &palette);
                let marker = if focused { "▸ " } else { "  " };
                let name = time_format::truncate_label(entry.name(), name_width);

                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(tier_color)),
                    Span::styled(
                        format!("{:<width$}", name, width = name_width),
                        view_style::name_style(focused, &palette),
                    ),
                    Span::styled(
                        format!(" {:>width$}", entry.canonical_time(), width = CANONICAL_WIDTH),
                        Style::default().fg(palette.text),
                    ),
                    Span::styled(
                        format!(
                            " ({:>width$})",
                            time_format::format_countdown(ranked.remaining_seconds),
                            width = COUNTDOWN_WIDTH - 2
                        ),
                        Style::default().fg(tier_color),
                    ),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(self.cursor_index());

        let list = List::new(items).highlight_style(view_style::cursor_style(&palette));
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_help(&self, f: &mut Frame, terminal_size: Rect) {
        let palette = self.theme().palette();
        let modal_rect = self.modal_rect(terminal_size);

        let lines: Vec<Line> = HELP_ROWS
            .iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>10}  ", keys),
                        Style::default()
                            .fg(palette.text)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*action, Style::default().fg(palette.muted)),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("keys")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(palette.border)),
        );

        f.render_widget(Clear, modal_rect);
        f.render_widget(paragraph, modal_rect);
    }
}
