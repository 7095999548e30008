use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{
    catalog::Catalog,
    clock::{self, SystemClock},
    constants::TIME_SETTINGS,
    domain::EntryId,
    ranking::LiveRanking,
    settings::{Settings, Theme},
};

mod detail_view;
mod event_handlers;
mod render_views;
mod time_format;
mod ui_helpers;
mod view_style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UiMode {
    Main,
    Help,
}

struct App {
    live: LiveRanking,
    cursor: Option<EntryId>,
    ui_mode: UiMode,
    settings: Settings,
    settings_path: PathBuf,
    render_needed: bool,
}

impl App {
    fn new(live: LiveRanking, settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            live,
            cursor: None,
            ui_mode: UiMode::Main,
            settings,
            settings_path,
            render_needed: true,
        }
    }

    fn theme(&self) -> Theme {
        self.settings.theme
    }

    fn cursor_index(&self) -> Option<usize> {
        let ranking = self.live.current_ranking();
        let id = self
            .cursor
            .as_ref()
            .or_else(|| self.live.focus_state().entry_id())?;
        ranking.iter().position(|ranked| ranked.entry.id() == id)
    }

    fn set_cursor_index(&mut self, index: usize) {
        self.cursor = self
            .live
            .current_ranking()
            .get(index)
            .map(|ranked| ranked.entry.id().clone());
        self.render_needed = true;
    }

    fn on_tick(&mut self) {
        self.render_needed = true;
    }

    fn toggle_help(&mut self) {
        self.ui_mode = match self.ui_mode {
            UiMode::Main => UiMode::Help,
            UiMode::Help => UiMode::Main,
        };
        self.render_needed = true;
    }

    fn in_help(&self) -> bool {
        matches!(self.ui_mode, UiMode::Help)
    }

    fn modal_rect(&self, terminal_size: Rect) -> Rect {
        ui_helpers::centered_rect(terminal_size, 1, 2)
    }
}

pub fn run_ui(catalog: Catalog, settings: Settings, settings_path: PathBuf) -> Result<(), io::Error> {
    let ticks = clock::spawn_ticker(SystemClock, Duration::from_millis(settings.tick_ms));
    let live = LiveRanking::new(catalog, ticks);
    let mut app = App::new(live, settings, settings_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let mut last_render = Instant::now();

    log::info!(
        "ui started with {} entries, tick every {}ms",
        app.live.catalog().len(),
        app.settings.tick_ms
    );

    loop {
        if app.live.pump() {
            app.on_tick();
        }

        if last_render.elapsed() >= render_rate && app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
            last_render = Instant::now();
        }

        if event::poll(render_rate)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key)
        {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("ui stopped");
    Ok(())
}
