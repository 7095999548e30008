use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, ui_helpers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.in_help() {
            self.handle_help_key(key);
            false
        } else {
            self.handle_normal_key(key)
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter => {
                self.toggle_help();
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        let len = self.live.current_ranking().len();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    let next = self
                        .cursor_index()
                        .map_or(0, |current| ui_helpers::wrap_prev_index(current, len));
                    self.set_cursor_index(next);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    let next = self
                        .cursor_index()
                        .map_or(0, |current| ui_helpers::wrap_next_index(current, len));
                    self.set_cursor_index(next);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.focus_cursor(),
            KeyCode::Char('f') => {
                self.cursor = self.live.focus_state().entry_id().cloned();
                self.render_needed = true;
            }
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('?') => self.toggle_help(),
            _ => {}
        }

        false
    }

    fn focus_cursor(&mut self) {
        let Some(index) = self.cursor_index() else {
            return;
        };
        let Some(id) = self
            .live
            .current_ranking()
            .get(index)
            .map(|ranked| ranked.entry.id().clone())
        else {
            return;
        };

        self.live.request_focus(&id);
        self.render_needed = true;
    }

    fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        if let Err(e) = self.settings.save(&self.settings_path) {
            log::warn!("could not save theme preference: {}", e);
        }
        self.render_needed = true;
    }
}
