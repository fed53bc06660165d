use std::path::Path;

use crossterm::event::KeyCode;
use log::warn;

use crate::{errors::DbError, export::export_view_to_csv};

use super::{
    components::{DatabaseViewerUI, Popup, ScreenState},
    file_picker::PickerAction,
};

/// Rows moved by PageUp/PageDown.
const PAGE_ROWS: usize = 10;

impl DatabaseViewerUI {
    pub async fn handle_key(&mut self, key: KeyCode) {
        if self.popup.take().is_some() {
            return;
        }

        match self.current_screen {
            ScreenState::TableView => self.handle_table_view_input(key).await,
            ScreenState::FilePicker => self.handle_file_picker_input(key).await,
        }
    }

    pub async fn handle_table_view_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('o') => {
                self.picker.refresh();
                self.current_screen = ScreenState::FilePicker;
            }
            KeyCode::Char('a') => self.popup = Some(Popup::About),
            KeyCode::Char('p') => self.popup = Some(Popup::ProjectPage),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                let result = self.session.next_table().await;
                self.after_table_switch(result);
            }
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                let result = self.session.previous_table().await;
                self.after_table_switch(result);
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_grid(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_grid(-1),
            KeyCode::PageDown => self.scroll_grid(PAGE_ROWS as isize),
            KeyCode::PageUp => self.scroll_grid(-(PAGE_ROWS as isize)),
            KeyCode::Home => self.scroll_grid(isize::MIN),
            KeyCode::End => self.scroll_grid(isize::MAX),
            KeyCode::Char('e') => self.export_current(),
            KeyCode::Char('s') => match self.session.describe_current().await {
                Ok(schema) => self.popup = Some(Popup::Schema(schema)),
                Err(err) => self.show_error(&err),
            },
            _ => {}
        }
    }

    pub async fn handle_file_picker_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.current_screen = ScreenState::TableView,
            KeyCode::Up | KeyCode::Char('k') => self.picker.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.picker.move_down(),
            KeyCode::Home => self.picker.move_first(),
            KeyCode::End => self.picker.move_last(),
            KeyCode::Backspace => self.picker.go_parent(),
            KeyCode::Char('f') => self.picker.toggle_filter(),
            KeyCode::Enter => {
                if let PickerAction::Selected(path) = self.picker.activate() {
                    self.current_screen = ScreenState::TableView;
                    self.open_database(&path).await;
                }
            }
            _ => {}
        }
    }

    pub async fn open_database(&mut self, path: &Path) {
        match self.session.open_database(path).await {
            Ok(()) => {
                self.reset_grid();
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.status = format!("Opened {} ({} tables)", name, self.session.tables().len());
            }
            Err(err) => self.show_error(&err),
        }
    }

    fn after_table_switch(&mut self, result: Result<(), DbError>) {
        match result {
            Ok(()) => {
                self.reset_grid();
                if let Some(view) = self.session.view() {
                    self.status = format!("{}: {} rows", view.table_name, view.row_count());
                }
            }
            Err(err) => self.show_error(&err),
        }
    }

    fn scroll_grid(&mut self, step: isize) {
        let Some(rows) = self.session.view().map(|view| view.row_count()) else {
            return;
        };
        if rows == 0 {
            return;
        }

        let current = self.grid_state.selected().unwrap_or(0) as isize;
        let target = current.saturating_add(step).clamp(0, rows as isize - 1);
        self.grid_state.select(Some(target as usize));
    }

    fn export_current(&mut self) {
        let Some(view) = self.session.view() else {
            self.show_error(&DbError::Export("no table is displayed".to_string()));
            return;
        };

        match export_view_to_csv(view, &self.config.export_dir) {
            Ok(path) => {
                self.status = format!("Exported to {}", path.display());
            }
            Err(err) => {
                warn!("{}", err);
                self.show_error(&err);
            }
        }
    }
}
