use std::io;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
    Terminal,
};

use crate::{
    config::ViewerConfig, errors::DbError, models::schema::TableSchema, session::Session,
};

use super::{file_picker::FilePicker, screens};

pub struct DatabaseViewerUI {
    pub session: Session,
    pub config: ViewerConfig,
    pub picker: FilePicker,
    pub current_screen: ScreenState,
    pub popup: Option<Popup>,
    pub grid_state: TableState,
    pub status: String,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    TableView,
    FilePicker,
}

/// Modal window drawn over the current screen; any key closes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    Message { title: String, body: String },
    About,
    ProjectPage,
    Schema(TableSchema),
}

impl DatabaseViewerUI {
    pub fn new(config: ViewerConfig) -> Self {
        let picker = FilePicker::new(&config.start_dir);
        Self {
            session: Session::new(),
            config,
            picker,
            current_screen: ScreenState::TableView,
            popup: None,
            grid_state: TableState::default(),
            status: "Press o to select a database".to_string(),
            should_quit: false,
        }
    }

    pub async fn run_ui(&mut self) -> Result<(), io::Error> {
        let _guard = TerminalGuard;
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.ui_loop(&mut terminal).await;

        terminal.show_cursor()?;

        result
    }

    async fn ui_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| screens::draw(f, self))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code).await;
                }
            }
        }
        info!("quitting");
        Ok(())
    }

    /// Reports `err` in a popup instead of letting it end the program.
    pub fn show_error(&mut self, err: &DbError) {
        self.status = err.to_string();
        self.popup = Some(Popup::Message {
            title: err.title().to_string(),
            body: err.to_string(),
        });
    }

    /// Points the grid cursor at the first row of whatever is displayed now.
    pub fn reset_grid(&mut self) {
        let has_rows = self.session.view().is_some_and(|view| !view.is_empty());
        self.grid_state = TableState::default().with_selected(has_rows.then_some(0));
    }
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}
