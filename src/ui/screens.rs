use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap,
};
use ratatui::Frame;

use crate::models::grid::TableView;
use crate::models::schema::TableSchema;

use super::components::{DatabaseViewerUI, Popup, ScreenState};
use super::file_picker::EntryKind;

pub const APP_NAME: &str = "SQLite Viewer";
pub const PROJECT_URL: &str = "https://github.com/grqphical07/SQLite-Viewer";

const LICENSE_TEXT: &str = "\
Copyright (c) 2023 grqphical07

Permission is hereby granted, free of charge, to any person obtaining a copy \
of this software and associated documentation files (the \"Software\"), to deal \
in the Software without restriction, including without limitation the rights \
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell \
copies of the Software, and to permit persons to whom the Software is \
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all \
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR \
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, \
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE \
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER \
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, \
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE \
SOFTWARE.";

/// Widest a grid column is allowed to grow, in cells.
const MAX_COLUMN_WIDTH: u16 = 40;
/// Rows sampled when sizing grid columns.
const WIDTH_SAMPLE_ROWS: usize = 200;

pub fn draw(f: &mut Frame, ui: &mut DatabaseViewerUI) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(size);

    f.render_widget(menu_bar(), chunks[0]);
    render_title(f, ui, chunks[1]);
    render_tabs(f, ui, chunks[2]);
    render_grid(f, ui, chunks[3]);
    render_status(f, ui, chunks[4]);

    if ui.current_screen == ScreenState::FilePicker {
        render_file_picker(f, ui, size);
    }

    if let Some(popup) = &ui.popup {
        render_popup(f, popup, size);
    }
}

fn key_span(key: &str, color: Color) -> Span<'_> {
    Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn menu_bar() -> Paragraph<'static> {
    let menu = Line::from(vec![
        Span::styled(" File ", Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(" "),
        key_span("o", Color::Yellow),
        Span::raw(" Select Database   "),
        Span::styled(" Help ", Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(" "),
        key_span("a", Color::Yellow),
        Span::raw(" About  "),
        key_span("p", Color::Yellow),
        Span::raw(" Project page   "),
        key_span("q", Color::Red),
        Span::raw(" Quit"),
    ]);

    Paragraph::new(menu).style(Style::default().bg(Color::Black).fg(Color::White))
}

fn render_title(f: &mut Frame, ui: &DatabaseViewerUI, area: Rect) {
    let file = match ui.session.database() {
        Some(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        None => "no database selected".to_string(),
    };

    let title = Line::from(vec![
        Span::styled(
            APP_NAME,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": "),
        Span::raw(file),
    ]);

    f.render_widget(Paragraph::new(title), area);
}

fn render_tabs(f: &mut Frame, ui: &DatabaseViewerUI, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Tables");
    let tables = ui.session.tables();

    if tables.is_empty() {
        let placeholder = Paragraph::new("No tables")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(placeholder, area);
        return;
    }

    let tabs = Tabs::new(tables.iter().map(String::as_str))
        .block(block)
        .select(ui.session.current_index().unwrap_or(0))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    f.render_widget(tabs, area);
}

fn render_grid(f: &mut Frame, ui: &mut DatabaseViewerUI, area: Rect) {
    let Some(view) = ui.session.view() else {
        let hint = match ui.session.database() {
            Some(_) => "Nothing to show",
            None => "Press o to select a database",
        };
        let placeholder = Paragraph::new(hint)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(placeholder, area);
        return;
    };

    let header = Row::new(view.columns.iter().map(String::as_str)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let rows = view
        .rows
        .iter()
        .map(|row| Row::new(row.iter().map(String::as_str)));

    let title = format!("{} ({} rows)", view.table_name, view.row_count());
    let table = Table::new(rows, column_widths(view))
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));

    f.render_stateful_widget(table, area, &mut ui.grid_state);
}

/// Sizes each column to its widest header or sampled cell.
pub fn column_widths(view: &TableView) -> Vec<Constraint> {
    (0..view.column_count())
        .map(|i| {
            let header = view.columns[i].chars().count();
            let widest = view
                .rows
                .iter()
                .take(WIDTH_SAMPLE_ROWS)
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            let width = header.max(widest).max(1).min(MAX_COLUMN_WIDTH as usize);
            Constraint::Length(width as u16)
        })
        .collect()
}

fn render_status(f: &mut Frame, ui: &DatabaseViewerUI, area: Rect) {
    let help = match ui.current_screen {
        ScreenState::TableView => vec![
            key_span("Left", Color::Yellow),
            Span::raw("/"),
            key_span("Right", Color::Yellow),
            Span::raw(" tables, "),
            key_span("Up", Color::Yellow),
            Span::raw("/"),
            key_span("Down", Color::Yellow),
            Span::raw(" rows, "),
            key_span("s", Color::Green),
            Span::raw(" schema, "),
            key_span("e", Color::Green),
            Span::raw(" export"),
        ],
        ScreenState::FilePicker => vec![
            key_span("Enter", Color::Green),
            Span::raw(" open, "),
            key_span("Backspace", Color::Yellow),
            Span::raw(" up, "),
            key_span("f", Color::Yellow),
            Span::raw(" filter, "),
            key_span("Esc", Color::Red),
            Span::raw(" cancel"),
        ],
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    f.render_widget(
        Paragraph::new(ui.status.as_str()).style(Style::default().fg(Color::White)),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(help)).alignment(Alignment::Right),
        chunks[1],
    );
}

fn render_file_picker(f: &mut Frame, ui: &DatabaseViewerUI, size: Rect) {
    let area = popup_rect(70, 70, size);
    let picker = &ui.picker;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(area);

    let items: Vec<ListItem> = picker
        .entries()
        .iter()
        .map(|entry| match entry.kind {
            EntryKind::Parent | EntryKind::Directory => ListItem::new(format!("{}/", entry.name))
                .style(Style::default().fg(Color::Cyan)),
            EntryKind::File => {
                ListItem::new(entry.name.as_str()).style(Style::default().fg(Color::White))
            }
        })
        .collect();

    let block = Block::default()
        .title(format!("Select Database: {}", picker.dir().display()))
        .borders(Borders::ALL)
        .title_alignment(Alignment::Center);

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(picker.selected()));

    let footer = match picker.error() {
        Some(err) => Paragraph::new(err).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(picker.filter_label()).style(Style::default().fg(Color::Cyan)),
    };

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, chunks[0], &mut state);
    f.render_widget(footer, chunks[1]);
}

fn render_popup(f: &mut Frame, popup: &Popup, size: Rect) {
    let (title, lines) = match popup {
        Popup::Message { title, body } => (
            title.clone(),
            vec![
                Line::from(body.as_str()),
                Line::from(""),
                Line::from(Span::styled(
                    "Press any key to close",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        Popup::About => ("About".to_string(), about_lines()),
        Popup::ProjectPage => (
            "Project page".to_string(),
            vec![
                Line::from("Source code and issue tracker:"),
                Line::from(""),
                Line::from(Span::styled(
                    PROJECT_URL,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                )),
            ],
        ),
        Popup::Schema(schema) => (schema.table_name.clone(), schema_lines(schema)),
    };

    let (percent_x, percent_y) = match popup {
        Popup::About => (80, 90),
        _ => (60, 40),
    };
    let area = popup_rect(percent_x, percent_y, size);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .title_alignment(Alignment::Center),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn about_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Made by grqphical07"),
        Line::from(""),
        Line::from(Span::styled(
            "Licensed under the MIT License:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(LICENSE_TEXT.lines().map(Line::from));
    lines
}

fn schema_lines(schema: &TableSchema) -> Vec<Line<'static>> {
    schema
        .columns
        .iter()
        .map(|col| {
            Line::from(format!(
                "{}: {} (Nullable: {}, Default: {:?})",
                col.name, col.data_type, col.is_nullable, col.default
            ))
        })
        .collect()
}

fn popup_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    centered_rect(percent_x, vertical[1])
}

fn centered_rect(percent_x: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    popup_layout[1]
}
