use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::warn;

/// Extensions listed by the picker unless the filter is switched off.
pub const DATABASE_EXTENSIONS: [&str; 3] = ["sqlite", "sqlite3", "db"];
pub const FILTER_LABEL: &str = "Databases (*.sqlite *.sqlite3 *.db)";
pub const ALL_FILES_LABEL: &str = "All files (*)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Selected(PathBuf),
}

/// In-terminal file browser used to choose a database file.
///
/// The extension filter only narrows what is listed; any file the user
/// reaches with the filter off can be selected.
#[derive(Debug)]
pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: usize,
    show_all: bool,
    error: Option<String>,
}

impl FilePicker {
    pub fn new(start_dir: &Path) -> Self {
        let dir = start_dir
            .canonicalize()
            .unwrap_or_else(|_| start_dir.to_path_buf());
        let mut picker = Self {
            dir: dir.clone(),
            entries: Vec::new(),
            selected: 0,
            show_all: false,
            error: None,
        };
        picker.change_dir(&dir);
        picker
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter_label(&self) -> &'static str {
        if self.show_all {
            ALL_FILES_LABEL
        } else {
            FILTER_LABEL
        }
    }

    /// Re-reads the current directory.
    pub fn refresh(&mut self) {
        let dir = self.dir.clone();
        let selected = self.selected;
        self.change_dir(&dir);
        self.selected = selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn move_first(&mut self) {
        self.selected = 0;
    }

    pub fn move_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    pub fn toggle_filter(&mut self) {
        self.show_all = !self.show_all;
        self.refresh();
    }

    pub fn go_parent(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.change_dir(&parent);
        }
    }

    /// Enters the highlighted directory or picks the highlighted file.
    pub fn activate(&mut self) -> PickerAction {
        let Some(entry) = self.entries.get(self.selected).cloned() else {
            return PickerAction::None;
        };

        match entry.kind {
            EntryKind::Parent | EntryKind::Directory => {
                self.change_dir(&entry.path);
                PickerAction::None
            }
            EntryKind::File => PickerAction::Selected(entry.path),
        }
    }

    /// Switches to `dir`; on failure the picker stays where it was.
    fn change_dir(&mut self, dir: &Path) {
        match list_entries(dir, self.show_all) {
            Ok(entries) => {
                self.dir = dir.to_path_buf();
                self.entries = entries;
                self.selected = 0;
                self.error = None;
            }
            Err(err) => {
                warn!("cannot list {}: {}", dir.display(), err);
                self.error = Some(format!("{}: {}", dir.display(), err));
            }
        }
    }
}

/// Whether `path` carries one of the database extensions (any case).
pub fn matches_filter(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            DATABASE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn list_entries(dir: &Path, show_all: bool) -> io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if path.is_dir() {
            dirs.push(PickerEntry {
                name,
                path,
                kind: EntryKind::Directory,
            });
        } else if show_all || matches_filter(&path) {
            files.push(PickerEntry {
                name,
                path,
                kind: EntryKind::File,
            });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let parent = dir.parent().map(|parent| PickerEntry {
        name: "..".to_string(),
        path: parent.to_path_buf(),
        kind: EntryKind::Parent,
    });

    Ok(parent.into_iter().chain(dirs).chain(files).collect())
}
