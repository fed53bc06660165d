use serde::{Deserialize, Serialize};

/// One row of the grid, a display string per column.
pub type Row = Vec<String>;

/// Everything needed to draw one table: its column names and all of its rows,
/// both discovered at render time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TableView {
    pub table_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableView {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
