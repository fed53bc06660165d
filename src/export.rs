use std::{
    fs::File,
    path::{Path, PathBuf},
};

use csv::Writer;
use log::info;

use crate::{errors::DbError, models::grid::TableView};

/// Writes `view` to `<dir>/<table>.csv`, header row first.
///
/// Returns the path of the written file.
pub fn export_view_to_csv(view: &TableView, dir: &Path) -> Result<PathBuf, DbError> {
    let file_path = dir.join(format!("{}.csv", file_stem(&view.table_name)));

    let file = File::create(&file_path).map_err(|e| DbError::Export(e.to_string()))?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(&view.columns)
        .map_err(|e| DbError::Export(e.to_string()))?;
    for row in &view.rows {
        wtr.write_record(row)
            .map_err(|e| DbError::Export(e.to_string()))?;
    }
    wtr.flush().map_err(|e| DbError::Export(e.to_string()))?;

    info!(
        "exported {} row(s) of '{}' to {}",
        view.row_count(),
        view.table_name,
        file_path.display()
    );
    Ok(file_path)
}

/// Table names may contain characters that are not valid in file names.
fn file_stem(table_name: &str) -> String {
    let stem: String = table_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "table".to_string()
    } else {
        stem
    }
}
