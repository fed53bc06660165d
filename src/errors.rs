use std::path::PathBuf;

use thiserror::Error;

/// Custom error type for database operations.
#[derive(Error, Debug)]
pub enum DbError {
    /// The selected file could not be opened as a SQLite database.
    #[error("Cannot open {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },
    /// A query against a table failed (e.g. the table no longer exists).
    #[error("Query on table '{table}' failed: {source}")]
    Query {
        table: String,
        #[source]
        source: sqlx::Error,
    },
    /// The database opened fine but its catalog lists no tables.
    #[error("{} contains no tables", .0.display())]
    EmptySchema(PathBuf),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Export error: {0}")]
    Export(String),
    /// Configuration error (e.g. a configured directory does not exist).
    #[error("Configuration error: {0}")]
    Config(String),
    /// General error with a custom message.
    #[error("Error: {0}")]
    General(String),
}

impl DbError {
    /// Short title for the popup that reports this error.
    pub fn title(&self) -> &'static str {
        match self {
            DbError::Open { .. } => "Invalid database",
            DbError::Query { .. } | DbError::Sqlx(_) => "Query failed",
            DbError::EmptySchema(_) => "No tables",
            DbError::Export(_) => "Export failed",
            DbError::Config(_) => "Configuration",
            DbError::General(_) => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_the_error_kind_apart() {
        let open = DbError::Open {
            path: PathBuf::from("notes.txt"),
            reason: "file is not a database".to_string(),
        };
        let empty = DbError::EmptySchema(PathBuf::from("empty.db"));
        let query = DbError::Query {
            table: "orders".to_string(),
            source: sqlx::Error::RowNotFound,
        };

        assert_eq!(open.to_string(), "Cannot open notes.txt: file is not a database");
        assert_eq!(empty.to_string(), "empty.db contains no tables");
        assert!(query.to_string().starts_with("Query on table 'orders' failed"));

        assert_eq!(open.title(), "Invalid database");
        assert_eq!(empty.title(), "No tables");
        assert_eq!(query.title(), "Query failed");
    }
}
