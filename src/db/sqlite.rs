use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow},
    Connection, Row, TypeInfo, ValueRef,
};

use crate::{
    errors::DbError,
    models::{
        grid::Row as GridRow,
        schema::{ColumnSchema, TableSchema},
    },
};

use super::DbClient;

/// Text shown for SQL `NULL` values.
pub const NULL_TEXT: &str = "NULL";

const LIST_TABLES_QUERY: &str = "SELECT name FROM sqlite_master WHERE type = 'table'";
// Generated columns (hidden 2 and 3) are part of `SELECT *`, so they are kept.
// Hidden virtual-table columns (hidden 1) are not.
const TABLE_INFO_QUERY: &str = r#"SELECT name, type, "notnull", dflt_value
    FROM pragma_table_xinfo(?1)
    WHERE hidden IN (0, 2, 3)"#;

/// Connection source for a single SQLite file.
///
/// Holds no connection of its own: each operation connects, runs its
/// queries and closes the connection again.
#[derive(Debug, Clone)]
pub struct SqliteClient {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl SqliteClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false);

        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection, DbError> {
        debug!("connecting to {}", self.path.display());
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| self.open_error(e))
    }

    async fn close(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!("failed to close {}: {}", self.path.display(), e);
        }
    }

    fn open_error(&self, err: sqlx::Error) -> DbError {
        DbError::Open {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl DbClient for SqliteClient {
    async fn list_tables(&self) -> Result<Vec<String>, DbError> {
        let mut conn = self.connect().await?;
        let fetched = sqlx::query_scalar::<_, String>(LIST_TABLES_QUERY)
            .fetch_all(&mut conn)
            .await;
        self.close(conn).await;

        // A file that is not a database only fails once its header is read,
        // which happens on this first query.
        fetched.map_err(|e| self.open_error(e))
    }

    async fn describe_table(&self, table_name: &str) -> Result<TableSchema, DbError> {
        let mut conn = self.connect().await?;
        let fetched = sqlx::query(TABLE_INFO_QUERY)
            .bind(table_name)
            .fetch_all(&mut conn)
            .await;
        self.close(conn).await;

        let query_error = |source| DbError::Query {
            table: table_name.to_string(),
            source,
        };

        let columns = fetched
            .map_err(query_error)?
            .iter()
            .map(|row| -> Result<ColumnSchema, sqlx::Error> {
                Ok(ColumnSchema {
                    name: row.try_get("name")?,
                    data_type: row.try_get("type")?,
                    is_nullable: row.try_get::<i64, _>("notnull")? == 0,
                    default: row.try_get("dflt_value")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(query_error)?;

        Ok(TableSchema {
            table_name: table_name.to_string(),
            columns,
        })
    }

    async fn fetch_rows(&self, table_name: &str) -> Result<Vec<GridRow>, DbError> {
        let query = format!("SELECT * FROM {}", quote_identifier(table_name));

        let mut conn = self.connect().await?;
        let fetched = sqlx::query(&query).fetch_all(&mut conn).await;
        self.close(conn).await;

        let query_error = |source| DbError::Query {
            table: table_name.to_string(),
            source,
        };

        fetched
            .map_err(query_error)?
            .iter()
            .map(row_to_text)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(query_error)
    }
}

/// Quotes `name` for use as an SQL identifier.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn row_to_text(row: &SqliteRow) -> Result<GridRow, sqlx::Error> {
    (0..row.len()).map(|i| cell_text(row, i)).collect()
}

/// Converts one value to its display text based on its storage class.
fn cell_text(row: &SqliteRow, index: usize) -> Result<String, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(NULL_TEXT.to_string());
    }
    let storage_class = raw.type_info().name().to_string();

    let text = match storage_class.as_str() {
        "INTEGER" => row.try_get::<i64, _>(index)?.to_string(),
        "REAL" => row.try_get::<f64, _>(index)?.to_string(),
        // Text is not guaranteed to be valid UTF-8, so it is read as bytes too.
        _ => String::from_utf8_lossy(&row.try_get::<Vec<u8>, _>(index)?).into_owned(),
    };

    Ok(text)
}
