use crate::{
    errors::DbError,
    models::{grid::Row, schema::TableSchema},
};
use async_trait::async_trait;

pub mod sqlite;

/// Read-only access to one database file.
///
/// Implementations must not hold a connection between calls: every method
/// opens its own connection and closes it before returning.
#[async_trait]
pub trait DbClient {
    async fn list_tables(&self) -> Result<Vec<String>, DbError>;
    async fn describe_table(&self, table_name: &str) -> Result<TableSchema, DbError>;
    /// Every row of `table_name`, each value converted to display text.
    async fn fetch_rows(&self, table_name: &str) -> Result<Vec<Row>, DbError>;
}
