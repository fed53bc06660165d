use log::info;

use crate::{db::DbClient, errors::DbError, models::grid::TableView};

/// Builds a fresh grid for `table_name`: its columns in natural order, then
/// every row from an unbounded `SELECT *`.
pub async fn render_table(
    client: &(dyn DbClient + Send + Sync),
    table_name: &str,
) -> Result<TableView, DbError> {
    let columns = client.describe_table(table_name).await?.column_names();
    let rows = client.fetch_rows(table_name).await?;

    info!(
        "rendered '{}': {} column(s), {} row(s)",
        table_name,
        columns.len(),
        rows.len()
    );

    Ok(TableView {
        table_name: table_name.to_string(),
        columns,
        rows,
    })
}
