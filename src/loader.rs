use std::path::Path;

use log::info;

use crate::{
    db::{sqlite::SqliteClient, DbClient},
    errors::DbError,
};

/// Opens the database at `path` and lists its tables in catalog order.
///
/// The returned client is only a connection source; the connection used to
/// read the catalog is closed before this returns.
pub async fn load_schema(path: &Path) -> Result<(SqliteClient, Vec<String>), DbError> {
    let client = SqliteClient::new(path);
    let tables = load_tables(path, &client).await?;
    Ok((client, tables))
}

/// Lists the tables of the database at `path` through `client`.
///
/// An empty catalog is reported as [`DbError::EmptySchema`] so callers never
/// have to pick a default table out of an empty list.
pub async fn load_tables(
    path: &Path,
    client: &(dyn DbClient + Send + Sync),
) -> Result<Vec<String>, DbError> {
    let tables = client.list_tables().await?;
    if tables.is_empty() {
        return Err(DbError::EmptySchema(path.to_path_buf()));
    }

    info!("{}: {} table(s)", path.display(), tables.len());
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::MockDbClientMock;

    #[tokio::test]
    async fn test_load_tables_keeps_catalog_order() {
        let mut mock_db = MockDbClientMock::new();
        mock_db
            .expect_list_tables()
            .times(1)
            .returning(|| Ok(vec!["users".to_string(), "orders".to_string()]));

        let tables = load_tables(Path::new("sample.db"), &mock_db).await.unwrap();

        assert_eq!(tables, vec!["users".to_string(), "orders".to_string()]);
    }

    #[tokio::test]
    async fn test_load_tables_rejects_empty_catalog() {
        let mut mock_db = MockDbClientMock::new();
        mock_db.expect_list_tables().returning(|| Ok(Vec::new()));

        let result = load_tables(Path::new("empty.db"), &mock_db).await;

        match result {
            Err(DbError::EmptySchema(path)) => assert_eq!(path, Path::new("empty.db")),
            other => panic!("expected EmptySchema, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_tables_passes_open_error_through() {
        let mut mock_db = MockDbClientMock::new();
        mock_db.expect_list_tables().returning(|| {
            Err(DbError::Open {
                path: "notes.txt".into(),
                reason: "file is not a database".to_string(),
            })
        });

        let result = load_tables(Path::new("notes.txt"), &mock_db).await;

        assert!(matches!(result, Err(DbError::Open { .. })));
    }
}
