use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::{
    db::DbClient,
    errors::DbError,
    loader::{load_schema, load_tables},
    models::{grid::TableView, schema::TableSchema},
    render::render_table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoDatabaseOpen,
    /// A file is open but no table is shown, either because its catalog is
    /// empty or because rendering the first table failed.
    DatabaseOpenNoSelection,
    TableDisplayed,
}

/// Everything the viewer knows about the open database.
///
/// Opening a file replaces the whole session; there is no way back to
/// [`SessionState::NoDatabaseOpen`].
#[derive(Default)]
pub struct Session {
    database: Option<PathBuf>,
    client: Option<Box<dyn DbClient + Send + Sync>>,
    tables: Vec<String>,
    current: Option<usize>,
    view: Option<TableView>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match (&self.database, &self.view) {
            (None, _) => SessionState::NoDatabaseOpen,
            (Some(_), None) => SessionState::DatabaseOpenNoSelection,
            (Some(_), Some(_)) => SessionState::TableDisplayed,
        }
    }

    pub fn database(&self) -> Option<&Path> {
        self.database.as_deref()
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_table(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.tables.get(i))
            .map(String::as_str)
    }

    pub fn view(&self) -> Option<&TableView> {
        self.view.as_ref()
    }

    /// Opens the SQLite file at `path` and shows its first table.
    pub async fn open_database(&mut self, path: &Path) -> Result<(), DbError> {
        let loaded = load_schema(path)
            .await
            .map(|(client, tables)| (Box::new(client) as Box<dyn DbClient + Send + Sync>, tables));
        self.install(path, loaded).await
    }

    /// Same as [`Session::open_database`], reading through an existing client.
    pub async fn open_with_client(
        &mut self,
        path: &Path,
        client: Box<dyn DbClient + Send + Sync>,
    ) -> Result<(), DbError> {
        let loaded = load_tables(path, client.as_ref())
            .await
            .map(|tables| (client, tables));
        self.install(path, loaded).await
    }

    async fn install(
        &mut self,
        path: &Path,
        loaded: Result<(Box<dyn DbClient + Send + Sync>, Vec<String>), DbError>,
    ) -> Result<(), DbError> {
        let (client, tables) = match loaded {
            Ok(loaded) => loaded,
            Err(err @ DbError::EmptySchema(_)) => {
                warn!("{}", err);
                *self = Session {
                    database: Some(path.to_path_buf()),
                    ..Session::default()
                };
                return Err(err);
            }
            Err(err) => {
                // A file that cannot be opened leaves the current session alone.
                warn!("{}", err);
                return Err(err);
            }
        };

        info!("opened {}", path.display());
        *self = Session {
            database: Some(path.to_path_buf()),
            client: Some(client),
            tables,
            current: Some(0),
            view: None,
        };

        let first = self.tables[0].clone();
        match self.render(&first).await {
            Ok(view) => {
                self.view = Some(view);
                Ok(())
            }
            Err(err) => {
                warn!("{}", err);
                Err(err)
            }
        }
    }

    /// Renders the table at `index`, replacing the current grid.
    ///
    /// On failure the previous grid and selection are kept.
    pub async fn select_table(&mut self, index: usize) -> Result<(), DbError> {
        let Some(table_name) = self.tables.get(index).cloned() else {
            return Err(DbError::General(format!(
                "No table at position {} ({} available)",
                index,
                self.tables.len()
            )));
        };

        let view = self.render(&table_name).await.inspect_err(|err| {
            warn!("{}", err);
        })?;
        self.current = Some(index);
        self.view = Some(view);
        Ok(())
    }

    pub async fn next_table(&mut self) -> Result<(), DbError> {
        match self.neighbour(1) {
            Some(index) => self.select_table(index).await,
            None => Ok(()),
        }
    }

    pub async fn previous_table(&mut self) -> Result<(), DbError> {
        match self.neighbour(-1) {
            Some(index) => self.select_table(index).await,
            None => Ok(()),
        }
    }

    /// Column details of the current table.
    pub async fn describe_current(&self) -> Result<TableSchema, DbError> {
        let table_name = self
            .current_table()
            .ok_or_else(|| DbError::General("No table selected".to_string()))?;
        self.client()?.describe_table(table_name).await
    }

    fn neighbour(&self, step: isize) -> Option<usize> {
        let len = self.tables.len() as isize;
        if len == 0 {
            return None;
        }
        let index = match self.current {
            Some(i) => (i as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        };
        Some(index as usize)
    }

    fn client(&self) -> Result<&(dyn DbClient + Send + Sync), DbError> {
        self.client
            .as_deref()
            .ok_or_else(|| DbError::General("No database is open".to_string()))
    }

    async fn render(&self, table_name: &str) -> Result<TableView, DbError> {
        render_table(self.client()?, table_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::{schema_of, MockDbClientMock};
    use mockall::predicate;

    fn two_table_client() -> MockDbClientMock {
        let mut mock_db = MockDbClientMock::new();
        mock_db
            .expect_list_tables()
            .returning(|| Ok(vec!["users".to_string(), "orders".to_string()]));
        mock_db
            .expect_describe_table()
            .with(predicate::eq("users"))
            .returning(|_| Ok(schema_of("users", &["id", "name"])));
        mock_db
            .expect_describe_table()
            .with(predicate::eq("orders"))
            .returning(|_| Ok(schema_of("orders", &["id", "user_id"])));
        mock_db
            .expect_fetch_rows()
            .with(predicate::eq("users"))
            .returning(|_| {
                Ok(vec![
                    vec!["1".to_string(), "Alice".to_string()],
                    vec!["2".to_string(), "Bob".to_string()],
                ])
            });
        mock_db
            .expect_fetch_rows()
            .with(predicate::eq("orders"))
            .returning(|_| Ok(Vec::new()));
        mock_db
    }

    #[test]
    fn test_new_session_has_nothing_open() {
        let session = Session::new();

        assert_eq!(session.state(), SessionState::NoDatabaseOpen);
        assert!(session.tables().is_empty());
        assert!(session.view().is_none());
    }

    #[tokio::test]
    async fn test_open_renders_first_table() {
        let mut session = Session::new();

        session
            .open_with_client(Path::new("sample.db"), Box::new(two_table_client()))
            .await
            .unwrap();

        assert_eq!(session.state(), SessionState::TableDisplayed);
        assert_eq!(session.tables(), ["users", "orders"]);
        assert_eq!(session.current_table(), Some("users"));
        let view = session.view().unwrap();
        assert_eq!(view.columns, vec!["id", "name"]);
        assert_eq!(view.rows, vec![vec!["1", "Alice"], vec!["2", "Bob"]]);
    }

    #[tokio::test]
    async fn test_switching_tables_replaces_grid() {
        let mut session = Session::new();
        session
            .open_with_client(Path::new("sample.db"), Box::new(two_table_client()))
            .await
            .unwrap();

        session.select_table(1).await.unwrap();

        assert_eq!(session.current_table(), Some("orders"));
        let view = session.view().unwrap();
        assert_eq!(view.table_name, "orders");
        assert_eq!(view.columns, vec!["id", "user_id"]);
        assert!(view.rows.is_empty());
    }

    #[tokio::test]
    async fn test_next_and_previous_wrap_around() {
        let mut session = Session::new();
        session
            .open_with_client(Path::new("sample.db"), Box::new(two_table_client()))
            .await
            .unwrap();

        session.previous_table().await.unwrap();
        assert_eq!(session.current_table(), Some("orders"));

        session.next_table().await.unwrap();
        assert_eq!(session.current_table(), Some("users"));

        session.next_table().await.unwrap();
        assert_eq!(session.current_table(), Some("orders"));
    }

    #[tokio::test]
    async fn test_select_out_of_range() {
        let mut session = Session::new();
        session
            .open_with_client(Path::new("sample.db"), Box::new(two_table_client()))
            .await
            .unwrap();

        let result = session.select_table(5).await;

        assert!(matches!(result, Err(DbError::General(_))));
        assert_eq!(session.current_table(), Some("users"));
    }

    #[tokio::test]
    async fn test_empty_catalog_clears_previous_database() {
        let mut session = Session::new();
        session
            .open_with_client(Path::new("sample.db"), Box::new(two_table_client()))
            .await
            .unwrap();

        let mut empty = MockDbClientMock::new();
        empty.expect_list_tables().returning(|| Ok(Vec::new()));
        let result = session
            .open_with_client(Path::new("empty.db"), Box::new(empty))
            .await;

        assert!(matches!(result, Err(DbError::EmptySchema(_))));
        assert_eq!(session.state(), SessionState::DatabaseOpenNoSelection);
        assert_eq!(session.database(), Some(Path::new("empty.db")));
        assert!(session.tables().is_empty());
        assert!(session.current_table().is_none());
        assert!(session.view().is_none());
    }

    #[tokio::test]
    async fn test_open_error_keeps_previous_database() {
        let mut session = Session::new();
        session
            .open_with_client(Path::new("sample.db"), Box::new(two_table_client()))
            .await
            .unwrap();

        let mut broken = MockDbClientMock::new();
        broken.expect_list_tables().returning(|| {
            Err(DbError::Open {
                path: "notes.txt".into(),
                reason: "file is not a database".to_string(),
            })
        });
        let result = session
            .open_with_client(Path::new("notes.txt"), Box::new(broken))
            .await;

        assert!(matches!(result, Err(DbError::Open { .. })));
        assert_eq!(session.database(), Some(Path::new("sample.db")));
        assert_eq!(session.tables(), ["users", "orders"]);
        assert_eq!(session.view().unwrap().table_name, "users");
    }

    #[tokio::test]
    async fn test_failed_switch_keeps_grid() {
        let mut mock_db = MockDbClientMock::new();
        mock_db
            .expect_list_tables()
            .returning(|| Ok(vec!["users".to_string(), "gone".to_string()]));
        mock_db
            .expect_describe_table()
            .with(predicate::eq("users"))
            .returning(|_| Ok(schema_of("users", &["id"])));
        mock_db
            .expect_describe_table()
            .with(predicate::eq("gone"))
            .returning(|_| Ok(schema_of("gone", &[])));
        mock_db
            .expect_fetch_rows()
            .with(predicate::eq("users"))
            .returning(|_| Ok(vec![vec!["1".to_string()]]));
        mock_db
            .expect_fetch_rows()
            .with(predicate::eq("gone"))
            .returning(|table| {
                Err(DbError::Query {
                    table: table.to_string(),
                    source: sqlx::Error::RowNotFound,
                })
            });

        let mut session = Session::new();
        session
            .open_with_client(Path::new("sample.db"), Box::new(mock_db))
            .await
            .unwrap();
        let result = session.select_table(1).await;

        assert!(matches!(result, Err(DbError::Query { .. })));
        assert_eq!(session.current_table(), Some("users"));
        assert_eq!(session.view().unwrap().table_name, "users");
    }

    #[tokio::test]
    async fn test_describe_current() {
        let mut session = Session::new();
        assert!(session.describe_current().await.is_err());

        session
            .open_with_client(Path::new("sample.db"), Box::new(two_table_client()))
            .await
            .unwrap();
        let schema = session.describe_current().await.unwrap();

        assert_eq!(schema.column_names(), vec!["id", "name"]);
    }
}
