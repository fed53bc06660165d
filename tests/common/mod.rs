use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, Executor, SqliteConnection};

pub const SAMPLE_SQL: &str = r#"
    CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
    INSERT INTO users (id, name) VALUES (1, 'Alice'), (2, 'Bob');
    CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER);
"#;

pub async fn create_database(dir: &Path, file_name: &str, sql: &str) -> PathBuf {
    let path = dir.join(file_name);
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options)
        .await
        .expect("Failed to create the test database");

    if !sql.trim().is_empty() {
        conn.execute(sql).await.expect("Failed to seed the test database");
    }
    conn.close().await.unwrap();

    path
}

pub async fn sample_db(dir: &Path) -> PathBuf {
    create_database(dir, "sample.db", SAMPLE_SQL).await
}
