//! In-memory SQLite for tests.

use database::sqlite::{SqliteConfig, connect_from_config};
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// A private in-memory database, dropped with the last connection handle.
///
/// Each `TestDatabase` is isolated from every other one, so tests can run in
/// parallel without sharing rows.
pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// Open an empty database.
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// let conn = db.connection();
    /// # }
    /// ```
    pub async fn new() -> Self {
        let connection = connect_from_config(SqliteConfig::new("sqlite::memory:"))
            .await
            .expect("Failed to open in-memory SQLite database");

        tracing::debug!("Test database ready (SQLite in-memory)");

        Self { connection }
    }

    /// Open a database and run the given DDL statements in order.
    pub async fn with_schema(statements: &[&str]) -> Self {
        let db = Self::new().await;
        for sql in statements {
            db.connection
                .execute_unprepared(sql)
                .await
                .unwrap_or_else(|e| panic!("Failed to apply schema statement `{}`: {}", sql, e));
        }
        db
    }

    /// Clone of the pooled connection handle.
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Count rows in `table`.
    pub async fn count(&self, table: &str) -> i64 {
        let row = self
            .connection
            .query_one_raw(sea_orm::Statement::from_string(
                self.connection.get_database_backend(),
                format!("SELECT COUNT(*) AS n FROM {}", table),
            ))
            .await
            .expect("Failed to count rows")
            .expect("COUNT(*) returned no row");
        row.try_get::<i64>("", "n").expect("COUNT(*) is not an integer")
    }
}
