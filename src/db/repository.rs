use rusqlite::{params, OptionalExtension, ToSql};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::Table;

use super::dimension::{Dimension, DimensionStore};
use super::schema::SCHEMA;

/// Single shared handle to the SQLite store, opened once per run.
pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;
        Self::init(conn).await
    }

    #[allow(dead_code)]
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    /// Foreign keys stay declared but unenforced, so each table of a batch
    /// loads or fails on its own.
    async fn init(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.pragma_update(None, "foreign_keys", false)?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    // Dimension operations

    pub async fn find_dimension(&self, dimension: Dimension, name: &str) -> Result<Option<i64>> {
        let sql = format!(
            "SELECT id FROM {} WHERE {} = ?1",
            dimension.table(),
            dimension.name_column()
        );
        let name = name.to_string();
        let id = self
            .conn
            .call(move |conn| {
                let id: Option<i64> = conn
                    .query_row(&sql, params![name], |row| row.get(0))
                    .optional()?;
                Ok(id)
            })
            .await?;
        Ok(id)
    }

    /// Inserts outside any explicit transaction, so the row is committed
    /// before the new id is handed back.
    pub async fn insert_dimension(&self, dimension: Dimension, name: &str) -> Result<i64> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES (?1)",
            dimension.table(),
            dimension.name_column()
        );
        let name = name.to_string();
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(&sql, params![name])?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        Ok(id)
    }

    // Bulk operations

    /// Inserts every row of `table` in one transaction. Values are bound by
    /// column name, so the statement always lines up with the table's own
    /// column list. Any failing row rolls the whole insert back.
    pub async fn bulk_insert(&self, table: Table) -> Result<usize> {
        if table.is_empty() {
            return Ok(0);
        }

        let placeholders: Vec<String> = table.columns.iter().map(|c| format!(":{}", c)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name,
            table.columns.join(", "),
            placeholders.join(", ")
        );

        let inserted = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let mut inserted = 0;
                {
                    let mut stmt = tx.prepare(&sql)?;
                    for row in &table.rows {
                        let named: Vec<(&str, &dyn ToSql)> = placeholders
                            .iter()
                            .map(String::as_str)
                            .zip(row.iter().map(|v| v as &dyn ToSql))
                            .collect();
                        inserted += stmt.execute(named.as_slice())?;
                    }
                }
                tx.commit()?;
                Ok(inserted)
            })
            .await?;
        Ok(inserted)
    }

    pub async fn count_rows(&self, table: &'static str) -> Result<i64> {
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 =
                    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                        row.get(0)
                    })?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }
}

impl DimensionStore for Repository {
    async fn find(&self, dimension: Dimension, name: &str) -> Result<Option<i64>> {
        self.find_dimension(dimension, name).await
    }

    async fn insert(&self, dimension: Dimension, name: &str) -> Result<i64> {
        self.insert_dimension(dimension, name).await
    }
}
