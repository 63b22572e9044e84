//! The owned handle to the relational store.
//!
//! One deadpool pool for the process; each call checks a connection out for
//! the duration of a single query, so concurrent chart recomputations never
//! share a connection.

use crate::config::DbConfig;
use crate::error::Result;
use crate::query::QuerySpec;
use deadpool_postgres::{Client, Pool};
use tokio_postgres::Row;
use tracing::trace;

#[derive(Clone)]
pub struct Store {
    pool: Pool,
}

impl Store {
    /// Build the pool from configuration. Connections are established
    /// lazily, so this does not prove the store is reachable.
    pub fn connect(config: &DbConfig) -> Result<Self> {
        Ok(Self {
            pool: config.create_pool()?,
        })
    }

    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Execute a built query with its date parameters bound.
    pub async fn query(&self, spec: &QuerySpec) -> Result<Vec<Row>> {
        let conn: Client = self.pool.get().await?;
        trace!("executing: {}", spec.sql);
        Ok(conn.query(spec.sql.as_str(), &spec.params()).await?)
    }

    /// Table names under the `stocks` schema; the raw ticker universe.
    pub(crate) async fn stock_tables(&self) -> Result<Vec<String>> {
        let conn: Client = self.pool.get().await?;
        let rows = conn
            .query(
                "SELECT tablename FROM pg_tables WHERE schemaname = 'stocks'",
                &[],
            )
            .await?;
        Ok(rows.iter().map(|row| row.get("tablename")).collect())
    }
}
