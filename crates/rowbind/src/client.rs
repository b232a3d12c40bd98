//! Generic client trait for unified database access.

use crate::error::{MapError, MapResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// The storage-handle contract consumed by [`Query`](crate::Query).
///
/// Opening, pinging, and closing the connection belong to the caller. This
/// layer performs no locking of its own; concurrent statement execution is
/// as safe as the implementing handle makes it.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = MapResult<Vec<Row>>> + Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = MapResult<u64>> + Send;
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> MapResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(MapError::from)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> MapResult<u64> {
        tokio_postgres::Client::execute(self, sql, params)
            .await
            .map_err(MapError::from)
    }
}
