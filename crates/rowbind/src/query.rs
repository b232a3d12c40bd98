//! Generic INSERT/SELECT statement builder.

use crate::client::GenericClient;
use crate::error::{MapError, MapResult};
use crate::model::{Model, columns, placeholders};
use std::marker::PhantomData;
use tracing::debug;

/// A statement builder bound to a client, a table name, and a model type.
///
/// The binding is stateless per call and owns no data beyond its
/// configuration; concurrent use is as safe as the underlying client.
///
/// # Example
///
/// ```ignore
/// let query = Query::<_, User>::new(&client);
/// let id = query.insert(&mut user).await?;
/// let users = query.find().await?;
/// ```
pub struct Query<'a, C, M> {
    client: &'a C,
    table: &'static str,
    _model: PhantomData<M>,
}

impl<'a, C: GenericClient, M: Model> Query<'a, C, M> {
    /// Bind a client to `M`'s table (the `#[orm(table = "...")]` attribute).
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            table: M::TABLE,
            _model: PhantomData,
        }
    }

    /// Bind a client to an explicit table name, overriding `M::TABLE`.
    pub fn with_table(client: &'a C, table: &'static str) -> Self {
        Self {
            client,
            table,
            _model: PhantomData,
        }
    }

    /// The generated INSERT statement text.
    pub fn insert_sql(&self) -> String {
        let cols = columns::<M>(false);
        let mut sql = if cols.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", self.table)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                cols,
                placeholders::<M>(false)
            )
        };
        if let Some(pk) = M::primary_key() {
            sql.push_str(" RETURNING ");
            sql.push_str(&pk.column);
        }
        sql
    }

    /// The generated SELECT statement text.
    pub fn find_sql(&self) -> String {
        format!("SELECT {} FROM {}", columns::<M>(true), self.table)
    }

    // Tag metadata with an empty column name would produce malformed SQL;
    // reject it up front instead.
    fn validate(&self) -> MapResult<()> {
        for f in M::fields() {
            if f.column.is_empty() {
                return Err(MapError::parse(f.field, "tag has an empty column name"));
            }
        }
        Ok(())
    }

    /// Insert one row and back-assign the generated identifier.
    ///
    /// Returns the storage-assigned identifier when `M` declares a primary
    /// key, `None` otherwise. The row is either fully committed or an error
    /// is returned; nothing is retried.
    pub async fn insert(&self, model: &mut M) -> MapResult<Option<i64>> {
        self.validate()?;
        let sql = self.insert_sql();
        let params = model.bind_values(false)?;
        debug!(sql = %sql, "insert");

        let Some(pk) = M::primary_key() else {
            self.client.execute(&sql, &params).await?;
            return Ok(None);
        };

        let rows = self.client.query(&sql, &params).await?;
        let row = rows
            .first()
            .ok_or_else(|| MapError::mapping(&pk.column, "INSERT returned no row"))?;
        // SERIAL primary keys come back as int4, BIGSERIAL as int8.
        let id: i64 = match row.try_get::<_, i64>(0) {
            Ok(id) => id,
            Err(_) => row
                .try_get::<_, i32>(0)
                .map(i64::from)
                .map_err(|e| MapError::mapping(&pk.column, e.to_string()))?,
        };
        model.assign_primary_key(id)?;
        Ok(Some(id))
    }

    /// Fetch every row of the table, mapped through `M`'s field set.
    pub async fn find(&self) -> MapResult<Vec<M>> {
        self.validate()?;
        let sql = self.find_sql();
        debug!(sql = %sql, "find");
        let rows = self.client.query(&sql, &[]).await?;
        rows.iter().map(M::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDescriptor, FromRow, RowExt};
    use std::sync::OnceLock;
    use tokio_postgres::Row;
    use tokio_postgres::types::ToSql;

    /// Client stub backed by no storage: queries yield zero rows.
    struct EmptyClient;

    impl GenericClient for EmptyClient {
        async fn query(&self, _sql: &str, _params: &[&(dyn ToSql + Sync)]) -> MapResult<Vec<Row>> {
            Ok(Vec::new())
        }

        async fn execute(&self, _sql: &str, _params: &[&(dyn ToSql + Sync)]) -> MapResult<u64> {
            Ok(1)
        }
    }

    #[derive(Debug)]
    struct User {
        user_id: i64,
        email: String,
        password: Option<String>,
    }

    impl FromRow for User {
        fn from_row(row: &Row) -> MapResult<Self> {
            Ok(Self {
                user_id: row.try_get_column("user_id")?,
                email: row.try_get_column("email")?,
                password: row.try_get_column("password")?,
            })
        }
    }

    impl Model for User {
        const TABLE: &'static str = "user";

        fn fields() -> &'static [FieldDescriptor] {
            static FIELDS: OnceLock<Vec<FieldDescriptor>> = OnceLock::new();
            FIELDS.get_or_init(|| {
                vec![
                    FieldDescriptor::from_tag("user_id", "user_id,primary", false),
                    FieldDescriptor::from_tag("email", "email", false),
                    FieldDescriptor::from_tag("password", "password", true),
                ]
            })
        }

        fn bind_values(&self, include_primary: bool) -> MapResult<Vec<&(dyn ToSql + Sync)>> {
            let mut values: Vec<&(dyn ToSql + Sync)> = Vec::new();
            if include_primary {
                values.push(&self.user_id);
            }
            values.push(&self.email);
            match self.password.as_ref() {
                Some(v) => values.push(v),
                None => return Err(MapError::null_field("password")),
            }
            Ok(values)
        }

        fn assign_primary_key(&mut self, id: i64) -> MapResult<()> {
            self.user_id = id;
            Ok(())
        }
    }

    /// Append-only log line: no primary key at all.
    #[derive(Debug)]
    struct AuditEntry {
        message: String,
    }

    impl FromRow for AuditEntry {
        fn from_row(row: &Row) -> MapResult<Self> {
            Ok(Self {
                message: row.try_get_column("message")?,
            })
        }
    }

    impl Model for AuditEntry {
        const TABLE: &'static str = "audit_log";

        fn fields() -> &'static [FieldDescriptor] {
            static FIELDS: OnceLock<Vec<FieldDescriptor>> = OnceLock::new();
            FIELDS.get_or_init(|| vec![FieldDescriptor::from_tag("message", "message", false)])
        }

        fn bind_values(&self, _include_primary: bool) -> MapResult<Vec<&(dyn ToSql + Sync)>> {
            Ok(vec![&self.message])
        }

        fn assign_primary_key(&mut self, _id: i64) -> MapResult<()> {
            Err(MapError::immutable_field(
                "AuditEntry",
                "model declares no primary key field",
            ))
        }
    }

    /// Tag with an empty column name, kept verbatim by the parser.
    #[derive(Debug)]
    struct BadTag {
        value: i64,
    }

    impl FromRow for BadTag {
        fn from_row(row: &Row) -> MapResult<Self> {
            Ok(Self {
                value: row.try_get_column("value")?,
            })
        }
    }

    impl Model for BadTag {
        const TABLE: &'static str = "bad";

        fn fields() -> &'static [FieldDescriptor] {
            static FIELDS: OnceLock<Vec<FieldDescriptor>> = OnceLock::new();
            FIELDS.get_or_init(|| vec![FieldDescriptor::from_tag("value", ",primary", false)])
        }

        fn bind_values(&self, _include_primary: bool) -> MapResult<Vec<&(dyn ToSql + Sync)>> {
            Ok(vec![&self.value])
        }

        fn assign_primary_key(&mut self, _id: i64) -> MapResult<()> {
            Ok(())
        }
    }

    #[test]
    fn insert_sql_excludes_primary_and_returns_it() {
        let client = EmptyClient;
        let query = Query::<_, User>::new(&client);
        assert_eq!(
            query.insert_sql(),
            "INSERT INTO user (email, password) VALUES ($1, $2) RETURNING user_id"
        );
    }

    #[test]
    fn find_sql_includes_primary() {
        let client = EmptyClient;
        let query = Query::<_, User>::new(&client);
        assert_eq!(query.find_sql(), "SELECT user_id, email, password FROM user");
    }

    #[test]
    fn explicit_table_overrides_model_table() {
        let client = EmptyClient;
        let query = Query::<_, User>::with_table(&client, "app_user");
        assert_eq!(
            query.find_sql(),
            "SELECT user_id, email, password FROM app_user"
        );
    }

    #[test]
    fn insert_sql_without_primary_key_has_no_returning() {
        let client = EmptyClient;
        let query = Query::<_, AuditEntry>::new(&client);
        assert_eq!(
            query.insert_sql(),
            "INSERT INTO audit_log (message) VALUES ($1)"
        );
    }

    #[tokio::test]
    async fn find_on_empty_table_returns_empty_vec() {
        let client = EmptyClient;
        let query = Query::<_, User>::new(&client);
        let users = query.find().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn insert_without_primary_key_returns_no_id() {
        let client = EmptyClient;
        let query = Query::<_, AuditEntry>::new(&client);
        let mut entry = AuditEntry {
            message: "started".to_string(),
        };
        let id = query.insert(&mut entry).await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn insert_surfaces_null_field_before_execution() {
        let client = EmptyClient;
        let query = Query::<_, User>::new(&client);
        let mut user = User {
            user_id: 0,
            email: "a@b.com".to_string(),
            password: None,
        };
        let err = query.insert(&mut user).await.unwrap_err();
        assert!(err.is_null_field());
    }

    #[tokio::test]
    async fn empty_column_name_is_rejected_as_parse_error() {
        let client = EmptyClient;
        let query = Query::<_, BadTag>::new(&client);
        let err = query.find().await.unwrap_err();
        assert!(matches!(err, MapError::Parse { ref field, .. } if field == "value"));
    }
}
