//! Model metadata and row mapping traits.
//!
//! Field descriptors are built once per model, in declaration order, from
//! the raw tag strings the derive macro records. Declaration order is the
//! single source of truth for column/value alignment.

use crate::error::MapResult;
use crate::tag::ColumnTag;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Derived, read-only view of one model field.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    /// Rust field name, used to name the field in errors
    pub field: &'static str,
    /// Column name: the tag's first token, verbatim
    pub column: String,
    /// Whether the tag carries the `primary` marker
    pub primary: bool,
    /// Whether the field's declared type is `Option<T>`
    pub optional: bool,
}

impl FieldDescriptor {
    /// Build a descriptor from a raw tag string.
    pub fn from_tag(field: &'static str, tag: &str, optional: bool) -> Self {
        let ColumnTag { column, primary } = ColumnTag::parse(tag);
        Self {
            field,
            column,
            primary,
            optional,
        }
    }
}

/// Trait binding a struct to its table metadata.
///
/// This trait should typically be derived using `#[derive(Model)]` from the
/// `rowbind-derive` crate:
///
/// ```ignore
/// use rowbind::{FromRow, Model};
///
/// #[derive(Model, FromRow)]
/// #[orm(table = "users")]
/// struct User {
///     #[orm(tag = "user_id,primary")]
///     user_id: i64,
///     email: String,
///     password: Option<String>,
/// }
/// ```
pub trait Model: FromRow {
    /// Table name from the mandatory `#[orm(table = "...")]` attribute.
    const TABLE: &'static str;

    /// Ordered field descriptors, built once per model on first use.
    fn fields() -> &'static [FieldDescriptor];

    /// Ordered bound values for this instance.
    ///
    /// Applies the same primary-key filtering as [`columns`], so the two
    /// stay in lock-step. `Option` fields are dereferenced; an unset
    /// optional fails with [`MapError::NullField`](crate::MapError::NullField)
    /// naming the field.
    fn bind_values(&self, include_primary: bool) -> MapResult<Vec<&(dyn ToSql + Sync)>>;

    /// Assign a storage-generated identifier into the primary-key field.
    ///
    /// Fails with [`MapError::ImmutableField`](crate::MapError::ImmutableField)
    /// when the model declares no primary key or the identifier does not fit
    /// the field's type.
    fn assign_primary_key(&mut self, id: i64) -> MapResult<()>;

    /// Descriptor of the primary-key field, if any.
    fn primary_key() -> Option<&'static FieldDescriptor> {
        Self::fields().iter().find(|f| f.primary)
    }
}

/// Comma-joined column list for `M`, in declaration order.
///
/// A field marked primary is skipped unless `include_primary` is set. A
/// model with zero eligible fields yields an empty string.
pub fn columns<M: Model>(include_primary: bool) -> String {
    M::fields()
        .iter()
        .filter(|f| include_primary || !f.primary)
        .map(|f| f.column.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `$1, $2, ...` placeholder list aligned 1:1 with [`columns`].
pub fn placeholders<M: Model>(include_primary: bool) -> String {
    let eligible = M::fields()
        .iter()
        .filter(|f| include_primary || !f.primary)
        .count();
    (1..=eligible)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Trait for converting a database row into a Rust struct.
///
/// This trait should typically be derived using `#[derive(FromRow)]`
/// from the `rowbind-derive` crate.
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> MapResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning `MapError::Mapping` on failure
    fn try_get_column<T>(&self, column: &str) -> MapResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> MapResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| crate::error::MapError::mapping(column, e.to_string()))
    }
}
