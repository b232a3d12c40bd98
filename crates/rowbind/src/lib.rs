//! # rowbind
//!
//! A minimal typed data-mapping layer for PostgreSQL.
//!
//! Column names and bound values are derived from declarative field tags;
//! single-table INSERT and SELECT statements are assembled per model without
//! hand-written SQL.
//!
//! ## Features
//!
//! - **Declarative metadata**: one tag string per field (`"user_id,primary"`)
//! - **Type-safe mapping**: Row → Struct via the `FromRow` trait
//! - **Parameter binding**: values are bound, never embedded as literals
//! - **Back-assignment**: the generated id is written into the inserted model
//!
//! ## Example
//!
//! ```ignore
//! use rowbind::{FromRow, Model, Query};
//!
//! #[derive(Debug, Model, FromRow)]
//! #[orm(table = "users")]
//! struct User {
//!     #[orm(tag = "user_id,primary")]
//!     user_id: i64,
//!     email: String,
//!     password: Option<String>,
//! }
//!
//! let query = Query::<_, User>::new(&client);
//! let id = query.insert(&mut user).await?;
//! let users = query.find().await?;
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod query;
pub mod tag;

pub use client::GenericClient;
pub use error::{MapError, MapResult};
pub use model::{FieldDescriptor, FromRow, Model, RowExt, columns, placeholders};
pub use query::Query;
pub use tag::ColumnTag;

#[cfg(feature = "derive")]
pub use rowbind_derive::{FromRow, Model};
