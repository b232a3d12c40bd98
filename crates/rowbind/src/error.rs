//! Error types for rowbind

use thiserror::Error;

/// Result type alias for mapping operations
pub type MapResult<T> = Result<T, MapError>;

/// Error types for mapping and statement execution
#[derive(Debug, Error)]
pub enum MapError {
    /// Malformed field tag metadata (e.g. an empty column name)
    #[error("Invalid tag on field '{field}': {message}")]
    Parse { field: String, message: String },

    /// Optional field dereferenced while unset
    #[error("Field '{field}' is unset and cannot be serialized")]
    NullField { field: String },

    /// Primary-key assignment target rejected the generated identifier
    #[error("Primary key field '{field}' cannot be assigned: {message}")]
    ImmutableField { field: String, message: String },

    /// Statement execution error
    #[error("Execution error: {0}")]
    Execution(#[from] tokio_postgres::Error),

    /// Row decode/mapping error
    #[error("Mapping error on column '{column}': {message}")]
    Mapping { column: String, message: String },
}

impl MapError {
    /// Create a parse error for a specific field
    pub fn parse(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a null-field error for a specific field
    pub fn null_field(field: impl Into<String>) -> Self {
        Self::NullField {
            field: field.into(),
        }
    }

    /// Create an immutable-field error for a specific field
    pub fn immutable_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ImmutableField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a mapping error for a specific column
    pub fn mapping(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a null-field error
    pub fn is_null_field(&self) -> bool {
        matches!(self, Self::NullField { .. })
    }

    /// Check if this is an execution error
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}
