//! Error types for the tabula crate.
//!
//! The derivation pipeline itself never fails. Errors come from building a
//! table (column descriptors, options) and from parsing user input such as a
//! page-size choice.

use thiserror::Error;

/// Errors that can occur when configuring a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A table needs at least one column.
    #[error("a table needs at least one column")]
    EmptyColumns,

    /// Two column descriptors share the same id.
    #[error("duplicate column id '{id}'")]
    DuplicateColumn { id: String },

    /// A column id that the table does not declare.
    #[error("unknown column '{id}'")]
    UnknownColumn { id: String },

    /// Page size is neither a positive integer nor `all`.
    #[error("invalid page size '{input}': expected a positive integer or 'all'")]
    InvalidPageSize { input: String },

    /// Options list no page-size choices.
    #[error("page size choices must not be empty")]
    EmptyPageSizeChoices,

    /// Options could not be deserialized.
    #[error("invalid table options: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for tabula operations.
pub type Result<T> = std::result::Result<T, TableError>;
