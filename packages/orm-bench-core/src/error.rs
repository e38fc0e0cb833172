//! Store error types.

use thiserror::Error;

/// Store and model operation errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Table not found
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    /// Table already exists with a different definition
    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),

    /// Column not found in table
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Column declared twice in one table
    #[error("Column '{column}' already exists in table '{table}'")]
    ColumnAlreadyExists { table: String, column: String },

    /// Column name collides with the implicit primary key
    #[error("Column '{column}' in table '{table}' is reserved")]
    ReservedColumn { table: String, column: String },

    /// Type mismatch error
    #[error("Type mismatch for '{column}': expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: String,
        got: String,
    },

    /// Record not found
    #[error("Record {id} not found in table '{table}'")]
    RecordNotFound { table: String, id: i64 },

    /// Non-null foreign key pointing at a missing row
    #[error("Foreign key '{column}' in table '{table}' references missing {to_table} row {id}")]
    ForeignKeyViolation {
        table: String,
        column: String,
        to_table: String,
        id: i64,
    },

    /// Condition string could not be parsed
    #[error("Invalid condition '{condition}': {reason}")]
    InvalidCondition { condition: String, reason: String },

    /// Adapter name not backed by any store
    #[error("Unsupported adapter '{0}'")]
    UnsupportedAdapter(String),

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// SQLite driver error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
