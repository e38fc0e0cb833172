//! Store backends.
//!
//! A [`Store`] owns one connection to a backing database and exposes the
//! row-level operations the model layer needs. Two backends are provided:
//! [`MemoryStore`] keeps tables in process memory, [`SqliteStore`] talks to
//! a SQLite database through `rusqlite`.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::condition::Condition;
use crate::config::{Adapter, ConnectionConfig};
use crate::error::StoreError;
use crate::schema::{Row, TableSchema, Values};
use crate::value::RecordId;

/// Row-level access to a relational backend.
///
/// All operations block until the backend has completed them.
pub trait Store: Send {
    /// Backend kind of this store.
    fn adapter(&self) -> Adapter;

    /// Creates `schema` if it does not exist yet.
    ///
    /// Creating an identical table twice is not an error; a differing
    /// definition under the same name is [`StoreError::TableAlreadyExists`].
    fn create_table(&self, schema: &TableSchema) -> Result<(), StoreError>;

    /// Inserts a row and returns its assigned primary key.
    ///
    /// Columns missing from `values` are stored as `Null`.
    fn insert(&self, table: &str, values: &Values) -> Result<RecordId, StoreError>;

    /// Overwrites the given columns of row `id`.
    fn update(&self, table: &str, id: RecordId, values: &Values) -> Result<(), StoreError>;

    /// Fetches one row by primary key.
    fn find(&self, table: &str, id: RecordId) -> Result<Option<Row>, StoreError>;

    /// Fetches every row matching `condition` (all rows when `None`), in
    /// primary key order.
    fn select(&self, table: &str, condition: Option<&Condition>) -> Result<Vec<Row>, StoreError>;

    /// Number of rows in `table`.
    fn count(&self, table: &str) -> Result<usize, StoreError>;
}

/// Opens a store for `config`.
pub fn connect(config: &ConnectionConfig) -> Result<Box<dyn Store>, StoreError> {
    match config.adapter {
        Adapter::Memory => Ok(Box::new(MemoryStore::new())),
        Adapter::Sqlite => Ok(Box::new(SqliteStore::open(config.sqlite_path())?)),
    }
}
