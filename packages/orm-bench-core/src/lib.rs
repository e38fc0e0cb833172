//! Store backends, sessions and model declarations for the ORM benchmark.
//!
//! Provides a small relational value/schema layer, two interchangeable
//! store backends (in-memory and SQLite), an explicit session handle, and
//! the four benchmark models with their associations.

pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod schema;
pub mod session;
pub mod store;
pub mod value;

pub use condition::{CompareOp, Condition};
pub use config::{Adapter, ConnectionConfig};
pub use error::StoreError;
pub use model::{Model, Person, Profession, Professional, Workplace};
pub use session::Session;
pub use value::{ColumnType, RecordId, Value};
