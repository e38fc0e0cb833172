//! Explicit store session passed to every model operation.

use crate::config::{Adapter, ConnectionConfig};
use crate::error::StoreError;
use crate::model::{Model, Person, Profession, Professional, Workplace};
use crate::store::{self, MemoryStore, Store};

/// Owns one store connection for the lifetime of a benchmark run.
pub struct Session {
    store: Box<dyn Store>,
}

impl Session {
    /// Wraps an already opened store.
    pub fn new(store: Box<dyn Store>) -> Self {
        Self { store }
    }

    /// Opens the store described by `config`.
    pub fn establish(config: &ConnectionConfig) -> Result<Self, StoreError> {
        tracing::info!(
            adapter = %config.adapter,
            database = %config.database,
            username = %config.username,
            host = %config.host,
            "establishing connection"
        );
        Ok(Self::new(store::connect(config)?))
    }

    /// Session over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn adapter(&self) -> Adapter {
        self.store.adapter()
    }

    /// Creates the benchmark tables if missing.
    ///
    /// Tables are created referenced-first so foreign keys resolve.
    pub fn migrate(&self) -> Result<(), StoreError> {
        let schemas = [
            Workplace::schema()?,
            Profession::schema()?,
            Person::schema()?,
            Professional::schema()?,
        ];
        for schema in &schemas {
            self.store.create_table(schema)?;
        }
        tracing::info!(tables = schemas.len(), "schema migrated");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("adapter", &self.adapter())
            .finish()
    }
}
