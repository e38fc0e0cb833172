//! Integration tests running the model layer against every store backend.

mod associations;
mod models;
mod sqlite_file;

use orm_bench_core::store::SqliteStore;
use orm_bench_core::Session;

/// Migrated sessions over each backend, labelled for assertion messages.
pub fn sessions() -> Vec<(&'static str, Session)> {
    let memory = Session::in_memory();
    memory.migrate().unwrap();

    let sqlite = Session::new(Box::new(SqliteStore::open_in_memory().unwrap()));
    sqlite.migrate().unwrap();

    vec![("memory", memory), ("sqlite", sqlite)]
}
