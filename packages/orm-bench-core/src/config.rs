//! Connection configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Store backend selected by a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adapter {
    /// Process-local tables, discarded on exit
    Memory,
    /// SQLite database file (or `:memory:`)
    Sqlite,
}

impl FromStr for Adapter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Adapter::Memory),
            "sqlite" | "sqlite3" => Ok(Adapter::Sqlite),
            _ => Err(StoreError::UnsupportedAdapter(s.to_string())),
        }
    }
}

impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adapter::Memory => f.write_str("memory"),
            Adapter::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Connection configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Backend kind
    pub adapter: Adapter,
    /// Database name (SQLite: file stem or path)
    pub database: String,
    /// Account name, recorded for server-backed adapters
    pub username: String,
    /// Account password, recorded for server-backed adapters
    pub password: String,
    /// Server host, recorded for server-backed adapters
    pub host: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            adapter: Adapter::Sqlite,
            database: "ao_test2".to_string(),
            username: "root".to_string(),
            password: "mysqlroot".to_string(),
            host: "localhost".to_string(),
        }
    }
}

impl ConnectionConfig {
    /// Path of the SQLite database file.
    ///
    /// A database name without an extension gets `.sqlite3` appended;
    /// `:memory:` is passed through.
    pub fn sqlite_path(&self) -> PathBuf {
        let path = Path::new(&self.database);
        if self.database == ":memory:" || path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension("sqlite3")
        }
    }
}
