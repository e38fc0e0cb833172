use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use orm_bench_bridge::ClassPath;
use orm_bench_core::{Adapter, ConnectionConfig};

/// Report format on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One "<Phase> test: <n> ms" line per phase
    Text,
    /// JSON array of run reports
    Json,
}

/// Times query, retrieval, persistence and relation traversal through the
/// model layer. With no arguments it connects using the built-in defaults.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store adapter (memory, sqlite)
    #[arg(long, default_value = "sqlite")]
    pub adapter: String,

    /// Database name
    #[arg(long, default_value = "ao_test2")]
    pub database: String,

    /// Database user
    #[arg(long, default_value = "root")]
    pub username: String,

    /// Database password
    #[arg(long, default_value = "mysqlroot")]
    pub password: String,

    /// Database host
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// People to seed when the people table is empty (0 disables seeding)
    #[arg(long, default_value_t = 100)]
    pub seed: usize,

    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also run the comparison driver through the class bridge
    #[arg(long)]
    pub compare: bool,

    /// Classes directory placed first on the bridge class path
    #[arg(long, default_value = "bin")]
    pub classes_dir: PathBuf,

    /// Directory scanned for .jar/.war archives
    #[arg(long, default_value = "lib")]
    pub libs_dir: PathBuf,

    /// Extra directory appended to the bridge class path after the archives
    /// (repeatable)
    #[arg(long = "class-path-entry", value_name = "DIR")]
    pub class_path_entries: Vec<PathBuf>,
}

impl Cli {
    /// Builds the connection configuration from the arguments.
    pub fn connection_config(&self) -> anyhow::Result<ConnectionConfig> {
        let adapter: Adapter = self
            .adapter
            .parse()
            .with_context(|| format!("Invalid --adapter '{}'", self.adapter))?;
        Ok(ConnectionConfig {
            adapter,
            database: self.database.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            host: self.host.clone(),
        })
    }

    /// Builds the bridge class path: classes directory, archives from the
    /// libraries directory, then every `--class-path-entry` in order.
    ///
    /// An unreadable libraries directory is logged and skipped.
    pub fn class_path(&self) -> ClassPath {
        let mut class_path = match ClassPath::discover(&self.classes_dir, &self.libs_dir) {
            Ok(class_path) => class_path,
            Err(e) => {
                tracing::warn!(error = %e, "libraries directory unavailable; skipping archives");
                let mut class_path = ClassPath::new();
                class_path.push_directory(&self.classes_dir);
                class_path
            }
        };
        for entry in &self.class_path_entries {
            class_path.push_directory(entry);
        }
        class_path
    }

    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid --log-level '{}'", self.log_level))
    }
}
