//! ORM benchmark runner.
//!
//! Connects to the configured store, seeds a fixture when the schema is
//! empty, times the four benchmark phases through the model layer and
//! optionally repeats them through the comparison driver on the class
//! bridge.

mod benchmarks;
mod cli;
mod comparison;
mod utils;

use anyhow::{bail, Context};
use clap::Parser;
use orm_bench_bridge::{Arg, ClassLoader, ClassRegistry};
use orm_bench_core::{Adapter, ConnectionConfig, Model, Person, Session};
use serde::Serialize;

use crate::benchmarks::{ModelSuite, PhaseReport};
use crate::cli::{Cli, OutputFormat};
use crate::comparison::RAW_DRIVER_CLASS;

/// Phase timings of one driver.
#[derive(Debug, Serialize)]
struct RunReport {
    adapter: Adapter,
    driver: &'static str,
    phases: Vec<PhaseReport>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level()?)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = cli.connection_config()?;
    let session = Session::establish(&config)
        .with_context(|| format!("Failed to connect to '{}'", config.database))?;
    session.migrate().context("Failed to migrate schema")?;

    let existing = session
        .store()
        .count(Person::TABLE)
        .context("Failed to count people")?;
    if existing == 0 && cli.seed > 0 {
        let summary =
            utils::seed_fixture(&session, cli.seed).context("Failed to seed fixture")?;
        tracing::info!(
            workplaces = summary.workplaces,
            professions = summary.professions,
            people = summary.people,
            professionals = summary.professionals,
            "fixture seeded"
        );
    } else {
        tracing::info!(people = existing, "using existing data");
    }

    let phases = benchmarks::run_all(&mut ModelSuite::new(&session))
        .context("Model benchmark failed")?;
    let mut runs = vec![RunReport {
        adapter: config.adapter,
        driver: "model",
        phases,
    }];

    if cli.compare {
        // The raw driver opens its own connection and must see the same data.
        drop(session);
        let phases = run_comparison(&cli, &config)?;
        runs.push(RunReport {
            adapter: config.adapter,
            driver: "raw",
            phases,
        });
    }

    match cli.format {
        OutputFormat::Text => {
            for run in &runs {
                if runs.len() > 1 {
                    println!("[{}]", run.driver);
                }
                for phase in &run.phases {
                    println!("{}", phase);
                }
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&runs).context("Failed to encode report")?
            );
        }
    }

    Ok(())
}

fn run_comparison(cli: &Cli, config: &ConnectionConfig) -> anyhow::Result<Vec<PhaseReport>> {
    if config.adapter != Adapter::Sqlite || config.database == ":memory:" {
        bail!("--compare needs a shared on-disk store; use --adapter sqlite with a named database");
    }

    let class_path = cli.class_path();
    tracing::info!(%class_path, "bridge class path");
    tracing::debug!(urls = ?class_path.urls(), "bridge class path urls");

    let registry = ClassRegistry::new();
    comparison::register(&registry).context("Failed to register comparison driver")?;
    tracing::debug!(classes = ?registry.class_names(), "bridge classes registered");
    let loader = ClassLoader::new(class_path, registry);

    let class = loader
        .for_name(RAW_DRIVER_CLASS)
        .context("Failed to load comparison driver")?;
    let driver = class
        .invoke(
            "new",
            &[
                Arg::from(config.adapter.to_string()),
                Arg::from(config.database.as_str()),
            ],
        )
        .context("Failed to construct comparison driver")?;
    let driver = driver
        .as_object()
        .cloned()
        .context("Comparison driver constructor returned no object")?;

    let reports = class
        .invoke("run", &[Arg::from(driver)])
        .context("Comparison driver failed")?;
    reports
        .as_object()
        .and_then(|o| o.downcast_ref::<Vec<PhaseReport>>())
        .cloned()
        .context("Comparison driver returned no phase reports")
}
