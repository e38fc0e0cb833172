//! Comparison driver reached through the class bridge.
//!
//! Runs the same four phases as [`crate::benchmarks`] directly on store
//! rows, skipping the model layer, so the two timings can be compared.

use std::hint::black_box;

use anyhow::anyhow;
use orm_bench_bridge::{Arg, ArgType, ArgsExt, ClassDef, ClassRegistry, ObjectHandle, Value};
use orm_bench_core::schema::{Row, Values};
use orm_bench_core::{Adapter, CompareOp, Condition, ConnectionConfig, Session, StoreError};
use parking_lot::Mutex;

use crate::benchmarks::persisting::{first_name_at, last_name_at};
use crate::benchmarks::{Phase, PhaseReport, BIO, FIRST_AGE};
use crate::utils::Stopwatch;

/// Bridge name of the comparison driver class.
pub const RAW_DRIVER_CLASS: &str = "ormbench.drivers.RawStoreDriver";

/// Bridge name of the report list returned by `run`.
pub const REPORTS_CLASS: &str = "ormbench.drivers.PhaseReports";

/// Benchmark driver over raw rows.
pub struct RawStoreDriver {
    session: Mutex<Session>,
}

impl RawStoreDriver {
    /// Opens and migrates its own session.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, StoreError> {
        let session = Session::establish(config)?;
        session.migrate()?;
        Ok(Self::new(session))
    }

    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    /// Runs all four phases once, in order.
    pub fn run(&self) -> Result<Vec<PhaseReport>, StoreError> {
        let session = self.session.lock();
        let (mut people, queries) = queries(&session)?;
        let retrieval = retrieval(&people);
        let persisting = persisting(&session, &mut people)?;
        let relations = relations(&session, &people)?;
        Ok(vec![queries, retrieval, persisting, relations])
    }
}

fn queries(session: &Session) -> Result<(Vec<Row>, PhaseReport), StoreError> {
    let store = session.store();
    let stopwatch = Stopwatch::started();

    let children = store.select("people", Some(&Condition::new("age", CompareOp::Lt, 18)))?;
    let adults = store.select("people", Some(&Condition::new("age", CompareOp::Ge, 18)))?;
    let professions = store.select("professions", None)?;
    let professionals = store.select("professionals", None)?;
    let people = store.select("people", None)?;

    let elapsed_ms = stopwatch.stop();
    black_box((children, adults, professions, professionals));
    let report = PhaseReport {
        phase: Phase::Queries,
        elapsed_ms,
        records: people.len(),
    };
    Ok((people, report))
}

fn retrieval(people: &[Row]) -> PhaseReport {
    let stopwatch = Stopwatch::started();
    for row in people {
        for column in ["first_name", "last_name", "age", "alive", "bio"] {
            black_box(row.get(column));
        }
    }
    PhaseReport {
        phase: Phase::Retrieval,
        elapsed_ms: stopwatch.stop(),
        records: people.len(),
    }
}

fn persisting(session: &Session, people: &mut [Row]) -> Result<PhaseReport, StoreError> {
    let store = session.store();
    let stopwatch = Stopwatch::started();

    for (index, row) in people.iter_mut().enumerate() {
        let mut names = Values::new();
        names.insert("first_name".to_string(), first_name_at(index).into());
        names.insert("last_name".to_string(), last_name_at(index).into());
        store.update("people", row.id, &names)?;
        row.values.extend(names);
    }

    let mut age = FIRST_AGE;
    for row in people.iter_mut() {
        let mut details = Values::new();
        details.insert("age".to_string(), age.into());
        details.insert("alive".to_string(), (age % 2 == 0).into());
        details.insert("bio".to_string(), BIO.into());
        store.update("people", row.id, &details)?;
        row.values.extend(details);
        age += 1;
    }

    Ok(PhaseReport {
        phase: Phase::Persistence,
        elapsed_ms: stopwatch.stop(),
        records: people.len(),
    })
}

fn relations(session: &Session, people: &[Row]) -> Result<PhaseReport, StoreError> {
    let store = session.store();
    let stopwatch = Stopwatch::started();

    for person in people {
        let links = store.select("professionals", Some(&Condition::eq("person_id", person.id)))?;
        for link in links {
            if let Some(profession_id) = link.get("profession_id").as_i64() {
                if let Some(profession) = store.find("professions", profession_id)? {
                    black_box(profession.get("name"));
                }
            }
        }

        if let Some(workplace_id) = person.get("workplace_id").as_i64() {
            let colleagues =
                store.select("people", Some(&Condition::eq("workplace_id", workplace_id)))?;
            for colleague in &colleagues {
                black_box(colleague.get("first_name"));
                black_box(colleague.get("last_name"));
            }
        }
    }

    Ok(PhaseReport {
        phase: Phase::Relations,
        elapsed_ms: stopwatch.stop(),
        records: people.len(),
    })
}

/// Registers [`RAW_DRIVER_CLASS`] with a `(String adapter, String database)`
/// constructor and a static `run(RawStoreDriver)` method.
pub fn register(registry: &ClassRegistry) -> Result<(), orm_bench_bridge::BridgeError> {
    let class = ClassDef::new(RAW_DRIVER_CLASS)
        .constructor([ArgType::String, ArgType::String], |args: &[Arg]| {
            let adapter: Adapter = args.str_at(0)?.parse()?;
            let config = ConnectionConfig {
                adapter,
                database: args.str_at(1)?.to_string(),
                ..ConnectionConfig::default()
            };
            let driver = RawStoreDriver::connect(&config)?;
            Ok(Value::Object(ObjectHandle::new(RAW_DRIVER_CLASS, driver)))
        })
        .static_method(
            "run",
            [ArgType::object(RAW_DRIVER_CLASS)],
            |args: &[Arg]| {
                let handle = args.object_at(0)?;
                let driver = handle
                    .downcast_ref::<RawStoreDriver>()
                    .ok_or_else(|| anyhow!("{} is not a {}", handle.class_name(), RAW_DRIVER_CLASS))?;
                let reports = driver.run()?;
                Ok(Value::Object(ObjectHandle::new(REPORTS_CLASS, reports)))
            },
        );
    registry.register(class)?;
    Ok(())
}
