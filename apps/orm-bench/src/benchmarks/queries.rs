use std::hint::black_box;

use orm_bench_core::{Model, Person, Profession, Professional, Session, StoreError};

use super::{Phase, PhaseReport};
use crate::utils::Stopwatch;

/// Children, adults, every profession, every professional, then every
/// person, which becomes the working set.
pub fn run(session: &Session) -> Result<(Vec<Person>, PhaseReport), StoreError> {
    let stopwatch = Stopwatch::started();

    let children = Person::filter(session, "age < 18")?;
    let adults = Person::filter(session, "age >= 18")?;
    let professions = Profession::all(session)?;
    let professionals = Professional::all(session)?;
    let people = Person::all(session)?;

    let elapsed_ms = stopwatch.stop();
    tracing::debug!(
        children = children.len(),
        adults = adults.len(),
        professions = professions.len(),
        professionals = professionals.len(),
        people = people.len(),
        "queries complete"
    );
    black_box((children, adults, professions, professionals));

    let report = PhaseReport {
        phase: Phase::Queries,
        elapsed_ms,
        records: people.len(),
    };
    Ok((people, report))
}
