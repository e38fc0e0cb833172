use std::hint::black_box;

use orm_bench_core::{Person, Session, StoreError};

use super::{Phase, PhaseReport};
use crate::utils::Stopwatch;

/// For every person: each profession's name, then first and last name of
/// everyone at the same workplace. One lookup per association per person.
pub fn run(session: &Session, people: &[Person]) -> Result<PhaseReport, StoreError> {
    let stopwatch = Stopwatch::started();
    let mut without_workplace = 0usize;

    for person in people {
        for profession in person.professions(session)? {
            black_box(profession.name());
        }

        let Some(workplace) = person.workplace(session)? else {
            without_workplace += 1;
            continue;
        };
        for colleague in workplace.people(session)? {
            black_box(colleague.first_name());
            black_box(colleague.last_name());
        }
    }

    let elapsed_ms = stopwatch.stop();
    if without_workplace > 0 {
        tracing::warn!(without_workplace, "people without a workplace skipped colleague traversal");
    }
    Ok(PhaseReport {
        phase: Phase::Relations,
        elapsed_ms,
        records: people.len(),
    })
}
