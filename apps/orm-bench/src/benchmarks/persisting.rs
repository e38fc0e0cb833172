use orm_bench_core::{Model, Person, Session, StoreError};

use super::{Phase, PhaseReport, BIO, FIRST_AGE, FIRST_NAMES, LAST_NAMES};
use crate::utils::Stopwatch;

/// First name given to the person at `index` in the working set.
pub fn first_name_at(index: usize) -> &'static str {
    FIRST_NAMES[index % FIRST_NAMES.len()]
}

/// Last name given to the person at `index` in the working set.
pub fn last_name_at(index: usize) -> &'static str {
    LAST_NAMES[index % LAST_NAMES.len()]
}

/// Two passes, each saving every person: names first, then age, liveness
/// and bio. Ages count up from [`FIRST_AGE`]; only even ages are alive.
pub fn run(session: &Session, people: &mut [Person]) -> Result<PhaseReport, StoreError> {
    let stopwatch = Stopwatch::started();

    for (index, person) in people.iter_mut().enumerate() {
        person.set_first_name(first_name_at(index));
        person.set_last_name(last_name_at(index));
        person.save(session)?;
    }

    let mut age = FIRST_AGE;
    for person in people.iter_mut() {
        person.set_age(age);
        person.set_alive(age % 2 == 0);
        person.set_bio(BIO);
        person.save(session)?;
        age += 1;
    }

    Ok(PhaseReport {
        phase: Phase::Persistence,
        elapsed_ms: stopwatch.stop(),
        records: people.len(),
    })
}
