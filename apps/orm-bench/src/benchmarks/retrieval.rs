use std::hint::black_box;

use orm_bench_core::Person;

use super::{Phase, PhaseReport};
use crate::utils::Stopwatch;

/// Reads first name, last name, age, liveness and bio of every person.
pub fn run(people: &[Person]) -> PhaseReport {
    let stopwatch = Stopwatch::started();

    for person in people {
        black_box(person.first_name());
        black_box(person.last_name());
        black_box(person.age());
        black_box(person.is_alive());
        black_box(person.bio());
    }

    PhaseReport {
        phase: Phase::Retrieval,
        elapsed_ms: stopwatch.stop(),
        records: people.len(),
    }
}
