use std::time::Instant;

use orm_bench_core::{Model, Person, Profession, Professional, Session, StoreError, Workplace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::benchmarks::persisting::{first_name_at, last_name_at};

/// Wall-clock timer for one phase.
#[derive(Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stopwatch that is already running.
    pub fn started() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Captures the start timestamp, restarting if already running.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Milliseconds since [`start`](Self::start), truncated. Zero if never
    /// started.
    pub fn stop(&self) -> u64 {
        self.started
            .map(|started| (started.elapsed().as_secs_f64() * 1000.0) as u64)
            .unwrap_or(0)
    }
}

const SEED: u64 = 0x5EED_0A0B;

const PROFESSION_NAMES: &[&str] = &[
    "Engineer",
    "Teacher",
    "Baker",
    "Carpenter",
    "Nurse",
    "Pilot",
    "Librarian",
    "Farmer",
];

/// Row counts written by [`seed_fixture`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub workplaces: usize,
    pub professions: usize,
    pub people: usize,
    pub professionals: usize,
}

/// Populates an empty schema with a deterministic fixture of `people`
/// people spread over one workplace per ten people, each holding one to
/// three professions.
pub fn seed_fixture(session: &Session, people: usize) -> Result<SeedSummary, StoreError> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut summary = SeedSummary::default();

    let mut workplaces = Vec::new();
    for i in 0..(people / 10).max(1) {
        let mut workplace = Workplace::create(session)?;
        workplace.set_office_name(format!("Building {}", i + 1));
        workplace.set_coffee_quality(rng.gen_range(1..=10));
        workplace.save(session)?;
        workplaces.push(workplace);
    }
    summary.workplaces = workplaces.len();

    let mut professions = Vec::new();
    for name in PROFESSION_NAMES {
        let mut profession = Profession::create(session)?;
        profession.set_name(*name);
        profession.save(session)?;
        professions.push(profession);
    }
    summary.professions = professions.len();

    for i in 0..people {
        let mut person = Person::create(session)?;
        person.set_first_name(first_name_at(i));
        person.set_last_name(last_name_at(i));
        let age = rng.gen_range(1..=90);
        person.set_age(age);
        person.set_alive(rng.gen_bool(0.9));
        person.set_workplace(&workplaces[i % workplaces.len()]);
        person.save(session)?;

        let held = rng.gen_range(1..=3);
        for profession in professions.choose_multiple(&mut rng, held) {
            let mut link = Professional::create(session)?;
            link.set_person(&person);
            link.set_profession(profession);
            link.save(session)?;
            summary.professionals += 1;
        }
        summary.people += 1;

        if (i + 1) % 1_000 == 0 {
            tracing::info!(seeded = i + 1, total = people, "seeding people");
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::timeout;

    #[test]
    #[timeout(5000)]
    fn stop_right_after_start_is_near_zero() {
        let stopwatch = Stopwatch::started();
        assert!(stopwatch.stop() < 50);
    }

    #[test]
    fn stop_without_start_is_zero() {
        assert_eq!(Stopwatch::new().stop(), 0);
    }

    #[test]
    #[timeout(5000)]
    fn stopwatch_measures_sleep() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert!(stopwatch.stop() >= 20);
    }

    #[test]
    fn seeding_is_deterministic() {
        let first = Session::in_memory();
        first.migrate().unwrap();
        let second = Session::in_memory();
        second.migrate().unwrap();

        let a = seed_fixture(&first, 25).unwrap();
        let b = seed_fixture(&second, 25).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.people, 25);
        assert_eq!(a.workplaces, 2);
        assert_eq!(a.professions, PROFESSION_NAMES.len());
        assert!(a.professionals >= 25 && a.professionals <= 75);

        let ages = |s: &Session| {
            Person::all(s)
                .unwrap()
                .iter()
                .map(Person::age)
                .collect::<Vec<_>>()
        };
        assert_eq!(ages(&first), ages(&second));
        for person in Person::all(&first).unwrap() {
            assert!(person.workplace(&first).unwrap().is_some());
            assert!(!person.professions(&first).unwrap().is_empty());
        }
    }
}
