//! The four timed benchmark phases.
//!
//! A suite supplies the query phase (which produces the working set of
//! people); retrieval, persistence and relation traversal are shared by
//! every suite and run against that working set in order.

pub mod persisting;
pub mod queries;
pub mod relations;
pub mod retrieval;

#[cfg(test)]
mod tests;

use std::fmt;

use orm_bench_core::{Person, Session, StoreError};
use serde::Serialize;

/// First-name pool cycled through by the persistence phase.
pub const FIRST_NAMES: &[&str] = &[
    "Daniel", "Chris", "Joseph", "Renee", "Bethany", "Grace", "Karen", "Larry", "Moya",
];

/// Last-name pool cycled through by the persistence phase.
pub const LAST_NAMES: &[&str] = &["Smith", "Donovich", "Quieones", "Felger", "Gere", "Covis", "Dawes"];

/// Biography written to every person by the persistence phase.
pub const BIO: &str = "This is the story of two mice.  Well, actually it's the story of more than \
two mice, but we only have time for the shortened version.  They (the mice) \
were on this road one day, looking for upturned clods of grass - for you see, \
this is what mice do - and they came across a peddler, peddling his wares. \
After the usual confusion between 'ware', 'where' and 'were' (leading to some \
dicy moments involving a silver bullet and frantic references to the impending \
lunar cycle, the mice managed to extract a piece of useful information out of the \
peddler's ramblings.  However, the remainder of this story, and the usefulness \
of the peddlers account will have to wait for the SQL, which I am afraid is \
going to be very late in arrival.";

/// Age given to the first person by the persistence phase.
pub const FIRST_AGE: i32 = 16;

/// Benchmark phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Queries,
    Retrieval,
    Persistence,
    Relations,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Queries => "Queries",
            Phase::Retrieval => "Retrieval",
            Phase::Persistence => "Persistence",
            Phase::Relations => "Relations",
        };
        f.write_str(name)
    }
}

/// Timing of one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub elapsed_ms: u64,
    /// Records in the working set the phase ran over
    pub records: usize,
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} test: {} ms", self.phase, self.elapsed_ms)
    }
}

/// A benchmark suite over one session.
pub trait BenchmarkSuite {
    fn session(&self) -> &Session;

    /// Runs the suite's queries and returns the working set of people.
    fn test_queries(&mut self) -> Result<(Vec<Person>, PhaseReport), StoreError>;

    /// Reads every field of every person; mutates nothing.
    fn test_retrieval(&mut self, people: &[Person]) -> Result<PhaseReport, StoreError> {
        Ok(retrieval::run(people))
    }

    /// Renames, re-ages and re-describes every person, saving each.
    fn test_persisting(&mut self, people: &mut [Person]) -> Result<PhaseReport, StoreError> {
        persisting::run(self.session(), people)
    }

    /// Walks professions and workplace colleagues of every person.
    fn test_relations(&mut self, people: &[Person]) -> Result<PhaseReport, StoreError> {
        relations::run(self.session(), people)
    }
}

/// Runs all four phases once, in order.
pub fn run_all<S: BenchmarkSuite + ?Sized>(suite: &mut S) -> Result<Vec<PhaseReport>, StoreError> {
    let (mut people, queries) = suite.test_queries()?;
    if people.is_empty() {
        tracing::warn!("query phase returned no people; later phases have nothing to do");
    }
    let retrieval = suite.test_retrieval(&people)?;
    let persisting = suite.test_persisting(&mut people)?;
    let relations = suite.test_relations(&people)?;
    Ok(vec![queries, retrieval, persisting, relations])
}

/// Suite that goes through the model layer.
pub struct ModelSuite<'a> {
    session: &'a Session,
}

impl<'a> ModelSuite<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl BenchmarkSuite for ModelSuite<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn test_queries(&mut self) -> Result<(Vec<Person>, PhaseReport), StoreError> {
        queries::run(self.session)
    }
}
