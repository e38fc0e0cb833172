use orm_bench_core::store::SqliteStore;
use orm_bench_core::{Model, Person, Profession, Professional, Session, Workplace};

use super::persisting::{first_name_at, last_name_at};
use super::*;

fn sessions() -> Vec<(&'static str, Session)> {
    let memory = Session::in_memory();
    memory.migrate().unwrap();

    let sqlite = Session::new(Box::new(SqliteStore::open_in_memory().unwrap()));
    sqlite.migrate().unwrap();

    vec![("memory", memory), ("sqlite", sqlite)]
}

fn person_aged(session: &Session, age: Option<i32>) -> Person {
    let mut person = Person::create(session).unwrap();
    if let Some(age) = age {
        person.set_age(age);
    }
    person.save(session).unwrap();
    person
}

/// One workplace, one profession, one person holding it.
fn minimal_fixture(session: &Session) {
    let mut workplace = Workplace::create(session).unwrap();
    workplace.set_office_name("HQ");
    workplace.save(session).unwrap();

    let mut profession = Profession::create(session).unwrap();
    profession.set_name("Engineer");
    profession.save(session).unwrap();

    let mut person = Person::create(session).unwrap();
    person.set_first_name("Ada");
    person.set_workplace(&workplace);
    person.save(session).unwrap();

    let mut link = Professional::create(session).unwrap();
    link.set_person(&person);
    link.set_profession(&profession);
    link.save(session).unwrap();
}

#[test]
fn phase_report_renders_result_line() {
    let report = PhaseReport {
        phase: Phase::Persistence,
        elapsed_ms: 42,
        records: 3,
    };
    assert_eq!(report.to_string(), "Persistence test: 42 ms");
}

#[test]
fn names_wrap_around_their_pools() {
    assert_eq!(first_name_at(0), "Daniel");
    assert_eq!(first_name_at(FIRST_NAMES.len()), first_name_at(0));
    assert_eq!(last_name_at(LAST_NAMES.len()), "Smith");
    assert_eq!(last_name_at(LAST_NAMES.len() + 1), "Donovich");
}

#[test]
fn queries_split_children_from_adults() {
    for (label, session) in sessions() {
        person_aged(&session, Some(17));
        person_aged(&session, Some(18));
        person_aged(&session, Some(40));
        person_aged(&session, None);

        assert_eq!(Person::filter(&session, "age < 18").unwrap().len(), 1, "{label}");
        assert_eq!(Person::filter(&session, "age >= 18").unwrap().len(), 2, "{label}");

        let (people, report) = queries::run(&session).unwrap();
        assert_eq!(people.len(), 4, "{label}");
        assert_eq!(report.phase, Phase::Queries);
        assert_eq!(report.records, 4);
    }
}

#[test]
fn retrieval_leaves_records_untouched() {
    for (label, session) in sessions() {
        let mut person = Person::create(&session).unwrap();
        person.set_first_name("Grace");
        person.set_age(30);
        person.save(&session).unwrap();

        let before = Person::all(&session).unwrap();
        let report = retrieval::run(&before);
        let after = Person::all(&session).unwrap();

        assert_eq!(report.records, 1, "{label}");
        assert_eq!(after[0].first_name(), Some("Grace"), "{label}");
        assert_eq!(after[0].age(), Some(30), "{label}");
        assert_eq!(after[0].bio(), None, "{label}");
    }
}

#[test]
fn persisting_cycles_names_and_alternates_liveness() {
    for (label, session) in sessions() {
        let count = FIRST_NAMES.len() + 1;
        for _ in 0..count {
            Person::create(&session).unwrap();
        }
        let mut people = Person::all(&session).unwrap();
        persisting::run(&session, &mut people).unwrap();

        let stored = Person::all(&session).unwrap();
        assert_eq!(stored.len(), count, "{label}");
        assert_eq!(stored[count - 1].first_name(), stored[0].first_name(), "{label}");
        for (index, person) in stored.iter().enumerate() {
            let age = person.age().unwrap();
            assert_eq!(age, FIRST_AGE + index as i32, "{label}");
            assert_eq!(person.is_alive(), age % 2 == 0, "{label}");
            assert_eq!(person.bio(), Some(BIO), "{label}");
            assert_eq!(person.last_name(), Some(last_name_at(index)), "{label}");
        }
    }
}

#[test]
fn relations_skip_people_without_workplace() {
    for (label, session) in sessions() {
        minimal_fixture(&session);
        person_aged(&session, Some(50));

        let people = Person::all(&session).unwrap();
        let report = relations::run(&session, &people).unwrap();
        assert_eq!(report.records, 2, "{label}");
    }
}

#[test]
fn full_run_over_minimal_fixture() {
    for (label, session) in sessions() {
        minimal_fixture(&session);

        let mut suite = ModelSuite::new(&session);
        let reports = run_all(&mut suite).unwrap();
        let phases: Vec<Phase> = reports.iter().map(|r| r.phase).collect();
        assert_eq!(
            phases,
            vec![Phase::Queries, Phase::Retrieval, Phase::Persistence, Phase::Relations],
            "{label}"
        );
        assert!(reports.iter().all(|r| r.records == 1), "{label}");

        let person = &Person::all(&session).unwrap()[0];
        assert_eq!(person.first_name(), Some("Daniel"), "{label}");
        assert_eq!(person.age(), Some(FIRST_AGE), "{label}");
        assert!(person.is_alive(), "{label}");
        assert_eq!(person.bio(), Some(BIO), "{label}");
        assert_eq!(person.professions(&session).unwrap().len(), 1, "{label}");
    }
}

#[test]
fn full_run_over_empty_store() {
    let session = Session::in_memory();
    session.migrate().unwrap();
    let reports = run_all(&mut ModelSuite::new(&session)).unwrap();
    assert_eq!(reports.len(), 4);
    assert!(reports.iter().all(|r| r.records == 0));
}
