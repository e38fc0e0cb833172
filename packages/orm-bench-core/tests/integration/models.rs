//! Factory, finder and save behaviour shared by both backends.

use orm_bench_core::schema::{Column, TableSchema};
use orm_bench_core::{ColumnType, Model, Person, Profession, StoreError, Workplace};

use super::sessions;

#[test]
fn create_inserts_an_empty_row() {
    for (backend, session) in sessions() {
        let person = Person::create(&session).unwrap();
        assert_eq!(person.id(), 1, "{backend}");
        assert_eq!(person.first_name(), None, "{backend}");
        assert_eq!(person.age(), None, "{backend}");
        assert!(!person.is_alive(), "{backend}");
        assert_eq!(person.workplace(&session).unwrap(), None, "{backend}");
    }
}

#[test]
fn save_persists_every_field() {
    for (backend, session) in sessions() {
        let mut person = Person::create(&session).unwrap();
        person.set_first_name("Daniel");
        person.set_last_name("Smith");
        person.set_age(16);
        person.set_alive(true);
        person.set_bio("A short story.");
        person.save(&session).unwrap();

        let reloaded = Person::find(&session, person.id()).unwrap();
        assert_eq!(reloaded, person, "{backend}");
        assert!(reloaded.is_alive(), "{backend}");
    }
}

#[test]
fn age_filters_split_explicitly_aged_people() {
    for (backend, session) in sessions() {
        for age in [3, 17, 18, 19, 64] {
            let mut person = Person::create(&session).unwrap();
            person.set_age(age);
            person.save(&session).unwrap();
        }
        // Never aged: matches neither filter.
        Person::create(&session).unwrap();

        let children = Person::filter(&session, "age < 18").unwrap();
        let adults = Person::filter(&session, "age >= 18").unwrap();
        let ages = |people: &[Person]| people.iter().filter_map(Person::age).collect::<Vec<_>>();

        assert_eq!(ages(&children), vec![3, 17], "{backend}");
        assert_eq!(ages(&adults), vec![18, 19, 64], "{backend}");
        assert_eq!(Person::all(&session).unwrap().len(), 6, "{backend}");
    }
}

#[test]
fn find_missing_record_is_an_error() {
    for (backend, session) in sessions() {
        let err = Profession::find(&session, 99).unwrap_err();
        assert!(
            matches!(err, StoreError::RecordNotFound { id: 99, .. }),
            "{backend}: {err}"
        );
    }
}

#[test]
fn malformed_condition_is_rejected() {
    for (backend, session) in sessions() {
        let err = Person::filter(&session, "age <").unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidCondition { .. }),
            "{backend}: {err}"
        );
    }
}

#[test]
fn office_name_reads_with_prefix() {
    for (backend, session) in sessions() {
        let mut workplace = Workplace::create(&session).unwrap();
        assert_eq!(workplace.office_name(), "Office: ", "{backend}");

        workplace.set_office_name("Main Street");
        workplace.set_coffee_quality(7);
        workplace.save(&session).unwrap();

        let reloaded = Workplace::find(&session, workplace.id()).unwrap();
        assert_eq!(reloaded.office_name(), "Office: Main Street", "{backend}");
        assert_eq!(reloaded.stored_office_name(), Some("Main Street"), "{backend}");
        assert_eq!(reloaded.coffee_quality(), Some(7), "{backend}");
    }
}

#[test]
fn migrate_twice_keeps_data() {
    for (backend, session) in sessions() {
        Profession::create(&session).unwrap();
        session.migrate().unwrap();
        assert_eq!(Profession::all(&session).unwrap().len(), 1, "{backend}");
    }
}

#[test]
fn condition_literal_must_match_column_type() {
    for (backend, session) in sessions() {
        let mut person = Person::create(&session).unwrap();
        person.set_first_name("Ada");
        person.set_alive(true);
        person.save(&session).unwrap();

        for condition in ["first_name > 1", "age = 'old'", "alive = 'yes'"] {
            let err = Person::filter(&session, condition).unwrap_err();
            assert!(
                matches!(err, StoreError::TypeMismatch { .. }),
                "{backend}: {condition}: {err}"
            );
        }

        assert_eq!(Person::filter(&session, "alive = 1").unwrap().len(), 1, "{backend}");
        assert_eq!(Person::filter(&session, "alive = true").unwrap().len(), 1, "{backend}");
        let by_id = format!("id = {}", person.id());
        assert_eq!(Person::filter(&session, &by_id).unwrap().len(), 1, "{backend}");
    }
}

#[test]
fn conflicting_table_definition_is_rejected() {
    for (backend, session) in sessions() {
        let mut person = Person::create(&session).unwrap();
        person.set_first_name("Ada");
        person.save(&session).unwrap();

        let conflicting =
            TableSchema::new(Person::TABLE, vec![Column::new("nickname", ColumnType::String)])
                .unwrap();
        let err = session.store().create_table(&conflicting).unwrap_err();
        assert!(
            matches!(err, StoreError::TableAlreadyExists(ref table) if table == Person::TABLE),
            "{backend}: {err}"
        );

        let people = Person::all(&session).unwrap();
        assert_eq!(people[0].first_name(), Some("Ada"), "{backend}");
    }
}
