//! Belongs-to, has-many and has-many-through traversal.

use orm_bench_core::{Model, Person, Profession, Professional, Workplace};

use super::sessions;

#[test]
fn person_belongs_to_workplace_and_workplace_has_people() {
    for (backend, session) in sessions() {
        let workplace = Workplace::create(&session).unwrap();
        let mut alice = Person::create(&session).unwrap();
        let mut bob = Person::create(&session).unwrap();
        let loner = Person::create(&session).unwrap();
        for person in [&mut alice, &mut bob] {
            person.set_workplace(&workplace);
            person.save(&session).unwrap();
        }

        let found = alice.workplace(&session).unwrap().unwrap();
        assert_eq!(found.id(), workplace.id(), "{backend}");

        let people = workplace.people(&session).unwrap();
        let ids: Vec<_> = people.iter().map(Person::id).collect();
        assert_eq!(ids, vec![alice.id(), bob.id()], "{backend}");
        assert!(!ids.contains(&loner.id()), "{backend}");
    }
}

#[test]
fn professions_are_reached_through_professionals() {
    for (backend, session) in sessions() {
        let person = Person::create(&session).unwrap();
        let other = Person::create(&session).unwrap();

        let mut names = Vec::new();
        for name in ["Engineer", "Baker"] {
            let mut profession = Profession::create(&session).unwrap();
            profession.set_name(name);
            profession.save(&session).unwrap();

            let mut link = Professional::create(&session).unwrap();
            link.set_person(&person);
            link.set_profession(&profession);
            link.save(&session).unwrap();
            names.push(name);
        }
        // Dangling join row without a profession is skipped.
        let mut partial = Professional::create(&session).unwrap();
        partial.set_person(&person);
        partial.save(&session).unwrap();

        let professions = person.professions(&session).unwrap();
        let found: Vec<_> = professions.iter().filter_map(Profession::name).collect();
        assert_eq!(found, names, "{backend}");
        assert_eq!(person.professionals(&session).unwrap().len(), 3, "{backend}");
        assert!(other.professions(&session).unwrap().is_empty(), "{backend}");

        let link = &person.professionals(&session).unwrap()[0];
        assert_eq!(link.person(&session).unwrap().unwrap().id(), person.id(), "{backend}");
        assert_eq!(
            link.profession(&session).unwrap().unwrap().name(),
            Some("Engineer"),
            "{backend}"
        );
    }
}

#[test]
fn dangling_foreign_key_is_refused_by_the_store() {
    for (backend, session) in sessions() {
        let workplace = Workplace::create(&session).unwrap();
        let mut person = Person::create(&session).unwrap();
        person.set_workplace(&workplace);
        person.save(&session).unwrap();

        let mut ghost = Person::create(&session).unwrap();
        let phantom = Workplace::default();
        ghost.set_workplace(&phantom);
        assert!(ghost.save(&session).is_err(), "{backend}");
    }
}
