//! On-disk SQLite databases survive reconnection.

use orm_bench_core::schema::{Column, TableSchema};
use orm_bench_core::store::{SqliteStore, Store};
use orm_bench_core::{
    Adapter, ColumnType, ConnectionConfig, Model, Person, Session, StoreError, Workplace,
};
use tempfile::tempdir;

#[test]
fn data_persists_across_sessions() {
    let temp_dir = tempdir().unwrap();
    let config = ConnectionConfig {
        adapter: Adapter::Sqlite,
        database: temp_dir.path().join("bench").to_string_lossy().into_owned(),
        ..Default::default()
    };
    assert!(config.sqlite_path().ends_with("bench.sqlite3"));

    let person_id = {
        let session = Session::establish(&config).unwrap();
        session.migrate().unwrap();
        let mut workplace = Workplace::create(&session).unwrap();
        workplace.set_office_name("Depot");
        workplace.save(&session).unwrap();

        let mut person = Person::create(&session).unwrap();
        person.set_first_name("Grace");
        person.set_workplace(&workplace);
        person.save(&session).unwrap();
        person.id()
    };

    let session = Session::establish(&config).unwrap();
    session.migrate().unwrap();
    let person = Person::find(&session, person_id).unwrap();
    assert_eq!(person.first_name(), Some("Grace"));
    let workplace = person.workplace(&session).unwrap().unwrap();
    assert_eq!(workplace.office_name(), "Office: Depot");
    assert_eq!(session.store().count(Person::TABLE).unwrap(), 1);
}

#[test]
fn memory_adapter_starts_empty() {
    let config = ConnectionConfig {
        adapter: Adapter::Memory,
        ..Default::default()
    };
    let session = Session::establish(&config).unwrap();
    session.migrate().unwrap();
    assert_eq!(session.adapter(), Adapter::Memory);
    assert!(Person::all(&session).unwrap().is_empty());
}

#[test]
fn stored_table_with_other_columns_is_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("conflict.sqlite3");
    {
        let session = Session::new(Box::new(SqliteStore::open(&path).unwrap()));
        session.migrate().unwrap();
        let mut person = Person::create(&session).unwrap();
        person.set_first_name("Ada");
        person.save(&session).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let conflicting =
        TableSchema::new(Person::TABLE, vec![Column::new("nickname", ColumnType::String)])
            .unwrap();
    assert!(matches!(
        store.create_table(&conflicting),
        Err(StoreError::TableAlreadyExists(_))
    ));

    let session = Session::new(Box::new(store));
    session.migrate().unwrap();
    let people = Person::all(&session).unwrap();
    assert_eq!(people[0].first_name(), Some("Ada"));
}
