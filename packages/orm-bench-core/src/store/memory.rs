//! In-memory store: tables held in a process-local map.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::condition::Condition;
use crate::config::Adapter;
use crate::error::StoreError;
use crate::schema::{Row, TableSchema, Values};
use crate::value::{RecordId, Value};

use super::Store;

/// One table: schema, rows by primary key and the id sequence.
#[derive(Debug)]
struct MemoryTable {
    schema: TableSchema,
    rows: BTreeMap<RecordId, Values>,
    /// Next record ID to assign
    next_id: RecordId,
}

impl MemoryTable {
    fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Store keeping every table in memory.
///
/// Enforces column types and foreign keys the way a relational backend
/// would, so the model layer behaves identically on both stores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Map of table name to table instance
    tables: RwLock<HashMap<String, MemoryTable>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names of all tables, sorted.
    pub fn table_names(&self) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

fn table_not_found(table: &str) -> StoreError {
    StoreError::TableNotFound {
        table: table.to_string(),
    }
}

/// Checks that every non-null foreign key in `values` references an
/// existing row.
fn check_foreign_keys(
    tables: &HashMap<String, MemoryTable>,
    schema: &TableSchema,
    values: &Values,
) -> Result<(), StoreError> {
    for relation in &schema.relations {
        let Some(Value::Integer(id)) = values.get(&relation.from_column) else {
            continue;
        };
        let target = tables
            .get(&relation.to_table)
            .ok_or_else(|| table_not_found(&relation.to_table))?;
        if !target.rows.contains_key(id) {
            return Err(StoreError::ForeignKeyViolation {
                table: schema.name.clone(),
                column: relation.from_column.clone(),
                to_table: relation.to_table.clone(),
                id: *id,
            });
        }
    }
    Ok(())
}

impl Store for MemoryStore {
    fn adapter(&self) -> Adapter {
        Adapter::Memory
    }

    fn create_table(&self, schema: &TableSchema) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(existing) = tables.get(&schema.name) {
            if existing.schema == *schema {
                return Ok(());
            }
            return Err(StoreError::TableAlreadyExists(schema.name.clone()));
        }
        tracing::debug!(table = %schema.name, "create table");
        tables.insert(schema.name.clone(), MemoryTable::new(schema.clone()));
        Ok(())
    }

    fn insert(&self, table: &str, values: &Values) -> Result<RecordId, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        let target = tables.get(table).ok_or_else(|| table_not_found(table))?;
        target.schema.validate_values(values)?;
        check_foreign_keys(&tables, &target.schema, values)?;

        let target = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        let id = target.next_id;
        target.next_id += 1;
        let row = target.schema.complete(values);
        target.rows.insert(id, row);
        tracing::debug!(table, id, "insert");
        Ok(id)
    }

    fn update(&self, table: &str, id: RecordId, values: &Values) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        let target = tables.get(table).ok_or_else(|| table_not_found(table))?;
        target.schema.validate_values(values)?;
        check_foreign_keys(&tables, &target.schema, values)?;

        let target = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        let row = target
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::RecordNotFound {
                table: table.to_string(),
                id,
            })?;
        for (column, value) in values {
            row.insert(column.clone(), value.clone());
        }
        tracing::debug!(table, id, columns = values.len(), "update");
        Ok(())
    }

    fn find(&self, table: &str, id: RecordId) -> Result<Option<Row>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let target = tables.get(table).ok_or_else(|| table_not_found(table))?;
        tracing::debug!(table, id, "find");
        Ok(target.rows.get(&id).map(|values| Row {
            id,
            values: values.clone(),
        }))
    }

    fn select(&self, table: &str, condition: Option<&Condition>) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let target = tables.get(table).ok_or_else(|| table_not_found(table))?;
        if let Some(condition) = condition {
            target.schema.validate_condition(condition)?;
        }

        let rows: Vec<Row> = target
            .rows
            .iter()
            .map(|(id, values)| Row {
                id: *id,
                values: values.clone(),
            })
            .filter(|row| condition.map_or(true, |c| c.matches(row)))
            .collect();
        match condition {
            Some(c) => tracing::debug!(table, condition = %c, rows = rows.len(), "select"),
            None => tracing::debug!(table, rows = rows.len(), "select"),
        }
        Ok(rows)
    }

    fn count(&self, table: &str) -> Result<usize, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let target = tables.get(table).ok_or_else(|| table_not_found(table))?;
        Ok(target.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;
    use crate::value::ColumnType;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        let workplaces =
            TableSchema::new("workplaces", vec![Column::new("office_name", ColumnType::String)])
                .unwrap();
        let people = TableSchema::new(
            "people",
            vec![
                Column::new("age", ColumnType::Integer),
                Column::new("workplace_id", ColumnType::Integer),
            ],
        )
        .unwrap()
        .with_relation("workplace_id", "workplaces")
        .unwrap();
        store.create_table(&workplaces).unwrap();
        store.create_table(&people).unwrap();
        store
    }

    fn values(pairs: &[(&str, Value)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let store = store();
        assert_eq!(store.insert("people", &Values::new()).unwrap(), 1);
        assert_eq!(store.insert("people", &Values::new()).unwrap(), 2);
        assert_eq!(store.count("people").unwrap(), 2);
    }

    #[test]
    fn empty_insert_stores_null_columns() {
        let store = store();
        let id = store.insert("people", &Values::new()).unwrap();
        let row = store.find("people", id).unwrap().unwrap();
        assert!(row.get("age").is_null());
        assert!(row.get("workplace_id").is_null());
    }

    #[test]
    fn create_table_is_idempotent_for_same_schema() {
        let store = store();
        let same =
            TableSchema::new("workplaces", vec![Column::new("office_name", ColumnType::String)])
                .unwrap();
        assert!(store.create_table(&same).is_ok());

        let different =
            TableSchema::new("workplaces", vec![Column::new("city", ColumnType::String)]).unwrap();
        assert!(matches!(
            store.create_table(&different),
            Err(StoreError::TableAlreadyExists(_))
        ));
    }

    #[test]
    fn foreign_keys_must_reference_existing_rows() {
        let store = store();
        let err = store
            .insert("people", &values(&[("workplace_id", Value::Integer(9))]))
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { id: 9, .. }));

        let workplace = store.insert("workplaces", &Values::new()).unwrap();
        let person = store
            .insert(
                "people",
                &values(&[("workplace_id", Value::Integer(workplace))]),
            )
            .unwrap();
        let err = store
            .update("people", person, &values(&[("workplace_id", Value::Integer(99))]))
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
    }

    #[test]
    fn update_overwrites_only_given_columns() {
        let store = store();
        let id = store
            .insert("people", &values(&[("age", Value::Integer(30))]))
            .unwrap();
        store
            .update("people", id, &values(&[("age", Value::Integer(31))]))
            .unwrap();
        let row = store.find("people", id).unwrap().unwrap();
        assert_eq!(row.get("age"), &Value::Integer(31));

        assert!(matches!(
            store.update("people", 42, &Values::new()),
            Err(StoreError::RecordNotFound { id: 42, .. })
        ));
    }

    #[test]
    fn select_filters_with_condition() {
        let store = store();
        for age in [5, 17, 18, 40] {
            store
                .insert("people", &values(&[("age", Value::Integer(age))]))
                .unwrap();
        }
        store.insert("people", &Values::new()).unwrap();

        let children: Condition = "age < 18".parse().unwrap();
        let rows = store.select("people", Some(&children)).unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);

        let unknown: Condition = "height > 3".parse().unwrap();
        assert!(matches!(
            store.select("people", Some(&unknown)),
            Err(StoreError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let store = std::sync::Arc::new(store());
        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.tables.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.table_names(), Err(StoreError::LockPoisoned)));
        assert!(matches!(store.count("people"), Err(StoreError::LockPoisoned)));
    }

    #[test]
    fn unknown_table_is_reported() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.select("people", None),
            Err(StoreError::TableNotFound { .. })
        ));
        assert!(store.table_names().unwrap().is_empty());
        assert_eq!(self::store().table_names().unwrap(), vec!["people", "workplaces"]);
    }
}
