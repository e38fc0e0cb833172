//! SQLite store backed by `rusqlite`.
//!
//! Table definitions registered through [`Store::create_table`] are kept so
//! that rows read back can be typed per column (SQLite stores booleans as
//! integers) and so that condition columns can be checked before any SQL is
//! built.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension, ToSql};

use crate::condition::Condition;
use crate::config::Adapter;
use crate::error::StoreError;
use crate::schema::{Row, TableSchema, Values, PRIMARY_KEY};
use crate::value::{ColumnType, RecordId, Value};

use super::Store;

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Integer(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::Boolean(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
        })
    }
}

/// Double-quotes an SQL identifier.
fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Store backed by one SQLite connection.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    schemas: RwLock<HashMap<String, TableSchema>>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` with foreign key
    /// enforcement turned on. `:memory:` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        tracing::info!(path = %path.display(), "opened sqlite database");
        Ok(Self {
            conn,
            schemas: RwLock::new(HashMap::new()),
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    fn schema(&self, table: &str) -> Result<TableSchema, StoreError> {
        let schemas = self.schemas.read().map_err(|_| StoreError::LockPoisoned)?;
        schemas
            .get(table)
            .cloned()
            .ok_or_else(|| StoreError::TableNotFound {
                table: table.to_string(),
            })
    }

    fn select_list(schema: &TableSchema) -> String {
        std::iter::once(PRIMARY_KEY.to_string())
            .chain(schema.columns.iter().map(|c| quote(&c.name)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Column names and declared types of `table` as stored in the
    /// database file, primary key first. Empty when the table is missing.
    fn stored_columns(&self, table: &str) -> Result<Vec<(String, String)>, StoreError> {
        let sql = format!("PRAGMA table_info({})", quote(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = stmt
            .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns)
    }

    fn same_columns(schema: &TableSchema, stored: &[(String, String)]) -> bool {
        let declared = std::iter::once((PRIMARY_KEY, "INTEGER")).chain(
            schema
                .columns
                .iter()
                .map(|c| (c.name.as_str(), c.column_type.sql_type())),
        );
        stored.len() == schema.columns.len() + 1
            && declared
                .zip(stored)
                .all(|((name, sql_type), (stored_name, stored_type))| {
                    name == stored_name.as_str() && sql_type.eq_ignore_ascii_case(stored_type)
                })
    }

    fn read_row(schema: &TableSchema, row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
        let id: i64 = row.get(0)?;
        let mut values = Values::new();
        for (index, column) in schema.columns.iter().enumerate() {
            let position = index + 1;
            let value = match column.column_type {
                ColumnType::Integer => Value::from(row.get::<_, Option<i64>>(position)?),
                ColumnType::Boolean => Value::from(row.get::<_, Option<bool>>(position)?),
                ColumnType::String | ColumnType::Text => {
                    Value::from(row.get::<_, Option<String>>(position)?)
                }
            };
            values.insert(column.name.clone(), value);
        }
        Ok(Row { id, values })
    }
}

impl Store for SqliteStore {
    fn adapter(&self) -> Adapter {
        Adapter::Sqlite
    }

    fn create_table(&self, schema: &TableSchema) -> Result<(), StoreError> {
        let mut schemas = self.schemas.write().map_err(|_| StoreError::LockPoisoned)?;
        if let Some(existing) = schemas.get(&schema.name) {
            if existing == schema {
                return Ok(());
            }
            return Err(StoreError::TableAlreadyExists(schema.name.clone()));
        }

        let stored = self.stored_columns(&schema.name)?;
        if !stored.is_empty() {
            if !Self::same_columns(schema, &stored) {
                tracing::debug!(table = %schema.name, ?stored, "stored table differs");
                return Err(StoreError::TableAlreadyExists(schema.name.clone()));
            }
            schemas.insert(schema.name.clone(), schema.clone());
            return Ok(());
        }

        let mut definitions = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", PRIMARY_KEY)];
        definitions.extend(
            schema
                .columns
                .iter()
                .map(|c| format!("{} {}", quote(&c.name), c.column_type.sql_type())),
        );
        definitions.extend(schema.relations.iter().map(|r| {
            format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                quote(&r.from_column),
                quote(&r.to_table),
                PRIMARY_KEY
            )
        }));
        let sql = format!(
            "CREATE TABLE {} ({})",
            quote(&schema.name),
            definitions.join(", ")
        );
        tracing::debug!(%sql);
        self.conn.execute(&sql, [])?;

        schemas.insert(schema.name.clone(), schema.clone());
        Ok(())
    }

    fn insert(&self, table: &str, values: &Values) -> Result<RecordId, StoreError> {
        let schema = self.schema(table)?;
        schema.validate_values(values)?;
        let row = schema.complete(values);

        let sql = if row.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", quote(table))
        } else {
            let columns: Vec<String> = row.keys().map(|c| quote(c)).collect();
            let placeholders: Vec<String> = (1..=row.len()).map(|i| format!("?{}", i)).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote(table),
                columns.join(", "),
                placeholders.join(", ")
            )
        };
        tracing::debug!(%sql);
        let mut stmt = self.conn.prepare_cached(&sql)?;
        stmt.execute(params_from_iter(row.values()))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, table: &str, id: RecordId, values: &Values) -> Result<(), StoreError> {
        let schema = self.schema(table)?;
        schema.validate_values(values)?;
        if values.is_empty() {
            return match self.find(table, id)? {
                Some(_) => Ok(()),
                None => Err(StoreError::RecordNotFound {
                    table: table.to_string(),
                    id,
                }),
            };
        }

        let assignments: Vec<String> = values
            .keys()
            .enumerate()
            .map(|(i, c)| format!("{} = ?{}", quote(c), i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            quote(table),
            assignments.join(", "),
            PRIMARY_KEY,
            values.len() + 1
        );
        tracing::debug!(%sql, id);
        let id_value = Value::Integer(id);
        let params = values.values().chain(std::iter::once(&id_value));
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let changed = stmt.execute(params_from_iter(params))?;
        if changed == 0 {
            return Err(StoreError::RecordNotFound {
                table: table.to_string(),
                id,
            });
        }
        Ok(())
    }

    fn find(&self, table: &str, id: RecordId) -> Result<Option<Row>, StoreError> {
        let schema = self.schema(table)?;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            Self::select_list(&schema),
            quote(table),
            PRIMARY_KEY
        );
        tracing::debug!(%sql, id);
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let row = stmt
            .query_row([id], |row| Self::read_row(&schema, row))
            .optional()?;
        Ok(row)
    }

    fn select(&self, table: &str, condition: Option<&Condition>) -> Result<Vec<Row>, StoreError> {
        let schema = self.schema(table)?;
        let mut sql = format!(
            "SELECT {} FROM {}",
            Self::select_list(&schema),
            quote(table)
        );
        let mut params = Vec::new();
        if let Some(condition) = condition {
            schema.validate_condition(condition)?;
            sql.push_str(&format!(
                " WHERE {} {} ?1",
                quote(&condition.column),
                condition.op.as_sql()
            ));
            params.push(&condition.value);
        }
        sql.push_str(&format!(" ORDER BY {}", PRIMARY_KEY));
        tracing::debug!(%sql);

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params), |row| Self::read_row(&schema, row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn count(&self, table: &str) -> Result<usize, StoreError> {
        self.schema(table)?;
        let sql = format!("SELECT COUNT(*) FROM {}", quote(table));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
