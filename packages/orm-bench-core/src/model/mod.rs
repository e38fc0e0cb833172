//! Model declarations.
//!
//! Each model maps one-to-one onto a table. Persistence is delegated to the
//! session's store; associations are plain methods that issue the lookups a
//! belongs-to, has-many or has-many-through declaration would.

mod person;
mod profession;
mod professional;
mod workplace;

pub use person::Person;
pub use profession::Profession;
pub use professional::Professional;
pub use workplace::{Workplace, OFFICE_PREFIX};

use crate::condition::Condition;
use crate::error::StoreError;
use crate::schema::{Row, TableSchema, Values};
use crate::session::Session;
use crate::value::{RecordId, Value};

/// A record type mapped onto one table.
pub trait Model: Sized {
    /// Backing table name.
    const TABLE: &'static str;

    /// Table definition used by migrations.
    fn schema() -> Result<TableSchema, StoreError>;

    /// Builds a model from a stored row.
    fn from_row(row: &Row) -> Result<Self, StoreError>;

    /// Column values to persist (primary key excluded).
    fn values(&self) -> Values;

    /// Primary key.
    fn id(&self) -> RecordId;

    /// Inserts an empty default row and returns it as a model.
    fn create(session: &Session) -> Result<Self, StoreError> {
        let id = session.store().insert(Self::TABLE, &Values::new())?;
        Self::find(session, id)
    }

    /// Loads one record by primary key.
    fn find(session: &Session, id: RecordId) -> Result<Self, StoreError> {
        let row = session
            .store()
            .find(Self::TABLE, id)?
            .ok_or_else(|| StoreError::RecordNotFound {
                table: Self::TABLE.to_string(),
                id,
            })?;
        Self::from_row(&row)
    }

    /// Loads every record.
    fn all(session: &Session) -> Result<Vec<Self>, StoreError> {
        rows_to_models(session.store().select(Self::TABLE, None)?)
    }

    /// Loads every record matching a finder condition such as `"age < 18"`.
    fn filter(session: &Session, condition: &str) -> Result<Vec<Self>, StoreError> {
        let condition: Condition = condition.parse()?;
        Self::matching(session, &condition)
    }

    /// Loads every record matching `condition`.
    fn matching(session: &Session, condition: &Condition) -> Result<Vec<Self>, StoreError> {
        rows_to_models(session.store().select(Self::TABLE, Some(condition))?)
    }

    /// Writes every column of this record back to the store.
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        session.store().update(Self::TABLE, self.id(), &self.values())
    }
}

fn rows_to_models<M: Model>(rows: Vec<Row>) -> Result<Vec<M>, StoreError> {
    rows.iter().map(M::from_row).collect()
}

fn mismatch(table: &str, column: &str, expected: &str, got: &Value) -> StoreError {
    StoreError::TypeMismatch {
        column: format!("{}.{}", table, column),
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    }
}

/// Typed column readers shared by the models.
pub(crate) fn text(row: &Row, table: &str, column: &str) -> Result<Option<String>, StoreError> {
    match row.get(column) {
        Value::Null => Ok(None),
        Value::Text(v) => Ok(Some(v.clone())),
        other => Err(mismatch(table, column, "text", other)),
    }
}

pub(crate) fn integer(row: &Row, table: &str, column: &str) -> Result<Option<i64>, StoreError> {
    match row.get(column) {
        Value::Null => Ok(None),
        Value::Integer(v) => Ok(Some(*v)),
        other => Err(mismatch(table, column, "integer", other)),
    }
}

pub(crate) fn boolean(row: &Row, table: &str, column: &str) -> Result<Option<bool>, StoreError> {
    match row.get(column) {
        Value::Null => Ok(None),
        Value::Boolean(v) => Ok(Some(*v)),
        other => Err(mismatch(table, column, "boolean", other)),
    }
}

/// Reads an integer column that must fit in `T`.
pub(crate) fn narrow<T: TryFrom<i64>>(
    row: &Row,
    table: &str,
    column: &str,
) -> Result<Option<T>, StoreError> {
    integer(row, table, column)?
        .map(|v| {
            T::try_from(v).map_err(|_| StoreError::TypeMismatch {
                column: format!("{}.{}", table, column),
                expected: std::any::type_name::<T>().to_string(),
                got: v.to_string(),
            })
        })
        .transpose()
}
