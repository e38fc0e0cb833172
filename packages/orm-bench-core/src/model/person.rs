//! Person: belongs to a workplace, has many professions through professionals.

use crate::condition::Condition;
use crate::error::StoreError;
use crate::schema::{Column, Row, TableSchema, Values};
use crate::session::Session;
use crate::value::{ColumnType, RecordId, Value};

use super::{boolean, narrow, text, Model, Profession, Professional, Workplace};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Person {
    id: RecordId,
    first_name: Option<String>,
    last_name: Option<String>,
    age: Option<i32>,
    alive: Option<bool>,
    bio: Option<String>,
    workplace_id: Option<RecordId>,
}

impl Person {
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = Some(first_name.into());
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = Some(last_name.into());
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = Some(age);
    }

    /// Liveness flag; an unset flag reads as `false`.
    pub fn is_alive(&self) -> bool {
        self.alive.unwrap_or(false)
    }

    pub fn alive(&self) -> Option<bool> {
        self.alive
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = Some(alive);
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.bio = Some(bio.into());
    }

    pub fn workplace_id(&self) -> Option<RecordId> {
        self.workplace_id
    }

    /// Belongs-to: the workplace this person works at, if any.
    pub fn workplace(&self, session: &Session) -> Result<Option<Workplace>, StoreError> {
        self.workplace_id
            .map(|id| Workplace::find(session, id))
            .transpose()
    }

    pub fn set_workplace(&mut self, workplace: &Workplace) {
        self.workplace_id = Some(workplace.id());
    }

    /// Has-many: join rows pointing at this person.
    pub fn professionals(&self, session: &Session) -> Result<Vec<Professional>, StoreError> {
        Professional::matching(session, &Condition::eq("person_id", self.id))
    }

    /// Has-many-through: professions reached via this person's join rows,
    /// in join-row order. Join rows without a profession are skipped.
    pub fn professions(&self, session: &Session) -> Result<Vec<Profession>, StoreError> {
        self.professionals(session)?
            .iter()
            .filter_map(Professional::profession_id)
            .map(|id| Profession::find(session, id))
            .collect()
    }
}

impl Model for Person {
    const TABLE: &'static str = "people";

    fn schema() -> Result<TableSchema, StoreError> {
        TableSchema::new(
            Self::TABLE,
            vec![
                Column::new("first_name", ColumnType::String),
                Column::new("last_name", ColumnType::String),
                Column::new("age", ColumnType::Integer),
                Column::new("alive", ColumnType::Boolean),
                Column::new("bio", ColumnType::Text),
                Column::new("workplace_id", ColumnType::Integer),
            ],
        )?
        .with_relation("workplace_id", Workplace::TABLE)
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.id,
            first_name: text(row, Self::TABLE, "first_name")?,
            last_name: text(row, Self::TABLE, "last_name")?,
            age: narrow(row, Self::TABLE, "age")?,
            alive: boolean(row, Self::TABLE, "alive")?,
            bio: text(row, Self::TABLE, "bio")?,
            workplace_id: narrow(row, Self::TABLE, "workplace_id")?,
        })
    }

    fn values(&self) -> Values {
        Values::from([
            ("first_name".to_string(), Value::from(self.first_name.clone())),
            ("last_name".to_string(), Value::from(self.last_name.clone())),
            ("age".to_string(), Value::from(self.age)),
            ("alive".to_string(), Value::from(self.alive)),
            ("bio".to_string(), Value::from(self.bio.clone())),
            ("workplace_id".to_string(), Value::from(self.workplace_id)),
        ])
    }

    fn id(&self) -> RecordId {
        self.id
    }
}
