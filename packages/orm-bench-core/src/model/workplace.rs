//! Workplace: has many people; office name reads back with a prefix.

use crate::condition::Condition;
use crate::error::StoreError;
use crate::schema::{Column, Row, TableSchema, Values};
use crate::session::Session;
use crate::value::{ColumnType, RecordId, Value};

use super::{narrow, text, Model, Person};

/// Prefix added to the stored office name by [`Workplace::office_name`].
pub const OFFICE_PREFIX: &str = "Office: ";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workplace {
    id: RecordId,
    office_name: Option<String>,
    coffee_quality: Option<i16>,
}

impl Workplace {
    /// Display name: the stored office name behind [`OFFICE_PREFIX`].
    pub fn office_name(&self) -> String {
        format!("{}{}", OFFICE_PREFIX, self.stored_office_name().unwrap_or_default())
    }

    pub fn stored_office_name(&self) -> Option<&str> {
        self.office_name.as_deref()
    }

    pub fn set_office_name(&mut self, name: impl Into<String>) {
        self.office_name = Some(name.into());
    }

    pub fn coffee_quality(&self) -> Option<i16> {
        self.coffee_quality
    }

    pub fn set_coffee_quality(&mut self, quality: i16) {
        self.coffee_quality = Some(quality);
    }

    /// Has-many: everyone whose `workplace_id` points here.
    pub fn people(&self, session: &Session) -> Result<Vec<Person>, StoreError> {
        Person::matching(session, &Condition::eq("workplace_id", self.id))
    }
}

impl Model for Workplace {
    const TABLE: &'static str = "workplaces";

    fn schema() -> Result<TableSchema, StoreError> {
        TableSchema::new(
            Self::TABLE,
            vec![
                Column::new("office_name", ColumnType::String),
                Column::new("coffee_quality", ColumnType::Integer),
            ],
        )
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.id,
            office_name: text(row, Self::TABLE, "office_name")?,
            coffee_quality: narrow(row, Self::TABLE, "coffee_quality")?,
        })
    }

    fn values(&self) -> Values {
        Values::from([
            ("office_name".to_string(), Value::from(self.office_name.clone())),
            ("coffee_quality".to_string(), Value::from(self.coffee_quality.map(i64::from))),
        ])
    }

    fn id(&self) -> RecordId {
        self.id
    }
}
