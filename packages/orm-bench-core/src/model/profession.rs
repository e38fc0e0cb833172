use crate::error::StoreError;
use crate::schema::{Column, Row, TableSchema, Values};
use crate::value::{ColumnType, RecordId, Value};

use super::{text, Model};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profession {
    id: RecordId,
    name: Option<String>,
}

impl Profession {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }
}

impl Model for Profession {
    const TABLE: &'static str = "professions";

    fn schema() -> Result<TableSchema, StoreError> {
        TableSchema::new(Self::TABLE, vec![Column::new("name", ColumnType::String)])
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.id,
            name: text(row, Self::TABLE, "name")?,
        })
    }

    fn values(&self) -> Values {
        Values::from([("name".to_string(), Value::from(self.name.clone()))])
    }

    fn id(&self) -> RecordId {
        self.id
    }
}
