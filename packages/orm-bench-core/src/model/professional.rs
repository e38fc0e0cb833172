//! Professional: join row linking one person to one profession.

use crate::error::StoreError;
use crate::schema::{Column, Row, TableSchema, Values};
use crate::session::Session;
use crate::value::{ColumnType, RecordId, Value};

use super::{narrow, Model, Person, Profession};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Professional {
    id: RecordId,
    person_id: Option<RecordId>,
    profession_id: Option<RecordId>,
}

impl Professional {
    pub fn person_id(&self) -> Option<RecordId> {
        self.person_id
    }

    pub fn profession_id(&self) -> Option<RecordId> {
        self.profession_id
    }

    pub fn person(&self, session: &Session) -> Result<Option<Person>, StoreError> {
        self.person_id
            .map(|id| Person::find(session, id))
            .transpose()
    }

    pub fn set_person(&mut self, person: &Person) {
        self.person_id = Some(person.id());
    }

    pub fn profession(&self, session: &Session) -> Result<Option<Profession>, StoreError> {
        self.profession_id
            .map(|id| Profession::find(session, id))
            .transpose()
    }

    pub fn set_profession(&mut self, profession: &Profession) {
        self.profession_id = Some(profession.id());
    }
}

impl Model for Professional {
    const TABLE: &'static str = "professionals";

    fn schema() -> Result<TableSchema, StoreError> {
        TableSchema::new(
            Self::TABLE,
            vec![
                Column::new("person_id", ColumnType::Integer),
                Column::new("profession_id", ColumnType::Integer),
            ],
        )?
        .with_relation("person_id", Person::TABLE)?
        .with_relation("profession_id", Profession::TABLE)
    }

    fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.id,
            person_id: narrow(row, Self::TABLE, "person_id")?,
            profession_id: narrow(row, Self::TABLE, "profession_id")?,
        })
    }

    fn values(&self) -> Values {
        Values::from([
            ("person_id".to_string(), Value::from(self.person_id)),
            ("profession_id".to_string(), Value::from(self.profession_id)),
        ])
    }

    fn id(&self) -> RecordId {
        self.id
    }
}
