//! Table schema: columns, foreign key relations and validation.
//!
//! Every table carries an implicit integer primary key named `id`, which is
//! never listed among the declared columns.

use std::collections::{BTreeMap, HashSet};

use crate::condition::Condition;
use crate::error::StoreError;
use crate::value::{ColumnType, Value};

/// Name of the implicit primary key column.
pub const PRIMARY_KEY: &str = "id";

/// Column definition within a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared type
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Relation between tables for foreign key references.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Name of the target table
    pub to_table: String,
    /// Column name in source table
    pub from_column: String,
}

/// Column values of one row, keyed by column name (primary key excluded).
pub type Values = BTreeMap<String, Value>;

/// A stored row: primary key plus column values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: i64,
    pub values: Values,
}

impl Row {
    /// Returns the value of `column`, or `Null` when the column is absent.
    pub fn get(&self, column: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        self.values.get(column).unwrap_or(NULL)
    }
}

/// Table definition: name, columns in declaration order, relations.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Column definitions in declaration order
    pub columns: Vec<Column>,
    /// Foreign key relations to other tables
    pub relations: Vec<Relation>,
}

impl TableSchema {
    /// Creates a table definition, validating column names.
    ///
    /// # Returns
    /// `Err` when a column is declared twice or collides with `id`.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, StoreError> {
        let name = name.into();
        let mut seen = HashSet::new();
        for column in &columns {
            if column.name == PRIMARY_KEY {
                return Err(StoreError::ReservedColumn {
                    table: name.clone(),
                    column: column.name.clone(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(StoreError::ColumnAlreadyExists {
                    table: name.clone(),
                    column: column.name.clone(),
                });
            }
        }
        Ok(Self {
            name,
            columns,
            relations: Vec::new(),
        })
    }

    /// Declares `from_column` as a foreign key into `to_table`.
    ///
    /// The column must already be declared with integer type.
    pub fn with_relation(
        mut self,
        from_column: impl Into<String>,
        to_table: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let from_column = from_column.into();
        let column = self.column(&from_column)?;
        if column.column_type != ColumnType::Integer {
            return Err(StoreError::TypeMismatch {
                column: from_column,
                expected: ColumnType::Integer.to_string(),
                got: column.column_type.to_string(),
            });
        }
        self.relations.push(Relation {
            to_table: to_table.into(),
            from_column,
        });
        Ok(self)
    }

    /// Looks up a declared column by name.
    pub fn column(&self, name: &str) -> Result<&Column, StoreError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| StoreError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Validates that every value names a declared column of matching type.
    pub fn validate_values(&self, values: &Values) -> Result<(), StoreError> {
        for (name, value) in values {
            let column = self.column(name)?;
            if !column.column_type.accepts(value) {
                return Err(StoreError::TypeMismatch {
                    column: format!("{}.{}", self.name, name),
                    expected: column.column_type.to_string(),
                    got: value.type_name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Checks that `condition` names the primary key or a declared column
    /// and that its literal is comparable with that column's type.
    pub fn validate_condition(&self, condition: &Condition) -> Result<(), StoreError> {
        let column_type = if condition.column == PRIMARY_KEY {
            ColumnType::Integer
        } else {
            self.column(&condition.column)?.column_type
        };
        if column_type.compares_with(&condition.value) {
            Ok(())
        } else {
            Err(StoreError::TypeMismatch {
                column: format!("{}.{}", self.name, condition.column),
                expected: column_type.to_string(),
                got: condition.value.type_name().to_string(),
            })
        }
    }

    /// Returns `values` completed with `Null` for every missing column.
    pub fn complete(&self, values: &Values) -> Values {
        self.columns
            .iter()
            .map(|c| {
                let value = values.get(&c.name).cloned().unwrap_or_default();
                (c.name.clone(), value)
            })
            .collect()
    }
}
