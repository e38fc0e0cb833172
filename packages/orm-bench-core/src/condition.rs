//! Single-column filter conditions (`age < 18`, `person_id = 3`).
//!
//! Conditions are parsed from the same `column op literal` strings an ORM
//! finder accepts, and evaluated with SQL null semantics: a `Null` column
//! never matches.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;
use crate::schema::Row;
use crate::value::Value;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// SQL spelling of the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// `column op value` filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

impl Condition {
    pub fn new(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Equality filter, the form used by association lookups.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, CompareOp::Eq, value)
    }

    /// Evaluates the condition against a row.
    pub fn matches(&self, row: &Row) -> bool {
        let actual = if self.column == crate::schema::PRIMARY_KEY {
            Value::Integer(row.id)
        } else {
            row.get(&self.column).clone()
        };
        actual
            .sql_cmp(&self.value)
            .is_some_and(|ordering| self.op.holds(ordering))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op.as_sql(), self.value)
    }
}

impl FromStr for Condition {
    type Err = StoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| StoreError::InvalidCondition {
            condition: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let column_end = trimmed
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(trimmed.len());
        let column = &trimmed[..column_end];
        if column.is_empty() || column.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid("expected a column name"));
        }

        let rest = trimmed[column_end..].trim_start();
        let (op, rest) = [
            ("<=", CompareOp::Le),
            (">=", CompareOp::Ge),
            ("<>", CompareOp::Ne),
            ("!=", CompareOp::Ne),
            ("=", CompareOp::Eq),
            ("<", CompareOp::Lt),
            (">", CompareOp::Gt),
        ]
        .iter()
        .find_map(|(token, op)| rest.strip_prefix(token).map(|r| (*op, r)))
        .ok_or_else(|| invalid("expected a comparison operator"))?;

        let value = parse_literal(rest.trim()).map_err(|reason| invalid(reason))?;
        Ok(Condition::new(column, op, value))
    }
}

fn parse_literal(literal: &str) -> Result<Value, &'static str> {
    if literal.is_empty() {
        return Err("expected a literal");
    }
    if let Some(body) = literal.strip_prefix('\'') {
        let body = body.strip_suffix('\'').ok_or("unterminated string literal")?;
        if body.replace("''", "").contains('\'') {
            return Err("unescaped quote in string literal");
        }
        return Ok(Value::Text(body.replace("''", "'")));
    }
    match literal.to_ascii_lowercase().as_str() {
        "true" => return Ok(Value::Boolean(true)),
        "false" => return Ok(Value::Boolean(false)),
        "null" => return Err("comparison with NULL never matches"),
        _ => {}
    }
    literal
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| "unsupported literal")
}
