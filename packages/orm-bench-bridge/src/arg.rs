//! Call arguments and signatures.
//!
//! Conversion table from host values to bridge arguments:
//!
//! | host value        | `Arg`          | `ArgType`          |
//! |-------------------|----------------|--------------------|
//! | `&str` / `String` | `Str`          | `String`           |
//! | `i32`             | `Int`          | `Integer`          |
//! | `i64` (checked)   | `Int`          | `Integer`          |
//! | `ObjectHandle`    | `Object`       | `Object(class)`    |

use std::fmt;

use crate::class::ObjectHandle;
use crate::error::BridgeError;

/// Runtime type of one argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgType {
    String,
    Integer,
    /// Instance of the named class
    Object(String),
}

impl ArgType {
    /// Object type of the named class.
    pub fn object(class: impl Into<String>) -> Self {
        ArgType::Object(class.into())
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::String => f.write_str("String"),
            ArgType::Integer => f.write_str("Integer"),
            ArgType::Object(class) => f.write_str(class),
        }
    }
}

/// Ordered parameter types of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature(Vec<ArgType>);

impl Signature {
    pub fn new(types: Vec<ArgType>) -> Self {
        Self(types)
    }

    /// Signature formed by the runtime types of `args`.
    pub fn of(args: &[Arg]) -> Self {
        Self(args.iter().map(Arg::arg_type).collect())
    }

    pub fn types(&self) -> &[ArgType] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ArgType>> for Signature {
    fn from(types: Vec<ArgType>) -> Self {
        Self(types)
    }
}

impl<const N: usize> From<[ArgType; N]> for Signature {
    fn from(types: [ArgType; N]) -> Self {
        Self(types.into())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "({})", types.join(", "))
    }
}

/// One call argument.
#[derive(Debug, Clone)]
pub enum Arg {
    Str(String),
    Int(i32),
    Object(ObjectHandle),
}

impl Arg {
    pub fn arg_type(&self) -> ArgType {
        match self {
            Arg::Str(_) => ArgType::String,
            Arg::Int(_) => ArgType::Integer,
            Arg::Object(handle) => ArgType::Object(handle.class_name().to_string()),
        }
    }

    fn kind(&self) -> String {
        self.arg_type().to_string()
    }
}

/// Positional accessors used by registered callables.
pub trait ArgsExt {
    fn str_at(&self, index: usize) -> Result<&str, BridgeError>;
    fn int_at(&self, index: usize) -> Result<i32, BridgeError>;
    fn object_at(&self, index: usize) -> Result<&ObjectHandle, BridgeError>;
}

fn missing(index: usize, expected: &str) -> BridgeError {
    BridgeError::ArgumentType {
        index,
        expected: expected.to_string(),
        got: "nothing".to_string(),
    }
}

impl ArgsExt for [Arg] {
    fn str_at(&self, index: usize) -> Result<&str, BridgeError> {
        match self.get(index) {
            Some(Arg::Str(v)) => Ok(v),
            Some(other) => Err(BridgeError::ArgumentType {
                index,
                expected: "String".to_string(),
                got: other.kind(),
            }),
            None => Err(missing(index, "String")),
        }
    }

    fn int_at(&self, index: usize) -> Result<i32, BridgeError> {
        match self.get(index) {
            Some(Arg::Int(v)) => Ok(*v),
            Some(other) => Err(BridgeError::ArgumentType {
                index,
                expected: "Integer".to_string(),
                got: other.kind(),
            }),
            None => Err(missing(index, "Integer")),
        }
    }

    fn object_at(&self, index: usize) -> Result<&ObjectHandle, BridgeError> {
        match self.get(index) {
            Some(Arg::Object(v)) => Ok(v),
            Some(other) => Err(BridgeError::ArgumentType {
                index,
                expected: "object".to_string(),
                got: other.kind(),
            }),
            None => Err(missing(index, "object")),
        }
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<i32> for Arg {
    fn from(v: i32) -> Self {
        Arg::Int(v)
    }
}

impl TryFrom<i64> for Arg {
    type Error = BridgeError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        i32::try_from(v)
            .map(Arg::Int)
            .map_err(|_| BridgeError::IntegerOutOfRange(v))
    }
}

impl From<ObjectHandle> for Arg {
    fn from(v: ObjectHandle) -> Self {
        Arg::Object(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_follows_argument_kinds() {
        let handle = ObjectHandle::new("bench.Driver", 5u8);
        let args = vec![Arg::from("db"), Arg::from(3), Arg::from(handle)];
        let signature = Signature::of(&args);
        assert_eq!(
            signature,
            Signature::from([
                ArgType::String,
                ArgType::Integer,
                ArgType::object("bench.Driver")
            ])
        );
        assert_eq!(signature.to_string(), "(String, Integer, bench.Driver)");
        assert_eq!(Signature::default().to_string(), "()");
    }

    #[test]
    fn wide_integers_are_range_checked() {
        assert!(matches!(Arg::try_from(42i64), Ok(Arg::Int(42))));
        assert!(matches!(
            Arg::try_from(i64::from(i32::MAX) + 1),
            Err(BridgeError::IntegerOutOfRange(_))
        ));
    }

    #[test]
    fn positional_accessors_report_wrong_kinds() {
        let args = vec![Arg::from("x"), Arg::from(1)];
        assert_eq!(args.str_at(0).unwrap(), "x");
        assert_eq!(args.int_at(1).unwrap(), 1);
        assert!(matches!(
            args.int_at(0),
            Err(BridgeError::ArgumentType { index: 0, .. })
        ));
        assert!(matches!(
            args.object_at(2),
            Err(BridgeError::ArgumentType { index: 2, .. })
        ));
    }
}
