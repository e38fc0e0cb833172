//! Bridge error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::arg::Signature;

/// Class lookup and invocation errors.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No registered class under this name, or its archive is not on the
    /// class path
    #[error("Class '{class}' not found")]
    ClassNotFound { class: String },

    /// Class registered twice
    #[error("Class '{class}' already registered")]
    ClassAlreadyRegistered { class: String },

    /// No constructor or static method with this name and signature
    #[error("No member '{member}{signature}' on class '{class}'")]
    MemberNotFound {
        class: String,
        member: String,
        signature: Signature,
    },

    /// Integer argument does not fit the bridge's 32-bit integer type
    #[error("Integer argument {0} out of range")]
    IntegerOutOfRange(i64),

    /// Argument at `index` has the wrong kind
    #[error("Argument {index}: expected {expected}, got {got}")]
    ArgumentType {
        index: usize,
        expected: String,
        got: String,
    },

    /// The invoked member itself failed
    #[error("Invocation of '{class}.{member}' failed: {message}")]
    InvocationFailed {
        class: String,
        member: String,
        message: String,
    },

    /// Class path directory could not be read
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
