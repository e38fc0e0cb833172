//! Name-based class bridge.
//!
//! Classes are registered once, up front, as explicit tables of
//! constructors and static methods keyed by their exact argument
//! signature. Callers then resolve a class by fully-qualified name through a
//! [`ClassLoader`] and invoke members by name with tagged [`Arg`] values;
//! the bridge derives the call signature from the argument kinds and
//! dispatches to the matching entry, or reports
//! [`BridgeError::MemberNotFound`].

pub mod arg;
pub mod class;
pub mod class_path;
pub mod error;
pub mod loader;

pub use arg::{Arg, ArgType, ArgsExt, Signature};
pub use class::{ClassDef, ClassHandle, ObjectHandle, Origin, Value, CLASS_OF, CONSTRUCTOR};
pub use class_path::{ClassPath, ClassPathEntry};
pub use error::BridgeError;
pub use loader::{ClassLoader, ClassRegistry};
