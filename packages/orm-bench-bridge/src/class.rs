//! Class definitions, class handles and object handles.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::arg::{Arg, Signature};
use crate::error::BridgeError;

/// Pseudo-member that constructs an instance.
pub const CONSTRUCTOR: &str = "new";

/// Pseudo-member that returns the class handle itself.
pub const CLASS_OF: &str = "class";

/// Registered constructor or static method body.
pub type Callable = Arc<dyn Fn(&[Arg]) -> anyhow::Result<Value> + Send + Sync>;

/// Opaque instance created by a constructor, tagged with its class name.
#[derive(Clone)]
pub struct ObjectHandle {
    class: String,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ObjectHandle {
    pub fn new<T: Any + Send + Sync>(class: impl Into<String>, value: T) -> Self {
        Self {
            class: class.into(),
            inner: Arc::new(value),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// Borrows the instance as `T`, if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// Result of an invocation.
#[derive(Debug, Clone)]
pub enum Value {
    Unit,
    Str(String),
    Int(i64),
    Object(ObjectHandle),
    Class(ClassHandle),
}

impl Value {
    pub fn as_object(&self) -> Option<&ObjectHandle> {
        match self {
            Value::Object(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// Where a class is provided from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Always resolvable
    Builtin,
    /// Resolvable only when the named archive is on the class path
    Archive(String),
}

/// Definition of one class: its constructors and static methods.
pub struct ClassDef {
    name: String,
    origin: Origin,
    constructors: HashMap<Signature, Callable>,
    methods: HashMap<(String, Signature), Callable>,
}

impl ClassDef {
    /// Starts a built-in class definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: Origin::Builtin,
            constructors: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Marks the class as provided by `archive` (a file name such as
    /// `drivers.jar`).
    pub fn provided_by(mut self, archive: impl Into<String>) -> Self {
        self.origin = Origin::Archive(archive.into());
        self
    }

    /// Adds a constructor. A later constructor with the same signature
    /// replaces the earlier one.
    pub fn constructor<F>(mut self, signature: impl Into<Signature>, body: F) -> Self
    where
        F: Fn(&[Arg]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.constructors.insert(signature.into(), Arc::new(body));
        self
    }

    /// Adds a static method.
    pub fn static_method<F>(
        mut self,
        name: impl Into<String>,
        signature: impl Into<Signature>,
        body: F,
    ) -> Self
    where
        F: Fn(&[Arg]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.methods
            .insert((name.into(), signature.into()), Arc::new(body));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("constructors", &self.constructors.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Shared handle to a registered class.
#[derive(Debug, Clone)]
pub struct ClassHandle(Arc<ClassDef>);

impl ClassHandle {
    pub(crate) fn new(def: ClassDef) -> Self {
        Self(Arc::new(def))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn origin(&self) -> &Origin {
        self.0.origin()
    }

    /// Invokes `member` with `args`.
    ///
    /// - [`CONSTRUCTOR`] calls the constructor whose signature equals the
    ///   argument types.
    /// - [`CLASS_OF`] returns this handle.
    /// - Any other name calls the static method with that name and
    ///   signature; there is no receiver.
    ///
    /// # Returns
    /// `Err(BridgeError::MemberNotFound)` when nothing matches exactly,
    /// `Err(BridgeError::InvocationFailed)` when the member itself fails.
    pub fn invoke(&self, member: &str, args: &[Arg]) -> Result<Value, BridgeError> {
        let signature = Signature::of(args);
        tracing::debug!(class = %self.name(), member, %signature, "invoke");

        let body = match member {
            CLASS_OF if args.is_empty() => return Ok(Value::Class(self.clone())),
            CONSTRUCTOR => self.0.constructors.get(&signature),
            _ => self.0.methods.get(&(member.to_string(), signature.clone())),
        };
        let body = body.ok_or_else(|| BridgeError::MemberNotFound {
            class: self.name().to_string(),
            member: member.to_string(),
            signature,
        })?;

        body(args).map_err(|e| BridgeError::InvocationFailed {
            class: self.name().to_string(),
            member: member.to_string(),
            message: format!("{:#}", e),
        })
    }
}
