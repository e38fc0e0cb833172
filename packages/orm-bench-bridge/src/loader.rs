//! Class registry and class loader.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::class::{ClassDef, ClassHandle, Origin};
use crate::class_path::ClassPath;
use crate::error::BridgeError;

/// Registry of every class the bridge can hand out.
#[derive(Debug, Default, Clone)]
pub struct ClassRegistry {
    classes: Arc<RwLock<HashMap<String, ClassHandle>>>,
}

impl ClassRegistry {
    /// Creates a new empty class registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class definition under its fully-qualified name.
    pub fn register(&self, def: ClassDef) -> Result<ClassHandle, BridgeError> {
        let mut classes = self.classes.write();
        if classes.contains_key(def.name()) {
            return Err(BridgeError::ClassAlreadyRegistered {
                class: def.name().to_string(),
            });
        }
        let handle = ClassHandle::new(def);
        tracing::debug!(class = %handle.name(), origin = ?handle.origin(), "class registered");
        classes.insert(handle.name().to_string(), handle.clone());
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Option<ClassHandle> {
        self.classes.read().get(name).cloned()
    }

    /// Returns all registered class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Resolves classes by name against a registry and a class path.
#[derive(Debug, Clone)]
pub struct ClassLoader {
    class_path: ClassPath,
    registry: ClassRegistry,
}

impl ClassLoader {
    pub fn new(class_path: ClassPath, registry: ClassRegistry) -> Self {
        Self {
            class_path,
            registry,
        }
    }

    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }

    /// Resolves a class by fully-qualified name.
    ///
    /// Built-in classes always resolve. Archive-provided classes resolve
    /// only while their archive is on the class path.
    pub fn for_name(&self, name: &str) -> Result<ClassHandle, BridgeError> {
        let not_found = || BridgeError::ClassNotFound {
            class: name.to_string(),
        };
        let handle = self.registry.get(name).ok_or_else(not_found)?;
        match handle.origin() {
            Origin::Builtin => Ok(handle),
            Origin::Archive(archive) if self.class_path.contains_archive(archive) => Ok(handle),
            Origin::Archive(archive) => {
                tracing::debug!(class = name, %archive, "archive not on class path");
                Err(not_found())
            }
        }
    }
}
