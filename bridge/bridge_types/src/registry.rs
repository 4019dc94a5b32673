//! Explicit type registry.
//!
//! Keys are assigned sequentially in registration order. A logical type is
//! either bound to a Rust type (`register::<T>`) or purely nominal
//! (`register_named`), which lets two logical types share one Rust
//! representation (e.g. `"source_path"` and `"output_path"` both as `String`).
//!
//! # Design
//!
//! - Dense `Vec<TypeDescriptor>` indexed by `TypeKey`
//! - `FxHashMap<TypeId, TypeKey>` for Rust-type lookup
//! - `FxHashMap<Arc<str>, TypeKey>` for name lookup; names are unique

use std::any::{Any, TypeId};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;

use crate::{TypeDescriptor, TypeKey, Value};

/// Error when registering or looking up a type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("type name `{name}` is already registered")]
    DuplicateName { name: String },
    #[error("rust type `{rust_type}` is already registered as `{existing}`")]
    AlreadyRegistered {
        rust_type: &'static str,
        existing: String,
    },
    #[error("rust type `{rust_type}` has not been registered")]
    Unregistered { rust_type: &'static str },
    #[error("type registry exceeded u32::MAX entries")]
    Exhausted,
}

/// Registry of every logical type known to a mapper library.
#[derive(Default)]
pub struct TypeRegistry {
    entries: Vec<TypeDescriptor>,
    by_rust: FxHashMap<TypeId, TypeKey>,
    by_name: FxHashMap<Arc<str>, TypeKey>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `name` and return its descriptor.
    pub fn register<T: Any>(
        &mut self,
        name: impl Into<Arc<str>>,
    ) -> Result<TypeDescriptor, RegistryError> {
        let type_id = TypeId::of::<T>();
        if let Some(&existing) = self.by_rust.get(&type_id) {
            return Err(RegistryError::AlreadyRegistered {
                rust_type: std::any::type_name::<T>(),
                existing: self.entries[existing.index()].name().to_owned(),
            });
        }
        let desc = self.register_named(name)?;
        self.by_rust.insert(type_id, desc.key());
        Ok(desc)
    }

    /// Register a nominal type that is not tied to a Rust type.
    pub fn register_named(
        &mut self,
        name: impl Into<Arc<str>>,
    ) -> Result<TypeDescriptor, RegistryError> {
        let name: Arc<str> = name.into();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }
        let raw = u32::try_from(self.entries.len()).map_err(|_| RegistryError::Exhausted)?;
        let key = TypeKey::from_raw(raw);
        let desc = TypeDescriptor::new(key, Arc::clone(&name));

        tracing::trace!(name = %desc, key = raw, "registered type");
        self.entries.push(desc.clone());
        self.by_name.insert(name, key);
        Ok(desc)
    }

    /// A descriptor for an existing key under a different display name.
    ///
    /// The alias is not added to the name index; it only changes how the
    /// type renders in diagnostics.
    pub fn alias(&self, key: TypeKey, name: impl Into<Arc<str>>) -> Option<TypeDescriptor> {
        self.get(key).map(|desc| desc.renamed(name))
    }

    pub fn get(&self, key: TypeKey) -> Option<&TypeDescriptor> {
        self.entries.get(key.index())
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        self.by_name.get(name).and_then(|&key| self.get(key))
    }

    pub fn descriptor_of<T: Any>(&self) -> Option<&TypeDescriptor> {
        self.by_rust
            .get(&TypeId::of::<T>())
            .and_then(|&key| self.get(key))
    }

    /// Wrap `data` in a [`Value`] tagged with `T`'s registered descriptor.
    pub fn value<T: Any + Send + Sync>(&self, data: T) -> Result<Value, RegistryError> {
        let desc = self
            .descriptor_of::<T>()
            .ok_or_else(|| RegistryError::Unregistered {
                rust_type: std::any::type_name::<T>(),
            })?;
        Ok(Value::new(desc.clone(), data))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All descriptors in key order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.entries.iter()
    }
}

/// Clonable, thread-safe handle to a [`TypeRegistry`].
///
/// Hosts typically register types while loading plugins on several threads
/// and then resolve chains against a read guard.
#[derive(Clone, Default)]
pub struct SharedTypeRegistry(Arc<RwLock<TypeRegistry>>);

impl SharedTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Any>(
        &self,
        name: impl Into<Arc<str>>,
    ) -> Result<TypeDescriptor, RegistryError> {
        self.0.write().register::<T>(name)
    }

    pub fn register_named(
        &self,
        name: impl Into<Arc<str>>,
    ) -> Result<TypeDescriptor, RegistryError> {
        self.0.write().register_named(name)
    }

    pub fn descriptor_of<T: Any>(&self) -> Option<TypeDescriptor> {
        self.0.read().descriptor_of::<T>().cloned()
    }

    pub fn lookup(&self, name: &str) -> Option<TypeDescriptor> {
        self.0.read().lookup(name).cloned()
    }

    pub fn value<T: Any + Send + Sync>(&self, data: T) -> Result<Value, RegistryError> {
        self.0.read().value(data)
    }

    /// Borrow the registry for a batch of lookups.
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.0.read()
    }
}
