//! Type descriptors: a key plus a display name.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::TypeKey;

/// Identity and label of a value's type.
///
/// Equality and hashing consider only the [`TypeKey`]. The name exists for
/// diagnostics and may differ between descriptors that share a key (see
/// [`TypeRegistry::alias`](crate::TypeRegistry::alias)).
///
/// Cloning is cheap: the name is reference counted, so descriptors are shared
/// between invocables, values, and chains rather than owned by any of them.
#[derive(Clone)]
pub struct TypeDescriptor {
    key: TypeKey,
    name: Arc<str>,
}

impl TypeDescriptor {
    /// Create a descriptor. Prefer going through a registry so keys stay unique.
    pub fn new(key: TypeKey, name: impl Into<Arc<str>>) -> Self {
        TypeDescriptor {
            key,
            name: name.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same key, different display name.
    pub fn renamed(&self, name: impl Into<Arc<str>>) -> Self {
        TypeDescriptor {
            key: self.key,
            name: name.into(),
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.key.raw())
    }
}
