//! Type-erased values and the append-only value pool.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{TypeDescriptor, TypeKey};

/// A value tagged with its logical type.
///
/// The data is reference counted so a value can sit in several pools (a
/// chain's pool and the caller's copy) without cloning the payload.
#[derive(Clone)]
pub struct Value {
    ty: TypeDescriptor,
    data: Arc<dyn Any + Send + Sync>,
}

impl Value {
    pub fn new<T: Any + Send + Sync>(ty: TypeDescriptor, data: T) -> Self {
        Value {
            ty,
            data: Arc::new(data),
        }
    }

    #[inline]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    #[inline]
    pub fn key(&self) -> TypeKey {
        self.ty.key()
    }

    /// Borrow the payload as `T`, or `None` if the payload is another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({:?})", self.ty)
    }
}

/// Ordered, append-only collection of values.
///
/// Later values shadow earlier values of the same key when a consumer binds
/// arguments, so a chain's intermediate results take precedence over inputs
/// supplied up front.
#[derive(Clone, Debug, Default)]
pub struct ValuePool {
    values: Vec<Value>,
}

impl ValuePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: TypeKey) -> bool {
        self.values.iter().any(|v| v.key() == key)
    }

    /// Most recently appended value of `key`.
    pub fn latest(&self, key: TypeKey) -> Option<&Value> {
        self.values.iter().rev().find(|v| v.key() == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Drop values appended after the pool had `len` entries.
    ///
    /// Used to discard the partial results of an aborted chain call; the pool
    /// never shrinks below what existed before that call.
    pub fn truncate(&mut self, len: usize) {
        self.values.truncate(len);
    }
}

impl From<Vec<Value>> for ValuePool {
    fn from(values: Vec<Value>) -> Self {
        ValuePool { values }
    }
}

impl FromIterator<Value> for ValuePool {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValuePool {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<Value> for ValuePool {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ValuePool {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests;
