//! Canonical type identity.

use std::fmt;

/// A 32-bit type identity handed out by a [`TypeRegistry`](crate::TypeRegistry).
///
/// Two descriptors with the same key are interchangeable for resolution,
/// regardless of their display names. Comparison is a single integer compare.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeKey(u32);

impl TypeKey {
    /// Create a key from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into registry storage.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.0)
    }
}

#[cfg(test)]
mod tests;
