//! Output-type index over a mapper library.

use bridge_types::TypeKey;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::Invocable;

/// Producers of each output type, in library order.
///
/// Built fresh for every resolution; library order is the tie-break when
/// several mappers produce the same type.
pub struct MapperIndex<'a, F> {
    by_out: FxHashMap<TypeKey, SmallVec<[&'a F; 2]>>,
}

impl<'a, F: Invocable> MapperIndex<'a, F> {
    pub fn new(library: &'a [F]) -> Self {
        let mut by_out: FxHashMap<TypeKey, SmallVec<[&'a F; 2]>> = FxHashMap::default();
        for mapper in library {
            by_out.entry(mapper.out().key()).or_default().push(mapper);
        }
        MapperIndex { by_out }
    }

    /// Mappers producing `key`; empty if none.
    pub fn producers(&self, key: TypeKey) -> &[&'a F] {
        self.by_out
            .get(&key)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct output types.
    pub fn len(&self) -> usize {
        self.by_out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_out.is_empty()
    }
}

#[cfg(test)]
mod tests;
