//! Predicate-driven leaf type search.
//!
//! Answers: which types must a caller be able to supply directly so that a
//! chain to `target` is guaranteed to exist, without having any values yet?
//!
//! The search accumulates a set of supplied types along a depth-first path.
//! Each arg of the current invocable is either already in the set, accepted
//! by `can_supply` (and added), or missing. Missing types are produced by
//! library mappers tried in library order; a mapper already on the current
//! path is skipped, and is available again once the path unwinds, so
//! independent branches may share producers.

use std::ptr;

use bridge_types::{TypeDescriptor, TypeKey};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::stack::ensure_sufficient_stack;
use crate::{Invocable, MapperIndex, SearchTrace, TraceEvent};

/// Types a caller must supply for `target` to be callable through `library`.
///
/// `can_supply` returns true for every type the caller could produce a value
/// of. Returns `None` if every path needs a type nobody can supply.
pub fn required_leaf_types<F: Invocable>(
    target: &F,
    library: &[F],
    can_supply: impl FnMut(&TypeDescriptor) -> bool,
) -> Option<Vec<TypeDescriptor>> {
    required_leaf_types_traced(target, library, can_supply, &mut SearchTrace::disabled())
}

/// [`required_leaf_types`], reporting search decisions to `trace`.
#[tracing::instrument(level = "debug", skip_all, fields(target = %target, library = library.len()))]
pub fn required_leaf_types_traced<F: Invocable>(
    target: &F,
    library: &[F],
    can_supply: impl FnMut(&TypeDescriptor) -> bool,
    trace: &mut SearchTrace,
) -> Option<Vec<TypeDescriptor>> {
    for mapper in library {
        trace.record(|| TraceEvent::MapperAvailable {
            mapper: mapper.to_string(),
            out: mapper.out().to_string(),
        });
    }

    let index = MapperIndex::new(library);
    let mut search = LeafSearch {
        index: &index,
        can_supply,
        visited: FxHashSet::default(),
        trace,
    };
    let leaves = search.search(target, &LeafSet::default())?;
    tracing::debug!(count = leaves.order.len(), "leaf set found");
    Some(leaves.order)
}

/// Supplied types in first-insertion order.
#[derive(Clone, Default)]
struct LeafSet {
    order: Vec<TypeDescriptor>,
    keys: FxHashSet<TypeKey>,
}

impl LeafSet {
    fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.keys.contains(&ty.key())
    }

    fn insert(&mut self, ty: &TypeDescriptor) {
        if self.keys.insert(ty.key()) {
            self.order.push(ty.clone());
        }
    }
}

struct LeafSearch<'a, 's, F, C> {
    index: &'s MapperIndex<'a, F>,
    can_supply: C,
    /// Mappers on the current path.
    visited: FxHashSet<*const F>,
    trace: &'s mut SearchTrace,
}

impl<'a, F, C> LeafSearch<'a, '_, F, C>
where
    F: Invocable,
    C: FnMut(&TypeDescriptor) -> bool,
{
    fn search(&mut self, f: &F, input: &LeafSet) -> Option<LeafSet> {
        let mut pending = input.clone();
        let mut missing: SmallVec<[TypeDescriptor; 4]> = SmallVec::new();
        let bound = f.bound_values();

        for arg in f.args() {
            if pending.contains(arg)
                || missing.contains(arg)
                || bound.iter().any(|v| v.key() == arg.key())
            {
                continue;
            }
            if (self.can_supply)(arg) {
                self.trace.record(|| TraceEvent::LeafSupplied {
                    func: f.to_string(),
                    ty: arg.to_string(),
                });
                pending.insert(arg);
            } else {
                self.trace.record(|| TraceEvent::LeafMissing {
                    func: f.to_string(),
                    ty: arg.to_string(),
                });
                missing.push(arg.clone());
            }
        }

        let index = self.index;
        'missing: for ty in &missing {
            for &mapper in index.producers(ty.key()) {
                let id = ptr::from_ref(mapper);
                if !self.visited.insert(id) {
                    continue;
                }
                let found = ensure_sufficient_stack(|| self.search(mapper, &pending));
                self.visited.remove(&id);

                match found {
                    Some(leaves) => {
                        self.trace.record(|| TraceEvent::Satisfied {
                            ty: ty.to_string(),
                            by: mapper.to_string(),
                        });
                        pending = leaves;
                        continue 'missing;
                    }
                    None => self.trace.record(|| TraceEvent::CandidateFailed {
                        ty: ty.to_string(),
                        candidate: mapper.to_string(),
                    }),
                }
            }

            self.trace.record(|| TraceEvent::Unresolvable {
                func: f.to_string(),
                ty: ty.to_string(),
            });
            return None;
        }

        Some(pending)
    }
}

#[cfg(test)]
mod tests;
