//! Value-driven chain search.
//!
//! Given a target and the values a caller holds, find an ordered chain of
//! library mappers that produces every input the target is missing.
//!
//! # Algorithm
//!
//! `resolve(f)` computes `f`'s missing args against the *original* values
//! (never against outputs accumulated during the search). For each missing
//! type, in declared order:
//!
//! 1. no producer in the library: fail
//! 2. a producer is already in the chain: satisfied
//! 3. otherwise try producers not on the current path, in library order,
//!    recursing into each; the first that resolves satisfies the type
//!
//! `f` is appended after all of its producers, so executing the chain in
//! order always finds the values each step needs.
//!
//! A failed candidate is rolled back: the chain and the resolved set return
//! to their state before the attempt, keeping "resolved" equal to "in the
//! chain". Search is first-fit; once a type is satisfied its producer is not
//! reconsidered, and a later failure only makes the *parent* try its next
//! candidate.

use std::ptr;

use bridge_types::{TypeDescriptor, Value, ValuePool};
use rustc_hash::FxHashSet;

use crate::stack::ensure_sufficient_stack;
use crate::{Chain, Invocable, MapperIndex, ResolveError, SearchTrace, TraceEvent};

/// Build a chain that calls `target` with `values` plus whatever `library`
/// can derive from them.
pub fn build_chain<'a, F: Invocable>(
    target: &'a F,
    library: &'a [F],
    values: impl IntoIterator<Item = Value>,
) -> Result<Chain<'a, F>, ResolveError> {
    build_chain_traced(target, library, values, &mut SearchTrace::disabled())
}

/// [`build_chain`], reporting search decisions to `trace`.
#[tracing::instrument(level = "debug", skip_all, fields(target = %target, library = library.len()))]
pub fn build_chain_traced<'a, F: Invocable>(
    target: &'a F,
    library: &'a [F],
    values: impl IntoIterator<Item = Value>,
    trace: &mut SearchTrace,
) -> Result<Chain<'a, F>, ResolveError> {
    let mut pool: ValuePool = values.into_iter().collect();
    pool.extend(target.bound_values().iter().cloned());

    trace.record(|| {
        let mut types: Vec<String> = pool.iter().map(|v| v.ty().to_string()).collect();
        types.sort();
        TraceEvent::Creating {
            func: target.to_string(),
            values: types,
        }
    });

    let missing = target.missing_args(pool.as_slice());
    if missing.is_empty() {
        trace.record(|| TraceEvent::SatisfiedByInputs {
            func: target.to_string(),
        });
        return Ok(Chain::new(vec![target], pool));
    }
    for ty in &missing {
        trace.record(|| TraceEvent::MissingArgument {
            func: target.to_string(),
            ty: ty.to_string(),
        });
    }

    let index = MapperIndex::new(library);
    for mapper in library {
        trace.record(|| TraceEvent::MapperAvailable {
            mapper: mapper.to_string(),
            out: mapper.out().to_string(),
        });
    }

    let mut search = ChainSearch {
        values: pool.as_slice(),
        index: &index,
        chain: Vec::new(),
        resolved: FxHashSet::default(),
        pending: FxHashSet::default(),
        trace: &mut *trace,
    };
    let outcome = search.resolve(target);
    let chain = search.chain;
    if let Err(err) = outcome {
        tracing::debug!(%err, "no chain found");
        return Err(err);
    }

    let chain = Chain::new(chain, pool);
    trace.record(|| TraceEvent::ChainBuilt {
        chain: chain.to_string(),
    });
    Ok(chain)
}

/// Mutable state of one depth-first search.
struct ChainSearch<'a, 's, F> {
    /// The caller's values plus the target's bound values.
    values: &'s [Value],
    index: &'s MapperIndex<'a, F>,
    /// Committed invocables, in call order.
    chain: Vec<&'a F>,
    /// Exactly the invocables in `chain`.
    resolved: FxHashSet<*const F>,
    /// Invocables on the current path; never selected as their own producer.
    pending: FxHashSet<*const F>,
    trace: &'s mut SearchTrace,
}

impl<'a, F: Invocable> ChainSearch<'a, '_, F> {
    fn resolve(&mut self, f: &'a F) -> Result<(), ResolveError> {
        let missing = f.missing_args(self.values);
        if missing.is_empty() {
            self.commit(f);
            return Ok(());
        }

        let id = ptr::from_ref(f);
        self.pending.insert(id);
        let outcome = self.satisfy(f, &missing);
        self.pending.remove(&id);
        outcome?;

        self.commit(f);
        Ok(())
    }

    fn satisfy(&mut self, f: &'a F, missing: &[TypeDescriptor]) -> Result<(), ResolveError> {
        let index = self.index;
        'missing: for ty in missing {
            let producers = index.producers(ty.key());

            if let Some(done) = producers
                .iter()
                .find(|m| self.resolved.contains(&ptr::from_ref(**m)))
            {
                self.trace.record(|| TraceEvent::AlreadyResolved {
                    ty: ty.to_string(),
                    by: done.to_string(),
                });
                continue;
            }

            let mut last_failure = None;
            for &candidate in producers {
                if self.pending.contains(&ptr::from_ref(candidate)) {
                    continue;
                }
                let mark = self.chain.len();
                match ensure_sufficient_stack(|| self.resolve(candidate)) {
                    Ok(()) => {
                        self.trace.record(|| TraceEvent::Satisfied {
                            ty: ty.to_string(),
                            by: candidate.to_string(),
                        });
                        continue 'missing;
                    }
                    Err(err) => {
                        self.rollback(mark);
                        self.trace.record(|| TraceEvent::CandidateFailed {
                            ty: ty.to_string(),
                            candidate: candidate.to_string(),
                        });
                        last_failure = Some(err);
                    }
                }
            }

            self.trace.record(|| TraceEvent::Unresolvable {
                func: f.to_string(),
                ty: ty.to_string(),
            });
            return Err(ResolveError::unresolvable(ty, last_failure));
        }
        Ok(())
    }

    fn commit(&mut self, f: &'a F) {
        if self.resolved.insert(ptr::from_ref(f)) {
            self.chain.push(f);
        }
    }

    /// Undo everything committed since the chain had `mark` entries.
    fn rollback(&mut self, mark: usize) {
        for f in self.chain.drain(mark..) {
            self.resolved.remove(&ptr::from_ref(f));
        }
    }
}
