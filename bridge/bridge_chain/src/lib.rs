//! Mapper chain resolution.
//!
//! A host holds a library of mappers (invocables that turn some typed inputs
//! into one typed output) and wants to call a target whose inputs it cannot
//! supply directly. This crate finds an ordered chain of mappers that bridges
//! the gap, and answers the inverse question of which leaf types a caller
//! must be able to supply for such a chain to exist.
//!
//! # Entry points
//!
//! - [`build_chain`]: value-driven search from a target and the values on hand
//! - [`find_chain`]: first library entry whose output is acceptable and resolves
//! - [`required_leaf_types`]: predicate-driven search for the leaf type set
//!
//! Each has a `_traced` variant taking a [`SearchTrace`] that records the
//! search decisions for one call.
//!
//! # Search semantics
//!
//! Both searches are depth-first, first-fit, and deterministic: missing types
//! are visited in declared argument order and candidate producers in library
//! order. Backtracking happens at the granularity of whole invocables; the
//! result is not guaranteed to be the shortest chain.

mod chain;
mod error;
mod finder;
mod func;
mod index;
mod invocable;
mod leaf;
mod resolve;
mod stack;
mod trace;
mod tracing_setup;

#[cfg(test)]
mod test_helpers;

pub use chain::Chain;
pub use error::{BindError, ExecError, ResolveError};
pub use finder::{find_chain, find_chain_traced};
pub use func::Func;
pub use index::MapperIndex;
pub use invocable::{missing_args, Bound, ExecResult, Invocable, MissingArgs};
pub use leaf::{required_leaf_types, required_leaf_types_traced};
pub use resolve::{build_chain, build_chain_traced};
pub use trace::{SearchTrace, TraceEvent};
pub use tracing_setup::init_tracing;

pub use bridge_types::{TypeDescriptor, TypeKey, TypeRegistry, Value, ValuePool};
