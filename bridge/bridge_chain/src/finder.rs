//! Target selection by output type.

use bridge_types::{TypeDescriptor, Value};

use crate::{build_chain_traced, Chain, Invocable, SearchTrace};

/// Find the first library entry whose output satisfies `accept` and whose
/// inputs can be resolved from `values`.
///
/// Library order is priority order. Returns `None` if no accepted entry
/// resolves.
pub fn find_chain<'a, F: Invocable>(
    accept: impl FnMut(&TypeDescriptor) -> bool,
    library: &'a [F],
    values: impl IntoIterator<Item = Value>,
) -> Option<Chain<'a, F>> {
    find_chain_traced(accept, library, values, &mut SearchTrace::disabled())
}

/// [`find_chain`], reporting every attempted resolution to `trace`.
#[tracing::instrument(level = "debug", skip_all, fields(library = library.len()))]
pub fn find_chain_traced<'a, F: Invocable>(
    mut accept: impl FnMut(&TypeDescriptor) -> bool,
    library: &'a [F],
    values: impl IntoIterator<Item = Value>,
    trace: &mut SearchTrace,
) -> Option<Chain<'a, F>> {
    let values: Vec<Value> = values.into_iter().collect();
    for candidate in library {
        if !accept(candidate.out()) {
            continue;
        }
        match build_chain_traced(candidate, library, values.iter().cloned(), trace) {
            Ok(chain) => return Some(chain),
            Err(err) => tracing::trace!(%candidate, %err, "target candidate did not resolve"),
        }
    }
    None
}
