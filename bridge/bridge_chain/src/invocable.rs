//! The invocable contract consumed by chain resolution.
//!
//! Resolution only looks at the type signature of an invocable (`args`,
//! `out`, `bound_values`). Execution goes through `prepare` and [`Bound`],
//! which the host implements however it likes.

use std::fmt;
use std::sync::Arc;

use bridge_types::{TypeDescriptor, Value};
use smallvec::SmallVec;

use crate::ExecError;

/// Result of executing a bound invocable.
///
/// `Ok(None)` means the invocable ran but produced nothing meaningful; a
/// chain does not add anything to its value pool in that case.
pub type ExecResult = Result<Option<Value>, ExecError>;

/// Argument types not covered by a set of values, in declared order.
pub type MissingArgs = SmallVec<[TypeDescriptor; 4]>;

/// Compute the args not matched by key against `values` or `bound`.
///
/// Order follows `args`. When several positional args share a key, only the
/// first survives: one value satisfies all of them.
pub fn missing_args(args: &[TypeDescriptor], values: &[Value], bound: &[Value]) -> MissingArgs {
    let mut missing = MissingArgs::new();
    for arg in args {
        let key = arg.key();
        let available = values.iter().chain(bound).any(|v| v.key() == key);
        if !available && !missing.contains(arg) {
            missing.push(arg.clone());
        }
    }
    missing
}

/// An operation with typed positional inputs and one typed output.
///
/// Implementations must be immutable once registered in a library. Identity
/// during search is the address of the library entry, so two entries with the
/// same signature are still distinct producers.
///
/// `Display` is the diagnostic label used in traces and in
/// [`Chain`](crate::Chain)'s description.
pub trait Invocable: fmt::Display {
    /// Required input types, in positional order.
    fn args(&self) -> &[TypeDescriptor];

    /// The produced type.
    fn out(&self) -> &TypeDescriptor;

    /// Values always available to this invocable when it runs.
    fn bound_values(&self) -> &[Value] {
        &[]
    }

    /// Args of this invocable not satisfied by `values` or its bound values.
    fn missing_args(&self, values: &[Value]) -> MissingArgs {
        missing_args(self.args(), values, self.bound_values())
    }

    /// Bind concrete values for a later call.
    fn prepare(&self, values: &[Value]) -> Bound<'_>;
}

/// An invocable with its arguments bound, ready to run once.
pub struct Bound<'a> {
    call: Box<dyn FnOnce() -> ExecResult + 'a>,
}

impl<'a> Bound<'a> {
    pub fn new(call: impl FnOnce() -> ExecResult + 'a) -> Self {
        Bound {
            call: Box::new(call),
        }
    }

    /// A binding that fails with `err` when called.
    pub fn failed(err: ExecError) -> Self {
        Bound::new(move || Err(err))
    }

    pub fn call(self) -> ExecResult {
        (self.call)()
    }
}

impl fmt::Debug for Bound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Bound(..)")
    }
}

macro_rules! forward_invocable {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Invocable + ?Sized> Invocable for $ptr {
                fn args(&self) -> &[TypeDescriptor] {
                    (**self).args()
                }

                fn out(&self) -> &TypeDescriptor {
                    (**self).out()
                }

                fn bound_values(&self) -> &[Value] {
                    (**self).bound_values()
                }

                fn missing_args(&self, values: &[Value]) -> MissingArgs {
                    (**self).missing_args(values)
                }

                fn prepare(&self, values: &[Value]) -> Bound<'_> {
                    (**self).prepare(values)
                }
            }
        )*
    };
}

forward_invocable!(&T, Box<T>, Arc<T>);
