//! Resolved chains and their execution.

use std::fmt;

use bridge_types::{TypeDescriptor, Value, ValuePool};

use crate::{ExecError, Invocable};

/// An ordered, duplicate-free sequence of invocables ending in the target.
///
/// The chain owns the value pool it was built from. [`Chain::call`] appends
/// each step's result to that pool so later steps can consume it. Calling
/// takes `&mut self`; run independent executions on clones.
pub struct Chain<'a, F> {
    funcs: Vec<&'a F>,
    values: ValuePool,
}

impl<'a, F: Invocable> Chain<'a, F> {
    /// `funcs` must be non-empty and end with the target.
    pub(crate) fn new(funcs: Vec<&'a F>, values: ValuePool) -> Self {
        debug_assert!(!funcs.is_empty(), "a chain always contains its target");
        Chain { funcs, values }
    }

    /// Invocables in call order; the target is last.
    pub fn funcs(&self) -> &[&'a F] {
        &self.funcs
    }

    pub fn target(&self) -> &'a F {
        self.funcs[self.funcs.len() - 1]
    }

    /// Output type of the target.
    pub fn out(&self) -> &'a TypeDescriptor {
        self.target().out()
    }

    /// Current value pool: the inputs plus results of completed calls.
    pub fn values(&self) -> &ValuePool {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    /// Never true for a built chain.
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Execute every invocable in order and return the target's result.
    ///
    /// Each step is bound against the pool as it stands when the step runs.
    /// The first error aborts the call: it is returned as is, and values
    /// appended during this call are discarded.
    #[tracing::instrument(level = "debug", skip_all, fields(len = self.funcs.len()))]
    pub fn call(&mut self) -> Result<Option<Value>, ExecError> {
        let start = self.values.len();
        let mut result = None;
        for f in &self.funcs {
            tracing::trace!(func = %f, "calling");
            match f.prepare(self.values.as_slice()).call() {
                Ok(out) => {
                    if let Some(value) = &out {
                        self.values.push(value.clone());
                    }
                    result = out;
                }
                Err(err) => {
                    tracing::debug!(func = %f, %err, "chain call aborted");
                    self.values.truncate(start);
                    return Err(err);
                }
            }
        }
        Ok(result)
    }
}

impl<F> Clone for Chain<'_, F> {
    fn clone(&self) -> Self {
        Chain {
            funcs: self.funcs.clone(),
            values: self.values.clone(),
        }
    }
}

impl<F: Invocable> fmt::Display for Chain<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, func) in self.funcs.iter().enumerate() {
            if i > 0 {
                f.write_str(" => ")?;
            }
            write!(f, "{func}")?;
        }
        Ok(())
    }
}

impl<F: Invocable> fmt::Debug for Chain<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("funcs", &format_args!("{self}"))
            .field("values", &self.values)
            .finish()
    }
}
