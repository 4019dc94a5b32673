//! Closure-backed reference invocable.

use std::fmt;
use std::sync::Arc;

use bridge_types::{TypeDescriptor, Value};

use crate::{BindError, Bound, ExecError, ExecResult, Invocable};

type Body = dyn Fn(&[Value]) -> ExecResult + Send + Sync;

/// An invocable backed by a closure over its positional arguments.
///
/// Arguments are bound by key: each positional arg takes the most recently
/// appended pool value of its type, falling back to the func's own bound
/// values. The closure receives the bound values in `args` order.
#[derive(Clone)]
pub struct Func {
    name: Arc<str>,
    args: Vec<TypeDescriptor>,
    out: TypeDescriptor,
    values: Vec<Value>,
    body: Arc<Body>,
}

impl Func {
    pub fn new(
        name: impl Into<Arc<str>>,
        args: impl IntoIterator<Item = TypeDescriptor>,
        out: TypeDescriptor,
        body: impl Fn(&[Value]) -> ExecResult + Send + Sync + 'static,
    ) -> Self {
        Func {
            name: name.into(),
            args: args.into_iter().collect(),
            out,
            values: Vec::new(),
            body: Arc::new(body),
        }
    }

    /// Attach values that are always available to this func.
    #[must_use]
    pub fn with_values(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.values.extend(values);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self, values: &[Value]) -> Result<Vec<Value>, BindError> {
        self.args
            .iter()
            .map(|arg| {
                let key = arg.key();
                values
                    .iter()
                    .rev()
                    .chain(self.values.iter().rev())
                    .find(|v| v.key() == key)
                    .cloned()
                    .ok_or_else(|| BindError::MissingArgument {
                        func: self.name.to_string(),
                        ty: arg.clone(),
                    })
            })
            .collect()
    }
}

impl Invocable for Func {
    fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    fn out(&self) -> &TypeDescriptor {
        &self.out
    }

    fn bound_values(&self) -> &[Value] {
        &self.values
    }

    fn prepare(&self, values: &[Value]) -> Bound<'_> {
        match self.bind(values) {
            Ok(args) => Bound::new(move || (self.body)(&args)),
            Err(err) => Bound::failed(ExecError::new(err)),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Func")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("out", &self.out)
            .field("values", &self.values.len())
            .finish_non_exhaustive()
    }
}
