//! Shared fixtures for unit tests.
//!
//! Every mapper built here returns a `String` payload describing its call
//! tree, e.g. `t(m1(), m2(m1()))`, and appends its name to a shared call log.

use std::sync::Arc;

use bridge_types::{TypeDescriptor, TypeRegistry, Value};
use parking_lot::Mutex;

use crate::{Chain, ExecError, Func, Invocable};

#[derive(Default)]
pub(crate) struct Fixture {
    registry: TypeRegistry,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Descriptor for `name`, registering it on first use.
    pub(crate) fn ty(&mut self, name: &str) -> TypeDescriptor {
        if let Some(desc) = self.registry.lookup(name) {
            return desc.clone();
        }
        match self.registry.register_named(name) {
            Ok(desc) => desc,
            Err(err) => panic!("fixture type {name}: {err}"),
        }
    }

    fn tys(&mut self, names: &[&str]) -> Vec<TypeDescriptor> {
        names.iter().map(|name| self.ty(name)).collect()
    }

    /// A value of type `name` whose payload is the type name.
    pub(crate) fn value(&mut self, name: &str) -> Value {
        let ty = self.ty(name);
        Value::new(ty, name.to_string())
    }

    pub(crate) fn mapper(&mut self, name: &str, args: &[&str], out: &str) -> Func {
        let args = self.tys(args);
        let out_ty = self.ty(out);
        let calls = Arc::clone(&self.calls);
        let label = name.to_string();
        let result_ty = out_ty.clone();
        Func::new(name, args, out_ty, move |values| {
            calls.lock().push(label.clone());
            Ok(Some(Value::new(
                result_ty.clone(),
                format!("{label}({})", payloads(values).join(", ")),
            )))
        })
    }

    /// A mapper that runs but produces no meaningful value.
    pub(crate) fn void(&mut self, name: &str, args: &[&str], out: &str) -> Func {
        let args = self.tys(args);
        let out_ty = self.ty(out);
        let calls = Arc::clone(&self.calls);
        let label = name.to_string();
        Func::new(name, args, out_ty, move |_| {
            calls.lock().push(label.clone());
            Ok(None)
        })
    }

    pub(crate) fn failing(&mut self, name: &str, args: &[&str], out: &str, msg: &str) -> Func {
        let args = self.tys(args);
        let out_ty = self.ty(out);
        let calls = Arc::clone(&self.calls);
        let label = name.to_string();
        let msg = msg.to_string();
        Func::new(name, args, out_ty, move |_| {
            calls.lock().push(label.clone());
            Err(ExecError::msg(&msg))
        })
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

pub(crate) fn payloads(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| v.downcast_ref::<String>().cloned())
        .collect()
}

pub(crate) fn payload(value: Option<&Value>) -> Option<String> {
    value.and_then(|v| v.downcast_ref::<String>().cloned())
}

pub(crate) fn labels<F: Invocable>(chain: &Chain<'_, F>) -> Vec<String> {
    chain.funcs().iter().map(ToString::to_string).collect()
}
