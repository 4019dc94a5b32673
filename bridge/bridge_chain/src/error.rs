//! Resolution and execution errors.
//!
//! Search failures ([`ResolveError`]) and execution failures ([`ExecError`])
//! never mix: a chain either fails to build, or builds and may then fail when
//! called.

use std::error::Error;
use std::fmt;

use bridge_types::TypeDescriptor;

/// Chain search failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No producer along any explored path yields `ty`.
    ///
    /// `source` is the failure of the last candidate producer that was tried,
    /// if any candidate existed.
    #[error("unable to map to {ty}")]
    UnresolvableType {
        ty: TypeDescriptor,
        source: Option<Box<ResolveError>>,
    },
}

impl ResolveError {
    pub(crate) fn unresolvable(ty: &TypeDescriptor, source: Option<ResolveError>) -> Self {
        ResolveError::UnresolvableType {
            ty: ty.clone(),
            source: source.map(Box::new),
        }
    }

    /// The type that could not be produced at this level.
    pub fn ty(&self) -> &TypeDescriptor {
        match self {
            ResolveError::UnresolvableType { ty, .. } => ty,
        }
    }

    /// The deepest unresolved type along the failing candidate path.
    pub fn root_type(&self) -> &TypeDescriptor {
        let mut current = self;
        while let ResolveError::UnresolvableType {
            source: Some(inner),
            ..
        } = current
        {
            current = inner;
        }
        current.ty()
    }
}

/// Opaque failure of an invocable's execution.
///
/// The chain propagates these verbatim; callers can recover the concrete
/// error with [`ExecError::downcast_ref`].
#[derive(Debug)]
pub struct ExecError(Box<dyn Error + Send + Sync + 'static>);

impl ExecError {
    pub fn new(err: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        ExecError(err.into())
    }

    /// An error carrying only a message.
    pub fn msg(message: impl fmt::Display) -> Self {
        ExecError(message.to_string().into())
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for ExecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

/// A [`Func`](crate::Func) could not bind its arguments from the value pool.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("{func}: no value of type {ty} is available")]
    MissingArgument { func: String, ty: TypeDescriptor },
}
