//! Per-call search trace.
//!
//! A [`SearchTrace`] is created by the caller, passed by reference through
//! one search, and then inspected. Every event is also emitted as a
//! `tracing` event at TRACE level, so a subscriber sees the same decisions
//! without any recording.

use std::fmt;

use tracing::Level;

/// One search decision. Invocables and types are stored by display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// Chain search started for `func` with values of the listed types.
    Creating { func: String, values: Vec<String> },
    /// The target's inputs were all supplied; no library search happened.
    SatisfiedByInputs { func: String },
    /// `func` lacks a value of type `ty`.
    MissingArgument { func: String, ty: String },
    /// A library mapper was indexed.
    MapperAvailable { mapper: String, out: String },
    /// `ty` is produced by `by`, which is already part of the chain.
    AlreadyResolved { ty: String, by: String },
    /// `ty` is produced by `by`, newly added to the chain.
    Satisfied { ty: String, by: String },
    /// `candidate` could not be resolved as a producer of `ty`.
    CandidateFailed { ty: String, candidate: String },
    /// No producer of `ty` could be resolved for `func`.
    Unresolvable { func: String, ty: String },
    /// Search succeeded with the described chain.
    ChainBuilt { chain: String },
    /// Leaf search: the caller can supply `ty` for `func`.
    LeafSupplied { func: String, ty: String },
    /// Leaf search: the caller cannot supply `ty`; a mapper is needed.
    LeafMissing { func: String, ty: String },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Creating { func, values } => {
                write!(f, "creating chain for {func} with [{}]", values.join(", "))
            }
            TraceEvent::SatisfiedByInputs { func } => write!(f, "{func}: satisfied by inputs"),
            TraceEvent::MissingArgument { func, ty } => write!(f, "{func}: missing {ty}"),
            TraceEvent::MapperAvailable { mapper, out } => {
                write!(f, "available mapper {mapper} -> {out}")
            }
            TraceEvent::AlreadyResolved { ty, by } => {
                write!(f, "{ty} already provided by {by}")
            }
            TraceEvent::Satisfied { ty, by } => write!(f, "{ty} satisfied by {by}"),
            TraceEvent::CandidateFailed { ty, candidate } => {
                write!(f, "{candidate} did not satisfy {ty}")
            }
            TraceEvent::Unresolvable { func, ty } => write!(f, "{func}: unable to map to {ty}"),
            TraceEvent::ChainBuilt { chain } => write!(f, "chain built: {chain}"),
            TraceEvent::LeafSupplied { func, ty } => write!(f, "{func}: caller supplies {ty}"),
            TraceEvent::LeafMissing { func, ty } => write!(f, "{func}: caller cannot supply {ty}"),
        }
    }
}

/// Diagnostic sink scoped to one search call.
#[derive(Debug, Default)]
pub struct SearchTrace {
    recording: bool,
    events: Vec<TraceEvent>,
}

impl SearchTrace {
    /// Forward events to `tracing` only.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Forward events to `tracing` and keep them for inspection.
    pub fn recording() -> Self {
        SearchTrace {
            recording: true,
            events: Vec::new(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    /// Record an event. The event is only built if someone will see it.
    pub(crate) fn record(&mut self, event: impl FnOnce() -> TraceEvent) {
        let traced = tracing::enabled!(Level::TRACE);
        if !self.recording && !traced {
            return;
        }
        let event = event();
        if traced {
            tracing::trace!("{event}");
        }
        if self.recording {
            self.events.push(event);
        }
    }
}
