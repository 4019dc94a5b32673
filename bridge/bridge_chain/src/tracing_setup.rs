//! Subscriber setup for hosts and tests that want search logs.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Filter directives, checked before `RUST_LOG`.
const LOG_ENV: &str = "BRIDGE_LOG";

/// When set, render nested search spans as a tree.
const TREE_ENV: &str = "BRIDGE_LOG_TREE";

/// Install a global subscriber for search diagnostics.
///
/// Does nothing unless `BRIDGE_LOG` or `RUST_LOG` is set, e.g.
/// `BRIDGE_LOG=bridge_chain=trace`. Safe to call more than once; a subscriber
/// installed elsewhere is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Some(filter) = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .ok()
        else {
            return;
        };

        let tree = std::env::var_os(TREE_ENV).is_some();
        let result = tracing_subscriber::registry()
            .with(filter)
            .with(tree.then(|| HierarchicalLayer::new(2).with_targets(true)))
            .with((!tree).then(|| fmt::layer().with_target(true).with_level(true)))
            .try_init();

        if result.is_err() {
            tracing::debug!("global subscriber already installed");
        }
    });
}
