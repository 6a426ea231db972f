//! Process-wide warning gate.
//!
//! Cleanup passes report recoverable oddities (duplicate atoms, colliding
//! sites, stripped subgraphs) without aborting. Embedders that run many
//! structures in a batch can silence them globally; the pipeline itself
//! only ever consults [`warnings_enabled`].

use std::sync::atomic::{AtomicBool, Ordering};

static WARNING_GATE: AtomicBool = AtomicBool::new(true);

/// Enable or disable warning emission for the whole process.
pub fn set_warnings_enabled(enabled: bool) {
    WARNING_GATE.store(enabled, Ordering::Relaxed);
}

/// Whether warnings are currently emitted.
pub fn warnings_enabled() -> bool {
    WARNING_GATE.load(Ordering::Relaxed)
}

/// Emit a pipeline warning through the logging facade, subject to the gate.
macro_rules! issue_warning {
    ($($arg:tt)*) => {
        if $crate::warnings::warnings_enabled() {
            log::warn!($($arg)*);
        }
    };
}

pub(crate) use issue_warning;
