//! Process-wide initialization.

use std::sync::Once;

use tracing::debug;

static INIT: Once = Once::new();

/// Set up the engine's process-wide registries.
///
/// Must run before the first [`invoke`](crate::invoke). Further calls, from
/// any thread, do nothing.
pub fn initialize() {
    INIT.call_once(|| {
        debug!("initializing hostc engine");
        hostc_frontend::initialize_engine();
    });
}

/// Whether [`initialize`] has completed.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}
