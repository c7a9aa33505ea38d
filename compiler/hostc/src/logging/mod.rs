//! Tracing setup for the binary.

use std::sync::Once;

/// Environment variable holding the `EnvFilter` directives,
/// e.g. `HOSTC_LOG=hostc_invoke=debug`.
pub const LOG_ENV: &str = "HOSTC_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once; does nothing
/// unless `HOSTC_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var_os(LOG_ENV).is_some() {
            let installed = tracing_subscriber::registry()
                .with(EnvFilter::from_env(LOG_ENV))
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_indent_lines(true),
                )
                .try_init();
            if installed.is_err() {
                eprintln!("hostc: a tracing subscriber is already installed; {LOG_ENV} ignored");
            }
        }
    });
}
