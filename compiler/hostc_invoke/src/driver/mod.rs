//! The invocation driver.
//!
//! `invoke` snapshots the invocation, installs an [`ObserverAdapter`] as
//! the engine's diagnostic consumer, hands the remapped buffers to the
//! engine's source manager and calls the engine entry point. The engine is
//! process-global and not reentrant, so calls are serialized by a global
//! lock; calling `invoke` again from inside a handler is a programming
//! error and panics rather than deadlocking.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use hostc_frontend::{Frontend, FrontendRequest, MainAddr, StandardFrontend};
use hostc_source::SourceManager;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::adapter::ObserverAdapter;
use crate::{initialize, is_initialized, Invocation};

/// Tool identity passed to the engine.
pub const TOOL_NAME: &str = "hostc";

/// A failed invocation that is not a compilation failure.
///
/// Compilation failures are a nonzero `Ok` status plus error diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The engine reported an internal invariant violation and the
    /// invocation's fatal policy is `Report`.
    #[error("engine invariant violated: {message} (engine status {status})")]
    EngineFatal { message: String, status: i32 },
}

static ENGINE_LOCK: Mutex<()> = Mutex::new(());

thread_local! {
    static IN_INVOKE: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside `invoke` for its lifetime.
struct ReentrancyGuard;

impl ReentrancyGuard {
    fn enter() -> Self {
        let nested = IN_INVOKE.with(|flag| flag.replace(true));
        assert!(
            !nested,
            "invoke called from inside a diagnostic handler; the engine is not reentrant"
        );
        ReentrancyGuard
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        IN_INVOKE.with(|flag| flag.set(false));
    }
}

/// The address the engine receives as its main-address token.
fn driver_entry() {}

/// Drives invocations through an engine.
#[derive(Clone)]
pub struct Driver {
    engine: Arc<dyn Frontend>,
}

impl Default for Driver {
    fn default() -> Self {
        Driver::new(Arc::new(StandardFrontend))
    }
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver").finish_non_exhaustive()
    }
}

impl Driver {
    pub fn new(engine: Arc<dyn Frontend>) -> Self {
        Driver { engine }
    }

    /// Run the engine once with `invocation`'s configuration.
    ///
    /// Returns the engine status unchanged. The observer is called for
    /// every diagnostic before this returns, and never afterwards.
    #[tracing::instrument(level = "debug", skip_all, fields(args = invocation.arguments().len()))]
    pub fn invoke(&self, invocation: &mut Invocation) -> Result<i32, InvokeError> {
        let _reentrancy = ReentrancyGuard::enter();

        debug_assert!(is_initialized(), "hostc_invoke::initialize must be called before invoke");
        if !is_initialized() {
            warn!("invoke before initialize; initializing now");
            initialize();
        }

        let arguments = invocation.arguments().to_vec();
        let mut sources = SourceManager::with_remapped(invocation.remapped_buffers());
        let policy = invocation.fatal_policy();
        debug!(buffers = sources.remapped_count(), ?policy, "invoking engine");

        let mut adapter = ObserverAdapter::new(invocation.observer_mut(), policy);
        let status = {
            let _engine = ENGINE_LOCK.lock();
            self.engine.perform(
                FrontendRequest {
                    args: &arguments,
                    tool: TOOL_NAME,
                    main_addr: MainAddr::of(driver_entry),
                    sources: &mut sources,
                },
                &mut adapter,
            )
        };

        debug!(status, forwarded = adapter.forwarded(), "engine returned");
        match adapter.into_fatal() {
            Some(message) => Err(InvokeError::EngineFatal { message, status }),
            None => Ok(status),
        }
    }
}

/// Run `invocation` through the standard engine.
pub fn invoke(invocation: &mut Invocation) -> Result<i32, InvokeError> {
    Driver::default().invoke(invocation)
}
