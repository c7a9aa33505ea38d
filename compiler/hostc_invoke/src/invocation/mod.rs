//! The caller-owned compilation request.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::Observer;

/// What happens when the engine reports an internal invariant violation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FatalPolicy {
    /// Log and abort the process, without unwinding.
    Abort,
    /// Stop forwarding diagnostics and fail the invocation with
    /// [`InvokeError::EngineFatal`](crate::InvokeError::EngineFatal).
    #[default]
    Report,
}

/// Arguments, in-memory sources and an observer: everything one engine
/// run is configured with.
///
/// Setters may be called any number of times before [`invoke`](crate::invoke).
/// Dropping the invocation (or calling [`Invocation::dispose`]) releases the
/// argument and buffer copies and drops the observer.
#[derive(Debug, Default)]
pub struct Invocation {
    arguments: Vec<String>,
    remapped: FxHashMap<String, Arc<str>>,
    observer: Option<Observer>,
    fatal_policy: FatalPolicy,
}

impl Invocation {
    /// An invocation with no arguments, no buffers and no observer.
    pub fn new() -> Self {
        trace!("creating invocation");
        Self::default()
    }

    /// Replace the whole argument list.
    pub fn set_arguments<I, S>(&mut self, arguments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        trace!(count = self.arguments.len(), "arguments set");
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Make `path` resolve to `contents` instead of the file on disk.
    ///
    /// A second buffer for the same path replaces the first.
    pub fn add_remapped_source(&mut self, path: impl Into<String>, contents: impl Into<Arc<str>>) {
        let path = path.into();
        let contents = contents.into();
        trace!(path = %path, len = contents.len(), "remapped source added");
        self.remapped.insert(path, contents);
    }

    /// The buffer registered for `path`, if any.
    pub fn remapped_source(&self, path: &str) -> Option<&str> {
        self.remapped.get(path).map(AsRef::as_ref)
    }

    /// All remapped buffers, in no particular order.
    pub fn remapped_sources(&self) -> impl Iterator<Item = (&str, &str)> {
        self.remapped
            .iter()
            .map(|(path, contents)| (path.as_str(), contents.as_ref()))
    }

    pub(crate) fn remapped_buffers(&self) -> impl Iterator<Item = (String, Arc<str>)> + '_ {
        self.remapped
            .iter()
            .map(|(path, contents)| (path.clone(), Arc::clone(contents)))
    }

    /// Replace the observer. `None` turns diagnostic forwarding off. The
    /// previous observer, if any, is dropped.
    pub fn set_observer(&mut self, observer: Option<Observer>) {
        debug!(installed = observer.is_some(), "observer set");
        self.observer = observer;
    }

    pub fn clear_observer(&mut self) {
        self.set_observer(None);
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    pub(crate) fn observer_mut(&mut self) -> Option<&mut Observer> {
        self.observer.as_mut()
    }

    pub fn set_fatal_policy(&mut self, policy: FatalPolicy) {
        self.fatal_policy = policy;
    }

    pub fn fatal_policy(&self) -> FatalPolicy {
        self.fatal_policy
    }

    /// Release the invocation. Equivalent to dropping it.
    pub fn dispose(self) {
        debug!(
            arguments = self.arguments.len(),
            buffers = self.remapped.len(),
            observer = self.observer.is_some(),
            "disposing invocation"
        );
    }
}

#[cfg(test)]
mod tests;
