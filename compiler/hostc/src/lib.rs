//! The `hostc` command-line driver.
//!
//! A thin host over `hostc_invoke`: it builds one invocation from the
//! command line, prints every diagnostic as it arrives and exits with the
//! engine's status.

pub mod cli;
pub mod commands;
pub mod emitter;
pub mod logging;
