// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`runner`] defines the `ProcessRunner` trait and the request/result
//!   types exchanged with it.
//! - [`shell`] provides `ShellProcessRunner`, the production implementation
//!   built on `tokio::process::Command`.

pub mod runner;
pub mod shell;

pub use runner::{LaunchError, ProcessRequest, ProcessResult, ProcessRunner};
pub use shell::ShellProcessRunner;

/// Default output cap: 1 GiB of combined stdout and stderr.
pub const DEFAULT_MAX_BUFFER_BYTES: usize = 1024 * 1024 * 1024;
