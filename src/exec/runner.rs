// src/exec/runner.rs

//! Process runner abstraction.
//!
//! The orchestrator talks to a `ProcessRunner` instead of spawning processes
//! itself. Production code uses [`super::shell::ShellProcessRunner`]; tests
//! provide a scripted runner that never touches the OS.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::errors::Result;
use crate::resolve::{BuildCommandSpec, EnvironmentMap};

/// Everything needed to run one build-tool invocation.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub spec: BuildCommandSpec,
    /// Must exist; a missing directory is reported as a launch error.
    pub working_dir: PathBuf,
    pub environment: EnvironmentMap,
    /// Upper bound on combined stdout + stderr bytes kept in memory.
    pub output_cap: usize,
}

/// The executable could not be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchError {
    pub command: String,
    pub reason: String,
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to launch '{}': {}", self.command, self.reason)
    }
}

/// Outcome of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    /// Exit code; `None` if the process never started or died from a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Output exceeded the cap; captured text is cut and the child was stopped.
    pub truncated: bool,
    pub launch_error: Option<LaunchError>,
}

impl ProcessResult {
    pub fn exited(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: stdout.into(),
            stderr: stderr.into(),
            truncated: false,
            launch_error: None,
        }
    }

    pub fn launch_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            launch_error: Some(LaunchError {
                command: command.into(),
                reason: reason.into(),
            }),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.launch_error.is_none() && self.status == Some(0)
    }

    /// Launch error (if any), then stderr, a newline and stdout.
    pub fn error_log(&self) -> String {
        let mut log = String::new();
        if let Some(err) = &self.launch_error {
            log.push_str(&err.to_string());
            log.push('\n');
        }
        log.push_str(&self.stderr);
        log.push('\n');
        log.push_str(&self.stdout);
        log
    }
}

/// Trait abstracting how build-tool processes are run.
pub trait ProcessRunner: Send + Sync {
    /// Run the request to completion (or until the output cap is hit).
    ///
    /// A non-zero exit is a normal `Ok` result; `Err` is reserved for I/O
    /// failures after the process was started.
    fn run(
        &self,
        request: ProcessRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + '_>>;
}
