// src/orchestrator/mod.rs

//! Build orchestration.
//!
//! - [`steps`] implements the individual Maven operations and their failure
//!   policy (`StepOutcome`).
//! - [`pipeline`] sequences them into the `prepare` run and tracks the
//!   states it passes through.
//! - [`pause`] holds the yield point taken before the first invocation.

pub mod pause;
pub mod pipeline;
pub mod steps;

use std::path::PathBuf;

pub use pause::{NoPause, TimedPause, YieldPoint};
pub use pipeline::PipelineReport;
pub use steps::StepOutcome;

use crate::exec::{DEFAULT_MAX_BUFFER_BYTES, ProcessRunner};
use crate::notify::Notifier;
use crate::resolve::{BuildToolSetup, CommandResolver};
use crate::telemetry::TelemetrySink;

/// Tunables for one orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Cap on combined stdout/stderr per invocation.
    pub output_cap: usize,
    /// Where the build log is written on a fatal install failure. Defaults
    /// to a per-session directory under the system temp dir.
    pub log_dir: Option<PathBuf>,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            output_cap: DEFAULT_MAX_BUFFER_BYTES,
            log_dir: None,
        }
    }
}

/// Drives Maven for one transformation session at a time.
pub struct BuildOrchestrator {
    runner: Box<dyn ProcessRunner>,
    resolver: CommandResolver,
    setup: Box<dyn BuildToolSetup>,
    telemetry: Box<dyn TelemetrySink>,
    notifier: Box<dyn Notifier>,
    pause: Box<dyn YieldPoint>,
    options: OrchestratorOptions,
}

impl BuildOrchestrator {
    pub fn new(
        runner: Box<dyn ProcessRunner>,
        resolver: CommandResolver,
        setup: Box<dyn BuildToolSetup>,
        telemetry: Box<dyn TelemetrySink>,
        notifier: Box<dyn Notifier>,
        pause: Box<dyn YieldPoint>,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            runner,
            resolver,
            setup,
            telemetry,
            notifier,
            pause,
            options,
        }
    }
}
