#![allow(dead_code)]

use std::path::{Path, PathBuf};

use mvnprep::orchestrator::{BuildOrchestrator, OrchestratorOptions};
use mvnprep::resolve::{CommandResolver, EnvironmentMap};
use mvnprep::session::TransformSession;
use mvnprep::types::CustomBuildCommand;

use crate::EventLog;
use crate::collaborators::{FixedSetup, RecordingNotifier, RecordingPause, RecordingTelemetry};
use crate::fake_runner::FakeProcessRunner;

/// An orchestrator wired to fakes, plus handles to inspect them.
pub struct Harness {
    pub orchestrator: BuildOrchestrator,
    pub runner: FakeProcessRunner,
    pub notifier: RecordingNotifier,
    pub telemetry: RecordingTelemetry,
    pub events: EventLog,
}

/// Builder for `Harness` to simplify test setup.
pub struct HarnessBuilder {
    command: String,
    ambient: EnvironmentMap,
    log_dir: Option<PathBuf>,
    output_cap: usize,
    pause: Option<RecordingPause>,
    events: EventLog,
    runner: Option<FakeProcessRunner>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            command: "mvn".to_string(),
            ambient: EnvironmentMap::new(),
            log_dir: None,
            output_cap: 1024 * 1024,
            pause: None,
            events: EventLog::default(),
            runner: None,
        }
    }

    pub fn command(mut self, command: &str) -> Self {
        self.command = command.to_string();
        self
    }

    pub fn ambient(mut self, ambient: EnvironmentMap) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn log_dir(mut self, dir: &Path) -> Self {
        self.log_dir = Some(dir.to_path_buf());
        self
    }

    pub fn output_cap(mut self, cap: usize) -> Self {
        self.output_cap = cap;
        self
    }

    /// Use a pause configured by the caller (e.g. one that cancels).
    pub fn pause(mut self, pause: RecordingPause) -> Self {
        self.pause = Some(pause);
        self
    }

    pub fn events(&self) -> EventLog {
        self.events.clone()
    }

    /// Pre-scripted runner; it should share `events()`.
    pub fn runner(mut self, runner: FakeProcessRunner) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn build(self) -> Harness {
        let runner = self
            .runner
            .unwrap_or_else(|| FakeProcessRunner::new(self.events.clone()));
        let notifier = RecordingNotifier::new(self.events.clone());
        let telemetry = RecordingTelemetry::default();
        let pause = self
            .pause
            .unwrap_or_else(|| RecordingPause::new(self.events.clone()));

        let orchestrator = BuildOrchestrator::new(
            Box::new(runner.clone()),
            CommandResolver::with_ambient(self.ambient),
            Box::new(FixedSetup::new(&self.command, self.events.clone())),
            Box::new(telemetry.clone()),
            Box::new(notifier.clone()),
            Box::new(pause),
            OrchestratorOptions {
                output_cap: self.output_cap,
                log_dir: self.log_dir,
            },
        );

        Harness {
            orchestrator,
            runner,
            notifier,
            telemetry,
            events: self.events,
        }
    }
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Session for `project` with a fixed id, optionally skipping tests.
pub fn session(project: &Path, build_command: CustomBuildCommand) -> TransformSession {
    TransformSession::new(project)
        .with_session_id("test-session")
        .with_build_command(build_command)
}
