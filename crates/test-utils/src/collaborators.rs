use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use mvnprep::errors::Result;
use mvnprep::notify::Notifier;
use mvnprep::orchestrator::YieldPoint;
use mvnprep::resolve::BuildToolSetup;
use mvnprep::session::{CancellationToken, TransformSession};
use mvnprep::telemetry::{BuildTelemetryEvent, TelemetrySink};

use crate::EventLog;

/// Setup step that always picks the same command.
#[derive(Clone)]
pub struct FixedSetup {
    command: String,
    events: EventLog,
}

impl FixedSetup {
    pub fn new(command: &str, events: EventLog) -> Self {
        Self {
            command: command.to_string(),
            events,
        }
    }
}

impl BuildToolSetup for FixedSetup {
    fn ensure_configured(&self, session: &TransformSession) -> Result<()> {
        self.events.push("setup");
        session.set_maven_name(self.command.clone());
        Ok(())
    }
}

/// Records pauses instead of sleeping. Optionally cancels the session
/// while paused, to simulate a user cancelling early.
#[derive(Clone, Default)]
pub struct RecordingPause {
    events: EventLog,
    cancel_on_pause: Option<CancellationToken>,
}

impl RecordingPause {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            cancel_on_pause: None,
        }
    }

    pub fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_pause = Some(token);
        self
    }
}

impl YieldPoint for RecordingPause {
    fn pause(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.events.push("pause");
        if let Some(token) = &self.cancel_on_pause {
            token.cancel();
        }
        Box::pin(async {})
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
    Info(String),
    OpenedDocument(PathBuf),
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
    events: EventLog,
}

impl RecordingNotifier {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_error(&self, message: &str) {
        self.events.push("notify error");
        self.seen
            .lock()
            .unwrap()
            .push(Notification::Error(message.to_string()));
    }

    fn show_info(&self, message: &str) {
        self.events.push("notify info");
        self.seen
            .lock()
            .unwrap()
            .push(Notification::Info(message.to_string()));
    }

    fn open_document(&self, path: &Path) {
        self.events.push("open document");
        self.seen
            .lock()
            .unwrap()
            .push(Notification::OpenedDocument(path.to_path_buf()));
    }
}

#[derive(Clone, Default)]
pub struct RecordingTelemetry {
    events: Arc<Mutex<Vec<BuildTelemetryEvent>>>,
}

impl RecordingTelemetry {
    pub fn events(&self) -> Vec<BuildTelemetryEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&self, event: BuildTelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }
}
