// src/telemetry.rs

//! Telemetry events for local build attempts.

use std::time::Duration;

use tracing::info;

/// Result of a recorded build attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildResult {
    Succeeded,
    Failed,
}

impl BuildResult {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildResult::Succeeded => "Succeeded",
            BuildResult::Failed => "Failed",
        }
    }
}

/// One event per `clean install` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTelemetryEvent {
    pub session_id: String,
    /// Command name without path separators (`mvnw`, `mvnw.cmd`, `mvn`).
    pub build_command: String,
    pub result: BuildResult,
    /// Error code when the attempt failed.
    pub reason: Option<String>,
    pub duration: Duration,
}

pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: BuildTelemetryEvent);
}

/// Emits each event as a structured `tracing` event.
#[derive(Debug, Clone, Default)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: BuildTelemetryEvent) {
        info!(
            target: "mvnprep::telemetry",
            event = "local_build_project",
            session_id = %event.session_id,
            build_command = %event.build_command,
            result = event.result.as_str(),
            reason = event.reason.as_deref().unwrap_or(""),
            duration_ms = event.duration.as_millis() as u64,
            "telemetry"
        );
    }
}
