// src/orchestrator/pipeline.rs

//! The `prepare` run: setup, copy dependencies, install, cancellation check.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::notify::{BUILD_SUCCEEDED_NOTIFICATION, CLEAN_INSTALL_ERROR_NOTIFICATION};
use crate::session::{FolderInfo, TransformSession};
use crate::types::PipelineState;

use super::{BuildOrchestrator, StepOutcome};

/// States a successful (or cancelled) run passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub states: Vec<PipelineState>,
    /// Non-fatal step failures, in the order they happened.
    pub failures: Vec<String>,
}

impl PipelineReport {
    fn new() -> Self {
        Self {
            states: vec![PipelineState::Idle],
            failures: Vec::new(),
        }
    }

    fn enter(&mut self, state: PipelineState) {
        debug!(?state, "pipeline state");
        self.states.push(state);
    }

    pub fn final_state(&self) -> PipelineState {
        self.states.last().copied().unwrap_or(PipelineState::Idle)
    }

    pub fn is_cancelled(&self) -> bool {
        self.final_state() == PipelineState::Cancelled
    }
}

impl BuildOrchestrator {
    /// Resolve Maven, copy dependencies (best effort) and install.
    ///
    /// Returns the fatal install error after notifying the user and opening
    /// the written build log. A run cancelled after install ends in
    /// [`PipelineState::Cancelled`] without the success notification.
    pub async fn prepare_project_dependencies(
        &self,
        session: &TransformSession,
        folder: &FolderInfo,
        root_path: &Path,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport::new();

        self.setup.ensure_configured(session)?;
        report.enter(PipelineState::PreparingDependencies);
        info!(command = %session.maven_name(), "running Maven copy-dependencies");
        self.pause.pause().await;

        let copied = self.copy_dependencies(session, folder, root_path).await;
        self.settle(session, &mut report, copied, PipelineState::CopyOk, PipelineState::CopyFailed)?;

        report.enter(PipelineState::Installing);
        info!(command = %session.maven_name(), "running Maven install");
        let installed = self.install_project(session, folder, root_path).await;
        self.settle(
            session,
            &mut report,
            installed,
            PipelineState::InstallOk,
            PipelineState::InstallFailed,
        )?;

        report.enter(PipelineState::CheckCancelled);
        if session.is_cancelled() {
            info!("transformation cancelled after install");
            report.enter(PipelineState::Cancelled);
            return Ok(report);
        }

        self.notifier.show_info(BUILD_SUCCEEDED_NOTIFICATION);
        report.enter(PipelineState::Completed);
        Ok(report)
    }

    /// Apply a step's failure policy. `NonFatal` is recorded and the run goes
    /// on; `Fatal` notifies the user, writes and opens the build log, and ends
    /// the run with the step's error.
    fn settle(
        &self,
        session: &TransformSession,
        report: &mut PipelineReport,
        outcome: StepOutcome<()>,
        ok: PipelineState,
        failed: PipelineState,
    ) -> Result<()> {
        match outcome {
            StepOutcome::Ok(()) => {
                report.enter(ok);
                Ok(())
            }
            StepOutcome::NonFatal(err) => {
                info!(
                    error = %err,
                    state = ?failed,
                    "Maven step failed, but transformation will continue and may succeed"
                );
                report.failures.push(err.to_string());
                report.enter(failed);
                Ok(())
            }
            StepOutcome::Fatal(err) => {
                report.enter(failed);
                self.notifier.show_error(CLEAN_INSTALL_ERROR_NOTIFICATION);
                match session.write_logs(&self.log_dir(session)) {
                    Ok(path) => self.notifier.open_document(&path),
                    Err(log_err) => warn!(error = %log_err, "could not write build log"),
                }
                Err(err)
            }
        }
    }

    fn log_dir(&self, session: &TransformSession) -> PathBuf {
        self.options.log_dir.clone().unwrap_or_else(|| {
            std::env::temp_dir()
                .join("mvnprep")
                .join(session.session_id())
        })
    }
}
