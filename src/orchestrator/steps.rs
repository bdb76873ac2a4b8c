// src/orchestrator/steps.rs

//! Individual Maven operations and their failure policy.

use std::path::Path;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::errors::{BuildError, Result};
use crate::exec::{ProcessRequest, ProcessResult};
use crate::parse::{VersionInfo, parse_version_info};
use crate::resolve::{BuildCommandSpec, ResolvedCommand, telemetry_command_label};
use crate::session::{FolderInfo, TransformSession};
use crate::telemetry::{BuildResult, BuildTelemetryEvent};

use super::BuildOrchestrator;

/// Outcome of one pipeline step.
///
/// `NonFatal` failures are logged and the run continues; `Fatal` ends it.
#[derive(Debug)]
pub enum StepOutcome<T> {
    Ok(T),
    NonFatal(BuildError),
    Fatal(BuildError),
}

impl BuildOrchestrator {
    async fn invoke(
        &self,
        spec: BuildCommandSpec,
        working_dir: &Path,
        resolved: ResolvedCommand,
    ) -> Result<ProcessResult> {
        let request = ProcessRequest {
            spec,
            working_dir: working_dir.to_path_buf(),
            environment: resolved.environment,
            output_cap: self.options.output_cap,
        };
        self.runner.run(request).await
    }

    /// Copy all dependencies (with parent POMs, repository layout) into
    /// `folder`. Failure is non-fatal.
    pub async fn copy_dependencies(
        &self,
        session: &TransformSession,
        folder: &FolderInfo,
        module_path: &Path,
    ) -> StepOutcome<()> {
        let resolved = self.resolver.resolve(session);
        let base = resolved.command.clone();
        session.append_to_error_log(format!("Running command {base} copy-dependencies"));

        let spec = BuildCommandSpec::copy_dependencies(&base, folder);
        let result = match self.invoke(spec, module_path, resolved).await {
            Ok(result) => result,
            Err(err) => {
                session.append_to_error_log(format!("{base} copy-dependencies failed: \n {err}"));
                info!(command = %base, error = %err, "copy-dependencies failed; continuing");
                return StepOutcome::NonFatal(err);
            }
        };

        if result.success() {
            session.append_to_error_log(format!("{base} copy-dependencies succeeded"));
            return StepOutcome::Ok(());
        }

        let error_log = result.error_log();
        session.append_to_error_log(format!("{base} copy-dependencies failed: \n {error_log}"));
        info!(
            command = %base,
            exit_code = ?result.status,
            "Maven copy-dependencies failed, but still continuing with transformation: {}",
            error_log
        );
        StepOutcome::NonFatal(failure_error(&base, &result, || {
            BuildError::Other(anyhow::anyhow!("Maven copy-deps error"))
        }))
    }

    /// Run `clean install` against the project-local repository in
    /// `folder`. Failure is fatal. Records one telemetry event per attempt.
    pub async fn install_project(
        &self,
        session: &TransformSession,
        folder: &FolderInfo,
        module_path: &Path,
    ) -> StepOutcome<()> {
        let started = Instant::now();
        let resolved = self.resolver.resolve(session);
        let base = resolved.command.clone();
        session.append_to_error_log(format!("Running command {base} clean install"));

        let skip_tests = session.custom_build_command().skips_tests();
        let spec = BuildCommandSpec::install(&base, folder, skip_tests);
        let arg_string = spec.arg_string();

        let outcome = match self.invoke(spec, module_path, resolved).await {
            Ok(result) if result.success() => {
                session.append_to_error_log(format!("{base} {arg_string} succeeded"));
                StepOutcome::Ok(())
            }
            Ok(result) => {
                let error_log = result.error_log();
                session.append_to_error_log(format!("{base} {arg_string} failed: \n {error_log}"));
                error!(
                    command = %base,
                    exit_code = ?result.status,
                    truncated = result.truncated,
                    "Error in running Maven {} command {} = {}",
                    arg_string,
                    base,
                    error_log
                );
                StepOutcome::Fatal(BuildError::MavenExecution {
                    command: base.clone(),
                    args: arg_string,
                    output: error_log,
                })
            }
            Err(err) => {
                session.append_to_error_log(format!("{base} {arg_string} failed: \n {err}"));
                error!(command = %base, error = %err, "Maven install could not be completed");
                StepOutcome::Fatal(err)
            }
        };

        let (result, reason) = match &outcome {
            StepOutcome::Ok(()) => (BuildResult::Succeeded, None),
            StepOutcome::NonFatal(e) | StepOutcome::Fatal(e) => {
                (BuildResult::Failed, Some(e.code().to_string()))
            }
        };
        self.telemetry.record(BuildTelemetryEvent {
            session_id: session.session_id().to_string(),
            build_command: telemetry_command_label(&base),
            result,
            reason,
            duration: started.elapsed(),
        });

        outcome
    }

    /// Run `-v` in `project_path` and parse the Maven and Java versions.
    ///
    /// Never fails; fields the output does not reveal are `None`.
    pub async fn probe_versions(
        &self,
        session: &TransformSession,
        project_path: &Path,
    ) -> VersionInfo {
        let resolved = self.resolver.resolve(session);
        let base = resolved.command.clone();
        let spec = BuildCommandSpec::version_probe(&base);

        let info = match self.invoke(spec, project_path, resolved).await {
            Ok(result) => {
                if let Some(err) = &result.launch_error {
                    warn!(command = %base, error = %err, "version probe could not start");
                }
                parse_version_info(&result.stdout)
            }
            Err(err) => {
                warn!(command = %base, error = %err, "version probe failed");
                VersionInfo::default()
            }
        };

        info!(
            command = %base,
            maven_version = info.maven_version.as_deref().unwrap_or("<absent>"),
            java_version = info.java_version.as_deref().unwrap_or("<absent>"),
            project_jdk = session.source_jdk().unwrap_or("<unknown>"),
            "ran version probe"
        );
        info
    }

    /// Produce the XML dependency-update report in `folder`; returns stdout.
    pub async fn dependency_update_report(
        &self,
        session: &TransformSession,
        folder: &FolderInfo,
    ) -> Result<String> {
        let resolved = self.resolver.resolve(session);
        let base = resolved.command.clone();
        let spec = BuildCommandSpec::dependency_updates(&base, folder);

        // the aggregate report looks for pom.xml in the working directory
        let result = self.invoke(spec, &folder.path, resolved).await?;
        if result.success() {
            info!(command = %base, "dependency update report generated");
            return Ok(result.stdout);
        }

        warn!(command = %base, exit_code = ?result.status, "dependency update report failed");
        Err(failure_error(&base, &result, || BuildError::DependencyReport {
            stderr: result.stderr.clone(),
        }))
    }
}

/// `Launch` for launch-level failures, `otherwise()` for logical ones.
fn failure_error(
    command: &str,
    result: &ProcessResult,
    otherwise: impl FnOnce() -> BuildError,
) -> BuildError {
    match &result.launch_error {
        Some(err) => BuildError::Launch {
            command: command.to_string(),
            reason: err.reason.clone(),
        },
        None => otherwise(),
    }
}
