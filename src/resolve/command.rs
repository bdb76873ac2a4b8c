// src/resolve/command.rs

//! Build-tool command selection and per-operation argument lists.

use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::session::{FolderInfo, TransformSession};

/// Project-local wrapper on Unix-like systems.
pub const POSIX_WRAPPER: &str = "./mvnw";
/// Project-local wrapper on Windows.
pub const WINDOWS_WRAPPER: &str = ".\\mvnw.cmd";
/// System-wide Maven installation.
pub const SYSTEM_MAVEN: &str = "mvn";

/// Resolved executable plus the arguments of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommandSpec {
    pub command: String,
    pub args: Vec<String>,
}

impl BuildCommandSpec {
    /// `dependency:copy-dependencies` into `folder`, repository layout with POMs.
    pub fn copy_dependencies(command: &str, folder: &FolderInfo) -> Self {
        Self {
            command: command.to_string(),
            args: vec![
                "dependency:copy-dependencies".to_string(),
                format!("-DoutputDirectory={}", folder.display()),
                "-Dmdep.useRepositoryLayout=true".to_string(),
                "-Dmdep.copyPom=true".to_string(),
                "-Dmdep.addParentPoms=true".to_string(),
                "-q".to_string(),
            ],
        }
    }

    /// `clean install` against a project-local repository in `folder`.
    pub fn install(command: &str, folder: &FolderInfo, skip_tests: bool) -> Self {
        let mut args = vec![
            format!("-Dmaven.repo.local={}", folder.display()),
            "clean".to_string(),
            "install".to_string(),
            "-q".to_string(),
        ];
        if skip_tests {
            args.push("-DskipTests".to_string());
        }
        Self {
            command: command.to_string(),
            args,
        }
    }

    pub fn version_probe(command: &str) -> Self {
        Self {
            command: command.to_string(),
            args: vec!["-v".to_string()],
        }
    }

    /// XML dependency-update report written to `folder`.
    pub fn dependency_updates(command: &str, folder: &FolderInfo) -> Self {
        Self {
            command: command.to_string(),
            args: vec![
                "versions:dependency-updates-aggregate-report".to_string(),
                format!("-DoutputDirectory={}", folder.display()),
                "-DonlyProjectDependencies=true".to_string(),
                "-DdependencyUpdatesReportFormats=xml".to_string(),
            ],
        }
    }

    pub fn arg_string(&self) -> String {
        self.args.join(" ")
    }
}

/// Strip path prefixes from a command name for telemetry.
///
/// `./mvnw` → `mvnw`, `.\mvnw.cmd` → `mvnw.cmd`, `mvn` → `mvn`.
pub fn telemetry_command_label(command: &str) -> String {
    command
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(command)
        .to_string()
}

/// Decides, once per session, which Maven executable to use.
pub trait BuildToolSetup: Send + Sync {
    /// Resolve the executable and record it on the session.
    fn ensure_configured(&self, session: &TransformSession) -> Result<()>;
}

/// Prefers the project's Maven wrapper, falls back to `mvn`.
///
/// A configured override always wins over detection.
#[derive(Debug, Clone, Default)]
pub struct WrapperDetectingSetup {
    command_override: Option<String>,
}

impl WrapperDetectingSetup {
    pub fn new(command_override: Option<String>) -> Self {
        Self { command_override }
    }

    /// Pick the command for `project_root` on the current platform.
    pub fn detect(&self, project_root: &Path) -> String {
        self.detect_for(project_root, cfg!(windows))
    }

    fn detect_for(&self, project_root: &Path, windows: bool) -> String {
        if let Some(cmd) = &self.command_override {
            return cmd.clone();
        }
        if windows && project_root.join("mvnw.cmd").is_file() {
            WINDOWS_WRAPPER.to_string()
        } else if !windows && project_root.join("mvnw").is_file() {
            POSIX_WRAPPER.to_string()
        } else {
            SYSTEM_MAVEN.to_string()
        }
    }
}

impl BuildToolSetup for WrapperDetectingSetup {
    fn ensure_configured(&self, session: &TransformSession) -> Result<()> {
        if session.is_maven_configured() {
            return Ok(());
        }
        let command = self.detect(session.project_path());
        info!(
            command = %command,
            project = %session.project_path().display(),
            "resolved Maven command"
        );
        session.set_maven_name(command);
        Ok(())
    }
}
