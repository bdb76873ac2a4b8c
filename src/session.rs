// src/session.rs

//! Per-transformation session context.
//!
//! Everything the orchestrator needs to know about the current run lives
//! here and is passed by reference into each operation. The only mutable
//! parts are the resolved command (set once by the setup step), the
//! cancellation flag and the append-only error log.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;
use uuid::Uuid;

use crate::errors::Result;
use crate::types::CustomBuildCommand;

/// File name used when the accumulated error log is written to disk.
pub const BUILD_LOG_FILE_NAME: &str = "build-logs.txt";

/// Directory used both as dependency output and as local Maven repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderInfo {
    pub path: PathBuf,
}

impl FolderInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the folder (and parents) if it does not exist yet.
    pub fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.path)?;
        Ok(())
    }

    /// Path rendered for use inside a `-D` argument.
    pub fn display(&self) -> String {
        self.path.display().to_string()
    }
}

/// Shared cancellation flag, polled by the pipeline after install.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct TransformSession {
    session_id: String,
    project_path: PathBuf,
    module_path: PathBuf,
    java_home: Option<String>,
    custom_build_command: CustomBuildCommand,
    source_jdk: Option<String>,
    maven_name: OnceLock<String>,
    cancellation: CancellationToken,
    error_log: Mutex<Vec<String>>,
}

impl TransformSession {
    /// New session for `project_path`; the module path defaults to the
    /// project path and a fresh session id is generated.
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        let project_path = project_path.into();
        Self {
            session_id: Uuid::new_v4().to_string(),
            module_path: project_path.clone(),
            project_path,
            java_home: None,
            custom_build_command: CustomBuildCommand::default(),
            source_jdk: None,
            maven_name: OnceLock::new(),
            cancellation: CancellationToken::new(),
            error_log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = id.into();
        self
    }

    pub fn with_module_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.module_path = path.into();
        self
    }

    pub fn with_java_home(mut self, java_home: Option<String>) -> Self {
        self.java_home = java_home;
        self
    }

    pub fn with_build_command(mut self, cmd: CustomBuildCommand) -> Self {
        self.custom_build_command = cmd;
        self
    }

    pub fn with_source_jdk(mut self, jdk: Option<String>) -> Self {
        self.source_jdk = jdk;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    pub fn java_home(&self) -> Option<&str> {
        self.java_home.as_deref()
    }

    pub fn custom_build_command(&self) -> CustomBuildCommand {
        self.custom_build_command
    }

    pub fn source_jdk(&self) -> Option<&str> {
        self.source_jdk.as_deref()
    }

    /// Record the command chosen by the setup step. Only the first call wins.
    pub fn set_maven_name(&self, name: impl Into<String>) -> bool {
        self.maven_name.set(name.into()).is_ok()
    }

    /// Command chosen by the setup step; `mvn` if setup has not run.
    pub fn maven_name(&self) -> &str {
        self.maven_name.get().map(String::as_str).unwrap_or("mvn")
    }

    pub fn is_maven_configured(&self) -> bool {
        self.maven_name.get().is_some()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn append_to_error_log(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(session = %self.session_id, "{}", message);
        let mut log = self.error_log.lock().unwrap_or_else(|p| p.into_inner());
        log.push(message);
    }

    /// Snapshot of the error log in append order.
    pub fn error_log(&self) -> Vec<String> {
        self.error_log
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Write the accumulated log to `dir/build-logs.txt` and return its path.
    pub fn write_logs(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(BUILD_LOG_FILE_NAME);
        let mut contents = self.error_log().join("\n");
        contents.push('\n');
        fs::write(&path, contents)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maven_name_is_set_once() {
        let session = TransformSession::new("/tmp/project");
        assert!(!session.is_maven_configured());
        assert_eq!(session.maven_name(), "mvn");

        assert!(session.set_maven_name("./mvnw"));
        assert!(!session.set_maven_name("mvn"));
        assert_eq!(session.maven_name(), "./mvnw");
    }

    #[test]
    fn cancellation_is_shared_between_clones() {
        let token = CancellationToken::new();
        let session = TransformSession::new("/tmp/project").with_cancellation(token.clone());
        assert!(!session.is_cancelled());
        token.cancel();
        assert!(session.is_cancelled());
    }

    #[test]
    fn write_logs_preserves_append_order() {
        let dir = tempfile::tempdir().unwrap();
        let session = TransformSession::new(dir.path());
        session.append_to_error_log("first");
        session.append_to_error_log("second");

        let path = session.write_logs(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), BUILD_LOG_FILE_NAME);
        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn ensure_exists_creates_nested_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = FolderInfo::new(dir.path().join("deps").join("repo"));
        folder.ensure_exists().unwrap();
        folder.ensure_exists().unwrap();
        assert!(folder.path.is_dir());
    }
}
