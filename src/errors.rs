// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    /// The build tool could not be started at all (not found, not executable).
    #[error("failed to launch '{command}': {reason}")]
    Launch { command: String, reason: String },

    /// `clean install` ran and failed. `output` holds the launch error (if
    /// any) followed by the captured stderr and stdout.
    #[error("Maven {args} error")]
    MavenExecution {
        command: String,
        args: String,
        output: String,
    },

    /// The dependency-update report ran and failed; carries stderr.
    #[error("dependency update report failed: {stderr}")]
    DependencyReport { stderr: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildError {
    /// Stable code for the error kind, used in logs and telemetry.
    pub fn code(&self) -> &'static str {
        match self {
            BuildError::Launch { .. } => "LaunchError",
            BuildError::MavenExecution { .. } => "MavenExecutionError",
            BuildError::DependencyReport { .. } => "DependencyReportError",
            BuildError::Config(_) => "ConfigError",
            BuildError::Io(_) => "IoError",
            BuildError::Toml(_) => "TomlError",
            BuildError::Other(_) => "Other",
        }
    }

    /// Captured build output attached to the error, if any.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            BuildError::MavenExecution { output, .. } => Some(output),
            BuildError::DependencyReport { stderr } => Some(stderr),
            _ => None,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BuildError>;
