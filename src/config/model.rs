// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::exec::DEFAULT_MAX_BUFFER_BYTES;
use crate::orchestrator::pause::DEFAULT_PAUSE;
use crate::types::CustomBuildCommand;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [maven]
/// java_home = "/opt/jdk17"
/// build_command = "skip tests"
///
/// [project]
/// source_jdk = "8"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub maven: MavenSection,

    #[serde(default)]
    pub project: ProjectSection,
}

/// `[maven]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MavenSection {
    /// Explicit executable; skips wrapper detection when set.
    #[serde(default)]
    pub command: Option<String>,

    /// `JAVA_HOME` handed to every invocation.
    #[serde(default)]
    pub java_home: Option<String>,

    #[serde(default)]
    pub build_command: CustomBuildCommand,

    /// Cap on combined stdout/stderr per invocation.
    #[serde(default = "default_max_buffer_bytes")]
    pub max_buffer_bytes: usize,

    /// Pause before the first invocation, in milliseconds.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// Where build logs are written on failure.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_max_buffer_bytes() -> usize {
    DEFAULT_MAX_BUFFER_BYTES
}

fn default_pause_ms() -> u64 {
    DEFAULT_PAUSE.as_millis() as u64
}

impl Default for MavenSection {
    fn default() -> Self {
        Self {
            command: None,
            java_home: None,
            build_command: CustomBuildCommand::default(),
            max_buffer_bytes: default_max_buffer_bytes(),
            pause_ms: default_pause_ms(),
            log_dir: None,
        }
    }
}

/// `[project]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSection {
    /// JDK the project currently targets, e.g. `"8"`. Diagnostic only.
    #[serde(default)]
    pub source_jdk: Option<String>,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub maven: MavenSection,
    pub project: ProjectSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(maven: MavenSection, project: ProjectSection) -> Self {
        Self { maven, project }
    }
}
