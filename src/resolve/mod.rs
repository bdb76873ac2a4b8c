// src/resolve/mod.rs

//! Command resolution.
//!
//! - [`command`] decides which Maven executable to run and builds the
//!   argument list of each supported operation.
//! - [`env`] derives the child environment (optional `JAVA_HOME` override).

pub mod command;
pub mod env;

pub use command::{
    BuildCommandSpec, BuildToolSetup, WrapperDetectingSetup, telemetry_command_label,
};
pub use env::{EnvironmentMap, ambient_environment, derive_environment};

use crate::session::TransformSession;

/// The command token and environment for the next invocation.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    pub command: String,
    pub environment: EnvironmentMap,
}

/// Reads the session and the ambient environment; never fails.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    ambient: EnvironmentMap,
}

impl CommandResolver {
    /// Resolver over the current process environment.
    pub fn from_process_env() -> Self {
        Self {
            ambient: ambient_environment(),
        }
    }

    /// Resolver over an explicit ambient environment.
    pub fn with_ambient(ambient: EnvironmentMap) -> Self {
        Self { ambient }
    }

    pub fn resolve(&self, session: &TransformSession) -> ResolvedCommand {
        ResolvedCommand {
            command: session.maven_name().to_string(),
            environment: derive_environment(&self.ambient, session.java_home()),
        }
    }
}
