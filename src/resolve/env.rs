// src/resolve/env.rs

//! Environment derivation for build-tool invocations.

use std::collections::BTreeMap;
use std::ffi::OsString;

/// Variable overridden when the session carries a JDK override.
pub const JAVA_HOME_VAR: &str = "JAVA_HOME";

/// Full environment handed to one child process.
pub type EnvironmentMap = BTreeMap<OsString, OsString>;

/// Snapshot of the current process environment.
pub fn ambient_environment() -> EnvironmentMap {
    std::env::vars_os().collect()
}

/// Copy `ambient`, replacing `JAVA_HOME` when an override is given.
///
/// `ambient` itself is never modified.
pub fn derive_environment(ambient: &EnvironmentMap, java_home: Option<&str>) -> EnvironmentMap {
    let mut env = ambient.clone();
    if let Some(home) = java_home {
        env.insert(OsString::from(JAVA_HOME_VAR), OsString::from(home));
    }
    env
}
