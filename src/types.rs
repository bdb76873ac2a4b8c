use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which flavour of `clean install` the user asked for.
///
/// - `CleanInstall`: the plain build, tests included (default).
/// - `SkipTests`: same build with `-DskipTests` appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CustomBuildCommand {
    #[serde(rename = "clean install", alias = "clean-install")]
    CleanInstall,
    #[serde(rename = "skip tests", alias = "skip-tests")]
    SkipTests,
}

impl CustomBuildCommand {
    pub fn skips_tests(self) -> bool {
        matches!(self, CustomBuildCommand::SkipTests)
    }
}

impl Default for CustomBuildCommand {
    fn default() -> Self {
        CustomBuildCommand::CleanInstall
    }
}

impl fmt::Display for CustomBuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomBuildCommand::CleanInstall => f.write_str("clean install"),
            CustomBuildCommand::SkipTests => f.write_str("skip tests"),
        }
    }
}

impl FromStr for CustomBuildCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', " ").as_str() {
            "clean install" => Ok(CustomBuildCommand::CleanInstall),
            "skip tests" => Ok(CustomBuildCommand::SkipTests),
            other => Err(format!(
                "invalid build_command: {other} (expected \"clean install\" or \"skip tests\")"
            )),
        }
    }
}

/// Terminal and intermediate states of one `prepare` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    PreparingDependencies,
    CopyOk,
    /// Dependency copy failed; the run continues.
    CopyFailed,
    Installing,
    InstallOk,
    /// Ends the run; surfaced to the user.
    InstallFailed,
    CheckCancelled,
    /// Ends the run without the success notification.
    Cancelled,
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_command_spellings() {
        assert_eq!(
            "skip-tests".parse::<CustomBuildCommand>(),
            Ok(CustomBuildCommand::SkipTests)
        );
        assert_eq!(
            " Clean Install ".parse::<CustomBuildCommand>(),
            Ok(CustomBuildCommand::CleanInstall)
        );
        assert!("package".parse::<CustomBuildCommand>().is_err());
    }
}
