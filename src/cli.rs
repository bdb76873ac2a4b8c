// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `mvnprep`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mvnprep",
    version,
    about = "Resolve, copy and build Maven project dependencies ahead of a code transformation.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Mvnprep.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MVNPREP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Project root (where `pom.xml` and an optional `mvnw` live).
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub project: PathBuf,

    /// Module to build; defaults to the project root.
    #[arg(long, value_name = "DIR", global = true)]
    pub module: Option<PathBuf>,

    /// Override `JAVA_HOME` for every Maven invocation.
    #[arg(long, value_name = "PATH", global = true)]
    pub java_home: Option<String>,

    /// Append `-DskipTests` to `clean install`.
    #[arg(long, global = true)]
    pub skip_tests: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Copy dependencies, then `clean install` into a local repository.
    Prepare {
        /// Output directory and local repository root.
        #[arg(long, value_name = "DIR")]
        deps_dir: PathBuf,
    },
    /// Print the Maven and Java versions Maven reports.
    Versions,
    /// Generate the XML dependency-update report.
    DependencyReport {
        /// Directory holding the `pom.xml`; the report is written here too.
        #[arg(long, value_name = "DIR")]
        deps_dir: PathBuf,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
