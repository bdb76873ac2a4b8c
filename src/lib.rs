// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod notify;
pub mod orchestrator;
pub mod parse;
pub mod resolve;
pub mod session;
pub mod telemetry;
pub mod types;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, load_or_default};
use crate::exec::ShellProcessRunner;
use crate::notify::ConsoleNotifier;
use crate::orchestrator::{BuildOrchestrator, OrchestratorOptions, TimedPause};
use crate::resolve::{BuildToolSetup, CommandResolver, WrapperDetectingSetup};
use crate::session::{FolderInfo, TransformSession};
use crate::telemetry::TracingTelemetrySink;
use crate::types::CustomBuildCommand;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (CLI flags override the file)
/// - the session context
/// - the orchestrator with its production collaborators
/// - Ctrl-C handling (sets the cancellation flag)
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    let session = build_session(&args, &cfg);
    let orchestrator = build_orchestrator(&cfg);

    {
        let token = session.cancellation().clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            token.cancel();
        });
    }

    match &args.command {
        Command::Prepare { deps_dir } => {
            let folder = FolderInfo::new(deps_dir);
            folder
                .ensure_exists()
                .with_context(|| format!("creating {}", deps_dir.display()))?;
            let module = session.module_path().to_path_buf();
            if !has_pom(&module) {
                warn!(module = %module.display(), "no pom.xml found; Maven will likely fail");
            }
            let report = orchestrator
                .prepare_project_dependencies(&session, &folder, &module)
                .await?;
            info!(final_state = ?report.final_state(), "prepare finished");
            if report.is_cancelled() {
                anyhow::bail!("transformation cancelled");
            }
        }
        Command::Versions => {
            configure(&cfg, &session)?;
            let versions = orchestrator
                .probe_versions(&session, session.project_path())
                .await;
            println!(
                "maven: {}",
                versions.maven_version.as_deref().unwrap_or("unknown")
            );
            println!(
                "java: {}",
                versions.java_version.as_deref().unwrap_or("unknown")
            );
        }
        Command::DependencyReport { deps_dir } => {
            configure(&cfg, &session)?;
            let stdout = orchestrator
                .dependency_update_report(&session, &FolderInfo::new(deps_dir))
                .await?;
            print!("{stdout}");
        }
    }

    Ok(())
}

fn build_session(args: &CliArgs, cfg: &ConfigFile) -> TransformSession {
    let build_command = if args.skip_tests {
        CustomBuildCommand::SkipTests
    } else {
        cfg.maven.build_command
    };
    let module = args.module.clone().unwrap_or_else(|| args.project.clone());

    TransformSession::new(&args.project)
        .with_module_path(module)
        .with_java_home(args.java_home.clone().or_else(|| cfg.maven.java_home.clone()))
        .with_build_command(build_command)
        .with_source_jdk(cfg.project.source_jdk.clone())
}

fn build_orchestrator(cfg: &ConfigFile) -> BuildOrchestrator {
    BuildOrchestrator::new(
        Box::new(ShellProcessRunner),
        CommandResolver::from_process_env(),
        Box::new(WrapperDetectingSetup::new(cfg.maven.command.clone())),
        Box::new(TracingTelemetrySink),
        Box::new(ConsoleNotifier),
        Box::new(TimedPause(Duration::from_millis(cfg.maven.pause_ms))),
        OrchestratorOptions {
            output_cap: cfg.maven.max_buffer_bytes,
            log_dir: cfg.maven.log_dir.clone(),
        },
    )
}

/// Resolve the Maven command for subcommands that skip the full pipeline.
fn configure(cfg: &ConfigFile, session: &TransformSession) -> Result<()> {
    WrapperDetectingSetup::new(cfg.maven.command.clone()).ensure_configured(session)?;
    Ok(())
}

/// Whether `dir` looks like a Maven project root.
pub fn has_pom(dir: &Path) -> bool {
    dir.join("pom.xml").is_file()
}
