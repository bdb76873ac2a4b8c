// tests/prepare_pipeline.rs

use std::ffi::OsString;

use mvnprep::errors::BuildError;
use mvnprep::exec::ProcessResult;
use mvnprep::notify::{BUILD_SUCCEEDED_NOTIFICATION, CLEAN_INSTALL_ERROR_NOTIFICATION};
use mvnprep::resolve::EnvironmentMap;
use mvnprep::session::{CancellationToken, FolderInfo};
use mvnprep::telemetry::BuildResult;
use mvnprep::types::{CustomBuildCommand, PipelineState};
use mvnprep_test_utils::builders::{HarnessBuilder, session};
use mvnprep_test_utils::collaborators::{Notification, RecordingPause};
use mvnprep_test_utils::fake_runner::FakeProcessRunner;
use mvnprep_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn copy_failure_is_logged_and_install_still_runs() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path().join("deps"));

    let harness = HarnessBuilder::new().log_dir(dir.path()).build();
    harness.runner.respond(
        "dependency:copy-dependencies",
        ProcessResult::exited(1, "copy stdout", "copy stderr"),
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let report = with_timeout(harness.orchestrator.prepare_project_dependencies(
        &session,
        &folder,
        dir.path(),
    ))
    .await
    .unwrap();

    assert_eq!(
        report.states,
        vec![
            PipelineState::Idle,
            PipelineState::PreparingDependencies,
            PipelineState::CopyFailed,
            PipelineState::Installing,
            PipelineState::InstallOk,
            PipelineState::CheckCancelled,
            PipelineState::Completed,
        ]
    );
    assert_eq!(report.failures.len(), 1);

    let invocations = harness.runner.invocations();
    assert_eq!(invocations.len(), 2);
    assert!(invocations[1].contains("clean install"));

    let log = session.error_log();
    assert!(log.iter().any(|l| l.starts_with("mvn copy-dependencies failed")
        && l.contains("copy stderr")
        && l.contains("copy stdout")));
    assert!(log.iter().any(|l| l.ends_with("succeeded") && l.contains("clean install")));

    assert_eq!(
        harness.notifier.notifications(),
        vec![Notification::Info(BUILD_SUCCEEDED_NOTIFICATION.to_string())]
    );
}

#[tokio::test]
async fn install_failure_is_fatal_and_surfaces_output() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path().join("deps"));

    let harness = HarnessBuilder::new().log_dir(dir.path()).build();
    harness.runner.respond(
        "install",
        ProcessResult::exited(1, "BUILD FAILURE in stdout", "[ERROR] compilation failed"),
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let err = harness
        .orchestrator
        .prepare_project_dependencies(&session, &folder, dir.path())
        .await
        .unwrap_err();

    match &err {
        BuildError::MavenExecution { command, output, .. } => {
            assert_eq!(command, "mvn");
            assert!(output.contains("[ERROR] compilation failed"));
            assert!(output.contains("BUILD FAILURE in stdout"));
        }
        other => panic!("expected MavenExecutionError, got {other:?}"),
    }
    assert_eq!(err.code(), "MavenExecutionError");

    // nothing runs after the failed install
    assert_eq!(harness.runner.requests().len(), 2);

    let notifications = harness.notifier.notifications();
    assert_eq!(
        notifications[0],
        Notification::Error(CLEAN_INSTALL_ERROR_NOTIFICATION.to_string())
    );
    let Notification::OpenedDocument(path) = &notifications[1] else {
        panic!("expected the build log to be opened, got {notifications:?}");
    };
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("[ERROR] compilation failed"));
    assert_eq!(notifications.len(), 2);

    let telemetry = harness.telemetry.events();
    assert_eq!(telemetry.len(), 1);
    assert_eq!(telemetry[0].result, BuildResult::Failed);
    assert_eq!(telemetry[0].reason.as_deref(), Some("MavenExecutionError"));
    assert_eq!(telemetry[0].session_id, "test-session");
}

#[tokio::test]
async fn copy_launch_error_is_non_fatal() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path());

    let harness = HarnessBuilder::new().command("./mvnw").log_dir(dir.path()).build();
    harness.runner.respond(
        "dependency:copy-dependencies",
        ProcessResult::launch_failed("./mvnw", "Permission denied"),
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let report = with_timeout(harness.orchestrator.prepare_project_dependencies(
        &session,
        &folder,
        dir.path(),
    ))
    .await
    .unwrap();

    assert!(report.states.contains(&PipelineState::CopyFailed));
    assert_eq!(report.final_state(), PipelineState::Completed);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].contains("Permission denied"));

    let invocations = harness.runner.invocations();
    assert_eq!(invocations.len(), 2);
    assert!(invocations[1].contains("clean install"));
    assert_eq!(harness.telemetry.events()[0].result, BuildResult::Succeeded);
}

#[tokio::test]
async fn truncated_install_output_is_fatal() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path());

    let harness = HarnessBuilder::new()
        .output_cap(4096)
        .log_dir(dir.path())
        .build();
    harness.runner.respond(
        "install",
        ProcessResult {
            status: None,
            stdout: "x".repeat(4096),
            truncated: true,
            ..ProcessResult::default()
        },
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let err = harness
        .orchestrator
        .prepare_project_dependencies(&session, &folder, dir.path())
        .await
        .unwrap_err();

    assert_eq!(err.code(), "MavenExecutionError");
    let output = err.captured_output().unwrap();
    assert_eq!(output.len(), 4097);
    assert!(output.ends_with(&"x".repeat(4096)));

    assert_eq!(harness.runner.requests()[1].output_cap, 4096);
    assert_eq!(harness.telemetry.events()[0].result, BuildResult::Failed);
    assert_eq!(
        harness.notifier.notifications()[0],
        Notification::Error(CLEAN_INSTALL_ERROR_NOTIFICATION.to_string())
    );
}

#[tokio::test]
async fn launch_failure_during_install_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path());

    let harness = HarnessBuilder::new().command("./mvnw").log_dir(dir.path()).build();
    harness.runner.respond(
        "install",
        ProcessResult::launch_failed("./mvnw", "Permission denied"),
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let err = harness
        .orchestrator
        .prepare_project_dependencies(&session, &folder, dir.path())
        .await
        .unwrap_err();
    assert!(err.captured_output().unwrap().contains("Permission denied"));
    assert_eq!(harness.telemetry.events()[0].build_command, "mvnw");
}

#[tokio::test]
async fn cancellation_after_install_skips_success_notification() {
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path());
    let token = CancellationToken::new();

    let builder = HarnessBuilder::new();
    let pause = RecordingPause::new(builder.events()).cancelling(token.clone());
    let harness = builder.pause(pause).build();
    let session =
        session(dir.path(), CustomBuildCommand::CleanInstall).with_cancellation(token.clone());

    let report = harness
        .orchestrator
        .prepare_project_dependencies(&session, &folder, dir.path())
        .await
        .unwrap();

    assert!(report.is_cancelled());
    assert_eq!(report.final_state(), PipelineState::Cancelled);
    // the in-flight steps still ran to completion
    assert_eq!(harness.runner.requests().len(), 2);
    assert!(harness.notifier.notifications().is_empty());
}

#[tokio::test]
async fn setup_and_pause_happen_before_first_spawn() {
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path());

    let builder = HarnessBuilder::new();
    let events = builder.events();
    let harness = builder.build();
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    harness
        .orchestrator
        .prepare_project_dependencies(&session, &folder, dir.path())
        .await
        .unwrap();

    let seen = events.snapshot();
    assert_eq!(seen[0], "setup");
    assert_eq!(seen[1], "pause");
    assert_eq!(seen[2], "run dependency:copy-dependencies");
    assert!(seen[3].starts_with("run -Dmaven.repo.local="));
    assert_eq!(seen[4], "notify info");
    assert_eq!(seen.len(), 5);
}

#[tokio::test]
async fn skip_tests_and_wrapper_label() {
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path().join("repo"));

    let harness = HarnessBuilder::new().command("./mvnw").build();
    let session = session(dir.path(), CustomBuildCommand::SkipTests);

    harness
        .orchestrator
        .prepare_project_dependencies(&session, &folder, dir.path())
        .await
        .unwrap();

    let install = &harness.runner.requests()[1];
    assert_eq!(install.spec.command, "./mvnw");
    assert_eq!(
        install.spec.args.first().unwrap(),
        &format!("-Dmaven.repo.local={}", folder.display())
    );
    assert_eq!(install.spec.args.last().unwrap(), "-DskipTests");
    assert_eq!(install.working_dir, dir.path());

    let telemetry = harness.telemetry.events();
    assert_eq!(telemetry.len(), 1);
    assert_eq!(telemetry[0].build_command, "mvnw");
    assert_eq!(telemetry[0].result, BuildResult::Succeeded);
}

#[tokio::test]
async fn java_home_override_reaches_every_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path());

    let mut ambient = EnvironmentMap::new();
    ambient.insert("PATH".into(), "/usr/bin".into());
    ambient.insert("JAVA_HOME".into(), "/opt/jdk8".into());

    let events = Default::default();
    let runner = FakeProcessRunner::new(events);
    let harness = HarnessBuilder::new()
        .ambient(ambient.clone())
        .output_cap(4096)
        .runner(runner)
        .build();
    let session = session(dir.path(), CustomBuildCommand::CleanInstall)
        .with_java_home(Some("/opt/jdk17".to_string()));

    harness
        .orchestrator
        .prepare_project_dependencies(&session, &folder, dir.path())
        .await
        .unwrap();

    for request in harness.runner.requests() {
        assert_eq!(request.output_cap, 4096);
        assert_eq!(request.environment.len(), ambient.len());
        assert_eq!(
            request.environment.get(&OsString::from("JAVA_HOME")),
            Some(&OsString::from("/opt/jdk17"))
        );
        assert_eq!(
            request.environment.get(&OsString::from("PATH")),
            Some(&OsString::from("/usr/bin"))
        );
    }
    assert_eq!(
        ambient.get(&OsString::from("JAVA_HOME")),
        Some(&OsString::from("/opt/jdk8"))
    );
}
