// tests/probe_and_report.rs

use mvnprep::errors::BuildError;
use mvnprep::exec::ProcessResult;
use mvnprep::session::FolderInfo;
use mvnprep::types::CustomBuildCommand;
use mvnprep_test_utils::builders::{HarnessBuilder, session};
use mvnprep_test_utils::init_tracing;

const MVN_V: &str = "Apache Maven 3.9.4 (abc123)\n\
Maven home: /usr/share/maven\n\
Java version: 17.0.1, vendor: Eclipse Adoptium, runtime: /opt/jdk-17\n";

#[tokio::test]
async fn probe_parses_both_versions() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();
    harness.runner.respond("-v", ProcessResult::exited(0, MVN_V, ""));

    let session = session(dir.path(), CustomBuildCommand::CleanInstall);
    session.set_maven_name("./mvnw");

    let info = harness.orchestrator.probe_versions(&session, dir.path()).await;
    assert_eq!(info.maven_version.as_deref(), Some("3.9.4"));
    assert_eq!(info.java_version.as_deref(), Some("17.0.1"));

    let requests = harness.runner.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].spec.command, "./mvnw");
    assert_eq!(requests[0].spec.args, vec!["-v".to_string()]);
    assert_eq!(requests[0].working_dir, dir.path());
}

#[tokio::test]
async fn probe_never_fails() {
    let dir = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();
    harness.runner.respond(
        "-v",
        ProcessResult::launch_failed("mvn", "mvn: command not found"),
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let info = harness.orchestrator.probe_versions(&session, dir.path()).await;
    assert_eq!(info.maven_version, None);
    assert_eq!(info.java_version, None);
}

#[tokio::test]
async fn probe_keeps_maven_version_when_java_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();
    harness.runner.respond(
        "-v",
        ProcessResult::exited(
            1,
            "Apache Maven 3.6.3\nThe JAVA_HOME environment variable is not defined correctly",
            "",
        ),
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let info = harness.orchestrator.probe_versions(&session, dir.path()).await;
    assert_eq!(info.maven_version.as_deref(), Some("3.6.3"));
    assert_eq!(info.java_version, None);
}

#[tokio::test]
async fn report_returns_stdout_and_runs_in_folder() {
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path());
    let harness = HarnessBuilder::new().build();
    harness.runner.respond(
        "versions:dependency-updates-aggregate-report",
        ProcessResult::exited(0, "[INFO] report written", ""),
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let stdout = harness
        .orchestrator
        .dependency_update_report(&session, &folder)
        .await
        .unwrap();
    assert_eq!(stdout, "[INFO] report written");

    let request = &harness.runner.requests()[0];
    assert_eq!(request.working_dir, folder.path);
    assert!(request.spec.args.contains(&"-DdependencyUpdatesReportFormats=xml".to_string()));
    assert!(request.spec.args.contains(&"-DonlyProjectDependencies=true".to_string()));
}

#[tokio::test]
async fn report_failure_carries_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let folder = FolderInfo::new(dir.path());
    let harness = HarnessBuilder::new().build();
    harness.runner.respond(
        "versions:dependency-updates-aggregate-report",
        ProcessResult::exited(1, "", "No plugin found for prefix 'versions'"),
    );
    let session = session(dir.path(), CustomBuildCommand::CleanInstall);

    let err = harness
        .orchestrator
        .dependency_update_report(&session, &folder)
        .await
        .unwrap_err();
    match err {
        BuildError::DependencyReport { stderr } => {
            assert_eq!(stderr, "No plugin found for prefix 'versions'");
        }
        other => panic!("expected DependencyReport, got {other:?}"),
    }
}
