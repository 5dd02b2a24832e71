use std::sync::Arc;
use std::time::Duration;

use crate::mocks::backend::{job_created, migrate_route, schedule_route, status_mock};

use git_migrator::actions::{ActionFlags, Aspect};
use git_migrator::clock::RecordingClock;
use git_migrator::controller::{MigrationController, RunOutcome};
use git_migrator::fixtures::endpoints::manual_form;
use git_migrator::http_backend::HttpBackend;
use git_migrator::poller::{PollConfig, PollOutcome};
use git_migrator::request::{Interval, SyncMode};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller(mock_server: &MockServer) -> MigrationController {
    MigrationController::new(
        Arc::new(HttpBackend::new(&mock_server.uri()).unwrap()),
        Arc::new(RecordingClock::new()),
        PollConfig::default(),
    )
}

#[tokio::test]
async fn manual_migration_runs_to_completion() {
    let mock_server = MockServer::start().await;
    let mut form = manual_form("main");
    form.actions = ActionFlags::default()
        .with(Aspect::Repo, true)
        .with(Aspect::Branches, true)
        .with(Aspect::Tags, true);

    migrate_route()
        .and(body_partial_json(json!({
            "actions": { "specific_branches": ["main"], "migrate_issues": false }
        })))
        .respond_with(job_created("abc123"))
        .expect(1)
        .mount(&mock_server)
        .await;
    status_mock("abc123", json!({ "status": "processing" }))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    status_mock(
        "abc123",
        json!({ "status": "completed", "results": { "branches": 3 } }),
    )
    .expect(1)
    .mount(&mock_server)
    .await;

    let controller = controller(&mock_server);
    let outcome = controller.run(&form, &CancellationToken::new()).await;

    assert_eq!(
        outcome,
        RunOutcome::Finished {
            job_id: "abc123".to_string(),
            outcome: PollOutcome::Completed {
                results: Some(json!({ "branches": 3 }))
            },
        }
    );

    let lines = controller.log().lines();
    assert_eq!(
        lines,
        vec![
            "Migration started",
            "Job ID: abc123",
            "Status: processing (1/40)",
            "Status: processing (2/40)",
            "Migration completed (job abc123)",
            r#"Results: {"branches":3}"#,
        ]
    );

    mock_server.verify().await;
}

#[tokio::test]
async fn scheduled_migration_is_not_polled() {
    let mock_server = MockServer::start().await;
    let mut form = manual_form("");
    form.mode = SyncMode::Scheduled(Interval::coerce(15.0));

    schedule_route("15")
        .respond_with(job_created("recurring-7"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/status/.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "scheduled" })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let controller = controller(&mock_server);
    let outcome = controller.run(&form, &CancellationToken::new()).await;

    assert_eq!(
        outcome,
        RunOutcome::Scheduled {
            job_id: "recurring-7".to_string()
        }
    );
    assert_eq!(
        controller.log().lines(),
        vec![
            "Scheduled migration registered (every 15 min)",
            "Job ID: recurring-7",
        ]
    );

    mock_server.verify().await;
}

#[tokio::test]
async fn failed_job_reports_backend_error() {
    let mock_server = MockServer::start().await;

    migrate_route()
        .respond_with(job_created("doomed"))
        .mount(&mock_server)
        .await;
    status_mock(
        "doomed",
        json!({ "status": "failed", "error": "authentication failed for destination" }),
    )
    .expect(1)
    .mount(&mock_server)
    .await;

    let controller = controller(&mock_server);
    let outcome = controller
        .run(&manual_form("main"), &CancellationToken::new())
        .await;

    assert!(!outcome.is_success());
    assert_eq!(
        controller.log().last().as_deref(),
        Some("Migration failed: authentication failed for destination")
    );

    mock_server.verify().await;
}

#[tokio::test]
async fn unreachable_backend_is_a_submission_failure() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let controller = MigrationController::new(
        Arc::new(HttpBackend::new(&uri).unwrap()),
        Arc::new(RecordingClock::new()),
        PollConfig::default(),
    );
    let outcome = controller
        .run(&manual_form("main"), &CancellationToken::new())
        .await;

    assert!(matches!(outcome, RunOutcome::SubmissionFailed { .. }));
    assert_eq!(controller.log().len(), 1);
    assert!(controller.log().lines()[0].starts_with("Error: Migration failed to start"));
}

#[tokio::test]
async fn slow_submission_times_out() {
    let mock_server = MockServer::start().await;

    migrate_route()
        .respond_with(job_created("late").set_delay(Duration::from_secs(10)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend =
        HttpBackend::with_timeout(&mock_server.uri(), Duration::from_millis(100)).unwrap();
    let controller = MigrationController::new(
        Arc::new(backend),
        Arc::new(RecordingClock::new()),
        PollConfig::default(),
    );
    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        controller.run(&manual_form("main"), &CancellationToken::new()),
    )
    .await
    .expect("request timeout should end the submission");

    assert!(matches!(outcome, RunOutcome::SubmissionFailed { .. }));
    assert_eq!(controller.log().len(), 1);
    assert!(controller.log().lines()[0].starts_with("Error: Migration failed to start"));

    mock_server.verify().await;
}
