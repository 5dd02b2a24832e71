use std::sync::Arc;

use crate::mocks::backend::{job_created, migrate_route, rejected, schedule_route};

use git_migrator::actions::{ActionFlags, Aspect};
use git_migrator::error::SubmissionError;
use git_migrator::event::EventLog;
use git_migrator::fixtures::endpoints::{github_source, gitlab_dest};
use git_migrator::http_backend::HttpBackend;
use git_migrator::request::{build_request, Interval, SyncMode};
use git_migrator::submission::SubmissionClient;
use serde_json::json;
use wiremock::matchers::{any, body_json};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(mock_server: &MockServer) -> SubmissionClient {
    SubmissionClient::new(Arc::new(HttpBackend::new(&mock_server.uri()).unwrap()))
}

#[tokio::test]
async fn manual_submission_posts_full_payload() {
    let mock_server = MockServer::start().await;
    let request = build_request(
        &github_source(),
        &gitlab_dest(),
        ActionFlags::default().with(Aspect::Branches, false),
        "",
    );

    migrate_route()
        .and(body_json(json!({
            "source_type": "github",
            "source_token": "ghp_source",
            "source_repo_url": "https://github.com/acme/widgets",
            "dest_type": "gitlab",
            "dest_token": "glpat_dest",
            "dest_repo_url": "https://gitlab.com/acme/widgets",
            "actions": {
                "migrate_repo": true,
                "migrate_branches": false,
                "specific_branches": [],
                "migrate_tags": true,
                "migrate_issues": false,
                "migrate_prs": false,
                "migrate_users": false,
            }
        })))
        .respond_with(job_created("abc123"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let log = EventLog::new();
    let job_id = client(&mock_server)
        .submit(&request, SyncMode::Manual, &log)
        .await
        .unwrap();

    assert_eq!(job_id, "abc123");
    assert_eq!(log.lines(), vec!["Migration started", "Job ID: abc123"]);

    mock_server.verify().await;
}

#[tokio::test]
async fn scheduled_submission_uses_interval_query() {
    let mock_server = MockServer::start().await;
    let request = build_request(&github_source(), &gitlab_dest(), ActionFlags::default(), "main");

    schedule_route("12")
        .respond_with(job_created("sched-1"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let job_id = client(&mock_server)
        .submit(
            &request,
            SyncMode::Scheduled(Interval::coerce(12.7)),
            &EventLog::new(),
        )
        .await
        .unwrap();

    assert_eq!(job_id, "sched-1");

    mock_server.verify().await;
}

#[tokio::test]
async fn non_success_surfaces_detail() {
    let mock_server = MockServer::start().await;
    let request = build_request(&github_source(), &gitlab_dest(), ActionFlags::default(), "");

    migrate_route()
        .respond_with(rejected(422, "Unsupported provider combination"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let error = client(&mock_server)
        .submit(&request, SyncMode::Manual, &EventLog::new())
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Unsupported provider combination");

    mock_server.verify().await;
}

#[tokio::test]
async fn non_success_without_detail_is_generic() {
    let mock_server = MockServer::start().await;
    let request = build_request(&github_source(), &gitlab_dest(), ActionFlags::default(), "");

    migrate_route()
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let error = client(&mock_server)
        .submit(&request, SyncMode::Manual, &EventLog::new())
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), SubmissionError::GENERIC);
}

#[tokio::test]
async fn success_without_job_id_fails() {
    let mock_server = MockServer::start().await;
    let request = build_request(&github_source(), &gitlab_dest(), ActionFlags::default(), "");

    migrate_route()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let log = EventLog::new();
    let error = client(&mock_server)
        .submit(&request, SyncMode::Manual, &log)
        .await
        .unwrap_err();

    assert!(matches!(error, SubmissionError::Rejected { .. }));
    assert!(log.is_empty());
}

#[tokio::test]
async fn blank_url_sends_nothing() {
    let mock_server = MockServer::start().await;
    let mut source = github_source();
    source.repo_url = "   ".to_string();
    let request = build_request(&source, &gitlab_dest(), ActionFlags::default(), "");

    Mock::given(any())
        .respond_with(job_created("never"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let error = client(&mock_server)
        .submit(&request, SyncMode::Manual, &EventLog::new())
        .await
        .unwrap_err();

    assert!(matches!(error, SubmissionError::Validation(_)));

    mock_server.verify().await;
}
