use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockBuilder, ResponseTemplate};

pub fn migrate_route() -> MockBuilder {
    Mock::given(method("POST")).and(path("/migrate"))
}

pub fn schedule_route(interval_minutes: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path("/schedule"))
        .and(query_param("interval_minutes", interval_minutes))
}

pub fn status_mock(job_id: &str, response: Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/status/{job_id}", job_id = job_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
}

pub fn job_created(job_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "job_id": job_id }))
}

pub fn rejected(status: u16, detail: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "detail": detail }))
}
