mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, RecordingMailer};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database_ok(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(RecordingMailer::default()));

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(RecordingMailer::default()));
    assert_eq!(get(&app, "/api/nope").await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_request_id(pool: PgPool) {
    let app = common::build_test_app(pool, Arc::new(RecordingMailer::default()));
    let response = get(&app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
