//! HTTP-level tests for week reads, saves, status and document export.

mod common;

use std::io::{Cursor, Read};

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, post_json, post_raw};
use serde_json::json;
use sqlx::SqlitePool;

async fn save(pool: &SqlitePool, week: &str, items: serde_json::Value) -> StatusCode {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/reports",
        json!({"weekStart": week, "items": items}),
    )
    .await
    .status()
}

async fn read(pool: &SqlitePool, week: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/reports?weekStart={week}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

fn document_xml(docx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

// ---------------------------------------------------------------------------
// Week read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_week_start_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/reports").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing weekStart param");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_week_start_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/reports?weekStart=June").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_store_reads_as_empty_non_draft(pool: SqlitePool) {
    let json = read(&pool, "2024-06-17").await;
    assert_eq!(json["items"], json!([]));
    assert_eq!(json["isDraft"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_previous_week_is_carried_over_as_draft(pool: SqlitePool) {
    let status = save(
        &pool,
        "2024-06-10",
        json!([{
            "id": "src",
            "division": "Planning",
            "project": "Alpha",
            "prev_progress": "",
            "curr_progress": "Drafted spec",
            "remarks": ""
        }]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json = read(&pool, "2024-06-17").await;
    assert_eq!(json["isDraft"], true);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["prev_progress"], "Drafted spec");
    assert_eq!(items[0]["curr_progress"], "");
    assert_eq!(items[0]["division"], "Planning");
    assert_eq!(items[0]["week_start"], "2024-06-17");
    assert_ne!(items[0]["id"], "src");

    // The draft was not written.
    let app = common::build_test_app(pool);
    let weeks = body_json(get(app, "/api/v1/reports/status").await).await;
    assert_eq!(weeks, json!(["2024-06-10"]));
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_then_read_returns_exactly_the_saved_items(pool: SqlitePool) {
    save(
        &pool,
        "2024-06-17",
        json!([{"id": "old", "division": "Ops", "curr_progress": "x"}]),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/reports",
        json!({"weekStart": "2024-06-17", "items": [
            {"id": "keep", "division": "Dev", "project": "Alpha", "curr_progress": "a\nb"},
            {"division": "QA", "project": "Beta"}
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);

    let json = read(&pool, "2024-06-17").await;
    assert_eq!(json["isDraft"], false);
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "keep");
    assert_eq!(items[0]["curr_progress"], "a\nb");
    assert_eq!(items[1]["division"], "QA");
    assert_eq!(items[1]["remarks"], "");
    assert!(!items[1]["id"].as_str().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_save_clears_the_week(pool: SqlitePool) {
    save(
        &pool,
        "2024-06-17",
        json!([
            {"id": "a", "division": "Ops"},
            {"id": "b", "division": "Ops"},
            {"id": "c", "division": "Ops"}
        ]),
    )
    .await;

    assert_eq!(save(&pool, "2024-06-17", json!([])).await, StatusCode::OK);

    let app = common::build_test_app(pool);
    let weeks = body_json(get(app, "/api/v1/reports/status").await).await;
    assert_eq!(weeks, json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_rejects_missing_fields(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/reports", json!({"items": []})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/reports", json!({"weekStart": "2024-06-17"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_raw(app, "/api/v1/reports", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_failed_atomic_save_keeps_previous_rows(pool: SqlitePool) {
    save(&pool, "2024-06-17", json!([{"id": "old", "division": "Ops"}])).await;

    let status = save(
        &pool,
        "2024-06-17",
        json!([{"id": "dup", "division": "A"}, {"id": "dup", "division": "B"}]),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let json = read(&pool, "2024-06-17").await;
    assert_eq!(json["items"][0]["id"], "old");
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_sequential_save_reports_partial_write(pool: SqlitePool) {
    let config = weekly_api::config::ServerConfig {
        atomic_saves: false,
        ..common::test_config()
    };
    save(&pool, "2024-06-17", json!([{"id": "old", "division": "Ops"}])).await;

    let app = common::build_test_app_with(pool.clone(), config);
    let response = post_json(
        app,
        "/api/v1/reports",
        json!({"weekStart": "2024-06-17", "items": [
            {"id": "dup", "division": "A"},
            {"id": "dup", "division": "B"}
        ]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PARTIAL_WRITE");
    assert!(json["error"].as_str().unwrap().contains("1 of 2"));
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_lists_saved_weeks_ascending(pool: SqlitePool) {
    save(&pool, "2024-06-17", json!([{"division": "Ops"}])).await;
    save(&pool, "2024-06-03", json!([{"division": "Ops"}, {"division": "Dev"}])).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/reports/status").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(["2024-06-03", "2024-06-17"]));
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_week_renders_resolved_items(pool: SqlitePool) {
    save(
        &pool,
        "2024-06-10",
        json!([{"division": "Planning", "project": "Alpha", "curr_progress": "Drafted spec"}]),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/reports/export?weekStart=2024-06-17").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"weekly-report-20240617.docx\""
    );

    let xml = document_xml(&body_bytes(response).await);
    assert!(xml.contains("Planning"));
    // Carried over into the previous-week column.
    assert!(xml.contains("Drafted spec"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_items_renders_unsaved_items(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/reports/export",
        json!({
            "date": "2024-06-12",
            "items": [{"division": "R&D", "project": "Gamma", "curr_progress": "one\n\ntwo"}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"weekly-report-20240610.docx\""
    );

    let xml = document_xml(&body_bytes(response).await);
    assert!(xml.contains("R&amp;D"));
    assert!(xml.contains("one"));
    assert!(xml.contains("two"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_export_rejects_bad_date(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/reports/export",
        json!({"date": "someday", "items": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
