//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use ledgerbot_core::config::Config;
use ledgerbot_core::db::Database;
use tower::ServiceExt;

fn setup_test_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let app = create_router(db.clone(), Config::default());
    (app, db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn update(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/update")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Send one update on a clone of the app; session state lives in the shared
/// AppState, so successive calls see the same conversation.
async fn send(app: &Router, body: serde_json::Value) -> serde_json::Value {
    let response = app.clone().oneshot(update(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    get_body_json(response).await
}

#[tokio::test]
async fn test_health() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_first_update_returns_main_menu() {
    let (app, _db) = setup_test_app();

    let json = send(&app, serde_json::json!({ "user_id": "u1", "text": "hi" })).await;
    assert!(json["text"]
        .as_str()
        .unwrap()
        .contains("What would you like to do?"));
    assert!(json["menu"]["rows"].as_array().unwrap().len() >= 4);
}

#[tokio::test]
async fn test_update_rejects_missing_user_and_payload() {
    let (app, _db) = setup_test_app();

    let response = app
        .clone()
        .oneshot(update(&serde_json::json!({ "user_id": "", "text": "hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(update(&serde_json::json!({ "user_id": "u1" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("text or selection"));
}

#[tokio::test]
async fn test_expense_flow_persists_across_updates() {
    let (app, db) = setup_test_app();

    for payload in [
        serde_json::json!({ "user_id": "u1", "selection": "m:expense" }),
        serde_json::json!({ "user_id": "u1", "selection": "kind:regular" }),
        serde_json::json!({ "user_id": "u1", "text": "42.50" }),
        serde_json::json!({ "user_id": "u1", "selection": "cat:food" }),
    ] {
        send(&app, payload).await;
    }
    let json = send(
        &app,
        serde_json::json!({ "user_id": "u1", "selection": "pay:cash" }),
    )
    .await;
    assert!(json["text"].as_str().unwrap().contains("Saved: 42.50"));

    let rows = db.list_expenses("u1", None, None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "food");
}

#[tokio::test]
async fn test_sessions_are_isolated_per_user() {
    let (app, _db) = setup_test_app();

    send(
        &app,
        serde_json::json!({ "user_id": "alice", "selection": "m:expense" }),
    )
    .await;

    // Bob's first contact is still the main menu
    let json = send(&app, serde_json::json!({ "user_id": "bob", "text": "hi" })).await;
    assert!(json["text"]
        .as_str()
        .unwrap()
        .contains("What would you like to do?"));

    // Alice is mid-flow
    let json = send(
        &app,
        serde_json::json!({ "user_id": "alice", "selection": "kind:regular" }),
    )
    .await;
    assert!(json["text"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_selection_wins_when_both_fields_present() {
    let (app, _db) = setup_test_app();

    let json = send(
        &app,
        serde_json::json!({ "user_id": "u1", "text": "ignored", "selection": "m:limit" }),
    )
    .await;
    assert!(json["text"].as_str().unwrap().contains("budget limit"));
}
