//! API tests against the router with an in-memory store

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{default_catalog, test_app, FixedCatalog};

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app(default_catalog());

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_list_on_empty_store() {
    let app = test_app(default_catalog());

    let (status, body) = send(&app, "GET", "/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_book() {
    let app = test_app(default_catalog());

    let (status, body) = send(
        &app,
        "POST",
        "/records",
        Some(json!({ "title": "Dune", "author": "Herbert", "rating": "", "pages": "412" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_number());
    assert_eq!(body["status"], "want-to-read");
    assert_eq!(body["rating"], Value::Null);
    assert_eq!(body["pages"], 412);
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_without_title_is_rejected() {
    let app = test_app(default_catalog());

    let (status, body) = send(&app, "POST", "/records", Some(json!({ "author": "Herbert" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");

    let (_, body) = send(&app, "GET", "/records", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_update_with_empty_title_is_rejected() {
    let app = test_app(default_catalog());

    let (_, created) = send(
        &app,
        "POST",
        "/records",
        Some(json!({ "title": "Dune", "author": "Herbert" })),
    )
    .await;
    let id = created["id"].as_i64().expect("No book ID");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/records/{}", id),
        Some(json!({ "title": "", "author": "Herbert" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");

    let (_, fetched) = send(&app, "GET", &format!("/records/{}", id), None).await;
    assert_eq!(fetched["title"], "Dune");
}

#[tokio::test]
async fn test_malformed_body_gets_error_body() {
    let app = test_app(default_catalog());

    for body in [
        json!({ "title": 123, "author": "Herbert" }),
        json!({ "title": "x", "author": "y", "description": 5 }),
    ] {
        let (status, body) = send(&app, "POST", "/records", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidInput");
        assert!(body["message"].is_string());
    }

    let request = Request::builder()
        .method("POST")
        .uri("/records")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/catalog/import")
        .body(Body::from("{}"))
        .expect("Failed to build request");
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/records", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = test_app(default_catalog());

    for title in ["First", "Second", "Third"] {
        let (status, _) = send(
            &app,
            "POST",
            "/records",
            Some(json!({ "title": title, "author": "Someone" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, "GET", "/records", None).await;
    let titles: Vec<&str> = body
        .as_array()
        .expect("list is an array")
        .iter()
        .map(|b| b["title"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_dune_lifecycle() {
    let app = test_app(default_catalog());

    let (_, created) = send(
        &app,
        "POST",
        "/records",
        Some(json!({ "title": "Dune", "author": "Herbert", "review": "Long" })),
    )
    .await;
    let id = created["id"].as_i64().expect("No book ID");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/records/{}", id),
        Some(json!({ "title": "Dune", "author": "Herbert", "status": "read", "rating": "5" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "read");
    assert_eq!(updated["rating"], 5);

    let (status, fetched) = send(&app, "GET", &format!("/records/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "read");
    assert_eq!(fetched["rating"], 5);
    // wholesale replacement: the review was not resubmitted
    assert_eq!(fetched["review"], Value::Null);

    let (status, body) = send(&app, "DELETE", &format!("/records/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted successfully");

    let (status, body) = send(&app, "GET", &format!("/records/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_missing_and_invalid_ids() {
    let app = test_app(default_catalog());

    let (status, _) = send(&app, "GET", "/records/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/records/not-a-number", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/records/12abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/records/999",
        Some(json!({ "title": "t", "author": "a" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/records/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_search_and_import() {
    let app = test_app(default_catalog());

    let (status, body) = send(&app, "GET", "/catalog/search?q=dune%20herbert", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let hit = body["items"][1].clone();
    let (status, imported) = send(&app, "POST", "/catalog/import", Some(hit)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(imported["title"], "Beowulf");
    assert_eq!(imported["author"], "Unknown Author");
    assert_eq!(imported["publishYear"], 1965);
    assert_eq!(imported["status"], "want-to-read");

    let (_, list) = send(&app, "GET", "/records", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_catalog_failure_is_bad_gateway() {
    let app = test_app(FixedCatalog {
        hits: vec![],
        fail: true,
    });

    let (status, body) = send(&app, "GET", "/catalog/search?q=dune", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "UpstreamUnavailable");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app(default_catalog());

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/records"].is_object());
    assert!(body["paths"]["/records/{id}"].is_object());
}
