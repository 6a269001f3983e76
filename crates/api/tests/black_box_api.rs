use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bizledger_api::app::{build_app, services::build_services};
use bizledger_infra::AppConfig;

fn app(seed_chart: bool) -> Router {
    let config = AppConfig {
        seed_chart,
        ..AppConfig::from_lookup(|_| None).unwrap()
    };
    build_app(Arc::new(build_services(&config).unwrap()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/accounts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json
}

#[tokio::test]
async fn health_is_ok() {
    let app = app(false);
    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn seeded_chart_is_listed() {
    let app = app(true);
    let (status, json) = send(&app, "GET", "/accounts", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Cash"));
    assert!(names.contains(&"Sales Revenue"));
}

#[tokio::test]
async fn account_ids_are_derived_and_suggested() {
    let app = app(false);

    let cash = create(&app, json!({"name": "Cash", "type": "Assets"})).await;
    assert_eq!(cash["id"], "AST-1001");
    assert_eq!(cash["balance"], "0");

    create(&app, json!({"id": "AST-1005", "name": "Bank", "type": "assets"})).await;

    let (status, json) = send(&app, "GET", "/accounts/next-id/AST", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "AST-1006");

    let (_, json) = send(&app, "GET", "/accounts/next-id/EQT", None).await;
    assert_eq!(json["id"], "EQT-1001");

    let (status, json) = send(&app, "GET", "/accounts/AST-1005", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Bank");

    let (status, json) = send(&app, "GET", "/accounts/AST-9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn duplicate_and_invalid_accounts_are_rejected() {
    let app = app(false);
    create(&app, json!({"name": "Cash", "type": "Assets"})).await;

    let (status, json) = send(&app, "POST", "/accounts", Some(json!({"name": "CASH", "type": "Assets"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "duplicate_name");

    let (status, json) = send(&app, "POST", "/accounts", Some(json!({"name": "Misc", "type": "Revenue"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_account_type");

    let (_, json) = send(&app, "GET", "/accounts", None).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn posting_updates_balances_by_normal_side() {
    let app = app(false);
    create(&app, json!({"name": "Cash", "type": "Assets"})).await;
    create(&app, json!({"name": "Sales", "type": "Income"})).await;

    let (status, json) = send(&app, "GET", "/journals/next-id", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "JRN-1001");

    let (status, receipt) = send(
        &app,
        "POST",
        "/journals",
        Some(json!({
            "date": "2024-06-30",
            "notes": "Cash sale",
            "lines": [
                {"accountId": "AST-1001", "debit": 100},
                {"accountId": "INC-1001", "credit": "100"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{receipt}");
    assert_eq!(receipt["entry"]["id"], "JRN-1001");
    assert_eq!(receipt["balanceChanges"].as_array().unwrap().len(), 2);
    assert!(receipt["orphanLines"].as_array().unwrap().is_empty());

    let (_, cash) = send(&app, "GET", "/accounts/AST-1001", None).await;
    let (_, sales) = send(&app, "GET", "/accounts/INC-1001", None).await;
    assert_eq!(cash["balance"], "100");
    assert_eq!(sales["balance"], "100");

    let (status, entry) = send(&app, "GET", "/journals/JRN-1001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["date"], "2024-06-30");
    assert_eq!(entry["totalDebit"], "100");

    let (_, tb) = send(&app, "GET", "/reports/trial-balance", None).await;
    assert_eq!(tb["balanced"], true);

    let (_, recon) = send(&app, "GET", "/reports/reconciliation", None).await;
    assert_eq!(recon["consistent"], true);
}

#[tokio::test]
async fn invalid_entries_report_every_field() {
    let app = app(false);
    create(&app, json!({"name": "Cash", "type": "Assets"})).await;
    create(&app, json!({"name": "Sales", "type": "Income"})).await;

    let (status, json) = send(
        &app,
        "POST",
        "/journals",
        Some(json!({
            "date": "2024-06-30",
            "notes": "Short",
            "lines": [
                {"accountId": "AST-1001", "debit": 50},
                {"accountId": "INC-1001", "credit": 40}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "unbalanced_entry");
    assert_eq!(json["fields"][0]["code"], "unbalanced");

    let (status, json) = send(
        &app,
        "POST",
        "/journals",
        Some(json!({
            "date": "someday",
            "notes": "",
            "lines": [
                {"accountId": "AST-1001", "debit": 5, "credit": 5},
                {"accountId": "INC-1001"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["lines[0]", "lines[1]", "date", "notes"]);

    let (_, journals) = send(&app, "GET", "/journals", None).await;
    assert!(journals["items"].as_array().unwrap().is_empty());
}
