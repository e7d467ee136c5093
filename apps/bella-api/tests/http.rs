use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use bella_api::{routes, state::AppState};
use bella_config::{Config, Postgres, Query, Security, Service, Storage};
use bella_testkit::TestDatabase;

fn test_config(dsn: String) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			mcp_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 1 } },
		query: Query::default(),
		security: Security::default(),
		mcp: None,
	}
}

async fn test_app() -> Option<(TestDatabase, Router)> {
	let base_dsn = match bella_testkit::env_dsn() {
		Some(value) => value,
		None => {
			eprintln!("Skipping HTTP tests; set BELLA_PG_DSN to run this test.");

			return None;
		},
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");

	Some((test_db, routes::router(state)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
	let mut builder = Request::builder().method(method).uri(uri);
	let body = match body {
		Some(value) => {
			builder = builder.header("content-type", "application/json");

			Body::from(value.to_string())
		},
		None => Body::empty(),
	};
	let response = app
		.clone()
		.oneshot(builder.body(body).expect("Failed to build request."))
		.await
		.expect("Failed to call the router.");
	let status = response.status();
	let bytes =
		body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Failed to parse response body.")
	};

	(status, json)
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BELLA_PG_DSN to run."]
async fn health_ok() {
	let Some((test_db, app)) = test_app().await else {
		return;
	};
	let (status, _) = send(&app, "GET", "/health", None).await;

	assert_eq!(status, StatusCode::OK);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BELLA_PG_DSN to run."]
async fn client_lifecycle_over_http() {
	let Some((test_db, app)) = test_app().await else {
		return;
	};
	let (status, created) = send(
		&app,
		"POST",
		"/v1/clients",
		Some(json!({ "entity_id": "acme", "data": { "name": "Acme", "status": "overdue" } })),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(created["success"], true);
	assert_eq!(created["action"], "created");
	assert!(created["reference"].is_string());

	let (status, client) = send(&app, "GET", "/v1/clients/acme", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(client["name"], "Acme");
	assert_eq!(client["reference"], created["reference"]);

	let (_, overdue) = send(&app, "GET", "/v1/reports/overdue_clients", None).await;

	assert_eq!(overdue.as_array().map(Vec::len), Some(1));

	let (_, searched) = send(&app, "GET", "/v1/clients?status=overdue&limit=5", None).await;

	assert_eq!(searched, overdue);

	let (status, deleted) = send(&app, "DELETE", "/v1/clients/acme", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(deleted["success"], true);

	let (status, missing) = send(&app, "GET", "/v1/clients/acme", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(missing, Value::Null);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BELLA_PG_DSN to run."]
async fn rejects_blank_entity_id_and_defaults_zero_limit() {
	let Some((test_db, app)) = test_app().await else {
		return;
	};
	let (status, body) =
		send(&app, "POST", "/v1/tasks", Some(json!({ "entity_id": "  ", "data": {} }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error_code"], "INVALID_REQUEST");

	for date in ["2026-10-17", "2026-10-18"] {
		let (status, _) =
			send(&app, "POST", "/v1/sessions", Some(json!({ "entity_id": date, "data": {} }))).await;

		assert_eq!(status, StatusCode::OK);
	}

	let (status, body) = send(&app, "GET", "/v1/sessions?limit=0", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body.as_array().map(Vec::len), Some(2));
	assert_eq!(body[0]["entity_id"], "2026-10-18");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BELLA_PG_DSN to run."]
async fn financial_summary_over_http() {
	let Some((test_db, app)) = test_app().await else {
		return;
	};

	for (entity_id, amount) in [("inv-1", 100), ("inv-2", 250)] {
		let (status, _) = send(
			&app,
			"POST",
			"/v1/invoices",
			Some(json!({ "entity_id": entity_id, "data": { "amount": amount, "status": "overdue" } })),
		)
		.await;

		assert_eq!(status, StatusCode::OK);
	}

	let (status, summary) = send(&app, "GET", "/v1/reports/financial_summary", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(summary["total_overdue"], 350.0);
	assert_eq!(summary["overdue_count"], 2);
	assert_eq!(summary["total_unpaid"], 0.0);
	assert_eq!(summary["unpaid_count"], 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
