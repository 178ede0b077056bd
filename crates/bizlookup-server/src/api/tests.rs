use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use bizlookup_core::{BusinessRecord, BusinessStore, MemoryStore, StoreError};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;

struct FailingStore;

#[async_trait]
impl BusinessStore for FailingStore {
    async fn list_candidates(
        &self,
        _business_type: Option<&str>,
    ) -> Result<Vec<BusinessRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

fn sample_app() -> Router {
    build_app(AppState {
        store: Arc::new(MemoryStore::with_sample_data()),
    })
}

fn failing_app() -> Router {
    build_app(AppState {
        store: Arc::new(FailingStore),
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: Value = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

fn names(json: &Value) -> Vec<&str> {
    json.as_array()
        .expect("result array")
        .iter()
        .map(|item| item["name"].as_str().expect("name"))
        .collect()
}

fn messages<'a>(json: &'a Value, field: &str) -> Vec<&'a str> {
    json["error"][field]
        .as_array()
        .unwrap_or_else(|| panic!("no messages for {field}: {json}"))
        .iter()
        .map(|m| m.as_str().expect("message"))
        .collect()
}

#[tokio::test]
async fn root_returns_welcome_message() {
    let (status, json) = get(sample_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "message": "Welcome to the Business Lookup project, try `/discovery` endpoint!" })
    );
}

#[tokio::test]
async fn unknown_route_returns_not_found_message() {
    let (status, json) = get(sample_app(), "/businesses").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "message": "No route found." }));
}

#[tokio::test]
async fn health_reports_ok_for_reachable_store() {
    let (status, json) = get(sample_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok", "store": "ok" }));
}

#[tokio::test]
async fn health_reports_degraded_for_unreachable_store() {
    let (status, json) = get(failing_app(), "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json, json!({ "status": "degraded", "store": "unavailable" }));
}

#[tokio::test]
async fn discovery_without_params_ranks_everything_from_origin() {
    let (status, json) = get(sample_app(), "/discovery").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&json),
        [
            "Business 4",
            "Business 3",
            "Business 6",
            "Business 1",
            "Business 5",
            "Business 2"
        ]
    );

    let distances: Vec<f64> = json
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["distance"].as_f64().expect("distance"))
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]), "{distances:?}");
}

#[tokio::test]
async fn discovery_items_carry_only_projection_fields() {
    let (_, json) = get(sample_app(), "/discovery?limit=1").await;
    let item = json[0].as_object().expect("object");
    let mut keys: Vec<&str> = item.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["distance", "latitude", "longitude", "name"]);
    assert_eq!(item["name"], "Business 4");
    assert_eq!(item["latitude"], 48.8566);
    assert_eq!(item["longitude"], 2.3522);
}

#[tokio::test]
async fn discovery_rejects_non_numeric_coordinates() {
    let (status, json) = get(sample_app(), "/discovery?lat=invalid&long=invalid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid request.");
    assert!(messages(&json, "lat").contains(&"lat must be a number"));
    assert!(messages(&json, "long").contains(&"long must be a number"));
}

#[tokio::test]
async fn discovery_rejects_out_of_range_coordinates() {
    let (status, json) = get(sample_app(), "/discovery?lat=200&long=200").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid request.");
    assert!(messages(&json, "lat").contains(&"lat must be a valid earth latitude"));
    assert!(messages(&json, "long").contains(&"long must be a valid earth longitude"));
}

#[tokio::test]
async fn discovery_accepts_boundary_coordinates() {
    let (status, json) = get(sample_app(), "/discovery?lat=-90&long=180&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn discovery_limit_zero_returns_empty_list() {
    let (status, json) = get(sample_app(), "/discovery?limit=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn discovery_limit_minus_one_returns_full_set() {
    let (status, json) = get(sample_app(), "/discovery?limit=-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().expect("array").len(), 6);
}

#[tokio::test]
async fn discovery_limit_larger_than_store_returns_all() {
    let (status, json) = get(sample_app(), "/discovery?limit=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().expect("array").len(), 6);
}

#[tokio::test]
async fn discovery_rejects_fractional_limit() {
    let (status, json) = get(sample_app(), "/discovery?limit=2.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&json, "limit"), ["limit must be an integer number"]);
}

#[tokio::test]
async fn discovery_rejects_limit_below_minus_one() {
    let (status, json) = get(sample_app(), "/discovery?limit=-2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&json, "limit"), ["limit must not be less than -1"]);
}

#[tokio::test]
async fn discovery_filters_by_type() {
    let (status, json) = get(sample_app(), "/discovery?type=Cafe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), ["Business 3", "Business 1", "Business 5"]);
}

#[tokio::test]
async fn discovery_type_filter_is_case_sensitive() {
    let (status, json) = get(sample_app(), "/discovery?type=cafe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn discovery_rejects_empty_type() {
    let (status, json) = get(sample_app(), "/discovery?type=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&json, "type"), ["type should not be empty"]);
}

#[tokio::test]
async fn discovery_ranks_from_given_origin_with_limit() {
    let (status, json) = get(sample_app(), "/discovery?lat=40.7128&long=-74.006&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), ["Business 1", "Business 5"]);
    assert!(json[0]["distance"].as_f64().expect("distance") < 1e-3);
}

#[tokio::test]
async fn discovery_reports_all_invalid_fields_at_once() {
    let (status, json) = get(sample_app(), "/discovery?lat=abc&long=500&limit=1.5&type=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = json["error"]
        .as_object()
        .expect("error map")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(fields, ["lat", "limit", "long", "type"]);
}

#[tokio::test]
async fn discovery_ignores_unknown_params_and_takes_last_repeat() {
    let (status, json) = get(sample_app(), "/discovery?foo=bar&limit=5&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), ["Business 4"]);
}

#[tokio::test]
async fn discovery_reports_store_failure_as_bad_request() {
    let (status, json) = get(failing_app(), "/discovery").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "connection refused" }));
}

#[tokio::test]
async fn discovery_validation_runs_before_store() {
    let (status, json) = get(failing_app(), "/discovery?lat=invalid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid request.");
}

#[tokio::test]
async fn responses_echo_incoming_request_id() {
    let response = sample_app()
        .oneshot(
            Request::builder()
                .uri("/discovery?limit=0")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
}

#[tokio::test]
async fn responses_get_generated_request_id_and_security_headers() {
    let response = sample_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let headers = response.headers();

    let id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("generated request id");
    assert!(uuid::Uuid::parse_str(id).is_ok(), "{id}");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN");
}

#[tokio::test]
async fn empty_request_id_is_replaced_with_generated_one() {
    let response = sample_app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("generated request id");
    assert!(uuid::Uuid::parse_str(id).is_ok(), "{id:?}");
}
