use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use bizlookup_core::{
    discover, validate_discovery_query, RankedBusiness, RawDiscoveryQuery, StoreError,
    ValidationErrors,
};
use serde::Serialize;

use super::AppState;
use crate::middleware::RequestId;

const INVALID_REQUEST_MESSAGE: &str = "Invalid request.";

#[derive(Debug)]
pub(super) enum DiscoveryError {
    Validation(ValidationErrors),
    Store(StoreError),
}

#[derive(Debug, Serialize)]
struct ValidationErrorBody {
    message: &'static str,
    error: ValidationErrors,
}

#[derive(Debug, Serialize)]
struct StoreErrorBody {
    error: String,
}

impl IntoResponse for DiscoveryError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(error) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    message: INVALID_REQUEST_MESSAGE,
                    error,
                }),
            )
                .into_response(),
            Self::Store(error) => (
                StatusCode::BAD_REQUEST,
                Json(StoreErrorBody {
                    error: error.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// `GET /discovery`: businesses ranked by distance from `lat`/`long`.
///
/// Query pairs are taken as a list so that a repeated key resolves to its
/// last value instead of failing extraction.
pub(super) async fn discover_businesses(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<RankedBusiness>>, DiscoveryError> {
    let raw = RawDiscoveryQuery::from_pairs(pairs);
    let query = validate_discovery_query(&raw).map_err(|errors| {
        tracing::debug!(request_id = %req_id.0, %errors, "rejected discovery query");
        DiscoveryError::Validation(errors)
    })?;

    let results = discover(state.store.as_ref(), &query).await.map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "business store request failed");
        DiscoveryError::Store(e)
    })?;

    Ok(Json(results))
}
