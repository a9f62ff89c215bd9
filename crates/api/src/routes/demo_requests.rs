//! Demo request intake endpoints.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use intake_core::limits::DEFAULT_PAGE_SIZE;
use intake_service::RequestPage;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::extractors::ClientIp;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

/// POST /api/v1/demo-requests - Submit a demo request.
///
/// The body is taken as raw bytes so a malformed payload gets the same
/// enveloped validation error as a well-formed payload with bad fields.
pub async fn submit_handler(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), ApiError> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejected unparseable request body");
        ApiError::validation(json!([
            { "field": "body", "message": "Request body must be a JSON object" }
        ]))
    })?;

    let ip = client_ip.unwrap_or_else(|| "unknown".to_string());
    let record = state.coordinator.submit(&body, &ip, Utc::now()).await?;

    let data = json!({
        "requestId": record.request_id,
        "email": record.email,
        "userType": record.user_type,
        "status": "pending",
        "createdAt": record.created_at,
    });

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            data,
            "Demo request submitted successfully. We will contact you soon.",
        )),
    ))
}

/// Pagination query. Kept as raw strings so values that do not parse fall
/// back to the defaults instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    size: Option<String>,
}

/// GET /api/v1/demo-requests - List submitted requests, newest first.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<RequestPage>>, ApiError> {
    let page = query.page.as_deref().and_then(parse_param).unwrap_or(0);
    let size = query
        .size
        .as_deref()
        .and_then(parse_param)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let page_data = state.coordinator.list(page, size).await?;

    Ok(Json(ApiResponse::new(page_data)))
}

fn parse_param(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
