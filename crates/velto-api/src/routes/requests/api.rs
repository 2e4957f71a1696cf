//! Request API endpoints - JSON API
//!
//! - api_requests: List requests, filtered by `q` and `status`
//! - api_request_detail: One request with its payment ledger
//! - api_request_share: Share-sheet payload of a request
//! - api_stats: Dashboard statistics
//! - htmx_delete_request: Delete action (logged only)

use std::collections::HashMap;

use axum::extract::{Extension, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;

use velto_core::{
    filter_requests, ErrorContext, RequestDetailResponse, RequestStats, RequestsResponse,
    whatsapp_url_for_request, SessionContext, SharePayload, StatusFilter,
};

use crate::{is_htmx_request, ApiError, ApiResult, AppState};

/// Parse the `status` query parameter
pub fn status_filter(params: &HashMap<String, String>) -> Result<StatusFilter, ApiError> {
    params
        .get("status")
        .map(|s| s.parse::<StatusFilter>())
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(|message| ApiError::BadRequest { message })
}

/// Get requests with search and status filter (JSON API)
pub async fn api_requests(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<RequestsResponse>> {
    let query = params.get("q").map(String::as_str).unwrap_or("");
    let filter = status_filter(&params)?;

    let requests = filter_requests(state.store.all(), query, filter);
    Ok(Json(RequestsResponse {
        total_count: requests.len(),
        requests,
        query: query.to_string(),
        status: filter.to_string(),
    }))
}

/// Get one request with its payments (JSON API)
pub async fn api_request_detail(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<RequestDetailResponse>> {
    let request = state.store.require(&id).map_err(|e| {
        ApiError::report(e, &request_context("api_request_detail", &session, &id))
    })?;

    Ok(Json(RequestDetailResponse {
        request: request.clone(),
        payments: state.store.payments(&id).to_vec(),
        total_settled: state.store.total_settled(request),
        settlement_summary: request.settlement_summary(),
    }))
}

/// Share sheet payload plus the WhatsApp deep link
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub share: SharePayload,
    pub whatsapp_url: String,
}

/// Share payload of a request (JSON API)
pub async fn api_request_share(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ShareResponse>> {
    let request = state.store.require(&id).map_err(|e| {
        ApiError::report(e, &request_context("api_request_share", &session, &id))
    })?;
    Ok(Json(ShareResponse {
        share: SharePayload::for_request(request, &state.amounts),
        whatsapp_url: whatsapp_url_for_request(
            &state.config.sharing.whatsapp_base_url,
            request,
            &state.amounts,
        ),
    }))
}

/// Dashboard statistics (JSON API)
pub async fn api_stats(State(state): State<AppState>) -> Json<RequestStats> {
    Json(RequestStats::compute(state.store.all()))
}

/// Delete action: the store is read-only, so this is logged and redirects home
pub async fn htmx_delete_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let user = session.current_user().map(|u| u.email.as_str()).unwrap_or("-");
    match state.store.get(&id) {
        Some(request) => log::info!(
            "Delete request: {} ({}) by {}",
            request.id,
            request.description,
            user
        ),
        None => log::warn!("Delete requested for unknown request {} by {}", id, user),
    }

    if is_htmx_request(&headers) {
        [("HX-Redirect", "/dashboard")].into_response()
    } else {
        Redirect::to("/dashboard").into_response()
    }
}

fn request_context(operation: &str, session: &SessionContext, id: &str) -> ErrorContext {
    let context = ErrorContext::new(operation).with_data("request_id", serde_json::json!(id));
    match session.current_user() {
        Some(user) => context.with_user(&user.email),
        None => context,
    }
}
