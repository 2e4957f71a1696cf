//! Create endpoints
//!
//! - htmx_create_request: Form submission, answers with the success panel
//!   or the form with an inline error
//! - api_create_request: JSON create endpoint

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::{Extension, State};
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use velto_core::{
    whatsapp_url, CoreError, CoreResult, CreatedRequest, DefaultErrorLogger, ErrorContext,
    ErrorLogger, NewPaymentRequest, SessionContext, SharePayload,
};

use super::page::{create_layout, render_create_form, render_created};
use crate::routes::parse_form;
use crate::{is_htmx_request, page_response, ApiError, ApiResult, AppState};

/// JSON answer of a successful creation
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub request: CreatedRequest,
    pub share: SharePayload,
    pub whatsapp_url: String,
}

/// Parse a form amount, accepting a decimal comma
pub fn parse_amount(raw: &str) -> CoreResult<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(CoreError::ValidationError {
            message: "Amount is required".to_string(),
        });
    }
    Decimal::from_str(&normalized).map_err(|_| CoreError::ValidationError {
        message: format!("'{}' is not a valid amount", raw.trim()),
    })
}

fn new_request(form: &HashMap<String, String>) -> CoreResult<NewPaymentRequest> {
    let amount = parse_amount(form.get("amount").map(String::as_str).unwrap_or(""))?;
    Ok(NewPaymentRequest {
        amount,
        description: form.get("description").cloned().unwrap_or_default(),
    })
}

fn create_context(operation: &str, session: &SessionContext) -> ErrorContext {
    let context = ErrorContext::new(operation);
    match session.current_user() {
        Some(user) => context.with_user(&user.email),
        None => context,
    }
}

/// HTMX: Submit the creation form
pub async fn htmx_create_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
    body: String,
) -> Html<String> {
    let form = parse_form(&body);
    let amount = form.get("amount").cloned().unwrap_or_default();
    let description = form.get("description").cloned().unwrap_or_default();

    let result = match new_request(&form) {
        Ok(input) => state.creator.create(input).await,
        Err(e) => Err(e),
    };

    let panel = match result {
        Ok(created) => {
            log::info!(
                "Payment link created: {} for {} ({})",
                created.link,
                state.money(created.amount),
                created.description
            );
            render_created(&state, &created)
        }
        Err(e) => {
            let context = create_context("htmx_create_request", &session)
                .with_data("amount", serde_json::json!(amount));
            DefaultErrorLogger.log_error(&e, &context);
            let message = match &e {
                CoreError::ValidationError { message } => message.clone(),
                other => other.to_string(),
            };
            render_create_form(Some(&message), &amount, &description)
        }
    };

    if is_htmx_request(&headers) {
        Html(panel)
    } else {
        Html(page_response(
            &headers,
            "Create Payment Request",
            &session,
            &create_layout(&panel),
        ))
    }
}

/// Create a payment link (JSON API)
pub async fn api_create_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(input): Json<NewPaymentRequest>,
) -> ApiResult<Json<CreateResponse>> {
    let created = state
        .creator
        .create(input)
        .await
        .map_err(|e| ApiError::report(e, &create_context("api_create_request", &session)))?;

    log::info!("Payment link created via API: {}", created.link);
    Ok(Json(CreateResponse {
        share: SharePayload::for_created(&created, &state.amounts),
        whatsapp_url: whatsapp_url(
            &state.config.sharing.whatsapp_base_url,
            &created,
            &state.amounts,
        ),
        request: created,
    }))
}
