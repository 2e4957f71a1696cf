//! Search HTMX endpoints

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Html;

use velto_core::{filter_requests, StatusFilter};

use crate::routes::requests::api::status_filter;
use crate::routes::requests::page::render_request_card;
use crate::{alert_html, AppState};

/// HTMX: Filtered result list for `q` and `status`
pub async fn htmx_search_results(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let query = params.get("q").map(String::as_str).unwrap_or("");
    match status_filter(&params) {
        Ok(filter) => Html(render_results(&state, query, filter)),
        Err(e) => {
            log::warn!("Search rejected: {}", e);
            Html(alert_html(&e.to_string()))
        }
    }
}

/// Result list, or the empty state when nothing matches
pub fn render_results(state: &AppState, query: &str, filter: StatusFilter) -> String {
    let results = filter_requests(state.store.all(), query, filter);
    if results.is_empty() {
        return r#"<div class='bg-white rounded-2xl shadow-sm text-center py-12 space-y-4'>
            <div class='w-16 h-16 bg-gray-100 rounded-full flex items-center justify-center mx-auto text-2xl'>&#128269;</div>
            <div>
                <p class='text-lg font-medium'>No results found</p>
                <p class='text-gray-500'>Try searching with different keywords</p>
            </div>
        </div>"#
            .to_string();
    }

    let cards: Vec<String> = results
        .iter()
        .map(|r| render_request_card(state, r))
        .collect();
    format!(
        "<div class='grid grid-cols-1 gap-4'>{}</div>",
        cards.join("")
    )
}
