//! Search page rendering - Full page endpoints

use std::collections::HashMap;

use axum::extract::{Extension, Query, State};
use axum::http::HeaderMap;
use axum::response::Html;

use velto_core::{SessionContext, StatusFilter};
use velto_utils::escape_html;

use super::api::render_results;
use crate::routes::requests::api::status_filter;
use crate::{alert_html, page_response, AppState};

/// Status chips; each one re-requests the result list
fn filter_chips(selected: StatusFilter) -> String {
    StatusFilter::choices()
        .into_iter()
        .map(|choice| {
            format!(
                r#"<label class='cursor-pointer'>
                <input type='radio' name='status' value='{value}' class='peer sr-only' {checked}
                    hx-get='/search/results' hx-target='#search-results' hx-include='#search-form'>
                <span class='inline-block whitespace-nowrap px-3 py-1.5 text-sm rounded-lg border peer-checked:bg-indigo-600 peer-checked:text-white'>{label}</span>
            </label>"#,
                value = choice,
                checked = if choice == selected { "checked" } else { "" },
                label = choice.label(),
            )
        })
        .collect()
}

pub async fn page_search(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let query = params.get("q").map(String::as_str).unwrap_or("");
    let (selected, results) = match status_filter(&params) {
        Ok(filter) => (filter, render_results(&state, query, filter)),
        Err(e) => (StatusFilter::All, alert_html(&e.to_string())),
    };

    let inner_content = format!(
        r#"<div class='space-y-6 max-w-3xl mx-auto'>
    <div class='flex items-center gap-4'>
        <a href='/dashboard' class='p-2 rounded-lg hover:bg-gray-100'>&larr;</a>
        <h1 class='text-2xl font-bold'>Search</h1>
    </div>
    <form id='search-form' action='/search' method='get' class='space-y-4' onsubmit='return false;'>
        <input type='search' name='q' value='{query}' placeholder='Search payment requests...' autofocus
            class='w-full h-12 px-4 text-base border rounded-xl'
            hx-get='/search/results' hx-trigger='input changed delay:200ms, search' hx-target='#search-results' hx-include='#search-form'>
        <div class='flex items-center gap-2 overflow-x-auto pb-2'>{chips}</div>
    </form>
    <div id='search-results'>{results}</div>
</div>"#,
        query = escape_html(query),
        chips = filter_chips(selected),
        results = results,
    );

    Html(page_response(&headers, "Search", &session, &inner_content))
}
