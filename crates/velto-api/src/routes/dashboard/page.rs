//! Dashboard page rendering - Full page endpoints

use axum::extract::{Extension, State};
use axum::http::HeaderMap;
use axum::response::Html;

use velto_core::{RequestStats, SessionContext};
use velto_utils::escape_html;

use crate::routes::requests::page::render_request_card;
use crate::{page_response, AppState};

pub async fn page_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
) -> Html<String> {
    let records = state.store.all();
    let stats = RequestStats::compute(records);
    let first_name = session
        .current_user()
        .map(|u| u.first_name())
        .unwrap_or("there");

    let list = if records.is_empty() {
        r#"<div class='bg-white rounded-2xl shadow-sm text-center py-12 px-6 space-y-4'>
            <div class='w-16 h-16 bg-indigo-50 rounded-full flex items-center justify-center mx-auto text-3xl text-indigo-600'>+</div>
            <p class='text-xl font-semibold mb-2'>Welcome to Velto! &#127881;</p>
            <p class='text-gray-500 max-w-md mx-auto'>You're all set up! Create your first payment request to start receiving payments in seconds.</p>
            <a href='/create' class='inline-block px-6 py-3 rounded-xl bg-gradient-to-r from-indigo-600 to-purple-600 text-white font-semibold'>+ Create Your First Request</a>
        </div>"#
            .to_string()
    } else {
        let cards: Vec<String> = records
            .iter()
            .map(|r| render_request_card(&state, r))
            .collect();
        format!(
            r#"<div class='space-y-4'>
            <h2 class='text-xl font-semibold'>Your Payment Requests</h2>
            <div class='grid grid-cols-1 gap-4'>{}</div>
        </div>"#,
            cards.join("")
        )
    };

    let inner_content = format!(
        r#"<div class='space-y-8'>
    <div class='flex flex-col sm:flex-row justify-between items-start sm:items-center gap-4'>
        <div>
            <h1 class='text-3xl font-bold'>Welcome back, {name}! &#128075;</h1>
            <p class='text-gray-500 mt-1'>Manage your payment requests and track your earnings</p>
        </div>
        <a href='/create' class='px-6 py-3 rounded-xl bg-gradient-to-r from-indigo-600 to-purple-600 text-white font-semibold'>+ Create Request</a>
    </div>
    <div class='grid grid-cols-1 md:grid-cols-3 gap-6'>
        <div class='bg-white rounded-2xl shadow-sm p-6 text-center space-y-2'>
            <p class='text-2xl font-bold'>{total}</p>
            <p class='text-sm text-gray-500'>Total Requested</p>
        </div>
        <div class='bg-white rounded-2xl shadow-sm p-6 text-center space-y-2'>
            <p class='text-2xl font-bold text-green-600'>{received}</p>
            <p class='text-sm text-gray-500'>Received</p>
        </div>
        <div class='bg-white rounded-2xl shadow-sm p-6 text-center space-y-2'>
            <p class='text-2xl font-bold text-amber-500'>{pending}</p>
            <p class='text-sm text-gray-500'>Pending</p>
        </div>
    </div>
    {list}
</div>"#,
        name = escape_html(first_name),
        total = state.money(stats.total_requested),
        received = state.money(stats.total_received),
        pending = stats.pending_count,
        list = list,
    );

    Html(page_response(&headers, "Dashboard", &session, &inner_content))
}
