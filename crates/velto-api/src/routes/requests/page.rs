//! Request page rendering - Detail page and request cards

use axum::extract::{Extension, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;

use velto_core::{PaymentEvent, PaymentRequest, SessionContext, SharePayload};
use velto_utils::{escape_html, format_date, format_date_time, format_day_month};

use crate::{page_response, status_badge, AppState};

/// Card of one request, linking to its detail page
pub fn render_request_card(state: &AppState, request: &PaymentRequest) -> String {
    let paid_count = if request.payment_count > 0 {
        format!("<span>&bull;</span><span>{}x paid</span>", request.payment_count)
    } else {
        String::new()
    };

    // Copy and share only make sense while the link still accepts payments
    let actions = if request.is_shareable() {
        let payload = SharePayload::for_request(request, &state.amounts);
        format!(
            r#"<div class='flex items-center gap-1 opacity-0 group-hover:opacity-100 transition-opacity' onclick='event.preventDefault(); event.stopPropagation();'>
                <button type='button' class='h-8 w-8 rounded-lg hover:bg-gray-100' title='Copy link' onclick='veltoCopy({link})'>&#128203;</button>
                <button type='button' class='h-8 w-8 rounded-lg hover:bg-gray-100' title='Share' onclick='veltoShare({payload})'>&#128228;</button>
            </div>"#,
            link = js_attr(&serde_json::Value::String(request.link.clone())),
            payload = js_attr(&serde_json::to_value(&payload).unwrap_or_default()),
        )
    } else {
        String::new()
    };

    format!(
        r#"<a href='/request/{id}' class='group block bg-white rounded-2xl shadow-sm p-4 hover:shadow-xl transition-all'>
    <div class='space-y-3'>
        <div class='flex items-start justify-between gap-2'>
            <div class='flex-1 min-w-0'>
                <p class='font-medium text-sm mb-1'>{description}</p>
                <div class='flex items-center gap-2 text-xs text-gray-500'><span>{date}</span>{paid_count}</div>
            </div>
            {badge}
        </div>
        <div class='flex items-center justify-between'>
            <h3 class='text-xl font-bold'>{amount}</h3>
            {actions}
        </div>
    </div>
</a>"#,
        id = urlencoding::encode(&request.id),
        description = escape_html(&request.description),
        date = format_day_month(request.created_at),
        paid_count = paid_count,
        badge = status_badge(request.status),
        amount = state.money(request.amount),
        actions = actions,
    )
}

/// JSON value made safe for a single-quoted HTML attribute
pub fn js_attr(value: &serde_json::Value) -> String {
    escape_html(&value.to_string())
}

fn render_payment(state: &AppState, payment: &PaymentEvent) -> String {
    format!(
        r#"<details class='border-b py-3'>
    <summary class='flex items-center justify-between cursor-pointer list-none'>
        <div>
            <p class='font-medium'>{paid_by}</p>
            <p class='text-sm text-gray-500'>{paid_at}</p>
        </div>
        <p class='font-semibold text-indigo-600'>{amount}</p>
    </summary>
    <div class='space-y-2 text-sm pt-3'>
        <div class='flex justify-between'><span class='text-gray-500'>Payment ID:</span><span class='font-mono'>{payment_id}</span></div>
        <div class='flex justify-between'><span class='text-gray-500'>Execution date:</span><span>{paid_at}</span></div>
    </div>
</details>"#,
        paid_by = escape_html(&payment.paid_by),
        paid_at = format_date_time(payment.paid_at),
        amount = state.money(payment.amount),
        payment_id = escape_html(&payment.payment_id),
    )
}

/// Detail page of one request
pub async fn page_request_detail(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Html<String>) {
    let Some(request) = state.store.get(&id) else {
        log::info!("Request {} not found", id);
        let inner_content = r#"<div class='bg-white rounded-2xl shadow-sm text-center py-12 max-w-md mx-auto'>
            <p class='text-lg font-medium mb-4'>Request not found</p>
            <a href='/dashboard' class='px-4 py-2 rounded-xl bg-indigo-600 text-white'>Back to Dashboard</a>
        </div>"#;
        return (
            StatusCode::NOT_FOUND,
            Html(page_response(&headers, "Request not found", &session, inner_content)),
        );
    };

    let payments = state.store.payments(&request.id);
    let payments_section = if payments.is_empty() {
        String::new()
    } else {
        let rows: Vec<String> = payments.iter().map(|p| render_payment(&state, p)).collect();
        format!(
            r#"<div class='bg-white rounded-2xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Payments Received ({})</h3>
                {}
            </div>"#,
            payments.len(),
            rows.join("")
        )
    };

    let payload = SharePayload::for_request(request, &state.amounts);
    let inner_content = format!(
        r#"<div class='space-y-6 max-w-2xl mx-auto'>
    <div class='flex items-center gap-4'>
        <a href='/dashboard' class='p-2 rounded-lg hover:bg-gray-100'>&larr;</a>
        <h1 class='text-2xl font-bold'>Payment Details</h1>
    </div>
    <div class='bg-white rounded-2xl shadow-sm p-6 space-y-4'>
        <div>
            <h2 class='text-xl font-semibold mb-2'>{description}</h2>
            {badge}
        </div>
        <div class='space-y-1'>
            <p class='text-sm text-gray-500'>Request of</p>
            <p class='text-lg font-semibold'>{amount} p. p.</p>
        </div>
        <div class='space-y-1'>
            <p class='text-sm text-gray-500'>Status</p>
            <p class='font-medium'>{summary}</p>
        </div>
        <div class='space-y-1'>
            <p class='text-sm text-gray-500'>Total settled up</p>
            <p class='text-xl font-bold text-indigo-600'>{settled}</p>
        </div>
        <div class='space-y-1'>
            <p class='text-sm text-gray-500'>Creation date</p>
            <p>{created}</p>
        </div>
    </div>
    {payments_section}
    <div class='bg-white rounded-2xl shadow-sm p-6 text-center space-y-4'>
        <h3 class='text-lg font-semibold'>QR Code</h3>
        <div class='w-48 h-48 bg-white mx-auto rounded-lg flex items-center justify-center border'>
            <div class='w-40 h-40 bg-black rounded-lg flex items-center justify-center text-white text-5xl'>&#9638;</div>
        </div>
        <p class='text-sm text-gray-500'>Share this QR code for easy payment</p>
    </div>
    <div class='grid grid-cols-2 gap-4'>
        <button type='button' class='h-12 rounded-xl border bg-white hover:bg-gray-50' onclick='veltoCopy({link_js})'>Copy Link</button>
        <button type='button' class='h-12 rounded-xl border bg-white hover:bg-gray-50' onclick='veltoShare({payload_js})'>Share</button>
    </div>
    <form method='post' action='/request/{id}/delete'>
        <button type='submit' class='w-full h-12 rounded-xl bg-red-600 text-white font-semibold hover:bg-red-700'>Delete Request</button>
    </form>
</div>"#,
        description = escape_html(&request.description),
        badge = status_badge(request.status),
        amount = state.money(request.amount),
        summary = request.settlement_summary(),
        settled = state.money(state.store.total_settled(request)),
        created = format_date(request.created_at),
        payments_section = payments_section,
        link_js = js_attr(&serde_json::Value::String(request.link.clone())),
        payload_js = js_attr(&serde_json::to_value(&payload).unwrap_or_default()),
        id = urlencoding::encode(&request.id),
    );

    (
        StatusCode::OK,
        Html(page_response(&headers, "Payment Details", &session, &inner_content)),
    )
}
