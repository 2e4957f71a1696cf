//! Create page rendering - Form and success panel

use axum::extract::{Extension, State};
use axum::http::HeaderMap;
use axum::response::Html;

use velto_core::{whatsapp_url, CreatedRequest, SessionContext, SharePayload};
use velto_utils::escape_html;

use crate::routes::requests::page::js_attr;
use crate::{alert_html, page_response, AppState};

pub async fn page_create(
    State(_state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
) -> Html<String> {
    let inner_content = create_layout(&render_create_form(None, "", ""));
    Html(page_response(&headers, "Create Payment Request", &session, &inner_content))
}

/// Page frame around the form or success panel
pub fn create_layout(panel: &str) -> String {
    format!(
        r#"<div class='mb-8'>
    <a href='/dashboard' class='inline-block mb-4 px-3 py-2 rounded-lg hover:bg-gray-100'>&larr; Back to Dashboard</a>
</div>
<div id='create-panel'>{}</div>"#,
        panel
    )
}

/// Creation form, optionally with an error and the previous input
pub fn render_create_form(error: Option<&str>, amount: &str, description: &str) -> String {
    format!(
        r#"<div class='text-center mb-8'>
    <h1 class='text-3xl font-bold mb-2'>Create Payment Request</h1>
    <p class='text-gray-500'>Fill in the details to generate your payment link</p>
</div>
<div class='bg-white rounded-2xl shadow-sm p-6 max-w-md mx-auto space-y-4'>
    <div>
        <h2 class='text-lg font-semibold'>Create Payment Request</h2>
        <p class='text-gray-500 text-sm'>Fill in the details below to generate a payment link</p>
    </div>
    {alert}
    <form method='post' action='/create' hx-post='/create' hx-target='#create-panel' hx-swap='innerHTML' class='space-y-6'
        oninput='this.querySelector("button").disabled = !(this.checkValidity() && parseFloat(this.amount.value) > 0 && this.description.value.trim() !== "")'>
        <div class='space-y-2'>
            <label for='amount' class='text-sm font-semibold'>Amount *</label>
            <div class='relative'>
                <span class='absolute left-3 top-1/2 -translate-y-1/2 text-gray-400'>&euro;</span>
                <input id='amount' name='amount' type='number' step='0.01' min='0.01' placeholder='0.00' value='{amount}' required
                    class='w-full pl-10 h-12 text-lg font-semibold border rounded-xl'>
            </div>
        </div>
        <div class='space-y-2'>
            <label for='description' class='text-sm font-semibold'>Description *</label>
            <textarea id='description' name='description' placeholder='What is this payment for?' required
                class='w-full min-h-[100px] p-3 border rounded-xl resize-none'>{description}</textarea>
        </div>
        <button type='submit' {disabled} class='w-full h-12 rounded-xl bg-gradient-to-r from-indigo-600 to-purple-600 text-white font-semibold disabled:opacity-50'>
            <span class='htmx-label'>Create Payment Link</span>
            <span class='htmx-indicator items-center gap-2'>Creating...</span>
        </button>
    </form>
</div>"#,
        alert = error.map(alert_html).unwrap_or_default(),
        amount = escape_html(amount),
        description = escape_html(description),
        disabled = if amount.is_empty() || description.trim().is_empty() { "disabled" } else { "" },
    )
}

/// Success panel with the generated link and share actions
pub fn render_created(state: &AppState, created: &CreatedRequest) -> String {
    let payload = SharePayload::for_created(created, &state.amounts);
    let whatsapp = whatsapp_url(&state.config.sharing.whatsapp_base_url, created, &state.amounts);
    let link_js = js_attr(&serde_json::Value::String(created.link.clone()));

    format!(
        r#"<div class='text-center mb-8'>
    <h1 class='text-3xl font-bold mb-2'>Payment Link Created!</h1>
    <p class='text-gray-500'>Your payment link is ready to share</p>
</div>
<div class='max-w-2xl mx-auto space-y-6'>
    <div class='text-center'>
        <div class='w-20 h-20 bg-green-100 rounded-full flex items-center justify-center mx-auto text-4xl text-green-600'>&#10003;</div>
    </div>
    <div class='bg-white rounded-2xl shadow-sm p-6 text-center space-y-4'>
        <div>
            <p class='text-3xl font-bold'>{amount}</p>
            <p class='text-gray-500 mt-1'>{description}</p>
        </div>
        <div class='bg-gray-50 rounded-xl p-4'>
            <p class='text-sm font-medium mb-2'>Payment Link</p>
            <div class='flex items-center gap-2'>
                <input value='{link}' readonly class='flex-1 px-3 py-2 font-mono text-sm border rounded-lg bg-white'>
                <button type='button' class='px-3 py-2 border rounded-lg bg-white' onclick='veltoCopy({link_js})'>&#128203;</button>
            </div>
        </div>
        <div class='grid grid-cols-1 sm:grid-cols-3 gap-3 pt-4'>
            <button type='button' class='w-full py-2 rounded-xl bg-gradient-to-r from-indigo-600 to-purple-600 text-white' onclick='veltoCopy({link_js})'>Copy Link</button>
            <button type='button' class='w-full py-2 rounded-xl border' onclick='veltoShare({payload_js})'>Share</button>
            <button type='button' class='w-full py-2 rounded-xl border'>QR Code</button>
        </div>
    </div>
    <div class='bg-white rounded-2xl shadow-sm p-6 space-y-4'>
        <h3 class='font-semibold'>Quick Share via WhatsApp</h3>
        <p class='text-sm text-gray-500'>Send this payment request directly to someone via WhatsApp</p>
        <a href='{whatsapp}' target='_blank' rel='noopener' class='block w-full text-center py-2 rounded-xl bg-[#25D366] text-white hover:bg-[#25D366]/90'>Share on WhatsApp</a>
    </div>
    <div class='flex flex-col sm:flex-row gap-4'>
        <a href='/dashboard' class='flex-1 text-center py-3 rounded-xl border bg-white'>View Dashboard</a>
        <a href='/create' class='flex-1 text-center py-3 rounded-xl bg-gradient-to-r from-indigo-600 to-purple-600 text-white font-semibold'>Create Another Request</a>
    </div>
</div>"#,
        amount = state.money(created.amount),
        description = escape_html(&created.description),
        link = escape_html(&created.link),
        link_js = link_js,
        payload_js = js_attr(&serde_json::to_value(&payload).unwrap_or_default()),
        whatsapp = escape_html(&whatsapp),
    )
}
