//! Profile page rendering - Full page endpoints

use axum::extract::{Extension, State};
use axum::http::HeaderMap;
use axum::response::Html;

use velto_core::{Profile, SessionContext};
use velto_utils::escape_html;

use crate::{page_response, AppState};

fn avatar(user: &Profile) -> String {
    match &user.avatar_url {
        Some(url) => format!(
            "<img src='{}' alt='{}' class='w-20 h-20 rounded-full object-cover'>",
            escape_html(url),
            escape_html(user.display_name())
        ),
        None => format!(
            "<div class='w-20 h-20 rounded-full bg-gradient-to-r from-indigo-600 to-purple-600 text-white text-2xl font-bold flex items-center justify-center'>{}</div>",
            escape_html(&user.initials())
        ),
    }
}

pub async fn page_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
) -> Html<String> {
    let account = match session.current_user() {
        Some(user) => format!(
            r#"<div class='flex items-center gap-6'>
            {avatar}
            <div>
                <p class='text-xl font-semibold'>{name}</p>
                <p class='text-gray-500'>{email}</p>
            </div>
        </div>"#,
            avatar = avatar(user),
            name = escape_html(user.display_name()),
            email = escape_html(&user.email),
        ),
        None => "<p class='text-gray-500'>Not signed in</p>".to_string(),
    };

    let currency = &state.config.currency;
    let inner_content = format!(
        r#"<div class='max-w-2xl mx-auto space-y-6'>
    <h1 class='text-2xl font-bold'>Profile</h1>
    <div class='bg-white rounded-2xl shadow-sm p-6'>{account}</div>
    <div class='bg-white rounded-2xl shadow-sm p-6'>
        <h3 class='text-lg font-semibold mb-4'>Account</h3>
        <div class='grid grid-cols-2 gap-4'>
            <div><p class='text-sm text-gray-500'>Sign-in provider</p><p class='font-medium'>{provider}</p></div>
            <div><p class='text-sm text-gray-500'>Active sessions</p><p class='font-medium'>{sessions}</p></div>
        </div>
    </div>
    <div class='bg-white rounded-2xl shadow-sm p-6'>
        <h3 class='text-lg font-semibold mb-4'>Currency</h3>
        <div class='grid grid-cols-2 gap-4'>
            <div><p class='text-sm text-gray-500'>Currency</p><p class='font-medium'>{code} ({symbol})</p></div>
            <div><p class='text-sm text-gray-500'>Example</p><p class='font-medium'>{example}</p></div>
        </div>
    </div>
    <form method='post' action='/sign-out'>
        <button type='submit' class='w-full py-3 rounded-xl border border-red-200 text-red-600 hover:bg-red-50'>Sign out</button>
    </form>
</div>"#,
        account = account,
        provider = state.auth.name(),
        sessions = state.sessions.active_sessions(),
        code = escape_html(&currency.code),
        symbol = escape_html(&currency.symbol),
        example = state.money(rust_decimal::Decimal::new(123450, 2)),
    );

    Html(page_response(&headers, "Profile", &session, &inner_content))
}
