//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::auth: Sign-in, sign-up and sign-out
//! - routes::dashboard: Statistics and the request list
//! - routes::create: Creation form and generated links
//! - routes::search: Free-text search with status filters
//! - routes::requests: Request details, delete and the JSON request API
//! - routes::settings: Profile page and configuration display

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use velto_config::Config;
use velto_core::{
    amount_style, AuthProvider, PaymentStatus, RequestCreator, RequestStore, SessionContext,
    SessionStore, StatusTreatment,
};
use velto_utils::{escape_html, format_amount, AmountStyle};

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RequestStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub sessions: Arc<SessionStore>,
    pub creator: RequestCreator,
    pub amounts: AmountStyle,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: RequestStore, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            store: Arc::new(store),
            auth,
            sessions: Arc::new(SessionStore::new(
                Duration::from_secs(config.auth.session_ttl_secs),
                config.auth.max_sessions,
            )),
            creator: RequestCreator::new(&config.requests)
                .with_decimal_places(config.currency.decimal_places),
            amounts: amount_style(&config.currency),
            config,
        }
    }

    /// Format an amount with the configured currency style
    pub fn money(&self, amount: rust_decimal::Decimal) -> String {
        format_amount(amount, &self.amounts)
    }

    /// Resolve the session cookie of a request
    pub fn session(&self, headers: &HeaderMap) -> SessionContext {
        let token = session_token(headers, &self.config.auth.session_cookie);
        self.sessions.resolve(token.as_deref())
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::auth::{page_sign_in, page_sign_up, sign_out, submit_sign_in, submit_sign_up};
    use routes::create::{api_create_request, htmx_create_request, page_create};
    use routes::dashboard::page_dashboard;
    use routes::requests::{
        api_request_detail, api_request_share, api_requests, api_stats, htmx_delete_request,
        page_request_detail,
    };
    use routes::search::{htmx_search_results, page_search};
    use routes::settings::{api_settings, page_profile};

    let protected = Router::new()
        // API endpoints
        .route("/api/requests", get(api_requests).post(api_create_request))
        .route("/api/requests/:id", get(api_request_detail))
        .route("/api/requests/:id/share", get(api_request_share))
        .route("/api/stats", get(api_stats))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/dashboard", get(page_dashboard))
        .route("/create", get(page_create).post(htmx_create_request))
        .route("/search", get(page_search))
        .route("/search/results", get(htmx_search_results))
        .route("/request/:id", get(page_request_detail))
        .route("/request/:id/delete", post(htmx_delete_request))
        .route("/profile", get(page_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/", get(index_page))
        .route("/api/health", get(health_check))
        .route("/sign-in", get(page_sign_in).post(submit_sign_in))
        .route("/sign-up", get(page_sign_up).post(submit_sign_up))
        .route("/sign-out", post(sign_out))
        .merge(protected)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Entry point: dashboard when signed in, sign-in otherwise
async fn index_page(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if state.session(&headers).is_signed_in() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/sign-in")
    }
}

/// Resolve the session and hand it to protected handlers as an extension
async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = state.session(req.headers());
    if !session.is_signed_in() {
        let path = req.uri().path().to_string();
        log::debug!("Anonymous request to {} rejected", path);
        if path.starts_with("/api/") {
            return ApiError::Unauthorized.into_response();
        }
        if is_htmx_request(req.headers()) {
            return (StatusCode::UNAUTHORIZED, [("HX-Redirect", "/sign-in")]).into_response();
        }
        return Redirect::to("/sign-in").into_response();
    }

    req.extensions_mut().insert(session);
    next.run(req).await
}

/// Fallback for unknown paths
async fn not_found(uri: Uri, headers: HeaderMap) -> (StatusCode, Html<String>) {
    log::warn!("404 Error: User attempted to access non-existent route: {}", uri.path());

    let inner_content = r#"<div class='min-h-screen flex items-center justify-center'>
        <div class='bg-white rounded-2xl shadow-sm max-w-md w-full text-center py-12 px-6'>
            <div class='flex flex-col items-center gap-4'>
                <div class='w-16 h-16 bg-gray-100 rounded-full flex items-center justify-center mb-2'>
                    <span class='text-2xl font-bold text-indigo-600'>404</span>
                </div>
                <h1 class='text-2xl font-bold mb-2'>Page Not Found</h1>
                <p class='text-gray-500 mb-6'>Oops! The page you are looking for does not exist.</p>
                <a href='/' class='w-full max-w-xs px-4 py-2 rounded-xl bg-gradient-to-r from-indigo-600 to-purple-600 text-white font-semibold'>Return to Dashboard</a>
            </div>
        </div>
    </div>"#;

    let body = if is_htmx_request(&headers) {
        inner_content.to_string()
    } else {
        base_html("Page Not Found", inner_content)
    };
    (StatusCode::NOT_FOUND, Html(body))
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Velto</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ display: none; }}
        .htmx-request .htmx-indicator {{ display: inline-flex; }}
        .htmx-request.htmx-indicator {{ display: inline-flex; }}
        .htmx-request .htmx-label {{ display: none; }}
    </style>
    <script>
        function veltoCopy(text) {{
            if (navigator.clipboard) {{ navigator.clipboard.writeText(text).catch(() => {{}}); }}
        }}
        function veltoShare(payload) {{
            if (navigator.share) {{ navigator.share(payload).catch(() => {{}}); }}
        }}
    </script>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Top navigation bar with search and the user menu
pub fn top_nav(session: &SessionContext) -> String {
    let user_menu = match session.current_user() {
        Some(user) => {
            let avatar = match &user.avatar_url {
                Some(url) => format!(
                    "<img src='{}' alt='{}' class='h-10 w-10 rounded-full object-cover'>",
                    escape_html(url),
                    escape_html(user.display_name())
                ),
                None => format!(
                    "<span class='h-10 w-10 rounded-full bg-indigo-600 text-white flex items-center justify-center font-semibold'>{}</span>",
                    escape_html(&user.initials())
                ),
            };
            format!(
                r#"<details class='relative'>
                <summary class='list-none cursor-pointer'>{}</summary>
                <div class='absolute right-0 mt-2 w-56 bg-white rounded-xl shadow-lg border py-2 z-50'>
                    <div class='px-4 py-2'>
                        <p class='font-medium'>{}</p>
                        <p class='text-sm text-gray-500 truncate'>{}</p>
                    </div>
                    <div class='border-t my-1'></div>
                    <a href='/profile' class='block px-4 py-2 text-sm hover:bg-gray-50'>User Settings</a>
                    <div class='border-t my-1'></div>
                    <form method='post' action='/sign-out'>
                        <button type='submit' class='w-full text-left px-4 py-2 text-sm hover:bg-gray-50'>Log out</button>
                    </form>
                </div>
            </details>"#,
                avatar,
                escape_html(user.display_name()),
                escape_html(&user.email)
            )
        }
        None => r#"<div class='flex items-center gap-2'>
                <a href='/sign-in' class='px-3 py-2 text-sm rounded-lg hover:bg-gray-100'>Sign In</a>
                <a href='/sign-up' class='px-3 py-2 text-sm rounded-lg bg-indigo-600 text-white'>Sign Up</a>
            </div>"#
            .to_string(),
    };

    format!(
        r#"<nav class='sticky top-0 z-40 w-full border-b bg-white/95 backdrop-blur'>
    <div class='container mx-auto flex h-16 items-center justify-between px-4'>
        <a href='/dashboard' class='text-xl font-bold text-indigo-600'>Velto</a>
        <div class='flex items-center gap-4'>
            <a href='/search' class='p-2 rounded-lg hover:bg-gray-100' title='Search'>&#128269;</a>
            {}
        </div>
    </div>
</nav>"#,
        user_menu
    )
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &HeaderMap,
    title: &str,
    session: &SessionContext,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(
            title,
            &format!(
                "{}<main class='container mx-auto px-4 py-8'>{}</main>",
                top_nav(session),
                inner_content
            ),
        )
    }
}

/// Inline alert box used for form errors
pub fn alert_html(message: &str) -> String {
    format!(
        "<div class='rounded-xl border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700' role='alert'>{}</div>",
        escape_html(message)
    )
}

/// Tailwind classes of a status badge
pub fn treatment_classes(treatment: StatusTreatment) -> &'static str {
    match treatment {
        StatusTreatment::Success => "bg-green-500 text-white",
        StatusTreatment::Warning => "bg-amber-400 text-amber-950",
        StatusTreatment::Muted => "bg-gray-200 text-gray-600",
        StatusTreatment::Destructive => "bg-red-600 text-white",
    }
}

/// Status badge
pub fn status_badge(status: PaymentStatus) -> String {
    format!(
        "<span class='rounded-full px-3 py-1 text-xs font-semibold shadow-md {}'>{}</span>",
        treatment_classes(status.treatment()),
        status.label()
    )
}

/// Session token from the `Cookie` header
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl-C.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let auth_provider = state.auth.name();
    let request_count = state.store.len();

    let router = create_router(state);
    let listener = TcpListener::bind(&addr).await?;

    log::info!("Starting Velto server on http://{}", addr);
    log::info!("Auth provider: {}, payment requests loaded: {}", auth_provider, request_count);
    log::info!("Available routes:");
    log::info!("  - /dashboard (Payment requests overview)");
    log::info!("  - /create (Create a payment request)");
    log::info!("  - /search (Search and filter requests)");
    log::info!("  - /request/:id (Request details)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests;
