//! Auth form submissions
//!
//! HTMX submissions get the inline alert fragment on failure and an
//! `HX-Redirect` on success; plain form posts get full pages and redirects.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};

use velto_core::{AuthError, Credentials, Profile, Registration};

use super::page::{render_auth_page, AuthFormValues, AuthMode};
use crate::routes::parse_form;
use crate::{alert_html, is_htmx_request, session_token, AppState};

pub async fn submit_sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let mut params = parse_form(&body);
    let credentials = Credentials {
        email: params.remove("email").unwrap_or_default(),
        password: params.remove("password").unwrap_or_default(),
    };

    match state.auth.sign_in(&credentials).await {
        Ok(profile) => {
            log::info!("User {} signed in", profile.email);
            start_session(&state, &headers, profile)
        }
        Err(e) => {
            log::warn!("Authentication error for '{}': {}", credentials.email, e);
            let values = AuthFormValues {
                name: String::new(),
                email: credentials.email,
            };
            auth_failure(&headers, AuthMode::SignIn, &e, &values)
        }
    }
}

pub async fn submit_sign_up(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let mut params = parse_form(&body);
    let registration = Registration {
        name: params.remove("name").unwrap_or_default(),
        email: params.remove("email").unwrap_or_default(),
        password: params.remove("password").unwrap_or_default(),
    };

    match state.auth.sign_up(&registration).await {
        Ok(profile) => {
            log::info!("User {} signed up", profile.email);
            start_session(&state, &headers, profile)
        }
        Err(e) => {
            log::warn!("Authentication error for '{}': {}", registration.email, e);
            let values = AuthFormValues {
                name: registration.name,
                email: registration.email,
            };
            auth_failure(&headers, AuthMode::SignUp, &e, &values)
        }
    }
}

/// Drop the session and clear the cookie
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie_name = &state.config.auth.session_cookie;
    if let Some(token) = session_token(&headers, cookie_name) {
        if state.sessions.sign_out(&token) {
            log::info!("Session signed out");
        }
    }

    let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", cookie_name);
    if is_htmx_request(&headers) {
        ([(header::SET_COOKIE, cookie)], [("HX-Redirect", "/sign-in")], "").into_response()
    } else {
        ([(header::SET_COOKIE, cookie)], Redirect::to("/sign-in")).into_response()
    }
}

fn start_session(state: &AppState, headers: &HeaderMap, profile: Profile) -> Response {
    // A fresh sign-in replaces whatever session the browser still carries
    if let Some(previous) = session_token(headers, &state.config.auth.session_cookie) {
        state.sessions.sign_out(&previous);
    }
    let token = state.sessions.sign_in(profile);
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        state.config.auth.session_cookie, token
    );

    if is_htmx_request(headers) {
        ([(header::SET_COOKIE, cookie)], [("HX-Redirect", "/dashboard")], "").into_response()
    } else {
        ([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
    }
}

fn auth_failure(
    headers: &HeaderMap,
    mode: AuthMode,
    error: &AuthError,
    values: &AuthFormValues,
) -> Response {
    let message = error.to_string();
    if is_htmx_request(headers) {
        return Html(alert_html(&message)).into_response();
    }

    let status = match error {
        AuthError::MissingField { .. } => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::AccountExists { .. } => StatusCode::CONFLICT,
        AuthError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Html(render_auth_page(mode, Some(&message), values))).into_response()
}
