//! Auth page rendering - Full page endpoints

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};

use velto_utils::escape_html;

use crate::{alert_html, base_html, AppState};

/// Which form the auth page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn path(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "/sign-in",
            AuthMode::SignUp => "/sign-up",
        }
    }
}

/// Values echoed back into the form after a failed submission
#[derive(Debug, Clone, Default)]
pub struct AuthFormValues {
    pub name: String,
    pub email: String,
}

pub async fn page_sign_in(State(state): State<AppState>, headers: HeaderMap) -> Response {
    auth_page(&state, &headers, AuthMode::SignIn)
}

pub async fn page_sign_up(State(state): State<AppState>, headers: HeaderMap) -> Response {
    auth_page(&state, &headers, AuthMode::SignUp)
}

fn auth_page(state: &AppState, headers: &HeaderMap, mode: AuthMode) -> Response {
    if state.session(headers).is_signed_in() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(render_auth_page(mode, None, &AuthFormValues::default())).into_response()
}

/// Full auth page: branding column plus the sign-in or sign-up card
pub fn render_auth_page(mode: AuthMode, alert: Option<&str>, values: &AuthFormValues) -> String {
    let (heading, subheading, button, busy, switch_text, switch_link, switch_label) = match mode {
        AuthMode::SignIn => (
            "Welcome back",
            "Sign in to your Velto account",
            "Sign In",
            "Signing in...",
            "Don't have an account? ",
            "/sign-up",
            "Sign up",
        ),
        AuthMode::SignUp => (
            "Get started",
            "Create your account to start requesting payments",
            "Create Account",
            "Creating account...",
            "Already have an account? ",
            "/sign-in",
            "Sign in",
        ),
    };

    let name_field = if mode == AuthMode::SignUp {
        format!(
            r#"<div class='space-y-2'>
                <label for='name' class='text-sm font-medium'>Full Name</label>
                <input id='name' name='name' value='{}' placeholder='Enter your full name' required class='w-full h-11 px-3 border rounded-xl'>
            </div>"#,
            escape_html(&values.name)
        )
    } else {
        String::new()
    };

    let content = format!(
        r#"<div class='min-h-screen flex items-center justify-center p-4'>
    <div class='w-full max-w-6xl grid lg:grid-cols-2 gap-8 items-center'>
        <div class='hidden lg:flex flex-col justify-center space-y-8 p-8'>
            <div class='space-y-6'>
                <p class='text-5xl font-bold text-indigo-600'>Velto</p>
                <h1 class='text-4xl font-bold leading-tight'>Request. Pay. Done.</h1>
                <p class='text-xl text-gray-500 leading-relaxed'>The fastest way to request payments from anyone, anywhere. Create payment links in seconds and get paid instantly.</p>
            </div>
            <ul class='space-y-4 font-medium'>
                <li>&#9889; Create payment links in under 30 seconds</li>
                <li>&#128274; Secure payments powered by Stripe</li>
                <li>&#9993; Real-time notifications and tracking</li>
            </ul>
        </div>
        <div class='bg-white rounded-2xl shadow-sm p-6 w-full max-w-md mx-auto space-y-6'>
            <div class='text-center space-y-2'>
                <h2 class='text-2xl font-bold'>{heading}</h2>
                <p class='text-gray-500'>{subheading}</p>
            </div>
            <div id='auth-alert'>{alert}</div>
            <form method='post' action='{action}' hx-post='{action}' hx-target='#auth-alert' hx-swap='innerHTML' class='space-y-4' oninput='this.querySelector("button").disabled = !this.checkValidity()'>
                {name_field}
                <div class='space-y-2'>
                    <label for='email' class='text-sm font-medium'>Email</label>
                    <input id='email' name='email' type='email' value='{email}' placeholder='Enter your email' required class='w-full h-11 px-3 border rounded-xl'>
                </div>
                <div class='space-y-2'>
                    <label for='password' class='text-sm font-medium'>Password</label>
                    <input id='password' name='password' type='password' placeholder='Enter your password' required class='w-full h-11 px-3 border rounded-xl'>
                </div>
                <button type='submit' disabled class='w-full h-12 rounded-xl bg-gradient-to-r from-indigo-600 to-purple-600 text-white font-semibold disabled:opacity-50'>
                    <span class='htmx-label'>{button} &rarr;</span>
                    <span class='htmx-indicator items-center gap-2'>{busy}</span>
                </button>
            </form>
            <p class='text-center text-sm text-gray-500'>{switch_text}<a href='{switch_link}' class='text-indigo-600 font-medium'>{switch_label}</a></p>
        </div>
    </div>
</div>"#,
        heading = heading,
        subheading = subheading,
        alert = alert.map(alert_html).unwrap_or_default(),
        action = mode.path(),
        name_field = name_field,
        email = escape_html(&values.email),
        button = button,
        busy = busy,
        switch_text = switch_text,
        switch_link = switch_link,
        switch_label = switch_label,
    );

    let title = match mode {
        AuthMode::SignIn => "Sign In",
        AuthMode::SignUp => "Sign Up",
    };
    base_html(title, &content)
}
