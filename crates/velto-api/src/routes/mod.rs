//! Route modules for the API server
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX fragment endpoints
//! - page.rs: Full page rendering

pub mod auth;
pub mod create;
pub mod dashboard;
pub mod requests;
pub mod search;
pub mod settings;

use std::collections::HashMap;

/// Decode an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(&key.replace('+', " "))
            .map(|s| s.into_owned())
            .unwrap_or_default();
        let value = urlencoding::decode(&value.replace('+', " "))
            .map(|s| s.into_owned())
            .unwrap_or_default();
        params.insert(key, value);
    }
    params
}
