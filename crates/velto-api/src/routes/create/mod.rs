//! Create routes - Creation form and generated payment links
//!
//! Structure:
//! - api.rs: Form submission (HTMX) and JSON create endpoint
//! - page.rs: Form page and the success panel

pub mod api;
pub mod page;

pub use api::{api_create_request, htmx_create_request};
pub use page::page_create;
