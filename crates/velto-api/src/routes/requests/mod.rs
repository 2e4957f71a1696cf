//! Request routes - Details, delete and the JSON request API
//!
//! Structure:
//! - api.rs: JSON API endpoints and the delete action
//! - page.rs: Detail page and the shared request card

pub mod api;
pub mod page;

pub use api::{api_request_detail, api_request_share, api_requests, api_stats, htmx_delete_request};
pub use page::page_request_detail;
