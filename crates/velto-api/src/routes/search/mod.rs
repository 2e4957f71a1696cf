//! Search routes - Free-text search with status filter chips
//!
//! Structure:
//! - api.rs: HTMX result list fragment
//! - page.rs: Full search page

pub mod api;
pub mod page;

pub use api::htmx_search_results;
pub use page::page_search;
