//! Dashboard routes - Statistics and the request list

pub mod page;

pub use page::page_dashboard;
