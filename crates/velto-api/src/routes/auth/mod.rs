//! Auth routes - Sign-in, sign-up and sign-out
//!
//! Structure:
//! - api.rs: Form submissions and session cookies
//! - page.rs: Auth page rendering

pub mod api;
pub mod page;

pub use api::{sign_out, submit_sign_in, submit_sign_up};
pub use page::{page_sign_in, page_sign_up};
