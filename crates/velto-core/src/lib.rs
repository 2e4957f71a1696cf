//! Core payment request logic
//!
//! - store: seeded, read-only request store with the payment ledger
//! - filter_requests / RequestStats: search view and dashboard figures
//! - create: link generation for new requests
//! - share: share-sheet payloads and WhatsApp deep links
//! - auth / session: authentication providers and session table

pub mod auth;
pub mod create;
pub mod error;
pub mod models;
pub mod reports;
pub mod session;
pub mod share;
pub mod store;
pub mod types;

use velto_config::{CurrencyConfig, SymbolPosition};
use velto_utils::AmountStyle;

pub use auth::{
    AuthError, AuthProvider, Credentials, CredentialsAuthProvider, MockAuthProvider, Profile,
    Registration,
};
pub use create::{CreatedRequest, NewPaymentRequest, RequestCreator};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{PaymentEvent, PaymentRequest};
pub use reports::{RequestDetailResponse, RequestStats, RequestsResponse};
pub use session::{SessionContext, SessionStore};
pub use share::{whatsapp_url, whatsapp_url_for_request, SharePayload};
pub use store::RequestStore;
pub use types::{PaymentStatus, StatusFilter, StatusTreatment};

/// Requests whose description contains `query` (case-insensitive) and whose
/// status passes `filter`, in their original order
pub fn filter_requests(
    records: &[PaymentRequest],
    query: &str,
    filter: StatusFilter,
) -> Vec<PaymentRequest> {
    records
        .iter()
        .filter(|r| filter.matches(r.status) && r.matches_query(query))
        .cloned()
        .collect()
}

/// Amount rendering options from the currency settings
pub fn amount_style(currency: &CurrencyConfig) -> AmountStyle {
    AmountStyle {
        symbol: currency.symbol.clone(),
        decimal_places: currency.decimal_places,
        thousands_separator: currency.thousands_separator.clone(),
        decimal_separator: currency.decimal_separator.clone(),
        symbol_before: currency.symbol_position == SymbolPosition::Before,
    }
}

// ==================== Tests ====================
