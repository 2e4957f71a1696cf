//! Core data models for payment requests

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::PaymentStatus;

/// Payment request information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Unique request identifier
    pub id: String,
    /// Requested amount per payer, in major units
    pub amount: Decimal,
    /// What the payment is for
    pub description: String,
    pub status: PaymentStatus,
    /// Creation date (no time of day)
    pub created_at: NaiveDate,
    /// Shareable payment link
    pub link: String,
    /// Number of settlements recorded against this request
    pub payment_count: u32,
}

impl PaymentRequest {
    /// Case-insensitive substring match on the description
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty() || self.description.to_lowercase().contains(&query.to_lowercase())
    }

    /// Sharing actions are only offered while payment is still possible
    pub fn is_shareable(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// Settlement line of the detail view
    pub fn settlement_summary(&self) -> String {
        match self.status {
            PaymentStatus::Paid => format!("Paid {}x", self.payment_count),
            PaymentStatus::Expired => format!("Paid {}x - expired", self.payment_count),
            PaymentStatus::Pending | PaymentStatus::Failed => "Not paid yet".to_string(),
        }
    }
}

/// A settlement recorded against a payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub id: String,
    /// Display name of the payer
    pub paid_by: String,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    /// Reference at the payment processor
    pub payment_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: PaymentStatus, payment_count: u32) -> PaymentRequest {
        PaymentRequest {
            id: "1".to_string(),
            amount: Decimal::new(2500, 2),
            description: "Coffee meetup payment".to_string(),
            status,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            link: "https://velto.app/pay/mno345".to_string(),
            payment_count,
        }
    }

    #[test]
    fn test_matches_query_ignores_case() {
        let req = request(PaymentStatus::Paid, 3);
        assert!(req.matches_query(""));
        assert!(req.matches_query("coffee"));
        assert!(req.matches_query("COFFEE MEETUP"));
        assert!(req.matches_query("eTuP"));
        assert!(!req.matches_query("dinner"));
    }

    #[test]
    fn test_settlement_summary() {
        assert_eq!(request(PaymentStatus::Paid, 3).settlement_summary(), "Paid 3x");
        assert_eq!(
            request(PaymentStatus::Expired, 0).settlement_summary(),
            "Paid 0x - expired"
        );
        assert_eq!(request(PaymentStatus::Pending, 0).settlement_summary(), "Not paid yet");
        assert_eq!(request(PaymentStatus::Failed, 0).settlement_summary(), "Not paid yet");
    }

    #[test]
    fn test_only_pending_requests_are_shareable() {
        assert!(request(PaymentStatus::Pending, 0).is_shareable());
        assert!(!request(PaymentStatus::Paid, 1).is_shareable());
        assert!(!request(PaymentStatus::Expired, 0).is_shareable());
    }

    #[test]
    fn test_request_serde_shape() {
        let json = serde_json::to_value(request(PaymentStatus::Paid, 3)).unwrap();
        assert_eq!(json["status"], "paid");
        assert_eq!(json["created_at"], "2024-01-20");
        assert_eq!(json["payment_count"], 3);
    }
}
