//! Share payloads for the browser share sheet and WhatsApp deep links

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use velto_utils::{format_amount, AmountStyle};

use crate::create::CreatedRequest;
use crate::models::PaymentRequest;

/// Data handed to the browser share sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// Payload offered right after a request was created
    pub fn for_created(created: &CreatedRequest, style: &AmountStyle) -> Self {
        Self {
            title: "Payment Request".to_string(),
            text: format!(
                "Please pay {} for: {}",
                format_amount(created.amount, style),
                created.description
            ),
            url: created.link.clone(),
        }
    }

    /// Payload offered from the detail view of an existing request
    pub fn for_request(request: &PaymentRequest, style: &AmountStyle) -> Self {
        Self {
            title: request.description.clone(),
            text: format!("Payment request for {}", format_amount(request.amount, style)),
            url: request.link.clone(),
        }
    }
}

/// WhatsApp deep link with a prefilled payment message
pub fn whatsapp_url(
    base_url: &str,
    created: &CreatedRequest,
    style: &AmountStyle,
) -> String {
    deep_link(base_url, created.amount, &created.description, &created.link, style)
}

/// WhatsApp deep link for an existing request
pub fn whatsapp_url_for_request(
    base_url: &str,
    request: &PaymentRequest,
    style: &AmountStyle,
) -> String {
    deep_link(base_url, request.amount, &request.description, &request.link, style)
}

fn deep_link(
    base_url: &str,
    amount: Decimal,
    description: &str,
    link: &str,
    style: &AmountStyle,
) -> String {
    let message = format!(
        "Hi! Please pay {} for: {}. You can pay here: {}",
        format_amount(amount, style),
        description,
        link
    );
    format!("{}?text={}", base_url, urlencoding::encode(&message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;
    use chrono::NaiveDate;

    fn created() -> CreatedRequest {
        CreatedRequest {
            amount: Decimal::new(4250, 2),
            description: "Concert tickets".to_string(),
            link: "https://velto.app/pay/x1y2z3".to_string(),
        }
    }

    #[test]
    fn test_created_payload() {
        let payload = SharePayload::for_created(&created(), &AmountStyle::default());
        assert_eq!(payload.title, "Payment Request");
        assert_eq!(payload.text, "Please pay € 42,50 for: Concert tickets");
        assert_eq!(payload.url, "https://velto.app/pay/x1y2z3");
    }

    #[test]
    fn test_existing_request_payload() {
        let request = PaymentRequest {
            id: "2".to_string(),
            amount: Decimal::new(7550, 2),
            description: "Dinner split with friends at Restaurant De Kas".to_string(),
            status: PaymentStatus::Pending,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
            link: "https://velto.app/pay/def456".to_string(),
            payment_count: 0,
        };
        let payload = SharePayload::for_request(&request, &AmountStyle::default());
        assert_eq!(payload.title, "Dinner split with friends at Restaurant De Kas");
        assert_eq!(payload.text, "Payment request for € 75,50");
        assert_eq!(payload.url, "https://velto.app/pay/def456");
    }

    #[test]
    fn test_whatsapp_url_encodes_message() {
        let url = whatsapp_url("https://wa.me/", &created(), &AmountStyle::default());
        assert!(url.starts_with("https://wa.me/?text=Hi%21%20Please%20pay%20"));
        assert!(url.ends_with("https%3A%2F%2Fvelto.app%2Fpay%2Fx1y2z3"));
        assert!(!url[("https://wa.me/?text=".len())..].contains(' '));

        let decoded = urlencoding::decode(url.trim_start_matches("https://wa.me/?text=")).unwrap();
        assert_eq!(
            decoded,
            "Hi! Please pay € 42,50 for: Concert tickets. You can pay here: https://velto.app/pay/x1y2z3"
        );
    }

    #[test]
    fn test_whatsapp_url_for_existing_request() {
        let request = PaymentRequest {
            id: "5".to_string(),
            amount: Decimal::new(2500, 2),
            description: "Coffee meetup payment".to_string(),
            status: PaymentStatus::Paid,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            link: "https://velto.app/pay/mno345".to_string(),
            payment_count: 3,
        };
        let url = whatsapp_url_for_request("https://wa.me/", &request, &AmountStyle::default());
        let decoded = urlencoding::decode(url.trim_start_matches("https://wa.me/?text=")).unwrap();
        assert_eq!(
            decoded,
            "Hi! Please pay € 25,00 for: Coffee meetup payment. You can pay here: https://velto.app/pay/mno345"
        );
    }
}
