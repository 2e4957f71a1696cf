//! In-memory payment request store
//!
//! Built once at startup from the bundled sample data or a YAML seed file,
//! then shared read-only between handlers.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::{PaymentEvent, PaymentRequest};

const SAMPLE_DATA: &str = include_str!("../data/sample.yaml");

/// Seed file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub requests: Vec<PaymentRequest>,
    #[serde(default)]
    pub payments: Vec<SeedPayment>,
}

/// A payment event together with the request it settles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPayment {
    pub request_id: String,
    pub id: String,
    pub paid_by: String,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    pub payment_id: String,
}

impl From<SeedPayment> for PaymentEvent {
    fn from(seed: SeedPayment) -> Self {
        PaymentEvent {
            id: seed.id,
            paid_by: seed.paid_by,
            amount: seed.amount,
            paid_at: seed.paid_at,
            payment_id: seed.payment_id,
        }
    }
}

/// Ordered, immutable set of payment requests and their payment ledger
#[derive(Debug, Clone, Default)]
pub struct RequestStore {
    requests: Vec<PaymentRequest>,
    payments: HashMap<String, Vec<PaymentEvent>>,
    settled: HashMap<String, Decimal>,
}

impl RequestStore {
    /// Build a store, rejecting data that breaks the ledger invariants
    pub fn new(
        requests: Vec<PaymentRequest>,
        payments: HashMap<String, Vec<PaymentEvent>>,
    ) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for request in &requests {
            if !seen.insert(request.id.as_str()) {
                return Err(CoreError::DuplicateEntry {
                    entry: format!("payment request '{}'", request.id),
                });
            }
            if request.amount <= Decimal::ZERO {
                return Err(CoreError::ValidationError {
                    message: format!("Request '{}' must have an amount greater than 0", request.id),
                });
            }
            if request.description.trim().is_empty() {
                return Err(CoreError::ValidationError {
                    message: format!("Request '{}' has no description", request.id),
                });
            }
        }

        for (id, events) in &payments {
            let request = requests
                .iter()
                .find(|r| &r.id == id)
                .ok_or_else(|| CoreError::RequestNotFound { id: id.clone() })?;

            if !events.is_empty() && events.len() != request.payment_count as usize {
                return Err(CoreError::InconsistentLedger {
                    id: id.clone(),
                    recorded: request.payment_count,
                    events: events.len(),
                });
            }
            if let Some(event) = events.iter().find(|e| e.amount <= Decimal::ZERO) {
                return Err(CoreError::ValidationError {
                    message: format!("Payment '{}' of request '{}' must be positive", event.id, id),
                });
            }
        }

        // Totals are computed once here so the views never overflow
        let mut total = Decimal::ZERO;
        let mut settled = HashMap::with_capacity(requests.len());
        for request in &requests {
            total = total
                .checked_add(request.amount)
                .ok_or_else(|| overflow("the total requested amount"))?;
            let events = payments.get(&request.id).map(Vec::as_slice).unwrap_or(&[]);
            let amount = settled_amount(request, events)
                .ok_or_else(|| overflow(&format!("the settled amount of request '{}'", request.id)))?;
            settled.insert(request.id.clone(), amount);
        }

        Ok(Self {
            requests,
            payments,
            settled,
        })
    }

    /// Store built from seed data
    pub fn from_seed(seed: SeedData) -> CoreResult<Self> {
        let mut payments: HashMap<String, Vec<PaymentEvent>> = HashMap::new();
        for payment in seed.payments {
            payments
                .entry(payment.request_id.clone())
                .or_default()
                .push(payment.into());
        }
        for events in payments.values_mut() {
            events.sort_by_key(|e| e.paid_at);
        }
        Self::new(seed.requests, payments)
    }

    /// Parse seed data from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let seed: SeedData = serde_yaml::from_str(content).map_err(|e| CoreError::SeedError {
            message: e.to_string(),
        })?;
        Self::from_seed(seed)
    }

    /// Load seed data from a YAML file
    pub fn from_seed_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::SeedError {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content)
    }

    /// Bundled sample data
    pub fn sample() -> CoreResult<Self> {
        Self::from_yaml(SAMPLE_DATA)
    }

    /// All requests, in seed order
    pub fn all(&self) -> &[PaymentRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Look up a request by id
    pub fn get(&self, id: &str) -> Option<&PaymentRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Look up a request by id, failing with `RequestNotFound`
    pub fn require(&self, id: &str) -> CoreResult<&PaymentRequest> {
        self.get(id)
            .ok_or_else(|| CoreError::RequestNotFound { id: id.to_string() })
    }

    /// Payment events of a request, oldest first
    pub fn payments(&self, id: &str) -> &[PaymentEvent] {
        self.payments.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Amount settled so far; falls back to amount x payment_count without a ledger
    pub fn total_settled(&self, request: &PaymentRequest) -> Decimal {
        self.settled
            .get(&request.id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

fn settled_amount(request: &PaymentRequest, events: &[PaymentEvent]) -> Option<Decimal> {
    if events.is_empty() {
        request.amount.checked_mul(Decimal::from(request.payment_count))
    } else {
        events
            .iter()
            .try_fold(Decimal::ZERO, |sum, e| sum.checked_add(e.amount))
    }
}

fn overflow(what: &str) -> CoreError {
    CoreError::ValidationError {
        message: format!("Seed data overflows {}", what),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;
    use chrono::NaiveDate;

    fn request(id: &str, amount: Decimal, payment_count: u32) -> PaymentRequest {
        PaymentRequest {
            id: id.to_string(),
            amount,
            description: format!("Request {}", id),
            status: PaymentStatus::Paid,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            link: format!("https://velto.app/pay/{}", id),
            payment_count,
        }
    }

    fn event(id: &str, amount: Decimal) -> PaymentEvent {
        PaymentEvent {
            id: id.to_string(),
            paid_by: "Alice Johnson".to_string(),
            amount,
            paid_at: "2024-01-16T10:30:00Z".parse().unwrap(),
            payment_id: format!("pi_{}", id),
        }
    }

    #[test]
    fn test_sample_store() {
        let store = RequestStore::sample().unwrap();
        assert_eq!(store.len(), 5);
        let ids: Vec<&str> = store.all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

        let first = store.get("1").unwrap();
        assert_eq!(first.amount, Decimal::new(15000, 2));
        assert_eq!(first.description, "Website design project - First milestone payment");
        assert_eq!(first.created_at, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(store.get("4").unwrap().status, PaymentStatus::Expired);
    }

    #[test]
    fn test_sample_ledger_matches_payment_counts() {
        let store = RequestStore::sample().unwrap();
        for request in store.all() {
            let events = store.payments(&request.id);
            if !events.is_empty() {
                assert_eq!(events.len(), request.payment_count as usize);
            }
        }

        let events = store.payments("1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].paid_by, "Alice Johnson");
        assert_eq!(events[0].payment_id, "pi_abc123");

        let coffee = store.get("5").unwrap();
        assert_eq!(store.payments("5").len(), 3);
        assert_eq!(store.total_settled(coffee), Decimal::new(7500, 2));
    }

    #[test]
    fn test_total_settled_without_ledger() {
        let store = RequestStore::new(vec![request("9", Decimal::new(1000, 2), 2)], HashMap::new())
            .unwrap();
        let req = store.get("9").unwrap();
        assert_eq!(store.total_settled(req), Decimal::new(2000, 2));
        assert!(store.payments("9").is_empty());
    }

    #[test]
    fn test_rejects_inconsistent_ledger() {
        let mut payments = HashMap::new();
        payments.insert(
            "1".to_string(),
            vec![event("a", Decimal::ONE), event("b", Decimal::ONE)],
        );
        let err = RequestStore::new(vec![request("1", Decimal::ONE, 1)], payments).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InconsistentLedger { recorded: 1, events: 2, .. }
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = RequestStore::new(
            vec![request("1", Decimal::ONE, 0), request("1", Decimal::TEN, 0)],
            HashMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateEntry { .. }));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let err = RequestStore::new(vec![request("1", Decimal::ZERO, 0)], HashMap::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError { .. }));
    }

    #[test]
    fn test_rejects_amounts_whose_total_overflows() {
        let yaml = r#"
requests:
  - id: "1"
    amount: "79228162514264337593543950335"
    description: Everything
    status: paid
    created_at: 2024-02-01
    link: https://velto.app/pay/max
    payment_count: 0
  - id: "2"
    amount: "1"
    description: One more
    status: paid
    created_at: 2024-02-01
    link: https://velto.app/pay/one
    payment_count: 0
"#;
        let err = RequestStore::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError { ref message } if message.contains("total requested")));
    }

    #[test]
    fn test_rejects_settled_amount_overflow() {
        let err = RequestStore::new(vec![request("1", Decimal::MAX, 2)], HashMap::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError { ref message } if message.contains("settled amount")));
    }

    #[test]
    fn test_rejects_non_positive_payment() {
        let mut payments = HashMap::new();
        payments.insert("1".to_string(), vec![event("a", Decimal::new(-1, 0))]);
        let err = RequestStore::new(vec![request("1", Decimal::ONE, 1)], payments).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError { .. }));
    }

    #[test]
    fn test_rejects_payments_for_unknown_request() {
        let mut payments = HashMap::new();
        payments.insert("42".to_string(), vec![event("a", Decimal::ONE)]);
        let err = RequestStore::new(vec![request("1", Decimal::ONE, 1)], payments).unwrap_err();
        assert!(matches!(err, CoreError::RequestNotFound { ref id } if id == "42"));
    }

    #[test]
    fn test_from_yaml_seed() {
        let yaml = r#"
requests:
  - id: lunch
    amount: "12.50"
    description: Team lunch
    status: pending
    created_at: 2024-02-01
    link: https://velto.app/pay/lunch1
    payment_count: 0
"#;
        let store = RequestStore::from_yaml(yaml).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.require("lunch").unwrap().amount, Decimal::new(1250, 2));
        assert!(matches!(
            store.require("missing"),
            Err(CoreError::RequestNotFound { .. })
        ));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_status() {
        let yaml = r#"
requests:
  - id: "1"
    amount: "1.00"
    description: Something
    status: refunded
    created_at: 2024-02-01
    link: https://velto.app/pay/x
    payment_count: 0
"#;
        assert!(matches!(
            RequestStore::from_yaml(yaml),
            Err(CoreError::SeedError { .. })
        ));
    }

    #[test]
    fn test_missing_seed_file() {
        let err = RequestStore::from_seed_file(Path::new("/nonexistent/velto-seed.yaml"))
            .unwrap_err();
        assert!(matches!(err, CoreError::SeedError { .. }));
    }
}
