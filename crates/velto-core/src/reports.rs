//! Report structures for API responses

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{PaymentEvent, PaymentRequest};
use super::types::PaymentStatus;

/// Aggregate statistics shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestStats {
    /// Sum of all request amounts
    pub total_requested: Decimal,
    /// Sum of amounts of paid requests
    pub total_received: Decimal,
    /// Number of requests waiting for payment
    pub pending_count: usize,
    pub request_count: usize,
    pub by_status: BTreeMap<PaymentStatus, usize>,
}

impl RequestStats {
    /// Compute statistics over a set of requests
    pub fn compute(records: &[PaymentRequest]) -> Self {
        let mut by_status = BTreeMap::new();
        let mut total_requested = Decimal::ZERO;
        let mut total_received = Decimal::ZERO;

        for record in records {
            total_requested = total_requested.saturating_add(record.amount);
            if record.status == PaymentStatus::Paid {
                total_received = total_received.saturating_add(record.amount);
            }
            *by_status.entry(record.status).or_insert(0) += 1;
        }

        Self {
            total_requested,
            total_received,
            pending_count: by_status.get(&PaymentStatus::Pending).copied().unwrap_or(0),
            request_count: records.len(),
            by_status,
        }
    }

    /// Number of requests with the given status
    pub fn count(&self, status: PaymentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Requests list response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestsResponse {
    pub requests: Vec<PaymentRequest>,
    pub total_count: usize,
    pub query: String,
    pub status: String,
}

/// Request detail response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDetailResponse {
    pub request: PaymentRequest,
    pub payments: Vec<PaymentEvent>,
    pub total_settled: Decimal,
    pub settlement_summary: String,
}
