//! Payment request creation
//!
//! Creating a request only hands out a fresh payment link after a simulated
//! round-trip; the request store is never written.

use std::time::Duration;

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use velto_config::RequestsConfig;

use crate::error::{CoreError, CoreResult};

const CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Form input of the creation flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPaymentRequest {
    pub amount: Decimal,
    pub description: String,
}

impl NewPaymentRequest {
    /// Check the input before any link is generated
    ///
    /// Amounts finer than the currency's `decimal_places` are rejected so
    /// that what is shown is exactly what is requested.
    pub fn validate(&self, decimal_places: u32) -> CoreResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(CoreError::ValidationError {
                message: "Amount must be greater than 0".to_string(),
            });
        }
        if self.amount.normalize().scale() > decimal_places {
            return Err(CoreError::ValidationError {
                message: format!("Amount can have at most {} decimal places", decimal_places),
            });
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::ValidationError {
                message: "Description is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Result of a successful creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedRequest {
    pub amount: Decimal,
    pub description: String,
    pub link: String,
}

/// Generates payment links for new requests
#[derive(Debug, Clone)]
pub struct RequestCreator {
    link_base_url: String,
    code_length: usize,
    latency: Duration,
    decimal_places: u32,
}

impl RequestCreator {
    pub fn new(config: &RequestsConfig) -> Self {
        Self {
            link_base_url: config.link_base_url.clone(),
            code_length: config.link_code_length,
            latency: Duration::from_millis(config.creation_latency_ms),
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }

    /// Precision of the currency amounts are requested in
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Override the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Validate, wait out the simulated latency and hand out a link.
    ///
    /// Dropping the returned future before it completes abandons the
    /// creation without side effects.
    pub async fn create(&self, input: NewPaymentRequest) -> CoreResult<CreatedRequest> {
        input.validate(self.decimal_places)?;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let link = format!("{}{}", self.link_base_url, self.generate_code());
        log::debug!("Generated payment link {}", link);

        Ok(CreatedRequest {
            amount: input.amount,
            description: input.description.trim().to_string(),
            link,
        })
    }

    /// Random lowercase base-36 code
    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.code_length)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }
}
