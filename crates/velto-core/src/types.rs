//! Basic types for payment requests

use serde::{Deserialize, Serialize};

/// Payment request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Settled at least once
    Paid,
    /// Shared, waiting for payment
    Pending,
    /// Link no longer accepts payments
    Expired,
    /// Payment attempt rejected by the processor
    Failed,
}

impl PaymentStatus {
    /// Every status, in display order
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Paid,
        PaymentStatus::Pending,
        PaymentStatus::Expired,
        PaymentStatus::Failed,
    ];

    /// Badge label
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Not paid yet",
            PaymentStatus::Expired => "Expired",
            PaymentStatus::Failed => "Failed",
        }
    }

    /// Label of the matching search filter chip
    pub fn filter_label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Not paid",
            PaymentStatus::Expired => "Expired",
            PaymentStatus::Failed => "Failed",
        }
    }

    /// Visual treatment of the badge
    pub fn treatment(&self) -> StatusTreatment {
        match self {
            PaymentStatus::Paid => StatusTreatment::Success,
            PaymentStatus::Pending => StatusTreatment::Warning,
            PaymentStatus::Expired => StatusTreatment::Muted,
            PaymentStatus::Failed => StatusTreatment::Destructive,
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "pending" => Ok(PaymentStatus::Pending),
            "expired" => Ok(PaymentStatus::Expired),
            "failed" => Ok(PaymentStatus::Failed),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Expired => write!(f, "expired"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Visual treatment of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTreatment {
    Success,
    Warning,
    Muted,
    Destructive,
}

/// Status filter of the search view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PaymentStatus),
}

impl StatusFilter {
    /// Check whether a status passes the filter
    pub fn matches(&self, status: PaymentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// Chip label
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.filter_label(),
        }
    }

    /// Filters offered by the search view, in chip order
    pub fn choices() -> Vec<StatusFilter> {
        vec![
            StatusFilter::All,
            StatusFilter::Only(PaymentStatus::Pending),
            StatusFilter::Only(PaymentStatus::Paid),
            StatusFilter::Only(PaymentStatus::Expired),
            StatusFilter::Only(PaymentStatus::Failed),
        ]
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<PaymentStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| format!("Invalid status filter: {}", s))
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}
