use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The hosted-checkout link for a pending payment. `payment_id` is the
/// backend's key for the new pending payment row; some backend versions
/// omit it, which the reconciler treats as a malformed link.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CheckoutLink {
    pub checkout_url: String,
    #[serde(default)]
    pub payment_id: Option<i64>,
}

/// Wire wrapper for `GET payment/{id}/status`.
#[derive(Serialize, Deserialize, Debug)]
pub struct PaymentStatusResponse {
    pub status: String,
}

/// One row of payment history. Immutable, server-owned.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PaymentRecord {
    pub id: i64,
    pub amount: f64,
    pub status: String,
    /// ISO-8601 timestamp as sent by the backend.
    pub created_at: String,
}

impl PaymentRecord {
    /// The creation timestamp parsed from its wire form, if well-formed.
    pub fn created_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }
}

/// Response of `POST payment/create` (direct payment record creation).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreatePaymentResponse {
    pub payment_id: i64,
    pub square_id: String,
    pub status: String,
}
