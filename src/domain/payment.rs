use {
    super::{coerce, error::ReconcileError},
    derive_more::Display,
    serde::Deserialize,
};

/// Mercado Pago payment lifecycle. Only `Approved` triggers reconciliation;
/// everything else, including statuses we have never seen, is acknowledged
/// without side effects, so unknown strings fold to `Unknown` instead of
/// failing the request.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PaymentStatus {
    #[display("approved")]
    Approved,
    #[display("pending")]
    Pending,
    #[display("authorized")]
    Authorized,
    #[display("in_process")]
    InProcess,
    #[display("in_mediation")]
    InMediation,
    #[display("rejected")]
    Rejected,
    #[display("cancelled")]
    Cancelled,
    #[display("refunded")]
    Refunded,
    #[display("charged_back")]
    ChargedBack,
    #[display("unknown")]
    Unknown,
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "pending" => Self::Pending,
            "authorized" => Self::Authorized,
            "in_process" => Self::InProcess,
            "in_mediation" => Self::InMediation,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "refunded" => Self::Refunded,
            "charged_back" => Self::ChargedBack,
            _ => Self::Unknown,
        }
    }
}

/// One purchased line item off the payment's `additional_info`. Quantities
/// and prices arrive stringified in some notification variants.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentItem {
    #[serde(deserialize_with = "coerce::string_lenient")]
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "coerce::u32_lenient")]
    pub quantity: u32,
    #[serde(deserialize_with = "coerce::f64_lenient")]
    pub unit_price: f64,
}

impl PaymentItem {
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ReconcileError> {
        let item: Self = serde_json::from_value(value.clone())
            .map_err(|e| ReconcileError::Validation(format!("invalid line item: {e}")))?;
        // Orders carry a positive-quantity constraint; catch it here as a
        // validation failure instead of a storage error.
        if item.quantity == 0 {
            return Err(ReconcileError::Validation(format!(
                "zero quantity for line item {}",
                item.id
            )));
        }
        Ok(item)
    }
}
