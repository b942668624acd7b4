use {
    super::{error::ReconcileError, payment::PaymentStatus},
    chrono::{DateTime, Utc},
    derive_more::Display,
    uuid::Uuid,
};

/// Lifecycle advanced only by admin action; the reconciler always creates
/// orders as `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum OrderStatus {
    #[display("pending")]
    Pending,
    #[display("shipped")]
    Shipped,
    #[display("delivered")]
    Delivered,
}

impl TryFrom<&str> for OrderStatus {
    type Error = ReconcileError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            other => Err(ReconcileError::Validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// For INSERT. The id is generated in Rust via `Uuid::now_v7()`.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: i64,
    pub delivery: bool,
    pub payment_reference: String,
}

/// Full order record from the store (for reads).
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: i64,
    pub delivery: bool,
    pub status: OrderStatus,
    pub purchased_at: DateTime<Utc>,
    /// Dedup key; nullable because legacy orders predate it.
    pub payment_reference: Option<String>,
}

/// What one notification amounted to.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// Resource kind is not "payment"; acknowledged, no side effects.
    NotPayment { topic: String },
    /// Sentinel id from the provider's webhook test tool.
    Test,
    /// Provider has no payment under this id (test ping for a ghost id).
    PaymentNotFound,
    /// Payment exists but is not approved; no orders, no stock movement.
    NotApproved { status: PaymentStatus },
    /// Orders for this payment reference already exist (redelivery).
    Duplicate,
    /// Orders created and stock decremented.
    Processed { orders_created: usize },
}
