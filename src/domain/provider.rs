use {
    super::error::ReconcileError,
    super::metadata::CheckoutRequest,
    super::payment::PaymentStatus,
    std::{future::Future, pin::Pin},
};

/// Authoritative payment state fetched from the provider API. Metadata and
/// items stay as raw JSON here; the reconciler owns their validation.
#[derive(Debug, Clone)]
pub struct FetchedPayment {
    pub status: PaymentStatus,
    pub metadata: Option<serde_json::Value>,
    pub items: Vec<serde_json::Value>,
}

/// "Not found" is a first-class answer, not an error: the provider sends
/// test pings for ids that don't exist, and hard-failing would make it
/// retry forever.
#[derive(Debug, Clone)]
pub enum PaymentLookup {
    Found(FetchedPayment),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub redirect_url: String,
}

pub trait PaymentProvider: Send + Sync {
    fn get_payment(
        &self,
        id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentLookup, ReconcileError>> + Send + '_>>;

    fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CheckoutSession, ReconcileError>> + Send + '_>>;
}
