//! The checkout metadata contract. This is the only channel carrying
//! variant and delivery intent through the payment provider, so the type
//! serialized at checkout time and the type parsed at webhook time are the
//! same one. Serialization is snake_case because the provider normalizes
//! metadata keys; deserialization also accepts the camelCase keys older
//! checkouts embedded.

use {
    super::{coerce, error::ReconcileError},
    serde::{Deserialize, Serialize},
};

/// Synthetic line item appended when home delivery is chosen. It is not a
/// product and must be separated out before order creation.
pub const DELIVERY_FEE_ITEM_ID: &str = "delivery-fee";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutMetadata {
    pub email: String,
    #[serde(default, deserialize_with = "coerce::bool_lenient")]
    pub delivery: bool,
    #[serde(default)]
    pub variants: Vec<VariantLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantLine {
    #[serde(alias = "productId", deserialize_with = "coerce::i64_lenient")]
    pub product_id: i64,
    /// 0 means the line has no variant (legacy products without SKUs).
    #[serde(alias = "variantId", deserialize_with = "coerce::i64_lenient")]
    pub variant_id: i64,
    #[serde(deserialize_with = "coerce::i64_lenient")]
    pub quantity: i64,
}

impl CheckoutMetadata {
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ReconcileError> {
        let metadata: CheckoutMetadata = serde_json::from_value(value.clone())
            .map_err(|e| ReconcileError::Validation(format!("invalid checkout metadata: {e}")))?;
        if metadata.email.is_empty() {
            return Err(ReconcileError::Validation(
                "checkout metadata has empty email".into(),
            ));
        }
        Ok(metadata)
    }
}

/// One line of the provider checkout preference.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceItem {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// The outbound checkout request: line items plus the metadata blob the
/// provider echoes back on the eventual payment.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub items: Vec<PreferenceItem>,
    pub metadata: CheckoutMetadata,
}
