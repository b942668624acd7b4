use {
    crate::domain::error::ReconcileError,
    crate::domain::metadata::{
        CheckoutMetadata, CheckoutRequest, DELIVERY_FEE_ITEM_ID, PreferenceItem, VariantLine,
    },
    crate::domain::provider::{CheckoutSession, PaymentProvider},
    serde::Deserialize,
    std::collections::HashSet,
};

/// One cart line as the storefront submits it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub title: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub variant_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    pub items: Vec<CartLine>,
    pub email: String,
    #[serde(default)]
    pub delivery: bool,
    #[serde(default)]
    pub delivery_cost: f64,
}

/// Build the provider checkout request. The metadata produced here is the
/// exact type the webhook reconciler parses back out of the payment.
pub fn build_checkout_request(input: &CheckoutInput) -> Result<CheckoutRequest, ReconcileError> {
    if input.items.is_empty() {
        return Err(ReconcileError::Validation("cart is empty".into()));
    }
    if input.email.is_empty() || !input.email.contains('@') {
        return Err(ReconcileError::Validation(format!(
            "invalid email: {:?}",
            input.email
        )));
    }

    let mut items = Vec::with_capacity(input.items.len() + 1);
    let mut variants = Vec::with_capacity(input.items.len());
    let mut seen_products = HashSet::with_capacity(input.items.len());

    for line in &input.items {
        // The metadata carried through the provider keys variants by product
        // id; a second line for the same product would be irrecoverable on
        // the webhook side. The storefront merges quantities instead.
        if !seen_products.insert(line.product_id) {
            return Err(ReconcileError::Validation(format!(
                "duplicate cart line for product {}",
                line.product_id
            )));
        }
        if line.quantity == 0 {
            return Err(ReconcileError::Validation(format!(
                "zero quantity for product {}",
                line.product_id
            )));
        }
        if !line.unit_price.is_finite() || line.unit_price < 0.0 {
            return Err(ReconcileError::Validation(format!(
                "invalid unit price for product {}",
                line.product_id
            )));
        }

        items.push(PreferenceItem {
            id: line.product_id.to_string(),
            title: line.title.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        });
        variants.push(VariantLine {
            product_id: line.product_id,
            variant_id: line.variant_id.unwrap_or(0),
            quantity: i64::from(line.quantity),
        });
    }

    // The provider's line-item schema has no delivery concept, so the fee
    // rides along as a pseudo-item the reconciler filters back out.
    if input.delivery && input.delivery_cost > 0.0 {
        items.push(PreferenceItem {
            id: DELIVERY_FEE_ITEM_ID.to_string(),
            title: "Delivery fee".to_string(),
            quantity: 1,
            unit_price: input.delivery_cost,
        });
    }

    Ok(CheckoutRequest {
        items,
        metadata: CheckoutMetadata {
            email: input.email.clone(),
            delivery: input.delivery,
            variants,
        },
    })
}

pub async fn create_checkout_session(
    provider: &dyn PaymentProvider,
    input: &CheckoutInput,
) -> Result<CheckoutSession, ReconcileError> {
    let request = build_checkout_request(input)?;
    let session = provider.create_checkout(&request).await?;
    tracing::info!(
        email = %input.email,
        items = request.items.len(),
        delivery = input.delivery,
        "checkout session created"
    );
    Ok(session)
}
