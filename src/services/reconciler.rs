use {
    crate::domain::error::ReconcileError,
    crate::domain::metadata::{CheckoutMetadata, DELIVERY_FEE_ITEM_ID},
    crate::domain::notification::{Notification, NotificationKind, is_test_id},
    crate::domain::order::{NewOrder, ReconcileOutcome},
    crate::domain::payment::{PaymentItem, PaymentStatus},
    crate::domain::provider::{PaymentLookup, PaymentProvider},
    crate::domain::store::{InventoryStore, OrderInsert, OrderStore, UserStore},
    std::{collections::HashSet, sync::Arc},
    uuid::Uuid,
};

/// Turns an inbound, untrusted, possibly-duplicate payment notification
/// into durable order and inventory state, exactly once per real payment.
/// All collaborators are injected so tests can substitute fakes.
#[derive(Clone)]
pub struct Reconciler {
    provider: Arc<dyn PaymentProvider>,
    users: Arc<dyn UserStore>,
    orders: Arc<dyn OrderStore>,
    inventory: Arc<dyn InventoryStore>,
}

impl Reconciler {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        users: Arc<dyn UserStore>,
        orders: Arc<dyn OrderStore>,
        inventory: Arc<dyn InventoryStore>,
    ) -> Self {
        Self {
            provider,
            users,
            orders,
            inventory,
        }
    }

    pub async fn reconcile(
        &self,
        notification: &Notification,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let payment_id = match &notification.kind {
            NotificationKind::Payment => notification.resource_id.as_str(),
            other => {
                return Ok(ReconcileOutcome::NotPayment {
                    topic: other.as_str().to_string(),
                });
            }
        };

        if is_test_id(payment_id) {
            return Ok(ReconcileOutcome::Test);
        }

        let payment = match self.provider.get_payment(payment_id).await? {
            PaymentLookup::Found(payment) => payment,
            PaymentLookup::NotFound => return Ok(ReconcileOutcome::PaymentNotFound),
        };

        if payment.status != PaymentStatus::Approved {
            return Ok(ReconcileOutcome::NotApproved {
                status: payment.status,
            });
        }

        // An approved payment without items or metadata means checkout
        // construction is broken upstream; surface it, don't swallow it.
        if payment.items.is_empty() {
            return Err(ReconcileError::Validation(format!(
                "approved payment {payment_id} has no line items"
            )));
        }
        let metadata_value = payment.metadata.as_ref().ok_or_else(|| {
            ReconcileError::Validation(format!("approved payment {payment_id} has no metadata"))
        })?;

        // Idempotency pre-check. The uniqueness constraint in the order
        // store backstops the race between this read and the insert below.
        if !self
            .orders
            .find_by_payment_reference(payment_id)
            .await?
            .is_empty()
        {
            tracing::info!(payment_id, "payment already processed, skipping");
            return Ok(ReconcileOutcome::Duplicate);
        }

        let metadata = CheckoutMetadata::from_value(metadata_value)?;

        // The delivery fee travels as a pseudo-item; split it off before
        // validating the product lines.
        let line_items: Vec<PaymentItem> = payment
            .items
            .iter()
            .filter(|v| v.get("id").and_then(|id| id.as_str()) != Some(DELIVERY_FEE_ITEM_ID))
            .map(PaymentItem::from_value)
            .collect::<Result<_, _>>()?;

        if line_items.is_empty() {
            return Err(ReconcileError::Validation(format!(
                "approved payment {payment_id} has no product line items"
            )));
        }

        let name = metadata.email.split('@').next().unwrap_or_default();
        let user_id = self.users.get_or_create(&metadata.email, name).await?;

        let mut new_orders = Vec::with_capacity(line_items.len());
        let mut seen_products = HashSet::with_capacity(line_items.len());
        for item in &line_items {
            let product_id: i64 = item.id.parse().map_err(|_| {
                ReconcileError::Validation(format!("line item id is not a product id: {}", item.id))
            })?;

            // The metadata keys variants by product id, so a second line for
            // the same product is ambiguous and cannot be reconciled.
            if !seen_products.insert(product_id) {
                return Err(ReconcileError::Validation(format!(
                    "payment {payment_id} has multiple line items for product {product_id}"
                )));
            }

            // Variants are matched by product id, not by position; the
            // provider does not preserve item order.
            let variant_id = metadata
                .variants
                .iter()
                .find(|v| v.product_id == product_id)
                .map(|v| v.variant_id)
                .filter(|&id| id > 0);

            new_orders.push(NewOrder {
                id: Uuid::now_v7(),
                user_id,
                product_id,
                variant_id,
                quantity: i64::from(item.quantity),
                delivery: metadata.delivery,
                payment_reference: payment_id.to_string(),
            });
        }

        match self.orders.insert_orders(&new_orders).await? {
            OrderInsert::DuplicateReference => {
                tracing::info!(payment_id, "lost insert race to a concurrent delivery");
                Ok(ReconcileOutcome::Duplicate)
            }
            OrderInsert::Inserted(inserted_ids) => {
                // Orders are the source of truth that a sale happened; stock
                // is a secondary count. A shortfall on one variant must not
                // abort siblings or the request. Rows a concurrent delivery
                // inserted first are its to decrement, not ours.
                for order in new_orders.iter().filter(|o| inserted_ids.contains(&o.id)) {
                    let Some(variant_id) = order.variant_id else {
                        continue;
                    };
                    if let Err(e) = self.inventory.reduce_stock(variant_id, order.quantity).await {
                        tracing::warn!(
                            payment_id,
                            variant_id,
                            quantity = order.quantity,
                            error = %e,
                            "stock decrement failed, order kept"
                        );
                    }
                }

                let orders_created = inserted_ids.len();
                tracing::info!(payment_id, orders_created, "payment reconciled");
                Ok(ReconcileOutcome::Processed { orders_created })
            }
        }
    }
}
