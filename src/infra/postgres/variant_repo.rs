use {
    crate::domain::error::ReconcileError,
    crate::domain::store::{InventoryStore, StoreFuture},
    sqlx::PgPool,
};

pub struct PgVariantStore {
    pool: PgPool,
}

impl PgVariantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl InventoryStore for PgVariantStore {
    fn reduce_stock(&self, variant_id: i64, quantity: i64) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            // Single conditional update; two concurrent buyers of the last
            // unit cannot both match `stock >= quantity`.
            let affected = sqlx::query(
                "UPDATE product_variants SET stock = stock - $2 WHERE id = $1 AND stock >= $2",
            )
            .bind(variant_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?
            .rows_affected();

            if affected == 1 {
                return Ok(());
            }

            // Zero rows: missing variant or not enough stock. The follow-up
            // read is only for the error message.
            let stock: Option<i64> =
                sqlx::query_scalar("SELECT stock FROM product_variants WHERE id = $1")
                    .bind(variant_id)
                    .fetch_optional(&self.pool)
                    .await?;

            match stock {
                None => Err(ReconcileError::VariantNotFound(variant_id)),
                Some(available) => Err(ReconcileError::InsufficientStock {
                    variant_id,
                    requested: quantity,
                    available,
                }),
            }
        })
    }
}
