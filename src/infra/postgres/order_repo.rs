use {
    crate::domain::order::{NewOrder, Order, OrderStatus},
    crate::domain::store::{OrderInsert, OrderStore, StoreFuture},
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type OrderRow = (
    Uuid,
    Uuid,
    i64,
    Option<i64>,
    i64,
    bool,
    String,
    DateTime<Utc>,
    Option<String>,
);

fn order_from_row(row: OrderRow) -> Result<Order, crate::domain::error::ReconcileError> {
    let (id, user_id, product_id, variant_id, quantity, delivery, status, purchased_at, reference) =
        row;
    Ok(Order {
        id,
        user_id,
        product_id,
        variant_id,
        quantity,
        delivery,
        status: OrderStatus::try_from(status.as_str())?,
        purchased_at,
        payment_reference: reference,
    })
}

impl OrderStore for PgOrderStore {
    fn find_by_payment_reference(&self, reference: &str) -> StoreFuture<'_, Vec<Order>> {
        let reference = reference.to_string();
        Box::pin(async move {
            let rows: Vec<OrderRow> = sqlx::query_as(
                r#"
                SELECT id, user_id, product_id, variant_id, quantity,
                       delivery, status, purchased_at, payment_reference
                FROM orders
                WHERE payment_reference = $1
                "#,
            )
            .bind(&reference)
            .fetch_all(&self.pool)
            .await?;

            rows.into_iter().map(order_from_row).collect()
        })
    }

    fn insert_orders(&self, orders: &[NewOrder]) -> StoreFuture<'_, OrderInsert> {
        let orders = orders.to_vec();
        Box::pin(async move {
            if orders.is_empty() {
                return Ok(OrderInsert::Inserted(Vec::new()));
            }

            let mut tx = self.pool.begin().await?;
            let mut inserted = Vec::with_capacity(orders.len());

            // The partial unique index on (payment_reference, product_id)
            // turns a concurrent duplicate delivery into a conflict instead
            // of duplicate rows; RETURNING yields nothing for those, so
            // `inserted` holds exactly the rows this call owns.
            for order in &orders {
                let id: Option<Uuid> = sqlx::query_scalar(
                    r#"
                    INSERT INTO orders
                        (id, user_id, product_id, variant_id, quantity,
                         delivery, status, payment_reference)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    ON CONFLICT (payment_reference, product_id)
                        WHERE payment_reference IS NOT NULL
                        DO NOTHING
                    RETURNING id
                    "#,
                )
                .bind(order.id)
                .bind(order.user_id)
                .bind(order.product_id)
                .bind(order.variant_id)
                .bind(order.quantity)
                .bind(order.delivery)
                .bind(OrderStatus::Pending.to_string())
                .bind(&order.payment_reference)
                .fetch_optional(&mut *tx)
                .await?;

                if let Some(id) = id {
                    inserted.push(id);
                }
            }

            tx.commit().await?;

            if inserted.is_empty() {
                return Ok(OrderInsert::DuplicateReference);
            }
            if inserted.len() < orders.len() {
                tracing::warn!(
                    reference = %orders[0].payment_reference,
                    inserted = inserted.len(),
                    expected = orders.len(),
                    "partial order insert, some lines already existed"
                );
            }
            Ok(OrderInsert::Inserted(inserted))
        })
    }
}
