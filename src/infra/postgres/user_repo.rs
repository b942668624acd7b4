use {
    crate::domain::store::{StoreFuture, UserStore},
    sqlx::PgPool,
    uuid::Uuid,
};

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    fn get_or_create(&self, email: &str, name: &str) -> StoreFuture<'_, Uuid> {
        let email = email.to_string();
        let name = name.to_string();
        Box::pin(async move {
            // Upsert with a no-op update so RETURNING yields the existing
            // row's id; single round trip, safe under concurrent calls.
            let id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO users (id, email, name)
                VALUES ($1, $2, $3)
                ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
                RETURNING id
                "#,
            )
            .bind(Uuid::now_v7())
            .bind(&email)
            .bind(&name)
            .fetch_one(&self.pool)
            .await?;

            Ok(id)
        })
    }
}
