use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("payment provider: {0}")]
    Provider(String),

    #[error("insufficient stock for variant {variant_id}: requested {requested}, available {available}")]
    InsufficientStock {
        variant_id: i64,
        requested: i64,
        available: i64,
    },

    #[error("variant not found: {0}")]
    VariantNotFound(i64),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
