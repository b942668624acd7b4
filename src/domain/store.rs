use {
    super::error::ReconcileError,
    super::order::{NewOrder, Order},
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

pub type StoreFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ReconcileError>> + Send + 'a>>;

pub trait UserStore: Send + Sync {
    /// Resolve a user id by email, creating the record if none exists.
    /// Must be atomic: two concurrent calls for the same new email yield
    /// the same id, never two rows.
    fn get_or_create(&self, email: &str, name: &str) -> StoreFuture<'_, Uuid>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum OrderInsert {
    /// Ids of the rows that actually landed. A concurrent delivery may have
    /// inserted some of the same rows first; callers must only act on the
    /// ids returned here.
    Inserted(Vec<Uuid>),
    /// No rows landed: orders under this payment reference already exist.
    /// The storage layer enforces this with a uniqueness constraint, so a
    /// lost race surfaces here rather than as duplicate rows.
    DuplicateReference,
}

pub trait OrderStore: Send + Sync {
    fn find_by_payment_reference(&self, reference: &str) -> StoreFuture<'_, Vec<Order>>;

    /// Insert all orders of one payment as a unit.
    fn insert_orders(&self, orders: &[NewOrder]) -> StoreFuture<'_, OrderInsert>;
}

pub trait InventoryStore: Send + Sync {
    /// Atomic check-and-subtract: fails with `InsufficientStock` when the
    /// variant holds less than `quantity`; never writes a negative stock.
    fn reduce_stock(&self, variant_id: i64, quantity: i64) -> StoreFuture<'_, ()>;
}
