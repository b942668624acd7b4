pub mod coerce;
pub mod error;
pub mod metadata;
pub mod notification;
pub mod order;
pub mod payment;
pub mod provider;
pub mod store;
