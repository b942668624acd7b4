pub mod order_repo;
pub mod user_repo;
pub mod variant_repo;
