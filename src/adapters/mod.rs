pub mod api_errors;
pub mod checkout;
pub mod mercadopago;
pub mod webhook;
