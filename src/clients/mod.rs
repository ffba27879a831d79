//! Typed clients, one per resource family.

#[macro_use]
mod macros;

mod customer_client;
mod product_client;
mod refund_client;

pub use customer_client::CustomerClient;
pub use product_client::ProductClient;
pub use refund_client::RefundClient;
