//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog (read-only from the order core's perspective)
pub mod dining_table;
pub mod payment_method;
pub mod product;

// Orders
pub mod order;
pub mod payment;

// Re-exports
pub use dining_table::DiningTable;
pub use order::{Order, OrderLine};
pub use payment::Payment;
pub use payment_method::PaymentMethod;
pub use product::Product;
