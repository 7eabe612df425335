//! Product Model
//!
//! Catalog entity; the order core only reads price and availability.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Product entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Current catalog price; order lines snapshot it at creation time
    pub price: Decimal,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_available: bool,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// A product can be ordered only when active and available
    pub fn is_orderable(&self) -> bool {
        self.is_active && self.is_available
    }
}
