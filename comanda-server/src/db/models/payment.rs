//! Payment Model
//!
//! 一单一付：payment.order_id 上的 UNIQUE 索引保证。
//! 创建后不再修改或删除。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Payment record, created exactly once per order at settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Settled order ("order:xyz"); UNIQUE indexed
    pub order_id: String,
    pub order_number: String,
    pub method_id: String,
    pub method_name: String,
    /// Copied from the order total at finalization, immutable thereafter
    pub amount: Decimal,
    pub paid_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashier_id: Option<String>,
    pub cashier_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
