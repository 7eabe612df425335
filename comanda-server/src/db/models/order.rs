//! Order Model
//!
//! 订单聚合根：行项内嵌在订单记录中，整单是加锁和替换的单位。
//! 所有时间戳为 Unix millis，金额为两位小数的定点数。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::orders::OrderStatus;

/// One product-quantity entry within an order.
///
/// `unit_price` and `subtotal` are snapshots taken when the line is
/// created; later catalog price changes never touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Line instance id (uuid), stable across order edits only if the
    /// line survives them — a full replace discards old ids
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

/// Order aggregate root.
///
/// Permanent audit record: orders are never deleted, only moved forward
/// through `OrderStatus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Daily-scoped human-readable number, e.g. `ORD-20250807-001`
    pub number: String,
    pub table_id: String,
    pub table_number: String,
    /// Creating actor; `None` means a table-side customer placed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub creator_name: String,
    pub status: OrderStatus,
    /// Invariant: always equals the sum of line subtotals
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub lines: Vec<OrderLine>,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<i64>,
}

impl Order {
    /// Id as "order:xyz" string; empty before the record is persisted
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    pub fn all_lines_completed(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| l.completed)
    }

    pub fn any_line_completed(&self) -> bool {
        self.lines.iter().any(|l| l.completed)
    }
}
