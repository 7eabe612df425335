//! Response views
//!
//! Shapes returned to clients, with display names resolved from the
//! snapshots stored on the aggregates (no joins at read time).

use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::models::{Order, OrderLine, Payment};
use crate::orders::OrderStatus;

/// Full order view for every role's screen
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: String,
    pub number: String,
    pub table_id: String,
    pub table_number: String,
    /// Display name of the creating actor ("Cliente" for table-side orders)
    pub created_by: String,
    pub status: OrderStatus,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub lines: Vec<LineView>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<i64>,
}

/// One order line as shown to clients
#[derive(Debug, Clone, Serialize)]
pub struct LineView {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

/// Payment view returned by the finalizer and the payment queries
#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    pub id: String,
    pub order_id: String,
    pub order_number: String,
    pub method_id: String,
    pub method_name: String,
    pub amount: Decimal,
    pub paid_at: i64,
    pub cashier_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Daily order report (admin)
#[derive(Debug, Clone, Serialize)]
pub struct DailyOrderReport {
    pub date: String,
    pub total_orders: usize,
    pub open_orders: usize,
    pub ready_orders: usize,
    pub settled_orders: usize,
    /// Sum of totals over settled orders
    pub total_sales: Decimal,
    pub orders: Vec<OrderView>,
}

impl From<OrderLine> for LineView {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal,
            note: line.note,
            completed: line.completed,
            completed_at: line.completed_at,
        }
    }
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let id = order.id_string();
        Self {
            id,
            number: order.number,
            table_id: order.table_id,
            table_number: order.table_number,
            created_by: order.creator_name,
            status: order.status,
            total: order.total,
            note: order.note,
            lines: order.lines.into_iter().map(LineView::from).collect(),
            created_at: order.created_at,
            ready_at: order.ready_at,
            settled_at: order.settled_at,
        }
    }
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            order_id: payment.order_id,
            order_number: payment.order_number,
            method_id: payment.method_id,
            method_name: payment.method_name,
            amount: payment.amount,
            paid_at: payment.paid_at,
            cashier_name: payment.cashier_name,
            note: payment.note,
        }
    }
}
