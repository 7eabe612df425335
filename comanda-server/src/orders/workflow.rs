//! OrderWorkflow - the single mutation path over orders
//!
//! 所有订单变更都经过这里：创建、改单、出餐标记、收款。
//! 每个订单一把异步锁，读-判-写永远发生在同一锁区间内；
//! 两个唯一索引 (order.number / payment.order_id) 兜底并发正确性。
//!
//! 时间永远由调用方注入 (`now`)，工作流内部不读系统时钟。

use chrono::DateTime;
use chrono::NaiveDate;
use chrono_tz::Tz;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::error::{OrderError, OrderResult};
use super::money;
use super::number;
use super::status::OrderStatus;
use super::view::{DailyOrderReport, OrderView, PaymentView};
use crate::auth::{CurrentUser, Role};
use crate::db::models::{DiningTable, Order, OrderLine, Payment, PaymentMethod, Product};
use crate::db::repository::{
    DiningTableRepository, OrderRepository, PaymentMethodRepository, PaymentRepository,
    ProductRepository, RepoError,
};
use crate::utils::validation::MAX_LINE_QUANTITY;

/// Display name recorded when a table-side customer places the order
const CUSTOMER_DISPLAY_NAME: &str = "Cliente";

/// One requested line in a create/revise call
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LineInput {
    pub product_id: String,
    pub quantity: i32,
    #[serde(default)]
    pub note: Option<String>,
}

/// Create-order command input
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub table_id: String,
    pub note: Option<String>,
    pub lines: Vec<LineInput>,
}

/// Order workflow service
///
/// Shared once per process (`Arc` in ServerState). The lock map entry for
/// an order is dropped when the order settles.
pub struct OrderWorkflow {
    db: Surreal<Db>,
    /// Per-order mutation locks
    locks: DashMap<String, Arc<Mutex<()>>>,
    /// Serializes order-number allocation + insert
    allocation_lock: Mutex<()>,
}

impl OrderWorkflow {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            db,
            locks: DashMap::new(),
            allocation_lock: Mutex::new(()),
        }
    }

    fn order_lock(&self, order_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(order_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // ========================================================================
    // Creation / revision
    // ========================================================================

    /// Create an order in Pending state.
    ///
    /// Role only decides how the creator is recorded: a customer order has
    /// no creator reference and shows as "Cliente".
    pub async fn create_order(
        &self,
        actor: &CurrentUser,
        input: CreateOrderInput,
        now: DateTime<Tz>,
    ) -> OrderResult<OrderView> {
        let table = self.load_table(&input.table_id).await?;
        let lines = self.build_lines(&input.lines).await?;
        let total = money::order_total(&lines);

        let (created_by, creator_name) = if actor.role == Role::Customer {
            (None, CUSTOMER_DISPLAY_NAME.to_string())
        } else {
            (Some(actor.id.clone()), actor.name.clone())
        };

        let date = now.date_naive();
        let created_at = now.timestamp_millis();
        let repo = OrderRepository::new(self.db.clone());
        let prefix = number::day_prefix(date);

        // Allocation and insert form one critical section; the UNIQUE index
        // on `number` catches whatever still races in (another process on
        // the same store) and we recompute once.
        let _guard = self.allocation_lock.lock().await;
        for attempt in 0..2 {
            let existing = repo.numbers_with_prefix(&prefix).await?;
            let order_number = number::next_order_number(date, &existing);

            let order = Order {
                id: None,
                number: order_number.clone(),
                table_id: input.table_id.clone(),
                table_number: table.number.clone(),
                created_by: created_by.clone(),
                creator_name: creator_name.clone(),
                status: OrderStatus::Pending,
                total,
                note: input.note.clone(),
                lines: lines.clone(),
                created_at,
                ready_at: None,
                settled_at: None,
            };

            match repo.create(order).await {
                Ok(created) => {
                    tracing::info!(
                        number = %created.number,
                        table = %created.table_number,
                        total = %created.total,
                        "Order created"
                    );
                    return Ok(created.into());
                }
                Err(RepoError::Duplicate(_)) if attempt == 0 => {
                    tracing::warn!(number = %order_number, "Order number raced, reallocating");
                    continue;
                }
                Err(RepoError::Duplicate(_)) => {
                    return Err(OrderError::Conflict(format!(
                        "Order number allocation raced twice: {}",
                        order_number
                    )));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(OrderError::Conflict(
            "Order number allocation exhausted retries".to_string(),
        ))
    }

    /// Replace the whole line collection of a Pending order.
    ///
    /// The status check and the replace run under the same order lock, so a
    /// completion racing in between flips the order out of Pending *before*
    /// we look, or *after* we commit — never in the middle.
    pub async fn revise_order(
        &self,
        order_id: &str,
        note: Option<String>,
        lines: Vec<LineInput>,
    ) -> OrderResult<()> {
        let lock = self.order_lock(order_id);
        let _guard = lock.lock().await;

        let repo = OrderRepository::new(self.db.clone());
        let order = self.load_order(&repo, order_id).await?;

        if !order.status.allows_line_edit() {
            return Err(OrderError::InvalidState(format!(
                "Only pending orders can be edited (order {} is {})",
                order.number, order.status
            )));
        }

        let new_lines = self.build_lines(&lines).await?;
        let total = money::order_total(&new_lines);
        let id = record_id(&order)?;
        repo.replace_lines(&id, note, new_lines, total).await?;

        tracing::info!(number = %order.number, total = %total, "Order revised");
        Ok(())
    }

    // ========================================================================
    // Completion aggregation
    // ========================================================================

    /// Toggle a line's completion and re-evaluate the order status.
    ///
    /// Forward transitions only: un-completing a line never pulls an order
    /// back out of Ready or InPreparation — once announced to the cashier
    /// queue, a correction must not hide the order again.
    pub async fn set_line_completion(
        &self,
        line_id: &str,
        completed: bool,
        now: DateTime<Tz>,
    ) -> OrderResult<OrderStatus> {
        let repo = OrderRepository::new(self.db.clone());

        // Locate the owning order first, then re-read it under its lock so
        // two cooks toggling sibling lines serialize their verdicts.
        let owner = repo
            .find_by_line_id(line_id)
            .await?
            .ok_or_else(|| OrderError::LineNotFound(line_id.to_string()))?;
        let order_key = owner.id_string();

        let lock = self.order_lock(&order_key);
        let _guard = lock.lock().await;

        let mut order = self.load_order(&repo, &order_key).await?;

        if !order.status.allows_completion_toggle() {
            return Err(OrderError::InvalidState(format!(
                "Order {} is settled and can no longer change",
                order.number
            )));
        }

        let line = order
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| OrderError::LineNotFound(line_id.to_string()))?;

        line.completed = completed;
        if completed {
            line.completed_at = Some(now.timestamp_millis());
        }

        let mut status = order.status;
        let mut ready_at = order.ready_at;
        if order.all_lines_completed() && order.status.can_transition(OrderStatus::Ready) {
            status = OrderStatus::Ready;
            ready_at = Some(now.timestamp_millis());
        } else if order.any_line_completed() && order.status == OrderStatus::Pending {
            status = OrderStatus::InPreparation;
        }

        let id = record_id(&order)?;
        repo.update_completion(&id, order.lines.clone(), status, ready_at)
            .await?;

        if status != order.status {
            tracing::info!(number = %order.number, from = %order.status, to = %status, "Order advanced");
        }
        Ok(status)
    }

    // ========================================================================
    // Payment finalization
    // ========================================================================

    /// Settle a Ready order with a payment.
    ///
    /// The payment insert and the Settled transition commit in one storage
    /// transaction; the UNIQUE index on `payment.order_id` turns a
    /// duplicate-payment race into AlreadyPaid (a business error — never
    /// retried).
    pub async fn process_payment(
        &self,
        actor: &CurrentUser,
        order_id: &str,
        method_id: &str,
        note: Option<String>,
        now: DateTime<Tz>,
    ) -> OrderResult<PaymentView> {
        let lock = self.order_lock(order_id);
        let _guard = lock.lock().await;

        let orders = OrderRepository::new(self.db.clone());
        let payments = PaymentRepository::new(self.db.clone());
        let order = self.load_order(&orders, order_id).await?;

        match order.status {
            OrderStatus::Ready => {}
            OrderStatus::Settled => return Err(OrderError::AlreadyPaid(order.number.clone())),
            _ => return Err(OrderError::OrderNotReady(order.number.clone())),
        }

        if payments.find_by_order_id(&order.id_string()).await?.is_some() {
            return Err(OrderError::AlreadyPaid(order.number.clone()));
        }

        let method = self.load_payment_method(method_id).await?;

        let payment = Payment {
            id: None,
            order_id: order.id_string(),
            order_number: order.number.clone(),
            method_id: method.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            method_name: method.name.clone(),
            // Captured from the order, not recomputed from the lines
            amount: order.total,
            paid_at: now.timestamp_millis(),
            cashier_id: Some(actor.id.clone()),
            cashier_name: actor.name.clone(),
            note,
        };

        let id = record_id(&order)?;
        let created = payments
            .create_and_settle(payment, &id, now.timestamp_millis())
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => OrderError::AlreadyPaid(order.number.clone()),
                other => OrderError::from(other),
            })?;

        // The order is terminal now; its lock entry can go.
        self.locks.remove(order_id);

        tracing::info!(
            number = %order.number,
            method = %method.name,
            amount = %created.amount,
            "Order settled"
        );
        Ok(created.into())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn get_order(&self, order_id: &str) -> OrderResult<OrderView> {
        let repo = OrderRepository::new(self.db.clone());
        Ok(self.load_order(&repo, order_id).await?.into())
    }

    /// Waiter/cook queue: open orders, oldest first
    pub async fn list_open_orders(&self) -> OrderResult<Vec<OrderView>> {
        let repo = OrderRepository::new(self.db.clone());
        Ok(repo
            .list_open()
            .await?
            .into_iter()
            .map(OrderView::from)
            .collect())
    }

    /// Cashier queue: Ready orders first (oldest ready leading), settled after
    pub async fn list_completed_orders(&self) -> OrderResult<Vec<OrderView>> {
        let repo = OrderRepository::new(self.db.clone());
        let mut orders = repo.list_completed().await?;
        orders.sort_by_key(|o| {
            (
                o.status == OrderStatus::Settled,
                o.ready_at.or(o.settled_at).unwrap_or(o.created_at),
            )
        });
        Ok(orders.into_iter().map(OrderView::from).collect())
    }

    pub async fn get_payment(&self, order_id: &str) -> OrderResult<PaymentView> {
        let payments = PaymentRepository::new(self.db.clone());
        payments
            .find_by_order_id(order_id)
            .await?
            .map(PaymentView::from)
            .ok_or_else(|| OrderError::PaymentNotFound(order_id.to_string()))
    }

    /// Payments inside a `[start, end)` millis window
    pub async fn list_payments_between(&self, start: i64, end: i64) -> OrderResult<Vec<PaymentView>> {
        let payments = PaymentRepository::new(self.db.clone());
        Ok(payments
            .list_between(start, end)
            .await?
            .into_iter()
            .map(PaymentView::from)
            .collect())
    }

    /// Daily order report over `[start, end)` millis
    pub async fn daily_report(
        &self,
        date: NaiveDate,
        start: i64,
        end: i64,
    ) -> OrderResult<DailyOrderReport> {
        let repo = OrderRepository::new(self.db.clone());
        let orders = repo.list_created_between(start, end).await?;

        let open_orders = orders.iter().filter(|o| o.status.is_open()).count();
        let ready_orders = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Ready)
            .count();
        let settled: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Settled)
            .collect();
        let total_sales: Decimal = money::round_money(settled.iter().map(|o| o.total).sum());

        Ok(DailyOrderReport {
            date: date.format("%Y-%m-%d").to_string(),
            total_orders: orders.len(),
            open_orders,
            ready_orders,
            settled_orders: settled.len(),
            total_sales,
            orders: orders.iter().cloned().map(OrderView::from).collect(),
        })
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Resolve and price the requested lines against the current catalog.
    ///
    /// Prices are snapshots: whatever the catalog says right now is frozen
    /// into the line.
    async fn build_lines(&self, inputs: &[LineInput]) -> OrderResult<Vec<OrderLine>> {
        if inputs.is_empty() {
            return Err(OrderError::Validation(
                "Order must contain at least one line".to_string(),
            ));
        }

        let products = ProductRepository::new(self.db.clone());
        let mut lines = Vec::with_capacity(inputs.len());

        for input in inputs {
            if input.quantity < 1 {
                return Err(OrderError::Validation(format!(
                    "Quantity must be at least 1, got {}",
                    input.quantity
                )));
            }
            if input.quantity > MAX_LINE_QUANTITY {
                return Err(OrderError::Validation(format!(
                    "Quantity exceeds maximum allowed ({MAX_LINE_QUANTITY}), got {}",
                    input.quantity
                )));
            }

            let product = self.load_product(&products, &input.product_id).await?;
            money::validate_unit_price(product.price, &product.name)?;

            lines.push(OrderLine {
                id: Uuid::new_v4().to_string(),
                product_id: input.product_id.clone(),
                product_name: product.name.clone(),
                quantity: input.quantity,
                unit_price: product.price,
                subtotal: money::line_subtotal(product.price, input.quantity),
                note: input.note.clone(),
                completed: false,
                completed_at: None,
            });
        }

        Ok(lines)
    }

    async fn load_order(&self, repo: &OrderRepository, order_id: &str) -> OrderResult<Order> {
        match repo.find_by_id(order_id).await {
            Ok(Some(order)) => Ok(order),
            Ok(None) | Err(RepoError::Validation(_)) => {
                Err(OrderError::OrderNotFound(order_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn load_table(&self, table_id: &str) -> OrderResult<DiningTable> {
        let tables = DiningTableRepository::new(self.db.clone());
        match tables.find_by_id(table_id).await {
            Ok(Some(table)) if table.is_active => Ok(table),
            Ok(_) | Err(RepoError::Validation(_)) => {
                Err(OrderError::TableNotFound(table_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn load_product(
        &self,
        products: &ProductRepository,
        product_id: &str,
    ) -> OrderResult<Product> {
        match products.find_by_id(product_id).await {
            Ok(Some(product)) if product.is_orderable() => Ok(product),
            Ok(_) | Err(RepoError::Validation(_)) => {
                Err(OrderError::ProductUnavailable(product_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn load_payment_method(&self, method_id: &str) -> OrderResult<PaymentMethod> {
        let methods = PaymentMethodRepository::new(self.db.clone());
        match methods.find_by_id(method_id).await {
            Ok(Some(method)) if method.is_active => Ok(method),
            Ok(_) | Err(RepoError::Validation(_)) => {
                Err(OrderError::InvalidPaymentMethod(method_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Persisted orders always carry an id; a missing one is storage corruption.
fn record_id(order: &Order) -> OrderResult<RecordId> {
    order
        .id
        .clone()
        .ok_or_else(|| OrderError::Storage(RepoError::Database("Order record has no id".into())))
}
