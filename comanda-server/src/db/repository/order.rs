//! Order Repository
//!
//! 订单读写。所有变更由 OrderWorkflow 在订单锁内发起；
//! repository 不做状态决策，只执行查询。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderLine};
use crate::orders::OrderStatus;
use rust_decimal::Decimal;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new order.
    ///
    /// A `Duplicate` error means the UNIQUE index on `number` caught a
    /// numbering race; the workflow retries allocation once.
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid order ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Find the order owning a given line
    pub async fn find_by_line_id(&self, line_id: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE $line_id IN lines[*].id LIMIT 1")
            .bind(("line_id", line_id.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// All order numbers carrying the given day prefix.
    ///
    /// Counter extraction happens in the generator: lexical ordering breaks
    /// once the counter outgrows its 3-digit width, so the max cannot be
    /// taken with `ORDER BY number DESC`.
    pub async fn numbers_with_prefix(&self, prefix: &str) -> RepoResult<Vec<String>> {
        let numbers: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE number FROM order WHERE string::starts_with(number, $prefix)")
            .bind(("prefix", prefix.to_string()))
            .await?
            .take(0)?;
        Ok(numbers)
    }

    /// Open orders (Pending / InPreparation) for the kitchen and waiter
    /// queues, oldest first
    pub async fn list_open(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE status IN ['PENDING', 'IN_PREPARATION'] \
                 ORDER BY created_at ASC",
            )
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Ready and settled orders for the cashier queue (sorted by the caller)
    pub async fn list_completed(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE status IN ['READY', 'SETTLED']")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders created within `[start, end)` millis (daily report)
    pub async fn list_created_between(&self, start: i64, end: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE created_at >= $start AND created_at < $end \
                 ORDER BY created_at ASC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Replace the whole line collection (waiter revision, Pending only —
    /// guarded by the workflow inside the order lock)
    pub async fn replace_lines(
        &self,
        id: &RecordId,
        note: Option<String>,
        lines: Vec<OrderLine>,
        total: Decimal,
    ) -> RepoResult<Order> {
        self.base
            .db()
            .query("UPDATE $thing SET note = $note, lines = $lines, total = $total")
            .bind(("thing", id.clone()))
            .bind(("note", note))
            .bind(("lines", lines))
            .bind(("total", total))
            .await?
            .check()?;

        self.find_by_id(&id.to_string())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Persist a completion toggle together with the resulting status in
    /// one statement
    pub async fn update_completion(
        &self,
        id: &RecordId,
        lines: Vec<OrderLine>,
        status: OrderStatus,
        ready_at: Option<i64>,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET lines = $lines, status = $status, ready_at = $ready_at")
            .bind(("thing", id.clone()))
            .bind(("lines", lines))
            .bind(("status", status))
            .bind(("ready_at", ready_at))
            .await?
            .check()?;
        Ok(())
    }
}
