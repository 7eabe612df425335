//! Payment Repository
//!
//! payment.order_id 上的 UNIQUE 索引保证一单一付；
//! 创建支付和订单结清在同一事务中完成。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Payment;
use crate::orders::OrderStatus;

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create the payment and settle the order in one transaction.
    ///
    /// Either both records change or neither does. A `Duplicate` error
    /// means a concurrent payment won the UNIQUE index on `order_id`;
    /// the workflow surfaces that as AlreadyPaid without retrying.
    pub async fn create_and_settle(
        &self,
        payment: Payment,
        order: &RecordId,
        settled_at: i64,
    ) -> RepoResult<Payment> {
        let order_id = payment.order_id.clone();

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                CREATE payment CONTENT $payment;
                UPDATE $order SET status = $status, settled_at = $settled_at;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("payment", payment))
            .bind(("order", order.clone()))
            .bind(("status", OrderStatus::Settled))
            .bind(("settled_at", settled_at))
            .await?
            .check()?;

        self.find_by_order_id(&order_id)
            .await?
            .ok_or_else(|| RepoError::Database("Payment missing after settle".to_string()))
    }

    /// Find the payment for an order
    pub async fn find_by_order_id(&self, order_id: &str) -> RepoResult<Option<Payment>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM payment WHERE order_id = $order_id LIMIT 1")
            .bind(("order_id", order_id.to_string()))
            .await?;
        let payments: Vec<Payment> = result.take(0)?;
        Ok(payments.into_iter().next())
    }

    /// Payments within `[start, end)` millis, oldest first
    pub async fn list_between(&self, start: i64, end: i64) -> RepoResult<Vec<Payment>> {
        let payments: Vec<Payment> = self
            .base
            .db()
            .query(
                "SELECT * FROM payment WHERE paid_at >= $start AND paid_at < $end \
                 ORDER BY paid_at ASC",
            )
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(payments)
    }
}
