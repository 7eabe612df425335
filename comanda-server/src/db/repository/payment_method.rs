//! Payment Method Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::PaymentMethod;

const TABLE: &str = "payment_method";

#[derive(Clone)]
pub struct PaymentMethodRepository {
    base: BaseRepository,
}

impl PaymentMethodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find payment method by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PaymentMethod>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid payment method ID: {}", id)))?;
        let method: Option<PaymentMethod> = self.base.db().select(thing).await?;
        Ok(method)
    }

    /// List active payment methods, ordered by name
    pub async fn find_active(&self) -> RepoResult<Vec<PaymentMethod>> {
        let methods: Vec<PaymentMethod> = self
            .base
            .db()
            .query("SELECT * FROM payment_method WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(methods)
    }

    /// Count all methods (seed guard)
    pub async fn count(&self) -> RepoResult<usize> {
        let ids: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE <string>id FROM payment_method")
            .await?
            .take(0)?;
        Ok(ids.len())
    }

    /// Create a payment method (seed/tests)
    pub async fn create(&self, method: PaymentMethod) -> RepoResult<PaymentMethod> {
        let created: Option<PaymentMethod> = self.base.db().create(TABLE).content(method).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create payment method".to_string()))
    }
}
