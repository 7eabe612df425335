//! Product Repository
//!
//! Read-only from the order workflow's perspective; `create` exists for
//! seeding and tests. Product maintenance itself lives outside this core.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Product;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid product ID: {}", id)))?;
        let product: Option<Product> = self.base.db().select(thing).await?;
        Ok(product)
    }

    /// Count all products (seed guard)
    pub async fn count(&self) -> RepoResult<usize> {
        let ids: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE <string>id FROM product")
            .await?
            .take(0)?;
        Ok(ids.len())
    }

    /// Create a product (seed/tests)
    pub async fn create(&self, product: Product) -> RepoResult<Product> {
        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update the catalog price (tests exercise the snapshot invariant with this)
    pub async fn set_price(&self, id: &str, price: rust_decimal::Decimal) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid product ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET price = $price")
            .bind(("thing", thing))
            .bind(("price", price))
            .await?
            .check()?;
        Ok(())
    }
}
