//! Repository Module
//!
//! Provides data access over the embedded SurrealDB instance.

// Catalog
pub mod dining_table;
pub mod payment_method;
pub mod product;

// Orders
pub mod order;
pub mod payment;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use payment_method::PaymentMethodRepository;
pub use product::ProductRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // UNIQUE index violations read "Database index `x` already contains ...".
        // They are the correctness backstop for order numbers and payments, so
        // callers must be able to tell them apart from plain storage failures.
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
