//! Database Module
//!
//! Embedded SurrealDB storage: connection setup and schema definition.

pub mod models;
pub mod repository;
pub mod seed;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "comanda";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database (RocksDB engine) and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    /// Open an in-memory database (tests and ephemeral dev runs)
    pub async fn in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        tracing::info!("Database ready (ns={}, db={})", NAMESPACE, DATABASE);

        Ok(Self { db })
    }
}

/// Schema definition
///
/// Tables are schemaless; the two UNIQUE indexes are the invariants the
/// store itself must uphold:
/// - `order.number` — one order per number (numbering races surface here)
/// - `payment.order_id` — at most one payment per order
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE INDEX IF NOT EXISTS uniq_order_number ON TABLE order COLUMNS number UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_payment_order ON TABLE payment COLUMNS order_id UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;
    Ok(())
}
