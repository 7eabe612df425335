//! Dining Table Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::DiningTable;

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid table ID: {}", id)))?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Count all tables (seed guard)
    pub async fn count(&self) -> RepoResult<usize> {
        let ids: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE <string>id FROM dining_table")
            .await?
            .take(0)?;
        Ok(ids.len())
    }

    /// Create a dining table (seed/tests)
    pub async fn create(&self, table: DiningTable) -> RepoResult<DiningTable> {
        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }
}
