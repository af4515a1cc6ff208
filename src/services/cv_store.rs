use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::cv::{CvDraft, CvPatch, CvRecord, CvRow};
use crate::utils::time::now;

/// Owner-scoped CV persistence. A record that belongs to another owner is
/// indistinguishable from one that does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CvStore: Send + Sync {
    async fn create(&self, owner_id: Uuid, draft: &CvDraft) -> Result<Uuid>;

    /// Reads the whole record, merges `patch` and writes it back. Last writer
    /// wins. A patch built from a full draft replaces every field. Returns
    /// `false` when no record with that id belongs to `owner_id`.
    async fn update(&self, id: Uuid, owner_id: Uuid, patch: CvPatch) -> Result<bool>;

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool>;

    async fn get_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<CvRecord>>;

    /// Newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<CvRecord>>;
}

#[derive(Clone)]
pub struct PgCvStore {
    pool: PgPool,
}

impl PgCvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CvStore for PgCvStore {
    async fn create(&self, owner_id: Uuid, draft: &CvDraft) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO cvs (id, owner_id, data)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(Json(draft))
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: Uuid, owner_id: Uuid, patch: CvPatch) -> Result<bool> {
        let Some(existing) = self.get_by_id(id, owner_id).await? else {
            return Ok(false);
        };
        let mut data = existing.data;
        patch.apply_to(&mut data);

        let result = sqlx::query(
            r#"
            UPDATE cvs
            SET data = $1, updated_at = NOW()
            WHERE id = $2 AND owner_id = $3
            "#,
        )
        .bind(Json(&data))
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cvs WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<CvRecord>> {
        let row: Option<CvRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, data, created_at, updated_at
            FROM cvs
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(CvRecord::from))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<CvRecord>> {
        let rows: Vec<CvRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, data, created_at, updated_at
            FROM cvs
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CvRecord::from).collect())
    }
}

/// Process-local store used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryCvStore {
    records: RwLock<HashMap<Uuid, CvRecord>>,
}

impl MemoryCvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CvStore for MemoryCvStore {
    async fn create(&self, owner_id: Uuid, draft: &CvDraft) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let ts = now();
        let record = CvRecord {
            id,
            owner_id,
            data: draft.clone(),
            created_at: ts,
            updated_at: ts,
        };
        self.records.write().await.insert(id, record);
        Ok(id)
    }

    async fn update(&self, id: Uuid, owner_id: Uuid, patch: CvPatch) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) if record.owner_id == owner_id => {
                patch.apply_to(&mut record.data);
                record.updated_at = now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool> {
        let mut records = self.records.write().await;
        if records.get(&id).is_some_and(|r| r.owner_id == owner_id) {
            records.remove(&id);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn get_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<CvRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(&id)
            .filter(|r| r.owner_id == owner_id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<CvRecord>> {
        let records = self.records.read().await;
        let mut owned: Vec<CvRecord> = records
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }
}
