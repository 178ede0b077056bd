use async_trait::async_trait;
use bizlookup_core::{BusinessRecord, BusinessStore, StoreError};
use sqlx::PgPool;

use crate::{businesses, DbError};

/// [`BusinessStore`] backed by the Postgres `business` table.
///
/// The type filter runs in SQL; distance ranking stays in-process so both
/// stores share one ordering rule.
#[derive(Debug, Clone)]
pub struct PgBusinessStore {
    pool: PgPool,
}

impl PgBusinessStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessStore for PgBusinessStore {
    async fn list_candidates(
        &self,
        business_type: Option<&str>,
    ) -> Result<Vec<BusinessRecord>, StoreError> {
        let rows = businesses::list_businesses(&self.pool, business_type)
            .await
            .map_err(|e| StoreError::from(DbError::from(e)))?;
        Ok(rows.into_iter().map(BusinessRecord::from).collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::ping(&self.pool)
            .await
            .map_err(|e| StoreError::from(DbError::from(e)))
    }
}
