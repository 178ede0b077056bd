//! The business store seam consumed by discovery.

use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use crate::ranking::BusinessRecord;
use crate::sample::sample_businesses;

/// Failure at the store boundary. The message is reported to callers as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Query(String),
}

/// Source of candidate business records.
#[async_trait]
pub trait BusinessStore: Send + Sync {
    /// All records, optionally restricted to an exact `business_type`, in a
    /// stable order (insertion order for both provided stores).
    async fn list_candidates(
        &self,
        business_type: Option<&str>,
    ) -> Result<Vec<BusinessRecord>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// In-process store holding records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<BusinessRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(records: Vec<BusinessRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// A store preloaded with [`sample_businesses`].
    #[must_use]
    pub fn with_sample_data() -> Self {
        Self::new(sample_businesses())
    }
}

#[async_trait]
impl BusinessStore for MemoryStore {
    async fn list_candidates(
        &self,
        business_type: Option<&str>,
    ) -> Result<Vec<BusinessRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(records
            .iter()
            .filter(|r| business_type.is_none_or(|t| r.business_type == t))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.records
            .read()
            .map(|_| ())
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}
