//! Distance ranking of business records around a validated query origin.

use serde::{Deserialize, Serialize};

use crate::query::DiscoveryQuery;
use crate::store::{BusinessStore, StoreError};

/// A business as held by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub business_type: String,
}

impl BusinessRecord {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        business_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            business_type: business_type.into(),
        }
    }
}

/// Discovery output row; `distance` is in kilometers from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBusiness {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
}

/// Filters `records` by the query's type, orders them by distance from the
/// query origin and applies the limit.
///
/// The sort is stable: records at equal distance keep their input order.
#[must_use]
pub fn rank_businesses(query: &DiscoveryQuery, records: Vec<BusinessRecord>) -> Vec<RankedBusiness> {
    let wanted_type = query.business_type.as_deref();

    let mut ranked: Vec<RankedBusiness> = records
        .into_iter()
        .filter(|record| wanted_type.is_none_or(|t| record.business_type == t))
        .map(|record| RankedBusiness {
            distance: query.origin.distance_to(record.latitude, record.longitude),
            name: record.name,
            latitude: record.latitude,
            longitude: record.longitude,
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    if let Some(max) = query.max_results() {
        ranked.truncate(max);
    }
    ranked
}

/// Loads candidates from `store` and ranks them for `query`.
///
/// # Errors
///
/// Returns the store's [`StoreError`] unchanged; a failing store never
/// yields an empty result.
pub async fn discover<S>(store: &S, query: &DiscoveryQuery) -> Result<Vec<RankedBusiness>, StoreError>
where
    S: BusinessStore + ?Sized,
{
    let candidates = store
        .list_candidates(query.business_type.as_deref())
        .await?;
    Ok(rank_businesses(query, candidates))
}
