//! Database operations for the `business` table.

use bizlookup_core::BusinessRecord;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// A row from the `business` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusinessRow {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[sqlx(rename = "type")]
    pub business_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<BusinessRow> for BusinessRecord {
    fn from(row: BusinessRow) -> Self {
        BusinessRecord {
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
            business_type: row.business_type,
        }
    }
}

/// List businesses in insertion order, optionally restricted to an exact
/// (case-sensitive) `business_type`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_businesses(
    pool: &PgPool,
    business_type: Option<&str>,
) -> Result<Vec<BusinessRow>, sqlx::Error> {
    sqlx::query_as::<_, BusinessRow>(
        "SELECT id, name, latitude, longitude, type, created_at \
         FROM business \
         WHERE ($1::text IS NULL OR type = $1) \
         ORDER BY seq ASC",
    )
    .bind(business_type)
    .fetch_all(pool)
    .await
}

/// Total number of rows in the `business` table.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_businesses(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM business")
        .fetch_one(pool)
        .await
}

/// Insert `records` in order inside a single transaction.
///
/// Returns the number of rows inserted. If any insert fails the whole batch
/// is rolled back.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if any database operation fails, including the
/// coordinate range checks on the table.
pub async fn insert_businesses(
    pool: &PgPool,
    records: &[BusinessRecord],
) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(
            "INSERT INTO business (name, latitude, longitude, type) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&record.name)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(&record.business_type)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(records.len())
}
