use bizlookup_core::{sample_businesses, BusinessRecord};
use rand::Rng;
use sqlx::PgPool;

use crate::{businesses, DbError};

const NAME_PREFIXES: [&str; 8] = [
    "Blue", "Golden", "Corner", "Harbor", "Maple", "Urban", "Old Town", "Sunrise",
];
const NAME_NOUNS: [&str; 8] = [
    "Bean", "Table", "Kitchen", "Grill", "Spoon", "Oven", "Leaf", "Fork",
];
const NAME_SUFFIXES: [&str; 5] = ["& Co", "House", "Bros", "Group", "Collective"];

/// Insert the six sample businesses.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; the batch is rolled back.
pub async fn seed_sample_businesses(pool: &PgPool) -> Result<usize, DbError> {
    Ok(businesses::insert_businesses(pool, &sample_businesses()).await?)
}

/// Insert `count` randomly generated businesses.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; the batch is rolled back.
pub async fn seed_random_businesses(pool: &PgPool, count: usize) -> Result<usize, DbError> {
    let records: Vec<BusinessRecord> = {
        let mut rng = rand::rng();
        (0..count).map(|_| random_business(&mut rng)).collect()
    };
    Ok(businesses::insert_businesses(pool, &records).await?)
}

/// Seed the sample businesses only when the table has no rows.
///
/// Returns the number of rows inserted (zero when the table was not empty).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if counting or inserting fails.
pub async fn seed_if_empty(pool: &PgPool) -> Result<usize, DbError> {
    if businesses::count_businesses(pool).await? > 0 {
        tracing::debug!("business table already populated; skipping seed");
        return Ok(0);
    }
    let inserted = seed_sample_businesses(pool).await?;
    tracing::info!(inserted, "seeded sample businesses");
    Ok(inserted)
}

/// A random business: coordinates at 6-decimal precision, `Cafe` or
/// `Restaurant` with equal weight.
pub fn random_business<R: Rng>(rng: &mut R) -> BusinessRecord {
    let name = format!(
        "{} {} {}",
        NAME_PREFIXES[rng.random_range(0..NAME_PREFIXES.len())],
        NAME_NOUNS[rng.random_range(0..NAME_NOUNS.len())],
        NAME_SUFFIXES[rng.random_range(0..NAME_SUFFIXES.len())],
    );
    let latitude = round6(rng.random_range(-90.0..=90.0));
    let longitude = round6(rng.random_range(-180.0..=180.0));
    let business_type = if rng.random_bool(0.5) {
        "Cafe"
    } else {
        "Restaurant"
    };

    BusinessRecord::new(name, latitude, longitude, business_type)
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
