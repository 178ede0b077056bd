//! Domain types and the discovery pipeline: coordinate math, query
//! validation, distance ranking and the business store seam.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod query;
pub mod ranking;
pub mod sample;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{spherical_distance, spherical_distance_with_radius, Coordinate, EARTH_RADIUS_KM};
pub use query::{validate_discovery_query, DiscoveryQuery, RawDiscoveryQuery, ValidationErrors};
pub use ranking::{discover, rank_businesses, BusinessRecord, RankedBusiness};
pub use sample::sample_businesses;
pub use store::{BusinessStore, MemoryStore, StoreError};

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid latitude: {0} (expected a finite value in [-90, 90])")]
    InvalidLatitude(f64),
    #[error("invalid longitude: {0} (expected a finite value in [-180, 180])")]
    InvalidLongitude(f64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
