//! Great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean radius of the Earth in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated point on the Earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// The intersection of the equator and the prime meridian.
    pub const ZERO: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLatitude`] or [`CoreError::InvalidLongitude`]
    /// when a component is not finite or falls outside its range.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !is_valid_latitude(latitude) {
            return Err(CoreError::InvalidLatitude(latitude));
        }
        if !is_valid_longitude(longitude) {
            return Err(CoreError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Distance in kilometers to the point at `latitude`/`longitude` degrees.
    #[must_use]
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        spherical_distance(self.latitude, self.longitude, latitude, longitude)
    }
}

pub(crate) fn is_valid_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

pub(crate) fn is_valid_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}

/// Distance in kilometers between two points given in degrees, using the
/// spherical law of cosines.
#[must_use]
pub fn spherical_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    spherical_distance_with_radius(lat1, lon1, lat2, lon2, EARTH_RADIUS_KM)
}

/// Same as [`spherical_distance`], in the unit of `radius`.
///
/// The cosine term is clamped to `[-1, 1]`: rounding can push it just past 1
/// for identical points (or past -1 for antipodal ones), where `acos` would
/// return `NaN`.
#[must_use]
pub fn spherical_distance_with_radius(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    radius: f64,
) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon2 - lon1).cos();

    radius * cos_angle.clamp(-1.0, 1.0).acos()
}
