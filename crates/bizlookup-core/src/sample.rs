use crate::ranking::BusinessRecord;

const SAMPLE: [(&str, f64, f64, &str); 6] = [
    ("Business 1", 40.7128, -74.006, "Cafe"),
    ("Business 2", 34.0522, -118.2437, "Restaurant"),
    ("Business 3", 51.5074, -0.1278, "Cafe"),
    ("Business 4", 48.8566, 2.3522, "Restaurant"),
    ("Business 5", 41.8781, -87.6298, "Cafe"),
    ("Business 6", 51.5074, -0.1278, "Restaurant"),
];

/// The six reference businesses used for seeding and tests.
#[must_use]
pub fn sample_businesses() -> Vec<BusinessRecord> {
    SAMPLE
        .iter()
        .map(|&(name, latitude, longitude, business_type)| {
            BusinessRecord::new(name, latitude, longitude, business_type)
        })
        .collect()
}
