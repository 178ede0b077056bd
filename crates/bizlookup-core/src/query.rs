//! Validation and coercion of raw discovery query parameters.
//!
//! Every field is checked against its own constraint table and all
//! violations are collected before returning, so a single response can
//! report every bad parameter at once.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{self, Coordinate};

/// Origin used when `lat`/`long` are absent.
pub const DEFAULT_ORIGIN: Coordinate = Coordinate::ZERO;
/// `-1` means "no limit".
pub const DEFAULT_LIMIT: i64 = -1;

/// Untyped query input as received, one optional string per known field.
///
/// Unknown keys are dropped; for repeated keys the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawDiscoveryQuery {
    pub lat: Option<String>,
    pub long: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "type")]
    pub business_type: Option<String>,
}

impl RawDiscoveryQuery {
    /// Collects raw `key=value` pairs, such as a decoded URL query string.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "lat" => &mut raw.lat,
                "long" => &mut raw.long,
                "limit" => &mut raw.limit,
                "type" => &mut raw.business_type,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        raw
    }
}

/// A discovery request whose parameters satisfy every declared constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryQuery {
    /// The point distances are measured from.
    pub origin: Coordinate,
    pub limit: i64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
}

impl Default for DiscoveryQuery {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            limit: DEFAULT_LIMIT,
            business_type: None,
        }
    }
}

impl DiscoveryQuery {
    /// Maximum number of results, or `None` when unlimited.
    #[must_use]
    pub fn max_results(&self) -> Option<usize> {
        if self.limit < 0 {
            None
        } else {
            Some(usize::try_from(self.limit).unwrap_or(usize::MAX))
        }
    }
}

/// Field-keyed validation messages. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: String) {
        self.0.entry(field).or_default().push(message);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, in constraint order.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().flatten().map(String::as_str).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Finite: neither `NaN` nor infinite.
    Number,
    Latitude,
    Longitude,
    /// Finite with no fractional part.
    Integer,
    Min(f64),
    Max(f64),
}

impl Rule {
    fn holds(self, value: f64) -> bool {
        match self {
            Rule::Number => value.is_finite(),
            Rule::Latitude => geo::is_valid_latitude(value),
            Rule::Longitude => geo::is_valid_longitude(value),
            Rule::Integer => value.is_finite() && value.fract() == 0.0,
            Rule::Min(min) => value >= min,
            Rule::Max(max) => value <= max,
        }
    }
}

struct NumericField {
    name: &'static str,
    constraints: &'static [(Rule, &'static str)],
}

const LAT: NumericField = NumericField {
    name: "lat",
    constraints: &[
        (Rule::Number, "must be a number"),
        (Rule::Latitude, "must be a valid earth latitude"),
        (Rule::Min(-90.0), "must not be less than -90"),
        (Rule::Max(90.0), "must not be greater than 90"),
    ],
};

const LONG: NumericField = NumericField {
    name: "long",
    constraints: &[
        (Rule::Number, "must be a number"),
        (Rule::Longitude, "must be a valid earth longitude"),
        (Rule::Min(-180.0), "must not be less than -180"),
        (Rule::Max(180.0), "must not be greater than 180"),
    ],
};

const LIMIT: NumericField = NumericField {
    name: "limit",
    constraints: &[
        (Rule::Integer, "must be an integer number"),
        (Rule::Min(-1.0), "must not be less than -1"),
    ],
};

const TYPE_FIELD: &str = "type";

impl NumericField {
    /// Coerces `raw` and records every violated constraint. Absent input
    /// yields `default` without checks.
    fn evaluate(&self, raw: Option<&str>, default: f64, errors: &mut ValidationErrors) -> f64 {
        let Some(raw) = raw else {
            return default;
        };
        let value = coerce_number(raw);
        for (rule, message) in self.constraints {
            if !rule.holds(value) {
                errors.push(self.name, format!("{} {message}", self.name));
            }
        }
        value
    }
}

/// Validates raw discovery parameters.
///
/// Missing fields take their defaults (`lat = 0`, `long = 0`, `limit = -1`,
/// no type filter).
///
/// # Errors
///
/// Returns [`ValidationErrors`] holding every violated constraint across all
/// fields.
pub fn validate_discovery_query(raw: &RawDiscoveryQuery) -> Result<DiscoveryQuery, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let lat = LAT.evaluate(raw.lat.as_deref(), DEFAULT_ORIGIN.latitude(), &mut errors);
    let long = LONG.evaluate(raw.long.as_deref(), DEFAULT_ORIGIN.longitude(), &mut errors);
    #[allow(clippy::cast_precision_loss)]
    let limit = LIMIT.evaluate(raw.limit.as_deref(), DEFAULT_LIMIT as f64, &mut errors);

    if raw.business_type.as_deref() == Some("") {
        errors.push(TYPE_FIELD, format!("{TYPE_FIELD} should not be empty"));
    }

    // The latitude/longitude rules share their range checks with
    // `Coordinate::try_new`, so a rejected origin always left an error behind.
    let origin = match Coordinate::try_new(lat, long) {
        Ok(origin) if errors.is_empty() => origin,
        _ => return Err(errors),
    };

    // Integral and >= -1 at this point; `as` saturates absurdly large values.
    #[allow(clippy::cast_possible_truncation)]
    let limit = limit as i64;

    Ok(DiscoveryQuery {
        origin,
        limit,
        business_type: raw.business_type.clone(),
    })
}

/// Converts a query-string value to a number the way implicit numeric
/// conversion does: blank is `0`, `Infinity` literals and `0x`/`0o`/`0b`
/// integers are accepted, anything unparseable is `NaN`.
pub(crate) fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    // `f64::from_str` also accepts "inf" and "nan" spellings, which must not
    // count as numbers here.
    let decimal_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars || !s.chars().any(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return f64::NAN;
    }
    digits.chars().fold(0.0, |acc, c| {
        acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
    })
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
