//! Text formats accepted from the user

use crate::{core::geo::LatLng, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static COORDINATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?[0-9]+\.[0-9]+),\s*(-?[0-9]+\.[0-9]+)$").expect("invalid coordinate pattern regex")
});

/// Parses `lat,lng` text such as `"39.9042, 116.4074"`.
///
/// Both numbers need a fractional part. Returns `Ok(None)` when the text does not
/// have that shape, and an error when it does but the values are out of range.
pub fn parse_coordinates(text: &str) -> Result<Option<LatLng>> {
    let Some(captures) = COORDINATE_PATTERN.captures(text.trim()) else {
        return Ok(None);
    };

    let lat: f64 = captures[1].parse().map_err(|_| invalid(text))?;
    let lng: f64 = captures[2].parse().map_err(|_| invalid(text))?;
    LatLng::try_new(lat, lng).map(Some)
}

/// True when `text` is shaped like a coordinate pair, whatever its range
pub fn looks_like_coordinates(text: &str) -> bool {
    COORDINATE_PATTERN.is_match(text.trim())
}

fn invalid(text: &str) -> crate::MapError {
    crate::MapError::InvalidCoordinates(format!("cannot read {:?} as lat,lng", text))
}
