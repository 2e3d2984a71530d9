// crates/staydb-core/src/common.rs
use crate::model::{City, Country};
use crate::traits::GeoBackend;
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the database.
///
/// Returned by [`crate::GeoSearch::stats`], these counts reflect the
/// materialized in-memory database.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub cities: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A city formatted for search boxes and the destination picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMatch {
    pub city: String,
    /// Display name of the owning country.
    pub country: String,
    pub country_code: String,
    pub coordinates: Coordinates,
    /// `"<city>, <country>"`, both lower-cased.
    pub search_field: String,
}

impl CityMatch {
    pub fn new<B: GeoBackend>(city: &City<B>, country: &Country<B>) -> Self {
        let search_field = format!(
            "{}, {}",
            city.name().to_lowercase(),
            country.name().to_lowercase()
        );
        Self {
            city: city.name().to_string(),
            country: country.name().to_string(),
            country_code: country.iso2().to_string(),
            coordinates: Coordinates {
                lat: city.latitude(),
                lng: city.longitude(),
            },
            search_field,
        }
    }
}
