// crates/staydb-core/src/model.rs
use crate::traits::{GeoBackend, NameMatch};
use serde::{Deserialize, Serialize};

/// Raw city structure as it comes from JSON.
///
/// Coordinates are usually strings in the source dataset, but plain numbers
/// are accepted as well.
#[derive(Debug, Deserialize)]
pub struct CityRaw {
    pub name: String,
    #[serde(default)]
    pub latitude: Option<serde_json::Value>,
    #[serde(default)]
    pub longitude: Option<serde_json::Value>,
}

/// Raw country structure from JSON.
/// NOTE: This type mirrors the external dataset and may be subject to that dataset's license.
#[derive(Debug, Deserialize)]
pub struct CountryRaw {
    #[serde(rename = "isoCode")]
    pub iso_code: String,
    pub name: String,
    #[serde(default)]
    pub cities: Vec<CityRaw>,
}

pub type CountriesRaw = Vec<CountryRaw>;

/// Default backend: plain `String` + `f64`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultBackend;

impl GeoBackend for DefaultBackend {
    type Str = String;
    type Float = f64;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn float_from(f: f64) -> Self::Float {
        f
    }

    #[inline]
    fn float_to_f64(v: Self::Float) -> f64 {
        v
    }
}

/// A city in the normalized GeoDb.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City<B: GeoBackend> {
    pub name: B::Str,
    pub latitude: B::Float,
    pub longitude: B::Float,
}

/// A country entry in the normalized GeoDb.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country<B: GeoBackend> {
    pub iso2: B::Str,
    pub name: B::Str,
    pub cities: Vec<City<B>>,
}

/// Top-level database structure. Country and city order is the dataset order
/// and is what every scan in this crate iterates by.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeoDb<B: GeoBackend> {
    pub countries: Vec<Country<B>>,
}

/// Convenient alias for the default backend.
pub type DefaultGeoDb = GeoDb<DefaultBackend>;

/// Coerce a raw coordinate to `f64`; anything missing or unparseable is `0.0`.
pub fn parse_coord(v: &Option<serde_json::Value>) -> f64 {
    match v {
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Convert raw JSON data into a `GeoDb` using the given backend.
pub fn build_geodb<B: GeoBackend>(raw: CountriesRaw) -> GeoDb<B> {
    let countries = raw
        .into_iter()
        .map(|c| {
            let cities = c
                .cities
                .into_iter()
                .map(|city| City::<B> {
                    name: B::str_from(&city.name),
                    latitude: B::float_from(parse_coord(&city.latitude)),
                    longitude: B::float_from(parse_coord(&city.longitude)),
                })
                .collect();

            Country::<B> {
                iso2: B::str_from(&c.iso_code),
                name: B::str_from(&c.name),
                cities,
            }
        })
        .collect();

    GeoDb { countries }
}

impl<B: GeoBackend> GeoDb<B> {
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn city_count(&self) -> usize {
        self.countries.iter().map(|c| c.cities.len()).sum()
    }
}

impl<B: GeoBackend> Country<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn iso2(&self) -> &str {
        self.iso2.as_ref()
    }

    pub fn cities(&self) -> &[City<B>] {
        &self.cities
    }

    /// Exact, case-sensitive lookup of a city by name.
    pub fn city_named(&self, name: &str) -> Option<&City<B>> {
        self.cities.iter().find(|c| c.name() == name)
    }
}

impl<B: GeoBackend> City<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn latitude(&self) -> f64 {
        B::float_to_f64(self.latitude)
    }

    pub fn longitude(&self) -> f64 {
        B::float_to_f64(self.longitude)
    }
}

impl<B: GeoBackend> NameMatch for Country<B> {
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl<B: GeoBackend> NameMatch for City<B> {
    fn name_str(&self) -> &str {
        self.name()
    }
}
