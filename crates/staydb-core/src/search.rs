// crates/staydb-core/src/search.rs

use crate::common::{CityMatch, DbStats};
use crate::model::{Country, GeoDb};
use crate::text::{lower_key, TextMatch};
use crate::traits::{CountryIndex, GeoBackend, GeoSearch, NameMatch};

/// Curated destinations shown for an empty search box: `(city, country code)`.
pub const POPULAR_CITIES: &[(&str, &str)] = &[
    ("London", "GB"),
    ("New York", "US"),
    ("Paris", "FR"),
    ("Tokyo", "JP"),
    ("Sydney", "AU"),
    ("Rome", "IT"),
    ("Barcelona", "ES"),
    ("Dubai", "AE"),
    ("Singapore", "SG"),
    ("Hong Kong", "HK"),
];

/// Early-terminating scan over `countries` and their cities.
///
/// Countries are pulled lazily from the iterator and the scan stops, across
/// both loops, as soon as `limit` matches are collected. Results come back in
/// dataset order; there is no ranking.
pub fn scan_cities<'a, B, I>(
    countries: I,
    query: &str,
    limit: usize,
    mode: TextMatch,
) -> Vec<CityMatch>
where
    B: GeoBackend,
    I: IntoIterator<Item = &'a Country<B>>,
{
    let q = mode.key(query.trim());
    let mut out = Vec::new();
    if q.is_empty() || limit == 0 {
        return out;
    }

    'scan: for country in countries {
        for city in country.cities() {
            if city.name_contains(&q, mode) {
                out.push(CityMatch::new(city, country));
                if out.len() >= limit {
                    break 'scan;
                }
            }
        }
    }
    out
}

impl<B: GeoBackend> CountryIndex for GeoDb<B> {
    fn country_codes_matching(&self, term: &str) -> Vec<String> {
        let q = lower_key(term);
        // Linear scan of countries is fast (N < 300)
        self.countries
            .iter()
            .filter(|c| c.name_contains(&q, TextMatch::Lowercase))
            .map(|c| c.iso2().to_string())
            .collect()
    }
}

impl<B: GeoBackend> GeoSearch<B> for GeoDb<B> {
    fn stats(&self) -> DbStats {
        DbStats {
            countries: self.country_count(),
            cities: self.city_count(),
        }
    }

    fn countries(&self) -> &[Country<B>] {
        &self.countries
    }

    fn find_country_by_code(&self, code: &str) -> Option<&Country<B>> {
        let code = code.trim();
        self.countries
            .iter()
            .find(|c| c.iso2().eq_ignore_ascii_case(code))
    }

    fn cities_for_country(&self, code: &str) -> Vec<CityMatch> {
        self.find_country_by_code(code)
            .map(|country| {
                country
                    .cities()
                    .iter()
                    .map(|city| CityMatch::new(city, country))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn search_cities_with(&self, query: &str, limit: usize, mode: TextMatch) -> Vec<CityMatch> {
        scan_cities(&self.countries, query, limit, mode)
    }

    fn popular_cities(&self) -> Vec<CityMatch> {
        POPULAR_CITIES
            .iter()
            .filter_map(|&(name, code)| {
                let country = self.find_country_by_code(code)?;
                let city = country.city_named(name)?;
                Some(CityMatch::new(city, country))
            })
            .collect()
    }
}
