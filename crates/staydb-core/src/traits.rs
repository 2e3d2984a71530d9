// crates/staydb-core/src/traits.rs
use crate::common::{CityMatch, DbStats};
use crate::model::Country;
use crate::text::TextMatch;
use serde::{Deserialize, Serialize};

/// Storage backend for strings and floats used by the database.
///
/// This abstraction allows the crate to swap how textual and floating-point
/// data are stored internally (for example to use more compact types) without
/// changing the public API of accessors that return `&str`/`f64` views.
///
/// Implementors must be `Clone + Send + Sync + 'static` and ensure the
/// associated types can be serialized/deserialized so databases can be cached
/// via bincode.
pub trait GeoBackend: Clone + Send + Sync + 'static {
    type Str: Clone
        + Send
        + Sync
        + std::fmt::Debug
        + Serialize
        + for<'de> Deserialize<'de>
        + AsRef<str>;
    type Float: Copy + Send + Sync + std::fmt::Debug + Serialize + for<'de> Deserialize<'de>;

    fn str_from(s: &str) -> Self::Str;
    fn float_from(f: f64) -> Self::Float;
    fn float_to_f64(v: Self::Float) -> f64;
}

/// Substring matching for types that expose a display name.
///
/// `needle` must already be normalized with the same [`TextMatch`] mode,
/// so callers can key the query once and reuse it for the whole scan.
pub trait NameMatch {
    /// Returns the display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn name_contains(&self, needle: &str, mode: TextMatch) -> bool {
        mode.key(self.name_str()).contains(needle)
    }
}

/// Country-name lookup used by the listing filter compiler.
pub trait CountryIndex {
    /// Codes of every country whose lower-cased display name contains the
    /// lower-cased `term` as a plain substring, in dataset order.
    fn country_codes_matching(&self, term: &str) -> Vec<String>;
}

/// Read-only search operations over the geographic reference table.
pub trait GeoSearch<B: GeoBackend>: CountryIndex {
    fn stats(&self) -> DbStats;

    /// Returns a slice of all countries in dataset order.
    fn countries(&self) -> &[Country<B>];

    /// Find a country by its two-letter code, case-insensitive.
    fn find_country_by_code(&self, code: &str) -> Option<&Country<B>>;

    /// All cities of one country, formatted for display. Unknown codes yield
    /// an empty list.
    fn cities_for_country(&self, code: &str) -> Vec<CityMatch>;

    /// Linear scan over cities in dataset order, stopping at `limit` hits.
    ///
    /// The query is trimmed and normalized with `mode`; an empty query
    /// returns no results. Only city names are matched.
    fn search_cities_with(&self, query: &str, limit: usize, mode: TextMatch) -> Vec<CityMatch>;

    /// [`GeoSearch::search_cities_with`] using plain lower-casing.
    fn search_cities(&self, query: &str, limit: usize) -> Vec<CityMatch> {
        self.search_cities_with(query, limit, TextMatch::Lowercase)
    }

    /// The curated destination list, in curated order. Entries missing from
    /// the dataset are skipped.
    fn popular_cities(&self) -> Vec<CityMatch>;

    /// Popular cities for an empty query, plain search results otherwise.
    ///
    /// A non-empty query with no hits stays empty; it is never backfilled
    /// with popular cities.
    fn search_with_suggestions(&self, query: &str, limit: usize) -> Vec<CityMatch> {
        self.search_with_suggestions_with(query, limit, TextMatch::Lowercase)
    }

    /// [`GeoSearch::search_with_suggestions`] with an explicit match mode for
    /// the non-empty case.
    fn search_with_suggestions_with(
        &self,
        query: &str,
        limit: usize,
        mode: TextMatch,
    ) -> Vec<CityMatch> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            let mut popular = self.popular_cities();
            popular.truncate(limit);
            return popular;
        }
        self.search_cities_with(trimmed, limit, mode)
    }
}
