// crates/staydb-core/src/filter.rs

//! # Listing Filter Compiler
//!
//! Turns the flat, optional search parameters collected by a page handler
//! into a [`Predicate`] for the listing store. Every parameter is optional and
//! anything malformed is treated as absent: compiling never fails.

use crate::predicate::{Field, Predicate, Relation, Value};
use crate::text::lower_key;
use crate::traits::CountryIndex;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A numeric query parameter as it arrives from a form or URL: either a JSON
/// number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountParam {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CountParam {
    /// The inclusive lower bound this parameter asks for, if any.
    ///
    /// Zero, negative, non-numeric and non-finite inputs all yield `None`:
    /// a lower bound of zero or less is satisfied by every listing anyway.
    /// Fractional bounds round up, since counts are whole numbers.
    pub fn lower_bound(&self) -> Option<u32> {
        let n = match self {
            CountParam::Int(n) => *n as f64,
            CountParam::Float(f) => *f,
            CountParam::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        if !n.is_finite() || n <= 0.0 {
            return None;
        }
        Some(n.ceil().min(u32::MAX as f64) as u32)
    }
}

impl From<u32> for CountParam {
    fn from(n: u32) -> Self {
        CountParam::Int(n.into())
    }
}

impl From<i32> for CountParam {
    fn from(n: i32) -> Self {
        CountParam::Int(n.into())
    }
}

impl From<&str> for CountParam {
    fn from(s: &str) -> Self {
        CountParam::Text(s.to_string())
    }
}

/// Listing search parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilter {
    /// Only listings owned by this user.
    pub user_id: Option<String>,
    pub category: Option<String>,
    pub room_count: Option<CountParam>,
    pub guest_count: Option<CountParam>,
    pub bathroom_count: Option<CountParam>,
    /// Country code of the listing.
    pub location_value: Option<String>,
    pub city: Option<String>,
    /// Free-text location search; overrides `location_value` and `city`.
    pub search_term: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl SearchFilter {
    pub fn compile<G: CountryIndex + ?Sized>(&self, geo: &G) -> Predicate {
        compile_filter(self, geo)
    }
}

/// Compile `filter` into a listing predicate.
///
/// Clauses are ANDed together in a fixed order: owner, category, the three
/// count lower bounds, location, availability. An empty filter yields
/// [`Predicate::match_all`].
pub fn compile_filter<G: CountryIndex + ?Sized>(filter: &SearchFilter, geo: &G) -> Predicate {
    let mut clauses = Vec::new();

    if let Some(user_id) = present(&filter.user_id) {
        clauses.push(Predicate::equals(Field::UserId, user_id));
    }
    if let Some(category) = present(&filter.category) {
        clauses.push(Predicate::equals(Field::Category, category));
    }

    for (field, param) in [
        (Field::RoomCount, &filter.room_count),
        (Field::GuestCount, &filter.guest_count),
        (Field::BathroomCount, &filter.bathroom_count),
    ] {
        if let Some(min) = param.as_ref().and_then(CountParam::lower_bound) {
            clauses.push(Predicate::gte(field, min));
        }
    }

    match present(&filter.search_term) {
        Some(term) => clauses.push(location_search(term, geo)),
        None => {
            if let Some(code) = present(&filter.location_value) {
                clauses.push(Predicate::equals(Field::LocationValue, code));
            }
            if let Some(city) = present(&filter.city) {
                clauses.push(Predicate::equals(Field::City, city));
            }
        }
    }

    if let (Some(start), Some(end)) = (
        parse_date(filter.start_date.as_deref()),
        parse_date(filter.end_date.as_deref()),
    ) {
        clauses.push(Predicate::negate(Predicate::exists(
            Relation::Reservations,
            overlapping(start, end),
        )));
    }

    debug!(clauses = clauses.len(), "compiled listing filter");
    Predicate::And(clauses)
}

/// City substring OR country-name match. The `In` arm only exists when at
/// least one country name contains the term.
fn location_search<G: CountryIndex + ?Sized>(term: &str, geo: &G) -> Predicate {
    let mut arms = vec![Predicate::contains_insensitive(Field::City, term)];

    let codes = geo.country_codes_matching(&lower_key(term));
    if !codes.is_empty() {
        arms.push(Predicate::In(
            Field::LocationValue,
            codes.into_iter().map(Value::from).collect(),
        ));
    }
    Predicate::Or(arms)
}

/// Reservation overlaps `[start, end]`: `res.end >= start AND res.start <= end`.
pub fn overlapping(start: DateTime<Utc>, end: DateTime<Utc>) -> Predicate {
    Predicate::And(vec![
        Predicate::gte(Field::EndDate, start),
        Predicate::lte(Field::StartDate, end),
    ])
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as
/// UTC) and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(s: Option<&str>) -> Option<DateTime<Utc>> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    debug!(input = s, "ignoring unparseable date");
    None
}

/// Reservation lookup parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationQuery {
    pub listing_id: Option<String>,
    /// Reservations made by this guest.
    pub user_id: Option<String>,
    /// Reservations on listings owned by this user.
    pub author_id: Option<String>,
}

impl ReservationQuery {
    pub fn compile(&self) -> Predicate {
        let mut clauses = Vec::new();
        if let Some(listing_id) = present(&self.listing_id) {
            clauses.push(Predicate::equals(Field::ListingId, listing_id));
        }
        if let Some(user_id) = present(&self.user_id) {
            clauses.push(Predicate::equals(Field::UserId, user_id));
        }
        if let Some(author_id) = present(&self.author_id) {
            clauses.push(Predicate::exists(
                Relation::Listing,
                Predicate::equals(Field::UserId, author_id),
            ));
        }
        Predicate::And(clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Country table stand-in: (code, lower-cased name).
    struct Countries(&'static [(&'static str, &'static str)]);

    impl CountryIndex for Countries {
        fn country_codes_matching(&self, term: &str) -> Vec<String> {
            self.0
                .iter()
                .filter(|(_, name)| name.contains(term))
                .map(|(code, _)| code.to_string())
                .collect()
        }
    }

    const GEO: Countries = Countries(&[
        ("PT", "portugal"),
        ("ES", "spain"),
        ("GB", "united kingdom"),
        ("US", "united states"),
    ]);

    fn has_eq(p: &Predicate, field: Field) -> bool {
        p.clauses()
            .iter()
            .any(|c| matches!(c, Predicate::Eq(f, _) if *f == field))
    }

    #[test]
    fn empty_filter_matches_all() {
        let p = compile_filter(&SearchFilter::default(), &GEO);
        assert!(p.is_match_all());
        assert_eq!(p.to_where(), json!({}));
    }

    #[test]
    fn counts_are_inclusive_lower_bounds() {
        let filter = SearchFilter {
            room_count: Some(3.into()),
            guest_count: Some("4".into()),
            bathroom_count: Some(CountParam::Float(1.5)),
            ..Default::default()
        };
        let p = compile_filter(&filter, &GEO);
        assert_eq!(
            p.clauses(),
            &[
                Predicate::gte(Field::RoomCount, 3),
                Predicate::gte(Field::GuestCount, 4),
                Predicate::gte(Field::BathroomCount, 2),
            ]
        );
        assert!(!has_eq(&p, Field::RoomCount));
    }

    #[test]
    fn malformed_counts_are_ignored() {
        for raw in ["", "abc", "0", "-2", "NaN", "  "] {
            let filter = SearchFilter {
                room_count: Some(raw.into()),
                ..Default::default()
            };
            assert!(
                compile_filter(&filter, &GEO).is_match_all(),
                "room_count {raw:?} should be ignored"
            );
        }
        let zero = SearchFilter {
            guest_count: Some(0.into()),
            bathroom_count: Some(CountParam::Float(f64::INFINITY)),
            ..Default::default()
        };
        assert!(compile_filter(&zero, &GEO).is_match_all());
    }

    #[test]
    fn exact_location_without_search_term() {
        let filter = SearchFilter {
            location_value: Some("PT".into()),
            city: Some("Porto".into()),
            ..Default::default()
        };
        let p = compile_filter(&filter, &GEO);
        assert_eq!(
            p.clauses(),
            &[
                Predicate::equals(Field::LocationValue, "PT"),
                Predicate::equals(Field::City, "Porto"),
            ]
        );
    }

    #[test]
    fn search_term_replaces_exact_location() {
        let filter = SearchFilter {
            search_term: Some("United".into()),
            location_value: Some("PT".into()),
            city: Some("Porto".into()),
            ..Default::default()
        };
        let p = compile_filter(&filter, &GEO);
        assert!(!has_eq(&p, Field::LocationValue));
        assert!(!has_eq(&p, Field::City));
        assert_eq!(
            p.clauses(),
            &[Predicate::Or(vec![
                Predicate::contains_insensitive(Field::City, "United"),
                Predicate::In(Field::LocationValue, vec!["GB".into(), "US".into()]),
            ])]
        );
    }

    #[test]
    fn search_term_without_country_match_has_only_city_arm() {
        let filter = SearchFilter {
            search_term: Some("Lisbon".into()),
            ..Default::default()
        };
        let p = compile_filter(&filter, &GEO);
        assert_eq!(
            p.clauses(),
            &[Predicate::Or(vec![Predicate::contains_insensitive(
                Field::City,
                "Lisbon"
            )])]
        );
        assert_eq!(
            p.to_where(),
            json!({ "AND": [{ "OR": [{ "city": { "contains": "Lisbon", "mode": "insensitive" } }] }] })
        );
    }

    #[test]
    fn date_range_excludes_overlapping_reservations() {
        let filter = SearchFilter {
            start_date: Some("2024-07-12".into()),
            end_date: Some("2024-07-20T00:00:00.000Z".into()),
            ..Default::default()
        };
        let p = compile_filter(&filter, &GEO);
        assert_eq!(
            p.to_where(),
            json!({ "AND": [{ "NOT": { "reservations": { "some": { "AND": [
                { "endDate": { "gte": "2024-07-12T00:00:00.000Z" } },
                { "startDate": { "lte": "2024-07-20T00:00:00.000Z" } }
            ] } } } }] })
        );
    }

    #[test]
    fn half_open_or_invalid_date_range_is_ignored() {
        let only_start = SearchFilter {
            start_date: Some("2024-07-12".into()),
            ..Default::default()
        };
        assert!(compile_filter(&only_start, &GEO).is_match_all());

        let garbage = SearchFilter {
            start_date: Some("next tuesday".into()),
            end_date: Some("2024-07-20".into()),
            ..Default::default()
        };
        assert!(compile_filter(&garbage, &GEO).is_match_all());
    }

    #[test]
    fn filter_deserializes_from_query_params() {
        let filter: SearchFilter = serde_json::from_value(json!({
            "roomCount": "2",
            "guestCount": 3,
            "category": "Beach",
            "searchTerm": "spa"
        }))
        .unwrap();
        let p = filter.compile(&GEO);
        assert_eq!(p.clauses().len(), 4);
        assert_eq!(p.clauses()[0], Predicate::equals(Field::Category, "Beach"));
        assert_eq!(p.clauses()[1], Predicate::gte(Field::RoomCount, 2));
    }

    #[test]
    fn reservation_query_by_author_goes_through_listing() {
        let q = ReservationQuery {
            author_id: Some("owner-1".into()),
            ..Default::default()
        };
        assert_eq!(
            q.compile().to_where(),
            json!({ "AND": [{ "listing": { "userId": "owner-1" } }] })
        );
        assert!(ReservationQuery::default().compile().is_match_all());
    }
}
