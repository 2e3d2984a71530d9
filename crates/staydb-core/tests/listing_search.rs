use chrono::{DateTime, TimeZone, Utc};
use staydb_core::prelude::*;

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn listing(id: &str, rooms: u32, location: &str, city: Option<&str>, created: u32) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {id}"),
        description: String::new(),
        image_src: String::new(),
        created_at: day(2024, 1, created),
        category: "Beach".to_string(),
        room_count: rooms,
        bathroom_count: 1,
        guest_count: rooms * 2,
        location_value: location.to_string(),
        city: city.map(str::to_string),
        price: 100,
        user_id: format!("owner-{id}"),
    }
}

fn reservation(id: &str, listing_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Reservation {
    Reservation {
        id: id.to_string(),
        user_id: "guest-1".to_string(),
        listing_id: listing_id.to_string(),
        start_date: start,
        end_date: end,
        total_price: 500,
        created_at: start,
    }
}

fn store() -> MemoryStore {
    MemoryStore::new(
        vec![
            listing("lisbon", 2, "PT", Some("Lisbon"), 1),
            listing("porto", 3, "PT", Some("Porto"), 2),
            listing("nyc", 1, "US", Some("New York"), 3),
            listing("nowhere", 4, "ES", None, 4),
        ],
        vec![reservation("r1", "lisbon", day(2024, 7, 10), day(2024, 7, 15))],
    )
}

fn ids(listings: &[SafeListing]) -> Vec<&str> {
    listings.iter().map(|l| l.id.as_str()).collect()
}

fn in_range(start: &str, end: &str) -> SearchFilter {
    SearchFilter {
        location_value: Some("PT".into()),
        start_date: Some(start.into()),
        end_date: Some(end.into()),
        ..Default::default()
    }
}

#[test]
fn empty_filter_returns_everything_newest_first() {
    let geo = DefaultGeoDb::load().unwrap();
    let out = get_listings(&store(), geo, &SearchFilter::default()).unwrap();
    assert_eq!(ids(&out), vec!["nowhere", "nyc", "porto", "lisbon"]);
    assert_eq!(out[0].created_at, "2024-01-04T00:00:00.000Z");
}

#[test]
fn overlapping_reservation_excludes_listing() {
    let geo = DefaultGeoDb::load().unwrap();
    let out = get_listings(&store(), geo, &in_range("2024-07-12", "2024-07-20")).unwrap();
    assert_eq!(ids(&out), vec!["porto"]);
}

#[test]
fn adjacent_range_after_reservation_is_available() {
    let geo = DefaultGeoDb::load().unwrap();
    let out = get_listings(&store(), geo, &in_range("2024-07-16", "2024-07-20")).unwrap();
    assert_eq!(ids(&out), vec!["porto", "lisbon"]);
}

#[test]
fn range_strictly_before_reservation_is_available() {
    let geo = DefaultGeoDb::load().unwrap();
    let out = get_listings(&store(), geo, &in_range("2024-07-01", "2024-07-09")).unwrap();
    assert_eq!(ids(&out), vec!["porto", "lisbon"]);
}

#[test]
fn range_enclosing_reservation_is_excluded() {
    let geo = DefaultGeoDb::load().unwrap();
    let out = get_listings(&store(), geo, &in_range("2024-07-01", "2024-07-31")).unwrap();
    assert_eq!(ids(&out), vec!["porto"]);
}

#[test]
fn room_count_is_a_minimum() {
    let geo = DefaultGeoDb::load().unwrap();
    let filter = SearchFilter {
        room_count: Some("3".into()),
        ..Default::default()
    };
    let out = get_listings(&store(), geo, &filter).unwrap();
    assert_eq!(ids(&out), vec!["nowhere", "porto"]);
}

#[test]
fn search_term_matches_country_name_or_city() {
    let geo = DefaultGeoDb::load().unwrap();

    let by_country = SearchFilter {
        search_term: Some("portu".into()),
        ..Default::default()
    };
    assert_eq!(
        ids(&get_listings(&store(), geo, &by_country).unwrap()),
        vec!["porto", "lisbon"]
    );

    // "york" names no country, so only the city arm applies
    let by_city = SearchFilter {
        search_term: Some("YORK".into()),
        location_value: Some("PT".into()),
        ..Default::default()
    };
    assert_eq!(ids(&get_listings(&store(), geo, &by_city).unwrap()), vec!["nyc"]);
}

#[test]
fn country_name_search_covers_every_iso_country() {
    let geo = DefaultGeoDb::load().unwrap();
    let store = MemoryStore::new(
        vec![
            listing("athens", 2, "GR", None, 1),
            listing("lisbon", 2, "PT", Some("Lisbon"), 2),
        ],
        Vec::new(),
    );
    let filter = SearchFilter {
        search_term: Some("Greece".into()),
        ..Default::default()
    };

    let where_json = filter.compile(geo).to_where();
    assert_eq!(
        where_json["AND"][0]["OR"][1],
        serde_json::json!({ "locationValue": { "in": ["GR"] } })
    );
    assert_eq!(ids(&get_listings(&store, geo, &filter).unwrap()), vec!["athens"]);
}

#[test]
fn reservations_by_author_and_dangling_listing() {
    let store = MemoryStore::new(
        vec![listing("lisbon", 2, "PT", Some("Lisbon"), 1)],
        vec![
            reservation("r1", "lisbon", day(2024, 7, 10), day(2024, 7, 15)),
            reservation("r2", "deleted", day(2024, 8, 1), day(2024, 8, 3)),
        ],
    );

    let all = get_reservations(&store, &ReservationQuery::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "r1");
    assert_eq!(all[0].start_date, "2024-07-10T00:00:00.000Z");
    assert_eq!(all[0].listing.id, "lisbon");

    let by_author = ReservationQuery {
        author_id: Some("owner-lisbon".into()),
        ..Default::default()
    };
    assert_eq!(get_reservations(&store, &by_author).unwrap().len(), 1);

    let by_other = ReservationQuery {
        author_id: Some("owner-nyc".into()),
        ..Default::default()
    };
    assert!(get_reservations(&store, &by_other).unwrap().is_empty());
}

struct BrokenStore;

impl ListingStore for BrokenStore {
    fn find_listings(&self, _pred: &Predicate) -> Result<Vec<Listing>> {
        Err(StayError::Store("connection refused".into()))
    }

    fn find_reservations(&self, _pred: &Predicate) -> Result<Vec<(Reservation, Option<Listing>)>> {
        Err(StayError::Store("connection refused".into()))
    }
}

#[test]
fn store_errors_propagate() {
    let geo = DefaultGeoDb::load().unwrap();
    let err = get_listings(&BrokenStore, geo, &SearchFilter::default()).unwrap_err();
    assert!(matches!(err, StayError::Store(_)));
    assert!(get_reservations(&BrokenStore, &ReservationQuery::default()).is_err());
}

#[test]
fn store_seed_parses_camel_case_json() {
    let seed: StoreSeed = serde_json::from_str(
        r#"{
            "listings": [{
                "id": "l1", "title": "Loft", "createdAt": "2024-01-02T03:04:05Z",
                "category": "Modern", "roomCount": 2, "bathroomCount": 1,
                "guestCount": 4, "locationValue": "PT", "city": "Porto",
                "price": 120, "userId": "u1"
            }],
            "reservations": []
        }"#,
    )
    .unwrap();
    let store = MemoryStore::from_seed(seed);
    assert_eq!(store.listings().len(), 1);
}
