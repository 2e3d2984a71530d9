//! Listing search example for staydb
//!
//! Compiles a few filters, prints their `where` JSON and runs them against an
//! in-memory store.

use staydb_core::prelude::*;

const SEED: &str = r#"{
    "listings": [
        { "id": "l1", "title": "Alfama loft", "createdAt": "2024-01-01T00:00:00Z",
          "category": "Modern", "roomCount": 2, "bathroomCount": 1, "guestCount": 4,
          "locationValue": "PT", "city": "Lisbon", "price": 120, "userId": "u1" },
        { "id": "l2", "title": "Ribeira flat", "createdAt": "2024-02-01T00:00:00Z",
          "category": "Modern", "roomCount": 3, "bathroomCount": 2, "guestCount": 6,
          "locationValue": "PT", "city": "Porto", "price": 140, "userId": "u2" }
    ],
    "reservations": [
        { "id": "r1", "userId": "g1", "listingId": "l1",
          "startDate": "2024-07-10T00:00:00Z", "endDate": "2024-07-15T00:00:00Z",
          "totalPrice": 600, "createdAt": "2024-06-01T00:00:00Z" }
    ]
}"#;

fn main() -> Result<()> {
    let db = DefaultGeoDb::load()?;
    let seed: StoreSeed = serde_json::from_str(SEED)?;
    let store = MemoryStore::from_seed(seed);

    let filter = SearchFilter {
        room_count: Some("2".into()),
        search_term: Some("portugal".into()),
        start_date: Some("2024-07-12".into()),
        end_date: Some("2024-07-20".into()),
        ..Default::default()
    };

    println!("where = {}", filter.compile(db).to_where());
    for listing in get_listings(&store, db, &filter)? {
        println!("  {} ({}, created {})", listing.title, listing.id, listing.created_at);
    }

    let owner = ReservationQuery {
        author_id: Some("u1".into()),
        ..Default::default()
    };
    for r in get_reservations(&store, &owner)? {
        println!("  reservation {} on {} from {}", r.id, r.listing.title, r.start_date);
    }
    Ok(())
}
