// crates/staydb-core/src/listing.rs
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A rentable property as stored by the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_src: String,
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub room_count: u32,
    pub bathroom_count: u32,
    pub guest_count: u32,
    /// Country code.
    pub location_value: String,
    #[serde(default)]
    pub city: Option<String>,
    /// Nightly price.
    pub price: i64,
    /// Owner.
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    /// Guest who made the booking.
    pub user_id: String,
    pub listing_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

/// Canonical timestamp form handed to callers: `2024-07-10T00:00:00.000Z`.
pub fn canonical_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A [`Listing`] with its timestamps rendered as canonical strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_src: String,
    pub created_at: String,
    pub category: String,
    pub room_count: u32,
    pub bathroom_count: u32,
    pub guest_count: u32,
    pub location_value: String,
    pub city: Option<String>,
    pub price: i64,
    pub user_id: String,
}

impl From<Listing> for SafeListing {
    fn from(l: Listing) -> Self {
        Self {
            created_at: canonical_timestamp(&l.created_at),
            id: l.id,
            title: l.title,
            description: l.description,
            image_src: l.image_src,
            category: l.category,
            room_count: l.room_count,
            bathroom_count: l.bathroom_count,
            guest_count: l.guest_count,
            location_value: l.location_value,
            city: l.city,
            price: l.price,
            user_id: l.user_id,
        }
    }
}

/// A [`Reservation`] with canonical timestamps and its listing embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeReservation {
    pub id: String,
    pub user_id: String,
    pub listing_id: String,
    pub start_date: String,
    pub end_date: String,
    pub total_price: i64,
    pub created_at: String,
    pub listing: SafeListing,
}

impl SafeReservation {
    pub fn new(r: Reservation, listing: Listing) -> Self {
        Self {
            start_date: canonical_timestamp(&r.start_date),
            end_date: canonical_timestamp(&r.end_date),
            created_at: canonical_timestamp(&r.created_at),
            id: r.id,
            user_id: r.user_id,
            listing_id: r.listing_id,
            total_price: r.total_price,
            listing: listing.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_render_with_millis_and_z() {
        let ts = Utc.with_ymd_and_hms(2024, 7, 10, 9, 30, 0).unwrap();
        assert_eq!(canonical_timestamp(&ts), "2024-07-10T09:30:00.000Z");
    }

    #[test]
    fn listing_deserializes_from_camel_case() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "id": "l1", "title": "Loft", "createdAt": "2024-01-02T03:04:05Z",
                "category": "Modern", "roomCount": 2, "bathroomCount": 1,
                "guestCount": 4, "locationValue": "PT", "price": 120, "userId": "u1"
            }"#,
        )
        .unwrap();
        assert_eq!(listing.city, None);
        let safe = SafeListing::from(listing);
        assert_eq!(safe.created_at, "2024-01-02T03:04:05.000Z");
    }
}
