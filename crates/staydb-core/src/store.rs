// crates/staydb-core/src/store.rs

//! # Listing Store
//!
//! The seam between compiled predicates and whatever executes them. A real
//! deployment plugs a relational client in behind [`ListingStore`] (rendering
//! predicates with [`Predicate::to_where`]); [`MemoryStore`] interprets the
//! tree directly and backs the CLI and the tests.

use crate::error::{Result, StayError};
use crate::filter::{ReservationQuery, SearchFilter};
use crate::listing::{Listing, Reservation, SafeListing, SafeReservation};
use crate::predicate::{Field, Predicate, Record, Relation, Value};
use crate::traits::CountryIndex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, warn};

pub trait ListingStore {
    /// Listings matching `pred`, newest first.
    fn find_listings(&self, pred: &Predicate) -> Result<Vec<Listing>>;

    /// Reservations matching `pred`, newest first, each with its listing if
    /// the listing still exists.
    fn find_reservations(&self, pred: &Predicate) -> Result<Vec<(Reservation, Option<Listing>)>>;
}

/// Seed document for [`MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSeed {
    pub listings: Vec<Listing>,
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    listings: Vec<Listing>,
    reservations: Vec<Reservation>,
}

impl MemoryStore {
    pub fn new(listings: Vec<Listing>, reservations: Vec<Reservation>) -> Self {
        Self {
            listings,
            reservations,
        }
    }

    pub fn from_seed(seed: StoreSeed) -> Self {
        Self::new(seed.listings, seed.reservations)
    }

    /// Read a [`StoreSeed`] JSON document.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            StayError::NotFound(format!("Store seed not found at {}: {}", path.display(), e))
        })?;
        let seed: StoreSeed = serde_json::from_slice(&bytes)?;
        debug!(
            listings = seed.listings.len(),
            reservations = seed.reservations.len(),
            "loaded store seed"
        );
        Ok(Self::from_seed(seed))
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    fn listing(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    fn listing_row<'a>(&'a self, listing: &'a Listing) -> ListingRow<'a> {
        ListingRow {
            listing,
            reservations: self
                .reservations
                .iter()
                .filter(|r| r.listing_id == listing.id)
                .collect(),
        }
    }
}

impl ListingStore for MemoryStore {
    fn find_listings(&self, pred: &Predicate) -> Result<Vec<Listing>> {
        let mut out: Vec<Listing> = self
            .listings
            .iter()
            .filter(|l| pred.matches(&self.listing_row(l)))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    fn find_reservations(&self, pred: &Predicate) -> Result<Vec<(Reservation, Option<Listing>)>> {
        let mut out: Vec<(Reservation, Option<Listing>)> = self
            .reservations
            .iter()
            .filter(|r| {
                pred.matches(&ReservationRow {
                    reservation: r,
                    listing: self.listing(&r.listing_id),
                })
            })
            .map(|r| (r.clone(), self.listing(&r.listing_id).cloned()))
            .collect();
        out.sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at));
        Ok(out)
    }
}

struct ListingRow<'a> {
    listing: &'a Listing,
    reservations: Vec<&'a Reservation>,
}

impl Record for ListingRow<'_> {
    fn value(&self, field: Field) -> Option<Value> {
        listing_value(self.listing, field)
    }

    fn exists(&self, relation: Relation, pred: &Predicate) -> bool {
        match relation {
            Relation::Reservations => self.reservations.iter().any(|r| {
                pred.matches(&ReservationRow {
                    reservation: r,
                    listing: Some(self.listing),
                })
            }),
            Relation::Listing => false,
        }
    }
}

struct ReservationRow<'a> {
    reservation: &'a Reservation,
    listing: Option<&'a Listing>,
}

impl Record for ReservationRow<'_> {
    fn value(&self, field: Field) -> Option<Value> {
        let r = self.reservation;
        match field {
            Field::UserId => Some(r.user_id.clone().into()),
            Field::ListingId => Some(r.listing_id.clone().into()),
            Field::StartDate => Some(r.start_date.into()),
            Field::EndDate => Some(r.end_date.into()),
            _ => None,
        }
    }

    fn exists(&self, relation: Relation, pred: &Predicate) -> bool {
        match (relation, self.listing) {
            (Relation::Listing, Some(listing)) => pred.matches(&ListingRow {
                listing,
                reservations: Vec::new(),
            }),
            _ => false,
        }
    }
}

fn listing_value(l: &Listing, field: Field) -> Option<Value> {
    match field {
        Field::UserId => Some(l.user_id.clone().into()),
        Field::ListingId => Some(l.id.clone().into()),
        Field::Category => Some(l.category.clone().into()),
        Field::RoomCount => Some(l.room_count.into()),
        Field::GuestCount => Some(l.guest_count.into()),
        Field::BathroomCount => Some(l.bathroom_count.into()),
        Field::LocationValue => Some(l.location_value.clone().into()),
        Field::City => l.city.clone().map(Value::from),
        Field::StartDate | Field::EndDate => None,
    }
}

/// Compile `filter`, run it against `store`, and normalize the results.
pub fn get_listings<S, G>(store: &S, geo: &G, filter: &SearchFilter) -> Result<Vec<SafeListing>>
where
    S: ListingStore + ?Sized,
    G: CountryIndex + ?Sized,
{
    let pred = filter.compile(geo);
    let listings = store.find_listings(&pred).map_err(|e| {
        error!(error = %e, "listing query failed");
        e
    })?;
    Ok(listings.into_iter().map(SafeListing::from).collect())
}

/// Compile `query`, run it against `store`, and normalize the results.
///
/// Reservations whose listing no longer exists are skipped with a warning.
pub fn get_reservations<S>(store: &S, query: &ReservationQuery) -> Result<Vec<SafeReservation>>
where
    S: ListingStore + ?Sized,
{
    let pred = query.compile();
    let rows = store.find_reservations(&pred).map_err(|e| {
        error!(error = %e, "reservation query failed");
        e
    })?;

    let mut out = Vec::with_capacity(rows.len());
    for (reservation, listing) in rows {
        match listing {
            Some(listing) => out.push(SafeReservation::new(reservation, listing)),
            None => warn!(
                reservation = %reservation.id,
                "reservation has a null listing reference"
            ),
        }
    }
    Ok(out)
}
