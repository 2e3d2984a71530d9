//! staydb prelude: bring common types and traits into scope for demos.

#![allow(unused_imports)]

pub use crate::common::{CityMatch, Coordinates, DbStats};
pub use crate::config::SearchConfig;
pub use crate::error::{Result, StayError};
pub use crate::filter::{compile_filter, CountParam, ReservationQuery, SearchFilter};
pub use crate::listing::{Listing, Reservation, SafeListing, SafeReservation};
pub use crate::model::{City, Country, DefaultBackend, DefaultGeoDb, GeoDb};
pub use crate::predicate::{Field, Predicate, Relation, Value};
pub use crate::store::{get_listings, get_reservations, ListingStore, MemoryStore, StoreSeed};
pub use crate::text::TextMatch;
pub use crate::traits::{CountryIndex, GeoBackend, GeoSearch, NameMatch};
