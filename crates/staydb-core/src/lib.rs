// crates/staydb-core/src/lib.rs

//! Filtering core of a vacation-rental marketplace.
//!
//! - [`filter`] compiles listing search parameters into a typed
//!   [`predicate::Predicate`].
//! - [`search`] runs city and country text searches over the bundled
//!   geographic reference table ([`GeoDb`]).
//! - [`store`] executes predicates and normalizes listings/reservations.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod error;
pub mod filter;
pub mod listing;
pub mod loader;
pub mod model;
pub mod predicate;
pub mod prelude;
pub mod search;
pub mod store;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::{CityMatch, Coordinates, DbStats};
pub use crate::error::{Result, StayError};
pub use crate::filter::{compile_filter, ReservationQuery, SearchFilter};
pub use crate::model::{City, Country, DefaultBackend, DefaultGeoDb, GeoDb};
pub use crate::predicate::Predicate;
pub use crate::traits::{CountryIndex, GeoBackend, GeoSearch};
