// crates/staydb-core/src/error.rs
use thiserror::Error;

/// Errors raised while loading reference data or talking to a listing store.
///
/// The filter compiler and the city search never produce these: malformed
/// user input is absorbed there, not reported.
#[derive(Debug, Error)]
pub enum StayError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Raised by a [`crate::store::ListingStore`] implementation.
    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, StayError>;
