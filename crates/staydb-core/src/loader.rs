// crates/staydb-core/src/loader.rs

//! # Data Loader
//!
//! Handles the physical layer (I/O, decompression) for the geographic
//! reference table and keeps the bundled dataset in a process-wide cache.

use crate::error::{Result, StayError};
use crate::model::{build_geodb, CountriesRaw, DefaultBackend, GeoDb};
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

// Single in-process cache so we only deserialize once per process.
static GEO_DB_CACHE: OnceCell<GeoDb<DefaultBackend>> = OnceCell::new();

/// The reference dataset shipped with the crate.
const BUNDLED_DATASET: &str = include_str!("../data/geo.json");

impl GeoDb<DefaultBackend> {
    /// The bundled dataset, parsed on first use and shared for the lifetime
    /// of the process.
    pub fn load() -> Result<&'static Self> {
        GEO_DB_CACHE.get_or_try_init(|| {
            let raw: CountriesRaw = serde_json::from_str(BUNDLED_DATASET)?;
            let db = build_geodb::<DefaultBackend>(raw);
            debug!(
                countries = db.country_count(),
                cities = db.city_count(),
                "loaded bundled geo dataset"
            );
            Ok(db)
        })
    }

    /// Load a dataset from disk.
    ///
    /// - `*.bin` is read as a bincode cache written by [`GeoDb::save_cache`].
    /// - `*.gz` is gunzipped JSON (requires the `compact` feature).
    /// - anything else is plain JSON.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = open_stream(path)?;

        if has_extension(path, "bin") {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            let db: Self = bincode::deserialize(&bytes)?;
            debug!(path = %path.display(), "loaded geo dataset from bincode cache");
            return Ok(db);
        }

        let raw: CountriesRaw = serde_json::from_reader(reader)?;
        let db = build_geodb::<DefaultBackend>(raw);
        debug!(
            path = %path.display(),
            countries = db.country_count(),
            cities = db.city_count(),
            "loaded geo dataset from json"
        );
        Ok(db)
    }

    /// Write the database as a bincode cache for fast subsequent loads.
    pub fn save_cache(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = bincode::serialize(self)?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Opens a file, buffers it, and wraps `.gz` files in a Gzip decoder.
/// Returns a generic Reader so the caller doesn't care about the compression.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        StayError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if has_extension(path, "gz") {
        #[cfg(feature = "compact")]
        {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }

        #[cfg(not(feature = "compact"))]
        {
            return Err(StayError::NotFound(format!(
                "{} is gzip-compressed but the `compact` feature is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}
