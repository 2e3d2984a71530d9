// crates/staydb-core/src/config.rs
use crate::error::{Result, StayError};
use crate::text::TextMatch;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for city search front ends.
///
/// ```rust
/// use staydb_core::config::SearchConfig;
/// use staydb_core::text::TextMatch;
///
/// let cfg: SearchConfig = serde_json::from_str(r#"{ "textMatch": "folded" }"#).unwrap();
/// assert_eq!(cfg.default_limit, 10);
/// assert_eq!(cfg.text_match, TextMatch::Folded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Result cap used when the caller does not pass one.
    pub default_limit: usize,
    pub text_match: TextMatch,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            text_match: TextMatch::Lowercase,
        }
    }
}

impl SearchConfig {
    /// Read a JSON config file; missing keys keep their defaults.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            StayError::NotFound(format!("Config not found at {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
