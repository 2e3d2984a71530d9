// crates/staydb-core/src/text.rs
use serde::{Deserialize, Serialize};

/// Lower-cases a string for plain substring matching.
///
/// This is the matching key used by the listing filter and the default city
/// search: no transliteration, so `"zürich"` does not match `"zurich"`.
#[inline]
pub fn lower_key(s: &str) -> String {
    s.to_lowercase()
}

/// Convert a string into a folded key suitable for accent-insensitive comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use staydb_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Zürich"), "zurich");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// How city names are normalized before substring matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMatch {
    /// Lower-case only.
    #[default]
    Lowercase,
    /// Transliterate to ASCII, then lower-case.
    Folded,
}

impl TextMatch {
    #[inline]
    pub fn key(self, s: &str) -> String {
        match self {
            TextMatch::Lowercase => lower_key(s),
            TextMatch::Folded => fold_key(s),
        }
    }
}
