//! staydb-cli
//! ==========
//!
//! Command-line interface for the `staydb-core` listing filter compiler and
//! city search.
//!
//! This crate primarily provides a binary (`staydb`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Basic usage:
//!
//! ```text
//! staydb --help
//! staydb stats
//! staydb cities lon --limit 5
//! staydb compile --rooms 2 --search portugal
//! staydb listings --store seed.json --start 2024-07-12 --end 2024-07-20
//! ```
//!
//! For programmatic access use the [`staydb-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
