//! staydb: command-line interface for staydb-core
//!
//! Usage examples
//! --------------
//!
//! - Show dataset stats
//!   $ staydb stats
//!
//! - Search cities by substring, or get suggestions
//!   $ staydb cities lon --limit 5
//!   $ staydb suggest
//!
//! - Compile a listing filter to the relational `where` JSON
//!   $ staydb compile --rooms 2 --search portugal --start 2024-07-12 --end 2024-07-20
//!
//! - Search listings in a JSON store seed
//!   $ staydb listings --store seed.json --guests 4
//!
//! Set `RUST_LOG=debug` to see dataset loading and compiled clause counts.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use staydb_core::config::SearchConfig;
use staydb_core::filter::{ReservationQuery, SearchFilter};
use staydb_core::store::{get_listings, get_reservations, MemoryStore};
use staydb_core::text::TextMatch;
use staydb_core::{CityMatch, CountryIndex, DefaultGeoDb, GeoSearch};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => {
            let config = SearchConfig::load_from_path(path)
                .with_context(|| format!("reading config {path}"))?;
            debug!(path = %path, ?config, "loaded search config");
            config
        }
        None => SearchConfig::default(),
    };

    // Either a custom dataset or the process-wide bundled one
    let owned;
    let db: &DefaultGeoDb = match &args.input {
        Some(path) => {
            owned = DefaultGeoDb::load_from_path(path)
                .with_context(|| format!("loading {path}"))?;
            debug!(path = %path, "using custom geo dataset");
            &owned
        }
        None => DefaultGeoDb::load()?,
    };

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Dataset statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Cities: {}", stats.cities);
        }

        Commands::Countries => {
            for c in db.countries() {
                println!("{} ({})", c.name(), c.iso2());
            }
        }

        Commands::Cities { query, limit, fold } => {
            let mode = if fold { TextMatch::Folded } else { config.text_match };
            let limit = limit.unwrap_or(config.default_limit);
            let hits = db.search_cities_with(&query, limit, mode);
            if hits.is_empty() {
                println!("No cities found matching: {query}");
            } else {
                print_cities(&hits);
            }
        }

        Commands::Popular { limit } => {
            let mut hits = db.popular_cities();
            hits.truncate(limit.unwrap_or(config.default_limit));
            print_cities(&hits);
        }

        Commands::Suggest { query, limit } => {
            let limit = limit.unwrap_or(config.default_limit);
            let hits = db.search_with_suggestions_with(&query, limit, config.text_match);
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }

        Commands::CountryMatch { term } => {
            let codes = db.country_codes_matching(&term.to_lowercase());
            if codes.is_empty() {
                eprintln!("No country name contains: {term}");
            }
            for code in codes {
                println!("{code}");
            }
        }

        Commands::Compile(filter) => {
            let filter = SearchFilter::from(filter);
            let pred = filter.compile(db);
            println!("{}", serde_json::to_string_pretty(&pred.to_where())?);
        }

        Commands::Listings { store, filter } => {
            let store = MemoryStore::load_from_path(&store)?;
            let listings = get_listings(&store, db, &SearchFilter::from(filter))?;
            println!("{}", serde_json::to_string_pretty(&listings)?);
        }

        Commands::Reservations {
            store,
            listing,
            user,
            author,
        } => {
            let store = MemoryStore::load_from_path(&store)?;
            let query = ReservationQuery {
                listing_id: listing,
                user_id: user,
                author_id: author,
            };
            let reservations = get_reservations(&store, &query)?;
            println!("{}", serde_json::to_string_pretty(&reservations)?);
        }

        Commands::BuildCache { output } => {
            db.save_cache(&output)
                .with_context(|| format!("writing cache {output}"))?;
            println!("Wrote {output}");
        }
    }

    Ok(())
}

fn print_cities(hits: &[CityMatch]) {
    for hit in hits {
        println!(
            "{} - {} ({}) [{:.4}, {:.4}]",
            hit.city, hit.country, hit.country_code, hit.coordinates.lat, hit.coordinates.lng
        );
    }
}
