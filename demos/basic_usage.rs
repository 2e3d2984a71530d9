//! Basic usage example for staydb
//!
//! This example demonstrates how to:
//! - Load the bundled geographic dataset
//! - Search cities and get destination suggestions
//! - Look up country codes by name

use staydb_core::prelude::*;

fn main() -> Result<()> {
    println!("=== staydb Basic Usage Example ===\n");

    let db = DefaultGeoDb::load()?;
    let stats = db.stats();
    println!("Loaded {} countries, {} cities\n", stats.countries, stats.cities);

    println!("--- Example 1: Suggestions for an empty search box ---");
    for hit in db.search_with_suggestions("", 5) {
        println!("  {} ({})", hit.city, hit.country);
    }
    println!();

    println!("--- Example 2: City search ---");
    for hit in db.search_cities("san", 5) {
        println!("  {}: {}", hit.city, hit.search_field);
    }
    println!();

    println!("--- Example 3: No match stays empty ---");
    let none = db.search_with_suggestions("atlantis", 5);
    println!("  {} results for 'atlantis'\n", none.len());

    println!("--- Example 4: Countries by name ---");
    println!("  'united' -> {:?}", db.country_codes_matching("united"));

    Ok(())
}
