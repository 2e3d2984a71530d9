use clap::{Args, Parser, Subcommand};
use staydb_core::filter::{CountParam, SearchFilter};

/// CLI arguments for staydb
#[derive(Debug, Parser)]
#[command(
    name = "staydb",
    version,
    about = "CLI for the staydb listing filter compiler and city search"
)]
pub struct CliArgs {
    /// Path to a geo dataset (.json, .json.gz or .bin); defaults to the bundled one
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Path to a JSON search config (defaultLimit, textMatch)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset
    Stats,

    /// List all countries
    Countries,

    /// Search for cities whose name contains a substring
    Cities {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
        /// Ignore diacritics when matching
        #[arg(long)]
        fold: bool,
    },

    /// Show the curated popular destinations
    Popular {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Popular cities for an empty query, search results otherwise
    Suggest {
        #[arg(default_value = "")]
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Country codes whose name contains a term
    CountryMatch { term: String },

    /// Compile a listing filter and print its `where` JSON
    Compile(FilterArgs),

    /// Run a listing search against a JSON store seed
    Listings {
        /// Store seed document ({"listings": [...], "reservations": [...]})
        #[arg(long)]
        store: String,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List reservations from a JSON store seed
    Reservations {
        #[arg(long)]
        store: String,
        #[arg(long)]
        listing: Option<String>,
        /// Guest who made the reservation
        #[arg(long)]
        user: Option<String>,
        /// Owner of the reserved listing
        #[arg(long)]
        author: Option<String>,
    },

    /// Write the dataset as a bincode cache
    BuildCache { output: String },
}

/// Listing filter flags. Counts are taken verbatim so malformed values are
/// ignored the same way the web front end ignores them.
#[derive(Debug, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub rooms: Option<String>,
    #[arg(long)]
    pub guests: Option<String>,
    #[arg(long)]
    pub bathrooms: Option<String>,
    /// Country code
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// Free-text location search (overrides --location/--city)
    #[arg(short = 's', long = "search")]
    pub search: Option<String>,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
}

impl From<FilterArgs> for SearchFilter {
    fn from(a: FilterArgs) -> Self {
        SearchFilter {
            user_id: a.user,
            category: a.category,
            room_count: a.rooms.map(CountParam::Text),
            guest_count: a.guests.map(CountParam::Text),
            bathroom_count: a.bathrooms.map(CountParam::Text),
            location_value: a.location,
            city: a.city,
            search_term: a.search,
            start_date: a.start,
            end_date: a.end,
        }
    }
}
