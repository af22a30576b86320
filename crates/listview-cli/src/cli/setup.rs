use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "listview",
    bin_name = "listview",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Search, filter and page through JSON record files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,
}

/// Where records and the page definition come from.
#[derive(Args, Debug, Clone)]
pub struct Source {
    /// A <name>.json array, or a directory of <entity>.json files
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// Page configuration (TOML)
    #[arg(long = "page-config", value_name = "FILE")]
    pub page_config: PathBuf,

    /// Permission grants (JSON object of module → features). Default: allow all
    #[arg(long, value_name = "FILE")]
    pub permissions: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive search across the page's search fields
    #[arg(short, long)]
    pub search: Option<String>,

    /// Facet filter; repeat for more values or facets
    #[arg(short = 'f', long = "facet", value_name = "KEY=VALUE", value_parser = parse_facet)]
    pub facets: Vec<(String, String)>,

    /// Sort field, optionally suffixed with :asc or :desc
    #[arg(long, value_name = "FIELD[:desc]")]
    pub sort: Option<String>,

    /// Select a record by id
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of records
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page number (1-indexed)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the values each facet can take
    Facets {
        #[command(flatten)]
        source: Source,

        /// Only this facet
        facet: Option<String>,
    },

    /// Print the export table for the filtered (or selected) records as JSON
    Export {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Delete records by id
    #[command(alias = "rm")]
    Delete {
        #[command(flatten)]
        source: Source,

        /// Ids to delete
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn parse_facet(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}
