//! Command-line argument parsing for db-select.

use crate::query::{SelectRequest, DEFAULT_ORDER_COLUMN};
use crate::safety::WILDCARD;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Fetch mode accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FetchArg {
    /// Every row
    #[default]
    All,
    /// Row with the smallest order column value
    First,
    /// Row with the largest order column value
    Last,
}

impl FetchArg {
    fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

/// Run a single-table SELECT against a database configured by DB_{KEY}_* variables.
#[derive(Parser, Debug)]
#[command(name = "db-select")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database key; selects DB_{KEY}_HOST, DB_{KEY}_PORT, DB_{KEY}_USER, DB_{KEY}_PASSWORD, DB_{KEY}_NAME
    #[arg(value_name = "DB_KEY")]
    pub db_key: String,

    /// Table to select from
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Which rows to return
    #[arg(short, long, value_enum, default_value_t = FetchArg::All)]
    pub fetch: FetchArg,

    /// Columns to select ("*" or a comma-separated list)
    #[arg(short, long, default_value = WILDCARD)]
    pub column: String,

    /// Column ordering first/last fetches
    #[arg(short, long, default_value = DEFAULT_ORDER_COLUMN)]
    pub order_column: String,

    /// .env file to load before resolving the database key
    #[arg(long, value_name = "PATH", env = "DB_SELECT_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Builds the select request described by the arguments.
    pub fn to_request(&self) -> SelectRequest {
        SelectRequest::new(&self.db_key, &self.table)
            .fetch(self.fetch.as_str())
            .column(&self.column)
            .order_column(&self.order_column)
    }
}
