//! Command-line parsing for the parcel lookup tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! lookup code; `app` turns these structs into resolver calls.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{ENV_PARCEL_LAYER_URL, ENV_TIMEOUT_SECS};
use crate::domain::QueryOptions;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "parcels", version, about = "Resolve addresses and block-lot ids to parcel records")]
pub struct Cli {
    /// Base URL of the parcel feature layer (the `/query` endpoint is appended).
    #[arg(long, global = true, env = ENV_PARCEL_LAYER_URL)]
    pub layer_url: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up parcels by street address.
    Address(AddressArgs),
    /// Look up a parcel by block-lot id (e.g. 3512008).
    Parcel(ParcelArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Options shared by both lookups.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Comma-separated attribute fields to return.
    #[arg(long)]
    pub out_fields: Option<String>,

    /// Include parcel polygon geometry.
    #[arg(long)]
    pub geometry: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Args, Clone)]
pub struct AddressArgs {
    /// Free-form street address, e.g. "1650 Mission St #100".
    pub address: String,

    /// On no exact match, retry without the unit and then across the block.
    #[arg(long)]
    pub suggestions: bool,

    /// Print the tagged components and predicate instead of querying.
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ParcelArgs {
    /// Block-lot id.
    pub blklot: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl OutputArgs {
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            out_fields: self.out_fields.clone(),
            // Geometry stays off unless asked for, so leave the default alone.
            return_geometry: self.geometry.then_some(true),
            return_suggestions: false,
        }
    }
}

impl AddressArgs {
    pub fn query_options(&self) -> QueryOptions {
        self.output.query_options().with_suggestions(self.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_address_command() {
        let cli = Cli::try_parse_from([
            "parcels",
            "--layer-url",
            "https://gis.example/MapServer/0",
            "address",
            "1650 mission st #100",
            "--suggestions",
            "--geometry",
        ])
        .unwrap();
        assert_eq!(cli.layer_url.as_deref(), Some("https://gis.example/MapServer/0"));
        let Command::Address(args) = cli.command else {
            panic!("expected address command");
        };
        assert_eq!(args.address, "1650 mission st #100");
        let options = args.query_options();
        assert!(options.return_suggestions);
        assert_eq!(options.return_geometry, Some(true));
        assert_eq!(options.out_fields, None);
        assert_eq!(args.output.format, OutputFormat::Json);
    }

    #[test]
    fn parses_parcel_command() {
        let cli = Cli::try_parse_from([
            "parcels",
            "parcel",
            "3512008",
            "--out-fields",
            "block_num,lot_num",
            "--format",
            "table",
        ])
        .unwrap();
        let Command::Parcel(args) = cli.command else {
            panic!("expected parcel command");
        };
        assert_eq!(args.blklot, "3512008");
        let options = args.output.query_options();
        assert_eq!(options.out_fields.as_deref(), Some("block_num,lot_num"));
        assert_eq!(options.return_geometry, None);
        assert!(!options.return_suggestions);
        assert_eq!(args.output.format, OutputFormat::Table);
    }
}
