//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments and loads settings
//! - runs the address or parcel lookup
//! - prints the result

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{AddressArgs, Cli, Command, OutputArgs, OutputFormat, ParcelArgs};
use crate::config::Settings;
use crate::data::ArcgisClient;
use crate::domain::{DEFAULT_OUT_FIELDS, ParcelFeature, QueryParameters};
use crate::error::AppError;
use crate::resolver::ParcelResolver;

/// Entry point for the `parcels` binary.
pub fn run() -> Result<(), AppError> {
    // Load `.env` before clap reads `env = ...` defaults.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let settings = Settings::from_env()?.with_overrides(cli.layer_url.clone(), cli.timeout_secs)?;
    let resolver = ParcelResolver::new(settings.layers(), ArcgisClient::from_settings(&settings)?);

    match cli.command {
        Command::Address(args) => handle_address(&resolver, &args),
        Command::Parcel(args) => handle_parcel(&resolver, &args),
    }
}

/// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_address(resolver: &ParcelResolver<ArcgisClient>, args: &AddressArgs) -> Result<(), AppError> {
    let options = args.query_options();

    if args.dry_run {
        let plan = resolver.plan_address(&args.address);
        let params = QueryParameters::from_options(&options);
        print!("{}", crate::report::format_address_plan(&plan, &params));
        return Ok(());
    }

    let features = resolver.resolve_by_address(&args.address, &options)?;
    print_features(&features, &args.output)
}

fn handle_parcel(resolver: &ParcelResolver<ArcgisClient>, args: &ParcelArgs) -> Result<(), AppError> {
    let features = resolver.resolve_by_parcel(&args.blklot, &args.output.query_options())?;
    print_features(&features, &args.output)
}

fn print_features(features: &[ParcelFeature], output: &OutputArgs) -> Result<(), AppError> {
    match output.format {
        OutputFormat::Json => println!("{}", crate::report::format_features_json(features)?),
        OutputFormat::Table => {
            let fields = output.out_fields.as_deref().unwrap_or(DEFAULT_OUT_FIELDS);
            print!("{}", crate::report::format_features_table(features, fields));
        }
    }
    Ok(())
}
