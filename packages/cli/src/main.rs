#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for roof estimates and project profitability.
//!
//! ```text
//! roofdesk profit <inputs.json> <actuals.json> [--json]
//! roofdesk measure <outline.geojson> [--pitch 6/12] [--threshold 15]
//! roofdesk quote <outline.geojson> [--pitch 6/12] [--sheet standard] [--features vent=4,chimney=1]
//! roofdesk analyze <outline.geojson> [--address "..."] [--sheet premium]
//! roofdesk sheets
//! ```
//!
//! `analyze` calls the external roof analysis gateway configured through
//! `ROOF_ANALYSIS_URL` / `ROOF_ANALYSIS_API_KEY`. Set `RUST_LOG=debug` for
//! pricing detail.

mod render;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use roofdesk_profit_models::{Actuals, ProfitInputs};
use roofdesk_roof::edges::DEFAULT_ANGLE_THRESHOLD_DEG;
use roofdesk_roof::estimate::{
    EstimateRequest, estimate_roof, measure_roof, quote_roof, ring_from_geojson,
};
use roofdesk_roof::price_sheets::{
    DEFAULT_PRICE_SHEET_ID, all_price_sheets, parse_price_sheet, price_sheet,
};
use roofdesk_roof_models::{Coordinate, FeatureKind, PricingConfig, RoofFeatures};
use thiserror::Error;

/// Errors specific to command-line input.
#[derive(Debug, Error)]
enum CliError {
    /// A `--features` entry could not be read.
    #[error("Invalid feature '{entry}': expected <kind>=<count> (vent, chimney, skylight, hvac)")]
    InvalidFeature {
        /// The offending entry.
        entry: String,
    },

    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[derive(Parser)]
#[command(
    name = "roofdesk",
    about = "Roof measurement, quoting and project profitability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare estimated and actual project costs
    Profit {
        /// Estimate snapshot (JSON `ProfitInputs`)
        inputs: PathBuf,
        /// Actual cost snapshot (JSON `Actuals`)
        actuals: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Measure a roof outline
    Measure {
        #[command(flatten)]
        outline: OutlineArgs,
        /// Roof pitch, e.g. 6/12
        #[arg(long, default_value = "4/12")]
        pitch: String,
    },
    /// Price a roof outline from geometry and entered features
    Quote {
        #[command(flatten)]
        outline: OutlineArgs,
        /// Roof pitch, e.g. 6/12
        #[arg(long, default_value = "4/12")]
        pitch: String,
        #[command(flatten)]
        pricing: PricingArgs,
    },
    /// Run the external roof analysis, then measure and price
    Analyze {
        #[command(flatten)]
        outline: OutlineArgs,
        /// Pitch override; the analyzed pitch is used when omitted
        #[arg(long)]
        pitch: Option<String>,
        /// Street address sent with the analysis request
        #[arg(long)]
        address: Option<String>,
        #[command(flatten)]
        pricing: PricingArgs,
    },
    /// List available price sheets
    Sheets,
}

#[derive(Args)]
struct OutlineArgs {
    /// GeoJSON file holding the roof outline polygon
    outline: PathBuf,
    /// Eave/rake classification threshold in degrees
    #[arg(long, default_value_t = DEFAULT_ANGLE_THRESHOLD_DEG)]
    threshold: f64,
    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PricingArgs {
    /// Embedded price sheet id
    #[arg(long, default_value = DEFAULT_PRICE_SHEET_ID)]
    sheet: String,
    /// Price sheet TOML file (overrides --sheet)
    #[arg(long)]
    sheet_file: Option<PathBuf>,
    /// Contingency fraction (overrides the sheet), e.g. 0.1
    #[arg(long)]
    contingency: Option<f64>,
    /// Feature counts, e.g. vent=4,chimney=1
    #[arg(long)]
    features: Option<String>,
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn read_outline(path: &Path) -> Result<Vec<Coordinate>, Box<dyn std::error::Error>> {
    let ring = ring_from_geojson(&read_file(path)?)?;
    log::debug!("Read {} outline points from {}", ring.len(), path.display());
    Ok(ring)
}

/// Parses `vent=4,chimney=1` into feature counts. Later entries for the
/// same kind replace earlier ones.
fn parse_features(list: &str) -> Result<RoofFeatures, CliError> {
    let mut features = RoofFeatures::default();

    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = || CliError::InvalidFeature {
            entry: entry.to_string(),
        };
        let (kind, count) = entry.split_once('=').ok_or_else(invalid)?;
        let kind = kind
            .trim()
            .to_lowercase()
            .trim_end_matches('s')
            .parse::<FeatureKind>()
            .map_err(|_| invalid())?;
        let count = count.trim().parse::<u32>().map_err(|_| invalid())?;
        features.set(kind, count);
    }

    Ok(features)
}

fn load_pricing(args: &PricingArgs) -> Result<PricingConfig, Box<dyn std::error::Error>> {
    let sheet = match &args.sheet_file {
        Some(path) => parse_price_sheet(&read_file(path)?)?,
        None => price_sheet(&args.sheet)?,
    };
    log::info!("Using price sheet '{}' ({})", sheet.id, sheet.name);

    let mut pricing = sheet.pricing;
    if let Some(contingency) = args.contingency {
        pricing.contingency_pct = contingency;
    }
    Ok(pricing)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Profit {
            inputs,
            actuals,
            json,
        } => {
            let inputs: ProfitInputs = serde_json::from_str(&read_file(&inputs)?)?;
            let actuals: Actuals = serde_json::from_str(&read_file(&actuals)?)?;
            let report = roofdesk_profit::build_report(&inputs, &actuals);

            if json {
                print_json(&report)?;
            } else {
                print!("{}", render::profit_report(&report));
            }
        }
        Commands::Measure { outline, pitch } => {
            let ring = read_outline(&outline.outline)?;
            let measurements = measure_roof(&ring, &pitch, outline.threshold);

            if outline.json {
                print_json(&measurements)?;
            } else {
                print!("{}", render::measurements(&measurements));
            }
        }
        Commands::Quote {
            outline,
            pitch,
            pricing,
        } => {
            let ring = read_outline(&outline.outline)?;
            let features = pricing
                .features
                .as_deref()
                .map(parse_features)
                .transpose()?
                .unwrap_or_default();
            let config = load_pricing(&pricing)?;
            let estimate = quote_roof(&ring, &pitch, features, &config, outline.threshold);

            if outline.json {
                print_json(&estimate)?;
            } else {
                print!("{}", render::estimate(&estimate));
            }
        }
        Commands::Analyze {
            outline,
            pitch,
            address,
            pricing,
        } => {
            let ring = read_outline(&outline.outline)?;
            let config = load_pricing(&pricing)?;
            let analyzer = roofdesk_vision::create_analyzer_from_env()?;

            let request = EstimateRequest {
                pitch,
                address,
                features: pricing.features.as_deref().map(parse_features).transpose()?,
                angle_threshold_deg: outline.threshold,
                ..EstimateRequest::new(ring)
            };

            let estimate = estimate_roof(&request, analyzer.as_ref(), &config).await?;

            if outline.json {
                print_json(&estimate)?;
            } else {
                print!("{}", render::estimate(&estimate));
            }
        }
        Commands::Sheets => {
            println!("{:<12} {:>10} {:>10} {:>8} NAME", "ID", "MAT/SQ", "LABOR/SQ", "CONT.");
            println!("{}", "-".repeat(72));
            for sheet in all_price_sheets() {
                let p = &sheet.pricing;
                println!(
                    "{:<12} {:>10.2} {:>10.2} {:>7.0}% {}",
                    sheet.id,
                    p.cost_per_square,
                    p.labor_per_square,
                    p.contingency_pct * 100.0,
                    sheet.name
                );
            }
        }
    }

    Ok(())
}
