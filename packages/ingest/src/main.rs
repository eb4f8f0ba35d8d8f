#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for inspecting a SIGACT record file.
//!
//! Runs the same ingestion pipeline the server uses and prints what it
//! produced, which makes it easy to check a new export before serving it.

use std::path::PathBuf;

use clap::Parser;
use sigact_map_ingest::{LoadOptions, load_from_path, parse_delimiter};

#[derive(Parser)]
#[command(name = "sigact_map_ingest", about = "SIGACT record file inspector")]
struct Cli {
    /// Path to the delimited record file
    records: PathBuf,
    /// Optional boundary GeoJSON file to load alongside the records
    #[arg(long)]
    boundary: Option<PathBuf>,
    /// Field delimiter (a single ASCII character, `\t` for tabs)
    #[arg(long, default_value = ",")]
    delimiter: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    let Some(delimiter) = parse_delimiter(&cli.delimiter) else {
        return Err(format!("invalid delimiter {:?}", cli.delimiter).into());
    };

    let store = load_from_path(
        &cli.records,
        cli.boundary.as_deref(),
        &LoadOptions { delimiter },
    )?;

    println!("Incidents:  {}", store.len());
    println!("Dates:      {}", store.dates().len());
    if let (Some(first), Some(last)) = (store.dates().first(), store.dates().last()) {
        println!("Range:      {first} .. {last}");
    }
    println!("Types:      {}", store.types().len());
    println!("Categories: {}", store.categories().len());
    println!("Provinces:  {}", store.provinces().len());

    let unplaced = store
        .incidents()
        .iter()
        .filter(|i| !i.position.is_finite())
        .count();
    println!("Unplaced:   {unplaced}");
    println!(
        "Boundary:   {}",
        if store.boundary().is_some() {
            "loaded"
        } else {
            "none"
        }
    );

    Ok(())
}
