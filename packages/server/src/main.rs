#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the SIGACT map application.

use clap::Parser;
use sigact_map_server::config::ServerConfig;

#[derive(Parser)]
#[command(name = "sigact_map_server", about = "SIGACT map API server")]
struct Cli {
    /// Prompt for configuration instead of reading it only from the
    /// environment
    #[arg(long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    if cli.interactive {
        sigact_map_server::interactive::run(config).await
    } else {
        sigact_map_server::run_server(config).await
    }
}
