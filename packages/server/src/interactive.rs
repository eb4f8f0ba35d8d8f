//! Interactive mode for the server.
//!
//! Prompts the user for the data files, bind address, and port before
//! starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::config::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Every prompt defaults to the value from `defaults`, so pressing enter
/// through all of them is the same as a non-interactive start. Delegates
/// to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(defaults: ServerConfig) -> std::io::Result<()> {
    println!("SIGACT Map Server");
    println!();

    let data_path: String = Input::new()
        .with_prompt("Incident record file")
        .default(defaults.data_path.display().to_string())
        .interact_text()
        .unwrap_or_else(|_| defaults.data_path.display().to_string());

    let boundary_default = defaults
        .boundary_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let boundary_path: String = Input::new()
        .with_prompt("Boundary GeoJSON file (blank for none)")
        .default(boundary_default.clone())
        .allow_empty(true)
        .interact_text()
        .unwrap_or(boundary_default);

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    let config = ServerConfig {
        data_path: PathBuf::from(data_path),
        boundary_path: (!boundary_path.trim().is_empty()).then(|| PathBuf::from(boundary_path)),
        bind_addr,
        port,
        ..defaults
    };

    super::run_server(config).await
}
