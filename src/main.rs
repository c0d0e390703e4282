mod api;
mod campaigns;
mod config;
mod database;
mod error;
mod ingestion;
mod network;
mod orchestrator;
mod scheduler;
mod server;

use crate::config::{Config, RawConfig};
use anyhow::anyhow;
use clap::{Arg, ArgMatches, Command, crate_authors, crate_description, crate_version, value_parser};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn port_arg() -> Arg {
    Arg::new("PORT")
        .env("CAMPAIGNER_PORT")
        .short('p')
        .long("port")
        .value_parser(value_parser!(u16))
        .help("Defines a TCP port to listen on.")
}

fn read_config(matches: &ArgMatches) -> anyhow::Result<RawConfig> {
    let raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    info!("Campaigner raw configuration: {raw_config:?}.");

    Ok(raw_config)
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let matches = Command::new("Campaigner")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("CONFIG")
                .env("CAMPAIGNER_CONFIG")
                .short('c')
                .long("config")
                .global(true)
                .default_value("campaigner.toml")
                .help("Path to the application configuration file."),
        )
        .arg(port_arg())
        .subcommand(
            Command::new("serve")
                .about("Runs the campaign API server (default).")
                .arg(port_arg()),
        )
        .subcommand(
            Command::new("ingest")
                .about("Runs the periodic records ingestion worker until interrupted."),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("ingest", ingest_matches)) => {
            ingestion::run(Config::from(read_config(ingest_matches)?))
        }
        Some(("serve", serve_matches)) => serve(serve_matches),
        _ => serve(&matches),
    }
}

fn serve(matches: &ArgMatches) -> anyhow::Result<()> {
    let raw_config = read_config(matches)?;

    // CLI argument takes precedence.
    let http_port = matches
        .get_one::<u16>("PORT")
        .copied()
        .unwrap_or(raw_config.port);
    server::run(Config::from(raw_config), http_port)
}
