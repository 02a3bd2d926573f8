//! Geocoder CLI
//!
//! Command-line front end for the geocoder widget: one-shot address
//! searches and an interactive session driven from stdin.

#![allow(clippy::print_stdout)]

mod interactive;
mod output;
mod terminal_map;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::{QueryOutcome, TargetType};
use clap::{Args, Parser, Subcommand, ValueEnum};
use domain::Projection;
use infrastructure::{AppConfig, build_controller, init_logging};
use secrecy::SecretString;

use crate::terminal_map::TerminalMap;

/// Geocoder CLI
#[derive(Parser)]
#[command(name = "geocoder-cli")]
#[command(author, version, about = "Address search against public geocoding services", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./geocoder.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in providers
    Providers,

    /// Search for an address
    ///
    /// Example: geocoder-cli search "Brandenburger Tor" --provider photon --select 1
    Search {
        /// Address or place to look up
        query: String,

        #[command(flatten)]
        provider: ProviderArgs,

        /// Choose the result at this position (1-based) and show where the
        /// map would move
        #[arg(short, long)]
        select: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Drive the widget from stdin, one line per input change
    ///
    /// Plain lines replace the input text; lines starting with ':' are
    /// commands (:help lists them).
    Interactive {
        #[command(flatten)]
        provider: ProviderArgs,

        /// Query while typing
        #[arg(long)]
        auto_complete: bool,

        /// Keep the result list open after a selection
        #[arg(long)]
        keep_open: bool,
    },
}

/// Map projection of the simulated view
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProjectionArg {
    /// EPSG:4326, degrees
    Wgs84,
    /// EPSG:3857, meters
    WebMercator,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Wgs84 => Self::Wgs84,
            ProjectionArg::WebMercator => Self::WebMercator,
        }
    }
}

/// Overrides applied on top of the loaded configuration
#[derive(Args)]
struct ProviderArgs {
    /// Provider name (osm, mapquest, photon, bing, opencage)
    #[arg(short, long)]
    provider: Option<String>,

    /// API key for providers that require one
    #[arg(long, env = "GEOCODER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Preferred result language, e.g. de-DE
    #[arg(short, long)]
    lang: Option<String>,

    /// Maximum number of results
    #[arg(long)]
    limit: Option<u32>,

    /// Comma separated country filter, e.g. de,at
    #[arg(long)]
    country_codes: Option<String>,

    /// Projection of the simulated map view
    #[arg(long, value_enum, default_value = "web-mercator")]
    projection: ProjectionArg,
}

impl ProviderArgs {
    fn apply(&self, config: &mut AppConfig) {
        let options = &mut config.geocoder;
        if let Some(provider) = &self.provider {
            options.provider.clone_from(provider);
        }
        if let Some(key) = &self.api_key {
            options.api_key = Some(SecretString::from(key.clone()));
        }
        if let Some(lang) = &self.lang {
            options.lang.clone_from(lang);
        }
        if let Some(limit) = self.limit {
            options.limit = limit;
        }
        if let Some(codes) = &self.country_codes {
            options.country_codes = Some(codes.clone());
        }
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => AppConfig::load().context("Failed to load configuration"),
    }
}

async fn search(
    config: &AppConfig,
    projection: Projection,
    query: &str,
    select: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let map = Arc::new(TerminalMap::new(projection));
    let controller = build_controller(config, map.clone())?;

    if !matches!(controller.query(query).await?, QueryOutcome::Results(_)) {
        output::print_state(&controller.state());
        return Ok(());
    }

    let Some(position) = select else {
        let candidates = controller.state().candidates;
        if json {
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        } else {
            output::print_candidates(&candidates);
        }
        return Ok(());
    };

    let index = position
        .checked_sub(1)
        .context("--select positions start at 1")?;
    let chosen = controller.select(index)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&chosen)?);
    } else {
        output::print_chosen(&chosen, map.camera());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Providers => output::print_providers(),

        Commands::Search {
            query,
            provider,
            select,
            json,
        } => {
            provider.apply(&mut config);
            config.geocoder.target_type = TargetType::TextInput;
            search(&config, provider.projection.into(), &query, select, json).await?;
        },

        Commands::Interactive {
            provider,
            auto_complete,
            keep_open,
        } => {
            provider.apply(&mut config);
            config.geocoder.auto_complete |= auto_complete;
            config.geocoder.keep_open |= keep_open;

            let map = Arc::new(TerminalMap::new(provider.projection.into()));
            let controller = build_controller(&config, map.clone())?;
            interactive::run(&controller, &map).await?;
        },
    }

    Ok(())
}
