//! shopmap: shop lookups and delivery tours over a shop list.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use shopmap_geo::Location;
use shopmap_route::{OptimizerConfig, RouteOptimizer, Shop};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod output;

use commands::{corridor, nearest, path, radius, stats, tour};
use output::Status;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Shop lookups, tours and network statistics
#[derive(Parser)]
#[command(name = "shopmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON file holding the shop list
    #[arg(short, long, global = true, env = "SHOPMAP_SHOPS", default_value = "shops.json")]
    shops: PathBuf,

    /// Configuration file (defaults to shopmap.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Closest shops to a point
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Maximum number of shops to list
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Search radius in kilometres
        #[arg(long, default_value = "10")]
        max_km: f64,
    },

    /// Plan a tour starting from a point
    Tour {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Shop ids to visit, comma separated (all shops if not specified)
        #[arg(long, value_delimiter = ',')]
        shop_ids: Vec<i64>,

        /// Apply 2-opt improvement regardless of configuration
        #[arg(long)]
        two_opt: bool,
    },

    /// Shortest network path between two shops (by index)
    Path {
        #[arg(long)]
        from: usize,

        #[arg(long)]
        to: usize,
    },

    /// Distance and connectivity statistics for the shop network
    Stats,

    /// Shops within a radius of a point
    Radius {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Radius in kilometres
        #[arg(long)]
        km: f64,
    },

    /// Shops along a route
    Corridor {
        /// Route point as "lat,lng"; repeat for each point in order
        #[arg(long = "point", required = true, allow_hyphen_values = true)]
        points: Vec<String>,

        /// Corridor half-width in kilometres
        #[arg(long, default_value = "0.5")]
        km: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug and the default is warn.
/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config =
        OptimizerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Commands::Tour { two_opt: true, .. } = cli.command {
        config.two_opt = true;
    }

    let shops = load_shops(&cli.shops)?;
    let optimizer = RouteOptimizer::with_shops(shops, config).context("Failed to build shop network")?;
    let format = cli.format;

    match cli.command {
        Commands::Nearest { lat, lng, limit, max_km } => {
            nearest::run(&optimizer, Location::new(lat, lng), limit, max_km, format)
        }
        Commands::Tour { lat, lng, shop_ids, .. } => {
            tour::run(&optimizer, Location::new(lat, lng), &shop_ids, format)
        }
        Commands::Path { from, to } => path::run(&optimizer, from, to, format),
        Commands::Stats => stats::run(&optimizer, format),
        Commands::Radius { lat, lng, km } => radius::run(&optimizer, Location::new(lat, lng), km, format),
        Commands::Corridor { points, km } => {
            let route = points
                .iter()
                .map(|p| commands::parse_point(p))
                .collect::<Result<Vec<_>>>()?;
            corridor::run(&optimizer, &route, km, format)
        }
    }
}

fn load_shops(path: &Path) -> Result<Vec<Shop>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shop list {}", path.display()))?;
    let shops: Vec<Shop> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse shop list {}", path.display()))?;
    debug!(count = shops.len(), path = %path.display(), "Loaded shops");
    Ok(shops)
}
