//! Stats command - shop network summary

use crate::output::{format_km, Status};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use shopmap_route::{NetworkStats, RouteOptimizer};

/// JSON output for network statistics
#[derive(Debug, Serialize)]
struct JsonStatsOutput {
    #[serde(flatten)]
    stats: NetworkStats,
    edges: usize,
    max_connection_km: f64,
}

/// Run stats command
pub fn run(optimizer: &RouteOptimizer, format: OutputFormat) -> Result<()> {
    let stats = optimizer.network_stats()?;
    let edges = optimizer.adjacency_matrix()?.finite_off_diagonal() / 2;
    let max_connection_km = optimizer.config().max_connection_km;

    if format == OutputFormat::Json {
        let output = JsonStatsOutput {
            stats,
            edges,
            max_connection_km,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header("Shop network");
    let rows = [
        ("Shops", stats.count.to_string()),
        ("Edges", format!("{} (≤ {})", edges, format_km(max_connection_km))),
        ("Density", format!("{:.1}%", stats.density * 100.0)),
        ("Shortest", format_km(stats.min_direct_km)),
        ("Average", format_km(stats.average_direct_km)),
        ("Longest", format_km(stats.max_direct_km)),
    ];
    for (label, value) in rows {
        println!("  {:<10} {}", label.dimmed(), value);
    }

    if stats.count > 1 && stats.density < 1.0 {
        println!();
        Status::info("Some shop pairs are only reachable through other shops, or not at all");
    }

    Ok(())
}
