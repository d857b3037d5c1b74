//! Path command - shortest network path between two shops

use crate::output::{format_km, shop_label, Status};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use shopmap_route::RouteOptimizer;

/// Run path command
pub fn run(optimizer: &RouteOptimizer, from: usize, to: usize, format: OutputFormat) -> Result<()> {
    let path = optimizer.shortest_path(from, to)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }

    let shops = optimizer.shops()?;
    Status::header(&format!(
        "Path {} → {}",
        shop_label(&shops[from]),
        shop_label(&shops[to])
    ));

    if path.path.is_empty() {
        Status::warning("No network path between these shops");
        let direct = optimizer.distance_matrix()?.get(from, to);
        Status::info(&format!("Straight-line distance is {}", format_km(direct)));
        return Ok(());
    }

    let hops: Vec<String> = path
        .path
        .iter()
        .map(|&index| shop_label(&shops[index]))
        .collect();
    let arrow = format!(" {} ", "→".dimmed());
    println!("  {}", hops.join(arrow.as_str()));
    println!();
    Status::success(&format!(
        "{} over {} hop(s)",
        format_km(path.distance_km),
        path.path.len() - 1
    ));

    Ok(())
}
