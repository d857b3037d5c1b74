//! Nearest command - closest shops to a point

use crate::output::{format_count, format_km, shop_label, Status};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use shopmap_geo::Location;
use shopmap_route::RouteOptimizer;

/// Run nearest command
pub fn run(
    optimizer: &RouteOptimizer,
    origin: Location,
    limit: usize,
    max_km: f64,
    format: OutputFormat,
) -> Result<()> {
    let nearest = optimizer.find_nearest(&origin, limit, max_km)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&nearest)?);
        return Ok(());
    }

    Status::header(&format!(
        "Nearest shops to {:.5}, {:.5}",
        origin.latitude, origin.longitude
    ));

    if nearest.is_empty() {
        Status::warning(&format!("No shops within {}", format_km(max_km)));
        return Ok(());
    }

    println!(
        "  {:<4} {:<8} {:<30} {:>10}",
        "#".dimmed(),
        "Id".dimmed(),
        "Name".dimmed(),
        "Distance".dimmed()
    );
    for (rank, hit) in nearest.iter().enumerate() {
        println!(
            "  {:<4} {:<8} {:<30} {:>10}",
            rank + 1,
            hit.shop.id,
            shop_label(hit.shop),
            format_km(hit.distance_km).cyan()
        );
    }
    println!();
    Status::success(&format!(
        "{} within {}",
        format_count(nearest.len(), "shop", "shops"),
        format_km(max_km)
    ));

    Ok(())
}
