//! Radius command - shops within a fixed distance of a point

use crate::output::{format_count, format_km, shop_label, Status};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use shopmap_geo::Location;
use shopmap_route::RouteOptimizer;

/// Run radius command
pub fn run(optimizer: &RouteOptimizer, center: Location, km: f64, format: OutputFormat) -> Result<()> {
    let query = optimizer.find_within_radius(&center, km)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&query)?);
        return Ok(());
    }

    Status::header(&format!(
        "Shops within {} of {:.5}, {:.5}",
        format_km(km),
        center.latitude,
        center.longitude
    ));

    if query.shops.is_empty() {
        Status::warning("No shops in range");
        return Ok(());
    }

    for hit in &query.shops {
        println!(
            "  {:<8} {:<30} {:>10}",
            hit.shop.id,
            shop_label(hit.shop),
            format_km(hit.distance_km).cyan()
        );
    }
    println!();
    Status::success(&format_count(query.shops.len(), "shop", "shops"));

    Ok(())
}
