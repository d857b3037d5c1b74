//! Corridor command - shops along a route

use crate::output::{format_count, format_km, shop_label, Status};
use crate::OutputFormat;
use anyhow::Result;
use shopmap_geo::Location;
use shopmap_route::RouteOptimizer;

/// Run corridor command
pub fn run(optimizer: &RouteOptimizer, route: &[Location], km: f64, format: OutputFormat) -> Result<()> {
    let query = optimizer.find_along_route(route, km)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&query)?);
        return Ok(());
    }

    Status::header(&format!(
        "Shops within {} of a {}-point route",
        format_km(km),
        route.len()
    ));

    if query.shops.is_empty() {
        Status::warning("No shops along the route");
        return Ok(());
    }

    for hit in &query.shops {
        println!("  {:<8} {}", hit.shop.id, shop_label(hit.shop));
    }
    println!();
    Status::success(&format_count(query.shops.len(), "shop", "shops"));

    Ok(())
}
