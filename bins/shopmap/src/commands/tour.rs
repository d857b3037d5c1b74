//! Tour command - plan a visiting order for a set of shops

use crate::output::{format_km, format_minutes, shop_label, Status};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use shopmap_geo::Location;
use shopmap_route::{LegKind, RouteOptimizer, Tour};

/// JSON output for a tour
#[derive(Debug, Serialize)]
struct JsonTourOutput<'a> {
    shop_ids: Vec<i64>,
    #[serde(flatten)]
    tour: &'a Tour,
    /// Every shop passed through, intermediate hops included
    network_path: Vec<usize>,
}

/// Run tour command
pub fn run(
    optimizer: &RouteOptimizer,
    start: Location,
    shop_ids: &[i64],
    format: OutputFormat,
) -> Result<()> {
    let shops = optimizer.shops()?;
    let tour = if shop_ids.is_empty() {
        let all: Vec<usize> = (0..shops.len()).collect();
        optimizer.plan_tour(&start, &all)?
    } else {
        optimizer.plan_tour_by_ids(&start, shop_ids)?
    };
    let network_path = tour.expand_path(optimizer.shortest_paths()?);

    if format == OutputFormat::Json {
        let output = JsonTourOutput {
            shop_ids: tour.shop_ids(shops),
            tour: &tour,
            network_path,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header(&format!(
        "Tour from {:.5}, {:.5}",
        start.latitude, start.longitude
    ));

    if tour.is_empty() {
        Status::info("Nothing to visit");
        return Ok(());
    }

    for (step, leg) in tour.legs.iter().enumerate() {
        let shop = &shops[leg.to];
        let marker = match leg.kind {
            LegKind::Start => "start".dimmed().to_string(),
            LegKind::ShortestPath => "network".dimmed().to_string(),
            LegKind::Direct => "direct".yellow().to_string(),
        };
        println!(
            "  {:>3}. {:<30} {:>10}  {}",
            step + 1,
            shop_label(shop),
            format_km(leg.distance_km),
            marker
        );
    }
    println!();

    if tour.fallback_legs() > 0 {
        Status::warning(&format!(
            "{} leg(s) have no network path and use the straight-line distance",
            tour.fallback_legs()
        ));
    }
    Status::success(&format!(
        "{} stops, {} total, about {}",
        tour.len(),
        format_km(tour.total_distance_km).bold(),
        format_minutes(tour.estimated_minutes)
    ));

    Ok(())
}
