//! Terminal output utilities

use owo_colors::OwoColorize;
use shopmap_route::Shop;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a distance for display, switching to metres below one kilometre
pub fn format_km(km: f64) -> String {
    if !km.is_finite() {
        "unreachable".to_string()
    } else if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{:.2} km", km)
    }
}

/// Format a travel time in minutes
pub fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() {
        return "unknown".to_string();
    }
    let rounded = minutes.round() as u64;
    if rounded < 60 {
        format!("{} min", rounded)
    } else {
        format!("{}h {:02}m", rounded / 60, rounded % 60)
    }
}

/// Shop name, or `#id` when it has none
pub fn shop_label(shop: &Shop) -> String {
    shop.name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", shop.id))
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
