//! Search-and-select flow on a headless surface
//!
//! This example demonstrates the search side of the widget:
//! - Debounced input handling (one request for a whole typing burst)
//! - Reading the results view the way a renderer would
//! - Selecting a candidate and inspecting the surface afterwards

use std::time::Duration;

use placemark::geocoding::test_data::{CannedGeocoder, paris_candidates};
use placemark::{MapWidget, geolocation, surface};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    placemark::init_logging(tracing::Level::INFO)?;

    // Offline geocoder with canned answers, so the example runs anywhere
    let geocoder = CannedGeocoder::new(paris_candidates());
    let surface = surface::headless();
    let widget = MapWidget::new(surface.clone(), geocoder.clone(), geolocation::unsupported());

    // A user typing "Paris", one keystroke at a time
    for text in ["P", "Pa", "Par", "Pari", "Paris"] {
        widget.on_search_input(text);
        tokio::time::sleep(Duration::from_millis(60)).await;
    }

    // Let the debounce quiet period elapse and the search land
    tokio::time::sleep(Duration::from_millis(400)).await;
    println!("Backend saw {} request(s) for the whole burst", geocoder.query_count());

    println!("\nResults:");
    for (index, entry) in widget.ui_state().results.entries.iter().enumerate() {
        println!("  {}. {}", index + 1, entry.label());
    }

    // Selecting recenters the map, drops a pin, and clears the input
    if let Some(coordinate) = widget.select_result(0) {
        println!("\nSelected the first result at {coordinate}");
    }

    println!("Surface: {}", surface.summary());
    println!("Placed markers: {}", widget.placed_marker_count());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_search_example() {
        assert!(main().is_ok(), "Place search example should run successfully");
    }
}
