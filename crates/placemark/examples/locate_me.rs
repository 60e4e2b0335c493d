//! Locate-me flow and the current-location marker
//!
//! This example demonstrates the geolocation side of the widget:
//! - Resolving a position and focusing the map on it
//! - The singleton circle marker that moves instead of multiplying
//! - The blocking alert raised on unsupported platforms

use placemark::geocoding::test_data::CannedGeocoder;
use placemark::{Coordinate, MapWidget, geolocation, surface};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    placemark::init_logging(tracing::Level::INFO)?;

    // A platform that answers with a fixed position
    let surface = surface::headless();
    let widget = MapWidget::new(
        surface.clone(),
        CannedGeocoder::empty(),
        geolocation::fixed(Coordinate::new(37.7749, -122.4194)),
    );

    let position = widget.locate().await?;
    println!("Resolved position: {position}");
    println!("Surface: {}", surface.summary());

    // Locating again moves the same circle marker instead of adding one
    widget.locate().await?;
    println!(
        "Circle markers after a second locate: {}",
        surface.circles().len()
    );

    // A platform without geolocation raises the blocking alert instead
    let unsupported = MapWidget::new(
        surface::headless(),
        CannedGeocoder::empty(),
        geolocation::unsupported(),
    );
    if unsupported.locate().await.is_err() {
        if let Some(alert) = unsupported.take_alert() {
            println!("\nUnsupported platform alert: {alert}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_me_example() {
        assert!(main().is_ok(), "Locate me example should run successfully");
    }
}
