//! The rendering seam between widget logic and an actual map display.
//!
//! The widget never draws. It tells a [`MapSurface`] what exists and where
//! to look; the surface owns presentation entirely. A browser frontend would
//! forward these calls to a real map view, while [`headless`] records them
//! in memory for tests, examples, and doctests.

use placemark_geocoding::Coordinate;

pub mod headless;

/// Handle to a marker created on a surface.
///
/// Allocated by the surface implementation; opaque to the widget beyond
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A raster tile source with its attribution and zoom range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    pub attribution: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl Default for TileLayer {
    /// The OpenStreetMap raster layer.
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            min_zoom: 2,
            max_zoom: 19,
        }
    }
}

/// HTML icon for user-placed pin markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub html: String,
    /// Icon footprint in pixels, width then height.
    pub size: (u32, u32),
    pub class_name: String,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            html: r#"<div class="custom-marker"></div>"#.to_string(),
            size: (32, 32),
            class_name: "custom-marker-icon".to_string(),
        }
    }
}

/// Style of a circle marker.
///
/// The defaults are the current-location dot: a small blue disc with a
/// white ring.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    /// Radius in screen pixels.
    pub radius: u32,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_weight: u32,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            radius: 6,
            fill_color: "#4285F4".to_string(),
            stroke_color: "#ffffff".to_string(),
            stroke_weight: 2,
            opacity: 1.0,
            fill_opacity: 0.9,
        }
    }
}

/// Rendering operations the widget needs from a map display.
pub trait MapSurface {
    /// Recenter the view.
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Add a raster tile layer with its attribution.
    fn add_tile_layer(&mut self, layer: &TileLayer);

    /// Create a pin marker, returning its handle.
    fn add_marker(&mut self, at: Coordinate, icon: &MarkerIcon) -> MarkerHandle;

    /// Attach popup HTML to a marker.
    fn bind_popup(&mut self, marker: MarkerHandle, html: &str);

    /// Open a marker's popup.
    fn open_popup(&mut self, marker: MarkerHandle);

    /// Create a styled circle marker, returning its handle.
    fn add_circle_marker(&mut self, at: Coordinate, style: &CircleStyle) -> MarkerHandle;

    /// Move an existing marker to a new coordinate.
    fn move_marker(&mut self, marker: MarkerHandle, to: Coordinate);
}

/// Surface that records calls in memory instead of drawing.
#[must_use]
pub fn headless() -> headless::HeadlessSurface {
    headless::HeadlessSurface::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tile_layer_is_osm() {
        let layer = TileLayer::default();
        assert!(layer.url_template.contains("tile.openstreetmap.org"));
        assert_eq!(layer.attribution, "© OpenStreetMap contributors");
        assert_eq!(layer.min_zoom, 2);
        assert_eq!(layer.max_zoom, 19);
    }

    #[test]
    fn test_default_location_circle_style() {
        let style = CircleStyle::default();
        assert_eq!(style.radius, 6);
        assert_eq!(style.fill_color, "#4285F4");
        assert_eq!(style.stroke_color, "#ffffff");
        assert_eq!(style.stroke_weight, 2);
    }

    #[test]
    fn test_default_marker_icon() {
        let icon = MarkerIcon::default();
        assert_eq!(icon.size, (32, 32));
        assert_eq!(icon.class_name, "custom-marker-icon");
        assert!(icon.html.contains("custom-marker"));
    }
}
