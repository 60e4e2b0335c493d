use std::time::Duration;

use placemark_geocoding::Coordinate;

use crate::{
    error::PlacemarkError,
    surface::{CircleStyle, MarkerIcon, TileLayer},
};

/// Behavior knobs for a [`MapWidget`](crate::MapWidget).
///
/// The defaults reproduce the stock widget: a world view over the
/// OpenStreetMap layer, two-character search threshold, 300 ms debounce,
/// 200 ms blur grace, and zoom 13 when focusing a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Where the map looks before any interaction.
    pub initial_center: Coordinate,
    pub initial_zoom: u8,
    /// Zoom applied when focusing one point: a selected search result or a
    /// resolved position.
    pub focus_zoom: u8,
    /// Trimmed query length below which no search is issued.
    pub min_query_len: usize,
    /// Quiet period before an input burst turns into a search request.
    pub debounce_delay: Duration,
    /// How long the results list survives the input losing focus, so a
    /// click on a result still lands.
    pub blur_grace: Duration,
    pub tile_layer: TileLayer,
    pub marker_icon: MarkerIcon,
    /// Style of the current-location circle marker.
    pub location_style: CircleStyle,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            initial_center: Coordinate::new(20.0, 0.0),
            initial_zoom: 3,
            focus_zoom: 13,
            min_query_len: 2,
            debounce_delay: Duration::from_millis(300),
            blur_grace: Duration::from_millis(200),
            tile_layer: TileLayer::default(),
            marker_icon: MarkerIcon::default(),
            location_style: CircleStyle::default(),
        }
    }
}

impl WidgetConfig {
    /// Create a builder for customizing the configuration
    #[must_use]
    pub fn builder() -> WidgetConfigBuilder {
        WidgetConfigBuilder::new()
    }
}

/// Builder for creating widget configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct WidgetConfigBuilder {
    config: WidgetConfig,
}

impl WidgetConfigBuilder {
    /// Create a new builder with the stock defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: WidgetConfig::default(),
        }
    }

    /// Create a builder with no debounce and no blur grace
    ///
    /// Useful for frontends that coalesce input themselves, and for demos
    /// where waiting out the quiet period just slows things down.
    #[must_use]
    pub fn instant() -> Self {
        let mut builder = Self::new();
        builder.config.debounce_delay = Duration::ZERO;
        builder.config.blur_grace = Duration::ZERO;
        builder
    }

    /// Set the starting center and zoom
    #[must_use]
    pub fn initial_view(mut self, center: Coordinate, zoom: u8) -> Self {
        self.config.initial_center = center;
        self.config.initial_zoom = zoom;
        self
    }

    /// Set the zoom used when focusing a single point
    #[must_use]
    pub fn focus_zoom(mut self, zoom: u8) -> Self {
        self.config.focus_zoom = zoom;
        self
    }

    /// Set the minimum trimmed query length that triggers a search
    #[must_use]
    pub fn min_query_len(mut self, len: usize) -> Self {
        self.config.min_query_len = len;
        self
    }

    /// Set the debounce quiet period for search input
    #[must_use]
    pub fn debounce_delay(mut self, delay: Duration) -> Self {
        self.config.debounce_delay = delay;
        self
    }

    /// Set how long the results list outlives an input blur
    #[must_use]
    pub fn blur_grace(mut self, grace: Duration) -> Self {
        self.config.blur_grace = grace;
        self
    }

    /// Set the tile layer the map draws
    #[must_use]
    pub fn tile_layer(mut self, layer: TileLayer) -> Self {
        self.config.tile_layer = layer;
        self
    }

    /// Set the icon used for placed markers
    #[must_use]
    pub fn marker_icon(mut self, icon: MarkerIcon) -> Self {
        self.config.marker_icon = icon;
        self
    }

    /// Set the style of the current-location circle marker
    #[must_use]
    pub fn location_style(mut self, style: CircleStyle) -> Self {
        self.config.location_style = style;
        self
    }

    /// Validate and build the final configuration
    ///
    /// Cross-field checks live here because the fields can be set in any
    /// order: the center must be a real coordinate, both zooms must fall
    /// inside the tile layer's range, and the search threshold must leave
    /// at least one character to search for.
    pub fn build(self) -> Result<WidgetConfig, PlacemarkError> {
        let config = self.config;
        if !config.initial_center.in_bounds() {
            return Err(PlacemarkError::ConfigError(format!(
                "Initial center out of range: {}",
                config.initial_center
            )));
        }
        if config.tile_layer.min_zoom > config.tile_layer.max_zoom {
            return Err(PlacemarkError::ConfigError(format!(
                "Tile layer zoom range is inverted: {}..={}",
                config.tile_layer.min_zoom, config.tile_layer.max_zoom
            )));
        }
        let zoom_range = config.tile_layer.min_zoom..=config.tile_layer.max_zoom;
        if !zoom_range.contains(&config.initial_zoom) {
            return Err(PlacemarkError::ConfigError(format!(
                "Initial zoom {} outside tile layer range {}..={}",
                config.initial_zoom, config.tile_layer.min_zoom, config.tile_layer.max_zoom
            )));
        }
        if !zoom_range.contains(&config.focus_zoom) {
            return Err(PlacemarkError::ConfigError(format!(
                "Focus zoom {} outside tile layer range {}..={}",
                config.focus_zoom, config.tile_layer.min_zoom, config.tile_layer.max_zoom
            )));
        }
        if config.min_query_len == 0 {
            return Err(PlacemarkError::ConfigError(
                "Minimum query length must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder() {
        let config = WidgetConfigBuilder::new().build().unwrap();
        assert_eq!(config.initial_center, Coordinate::new(20.0, 0.0));
        assert_eq!(config.initial_zoom, 3);
        assert_eq!(config.focus_zoom, 13);
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.debounce_delay, Duration::from_millis(300));
        assert_eq!(config.blur_grace, Duration::from_millis(200));
    }

    #[test]
    fn test_instant_preset() {
        let config = WidgetConfigBuilder::instant().build().unwrap();
        assert_eq!(config.debounce_delay, Duration::ZERO);
        assert_eq!(config.blur_grace, Duration::ZERO);
        // Everything else keeps the stock defaults.
        assert_eq!(config.focus_zoom, 13);
        assert_eq!(config.min_query_len, 2);
    }

    #[test]
    fn test_method_chaining() {
        let config = WidgetConfig::builder()
            .initial_view(Coordinate::new(51.5074, -0.1278), 10)
            .focus_zoom(15)
            .min_query_len(3)
            .debounce_delay(Duration::from_millis(150))
            .build()
            .unwrap();

        assert_eq!(config.initial_center, Coordinate::new(51.5074, -0.1278));
        assert_eq!(config.initial_zoom, 10);
        assert_eq!(config.focus_zoom, 15);
        assert_eq!(config.min_query_len, 3);
        assert_eq!(config.debounce_delay, Duration::from_millis(150));
    }

    #[test]
    fn test_chaining_order_does_not_matter() {
        let config1 = WidgetConfig::builder()
            .focus_zoom(15)
            .min_query_len(3)
            .build()
            .unwrap();
        let config2 = WidgetConfig::builder()
            .min_query_len(3)
            .focus_zoom(15)
            .build()
            .unwrap();

        assert_eq!(config1, config2);
    }

    #[test]
    fn test_out_of_range_center_is_rejected() {
        let result = WidgetConfig::builder()
            .initial_view(Coordinate::new(91.0, 0.0), 3)
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_zooms_must_fit_the_tile_layer_range() {
        let narrow = TileLayer {
            min_zoom: 5,
            max_zoom: 10,
            ..TileLayer::default()
        };

        // Default initial zoom 3 falls below the layer's minimum.
        let result = WidgetConfig::builder().tile_layer(narrow.clone()).build();
        assert!(result.is_err());

        // Bringing both zooms into range fixes it.
        let config = WidgetConfig::builder()
            .tile_layer(narrow)
            .initial_view(Coordinate::new(20.0, 0.0), 5)
            .focus_zoom(10)
            .build();
        assert!(config.is_ok());
    }

    #[test]
    fn test_inverted_tile_range_is_rejected() {
        let inverted = TileLayer {
            min_zoom: 12,
            max_zoom: 4,
            ..TileLayer::default()
        };

        let result = WidgetConfig::builder().tile_layer(inverted).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_query_threshold_is_rejected() {
        let result = WidgetConfig::builder().min_query_len(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_passes_validation() {
        assert!(WidgetConfig::builder().build().is_ok());
    }
}
