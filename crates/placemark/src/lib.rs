//! Placemark - Interactive Map Widget Core
//!
//! Placemark is the engine of an interactive slippy-map widget: debounced
//! place-name search against a geocoding service, pin placement with
//! coordinate popups, and a locate-me flow. It is decoupled from any actual
//! rendering: a frontend supplies a [`MapSurface`] (and a [`Geolocator`]),
//! forwards user events to the widget, and draws whatever the widget tells
//! it to.
//!
//! # Quick Start
//!
//! ```rust
//! use placemark::geocoding::test_data::CannedGeocoder;
//! use placemark::{Coordinate, MapWidget, geolocation, surface};
//!
//! // Build a widget over the in-memory surface
//! let surface = surface::headless();
//! let widget = MapWidget::new(
//!     surface.clone(),
//!     CannedGeocoder::empty(),
//!     geolocation::unsupported(),
//! );
//!
//! // Clicking the map drops a pin with its coordinate popup open
//! widget.on_map_click(Coordinate::new(48.8566, 2.3522));
//! assert_eq!(surface.pins().len(), 1);
//! assert!(surface.pins()[0].popup_open);
//! ```
//!
//! Live searches go through [`GeocodeClient`] (the `http` feature, enabled
//! by default) and run on Tokio:
//!
//! ```rust,no_run
//! use placemark::{GeocodeClient, MapWidget, geolocation, surface};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let widget = MapWidget::new(
//!     surface::headless(),
//!     GeocodeClient::new()?,
//!     geolocation::unsupported(),
//! );
//!
//! widget.search_now("Berlin").await;
//! for entry in widget.ui_state().results.entries {
//!     println!("{}", entry.label());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior
//!
//! - **Last input wins**: search input is debounced, and responses to
//!   superseded queries are dropped rather than applied out of order.
//! - **Replace, don't patch**: the results list in [`UiState`] is a fresh
//!   [`ResultsView`] every cycle; renderers rebuild it wholesale.
//! - **Failures render, they don't propagate**: a failed search becomes the
//!   inline error row, geolocation failures become a blocking alert, and
//!   the widget stays usable either way.

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
pub mod geolocation;
mod markers;
mod search;
pub mod surface;

pub use config::{WidgetConfig, WidgetConfigBuilder};
pub use geolocation::{GeolocationError, Geolocator};
pub use markers::PlacedMarker;
pub use search::{Debouncer, ERROR_LABEL, NO_RESULTS_LABEL, ResultsEntry, ResultsView};
pub use self::core::{
    GEOLOCATION_FAILED_ALERT, GEOLOCATION_UNSUPPORTED_ALERT, LocateControl, MapWidget, UiState,
};
pub use surface::{CircleStyle, MapSurface, MarkerHandle, MarkerIcon, TileLayer};

// Re-export the geocoding subcrate and its main types
pub use placemark_geocoding as geocoding;
#[cfg(feature = "http")]
pub use placemark_geocoding::GeocodeClient;
pub use placemark_geocoding::{Coordinate, GeocodeError, Geocoder, SearchCandidate};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Placemark library.
///
/// This sets up structured logging with configurable levels and filtering.
/// Call this once at the start of your application to enable detailed
/// logging output from Placemark operations.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use placemark::init_logging;
/// use tracing::Level;
///
/// // Initialize with info-level logging
/// init_logging(Level::INFO)?;
/// # Ok::<(), placemark::error::PlacemarkError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::PlacemarkError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse().unwrap());

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_widget_creation() {
        setup_test_env();

        let widget = MapWidget::new(
            surface::headless(),
            geocoding::test_data::CannedGeocoder::empty(),
            geolocation::unsupported(),
        );
        assert_eq!(widget.placed_marker_count(), 0);
        assert_eq!(widget.ui_state(), UiState::default());
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        setup_test_env();

        assert!(init_logging(tracing::Level::INFO).is_ok());
        assert!(init_logging(tracing::Level::DEBUG).is_ok());
    }

    #[test]
    fn test_configuration() {
        setup_test_env();

        let config = WidgetConfig::builder()
            .min_query_len(3)
            .focus_zoom(15)
            .build()
            .expect("valid config");

        assert_eq!(config.min_query_len, 3);
        assert_eq!(config.focus_zoom, 15);

        let widget = MapWidget::with_config(
            surface::headless(),
            geocoding::test_data::CannedGeocoder::empty(),
            geolocation::unsupported(),
            config,
        );
        assert_eq!(widget.config().focus_zoom, 15);
    }

    #[test]
    fn test_map_click_through_public_api() {
        setup_test_env();

        let surface = surface::headless();
        let widget = MapWidget::new(
            surface.clone(),
            geocoding::test_data::CannedGeocoder::empty(),
            geolocation::unsupported(),
        );

        widget.on_map_click(Coordinate::new(35.6762, 139.6503));
        widget.on_map_click(Coordinate::new(51.5074, -0.1278));

        assert_eq!(widget.placed_marker_count(), 2);
        assert_eq!(surface.pins().len(), 2);
    }
}
