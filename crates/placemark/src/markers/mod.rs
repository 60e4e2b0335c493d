//! Bookkeeping for markers the widget has created.

use placemark_geocoding::Coordinate;

use crate::surface::MarkerHandle;

/// A user-placed pin marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedMarker {
    pub handle: MarkerHandle,
    pub coordinate: Coordinate,
}

/// Marker state owned by the widget.
///
/// Placed pins only accumulate; nothing removes or reorders them. The
/// current-location circle is a separate singleton, moved in place on every
/// new position fix.
#[derive(Debug, Default)]
pub struct MarkerStore {
    placed: Vec<PlacedMarker>,
    location: Option<MarkerHandle>,
}

impl MarkerStore {
    pub fn record_placed(&mut self, marker: PlacedMarker) {
        self.placed.push(marker);
    }

    #[must_use]
    pub fn placed(&self) -> &[PlacedMarker] {
        &self.placed
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    #[must_use]
    pub fn location_handle(&self) -> Option<MarkerHandle> {
        self.location
    }

    pub fn set_location_handle(&mut self, handle: MarkerHandle) {
        self.location = Some(handle);
    }
}

/// Popup body for a placed marker, coordinates to six decimal places.
#[must_use]
pub fn popup_html(at: Coordinate) -> String {
    format!(
        "<strong>Location</strong><br>Latitude: {:.6}<br>Longitude: {:.6}<br><small>Click map to place another marker</small>",
        at.lat, at.lon
    )
}
