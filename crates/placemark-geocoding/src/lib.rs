//! Geocoding layer for the Placemark map widget.
//!
//! Shared location types, the [`Geocoder`] service seam, and a client for
//! Nominatim-style search endpoints. Offline backends for tests and examples
//! live in [`test_data`].

use std::fmt;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub mod nominatim;
pub mod test_data;

/// A geographic coordinate in decimal degrees.
///
/// Plain data, no validation on construction. The decode path in
/// [`nominatim`] range-checks values at the service boundary, so coordinates
/// built from responses are always in domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north of the equator, negative south. Valid domain [-90, 90].
    pub lat: f64,
    /// Degrees east of the prime meridian, negative west. Valid domain [-180, 180].
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether the coordinate lies within the valid geographic domain.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// One ranked match returned by a geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Human-readable place label, exactly as the service formats it.
    pub label: String,
    pub coordinate: Coordinate,
}

/// Interface to a place-name search service.
///
/// Implementations return candidates in service relevance order, most
/// relevant first. An empty list is a successful outcome, not an error.
/// The bundled implementations are [`nominatim::GeocodeClient`] for live
/// lookups and the offline backends in [`test_data`].
pub trait Geocoder: Send + Sync {
    /// Look up places matching `query`.
    fn search(&self, query: String) -> BoxFuture<'_, Result<Vec<SearchCandidate>>>;
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum GeocodeError {
        #[cfg(feature = "http")]
        #[error("HTTP error: {0}")]
        Http(#[from] reqwest::Error),
        #[error("Malformed response body: {0}")]
        Decode(#[from] serde_json::Error),
        #[error("Unparsable {axis} in response: {value:?}")]
        InvalidCoordinate { axis: &'static str, value: String },
        #[error("Coordinate out of range in response: {lat}, {lon}")]
        OutOfRange { lat: f64, lon: f64 },
        #[error("Geocoding backend error: {0}")]
        Backend(String),
    }

    pub type Result<T> = std::result::Result<T, GeocodeError>;
}

pub use error::{GeocodeError, Result};

// Re-export main types
#[cfg(feature = "http")]
pub use nominatim::GeocodeClient;
pub use test_data::{CannedGeocoder, FailingGeocoder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_accepts_domain_edges() {
        assert!(Coordinate::new(0.0, 0.0).in_bounds());
        assert!(Coordinate::new(90.0, 180.0).in_bounds());
        assert!(Coordinate::new(-90.0, -180.0).in_bounds());
    }

    #[test]
    fn test_in_bounds_rejects_out_of_domain() {
        assert!(!Coordinate::new(90.1, 0.0).in_bounds());
        assert!(!Coordinate::new(-90.1, 0.0).in_bounds());
        assert!(!Coordinate::new(0.0, 180.1).in_bounds());
        assert!(!Coordinate::new(0.0, -180.1).in_bounds());
    }

    #[test]
    fn test_coordinate_display() {
        let coordinate = Coordinate::new(48.8566, 2.3522);
        assert_eq!(coordinate.to_string(), "48.8566, 2.3522");
    }
}
