//! Platform geolocation seam.
//!
//! The widget asks a [`Geolocator`] for the user's position. A browser
//! frontend would bridge to the platform positioning API; the bundled
//! backends cover hosts without one and deterministic tests.

use futures::future::BoxFuture;
use placemark_geocoding::Coordinate;

mod failing;
mod fixed;
mod unsupported;

pub use error::{GeolocationError, Result};
pub use failing::Failing;
pub use fixed::Fixed;
pub use unsupported::Unsupported;

/// Provider of the user's current position.
pub trait Geolocator: Send + Sync {
    /// Whether the platform can provide a position at all.
    ///
    /// When this is `false` the widget raises the unsupported alert without
    /// calling [`current_position`](Self::current_position).
    fn is_available(&self) -> bool;

    /// Resolve the user's current position.
    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate>>;
}

/// Geolocator that always resolves to `position`.
#[must_use]
pub const fn fixed(position: Coordinate) -> Fixed {
    Fixed::new(position)
}

/// Geolocator for platforms without positioning support.
#[must_use]
pub const fn unsupported() -> Unsupported {
    Unsupported::new()
}

/// Geolocator whose every request fails with `message`.
#[must_use]
pub fn failing(message: impl Into<String>) -> Failing {
    Failing::new(message)
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum GeolocationError {
        #[error("Geolocation is not supported on this platform")]
        Unsupported,
        #[error("Could not get a position: {0}")]
        Failed(String),
    }

    pub type Result<T> = std::result::Result<T, GeolocationError>;
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn test_fixed_resolves_to_its_position() {
        let geolocator = fixed(Coordinate::new(37.7749, -122.4194));
        assert!(geolocator.is_available());

        let position = block_on(geolocator.current_position()).unwrap();
        assert_eq!(position, Coordinate::new(37.7749, -122.4194));
    }

    #[test]
    fn test_unsupported_reports_unavailable() {
        let geolocator = unsupported();
        assert!(!geolocator.is_available());

        let outcome = block_on(geolocator.current_position());
        assert_eq!(outcome, Err(GeolocationError::Unsupported));
    }

    #[test]
    fn test_failing_is_available_but_never_resolves() {
        let geolocator = failing("permission denied");
        assert!(geolocator.is_available());

        let outcome = block_on(geolocator.current_position());
        assert_eq!(
            outcome,
            Err(GeolocationError::Failed("permission denied".to_string()))
        );
    }
}
