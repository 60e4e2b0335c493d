use futures::future::BoxFuture;
use placemark_geocoding::Coordinate;

use super::{GeolocationError, Geolocator, Result};

/// Platform without positioning support.
///
/// `current_position` still answers, with [`GeolocationError::Unsupported`],
/// in case a caller skips the availability check.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl Unsupported {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Geolocator for Unsupported {
    fn is_available(&self) -> bool {
        false
    }

    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate>> {
        Box::pin(async { Err(GeolocationError::Unsupported) })
    }
}
