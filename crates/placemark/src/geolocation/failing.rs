use futures::future::BoxFuture;
use placemark_geocoding::Coordinate;

use super::{GeolocationError, Geolocator, Result};

/// Reports availability but fails every request, like a user denying the
/// permission prompt.
#[derive(Debug, Clone)]
pub struct Failing {
    message: String,
}

impl Failing {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Geolocator for Failing {
    fn is_available(&self) -> bool {
        true
    }

    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate>> {
        let message = self.message.clone();
        Box::pin(async move { Err(GeolocationError::Failed(message)) })
    }
}
