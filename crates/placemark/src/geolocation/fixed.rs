use futures::future::BoxFuture;
use placemark_geocoding::Coordinate;

use super::{Geolocator, Result};

/// Always resolves to the position it was built with.
#[derive(Debug, Clone, Copy)]
pub struct Fixed {
    position: Coordinate,
}

impl Fixed {
    #[must_use]
    pub const fn new(position: Coordinate) -> Self {
        Self { position }
    }
}

impl Geolocator for Fixed {
    fn is_available(&self) -> bool {
        true
    }

    fn current_position(&self) -> BoxFuture<'_, Result<Coordinate>> {
        let position = self.position;
        Box::pin(async move { Ok(position) })
    }
}
