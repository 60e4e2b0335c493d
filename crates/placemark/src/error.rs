use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacemarkError {
    #[error("Geocoding error: {0}")]
    Geocode(#[from] placemark_geocoding::GeocodeError),
    #[error("Geolocation error: {0}")]
    Geolocation(#[from] crate::geolocation::GeolocationError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PlacemarkError>;
