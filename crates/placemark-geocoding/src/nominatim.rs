//! Client for a Nominatim-style search endpoint.
//!
//! One `GET /search?q=<query>&format=json&limit=<n>` per lookup, JSON body
//! decoded into [`SearchCandidate`]s. The service serializes coordinates as
//! strings; they are parsed and range-checked here, at the service boundary.

#[cfg(feature = "http")]
use std::time::Duration;

#[cfg(feature = "http")]
use futures::future::BoxFuture;
use serde::Deserialize;
#[cfg(feature = "http")]
use tracing::{debug, instrument};

#[cfg(feature = "http")]
use crate::Geocoder;
use crate::{Coordinate, GeocodeError, Result, SearchCandidate};

/// Public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Candidates requested per search.
pub const DEFAULT_RESULT_LIMIT: usize = 5;

#[cfg(feature = "http")]
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One entry of a `/search` response, as the service serializes it.
///
/// Only the fields the widget consumes are listed; everything else in the
/// response is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceRecord {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl PlaceRecord {
    fn into_candidate(self) -> Result<SearchCandidate> {
        let lat = parse_axis("lat", &self.lat)?;
        let lon = parse_axis("lon", &self.lon)?;
        let coordinate = Coordinate::new(lat, lon);
        if !coordinate.in_bounds() {
            return Err(GeocodeError::OutOfRange { lat, lon });
        }
        Ok(SearchCandidate {
            label: self.display_name,
            coordinate,
        })
    }
}

fn parse_axis(axis: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidCoordinate {
            axis,
            value: value.to_string(),
        })
}

/// Decode a `/search` response body into candidates, preserving order.
///
/// Split out from the HTTP path so response handling is testable offline.
pub fn decode_search_response(body: &str) -> Result<Vec<SearchCandidate>> {
    let records: Vec<PlaceRecord> = serde_json::from_str(body)?;
    records
        .into_iter()
        .map(PlaceRecord::into_candidate)
        .collect()
}

/// Asynchronous client for a Nominatim-style search endpoint.
///
/// # Examples
///
/// ```rust,no_run
/// use placemark_geocoding::{GeocodeClient, Geocoder};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), placemark_geocoding::GeocodeError> {
/// let client = GeocodeClient::new()?.with_result_limit(3);
/// let candidates = client.search("Paris".to_string()).await?;
/// for candidate in candidates {
///     println!("{} @ {}", candidate.label, candidate.coordinate);
/// }
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    result_limit: usize,
}

#[cfg(feature = "http")]
impl GeocodeClient {
    /// Create a client against the public instance.
    ///
    /// Sets a descriptive `User-Agent` (the public instance requires one)
    /// and a request timeout.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("placemark/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
        })
    }

    /// Point the client at another server, e.g. a self-hosted instance.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Cap the number of candidates requested per search.
    #[must_use]
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    #[instrument(name = "Geocode search", skip_all, level = "debug")]
    async fn search_inner(&self, query: &str) -> Result<Vec<SearchCandidate>> {
        let url = format!("{}/search", self.base_url);
        let limit = self.result_limit.to_string();
        debug!(query, limit = self.result_limit, "Requesting candidates");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", limit.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        decode_search_response(&body)
    }
}

#[cfg(feature = "http")]
impl Geocoder for GeocodeClient {
    fn search(&self, query: String) -> BoxFuture<'_, Result<Vec<SearchCandidate>>> {
        Box::pin(async move { self.search_inner(&query).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data;

    #[test]
    fn test_decode_preserves_service_ranking() {
        let candidates = decode_search_response(&test_data::paris_response_body()).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0].label,
            "Paris, Île-de-France, Metropolitan France, France"
        );
        assert_eq!(candidates[0].coordinate, Coordinate::new(48.8566, 2.3522));
        assert!(candidates[1].label.contains("Texas"));
    }

    #[test]
    fn test_empty_array_is_a_valid_response() {
        let candidates = decode_search_response(&test_data::empty_response_body()).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_non_json_body_is_a_decode_error() {
        let err = decode_search_response(test_data::malformed_response_body()).unwrap_err();
        assert!(matches!(err, GeocodeError::Decode(_)));
    }

    #[test]
    fn test_unparsable_latitude_is_rejected() {
        let body = r#"[{"display_name": "Nowhere", "lat": "not-a-number", "lon": "0.0"}]"#;

        match decode_search_response(body).unwrap_err() {
            GeocodeError::InvalidCoordinate { axis, value } => {
                assert_eq!(axis, "lat");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_coordinate_is_rejected() {
        let body = r#"[{"display_name": "Off the map", "lat": "91.0", "lon": "0.0"}]"#;
        let err = decode_search_response(body).unwrap_err();
        assert!(matches!(err, GeocodeError::OutOfRange { .. }));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_client_knobs_apply() {
        let client = GeocodeClient::new()
            .unwrap()
            .with_base_url("http://localhost:8080")
            .with_result_limit(3);

        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.result_limit(), 3);
    }
}
