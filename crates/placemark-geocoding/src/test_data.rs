//! Canned responses and offline geocoder backends.
//!
//! Shipped as a normal module so examples, doctests, and downstream test
//! suites can drive the widget without network access.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::{Coordinate, GeocodeError, Geocoder, Result, SearchCandidate};

/// Nominatim-shaped body for a "Paris" search, two ranked entries.
///
/// Carries the extra fields the live service sends so decode tests exercise
/// the real response shape, not a trimmed one.
#[must_use]
pub fn paris_response_body() -> String {
    serde_json::json!([
        {
            "place_id": 88904576,
            "licence": "Data © OpenStreetMap contributors, ODbL 1.0. http://osm.org/copyright",
            "osm_type": "relation",
            "osm_id": 7444,
            "boundingbox": ["48.8155755", "48.902156", "2.224122", "2.4697602"],
            "lat": "48.8566",
            "lon": "2.3522",
            "display_name": "Paris, Île-de-France, Metropolitan France, France",
            "class": "boundary",
            "type": "administrative",
            "importance": 0.9417101715588673
        },
        {
            "place_id": 287160847,
            "licence": "Data © OpenStreetMap contributors, ODbL 1.0. http://osm.org/copyright",
            "osm_type": "relation",
            "osm_id": 115357,
            "boundingbox": ["33.6206345", "33.7383866", "-95.6279396", "-95.4354115"],
            "lat": "33.6617962",
            "lon": "-95.555513",
            "display_name": "Paris, Lamar County, Texas, United States",
            "class": "boundary",
            "type": "administrative",
            "importance": 0.6067418677722102
        }
    ])
    .to_string()
}

/// Body of a search with no matches.
#[must_use]
pub fn empty_response_body() -> String {
    "[]".to_string()
}

/// A rate-limit page instead of JSON, the classic failure mode.
#[must_use]
pub fn malformed_response_body() -> &'static str {
    "<html><body>Too Many Requests</body></html>"
}

/// The candidates [`paris_response_body`] decodes to.
#[must_use]
pub fn paris_candidates() -> Vec<SearchCandidate> {
    vec![
        SearchCandidate {
            label: "Paris, Île-de-France, Metropolitan France, France".to_string(),
            coordinate: Coordinate::new(48.8566, 2.3522),
        },
        SearchCandidate {
            label: "Paris, Lamar County, Texas, United States".to_string(),
            coordinate: Coordinate::new(33.6617962, -95.555513),
        },
    ]
}

/// Geocoder that answers every query from a fixed candidate list.
///
/// Queries are recorded as they arrive, so tests can assert how many
/// searches actually reached the backend and with what text. Clones share
/// the log.
#[derive(Debug, Clone, Default)]
pub struct CannedGeocoder {
    candidates: Vec<SearchCandidate>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl CannedGeocoder {
    #[must_use]
    pub fn new(candidates: Vec<SearchCandidate>) -> Self {
        Self {
            candidates,
            queries: Arc::default(),
        }
    }

    /// Backend with no matches for anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Every query seen so far, oldest first.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("query log lock poisoned").clone()
    }

    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.lock().expect("query log lock poisoned").len()
    }
}

impl Geocoder for CannedGeocoder {
    fn search(&self, query: String) -> BoxFuture<'_, Result<Vec<SearchCandidate>>> {
        self.queries
            .lock()
            .expect("query log lock poisoned")
            .push(query);
        let candidates = self.candidates.clone();
        Box::pin(async move { Ok(candidates) })
    }
}

/// Geocoder whose every search fails, for exercising error paths.
#[derive(Debug, Clone)]
pub struct FailingGeocoder {
    message: String,
}

impl FailingGeocoder {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingGeocoder {
    fn default() -> Self {
        Self::new("canned geocoding failure")
    }
}

impl Geocoder for FailingGeocoder {
    fn search(&self, _query: String) -> BoxFuture<'_, Result<Vec<SearchCandidate>>> {
        let message = self.message.clone();
        Box::pin(async move { Err(GeocodeError::Backend(message)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_paris_fixture_and_body_agree() {
        let decoded = crate::nominatim::decode_search_response(&paris_response_body()).unwrap();
        assert_eq!(decoded, paris_candidates());
    }

    #[test]
    fn test_canned_geocoder_replays_candidates_and_logs_queries() {
        let geocoder = CannedGeocoder::new(paris_candidates());

        let first = block_on(geocoder.search("Paris".to_string())).unwrap();
        let second = block_on(geocoder.search("paris, france".to_string())).unwrap();

        assert_eq!(first, paris_candidates());
        assert_eq!(second, paris_candidates());
        assert_eq!(geocoder.queries(), vec!["Paris", "paris, france"]);
    }

    #[test]
    fn test_clones_share_the_query_log() {
        let geocoder = CannedGeocoder::empty();
        let clone = geocoder.clone();

        block_on(clone.search("Berlin".to_string())).unwrap();

        assert_eq!(geocoder.query_count(), 1);
    }

    #[test]
    fn test_failing_geocoder_always_errors() {
        let geocoder = FailingGeocoder::new("backend down");
        let err = block_on(geocoder.search("anything".to_string())).unwrap_err();
        assert!(matches!(err, GeocodeError::Backend(message) if message == "backend down"));
    }
}
