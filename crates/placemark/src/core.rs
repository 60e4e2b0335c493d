//! The widget context that ties search, markers, geolocation, and the
//! rendering surface together.
//!
//! [`MapWidget`] owns all widget state behind a shared handle. A frontend
//! forwards user events in (input edits, blur, map clicks, button presses)
//! and renders [`UiState`] snapshots out. Cheap to clone; clones share
//! state, so event handlers can each hold their own copy.

use std::sync::{Arc, Mutex, MutexGuard};

use placemark_geocoding::{Coordinate, Geocoder};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::WidgetConfig,
    geolocation::{GeolocationError, Geolocator},
    markers::{MarkerStore, PlacedMarker, popup_html},
    search::{Debouncer, ResultsView, SearchFlow},
    surface::{MapSurface, MarkerHandle},
};

/// Alert shown when the platform has no geolocation support.
pub const GEOLOCATION_UNSUPPORTED_ALERT: &str = "Geolocation is not supported by your browser";
/// Alert shown when a position request fails.
pub const GEOLOCATION_FAILED_ALERT: &str =
    "Could not get your location. Please check your browser permissions.";

/// State of the locate control, mirrored by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocateControl {
    /// Ready for a request.
    #[default]
    Idle,
    /// A position request is in flight; render the control dimmed and
    /// ignore further presses.
    Requesting,
}

/// Snapshot of everything a frontend renders outside the map itself.
///
/// Returned by value from [`MapWidget::ui_state`], never as a live view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    /// Current text of the search input.
    pub input: String,
    /// The results list, replaced wholesale on every change.
    pub results: ResultsView,
    pub locate_control: LocateControl,
    /// Pending blocking alert, if any. Consumed via
    /// [`MapWidget::take_alert`].
    pub alert: Option<String>,
}

struct WidgetCore<S> {
    surface: S,
    config: Arc<WidgetConfig>,
    markers: MarkerStore,
    flow: SearchFlow,
    ui: UiState,
}

impl<S: MapSurface> WidgetCore<S> {
    fn place_marker(&mut self, at: Coordinate) -> MarkerHandle {
        let handle = self.surface.add_marker(at, &self.config.marker_icon);
        self.surface.bind_popup(handle, &popup_html(at));
        self.markers.record_placed(PlacedMarker {
            handle,
            coordinate: at,
        });
        self.surface.open_popup(handle);
        info!(lat = at.lat, lon = at.lon, "Placed marker");
        handle
    }

    fn hide_results(&mut self) {
        self.ui.results = ResultsView::hidden();
        // Orphan any in-flight response so it cannot resurrect the list.
        self.flow.invalidate();
    }

    fn upsert_location_marker(&mut self, at: Coordinate) {
        if let Some(handle) = self.markers.location_handle() {
            self.surface.move_marker(handle, at);
        } else {
            let handle = self
                .surface
                .add_circle_marker(at, &self.config.location_style);
            self.markers.set_location_handle(handle);
        }
    }
}

/// The map widget: one of these per map on screen.
///
/// Construction initializes the surface (tile layer added, initial view
/// set); after that the widget only touches the surface in response to
/// events. All async work runs on the ambient Tokio runtime.
///
/// See the [crate docs](crate) for a usage walkthrough.
pub struct MapWidget<S> {
    core: Arc<Mutex<WidgetCore<S>>>,
    geocoder: Arc<dyn Geocoder>,
    geolocator: Arc<dyn Geolocator>,
    debouncer: Arc<Mutex<Debouncer>>,
    config: Arc<WidgetConfig>,
}

// Manual impl to avoid requiring S: Clone.
impl<S> Clone for MapWidget<S> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            geocoder: Arc::clone(&self.geocoder),
            geolocator: Arc::clone(&self.geolocator),
            debouncer: Arc::clone(&self.debouncer),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> MapWidget<S>
where
    S: MapSurface + Send + 'static,
{
    /// Create a widget with the default configuration.
    pub fn new(
        surface: S,
        geocoder: impl Geocoder + 'static,
        geolocator: impl Geolocator + 'static,
    ) -> Self {
        Self::with_config(surface, geocoder, geolocator, WidgetConfig::default())
    }

    /// Create a widget with a custom configuration.
    ///
    /// Use [`WidgetConfig::builder`] to produce a validated `config`.
    #[instrument(name = "Create map widget", skip_all, level = "debug")]
    pub fn with_config(
        mut surface: S,
        geocoder: impl Geocoder + 'static,
        geolocator: impl Geolocator + 'static,
        config: WidgetConfig,
    ) -> Self {
        let config = Arc::new(config);

        surface.add_tile_layer(&config.tile_layer);
        surface.set_view(config.initial_center, config.initial_zoom);
        info!(
            center = %config.initial_center,
            zoom = config.initial_zoom,
            "Initialized map surface"
        );

        let core = WidgetCore {
            surface,
            config: Arc::clone(&config),
            markers: MarkerStore::default(),
            flow: SearchFlow::default(),
            ui: UiState::default(),
        };

        Self {
            core: Arc::new(Mutex::new(core)),
            geocoder: Arc::new(geocoder),
            geolocator: Arc::new(geolocator),
            debouncer: Arc::new(Mutex::new(Debouncer::new(config.debounce_delay))),
            config,
        }
    }

    /// Record a search-input edit and schedule the debounced search.
    ///
    /// The input text lands in [`UiState`] immediately; the search itself
    /// runs only after the configured quiet period, against whatever the
    /// input holds at that moment. Needs a running Tokio runtime.
    pub fn on_search_input(&self, text: &str) {
        self.lock_core().ui.input = text.to_string();

        let widget = self.clone();
        self.lock_debouncer().call(async move {
            let query = widget.current_input();
            widget.search_now(&query).await;
        });
    }

    /// Run a search immediately, bypassing the debounce.
    ///
    /// Queries shorter than the configured minimum (after trimming) issue
    /// no request and hide the results list. Failures render as the inline
    /// error row; they are never propagated to the caller.
    #[instrument(name = "Place search", skip_all, level = "debug")]
    pub async fn search_now(&self, text: &str) {
        let query = text.trim().to_string();

        let generation = {
            let mut core = self.lock_core();
            if query.chars().count() < self.config.min_query_len {
                debug!(query, "Query below minimum length, hiding results");
                core.hide_results();
                return;
            }
            core.flow.begin()
        };

        debug!(query, generation, "Dispatching geocode search");
        let outcome = self.geocoder.search(query).await;

        let mut core = self.lock_core();
        if !core.flow.is_current(generation) {
            debug!(generation, "Dropping superseded search response");
            return;
        }
        core.ui.results = match outcome {
            Ok(candidates) => {
                debug!(count = candidates.len(), "Search returned");
                ResultsView::from_candidates(candidates)
            }
            Err(error) => {
                warn!(error = %error, "Search failed");
                ResultsView::error()
            }
        };
    }

    /// Select the results row at `index`.
    ///
    /// For a candidate row: recenter on it at the focus zoom, drop a pin
    /// there, clear the input, and hide the list; returns the candidate's
    /// coordinate. Placeholder rows and out-of-range indices select
    /// nothing and leave all state as it was.
    pub fn select_result(&self, index: usize) -> Option<Coordinate> {
        let mut core = self.lock_core();

        let candidate = core.ui.results.candidate(index)?.clone();
        let at = candidate.coordinate;
        info!(label = %candidate.label, %at, "Search result selected");

        core.surface.set_view(at, self.config.focus_zoom);
        core.place_marker(at);
        core.ui.input.clear();
        core.hide_results();
        Some(at)
    }

    /// Handle the search input losing focus.
    ///
    /// The results list is hidden after the blur grace period rather than
    /// immediately, so a selection click racing the blur still completes.
    pub fn on_input_blur(&self) {
        let widget = self.clone();
        let grace = self.config.blur_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            debug!("Blur grace elapsed, hiding results");
            widget.lock_core().hide_results();
        });
    }

    /// Drop a pin where the user clicked the map.
    ///
    /// The pin's coordinate popup opens immediately. Every click places a
    /// new marker; existing ones are never moved or replaced.
    pub fn on_map_click(&self, at: Coordinate) -> MarkerHandle {
        self.lock_core().place_marker(at)
    }

    /// Resolve the user's position and focus the map on it.
    ///
    /// Marks the locate control as requesting, resolves the position, then
    /// recenters at the focus zoom and upserts the location circle marker.
    /// On failure the control is restored and a blocking alert is queued;
    /// the error is also returned for callers that want it.
    #[instrument(name = "Locate user", skip_all, level = "debug")]
    pub async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        if !self.geolocator.is_available() {
            warn!("Geolocation unsupported on this platform");
            self.lock_core().ui.alert = Some(GEOLOCATION_UNSUPPORTED_ALERT.to_string());
            return Err(GeolocationError::Unsupported);
        }

        self.lock_core().ui.locate_control = LocateControl::Requesting;
        debug!("Requesting current position");

        let outcome = self.geolocator.current_position().await;

        let mut core = self.lock_core();
        core.ui.locate_control = LocateControl::Idle;
        match outcome {
            Ok(at) => {
                info!(%at, "Position resolved");
                core.surface.set_view(at, self.config.focus_zoom);
                core.upsert_location_marker(at);
                Ok(at)
            }
            Err(error) => {
                warn!(error = %error, "Position request failed");
                core.ui.alert = Some(GEOLOCATION_FAILED_ALERT.to_string());
                Err(error)
            }
        }
    }

    /// Snapshot of the renderable UI state.
    #[must_use]
    pub fn ui_state(&self) -> UiState {
        self.lock_core().ui.clone()
    }

    /// Take the pending blocking alert, if any.
    ///
    /// Taking clears it, so the frontend shows each alert exactly once.
    pub fn take_alert(&self) -> Option<String> {
        self.lock_core().ui.alert.take()
    }

    /// User-placed markers, oldest first.
    #[must_use]
    pub fn placed_markers(&self) -> Vec<PlacedMarker> {
        self.lock_core().markers.placed().to_vec()
    }

    #[must_use]
    pub fn placed_marker_count(&self) -> usize {
        self.lock_core().markers.placed_count()
    }

    /// The configuration this widget runs with.
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn current_input(&self) -> String {
        self.lock_core().ui.input.clone()
    }

    fn lock_core(&self) -> MutexGuard<'_, WidgetCore<S>> {
        self.core.lock().expect("widget state lock poisoned")
    }

    fn lock_debouncer(&self) -> MutexGuard<'_, Debouncer> {
        self.debouncer.lock().expect("debouncer lock poisoned")
    }
}
