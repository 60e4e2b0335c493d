//! In-memory surface that records every call for later inspection.

use std::sync::{Arc, Mutex, MutexGuard};

use itertools::Itertools;
use placemark_geocoding::Coordinate;

use super::{CircleStyle, MapSurface, MarkerHandle, MarkerIcon, TileLayer};

/// What kind of marker a recorded entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Pin,
    Circle,
}

/// A marker as the surface last saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMarker {
    pub handle: MarkerHandle,
    pub kind: MarkerKind,
    pub coordinate: Coordinate,
    pub popup_html: Option<String>,
    pub popup_open: bool,
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_handle: u64,
    view: Option<(Coordinate, u8)>,
    tile_layers: Vec<TileLayer>,
    markers: Vec<RecordedMarker>,
}

/// Map surface for tests, examples, and headless hosts.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the widget owns another.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view center and zoom, if a view was ever set.
    #[must_use]
    pub fn view(&self) -> Option<(Coordinate, u8)> {
        self.lock().view
    }

    #[must_use]
    pub fn tile_layers(&self) -> Vec<TileLayer> {
        self.lock().tile_layers.clone()
    }

    /// All markers in creation order.
    #[must_use]
    pub fn markers(&self) -> Vec<RecordedMarker> {
        self.lock().markers.clone()
    }

    #[must_use]
    pub fn marker(&self, handle: MarkerHandle) -> Option<RecordedMarker> {
        self.lock()
            .markers
            .iter()
            .find(|marker| marker.handle == handle)
            .cloned()
    }

    /// Pin markers only, in creation order.
    #[must_use]
    pub fn pins(&self) -> Vec<RecordedMarker> {
        self.markers_of(MarkerKind::Pin)
    }

    /// Circle markers only, in creation order.
    #[must_use]
    pub fn circles(&self) -> Vec<RecordedMarker> {
        self.markers_of(MarkerKind::Circle)
    }

    /// One-line description of the surface, for example output.
    #[must_use]
    pub fn summary(&self) -> String {
        let state = self.lock();
        let view = state.view.map_or_else(
            || "no view".to_string(),
            |(center, zoom)| format!("view {center} @ z{zoom}"),
        );
        let markers = state
            .markers
            .iter()
            .map(|marker| format!("{:?} at {}", marker.kind, marker.coordinate))
            .join("; ");
        if markers.is_empty() {
            view
        } else {
            format!("{view} | {markers}")
        }
    }

    fn markers_of(&self, kind: MarkerKind) -> Vec<RecordedMarker> {
        self.lock()
            .markers
            .iter()
            .filter(|marker| marker.kind == kind)
            .cloned()
            .collect()
    }

    fn push_marker(&mut self, at: Coordinate, kind: MarkerKind) -> MarkerHandle {
        let mut state = self.lock();
        state.next_handle += 1;
        let handle = MarkerHandle::new(state.next_handle);
        state.markers.push(RecordedMarker {
            handle,
            kind,
            coordinate: at,
            popup_html: None,
            popup_open: false,
        });
        handle
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().expect("surface state lock poisoned")
    }

    fn marker_mut(state: &mut SurfaceState, handle: MarkerHandle) -> Option<&mut RecordedMarker> {
        state.markers.iter_mut().find(|marker| marker.handle == handle)
    }
}

impl MapSurface for HeadlessSurface {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.lock().view = Some((center, zoom));
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.lock().tile_layers.push(layer.clone());
    }

    fn add_marker(&mut self, at: Coordinate, _icon: &MarkerIcon) -> MarkerHandle {
        self.push_marker(at, MarkerKind::Pin)
    }

    fn bind_popup(&mut self, marker: MarkerHandle, html: &str) {
        let mut state = self.lock();
        if let Some(entry) = Self::marker_mut(&mut state, marker) {
            entry.popup_html = Some(html.to_string());
        }
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        let mut state = self.lock();
        if let Some(entry) = Self::marker_mut(&mut state, marker) {
            entry.popup_open = true;
        }
    }

    fn add_circle_marker(&mut self, at: Coordinate, _style: &CircleStyle) -> MarkerHandle {
        self.push_marker(at, MarkerKind::Circle)
    }

    fn move_marker(&mut self, marker: MarkerHandle, to: Coordinate) {
        let mut state = self.lock();
        if let Some(entry) = Self::marker_mut(&mut state, marker) {
            entry.coordinate = to;
        }
    }
}
