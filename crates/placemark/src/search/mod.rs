//! Search flow: the results view-model and response ordering.
//!
//! The presenter here is pure state. Rendering belongs to whatever frontend
//! consumes [`UiState`](crate::UiState); it replaces its list wholesale with
//! each new [`ResultsView`] instead of patching rows. [`SearchFlow`] tags
//! every accepted query with a generation so responses to superseded queries
//! are dropped instead of applied out of order.

mod debounce;

pub use debounce::Debouncer;

use placemark_geocoding::SearchCandidate;

/// Row text shown when a search matched nothing.
pub const NO_RESULTS_LABEL: &str = "No results found";
/// Row text shown when a search failed.
pub const ERROR_LABEL: &str = "Error searching location";

/// One row of the results list.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsEntry {
    /// A selectable place.
    Candidate(SearchCandidate),
    /// The single row shown for an empty result set. Not selectable.
    NoResults,
    /// The single row shown for a failed search. Not selectable.
    Error,
}

impl ResultsEntry {
    /// Text a renderer would display for this row.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Candidate(candidate) => &candidate.label,
            Self::NoResults => NO_RESULTS_LABEL,
            Self::Error => ERROR_LABEL,
        }
    }

    /// Whether choosing this row does anything.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Candidate(_))
    }
}

/// The results list as it should be rendered right now.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsView {
    pub visible: bool,
    /// Rows in the order the geocoding service ranked them.
    pub entries: Vec<ResultsEntry>,
}

impl ResultsView {
    /// The hidden, empty list.
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Visible list for a successful search.
    ///
    /// Zero candidates render as a single [`ResultsEntry::NoResults`] row,
    /// so the user sees an answer rather than nothing.
    #[must_use]
    pub fn from_candidates(candidates: Vec<SearchCandidate>) -> Self {
        let entries = if candidates.is_empty() {
            vec![ResultsEntry::NoResults]
        } else {
            candidates.into_iter().map(ResultsEntry::Candidate).collect()
        };
        Self {
            visible: true,
            entries,
        }
    }

    /// Visible list for a failed search: a single error row.
    #[must_use]
    pub fn error() -> Self {
        Self {
            visible: true,
            entries: vec![ResultsEntry::Error],
        }
    }

    /// The candidate at `index`, if that row is selectable.
    #[must_use]
    pub fn candidate(&self, index: usize) -> Option<&SearchCandidate> {
        match self.entries.get(index) {
            Some(ResultsEntry::Candidate(candidate)) => Some(candidate),
            _ => None,
        }
    }
}

/// Orders an unordered stream of search responses.
///
/// Every accepted query takes a fresh generation. A response is applied only
/// while its generation is still the latest, so a slow response to an old
/// query can never overwrite the outcome of a newer one. Transitions that
/// hide the list also advance the generation, which keeps a late response
/// from resurrecting it.
#[derive(Debug, Default)]
pub struct SearchFlow {
    latest: u64,
}

impl SearchFlow {
    /// Register a new query and return its generation tag.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a response tagged `generation` is still the one to apply.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }

    /// Invalidate all outstanding responses.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use placemark_geocoding::Coordinate;

    use super::*;

    fn candidate(label: &str) -> SearchCandidate {
        SearchCandidate {
            label: label.to_string(),
            coordinate: Coordinate::new(48.8566, 2.3522),
        }
    }

    #[test]
    fn test_candidates_become_selectable_rows_in_order() {
        let view = ResultsView::from_candidates(vec![candidate("first"), candidate("second")]);

        assert!(view.visible);
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].label(), "first");
        assert_eq!(view.entries[1].label(), "second");
        assert!(view.entries.iter().all(ResultsEntry::is_selectable));
    }

    #[test]
    fn test_empty_result_set_is_a_visible_no_results_row() {
        let view = ResultsView::from_candidates(Vec::new());

        assert!(view.visible);
        assert_eq!(view.entries, vec![ResultsEntry::NoResults]);
        assert_eq!(view.entries[0].label(), NO_RESULTS_LABEL);
        assert!(!view.entries[0].is_selectable());
    }

    #[test]
    fn test_error_view_is_a_single_error_row() {
        let view = ResultsView::error();

        assert!(view.visible);
        assert_eq!(view.entries, vec![ResultsEntry::Error]);
        assert_eq!(view.entries[0].label(), ERROR_LABEL);
        assert!(!view.entries[0].is_selectable());
    }

    #[test]
    fn test_candidate_lookup_skips_placeholder_rows() {
        let with_candidates = ResultsView::from_candidates(vec![candidate("only")]);
        assert_eq!(with_candidates.candidate(0).unwrap().label, "only");
        assert!(with_candidates.candidate(1).is_none());

        let no_results = ResultsView::from_candidates(Vec::new());
        assert!(no_results.candidate(0).is_none());

        let error = ResultsView::error();
        assert!(error.candidate(0).is_none());
    }

    #[test]
    fn test_newer_generation_supersedes_older() {
        let mut flow = SearchFlow::default();

        let first = flow.begin();
        let second = flow.begin();

        assert!(!flow.is_current(first));
        assert!(flow.is_current(second));
    }

    #[test]
    fn test_invalidate_orphans_every_outstanding_response() {
        let mut flow = SearchFlow::default();

        let generation = flow.begin();
        assert!(flow.is_current(generation));

        flow.invalidate();
        assert!(!flow.is_current(generation));
    }
}
