use std::sync::Arc;

use eframe::egui;

use crate::config::AppConfig;
use crate::data::aggregate::{self, FilterRequest, FilterResult};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Display mode. Rendering style only: the aggregation engine never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Initial year-range selection, narrowed to the dataset's bounds.
const DEFAULT_YEAR_SPAN: (i32, i32) = (2010, 2024);

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, shared read-only. Replaced wholesale when the user
    /// opens another file, never mutated.
    pub dataset: Arc<Dataset>,

    /// Minimum-year cutoff applied to every load (configuration).
    pub min_year: Option<i32>,

    /// Whether the theme toggle is offered at all (configuration).
    pub theme_enabled: bool,

    /// Current display mode.
    pub theme: Theme,

    /// Currently selected genre (None only when the dataset has no genres).
    pub selected_genre: Option<String>,

    /// Inclusive year-range selection.
    pub year_start: i32,
    pub year_end: i32,

    /// Derived charts/statistics for the current selection.
    pub result: Option<FilterResult>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: &AppConfig) -> Self {
        let mut state = AppState {
            dataset: Arc::new(dataset),
            min_year: config.min_year,
            theme_enabled: config.theme_enabled,
            theme: Theme::default(),
            selected_genre: None,
            year_start: DEFAULT_YEAR_SPAN.0,
            year_end: DEFAULT_YEAR_SPAN.1,
            result: None,
            status_message: None,
        };
        state.reset_selection();
        state.refresh();
        state
    }

    /// Ingest a newly loaded dataset and re-derive the selection defaults.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Arc::new(dataset);
        self.status_message = None;
        self.reset_selection();
        self.refresh();
    }

    /// Pick the initial genre and clamp the default year span to the data.
    fn reset_selection(&mut self) {
        self.selected_genre = if self.dataset.has_genre("Action") {
            Some("Action".to_string())
        } else {
            self.dataset.genres.first().cloned()
        };

        if let Some((lo, hi)) = self.dataset.year_range {
            self.year_start = DEFAULT_YEAR_SPAN.0.clamp(lo, hi);
            self.year_end = DEFAULT_YEAR_SPAN.1.clamp(lo, hi);
        }
    }

    pub fn set_genre(&mut self, genre: String) {
        self.selected_genre = Some(genre);
        self.refresh();
    }

    /// Move the range start; dragging it past the end drags the end along.
    pub fn set_year_start(&mut self, year: i32) {
        self.year_start = year;
        self.year_end = self.year_end.max(year);
        self.refresh();
    }

    /// Move the range end; dragging it before the start drags the start along.
    pub fn set_year_end(&mut self, year: i32) {
        self.year_end = year;
        self.year_start = self.year_start.min(year);
        self.refresh();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Recompute the derived result for the current selection.
    ///
    /// One synchronous request/response round trip: build the request,
    /// validate it at the boundary, aggregate. The previous result is always
    /// discarded, never patched incrementally.
    pub fn refresh(&mut self) {
        self.result = None;
        let Some(genre) = self.selected_genre.clone() else {
            return;
        };
        let request = FilterRequest {
            genre,
            year_start: self.year_start,
            year_end: self.year_end,
        };
        match aggregate::validate(&self.dataset, &request) {
            Ok(()) => {
                self.result = Some(aggregate::aggregate(&self.dataset, &request));
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record {
                title: "A".into(),
                genre: "Action".into(),
                year: 1990,
                imdb_rating: 7.5,
                meta_score: Some(60.0),
            },
            Record {
                title: "B".into(),
                genre: "Drama".into(),
                year: 2020,
                imdb_rating: 8.5,
                meta_score: None,
            },
        ])
    }

    #[test]
    fn new_state_selects_action_and_clamps_years() {
        let state = AppState::new(dataset(), &AppConfig::default());
        assert_eq!(state.selected_genre.as_deref(), Some("Action"));
        assert_eq!((state.year_start, state.year_end), (2010, 2020));
        assert!(state.result.is_some());
    }

    #[test]
    fn year_setters_keep_range_ordered() {
        let mut state = AppState::new(dataset(), &AppConfig::default());
        state.set_year_start(2021);
        assert!(state.year_start <= state.year_end);
        state.set_year_end(1995);
        assert!(state.year_start <= state.year_end);
    }

    #[test]
    fn empty_dataset_yields_no_selection_or_result() {
        let state = AppState::new(Dataset::from_records(Vec::new()), &AppConfig::default());
        assert_eq!(state.selected_genre, None);
        assert!(state.result.is_none());
    }

    #[test]
    fn theme_toggle_flips_between_two_modes() {
        let mut state = AppState::new(dataset(), &AppConfig::default());
        assert_eq!(state.theme, Theme::Light);
        state.toggle_theme();
        assert_eq!(state.theme, Theme::Dark);
        state.toggle_theme();
        assert_eq!(state.theme, Theme::Light);
    }
}
