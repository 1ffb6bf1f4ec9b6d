use std::collections::BTreeMap;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{FilterOptions, Selections};
use crate::data::model::{Datasets, Dimension};
use crate::data::pipeline::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The three views of the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Graphs,
    GraphsBalanced,
    DataFrame,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Graphs, Tab::GraphsBalanced, Tab::DataFrame];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Graphs => "Graphs",
            Tab::GraphsBalanced => "Graphs (Balanced Data Frame)",
            Tab::DataFrame => "Data Frame",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded datasets (None when loading failed).
    pub datasets: Option<Arc<Datasets>>,

    /// Values offered by each sidebar control.
    pub options: FilterOptions,

    /// Per-dimension filter selections.
    pub selections: Selections,

    /// Pipeline output for the current selections (cached).
    pub view: Option<DashboardView>,

    /// One colour map per dimension, built from its options.
    pub colors: BTreeMap<Dimension, ColorMap>,

    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            datasets: None,
            options: FilterOptions::default(),
            selections: Selections::default(),
            view: None,
            colors: BTreeMap::new(),
            active_tab: Tab::default(),
            status_message: None,
        }
    }
}

impl AppState {
    pub fn new(datasets: Arc<Datasets>) -> Self {
        let mut state = Self::default();
        state.set_datasets(datasets);
        state
    }

    /// State for a failed startup load: no data, only the error.
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            status_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Ingest the loaded datasets, select everything, and compute the view.
    pub fn set_datasets(&mut self, datasets: Arc<Datasets>) {
        self.options = FilterOptions::from_datasets(&datasets);
        self.selections = Selections::all(&self.options);
        self.colors = Dimension::ALL
            .iter()
            .map(|&dim| (dim, ColorMap::new(self.options.get(dim))))
            .collect();
        self.datasets = Some(datasets);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the dashboard after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.datasets {
            self.view = Some(DashboardView::compute(ds, &self.selections));
        }
    }

    pub fn color_map(&self, dim: Dimension) -> Option<&ColorMap> {
        self.colors.get(&dim)
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &str) {
        self.selections.toggle(dim, value);
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        self.selections.select_all(dim, &self.options);
        self.refilter();
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selections.select_none(dim);
        self.refilter();
    }
}
