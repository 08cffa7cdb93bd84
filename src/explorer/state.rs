//! Explorer state and the pure helpers that transform it
//!
//! `ExplorerState` is an immutable value: every transition builds a new one.
//! Nothing here performs I/O.

use crate::dataset::{CellKey, CellRecord, Dataset};
use crate::render::Layout;
use crate::view::View;
use serde::Serialize;

/// Where the selection state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NoSelection,
    Hovering,
    Pinned,
}

impl Phase {
    /// Status line shown above the detail panel
    pub fn status(self) -> &'static str {
        match self {
            Phase::NoSelection => "Hover a cell, or click to pin",
            Phase::Hovering => "Hovering (click to pin)",
            Phase::Pinned => "Pinned selection (click a different cell to change)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerState {
    pub tf_count: usize,
    /// Cell under the pointer (tracked even while pinned, for the tooltip)
    pub hovered: Option<CellKey>,
    pub pinned: Option<CellKey>,
    pub layout: Layout,
}

impl ExplorerState {
    pub fn new(tf_count: usize, layout: Layout) -> Self {
        Self {
            tf_count,
            hovered: None,
            pinned: None,
            layout,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.pinned.is_some() {
            Phase::Pinned
        } else if self.hovered.is_some() {
            Phase::Hovering
        } else {
            Phase::NoSelection
        }
    }

    /// The cell the detail panel describes: pinned wins over hovered
    pub fn focus(&self) -> Option<&CellKey> {
        self.pinned.as_ref().or(self.hovered.as_ref())
    }

    pub fn is_pinned(&self, key: &CellKey) -> bool {
        self.pinned.as_ref() == Some(key)
    }

    pub fn view(&self, dataset: &Dataset) -> View {
        View::subset(dataset, self.tf_count)
    }

    /// TF the bar chart shows: the pinned TF, else the first in the subset
    pub fn bar_tf(&self, view: &View) -> Option<String> {
        bar_tf(self.pinned.as_ref(), view)
    }

    /// Record behind the focused cell, with imputed fallback
    pub fn focus_record(&self, view: &View) -> Option<CellRecord> {
        self.focus().map(|k| view.cell(&k.tissue, &k.tf))
    }
}

/// Pin toggle: clicking the pinned cell unpins, any other cell pins it
pub fn toggle_pin(pinned: Option<&CellKey>, clicked: &CellKey) -> Option<CellKey> {
    match pinned {
        Some(p) if p == clicked => None,
        _ => Some(clicked.clone()),
    }
}

pub fn bar_tf(pinned: Option<&CellKey>, view: &View) -> Option<String> {
    match pinned {
        Some(key) if view.contains_tf(&key.tf) => Some(key.tf.clone()),
        _ => view.first_tf().map(str::to_string),
    }
}
