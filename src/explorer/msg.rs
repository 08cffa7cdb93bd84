//! Messages for the explorer state machine
//!
//! Messages describe what happened in a front end (browser or terminal), not
//! what should be done about it. They are plain data and arrive over HTTP as
//! JSON, e.g. `{"type": "click", "tissue": "Liver", "tf": "CTCF"}`.

use crate::dataset::CellKey;
use crate::render::Layout;
use serde::{Deserialize, Serialize};

/// All possible interactions with the linked views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    /// Pointer entered or moved over a heatmap cell
    Hover(CellKey),
    /// Pointer left the heatmap cell it was over
    Leave,
    /// Heatmap cell clicked
    Click(CellKey),
    /// TF-count control changed
    SetTfCount { count: usize },
    /// Clear-pin button pressed
    ClearPin,
    /// Panels changed size
    Resize(Layout),
    /// Nothing to do (unmapped input)
    Noop,
}

impl Msg {
    pub fn hover(tissue: &str, tf: &str) -> Self {
        Msg::Hover(CellKey::new(tissue, tf))
    }

    pub fn click(tissue: &str, tf: &str) -> Self {
        Msg::Click(CellKey::new(tissue, tf))
    }

    /// Messages that rebuild every surface from a fresh subset
    pub fn resets_view(&self) -> bool {
        matches!(self, Msg::SetTfCount { .. } | Msg::Resize(_))
    }
}
