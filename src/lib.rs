//! TFBS Explorer - linked views over tissue × transcription-factor binding-site summaries
//!
//! Load a precomputed summary document, pick the top N TFs, and explore it
//! through three linked views: a heatmap, a stacked bar chart for one TF, and
//! a detail panel for one cell. Hovering previews a cell, clicking pins it.
//!
//! # Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `dataset` | The input document, validation and lookups |
//! | `view` | Top-N subsets and the allowed TF counts |
//! | `explorer` | Messages, state and the pure `update` function |
//! | `render` | SVG surfaces for the browser viewer |
//! | `serve` | HTTP viewer |
//! | `tui` | Terminal viewer |
//! | `report` | Static HTML snapshots and per-TF summaries |
//!
//! # Quick Start
//!
//! ```no_run
//! use tfbs_explorer::{Dataset, Explorer, Msg, TfCounts};
//! use tfbs_explorer::render::Layout;
//!
//! let dataset = Dataset::load("viz_data/tfbs_summary_top40.json").unwrap();
//! let mut explorer = Explorer::new(dataset, TfCounts::default(), 40, Layout::default());
//!
//! // Pin a cell and get the surfaces that changed
//! let scene = explorer.dispatch(Msg::click("Liver", "CTCF"));
//! assert!(scene.detail.is_some());
//! ```

pub mod color;
pub mod config;
pub mod dataset;
pub mod explorer;
pub mod format;
pub mod render;
pub mod report;
pub mod scale;
pub mod serve;
pub mod tui;
pub mod view;

pub use config::Config;
pub use dataset::{CellKey, CellRecord, Dataset, DatasetError};
pub use explorer::msg::Msg;
pub use explorer::state::{ExplorerState, Phase};
pub use explorer::Explorer;
pub use view::{TfCounts, View};
