//! Renderers: pure functions from (view, selection) to SVG/HTML fragments
//!
//! Every surface is rebuilt from scratch on each call, so rendering the same
//! state twice yields identical markup.

pub mod axis;
pub mod bars;
pub mod chart;
pub mod detail;
pub mod heatmap;
pub mod legend;
pub mod page;
pub mod tooltip;

use serde::{Deserialize, Serialize};

use crate::dataset::{CellKey, Dataset};
use crate::explorer::state::ExplorerState;

pub use detail::DetailPanel;

/// Pixel dimensions of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Sizes of the resizable panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub heatmap: Size,
    pub bars: Size,
    #[serde(default = "default_mini")]
    pub mini: Size,
}

fn default_mini() -> Size {
    Size::new(260.0, 150.0)
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            heatmap: Size::new(960.0, 560.0),
            bars: Size::new(960.0, 320.0),
            mini: default_mini(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Inner plotting area left after the margins (never negative)
    pub fn inner(&self, size: Size) -> Size {
        Size::new(
            (size.width - self.left - self.right).max(0.0),
            (size.height - self.top - self.bottom).max(0.0),
        )
    }
}

/// Independently redrawable parts of the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Legend,
    Heatmap,
    Bars,
    Detail,
}

impl Surface {
    pub const ALL: &'static [Surface] = &[
        Surface::Legend,
        Surface::Heatmap,
        Surface::Bars,
        Surface::Detail,
    ];
}

/// Tooltip change requested by the controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipUpdate {
    pub visible: bool,
    pub html: String,
}

/// Freshly rendered surfaces; `None` means "leave as is"
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bars: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipUpdate>,
}

/// Render the requested surfaces for the given state
pub fn render_scene(
    dataset: &Dataset,
    state: &ExplorerState,
    surfaces: &[Surface],
    tooltip: Option<Option<CellKey>>,
) -> Scene {
    let view = state.view(dataset);
    let mut scene = Scene::default();

    for surface in surfaces {
        match surface {
            Surface::Legend => scene.legend = Some(legend::render()),
            Surface::Heatmap => {
                scene.heatmap = Some(heatmap::render(
                    &view,
                    state.pinned.as_ref(),
                    state.layout.heatmap,
                ))
            }
            Surface::Bars => {
                scene.bars = state
                    .bar_tf(&view)
                    .map(|tf| bars::render(&view, &tf, state.layout.bars))
            }
            Surface::Detail => {
                let record = state.focus_record(&view);
                scene.detail = Some(DetailPanel::build(
                    record.as_ref(),
                    state.phase(),
                    state.layout.mini,
                ))
            }
        }
    }

    scene.tooltip = tooltip.map(|target| match target {
        Some(key) => TooltipUpdate {
            visible: true,
            html: tooltip::cell(&view.cell(&key.tissue, &key.tf)),
        },
        None => TooltipUpdate {
            visible: false,
            html: String::new(),
        },
    });

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;

    #[test]
    fn test_margin_inner_never_negative() {
        let m = Margin { top: 50.0, right: 20.0, bottom: 20.0, left: 120.0 };
        assert_eq!(m.inner(Size::new(100.0, 50.0)), Size::new(0.0, 0.0));
        assert_eq!(m.inner(Size::new(340.0, 170.0)), Size::new(200.0, 100.0));
    }

    #[test]
    fn test_render_scene_only_requested_surfaces() {
        let ds = fixtures::small();
        let state = ExplorerState::new(3, Layout::default());
        let scene = render_scene(&ds, &state, &[Surface::Detail], None);
        assert!(scene.heatmap.is_none());
        assert!(scene.bars.is_none());
        assert!(scene.legend.is_none());
        let detail = scene.detail.unwrap();
        assert_eq!(detail.status, "Hover a cell, or click to pin");
    }

    #[test]
    fn test_render_scene_all() {
        let ds = fixtures::small();
        let state = ExplorerState::new(3, Layout::default());
        let scene = render_scene(&ds, &state, Surface::ALL, None);
        assert!(scene.legend.unwrap().starts_with("<svg"));
        assert!(scene.heatmap.unwrap().contains("class=\"cell\""));
        assert!(scene.bars.unwrap().contains("TF = CTCF"));
    }

    #[test]
    fn test_render_scene_is_deterministic() {
        let ds = fixtures::small();
        let state = ExplorerState::new(2, Layout::default());
        let a = render_scene(&ds, &state, Surface::ALL, None);
        let b = render_scene(&ds, &state, Surface::ALL, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scene_tooltip() {
        let ds = fixtures::small();
        let state = ExplorerState::new(3, Layout::default());
        let key = CellKey::new("Brain", "YY1");
        let scene = render_scene(&ds, &state, &[], Some(Some(key)));
        let tip = scene.tooltip.unwrap();
        assert!(tip.visible);
        assert!(tip.html.contains("imputed structural zero"));

        let scene = render_scene(&ds, &state, &[], Some(None));
        assert!(!scene.tooltip.unwrap().visible);
    }

    #[test]
    fn test_layout_json_defaults_mini() {
        let layout: Layout = serde_json::from_str(
            r#"{"heatmap":{"width":10,"height":10},"bars":{"width":10,"height":10}}"#,
        )
        .unwrap();
        assert_eq!(layout.mini, Layout::default().mini);
    }
}
