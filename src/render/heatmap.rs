//! Heatmap renderer
//!
//! Tissues run down the rows, TFs across the columns. Each cell is a circle:
//! radius from a square-root scale of the total (area tracks the count), fill
//! from the diverging scale of the signed score. Zero-total cells are drawn
//! faint and neutral; imputed cells get an extra overlay dot.

use svg::node::element::{Circle, Group, Rectangle};
use svg::Document;

use super::axis::{self, AxisStyle, Orient, Rotate};
use super::{chart, tooltip, Margin, Size};
use crate::color;
use crate::dataset::{CellKey, CellRecord};
use crate::format::{escape, num};
use crate::scale::{BandScale, SqrtScale};
use crate::view::View;

pub const MARGIN: Margin = Margin {
    top: 50.0,
    right: 20.0,
    bottom: 20.0,
    left: 120.0,
};

const IMPUTED_DOT_RADIUS: f64 = 2.2;
const CAPTION_FILL: &str = "rgba(255,255,255,.65)";

/// Scales positioning cells within the inner plotting area
#[derive(Debug, Clone)]
pub struct Geometry {
    pub inner: Size,
    pub x: BandScale,
    pub y: BandScale,
    pub r: SqrtScale,
}

impl Geometry {
    pub fn new(view: &View, size: Size) -> Self {
        let inner = MARGIN.inner(size);
        let x = BandScale::new(&view.tfs, (0.0, inner.width), 0.06, 0.0);
        let y = BandScale::new(&view.tissues, (0.0, inner.height), 0.08, 0.0);
        let max_radius = x.bandwidth().min(y.bandwidth()) * 0.48;
        let r = SqrtScale::new(view.max_total as f64, (0.0, max_radius));
        Self { inner, x, y, r }
    }

    /// Center of a cell, or None when the pair is not on the grid
    pub fn center(&self, tissue: &str, tf: &str) -> Option<(f64, f64)> {
        Some((self.x.center(tf)?, self.y.center(tissue)?))
    }

    pub fn radius(&self, total: u64) -> f64 {
        self.r.apply(total as f64)
    }
}

/// Fill and opacity for a cell circle
pub fn cell_paint(record: &CellRecord) -> (String, f64) {
    if record.total == 0 {
        (color::EMPTY_CELL.to_string(), 0.35)
    } else {
        (color::signed_color(record.score).hex(), 0.92)
    }
}

pub fn render(view: &View, pinned: Option<&CellKey>, size: Size) -> String {
    heatmap(view, pinned, size).to_string()
}

pub fn heatmap(view: &View, pinned: Option<&CellKey>, size: Size) -> Document {
    let geo = Geometry::new(view, size);

    let x_axis = axis::band(
        &geo.x,
        Orient::Top,
        geo.inner.width,
        AxisStyle {
            tick_size: 0.0,
            tick_padding: 6.0,
            rotate: Some(Rotate {
                degrees: -35.0,
                anchor: "start",
                dx: "0.35em",
                dy: "-0.25em",
            }),
        },
        str::to_string,
    );
    let y_axis = axis::band(
        &geo.y,
        Orient::Left,
        geo.inner.height,
        AxisStyle {
            tick_size: 0.0,
            tick_padding: 6.0,
            rotate: None,
        },
        str::to_string,
    );

    let mut grid = Group::new().set("class", "grid");
    let mut cells = Group::new().set("class", "cells");
    let mut dots = Group::new().set("class", "imputed");

    // Every grid position gets a circle; pairs missing from the matrix come
    // back from `View::cell` as imputed zeros.
    for tissue in &view.tissues {
        for tf in &view.tfs {
            let Some((cx, cy)) = geo.center(tissue, tf) else {
                continue;
            };
            let record = view.cell(tissue, tf);

            grid = grid.add(
                Rectangle::new()
                    .set("x", num(cx - geo.x.bandwidth() / 2.0))
                    .set("y", num(cy - geo.y.bandwidth() / 2.0))
                    .set("width", num(geo.x.bandwidth()))
                    .set("height", num(geo.y.bandwidth()))
                    .set("rx", 6)
                    .set("fill", "rgba(255,255,255,.03)")
                    .set("stroke", "rgba(255,255,255,.04)"),
            );

            let is_pinned = pinned.is_some_and(|k| record.is(k));
            let (fill, opacity) = cell_paint(&record);
            let mut circle = Circle::new()
                .set("class", if is_pinned { "cell pinned" } else { "cell" })
                .set("data-tissue", escape(tissue))
                .set("data-tf", escape(tf))
                .set("data-tip", escape(&tooltip::cell(&record)))
                .set("cx", num(cx))
                .set("cy", num(cy))
                .set("r", num(geo.radius(record.total)))
                .set("fill", fill)
                .set("opacity", opacity)
                .set("stroke", if is_pinned { "#ffffff" } else { "rgba(0,0,0,0)" });
            if is_pinned {
                circle = circle.set("stroke-width", 2);
            }
            cells = cells.add(circle);

            if record.imputed {
                dots = dots.add(
                    Circle::new()
                        .set("class", "imputed-dot")
                        .set("cx", num(cx))
                        .set("cy", num(cy))
                        .set("r", IMPUTED_DOT_RADIUS)
                        .set("fill", "rgba(255,255,255,.45)")
                        .set("pointer-events", "none"),
                );
            }
        }
    }

    let tissue_caption = chart::label(-MARGIN.left + 2.0, -32.0, "Tissue");
    let tf_caption = chart::label(geo.inner.width, -32.0, "Transcription factor (top-N by frequency)")
        .set("text-anchor", "end");

    let plot = chart::group_at(MARGIN.left, MARGIN.top)
        .add(x_axis)
        .add(y_axis)
        .add(tissue_caption.set("fill", CAPTION_FILL).set("font-size", 12))
        .add(tf_caption.set("fill", CAPTION_FILL).set("font-size", 12))
        .add(grid)
        .add(cells)
        .add(dots);

    chart::document(size, "heatmap").add(plot)
}
