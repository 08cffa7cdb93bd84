//! Detail panel: status line, text summary and the mini three-bar chart

use serde::Serialize;
use svg::node::element::Rectangle;
use svg::Document;

use super::axis::{self, AxisStyle, Orient};
use super::bars::Segment;
use super::{chart, Margin, Size};
use crate::color;
use crate::dataset::{CellRecord, Direction};
use crate::explorer::state::Phase;
use crate::format::{self, escape, num};
use crate::scale::{BandScale, LinearScale};

const MINI_MARGIN: Margin = Margin {
    top: 10.0,
    right: 10.0,
    bottom: 22.0,
    left: 34.0,
};

pub const EMPTY_TEXT: &str = "No selection yet.";

/// Everything the detail area shows for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub status: String,
    /// Summary lines as an HTML fragment
    pub html: String,
    pub mini_svg: String,
}

impl DetailPanel {
    pub fn build(record: Option<&CellRecord>, phase: Phase, mini: Size) -> Self {
        // a missing record always reads as no selection, whatever the phase
        let status = match record {
            Some(_) => phase.status(),
            None => Phase::NoSelection.status(),
        };
        Self {
            status: status.to_string(),
            html: record.map(summary_html).unwrap_or_else(|| EMPTY_TEXT.to_string()),
            mini_svg: mini_chart(record, mini).to_string(),
        }
    }
}

/// Plain-text summary lines, shared with the terminal UI
pub fn summary_lines(r: &CellRecord) -> Vec<(&'static str, String)> {
    let direction = match r.direction() {
        Direction::Enriched => "more + (enriched)",
        Direction::Depleted => "more \u{2212} (depleted)",
        Direction::Balanced => "balanced",
    };
    vec![
        ("Tissue:", r.tissue.clone()),
        ("TF:", r.tf.clone()),
        (
            "Counts (records):",
            format!(
                "+ {} / \u{2212} {} / unknown {}",
                format::count(r.plus),
                format::count(r.minus),
                format::count(r.unknown)
            ),
        ),
        ("Total (records):", format::count(r.total)),
        (
            "Signed proportion:",
            format!("{} ({})", format::score(r.score), direction),
        ),
        (
            "Imputed?",
            if r.imputed { "Yes (structural zero)" } else { "No" }.to_string(),
        ),
    ]
}

fn summary_html(r: &CellRecord) -> String {
    summary_lines(r)
        .into_iter()
        .map(|(label, value)| format!("<b>{}</b> {}", label, escape(&value)))
        .collect::<Vec<_>>()
        .join("<br/>")
}

pub fn mini_chart(record: Option<&CellRecord>, size: Size) -> Document {
    let inner = MINI_MARGIN.inner(size);
    let keys: Vec<String> = Segment::ALL.iter().map(|s| s.key().to_string()).collect();
    let values = Segment::ALL.map(|seg| match record {
        Some(r) => match seg {
            Segment::Plus => r.plus,
            Segment::Minus => r.minus,
            Segment::Unknown => r.unknown,
        },
        None => 0,
    });

    let x = BandScale::padded(&keys, (0.0, inner.width), 0.28);
    let max = values.iter().copied().max().unwrap_or(0);
    let y = LinearScale::from_zero(max as f64, (inner.height, 0.0)).nice(10);

    let symbol = |key: &str| {
        Segment::ALL
            .iter()
            .find(|s| s.key() == key)
            .map_or("?", |s| s.symbol())
            .to_string()
    };
    let x_axis = chart::group_at(0.0, inner.height).add(axis::band(
        &x,
        Orient::Bottom,
        inner.width,
        AxisStyle::default(),
        symbol,
    ));
    let y_axis = axis::linear(&y, Orient::Left, inner.height, 4, format::tick);

    let mut plot = chart::group_at(MINI_MARGIN.left, MINI_MARGIN.top)
        .add(x_axis)
        .add(y_axis)
        .add(
            chart::label(-MINI_MARGIN.left, -2.0, "Count (records)")
                .set("fill", "rgba(255,255,255,.65)")
                .set("font-size", 11),
        );

    let opacity = if record.is_some() { 0.95 } else { 0.25 };
    for (seg, v) in Segment::ALL.iter().zip(values) {
        let Some(bx) = x.position(seg.key()) else {
            continue;
        };
        let top = y.apply(v as f64);
        plot = plot.add(
            Rectangle::new()
                .set("data-segment", seg.key())
                .set("x", num(bx))
                .set("y", num(top))
                .set("width", num(x.bandwidth()))
                .set("height", num(inner.height - top))
                .set("rx", 6)
                .set("fill", seg.color())
                .set("opacity", opacity),
        );
    }

    if record.is_some_and(|r| r.imputed) {
        plot = plot.add(
            chart::label(inner.width, 10.0, "imputed structural zero")
                .set("class", "imputed-badge")
                .set("text-anchor", "end")
                .set("fill", color::IMPUTED_ACCENT)
                .set("font-size", 11),
        );
    }

    chart::document(size, "mini").add(plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::chart::inspect::{named, texts, Mark};

    const MINI: Size = Size::new(260.0, 150.0);

    fn mini_rects(markup: &str) -> Vec<Mark> {
        named(markup, "rect")
    }

    #[test]
    fn test_empty_panel() {
        let panel = DetailPanel::build(None, Phase::NoSelection, MINI);
        assert_eq!(panel.status, "Hover a cell, or click to pin");
        assert_eq!(panel.html, "No selection yet.");

        let rects = mini_rects(&panel.mini_svg);
        assert_eq!(rects.len(), 3);
        assert!(rects.iter().all(|r| r.num("opacity") == 0.25));
    }

    #[test]
    fn test_hovered_summary() {
        let r = CellRecord::from_counts("Liver", "CTCF", 3, 1, 0);
        let panel = DetailPanel::build(Some(&r), Phase::Hovering, MINI);
        assert_eq!(panel.status, "Hovering (click to pin)");
        assert!(panel.html.contains("<b>Tissue:</b> Liver"));
        assert!(panel.html.contains("<b>Counts (records):</b> + 3 / \u{2212} 1 / unknown 0"));
        assert!(panel.html.contains("<b>Total (records):</b> 4"));
        assert!(panel.html.contains("0.50 (more + (enriched))"));
        assert!(panel.html.contains("<b>Imputed?</b> No"));
        assert!(!texts(&panel.mini_svg).iter().any(|t| t == "imputed structural zero"));
    }

    #[test]
    fn test_pinned_status() {
        let r = CellRecord::from_counts("Brain", "SP1", 1, 5, 0);
        let panel = DetailPanel::build(Some(&r), Phase::Pinned, MINI);
        assert_eq!(panel.status, "Pinned selection (click a different cell to change)");
        assert!(panel.html.contains("(more \u{2212} (depleted))"));
    }

    #[test]
    fn test_imputed_badge() {
        let r = CellRecord::imputed_zero("Brain", "YY1");
        let panel = DetailPanel::build(Some(&r), Phase::Hovering, MINI);
        assert!(panel.html.contains("Yes (structural zero)"));
        assert!(panel.html.contains("0.00 (balanced)"));
        let badge = named(&panel.mini_svg, "text")
            .into_iter()
            .find(|t| t.has_class("imputed-badge"))
            .expect("badge drawn");
        assert_eq!(badge.attr("fill"), Some(color::IMPUTED_ACCENT));
        assert!(texts(&panel.mini_svg).iter().any(|t| t == "imputed structural zero"));
    }

    #[test]
    fn test_mini_bars_proportional() {
        let r = CellRecord::from_counts("Liver", "CTCF", 30, 10, 5);
        let out = mini_chart(Some(&r), MINI).to_string();
        let heights: Vec<f64> = mini_rects(&out).iter().map(|t| t.num("height")).collect();
        assert!(heights[0] > heights[1] && heights[1] > heights[2]);
        assert!((heights[0] / heights[1] - 3.0).abs() < 0.05);
    }

    #[test]
    fn test_names_escaped_in_summary() {
        let r = CellRecord::from_counts("A&B", "TF", 1, 0, 0);
        let panel = DetailPanel::build(Some(&r), Phase::Hovering, MINI);
        assert!(panel.html.contains("A&amp;B"));
    }
}
