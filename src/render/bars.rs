//! Stacked bar chart for one TF across all tissues

use svg::node::element::{Group, Rectangle};
use svg::Document;

use super::axis::{self, AxisStyle, Orient, Rotate};
use super::{chart, tooltip, Margin, Size};
use crate::color;
use crate::format::{self, escape, num};
use crate::scale::{BandScale, LinearScale};
use crate::view::{BarSeries, View};

pub const MARGIN: Margin = Margin {
    top: 24.0,
    right: 20.0,
    bottom: 48.0,
    left: 70.0,
};

/// Evidence classes in stacking order (bottom to top)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Plus,
    Minus,
    Unknown,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Plus, Segment::Minus, Segment::Unknown];

    pub fn key(self) -> &'static str {
        match self {
            Segment::Plus => "plus",
            Segment::Minus => "minus",
            Segment::Unknown => "unknown",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Segment::Plus => "+",
            Segment::Minus => "\u{2212}",
            Segment::Unknown => "?",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Segment::Plus => color::PLUS,
            Segment::Minus => color::MINUS,
            Segment::Unknown => color::UNKNOWN,
        }
    }

    pub fn value(self, series: &BarSeries) -> u64 {
        match self {
            Segment::Plus => series.plus,
            Segment::Minus => series.minus,
            Segment::Unknown => series.unknown,
        }
    }
}

/// `(v0, v1)` extent of each segment in a series, stacked from zero
pub fn stack(series: &BarSeries) -> [(Segment, u64, u64); 3] {
    let mut base: u64 = 0;
    Segment::ALL.map(|seg| {
        let top = base.saturating_add(seg.value(series));
        let extent = (seg, base, top);
        base = top;
        extent
    })
}

pub fn render(view: &View, tf: &str, size: Size) -> String {
    bar_chart(view, tf, size).to_string()
}

pub fn bar_chart(view: &View, tf: &str, size: Size) -> Document {
    let series = view.bar_series(tf);
    let inner = MARGIN.inner(size);

    let x = BandScale::padded(&view.tissues, (0.0, inner.width), 0.22);
    let y = LinearScale::from_zero(view.bar_max(tf) as f64, (inner.height, 0.0)).nice(10);

    let x_axis = chart::group_at(0.0, inner.height).add(axis::band(
        &x,
        Orient::Bottom,
        inner.width,
        AxisStyle {
            rotate: Some(Rotate {
                degrees: -25.0,
                anchor: "end",
                dx: "-0.4em",
                dy: "0.15em",
            }),
            ..AxisStyle::default()
        },
        str::to_string,
    ));
    let y_axis = axis::linear(&y, Orient::Left, inner.height, 5, format::tick);

    let mut segments: [Vec<Rectangle>; 3] = Default::default();
    let mut outlines = Group::new().set("class", "imputed-outlines");
    let mut labels = Group::new().set("class", "totals");

    for s in &series {
        let Some(bx) = x.position(&s.tissue) else {
            continue;
        };
        let tip = escape(&tooltip::bar(tf, s));
        let opacity = if s.total == 0 { 0.25 } else { 0.95 };

        for (rects, (seg, v0, v1)) in segments.iter_mut().zip(stack(s)) {
            let y0 = y.apply(v0 as f64);
            let y1 = y.apply(v1 as f64);
            let mut rect = Rectangle::new()
                .set("data-tissue", escape(&s.tissue))
                .set("data-segment", seg.key())
                .set("data-tip", tip.as_str())
                .set("x", num(bx))
                .set("y", num(y1))
                .set("width", num(x.bandwidth()))
                .set("height", num(y0 - y1))
                .set("opacity", opacity)
                .set("stroke", if s.imputed { "rgba(255,255,255,.55)" } else { "none" });
            if s.imputed {
                rect = rect.set("stroke-dasharray", "3,2");
            }
            rects.push(rect);
        }

        if s.imputed {
            // zero-height segments leave nothing to stroke; mark the slot itself
            let baseline = y.apply(0.0);
            outlines = outlines.add(
                Rectangle::new()
                    .set("class", "imputed-outline")
                    .set("data-tip", tip.as_str())
                    .set("x", num(bx))
                    .set("y", num(baseline - 4.0))
                    .set("width", num(x.bandwidth()))
                    .set("height", 4)
                    .set("fill", "none")
                    .set("stroke", "rgba(255,255,255,.55)")
                    .set("stroke-dasharray", "3,2"),
            );
        }

        labels = labels.add(
            chart::label(bx + x.bandwidth() / 2.0, y.apply(s.total as f64) - 6.0, format::count(s.total))
                .set("text-anchor", "middle")
                .set("fill", "rgba(255,255,255,.75)")
                .set("font-size", 11),
        );
    }

    let mut plot = chart::group_at(MARGIN.left, MARGIN.top)
        .add(x_axis)
        .add(y_axis)
        .add(
            chart::label(-MARGIN.left + 2.0, -8.0, "Count (records)")
                .set("fill", "rgba(255,255,255,.65)")
                .set("font-size", 12),
        );
    for (seg, rects) in Segment::ALL.iter().zip(segments) {
        let layer = Group::new()
            .set("class", format!("segment {}", seg.key()))
            .set("fill", seg.color());
        plot = plot.add(rects.into_iter().fold(layer, |g, r| g.add(r)));
    }
    let plot = plot.add(outlines).add(labels);

    let mut legend = chart::group_at(size.width - 200.0, 18.0);
    for (i, seg) in Segment::ALL.iter().enumerate() {
        legend = legend.add(
            chart::group_at(i as f64 * 60.0, 0.0)
                .add(
                    Rectangle::new()
                        .set("x", 0)
                        .set("y", -10)
                        .set("width", 14)
                        .set("height", 14)
                        .set("rx", 4)
                        .set("fill", seg.color()),
                )
                .add(
                    chart::label(18.0, 2.0, seg.symbol())
                        .set("fill", "rgba(255,255,255,.75)")
                        .set("font-size", 11),
                ),
        );
    }

    chart::document(size, "bars")
        .set("data-tf", escape(tf))
        .add(plot)
        .add(
            chart::label(MARGIN.left, 18.0, format!("TF = {} (stacked counts by direction)", tf))
                .set("fill", "rgba(255,255,255,.85)")
                .set("font-size", 13)
                .set("font-weight", 700),
        )
        .add(legend)
}
