//! Axis primitives: domain line, tick marks and tick labels

use svg::node::element::{Group, Line, Path, Text};

use super::chart;
use crate::format::num;
use crate::scale::{BandScale, LinearScale};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Top,
    Bottom,
    Left,
}

/// Rotation applied to tick labels that would otherwise collide
#[derive(Debug, Clone, Copy)]
pub struct Rotate {
    pub degrees: f64,
    pub anchor: &'static str,
    pub dx: &'static str,
    pub dy: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct AxisStyle {
    pub tick_size: f64,
    pub tick_padding: f64,
    pub rotate: Option<Rotate>,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            tick_size: 6.0,
            tick_padding: 3.0,
            rotate: None,
        }
    }
}

fn axis_group(orient: Orient) -> Group {
    let anchor = match orient {
        Orient::Left => "end",
        _ => "middle",
    };
    Group::new()
        .set("class", "axis")
        .set("fill", "none")
        .set("font-size", 10)
        .set("text-anchor", anchor)
}

fn domain_path(orient: Orient, length: f64) -> Path {
    let d = match orient {
        Orient::Left => format!("M0,0V{}", num(length)),
        _ => format!("M0,0H{}", num(length)),
    };
    Path::new().set("class", "domain").set("d", d)
}

/// One tick: mark plus label, positioned at `pos` along the axis
fn tick(orient: Orient, pos: f64, label: String, style: &AxisStyle) -> Group {
    let offset = style.tick_size.max(0.0) + style.tick_padding;
    let text = Text::new(label);
    let (transform, line, text, dy) = match orient {
        Orient::Top => (
            chart::translate(pos, 0.0),
            Line::new().set("y2", num(-style.tick_size)),
            text.set("y", num(-offset)),
            "0em",
        ),
        Orient::Bottom => (
            chart::translate(pos, 0.0),
            Line::new().set("y2", num(style.tick_size)),
            text.set("y", num(offset)),
            "0.71em",
        ),
        Orient::Left => (
            chart::translate(0.0, pos),
            Line::new().set("x2", num(-style.tick_size)),
            text.set("x", num(-offset)),
            "0.32em",
        ),
    };

    let text = match style.rotate {
        Some(r) => text
            .set("transform", format!("rotate({})", num(r.degrees)))
            .set("text-anchor", r.anchor)
            .set("dx", r.dx)
            .set("dy", r.dy),
        None => text.set("dy", dy),
    };

    Group::new()
        .set("class", "tick")
        .set("transform", transform)
        .add(line.set("stroke", "currentColor"))
        .add(text.set("fill", "currentColor"))
}

/// Axis for an ordinal band scale; ticks sit at band centers
pub fn band(scale: &BandScale, orient: Orient, length: f64, style: AxisStyle, label: impl Fn(&str) -> String) -> Group {
    let mut axis = axis_group(orient).add(domain_path(orient, length));
    for key in scale.domain() {
        if let Some(center) = scale.center(key) {
            axis = axis.add(tick(orient, center, label(key), &style));
        }
    }
    axis
}

/// Axis for a linear scale with roughly `count` round ticks
pub fn linear(scale: &LinearScale, orient: Orient, length: f64, count: usize, label: impl Fn(f64) -> String) -> Group {
    let style = AxisStyle::default();
    let mut axis = axis_group(orient).add(domain_path(orient, length));
    for v in scale.ticks(count) {
        axis = axis.add(tick(orient, scale.apply(v), label(v), &style));
    }
    axis
}
