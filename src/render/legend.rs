//! Color legend for the signed-proportion scale

use svg::node::element::{Definitions, LinearGradient, Rectangle, Stop};
use svg::Document;

use super::axis::{self, Orient};
use super::{chart, Size};
use crate::color;
use crate::format::{self, num};
use crate::scale::LinearScale;

const WIDTH: f64 = 280.0;
const HEIGHT: f64 = 52.0;
const BAR_HEIGHT: f64 = 16.0;
const PAD: f64 = 10.0;
const TOP: f64 = 10.0;

pub fn render() -> String {
    legend().to_string()
}

pub fn legend() -> Document {
    let mut gradient = LinearGradient::new()
        .set("id", "signed-gradient")
        .set("x1", "0%")
        .set("x2", "100%")
        .set("y1", "0%")
        .set("y2", "0%");
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        gradient = gradient.add(
            Stop::new()
                .set("offset", format!("{}%", num(t * 100.0)))
                .set("stop-color", color::signed_color(t * 2.0 - 1.0).hex()),
        );
    }

    let bar = Rectangle::new()
        .set("x", num(PAD))
        .set("y", num(TOP))
        .set("width", num(WIDTH - PAD * 2.0))
        .set("height", num(BAR_HEIGHT))
        .set("rx", 6)
        .set("fill", "url(#signed-gradient)")
        .set("stroke", "rgba(255,255,255,.25)");

    let scale = LinearScale::new((-1.0, 1.0), (PAD, WIDTH - PAD));
    let ticks = chart::group_at(0.0, TOP + BAR_HEIGHT).add(axis::linear(
        &scale,
        Orient::Bottom,
        WIDTH - PAD,
        4,
        |v| format::signed(v, 1),
    ));

    chart::document(Size::new(WIDTH, HEIGHT), "legend")
        .add(Definitions::new().add(gradient))
        .add(bar)
        .add(ticks)
        .add(
            chart::label(PAD, TOP - 1.0, "signed proportion (unitless)")
                .set("fill", "rgba(255,255,255,.65)")
                .set("font-size", 11),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::chart::inspect::{named, texts};

    #[test]
    fn test_gradient_runs_cool_to_warm() {
        let out = render();
        let stops = named(&out, "stop");
        assert_eq!(stops.len(), 11);
        assert_eq!(stops[0].attr("stop-color"), Some(color::signed_color(-1.0).hex().as_str()));
        assert_eq!(stops[10].attr("stop-color"), Some(color::signed_color(1.0).hex().as_str()));
        assert_eq!(stops[10].attr("offset"), Some("100%"));
        assert_eq!(named(&out, "linearGradient")[0].attr("id"), Some("signed-gradient"));
    }

    #[test]
    fn test_tick_labels() {
        let labels = texts(&render());
        for label in ["\u{2212}1.0", "\u{2212}0.5", "+0.0", "+0.5", "+1.0"] {
            assert!(labels.iter().any(|l| l == label), "missing {}", label);
        }
        assert!(labels.iter().any(|l| l == "signed proportion (unitless)"));
    }
}
