//! Chart scaffolding shared by the SVG renderers
//!
//! Documents are assembled with the `svg` crate. Attribute values are written
//! as given, so anything that comes from the dataset goes through
//! `format::escape` first; text nodes are escaped by the crate.

use svg::node::element::{Group, Text};
use svg::Document;

use super::Size;
use crate::format::num;

/// Root document sized to `size`, with a matching viewBox
pub fn document(size: Size, class: &str) -> Document {
    Document::new()
        .set(
            "viewBox",
            format!("0 0 {} {}", num(size.width), num(size.height)),
        )
        .set("width", num(size.width))
        .set("height", num(size.height))
        .set("class", class)
}

pub fn translate(x: f64, y: f64) -> String {
    format!("translate({},{})", num(x), num(y))
}

/// `<g>` shifted to (x, y)
pub fn group_at(x: f64, y: f64) -> Group {
    Group::new().set("transform", translate(x, y))
}

/// `<text>` anchored at (x, y)
pub fn label(x: f64, y: f64, content: impl Into<String>) -> Text {
    Text::new(content).set("x", num(x)).set("y", num(y))
}


#[cfg(test)]
mod tests {
    use super::inspect::{marks, texts};
    use super::*;
    use svg::node::element::Circle;

    #[test]
    fn test_document_viewbox() {
        let out = document(Size::new(100.0, 50.5), "legend").to_string();
        let root = &marks(&out)[0];
        assert_eq!(root.name, "svg");
        assert_eq!(root.attr("viewBox"), Some("0 0 100 50.5"));
        assert_eq!(root.attr("width"), Some("100"));
        assert!(root.has_class("legend"));
    }

    #[test]
    fn test_nested_groups_and_labels() {
        let out = document(Size::new(10.0, 10.0), "x")
            .add(
                group_at(10.0, 20.5)
                    .add(Circle::new().set("class", "cell pinned").set("r", num(3.0)))
                    .add(label(1.0, 2.0, "Tissue")),
            )
            .to_string();
        let all = marks(&out);
        let g = all.iter().find(|m| m.name == "g").unwrap();
        assert_eq!(g.attr("transform"), Some("translate(10,20.5)"));
        let circle = all.iter().find(|m| m.name == "circle").unwrap();
        assert!(circle.has_class("pinned"));
        assert_eq!(circle.num("r"), 3.0);
        assert_eq!(texts(&out), vec!["Tissue"]);
    }
}
