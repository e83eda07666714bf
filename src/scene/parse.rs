use std::collections::HashMap;

use crate::scene::frame::{Animate, Circle, Frame, NumericAttr, RepeatMode, RootElement};

/// Parse SVG markup into a [`Frame`].
///
/// This never fails: malformed markup yields a frame whose root is
/// [`RootElement::Unparseable`], which the structural analyzer reports as an error. Element names
/// are matched on their local part, so both `<svg>` and `<svg:svg>` are recognized.
pub fn parse_frame(markup: &str) -> Frame {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = match roxmltree::Document::parse_with_options(markup, opts) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(error = %e, "frame markup is not well-formed");
            return Frame::unparseable(format!("Invalid SVG syntax: {e}"));
        }
    };

    let root = doc.root_element();
    let root_kind = match root.tag_name().name() {
        "svg" => RootElement::Svg,
        other => RootElement::Other(other.to_string()),
    };

    let mut circles = Vec::new();
    let mut circle_index: HashMap<roxmltree::NodeId, usize> = HashMap::new();
    let mut animations = Vec::new();
    let mut background = None;

    for node in root.descendants().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "circle" => {
                circle_index.insert(node.id(), circles.len());
                circles.push(parse_circle(node));
            }
            "animate" => {
                let target = node
                    .ancestors()
                    .skip(1)
                    .find_map(|a| circle_index.get(&a.id()).copied());
                animations.push(parse_animate(node, target));
            }
            "rect" if background.is_none() && node.parent() == Some(root) => {
                background = node
                    .attribute("fill")
                    .filter(|f| !f.trim_start().starts_with("url("))
                    .map(str::to_string);
            }
            _ => {}
        }
    }

    Frame {
        root: root_kind,
        width: NumericAttr::parse_number(root.attribute("width")),
        height: NumericAttr::parse_number(root.attribute("height")),
        background,
        circles,
        animations,
    }
}

/// Parse every markup blob in order.
pub fn parse_frames<S: AsRef<str>>(markups: &[S]) -> Vec<Frame> {
    markups.iter().map(|m| parse_frame(m.as_ref())).collect()
}

fn parse_circle(node: roxmltree::Node<'_, '_>) -> Circle {
    Circle {
        cx: NumericAttr::parse_number(node.attribute("cx")),
        cy: NumericAttr::parse_number(node.attribute("cy")),
        r: NumericAttr::parse_number(node.attribute("r")),
        fill: node.attribute("fill").map(str::to_string),
        opacity: node
            .attribute("opacity")
            .and_then(|o| o.trim().parse::<f64>().ok())
            .filter(|o| o.is_finite()),
    }
}

fn parse_animate(node: roxmltree::Node<'_, '_>, target: Option<usize>) -> Animate {
    Animate {
        target,
        attribute_name: node
            .attribute("attributeName")
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        dur: NumericAttr::parse_clock(node.attribute("dur")),
        values: node
            .attribute("values")
            .map(|v| {
                v.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        repeat: node.attribute("repeatCount").and_then(RepeatMode::parse),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/parse.rs"]
mod tests;
