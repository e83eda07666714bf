use std::fmt::Write as _;

use crate::scene::frame::{Animate, Frame, NumericAttr, RootElement};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

impl Frame {
    /// Serialize to SVG markup. Unparseable frames serialize to an empty string.
    ///
    /// `parse_frame(&frame.to_svg())` reproduces `frame` for any frame with an `svg` root.
    pub fn to_svg(&self) -> String {
        let tag = match &self.root {
            RootElement::Svg => "svg".to_string(),
            RootElement::Other(name) => sanitize_tag(name),
            RootElement::Unparseable(_) => return String::new(),
        };

        let mut out = String::new();
        let _ = write!(out, "<{tag} xmlns=\"{SVG_NS}\"");
        push_numeric(&mut out, "width", &self.width);
        push_numeric(&mut out, "height", &self.height);
        out.push_str(">\n");

        if let Some(bg) = &self.background {
            let _ = writeln!(
                out,
                "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
                escape_attr(bg)
            );
        }

        for (i, circle) in self.circles.iter().enumerate() {
            out.push_str("  <circle");
            push_numeric(&mut out, "cx", &circle.cx);
            push_numeric(&mut out, "cy", &circle.cy);
            push_numeric(&mut out, "r", &circle.r);
            if let Some(fill) = &circle.fill {
                let _ = write!(out, " fill=\"{}\"", escape_attr(fill));
            }
            if let Some(opacity) = circle.opacity {
                let _ = write!(out, " opacity=\"{opacity}\"");
            }

            let nested: Vec<&Animate> = self
                .animations
                .iter()
                .filter(|a| a.target == Some(i))
                .collect();
            if nested.is_empty() {
                out.push_str("/>\n");
                continue;
            }
            out.push_str(">\n");
            for a in nested {
                push_animate(&mut out, a, "    ");
            }
            out.push_str("  </circle>\n");
        }

        for a in self.animations.iter().filter(|a| a.target.is_none()) {
            push_animate(&mut out, a, "  ");
        }

        let _ = writeln!(out, "</{tag}>");
        out
    }
}

fn push_animate(out: &mut String, a: &Animate, indent: &str) {
    let _ = write!(out, "{indent}<animate");
    if let Some(name) = &a.attribute_name {
        let _ = write!(out, " attributeName=\"{}\"", escape_attr(name));
    }
    match &a.dur {
        NumericAttr::Value(v) => {
            let _ = write!(out, " dur=\"{v}s\"");
        }
        NumericAttr::Invalid(raw) => {
            let _ = write!(out, " dur=\"{}\"", escape_attr(raw));
        }
        NumericAttr::Missing => {}
    }
    if !a.values.is_empty() {
        let _ = write!(out, " values=\"{}\"", escape_attr(&a.values.join(";")));
    }
    if let Some(repeat) = a.repeat {
        let _ = write!(out, " repeatCount=\"{}\"", repeat.as_attr());
    }
    out.push_str(" fill=\"freeze\"/>\n");
}

fn push_numeric(out: &mut String, name: &str, attr: &NumericAttr) {
    match attr {
        NumericAttr::Value(v) => {
            let _ = write!(out, " {name}=\"{v}\"");
        }
        NumericAttr::Invalid(raw) => {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(raw));
        }
        NumericAttr::Missing => {}
    }
}

fn sanitize_tag(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    if cleaned.is_empty() || cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        "invalid".to_string()
    } else {
        cleaned
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
