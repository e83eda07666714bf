use crate::foundation::core::{Point, Rgb8};

/// A numeric attribute as found in markup.
///
/// Analyzers never fail on bad numbers: `Missing` and `Invalid` degrade into zero sub-scores
/// with an error string.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum NumericAttr {
    Missing,
    Invalid(String),
    Value(f64),
}

impl NumericAttr {
    /// Parse a plain SVG number, allowing a trailing `px`.
    pub fn parse_number(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Missing;
        };
        let trimmed = raw.trim();
        let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        match digits.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Value(v),
            _ => Self::Invalid(raw.to_string()),
        }
    }

    /// Parse an SMIL clock value (`"1s"`, `"250ms"`, `"0.5min"`, `"2"`) into seconds.
    pub fn parse_clock(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Missing;
        };
        let s = raw.trim();
        // (multiplier, divisor) keeps `250ms` exact.
        let (digits, mul, div) = if let Some(d) = s.strip_suffix("ms") {
            (d, 1.0, 1000.0)
        } else if let Some(d) = s.strip_suffix("min") {
            (d, 60.0, 1.0)
        } else if let Some(d) = s.strip_suffix('h') {
            (d, 3600.0, 1.0)
        } else if let Some(d) = s.strip_suffix('s') {
            (d, 1.0, 1.0)
        } else {
            (s, 1.0, 1.0)
        };
        match digits.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Value(v * mul / div),
            _ => Self::Invalid(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Missing | Self::Invalid(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for NumericAttr {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

/// What the document's root element turned out to be.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RootElement {
    Svg,
    Other(String),
    /// The markup was not well-formed; carries the parser message.
    Unparseable(String),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RepeatMode {
    Count(f64),
    Indefinite,
}

impl RepeatMode {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == "indefinite" {
            return Some(Self::Indefinite);
        }
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(Self::Count)
    }

    pub fn as_attr(self) -> String {
        match self {
            Self::Count(n) => format!("{n}"),
            Self::Indefinite => "indefinite".to_string(),
        }
    }
}

/// One `<animate>` element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Animate {
    /// Index into [`Frame::circles`] of the circle this element animates, if nested in one.
    pub target: Option<usize>,
    pub attribute_name: Option<String>,
    /// Duration in seconds.
    pub dur: NumericAttr,
    pub values: Vec<String>,
    pub repeat: Option<RepeatMode>,
}

impl Animate {
    pub fn new<I, V>(attribute_name: &str, dur_secs: f64, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        Self {
            target: None,
            attribute_name: Some(attribute_name.to_string()),
            dur: NumericAttr::Value(dur_secs),
            values: values.into_iter().map(|v| v.to_string()).collect(),
            repeat: None,
        }
    }

    pub fn with_repeat(mut self, repeat: RepeatMode) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn with_dur(mut self, dur: NumericAttr) -> Self {
        self.dur = dur;
        self
    }

    /// Values parsed as numbers; `None` if any entry is not numeric.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        self.values
            .iter()
            .map(|v| v.trim().parse::<f64>().ok().filter(|x| x.is_finite()))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    pub cx: NumericAttr,
    pub cy: NumericAttr,
    pub r: NumericAttr,
    pub fill: Option<String>,
    pub opacity: Option<f64>,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self {
            cx: cx.into(),
            cy: cy.into(),
            r: r.into(),
            fill: None,
            opacity: None,
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn center(&self) -> Option<Point> {
        Some(Point::new(self.cx.value()?, self.cy.value()?))
    }

    /// Solid fill color, if the fill is a hex color. `None` for gradients, `none`, or missing.
    pub fn fill_rgb(&self) -> Option<Rgb8> {
        self.fill.as_deref().and_then(|f| Rgb8::parse_hex(f).ok())
    }
}

/// One snapshot of the animated figure.
///
/// Produced by the generator (or by [`crate::scene::parse::parse_frame`]) and consumed read-only
/// by every analyzer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub root: RootElement,
    pub width: NumericAttr,
    pub height: NumericAttr,
    pub background: Option<String>,
    pub circles: Vec<Circle>,
    /// All animation elements in document order.
    pub animations: Vec<Animate>,
}

/// Frames in temporal order.
pub type FrameSequence = Vec<Frame>;

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            root: RootElement::Svg,
            width: width.into(),
            height: height.into(),
            background: None,
            circles: Vec::new(),
            animations: Vec::new(),
        }
    }

    /// A frame whose markup could not be parsed at all.
    pub fn unparseable(message: impl Into<String>) -> Self {
        Self {
            root: RootElement::Unparseable(message.into()),
            width: NumericAttr::Missing,
            height: NumericAttr::Missing,
            background: None,
            circles: Vec::new(),
            animations: Vec::new(),
        }
    }

    pub fn with_background(mut self, fill: impl Into<String>) -> Self {
        self.background = Some(fill.into());
        self
    }

    pub fn with_circle(mut self, circle: Circle) -> Self {
        self.circles.push(circle);
        self
    }

    /// Attach `animate` to the most recently added circle.
    pub fn with_animation(mut self, mut animate: Animate) -> Self {
        animate.target = self.circles.len().checked_sub(1);
        self.animations.push(animate);
        self
    }

    pub fn primary_circle(&self) -> Option<&Circle> {
        self.circles.first()
    }

    pub fn primary_animation(&self) -> Option<&Animate> {
        self.animations.first()
    }

    /// Duration of the first animation element, `Missing` when there is none.
    pub fn duration(&self) -> NumericAttr {
        self.primary_animation()
            .map(|a| a.dur.clone())
            .unwrap_or(NumericAttr::Missing)
    }

    /// Declared canvas size, when both sides are positive numbers.
    pub fn canvas_size(&self) -> Option<(f64, f64)> {
        let w = self.width.value().filter(|w| *w > 0.0)?;
        let h = self.height.value().filter(|h| *h > 0.0)?;
        Some((w, h))
    }

    pub fn centers(&self) -> Vec<Point> {
        self.circles.iter().filter_map(Circle::center).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/frame.rs"]
mod tests;
