use crate::{
    foundation::math::mean,
    scene::frame::{Frame, NumericAttr, RootElement},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingProfile {
    pub has_timing: bool,
    pub duration: f64,
    /// Unevenness of the value steps in `0..=1`.
    pub timing_error: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CircleProfile {
    pub has_circle: bool,
    pub alignment_errors: Vec<String>,
    pub attribute_errors: Vec<String>,
}

/// Machine-readable digest the director refines directives from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeedbackSummary {
    pub alignment_errors: Vec<String>,
    pub timing_mismatch: f64,
    pub overall_error: f64,
}

impl FeedbackSummary {
    pub fn has_error(&self, needle: &str) -> bool {
        self.alignment_errors.iter().any(|e| e.contains(needle))
    }
}

pub fn timing_profile(frame: &Frame) -> TimingProfile {
    let no_timing = TimingProfile {
        has_timing: false,
        duration: 0.0,
        timing_error: 1.0,
    };
    if matches!(frame.root, RootElement::Unparseable(_)) {
        return no_timing;
    }
    let Some(animate) = frame.primary_animation() else {
        return no_timing;
    };
    let duration = animate.dur.value().unwrap_or(0.0);
    if animate.values.len() < 2 {
        return TimingProfile {
            has_timing: true,
            duration,
            timing_error: 0.8,
        };
    }
    TimingProfile {
        has_timing: true,
        duration,
        timing_error: step_error(animate.numeric_values()).min(1.0),
    }
}

fn step_error(values: Option<Vec<f64>>) -> f64 {
    let Some(values) = values else {
        return 0.5;
    };
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        return 0.5;
    };
    let expected = (last - first) / (values.len() - 1) as f64;
    let deviations: Vec<f64> = values
        .windows(2)
        .map(|w| (w[1] - w[0] - expected).abs())
        .collect();
    let Some(mean_dev) = mean(&deviations) else {
        return 0.5;
    };
    if expected == 0.0 {
        let constant = values.windows(2).all(|w| w[1] == w[0]);
        return if constant { 0.0 } else { 0.5 };
    }
    mean_dev / expected.abs()
}

pub fn circle_profile(frame: &Frame) -> CircleProfile {
    if matches!(frame.root, RootElement::Unparseable(_)) {
        return CircleProfile {
            has_circle: false,
            alignment_errors: vec!["Invalid SVG syntax".to_string()],
            attribute_errors: Vec::new(),
        };
    }
    let Some(circle) = frame.primary_circle() else {
        return CircleProfile {
            has_circle: false,
            alignment_errors: vec!["No circle element found".to_string()],
            attribute_errors: Vec::new(),
        };
    };

    let mut alignment_errors = Vec::new();
    let mut attribute_errors = Vec::new();
    for (name, attr) in [("cx", &circle.cx), ("cy", &circle.cy), ("r", &circle.r)] {
        match attr {
            NumericAttr::Missing => attribute_errors.push(format!("Missing {name} attribute")),
            NumericAttr::Invalid(_) => attribute_errors.push(format!("Invalid {name} value")),
            NumericAttr::Value(v) if *v < 0.0 => {
                alignment_errors.push(format!("Negative {name} value"));
            }
            NumericAttr::Value(_) => {}
        }
    }

    if circle.r.value().is_some_and(|r| (0.0..1.0).contains(&r)) {
        alignment_errors.push("radius too small".to_string());
    }

    if let (Some(center), Some((w, h))) = (circle.center(), frame.canvas_size()) {
        if (center.x - w / 2.0).abs() > 1.0 || (center.y - h / 2.0).abs() > 1.0 {
            alignment_errors.push("Circle not centered in frame".to_string());
        }
    }

    CircleProfile {
        has_circle: true,
        alignment_errors,
        attribute_errors,
    }
}

pub fn summarize(frames: &[Frame]) -> FeedbackSummary {
    let Some(first) = frames.first() else {
        return FeedbackSummary {
            alignment_errors: vec!["No frames provided".to_string()],
            timing_mismatch: 1.0,
            overall_error: 1.0,
        };
    };

    let circle = circle_profile(first);
    let timing_mismatch = frames
        .iter()
        .map(timing_profile)
        .filter(|t| t.has_timing)
        .map(|t| t.timing_error)
        .reduce(f64::max)
        .unwrap_or(1.0);

    let mut alignment_errors = circle.alignment_errors;
    alignment_errors.extend(circle.attribute_errors);

    let mut overall_error = 0.0;
    if !alignment_errors.is_empty() {
        overall_error += 0.5;
    }
    if timing_mismatch > 0.1 {
        overall_error += 0.5 * timing_mismatch;
    }

    FeedbackSummary {
        alignment_errors,
        timing_mismatch,
        overall_error,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/critic/summary.rs"]
mod tests;
