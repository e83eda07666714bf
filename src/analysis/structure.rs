use crate::scene::frame::{Animate, Circle, Frame, NumericAttr, RootElement};

/// Outcome of structural validation for one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StructureReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Pass/fail checks on a single frame.
///
/// All checks run; errors are collected in check order rather than stopping at the first one.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralAnalyzer;

impl StructuralAnalyzer {
    pub fn validate(&self, frame: &Frame, require_animation: bool) -> StructureReport {
        let mut errors = Vec::new();

        match &frame.root {
            RootElement::Svg => {}
            RootElement::Other(name) => {
                errors.push(format!("Root element must be svg, found {name}"));
            }
            RootElement::Unparseable(msg) => errors.push(msg.clone()),
        }

        check_number(&frame.width, "width", "", &mut errors);
        check_number(&frame.height, "height", "", &mut errors);

        check_circles(&frame.circles, &mut errors);

        if require_animation {
            check_animations(&frame.animations, &mut errors);
        }

        StructureReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

fn check_number(attr: &NumericAttr, name: &str, scope: &str, errors: &mut Vec<String>) {
    match attr {
        NumericAttr::Value(_) => {}
        NumericAttr::Missing => errors.push(format!("{scope}Missing {name} attribute")),
        NumericAttr::Invalid(raw) => errors.push(format!("{scope}Invalid {name} value: {raw}")),
    }
}

fn circle_is_numeric(c: &Circle) -> bool {
    c.cx.value().is_some() && c.cy.value().is_some() && c.r.value().is_some()
}

fn check_circles(circles: &[Circle], errors: &mut Vec<String>) {
    let Some(first) = circles.first() else {
        errors.push("No circle elements found".to_string());
        return;
    };
    if circles.iter().any(circle_is_numeric) {
        return;
    }
    check_number(&first.cx, "cx", "Circle: ", errors);
    check_number(&first.cy, "cy", "Circle: ", errors);
    check_number(&first.r, "r", "Circle: ", errors);
}

fn animation_problems(a: &Animate) -> Vec<String> {
    let mut problems = Vec::new();
    if a.attribute_name.as_deref().is_none_or(|n| n.trim().is_empty()) {
        problems.push("Animation: Missing attributeName attribute".to_string());
    }
    match &a.dur {
        NumericAttr::Value(d) if *d > 0.0 => {}
        NumericAttr::Value(d) => problems.push(format!("Animation: Invalid duration: {d}s")),
        other => check_number(other, "dur", "Animation: ", &mut problems),
    }
    if a.values.len() < 2 {
        problems.push("Animation: values must contain at least 2 entries".to_string());
    }
    problems
}

fn check_animations(animations: &[Animate], errors: &mut Vec<String>) {
    let Some(first) = animations.first() else {
        errors.push("No animation elements found".to_string());
        return;
    };
    if animations.iter().any(|a| animation_problems(a).is_empty()) {
        return;
    }
    errors.extend(animation_problems(first));
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/structure.rs"]
mod tests;
