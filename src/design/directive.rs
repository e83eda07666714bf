use std::collections::BTreeMap;

use crate::foundation::error::{VennError, VennResult};

pub const DEFAULT_GOAL: &str = "Create a smooth circle animation";

/// Instruction handed to the generator.
///
/// Directives are refined copy-on-write: every `with_*` call returns a new value and leaves the
/// receiver untouched, so history entries never change after they are recorded.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Directive {
    pub goal: String,
    pub constraints: BTreeMap<String, f64>, // stable keys
    pub parameters: BTreeMap<String, String>,
}

impl Default for Directive {
    fn default() -> Self {
        let constraints = [
            ("frames", 30.0),
            ("start_radius", 0.0),
            ("end_radius", 100.0),
            ("duration", 1.0), // seconds
            ("width", 400.0),
            ("height", 400.0),
            ("circle_count", 3.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let parameters = [
            ("easing", "ease-in-out"),
            ("color", "#2196F3"),
            ("layout", "concentric"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            goal: DEFAULT_GOAL.to_string(),
            constraints,
            parameters,
        }
    }
}

impl Directive {
    pub fn constraint(&self, key: &str) -> VennResult<f64> {
        let v = self
            .constraints
            .get(key)
            .copied()
            .ok_or_else(|| VennError::validation(format!("directive is missing constraint '{key}'")))?;
        if !v.is_finite() {
            return Err(VennError::validation(format!(
                "directive constraint '{key}' must be finite"
            )));
        }
        Ok(v)
    }

    pub fn parameter(&self, key: &str) -> VennResult<&str> {
        self.parameters
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| VennError::validation(format!("directive is missing parameter '{key}'")))
    }

    pub fn with_constraint(&self, key: &str, value: f64) -> Self {
        let mut next = self.clone();
        next.constraints.insert(key.to_string(), value);
        next
    }

    pub fn with_parameter(&self, key: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.parameters.insert(key.to_string(), value.into());
        next
    }

    pub fn without_parameter(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.parameters.remove(key);
        next
    }

    /// Keys whose values differ from `previous` (constraints and parameters, sorted).
    pub fn changed_keys(&self, previous: &Directive) -> Vec<String> {
        let mut keys: Vec<String> = self
            .constraints
            .iter()
            .filter(|(k, v)| previous.constraints.get(*k) != Some(*v))
            .map(|(k, _)| k.clone())
            .chain(
                self.parameters
                    .iter()
                    .filter(|(k, v)| previous.parameters.get(*k) != Some(*v))
                    .map(|(k, _)| k.clone()),
            )
            .chain(
                previous
                    .parameters
                    .keys()
                    .filter(|k| !self.parameters.contains_key(*k))
                    .cloned(),
            )
            .collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
#[path = "../../tests/unit/design/directive.rs"]
mod tests;
