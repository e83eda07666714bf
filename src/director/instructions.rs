use crate::critic::result::AnalysisResult;

const URGENT_WORDS: [&str; 3] = ["critical", "significant", "important"];
const CONSTRAINT_WORDS: [&str; 4] = ["constraint", "constraints", "limit", "limits"];

/// Prioritized guidance for the next generation step.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Instructions {
    pub priority: Vec<String>,
    pub secondary: Vec<String>,
    pub constraints: Vec<String>,
}

impl Instructions {
    /// Sort metrics, suggestions and feedback of `result` into buckets.
    ///
    /// A metric below `critical` is a priority, below `moderate` secondary. Suggestions using an
    /// urgency word are priorities. Feedback mentioning a constraint or limit is kept as a
    /// constraint.
    pub fn from_result(result: &AnalysisResult, critical: f64, moderate: f64) -> Self {
        let mut out = Self::default();

        for (name, value) in result.metrics() {
            if name == "score" {
                continue;
            }
            let line = format!("Improve {name} (currently {value:.2})");
            if value < critical {
                out.priority.push(line);
            } else if value < moderate {
                out.secondary.push(line);
            }
        }

        for s in &result.suggestions {
            let lower = s.to_lowercase();
            if URGENT_WORDS.iter().any(|w| lower.contains(w)) {
                out.priority.push(s.clone());
            } else {
                out.secondary.push(s.clone());
            }
        }

        out.constraints.extend(
            result
                .feedback
                .iter()
                .filter(|f| mentions_constraint(f))
                .cloned(),
        );
        out
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.secondary.is_empty() && self.constraints.is_empty()
    }
}

/// Whole-word match, so "Limited color variety" is not a constraint.
fn mentions_constraint(text: &str) -> bool {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| CONSTRAINT_WORDS.contains(&word))
}

#[cfg(test)]
#[path = "../../tests/unit/director/instructions.rs"]
mod tests;
