use crate::{
    agent::{Agent, AgentLog},
    critic::summary::FeedbackSummary,
    design::directive::Directive,
    director::instructions::Instructions,
    foundation::error::{VennError, VennResult},
};

pub const DIRECTOR_ID: &str = "director";

const RADIUS_STEP: f64 = 5.0;

/// Directive parameters carrying the latest instructions, joined with `"; "`.
pub const PRIORITY_KEY: &str = "priority";
pub const SECONDARY_KEY: &str = "secondary";
pub const CONSTRAINTS_KEY: &str = "constraints";

#[derive(Clone, Debug, PartialEq)]
pub enum DirectorInput {
    Initial,
    Feedback {
        summary: FeedbackSummary,
        instructions: Instructions,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectorEntry {
    InitialPrompt {
        directive: Directive,
    },
    RefinedPrompt {
        directive: Directive,
        feedback: FeedbackSummary,
        #[serde(default)]
        instructions: Instructions,
    },
    Restored {
        directive: Directive,
    },
}

impl DirectorEntry {
    pub fn directive(&self) -> &Directive {
        match self {
            Self::InitialPrompt { directive }
            | Self::RefinedPrompt { directive, .. }
            | Self::Restored { directive } => directive,
        }
    }
}

/// Issues directives and refines them from critic feedback.
#[derive(Debug, Default)]
pub struct DirectorAgent {
    defaults: Directive,
    log: AgentLog<DirectorEntry>,
}

impl DirectorAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: Directive) -> Self {
        Self {
            defaults,
            log: AgentLog::default(),
        }
    }

    pub fn log(&self) -> &AgentLog<DirectorEntry> {
        &self.log
    }

    /// The most recently issued directive.
    pub fn current(&self) -> Option<&Directive> {
        self.log.last().map(DirectorEntry::directive)
    }

    pub fn initial_directive(&mut self) -> Directive {
        let directive = self.defaults.clone();
        self.log.push(DirectorEntry::InitialPrompt {
            directive: directive.clone(),
        });
        directive
    }

    /// Copy the current directive, adjust it for `feedback` and attach `instructions`.
    ///
    /// Instruction buckets replace those of the previous directive; an empty bucket removes its
    /// parameter.
    pub fn refine(
        &mut self,
        feedback: &FeedbackSummary,
        instructions: &Instructions,
    ) -> VennResult<Directive> {
        validate_feedback(feedback)?;
        let last = match self.current() {
            Some(d) => d.clone(),
            None => self.initial_directive(),
        };

        let mut next = last.clone();
        for _ in feedback
            .alignment_errors
            .iter()
            .filter(|e| e.contains("radius too small"))
        {
            let start = next.constraint("start_radius")?;
            let ceiling = next.constraint("end_radius")?;
            next = next.with_constraint("start_radius", (start + RADIUS_STEP).min(ceiling));
        }
        if feedback.timing_mismatch > 0.1 {
            next = next.with_parameter("easing", "linear");
        }
        for (key, lines) in [
            (PRIORITY_KEY, &instructions.priority),
            (SECONDARY_KEY, &instructions.secondary),
            (CONSTRAINTS_KEY, &instructions.constraints),
        ] {
            next = if lines.is_empty() {
                next.without_parameter(key)
            } else {
                next.with_parameter(key, lines.join("; "))
            };
        }

        let changed = next.changed_keys(&last);
        if !changed.is_empty() {
            tracing::debug!(?changed, "directive refined");
        }
        self.log.push(DirectorEntry::RefinedPrompt {
            directive: next.clone(),
            feedback: feedback.clone(),
            instructions: instructions.clone(),
        });
        Ok(next)
    }

    /// Resume from a checkpointed directive.
    pub fn restore(&mut self, directive: Directive) {
        self.log.push(DirectorEntry::Restored { directive });
    }
}

fn validate_feedback(feedback: &FeedbackSummary) -> VennResult<()> {
    let m = feedback.timing_mismatch;
    if !m.is_finite() || !(0.0..=1.0).contains(&m) {
        return Err(VennError::validation(format!(
            "timing_mismatch must be within [0, 1], got {m}"
        )));
    }
    if !feedback.overall_error.is_finite() {
        return Err(VennError::validation("overall_error must be finite"));
    }
    Ok(())
}

impl Agent for DirectorAgent {
    type Input = DirectorInput;
    type Output = Directive;

    fn id(&self) -> &str {
        DIRECTOR_ID
    }

    fn validate_input(&self, input: &DirectorInput) -> VennResult<()> {
        match input {
            DirectorInput::Initial => Ok(()),
            DirectorInput::Feedback { summary, .. } => validate_feedback(summary),
        }
    }

    fn act(&mut self, input: DirectorInput) -> VennResult<Directive> {
        match input {
            DirectorInput::Initial => Ok(self.initial_directive()),
            DirectorInput::Feedback {
                summary,
                instructions,
            } => self.refine(&summary, &instructions),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/agent.rs"]
mod tests;
