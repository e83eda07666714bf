use crate::{
    agent::{Agent, AgentLog},
    design::{
        directive::Directive,
        generator::{CircleGenerator, Generator},
    },
    foundation::error::{VennError, VennResult},
    scene::frame::FrameSequence,
};

pub const DESIGNER_ID: &str = "designer";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DesignEntry {
    pub directive: Directive,
    pub frames: usize,
}

/// Turns directives into frame sequences.
#[derive(Debug, Default)]
pub struct DesignerAgent<G = CircleGenerator> {
    generator: G,
    log: AgentLog<DesignEntry>,
}

impl<G: Generator> DesignerAgent<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            log: AgentLog::default(),
        }
    }

    pub fn log(&self) -> &AgentLog<DesignEntry> {
        &self.log
    }
}

impl<G: Generator> Agent for DesignerAgent<G> {
    type Input = Directive;
    type Output = FrameSequence;

    fn id(&self) -> &str {
        DESIGNER_ID
    }

    fn validate_input(&self, directive: &Directive) -> VennResult<()> {
        if directive.goal.trim().is_empty() {
            return Err(VennError::validation("directive goal must not be empty"));
        }
        if let Some((k, _)) = directive.constraints.iter().find(|(_, v)| !v.is_finite()) {
            return Err(VennError::validation(format!(
                "directive constraint '{k}' must be finite"
            )));
        }
        Ok(())
    }

    fn act(&mut self, directive: Directive) -> VennResult<FrameSequence> {
        self.validate_input(&directive)?;
        let frames = self.generator.generate(&directive)?;
        if frames.is_empty() {
            return Err(VennError::generation(format!(
                "generator produced no frames for \"{}\"",
                directive.goal
            )));
        }
        self.log.push(DesignEntry {
            directive,
            frames: frames.len(),
        });
        Ok(frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/design/designer.rs"]
mod tests;
