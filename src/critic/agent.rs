use crate::{
    agent::{Agent, AgentLog},
    critic::{engine::CriticEngine, result::AnalysisResult},
    foundation::error::VennResult,
    scene::frame::FrameSequence,
};

pub const CRITIC_ID: &str = "critic";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CritiqueEntry {
    pub frames: usize,
    pub score: f64,
    pub errors: usize,
}

/// Scores frame sequences with a [`CriticEngine`].
#[derive(Debug, Default)]
pub struct CriticAgent {
    engine: CriticEngine,
    log: AgentLog<CritiqueEntry>,
}

impl CriticAgent {
    pub fn new(engine: CriticEngine) -> Self {
        Self {
            engine,
            log: AgentLog::default(),
        }
    }

    pub fn engine(&self) -> &CriticEngine {
        &self.engine
    }

    pub fn log(&self) -> &AgentLog<CritiqueEntry> {
        &self.log
    }
}

impl Agent for CriticAgent {
    type Input = FrameSequence;
    type Output = AnalysisResult;

    fn id(&self) -> &str {
        CRITIC_ID
    }

    /// Every sequence is acceptable; malformed frames are scored, not rejected.
    fn validate_input(&self, _frames: &FrameSequence) -> VennResult<()> {
        Ok(())
    }

    fn act(&mut self, frames: FrameSequence) -> VennResult<AnalysisResult> {
        let result = self.engine.analyze(&frames);
        self.log.push(CritiqueEntry {
            frames: frames.len(),
            score: result.score,
            errors: result.errors.len(),
        });
        Ok(result)
    }
}
