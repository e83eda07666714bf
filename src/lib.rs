//! vennkoii generates simple circle animations, scores them, and iterates until the score
//! converges.
//!
//! The loop has three agents:
//!
//! - a designer that turns a [`Directive`] into a [`FrameSequence`]
//! - a critic that scores the sequence into an [`AnalysisResult`]
//! - a director that refines the directive from the critic's [`FeedbackSummary`]
//!
//! An [`IterationCoordinator`] owns the run's [`Memory`] and decides when to stop; a [`RunLoop`]
//! adds retries, checkpoints and persistence around it.
#![forbid(unsafe_code)]

mod foundation;

pub mod agent;
pub mod analysis;
pub mod animation;
pub mod critic;
pub mod critique;
pub mod design;
pub mod director;
pub mod memory;
pub mod scene;
pub mod session;

pub use crate::agent::{Agent, AgentLog};
pub use crate::animation::ease::Ease;
pub use crate::critic::{
    AnalysisResult, ComponentScores, CriticAgent, CriticEngine, FeedbackSummary, ScoringConfig,
};
pub use crate::critique::{CritiqueProvider, CritiqueRequest, CritiqueResponse};
pub use crate::design::{
    designer::DesignerAgent,
    directive::Directive,
    generator::{CircleGenerator, Generator, Layout},
};
pub use crate::director::{
    CoordinatorConfig, DirectorAgent, Instructions, IterationCoordinator, IterationOutcome,
    RunState, StopReason,
};
pub use crate::foundation::core::{Point, Rgb8};
pub use crate::foundation::error::{VennError, VennResult};
pub use crate::memory::Memory;
pub use crate::scene::frame::{Animate, Circle, Frame, FrameSequence, NumericAttr, RootElement};
pub use crate::scene::parse::{parse_frame, parse_frames};
pub use crate::session::{Checkpoint, RunConfig, RunLoop, RunReport};
