pub mod agent;
pub mod config;
pub mod engine;
pub mod result;
pub mod summary;

pub use agent::CriticAgent;
pub use config::{ScoringConfig, Weights};
pub use engine::CriticEngine;
pub use result::{AnalysisResult, ComponentScores};
pub use summary::FeedbackSummary;
