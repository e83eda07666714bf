pub mod agent;
pub mod coordinator;
pub mod instructions;

pub use agent::{DirectorAgent, DirectorInput};
pub use coordinator::{CoordinatorConfig, IterationCoordinator, IterationOutcome, RunState, StopReason};
pub use instructions::Instructions;
