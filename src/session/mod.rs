pub mod checkpoint;
pub mod run_loop;

pub use checkpoint::Checkpoint;
pub use run_loop::{RunConfig, RunLoop, RunReport};
