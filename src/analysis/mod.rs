pub mod alignment;
pub mod raster;
pub mod structure;
pub mod timing;
pub mod visual;

pub use alignment::{AlignmentAnalyzer, AlignmentReport};
pub use structure::{StructuralAnalyzer, StructureReport};
pub use timing::{TimingAnalyzer, TimingReport};
pub use visual::{SampleSource, VisualAnalyzer, VisualMetrics, VisualReport};
