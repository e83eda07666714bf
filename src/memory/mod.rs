pub mod record;
pub mod store;

pub use record::{Experience, FeedbackRecord, MetricTrend, PerformanceSnapshot};
pub use store::Memory;
