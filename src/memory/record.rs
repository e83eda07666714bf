use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Experience {
    pub timestamp: DateTime<Utc>,
    pub agent_id: String,
    pub action: String,
    pub result: String,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub from_agent: String,
    pub to_agent: String,
    pub feedback_text: String,
    pub metrics: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PerformanceSnapshot {
    pub timestamp: DateTime<Utc>,
    pub metrics: BTreeMap<String, f64>,
}

/// Change of one metric between the two latest snapshots.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricTrend {
    pub current: f64,
    pub previous: f64,
    pub change: f64,
}
