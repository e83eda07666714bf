use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{
    foundation::error::{VennError, VennResult},
    memory::record::{Experience, FeedbackRecord, MetricTrend, PerformanceSnapshot},
};

/// Append-only record of what the agents did and how it scored.
///
/// Entries are only ever pushed; there is no API to edit or remove them.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Memory {
    experiences: Vec<Experience>,
    feedback_history: Vec<FeedbackRecord>,
    performance_metrics: BTreeMap<String, Vec<PerformanceSnapshot>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_experience(&mut self, agent_id: &str, action: &str, result: &str, score: f64) {
        self.experiences.push(Experience {
            timestamp: Utc::now(),
            agent_id: agent_id.to_string(),
            action: action.to_string(),
            result: result.to_string(),
            score,
        });
    }

    pub fn add_feedback(
        &mut self,
        from_agent: &str,
        to_agent: &str,
        feedback_text: &str,
        metrics: BTreeMap<String, f64>,
    ) {
        self.feedback_history.push(FeedbackRecord {
            timestamp: Utc::now(),
            from_agent: from_agent.to_string(),
            to_agent: to_agent.to_string(),
            feedback_text: feedback_text.to_string(),
            metrics,
        });
    }

    pub fn update_metrics(&mut self, agent_id: &str, metrics: BTreeMap<String, f64>) {
        self.performance_metrics
            .entry(agent_id.to_string())
            .or_default()
            .push(PerformanceSnapshot {
                timestamp: Utc::now(),
                metrics,
            });
    }

    pub fn experiences(&self) -> &[Experience] {
        &self.experiences
    }

    pub fn feedback_history(&self) -> &[FeedbackRecord] {
        &self.feedback_history
    }

    pub fn snapshots(&self, agent_id: &str) -> &[PerformanceSnapshot] {
        self.performance_metrics
            .get(agent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn agents_with_metrics(&self) -> impl Iterator<Item = &str> {
        self.performance_metrics.keys().map(String::as_str)
    }

    /// Up to `limit` experiences of `agent_id`, newest first.
    pub fn recent_experiences(&self, agent_id: &str, limit: usize) -> Vec<&Experience> {
        self.experiences
            .iter()
            .rev()
            .filter(|e| e.agent_id == agent_id)
            .take(limit)
            .collect()
    }

    /// Feedback addressed to `agent_id`, oldest first.
    pub fn feedback_for(&self, agent_id: &str) -> Vec<&FeedbackRecord> {
        self.feedback_history
            .iter()
            .filter(|f| f.to_agent == agent_id)
            .collect()
    }

    /// Per-metric change between the two most recent snapshots of `agent_id`.
    ///
    /// Empty with fewer than two snapshots; only keys present in both are reported.
    pub fn performance_trend(&self, agent_id: &str) -> BTreeMap<String, MetricTrend> {
        let snaps = self.snapshots(agent_id);
        let [.., previous, latest] = snaps else {
            return BTreeMap::new();
        };
        latest
            .metrics
            .iter()
            .filter_map(|(k, current)| {
                let previous = *previous.metrics.get(k)?;
                Some((
                    k.clone(),
                    MetricTrend {
                        current: *current,
                        previous,
                        change: current - previous,
                    },
                ))
            })
            .collect()
    }

    /// Write as pretty JSON via a temp file and rename.
    pub fn save(&self, path: &Path) -> VennResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())
    }

    /// Read a memory file, returning an empty memory when it is absent or unreadable.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(m) => m,
            Err(LoadError::Missing) => {
                tracing::warn!(path = %path.display(), "no memory file; starting empty");
                Self::default()
            }
            Err(LoadError::Failed(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load memory; starting empty");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, LoadError> {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(LoadError::Missing),
            Err(e) => {
                return Err(LoadError::Failed(VennError::persistence(format!(
                    "read {}: {e}",
                    path.display()
                ))));
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| LoadError::Failed(e.into()))
    }
}

enum LoadError {
    Missing,
    Failed(VennError),
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> VennResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            VennError::persistence(format!("create dir {}: {e}", parent.display()))
        })?;
    }
    let tmp = temp_path(path);
    fs::write(&tmp, bytes)
        .map_err(|e| VennError::persistence(format!("write {}: {e}", tmp.display())))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        VennError::persistence(format!("rename to {}: {e}", path.display()))
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/memory/store.rs"]
mod tests;
