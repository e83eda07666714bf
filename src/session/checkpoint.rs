use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    design::directive::Directive,
    foundation::error::{VennError, VennResult},
    memory::{Memory, store::write_atomic},
};

/// Resumable run state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Checkpoint {
    pub iteration: u32,
    pub directive: Directive,
    pub memory: Memory,
}

impl Checkpoint {
    /// Checkpoint location for a memory file: `memory.json` -> `memory.checkpoint.json`.
    pub fn path_for(memory_path: &Path) -> PathBuf {
        let stem = memory_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "memory".to_string());
        memory_path.with_file_name(format!("{stem}.checkpoint.json"))
    }

    pub fn save(&self, path: &Path) -> VennResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())
    }

    pub fn load(path: &Path) -> VennResult<Self> {
        let bytes = fs::read(path)
            .map_err(|e| VennError::persistence(format!("read {}: {e}", path.display())))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/checkpoint.rs"]
mod tests;
