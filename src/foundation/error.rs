/// Crate-wide result alias.
pub type VennResult<T> = Result<T, VennError>;

/// Errors surfaced to callers.
///
/// Analysis itself never produces these: malformed frames degrade into zero sub-scores plus
/// error strings inside [`crate::AnalysisResult`]. These variants cover invalid inputs,
/// collaborator failures, and persistence.
#[derive(thiserror::Error, Debug)]
pub enum VennError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("generation error: {0}")]
    Generation(String),

    #[error("analysis error: {0}")]
    Analysis(String),

    #[error("collaborator error: {0}")]
    Collaborator(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("iteration {iteration} failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        iteration: u32,
        attempts: u32,
        last: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VennError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Short, stable label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Generation(_) => "generation",
            Self::Analysis(_) => "analysis",
            Self::Collaborator(_) => "collaborator",
            Self::Persistence(_) => "persistence",
            Self::Serde(_) => "serde",
            Self::RetriesExhausted { .. } => "retries_exhausted",
            Self::Other(_) => "other",
        }
    }
}

impl From<serde_json::Error> for VennError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
