use crate::foundation::error::VennResult;

/// One participant in the feedback loop.
pub trait Agent {
    type Input;
    type Output;

    fn id(&self) -> &str;

    /// Reject input the agent cannot act on.
    fn validate_input(&self, input: &Self::Input) -> VennResult<()>;

    fn act(&mut self, input: Self::Input) -> VennResult<Self::Output>;
}

/// Append-only per-agent history.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AgentLog<E> {
    entries: Vec<E>,
}

impl<E> Default for AgentLog<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> AgentLog<E> {
    pub(crate) fn push(&mut self, entry: E) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn last(&self) -> Option<&E> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
