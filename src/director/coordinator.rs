use crate::{
    critic::{agent::CRITIC_ID, result::AnalysisResult},
    design::{designer::DESIGNER_ID, directive::Directive},
    director::{
        agent::{DIRECTOR_ID, DirectorAgent},
        instructions::Instructions,
    },
    foundation::error::{VennError, VennResult},
    memory::Memory,
    session::checkpoint::Checkpoint,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub max_iterations: u32,
    /// Score at or above which the run is done.
    pub convergence_threshold: f64,
    /// Trend changes below this count as a plateau.
    pub improvement_threshold: f64,
    pub critical_threshold: f64,
    pub moderate_threshold: f64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            convergence_threshold: 0.95,
            improvement_threshold: 0.02,
            critical_threshold: 0.3,
            moderate_threshold: 0.6,
        }
    }
}

impl CoordinatorConfig {
    pub fn validate(&self) -> VennResult<()> {
        if self.max_iterations == 0 {
            return Err(VennError::validation("max_iterations must be at least 1"));
        }
        for (name, v) in [
            ("convergence_threshold", self.convergence_threshold),
            ("improvement_threshold", self.improvement_threshold),
            ("critical_threshold", self.critical_threshold),
            ("moderate_threshold", self.moderate_threshold),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(VennError::validation(format!("{name} must be within [0, 1]")));
            }
        }
        if self.critical_threshold > self.moderate_threshold {
            return Err(VennError::validation(
                "critical_threshold must not exceed moderate_threshold",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Initial,
    Iterating,
    Converged,
    Exhausted,
    Aborted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted | Self::Aborted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    TargetReached,
    Plateau,
    MaxIterations,
    AbortSignal,
    RetriesExhausted,
}

/// What the coordinator decided after one analysis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IterationOutcome {
    pub iteration: u32,
    pub score: f64,
    pub state: RunState,
    pub stop_reason: Option<StopReason>,
    pub should_continue: bool,
    pub instructions: Instructions,
    /// Directive for the next generation step.
    pub directive: Directive,
}

/// Owns the run's memory and decides when iteration stops.
///
/// State machine: `Initial -> Iterating -> {Converged, Exhausted, Aborted}`. Terminal states
/// reject further analyses.
#[derive(Debug)]
pub struct IterationCoordinator {
    config: CoordinatorConfig,
    memory: Memory,
    director: DirectorAgent,
    state: RunState,
    stop_reason: Option<StopReason>,
    iteration: u32,
    first_score: Option<f64>,
    last_score: Option<f64>,
}

impl IterationCoordinator {
    pub fn new(config: CoordinatorConfig, memory: Memory) -> Self {
        Self::with_director(config, memory, DirectorAgent::new())
    }

    pub fn with_director(config: CoordinatorConfig, memory: Memory, director: DirectorAgent) -> Self {
        Self {
            config,
            memory,
            director,
            state: RunState::Initial,
            stop_reason: None,
            iteration: 0,
            first_score: None,
            last_score: None,
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn into_memory(self) -> Memory {
        self.memory
    }

    pub fn director(&self) -> &DirectorAgent {
        &self.director
    }

    pub fn last_score(&self) -> Option<f64> {
        self.last_score
    }

    /// Last score minus the first score of this run.
    pub fn total_improvement(&self) -> f64 {
        match (self.first_score, self.last_score) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// The directive to generate from next; issues the default one on first use.
    pub fn current_directive(&mut self) -> Directive {
        match self.director.current() {
            Some(d) => d.clone(),
            None => self.director.initial_directive(),
        }
    }

    #[tracing::instrument(skip_all, fields(iteration = self.iteration + 1, score = result.score))]
    pub fn coordinate(&mut self, result: &AnalysisResult) -> VennResult<IterationOutcome> {
        if self.state.is_terminal() {
            return Err(VennError::validation(format!(
                "coordinator already finished ({:?})",
                self.state
            )));
        }
        let directive = self.current_directive();
        self.iteration += 1;
        self.first_score.get_or_insert(result.score);
        self.last_score = Some(result.score);

        self.record(result, &directive);
        let instructions = Instructions::from_result(
            result,
            self.config.critical_threshold,
            self.config.moderate_threshold,
        );
        let next = self.director.refine(&result.summary, &instructions)?;
        let changed = next.changed_keys(&directive);
        let refined = if changed.is_empty() {
            "unchanged".to_string()
        } else {
            changed.join(", ")
        };
        self.memory
            .add_experience(DIRECTOR_ID, "refine", &refined, result.score);

        let (state, reason) = self.decide(result.score);
        self.state = state;
        self.stop_reason = reason;
        if let Some(reason) = reason {
            tracing::info!(?state, ?reason, iteration = self.iteration, "iteration stopped");
        }

        Ok(IterationOutcome {
            iteration: self.iteration,
            score: result.score,
            state,
            stop_reason: reason,
            should_continue: !state.is_terminal(),
            instructions,
            directive: next,
        })
    }

    fn record(&mut self, result: &AnalysisResult, directive: &Directive) {
        let m = &mut self.memory;
        m.add_experience(DESIGNER_ID, "generate", &directive.goal, result.score);
        let verdict = result.feedback.last().map(String::as_str).unwrap_or("");
        m.add_experience(CRITIC_ID, "analyze", verdict, result.score);
        m.add_feedback(
            CRITIC_ID,
            DESIGNER_ID,
            &result.feedback.join("; "),
            result.metrics(),
        );
        m.update_metrics(CRITIC_ID, result.metrics());
    }

    fn decide(&self, score: f64) -> (RunState, Option<StopReason>) {
        if score >= self.config.convergence_threshold {
            return (RunState::Converged, Some(StopReason::TargetReached));
        }
        if self.iteration >= self.config.max_iterations {
            return (RunState::Exhausted, Some(StopReason::MaxIterations));
        }
        if self.iteration > 1 {
            let trend = self.memory.performance_trend(CRITIC_ID);
            let flat = !trend.is_empty()
                && trend
                    .values()
                    .all(|t| t.change.abs() < self.config.improvement_threshold);
            if flat {
                return (RunState::Converged, Some(StopReason::Plateau));
            }
        }
        (RunState::Iterating, None)
    }

    /// Stop at the next iteration boundary.
    pub fn abort(&mut self, reason: StopReason) {
        if !self.state.is_terminal() {
            self.state = RunState::Aborted;
            self.stop_reason = Some(reason);
        }
    }

    pub fn checkpoint(&self) -> Option<Checkpoint> {
        Some(Checkpoint {
            iteration: self.iteration,
            directive: self.director.current()?.clone(),
            memory: self.memory.clone(),
        })
    }

    /// Resume from `checkpoint`, replacing the in-memory history.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.iteration = checkpoint.iteration;
        self.memory = checkpoint.memory;
        self.director.restore(checkpoint.directive);
        self.state = RunState::Iterating;
        self.stop_reason = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/coordinator.rs"]
mod tests;
