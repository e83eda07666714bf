use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crate::{
    agent::Agent,
    analysis::VisualAnalyzer,
    critic::{AnalysisResult, CriticAgent, CriticEngine, ScoringConfig},
    critique::AnthropicCritique,
    design::{
        designer::DesignerAgent,
        directive::Directive,
        generator::{CircleGenerator, Generator},
    },
    director::{CoordinatorConfig, IterationCoordinator, RunState, StopReason},
    foundation::error::{VennError, VennResult},
    memory::Memory,
    session::checkpoint::Checkpoint,
};

/// Settings for a whole run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub max_iterations: u32,
    pub convergence_threshold: f64,
    pub improvement_threshold: f64,
    pub critical_threshold: f64,
    pub moderate_threshold: f64,
    pub memory_path: PathBuf,
    /// Write a checkpoint every this many iterations; 0 disables checkpoints.
    pub backup_interval: u32,
    /// Attempts per iteration before the run gives up.
    pub retry_count: u32,
    pub retry_delay_secs: f64,
    pub visual: bool,
    /// Ask the Anthropic API for visual critique (needs `ANTHROPIC_API_KEY`).
    pub llm: bool,
    pub llm_timeout_secs: u64,
    pub scoring: ScoringConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        let c = CoordinatorConfig::default();
        Self {
            max_iterations: c.max_iterations,
            convergence_threshold: c.convergence_threshold,
            improvement_threshold: c.improvement_threshold,
            critical_threshold: c.critical_threshold,
            moderate_threshold: c.moderate_threshold,
            memory_path: PathBuf::from("output/agent_memory.json"),
            backup_interval: 3,
            retry_count: 3,
            retry_delay_secs: 2.0,
            visual: false,
            llm: false,
            llm_timeout_secs: 20,
            scoring: ScoringConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn load_json(path: &Path) -> VennResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| VennError::persistence(format!("read {}: {e}", path.display())))?;
        let cfg: Self = serde_json::from_slice(&bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            max_iterations: self.max_iterations,
            convergence_threshold: self.convergence_threshold,
            improvement_threshold: self.improvement_threshold,
            critical_threshold: self.critical_threshold,
            moderate_threshold: self.moderate_threshold,
        }
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        Checkpoint::path_for(&self.memory_path)
    }

    pub fn validate(&self) -> VennResult<()> {
        self.coordinator_config().validate()?;
        self.scoring.validate()?;
        if self.retry_count == 0 {
            return Err(VennError::validation("retry_count must be at least 1"));
        }
        if !self.retry_delay_secs.is_finite() || self.retry_delay_secs < 0.0 {
            return Err(VennError::validation(
                "retry_delay_secs must be finite and non-negative",
            ));
        }
        if self.memory_path.as_os_str().is_empty() {
            return Err(VennError::validation("memory_path must not be empty"));
        }
        if self.llm && !self.visual {
            return Err(VennError::validation("llm critique requires visual analysis"));
        }
        Ok(())
    }
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub final_score: f64,
    pub iterations: u32,
    pub total_improvement: f64,
    pub state: RunState,
    pub stop_reason: Option<StopReason>,
    /// Last failure when the run gave up.
    pub error: Option<String>,
}

/// Generate, critique, coordinate, repeat.
pub struct RunLoop<G: Generator = CircleGenerator> {
    config: RunConfig,
    designer: DesignerAgent<G>,
    critic: CriticAgent,
    abort: Arc<AtomicBool>,
}

impl RunLoop<CircleGenerator> {
    pub fn new(config: RunConfig) -> VennResult<Self> {
        Self::with_generator(config, CircleGenerator::default())
    }
}

impl<G: Generator> RunLoop<G> {
    pub fn with_generator(config: RunConfig, generator: G) -> VennResult<Self> {
        config.validate()?;
        let critic = CriticAgent::new(build_engine(&config));
        Ok(Self {
            config,
            designer: DesignerAgent::new(generator),
            critic,
            abort: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Flag checked at iteration boundaries; setting it stops the run.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    #[tracing::instrument(skip_all, fields(memory = %self.config.memory_path.display()))]
    pub fn run(&mut self) -> VennResult<RunReport> {
        let memory = Memory::load(&self.config.memory_path);
        let mut coord = IterationCoordinator::new(self.config.coordinator_config(), memory);
        let mut restored = false;
        let mut failure = None;

        loop {
            if self.abort.load(Ordering::SeqCst) {
                tracing::warn!(iteration = coord.iteration(), "abort requested");
                coord.abort(StopReason::AbortSignal);
                break;
            }

            let directive = coord.current_directive();
            let result = match self.attempt(&directive, coord.iteration() + 1) {
                Ok(r) => r,
                Err(e) => {
                    if !restored {
                        if let Some(cp) = self.load_checkpoint() {
                            tracing::warn!(
                                error = %e,
                                iteration = cp.iteration,
                                "retries exhausted; restoring checkpoint"
                            );
                            coord.restore(cp);
                            restored = true;
                            continue;
                        }
                    }
                    tracing::error!(error = %e, "retries exhausted; aborting run");
                    coord.abort(StopReason::RetriesExhausted);
                    failure = Some(e.to_string());
                    break;
                }
            };

            let outcome = match coord.coordinate(&result) {
                Ok(o) => o,
                Err(e) => {
                    self.persist(&coord);
                    return Err(e);
                }
            };
            tracing::info!(
                iteration = outcome.iteration,
                score = outcome.score,
                state = ?outcome.state,
                priority = outcome.instructions.priority.len(),
                "iteration complete"
            );

            let interval = self.config.backup_interval;
            if interval > 0 && outcome.iteration % interval == 0 {
                self.save_checkpoint(&coord);
            }
            if !outcome.should_continue {
                break;
            }
        }

        self.persist(&coord);

        Ok(RunReport {
            final_score: coord.last_score().unwrap_or(0.0),
            iterations: coord.iteration(),
            total_improvement: coord.total_improvement(),
            state: coord.state(),
            stop_reason: coord.stop_reason(),
            error: failure,
        })
    }

    /// Generate and analyze once, retrying up to `retry_count` times.
    fn attempt(&mut self, directive: &Directive, iteration: u32) -> VennResult<AnalysisResult> {
        let attempts = self.config.retry_count;
        let delay = Duration::from_secs_f64(self.config.retry_delay_secs);
        let mut last = String::new();

        for attempt in 1..=attempts {
            let outcome = self
                .designer
                .act(directive.clone())
                .and_then(|frames| self.critic.act(frames));
            match outcome {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::warn!(iteration, attempt, kind = e.kind(), error = %e, "iteration failed");
                    last = e.to_string();
                    if attempt < attempts && !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
        }
        Err(VennError::RetriesExhausted {
            iteration,
            attempts,
            last,
        })
    }

    /// Failures are logged; the in-memory state stays authoritative.
    fn persist(&self, coord: &IterationCoordinator) {
        if let Err(e) = coord.memory().save(&self.config.memory_path) {
            tracing::warn!(error = %e, "failed to persist memory");
        }
    }

    fn save_checkpoint(&self, coord: &IterationCoordinator) {
        let Some(cp) = coord.checkpoint() else {
            return;
        };
        let path = self.config.checkpoint_path();
        match cp.save(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), iteration = cp.iteration, "checkpoint saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save checkpoint"),
        }
    }

    fn load_checkpoint(&self) -> Option<Checkpoint> {
        let path = self.config.checkpoint_path();
        match Checkpoint::load(&path) {
            Ok(cp) => Some(cp),
            Err(e) => {
                tracing::debug!(error = %e, "no usable checkpoint");
                None
            }
        }
    }
}

fn build_engine(config: &RunConfig) -> CriticEngine {
    let engine = CriticEngine::new(config.scoring.clone());
    if !config.visual {
        return engine;
    }
    let mut visual = VisualAnalyzer::new();
    if config.llm {
        match AnthropicCritique::from_env(Duration::from_secs(config.llm_timeout_secs)) {
            Ok(provider) => visual = visual.with_provider(Arc::new(provider)),
            Err(e) => tracing::warn!(error = %e, "llm critique unavailable; using rule-based critique"),
        }
    }
    engine.with_visual(visual)
}

#[cfg(test)]
#[path = "../../tests/unit/session/run_loop.rs"]
mod tests;
