use std::sync::atomic::AtomicU32;

use crate::scene::frame::{FrameSequence, NumericAttr};

use super::*;

fn config(dir: &Path) -> RunConfig {
    RunConfig {
        memory_path: dir.join("memory.json"),
        retry_delay_secs: 0.0,
        max_iterations: 5,
        ..RunConfig::default()
    }
}

/// Succeeds for the first `ok_calls` calls, then fails. Frames alternate durations so scores stay
/// low.
struct Scripted {
    ok_calls: u32,
    calls: AtomicU32,
}

impl Scripted {
    fn new(ok_calls: u32) -> Self {
        Self {
            ok_calls,
            calls: AtomicU32::new(0),
        }
    }
}

impl Generator for Scripted {
    fn generate(&self, directive: &Directive) -> VennResult<FrameSequence> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n >= self.ok_calls {
            return Err(VennError::generation("renderer offline"));
        }
        let mut frames = CircleGenerator::default().generate(directive)?;
        for (i, f) in frames.iter_mut().enumerate() {
            let dur = if i % 2 == 0 { 1.0 } else { 5.0 };
            for a in &mut f.animations {
                a.dur = NumericAttr::Value(dur);
            }
        }
        Ok(frames)
    }
}

#[test]
fn default_config_is_valid() {
    RunConfig::default().validate().unwrap();
}

#[test]
fn invalid_configs_are_rejected() {
    let bad = RunConfig {
        retry_count: 0,
        ..RunConfig::default()
    };
    assert!(matches!(bad.validate(), Err(VennError::Validation(_))));
    let bad = RunConfig {
        llm: true,
        ..RunConfig::default()
    };
    assert!(bad.validate().is_err());
    assert!(RunLoop::new(RunConfig {
        max_iterations: 0,
        ..RunConfig::default()
    })
    .is_err());
}

#[test]
fn json_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    std::fs::write(&path, r#"{"max_iterations": 7, "scoring": {"timing_penalty": 0.4}}"#).unwrap();
    let cfg = RunConfig::load_json(&path).unwrap();
    assert_eq!(cfg.max_iterations, 7);
    assert_eq!(cfg.backup_interval, 3);
    assert_eq!(cfg.scoring.timing_penalty, 0.4);
}

#[test]
fn default_directive_converges_and_persists_memory() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let mut run = RunLoop::new(cfg.clone()).unwrap();
    let report = run.run().unwrap();

    assert_eq!(report.state, RunState::Converged);
    assert_eq!(report.stop_reason, Some(StopReason::TargetReached));
    assert_eq!(report.iterations, 1);
    assert!(report.final_score >= 0.95);
    assert!(report.error.is_none());

    let memory = Memory::load(&cfg.memory_path);
    assert_eq!(memory.experiences().len(), 3);
}

#[test]
fn transient_failures_are_retried() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.max_iterations = 1;
    let mut run = RunLoop::with_generator(cfg, FailFirst::new(2)).unwrap();
    let report = run.run().unwrap();
    assert_eq!(report.iterations, 1);
    assert!(report.error.is_none());
}

/// Fails the first `failures` calls.
struct FailFirst {
    failures: u32,
    calls: AtomicU32,
}

impl FailFirst {
    fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
        }
    }
}

impl Generator for FailFirst {
    fn generate(&self, directive: &Directive) -> VennResult<FrameSequence> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
            return Err(VennError::generation("flaky"));
        }
        CircleGenerator::default().generate(directive)
    }
}

#[test]
fn exhausted_retries_without_checkpoint_abort() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let mut run = RunLoop::with_generator(cfg.clone(), Scripted::new(0)).unwrap();
    let report = run.run().unwrap();

    assert_eq!(report.state, RunState::Aborted);
    assert_eq!(report.stop_reason, Some(StopReason::RetriesExhausted));
    assert_eq!(report.iterations, 0);
    assert!(report.error.unwrap().contains("renderer offline"));
    assert!(cfg.memory_path.exists());
}

#[test]
fn checkpoint_is_restored_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.backup_interval = 1;
    let mut run = RunLoop::with_generator(cfg.clone(), Scripted::new(1)).unwrap();
    let report = run.run().unwrap();

    assert!(cfg.checkpoint_path().exists());
    assert_eq!(report.state, RunState::Aborted);
    assert_eq!(report.stop_reason, Some(StopReason::RetriesExhausted));
    assert_eq!(report.iterations, 1);
    assert!(report.final_score < 0.95);
}

#[test]
fn abort_flag_stops_before_the_first_iteration() {
    let dir = tempfile::tempdir().unwrap();
    let mut run = RunLoop::new(config(dir.path())).unwrap();
    run.abort_handle().store(true, Ordering::SeqCst);
    let report = run.run().unwrap();
    assert_eq!(report.state, RunState::Aborted);
    assert_eq!(report.stop_reason, Some(StopReason::AbortSignal));
    assert_eq!(report.iterations, 0);
}
