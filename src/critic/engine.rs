use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    analysis::{
        AlignmentAnalyzer, AlignmentReport, StructuralAnalyzer, TimingAnalyzer, TimingReport,
        VisualAnalyzer, VisualReport,
    },
    critic::{
        config::ScoringConfig,
        result::{AnalysisResult, ComponentScores},
        summary::{FeedbackSummary, summarize},
    },
    foundation::math::{clamp01, mean},
    scene::frame::Frame,
};

/// Combines every analyzer into one bounded score.
///
/// Analysis never fails: malformed frames become zero sub-scores plus error strings.
#[derive(Clone, Debug)]
pub struct CriticEngine {
    config: ScoringConfig,
    visual: Option<VisualAnalyzer>,
}

impl Default for CriticEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl CriticEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            visual: None,
        }
    }

    pub fn with_visual(mut self, analyzer: VisualAnalyzer) -> Self {
        self.visual = Some(analyzer);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn visual_enabled(&self) -> bool {
        self.visual.is_some()
    }

    #[tracing::instrument(skip_all, fields(frames = frames.len(), visual = self.visual.is_some()))]
    pub fn analyze(&self, frames: &[Frame]) -> AnalysisResult {
        if frames.is_empty() {
            return AnalysisResult {
                is_valid: false,
                score: 0.0,
                errors: vec!["No frames provided".to_string()],
                feedback: vec!["Animation must contain at least one frame".to_string()],
                suggestions: Vec::new(),
                visual_metrics: BTreeMap::new(),
                components: ComponentScores::default(),
                summary: summarize(frames),
            };
        }

        let reports: Vec<_> = frames
            .par_iter()
            .map(|f| StructuralAnalyzer.validate(f, true))
            .collect();

        let mut errors = Vec::new();
        let mut structure_scores = Vec::with_capacity(frames.len());
        for (i, report) in reports.into_iter().enumerate() {
            errors.extend(report.errors.iter().map(|e| format!("Frame {i}: {e}")));
            structure_scores.push(if report.is_valid { 1.0 } else { 0.0 });
        }
        let summary = summarize(frames);

        if structure_scores.iter().all(|s| *s == 0.0) {
            tracing::debug!(errors = errors.len(), "every frame failed structural validation");
            return AnalysisResult {
                is_valid: false,
                score: 0.0,
                errors,
                feedback: vec!["Animation contains invalid SVG frames".to_string()],
                suggestions: vec![
                    "Critical: every frame needs an svg root with numeric width and height, a \
                     circle with numeric cx, cy and r, and an animate element"
                        .to_string(),
                ],
                visual_metrics: BTreeMap::new(),
                components: ComponentScores::default(),
                summary,
            };
        }

        let timing = TimingAnalyzer::new(self.config.clone()).analyze(frames);
        let alignment = AlignmentAnalyzer::new(self.config.clone()).analyze(frames);
        let visual = self.visual.as_ref().map(|v| v.analyze(frames));

        errors.extend(timing.errors.iter().cloned());
        errors.extend(alignment.errors.iter().cloned());

        let components = ComponentScores {
            structure: mean(&structure_scores).unwrap_or(0.0),
            timing: timing.avg_timing,
            consistency: timing.avg_consistency,
            alignment: alignment.avg_alignment,
            visual: visual.as_ref().map(|v| v.score),
        };

        let score = self.score(&components, &timing, &alignment, errors.is_empty());
        tracing::debug!(score, errors = errors.len(), "analysis scored");

        let mut feedback = timing.feedback.clone();
        feedback.extend(alignment.feedback.iter().cloned());
        if let Some(v) = &visual {
            feedback.extend(v.issues.iter().cloned());
            feedback.extend(v.critique.positive_feedback.iter().cloned());
        }
        feedback.push(tier_feedback(score).to_string());

        let suggestions = suggestions(&components, &timing, &alignment, &summary, visual.as_ref());

        let visual_metrics = visual
            .as_ref()
            .map(|v| {
                let mut m: BTreeMap<String, f64> = v
                    .metrics
                    .as_pairs()
                    .into_iter()
                    .map(|(k, x)| (k.to_string(), x))
                    .collect();
                m.insert("visual_score".to_string(), v.score);
                m
            })
            .unwrap_or_default();

        AnalysisResult {
            is_valid: errors.is_empty(),
            score,
            errors,
            feedback,
            suggestions,
            visual_metrics,
            components,
            summary,
        }
    }

    fn score(
        &self,
        c: &ComponentScores,
        timing: &TimingReport,
        alignment: &AlignmentReport,
        no_errors: bool,
    ) -> f64 {
        let cfg = &self.config;
        let w = cfg.weights_for(c.visual.is_some());

        let mut base = w.structure * c.structure + w.timing * c.timing + w.alignment * c.alignment;
        if let Some(v) = c.visual {
            base += w.visual * v;
        }

        if no_errors && c.structure >= cfg.min_valid_structure {
            base = (base + cfg.base_boost).min(1.0);
            let excellent = c.timing >= cfg.excellence_threshold
                && c.alignment >= cfg.excellence_threshold
                && c.visual.is_none_or(|v| v >= cfg.excellence_threshold);
            if excellent {
                base = (base + cfg.excellence_boost).min(1.0);
            }
        }

        // Per-frame sub-scores plus the visual score, if any.
        let all_at_least = |threshold: f64| {
            timing
                .validity
                .iter()
                .chain(&timing.consistency)
                .chain(&alignment.scores)
                .chain(c.visual.as_ref())
                .all(|s| *s >= threshold)
        };

        let mut total = if c.structure == 1.0 && all_at_least(cfg.perfect_threshold) {
            1.0
        } else if c.structure >= cfg.good_threshold && all_at_least(cfg.good_threshold) {
            cfg.good_score
        } else if c.structure >= cfg.decent_threshold && all_at_least(cfg.decent_threshold) {
            cfg.decent_score
        } else if base >= cfg.acceptable_base
            && c.alignment >= cfg.acceptable_component
            && c.timing >= cfg.acceptable_component
        {
            cfg.acceptable_score
        } else {
            let mut t = base;
            if alignment.has_alignment_issues {
                t *= 1.0 - cfg.alignment_penalty;
                if alignment.min_score() < cfg.severe_threshold {
                    t *= 1.0 - cfg.alignment_penalty;
                }
            }
            if c.timing < cfg.acceptable_component {
                t *= 1.0 - cfg.timing_penalty;
                if timing.min_consistency() < cfg.severe_threshold {
                    t *= 1.0 - cfg.timing_penalty;
                }
            }
            if c.visual.is_some_and(|v| v < cfg.acceptable_component) {
                t *= 1.0 - cfg.visual_penalty;
            }
            t
        };

        let severe = timing.min_consistency() < cfg.severe_threshold
            || alignment.min_score() < cfg.severe_threshold
            || c.visual.is_some_and(|v| v < cfg.severe_threshold);
        if no_errors && c.structure >= cfg.min_valid_structure && !severe {
            total = total.max(cfg.min_valid_score);
        }

        clamp01(total)
    }
}

fn tier_feedback(score: f64) -> &'static str {
    if score > 0.9 {
        "Animation demonstrates excellent quality and smooth transitions"
    } else if score > 0.7 {
        "Animation is good but has minor issues that could be improved"
    } else if score > 0.5 {
        "Animation needs significant improvements in timing and alignment"
    } else {
        "Animation has major issues and requires extensive revision"
    }
}

fn suggestions(
    c: &ComponentScores,
    timing: &TimingReport,
    alignment: &AlignmentReport,
    summary: &FeedbackSummary,
    visual: Option<&VisualReport>,
) -> Vec<String> {
    let mut out = Vec::new();

    if c.structure < 0.5 {
        out.push("Critical: fix SVG structure errors in most frames".to_string());
    } else if c.structure < 1.0 {
        out.push("Important: fix SVG structure errors in the failing frames".to_string());
    }

    if timing.min_consistency() < 0.5 {
        out.push("Critical: keep animation durations consistent across frames".to_string());
    } else if c.timing < 0.8 {
        out.push("Important: declare a positive duration on every frame's animation".to_string());
    }

    if alignment.min_score() < 0.5 {
        out.push("Significant: keep circle centers stable between frames".to_string());
    } else if alignment.has_alignment_issues {
        out.push("Smooth out small circle position changes".to_string());
    }

    if summary.has_error("radius too small") {
        out.push("Start from a larger radius so the first frame is visible".to_string());
    }
    if summary.timing_mismatch > 0.1 {
        out.push(format!(
            "Space animation values evenly (mismatch {:.2})",
            summary.timing_mismatch
        ));
    }

    if let Some(v) = visual {
        out.extend(v.critique.improvements.iter().cloned());
        out.extend(v.critique.suggestions.iter().cloned());
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/critic/engine.rs"]
mod tests;
