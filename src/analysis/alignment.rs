use crate::{
    critic::config::ScoringConfig,
    foundation::{core::Point, math::mean},
    scene::frame::Frame,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlignmentReport {
    /// Per-frame positional stability of the primary circle.
    pub scores: Vec<f64>,
    pub avg_alignment: f64,
    pub has_alignment_issues: bool,
    pub errors: Vec<String>,
    pub feedback: Vec<String>,
}

impl AlignmentReport {
    pub fn min_score(&self) -> f64 {
        self.scores.iter().copied().fold(1.0, f64::min)
    }
}

/// Tracks the primary circle's center across frames.
#[derive(Clone, Debug)]
pub struct AlignmentAnalyzer {
    config: ScoringConfig,
}

impl AlignmentAnalyzer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, frames: &[Frame]) -> AlignmentReport {
        let cfg = &self.config;
        let mut report = AlignmentReport::default();
        let mut previous: Option<Point> = None;

        for frame in frames {
            let Some(circle) = frame.primary_circle() else {
                report.errors.push("Missing circle element".to_string());
                report.scores.push(0.0);
                continue;
            };
            let Some(center) = circle.center() else {
                report
                    .errors
                    .push("Missing or invalid circle position attributes".to_string());
                report.scores.push(0.0);
                continue;
            };

            let score = match previous {
                None => 1.0,
                Some(prev) => {
                    let d = prev.distance(center);
                    if d <= cfg.position_tolerance_px {
                        1.0
                    } else if d <= cfg.extreme_distance_px {
                        report.feedback.push(format!(
                            "Significant circle position change detected (distance: {d:.1}px)"
                        ));
                        (1.0 - cfg.alignment_penalty_factor * (d / cfg.extreme_distance_px))
                            .max(0.0)
                    } else {
                        report.feedback.push(format!(
                            "Extreme circle position change detected (distance: {d:.1}px)"
                        ));
                        (1.0 - cfg.alignment_penalty_factor
                            * (d / (2.0 * cfg.extreme_distance_px)))
                            .max(0.0)
                    }
                }
            };
            report.has_alignment_issues |= score < 1.0;
            report.scores.push(score);
            previous = Some(center);
        }

        if report.has_alignment_issues {
            report
                .feedback
                .push("Position changes detected in animation".to_string());
        }

        report.avg_alignment = mean(&report.scores).unwrap_or(0.0);
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/alignment.rs"]
mod tests;
