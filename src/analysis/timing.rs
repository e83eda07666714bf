use crate::{
    critic::config::ScoringConfig,
    foundation::math::mean,
    scene::frame::{Frame, NumericAttr},
};

/// Cross-frame timing measurements.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingReport {
    /// Per frame: 1.0 when the first animation declares a positive duration, else 0.0.
    pub validity: Vec<f64>,
    /// One entry per positive-duration frame that follows an earlier parsed duration.
    pub consistency: Vec<f64>,
    /// Mean validity, penalized when consistency is poor.
    pub avg_timing: f64,
    pub avg_consistency: f64,
    pub errors: Vec<String>,
    pub feedback: Vec<String>,
}

impl TimingReport {
    pub fn min_consistency(&self) -> f64 {
        self.consistency.iter().copied().fold(1.0, f64::min)
    }
}

#[derive(Clone, Debug)]
pub struct TimingAnalyzer {
    config: ScoringConfig,
}

impl TimingAnalyzer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, frames: &[Frame]) -> TimingReport {
        let cfg = &self.config;
        let mut report = TimingReport::default();
        let mut previous: Option<f64> = None;

        for frame in frames {
            let d = match frame.duration() {
                NumericAttr::Value(d) => d,
                NumericAttr::Missing | NumericAttr::Invalid(_) => {
                    report
                        .errors
                        .push("Missing or invalid duration attribute".to_string());
                    report.validity.push(0.0);
                    continue;
                }
            };

            // Non-positive durations still become the comparison baseline.
            if d <= 0.0 {
                report.errors.push(format!("Invalid duration: {d}s"));
                report.validity.push(0.0);
            } else {
                report.validity.push(1.0);
                if let Some(prev) = previous {
                    let delta = (d - prev).abs();
                    let consistency = if delta > cfg.timing_tolerance_secs {
                        report.feedback.push(format!(
                            "Inconsistent timing detected (difference: {delta:.1}s)"
                        ));
                        (1.0 - cfg.timing_penalty_factor * (delta / 10.0)).max(0.0)
                    } else {
                        1.0
                    };
                    report.consistency.push(consistency);
                }
            }
            previous = Some(d);
        }

        report.avg_consistency = mean(&report.consistency).unwrap_or(1.0);
        let mut avg = mean(&report.validity).unwrap_or(0.0);
        if report.avg_consistency < cfg.consistency_floor {
            avg *= 1.0 - cfg.timing_penalty;
        }
        report.avg_timing = avg;
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/timing.rs"]
mod tests;
