use crate::foundation::error::{VennError, VennResult};

/// Component weights for the base score. Must sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Weights {
    pub structure: f64,
    pub timing: f64,
    pub alignment: f64,
    pub visual: f64,
}

impl Weights {
    fn total(&self) -> f64 {
        self.structure + self.timing + self.alignment + self.visual
    }
}

/// Scoring constants.
///
/// These are tuning knobs, not physical constants. The defaults reproduce the established scoring
/// behavior; changing them shifts every score produced by [`crate::critic::CriticEngine`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weights used when visual analysis is off.
    pub weights: Weights,
    /// Weights used when visual analysis is on.
    pub visual_weights: Weights,

    pub timing_tolerance_secs: f64,
    pub timing_penalty_factor: f64,
    /// Mean consistency below this penalizes the timing score.
    pub consistency_floor: f64,
    /// Multiplicative penalty fraction for poor timing.
    pub timing_penalty: f64,

    pub position_tolerance_px: f64,
    pub extreme_distance_px: f64,
    pub alignment_penalty_factor: f64,
    pub alignment_penalty: f64,

    pub visual_penalty: f64,

    pub base_boost: f64,
    pub excellence_boost: f64,
    pub excellence_threshold: f64,

    pub perfect_threshold: f64,
    pub good_threshold: f64,
    pub good_score: f64,
    pub decent_threshold: f64,
    pub decent_score: f64,
    pub acceptable_base: f64,
    pub acceptable_component: f64,
    pub acceptable_score: f64,

    pub min_valid_score: f64,
    pub min_valid_structure: f64,
    /// Any per-frame sub-score below this counts as severe.
    pub severe_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Weights {
                structure: 0.2,
                timing: 0.4,
                alignment: 0.4,
                visual: 0.0,
            },
            visual_weights: Weights {
                structure: 0.2,
                timing: 0.3,
                alignment: 0.3,
                visual: 0.2,
            },
            timing_tolerance_secs: 1.0,
            timing_penalty_factor: 3.0,
            consistency_floor: 0.8,
            timing_penalty: 0.3,
            position_tolerance_px: 10.0,
            extreme_distance_px: 100.0,
            alignment_penalty_factor: 5.0,
            alignment_penalty: 0.25,
            visual_penalty: 0.2,
            base_boost: 0.2,
            excellence_boost: 0.1,
            excellence_threshold: 0.9,
            perfect_threshold: 0.95,
            good_threshold: 0.9,
            good_score: 0.9,
            decent_threshold: 0.8,
            decent_score: 0.85,
            acceptable_base: 0.6,
            acceptable_component: 0.8,
            acceptable_score: 0.8,
            min_valid_score: 0.6,
            min_valid_structure: 0.9,
            severe_threshold: 0.5,
        }
    }
}

impl ScoringConfig {
    pub fn weights_for(&self, visual: bool) -> Weights {
        if visual {
            self.visual_weights
        } else {
            self.weights
        }
    }

    pub fn validate(&self) -> VennResult<()> {
        for (name, w) in [("weights", self.weights), ("visual_weights", self.visual_weights)] {
            let parts = [w.structure, w.timing, w.alignment, w.visual];
            if parts.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(VennError::validation(format!(
                    "{name} must be finite and non-negative"
                )));
            }
            if (w.total() - 1.0).abs() > 1e-6 {
                return Err(VennError::validation(format!(
                    "{name} must sum to 1 (got {})",
                    w.total()
                )));
            }
        }
        if self.weights.visual != 0.0 {
            return Err(VennError::validation(
                "weights.visual must be 0 when visual analysis is off",
            ));
        }

        let fractions = [
            ("consistency_floor", self.consistency_floor),
            ("timing_penalty", self.timing_penalty),
            ("alignment_penalty", self.alignment_penalty),
            ("visual_penalty", self.visual_penalty),
            ("base_boost", self.base_boost),
            ("excellence_boost", self.excellence_boost),
            ("excellence_threshold", self.excellence_threshold),
            ("perfect_threshold", self.perfect_threshold),
            ("good_threshold", self.good_threshold),
            ("good_score", self.good_score),
            ("decent_threshold", self.decent_threshold),
            ("decent_score", self.decent_score),
            ("acceptable_base", self.acceptable_base),
            ("acceptable_component", self.acceptable_component),
            ("acceptable_score", self.acceptable_score),
            ("min_valid_score", self.min_valid_score),
            ("min_valid_structure", self.min_valid_structure),
            ("severe_threshold", self.severe_threshold),
        ];
        for (name, v) in fractions {
            if !(0.0..=1.0).contains(&v) {
                return Err(VennError::validation(format!("{name} must be within [0, 1]")));
            }
        }

        let positives = [
            ("timing_tolerance_secs", self.timing_tolerance_secs),
            ("timing_penalty_factor", self.timing_penalty_factor),
            ("position_tolerance_px", self.position_tolerance_px),
            ("extreme_distance_px", self.extreme_distance_px),
            ("alignment_penalty_factor", self.alignment_penalty_factor),
        ];
        for (name, v) in positives {
            if !(v.is_finite() && v > 0.0) {
                return Err(VennError::validation(format!("{name} must be positive")));
            }
        }
        if self.position_tolerance_px > self.extreme_distance_px {
            return Err(VennError::validation(
                "position_tolerance_px must not exceed extreme_distance_px",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/critic/config.rs"]
mod tests;
