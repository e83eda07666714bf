use crate::foundation::error::{VennError, VennResult};

/// Easing curve applied to animation progress.
///
/// Directive parameters name curves with CSS-style keywords (`"ease-in-out"`), see
/// [`Ease::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "ease-in")]
    InQuad,
    #[serde(rename = "ease-out")]
    OutQuad,
    #[serde(rename = "ease-in-out")]
    InOutQuad,
    #[serde(rename = "ease-in-cubic")]
    InCubic,
    #[serde(rename = "ease-out-cubic")]
    OutCubic,
    #[serde(rename = "ease-in-out-cubic")]
    InOutCubic,
}

impl Ease {
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "ease-in",
            Self::OutQuad => "ease-out",
            Self::InOutQuad => "ease-in-out",
            Self::InCubic => "ease-in-cubic",
            Self::OutCubic => "ease-out-cubic",
            Self::InOutCubic => "ease-in-out-cubic",
        }
    }

    pub fn parse(name: &str) -> VennResult<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| VennError::validation(format!("unknown easing \"{name}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
