use std::{collections::BTreeSet, sync::Arc};

use crate::{
    analysis::raster::{MAX_SAMPLE_DIM, rasterize_frame},
    critique::{CritiqueProvider, CritiqueRequest, CritiqueResponse, critique_with_fallback},
    foundation::{
        core::Rgb8,
        math::{clamp01, mean, std_dev},
    },
    scene::frame::Frame,
};

const VARIETY_BITS: u8 = 3;
const VARIETY_TARGET: f64 = 16.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualMetrics {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub color_variety: f64,
    pub distribution_score: f64,
}

impl VisualMetrics {
    pub fn as_pairs(&self) -> [(&'static str, f64); 5] {
        [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
            ("color_variety", self.color_variety),
            ("distribution_score", self.distribution_score),
        ]
    }
}

/// Where the color samples came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSource {
    Raster,
    DeclaredFills,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualReport {
    pub metrics: VisualMetrics,
    pub score: f64,
    pub issues: Vec<String>,
    pub source: SampleSource,
    pub critique: CritiqueResponse,
}

/// Color and layout quality of the final frame.
#[derive(Clone)]
pub struct VisualAnalyzer {
    rasterize: bool,
    provider: Option<Arc<dyn CritiqueProvider>>,
}

impl std::fmt::Debug for VisualAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualAnalyzer")
            .field("rasterize", &self.rasterize)
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .finish()
    }
}

impl Default for VisualAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualAnalyzer {
    pub fn new() -> Self {
        Self {
            rasterize: true,
            provider: None,
        }
    }

    /// Sample declared fills only.
    pub fn without_raster(mut self) -> Self {
        self.rasterize = false;
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn CritiqueProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[tracing::instrument(skip_all, fields(frames = frames.len()))]
    pub fn analyze(&self, frames: &[Frame]) -> VisualReport {
        let Some(last) = frames.last() else {
            return self.report(VisualMetrics::default(), SampleSource::DeclaredFills);
        };

        let (samples, source) = match self.raster_samples(last) {
            Some(s) if !s.is_empty() => (s, SampleSource::Raster),
            _ => (declared_samples(last), SampleSource::DeclaredFills),
        };

        let metrics = VisualMetrics {
            distribution_score: distribution_score(last),
            ..color_metrics(&samples)
        };
        self.report(metrics, source)
    }

    fn raster_samples(&self, frame: &Frame) -> Option<Vec<Rgb8>> {
        if !self.rasterize {
            return None;
        }
        match rasterize_frame(frame, MAX_SAMPLE_DIM) {
            Ok(r) => Some(r.samples()),
            Err(e) => {
                tracing::debug!(error = %e, "rasterization failed; sampling declared fills");
                None
            }
        }
    }

    fn report(&self, metrics: VisualMetrics, source: SampleSource) -> VisualReport {
        let issues = issues(&metrics);
        let request = CritiqueRequest {
            metrics: metrics
                .as_pairs()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            issues: issues.clone(),
        };
        let critique = critique_with_fallback(self.provider.as_deref(), &request);
        VisualReport {
            score: score(&metrics),
            metrics,
            issues,
            source,
            critique,
        }
    }
}

/// Circle fills scaled by opacity, plus the background color.
pub fn declared_samples(frame: &Frame) -> Vec<Rgb8> {
    let background = frame
        .background
        .as_deref()
        .and_then(|b| Rgb8::parse_hex(b).ok());
    frame
        .circles
        .iter()
        .filter_map(|c| {
            let rgb = c.fill_rgb()?;
            Some(rgb.scaled(c.opacity.unwrap_or(1.0)))
        })
        .chain(background)
        .collect()
}

pub fn color_metrics(samples: &[Rgb8]) -> VisualMetrics {
    let lumas: Vec<f64> = samples.iter().map(|c| c.luma()).collect();
    let sats: Vec<f64> = samples.iter().map(|c| c.saturation()).collect();
    let distinct: BTreeSet<Rgb8> = samples.iter().map(|c| c.quantized(VARIETY_BITS)).collect();

    VisualMetrics {
        brightness: mean(&lumas).unwrap_or(0.0),
        contrast: std_dev(&lumas).unwrap_or(0.0),
        saturation: mean(&sats).unwrap_or(0.0),
        color_variety: (distinct.len() as f64 / VARIETY_TARGET).min(1.0),
        distribution_score: 1.0,
    }
}

/// `1 - CV` of circle-center distances from their centroid.
///
/// Fewer than two circles, or circles that all share one center, count as perfectly distributed.
pub fn distribution_score(frame: &Frame) -> f64 {
    let centers = frame.centers();
    if centers.len() < 2 {
        return 1.0;
    }
    let n = centers.len() as f64;
    let cx = centers.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = centers.iter().map(|p| p.y).sum::<f64>() / n;
    let centroid = crate::foundation::core::Point::new(cx, cy);
    let dists: Vec<f64> = centers.iter().map(|p| p.distance(centroid)).collect();

    let (Some(m), Some(sd)) = (mean(&dists), std_dev(&dists)) else {
        return 1.0;
    };
    if m <= f64::EPSILON {
        return 1.0;
    }
    clamp01(1.0 - sd / m)
}

pub fn issues(m: &VisualMetrics) -> Vec<String> {
    let mut out = Vec::new();
    if (m.brightness - 0.5).abs() > 0.25 {
        let side = if m.brightness < 0.5 { "dark" } else { "bright" };
        out.push(format!(
            "Image is too {side} (brightness {:.2})",
            m.brightness
        ));
    }
    if m.contrast < 0.3 {
        out.push(format!("Low contrast ({:.2})", m.contrast));
    }
    if m.saturation < 0.3 {
        out.push(format!("Colors are undersaturated ({:.2})", m.saturation));
    } else if m.saturation > 0.8 {
        out.push(format!("Colors are oversaturated ({:.2})", m.saturation));
    }
    if m.color_variety < 0.3 {
        out.push(format!("Limited color variety ({:.2})", m.color_variety));
    }
    if m.distribution_score < 0.5 {
        out.push(format!(
            "Uneven circle distribution ({:.2})",
            m.distribution_score
        ));
    }
    out
}

pub fn score(m: &VisualMetrics) -> f64 {
    clamp01(
        0.3 * (1.0 - 2.0 * (m.brightness - 0.5).abs())
            + 0.3 * (m.contrast / 0.3).min(1.0)
            + 0.2 * (1.0 - 2.0 * (m.saturation - 0.5).abs())
            + 0.2 * m.distribution_score,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/visual.rs"]
mod tests;
