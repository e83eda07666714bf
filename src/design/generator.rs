use std::f64::consts::PI;

use crate::{
    animation::ease::Ease,
    design::directive::Directive,
    foundation::{
        core::Rgb8,
        error::{VennError, VennResult},
    },
    scene::frame::{Animate, Circle, Frame, FrameSequence, RepeatMode},
};

const MIN_RADIUS: f64 = 0.1;
const MAX_STEPS: usize = 10_000;
const BACKGROUND: &str = "#111111";

/// Produces a frame sequence from a directive.
///
/// Implementations must be deterministic for identical directives and must reject invalid
/// geometry with an error instead of substituting defaults.
pub trait Generator {
    fn generate(&self, directive: &Directive) -> VennResult<FrameSequence>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// All circles share the canvas center.
    Concentric,
    /// The primary circle holds the canvas center; the rest sit on a ring around it and overlap.
    Venn,
}

impl Layout {
    pub fn parse(name: &str) -> VennResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "concentric" => Ok(Self::Concentric),
            "venn" => Ok(Self::Venn),
            other => Err(VennError::validation(format!("unknown layout \"{other}\""))),
        }
    }
}

/// Circle animation generator.
#[derive(Clone, Debug)]
pub struct CircleGenerator {
    palette: Vec<Rgb8>,
}

impl Default for CircleGenerator {
    fn default() -> Self {
        Self {
            palette: vec![
                Rgb8::new(0x9c, 0x27, 0xb0),
                Rgb8::new(0xff, 0xd7, 0x00),
                Rgb8::new(0xff, 0x88, 0x00),
                Rgb8::new(0x00, 0xff, 0x88),
            ],
        }
    }
}

impl CircleGenerator {
    pub fn with_palette(palette: Vec<Rgb8>) -> VennResult<Self> {
        if palette.is_empty() {
            return Err(VennError::validation("palette must not be empty"));
        }
        Ok(Self { palette })
    }

    /// One centered circle whose radius is `radius * progress`.
    pub fn generate_frame(
        &self,
        width: f64,
        height: f64,
        radius: f64,
        progress: f64,
        include_animation: bool,
    ) -> VennResult<Frame> {
        validate_canvas(width, height)?;
        validate_radius(radius, width, height)?;
        validate_progress(progress)?;

        let current = (radius * progress).max(MIN_RADIUS);
        let frame =
            Frame::new(width, height).with_circle(Circle::new(width / 2.0, height / 2.0, current));
        if !include_animation {
            return Ok(frame);
        }
        Ok(frame.with_animation(
            Animate::new("r", 1.0, [0.0, radius]).with_repeat(RepeatMode::Count(1.0)),
        ))
    }

    /// `steps` animated frames growing a centered circle from 0 to `radius`.
    pub fn create_animation(
        &self,
        width: f64,
        height: f64,
        radius: f64,
        duration: f64,
        steps: usize,
    ) -> VennResult<FrameSequence> {
        validate_duration(duration)?;
        validate_steps(steps)?;

        (0..steps)
            .map(|i| {
                let progress = i as f64 / (steps - 1) as f64;
                let mut frame = self.generate_frame(width, height, radius, progress, true)?;
                for a in &mut frame.animations {
                    a.dur = duration.into();
                }
                Ok(frame)
            })
            .collect()
    }
}

impl Generator for CircleGenerator {
    #[tracing::instrument(skip_all, fields(goal = %directive.goal))]
    fn generate(&self, directive: &Directive) -> VennResult<FrameSequence> {
        let plan = FramePlan::from_directive(directive)?;
        tracing::debug!(steps = plan.steps, circles = plan.circle_count, "generating frames");

        let frames = (0..plan.steps)
            .map(|i| {
                let t = i as f64 / (plan.steps - 1) as f64;
                self.plan_frame(&plan, t)
            })
            .collect();
        Ok(frames)
    }
}

impl CircleGenerator {
    fn plan_frame(&self, plan: &FramePlan, t: f64) -> Frame {
        let eased = plan.ease.apply(t);
        let primary = (plan.start_radius + (plan.end_radius - plan.start_radius) * eased)
            .max(MIN_RADIUS);
        let (cx, cy) = (plan.width / 2.0, plan.height / 2.0);
        let count = plan.circle_count;

        let mut frame = Frame::new(plan.width, plan.height).with_background(BACKGROUND);
        for k in 0..count {
            let scale = match plan.layout {
                Layout::Concentric => (count - k) as f64 / count as f64,
                Layout::Venn => 1.0,
            };
            let (x, y) = match plan.layout {
                Layout::Venn if k > 0 => {
                    let angle = 2.0 * PI * (k - 1) as f64 / (count - 1) as f64 - PI / 2.0;
                    let offset = plan.end_radius * 0.5;
                    (cx + offset * angle.cos(), cy + offset * angle.sin())
                }
                _ => (cx, cy),
            };
            let fill = if k == 0 {
                plan.color
            } else {
                self.palette[(k - 1) % self.palette.len()]
            };
            let r = (primary * scale).max(MIN_RADIUS);
            let r_end = (plan.end_radius * scale).max(MIN_RADIUS);

            frame = frame
                .with_circle(
                    Circle::new(x, y, r)
                        .with_fill(fill.to_hex())
                        .with_opacity(if k == 0 { 1.0 } else { 0.8 }),
                )
                .with_animation(
                    Animate::new("r", plan.duration, [r, r_end])
                        .with_repeat(RepeatMode::Count(1.0)),
                );
        }
        frame
    }
}

/// Validated, typed view of a directive.
#[derive(Clone, Debug)]
struct FramePlan {
    steps: usize,
    start_radius: f64,
    end_radius: f64,
    duration: f64,
    width: f64,
    height: f64,
    circle_count: usize,
    ease: Ease,
    color: Rgb8,
    layout: Layout,
}

impl FramePlan {
    fn from_directive(d: &Directive) -> VennResult<Self> {
        let width = d.constraint("width")?;
        let height = d.constraint("height")?;
        validate_canvas(width, height)?;

        let steps = whole_number(d.constraint("frames")?, "frames")?;
        validate_steps(steps)?;

        let duration = d.constraint("duration")?;
        validate_duration(duration)?;

        let end_radius = d.constraint("end_radius")?;
        validate_radius(end_radius, width, height)?;
        let start_radius = d.constraint("start_radius")?;
        if start_radius < 0.0 || start_radius > width.min(height) / 2.0 {
            return Err(VennError::validation(
                "Start radius must be non-negative and fit within frame",
            ));
        }

        let circle_count = match d.constraints.get("circle_count") {
            Some(_) => whole_number(d.constraint("circle_count")?, "circle_count")?,
            None => 1,
        };
        if circle_count == 0 {
            return Err(VennError::validation("circle_count must be at least 1"));
        }

        let ease = Ease::parse(d.parameter("easing")?)?;
        let color = Rgb8::parse_hex(d.parameter("color")?)
            .map_err(|e| VennError::validation(format!("directive color: {e}")))?;
        let layout = match d.parameters.get("layout") {
            Some(name) => Layout::parse(name)?,
            None => Layout::Concentric,
        };

        Ok(Self {
            steps,
            start_radius,
            end_radius,
            duration,
            width,
            height,
            circle_count,
            ease,
            color,
            layout,
        })
    }
}

fn whole_number(v: f64, name: &str) -> VennResult<usize> {
    if v < 0.0 || v.fract() != 0.0 || v > MAX_STEPS as f64 {
        return Err(VennError::validation(format!(
            "{name} must be a whole number between 0 and {MAX_STEPS}"
        )));
    }
    Ok(v as usize)
}

fn validate_canvas(width: f64, height: f64) -> VennResult<()> {
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(VennError::validation("Width and height must be positive"));
    }
    Ok(())
}

fn validate_radius(radius: f64, width: f64, height: f64) -> VennResult<()> {
    if !(radius > 0.0) || radius > width.min(height) / 2.0 {
        return Err(VennError::validation(
            "Circle radius must be positive and fit within frame",
        ));
    }
    Ok(())
}

fn validate_progress(progress: f64) -> VennResult<()> {
    if !(0.0..=1.0).contains(&progress) {
        return Err(VennError::validation("Animation step must be between 0 and 1"));
    }
    Ok(())
}

fn validate_duration(duration: f64) -> VennResult<()> {
    if !(duration > 0.0) || !duration.is_finite() {
        return Err(VennError::validation("Duration must be positive"));
    }
    Ok(())
}

fn validate_steps(steps: usize) -> VennResult<()> {
    if steps < 2 {
        return Err(VennError::validation("Animation must have at least 2 steps"));
    }
    if steps > MAX_STEPS {
        return Err(VennError::validation(format!(
            "Animation must have at most {MAX_STEPS} steps"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/design/generator.rs"]
mod tests;
