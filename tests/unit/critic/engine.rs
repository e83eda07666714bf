use crate::{
    analysis::VisualAnalyzer,
    scene::frame::{Animate, Circle, NumericAttr},
};

use super::*;

fn frame(dur: f64, cx: f64, cy: f64, r: f64) -> Frame {
    Frame::new(100.0, 100.0)
        .with_circle(Circle::new(cx, cy, r).with_fill("#2196f3"))
        .with_animation(Animate::new("r", dur, [r, r * 2.0]))
}

fn base() -> Vec<Frame> {
    vec![
        frame(1.0, 50.0, 50.0, 10.0),
        frame(1.0, 50.0, 50.0, 20.0),
        frame(1.0, 50.0, 50.0, 40.0),
    ]
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn empty_sequence_is_invalid() {
    let r = CriticEngine::default().analyze(&[]);
    assert!(!r.is_valid);
    assert_eq!(r.score, 0.0);
    assert_eq!(r.errors, vec!["No frames provided"]);
    assert_eq!(r.feedback, vec!["Animation must contain at least one frame"]);
}

#[test]
fn all_invalid_frames_score_zero() {
    let r = CriticEngine::default().analyze(&[Frame::unparseable("x"), Frame::new(0.0, 0.0)]);
    assert!(!r.is_valid);
    assert_eq!(r.score, 0.0);
    assert_eq!(r.feedback, vec!["Animation contains invalid SVG frames"]);
    assert!(r.errors.iter().all(|e| e.starts_with("Frame ")));
    assert!(r.errors.iter().any(|e| e.starts_with("Frame 1: ")));
}

#[test]
fn clean_sequence_is_perfect() {
    let r = CriticEngine::default().analyze(&base());
    assert!(r.is_valid, "{:?}", r.errors);
    assert_eq!(r.score, 1.0);
    assert_eq!(
        r.feedback.last().map(String::as_str),
        Some("Animation demonstrates excellent quality and smooth transitions")
    );
    assert_eq!(r.components.structure, 1.0);
    assert!(r.visual_metrics.is_empty());
}

#[test]
fn duration_outlier_lowers_the_score() {
    let mut frames = base();
    frames[1] = frame(10.0, 50.0, 50.0, 20.0);
    let r = CriticEngine::default().analyze(&frames);
    assert!(near(r.score, 0.49), "{}", r.score);
    assert!(
        r.feedback
            .iter()
            .any(|f| f == "Inconsistent timing detected (difference: 9.0s)")
    );
    assert!(r.suggestions.iter().any(|s| s.starts_with("Critical:")));
}

#[test]
fn center_jump_lowers_the_score_differently() {
    let mut frames = base();
    frames[1] = frame(1.0, 250.0, 250.0, 20.0);
    let jump = CriticEngine::default().analyze(&frames);
    assert!(near(jump.score, 0.525), "{}", jump.score);
    assert!(jump.feedback.iter().any(|f| f.starts_with("Extreme circle position change")));
    assert!(jump.suggestions.iter().any(|s| s.starts_with("Significant:")));

    let mut frames = base();
    frames[1] = frame(10.0, 50.0, 50.0, 20.0);
    let outlier = CriticEngine::default().analyze(&frames);
    assert!(jump.score < 1.0 && outlier.score < 1.0);
    assert!(!near(jump.score, outlier.score));
}

#[test]
fn moderate_jump_and_mild_timing_drift() {
    let mut frames = base();
    frames[1] = frame(1.0, 90.0, 90.0, 20.0);
    assert!(near(CriticEngine::default().analyze(&frames).score, 0.525));

    let mut frames = base();
    frames[1] = frame(3.0, 50.0, 50.0, 20.0);
    let r = CriticEngine::default().analyze(&frames);
    // consistency 0.4 twice; timing 0.7 with a severe penalty
    assert!(near(r.score, 0.49), "{}", r.score);
}

#[test]
fn good_and_decent_tiers() {
    let mut ten: Vec<Frame> = (0..10).map(|_| frame(1.0, 50.0, 50.0, 10.0)).collect();
    ten[3].width = NumericAttr::Missing;
    let r = CriticEngine::default().analyze(&ten);
    assert!(!r.is_valid);
    assert_eq!(r.errors, vec!["Frame 3: Missing width attribute"]);
    assert_eq!(r.score, 0.9);

    let mut five: Vec<Frame> = (0..5).map(|_| frame(1.0, 50.0, 50.0, 10.0)).collect();
    five[0].height = NumericAttr::Invalid("tall".to_string());
    assert_eq!(CriticEngine::default().analyze(&five).score, 0.85);
}

#[test]
fn identical_input_gives_identical_output() {
    let mut frames = base();
    frames[2] = frame(2.5, 70.0, 50.0, 40.0);
    let engine = CriticEngine::default();
    assert_eq!(engine.analyze(&frames), engine.analyze(&frames));
}

#[test]
fn visual_analysis_adds_metrics_and_a_component() {
    let engine = CriticEngine::default().with_visual(VisualAnalyzer::new().without_raster());
    let r = engine.analyze(&base());
    assert!(r.components.visual.is_some());
    for key in [
        "brightness",
        "contrast",
        "saturation",
        "color_variety",
        "distribution_score",
        "visual_score",
    ] {
        assert!(r.visual_metrics.contains_key(key), "{key}");
    }
    assert!(r.score <= 1.0 && r.score >= 0.0);
    assert!(r.metrics().contains_key("visual"));
}

#[test]
fn metrics_expose_components() {
    let r = CriticEngine::default().analyze(&base());
    let m = r.metrics();
    assert_eq!(m["score"], 1.0);
    assert_eq!(m["alignment"], 1.0);
    assert!(!m.contains_key("visual"));
}
