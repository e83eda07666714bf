use crate::scene::frame::{Circle, NumericAttr};

use super::*;

fn at(x: f64, y: f64) -> Frame {
    Frame::new(400.0, 400.0).with_circle(Circle::new(x, y, 10.0))
}

fn analyzer() -> AlignmentAnalyzer {
    AlignmentAnalyzer::new(ScoringConfig::default())
}

#[test]
fn stable_centers_score_full() {
    let r = analyzer().analyze(&[at(50.0, 50.0), at(55.0, 50.0), at(50.0, 50.0)]);
    assert_eq!(r.scores, vec![1.0, 1.0, 1.0]);
    assert!(!r.has_alignment_issues);
    assert!(r.feedback.is_empty());
}

#[test]
fn significant_move_is_penalized() {
    let r = analyzer().analyze(&[at(0.0, 0.0), at(12.0, 0.0)]);
    assert!((r.scores[1] - 0.4).abs() < 1e-12);
    assert_eq!(
        r.feedback,
        vec![
            "Significant circle position change detected (distance: 12.0px)",
            "Position changes detected in animation",
        ]
    );
    assert!(r.has_alignment_issues);
}

#[test]
fn extreme_move_uses_the_wider_scale() {
    let r = analyzer().analyze(&[at(0.0, 0.0), at(150.0, 0.0), at(150.0, 0.0)]);
    assert_eq!(r.scores[1], 0.0);
    assert_eq!(r.scores[2], 1.0);
    assert_eq!(
        r.feedback[0],
        "Extreme circle position change detected (distance: 150.0px)"
    );
    assert_eq!(
        r.feedback
            .iter()
            .filter(|f| *f == "Position changes detected in animation")
            .count(),
        1
    );
}

#[test]
fn missing_circles_keep_the_previous_center() {
    let mut bad = at(0.0, 0.0);
    bad.circles[0].cx = NumericAttr::Invalid("left".to_string());
    let r = analyzer().analyze(&[
        at(50.0, 50.0),
        Frame::new(400.0, 400.0),
        bad,
        at(50.0, 50.0),
    ]);
    assert_eq!(r.scores, vec![1.0, 0.0, 0.0, 1.0]);
    assert_eq!(
        r.errors,
        vec![
            "Missing circle element",
            "Missing or invalid circle position attributes",
        ]
    );
    assert!((r.avg_alignment - 0.5).abs() < 1e-12);
    assert!(!r.has_alignment_issues);
}

#[test]
fn position_summary_follows_every_per_frame_message() {
    let r = analyzer().analyze(&[at(0.0, 0.0), at(12.0, 0.0), at(40.0, 0.0)]);
    assert_eq!(
        r.feedback,
        vec![
            "Significant circle position change detected (distance: 12.0px)",
            "Significant circle position change detected (distance: 28.0px)",
            "Position changes detected in animation",
        ]
    );
}
