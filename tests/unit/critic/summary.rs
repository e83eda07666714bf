use crate::scene::{
    frame::{Animate, Circle},
    parse::parse_frame,
};

use super::*;

fn frame(values: &[&str]) -> Frame {
    Frame::new(100.0, 100.0)
        .with_circle(Circle::new(50.0, 50.0, 10.0))
        .with_animation(Animate::new("r", 1.0, values.iter().copied()))
}

#[test]
fn evenly_spaced_values_have_no_timing_error() {
    let t = timing_profile(&frame(&["0", "10", "20", "30"]));
    assert!(t.has_timing);
    assert_eq!(t.duration, 1.0);
    assert_eq!(t.timing_error, 0.0);
}

#[test]
fn uneven_steps_raise_the_error() {
    // steps 5, 25; expected 15; mean deviation 10
    let t = timing_profile(&frame(&["0", "5", "30"]));
    assert!((t.timing_error - 10.0 / 15.0).abs() < 1e-12);
}

#[test]
fn timing_profile_edge_cases() {
    assert_eq!(timing_profile(&frame(&["5"])).timing_error, 0.8);
    assert_eq!(timing_profile(&frame(&["a", "b"])).timing_error, 0.5);
    assert_eq!(timing_profile(&frame(&["7", "7"])).timing_error, 0.0);
    assert_eq!(timing_profile(&frame(&["0", "9", "0"])).timing_error, 0.5);

    let still = Frame::new(100.0, 100.0).with_circle(Circle::new(50.0, 50.0, 10.0));
    let t = timing_profile(&still);
    assert!(!t.has_timing);
    assert_eq!(t.timing_error, 1.0);
}

#[test]
fn circle_profile_reports_attribute_problems() {
    let markup = r#"<svg width="100" height="100"><circle cx="-3" r="big"/></svg>"#;
    let p = circle_profile(&parse_frame(markup));
    assert!(p.has_circle);
    assert_eq!(p.attribute_errors, vec!["Missing cy attribute", "Invalid r value"]);
    assert_eq!(p.alignment_errors, vec!["Negative cx value"]);
}

#[test]
fn off_center_and_tiny_circles() {
    let f = Frame::new(100.0, 100.0).with_circle(Circle::new(60.0, 50.0, 0.1));
    let p = circle_profile(&f);
    assert_eq!(
        p.alignment_errors,
        vec!["radius too small", "Circle not centered in frame"]
    );
}

#[test]
fn summarize_combines_circle_and_timing() {
    let good = frame(&["0", "10"]);
    let s = summarize(&[good.clone(), good.clone()]);
    assert!(s.alignment_errors.is_empty());
    assert_eq!(s.timing_mismatch, 0.0);
    assert_eq!(s.overall_error, 0.0);

    let tiny = Frame::new(100.0, 100.0)
        .with_circle(Circle::new(50.0, 50.0, 0.1))
        .with_animation(Animate::new("r", 1.0, ["a", "b"]));
    let s = summarize(&[tiny, good]);
    assert!(s.has_error("radius too small"));
    assert_eq!(s.timing_mismatch, 0.5);
    assert_eq!(s.overall_error, 0.75);
}

#[test]
fn summarize_without_frames_or_timing() {
    let s = summarize(&[]);
    assert_eq!(s.alignment_errors, vec!["No frames provided"]);
    assert_eq!(s.overall_error, 1.0);

    let still = Frame::new(100.0, 100.0).with_circle(Circle::new(50.0, 50.0, 10.0));
    let s = summarize(&[still]);
    assert_eq!(s.timing_mismatch, 1.0);
    assert_eq!(s.overall_error, 0.5);
}

#[test]
fn unparseable_markup() {
    let f = parse_frame("<svg");
    assert_eq!(circle_profile(&f).alignment_errors, vec!["Invalid SVG syntax"]);
    assert!(!timing_profile(&f).has_timing);
}
