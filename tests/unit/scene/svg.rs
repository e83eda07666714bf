use crate::scene::frame::{Circle, RepeatMode};
use crate::scene::parse::parse_frame;

use super::*;

fn sample() -> Frame {
    Frame::new(200.0, 120.0)
        .with_background("#111111")
        .with_circle(Circle::new(100.0, 60.0, 12.5).with_fill("#ff00ff").with_opacity(0.9))
        .with_animation(
            Animate::new("r", 2.0, ["12.5", "40"]).with_repeat(RepeatMode::Indefinite),
        )
        .with_circle(Circle::new(100.0, 60.0, 30.0))
}

#[test]
fn markup_parses_back_to_the_same_frame() {
    let frame = sample();
    let markup = frame.to_svg();
    assert!(markup.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert_eq!(parse_frame(&markup), frame);
}

#[test]
fn invalid_values_survive_serialization() {
    let mut frame = sample();
    frame.circles[1].cx = NumericAttr::Invalid("50%".to_string());
    frame.animations[0].dur = NumericAttr::Invalid("soon".to_string());
    assert_eq!(parse_frame(&frame.to_svg()), frame);
}

#[test]
fn attribute_values_are_escaped() {
    let frame = Frame::new(10.0, 10.0).with_circle(Circle::new(1.0, 1.0, 1.0).with_fill("a\"b<c"));
    let markup = frame.to_svg();
    assert!(markup.contains("fill=\"a&quot;b&lt;c\""));
    assert_eq!(parse_frame(&markup).circles[0].fill.as_deref(), Some("a\"b<c"));
}

#[test]
fn unparseable_frames_serialize_empty() {
    assert_eq!(Frame::unparseable("boom").to_svg(), "");
}
