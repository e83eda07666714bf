use super::*;

#[test]
fn numbers_accept_px_suffix() {
    assert_eq!(NumericAttr::parse_number(Some("100px")), NumericAttr::Value(100.0));
    assert_eq!(NumericAttr::parse_number(Some(" 12.5 ")), NumericAttr::Value(12.5));
    assert_eq!(NumericAttr::parse_number(None), NumericAttr::Missing);
    assert_eq!(
        NumericAttr::parse_number(Some("50%")),
        NumericAttr::Invalid("50%".to_string())
    );
    assert_eq!(
        NumericAttr::parse_number(Some("inf")),
        NumericAttr::Invalid("inf".to_string())
    );
}

#[test]
fn clock_values_convert_to_seconds() {
    assert_eq!(NumericAttr::parse_clock(Some("1s")), NumericAttr::Value(1.0));
    assert_eq!(NumericAttr::parse_clock(Some("250ms")), NumericAttr::Value(0.25));
    assert_eq!(NumericAttr::parse_clock(Some("0.5min")), NumericAttr::Value(30.0));
    assert_eq!(NumericAttr::parse_clock(Some("2")), NumericAttr::Value(2.0));
    assert!(NumericAttr::parse_clock(Some("soon")).value().is_none());
}

#[test]
fn repeat_mode_parses_count_and_indefinite() {
    assert_eq!(RepeatMode::parse("indefinite"), Some(RepeatMode::Indefinite));
    assert_eq!(RepeatMode::parse("3"), Some(RepeatMode::Count(3.0)));
    assert_eq!(RepeatMode::parse("0"), None);
    assert_eq!(RepeatMode::Count(1.0).as_attr(), "1");
}

#[test]
fn builder_targets_last_circle() {
    let frame = Frame::new(100.0, 100.0)
        .with_circle(Circle::new(50.0, 50.0, 10.0))
        .with_animation(Animate::new("r", 1.0, [0, 40]))
        .with_circle(Circle::new(50.0, 50.0, 20.0))
        .with_animation(Animate::new("r", 2.0, [0, 40]));

    assert_eq!(frame.animations[0].target, Some(0));
    assert_eq!(frame.animations[1].target, Some(1));
    assert_eq!(frame.duration(), NumericAttr::Value(1.0));
    assert_eq!(frame.centers().len(), 2);
}

#[test]
fn duration_missing_without_animation() {
    let frame = Frame::new(10.0, 10.0).with_circle(Circle::new(5.0, 5.0, 1.0));
    assert!(frame.duration().is_missing());
}

#[test]
fn canvas_size_requires_positive_sides() {
    assert_eq!(Frame::new(10.0, 20.0).canvas_size(), Some((10.0, 20.0)));
    assert_eq!(Frame::new(0.0, 20.0).canvas_size(), None);
    assert_eq!(Frame::unparseable("boom").canvas_size(), None);
}

#[test]
fn numeric_values_reject_mixed_lists() {
    let a = Animate::new("r", 1.0, ["0", "10", "20"]);
    assert_eq!(a.numeric_values(), Some(vec![0.0, 10.0, 20.0]));
    let b = Animate::new("fill", 1.0, ["#fff", "#000"]);
    assert_eq!(b.numeric_values(), None);
}

#[test]
fn fill_rgb_ignores_paint_servers() {
    let c = Circle::new(0.0, 0.0, 1.0).with_fill("url(#grad)");
    assert_eq!(c.fill_rgb(), None);
    let c = Circle::new(0.0, 0.0, 1.0).with_fill("#ff0000");
    assert_eq!(c.fill_rgb(), Some(Rgb8::new(255, 0, 0)));
}
