use super::*;

fn feedback(errors: &[&str], mismatch: f64) -> FeedbackSummary {
    FeedbackSummary {
        alignment_errors: errors.iter().map(|s| s.to_string()).collect(),
        timing_mismatch: mismatch,
        overall_error: 0.0,
    }
}

#[test]
fn initial_directive_uses_defaults() {
    let mut director = DirectorAgent::new();
    let d = director.act(DirectorInput::Initial).unwrap();
    assert_eq!(d, Directive::default());
    assert!(matches!(
        director.log().entries(),
        [DirectorEntry::InitialPrompt { .. }]
    ));
}

#[test]
fn small_radius_and_timing_mismatch_adjust_the_directive() {
    let mut director = DirectorAgent::new();
    let first = director.initial_directive();
    let next = director
        .act(DirectorInput::Feedback {
            summary: feedback(&["radius too small"], 0.5),
            instructions: Instructions::default(),
        })
        .unwrap();
    assert_eq!(next.constraint("start_radius").unwrap(), 5.0);
    assert_eq!(next.parameter("easing").unwrap(), "linear");
    assert_eq!(first.constraint("start_radius").unwrap(), 0.0);

    let again = director
        .refine(&feedback(&["radius too small"], 0.0), &Instructions::default())
        .unwrap();
    assert_eq!(again.constraint("start_radius").unwrap(), 10.0);
    assert_eq!(director.log().len(), 3);
}

#[test]
fn refine_without_history_starts_from_defaults() {
    let mut director = DirectorAgent::new();
    let d = director
        .refine(&feedback(&[], 0.05), &Instructions::default())
        .unwrap();
    assert_eq!(d, Directive::default());
    assert_eq!(director.log().len(), 2);
}

#[test]
fn out_of_range_feedback_is_rejected() {
    let mut director = DirectorAgent::new();
    for bad in [f64::NAN, -0.1, 1.5] {
        let input = DirectorInput::Feedback {
            summary: feedback(&[], bad),
            instructions: Instructions::default(),
        };
        assert!(matches!(
            director.validate_input(&input),
            Err(VennError::Validation(_))
        ));
        assert!(director.act(input).is_err());
    }
    assert!(director.log().is_empty());
}

#[test]
fn start_radius_never_passes_end_radius() {
    let mut director =
        DirectorAgent::with_defaults(Directive::default().with_constraint("start_radius", 98.0));
    director.initial_directive();
    let d = director
        .refine(&feedback(&["radius too small"], 0.0), &Instructions::default())
        .unwrap();
    assert_eq!(d.constraint("start_radius").unwrap(), 100.0);
}

#[test]
fn restore_sets_the_current_directive() {
    let mut director = DirectorAgent::new();
    director.initial_directive();
    let d = Directive::default().with_parameter("easing", "ease-out");
    director.restore(d.clone());
    assert_eq!(director.current(), Some(&d));
}

#[test]
fn instructions_ride_along_in_parameters() {
    let mut director = DirectorAgent::new();
    director.initial_directive();
    let instructions = Instructions {
        priority: vec!["Improve timing (currently 0.20)".to_string(), "Critical: fix".to_string()],
        secondary: Vec::new(),
        constraints: vec!["Radius hits the frame limit".to_string()],
    };
    let d = director.refine(&feedback(&[], 0.0), &instructions).unwrap();
    assert_eq!(
        d.parameter(PRIORITY_KEY).unwrap(),
        "Improve timing (currently 0.20); Critical: fix"
    );
    assert_eq!(d.parameter(CONSTRAINTS_KEY).unwrap(), "Radius hits the frame limit");
    assert!(d.parameter(SECONDARY_KEY).is_err());
    assert!(matches!(
        director.log().last(),
        Some(DirectorEntry::RefinedPrompt { instructions: logged, .. }) if *logged == instructions
    ));

    let cleared = director
        .refine(&feedback(&[], 0.0), &Instructions::default())
        .unwrap();
    assert!(cleared.parameter(PRIORITY_KEY).is_err());
    assert!(cleared.parameter(CONSTRAINTS_KEY).is_err());
    assert_eq!(cleared, Directive::default());
}
