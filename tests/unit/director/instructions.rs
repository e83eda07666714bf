use std::collections::BTreeMap;

use crate::critic::{result::ComponentScores, summary::summarize};

use super::*;

fn result(components: ComponentScores, suggestions: &[&str], feedback: &[&str]) -> AnalysisResult {
    AnalysisResult {
        is_valid: true,
        score: 0.1,
        errors: Vec::new(),
        feedback: feedback.iter().map(|s| s.to_string()).collect(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        visual_metrics: BTreeMap::new(),
        components,
        summary: summarize(&[]),
    }
}

#[test]
fn metrics_are_bucketed_by_threshold() {
    let r = result(
        ComponentScores {
            structure: 1.0,
            timing: 0.2,
            consistency: 0.5,
            alignment: 0.9,
            visual: None,
        },
        &[],
        &[],
    );
    let i = Instructions::from_result(&r, 0.3, 0.6);
    assert_eq!(i.priority, vec!["Improve timing (currently 0.20)"]);
    assert_eq!(i.secondary, vec!["Improve consistency (currently 0.50)"]);
    assert!(i.constraints.is_empty());
}

#[test]
fn limit_matches_whole_words_only() {
    let r = result(
        ComponentScores::default(),
        &[],
        &[
            "Limited color variety (0.12)",
            "Radius exceeds limits",
            "Respect the CONSTRAINT: width",
        ],
    );
    let i = Instructions::from_result(&r, 0.0, 0.0);
    assert_eq!(
        i.constraints,
        vec!["Radius exceeds limits", "Respect the CONSTRAINT: width"]
    );
}

#[test]
fn suggestions_and_constraints_are_classified() {
    let healthy = ComponentScores {
        structure: 1.0,
        timing: 1.0,
        consistency: 1.0,
        alignment: 1.0,
        visual: None,
    };
    let r = result(
        healthy,
        &[
            "Critical: keep durations consistent",
            "Smooth out small changes",
            "This is IMPORTANT",
        ],
        &["Radius hits the frame limit", "Looks fine"],
    );
    let i = Instructions::from_result(&r, 0.3, 0.6);
    assert_eq!(
        i.priority,
        vec!["Critical: keep durations consistent", "This is IMPORTANT"]
    );
    assert_eq!(i.secondary, vec!["Smooth out small changes"]);
    assert_eq!(i.constraints, vec!["Radius hits the frame limit"]);
}
