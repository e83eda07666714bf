use std::collections::BTreeMap;

use super::*;

fn request(pairs: &[(&str, f64)], issues: &[&str]) -> CritiqueRequest {
    CritiqueRequest {
        metrics: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
        issues: issues.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn balanced_metrics_earn_praise() {
    let r = RuleBasedCritique.respond(&request(
        &[("brightness", 0.5), ("contrast", 0.4), ("saturation", 0.5)],
        &[],
    ));
    assert_eq!(r.positive_feedback.len(), 3);
    assert!(r.improvements.is_empty());
    assert!(r.suggestions.is_empty());
}

#[test]
fn breaches_produce_suggestions_and_carry_issues() {
    let r = RuleBasedCritique.respond(&request(
        &[
            ("brightness", 0.05),
            ("contrast", 0.1),
            ("saturation", 0.95),
            ("color_variety", 0.1),
            ("distribution_score", 0.2),
        ],
        &["Low contrast (0.10)"],
    ));
    assert!(r.positive_feedback.is_empty());
    assert_eq!(r.suggestions.len(), 5);
    assert!(r.improvements.iter().any(|i| i == "Low contrast (0.10)"));
    assert!(r.improvements.iter().any(|i| i.contains("too dark")));
}

#[test]
fn output_is_deterministic() {
    let req = request(&[("brightness", 0.9)], &["x"]);
    assert_eq!(RuleBasedCritique.respond(&req), RuleBasedCritique.respond(&req));
}
