use super::*;

#[test]
fn parses_json_inside_text_content() {
    let data = json!({
        "content": [{
            "type": "text",
            "text": "Here you go:\n{\"positive_feedback\": [\"nice\"], \"improvements\": [], \"suggestions\": [\"brighter\"]}"
        }]
    });
    let r = parse_response(&data).unwrap();
    assert_eq!(r.positive_feedback, vec!["nice"]);
    assert_eq!(r.suggestions, vec!["brighter"]);
    assert!(r.improvements.is_empty());
}

#[test]
fn missing_keys_default_to_empty() {
    let data = json!({ "content": [{ "text": "{\"suggestions\": [\"x\"]}" }] });
    let r = parse_response(&data).unwrap();
    assert_eq!(r.suggestions, vec!["x"]);
    assert!(r.positive_feedback.is_empty());
}

#[test]
fn malformed_responses_are_collaborator_errors() {
    for data in [
        json!({}),
        json!({ "content": [{ "text": "no json here" }] }),
        json!({ "content": [{ "text": "{\"suggestions\": 3}" }] }),
    ] {
        assert!(matches!(
            parse_response(&data),
            Err(VennError::Collaborator(_))
        ));
    }
}

#[test]
fn empty_key_is_rejected() {
    assert!(matches!(
        AnthropicCritique::new("  ", Duration::from_secs(1)),
        Err(VennError::Validation(_))
    ));
}

#[test]
fn unreachable_endpoint_fails_fast() {
    let provider = AnthropicCritique::new("test-key", Duration::from_millis(500))
        .unwrap()
        .with_endpoint("http://127.0.0.1:9/v1/messages");
    let err = provider.critique(&CritiqueRequest::default()).unwrap_err();
    assert_eq!(err.kind(), "collaborator");
}
