use super::WorkflowDefinition;
use serde_json::json;

#[test]
fn identifier_prefers_id_over_key() {
    let definition: WorkflowDefinition =
        serde_json::from_value(json!({"id": "greet", "key": "greet-key", "states": []}))
            .expect("must decode");
    assert_eq!(definition.identifier(), Some("greet"));
}

#[test]
fn identifier_falls_back_to_key_when_id_is_blank() {
    let definition: WorkflowDefinition =
        serde_json::from_value(json!({"id": "  ", "key": "greet-key"})).expect("must decode");
    assert_eq!(definition.identifier(), Some("greet-key"));
}

#[test]
fn unknown_fields_land_in_flow() {
    let definition: WorkflowDefinition = serde_json::from_value(json!({
        "id": "greet",
        "specVersion": "0.8",
        "start": "Hello",
        "states": [{"name": "Hello", "type": "inject", "end": true}]
    }))
    .expect("must decode");

    assert_eq!(definition.spec_version.as_deref(), Some("0.8"));
    assert_eq!(definition.flow.get("start"), Some(&json!("Hello")));
    assert!(definition.flow.contains_key("states"));
    assert!(!definition.flow.contains_key("id"));
    assert!(!definition.flow.contains_key("specVersion"));
}
