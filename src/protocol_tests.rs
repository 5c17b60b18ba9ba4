use super::*;

#[test]
fn test_command_request_serialize() {
    let req = CommandRequest {
        id: 1,
        method: "browsingContext.navigate".to_string(),
        params: serde_json::json!({"context": "ctx", "url": "https://example.com"}),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["method"], "browsingContext.navigate");
    assert_eq!(json["params"]["url"], "https://example.com");
}

#[test]
fn test_classify_command_success() {
    let msg = classify(r#"{ "id": 1, "result": { "value": "command result value" } }"#);
    match msg {
        InboundMessage::CommandSuccess { id, result } => {
            assert_eq!(id, 1);
            assert_eq!(result["value"], "command result value");
        }
        other => panic!("expected CommandSuccess, got {other:?}"),
    }
}

#[test]
fn test_classify_command_error() {
    let msg = classify(r#"{ "id": 1, "error": "unknown command", "message": "m" }"#);
    match msg {
        InboundMessage::CommandError(err) => {
            assert_eq!(err.id, Some(1));
            assert_eq!(err.error, "unknown command");
            assert_eq!(err.message, "m");
        }
        other => panic!("expected CommandError, got {other:?}"),
    }
}

#[test]
fn test_classify_command_error_null_id() {
    let msg = classify(r#"{ "id": null, "error": "unknown command", "message": "m" }"#);
    match msg {
        InboundMessage::CommandError(err) => assert_eq!(err.id, None),
        other => panic!("expected CommandError, got {other:?}"),
    }
}

#[test]
fn test_classify_command_error_missing_id() {
    let msg = classify(r#"{ "error": "unknown command", "message": "m" }"#);
    match msg {
        InboundMessage::CommandError(err) => assert_eq!(err.id, None),
        other => panic!("expected CommandError, got {other:?}"),
    }
}

#[test]
fn test_classify_event() {
    let msg = classify(r#"{ "method": "module.event", "params": { "paramName": "paramValue" } }"#);
    match msg {
        InboundMessage::Event { method, params } => {
            assert_eq!(method, "module.event");
            assert_eq!(params["paramName"], "paramValue");
        }
        other => panic!("expected Event, got {other:?}"),
    }
}

#[test]
fn test_classify_event_with_id_is_not_event() {
    // A message carrying an id is a response, never an event.
    let msg = classify(r#"{ "id": 4, "method": "module.event", "params": {} }"#);
    assert!(matches!(msg, InboundMessage::Unrecognized(_)));
}

#[test]
fn test_classify_unconforming_object() {
    let text = r#"{ "someProperty": "someValue", "params": { "thisMessage": "matches no protocol message" } }"#;
    match classify(text) {
        InboundMessage::Unrecognized(raw) => assert_eq!(raw, text),
        other => panic!("expected Unrecognized, got {other:?}"),
    }
}

#[test]
fn test_classify_invalid_json() {
    let text = "this is not json";
    match classify(text) {
        InboundMessage::Unrecognized(raw) => assert_eq!(raw, text),
        other => panic!("expected Unrecognized, got {other:?}"),
    }
}

#[test]
fn test_classify_event_without_params_is_unrecognized() {
    let msg = classify(r#"{ "method": "module.event" }"#);
    assert!(matches!(msg, InboundMessage::Unrecognized(_)));
}

#[test]
fn test_error_response_deserialize() {
    let err: ErrorResponse =
        serde_json::from_str(r#"{"id": 7, "error": "invalid argument", "message": "bad url"}"#)
            .unwrap();
    assert_eq!(err.id, Some(7));
    assert_eq!(err.error, "invalid argument");
    assert_eq!(err.message, "bad url");
}
