use super::*;
use crate::test_support::{TestConnection, TestRemote};

async fn module_with_remote() -> (BrowsingContextModule, TestRemote) {
    let (connection, remote) = TestConnection::new();
    let transport = Transport::new(Box::new(connection));
    transport.connect("ws://localhost:5555").await.unwrap();
    (BrowsingContextModule::new(transport), remote)
}

#[test]
fn test_navigate_parameters_serialize() {
    let params = NavigateParameters::new("myContextId", "http://example.com");
    let json = serde_json::to_value(&params).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(json["context"], "myContextId");
    assert_eq!(json["url"], "http://example.com");
}

#[test]
fn test_navigate_parameters_serialize_wait_states() {
    for (state, expected) in [
        (ReadinessState::None, "none"),
        (ReadinessState::Interactive, "interactive"),
        (ReadinessState::Complete, "complete"),
    ] {
        let mut params = NavigateParameters::new("myContextId", "http://example.com");
        params.wait = Some(state);
        let json = serde_json::to_value(&params).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["wait"], expected);
    }
}

#[test]
fn test_capture_screenshot_parameters_serialize() {
    let params = CaptureScreenshotParameters::new("myContextId");
    let json = serde_json::to_value(&params).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(json["context"], "myContextId");
}

#[test]
fn test_print_parameters_serialize_minimal() {
    let params = PrintParameters::new("myContextId");
    let json = serde_json::to_value(&params).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(json["context"], "myContextId");
}

#[test]
fn test_print_parameters_serialize_with_margins() {
    let mut margins = PrintMarginParameters::default();
    margins.set_top(2.54).unwrap();
    margins.set_bottom(2.54).unwrap();
    margins.set_left(2.54).unwrap();
    margins.set_right(2.54).unwrap();

    let mut params = PrintParameters::new("myContextId");
    params.margin = Some(margins);

    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    let margin = json["margin"].as_object().unwrap();
    assert_eq!(margin.len(), 4);
    assert_eq!(json["margin"]["top"], 2.54);
    assert_eq!(json["margin"]["bottom"], 2.54);
    assert_eq!(json["margin"]["left"], 2.54);
    assert_eq!(json["margin"]["right"], 2.54);
}

#[test]
fn test_print_parameters_unset_margins_serialize_empty() {
    let mut params = PrintParameters::new("myContextId");
    params.margin = Some(PrintMarginParameters::default());
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    // Unset margin values are omitted, not written as null.
    assert_eq!(json["margin"].as_object().unwrap().len(), 0);
}

#[test]
fn test_setting_margins_to_invalid_values_fails() {
    let mut margins = PrintMarginParameters::default();
    for result in [
        margins.set_top(-1.0),
        margins.set_bottom(-1.0),
        margins.set_left(-1.0),
        margins.set_right(-1.0),
    ] {
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Value must be greater than or equal to zero");
    }
}

#[test]
fn test_print_parameters_serialize_with_page_size() {
    let mut page = PrintPageParameters::default();
    page.set_width(24.0).unwrap();
    page.set_height(29.7).unwrap();

    let mut params = PrintParameters::new("myContextId");
    params.page = Some(page);

    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    let page = json["page"].as_object().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(json["page"]["width"], 24.0);
    assert_eq!(json["page"]["height"], 29.7);
}

#[test]
fn test_print_parameters_unset_page_size_serializes_empty() {
    let mut params = PrintParameters::new("myContextId");
    params.page = Some(PrintPageParameters::default());
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json["page"].as_object().unwrap().len(), 0);
}

#[test]
fn test_setting_page_size_to_invalid_values_fails() {
    let mut page = PrintPageParameters::default();
    assert!(page.set_width(-1.0).is_err());
    assert!(page.set_height(-1.0).is_err());
}

#[test]
fn test_print_parameters_serialize_with_orientation() {
    let mut params = PrintParameters::new("myContextId");
    params.orientation = Some(PrintOrientation::Landscape);
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    assert_eq!(json["orientation"], "landscape");
}

#[test]
fn test_print_parameters_serialize_with_background() {
    let mut params = PrintParameters::new("myContextId");
    params.background = Some(true);
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    assert_eq!(json["background"], true);
}

#[test]
fn test_print_parameters_serialize_with_scale() {
    let mut params = PrintParameters::new("myContextId");
    params.set_scale(1.5).unwrap();
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    assert_eq!(json["scale"], 1.5);
}

#[test]
fn test_setting_scale_to_invalid_values_fails() {
    let mut params = PrintParameters::new("myContextId");
    for value in [-1.0, 0.0, 0.01, 2.01] {
        let err = params.set_scale(value).unwrap_err();
        assert_eq!(err.to_string(), "Value must be between 0.1 and 2");
    }
    assert_eq!(params.scale(), None);
}

#[test]
fn test_print_parameters_serialize_with_shrink_to_fit() {
    let mut params = PrintParameters::new("myContextId");
    params.shrink_to_fit = Some(false);
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    assert_eq!(json["shrinkToFit"], false);
}

#[test]
fn test_print_parameters_serialize_with_page_ranges() {
    let mut params = PrintParameters::new("myContextId");
    params.page_ranges = Some(vec!["1".to_string(), "3-5".to_string()]);
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
    let ranges = json["pageRanges"].as_array().unwrap();
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0], "1");
    assert_eq!(ranges[1], "3-5");
}

#[test]
fn test_decoding_out_of_range_scale_fails() {
    let err = serde_json::from_str::<PrintParameters>(r#"{ "context": "c", "scale": 5.0 }"#)
        .unwrap_err();
    assert!(err.to_string().contains("Value must be between"), "{err}");
}

#[test]
fn test_decoding_negative_margin_fails() {
    let err = serde_json::from_str::<PrintMarginParameters>(r#"{ "top": -1.0 }"#).unwrap_err();
    assert!(
        err.to_string().contains("Value must be greater than or equal to zero"),
        "{err}"
    );
}

#[test]
fn test_print_parameters_decode_round_trip() {
    let mut params = PrintParameters::new("myContextId");
    params.set_scale(0.5).unwrap();
    params.shrink_to_fit = Some(true);
    let json = serde_json::to_string(&params).unwrap();
    let decoded: PrintParameters = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.context, "myContextId");
    assert_eq!(decoded.scale(), Some(0.5));
    assert_eq!(decoded.shrink_to_fit, Some(true));
}

#[test]
fn test_browsing_context_info_deserialize() {
    let info: BrowsingContextInfo = serde_json::from_str(
        r#"{
            "context": "child",
            "url": "https://example.com/frame",
            "children": [],
            "parent": "root"
        }"#,
    )
    .unwrap();
    assert_eq!(info.context, "child");
    assert_eq!(info.parent.as_deref(), Some("root"));
}

#[tokio::test]
async fn test_execute_navigate_command() {
    let (module, mut remote) = module_with_remote().await;

    let (result, sent) = tokio::join!(
        module.navigate(NavigateParameters::new("myContextId", "http://example.com")),
        remote.respond_success(r#"{ "url": "http://example.com", "navigation": "nav-1" }"#)
    );
    let result = result.unwrap();
    assert_eq!(sent["method"], "browsingContext.navigate");
    assert_eq!(result.url, "http://example.com");
    assert_eq!(result.navigation.as_deref(), Some("nav-1"));
}

#[tokio::test]
async fn test_execute_capture_screenshot_command() {
    let (module, mut remote) = module_with_remote().await;

    let (result, sent) = tokio::join!(
        module.capture_screenshot(CaptureScreenshotParameters::new("myContextId")),
        remote.respond_success(r#"{ "data": "aGVsbG8=" }"#)
    );
    assert_eq!(sent["method"], "browsingContext.captureScreenshot");
    assert_eq!(result.unwrap().data, "aGVsbG8=");
}

#[tokio::test]
async fn test_module_registers_context_events() {
    let (connection, remote) = TestConnection::new();
    let transport = Transport::new(Box::new(connection));
    let _module = BrowsingContextModule::new(transport.clone());
    transport.connect("ws://localhost:5555").await.unwrap();
    let mut events = transport.take_events().unwrap();

    remote.receive_text(
        r#"{ "method": "browsingContext.contextCreated", "params": { "context": "ctx-1", "url": "about:blank" } }"#,
    );

    match events.recv().await.unwrap() {
        crate::transport::TransportEvent::EventReceived { name, data } => {
            assert_eq!(name, CONTEXT_CREATED_EVENT);
            let info = data.downcast::<BrowsingContextInfo>().unwrap();
            assert_eq!(info.context, "ctx-1");
            assert_eq!(info.url, "about:blank");
        }
        other => panic!("expected EventReceived, got {other:?}"),
    }
}
