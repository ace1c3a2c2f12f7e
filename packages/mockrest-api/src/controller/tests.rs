use super::*;
use ntest::timeout;
use serde_json::json;

fn store() -> Store {
    Store::with_data(json!({
        "contacts": [
            {"id": 1, "name": "Link", "address_ids": [1]},
            {"id": 2, "name": "Zelda", "address_ids": [2]}
        ],
        "addresses": [
            {"id": 1, "name": "123 Hyrule Way", "contact_id": 1},
            {"id": 2, "name": "456 Hyrule Way", "contact_id": 2}
        ]
    }))
    .unwrap()
}

#[timeout(1000)]
#[test]
fn test_object_shorthand_returns_body_with_verb_code() {
    let controller = FrontController::default();
    let store = store();
    let shorthand = Shorthand::from(json!({"status": "ok"}));

    let response = controller
        .handle(Verb::Get, &shorthand, &store, &MockRequest::new())
        .unwrap();
    assert_eq!(response, MockResponse::new(200, json!({"status": "ok"})));

    let response = controller
        .handle(Verb::Post, &shorthand, &store, &MockRequest::new())
        .unwrap();
    assert_eq!(response.code, 201);
}

#[timeout(1000)]
#[test]
fn test_custom_shorthand_sees_store_and_request() {
    let controller = FrontController::default();
    let store = store();
    let shorthand = Shorthand::custom(|store, request| {
        let id = request.param_id().unwrap_or_default();
        let name = store
            .find("contact", id)
            .ok()
            .and_then(|record| record.get("name"))
            .unwrap_or(Value::Null);
        json!({"greeting": name})
    });

    let request = MockRequest::new().with_param("id", 2);
    let response = controller
        .handle(Verb::Get, &shorthand, &store, &request)
        .unwrap();
    assert_eq!(response.body, json!({"greeting": "Zelda"}));
}

#[timeout(1000)]
#[test]
fn test_code_override() {
    let controller = FrontController::default();
    let store = store();
    let request = MockRequest::new().with_param("id", 1);
    let response = controller
        .handle_with_code(Verb::Get, &"contact".into(), &store, &request, Some(202))
        .unwrap();
    assert_eq!(response.code, 202);
}

#[timeout(1000)]
#[test]
fn test_configured_default_codes() {
    let controller = FrontController::new(Arc::new(MockConfig {
        delete_status: 200,
        ..Default::default()
    }));
    assert_eq!(controller.default_code(Verb::Delete), 200);
    assert_eq!(controller.default_code(Verb::Patch), 200);
    assert_eq!(controller.default_code(Verb::Post), 201);
}

#[timeout(1000)]
#[test]
fn test_put_rejects_array_shorthand() {
    let controller = FrontController::default();
    let store = store();
    let request = MockRequest::new()
        .with_param("id", 1)
        .with_body(r#"{"contact":{"name":"x"}}"#);
    let err = controller
        .handle(Verb::Put, &["contact", "addresses"].into(), &store, &request)
        .unwrap_err();
    assert!(matches!(err, ControllerError::UnsupportedShorthand { .. }));
    assert_eq!(err.status_code(), 400);
}

#[timeout(1000)]
#[test]
fn test_error_status_codes() {
    let controller = FrontController::default();
    let store = store();

    let missing = MockRequest::new().with_param("id", 99);
    let err = controller
        .handle(Verb::Get, &"contact".into(), &store, &missing)
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let unknown = MockRequest::new().with_url("/wizards");
    let err = controller
        .handle(Verb::Get, &Shorthand::Undefined, &store, &unknown)
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let malformed = MockRequest::new().with_param("id", 1).with_body("{");
    let err = controller
        .handle(Verb::Put, &"contact".into(), &store, &malformed)
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    assert_eq!(ControllerError::UnknownVerb("trace".into()).status_code(), 405);
    assert_eq!(ControllerError::Store(StoreError::LockPoisoned).status_code(), 500);
}

#[test]
fn test_shorthand_conversions() {
    assert!(matches!(Shorthand::from(None::<&str>), Shorthand::Undefined));
    assert!(matches!(Shorthand::from(Some("contact")), Shorthand::Resource(ref n) if n == "contact"));
    assert!(matches!(
        Shorthand::from(vec!["contact", "addresses"]),
        Shorthand::Resources(ref names) if names.len() == 2
    ));
    assert_eq!(format!("{:?}", Shorthand::custom(|_, _| Value::Null)), "Custom(..)");
}

#[timeout(1000)]
#[test]
fn test_patch_rejection_names_patch() {
    let controller = FrontController::default();
    let store = store();
    let request = MockRequest::new()
        .with_param("id", 1)
        .with_body(r#"{"contact":{"name":"x"}}"#);
    let err = controller
        .handle(Verb::Patch, &["contact", "addresses"].into(), &store, &request)
        .unwrap_err();
    assert!(matches!(
        err,
        ControllerError::UnsupportedShorthand { verb: Verb::Patch, .. }
    ));
    assert!(err.to_string().starts_with("PATCH"));
}

#[timeout(1000)]
#[test]
fn test_put_resolves_irregular_plurals_from_url() {
    let controller = FrontController::default();
    let store = Store::with_data(json!({
        "movies": [{"id": 1, "title": "Ocarina", "year": 1998}],
        "shoes": [{"id": 1, "size": 9, "color": "green"}]
    }))
    .unwrap();

    let request = MockRequest::new()
        .with_url("/movies/1")
        .with_body(r#"{"movie":{"title":"Majora"}}"#);
    let response = controller
        .handle(Verb::Put, &Shorthand::Undefined, &store, &request)
        .unwrap();
    assert_eq!(
        response.body,
        json!({"movie": {"id": 1, "title": "Majora", "year": 1998}})
    );

    let request = MockRequest::new()
        .with_url("/shoes/1")
        .with_body(r#"{"shoe":{"color":"red"}}"#);
    controller
        .handle(Verb::Put, &Shorthand::Undefined, &store, &request)
        .unwrap();
    let shoe = store.find("shoe", 1).unwrap();
    assert_eq!(shoe.get("color"), Some(json!("red")));
    assert_eq!(shoe.get("size"), Some(json!(9)));
}

#[timeout(1000)]
#[test]
fn test_delete_with_missing_dependent_keeps_record() {
    let controller = FrontController::default();
    let store = Store::with_data(json!({
        "contacts": [{"id": 1, "name": "Link"}]
    }))
    .unwrap();

    let request = MockRequest::new().with_param("id", 1);
    let err = controller
        .handle(Verb::Delete, &["contact", "addresses"].into(), &store, &request)
        .unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Store(StoreError::CollectionNotFound { ref collection }) if collection == "addresses"
    ));
    assert_eq!(err.status_code(), 404);
    assert!(store.find("contact", 1).is_ok());
}
