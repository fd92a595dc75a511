use scene_core::errors::*;

#[test]
fn invalid_record_carries_id_and_cause() {
    let err = SceneError::invalid_record(
        "r1",
        RecordError::NonNumeric {
            field: "version".into(),
            found: "\"2\"".into(),
        },
    );
    let msg = err.to_string();
    assert!(msg.contains("r1"));
    assert!(msg.contains("version"));
}

#[test]
fn invalid_record_exposes_source() {
    use std::error::Error;
    let err = SceneError::invalid_record("r1", RecordError::EmptyId);
    let source = err.source().expect("record error is the source");
    assert_eq!(source.to_string(), RecordError::EmptyId.to_string());
}

#[test]
fn dangling_reference_carries_both_ends() {
    let err = SceneError::DanglingReference {
        from: "a1".into(),
        to: "r9".into(),
        via: "startBinding".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("a1"));
    assert!(msg.contains("r9"));
    assert!(msg.contains("startBinding"));
}

// --- From impls ---

#[test]
fn config_error_converts_to_scene_error() {
    let err: SceneError = ConfigError::FileNotFound {
        path: "/tmp/scene.toml".into(),
    }
    .into();
    assert!(matches!(err, SceneError::Config(_)));
    assert!(err.to_string().contains("/tmp/scene.toml"));
}

#[test]
fn serde_error_converts_to_scene_error() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: SceneError = serde_err.into();
    assert!(matches!(err, SceneError::Serialization(_)));
}

// --- Error codes ---

#[test]
fn error_codes_are_stable() {
    assert_eq!(
        SceneError::invalid_record("x", RecordError::EmptyId).error_code(),
        error_code::INVALID_RECORD
    );
    assert_eq!(
        SceneError::DuplicateIdentifier { id: "x".into() }.error_code(),
        error_code::DUPLICATE_IDENTIFIER
    );
    assert_eq!(
        SceneError::DanglingReference {
            from: "a".into(),
            to: "b".into(),
            via: "frameId".into(),
        }
        .error_code(),
        error_code::DANGLING_REFERENCE
    );
    assert_eq!(
        ConfigError::ValidationFailed {
            field: "f".into(),
            message: "m".into(),
        }
        .error_code(),
        error_code::CONFIG_ERROR
    );
}
