use super::*;
use crate::models::{FieldDescriptor, FieldErrorPolicy};
use serde_json::json;
use std::collections::HashMap;

struct Account;

impl Patchable for Account {
    fn patch_schema() -> Schema {
        Schema::new()
            .field(FieldDescriptor::value("name"))
            .field(FieldDescriptor::document("settings"))
    }
}

#[test]
fn test_default_engine_rejects_unknown_entries() {
    let engine = PatchEngine::default();
    let mut target = json!({"name": "old"});

    let err = engine
        .apply_to::<Account>(
            &FieldMask::new(["name", "nickname"]),
            &json!({"name": "new"}),
            &mut target,
        )
        .unwrap_err();

    match err {
        PatchError::InvalidMask(err) => {
            assert_eq!(err.invalid_paths, vec!["nickname"]);
            assert_eq!(err.allowed_paths, vec!["name", "settings.*"]);
        }
        other => panic!("expected invalid mask, got {other:?}"),
    }
    assert_eq!(target, json!({"name": "old"}));
}

#[test]
fn test_ignore_policy_applies_known_entries() {
    let engine = PatchEngine::new(PatchOptions::new(
        MaskPolicy::Ignore,
        FieldErrorPolicy::Skip,
    ));
    let mut target = json!({"name": "old"});

    let report = engine
        .apply_to::<Account>(
            &FieldMask::new(["name", "nickname"]),
            &json!({"name": "new"}),
            &mut target,
        )
        .unwrap();

    assert_eq!(target, json!({"name": "new"}));
    assert_eq!(report.applied(), ["name"]);
}

#[test]
fn test_apply_with_ad_hoc_schema_validates_against_it() {
    let engine = PatchEngine::default();
    let schema = Account::patch_schema();
    let mut target = json!({"settings": {"theme": "dark", "lang": "en"}});

    let report = engine
        .apply(
            &FieldMask::new(["settings.theme"]),
            &schema,
            &json!({"settings": {"theme": "light", "lang": "fr"}}),
            &mut target,
        )
        .unwrap();

    assert_eq!(target, json!({"settings": {"theme": "light", "lang": "en"}}));
    assert!(report.is_complete());

    let err = engine
        .apply(&FieldMask::new(["settings"]), &schema, &json!({}), &mut target)
        .unwrap_err();
    assert!(err.is_invalid_mask());
}

#[test]
fn test_abort_policy_surfaces_field_errors() {
    let engine = PatchEngine::new(PatchOptions::new(
        MaskPolicy::Reject,
        FieldErrorPolicy::Abort,
    ));
    let mut target = json!({"settings": "flat"});

    let err = engine
        .apply_to::<Account>(
            &FieldMask::new(["settings.theme"]),
            &json!({"settings": {"theme": "light"}}),
            &mut target,
        )
        .unwrap_err();

    assert!(matches!(err, PatchError::FieldAccess(ref e) if e.path == "settings"));
}

#[test]
fn test_skip_policy_reports_field_errors() {
    let engine = PatchEngine::default();
    let mut target = json!({"settings": "flat", "name": "old"});

    let report = engine
        .apply_to::<Account>(
            &FieldMask::new(["settings.theme", "name"]),
            &json!({"name": "new", "settings": {"theme": "light"}}),
            &mut target,
        )
        .unwrap();

    assert_eq!(target, json!({"settings": "flat", "name": "new"}));
    assert_eq!(report.skipped().len(), 1);
}

#[test]
fn test_engine_from_config() {
    let config = Config {
        log_level: "info".to_string(),
        mask_policy: MaskPolicy::Ignore,
        field_error_policy: FieldErrorPolicy::Abort,
    };

    let engine = PatchEngine::from_config(&config);

    assert_eq!(
        engine.options(),
        PatchOptions::new(MaskPolicy::Ignore, FieldErrorPolicy::Abort)
    );
}

#[test]
fn test_engine_exposes_cached_legal_paths() {
    let engine = PatchEngine::default();

    let paths = engine.legal_paths::<Account>();

    assert_eq!(paths.iter().collect::<Vec<_>>(), vec!["name", "settings.*"]);
    assert!(Arc::ptr_eq(
        &paths,
        &introspection::legal_paths_for::<Account>()
    ));
}

#[test]
fn test_apply_request_uses_request_mask() {
    #[derive(Debug, Serialize)]
    struct AccountUpdate {
        name: Option<String>,
        settings: Option<JsonValue>,
    }

    impl Patchable for AccountUpdate {
        fn patch_schema() -> Schema {
            Account::patch_schema()
        }
    }

    let engine = PatchEngine::default();
    let request = PatchRequest::new(
        AccountUpdate {
            name: Some("ignored".to_string()),
            settings: Some(json!({"theme": "light"})),
        },
        ["settings.theme"],
    );
    let mut target: HashMap<String, JsonValue> = HashMap::from([
        ("name".to_string(), json!("kept")),
        ("settings".to_string(), json!({"theme": "dark"})),
    ]);

    engine.apply_request(&request, &mut target).unwrap();

    assert_eq!(target["name"], json!("kept"));
    assert_eq!(target["settings"], json!({"theme": "light"}));
}
