//! Property tests for merge-with-defaults over arbitrary stored blobs.

use proof_widgets::models::{merge_with_defaults_value, WidgetConfiguration};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Keys that appear somewhere in the schema, mixed with unknown ones so
/// random blobs hit real groups and leaves often enough to matter.
const KEYS: &[&str] = &[
    "design",
    "display",
    "position",
    "border",
    "borderRadius",
    "borderLeftAccent",
    "offsetX",
    "content",
    "showValue",
    "currency",
    "privacy",
    "anonymizeNames",
    "duration",
    "displayDuration",
    "webhooks",
    "autoCapture",
    "enabled",
    "ecommerce",
    "minOrderValue",
    "name",
    "version",
    "isActive",
    "templateId",
    "triggers",
    "eventTypes",
    "customKey",
];

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..100_000).prop_map(|n| json!(n)),
        (-1000.0f64..1000.0).prop_map(|f| json!(f)),
        "[a-z#0-9 -]{0,12}".prop_map(Value::String),
    ]
}

fn blob() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..6).prop_map(|entries| {
                let map: Map<String, Value> = entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                Value::Object(map)
            }),
        ]
    })
}

/// Every non-null leaf of `expected` exists in `actual` with the same JSON kind.
fn assert_same_shape(expected: &Value, actual: &Value, path: &str) {
    match expected {
        Value::Object(map) => {
            let other = actual
                .as_object()
                .unwrap_or_else(|| panic!("{path} should be an object, got {actual}"));
            for (key, value) in map {
                let child = other
                    .get(key)
                    .unwrap_or_else(|| panic!("{path}.{key} missing"));
                assert_same_shape(value, child, &format!("{path}.{key}"));
            }
        }
        Value::Null => {}
        Value::Bool(_) => assert!(actual.is_boolean(), "{path} should be a bool"),
        Value::Number(_) => assert!(actual.is_number(), "{path} should be a number"),
        Value::String(_) => assert!(actual.is_string(), "{path} should be a string"),
        Value::Array(_) => assert!(actual.is_array(), "{path} should be an array"),
    }
}

proptest! {
    #[test]
    fn merge_is_idempotent(stored in blob()) {
        let once = merge_with_defaults_value(&stored);
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = merge_with_defaults_value(&serialized);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_is_total(stored in blob()) {
        let defaults = serde_json::to_value(WidgetConfiguration::default()).unwrap();
        let merged = serde_json::to_value(merge_with_defaults_value(&stored)).unwrap();
        assert_same_shape(&defaults, &merged, "config");
    }

    #[test]
    fn unknown_keys_nested_in_groups_survive(
        key in "legacy[A-Z][a-z]{1,6}",
        value in leaf(),
        radius in 0u32..64,
    ) {
        let mut stored = json!({
            "design": {"border": {"borderRadius": radius}},
            "display": {"content": {}}
        });
        stored["design"][key.as_str()] = value.clone();
        stored["design"]["border"][key.as_str()] = value.clone();
        stored["display"]["content"][key.as_str()] = value.clone();
        let merged = merge_with_defaults_value(&stored);
        prop_assert_eq!(merged.design.border.border_radius, radius);

        let serialized = serde_json::to_value(&merged).unwrap();
        prop_assert_eq!(&serialized["design"][key.as_str()], &value);
        prop_assert_eq!(&serialized["design"]["border"][key.as_str()], &value);
        prop_assert_eq!(&serialized["display"]["content"][key.as_str()], &value);
    }

    #[test]
    fn sibling_leaves_survive_partial_groups(radius in 1u32..64) {
        let defaults = WidgetConfiguration::default();
        let merged = merge_with_defaults_value(&json!({
            "design": {"border": {"borderRadius": radius}}
        }));
        prop_assert_eq!(merged.design.border.border_radius, radius);
        prop_assert_eq!(merged.design.border.border_left_accent, defaults.design.border.border_left_accent);
        prop_assert_eq!(&merged.design.position, &defaults.design.position);
        prop_assert_eq!(&merged.display, &defaults.display);
    }
}

#[test]
fn falsy_leaves_are_kept() {
    let merged = merge_with_defaults_value(&json!({
        "design": {"border": {"borderRadius": 0, "borderLeftAccent": false}},
        "display": {"content": {"timestampPrefix": "", "showValue": false}}
    }));
    assert_eq!(merged.design.border.border_radius, 0);
    assert!(!merged.design.border.border_left_accent);
    assert_eq!(merged.display.content.timestamp_prefix, "");
    assert!(!merged.display.content.show_value);
}

#[test]
fn non_object_blobs_give_defaults() {
    for stored in [json!(null), json!(42), json!("config"), json!([1, 2, 3])] {
        assert_eq!(merge_with_defaults_value(&stored), WidgetConfiguration::default());
    }
}
