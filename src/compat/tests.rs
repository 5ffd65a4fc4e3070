use super::*;
use rstest::rstest;
use serde_json::json;

fn block(value: serde_json::Value) -> SupportBlock {
    serde_json::from_value(value).unwrap()
}

fn statement(value: serde_json::Value) -> SupportStatement {
    serde_json::from_value(value).unwrap()
}

#[rstest]
#[case(json!({"version_added": "120"}), true)]
#[case(json!({"version_added": true}), true)]
#[case(json!({"version_added": false}), false)]
#[case(json!({"version_added": null}), false)]
#[case(json!({"version_added": ""}), false)]
#[case(json!({"version_added": "preview"}), false)]
#[case(json!({"version_added": "50", "version_removed": "60"}), false)]
#[case(json!({"version_added": "50", "version_removed": false}), true)]
#[case(json!({"version_added": "50", "flags": [{"type": "preference", "name": "x"}]}), false)]
#[case(json!({"version_added": "50", "flags": []}), false)]
#[case(json!({"version_added": "50", "prefix": "moz"}), false)]
#[case(json!({"version_added": "50", "alternative_name": "mozFoo"}), false)]
#[case(json!({"version_added": "50", "partial_implementation": true, "notes": "x"}), true)]
fn test_has_stable_support_single(#[case] value: serde_json::Value, #[case] expected: bool) {
    assert_eq!(has_stable_support(Some(&statement(value))), expected);
}

#[test]
fn test_has_stable_support_list_uses_first_unprefixed() {
    let list = statement(json!([
        {"version_added": "30", "prefix": "webkit"},
        {"version_added": "40"},
        {"version_added": "10", "flags": []}
    ]));
    assert!(has_stable_support(Some(&list)));

    let flagged_first = statement(json!([
        {"version_added": "50", "flags": []},
        {"version_added": "40"}
    ]));
    assert!(!has_stable_support(Some(&flagged_first)));

    let all_prefixed = statement(json!([{"version_added": "30", "prefix": "moz"}]));
    assert!(!has_stable_support(Some(&all_prefixed)));
}

#[test]
fn test_has_stable_support_missing() {
    assert!(!has_stable_support(None));
}

#[test]
fn test_classifier_table() {
    let engines = EngineSet::default();
    let support = block(json!({
        "firefox": {"version_added": "120"},
        "firefox_android": {"version_added": false},
        "chrome": {"version_added": "100"},
        "chrome_android": {"version_added": "100"},
        "safari": {"version_added": "15"},
        "safari_ios": {"version_added": "15"}
    }));
    assert!(engines.lacks_only_target_engine_support(&support));
    assert!(!engines.supported_by_target_engine_everywhere(&support));
    assert!(!engines.lacks_all_other_engine_support(&support));
    assert_eq!(engines.classify(&support), Classification::MissingOnlyInTarget);
}

#[rstest]
#[case(
    json!({"firefox": {"version_added": "1"}, "firefox_android": {"version_added": "4"}}),
    Classification::SupportedByTarget
)]
#[case(
    json!({"firefox": {"version_added": false}, "chrome": {"version_added": "1"}, "chrome_android": {"version_added": "18"}}),
    Classification::MissingOnlyInTarget
)]
#[case(
    json!({"firefox": {"version_added": false}, "safari": {"version_added": "1"}, "safari_ios": {"version_added": "1"}}),
    Classification::MissingOnlyInTarget
)]
#[case(
    json!({"firefox": {"version_added": false}, "chrome": {"version_added": "1"}, "chrome_android": {"version_added": false}}),
    Classification::Partial
)]
#[case(
    json!({"firefox": {"version_added": false}, "chrome": {"version_added": "1", "flags": []}}),
    Classification::MissingEverywhere
)]
#[case(json!({}), Classification::MissingEverywhere)]
fn test_classify(#[case] value: serde_json::Value, #[case] expected: Classification) {
    assert_eq!(EngineSet::default().classify(&block(value)), expected);
}

#[test]
fn test_target_everywhere_is_not_missing() {
    let engines = EngineSet::default();
    let support = block(json!({
        "firefox": {"version_added": "90"},
        "firefox_android": {"version_added": "90"},
        "chrome": {"version_added": "80"},
        "chrome_android": {"version_added": "80"}
    }));
    assert!(engines.supported_everywhere_in_target(&support));
    assert!(!engines.lacks_only_target_engine_support(&support));
}

#[test]
fn test_custom_engine_set() {
    let engines = EngineSet {
        target: EngineFamily::new("chrome", "chrome_android"),
        references: vec![EngineFamily::new("firefox", "firefox_android")],
    };
    let support = block(json!({
        "firefox": {"version_added": "90"},
        "firefox_android": {"version_added": "90"}
    }));
    assert!(engines.lacks_only_target_engine_support(&support));
}

#[test]
fn test_compat_data_full_document() {
    let data = CompatData::from_json(
        &json!({
            "__meta": {"version": "5.3.17"},
            "browsers": {},
            "api": {
                "AbortController": {
                    "__compat": {
                        "mdn_url": "https://example.invalid",
                        "support": {"firefox": {"version_added": "57"}}
                    },
                    "abort": {"__compat": {"support": {"firefox": [{"version_added": "57"}]}}}
                }
            },
            "javascript": {"builtins": {"Array": {"__compat": {"support": {}}}}}
        })
        .to_string(),
    )
    .unwrap();

    let feature = data.interface("AbortController").unwrap();
    assert!(feature.support().unwrap().contains_key("firefox"));
    assert!(feature.member("abort").unwrap().support().is_some());
    assert!(feature.member("missing").is_none());
    assert!(data.builtin("Array").is_some());
}

#[test]
fn test_compat_data_bare_api_map() {
    let data = CompatData::from_json(
        &json!({"Foo": {"__compat": {"support": {}}, "bar": {}}}).to_string(),
    )
    .unwrap();
    let foo = data.interface("Foo").unwrap();
    assert!(foo.member("bar").unwrap().compat.is_none());
    assert!(data.javascript.builtins.is_empty());
}

#[rstest]
#[case::string(json!("yes"))]
#[case::numeric_version(json!({"version_added": 12}))]
#[case::bad_list_entry(json!([{"version_added": "50"}, 7]))]
fn test_malformed_statement_is_not_supported(#[case] value: serde_json::Value) {
    let parsed = statement(value);
    assert!(matches!(parsed, SupportStatement::Malformed(_)));
    assert!(parsed.current().is_none());
    assert!(!has_stable_support(Some(&parsed)));
}

#[test]
fn test_compat_data_tolerates_malformed_records() {
    let data = CompatData::from_json(
        &json!({
            "api": {
                "Foo": {"__compat": {"support": {
                    "firefox": "yes",
                    "chrome": {"version_added": "1"},
                    "chrome_android": {"version_added": "18"}
                }}},
                "Bar": {"__compat": {"support": {
                    "firefox": {"version_added": 12},
                    "safari": {"version_added": "1"},
                    "safari_ios": {"version_added": "1"}
                }}},
                "Baz": {"__compat": {"support": {
                    "firefox": {"version_added": "1"},
                    "firefox_android": {"version_added": "4"}
                }}}
            }
        })
        .to_string(),
    )
    .unwrap();

    let engines = EngineSet::default();
    let classify = |name: &str| engines.classify(data.interface(name).unwrap().support().unwrap());
    assert_eq!(classify("Foo"), Classification::MissingOnlyInTarget);
    assert_eq!(classify("Bar"), Classification::MissingOnlyInTarget);
    assert_eq!(classify("Baz"), Classification::SupportedByTarget);
}

#[test]
fn test_compat_data_invalid_json() {
    assert!(matches!(
        CompatData::from_json("{not json"),
        Err(CompatError::Json(_))
    ));
}

#[test]
fn test_compat_data_load_missing_file() {
    let err = CompatData::load(std::path::Path::new("/nonexistent/bcd.json")).unwrap_err();
    assert!(matches!(err, CompatError::Io { .. }));
}
