//! Lossless round-trip: printing the parsed tree reproduces the source
//! byte for byte, with or without syntax errors.

use crate::helpers::source_fixtures::*;
use crate::helpers::{interface, source_file};
use idl_counters::FileId;
use idl_counters::parser::{Definition, parse_webidl};
use idl_counters::syntax::parse_content;
use rstest::rstest;
use std::path::Path;

#[rstest]
#[case::window(WINDOW)]
#[case::node_list(NODE_LIST)]
#[case::event(EVENT)]
#[case::misc(MISC)]
#[case::crlf("[Exposed=Window]\r\ninterface A {\r\n  attribute long x;\r\n};\r\n")]
#[case::tabs("[Exposed=Window,\tInstrumentedProps=(\ta,\tb\t)]\tinterface\tA\t{};")]
#[case::no_trailing_newline("interface A {};")]
#[case::comments_only("// nothing here\n/* at all */\n")]
#[case::license_header(
    "/* This Source Code Form is subject to the terms of the Mozilla Public\n * License, v. 2.0. */\n\ninterface A {};\n"
)]
#[case::doc_comment("/** The A interface. */\ninterface A {\n  /* x */ attribute long x;\n};\n")]
fn test_roundtrip_clean(#[case] source: &str) {
    let parsed = parse_webidl(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    assert_eq!(parsed.syntax().to_string(), source);
}

#[rstest]
#[case::unclosed_body("interface A {\n  attribute long x;\n")]
#[case::garbage("interface A {};\n@@@ !!\ninterface B {};\n")]
#[case::missing_name("interface {};\n")]
#[case::broken_ext_attr("[Exposed=, InstrumentedProps=(a b]\ninterface A {};\n")]
#[case::unclosed_comment("interface A {}; /* never closed")]
fn test_roundtrip_with_errors(#[case] source: &str) {
    let parsed = parse_webidl(source);
    assert!(!parsed.ok());
    assert_eq!(parsed.syntax().to_string(), source);
}

#[test]
fn test_window_structure() {
    let root = source_file(WINDOW);
    let defs: Vec<_> = root.definitions().collect();
    assert!(matches!(defs[0], Definition::Typedef(_)));
    assert!(defs.iter().any(|d| matches!(d, Definition::Includes(_))));

    let window = interface(WINDOW, "Window");
    assert_eq!(window.inherits(), Some("EventTarget".to_string()));
    assert_eq!(window.exposed_globals(), Some(vec!["Window".to_string()]));
    assert!(window.has_indexed_or_named_getter());
    assert_eq!(
        window.ext_attr("InstrumentedProps").unwrap().ident_list().unwrap().texts(),
        vec![
            "AbsoluteOrientationSensor",
            "Accelerometer",
            "BackgroundFetchManager",
            "Bluetooth"
        ]
    );

    let partial: Vec<_> = root
        .interfaces()
        .filter(|i| i.is_partial())
        .collect();
    assert_eq!(partial.len(), 1);
    assert_eq!(partial[0].members().count(), 1);
}

#[test]
fn test_member_names() {
    let event = interface(EVENT, "Event");
    let names: Vec<_> = event.members().filter_map(|m| m.name()).collect();
    assert_eq!(
        names,
        vec![
            "type",
            "NONE",
            "CAPTURING_PHASE",
            "eventPhase",
            "stopPropagation",
            "preventDefault",
            "defaultPrevented",
            "timeStamp"
        ]
    );
    assert!(event.members().next().unwrap().is_constructor());
    assert_eq!(
        event.exposed_globals(),
        Some(vec![
            "Window".to_string(),
            "Worker".to_string(),
            "AudioWorklet".to_string()
        ])
    );
}

#[test]
fn test_parse_content_reports_first_error() {
    let err = parse_content(
        FileId::new(0),
        Path::new("Broken.webidl"),
        "interface A {};\ninterface {};\n",
    )
    .unwrap_err();
    assert_eq!(err.position.line, 1);
    assert_eq!(err.position.column, 10);
    assert!(err.to_string().starts_with("2:11: "));
}

#[test]
fn test_parse_content_keeps_text() {
    let file = parse_content(FileId::new(3), Path::new("NodeList.webidl"), NODE_LIST).unwrap();
    assert_eq!(file.id(), FileId::new(3));
    assert_eq!(file.text(), NODE_LIST);
    assert!(!file.is_changed());
    assert!(file.interface("NodeList").is_some());
}
