//! Annotation edits on realistic files: only the edited list (or bracket)
//! changes, everything else prints back untouched.

use crate::helpers::source_fixtures::*;
use crate::helpers::{interface, print};
use idl_counters::edit::{
    EditError, create_annotation, find_annotation, insert_values, list_values, remove_values,
};
use idl_counters::parser::parse_webidl;

const ANNOTATION: &str = "InstrumentedProps";

#[test]
fn test_insert_keeps_multiline_layout() {
    let window = interface(WINDOW, "Window");
    let attr = find_annotation(&window, ANNOTATION).unwrap();
    let edit = insert_values(&attr, &["Zzz", "AmbientLightSensor", "Bluetooth"])
        .unwrap()
        .unwrap();
    assert_eq!(edit.values, vec!["AmbientLightSensor", "Zzz"]);

    let expected = WINDOW
        .replace(
            "Accelerometer,\n",
            "Accelerometer,\n                    AmbientLightSensor,\n",
        )
        .replace("Bluetooth)]", "Bluetooth,\n                    Zzz)]");
    assert_eq!(print(edit.root), expected);
}

#[test]
fn test_edited_file_reparses() {
    let window = interface(WINDOW, "Window");
    let attr = find_annotation(&window, ANNOTATION).unwrap();
    let edit = remove_values(&attr, &["Accelerometer"]).unwrap().unwrap();
    let text = print(edit.root);

    let parsed = parse_webidl(&text);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    let reparsed = interface(&text, "Window");
    assert_eq!(
        list_values(&find_annotation(&reparsed, ANNOTATION).unwrap()).unwrap(),
        vec!["AbsoluteOrientationSensor", "BackgroundFetchManager", "Bluetooth"]
    );
}

#[test]
fn test_compact_list_stays_compact() {
    let node_list = interface(NODE_LIST, "NodeList");
    let attr = find_annotation(&node_list, ANNOTATION).unwrap();

    let inserted = insert_values(&attr, &["item"]).unwrap().unwrap();
    assert_eq!(
        print(inserted.root),
        NODE_LIST.replace("forEach,keys", "forEach,item,keys")
    );

    let removed = remove_values(&attr, &["forEach", "missing"]).unwrap().unwrap();
    assert_eq!(removed.values, vec!["forEach"]);
    assert_eq!(print(removed.root), NODE_LIST.replace("forEach,", ""));
}

#[test]
fn test_no_op_edits() {
    let node_list = interface(NODE_LIST, "NodeList");
    let attr = find_annotation(&node_list, ANNOTATION).unwrap();
    assert!(insert_values(&attr, &["keys", "values"]).unwrap().is_none());
    assert!(remove_values(&attr, &["length"]).unwrap().is_none());
}

#[test]
fn test_create_in_existing_bracket() {
    let event = interface(EVENT, "Event");
    assert!(find_annotation(&event, ANNOTATION).is_none());
    let edit = create_annotation(&event, ANNOTATION, &["returnValue", "composedPath"]).unwrap();
    assert_eq!(edit.values, vec!["composedPath", "returnValue"]);
    assert_eq!(
        print(edit.root),
        EVENT.replace(
            "ProbablyShortLivingWrapper]",
            "ProbablyShortLivingWrapper, InstrumentedProps=(composedPath, returnValue)]"
        )
    );
}

#[test]
fn test_create_without_bracket() {
    let mixin = interface(MISC, "WindowOrWorkerGlobalScope");
    let edit = create_annotation(&mixin, ANNOTATION, &["origin"]).unwrap();
    assert_eq!(
        print(edit.root),
        MISC.replace(
            "interface mixin WindowOrWorkerGlobalScope",
            "[InstrumentedProps=(origin)]\ninterface mixin WindowOrWorkerGlobalScope"
        )
    );
}

#[test]
fn test_create_rejects_existing_annotation() {
    let window = interface(WINDOW, "Window");
    let err = create_annotation(&window, ANNOTATION, &["x"]).unwrap_err();
    assert_eq!(
        err,
        EditError::AlreadyPresent {
            name: ANNOTATION.to_string()
        }
    );
}

#[test]
fn test_wrong_shape_is_an_error() {
    let event = interface(EVENT, "Event");
    let attr = find_annotation(&event, "ProbablyShortLivingWrapper").unwrap();
    assert!(matches!(
        insert_values(&attr, &["x"]),
        Err(EditError::Shape { .. })
    ));
    assert!(list_values(&attr).is_err());
}
