use super::*;
use crate::parser::{SourceFile, SyntaxNode, parse_webidl};
use rstest::rstest;

const PROPS: &str = "InstrumentedProps";

fn interface(text: &str) -> Interface {
    let parsed = parse_webidl(text);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    SourceFile::cast(parsed.syntax())
        .unwrap()
        .interfaces()
        .next()
        .unwrap()
}

fn annotation(text: &str) -> ExtAttr {
    find_annotation(&interface(text), PROPS).unwrap()
}

fn print(edit: &Edit) -> String {
    SyntaxNode::new_root(edit.root.clone()).to_string()
}

/// Re-parse the printed text and read the list back
fn reparsed_values(text: &str) -> Vec<String> {
    list_values(&annotation(text)).unwrap()
}

#[test]
fn test_find_annotation_exact_name() {
    let iface = interface("[Exposed=Window, InstrumentedProps=(a)]\ninterface W {};");
    assert!(find_annotation(&iface, PROPS).is_some());
    assert!(find_annotation(&iface, "instrumentedprops").is_none());
    assert!(find_annotation(&interface("interface W {};"), PROPS).is_none());
}

#[test]
fn test_list_values_in_source_order() {
    let attr = annotation("[InstrumentedProps=(zeta, /* c */ alpha,\n  mid)]\ninterface W {};");
    assert_eq!(list_values(&attr).unwrap(), vec!["zeta", "alpha", "mid"]);

    let tokens = value_tokens(&attr).unwrap();
    assert_eq!(tokens[1].leading(), " /* c */ ");
    assert_eq!(tokens[2].leading(), "\n  ");
}

#[rstest]
#[case("(a, c)", &["b"], "(a, b, c)")]
#[case("(b, c)", &["a"], "(a, b, c)")]
#[case("(a, b)", &["c"], "(a, b, c)")]
#[case("( b, c )", &["a"], "( a, b, c )")]
#[case("()", &["b", "a"], "(a, b)")]
#[case("(a)", &["b"], "(a, b)")]
#[case("(a,b)", &["c"], "(a,b,c)")]
fn test_insert_values_layout(#[case] list: &str, #[case] values: &[&str], #[case] expected: &str) {
    let text = format!("[InstrumentedProps={list}]\ninterface W {{}};\n");
    let edit = insert_values(&annotation(&text), values).unwrap().unwrap();
    assert_eq!(
        print(&edit),
        format!("[InstrumentedProps={expected}]\ninterface W {{}};\n")
    );
}

#[test]
fn test_insert_follows_multiline_style() {
    let text = "[Exposed=Window,\n InstrumentedProps=(alpha,\n                    gamma)]\ninterface W {};\n";
    let edit = insert_values(&annotation(text), &["beta", "delta"]).unwrap().unwrap();
    assert_eq!(
        print(&edit),
        "[Exposed=Window,\n InstrumentedProps=(alpha,\n                    beta,\n                    delta,\n                    gamma)]\ninterface W {};\n"
    );
    assert_eq!(edit.values, vec!["beta", "delta"]);
}

#[test]
fn test_insert_multiline_single_entry_uses_head_style() {
    let text = "[InstrumentedProps=(\n  m\n)]\ninterface W {};";
    let edit = insert_values(&annotation(text), &["a"]).unwrap().unwrap();
    assert_eq!(print(&edit), "[InstrumentedProps=(\n  a,\n  m\n)]\ninterface W {};");
}

#[test]
fn test_insert_keeps_comments_with_their_value() {
    let text = "[InstrumentedProps=(a, /* old */ c)]\ninterface W {};";
    let edit = insert_values(&annotation(text), &["b"]).unwrap().unwrap();
    assert_eq!(
        print(&edit),
        "[InstrumentedProps=(a, /* old */ b, /* old */ c)]\ninterface W {};"
    );
}

#[test]
fn test_insert_is_idempotent() {
    let text = "[InstrumentedProps=(a, c)]\ninterface W {};";
    let first = insert_values(&annotation(text), &["b", "d"]).unwrap().unwrap();
    let printed = print(&first);
    assert!(insert_values(&annotation(&printed), &["b", "d"]).unwrap().is_none());
    assert!(insert_values(&annotation(&printed), &["a"]).unwrap().is_none());
}

#[test]
fn test_insert_dedupes_input() {
    let text = "[InstrumentedProps=(a)]\ninterface W {};";
    let edit = insert_values(&annotation(text), &["b", "b", "a"]).unwrap().unwrap();
    assert_eq!(edit.values, vec!["b"]);
    assert_eq!(reparsed_values(&print(&edit)), vec!["a", "b"]);
}

#[test]
fn test_insert_sorts_byte_order() {
    let text = "[InstrumentedProps=(b)]\ninterface W {};";
    let edit = insert_values(&annotation(text), &["Z", "a", "_x"]).unwrap().unwrap();
    assert_eq!(reparsed_values(&print(&edit)), vec!["Z", "_x", "a", "b"]);
}

#[test]
fn test_insert_keyword_value() {
    let text = "[InstrumentedProps=(a)]\ninterface W {};";
    let edit = insert_values(&annotation(text), &["attribute"]).unwrap().unwrap();
    assert_eq!(reparsed_values(&print(&edit)), vec!["a", "attribute"]);
}

#[rstest]
#[case("")]
#[case("two words")]
#[case("1abc")]
#[case("a,b")]
fn test_insert_rejects_invalid_values(#[case] value: &str) {
    let attr = annotation("[InstrumentedProps=(a)]\ninterface W {};");
    assert_eq!(
        insert_values(&attr, &[value]),
        Err(EditError::InvalidValue {
            value: value.to_string()
        })
    );
}

#[test]
fn test_remove_values_scenario() {
    let text = "[InstrumentedProps=(bar, baz, qux)]\ninterface W {};";
    let edit = remove_values(&annotation(text), &["baz"]).unwrap().unwrap();
    assert_eq!(edit.values, vec!["baz"]);
    assert_eq!(print(&edit), "[InstrumentedProps=(bar, qux)]\ninterface W {};");
}

#[rstest]
#[case("(a, b, c)", &["a"], "(b, c)")]
#[case("(a, b, c)", &["c"], "(a, b)")]
#[case("(a, b, c)", &["a", "c"], "(b)")]
#[case("(\n  a,\n  b,\n  c\n)", &["a"], "(\n  b,\n  c\n)")]
#[case("(\n  a,\n  b,\n  c\n)", &["c"], "(\n  a,\n  b\n)")]
#[case("(a, b)", &["a", "b"], "()")]
fn test_remove_values_layout(#[case] list: &str, #[case] values: &[&str], #[case] expected: &str) {
    let text = format!("[InstrumentedProps={list}]\ninterface W {{}};");
    let edit = remove_values(&annotation(&text), values).unwrap().unwrap();
    assert_eq!(
        print(&edit),
        format!("[InstrumentedProps={expected}]\ninterface W {{}};")
    );
}

#[test]
fn test_remove_all_leaves_empty_list_that_reparses() {
    let text = "[InstrumentedProps=(a)]\ninterface W {};";
    let edit = remove_values(&annotation(text), &["a"]).unwrap().unwrap();
    let printed = print(&edit);
    assert!(parse_webidl(&printed).ok());
    assert!(reparsed_values(&printed).is_empty());
}

#[test]
fn test_remove_absent_is_noop() {
    let attr = annotation("[InstrumentedProps=(a, b)]\ninterface W {};");
    assert!(remove_values(&attr, &["zzz"]).unwrap().is_none());
    assert!(remove_values::<&str>(&attr, &[]).unwrap().is_none());
}

#[test]
fn test_remove_resorts_unsorted_list() {
    let text = "[InstrumentedProps=(c, a, b)]\ninterface W {};";
    let edit = remove_values(&annotation(text), &["b"]).unwrap().unwrap();
    assert_eq!(print(&edit), "[InstrumentedProps=(a, c)]\ninterface W {};");
}

#[rstest]
#[case("(a, c)", &["b"])]
#[case("(b)", &["a", "c"])]
#[case("(\n  b,\n  d\n)", &["a", "c", "e"])]
fn test_insert_then_remove_restores_text(#[case] list: &str, #[case] values: &[&str]) {
    let text = format!("[InstrumentedProps={list}]\ninterface W {{}};");
    let inserted = print(&insert_values(&annotation(&text), values).unwrap().unwrap());
    let removed = print(&remove_values(&annotation(&inserted), values).unwrap().unwrap());
    assert_eq!(removed, text);
}

#[test]
fn test_edit_only_touches_the_list() {
    let text = "// Copyright\n[Exposed=Window,\n InstrumentedProps=(a, z)] // trailing\ninterface W {\n  // body\n  attribute long x;\n};\n";
    let before = text.find("(a, z)").unwrap();
    let after = before + "(a, z)".len();

    let printed = print(&insert_values(&annotation(text), &["m"]).unwrap().unwrap());
    assert_eq!(&printed[..before], &text[..before]);
    assert_eq!(&printed[printed.len() - (text.len() - after)..], &text[after..]);
    assert_eq!(printed, text.replace("(a, z)", "(a, m, z)"));
}

#[rstest]
#[case("[InstrumentedProps=Foo]\ninterface W {};")]
#[case("[InstrumentedProps]\ninterface W {};")]
#[case("[InstrumentedProps=(a, \"b\")]\ninterface W {};")]
#[case("[InstrumentedProps(long a)]\ninterface W {};")]
fn test_wrong_shape_is_an_error(#[case] text: &str) {
    let attr = annotation(text);
    assert!(matches!(list_values(&attr), Err(EditError::Shape { .. })));
    assert!(matches!(insert_values(&attr, &["x"]), Err(EditError::Shape { .. })));
    assert!(matches!(remove_values(&attr, &["x"]), Err(EditError::Shape { .. })));
}

#[test]
fn test_create_annotation_without_bracket() {
    let text = "interface Foo {\n  attribute long x;\n};\n";
    let edit = create_annotation(&interface(text), PROPS, &["bar"]).unwrap();
    assert_eq!(
        print(&edit),
        "[InstrumentedProps=(bar)]\ninterface Foo {\n  attribute long x;\n};\n"
    );
    assert_eq!(edit.values, vec!["bar"]);
}

#[test]
fn test_create_annotation_keeps_leading_comment() {
    let text = "/* license */\n\npartial interface Foo {};\n";
    let edit = create_annotation(&interface(text), PROPS, &["b", "a"]).unwrap();
    assert_eq!(
        print(&edit),
        "/* license */\n\n[InstrumentedProps=(a, b)]\npartial interface Foo {};\n"
    );
}

#[rstest]
#[case("[Exposed=Window]", "[Exposed=Window, InstrumentedProps=(a, b)]")]
#[case("[Exposed=Window,]", "[Exposed=Window, InstrumentedProps=(a, b)]")]
#[case("[Exposed=Window ]", "[Exposed=Window, InstrumentedProps=(a, b) ]")]
#[case("[]", "[InstrumentedProps=(a, b)]")]
#[case("[A,B]", "[A,B,InstrumentedProps=(a, b)]")]
#[case(
    "[Exposed=Window,\n Func=\"f\"]",
    "[Exposed=Window,\n Func=\"f\",\n InstrumentedProps=(a, b)]"
)]
#[case(
    "[Exposed=Window,\n Func=\"f\"\n]",
    "[Exposed=Window,\n Func=\"f\",\n InstrumentedProps=(a, b)\n]"
)]
fn test_create_annotation_in_bracket(#[case] bracket: &str, #[case] expected: &str) {
    let text = format!("{bracket}\ninterface Foo {{}};");
    let edit = create_annotation(&interface(&text), PROPS, &["b", "a"]).unwrap();
    let printed = print(&edit);
    assert_eq!(printed, format!("{expected}\ninterface Foo {{}};"));
    assert_eq!(reparsed_values(&printed), vec!["a", "b"]);
}

#[test]
fn test_create_annotation_already_present() {
    let iface = interface("[InstrumentedProps=(a)]\ninterface Foo {};");
    assert_eq!(
        create_annotation(&iface, PROPS, &["b"]),
        Err(EditError::AlreadyPresent {
            name: PROPS.to_string()
        })
    );
}

#[test]
fn test_create_annotation_validates_values() {
    let iface = interface("interface Foo {};");
    assert!(matches!(
        create_annotation(&iface, PROPS, &["not valid"]),
        Err(EditError::InvalidValue { .. })
    ));
    assert!(matches!(
        create_annotation(&iface, "Bad Name", &["a"]),
        Err(EditError::InvalidValue { .. })
    ));
}

#[test]
fn test_value_token_constructors() {
    let token = ValueToken::new("foo").with_trivia("\n  ");
    let renamed = token.with_text("bar");
    assert_eq!(renamed.text(), "bar");
    assert_eq!(renamed.leading(), "\n  ");
    assert_eq!(token.text(), "foo");
    assert_eq!(renamed.with_trivia("").leading(), "");
    assert_eq!(renamed.trailing(), "");
}
