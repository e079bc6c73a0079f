mod common;

use common::{audit, descriptors_of, parse, pass_output};
use errauditor_core::aggregate;
use pretty_assertions::assert_eq;

#[test]
fn test_usecase_end_to_end() {
    let result = audit(
        "package usecase

func Load(id string) (*User, error) {
\tif id == \"\" {
\t\treturn nil, apperrors.Wrap(\"empty\", 42)
\t}
\treturn nil, apperrors.SentinelErr
}
",
    );

    assert_eq!(result.len(), 1);
    let origin = &result.origins[0];
    assert_eq!(origin.function, "Load");
    assert_eq!(origin.location.to_string(), "f.go:3:1");
    assert_eq!(
        origin.descriptors,
        vec!["Wrap(\"empty\",42,)".to_string(), "SentinelErr()".to_string()]
    );
    assert_eq!(result.wrapped_error_count, 0);
    assert_eq!(result.const_error_count, 0);
}

#[test]
fn test_only_literal_arguments_are_kept() {
    let src = "package p

func G(y int) error {
\treturn Foo(\"x\", y, 3)
}
";
    assert_eq!(descriptors_of(src, "G"), vec!["Foo(\"x\",3,)".to_string()]);
}

#[test]
fn test_literal_kinds_keep_source_text() {
    let src = "package p

func G() error {
\treturn Wrap(`raw`, 'c', 1.5, 2i, 0x1F)
}
";
    assert_eq!(
        descriptors_of(src, "G"),
        vec!["Wrap(`raw`,'c',1.5,2i,0x1F,)".to_string()]
    );
}

#[test]
fn test_naked_and_identifier_returns_are_silent() {
    let src = "package p

import \"errors\"

func H() (n int, err error) {
\terr = errors.New(\"x\")
\tif n > 0 {
\t\treturn 0, err
\t}
\treturn
}
";
    assert!(audit(src).is_empty());
}

#[test]
fn test_returns_are_found_at_any_depth() {
    let src = "package p

func N(k int) error {
\tf := func() error {
\t\treturn errs.Inner()
\t}
\tswitch k {
\tcase 1:
\t\treturn errs.One
\t}
\tfor i := 0; i < k; i++ {
\t\tif i == 3 {
\t\t\treturn errs.Three(i, \"three\")
\t\t}
\t}
\treturn f()
}
";
    assert_eq!(
        descriptors_of(src, "N"),
        vec![
            "Inner()".to_string(),
            "One()".to_string(),
            "Three(\"three\",)".to_string(),
            "f()".to_string(),
        ]
    );
}

#[test]
fn test_methods_are_audited() {
    let src = "package svc

func (s *Svc) Do() (int, error) {
\treturn 0, fmt.Errorf(\"op %d\", 1)
}
";
    let result = audit(src);
    assert_eq!(result.len(), 1);
    assert_eq!(result.origins[0].function, "Do");
    assert_eq!(result.origins[0].descriptors, vec!["Errorf(\"op %d\",1,)".to_string()]);
}

#[test]
fn test_grouped_results_shift_the_error_index() {
    let src = "package p

func G() (a, b int, err error) {
\treturn 1, 2, errs.Bad
}

func M() (error, error) {
\treturn errs.A, errs.B
}
";
    assert_eq!(descriptors_of(src, "G"), vec!["Bad()".to_string()]);
    assert_eq!(descriptors_of(src, "M"), vec!["A()".to_string()]);
}

#[test]
fn test_non_error_signatures_are_ignored() {
    let src = "package p

func P() (int, string) {
\treturn 0, errs.X()
}

func Q() myerror {
\treturn errs.Y()
}

func R() errors.Error {
\treturn errs.Z()
}

func S() {
}
";
    assert!(audit(src).is_empty());
}

#[test]
fn test_unresolvable_expressions_have_no_descriptor() {
    let src = "package p

func U(all []error) error {
\tif len(all) > 1 {
\t\treturn all[0]
\t}
\tif len(all) > 2 {
\t\treturn (errs.Paren)
\t}
\treturn makeErr()()
}
";
    assert!(audit(src).is_empty());
}

#[test]
fn test_function_without_body() {
    let src = "package p

func stub() error
";
    assert!(audit(src).is_empty());
}

#[test]
fn test_functions_are_reported_in_source_order() {
    let src = "package p

func B() error { return errs.B }

func A() error { return errs.A }
";
    let names: Vec<String> = audit(src).origins.into_iter().map(|o| o.function).collect();
    assert_eq!(names, vec!["B".to_string(), "A".to_string()]);
}

#[test]
fn test_deep_nesting_is_lowered() {
    let depth = 200;
    let mut src = String::from("package p\n\nfunc D(x int) error {\n");
    for _ in 0..depth {
        src.push_str("if x > 0 {\n");
    }
    src.push_str("return errs.Deep\n");
    for _ in 0..depth {
        src.push_str("}\n");
    }
    src.push_str("return nil\n}\n");

    assert_eq!(descriptors_of(&src, "D"), vec!["Deep()".to_string()]);
}

#[test]
fn test_very_deep_blocks_are_audited_and_released() {
    let depth = 20_000;
    let mut src = String::from("package p\n\nfunc D() error {\n");
    src.push_str(&"{\n".repeat(depth));
    src.push_str("return errs.Deep\n");
    src.push_str(&"}\n".repeat(depth));
    src.push_str("}\n");

    let tree = parse(&src, "deep.go");
    let result = aggregate([&tree]);
    assert_eq!(result.origins.len(), 1);
    assert_eq!(result.origins[0].descriptors, vec!["Deep()".to_string()]);
    drop(tree);
}

#[test]
fn test_pass_mode_positions() {
    let src = "package usecase

func Loud() error {
\treturn apperrors.ErrInternal(\"done\")
}

func Quiet() error {
\treturn nil
}
";
    assert_eq!(
        pass_output(src, "usecase.go"),
        vec![
            "usecase.go:3:1:  -- Loud() ---".to_string(),
            "usecase.go:4:9: -- ErrInternal(\"done\",) --".to_string(),
            "usecase.go:7:1:  -- Quiet() ---".to_string(),
        ]
    );
}

#[test]
fn test_wrapped_then_sentinel() {
    let qualified = "package p

func F() error {
\te := NewError(\"x\")
\tif cond {
\t\treturn Wrap(\"msg: %s\", e)
\t}
\treturn pkg.SentinelErr
}
";
    assert_eq!(
        descriptors_of(qualified, "F"),
        vec!["Wrap(\"msg: %s\",)".to_string(), "SentinelErr()".to_string()]
    );

    let bare = qualified.replace("pkg.SentinelErr", "SentinelErr");
    assert_eq!(descriptors_of(&bare, "F"), vec!["Wrap(\"msg: %s\",)".to_string()]);
}

#[test]
fn test_identical_input_gives_identical_results() {
    let src = "package p

func F() error { return errs.A(1) }
func G() (int, error) { return 0, errs.B }
";
    assert_eq!(audit(src), audit(src));
}
