// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use std::io;

use pretty_assertions::assert_eq;

use crate::*;

fn config(width: usize) -> PrintConfig {
    PrintConfig {
        width,
        ..PrintConfig::default()
    }
}

fn render(doc: &Notation, width: usize) -> String {
    doc.render(&config(width), NameMap::new()).unwrap()
}

fn call_doc() -> Notation {
    let expanded = Notation::nl()
        .then(Notation::txt("a,"))
        .then(Notation::nl())
        .then(Notation::txt("b"))
        .indent_with("  ");
    Notation::txt("foo(")
        .then(Notation::txt("a, b").or(expanded))
        .then(Notation::txt(")"))
}

#[test]
fn choice_fits_on_one_line() {
    assert_eq!(render(&call_doc(), 80), "foo(a, b)");
}

#[test]
fn choice_wraps_when_too_narrow() {
    assert_eq!(render(&call_doc(), 6), "foo(\n  a,\n  b)");
}

#[test]
fn hoisted_separators_flip_together() {
    let items = vec![
        Notation::txt("one"),
        Notation::txt("two"),
        Notation::txt("three"),
    ];
    let separator = Notation::txt(", ").or(Notation::txt(",\n"));
    let doc = Notation::txt("(")
        .then(Notation::join(items, &separator))
        .then(Notation::txt(")"));
    assert_eq!(render(&doc, 100), "(one, two, three)");
    assert_eq!(render(&doc, 6), "(one,\ntwo,\nthree)");
}

#[test]
fn trailing_whitespace_is_suppressed() {
    let doc = Notation::txt("hello")
        .then(Notation::txt(" "))
        .then(Notation::nl())
        .then(Notation::txt("world"));
    assert_eq!(render(&doc, 80), "hello\nworld");
    assert_eq!(render(&doc, 1), "hello\nworld");
}

#[test]
fn statement_stays_on_one_line_without_inner_choices() {
    let doc = Notation::txt("return foo(a, b)")
        .then(Notation::txt(";"))
        .statement();
    assert_eq!(render(&doc, 80), "return foo(a, b);");
    assert_eq!(render(&doc, 3), "return foo(a, b);");
}

#[test]
fn statement_reconsiders_inner_choice() {
    let wrapped = Notation::nl().then(Notation::txt("a")).indent();
    let doc = Notation::txt("x = f(")
        .then(Notation::txt("a").or(wrapped))
        .then(Notation::txt(")"))
        .statement();
    assert_eq!(render(&doc, 80), "x = f(a)");
    assert_eq!(render(&doc, 4), "x = f(\n  a)");
}

#[test]
fn newline_under_flat_forces_expanded_branch() {
    let flat_with_break = Notation::txt("x")
        .then(Notation::nl())
        .then(Notation::txt("y"))
        .flat();
    let doc = flat_with_break.or(Notation::txt("z"));
    assert_eq!(render(&doc, 80), "z");
}

#[test]
fn forced_flat_choice_takes_the_first_branch() {
    let doc = Notation::txt("a").or(Notation::txt("b")).flat();
    assert_eq!(render(&doc, 1), "a");
}

#[test]
fn text_never_breaks() {
    assert_eq!(render(&Notation::txt("ab"), 1), "ab");
}

#[test]
fn literal_wrappers_are_transparent() {
    let doc = Notation::literal(Notation::txt("x")).then(Notation::txt("y"));
    assert_eq!(render(&doc, 80), "xy");
    assert_eq!(render(&Notation::literal(call_doc()), 6), "foo(\n  a,\n  b)");
}

#[test]
fn empty_notations_print_nothing() {
    assert_eq!(render(&Notation::empty(), 80), "");
    assert_eq!(render(&Notation::empty().indent(), 80), "");
    assert_eq!(render(&Notation::empty().or(Notation::empty()), 80), "");
}

#[test]
fn zero_width_is_rejected() {
    let err = Notation::txt("x")
        .render(&config(0), NameMap::new())
        .unwrap_err();
    assert!(matches!(err, PrintError::ZeroWidth));
}

#[test]
fn unresolved_name_halts_emission() {
    let doc = Notation::name(Tag::fresh(), "x");
    let err = doc.render(&config(80), NameMap::new()).unwrap_err();
    assert!(matches!(err, PrintError::Unresolved(_)));
}

#[test]
fn sink_errors_surface() {
    struct FailingSink;
    impl io::Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("sink closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
    let mut sink = FailingSink;
    let err = print(&Notation::txt("x"), &config(10), NameMap::new(), &mut sink).unwrap_err();
    assert!(matches!(err, PrintError::Output(_)));
}

#[test]
fn indent_prefixes_accumulate() {
    let deep = Notation::nl().then(Notation::txt("x")).indent_with("  ");
    let doc = Notation::txt("a").then(
        deep.then(Notation::nl())
            .then(Notation::txt("y"))
            .indent_with("  "),
    );
    assert_eq!(render(&doc, 80), "a\n    x\n  y");
}

#[test]
fn indent_without_prefix_uses_ambient_increment() {
    let doc = Notation::txt("a").then(Notation::nl().then(Notation::txt("b")).indent());
    let narrow_tabs = PrintConfig {
        width: 80,
        indent_by: "\t".to_string(),
        package: String::new(),
    };
    assert_eq!(doc.render(&narrow_tabs, NameMap::new()).unwrap(), "a\n\tb");
    assert_eq!(render(&doc, 80), "a\n  b");
}

#[test]
fn blank_lines_carry_no_indent() {
    let doc = Notation::txt("a")
        .then(Notation::nl())
        .then(Notation::nl())
        .then(Notation::txt("b"))
        .indent_with("  ");
    assert_eq!(render(&doc, 80), "a\n\n  b");
}

#[test]
fn lookahead_counts_pending_work() {
    let choice =
        Notation::txt("ab").or(Notation::txt("a").then(Notation::nl()).then(Notation::txt("b")));
    let doc = choice.then(Notation::txt("cdef"));
    assert_eq!(render(&doc, 8), "abcdef");
    assert_eq!(render(&doc, 4), "a\nbcdef");
}

#[test]
fn lookahead_stops_at_line_breaks() {
    let left = Notation::txt("aa")
        .then(Notation::nl())
        .then(Notation::txt("bbbbbbbb"));
    let doc = left.or(Notation::txt("zz"));
    assert_eq!(render(&doc, 4), "aa\nbbbbbbbb");
}

#[test]
fn to_code_uses_default_settings() {
    assert_eq!(call_doc().to_code().unwrap(), "foo(a, b)");
}

#[test]
fn deeply_nested_indents_print_without_recursion() {
    let mut doc = Notation::nl().then(Notation::txt("x"));
    for _ in 0..4_000 {
        doc = doc.indent_with(" ");
    }
    assert_eq!(render(&doc, 80), format!("\n{}x", " ".repeat(4_000)));
}

#[test]
fn deeply_nested_choices_resolve_without_recursion() {
    let mut doc = Notation::txt("end");
    for _ in 0..500 {
        doc = Notation::txt("x").then(doc).or(Notation::txt("y"));
    }
    let flat = render(&doc, 600);
    assert_eq!(flat, format!("{}end", "x".repeat(500)));
}
