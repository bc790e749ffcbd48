// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use pretty_assertions::assert_eq;

use crate::*;

fn config(width: usize, package: &str) -> PrintConfig {
    PrintConfig {
        width,
        indent_by: "  ".to_string(),
        package: package.to_string(),
    }
}

#[test]
fn nested_contexts_shorten_type_references() {
    let deep = ClassName::top_level("p", "Outer")
        .nested("Inner")
        .nested("Deep");
    let reference = || Notation::type_ref(deep.clone());

    let inner_ctx = Notation::context("Inner", vec![], reference());
    let outer_ctx = Notation::context(
        "Outer",
        vec![],
        reference().then(Notation::nl()).then(inner_ctx),
    );
    let doc = reference().then(Notation::nl()).then(outer_ctx);

    let names = doc.initial_names();
    assert_eq!(
        doc.render(&config(100, "p"), names).unwrap(),
        "p.Outer.Inner.Deep\nInner.Deep\nDeep"
    );
}

#[test]
fn sibling_context_names_block_capture() {
    // Outer contains a context named Shadow plus a reference to an unrelated
    // nested class ending in a Shadow segment: the promoted suffix must not
    // collide with the sibling context's simple name.
    let other = ClassName::top_level("p", "Outer")
        .nested("Shadow")
        .nested("Leaf");
    let shadow_ctx = Notation::context("Shadow", vec![], Notation::txt("shadow"));
    let outer_ctx = Notation::context(
        "Outer",
        vec![],
        Notation::type_ref(other.clone())
            .then(Notation::nl())
            .then(shadow_ctx),
    );
    let names = outer_ctx.initial_names();
    // Shadow resolves to p.Outer.Shadow, exactly the class the suffix starts
    // with, so the short form is allowed.
    assert_eq!(
        outer_ctx.render(&config(100, "p"), names).unwrap(),
        "Shadow.Leaf\nshadow"
    );
}

#[test]
fn captured_suffixes_fall_back_to_longer_forms() {
    // A type variable named Inner claims the simple name, so the nested
    // class cannot be shortened past the segment that would capture it.
    let deep = ClassName::top_level("p", "Outer")
        .nested("Inner")
        .nested("Deep");
    let ctx = Notation::context(
        "Outer",
        vec![TypeVariableName::new("Inner")],
        Notation::type_ref(deep.clone()),
    );
    let names = ctx.initial_names();
    assert_eq!(
        ctx.render(&config(80, "p"), names).unwrap(),
        "Outer.Inner.Deep"
    );
}

#[test]
fn colliding_suggestions_are_promoted_with_underscores() {
    let tag_a = Tag::fresh();
    let tag_b = Tag::fresh();
    let tag_c = Tag::fresh();

    let mut names = NameMap::new();
    names.put(Referent::Tag(tag_a), "x".to_string());
    names.put(Referent::Tag(tag_b), "y".to_string());
    let doc = Notation::context("C", vec![], Notation::name(tag_c, "x"));
    assert_eq!(doc.render(&config(40, ""), names).unwrap(), "x_");

    let mut names = NameMap::new();
    names.put(Referent::Tag(tag_a), "x".to_string());
    names.put(Referent::Tag(tag_b), "x_".to_string());
    let doc = Notation::context("C", vec![], Notation::name(tag_c, "x"));
    assert_eq!(doc.render(&config(40, ""), names).unwrap(), "x__");
}

#[test]
fn bound_tags_keep_their_existing_binding() {
    let tag = Tag::fresh();
    let mut names = NameMap::new();
    names.put(Referent::Tag(tag), "already".to_string());
    let doc = Notation::context("C", vec![], Notation::name(tag, "hint"));
    assert_eq!(doc.render(&config(40, ""), names).unwrap(), "already");
}

#[test]
fn type_variables_shadow_equal_printed_names() {
    let class_t = ClassName::top_level("q", "T");
    let var_t = TypeVariableName::new("T");
    let class_key = Referent::Type(TypeName::Class(class_t.clone()));

    let mut names = NameMap::new();
    // Canonical fallback underneath the import override, so shadowing the
    // simple name leaves the class reachable fully qualified.
    names.put(class_key.clone(), "q.T".to_string());
    names.put(class_key.clone(), "T".to_string());

    let body = Notation::type_ref(var_t.clone())
        .then(Notation::space())
        .then(Notation::type_ref(class_t.clone()));
    let ctx = Notation::context("Box", vec![var_t], body);
    let doc = ctx
        .then(Notation::nl())
        .then(Notation::type_ref(class_t.clone()));

    assert_eq!(
        doc.render(&config(80, ""), names).unwrap(),
        "T q.T\nT"
    );
}

#[test]
fn distinct_type_variables_share_a_printed_binding() {
    let plain = TypeVariableName::new("T");
    let bounded = TypeVariableName::bounded("T", vec![ClassName::top_level("p", "Base")]);
    assert_ne!(plain, bounded);

    let ctx = Notation::context("Box", vec![plain], Notation::type_ref(bounded));
    assert_eq!(
        ctx.render(&config(80, ""), NameMap::new()).unwrap(),
        "T"
    );
}

#[test]
fn anonymous_outermost_scope_resolves_as_object() {
    let thing = ClassName::top_level("p", "Object").nested("Thing");
    let doc = Notation::anonymous_context(vec![], Notation::type_ref(thing.clone()));
    let names = doc.initial_names();
    assert_eq!(doc.render(&config(80, "p"), names).unwrap(), "Thing");
}

#[test]
fn anonymous_nested_scope_inherits_the_class_name() {
    let deep = ClassName::top_level("p", "Outer").nested("Deep");
    let anon = Notation::anonymous_context(vec![], Notation::type_ref(deep.clone()));
    let outer = Notation::context("Outer", vec![], anon);
    let names = outer.initial_names();
    assert_eq!(outer.render(&config(80, "p"), names).unwrap(), "Deep");
}

#[test]
fn static_imports_print_the_member_name() {
    let owner = ClassName::top_level("java.util", "Objects");
    let doc = Notation::static_import(owner.clone(), "requireNonNull")
        .then(Notation::txt("(x)"));
    assert_eq!(
        doc.render(&config(80, ""), NameMap::new()).unwrap(),
        "requireNonNull(x)"
    );
    // The owner still shows up in the imports summary for the file emitter.
    assert_eq!(
        doc.initial_names()
            .get(&Referent::Type(TypeName::Class(owner))),
        Some(&"Objects".to_string())
    );
}

#[test]
fn no_import_keeps_references_fully_qualified() {
    let util = ClassName::top_level("q", "Util");
    let key = Referent::Type(TypeName::Class(util.clone()));

    let plain = Notation::type_ref(util.clone());
    assert_eq!(plain.initial_names().get(&key), Some(&"Util".to_string()));

    let suppressed = Notation::type_ref(util.clone()).no_import(["q.Util"]);
    assert_eq!(
        suppressed.initial_names().get(&key),
        Some(&"q.Util".to_string())
    );
    let names = suppressed.initial_names();
    assert_eq!(
        suppressed.render(&config(80, ""), names).unwrap(),
        "q.Util"
    );
}

#[test]
fn suppression_is_sticky_across_merges() {
    let util = ClassName::top_level("q", "Util");
    let key = Referent::Type(TypeName::Class(util.clone()));
    let doc = Notation::type_ref(util.clone())
        .no_import(["q.Util"])
        .then(Notation::type_ref(util.clone()));
    assert_eq!(doc.initial_names().get(&key), Some(&"q.Util".to_string()));
    let qualified: Vec<bool> = doc.imports().map(Import::is_qualified).collect();
    assert_eq!(qualified, vec![true]);
}

#[test]
fn nested_class_seeds_stay_canonical_outside_scopes() {
    let entry = ClassName::top_level("java.util", "Map").nested("Entry");
    let doc = Notation::type_ref(entry.clone());
    let names = doc.initial_names();
    assert_eq!(
        doc.render(&config(80, ""), names).unwrap(),
        "java.util.Map.Entry"
    );
}
