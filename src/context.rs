// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;

use crate::chunk::{Chunk, Scope};
use crate::notation::{Kind, Notation};
use crate::types::{ClassName, Referent, TypeName, TypeVariableName};

/// Enter a context node: compute the scope's class name, enrich the name
/// map, push the scope, and return the chunk for the context's child.
///
/// This is the only place names are bound and collisions resolved; once this
/// returns, every `name`/`type_ref` lookup under the new scope is total and
/// deterministic. Both the emitter and the flat-fit lookahead call it, so
/// measurement sees exactly the strings emission will.
pub(crate) fn enter(
    chunk: &Chunk,
    context: &Notation,
    name: Option<&str>,
    type_vars: &[TypeVariableName],
    child: &Notation,
) -> Chunk {
    let class_name = match chunk.scopes.last() {
        None => ClassName::top_level(&*chunk.package, name.unwrap_or("Object")),
        Some(top) => match name {
            Some(name) => top.class_name.nested(name),
            None => top.class_name.clone(),
        },
    };
    let new_scope = Scope {
        context: context.clone(),
        class_name: class_name.clone(),
    };

    // Simple names already claimed by the scope chain: each scope's
    // immediate child context names and type variables. A promoted
    // qualified name must not capture any of these.
    let mut names_in_scope: IndexMap<String, String> = IndexMap::new();
    for scope in chunk.scopes.iter().chain(std::iter::once(&new_scope)) {
        collect_scope_names(scope, &mut names_in_scope);
    }

    let mut names = (*chunk.names).clone();

    // Shorten every class reference nested under this scope's top-level
    // class to the shortest non-capturing suffix.
    let top_level = class_name.top_level_class();
    let nested_keys: Vec<(Referent, ClassName)> = names
        .keys()
        .filter_map(|key| match key {
            Referent::Type(TypeName::Class(class))
                if class.is_strictly_nested_under(&top_level) =>
            {
                Some((key.clone(), class.clone()))
            }
            _ => None,
        })
        .collect();
    for (key, class) in nested_keys {
        let shortened = shortened_name(&class, &class_name, &names_in_scope);
        names.remove_value(&key, &shortened);
        names.put(key, shortened);
    }

    // Bind type variables, displacing any entry that currently prints as
    // the same name. Shadowed values further down the stacks survive and
    // come back into view outside this scope.
    for type_var in type_vars {
        let bound = type_var.name().to_string();
        let displaced: Vec<Referent> = names
            .entries()
            .filter(|(_, value)| **value == bound)
            .map(|(key, _)| key.clone())
            .collect();
        for key in displaced {
            names.remove_value(&key, &bound);
        }
        names.put(Referent::Type(TypeName::Variable(type_var.clone())), bound);
    }

    // Bind the child's intrinsic name suggestions, promoting collisions
    // with underscores until the printed name is unique.
    for (tag, hint) in child.names() {
        let key = Referent::Tag(*tag);
        if names.get(&key).is_some() {
            continue;
        }
        let mut printed = hint.clone();
        while names.contains_value(&printed) {
            printed.push('_');
        }
        names.put(key, printed);
    }

    tracing::trace!(class = %class_name, "entering context scope");

    chunk.scoped(child.clone(), names, new_scope)
}

fn collect_scope_names(scope: &Scope, out: &mut IndexMap<String, String>) {
    if let Kind::Context { type_vars, .. } = scope.context.kind() {
        for type_var in type_vars {
            out.insert(type_var.name().to_string(), type_var.name().to_string());
        }
    }
    for child_context in scope.context.child_contexts() {
        if let Kind::Context {
            name: Some(name), ..
        } = child_context.kind()
        {
            out.insert(
                name.clone(),
                scope.class_name.nested(name).canonical_name(),
            );
        }
    }
}

/// The shortest dotted suffix of `class` that, from inside `scope`, still
/// denotes `class` without capturing a name already bound in the scope
/// chain. Falls back to the canonical name when every suffix is captured.
fn shortened_name(
    class: &ClassName,
    scope: &ClassName,
    names_in_scope: &IndexMap<String, String>,
) -> String {
    let class_names = class.simple_names();
    let scope_names = scope.simple_names();
    let mut common = 0;
    while common < class_names.len()
        && common < scope_names.len()
        && class_names[common] == scope_names[common]
    {
        common += 1;
    }
    // A class referring to itself still prints its simple name.
    let mut prefix = common.min(class_names.len() - 1);
    loop {
        let first = &class_names[prefix];
        match names_in_scope.get(first) {
            None => break,
            Some(canonical) => {
                let resolved = ClassName::from_parts(class.package(), &class_names[..=prefix]);
                if *canonical == resolved.canonical_name() {
                    break;
                }
            }
        }
        if prefix == 0 {
            return class.canonical_name();
        }
        prefix -= 1;
    }
    class_names[prefix..].join(".")
}
