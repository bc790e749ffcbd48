// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use std::rc::Rc;

use crate::notation::Notation;
use crate::priority_map::NameMap;
use crate::types::ClassName;

/// One scheduled unit of printer work: a notation plus the ambient state it
/// must be emitted under.
///
/// Chunks are immutable; the derivation methods return new chunks. Every
/// shared field sits behind an `Rc`, so cloning a chunk (the lookahead
/// snapshots the whole work stack) costs a handful of reference bumps.
#[derive(Clone)]
pub(crate) struct Chunk {
    pub notation: Notation,
    /// Indent emitted after each line break.
    pub indent: Rc<str>,
    /// The ambient indent increment for `indent` nodes without an explicit
    /// prefix.
    pub indent_by: Rc<str>,
    /// Inside a forced single-line region.
    pub flat: bool,
    /// Referent to printed name.
    pub names: Rc<NameMap>,
    /// Active context scopes, outermost first.
    pub scopes: Rc<Vec<Scope>>,
    /// The enclosing package; used when the outermost scope computes its
    /// class name.
    pub package: Rc<str>,
}

/// An entered context paired with the class name its scope resolved to.
#[derive(Clone)]
pub(crate) struct Scope {
    pub context: Notation,
    pub class_name: ClassName,
}

impl Chunk {
    pub fn root(notation: Notation, indent_by: &str, names: NameMap, package: &str) -> Chunk {
        Chunk {
            notation,
            indent: Rc::from(""),
            indent_by: Rc::from(indent_by),
            flat: false,
            names: Rc::new(names),
            scopes: Rc::new(Vec::new()),
            package: Rc::from(package),
        }
    }

    /// The same ambient state around a different notation.
    pub fn with(&self, notation: Notation) -> Chunk {
        Chunk {
            notation,
            ..self.clone()
        }
    }

    /// Enter forced single-line mode for `notation`.
    pub fn flattened(&self, notation: Notation) -> Chunk {
        Chunk {
            notation,
            flat: true,
            ..self.clone()
        }
    }

    /// Extend the indent with `prefix` for `notation`. Nested indents
    /// accumulate.
    pub fn indented(&self, notation: Notation, prefix: &str) -> Chunk {
        let mut indent = String::with_capacity(self.indent.len() + prefix.len());
        indent.push_str(&self.indent);
        indent.push_str(prefix);
        Chunk {
            notation,
            indent: Rc::from(indent),
            ..self.clone()
        }
    }

    /// Enter a resolved context scope: `notation` is the context's child,
    /// `names` the enriched map, `scope` the newly pushed scope.
    pub fn scoped(&self, notation: Notation, names: NameMap, scope: Scope) -> Chunk {
        let mut scopes = (*self.scopes).clone();
        scopes.push(scope);
        Chunk {
            notation,
            names: Rc::new(names),
            scopes: Rc::new(scopes),
            ..self.clone()
        }
    }
}
