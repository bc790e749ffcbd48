// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;
use once_cell::unsync::Lazy;

use crate::error::{PrintError, StructuralError};
use crate::printer::{print, PrintConfig};
use crate::priority_map::NameMap;
use crate::types::{ClassName, Import, Referent, Tag, TypeName, TypeVariableName};

// -------------------------------------------------------------------------------------------------
// Notation
// -------------------------------------------------------------------------------------------------

/// An immutable tree of layout operators describing source text with
/// alternative layouts.
///
/// Notations are cheap to clone (reference counted) and never mutated after
/// construction. The smart constructors normalize on the way in: `Empty` is
/// dropped from concatenations, nested concatenations are spliced, and
/// adjacent text fuses.
pub struct Notation(Rc<NotationInner>);

pub(crate) struct NotationInner {
    kind: Kind,
    /// Tag to suggested printed name, merged from the subtree. A `context`
    /// node introduces a scope and exposes an empty map upward.
    names: Rc<IndexMap<Tag, String>>,
    /// Classes referenced by `type_ref` and `static_import` in the subtree,
    /// with `no_import` suppression already applied.
    imports: Rc<IndexMap<ClassName, Import>>,
    /// The outermost `context` nodes of the subtree; a context masks the
    /// contexts nested inside it.
    child_contexts: Vec<Notation>,
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) enum Kind {
    Empty,
    Text(String),
    NewLine,
    Concat(Vec<Notation>),
    Choice(Notation, Notation),
    Flat(Notation),
    Indent(Option<String>, Notation),
    Name(Tag, String),
    TypeRef(TypeName),
    StaticImportRef(ClassName, String),
    Literal(Notation),
    Statement(Notation),
    Context {
        name: Option<String>,
        type_vars: Vec<TypeVariableName>,
        child: Notation,
    },
    NoImport(Notation, BTreeSet<String>),
}

impl Clone for Notation {
    fn clone(&self) -> Notation {
        Notation(Rc::clone(&self.0))
    }
}

/// Structural equality over the operator payloads. Derived summaries are a
/// deterministic function of the payload and do not participate.
impl PartialEq for Notation {
    fn eq(&self, other: &Notation) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0.kind == other.0.kind
    }
}

impl Eq for Notation {}

impl Hash for Notation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.kind.hash(state);
    }
}

impl fmt::Debug for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.kind.fmt(f)
    }
}

// -----------------------------------------------
// Thread Locals
// -----------------------------------------------

thread_local! {
    static EMPTY: Lazy<Notation> = Lazy::new(|| Notation::mk(Kind::Empty));
    static NEWLINE: Lazy<Notation> = Lazy::new(|| Notation::mk(Kind::NewLine));
    static SPACE: Lazy<Notation> = Lazy::new(|| Notation::mk(Kind::Text(" ".to_string())));
    static EMPTY_NAMES: Lazy<Rc<IndexMap<Tag, String>>> = Lazy::new(|| Rc::new(IndexMap::new()));
    static EMPTY_IMPORTS: Lazy<Rc<IndexMap<ClassName, Import>>> =
        Lazy::new(|| Rc::new(IndexMap::new()));
    static TXT_CACHE: RefCell<HashMap<String, Notation>> = RefCell::new(HashMap::new());
}

fn empty_names() -> Rc<IndexMap<Tag, String>> {
    EMPTY_NAMES.with(|lazy| Rc::clone(lazy))
}

fn empty_imports() -> Rc<IndexMap<ClassName, Import>> {
    EMPTY_IMPORTS.with(|lazy| Rc::clone(lazy))
}

impl Notation {
    // -------------------------------------------
    // Core Constructors
    // -------------------------------------------

    /// The empty notation. Produces no output and is the identity for
    /// [`Notation::then`].
    pub fn empty() -> Notation {
        EMPTY.with(|lazy| (**lazy).clone())
    }

    /// A line break followed by the current indent.
    pub fn nl() -> Notation {
        NEWLINE.with(|lazy| (**lazy).clone())
    }

    /// A single ASCII space.
    pub fn space() -> Notation {
        SPACE.with(|lazy| (**lazy).clone())
    }

    /// Literal text.
    ///
    /// `""` is [`Notation::empty`], `"\n"` is [`Notation::nl`], and embedded
    /// newlines compile into interleaved text and line breaks. Results are
    /// memoized per thread so repeated input strings share one notation.
    ///
    /// # Example
    /// ```rust
    /// use java_notation::Notation;
    ///
    /// assert_eq!(
    ///     Notation::txt("a\nb"),
    ///     Notation::txt("a").then(Notation::nl()).then(Notation::txt("b"))
    /// );
    /// assert_eq!(Notation::txt(""), Notation::empty());
    /// ```
    pub fn txt<S: Into<String>>(text: S) -> Notation {
        let text = text.into();
        if text.is_empty() {
            return Notation::empty();
        }
        TXT_CACHE.with(|cache| {
            if let Some(found) = cache.borrow().get(&text) {
                return found.clone();
            }
            let built = Notation::compile_text(&text);
            cache.borrow_mut().insert(text, built.clone());
            built
        })
    }

    fn compile_text(text: &str) -> Notation {
        if !text.contains('\n') {
            return Notation::mk(Kind::Text(text.to_string()));
        }
        let mut parts = Vec::new();
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                parts.push(Notation::nl());
            }
            if !line.is_empty() {
                parts.push(Notation::mk(Kind::Text(line.to_string())));
            }
        }
        Notation::concat_parts(parts)
    }

    /// A named placeholder. The printed string is resolved through the
    /// ambient name map; the enclosing context binds `tag` using `hint` as
    /// the suggestion, promoting it with underscores on collision.
    pub fn name<S: Into<String>>(tag: Tag, hint: S) -> Notation {
        Notation::mk(Kind::Name(tag, hint.into()))
    }

    /// A type reference, resolved through the ambient name map.
    pub fn type_ref<T: Into<TypeName>>(type_name: T) -> Notation {
        Notation::mk(Kind::TypeRef(type_name.into()))
    }

    /// A statically imported member: always printed as the bare member name.
    pub fn static_import<S: Into<String>>(owner: ClassName, member: S) -> Notation {
        Notation::mk(Kind::StaticImportRef(owner, member.into()))
    }

    /// Marker around an embedded emitable's notation. Transparent to the
    /// printer.
    pub fn literal(inner: Notation) -> Notation {
        Notation::mk(Kind::Literal(inner))
    }

    /// A named nested-class scope around `child`. Entering the scope
    /// computes the nested class name, shortens qualified references, binds
    /// `type_vars`, and resolves name collisions.
    ///
    /// # Example
    /// ```rust
    /// use java_notation::{ClassName, Notation, PrintConfig};
    ///
    /// let entry = ClassName::top_level("java.util", "Map").nested("Entry");
    /// let doc = Notation::context("Map", vec![], Notation::type_ref(entry));
    /// let config = PrintConfig {
    ///     width: 80,
    ///     indent_by: "  ".to_string(),
    ///     package: "java.util".to_string(),
    /// };
    /// let names = doc.initial_names();
    /// // Inside the Map scope the nested class prints by its simple name.
    /// assert_eq!(doc.render(&config, names).unwrap(), "Entry");
    /// ```
    pub fn context<S: Into<String>>(
        name: S,
        type_vars: Vec<TypeVariableName>,
        child: Notation,
    ) -> Notation {
        Notation::mk(Kind::Context {
            name: Some(name.into()),
            type_vars,
            child,
        })
    }

    /// A scope without a class name of its own: it inherits the enclosing
    /// scope's class (or `Object` at the outermost level).
    pub fn anonymous_context(type_vars: Vec<TypeVariableName>, child: Notation) -> Notation {
        Notation::mk(Kind::Context {
            name: None,
            type_vars,
            child,
        })
    }

    // -------------------------------------------
    // Combinators
    // -------------------------------------------

    /// Sequential composition.
    ///
    /// Normalizes on construction: `Empty` disappears, nested concatenations
    /// are spliced flat, and adjacent text fuses into one node.
    ///
    /// # Example
    /// ```rust
    /// use java_notation::Notation;
    ///
    /// let doc = Notation::txt("foo").then(Notation::txt("bar"));
    /// assert_eq!(doc, Notation::txt("foobar"));
    /// assert_eq!(doc.then(Notation::empty()), Notation::txt("foobar"));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics with [`StructuralError::TagConflict`] when the two sides
    /// suggest different printed names for the same tag.
    pub fn then(self, other: Notation) -> Notation {
        let mut parts = Vec::new();
        push_spliced(&mut parts, self);
        push_spliced(&mut parts, other);
        Notation::concat_parts(parts)
    }

    /// Layout alternative: prefer `self` when it fits flat on the rest of
    /// the current line, else print `other`.
    ///
    /// # Example
    /// ```rust
    /// use java_notation::{NameMap, Notation, PrintConfig};
    ///
    /// let doc = Notation::txt("a b")
    ///     .or(Notation::txt("a").then(Notation::nl()).then(Notation::txt("b")));
    /// let narrow = PrintConfig { width: 2, ..PrintConfig::default() };
    /// assert_eq!(doc.render(&narrow, NameMap::new()).unwrap(), "a\nb");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics with [`StructuralError::TagConflict`] when the alternatives
    /// suggest different printed names for the same tag.
    pub fn or(self, other: Notation) -> Notation {
        Notation::mk(Kind::Choice(self, other))
    }

    /// Force single-line mode: inside, choices collapse to their first
    /// alternative and any line break measures as too long. Identity on
    /// text, `Empty`, and already-flat notations.
    pub fn flat(self) -> Notation {
        if matches!(self.kind(), Kind::Empty | Kind::Text(_) | Kind::Flat(_)) {
            return self;
        }
        Notation::mk(Kind::Flat(self))
    }

    /// Indent line breaks within `self` by the ambient indent increment.
    pub fn indent(self) -> Notation {
        Notation::mk(Kind::Indent(None, self))
    }

    /// Indent line breaks within `self` by an explicit prefix.
    pub fn indent_with<S: Into<String>>(self, prefix: S) -> Notation {
        Notation::mk(Kind::Indent(Some(prefix.into()), self))
    }

    /// A statement unit: the printer reconsiders the flat/expanded decision
    /// for the whole statement at once.
    ///
    /// # Panics
    ///
    /// Panics with [`StructuralError::NestedStatement`] when `self` already
    /// contains a statement.
    pub fn statement(self) -> Notation {
        if self.contains_statement() {
            panic!("{}", StructuralError::NestedStatement);
        }
        Notation::mk(Kind::Statement(self))
    }

    /// Force the named canonical classes to print fully qualified within
    /// `self`: their entries in the imports summary are marked suppressed,
    /// so seeding leaves them canonical and the import block skips them.
    pub fn no_import<I, S>(self, suppressed: I) -> Notation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let suppressed: BTreeSet<String> = suppressed.into_iter().map(Into::into).collect();
        Notation::mk(Kind::NoImport(self, suppressed))
    }

    // -------------------------------------------
    // Collectors
    // -------------------------------------------

    /// Fold `items` with `separator` between adjacent pairs.
    ///
    /// A [`Choice`](Notation::or) separator is hoisted: the result is one
    /// outer choice between the whole fold with the left separator forced
    /// flat, and the fold with the right separator. A single layout decision
    /// then flips every separator at once.
    ///
    /// # Example
    /// ```rust
    /// use java_notation::{NameMap, Notation, PrintConfig};
    ///
    /// let items = vec![Notation::txt("a"), Notation::txt("b"), Notation::txt("c")];
    /// let sep = Notation::txt(", ").or(Notation::txt(",\n"));
    /// let doc = Notation::join(items, &sep);
    /// let narrow = PrintConfig { width: 4, ..PrintConfig::default() };
    /// assert_eq!(doc.render(&narrow, NameMap::new()).unwrap(), "a,\nb,\nc");
    /// ```
    pub fn join<I>(items: I, separator: &Notation) -> Notation
    where
        I: IntoIterator<Item = Notation>,
    {
        let items: Vec<Notation> = items.into_iter().collect();
        if items.is_empty() {
            return Notation::empty();
        }
        if let Kind::Choice(left, right) = separator.kind() {
            let flat_fold = Notation::fold_with(&items, left).flat();
            let full_fold = Notation::fold_with(&items, right);
            return flat_fold.or(full_fold);
        }
        Notation::fold_with(&items, separator)
    }

    fn fold_with(items: &[Notation], separator: &Notation) -> Notation {
        let mut out = items[0].clone();
        for item in &items[1..] {
            out = out.then(separator.clone()).then(item.clone());
        }
        out
    }

    /// Lift every inner choice in `items` (possibly wrapped by indents or
    /// statements, which are re-applied after unwrapping) into a single
    /// outer choice: the left branch concatenates every item's flat
    /// alternative, the right the full items. Returns the plain
    /// concatenation when no item carries a choice.
    ///
    /// # Example
    /// ```rust
    /// use java_notation::{NameMap, Notation, PrintConfig};
    ///
    /// let wrap = |s: &str| Notation::txt(s).or(Notation::nl().then(Notation::txt(s)));
    /// let doc = Notation::hoist_choice(vec![wrap("a"), wrap("b")]);
    ///
    /// let wide = PrintConfig { width: 80, ..PrintConfig::default() };
    /// assert_eq!(doc.render(&wide, NameMap::new()).unwrap(), "ab");
    /// // Too narrow for either: both choices expand together.
    /// let narrow = PrintConfig { width: 1, ..PrintConfig::default() };
    /// assert_eq!(doc.render(&narrow, NameMap::new()).unwrap(), "\na\nb");
    /// ```
    pub fn hoist_choice<I>(items: I) -> Notation
    where
        I: IntoIterator<Item = Notation>,
    {
        let items: Vec<Notation> = items.into_iter().collect();
        let mut saw_choice = false;
        let mut flats = Vec::with_capacity(items.len());
        for item in &items {
            flats.push(Notation::flat_alternative(item, &mut saw_choice));
        }
        let full = Notation::concat_of(items);
        if !saw_choice {
            return full;
        }
        Notation::concat_of(flats).flat().or(full)
    }

    fn flat_alternative(item: &Notation, saw_choice: &mut bool) -> Notation {
        match item.kind() {
            Kind::Choice(left, _) => {
                *saw_choice = true;
                left.clone()
            }
            Kind::Indent(prefix, inner) => {
                let inner = Notation::flat_alternative(inner, saw_choice);
                match prefix {
                    Some(prefix) => inner.indent_with(prefix.clone()),
                    None => inner.indent(),
                }
            }
            Kind::Statement(inner) => Notation::flat_alternative(inner, saw_choice).statement(),
            _ => item.clone(),
        }
    }

    fn concat_of(items: Vec<Notation>) -> Notation {
        let mut out = Notation::empty();
        for item in items {
            out = out.then(item);
        }
        out
    }

    // -------------------------------------------
    // Queries
    // -------------------------------------------

    /// True when printing `self` can emit no characters at all.
    pub fn is_empty(&self) -> bool {
        match self.kind() {
            Kind::Empty => true,
            Kind::Text(text) => text.is_empty(),
            Kind::NewLine => false,
            Kind::Concat(children) => children.iter().all(Notation::is_empty),
            Kind::Choice(left, right) => left.is_empty() && right.is_empty(),
            Kind::Flat(child)
            | Kind::Indent(_, child)
            | Kind::Literal(child)
            | Kind::Statement(child)
            | Kind::NoImport(child, _) => child.is_empty(),
            Kind::Context { child, .. } => child.is_empty(),
            Kind::Name(..) | Kind::TypeRef(_) | Kind::StaticImportRef(..) => false,
        }
    }

    /// Tag to suggested printed name, merged over the subtree. Contexts do
    /// not leak their child's suggestions upward.
    pub fn names(&self) -> &IndexMap<Tag, String> {
        &self.0.names
    }

    /// The classes referenced in the subtree, with suppression applied.
    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        self.0.imports.values()
    }

    /// A name map seeded with each referenced class's suggested printed
    /// name. Callers layer import overrides and extra bindings on top.
    pub fn initial_names(&self) -> NameMap {
        let mut names = NameMap::new();
        for import in self.0.imports.values() {
            names.put(
                Referent::Type(TypeName::Class(import.class().clone())),
                import.suggested_name(),
            );
        }
        names
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.0.kind
    }

    pub(crate) fn child_contexts(&self) -> &[Notation] {
        &self.0.child_contexts
    }

    fn contains_statement(&self) -> bool {
        match self.kind() {
            Kind::Statement(_) => true,
            Kind::Concat(children) => children.iter().any(Notation::contains_statement),
            Kind::Choice(left, right) => {
                left.contains_statement() || right.contains_statement()
            }
            Kind::Flat(child)
            | Kind::Indent(_, child)
            | Kind::Literal(child)
            | Kind::NoImport(child, _) => child.contains_statement(),
            Kind::Context { child, .. } => child.contains_statement(),
            _ => false,
        }
    }

    // -------------------------------------------
    // Rendering
    // -------------------------------------------

    /// Print into a fresh string with the given settings and name seeding.
    pub fn render(&self, config: &PrintConfig, names: NameMap) -> Result<String, PrintError> {
        let mut out = Vec::new();
        print(self, config, names, &mut out)?;
        Ok(String::from_utf8(out).expect("printer emits UTF-8"))
    }

    /// Print as source code: width 100, two-space indent, names seeded from
    /// the imports summary.
    pub fn to_code(&self) -> Result<String, PrintError> {
        self.render(&PrintConfig::default(), self.initial_names())
    }

    // -------------------------------------------
    // Diagnostics
    // -------------------------------------------

    /// A notation describing this notation's own shape, for error messages
    /// and debugging. [`fmt::Display`] renders it at width 80 with `"| "`
    /// indentation.
    pub fn to_notation(&self) -> Notation {
        match self.kind() {
            Kind::Empty => Notation::txt("nil"),
            Kind::Text(text) => Notation::txt(format!("text({text:?})")),
            Kind::NewLine => Notation::txt("nl"),
            Kind::Concat(children) => {
                Notation::diagnostic_call("concat", children.iter().map(Notation::to_notation))
            }
            Kind::Choice(left, right) => {
                Notation::diagnostic_call("choice", [left.to_notation(), right.to_notation()])
            }
            Kind::Flat(child) => Notation::diagnostic_call("flat", [child.to_notation()]),
            Kind::Indent(prefix, child) => match prefix {
                Some(prefix) => Notation::diagnostic_call(
                    "indent",
                    [Notation::txt(format!("{prefix:?}")), child.to_notation()],
                ),
                None => Notation::diagnostic_call("indent", [child.to_notation()]),
            },
            Kind::Name(tag, hint) => Notation::txt(format!("name({tag}, {hint:?})")),
            Kind::TypeRef(type_name) => {
                Notation::txt(format!("type_ref({})", type_name.canonical_name()))
            }
            Kind::StaticImportRef(owner, member) => Notation::txt(format!(
                "static_import({}, {member:?})",
                owner.canonical_name()
            )),
            Kind::Literal(child) => Notation::diagnostic_call("literal", [child.to_notation()]),
            Kind::Statement(child) => {
                Notation::diagnostic_call("statement", [child.to_notation()])
            }
            Kind::Context {
                name,
                type_vars,
                child,
            } => {
                let shown = name.as_deref().unwrap_or("<anonymous>");
                let vars = type_vars
                    .iter()
                    .map(TypeVariableName::name)
                    .collect::<Vec<_>>()
                    .join(", ");
                Notation::diagnostic_call(
                    &format!("context[{shown}; {vars}]"),
                    [child.to_notation()],
                )
            }
            Kind::NoImport(child, suppressed) => {
                let list = suppressed
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Notation::diagnostic_call(&format!("no_import[{list}]"), [child.to_notation()])
            }
        }
    }

    fn diagnostic_call<I>(head: &str, args: I) -> Notation
    where
        I: IntoIterator<Item = Notation>,
    {
        let separator = Notation::txt(", ").or(Notation::txt(",\n"));
        let body = Notation::join(args, &separator);
        Notation::txt(format!("{head}("))
            .then(body.indent())
            .then(Notation::txt(")"))
    }

    // -------------------------------------------
    // Construction
    // -------------------------------------------

    fn mk(kind: Kind) -> Notation {
        let names = compute_names(&kind);
        let imports = compute_imports(&kind);
        let child_contexts = compute_child_contexts(&kind);
        Notation(Rc::new(NotationInner {
            kind,
            names,
            imports,
            child_contexts,
        }))
    }

    fn concat_parts(mut parts: Vec<Notation>) -> Notation {
        match parts.len() {
            0 => Notation::empty(),
            1 => parts.remove(0),
            _ => Notation::mk(Kind::Concat(parts)),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = PrintConfig {
            width: 80,
            indent_by: "| ".to_string(),
            package: String::new(),
        };
        let rendered = self
            .to_notation()
            .render(&config, NameMap::new())
            .map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

// -----------------------------------------------
// Normalization Helpers
// -----------------------------------------------

fn push_spliced(parts: &mut Vec<Notation>, notation: Notation) {
    if matches!(notation.kind(), Kind::Empty) {
        return;
    }
    if let Kind::Concat(children) = notation.kind() {
        let children = children.clone();
        for child in children {
            push_fused(parts, child);
        }
        return;
    }
    push_fused(parts, notation);
}

fn push_fused(parts: &mut Vec<Notation>, notation: Notation) {
    let fused = match (parts.last(), notation.kind()) {
        (Some(last), Kind::Text(text)) => match last.kind() {
            Kind::Text(previous) => Some(Notation::mk(Kind::Text(format!("{previous}{text}")))),
            _ => None,
        },
        _ => None,
    };
    match fused {
        Some(fused) => {
            parts.pop();
            parts.push(fused);
        }
        None => parts.push(notation),
    }
}

// -----------------------------------------------
// Derived Summaries
// -----------------------------------------------

fn compute_names(kind: &Kind) -> Rc<IndexMap<Tag, String>> {
    match kind {
        Kind::Name(tag, hint) => {
            let mut names = IndexMap::new();
            names.insert(*tag, hint.clone());
            Rc::new(names)
        }
        Kind::Concat(children) => {
            merged_names(children.iter().map(|child| &child.0.names))
        }
        Kind::Choice(left, right) => merged_names([&left.0.names, &right.0.names]),
        Kind::Flat(child)
        | Kind::Indent(_, child)
        | Kind::Literal(child)
        | Kind::Statement(child)
        | Kind::NoImport(child, _) => Rc::clone(&child.0.names),
        Kind::Context { .. } => empty_names(),
        Kind::Empty | Kind::Text(_) | Kind::NewLine | Kind::TypeRef(_)
        | Kind::StaticImportRef(..) => empty_names(),
    }
}

fn merged_names<'a, I>(maps: I) -> Rc<IndexMap<Tag, String>>
where
    I: IntoIterator<Item = &'a Rc<IndexMap<Tag, String>>>,
{
    let populated: Vec<&Rc<IndexMap<Tag, String>>> =
        maps.into_iter().filter(|map| !map.is_empty()).collect();
    match populated.len() {
        0 => empty_names(),
        1 => Rc::clone(populated[0]),
        _ => {
            let mut merged = IndexMap::new();
            for map in populated {
                for (tag, hint) in map.iter() {
                    match merged.get(tag) {
                        None => {
                            merged.insert(*tag, hint.clone());
                        }
                        Some(existing) if existing == hint => {}
                        Some(existing) => panic!(
                            "{}",
                            StructuralError::TagConflict {
                                tag: *tag,
                                existing: existing.clone(),
                                proposed: hint.clone(),
                            }
                        ),
                    }
                }
            }
            Rc::new(merged)
        }
    }
}

fn compute_imports(kind: &Kind) -> Rc<IndexMap<ClassName, Import>> {
    match kind {
        Kind::TypeRef(TypeName::Class(class)) => {
            let mut imports = IndexMap::new();
            imports.insert(class.clone(), Import::new(class.clone()));
            Rc::new(imports)
        }
        Kind::StaticImportRef(owner, _) => {
            let mut imports = IndexMap::new();
            imports.insert(owner.clone(), Import::new(owner.clone()));
            Rc::new(imports)
        }
        Kind::Concat(children) => {
            merged_imports(children.iter().map(|child| &child.0.imports))
        }
        Kind::Choice(left, right) => merged_imports([&left.0.imports, &right.0.imports]),
        Kind::Flat(child)
        | Kind::Indent(_, child)
        | Kind::Literal(child)
        | Kind::Statement(child) => Rc::clone(&child.0.imports),
        Kind::Context { child, .. } => Rc::clone(&child.0.imports),
        Kind::NoImport(child, suppressed) => {
            if suppressed.is_empty() {
                return Rc::clone(&child.0.imports);
            }
            let mut imports = (*child.0.imports).clone();
            for (_, import) in imports.iter_mut() {
                if suppressed.contains(&import.class().canonical_name()) {
                    *import = Import::qualified(import.class().clone());
                }
            }
            Rc::new(imports)
        }
        Kind::Empty | Kind::Text(_) | Kind::NewLine | Kind::Name(..)
        | Kind::TypeRef(TypeName::Variable(_)) => empty_imports(),
    }
}

fn merged_imports<'a, I>(maps: I) -> Rc<IndexMap<ClassName, Import>>
where
    I: IntoIterator<Item = &'a Rc<IndexMap<ClassName, Import>>>,
{
    let populated: Vec<&Rc<IndexMap<ClassName, Import>>> =
        maps.into_iter().filter(|map| !map.is_empty()).collect();
    match populated.len() {
        0 => empty_imports(),
        1 => Rc::clone(populated[0]),
        _ => {
            let mut merged: IndexMap<ClassName, Import> = IndexMap::new();
            for map in populated {
                for (class, import) in map.iter() {
                    match merged.get(class) {
                        Some(existing) if existing.is_qualified() || !import.is_qualified() => {}
                        _ => {
                            merged.insert(class.clone(), import.clone());
                        }
                    }
                }
            }
            Rc::new(merged)
        }
    }
}

fn compute_child_contexts(kind: &Kind) -> Vec<Notation> {
    fn of_child(child: &Notation) -> Vec<Notation> {
        if matches!(child.kind(), Kind::Context { .. }) {
            vec![child.clone()]
        } else {
            child.0.child_contexts.clone()
        }
    }

    match kind {
        Kind::Concat(children) => children.iter().flat_map(|child| of_child(child)).collect(),
        Kind::Choice(left, right) => {
            let mut contexts = of_child(left);
            contexts.extend(of_child(right));
            contexts
        }
        Kind::Flat(child)
        | Kind::Indent(_, child)
        | Kind::Literal(child)
        | Kind::Statement(child)
        | Kind::NoImport(child, _) => of_child(child),
        Kind::Context { child, .. } => of_child(child),
        _ => Vec::new(),
    }
}
