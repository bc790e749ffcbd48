// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// -------------------------------------------------------------------------------------------------
// Class Names
// -------------------------------------------------------------------------------------------------

/// A Java class reference: a package plus a non-empty chain of simple names,
/// outermost first.
///
/// # Example
/// ```rust
/// use java_notation::ClassName;
///
/// let entry = ClassName::top_level("java.util", "Map").nested("Entry");
/// assert_eq!(entry.canonical_name(), "java.util.Map.Entry");
/// assert_eq!(entry.simple_name(), "Entry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: String,
    names: Vec<String>,
}

impl ClassName {
    /// A top-level class in `package` (which may be empty for the default
    /// package).
    pub fn top_level<P: Into<String>, N: Into<String>>(package: P, name: N) -> ClassName {
        ClassName {
            package: package.into(),
            names: vec![name.into()],
        }
    }

    pub(crate) fn from_parts(package: &str, names: &[String]) -> ClassName {
        ClassName {
            package: package.to_string(),
            names: names.to_vec(),
        }
    }

    /// The class named `name` nested directly inside `self`.
    pub fn nested<N: Into<String>>(&self, name: N) -> ClassName {
        let mut names = self.names.clone();
        names.push(name.into());
        ClassName {
            package: self.package.clone(),
            names,
        }
    }

    /// The directly enclosing class, if `self` is nested.
    pub fn enclosing(&self) -> Option<ClassName> {
        if self.names.len() < 2 {
            return None;
        }
        Some(ClassName {
            package: self.package.clone(),
            names: self.names[..self.names.len() - 1].to_vec(),
        })
    }

    /// The outermost class of the nesting chain.
    pub fn top_level_class(&self) -> ClassName {
        ClassName {
            package: self.package.clone(),
            names: self.names[..1].to_vec(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// The innermost simple name.
    pub fn simple_name(&self) -> &str {
        &self.names[self.names.len() - 1]
    }

    /// The full nesting chain, outermost first.
    pub fn simple_names(&self) -> &[String] {
        &self.names
    }

    pub fn is_nested(&self) -> bool {
        self.names.len() > 1
    }

    /// The dotted canonical name, package-prefixed when the package is
    /// non-empty.
    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.names.join(".")
        } else {
            format!("{}.{}", self.package, self.names.join("."))
        }
    }

    /// True when `self` is nested (at any depth) under the top-level class
    /// `top`, and is not `top` itself.
    pub(crate) fn is_strictly_nested_under(&self, top: &ClassName) -> bool {
        self.is_nested() && self.package == top.package && self.names[0] == top.names[0]
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}.", self.package)?;
        }
        write!(f, "{}", self.names.join("."))
    }
}

// -------------------------------------------------------------------------------------------------
// Type Variables and Type Names
// -------------------------------------------------------------------------------------------------

/// A Java type variable. Bounds participate in value equality, but the
/// *printable* name ignores them: two variables named `T` with different
/// bounds print the same and may share a binding once a context binds the
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVariableName {
    name: String,
    bounds: Vec<ClassName>,
}

impl TypeVariableName {
    pub fn new<N: Into<String>>(name: N) -> TypeVariableName {
        TypeVariableName {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn bounded<N: Into<String>>(name: N, bounds: Vec<ClassName>) -> TypeVariableName {
        TypeVariableName {
            name: name.into(),
            bounds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &[ClassName] {
        &self.bounds
    }
}

impl fmt::Display for TypeVariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A resolvable type reference: a class or a type variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeName {
    Class(ClassName),
    Variable(TypeVariableName),
}

impl TypeName {
    pub fn canonical_name(&self) -> String {
        match self {
            TypeName::Class(class) => class.canonical_name(),
            TypeName::Variable(var) => var.name().to_string(),
        }
    }
}

impl From<ClassName> for TypeName {
    fn from(class: ClassName) -> TypeName {
        TypeName::Class(class)
    }
}

impl From<TypeVariableName> for TypeName {
    fn from(var: TypeVariableName) -> TypeName {
        TypeName::Variable(var)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

// -------------------------------------------------------------------------------------------------
// Tags and Referents
// -------------------------------------------------------------------------------------------------

/// An opaque identity attached to `name` nodes. Resolution binds each tag to
/// a concrete printed string when the enclosing context is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u64);

impl Tag {
    /// Allocate a process-unique tag.
    pub fn fresh() -> Tag {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Tag(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag #{}", self.0)
    }
}

/// A key in the ambient name map: something a notation can refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Referent {
    Type(TypeName),
    Tag(Tag),
}

impl fmt::Display for Referent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Referent::Type(type_name) => f.write_str(&type_name.canonical_name()),
            Referent::Tag(tag) => tag.fmt(f),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Imports
// -------------------------------------------------------------------------------------------------

/// One entry of a notation's imports summary: a referenced class plus
/// whether it must always be printed fully qualified (`no_import`
/// suppression).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    class: ClassName,
    qualified: bool,
}

impl Import {
    pub fn new(class: ClassName) -> Import {
        Import {
            class,
            qualified: false,
        }
    }

    pub fn qualified(class: ClassName) -> Import {
        Import {
            class,
            qualified: true,
        }
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    pub fn is_qualified(&self) -> bool {
        self.qualified
    }

    /// The printed name to seed the initial name map with. Importable
    /// top-level classes suggest their simple name; nested or suppressed
    /// classes stay canonical. Callers that emit an import block override
    /// the seeds for the classes they actually import.
    pub fn suggested_name(&self) -> String {
        if self.qualified || self.class.is_nested() {
            self.class.canonical_name()
        } else {
            self.class.simple_name().to_string()
        }
    }
}
