// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! Notation pretty-printer core for Java source generation.
//!
//! Client code composes a [`Notation`]: an immutable tree of layout
//! operators describing source text with alternative layouts. The printer
//! decides, per [`or`](Notation::or) alternative, whether the compact
//! single-line rendering fits within the configured right margin —
//! considering everything still pending on the current line — and commits to
//! the compact or the expanded branch.
//!
//! On top of the measure-and-fit engine sits a scoped name-resolution
//! stack: [`context`](Notation::context) nodes establish nested Java class
//! scopes, shorten qualified type references, bind type variables, and
//! resolve simple-name collisions with a deterministic underscore scheme.
//!
//! # Example
//! ```rust
//! use java_notation::{NameMap, Notation, PrintConfig};
//!
//! let args = Notation::txt("a, b")
//!     .or(Notation::nl()
//!         .then(Notation::txt("a,"))
//!         .then(Notation::nl())
//!         .then(Notation::txt("b"))
//!         .indent_with("  "));
//! let call = Notation::txt("foo(").then(args).then(Notation::txt(")"));
//!
//! let wide = PrintConfig { width: 80, ..PrintConfig::default() };
//! assert_eq!(call.render(&wide, NameMap::new()).unwrap(), "foo(a, b)");
//!
//! let narrow = PrintConfig { width: 6, ..PrintConfig::default() };
//! assert_eq!(
//!     call.render(&narrow, NameMap::new()).unwrap(),
//!     "foo(\n  a,\n  b)"
//! );
//! ```
//!
//! File writing, import-block emission, and the Java AST builders that
//! produce notations live outside this crate; the core consumes a finished
//! notation plus an initial name map.

mod chunk;
mod context;
mod error;
mod filter;
mod notation;
mod printer;
mod priority_map;
mod types;

#[cfg(test)]
mod tests;

pub use error::{PrintError, StructuralError};
pub use notation::Notation;
pub use printer::{print, PrintConfig};
pub use priority_map::{NameMap, PriorityMap};
pub use types::{ClassName, Import, Referent, Tag, TypeName, TypeVariableName};

// -------------------------------------------------------------------------------------------------
// Main Trait
// -------------------------------------------------------------------------------------------------

/// Values that know how to describe themselves as notation.
///
/// The Java AST builders implement this; the core embeds them with
/// [`Notation::literal`].
pub trait Emitable {
    fn notation(&self) -> Notation;

    /// Render as source code at the default settings.
    fn to_code(&self) -> Result<String, PrintError> {
        self.notation().to_code()
    }
}
