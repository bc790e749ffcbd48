// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;
use crate::context;
use crate::error::PrintError;
use crate::filter::TrimWriter;
use crate::notation::{Kind, Notation};
use crate::priority_map::NameMap;
use crate::types::{Referent, TypeName};

/// Printer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Soft right margin in characters. Must be positive.
    pub width: usize,
    /// Indent increment applied by `indent` nodes without an explicit
    /// prefix.
    pub indent_by: String,
    /// The enclosing package for the outermost context scope.
    pub package: String,
}

impl Default for PrintConfig {
    fn default() -> PrintConfig {
        PrintConfig {
            width: 100,
            indent_by: "  ".to_string(),
            package: String::new(),
        }
    }
}

/// Print `notation` to `out`.
///
/// For a fixed notation, name seeding, and configuration the emitted byte
/// sequence is deterministic. Emission stops at the first resolution or
/// sink error; whatever already reached the sink stays written.
pub fn print<W: Write>(
    notation: &Notation,
    config: &PrintConfig,
    names: NameMap,
    out: &mut W,
) -> Result<(), PrintError> {
    if config.width == 0 {
        return Err(PrintError::ZeroWidth);
    }
    let root = Chunk::root(
        notation.clone(),
        &config.indent_by,
        names,
        &config.package,
    );
    let mut printer = Printer {
        width: config.width,
        column: 0,
        out: TrimWriter::new(out),
        stack: vec![root],
    };
    printer.run()
}

struct Printer<'a, W: Write> {
    width: usize,
    column: usize,
    out: TrimWriter<&'a mut W>,
    stack: Vec<Chunk>,
}

impl<W: Write> Printer<'_, W> {
    fn run(&mut self) -> Result<(), PrintError> {
        while let Some(chunk) = self.stack.pop() {
            match chunk.notation.kind() {
                Kind::Empty => {}
                Kind::Text(text) => self.emit(text)?,
                Kind::NewLine => {
                    self.out.write_text("\n")?;
                    self.out.write_text(&chunk.indent)?;
                    self.column = chunk.indent.len();
                }
                Kind::Concat(children) => {
                    for child in children.iter().rev() {
                        self.stack.push(chunk.with(child.clone()));
                    }
                }
                Kind::Choice(left, right) => {
                    if chunk.flat {
                        self.stack.push(chunk.flattened(left.clone()));
                    } else if self.fits(chunk.with(left.clone()))? {
                        tracing::trace!(column = self.column, "choice kept flat");
                        self.stack.push(chunk.with(left.clone()));
                    } else {
                        tracing::trace!(column = self.column, "choice expanded");
                        self.stack.push(chunk.with(right.clone()));
                    }
                }
                Kind::Flat(child) => self.stack.push(chunk.flattened(child.clone())),
                Kind::Indent(prefix, child) => {
                    let prefix = prefix.as_deref().unwrap_or(&chunk.indent_by);
                    self.stack.push(chunk.indented(child.clone(), prefix));
                }
                Kind::Name(tag, _) => {
                    let printed = self.resolve(&chunk, &Referent::Tag(*tag))?;
                    self.emit(&printed)?;
                }
                Kind::TypeRef(type_name) => {
                    let key = usable_ref(&chunk, type_name);
                    let printed = self.resolve(&chunk, &key)?;
                    self.emit(&printed)?;
                }
                Kind::StaticImportRef(_, member) => self.emit(member)?,
                Kind::Literal(child) | Kind::NoImport(child, _) => {
                    self.stack.push(chunk.with(child.clone()));
                }
                Kind::Statement(child) => {
                    if chunk.flat || self.fits(chunk.flattened(child.clone()))? {
                        self.stack.push(chunk.flattened(child.clone()));
                    } else {
                        self.stack.push(chunk.with(child.clone()));
                    }
                }
                Kind::Context {
                    name,
                    type_vars,
                    child,
                } => {
                    let inner =
                        context::enter(&chunk, &chunk.notation, name.as_deref(), type_vars, child);
                    self.stack.push(inner);
                }
            }
        }
        Ok(())
    }

    fn emit(&mut self, text: &str) -> Result<(), PrintError> {
        self.out.write_text(text)?;
        self.column += text.len();
        Ok(())
    }

    fn resolve(&self, chunk: &Chunk, key: &Referent) -> Result<String, PrintError> {
        chunk
            .names
            .get(key)
            .cloned()
            .ok_or_else(|| PrintError::Unresolved(key.clone()))
    }

    /// Whether `candidate` plus everything still pending on the work stack
    /// fits flat in the remainder of the current line.
    ///
    /// Walks a snapshot of the pending work with the candidate on top,
    /// consuming budget for text-like chunks. A line break ends the
    /// constraint and fits, unless the chunk is inside a forced-flat region,
    /// where it can never be printed compactly. Choices follow the branch
    /// the emitter would try first; the lookahead never recurses over
    /// alternatives.
    fn fits(&self, candidate: Chunk) -> Result<bool, PrintError> {
        if self.column > self.width {
            return Ok(false);
        }
        let mut remaining = (self.width - self.column) as isize;
        let mut stack = self.stack.clone();
        stack.push(candidate);
        while let Some(chunk) = stack.pop() {
            match chunk.notation.kind() {
                Kind::Empty | Kind::StaticImportRef(..) => return Ok(true),
                Kind::Text(text) => {
                    remaining -= text.len() as isize;
                    if remaining < 0 {
                        return Ok(false);
                    }
                }
                Kind::NewLine => return Ok(!chunk.flat),
                Kind::Name(tag, _) => {
                    let printed = self.resolve(&chunk, &Referent::Tag(*tag))?;
                    remaining -= printed.len() as isize;
                    if remaining < 0 {
                        return Ok(false);
                    }
                }
                Kind::TypeRef(type_name) => {
                    let key = usable_ref(&chunk, type_name);
                    let printed = self.resolve(&chunk, &key)?;
                    remaining -= printed.len() as isize;
                    if remaining < 0 {
                        return Ok(false);
                    }
                }
                Kind::Concat(children) => {
                    for child in children.iter().rev() {
                        stack.push(chunk.with(child.clone()));
                    }
                }
                Kind::Choice(left, _) => {
                    if chunk.flat {
                        stack.push(chunk.flattened(left.clone()));
                    } else {
                        stack.push(chunk.with(left.clone()));
                    }
                }
                Kind::Flat(child) => stack.push(chunk.flattened(child.clone())),
                Kind::Indent(prefix, child) => {
                    let prefix = prefix.as_deref().unwrap_or(&chunk.indent_by);
                    stack.push(chunk.indented(child.clone(), prefix));
                }
                Kind::Literal(child) | Kind::NoImport(child, _) => {
                    stack.push(chunk.with(child.clone()));
                }
                Kind::Statement(child) => {
                    if chunk.flat {
                        stack.push(chunk.flattened(child.clone()));
                    } else {
                        stack.push(chunk.with(child.clone()));
                    }
                }
                Kind::Context {
                    name,
                    type_vars,
                    child,
                } => {
                    let inner =
                        context::enter(&chunk, &chunk.notation, name.as_deref(), type_vars, child);
                    stack.push(inner);
                }
            }
        }
        Ok(true)
    }
}

/// The map key to resolve a type reference through.
///
/// Type variables alias by printable name: once a context binds a variable
/// named `T`, any other variable object printing as `T` resolves to that
/// binding.
fn usable_ref(chunk: &Chunk, type_name: &TypeName) -> Referent {
    if let TypeName::Variable(var) = type_name {
        for key in chunk.names.keys() {
            if let Referent::Type(TypeName::Variable(existing)) = key {
                if existing.name() == var.name() {
                    return key.clone();
                }
            }
        }
    }
    Referent::Type(type_name.clone())
}
