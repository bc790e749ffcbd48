// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use std::io;

use thiserror::Error;

use crate::types::{Referent, Tag};

/// A notation violated a construction-time invariant.
///
/// These indicate bugs in the code that builds notations, so the smart
/// constructors panic with the formatted error instead of threading `Result`
/// through every combinator. The printer never raises these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Two merged subtrees suggest different printed names for one tag.
    #[error("conflicting name suggestions for {tag}: {existing:?} vs {proposed:?}")]
    TagConflict {
        tag: Tag,
        existing: String,
        proposed: String,
    },
    /// `statement` was applied to a notation that already contains one.
    #[error("statement enter followed by statement enter")]
    NestedStatement,
}

/// Emission failed. Printing halts at the first error; nothing is retried
/// and no placeholder output is written.
#[derive(Debug, Error)]
pub enum PrintError {
    /// A `name` or `type_ref` had no binding in the ambient name map.
    #[error("no printed name bound for {0}")]
    Unresolved(Referent),
    /// The output sink reported an I/O failure.
    #[error("output sink failed")]
    Output(#[from] io::Error),
    /// `print` was invoked with a zero right margin.
    #[error("print width must be positive")]
    ZeroWidth,
}
