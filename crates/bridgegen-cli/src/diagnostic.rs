// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Table validation diagnostics using miette.
//!
//! Converts bridgegen-core spec errors into one miette report per table,
//! with each problem attached as a related diagnostic carrying a hint on
//! how to fix the entry.

// Suppress unused_assignments for struct fields used by derive macros
#![allow(unused_assignments)]

use bridgegen_core::error::{SpecError, SpecErrorKind};
use camino::Utf8Path;
use miette::Diagnostic;

/// One invalid handler entry.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(bridgegen::invalid_handler))]
pub struct HandlerDiagnostic {
    /// Table position of the entry
    pub index: usize,
    /// Human-readable error message
    pub message: String,
    /// How to fix the entry
    #[help]
    pub help: Option<String>,
}

impl HandlerDiagnostic {
    /// Create a diagnostic from a bridgegen-core spec error.
    pub fn from_spec_error(error: &SpecError) -> Self {
        Self {
            index: error.index,
            message: error.to_string(),
            help: help_for(&error.kind),
        }
    }
}

/// Every problem found in one table file.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{} problem(s) in handler table '{path}'", .problems.len())]
#[diagnostic(code(bridgegen::invalid_table))]
pub struct TableDiagnostic {
    /// The table file
    pub path: String,
    /// One diagnostic per problem, in table order
    #[related]
    pub problems: Vec<HandlerDiagnostic>,
}

impl TableDiagnostic {
    /// Collect spec errors for `path` into one report.
    pub fn new(path: &Utf8Path, errors: &[SpecError]) -> Self {
        Self {
            path: path.to_string(),
            problems: errors.iter().map(HandlerDiagnostic::from_spec_error).collect(),
        }
    }
}

fn help_for(kind: &SpecErrorKind) -> Option<String> {
    match kind {
        SpecErrorKind::EmptyName => None,
        SpecErrorKind::SymbolicNameWithoutOverride { .. } => {
            Some("add `function = \"<identifier>\"` to the entry".to_string())
        }
        SpecErrorKind::InvalidOverride { .. } | SpecErrorKind::InvalidBinding { .. } => Some(
            "identifiers start with a letter or `_` and contain only letters, digits and `_`"
                .to_string(),
        ),
        SpecErrorKind::ReservedWord { word, .. } => {
            Some(format!("add `function = \"<identifier>\"`, e.g. `test{}`", capitalize(word)))
        }
        SpecErrorKind::SymbolicLabelWithoutBinding { .. } => {
            Some("add `binding = \"<identifier>\"` to the parameter".to_string())
        }
        SpecErrorKind::DuplicateLabel { .. } => None,
        SpecErrorKind::DuplicateSignatureKey { .. } => Some(
            "overloads must differ in parameters or scopes, or use distinct `function` names"
                .to_string(),
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
