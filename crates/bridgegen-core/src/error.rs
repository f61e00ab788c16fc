// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Generator error types.

use crate::codegen::template::TemplateError;
use ecow::EcoString;
use std::io;
use thiserror::Error;

/// A malformed entry in the handler table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("handler `{handler}` (entry {index}), field `{}`: {kind}", .kind.field())]
pub struct SpecError {
    /// Position of the entry in the table.
    pub index: usize,
    /// The entry's native name.
    pub handler: EcoString,
    /// What is wrong with it.
    pub kind: SpecErrorKind,
}

impl SpecError {
    /// Create a new spec error.
    #[must_use]
    pub fn new(index: usize, handler: impl Into<EcoString>, kind: SpecErrorKind) -> Self {
        Self {
            index,
            handler: handler.into(),
            kind,
        }
    }
}

/// Kinds of table validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecErrorKind {
    /// The native name is empty.
    #[error("handler name is empty")]
    EmptyName,

    /// A symbolic native name has no implementation-name override.
    #[error("`{name}` is not an identifier; set `function` to the implementation name")]
    SymbolicNameWithoutOverride { name: EcoString },

    /// The implementation-name override is not an identifier.
    #[error("`{function}` is not a valid implementation name")]
    InvalidOverride { function: EcoString },

    /// The implementation name is a reserved word of the target.
    #[error("`{word}` is reserved in {backend}; set `function` to another name")]
    ReservedWord {
        word: EcoString,
        backend: &'static str,
    },

    /// A symbolic parameter label has no binding override.
    #[error("label `{label}` is not an identifier; set `binding` for parameter {index}")]
    SymbolicLabelWithoutBinding { index: usize, label: EcoString },

    /// A parameter binding override is not an identifier.
    #[error("`{binding}` is not a valid binding name for parameter {index}")]
    InvalidBinding { index: usize, binding: EcoString },

    /// Two parameters of one handler share a label.
    #[error("label `{label}` is declared more than once (parameters {first_index} and {index})")]
    DuplicateLabel {
        index: usize,
        first_index: usize,
        label: EcoString,
    },

    /// Two handlers derive the same signature key.
    #[error("signature key `{key}` is already used by `{first_handler}` (entry {first_index})")]
    DuplicateSignatureKey {
        key: String,
        first_index: usize,
        first_handler: EcoString,
    },
}

impl SpecErrorKind {
    /// The table field the problem is located in.
    #[must_use]
    pub fn field(&self) -> String {
        match self {
            Self::EmptyName | Self::SymbolicNameWithoutOverride { .. } => "name".to_string(),
            Self::InvalidOverride { .. } | Self::ReservedWord { .. } => "function".to_string(),
            Self::SymbolicLabelWithoutBinding { index, .. } | Self::DuplicateLabel { index, .. } => {
                format!("parameters[{index}].label")
            }
            Self::InvalidBinding { index, .. } => format!("parameters[{index}].binding"),
            Self::DuplicateSignatureKey { .. } => "signature".to_string(),
        }
    }
}

/// Errors that abort a generator run.
#[derive(Debug, Error)]
pub enum GenError {
    /// The handler table failed validation.
    #[error("invalid handler table: {0}")]
    InvalidSpec(#[from] SpecError),

    /// The module name cannot prefix a generated identifier.
    #[error("module name `{0}` is not an identifier")]
    InvalidModuleName(String),

    /// A template could not be rendered (generator defect).
    #[error("internal template error: {0}")]
    Template(#[from] TemplateError),

    /// Writing the finished module failed.
    #[error("failed to write generated module: {0}")]
    Io(#[from] io::Error),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;
