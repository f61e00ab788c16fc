// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Bridgegen core.
//!
//! This crate turns a declarative table of primitive handlers into the
//! bridging source that registers them with a dynamic command runtime:
//! - Handler table model (names, parameters, coercions, scopes)
//! - Validation of the table against the target language
//! - Code generation (per-handler artifacts and the assembled module)
//!
//! Generation is a pure function of the table and the options. Output is
//! byte-for-byte deterministic.

#![doc = include_str!("../../../README.md")]

pub mod codegen;
pub mod error;
pub mod handler;
pub mod validate;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::codegen::backend::Target;
    pub use crate::codegen::{GenerateOptions, generate_module, write_module};
    pub use crate::error::{GenError, SpecError, SpecErrorKind};
    pub use crate::handler::{
        Coercion, HandlerSpec, HandlerTable, ParameterSpec, ReturnType, Scope,
    };
}
