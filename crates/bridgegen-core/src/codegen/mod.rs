// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Bridge code generation.
//!
//! This module turns a [`HandlerTable`] into one generated source unit that
//! connects a dynamic command runtime to natively implemented handlers.
//!
//! # Architecture
//!
//! Leaves first:
//!
//! - [`template`] - placeholder substitution that leaves target braces intact
//! - [`naming`] - implementation names and unique signature keys
//! - [`render`] - the four artifacts of one handler
//! - [`module`] - file header, handler blocks and the aggregate loader
//! - [`backend`] - target-language templates, naming and keywords
//! - [`document`] - layout tree used by the assembler
//!
//! [`generate_module`] validates the whole table, renders every handler in
//! table order, then assembles the module. Nothing is produced unless every
//! step succeeds.
//!
//! # Example
//!
//! ```
//! use bridgegen_core::codegen::{GenerateOptions, generate_module};
//! use bridgegen_core::handler::{HandlerSpec, HandlerTable};
//!
//! let table = HandlerTable::new(vec![
//!     HandlerSpec::new("add")
//!         .param("a", "asDouble")
//!         .param("b", "asDouble")
//!         .returns("asDouble")
//!         .can_error(),
//! ]);
//! let swift = generate_module(&table, &GenerateOptions::new("stdlib"))?;
//! assert!(swift.contains("func function_add_a_b("));
//! assert!(swift.contains("try env.add(interface_add_a_b, function_add_a_b)"));
//! # Ok::<(), bridgegen_core::error::GenError>(())
//! ```

pub mod backend;
pub mod document;
pub mod module;
pub mod naming;
pub mod render;
pub mod template;


use crate::error::{GenError, Result};
use crate::handler::{HandlerTable, Scope};
use crate::validate::validate_table;
use backend::{Backend, Target};
use render::{HandlerArtifacts, render_handler};
use std::io;
use tracing::{debug, info, instrument};

/// Default module name when none is configured.
pub const DEFAULT_MODULE_NAME: &str = "stdlib";

/// Options for one generator run.
///
/// Use [`GenerateOptions::new`] for defaults, then chain builder methods.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Library name; prefixes the loader and names the output file.
    module_name: String,
    /// Target language.
    target: Target,
}

impl GenerateOptions {
    /// Creates default options (Swift) for the given module name.
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            target: Target::default(),
        }
    }

    /// Selects the target language.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// The configured module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// The configured backend.
    #[must_use]
    pub fn backend(&self) -> &'static dyn Backend {
        self.target.backend()
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_NAME)
    }
}

/// Generates the bridge module for `table`.
///
/// # Errors
///
/// Returns [`GenError::InvalidModuleName`] if the module name cannot prefix
/// an identifier, [`GenError::InvalidSpec`] for the first malformed table
/// entry, and [`GenError::Template`] on a template defect.
#[instrument(skip_all, fields(module = %options.module_name, backend = %options.target))]
pub fn generate_module(table: &HandlerTable, options: &GenerateOptions) -> Result<String> {
    if !naming::is_identifier(&options.module_name) {
        return Err(GenError::InvalidModuleName(options.module_name.clone()));
    }
    let backend = options.backend();

    if let Some(error) = validate_table(table, backend).into_iter().next() {
        return Err(error.into());
    }

    let artifacts = render_table(table, backend)?;
    let output = module::assemble(&options.module_name, &artifacts, backend)?;

    info!(handlers = table.len(), bytes = output.len(), "Generated bridge module");
    Ok(output)
}

/// Renders every handler in table order.
///
/// # Errors
///
/// Propagates the first rendering failure.
pub fn render_table(table: &HandlerTable, backend: &dyn Backend) -> Result<Vec<HandlerArtifacts>> {
    table
        .handlers()
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            if spec.requires(Scope::Body) {
                debug!(handler = %spec.name, "Body scope requested; no code is generated for it");
            }
            render_handler(spec, index, backend)
        })
        .collect()
}

/// Generates the module and writes it to `sink`.
///
/// The whole module is rendered before the first byte is written, so a
/// generation error leaves `sink` untouched.
///
/// # Errors
///
/// Returns any [`generate_module`] error, or [`GenError::Io`] if writing
/// fails.
pub fn write_module<W: io::Write>(
    table: &HandlerTable,
    options: &GenerateOptions,
    sink: &mut W,
) -> Result<()> {
    let output = generate_module(table, options)?;
    sink.write_all(output.as_bytes())?;
    sink.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpecErrorKind;
    use crate::handler::HandlerSpec;

    fn sample_table() -> HandlerTable {
        HandlerTable::new(vec![
            HandlerSpec::new("add")
                .param("a", "asDouble")
                .param("b", "asDouble")
                .returns("asDouble")
                .can_error(),
            HandlerSpec::new("show").param("value", "asAnything"),
        ])
    }

    #[test]
    fn generates_blocks_and_loader_in_order() {
        let output = generate_module(&sample_table(), &GenerateOptions::new("stdlib")).unwrap();
        let add = output.find("let signature_add_a_b").unwrap();
        let show = output.find("let signature_show_value").unwrap();
        let loader = output.find("func stdlib_loadHandlers").unwrap();
        assert!(add < show && show < loader);
        let reg_add = output.find("try env.add(interface_add_a_b").unwrap();
        let reg_show = output.find("try env.add(interface_show_value").unwrap();
        assert!(loader < reg_add && reg_add < reg_show);
    }

    #[test]
    fn invalid_module_name_is_rejected() {
        let err = generate_module(&sample_table(), &GenerateOptions::new("std-lib")).unwrap_err();
        assert!(matches!(err, GenError::InvalidModuleName(name) if name == "std-lib"));
    }

    #[test]
    fn validation_error_aborts_generation() {
        let table = HandlerTable::new(vec![
            HandlerSpec::new("show"),
            HandlerSpec::new("show"),
        ]);
        let err = generate_module(&table, &GenerateOptions::default()).unwrap_err();
        let GenError::InvalidSpec(spec_error) = err else {
            panic!("expected InvalidSpec");
        };
        assert_eq!(spec_error.index, 1);
        assert!(matches!(
            spec_error.kind,
            SpecErrorKind::DuplicateSignatureKey { .. }
        ));
    }

    #[test]
    fn failed_generation_writes_nothing() {
        let table = HandlerTable::new(vec![HandlerSpec::new("show"), HandlerSpec::new("==")]);
        let mut sink = Vec::new();
        assert!(write_module(&table, &GenerateOptions::default(), &mut sink).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn write_module_matches_generate_module() {
        let table = sample_table();
        let options = GenerateOptions::default();
        let mut sink = Vec::new();
        write_module(&table, &options, &mut sink).unwrap();
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            generate_module(&table, &options).unwrap()
        );
    }

    #[test]
    fn body_scope_is_a_no_op() {
        let plain = HandlerTable::new(vec![HandlerSpec::new("run")]);
        let with_body = HandlerTable::new(vec![HandlerSpec::new("run").scope(Scope::Body)]);
        let options = GenerateOptions::default();
        assert_eq!(
            generate_module(&plain, &options).unwrap(),
            generate_module(&with_body, &options).unwrap()
        );
    }

    #[test]
    fn empty_table_generates_empty_loader() {
        let output = generate_module(&HandlerTable::default(), &GenerateOptions::default()).unwrap();
        assert!(output.contains("func stdlib_loadHandlers(env: Env) throws {\n}"));
        assert!(!output.contains("signature_"));
    }
}
