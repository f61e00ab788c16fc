// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Handler table file parsing.
//!
//! **DDD Context:** Bridge Generation - Table Files
//!
//! A table file is TOML with an optional `[module]` section and one
//! `[[handler]]` array entry per primitive handler, in output order:
//!
//! ```toml
//! [module]
//! name = "stdlib"
//! target = "swift"
//!
//! [[handler]]
//! name = "+"
//! function = "add"
//! can_error = true
//! parameters = [
//!   { label = "left", coercion = "asScalar" },
//!   { label = "right", coercion = "asScalar" },
//! ]
//! returns = "asScalar"
//! ```

use bridgegen_core::codegen::backend::Target;
use bridgegen_core::codegen::{DEFAULT_MODULE_NAME, GenerateOptions};
use bridgegen_core::handler::{HandlerSpec, HandlerTable};
use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;
use std::fs;

/// The top-level structure parsed from a table file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableFile {
    /// The optional `[module]` section.
    #[serde(default)]
    pub module: ModuleConfig,
    /// The `[[handler]]` entries, in table order.
    #[serde(default, rename = "handler")]
    pub handlers: Vec<HandlerSpec>,
}

/// Module settings from a table file. Command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Module name; prefixes the loader and names the output file.
    #[serde(default)]
    pub name: Option<String>,
    /// Target language.
    #[serde(default)]
    pub target: Option<Target>,
}

impl TableFile {
    /// Resolves generator options: flag, then table file, then default.
    pub fn options(&self, module: Option<&str>, target: Option<Target>) -> GenerateOptions {
        let name = module
            .or(self.module.name.as_deref())
            .unwrap_or(DEFAULT_MODULE_NAME);
        let target = target.or(self.module.target).unwrap_or_default();
        GenerateOptions::new(name).with_target(target)
    }

    /// The handler entries as a generator input.
    pub fn into_table(self) -> HandlerTable {
        HandlerTable::new(self.handlers)
    }
}

/// Parse a handler table file.
///
/// Returns an error if the file cannot be read, is not valid TOML, or has
/// entries with missing or unknown fields.
pub fn load_table(path: &Utf8Path) -> Result<TableFile> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read handler table '{path}'"))?;

    toml::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse handler table '{path}'"))
}
