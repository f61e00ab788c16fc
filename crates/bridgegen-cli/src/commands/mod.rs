// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

pub mod check;
pub mod generate;
pub mod list;

use bridgegen_core::codegen::GenerateOptions;
use bridgegen_core::codegen::naming::is_identifier;
use bridgegen_core::handler::HandlerTable;
use bridgegen_core::validate::validate_table;
use camino::Utf8Path;
use miette::Result;

use crate::diagnostic::TableDiagnostic;

/// Validate `table` and the module name before anything is generated or
/// listed, reporting every problem at once.
fn ensure_valid(path: &Utf8Path, table: &HandlerTable, options: &GenerateOptions) -> Result<()> {
    if !is_identifier(options.module_name()) {
        miette::bail!(
            "Invalid module name '{}': must start with a letter or underscore and contain only alphanumeric characters and underscores",
            options.module_name()
        );
    }

    let errors = validate_table(table, options.backend());
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TableDiagnostic::new(path, &errors).into())
    }
}
