// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! List the handlers of a table with their signature keys.

use bridgegen_core::codegen::backend::Backend;
use bridgegen_core::codegen::naming::HandlerNames;
use bridgegen_core::handler::{HandlerSpec, HandlerTable, Scope};
use camino::Utf8Path;
use miette::Result;
use std::fmt::Write;
use tracing::instrument;

use super::ensure_valid;
use crate::table;

/// Print one line per handler of the table at `table_path`.
#[instrument(skip_all, fields(table = %table_path))]
pub fn list(table_path: &Utf8Path) -> Result<()> {
    let file = table::load_table(table_path)?;
    let options = file.options(None, None);
    let table = file.into_table();

    ensure_valid(table_path, &table, &options)?;

    print!("{}", listing(&table, options.backend()));
    Ok(())
}

/// Formats the listing: signature key, then the handler as the command
/// language sees it.
///
/// ```text
/// add_left_right  + (left: asScalar, right: asScalar) -> asScalar  [throws]
/// show_value      show (value: asAnything)
/// ```
fn listing(table: &HandlerTable, backend: &dyn Backend) -> String {
    let rows: Vec<(String, String)> = table
        .handlers()
        .iter()
        .map(|spec| {
            let key = HandlerNames::derive(spec, backend.naming())
                .map_or_else(|| "?".to_string(), |names| names.signature_key);
            (key, summary(spec, backend))
        })
        .collect();
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (key, summary) in rows {
        let _ = writeln!(out, "{key:<width$}  {summary}");
    }
    out
}

fn summary(spec: &HandlerSpec, backend: &dyn Backend) -> String {
    let parameters: Vec<String> = spec
        .parameters
        .iter()
        .map(|param| format!("{}: {}", param.label, param.coercion))
        .collect();
    let mut line = format!("{} ({})", spec.name, parameters.join(", "));
    if let Some(coercion) = spec.returns.boxed_coercion(backend.no_result_coercion()) {
        let _ = write!(line, " -> {coercion}");
    }

    let mut flags = Vec::new();
    if spec.can_error {
        flags.push("throws");
    }
    flags.extend(spec.call_scopes().map(Scope::env_name));
    if spec.ignore_unknown_arguments {
        flags.push("ignores extra arguments");
    }
    if !flags.is_empty() {
        let _ = write!(line, "  [{}]", flags.join(", "));
    }
    line
}
