// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Validate handler tables without generating code.

use camino::Utf8Path;
use miette::Result;
use tracing::{info, instrument};

use super::ensure_valid;
use crate::table;

/// Validate the table at `table_path`.
///
/// Every problem is reported at once, with the total count in the headline.
#[instrument(skip_all, fields(table = %table_path))]
pub fn check(table_path: &Utf8Path) -> Result<()> {
    let file = table::load_table(table_path)?;
    let options = file.options(None, None);
    let table = file.into_table();

    ensure_valid(table_path, &table, &options)?;

    info!(handlers = table.len(), "Handler table is valid");
    println!("{table_path}: {} handler(s) OK", table.len());
    Ok(())
}
