// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Module assembly.
//!
//! **DDD Context:** Bridge Generation - Module Assembler
//!
//! Lays out one generated source unit:
//!
//! ```text
//! <file header>
//!
//! <handler 0 definitions>
//!
//!
//! <handler 1 definitions>
//!
//!
//! <module>_loadHandlers { <registration 0> ... <registration n> }
//! ```
//!
//! Handler blocks and registrations keep table order exactly, so a later
//! registration can deliberately shadow an earlier one with the same name.

use super::backend::Backend;
use super::document::{INDENT, join, line, nest, seq, text};
use super::render::HandlerArtifacts;
use super::template::{Bindings, render};
use crate::error::Result;

/// Separator between handler blocks (two blank lines).
const BLOCK_SEPARATOR: &str = "\n\n\n";

/// Assembles rendered artifacts into the final module text.
///
/// # Errors
///
/// Returns [`crate::error::GenError::Template`] if a module-level template
/// fails to render.
pub fn assemble(
    module_name: &str,
    artifacts: &[HandlerArtifacts],
    backend: &dyn Backend,
) -> Result<String> {
    let templates = backend.templates();

    let header = render(
        templates.file_header,
        &Bindings::new()
            .bind("file_name", backend.file_name(module_name))
            .bind("module", module_name),
    )?;
    let loader_open = render(
        templates.loader_open,
        &Bindings::new().bind("module", module_name),
    )?;

    let mut parts = vec![text(header), text("\n")];
    if !artifacts.is_empty() {
        let blocks = artifacts.iter().map(|handler| text(handler.definitions()));
        parts.push(join(blocks, BLOCK_SEPARATOR));
        parts.push(text(BLOCK_SEPARATOR));
    }
    parts.push(text(loader_open));
    // One registration per line; an empty loader closes on the next line.
    let registrations = artifacts
        .iter()
        .flat_map(|handler| [line(), text(handler.registration.as_str())])
        .collect();
    parts.push(nest(INDENT, registrations));
    parts.extend([line(), text(templates.loader_close), text("\n")]);

    Ok(seq(parts).render())
}
