// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Handler table validation.
//!
//! **DDD Context:** Bridge Generation - Input Validation
//!
//! Validates table constraints before anything is rendered:
//! - every native name is non-empty;
//! - symbolic names and labels carry an explicit override;
//! - overrides are identifiers and implementation names are not reserved
//!   words of the target;
//! - labels are unique within a handler;
//! - signature keys are unique across the whole table.
//!
//! Native names themselves may repeat: overloads that differ by parameters
//! or scopes derive distinct signature keys.

use crate::codegen::backend::Backend;
use crate::codegen::naming::{HandlerNames, binding_name, implementation_name, is_identifier};
use crate::error::{SpecError, SpecErrorKind};
use crate::handler::{HandlerSpec, HandlerTable};
use ecow::EcoString;
use std::collections::HashMap;

/// Validates every entry of `table` against `backend`.
///
/// Returns all problems found, in table order. An empty vector means the
/// table can be generated.
#[must_use]
pub fn validate_table(table: &HandlerTable, backend: &dyn Backend) -> Vec<SpecError> {
    let mut errors = Vec::new();
    let mut seen_keys: HashMap<String, (usize, EcoString)> = HashMap::new();

    for (index, spec) in table.handlers().iter().enumerate() {
        let entry_errors = validate_handler(spec, backend);
        if !entry_errors.is_empty() {
            errors.extend(
                entry_errors
                    .into_iter()
                    .map(|kind| SpecError::new(index, spec.name.clone(), kind)),
            );
            continue;
        }

        // Names always derive once the entry itself is valid.
        let Some(names) = HandlerNames::derive(spec, backend.naming()) else {
            continue;
        };
        if let Some((first_index, first_handler)) = seen_keys.get(&names.signature_key) {
            errors.push(SpecError::new(
                index,
                spec.name.clone(),
                SpecErrorKind::DuplicateSignatureKey {
                    key: names.signature_key,
                    first_index: *first_index,
                    first_handler: first_handler.clone(),
                },
            ));
        } else {
            seen_keys.insert(names.signature_key, (index, spec.name.clone()));
        }
    }

    errors
}

/// Checks one entry in isolation.
#[must_use]
pub fn validate_handler(spec: &HandlerSpec, backend: &dyn Backend) -> Vec<SpecErrorKind> {
    let mut errors = Vec::new();

    match &spec.function {
        Some(function) if !is_identifier(function) => {
            errors.push(SpecErrorKind::InvalidOverride {
                function: function.clone(),
            });
        }
        Some(function) => check_reserved(function, backend, &mut errors),
        None if spec.name.is_empty() => errors.push(SpecErrorKind::EmptyName),
        None => match implementation_name(spec, backend.naming()) {
            Some(derived) => check_reserved(&derived, backend, &mut errors),
            None => errors.push(SpecErrorKind::SymbolicNameWithoutOverride {
                name: spec.name.clone(),
            }),
        },
    }
    if spec.function.is_some() && spec.name.is_empty() {
        errors.push(SpecErrorKind::EmptyName);
    }

    let mut labels: HashMap<&str, usize> = HashMap::new();
    for (index, param) in spec.parameters.iter().enumerate() {
        if let Some(&first_index) = labels.get(param.label.as_str()) {
            errors.push(SpecErrorKind::DuplicateLabel {
                index,
                first_index,
                label: param.label.clone(),
            });
        } else {
            labels.insert(&param.label, index);
        }

        match &param.binding {
            Some(binding) if !is_identifier(binding) => {
                errors.push(SpecErrorKind::InvalidBinding {
                    index,
                    binding: binding.clone(),
                });
            }
            Some(_) => {}
            None if binding_name(param, backend.naming()).is_none() => {
                errors.push(SpecErrorKind::SymbolicLabelWithoutBinding {
                    index,
                    label: param.label.clone(),
                });
            }
            None => {}
        }
    }

    errors
}

fn check_reserved(name: &str, backend: &dyn Backend, errors: &mut Vec<SpecErrorKind>) {
    if backend.is_reserved(name) {
        errors.push(SpecErrorKind::ReservedWord {
            word: name.into(),
            backend: backend.name(),
        });
    }
}
