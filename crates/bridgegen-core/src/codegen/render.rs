// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Per-handler artifact rendering.
//!
//! **DDD Context:** Bridge Generation - Artifact Renderer
//!
//! For one [`HandlerSpec`] the renderer produces four artifacts that share
//! the handler's signature key:
//!
//! 1. **signature**: one coercion slot per parameter plus the return slot;
//! 2. **interface**: `(label, coercion)` metadata in the same order, used by
//!    the runtime for argument lookup, diagnostics and documentation;
//! 3. **wrapper**: unboxes each positional argument, rejects surplus
//!    arguments (unless the handler ignores them), calls the native
//!    implementation with declared arguments then the command/handler scope
//!    arguments, and boxes the result or returns the no-value marker;
//! 4. **registration**: installs interface + wrapper into an environment.
//!
//! Unboxing failures and (for `can_error` handlers) native failures are not
//! caught by the wrapper; they propagate to the runtime's caller.

use super::backend::Backend;
use super::naming::HandlerNames;
use super::template::{Bindings, render};
use crate::error::{Result, SpecError, SpecErrorKind};
use crate::handler::{Coercion, HandlerSpec};
use crate::validate::validate_handler;
use tracing::trace;

/// The rendered artifacts for one handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerArtifacts {
    /// Unique symbol suffix shared by all artifacts.
    pub signature_key: String,
    /// One-line summary comment.
    pub comment: String,
    /// Signature block.
    pub signature: String,
    /// Interface metadata block.
    pub interface: String,
    /// Call-wrapper definition.
    pub wrapper: String,
    /// Registration statement (placed in the module's loader).
    pub registration: String,
}

impl HandlerArtifacts {
    /// The definitions emitted at module level, in output order.
    #[must_use]
    pub fn definitions(&self) -> String {
        [
            self.comment.as_str(),
            self.signature.as_str(),
            self.interface.as_str(),
            self.wrapper.as_str(),
        ]
        .join("\n")
    }
}

/// Renders the four artifacts for `spec`.
///
/// `index` is the entry's table position, used for error context only.
///
/// # Errors
///
/// Returns [`crate::error::GenError::InvalidSpec`] if a name cannot be
/// derived (validation should have caught it) and
/// [`crate::error::GenError::Template`] on a template defect.
pub fn render_handler(
    spec: &HandlerSpec,
    index: usize,
    backend: &dyn Backend,
) -> Result<HandlerArtifacts> {
    let names = HandlerNames::derive(spec, backend.naming()).ok_or_else(|| {
        let kind = validate_handler(spec, backend)
            .into_iter()
            .find(|kind| {
                matches!(
                    kind,
                    SpecErrorKind::EmptyName
                        | SpecErrorKind::SymbolicNameWithoutOverride { .. }
                        | SpecErrorKind::SymbolicLabelWithoutBinding { .. }
                )
            })
            .unwrap_or_else(|| SpecErrorKind::SymbolicNameWithoutOverride {
                name: spec.name.clone(),
            });
        SpecError::new(index, spec.name.clone(), kind)
    })?;
    trace!(handler = %spec.name, key = %names.signature_key, "Rendering handler");

    let renderer = HandlerRenderer {
        spec,
        names: &names,
        backend,
    };

    Ok(HandlerArtifacts {
        comment: renderer.comment()?,
        signature: renderer.signature()?,
        interface: renderer.interface()?,
        wrapper: renderer.wrapper()?,
        registration: renderer.registration()?,
        signature_key: names.signature_key,
    })
}

/// Renders the artifacts of one handler from its derived names.
struct HandlerRenderer<'a> {
    spec: &'a HandlerSpec,
    names: &'a HandlerNames,
    backend: &'a dyn Backend,
}

impl HandlerRenderer<'_> {
    fn boxed_coercion(&self) -> Option<&Coercion> {
        self.spec
            .returns
            .boxed_coercion(self.backend.no_result_coercion())
    }

    fn key_bindings(&self) -> Bindings {
        Bindings::new().bind("key", self.names.signature_key.as_str())
    }

    fn comment(&self) -> Result<String> {
        let labels: Vec<&str> = self
            .spec
            .parameters
            .iter()
            .map(|param| param.label.as_str())
            .collect();
        let bindings = Bindings::new()
            .bind("native_name", self.spec.name.as_str())
            .bind("labels", labels.join(", "));
        Ok(render(self.backend.templates().handler_comment, &bindings)?)
    }

    fn signature(&self) -> Result<String> {
        let templates = self.backend.templates();
        let mut parameters = String::new();
        for (index, param) in self.spec.parameters.iter().enumerate() {
            let bindings = Bindings::new()
                .bind("index", index.to_string())
                .bind("coercion", param.coercion.as_str());
            parameters.push_str(&render(templates.signature_parameter, &bindings)?);
        }
        let return_type = self
            .boxed_coercion()
            .map_or(self.backend.no_result_coercion(), Coercion::as_str);
        if self.spec.parameters.is_empty() {
            let bindings = self.key_bindings().bind("return_type", return_type);
            return Ok(render(templates.signature_without_parameters, &bindings)?);
        }
        let bindings = self
            .key_bindings()
            .bind("signature_parameters", parameters)
            .bind("return_type", return_type);
        Ok(render(templates.signature, &bindings)?)
    }

    fn interface(&self) -> Result<String> {
        let templates = self.backend.templates();
        let mut parameters = String::new();
        for (index, param) in self.spec.parameters.iter().enumerate() {
            let bindings = self
                .key_bindings()
                .bind("index", index.to_string())
                .bind("label", self.backend.string_literal(&param.label));
            parameters.push_str(&render(templates.interface_parameter, &bindings)?);
        }
        let bindings = self
            .key_bindings()
            .bind("native_name", self.backend.string_literal(&self.spec.name))
            .bind("interface_parameters", parameters);
        Ok(render(templates.interface, &bindings)?)
    }

    fn wrapper(&self) -> Result<String> {
        let templates = self.backend.templates();

        let mut unbox_arguments = String::new();
        for index in 0..self.spec.parameters.len() {
            let bindings = self.key_bindings().bind("index", index.to_string());
            unbox_arguments.push_str(&render(templates.unbox_argument, &bindings)?);
        }
        if !self.spec.ignore_unknown_arguments {
            let bindings =
                Bindings::new().bind("parameter_count", self.spec.parameters.len().to_string());
            unbox_arguments.push_str(&render(templates.unknown_argument_check, &bindings)?);
        }

        let bindings = self
            .key_bindings()
            .bind("unbox_arguments", unbox_arguments)
            .bind("call", self.call()?)
            .bind("call_return", self.call_return()?);
        Ok(render(templates.wrapper, &bindings)?)
    }

    /// The native call: declared arguments in order, then scope arguments in
    /// fixed command-then-handler order.
    fn call(&self) -> Result<String> {
        let templates = self.backend.templates();

        let mut arguments = Vec::with_capacity(self.names.bindings.len() + 2);
        for (index, binding) in self.names.bindings.iter().enumerate() {
            let bindings = Bindings::new()
                .bind("binding", binding.as_str())
                .bind("value", format!("arg_{index}"));
            arguments.push(render(templates.call_argument, &bindings)?);
        }
        for scope in self.spec.call_scopes() {
            let bindings = Bindings::new()
                .bind("binding", scope.env_name())
                .bind("value", scope.env_name());
            arguments.push(render(templates.call_argument, &bindings)?);
        }
        let call_arguments = if arguments.is_empty() {
            String::new()
        } else {
            format!("{}\n    ", arguments.join(","))
        };

        let result_assignment = if self.boxed_coercion().is_some() {
            templates.result_assignment
        } else {
            ""
        };
        let try_keyword = if self.spec.can_error {
            templates.try_keyword
        } else {
            ""
        };

        let bindings = Bindings::new()
            .bind("result_assignment", result_assignment)
            .bind("try_keyword", try_keyword)
            .bind("callee", self.names.implementation.as_str())
            .bind("call_arguments", call_arguments);
        Ok(render(templates.call, &bindings)?)
    }

    fn call_return(&self) -> Result<String> {
        let templates = self.backend.templates();
        if self.boxed_coercion().is_some() {
            Ok(render(templates.return_boxed, &self.key_bindings())?)
        } else {
            Ok(render(templates.return_no_result, &Bindings::new())?)
        }
    }

    fn registration(&self) -> Result<String> {
        Ok(render(
            self.backend.templates().registration,
            &self.key_bindings(),
        )?)
    }
}
