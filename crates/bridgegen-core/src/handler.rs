// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Handler table data model.
//!
//! **DDD Context:** Bridge Generation - Input Model
//!
//! A [`HandlerTable`] is the single input to the generator. Each entry is a
//! [`HandlerSpec`] describing one natively implemented operation: the name
//! the command language sees, its ordered parameters, its return coercion and
//! its requirements (error propagation, scope injection, argument checking).
//!
//! The table is built once (in process, or deserialized from a table file by
//! the CLI), handed to the generator by reference, and discarded afterwards.
//! Coercion tokens are opaque: the generator copies them into the output
//! verbatim and never interprets them.

use ecow::EcoString;
use serde::Deserialize;
use std::fmt;

/// An opaque coercion token, e.g. `asDouble` or `AsArray(asParameter)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Coercion(EcoString);

impl Coercion {
    /// Creates a coercion token.
    pub fn new(token: impl Into<EcoString>) -> Self {
        Self(token.into())
    }

    /// The token as written in the table.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Coercion {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// What a handler hands back to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Option<Coercion>")]
pub enum ReturnType {
    /// The native result is boxed with this coercion.
    Value(Coercion),
    /// The native result (if any) is discarded and the runtime receives the
    /// canonical "no value" marker.
    #[default]
    NoResult,
}

impl From<Option<Coercion>> for ReturnType {
    fn from(coercion: Option<Coercion>) -> Self {
        coercion.map_or(Self::NoResult, Self::Value)
    }
}

impl ReturnType {
    /// The boxing coercion, or `None` for no-result handlers.
    #[must_use]
    pub fn coercion(&self) -> Option<&Coercion> {
        match self {
            Self::Value(coercion) => Some(coercion),
            Self::NoResult => None,
        }
    }

    /// The coercion that boxes a native result, or `None` when the wrapper
    /// returns the no-value marker. A `Value` spelled with the backend's
    /// no-result token counts as no result.
    #[must_use]
    pub fn boxed_coercion(&self, no_result: &str) -> Option<&Coercion> {
        self.coercion()
            .filter(|coercion| coercion.as_str() != no_result)
    }
}

/// An environment context a wrapper can pass to the native implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The scope the command was evaluated in.
    Command,
    /// The scope the handler was defined in.
    Handler,
    /// A fresh sub-scope for the handler body. Accepted but not generated yet.
    Body,
}

impl Scope {
    /// Scopes that reach the native call, in the order they are appended.
    pub const CALL_ORDER: [Scope; 2] = [Scope::Command, Scope::Handler];

    /// The argument/key name used for this scope in generated code.
    #[must_use]
    pub fn env_name(self) -> &'static str {
        match self {
            Scope::Command => "commandEnv",
            Scope::Handler => "handlerEnv",
            Scope::Body => "bodyEnv",
        }
    }
}

/// One declared parameter of a handler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSpec {
    /// Caller-visible parameter name (used in interface metadata).
    pub label: EcoString,
    /// Name used when invoking the native implementation. Derived from
    /// `label` by the backend's naming convention when absent.
    #[serde(default)]
    pub binding: Option<EcoString>,
    /// Coercion used to unbox the argument.
    pub coercion: Coercion,
}

impl ParameterSpec {
    /// Creates a parameter whose binding name is derived from its label.
    pub fn new(label: impl Into<EcoString>, coercion: impl Into<Coercion>) -> Self {
        Self {
            label: label.into(),
            binding: None,
            coercion: coercion.into(),
        }
    }

    /// Sets an explicit binding name.
    #[must_use]
    pub fn with_binding(mut self, binding: impl Into<EcoString>) -> Self {
        self.binding = Some(binding.into());
        self
    }
}

/// Declarative description of one native operation exposed to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerSpec {
    /// Name visible to the command language. Need not be unique.
    pub name: EcoString,
    /// Implementation name override. Required when `name` is not a legal
    /// identifier (operator glyphs) or is a reserved word of the target.
    #[serde(default)]
    pub function: Option<EcoString>,
    /// Declared parameters, in call order.
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    /// Return coercion; absent means no result.
    #[serde(default)]
    pub returns: ReturnType,
    /// The native implementation may throw.
    #[serde(default)]
    pub can_error: bool,
    /// Scopes passed to the implementation after the declared arguments.
    #[serde(default)]
    pub scopes: Vec<Scope>,
    /// Skip the trailing unrecognized-argument check (event handlers).
    #[serde(default)]
    pub ignore_unknown_arguments: bool,
}

impl HandlerSpec {
    /// Creates a handler with no parameters, no result and no requirements.
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            function: None,
            parameters: Vec::new(),
            returns: ReturnType::NoResult,
            can_error: false,
            scopes: Vec::new(),
            ignore_unknown_arguments: false,
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, label: impl Into<EcoString>, coercion: impl Into<Coercion>) -> Self {
        self.parameters.push(ParameterSpec::new(label, coercion));
        self
    }

    /// Appends a fully specified parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the return coercion.
    #[must_use]
    pub fn returns(mut self, coercion: impl Into<Coercion>) -> Self {
        self.returns = ReturnType::Value(coercion.into());
        self
    }

    /// Sets the implementation name override.
    #[must_use]
    pub fn function(mut self, function: impl Into<EcoString>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Marks the implementation as throwing.
    #[must_use]
    pub fn can_error(mut self) -> Self {
        self.can_error = true;
        self
    }

    /// Requests a scope argument.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scopes.push(scope);
        self
    }

    /// Disables the unrecognized-argument check.
    #[must_use]
    pub fn ignore_unknown_arguments(mut self) -> Self {
        self.ignore_unknown_arguments = true;
        self
    }

    /// Whether `scope` was requested.
    #[must_use]
    pub fn requires(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Requested scopes that are passed to the native call, always in
    /// [`Scope::CALL_ORDER`] regardless of declaration order.
    pub fn call_scopes(&self) -> impl Iterator<Item = Scope> + '_ {
        Scope::CALL_ORDER
            .into_iter()
            .filter(|scope| self.requires(*scope))
    }
}

/// The ordered, immutable input to one generator run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct HandlerTable {
    handlers: Vec<HandlerSpec>,
}

impl HandlerTable {
    /// Creates a table; entry order is output order.
    #[must_use]
    pub fn new(handlers: Vec<HandlerSpec>) -> Self {
        Self { handlers }
    }

    /// Entries in table order.
    #[must_use]
    pub fn handlers(&self) -> &[HandlerSpec] {
        &self.handlers
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl FromIterator<HandlerSpec> for HandlerTable {
    fn from_iter<I: IntoIterator<Item = HandlerSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
