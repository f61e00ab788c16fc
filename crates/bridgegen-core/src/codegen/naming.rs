// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Identifier derivation for generated bridge code.
//!
//! **DDD Context:** Bridge Generation - Identifier Deriver
//!
//! Two names are derived per handler:
//!
//! - the **implementation name**: the native function the wrapper calls,
//!   taken from the `function` override or derived from the handler name
//!   with the backend's [`NamingConvention`];
//! - the **signature key**: the implementation name, each parameter's
//!   binding name and the requested scope names joined with `_`. Every
//!   symbol generated for a handler carries it as a suffix, so overloads that
//!   share a native name never collide.
//!
//! Symbolic tokens such as `+` or `<=` are never mangled; they need an
//! explicit override and are rejected during validation otherwise.
//!
//! ```
//! use bridgegen_core::codegen::naming::NamingConvention;
//!
//! assert_eq!(NamingConvention::LowerCamelCase.apply("define_handler"), "defineHandler");
//! assert_eq!(NamingConvention::Snake.apply("define_handler"), "define_handler");
//! ```

use crate::handler::{HandlerSpec, ParameterSpec};
use ecow::EcoString;

/// How raw `snake_case` tokens become target identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    /// `define_handler` → `defineHandler`.
    LowerCamelCase,
    /// Tokens are used as written.
    Snake,
}

impl NamingConvention {
    /// Applies the convention to an identifier token.
    ///
    /// Empty segments (leading or doubled underscores) are dropped.
    #[must_use]
    pub fn apply(self, token: &str) -> String {
        match self {
            Self::Snake => token.to_string(),
            Self::LowerCamelCase => {
                let mut words = token.split('_').filter(|word| !word.is_empty());
                let mut result = String::with_capacity(token.len());
                if let Some(first) = words.next() {
                    result.push_str(first);
                }
                for word in words {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        result.extend(first.to_uppercase());
                        result.push_str(chars.as_str());
                    }
                }
                result
            }
        }
    }
}

/// Checks whether `token` can be used as an identifier as-is.
///
/// Identifiers start with an ASCII letter or underscore and continue with
/// ASCII alphanumerics or underscores. Anything else (operator glyphs,
/// spaces, empty strings) needs an explicit override.
#[must_use]
pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The native function name for a handler, or `None` when the handler name
/// is symbolic and no override was supplied.
#[must_use]
pub fn implementation_name(spec: &HandlerSpec, convention: NamingConvention) -> Option<EcoString> {
    match &spec.function {
        Some(function) => Some(function.clone()),
        None if is_identifier(&spec.name) => derive_identifier(&spec.name, convention),
        None => None,
    }
}

/// The name a parameter is passed under, or `None` when the label is
/// symbolic and no binding was supplied.
#[must_use]
pub fn binding_name(param: &ParameterSpec, convention: NamingConvention) -> Option<EcoString> {
    match &param.binding {
        Some(binding) => Some(binding.clone()),
        None if is_identifier(&param.label) => derive_identifier(&param.label, convention),
        None => None,
    }
}

/// `_` or `_1` are identifiers, but lose their leading underscore under
/// camel case and stop being one.
fn derive_identifier(token: &str, convention: NamingConvention) -> Option<EcoString> {
    let name = convention.apply(token);
    is_identifier(&name).then(|| name.into())
}

/// The identifiers shared by all artifacts of one handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerNames {
    /// Native function called by the wrapper.
    pub implementation: EcoString,
    /// Binding name of each parameter, in declared order.
    pub bindings: Vec<EcoString>,
    /// Unique symbol suffix.
    pub signature_key: String,
}

impl HandlerNames {
    /// Derives all names for `spec`, or `None` if an override is missing.
    #[must_use]
    pub fn derive(spec: &HandlerSpec, convention: NamingConvention) -> Option<Self> {
        let implementation = implementation_name(spec, convention)?;
        let bindings = spec
            .parameters
            .iter()
            .map(|param| binding_name(param, convention))
            .collect::<Option<Vec<_>>>()?;
        let signature_key = signature_key(spec, &implementation, &bindings);
        Some(Self {
            implementation,
            bindings,
            signature_key,
        })
    }
}

/// Joins the implementation name, binding names and requested scope names.
///
/// Scope suffixes follow [`crate::handler::Scope::CALL_ORDER`], not the
/// order the scopes were declared in.
#[must_use]
pub fn signature_key(spec: &HandlerSpec, implementation: &str, bindings: &[EcoString]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(1 + bindings.len() + 2);
    parts.push(implementation);
    parts.extend(bindings.iter().map(EcoString::as_str));
    parts.extend(spec.call_scopes().map(|scope| scope.env_name()));
    parts.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Scope;

    #[test]
    fn camel_case_conversion() {
        let camel = NamingConvention::LowerCamelCase;
        assert_eq!(camel.apply("show"), "show");
        assert_eq!(camel.apply("is_event_handler"), "isEventHandler");
        assert_eq!(camel.apply("readOnly"), "readOnly");
        assert_eq!(camel.apply("of_type"), "ofType");
    }

    #[test]
    fn camel_case_drops_empty_segments() {
        let camel = NamingConvention::LowerCamelCase;
        assert_eq!(camel.apply("__init__"), "init");
        assert_eq!(camel.apply("a__b"), "aB");
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("show"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("x1"));
        assert!(!is_identifier("+"));
        assert!(!is_identifier("<="));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("two words"));
    }

    #[test]
    fn symbolic_name_needs_override() {
        let spec = HandlerSpec::new("+").param("left", "asScalar");
        assert_eq!(
            implementation_name(&spec, NamingConvention::LowerCamelCase),
            None
        );
        let spec = spec.function("add");
        assert_eq!(
            implementation_name(&spec, NamingConvention::LowerCamelCase).as_deref(),
            Some("add")
        );
    }

    #[test]
    fn override_is_used_verbatim() {
        let spec = HandlerSpec::new("if").function("test_if");
        assert_eq!(
            implementation_name(&spec, NamingConvention::LowerCamelCase).as_deref(),
            Some("test_if")
        );
    }

    #[test]
    fn signature_key_includes_bindings_and_scopes() {
        let spec = HandlerSpec::new("define_handler")
            .param("name", "asString")
            .param("return_type", "asCoercion")
            .scope(Scope::Command);
        let names = HandlerNames::derive(&spec, NamingConvention::LowerCamelCase).unwrap();
        assert_eq!(names.implementation, "defineHandler");
        assert_eq!(names.bindings, ["name", "returnType"]);
        assert_eq!(names.signature_key, "defineHandler_name_returnType_commandEnv");
    }

    #[test]
    fn signature_key_scope_order_is_fixed() {
        let spec = HandlerSpec::new("run")
            .scope(Scope::Handler)
            .scope(Scope::Body)
            .scope(Scope::Command);
        let names = HandlerNames::derive(&spec, NamingConvention::Snake).unwrap();
        assert_eq!(names.signature_key, "run_commandEnv_handlerEnv");
    }

    #[test]
    fn zero_parameter_key_is_just_the_name() {
        let spec = HandlerSpec::new("now");
        let names = HandlerNames::derive(&spec, NamingConvention::LowerCamelCase).unwrap();
        assert_eq!(names.signature_key, "now");
        assert!(names.bindings.is_empty());
    }

    #[test]
    fn camel_case_must_still_yield_an_identifier() {
        let spec = HandlerSpec::new("_1");
        assert_eq!(
            implementation_name(&spec, NamingConvention::LowerCamelCase),
            None
        );
        assert_eq!(
            implementation_name(&spec, NamingConvention::Snake).as_deref(),
            Some("_1")
        );
    }

    #[test]
    fn symbolic_label_without_binding_fails_derivation() {
        let spec = HandlerSpec::new("f").param("?", "asAnything");
        assert!(HandlerNames::derive(&spec, NamingConvention::LowerCamelCase).is_none());
    }
}
