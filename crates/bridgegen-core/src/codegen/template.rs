// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Placeholder substitution for bridge templates.
//!
//! **DDD Context:** Bridge Generation - Template Engine
//!
//! Templates are written in the target language and contain its braces
//! verbatim. Placeholders use a delimiter pair the target never uses,
//! `««name»»`, so a template can be read as (almost) the code it produces.
//!
//! Rendering runs in two phases:
//!
//! 1. [`escape`] doubles every literal `{` and `}` and rewrites each
//!    `««name»»` into the internal `{name}` form.
//! 2. [`resolve`] collapses doubled braces back to literal braces and
//!    substitutes each `{name}` from the [`Bindings`].
//!
//! ```
//! use bridgegen_core::codegen::template::{Bindings, render};
//!
//! let bindings = Bindings::new().bind("name", "show");
//! let out = render("func ««name»»() { }", &bindings)?;
//! assert_eq!(out, "func show() { }");
//! # Ok::<(), bridgegen_core::codegen::template::TemplateError>(())
//! ```

use std::collections::HashMap;
use thiserror::Error;

/// Opening placeholder delimiter.
pub const OPEN: &str = "««";
/// Closing placeholder delimiter.
pub const CLOSE: &str = "»»";

/// Template failures. Both indicate a generator defect, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A placeholder has no matching binding.
    #[error("template placeholder `{name}` has no binding")]
    MissingBinding {
        /// The unresolved placeholder name.
        name: String,
    },

    /// The template text itself is not well formed.
    #[error("malformed template at byte {offset}: {reason}")]
    MalformedTemplate {
        /// Byte offset into the text being processed.
        offset: usize,
        /// What was wrong.
        reason: &'static str,
    },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Values substituted into a template.
///
/// Bindings without a matching placeholder are ignored, which lets one
/// binding set serve several templates.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<&'static str, String>,
}

impl Bindings {
    /// Creates an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a binding.
    #[must_use]
    pub fn bind(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Renders `template` against `bindings`.
///
/// # Errors
///
/// Returns [`TemplateError::MissingBinding`] for a placeholder without a
/// binding and [`TemplateError::MalformedTemplate`] for an unterminated or
/// empty placeholder.
pub fn render(template: &str, bindings: &Bindings) -> Result<String> {
    resolve(&escape(template)?, bindings)
}

/// Phase 1: escapes literal braces and converts placeholders to `{name}`.
///
/// # Errors
///
/// Returns [`TemplateError::MalformedTemplate`] if a placeholder is not
/// closed or its name is not an identifier.
pub fn escape(template: &str) -> Result<String> {
    let mut output = String::with_capacity(template.len() + 16);
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        push_escaped(&mut output, &rest[..start]);

        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            return Err(TemplateError::MalformedTemplate {
                offset: offset + start,
                reason: "unterminated placeholder",
            });
        };
        let name = &after_open[..end];
        if !is_placeholder_name(name) {
            return Err(TemplateError::MalformedTemplate {
                offset: offset + start,
                reason: "placeholder name must be an identifier",
            });
        }
        output.push('{');
        output.push_str(name);
        output.push('}');

        let consumed = start + OPEN.len() + end + CLOSE.len();
        rest = &rest[consumed..];
        offset += consumed;
    }
    push_escaped(&mut output, rest);

    Ok(output)
}

/// Phase 2: resolves `{name}` placeholders and collapses `{{`/`}}`.
///
/// # Errors
///
/// Returns [`TemplateError::MissingBinding`] for an unbound name and
/// [`TemplateError::MalformedTemplate`] for a lone brace.
pub fn resolve(escaped: &str, bindings: &Bindings) -> Result<String> {
    let mut output = String::with_capacity(escaped.len());
    let mut chars = escaped.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                chars.next();
                output.push('{');
            }
            '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                chars.next();
                output.push('}');
            }
            '{' => {
                let name_start = offset + 1;
                let Some(len) = escaped[name_start..].find('}') else {
                    return Err(TemplateError::MalformedTemplate {
                        offset,
                        reason: "unterminated placeholder",
                    });
                };
                let name = &escaped[name_start..name_start + len];
                let value = bindings
                    .get(name)
                    .ok_or_else(|| TemplateError::MissingBinding {
                        name: name.to_string(),
                    })?;
                output.push_str(value);
                // Skip the name and its closing brace.
                for _ in 0..=name.chars().count() {
                    chars.next();
                }
            }
            '}' => {
                return Err(TemplateError::MalformedTemplate {
                    offset,
                    reason: "unmatched closing brace",
                });
            }
            _ => output.push(c),
        }
    }

    Ok(output)
}

fn push_escaped(output: &mut String, literal: &str) {
    for c in literal.chars() {
        match c {
            '{' => output.push_str("{{"),
            '}' => output.push_str("}}"),
            _ => output.push(c),
        }
    }
}

fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_placeholders() {
        let bindings = Bindings::new().bind("a", "1").bind("b", "2");
        assert_eq!(render("««a»» + ««b»»", &bindings).unwrap(), "1 + 2");
    }

    #[test]
    fn literal_braces_survive() {
        let bindings = Bindings::new().bind("body", "return x");
        assert_eq!(
            render("func f() { ««body»» }", &bindings).unwrap(),
            "func f() { return x }"
        );
    }

    #[test]
    fn binding_values_containing_braces_are_not_reinterpreted() {
        let bindings = Bindings::new().bind("body", "{ {x} }");
        assert_eq!(render("««body»»", &bindings).unwrap(), "{ {x} }");
    }

    #[test]
    fn escape_doubles_braces_and_converts_placeholders() {
        assert_eq!(escape("{ ««x»» }").unwrap(), "{{ {x} }}");
    }

    #[test]
    fn resolve_collapses_doubled_braces() {
        let bindings = Bindings::new().bind("x", "v");
        assert_eq!(resolve("{{ {x} }}", &bindings).unwrap(), "{ v }");
    }

    #[test]
    fn missing_binding_is_reported() {
        let err = render("let ««missing»» = 1", &Bindings::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingBinding {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn unused_bindings_are_ignored() {
        let bindings = Bindings::new().bind("used", "x").bind("unused", "y");
        assert_eq!(render("««used»»", &bindings).unwrap(), "x");
    }

    #[test]
    fn unterminated_placeholder_is_malformed() {
        let err = render("abc ««name", &Bindings::new()).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MalformedTemplate { offset: 4, .. }
        ));
    }

    #[test]
    fn empty_placeholder_is_malformed() {
        let err = escape("««»»").unwrap_err();
        assert!(matches!(err, TemplateError::MalformedTemplate { .. }));
    }

    #[test]
    fn lone_brace_in_resolve_is_malformed() {
        let err = resolve("a } b", &Bindings::new()).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MalformedTemplate { offset: 2, .. }
        ));
    }

    #[test]
    fn repeated_placeholder_resolves_each_time() {
        let bindings = Bindings::new().bind("key", "add_a_b");
        assert_eq!(
            render("interface_««key»», function_««key»»", &bindings).unwrap(),
            "interface_add_a_b, function_add_a_b"
        );
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let bindings = Bindings::new().bind("x", "é");
        assert_eq!(render("« ««x»» »", &bindings).unwrap(), "« é »");
    }
}
