// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Target-language backends.
//!
//! **DDD Context:** Bridge Generation - Target Language
//!
//! A [`Backend`] owns everything that depends on the language being emitted:
//! the artifact templates, the naming convention used to derive
//! identifiers, the language's reserved words, and how a native name is
//! written as a string literal. The renderer and assembler are written
//! against this trait only.
//!
//! One backend ships today: [`SwiftBackend`], matching the Swift runtime the
//! bridge files are compiled into.

use super::naming::NamingConvention;
use serde::Deserialize;
use std::fmt;

/// Template text for every artifact a backend emits.
///
/// Placeholders use the `««name»»` syntax of [`super::template`].
#[derive(Debug, Clone, Copy)]
pub struct Templates {
    /// File header. Binds `file_name`, `module`.
    pub file_header: &'static str,
    /// One-line handler summary. Binds `native_name`, `labels`.
    pub handler_comment: &'static str,
    /// Signature block. Binds `key`, `signature_parameters`, `return_type`.
    pub signature: &'static str,
    /// One signature slot. Binds `index`, `coercion`.
    pub signature_parameter: &'static str,
    /// Signature block for a handler without parameters, where the target
    /// rejects a single-element tuple. Binds `key`, `return_type`.
    pub signature_without_parameters: &'static str,
    /// Interface block. Binds `key`, `native_name`, `interface_parameters`.
    pub interface: &'static str,
    /// One interface entry. Binds `key`, `index`, `label`.
    pub interface_parameter: &'static str,
    /// Call-wrapper. Binds `key`, `unbox_arguments`, `call`, `call_return`.
    pub wrapper: &'static str,
    /// Unbox one positional argument. Binds `key`, `index`.
    pub unbox_argument: &'static str,
    /// Reject surplus arguments. Binds `parameter_count`.
    pub unknown_argument_check: &'static str,
    /// Native call. Binds `result_assignment`, `try_keyword`, `callee`,
    /// `call_arguments`.
    pub call: &'static str,
    /// Assignment prefix for a call whose result is kept.
    pub result_assignment: &'static str,
    /// Keyword marking a call that may throw.
    pub try_keyword: &'static str,
    /// One argument of the native call. Binds `binding`, `value`.
    pub call_argument: &'static str,
    /// Box the result. Binds `key`.
    pub return_boxed: &'static str,
    /// Return the no-value marker.
    pub return_no_result: &'static str,
    /// Registration statement. Binds `key`.
    pub registration: &'static str,
    /// Aggregate loader opening line. Binds `module`.
    pub loader_open: &'static str,
    /// Aggregate loader closing line.
    pub loader_close: &'static str,
}

/// A target language for generated bridge code.
pub trait Backend: fmt::Debug {
    /// Short backend name, e.g. `swift`.
    fn name(&self) -> &'static str;

    /// Convention used to derive implementation and binding names.
    fn naming(&self) -> NamingConvention;

    /// Words that cannot be used as a function name.
    fn reserved_words(&self) -> &'static [&'static str];

    /// Artifact templates.
    fn templates(&self) -> &Templates;

    /// Coercion token filling the return slot of a no-result handler.
    fn no_result_coercion(&self) -> &'static str;

    /// The generated file name for a module.
    fn file_name(&self, module: &str) -> String;

    /// Writes `text` as a string literal of the target language.
    fn string_literal(&self, text: &str) -> String;

    /// Whether `word` is reserved in the target language.
    fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words().contains(&word)
    }
}

/// Selectable backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Swift bridge files.
    #[default]
    Swift,
}

impl Target {
    /// The backend implementing this target.
    #[must_use]
    pub fn backend(self) -> &'static dyn Backend {
        match self {
            Target::Swift => &SwiftBackend,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.backend().name())
    }
}

/// Swift bridge backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftBackend;

const SWIFT_TEMPLATES: Templates = Templates {
    file_header: "//\n//  ««file_name»»\n//\n//  Bridging code for ««module»» primitive handlers. This file is auto-generated; do not edit directly.\n//\n",
    handler_comment: "// ««native_name»» (««labels»»)",
    signature: "let signature_««key»» = (««signature_parameters»»\n    returnType: ««return_type»»\n)",
    signature_parameter: "\n    paramType_««index»»: ««coercion»»,",
    signature_without_parameters: "let signature_««key»» = (\n    (),\n    returnType: ««return_type»»\n)",
    interface: "let interface_««key»» = CallableInterface(\n    name: ««native_name»»,\n    parameters: [««interface_parameters»»\n    ],\n    returnType: signature_««key»».returnType\n)",
    interface_parameter: "\n        (««label»», signature_««key»».paramType_««index»»),",
    wrapper: "func function_««key»»(command: Command, commandEnv: Scope, handler: CallableValue, handlerEnv: Scope, coercion: Coercion) throws -> Value {««unbox_arguments»»\n    ««call»»\n    ««call_return»»\n}",
    unbox_argument: "\n    let arg_««index»» = try signature_««key»».paramType_««index»».unboxArgument(at: ««index»», command: command, commandEnv: commandEnv, handler: handler)",
    unknown_argument_check: "\n    if command.arguments.count > ««parameter_count»» { throw UnrecognizedArgumentError(command: command, handler: handler) }",
    call: "««result_assignment»»««try_keyword»»««callee»»(««call_arguments»»)",
    result_assignment: "let result = ",
    try_keyword: "try ",
    call_argument: "\n        ««binding»»: ««value»»",
    return_boxed: "return try signature_««key»».returnType.box(value: result, env: handlerEnv)",
    return_no_result: "return noValue",
    registration: "try env.add(interface_««key»», function_««key»»)",
    loader_open: "func ««module»»_loadHandlers(env: Env) throws {",
    loader_close: "}",
};

/// Swift keywords that cannot name a function without backticks.
const SWIFT_KEYWORDS: &[&str] = &[
    "as", "associatedtype", "break", "case", "catch", "class", "continue", "default", "defer",
    "deinit", "do", "else", "enum", "extension", "fallthrough", "false", "fileprivate", "for",
    "func", "guard", "if", "import", "in", "init", "inout", "internal", "is", "let", "nil",
    "operator", "private", "protocol", "public", "repeat", "rethrows", "return", "self", "Self",
    "static", "struct", "subscript", "super", "switch", "throw", "throws", "true", "try",
    "typealias", "var", "where", "while",
];

impl Backend for SwiftBackend {
    fn name(&self) -> &'static str {
        "swift"
    }

    fn naming(&self) -> NamingConvention {
        NamingConvention::LowerCamelCase
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        SWIFT_KEYWORDS
    }

    fn templates(&self) -> &Templates {
        &SWIFT_TEMPLATES
    }

    fn no_result_coercion(&self) -> &'static str {
        "asNoResult"
    }

    fn file_name(&self, module: &str) -> String {
        format!("{module}_handlers.swift")
    }

    fn string_literal(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() + 2);
        result.push('"');
        for c in text.chars() {
            match c {
                '"' => result.push_str("\\\""),
                '\\' => result.push_str("\\\\"),
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                '\0' => result.push_str("\\0"),
                _ => result.push(c),
            }
        }
        result.push('"');
        result
    }
}
