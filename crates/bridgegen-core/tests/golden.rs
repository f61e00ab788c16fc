// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Golden-file tests for generated bridge modules.
//!
//! Snapshots live in `tests/snapshots/`. Review changes with
//! `cargo insta review`.

use bridgegen_core::prelude::*;

fn stdlib_table() -> HandlerTable {
    HandlerTable::new(vec![
        HandlerSpec::new("add")
            .param("a", "asDouble")
            .param("b", "asDouble")
            .returns("asDouble")
            .can_error(),
        HandlerSpec::new("show").param("value", "asAnything"),
        HandlerSpec::new("if")
            .function("testIf")
            .param("condition", "asBool")
            .param("action", "asBlock")
            .returns("asIs")
            .can_error()
            .scope(Scope::Command),
        HandlerSpec::new("notify")
            .with_parameter(ParameterSpec::new("event_name", "asString").with_binding("event"))
            .scope(Scope::Handler)
            .scope(Scope::Command)
            .ignore_unknown_arguments(),
        HandlerSpec::new("now").returns("asDouble"),
    ])
}

#[test]
fn stdlib_module() {
    let output = generate_module(&stdlib_table(), &GenerateOptions::new("stdlib")).unwrap();
    insta::assert_snapshot!("stdlib_module", output);
}

#[test]
fn empty_module() {
    let output = generate_module(&HandlerTable::default(), &GenerateOptions::new("stdlib")).unwrap();
    assert_eq!(
        output,
        "//\n//  stdlib_handlers.swift\n//\n//  Bridging code for stdlib primitive handlers. This file is auto-generated; do not edit directly.\n//\n\nfunc stdlib_loadHandlers(env: Env) throws {\n}\n"
    );
}

#[test]
fn written_module_matches_snapshot_source() {
    let table = stdlib_table();
    let options = GenerateOptions::new("stdlib");
    let mut sink = Vec::new();
    write_module(&table, &options, &mut sink).unwrap();
    assert_eq!(sink, generate_module(&table, &options).unwrap().into_bytes());
}

#[test]
fn invalid_table_is_reported_with_context() {
    let table = HandlerTable::new(vec![
        HandlerSpec::new("show"),
        HandlerSpec::new("<=").param("left", "asScalar"),
    ]);
    let err = generate_module(&table, &GenerateOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid handler table: handler `<=` (entry 1), field `name`: `<=` is not an identifier; set `function` to the implementation name"
    );
}
