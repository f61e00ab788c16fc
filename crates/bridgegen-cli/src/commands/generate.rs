// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Generate bridge modules from handler tables.

use bridgegen_core::codegen::backend::Target;
use bridgegen_core::codegen::{GenerateOptions, generate_module, write_module};
use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use std::fs;
use std::io::{self, Write};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use super::ensure_valid;
use crate::table;

/// Generate the bridge module for the table at `table_path`.
///
/// Writes to `output` (a file, or a directory that receives the backend's
/// default file name) or to stdout. Nothing is written unless the whole
/// module rendered successfully, and an existing file is only replaced once
/// the new content is fully on disk.
#[instrument(skip_all, fields(table = %table_path))]
pub fn generate(
    table_path: &Utf8Path,
    output: Option<&Utf8Path>,
    module: Option<&str>,
    target: Option<Target>,
) -> Result<()> {
    let file = table::load_table(table_path)?;
    let options = file.options(module, target);
    let table = file.into_table();
    info!(
        handlers = table.len(),
        module = options.module_name(),
        "Loaded handler table"
    );

    ensure_valid(table_path, &table, &options)?;

    let Some(output) = output else {
        let mut stdout = io::stdout().lock();
        return write_module(&table, &options, &mut stdout)
            .into_diagnostic()
            .wrap_err("Failed to write bridge module to stdout");
    };

    let source = generate_module(&table, &options)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to generate bridge module from '{table_path}'"))?;

    let destination = output_path(output, &options);
    let directory = destination
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or(Utf8Path::new("."));
    debug!("Creating output directory: {}", directory);
    fs::create_dir_all(directory)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to create output directory '{directory}'"))?;
    write_atomically(&destination, directory, &source)?;

    info!(path = %destination, "Wrote bridge module");
    Ok(())
}

/// Writes `source` to a temporary file in `directory`, then renames it over
/// `destination`. The temporary file is removed if any step fails.
fn write_atomically(destination: &Utf8Path, directory: &Utf8Path, source: &str) -> Result<()> {
    let mut staged = NamedTempFile::new_in(directory)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to create a temporary file in '{directory}'"))?;
    staged
        .write_all(source.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write '{destination}'"))?;
    staged
        .persist(destination)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to replace '{destination}'"))?;
    Ok(())
}

/// An existing directory receives the backend's file name for the module.
fn output_path(output: &Utf8Path, options: &GenerateOptions) -> Utf8PathBuf {
    if output.is_dir() {
        output.join(options.backend().file_name(options.module_name()))
    } else {
        output.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TABLE: &str = r#"
[module]
name = "stdlib"

[[handler]]
name = "+"
function = "add"
can_error = true
parameters = [
  { label = "left", coercion = "asScalar" },
  { label = "right", coercion = "asScalar" },
]
returns = "asScalar"

[[handler]]
name = "show"
parameters = [{ label = "value", coercion = "asAnything" }]
"#;

    fn setup(content: &str) -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        fs::write(root.join("handlers.toml"), content).unwrap();
        (temp, root)
    }

    #[test]
    fn test_generate_into_directory_uses_backend_file_name() {
        let (_temp, root) = setup(TABLE);

        generate(&root.join("handlers.toml"), Some(&root), None, None).unwrap();

        let output = fs::read_to_string(root.join("stdlib_handlers.swift")).unwrap();
        assert!(output.starts_with("//\n//  stdlib_handlers.swift\n"));
        assert!(output.contains("func function_add_left_right("));
        assert!(output.contains("try env.add(interface_show_value, function_show_value)"));
    }

    #[test]
    fn test_generate_into_file_with_module_override() {
        let (_temp, root) = setup(TABLE);
        let out = root.join("gen").join("Bridge.swift");

        generate(&root.join("handlers.toml"), Some(&out), Some("mathlib"), None).unwrap();

        let output = fs::read_to_string(&out).unwrap();
        assert!(output.contains("func mathlib_loadHandlers(env: Env) throws {"));
        assert!(output.contains("//  mathlib_handlers.swift"));
    }

    #[test]
    fn test_regenerate_replaces_file_without_leftovers() {
        let (_temp, root) = setup(TABLE);
        let out = root.join("stdlib_handlers.swift");
        fs::write(&out, "stale").unwrap();

        generate(&root.join("handlers.toml"), Some(&root), None, None).unwrap();

        let output = fs::read_to_string(&out).unwrap();
        assert!(output.starts_with("//\n//  stdlib_handlers.swift\n"));
        let mut entries: Vec<String> = fs::read_dir(&root)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        entries.sort();
        assert_eq!(entries, ["handlers.toml", "stdlib_handlers.swift"]);
    }

    #[test]
    fn test_failed_write_keeps_previous_file() {
        let (_temp, root) = setup(TABLE);
        let out = root.join("out.swift");
        fs::write(&out, "previous").unwrap();

        let result = write_atomically(&out, &root.join("missing"), "new");

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&out).unwrap(), "previous");
    }

    #[test]
    fn test_invalid_table_writes_nothing() {
        let (_temp, root) = setup("[[handler]]\nname = \"<=\"\n");
        let out = root.join("out.swift");

        let result = generate(&root.join("handlers.toml"), Some(&out), None, None);

        assert!(result.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_invalid_module_name_is_rejected() {
        let (_temp, root) = setup(TABLE);
        let out = root.join("out.swift");

        let result = generate(&root.join("handlers.toml"), Some(&out), Some("std-lib"), None);

        let err = format!("{:?}", result.unwrap_err());
        assert!(err.contains("std-lib"), "error should mention module: {err}");
        assert!(!out.exists());
    }

    #[test]
    fn test_output_path_for_file() {
        let options = GenerateOptions::new("stdlib");
        let path = output_path(Utf8Path::new("/nonexistent/Out.swift"), &options);
        assert_eq!(path, "/nonexistent/Out.swift");
    }
}
