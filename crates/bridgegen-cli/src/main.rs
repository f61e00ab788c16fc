// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Bridgegen command-line interface.
//!
//! This is the main entry point for the `bridgegen` command.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use miette::Result;
use tracing_subscriber::EnvFilter;

use bridgegen_core::codegen::backend::Target;

mod commands;
mod diagnostic;
mod table;

/// Bridgegen: generates bridging code for natively implemented handlers
#[derive(Debug, Parser)]
#[command(name = "bridgegen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: info, -vv: debug, -vvv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the bridge module for a handler table
    Generate {
        /// Handler table file (TOML)
        table: Utf8PathBuf,

        /// Output file or directory (default: stdout)
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,

        /// Module name (overrides `[module] name` in the table)
        #[arg(long)]
        module: Option<String>,

        /// Target language (overrides `[module] target` in the table)
        #[arg(long, value_enum)]
        target: Option<TargetArg>,
    },

    /// Validate a handler table and report every problem
    Check {
        /// Handler table file (TOML)
        table: Utf8PathBuf,
    },

    /// List each handler's signature key and summary
    List {
        /// Handler table file (TOML)
        table: Utf8PathBuf,
    },
}

/// Command-line spelling of [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetArg {
    Swift,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Swift => Target::Swift,
        }
    }
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    // Logs go to stderr; stdout may carry generated code.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Generate {
            table,
            output,
            module,
            target,
        } => commands::generate::generate(
            &table,
            output.as_deref(),
            module.as_deref(),
            target.map(Target::from),
        ),
        Command::Check { table } => commands::check::check(&table),
        Command::List { table } => commands::list::list(&table),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Targets are Rust module paths: the binary logs as `bridgegen`, the
    // library as `bridgegen_core`.
    match v {
        0 => "bridgegen=warn,bridgegen_core=warn",
        1 => "bridgegen=info,bridgegen_core=info",
        2 => "bridgegen=debug,bridgegen_core=debug",
        _ => "bridgegen=trace,bridgegen_core=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_arguments_parse() {
        let cli = Cli::try_parse_from([
            "bridgegen",
            "-vv",
            "generate",
            "tables/stdlib.toml",
            "-o",
            "out",
            "--module",
            "mathlib",
            "--target",
            "swift",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Generate {
            table,
            output,
            module,
            target,
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(table, "tables/stdlib.toml");
        assert_eq!(output.as_deref(), Some(Utf8Path::new("out")));
        assert_eq!(module.as_deref(), Some("mathlib"));
        assert_eq!(target, Some(TargetArg::Swift));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let result = Cli::try_parse_from(["bridgegen", "generate", "t.toml", "--target", "cobol"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbosity_directives() {
        assert_eq!(directive_for_verbosity(0), "bridgegen=warn,bridgegen_core=warn");
        assert!(directive_for_verbosity(5).starts_with("bridgegen=trace"));
    }
}
