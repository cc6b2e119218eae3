// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use tacc::compiler::{CompileOutput, CompilerPipeline};
use tacc_ctx::{CompilerConfig, Limits};
use tracing_subscriber::EnvFilter;

/// Toy C front end: tokens, syntax check, semantic check, three-address code.
#[derive(Parser, Debug)]
#[command(name = "tacc")]
#[command(version = "0.1.0")]
struct Cli {
    /// Source file. Without one, stdin is read up to an `END` line.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Stop syntax validation at the first structural error
    #[arg(long)]
    halt_on_first: bool,

    /// Emit `label` instructions where `if` blocks close
    #[arg(long)]
    place_exit_labels: bool,

    /// Do not register identifiers seen by the tokenizer
    #[arg(long)]
    no_collect_identifiers: bool,

    #[arg(long, value_name = "N")]
    max_tokens: Option<usize>,

    #[arg(long, value_name = "N")]
    max_symbols: Option<usize>,

    #[arg(long, value_name = "N")]
    max_instructions: Option<usize>,
}

impl Cli {
    fn config(&self) -> CompilerConfig {
        CompilerConfig {
            collect_identifiers: !self.no_collect_identifiers,
            halt_on_first_syntax_error: self.halt_on_first,
            place_exit_labels: self.place_exit_labels,
            limits: Limits {
                max_tokens: self.max_tokens,
                max_symbols: self.max_symbols,
                max_instructions: self.max_instructions,
            },
        }
    }
}

/// Reads lines until one that is exactly `END`, or until the stream ends.
fn read_until_sentinel(input: impl BufRead) -> std::io::Result<String> {
    let mut source = String::new();
    for line in input.lines() {
        let line = line?;
        if line == "END" {
            break;
        }
        source.push_str(&line);
        source.push('\n');
    }
    Ok(source)
}

fn print_report(cli: &Cli, source: &str, out: &CompileOutput) {
    if cli.tokens {
        println!("Tokenized Output:");
        for tok in &out.tokens {
            println!("{tok}");
        }
        println!();
    }

    println!("Syntax Analysis:");
    println!("{}", out.syntax);
    println!();

    println!("Semantic Analysis:");
    for finding in &out.sema.findings {
        println!("Error: {finding}");
    }
    println!("Symbols: {}", out.sema.symbols.history().join(", "));
    println!();

    match &out.tac {
        Ok(program) => {
            println!("Generated Intermediate Code (Three-Address Code):");
            print!("{program}");
            if !program.pending_exits.is_empty() {
                println!("pending exit labels: {}", program.pending_exits.iter().join(", "));
            }
        },
        Err(err) => eprintln!("{err}"),
    }

    for rendered in out.diagnostics.render_all(source) {
        eprintln!("{rendered}\n");
    }
}

fn main() -> ExitCode {
    if let Ok(filter) = EnvFilter::try_from_env("TACC_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }

    let cli = Cli::parse();
    let source = match &cli.file {
        Some(path) => std::fs::read_to_string(path),
        None => read_until_sentinel(std::io::stdin().lock()),
    };
    let source = match source {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read input: {err}");
            return ExitCode::FAILURE;
        },
    };

    match CompilerPipeline::with_config(cli.config()).run(&source) {
        Ok(out) => {
            print_report(&cli, &source, &out);
            if out.has_errors() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        },
        Err(err) => {
            eprintln!("{}", err.to_diagnostic().render(&source));
            ExitCode::FAILURE
        },
    }
}
