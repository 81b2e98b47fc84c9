// ccheck: style checker and auto-fixer for C99 source code

use anyhow::{Context, Result};
use ccheck::checker::{Error, Module};
use ccheck::input::FileInput;
use ccheck::{selftest, write_fixed};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "ccheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "Style checker and auto-fixer for C99 source code"
)]
struct Cli {
    /// Repair style violations in place (keeps the original as <path>.orig)
    #[arg(long)]
    fix: bool,

    /// Run the internal test harness and exit
    #[arg(long)]
    test: bool,

    /// Dump the parsed AST instead of checking
    #[arg(long = "dump-ast")]
    dump_ast: bool,

    /// Dump the token stream instead of checking
    #[arg(long = "dump-toks")]
    dump_toks: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Files to check
    paths: Vec<PathBuf>,
}

/// Result of processing one input file.
enum Outcome {
    Clean,
    Violations,
    Fatal,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("ccheck={}", log_level))
        .with_writer(io::stderr)
        .init();

    if cli.test {
        let ok = selftest::run(&mut io::stdout());
        process::exit(if ok { 0 } else { 1 });
    }

    if cli.paths.is_empty() {
        eprintln!("ccheck: no input files");
        process::exit(2);
    }

    let mut status = 0;
    for path in &cli.paths {
        match process_path(path, &cli) {
            Ok(Outcome::Clean) => {}
            Ok(Outcome::Violations) | Ok(Outcome::Fatal) => status = 1,
            Err(err) => {
                eprintln!("ccheck: {:#}", err);
                status = 1;
            }
        }
    }
    process::exit(status);
}

fn process_path(path: &Path, cli: &Cli) -> Result<Outcome> {
    let fname = path.display().to_string();
    debug!("processing {}", fname);

    let mut input =
        FileInput::open(path).with_context(|| format!("cannot open {}", fname))?;
    let mut module = match Module::from_input(&fname, &mut input) {
        Ok(module) => module,
        Err(Error::Parse(err)) => {
            // Syntax errors are fatal for the translation unit but are
            // reported like diagnostics, with position and expectation
            println!("{}:{}:{}: {}", fname, err.pos.line, err.pos.col, err.message);
            return Ok(Outcome::Fatal);
        }
        Err(Error::Io(err)) => {
            return Err(err).with_context(|| format!("cannot read {}", fname));
        }
    };

    if cli.dump_toks {
        print!("{}", module.dump_toks());
        return Ok(Outcome::Clean);
    }
    if cli.dump_ast {
        println!("{}", module.dump_ast());
        return Ok(Outcome::Clean);
    }

    if cli.fix {
        module.fix();
        write_fixed(path, &module.source())?;
        debug!("fixed {}", fname);
        return Ok(Outcome::Clean);
    }

    let diags = module.check();
    for diag in diags {
        println!("{}", diag.format(&fname));
    }
    debug!("{}: {} violations", fname, diags.len());

    Ok(if diags.is_empty() {
        Outcome::Clean
    } else {
        Outcome::Violations
    })
}
