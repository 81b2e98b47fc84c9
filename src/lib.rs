//! # Introduction
//!
//! ccheck verifies and repairs the layout of C99 source code: indentation,
//! spacing around punctuation, line breaks, trailing whitespace and the
//! 80-column limit.  It never changes what a program means; repairs insert
//! and remove whitespace tokens only, so the fixed file is otherwise
//! byte-identical to the original.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Token sequence → Parser → AST → Checker/Fixer → Output
//! ```
//!
//! 1. [`input`] — pull-based byte sources (file, string).
//! 2. [`parser::lexer`] — lossless tokenization: every byte of input lands
//!    in exactly one token, whitespace and comments included.
//! 3. [`parser`] — recursive descent over the token stream; every
//!    grammatical token the AST records points back into the sequence.
//! 4. [`checker`] — the AST walk classifies each token's spacing
//!    requirement and assigns indentation; a physical-line pass enforces
//!    indentation, trailing-whitespace and line-length rules.  In fix mode
//!    the same walk repairs the token sequence in place.
//! 5. [`selftest`] — the embedded test harness behind `ccheck --test`.
//!
//! ## Usage
//!
//! ```no_run
//! let diags = ccheck::check_file("module.c").unwrap();
//! for diag in &diags {
//!     println!("{}", diag);
//! }
//! ```

pub mod checker;
pub mod input;
pub mod parser;
pub mod selftest;
pub mod srcpos;

pub use checker::{Diag, Module};
pub use srcpos::SrcPos;

use anyhow::{Context, Result};
use input::FileInput;
use std::fs;
use std::path::{Path, PathBuf};

/// Check a single file, returning its formatted diagnostics.
pub fn check_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let fname = path.display().to_string();

    let mut input = FileInput::open(path).with_context(|| format!("cannot open {}", fname))?;
    let mut module = Module::from_input(&fname, &mut input)?;

    Ok(module.check().iter().map(|d| d.format(&fname)).collect())
}

/// Fix a single file in place, keeping the original as `<path>.orig`.
pub fn fix_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let fname = path.display().to_string();

    let mut input = FileInput::open(path).with_context(|| format!("cannot open {}", fname))?;
    let mut module = Module::from_input(&fname, &mut input)?;
    module.fix();

    write_fixed(path, &module.source())
}

/// Path of the backup kept next to a fixed file.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".orig");
    PathBuf::from(os)
}

/// Write the rewritten content to `path`, preserving the original as
/// `<path>.orig` if no such file exists yet.
pub fn write_fixed(path: &Path, content: &str) -> Result<()> {
    let backup = backup_path(path);
    if !backup.exists() {
        fs::copy(path, &backup)
            .with_context(|| format!("cannot back up {}", path.display()))?;
    }
    fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}
