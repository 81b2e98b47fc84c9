//! Style checker and fixer
//!
//! The checker owns the full token sequence of a translation unit and the
//! AST annotating it:
//!
//! - [`toks`]: the ordered token sequence (every byte of input, whitespace
//!   included)
//! - [`rules`]: spacing predicates and the whitespace repair primitives
//! - `decls` / `stmts` / `exprs`: the AST walk classifying every
//!   grammatical token
//! - [`lines`]: the physical-line pass (indentation, trailing whitespace,
//!   line length)
//! - `dump`: diagnostic dumps of the token stream and the AST
//!
//! Checking and fixing are the same walk in two modes: with `fix` off,
//! violations are collected as [`Diag`]s; with `fix` on, the stream is
//! repaired in place and regenerating the source yields the corrected
//! file.

pub mod toks;

mod decls;
mod dump;
mod exprs;
mod lines;
mod rules;
mod stmts;

use crate::input::{Input, StringInput};
use crate::parser::ast;
use crate::parser::lexer::{Lexer, TokKind};
use crate::parser::parse::{ParseError, Parser, ParserTok};
use crate::srcpos::{format_range, SrcPos};
use std::fmt;
use std::io;
use std::mem;
use self::toks::TokSeq;

/// A style violation: position range and human-readable message.
#[derive(Debug, Clone)]
pub struct Diag {
    pub bpos: SrcPos,
    pub epos: SrcPos,
    pub message: String,
}

impl Diag {
    /// Render as `file:LINE:COL: message` (ranges collapse per
    /// [`format_range`]).
    pub fn format(&self, fname: &str) -> String {
        format!("{}: {}", format_range(fname, self.bpos, self.epos), self.message)
    }
}

/// Fatal errors while building a module: input I/O failures and syntax
/// errors.  Style violations are not errors; they are [`Diag`]s.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "read error: {}", err),
            Error::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

/// One checked translation unit: its token sequence, its AST and the
/// diagnostics of the last check.
#[derive(Debug)]
pub struct Module {
    fname: String,
    pub(crate) toks: TokSeq,
    ast: ast::Module,
    diags: Vec<Diag>,
    pub(crate) fix: bool,
}

impl Module {
    /// Lex and parse one translation unit from an input source.
    pub fn from_input(fname: &str, input: &mut dyn Input) -> Result<Self, Error> {
        let mut lexer = Lexer::new(input);
        let mut toks = TokSeq::new();
        loop {
            let tok = lexer.get_tok()?;
            let kind = tok.kind;
            toks.append(tok);
            if kind == TokKind::Eof {
                break;
            }
        }

        // The grammar sees the stream with whitespace, comments and
        // preprocessor lines hidden; each kept token carries its id so the
        // AST can point back into the sequence.
        let ptoks: Vec<ParserTok> = toks
            .iter()
            .filter(|&id| !toks.kind(id).is_nongrammar())
            .map(|id| ParserTok {
                tok: toks.get(id).tok.clone(),
                id,
            })
            .collect();

        let mut parser = Parser::new(ptoks);
        let ast = parser.parse_module()?;

        Ok(Self {
            fname: fname.to_string(),
            toks,
            ast,
            diags: Vec::new(),
            fix: false,
        })
    }

    /// Lex and parse one translation unit from a string.
    pub fn from_source(fname: &str, source: &str) -> Result<Self, Error> {
        let mut input = StringInput::new(source);
        Self::from_input(fname, &mut input)
    }

    pub fn fname(&self) -> &str {
        &self.fname
    }

    /// Check the module, reporting every style violation.
    pub fn check(&mut self) -> &[Diag] {
        self.run(false);
        &self.diags
    }

    /// Repair the module's token sequence in place.
    pub fn fix(&mut self) {
        self.run(true);
    }

    /// Diagnostics collected by the last [`check`](Self::check).
    pub fn diags(&self) -> &[Diag] {
        &self.diags
    }

    /// Regenerate the source text: the concatenation of every token's
    /// text in sequence order.
    pub fn source(&self) -> String {
        self.toks.text()
    }

    fn run(&mut self, fix: bool) {
        self.fix = fix;
        self.diags.clear();

        // The walk needs the AST and mutable access to the token
        // sequence at once; take the tree out for the duration.
        let ast = mem::take(&mut self.ast);
        let scope = rules::Scope::new();
        for gdecln in &ast.decls {
            self.check_gdecln(gdecln, scope);
        }
        self.ast = ast;

        self.check_lines();
    }

    pub(crate) fn report(&mut self, bpos: SrcPos, epos: SrcPos, message: &str) {
        self.diags.push(Diag {
            bpos,
            epos,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_strings(src: &str) -> Vec<String> {
        let mut module = Module::from_source("file", src).unwrap();
        module
            .check()
            .iter()
            .map(|d| d.format("file"))
            .collect()
    }

    fn fix_source(src: &str) -> String {
        let mut module = Module::from_source("file", src).unwrap();
        module.fix();
        module.source()
    }

    #[test]
    fn test_trailing_whitespace() {
        // S1: two trailing spaces before the newline
        let src = "int x = 1;  \n";
        assert_eq!(
            check_strings(src),
            vec!["file:1:12: Whitespace at end of line"]
        );
        assert_eq!(fix_source(src), "int x = 1;\n");
    }

    #[test]
    fn test_wrong_indentation() {
        // S2: body indented with two spaces instead of one tab
        let src = "int f(void)\n{\n  return 0;\n}\n";
        assert_eq!(
            check_strings(src),
            vec![
                "file:3:3: Wrong indentation: found 0 tabs, should be 1 tabs",
                "file:3:3: Non-continuation line should not have any spaces \
                 for indentation (found 2)",
            ]
        );
        assert_eq!(fix_source(src), "int f(void)\n{\n\treturn 0;\n}\n");
    }

    #[test]
    fn test_missing_space_before_brace() {
        // S3: block opening brace cuddled against the condition
        let src = "void f(void)\n{\n\tif (x){\n\t\treturn;\n\t}\n}\n";
        assert_eq!(
            check_strings(src),
            vec!["file:3:8: Expected single space before block opening brace."]
        );
        assert_eq!(
            fix_source(src),
            "void f(void)\n{\n\tif (x) {\n\t\treturn;\n\t}\n}\n"
        );
    }

    #[test]
    fn test_space_after_lparen() {
        // S4: space between '(' and the first argument
        let src = "void g(void)\n{\n\tf( x);\n}\n";
        assert_eq!(
            check_strings(src),
            vec!["file:3:4: Unexpected whitespace after '('."]
        );
        assert_eq!(fix_source(src), "void g(void)\n{\n\tf(x);\n}\n");
    }

    #[test]
    fn test_else_on_new_line_for_braceless_body() {
        // S5: both branches unbraced, else begins its own line
        let src = "void f(void)\n{\n\tif (x)\n\t\ty();\n\telse\n\t\tz();\n}\n";
        assert_eq!(check_strings(src), Vec::<String>::new());
        assert_eq!(fix_source(src), src);
    }

    #[test]
    fn test_else_cuddled_after_braced_body() {
        let src = "void f(void)\n{\n\tif (x) {\n\t\ty();\n\t} else {\n\t\tz();\n\t}\n}\n";
        assert_eq!(check_strings(src), Vec::<String>::new());
    }

    #[test]
    fn test_case_label_dedent() {
        // S6: case one level inside the switch, its body one deeper
        let src =
            "void f(void)\n{\n\tswitch (x) {\n\t\tcase 1:\n\t\t\tbreak;\n\t}\n}\n";
        assert_eq!(check_strings(src), Vec::<String>::new());
        assert_eq!(fix_source(src), src);
    }

    #[test]
    fn test_statement_must_start_on_new_line() {
        let src = "void f(void)\n{\n\tx(); y();\n}\n";
        let diags = check_strings(src);
        assert!(diags
            .iter()
            .any(|d| d.contains("Statement must start on a new line.")));
        assert_eq!(fix_source(src), "void f(void)\n{\n\tx();\n\ty();\n}\n");
    }

    #[test]
    fn test_preproc_line_not_indented() {
        let src = "#define X 1\nint x;\n";
        assert_eq!(check_strings(src), Vec::<String>::new());
    }

    #[test]
    fn test_line_too_long() {
        // "int " + 80-character identifier + ";" is 85 characters
        let src = format!("int {};\n", "a".repeat(80));
        let diags = check_strings(&src);
        assert_eq!(
            diags,
            vec!["file:1:81: Line too long (5 characters above 80-character limit)"]
        );
    }

    #[test]
    fn test_fix_is_idempotent() {
        let src = "int f(void)\n{\n  int y  = 1;   \n\treturn  y ;\n}\n";
        let once = fix_source(src);
        let twice = fix_source(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_input_is_untouched() {
        let src = "int max(int a, int b)\n{\n\tif (a > b)\n\t\treturn a;\n\treturn b;\n}\n";
        assert_eq!(check_strings(src), Vec::<String>::new());
        assert_eq!(fix_source(src), src);
    }

    #[test]
    fn test_token_positions_nondecreasing() {
        let src = "int f(void)\n{\n\treturn 0;\n}\n";
        let module = Module::from_source("file", src).unwrap();
        let mut last = SrcPos::new(1, 1);
        for id in module.toks.iter() {
            let tok = &module.toks.get(id).tok;
            let bpos = tok.bpos;
            assert!(
                bpos.line > last.line || (bpos.line == last.line && bpos.col >= last.col),
                "token at {} precedes {}",
                bpos,
                last
            );
            last = bpos;
        }
    }
}
