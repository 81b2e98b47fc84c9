//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure, including error types, helper methods, and the main parse
//! entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following
//! organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Declaration specifiers, declarators, records, enums
//! - `statements`: Statements (if, while, for, switch, ...)
//! - `expressions`: Expressions with precedence climbing
//!
//! Parser methods are split across multiple files using `impl Parser`
//! blocks, allowing each module to extend the Parser with related
//! functionality while maintaining access to the shared parser state.
//!
//! # Token input
//!
//! The parser consumes a pre-filtered token stream: whitespace, comments and
//! preprocessor lines are hidden from the grammar, but every consumed token
//! carries its [`TokId`] back-reference, which the grammar stores into the
//! matching slot of the AST node it builds.

use crate::parser::ast::{Dlist, Dspec, Module, Sclass, SclassType, TokId};
use crate::parser::lexer::{Lexer, TokKind, Token};
use crate::srcpos::SrcPos;
use rustc_hash::FxHashSet;
use std::fmt;

/// One grammar-visible token plus its back-reference into the full stream.
#[derive(Debug, Clone)]
pub struct ParserTok {
    pub tok: Token,
    pub id: TokId,
}

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub pos: SrcPos,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.pos.line, self.pos.col, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for the C declaration grammar.
pub struct Parser {
    pub(crate) toks: Vec<ParserTok>,
    pub(crate) pos: usize,
    /// Names introduced by `typedef` declarations parsed so far.  Consulted
    /// when deciding whether an identifier can start a type name.
    pub(crate) typedefs: FxHashSet<String>,
}

impl Parser {
    /// Create a parser over a grammar-visible token stream.  The stream must
    /// be terminated by an `eof` token.
    pub fn new(toks: Vec<ParserTok>) -> Self {
        debug_assert!(matches!(
            toks.last().map(|t| t.tok.kind),
            Some(TokKind::Eof)
        ));
        Self {
            toks,
            pos: 0,
            typedefs: FxHashSet::default(),
        }
    }

    /// Convenience constructor for tests and dumps: lex `source` and hide
    /// the non-grammar tokens.  Token ids index the full lexed stream.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let mut input = crate::input::StringInput::new(source);
        let mut lexer = Lexer::new(&mut input);
        let mut toks = Vec::new();
        let mut id: TokId = 0;
        loop {
            let tok = lexer.get_tok().map_err(|e| ParseError {
                message: format!("read error: {}", e),
                pos: SrcPos::default(),
            })?;
            let kind = tok.kind;
            if !kind.is_nongrammar() {
                toks.push(ParserTok { tok, id });
            }
            id += 1;
            if kind == TokKind::Eof {
                break;
            }
        }
        Ok(Self::new(toks))
    }

    /// Parse the entire module (top-level declarations).
    pub fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut module = Module::default();

        while !self.at_end() {
            let decl = self.parse_gdecln()?;
            module.decls.push(decl);
        }

        Ok(module)
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &ParserTok {
        &self.toks[self.pos]
    }

    pub(crate) fn peek_kind(&self) -> TokKind {
        self.toks[self.pos].tok.kind
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&ParserTok> {
        self.toks.get(self.pos + n)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.peek_kind() == TokKind::Eof
    }

    pub(crate) fn check(&self, kind: TokKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token unconditionally and return its id.  Only
    /// valid after the caller checked the kind; never consumes `eof`.
    pub(crate) fn consume(&mut self) -> TokId {
        let id = self.toks[self.pos].id;
        if !self.at_end() {
            self.pos += 1;
        }
        id
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn accept(&mut self, kind: TokKind) -> Option<TokId> {
        if self.peek_kind() == kind && kind != TokKind::Eof {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Consume the current token if its kind is one of `kinds`.
    pub(crate) fn accept_one(&mut self, kinds: &[TokKind]) -> Option<TokId> {
        if kinds.contains(&self.peek_kind()) {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Consume a token of the given kind or fail with "Expected `what`".
    pub(crate) fn expect(&mut self, kind: TokKind, what: &str) -> Result<TokId, ParseError> {
        if self.check(kind) {
            Ok(self.consume())
        } else {
            Err(self.unexpected(what))
        }
    }

    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<(TokId, String), ParseError> {
        if self.check(TokKind::Ident) {
            let name = self.peek().tok.text.clone();
            Ok((self.consume(), name))
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Build an error reporting the current token's position and the
    /// expected alternative.  An invalid token (lex error) is reported as
    /// such rather than as a mismatch.
    pub(crate) fn unexpected(&self, what: &str) -> ParseError {
        let tok = &self.peek().tok;
        let message = if tok.kind == TokKind::Invalid {
            format!("Invalid token '{}'", tok.text)
        } else {
            format!("Expected {}, found {}", what, tok)
        };
        ParseError {
            message,
            pos: tok.bpos,
        }
    }

    // ===== Typedef-name tracking =====

    pub(crate) fn is_typedef_name(&self, name: &str) -> bool {
        self.typedefs.contains(name)
    }

    /// Record the names a `typedef` declaration introduces.
    pub(crate) fn register_typedefs(&mut self, specs: &[Dspec], dlist: &Dlist) {
        let is_typedef = specs.iter().any(|s| {
            matches!(
                s,
                Dspec::Sclass(Sclass {
                    sctype: SclassType::Typedef,
                    ..
                })
            )
        });
        if !is_typedef {
            return;
        }

        for entry in &dlist.entries {
            if let Some(dident) = entry.decl.ident() {
                self.typedefs.insert(dident.name.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::*;

    #[test]
    fn test_parse_simple_function() {
        let source = "int main(void)\n{\n\treturn 0;\n}\n";
        let mut parser = Parser::from_source(source).unwrap();
        let module = parser.parse_module().unwrap();

        assert_eq!(module.decls.len(), 1);
        let gdecln = &module.decls[0];
        assert!(gdecln.body.is_some());
        assert!(gdecln.tscolon.is_none());
        let dident = gdecln.dlist.entries[0].decl.ident().unwrap();
        assert_eq!(dident.name, "main");
    }

    #[test]
    fn test_parse_global_variable() {
        let source = "static int counter = 0;\n";
        let mut parser = Parser::from_source(source).unwrap();
        let module = parser.parse_module().unwrap();

        let gdecln = &module.decls[0];
        assert!(gdecln.body.is_none());
        assert!(gdecln.tscolon.is_some());
        assert_eq!(gdecln.dspecs.specs.len(), 2);
        assert!(gdecln.dlist.entries[0].init.is_some());
    }

    #[test]
    fn test_parse_error_position() {
        let source = "int f(void)\n{\n\treturn 0\n}\n";
        let mut parser = Parser::from_source(source).unwrap();
        let err = parser.parse_module().unwrap_err();
        // The '}' on line 4 is where ';' was expected
        assert_eq!(err.pos.line, 4);
        assert!(err.message.contains("Expected"));
    }

    #[test]
    fn test_invalid_token_is_fatal() {
        let source = "int x = @;\n";
        let mut parser = Parser::from_source(source).unwrap();
        let err = parser.parse_module().unwrap_err();
        assert!(err.message.contains("Invalid token"));
    }

    #[test]
    fn test_typedef_registration() {
        let source = "typedef struct foo {\n\tint x;\n} foo_t;\n";
        let mut parser = Parser::from_source(source).unwrap();
        parser.parse_module().unwrap();
        assert!(parser.is_typedef_name("foo_t"));
        assert!(!parser.is_typedef_name("foo"));
    }
}
