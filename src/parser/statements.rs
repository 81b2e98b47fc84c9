//! Statement parsing implementation
//!
//! This module handles parsing of all C statement types:
//!
//! - Jump statements: `break`, `continue`, `goto`, `return`
//! - Control flow: `if`/`else`, `while`, `do`-`while`, `for`, `switch`
//! - Labels: `case`/`default` and goto labels
//! - Local declarations: `int x = 42;`
//! - Expression statements
//!
//! # Grammar
//!
//! ```text
//! statement ::= break | continue | goto | return | if | while | do
//!             | for | switch | clabel | glabel | decln | expr-stmt
//! block     ::= '{' statement* '}' | statement
//! ```
//!
//! A statement is parsed as a declaration when its first token is a
//! declaration-specifier keyword or a known typedef name; a bare identifier
//! starts an expression statement.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a braced statement block.
    pub(crate) fn parse_braced_block(&mut self) -> Result<Block, ParseError> {
        let topen = self.expect(TokKind::LBrace, "'{'")?;

        let mut stmts = Vec::new();
        while !self.check(TokKind::RBrace) && !self.at_end() {
            stmts.push(self.parse_stmt()?);
        }

        let tclose = self.expect(TokKind::RBrace, "'}' after block")?;

        Ok(Block {
            braces: true,
            topen: Some(topen),
            stmts,
            tclose: Some(tclose),
        })
    }

    /// Parse a braced block or a single statement (for `if`/`while`/...
    /// bodies).
    pub(crate) fn parse_stmt_or_block(&mut self) -> Result<Block, ParseError> {
        if self.check(TokKind::LBrace) {
            self.parse_braced_block()
        } else {
            Ok(Block {
                braces: false,
                topen: None,
                stmts: vec![self.parse_stmt()?],
                tclose: None,
            })
        }
    }

    /// Parse a statement.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        use TokKind::*;

        match self.peek_kind() {
            Break => {
                let tbreak = self.consume();
                let tscolon = self.expect(SColon, "';' after 'break'")?;
                Ok(Stmt::Break(SBreak { tbreak, tscolon }))
            }
            Continue => {
                let tcontinue = self.consume();
                let tscolon = self.expect(SColon, "';' after 'continue'")?;
                Ok(Stmt::Continue(SContinue { tcontinue, tscolon }))
            }
            Goto => {
                let tgoto = self.consume();
                let (tident, _) = self.expect_ident("label after 'goto'")?;
                let tscolon = self.expect(SColon, "';' after 'goto'")?;
                Ok(Stmt::Goto(SGoto {
                    tgoto,
                    tident,
                    tscolon,
                }))
            }
            Return => {
                let treturn = self.consume();
                let arg = if self.check(SColon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                let tscolon = self.expect(SColon, "';' after 'return'")?;
                Ok(Stmt::Return(Box::new(SReturn {
                    treturn,
                    arg,
                    tscolon,
                })))
            }
            If => Ok(Stmt::If(Box::new(self.parse_if()?))),
            While => Ok(Stmt::While(Box::new(self.parse_while()?))),
            Do => Ok(Stmt::Do(Box::new(self.parse_do()?))),
            For => Ok(Stmt::For(Box::new(self.parse_for()?))),
            Switch => Ok(Stmt::Switch(Box::new(self.parse_switch()?))),
            Case => {
                let tslabel = self.consume();
                let cexpr = self.parse_tcond()?;
                let tcolon = self.expect(Colon, "':' after case value")?;
                Ok(Stmt::Clabel(Box::new(SClabel {
                    tslabel,
                    cexpr: Some(cexpr),
                    tcolon,
                })))
            }
            Default => {
                let tslabel = self.consume();
                let tcolon = self.expect(Colon, "':' after 'default'")?;
                Ok(Stmt::Clabel(Box::new(SClabel {
                    tslabel,
                    cexpr: None,
                    tcolon,
                })))
            }
            Ident
                if matches!(
                    self.peek_ahead(1).map(|t| t.tok.kind),
                    Some(TokKind::Colon)
                ) =>
            {
                let (tlabel, _) = self.expect_ident("label")?;
                let tcolon = self.expect(Colon, "':' after label")?;
                Ok(Stmt::Glabel(SGlabel { tlabel, tcolon }))
            }
            _ if self.starts_decln() => {
                let dspecs = self.parse_dspecs()?;
                let dlist = self.parse_dlist()?;
                let tscolon = self.expect(SColon, "';' after declaration")?;
                self.register_typedefs(&dspecs.specs, &dlist);
                Ok(Stmt::Decln(Box::new(SDecln {
                    dspecs,
                    dlist,
                    tscolon,
                })))
            }
            _ => {
                let expr = self.parse_expr()?;
                let tscolon = self.expect(SColon, "';' after expression")?;
                Ok(Stmt::Expr(Box::new(SExpr { expr, tscolon })))
            }
        }
    }

    fn parse_if(&mut self) -> Result<SIf, ParseError> {
        let tif = self.expect(TokKind::If, "'if'")?;
        let tlparen = self.expect(TokKind::LParen, "'(' after 'if'")?;
        let cond = self.parse_expr()?;
        let trparen = self.expect(TokKind::RParen, "')' after condition")?;

        let tbranch = self.parse_stmt_or_block()?;

        let telse = self.accept(TokKind::Else);
        let ebranch = if telse.is_some() {
            Some(self.parse_stmt_or_block()?)
        } else {
            None
        };

        Ok(SIf {
            tif,
            tlparen,
            cond,
            trparen,
            tbranch,
            telse,
            ebranch,
        })
    }

    fn parse_while(&mut self) -> Result<SWhile, ParseError> {
        let twhile = self.expect(TokKind::While, "'while'")?;
        let tlparen = self.expect(TokKind::LParen, "'(' after 'while'")?;
        let cond = self.parse_expr()?;
        let trparen = self.expect(TokKind::RParen, "')' after condition")?;
        let body = self.parse_stmt_or_block()?;

        Ok(SWhile {
            twhile,
            tlparen,
            cond,
            trparen,
            body,
        })
    }

    fn parse_do(&mut self) -> Result<SDo, ParseError> {
        let tdo = self.expect(TokKind::Do, "'do'")?;
        let body = self.parse_stmt_or_block()?;
        let twhile = self.expect(TokKind::While, "'while' after 'do' body")?;
        let tlparen = self.expect(TokKind::LParen, "'(' after 'while'")?;
        let cond = self.parse_expr()?;
        let trparen = self.expect(TokKind::RParen, "')' after condition")?;
        let tscolon = self.expect(TokKind::SColon, "';' after 'do'-'while'")?;

        Ok(SDo {
            tdo,
            body,
            twhile,
            tlparen,
            cond,
            trparen,
            tscolon,
        })
    }

    fn parse_for(&mut self) -> Result<SFor, ParseError> {
        let tfor = self.expect(TokKind::For, "'for'")?;
        let tlparen = self.expect(TokKind::LParen, "'(' after 'for'")?;

        let init = if self.check(TokKind::SColon) {
            None
        } else if self.starts_decln() {
            let dspecs = self.parse_dspecs()?;
            let dlist = self.parse_dlist()?;
            Some(ForInit::Decln { dspecs, dlist })
        } else {
            Some(ForInit::Expr(self.parse_expr()?))
        };
        let tscolon1 = self.expect(TokKind::SColon, "';' after 'for' initializer")?;

        let cond = if self.check(TokKind::SColon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let tscolon2 = self.expect(TokKind::SColon, "';' after 'for' condition")?;

        let next = if self.check(TokKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let trparen = self.expect(TokKind::RParen, "')' after 'for' clauses")?;

        let body = self.parse_stmt_or_block()?;

        Ok(SFor {
            tfor,
            tlparen,
            init,
            tscolon1,
            cond,
            tscolon2,
            next,
            trparen,
            body,
        })
    }

    fn parse_switch(&mut self) -> Result<SSwitch, ParseError> {
        let tswitch = self.expect(TokKind::Switch, "'switch'")?;
        let tlparen = self.expect(TokKind::LParen, "'(' after 'switch'")?;
        let sexpr = self.parse_expr()?;
        let trparen = self.expect(TokKind::RParen, "')' after switch expression")?;
        let body = self.parse_braced_block()?;

        Ok(SSwitch {
            tswitch,
            tlparen,
            sexpr,
            trparen,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn parse_body(body: &str) -> Block {
        let src = format!("void f(void)\n{{\n{}}}\n", body);
        let mut parser = Parser::from_source(&src).unwrap();
        let module = parser.parse_module().unwrap();
        module.decls.into_iter().next().unwrap().body.unwrap()
    }

    #[test]
    fn test_parse_if_else_chain() {
        let block = parse_body("\tif (a)\n\t\tx();\n\telse if (b) {\n\t\ty();\n\t} else\n\t\tz();\n");
        match &block.stmts[0] {
            Stmt::If(sif) => {
                assert!(!sif.tbranch.braces);
                let ebranch = sif.ebranch.as_ref().unwrap();
                assert!(!ebranch.braces);
                match &ebranch.stmts[0] {
                    Stmt::If(inner) => {
                        assert!(inner.tbranch.braces);
                        assert!(inner.ebranch.is_some());
                    }
                    other => panic!("expected nested if, got {:?}", other),
                }
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_do_while() {
        let block = parse_body("\tdo {\n\t\twork();\n\t} while (busy);\n");
        assert!(matches!(block.stmts[0], Stmt::Do(_)));
    }

    #[test]
    fn test_parse_for_with_declaration() {
        let block = parse_body("\tfor (int i = 0; i < n; i++)\n\t\tg(i);\n");
        match &block.stmts[0] {
            Stmt::For(sfor) => {
                assert!(matches!(sfor.init, Some(ForInit::Decln { .. })));
                assert!(sfor.cond.is_some());
                assert!(sfor.next.is_some());
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_for() {
        let block = parse_body("\tfor (;;)\n\t\tspin();\n");
        match &block.stmts[0] {
            Stmt::For(sfor) => {
                assert!(sfor.init.is_none());
                assert!(sfor.cond.is_none());
                assert!(sfor.next.is_none());
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_switch_with_labels() {
        let block =
            parse_body("\tswitch (x) {\n\tcase 1:\n\t\tbreak;\n\tdefault:\n\t\tbreak;\n\t}\n");
        match &block.stmts[0] {
            Stmt::Switch(sw) => {
                let kinds: Vec<bool> = sw
                    .body
                    .stmts
                    .iter()
                    .map(|s| matches!(s, Stmt::Clabel(_)))
                    .collect();
                assert_eq!(kinds, vec![true, false, true, false]);
            }
            other => panic!("expected switch, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_goto_and_label() {
        let block = parse_body("\tgoto out;\nout:\n\treturn;\n");
        assert!(matches!(block.stmts[0], Stmt::Goto(_)));
        assert!(matches!(block.stmts[1], Stmt::Glabel(_)));
        assert!(matches!(block.stmts[2], Stmt::Return(_)));
    }

    #[test]
    fn test_parse_local_declaration() {
        let block = parse_body("\tint x = 1, y;\n\tx = y;\n");
        assert!(matches!(block.stmts[0], Stmt::Decln(_)));
        assert!(matches!(block.stmts[1], Stmt::Expr(_)));
    }
}
