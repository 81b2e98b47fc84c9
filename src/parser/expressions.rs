//! Expression parsing implementation
//!
//! This module handles parsing of C expressions using precedence climbing
//! for binary operators and recursive descent for other expression forms.
//!
//! # Precedence
//!
//! From lowest to highest: comma, assignment (right-associative), ternary,
//! logical or/and, bitwise or/xor/and, equality, relational, shift,
//! additive, multiplicative, unary, postfix, primary.
//!
//! # sizeof
//!
//! `sizeof ( X )` parses `X` as a type name when it begins with a
//! type-specifier keyword or a known typedef name (one-token lookahead);
//! otherwise `X` parses as an expression.  This is the parser's only
//! context-sensitive decision.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokKind;
use crate::parser::parse::{ParseError, Parser};

const ASSIGN_OPS: &[TokKind] = &[
    TokKind::Assign,
    TokKind::PlusAssign,
    TokKind::MinusAssign,
    TokKind::TimesAssign,
    TokKind::DivAssign,
    TokKind::ModAssign,
    TokKind::ShlAssign,
    TokKind::ShrAssign,
    TokKind::BAndAssign,
    TokKind::BXorAssign,
    TokKind::BOrAssign,
];

impl Parser {
    /// Parse an expression (comma operator at lowest precedence).
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_eassign()?;

        while let Some(tcomma) = self.accept(TokKind::Comma) {
            let rarg = self.parse_eassign()?;
            larg = Expr::Comma(Box::new(EComma { larg, tcomma, rarg }));
        }

        Ok(larg)
    }

    /// Parse an assignment expression (right-associative).
    pub(crate) fn parse_eassign(&mut self) -> Result<Expr, ParseError> {
        let larg = self.parse_tcond()?;

        if let Some(top) = self.accept_one(ASSIGN_OPS) {
            let rarg = self.parse_eassign()?;
            return Ok(Expr::Binop(Box::new(EBinop { larg, top, rarg })));
        }

        Ok(larg)
    }

    /// Parse a conditional expression: `cond ? targ : farg`.
    pub(crate) fn parse_tcond(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_elor()?;

        if let Some(tqmark) = self.accept(TokKind::QMark) {
            let targ = self.parse_expr()?;
            let tcolon = self.expect(TokKind::Colon, "':' in conditional expression")?;
            let farg = self.parse_tcond()?;
            return Ok(Expr::Tcond(Box::new(ETcond {
                cond,
                tqmark,
                targ,
                tcolon,
                farg,
            })));
        }

        Ok(cond)
    }

    fn parse_elor(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_eland()?;
        while let Some(top) = self.accept(TokKind::LOr) {
            let rarg = self.parse_eland()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_eland(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_ebor()?;
        while let Some(top) = self.accept(TokKind::LAnd) {
            let rarg = self.parse_ebor()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_ebor(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_ebxor()?;
        while let Some(top) = self.accept(TokKind::BOr) {
            let rarg = self.parse_ebxor()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_ebxor(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_eband()?;
        while let Some(top) = self.accept(TokKind::BXor) {
            let rarg = self.parse_eband()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_eband(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_eequality()?;
        while let Some(top) = self.accept(TokKind::Amper) {
            let rarg = self.parse_eequality()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_eequality(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_erelational()?;
        while let Some(top) = self.accept_one(&[TokKind::EqEq, TokKind::NotEq]) {
            let rarg = self.parse_erelational()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_erelational(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_eshift()?;
        while let Some(top) =
            self.accept_one(&[TokKind::Lt, TokKind::Gt, TokKind::LtEq, TokKind::GtEq])
        {
            let rarg = self.parse_eshift()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_eshift(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_eadditive()?;
        while let Some(top) = self.accept_one(&[TokKind::Shl, TokKind::Shr]) {
            let rarg = self.parse_eadditive()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_eadditive(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_emultiplicative()?;
        while let Some(top) = self.accept_one(&[TokKind::Plus, TokKind::Minus]) {
            let rarg = self.parse_emultiplicative()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    fn parse_emultiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut larg = self.parse_eunary()?;
        while let Some(top) =
            self.accept_one(&[TokKind::Asterisk, TokKind::Slash, TokKind::Percent])
        {
            let rarg = self.parse_eunary()?;
            larg = Expr::Binop(Box::new(EBinop { larg, top, rarg }));
        }
        Ok(larg)
    }

    /// Parse a unary (prefix) expression.
    fn parse_eunary(&mut self) -> Result<Expr, ParseError> {
        use TokKind::*;

        match self.peek_kind() {
            Plus | Minus => {
                let tsign = self.consume();
                let bexpr = self.parse_eunary()?;
                Ok(Expr::Usign(Box::new(EUsign { tsign, bexpr })))
            }
            LNot => {
                let tlnot = self.consume();
                let bexpr = self.parse_eunary()?;
                Ok(Expr::Lnot(Box::new(ELnot { tlnot, bexpr })))
            }
            BNot => {
                let tbnot = self.consume();
                let bexpr = self.parse_eunary()?;
                Ok(Expr::Bnot(Box::new(EBnot { tbnot, bexpr })))
            }
            Inc | Dec => {
                let tadj = self.consume();
                let bexpr = self.parse_eunary()?;
                Ok(Expr::Preadj(Box::new(EPreadj { tadj, bexpr })))
            }
            Asterisk => {
                let tasterisk = self.consume();
                let bexpr = self.parse_eunary()?;
                Ok(Expr::Deref(Box::new(EDeref { tasterisk, bexpr })))
            }
            Amper => {
                let tamper = self.consume();
                let bexpr = self.parse_eunary()?;
                Ok(Expr::Addr(Box::new(EAddr { tamper, bexpr })))
            }
            Sizeof => Ok(Expr::Sizeof(Box::new(self.parse_esizeof()?))),
            _ => self.parse_epostfix(),
        }
    }

    /// Parse `sizeof ( type-name | expr )`.  The operand is a type name
    /// only when its first token can start one.
    fn parse_esizeof(&mut self) -> Result<ESizeof, ParseError> {
        let tsizeof = self.expect(TokKind::Sizeof, "'sizeof'")?;
        let tlparen = self.expect(TokKind::LParen, "'(' after 'sizeof'")?;

        let arg = if self.starts_type_name() {
            let sqlist = self.parse_sqlist()?;
            let mut tptrs = Vec::new();
            while let Some(tasterisk) = self.accept(TokKind::Asterisk) {
                tptrs.push(tasterisk);
            }
            SizeofArg::Type(TypeName { sqlist, tptrs })
        } else {
            SizeofArg::Expr(self.parse_expr()?)
        };

        let trparen = self.expect(TokKind::RParen, "')' after 'sizeof' operand")?;

        Ok(ESizeof {
            tsizeof,
            tlparen,
            arg,
            trparen,
        })
    }

    /// Parse a postfix expression: calls, subscripts, member access,
    /// post-increment/decrement.
    fn parse_epostfix(&mut self) -> Result<Expr, ParseError> {
        use TokKind::*;

        let mut expr = self.parse_eprimary()?;

        loop {
            match self.peek_kind() {
                Inc | Dec => {
                    let tadj = self.consume();
                    expr = Expr::Postadj(Box::new(EPostadj { bexpr: expr, tadj }));
                }
                LBracket => {
                    let tlbracket = self.consume();
                    let iexpr = self.parse_expr()?;
                    let trbracket = self.expect(RBracket, "']' after index")?;
                    expr = Expr::Index(Box::new(EIndex {
                        bexpr: expr,
                        tlbracket,
                        iexpr,
                        trbracket,
                    }));
                }
                Period => {
                    let tperiod = self.consume();
                    let (tmember, _) = self.expect_ident("member name after '.'")?;
                    expr = Expr::Member(Box::new(EMember {
                        bexpr: expr,
                        tperiod,
                        tmember,
                    }));
                }
                Arrow => {
                    let tarrow = self.consume();
                    let (tmember, _) = self.expect_ident("member name after '->'")?;
                    expr = Expr::IndMember(Box::new(EIndMember {
                        bexpr: expr,
                        tarrow,
                        tmember,
                    }));
                }
                LParen => {
                    let tlparen = self.consume();
                    let args = self.parse_efuncall_args()?;
                    let trparen = self.expect(RParen, "')' after arguments")?;
                    expr = Expr::Funcall(Box::new(EFuncall {
                        fexpr: expr,
                        tlparen,
                        args,
                        trparen,
                    }));
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_efuncall_args(&mut self) -> Result<Vec<EFuncallArg>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokKind::RParen) {
            return Ok(args);
        }

        let arg = self.parse_eassign()?;
        args.push(EFuncallArg { tcomma: None, arg });

        while let Some(tcomma) = self.accept(TokKind::Comma) {
            let arg = self.parse_eassign()?;
            args.push(EFuncallArg {
                tcomma: Some(tcomma),
                arg,
            });
        }

        Ok(args)
    }

    /// Parse a primary expression: literal, identifier or parenthesized
    /// expression.  Adjacent string literals form one multipart literal.
    fn parse_eprimary(&mut self) -> Result<Expr, ParseError> {
        use TokKind::*;

        match self.peek_kind() {
            Number => Ok(Expr::Int(EInt {
                tlit: self.consume(),
            })),
            CharLit => Ok(Expr::Char(EChar {
                tlit: self.consume(),
            })),
            StrLit => {
                let mut tlits = vec![self.consume()];
                while self.check(StrLit) {
                    tlits.push(self.consume());
                }
                Ok(Expr::String(EString { tlits }))
            }
            Ident => Ok(Expr::Ident(EIdent {
                tident: self.consume(),
            })),
            LParen => {
                let tlparen = self.consume();
                let bexpr = self.parse_expr()?;
                let trparen = self.expect(RParen, "')' after expression")?;
                Ok(Expr::Paren(Box::new(EParen {
                    tlparen,
                    bexpr,
                    trparen,
                })))
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn parse_expr(src: &str) -> Expr {
        let full = format!("{};", src);
        let mut parser = Parser::from_source(&full).unwrap();
        let expr = parser.parse_expr().unwrap();
        parser.expect(TokKind::SColon, "';'").unwrap();
        expr
    }

    fn parse_expr_with_typedefs(src: &str, names: &[&str]) -> Expr {
        let full = format!("{};", src);
        let mut parser = Parser::from_source(&full).unwrap();
        for name in names {
            parser.typedefs.insert((*name).to_string());
        }
        parser.parse_expr().unwrap()
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        match parse_expr("1 + 2 * 3") {
            Expr::Binop(add) => match add.rarg {
                Expr::Binop(_) => {}
                other => panic!("expected nested binop, got {:?}", other),
            },
            other => panic!("expected binop, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_right_associative() {
        // a = b = c parses as a = (b = c)
        match parse_expr("a = b = c") {
            Expr::Binop(outer) => {
                assert!(matches!(outer.larg, Expr::Ident(_)));
                assert!(matches!(outer.rarg, Expr::Binop(_)));
            }
            other => panic!("expected binop, got {:?}", other),
        }
    }

    #[test]
    fn test_ternary() {
        match parse_expr("a ? b : c ? d : e") {
            Expr::Tcond(outer) => {
                // Right-associative: farg is another conditional
                assert!(matches!(outer.farg, Expr::Tcond(_)));
            }
            other => panic!("expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_comma_expression() {
        assert!(matches!(parse_expr("a, b, c"), Expr::Comma(_)));
    }

    #[test]
    fn test_postfix_chain() {
        // p->next.value[0]++ builds postfix nodes inside-out
        match parse_expr("p->next.value[0]++") {
            Expr::Postadj(post) => match post.bexpr {
                Expr::Index(idx) => match idx.bexpr {
                    Expr::Member(mem) => {
                        assert!(matches!(mem.bexpr, Expr::IndMember(_)));
                    }
                    other => panic!("expected member access, got {:?}", other),
                },
                other => panic!("expected index, got {:?}", other),
            },
            other => panic!("expected post-adjust, got {:?}", other),
        }
    }

    #[test]
    fn test_funcall_args() {
        match parse_expr("f(a, b + 1, g(c))") {
            Expr::Funcall(call) => {
                assert_eq!(call.args.len(), 3);
                assert!(call.args[0].tcomma.is_none());
                assert!(call.args[1].tcomma.is_some());
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_operators() {
        assert!(matches!(parse_expr("-x"), Expr::Usign(_)));
        assert!(matches!(parse_expr("!x"), Expr::Lnot(_)));
        assert!(matches!(parse_expr("~x"), Expr::Bnot(_)));
        assert!(matches!(parse_expr("*p"), Expr::Deref(_)));
        assert!(matches!(parse_expr("&v"), Expr::Addr(_)));
        assert!(matches!(parse_expr("++i"), Expr::Preadj(_)));
    }

    #[test]
    fn test_sizeof_type_vs_expr() {
        // sizeof(int) * 2 must parse as a type-name sizeof times two,
        // not as sizeof((int)(*2))
        match parse_expr("sizeof(int) * 2") {
            Expr::Binop(mul) => match mul.larg {
                Expr::Sizeof(sz) => {
                    assert!(matches!(sz.arg, SizeofArg::Type(_)));
                }
                other => panic!("expected sizeof, got {:?}", other),
            },
            other => panic!("expected binop, got {:?}", other),
        }

        // array[0] must be parsed as an expression, not a type name
        match parse_expr("sizeof(array) / sizeof(array[0])") {
            Expr::Binop(div) => {
                for side in [&div.larg, &div.rarg] {
                    match side {
                        Expr::Sizeof(sz) => {
                            assert!(matches!(sz.arg, SizeofArg::Expr(_)));
                        }
                        other => panic!("expected sizeof, got {:?}", other),
                    }
                }
            }
            other => panic!("expected binop, got {:?}", other),
        }
    }

    #[test]
    fn test_sizeof_expression_operand() {
        match parse_expr("sizeof(a * b)") {
            Expr::Sizeof(sz) => assert!(matches!(sz.arg, SizeofArg::Expr(_))),
            other => panic!("expected sizeof, got {:?}", other),
        }
    }

    #[test]
    fn test_sizeof_typedef_name() {
        // With foo_t registered as a typedef, sizeof(foo_t *) is a type name
        match parse_expr_with_typedefs("sizeof(foo_t *)", &["foo_t"]) {
            Expr::Sizeof(sz) => match sz.arg {
                SizeofArg::Type(tn) => assert_eq!(tn.tptrs.len(), 1),
                other => panic!("expected type name, got {:?}", other),
            },
            other => panic!("expected sizeof, got {:?}", other),
        }
    }

    #[test]
    fn test_multipart_string() {
        match parse_expr("\"a\" \"b\" \"c\"") {
            Expr::String(es) => assert_eq!(es.tlits.len(), 3),
            other => panic!("expected string, got {:?}", other),
        }
    }
}
