//! Expression checks
//!
//! AST walk over expressions.  Binary operators get breathing room (a
//! space or a line break on both sides); unary and postfix operators
//! cuddle their operand; commas cuddle the left argument and are followed
//! by a space or break.

use crate::checker::rules::Scope;
use crate::checker::Module;
use crate::parser::ast::*;

/// First token of an expression, for line-begin checks on expression
/// statements.
pub(crate) fn expr_first_tok(expr: &Expr) -> TokId {
    match expr {
        Expr::Int(eint) => eint.tlit,
        Expr::Char(echar) => echar.tlit,
        Expr::String(estring) => estring.tlits[0],
        Expr::Ident(eident) => eident.tident,
        Expr::Paren(eparen) => eparen.tlparen,
        Expr::Binop(ebinop) => expr_first_tok(&ebinop.larg),
        Expr::Tcond(etcond) => expr_first_tok(&etcond.cond),
        Expr::Comma(ecomma) => expr_first_tok(&ecomma.larg),
        Expr::Funcall(efuncall) => expr_first_tok(&efuncall.fexpr),
        Expr::Index(eindex) => expr_first_tok(&eindex.bexpr),
        Expr::Deref(ederef) => ederef.tasterisk,
        Expr::Addr(eaddr) => eaddr.tamper,
        Expr::Sizeof(esizeof) => esizeof.tsizeof,
        Expr::Member(emember) => expr_first_tok(&emember.bexpr),
        Expr::IndMember(eindmember) => expr_first_tok(&eindmember.bexpr),
        Expr::Usign(eusign) => eusign.tsign,
        Expr::Lnot(elnot) => elnot.tlnot,
        Expr::Bnot(ebnot) => ebnot.tbnot,
        Expr::Preadj(epreadj) => epreadj.tadj,
        Expr::Postadj(epostadj) => expr_first_tok(&epostadj.bexpr),
    }
}

impl Module {
    pub(crate) fn check_expr(&mut self, expr: &Expr, scope: Scope) {
        match expr {
            Expr::Int(eint) => self.tok_any(eint.tlit, scope),
            Expr::Char(echar) => self.tok_any(echar.tlit, scope),
            Expr::String(estring) => {
                for &tlit in &estring.tlits {
                    self.tok_any(tlit, scope);
                }
            }
            Expr::Ident(eident) => self.tok_any(eident.tident, scope),
            Expr::Paren(eparen) => {
                self.tok_nsbrk_after(
                    eparen.tlparen,
                    scope,
                    "Unexpected whitespace after '('.",
                );
                self.check_expr(&eparen.bexpr, scope);
                self.tok_nows_before(
                    eparen.trparen,
                    scope,
                    "Unexpected whitespace before ')'.",
                );
            }
            Expr::Binop(ebinop) => {
                self.check_expr(&ebinop.larg, scope);
                self.tok_brkspace_before(
                    ebinop.top,
                    scope,
                    "Expected space before binary operator.",
                );
                self.tok_brkspace_after(
                    ebinop.top,
                    scope,
                    "Expected space after binary operator.",
                );
                self.check_expr(&ebinop.rarg, scope);
            }
            Expr::Tcond(etcond) => {
                self.check_expr(&etcond.cond, scope);
                self.tok_brkspace_before(etcond.tqmark, scope, "Expected space before '?'.");
                self.tok_brkspace_after(etcond.tqmark, scope, "Expected space after '?'.");
                self.check_expr(&etcond.targ, scope);
                self.tok_brkspace_before(etcond.tcolon, scope, "Expected space before ':'.");
                self.tok_brkspace_after(etcond.tcolon, scope, "Expected space after ':'.");
                self.check_expr(&etcond.farg, scope);
            }
            Expr::Comma(ecomma) => {
                self.check_expr(&ecomma.larg, scope);
                self.tok_nows_before(ecomma.tcomma, scope, "Unexpected whitespace before ','.");
                self.tok_brkspace_after(ecomma.tcomma, scope, "Expected space after ','.");
                self.check_expr(&ecomma.rarg, scope);
            }
            Expr::Funcall(efuncall) => {
                self.check_expr(&efuncall.fexpr, scope);
                self.tok_nows_before(
                    efuncall.tlparen,
                    scope,
                    "Unexpected whitespace before '('.",
                );
                self.tok_nsbrk_after(
                    efuncall.tlparen,
                    scope,
                    "Unexpected whitespace after '('.",
                );
                for arg in &efuncall.args {
                    if let Some(tcomma) = arg.tcomma {
                        self.tok_nows_before(
                            tcomma,
                            scope,
                            "Unexpected whitespace before ','.",
                        );
                        self.tok_brkspace_after(tcomma, scope, "Expected space after ','.");
                    }
                    self.check_expr(&arg.arg, scope);
                }
                self.tok_nows_before(
                    efuncall.trparen,
                    scope,
                    "Unexpected whitespace before ')'.",
                );
            }
            Expr::Index(eindex) => {
                self.check_expr(&eindex.bexpr, scope);
                self.tok_nows_before(
                    eindex.tlbracket,
                    scope,
                    "Unexpected whitespace before '['.",
                );
                self.tok_nsbrk_after(
                    eindex.tlbracket,
                    scope,
                    "Unexpected whitespace after '['.",
                );
                self.check_expr(&eindex.iexpr, scope);
                self.tok_nows_before(
                    eindex.trbracket,
                    scope,
                    "Unexpected whitespace before ']'.",
                );
            }
            Expr::Deref(ederef) => {
                self.tok_nows_after(
                    ederef.tasterisk,
                    scope,
                    "Unexpected whitespace after unary operator.",
                );
                self.check_expr(&ederef.bexpr, scope);
            }
            Expr::Addr(eaddr) => {
                self.tok_nows_after(
                    eaddr.tamper,
                    scope,
                    "Unexpected whitespace after unary operator.",
                );
                self.check_expr(&eaddr.bexpr, scope);
            }
            Expr::Sizeof(esizeof) => {
                self.tok_any(esizeof.tsizeof, scope);
                self.tok_nows_before(
                    esizeof.tlparen,
                    scope,
                    "Unexpected whitespace before '('.",
                );
                self.tok_nsbrk_after(
                    esizeof.tlparen,
                    scope,
                    "Unexpected whitespace after '('.",
                );
                match &esizeof.arg {
                    SizeofArg::Type(tname) => {
                        self.check_sqlist(&tname.sqlist, scope);
                        for &tasterisk in &tname.tptrs {
                            self.tok_any(tasterisk, scope);
                        }
                    }
                    SizeofArg::Expr(expr) => self.check_expr(expr, scope),
                }
                self.tok_nows_before(
                    esizeof.trparen,
                    scope,
                    "Unexpected whitespace before ')'.",
                );
            }
            Expr::Member(emember) => {
                self.check_expr(&emember.bexpr, scope);
                self.tok_nows_before(
                    emember.tperiod,
                    scope,
                    "Unexpected whitespace before '.'.",
                );
                self.tok_nows_after(
                    emember.tperiod,
                    scope,
                    "Unexpected whitespace after '.'.",
                );
                self.tok_any(emember.tmember, scope);
            }
            Expr::IndMember(eindmember) => {
                self.check_expr(&eindmember.bexpr, scope);
                self.tok_nows_before(
                    eindmember.tarrow,
                    scope,
                    "Unexpected whitespace before '->'.",
                );
                self.tok_nows_after(
                    eindmember.tarrow,
                    scope,
                    "Unexpected whitespace after '->'.",
                );
                self.tok_any(eindmember.tmember, scope);
            }
            Expr::Usign(eusign) => {
                self.tok_nows_after(
                    eusign.tsign,
                    scope,
                    "Unexpected whitespace after unary operator.",
                );
                self.check_expr(&eusign.bexpr, scope);
            }
            Expr::Lnot(elnot) => {
                self.tok_nows_after(
                    elnot.tlnot,
                    scope,
                    "Unexpected whitespace after unary operator.",
                );
                self.check_expr(&elnot.bexpr, scope);
            }
            Expr::Bnot(ebnot) => {
                self.tok_nows_after(
                    ebnot.tbnot,
                    scope,
                    "Unexpected whitespace after unary operator.",
                );
                self.check_expr(&ebnot.bexpr, scope);
            }
            Expr::Preadj(epreadj) => {
                self.tok_nows_after(
                    epreadj.tadj,
                    scope,
                    "Unexpected whitespace after unary operator.",
                );
                self.check_expr(&epreadj.bexpr, scope);
            }
            Expr::Postadj(epostadj) => {
                self.check_expr(&epostadj.bexpr, scope);
                self.tok_nows_before(
                    epostadj.tadj,
                    scope,
                    "Unexpected whitespace before unary operator.",
                );
            }
        }
    }
}
