//! Statement checks
//!
//! AST walk over statements.  Every statement head must begin its own line
//! at the current indentation.  Braced statement bodies keep the opening
//! brace on the statement's line (single space before it) and put the
//! closing brace on its own line; unbraced bodies indent their single
//! statement one level.  Case and goto labels sit one level outside the
//! body they annotate; switch bodies indent two levels so case labels land
//! one level inside the switch.

use crate::checker::decls::dspecs_first_tok;
use crate::checker::exprs::expr_first_tok;
use crate::checker::rules::Scope;
use crate::checker::Module;
use crate::parser::ast::*;

/// How an `if` statement is introduced: as a statement head on its own
/// line, or chained after `else` on the same line.
enum IfHead {
    Line,
    AfterElse,
}

impl Module {
    /// Run checks on the statements of a block.  `scope` is the scope of
    /// the statements themselves (the caller already nested it).
    pub(crate) fn check_block_stmts(&mut self, block: &Block, scope: Scope) {
        for stmt in &block.stmts {
            self.check_stmt(stmt, scope);
        }
    }

    /// A statement body: braced or a single indented statement.
    fn check_stmt_block(&mut self, block: &Block, scope: Scope) {
        if block.braces {
            if let Some(topen) = block.topen {
                self.tok_nbspace_before(
                    topen,
                    scope,
                    "Expected single space before block opening brace.",
                );
            }
            self.check_block_stmts(block, scope.nested());
            if let Some(tclose) = block.tclose {
                self.tok_lbegin(tclose, scope, "'}' must begin on a new line.");
            }
        } else {
            self.check_block_stmts(block, scope.nested());
        }
    }

    pub(crate) fn check_stmt(&mut self, stmt: &Stmt, scope: Scope) {
        match stmt {
            Stmt::Break(sbreak) => {
                self.tok_lbegin(sbreak.tbreak, scope, "Statement must start on a new line.");
                self.tok_nows_before(
                    sbreak.tscolon,
                    scope,
                    "Unexpected whitespace before ';'.",
                );
            }
            Stmt::Continue(scontinue) => {
                self.tok_lbegin(
                    scontinue.tcontinue,
                    scope,
                    "Statement must start on a new line.",
                );
                self.tok_nows_before(
                    scontinue.tscolon,
                    scope,
                    "Unexpected whitespace before ';'.",
                );
            }
            Stmt::Goto(sgoto) => {
                self.tok_lbegin(sgoto.tgoto, scope, "Statement must start on a new line.");
                self.tok_any(sgoto.tident, scope);
                self.tok_nows_before(sgoto.tscolon, scope, "Unexpected whitespace before ';'.");
            }
            Stmt::Return(sreturn) => {
                self.tok_lbegin(sreturn.treturn, scope, "Statement must start on a new line.");
                if let Some(arg) = &sreturn.arg {
                    self.check_expr(arg, scope);
                }
                self.tok_nows_before(
                    sreturn.tscolon,
                    scope,
                    "Unexpected whitespace before ';'.",
                );
            }
            Stmt::If(sif) => self.check_if(sif, scope, IfHead::Line),
            Stmt::While(swhile) => self.check_while(swhile, scope),
            Stmt::Do(sdo) => self.check_do(sdo, scope),
            Stmt::For(sfor) => self.check_for(sfor, scope),
            Stmt::Switch(sswitch) => self.check_switch(sswitch, scope),
            Stmt::Clabel(sclabel) => {
                self.tok_lbegin(
                    sclabel.tslabel,
                    scope.dedented(),
                    "Label must start on a new line.",
                );
                if let Some(cexpr) = &sclabel.cexpr {
                    self.check_expr(cexpr, scope);
                }
                self.tok_nows_before(sclabel.tcolon, scope, "Unexpected whitespace before ':'.");
            }
            Stmt::Glabel(sglabel) => {
                self.tok_lbegin(
                    sglabel.tlabel,
                    scope.dedented(),
                    "Label must start on a new line.",
                );
                self.tok_nows_before(sglabel.tcolon, scope, "Unexpected whitespace before ':'.");
            }
            Stmt::Expr(sexpr) => {
                self.tok_lbegin(
                    expr_first_tok(&sexpr.expr),
                    scope,
                    "Statement must start on a new line.",
                );
                self.check_expr(&sexpr.expr, scope);
                self.tok_nows_before(sexpr.tscolon, scope, "Unexpected whitespace before ';'.");
            }
            Stmt::Decln(sdecln) => {
                if let Some(first) = dspecs_first_tok(&sdecln.dspecs) {
                    self.tok_lbegin(first, scope, "Declaration must start on a new line.");
                }
                self.check_dspecs(&sdecln.dspecs, scope);
                self.check_dlist(&sdecln.dlist, scope);
                self.tok_nows_before(
                    sdecln.tscolon,
                    scope,
                    "Unexpected whitespace before ';'.",
                );
            }
        }
    }

    fn check_if(&mut self, sif: &SIf, scope: Scope, head: IfHead) {
        match head {
            IfHead::Line => {
                self.tok_lbegin(sif.tif, scope, "Statement must start on a new line.");
            }
            IfHead::AfterElse => {
                self.tok_nbspace_before(sif.tif, scope, "Expected single space before 'if'.");
            }
        }
        self.check_cond_parens(sif.tlparen, &sif.cond, sif.trparen, scope);
        self.check_stmt_block(&sif.tbranch, scope);

        if let Some(telse) = sif.telse {
            // With a braced then-branch, else cuddles the closing brace;
            // after an unbraced branch it must begin its own line.
            if sif.tbranch.braces {
                self.tok_nbspace_before(telse, scope, "Expected single space before 'else'.");
            } else {
                self.tok_lbegin(telse, scope, "'else' must begin on a new line.");
            }
        }

        if let Some(ebranch) = &sif.ebranch {
            // An else-if chain continues on the else's line at this level
            if !ebranch.braces && ebranch.stmts.len() == 1 {
                if let Stmt::If(inner) = &ebranch.stmts[0] {
                    self.check_if(inner, scope, IfHead::AfterElse);
                    return;
                }
            }
            self.check_stmt_block(ebranch, scope);
        }
    }

    fn check_while(&mut self, swhile: &SWhile, scope: Scope) {
        self.tok_lbegin(swhile.twhile, scope, "Statement must start on a new line.");
        self.check_cond_parens(swhile.tlparen, &swhile.cond, swhile.trparen, scope);
        self.check_stmt_block(&swhile.body, scope);
    }

    fn check_do(&mut self, sdo: &SDo, scope: Scope) {
        self.tok_lbegin(sdo.tdo, scope, "Statement must start on a new line.");
        self.check_stmt_block(&sdo.body, scope);

        if sdo.body.braces {
            self.tok_nbspace_before(sdo.twhile, scope, "Expected single space before 'while'.");
        } else {
            self.tok_lbegin(sdo.twhile, scope, "'while' must begin on a new line.");
        }
        self.check_cond_parens(sdo.tlparen, &sdo.cond, sdo.trparen, scope);
        self.tok_nows_before(sdo.tscolon, scope, "Unexpected whitespace before ';'.");
    }

    fn check_for(&mut self, sfor: &SFor, scope: Scope) {
        self.tok_lbegin(sfor.tfor, scope, "Statement must start on a new line.");
        self.tok_nbspace_before(sfor.tlparen, scope, "Expected single space before '('.");
        self.tok_nsbrk_after(sfor.tlparen, scope, "Unexpected whitespace after '('.");

        match &sfor.init {
            Some(ForInit::Expr(expr)) => self.check_expr(expr, scope),
            Some(ForInit::Decln { dspecs, dlist }) => {
                self.check_dspecs(dspecs, scope);
                self.check_dlist(dlist, scope);
            }
            None => {}
        }
        self.tok_nows_before(sfor.tscolon1, scope, "Unexpected whitespace before ';'.");
        if let Some(cond) = &sfor.cond {
            self.tok_brkspace_after(sfor.tscolon1, scope, "Expected space after ';'.");
            self.check_expr(cond, scope);
        }
        self.tok_nows_before(sfor.tscolon2, scope, "Unexpected whitespace before ';'.");
        if let Some(next) = &sfor.next {
            self.tok_brkspace_after(sfor.tscolon2, scope, "Expected space after ';'.");
            self.check_expr(next, scope);
        }
        self.tok_nows_before(sfor.trparen, scope, "Unexpected whitespace before ')'.");

        self.check_stmt_block(&sfor.body, scope);
    }

    /// Statements in a switch body sit two levels past the switch, so case
    /// labels (dedented one) sit one level inside it.
    fn check_switch(&mut self, sswitch: &SSwitch, scope: Scope) {
        self.tok_lbegin(sswitch.tswitch, scope, "Statement must start on a new line.");
        self.check_cond_parens(sswitch.tlparen, &sswitch.sexpr, sswitch.trparen, scope);

        let body = &sswitch.body;
        if let Some(topen) = body.topen {
            self.tok_nbspace_before(
                topen,
                scope,
                "Expected single space before block opening brace.",
            );
        }
        self.check_block_stmts(body, scope.nested().nested());
        if let Some(tclose) = body.tclose {
            self.tok_lbegin(tclose, scope, "'}' must begin on a new line.");
        }
    }

    /// `keyword (cond)` spacing shared by if/while/do/switch.
    fn check_cond_parens(&mut self, tlparen: TokId, cond: &Expr, trparen: TokId, scope: Scope) {
        self.tok_nbspace_before(tlparen, scope, "Expected single space before '('.");
        self.tok_nsbrk_after(tlparen, scope, "Unexpected whitespace after '('.");
        self.check_expr(cond, scope);
        self.tok_nows_before(trparen, scope, "Unexpected whitespace before ')'.");
    }
}
