//! Spacing predicates and repair primitives
//!
//! The AST walk classifies every grammatical token with one of the
//! predicates below.  Each predicate assigns the token its expected
//! indentation level; the requirement checks additionally diagnose a
//! violation in check mode or repair the surrounding whitespace in fix
//! mode.
//!
//! Repairs use three primitives only: insert a whitespace token before or
//! after an addressed token, or remove an adjacent whitespace token.  The
//! non-whitespace tokens of the stream are invariant under repair.

use crate::checker::Module;
use crate::parser::ast::TokId;
use crate::parser::lexer::{TokKind, Token};
use crate::srcpos::SrcPos;

/// Indentation frame of the AST walk.  Entering a braced block nests one
/// level deeper; case and goto labels sit one level outside their body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    pub indlvl: usize,
}

impl Scope {
    pub fn new() -> Self {
        Self { indlvl: 0 }
    }

    pub fn nested(self) -> Self {
        Self {
            indlvl: self.indlvl + 1,
        }
    }

    pub fn dedented(self) -> Self {
        Self {
            indlvl: self.indlvl.saturating_sub(1),
        }
    }
}

/// Build a synthetic whitespace token.  Inserted tokens reuse the anchor's
/// position; positions are only meaningful for tokens that came from the
/// source.
fn ws_tok(kind: TokKind, text: String, pos: SrcPos) -> Token {
    Token {
        kind,
        text,
        bpos: pos,
        epos: pos,
    }
}

impl Module {
    /// No spacing constraint; only assign the indentation level.
    pub(crate) fn tok_any(&mut self, id: TokId, scope: Scope) {
        self.toks.get_mut(id).indlvl = scope.indlvl;
    }

    /// The token must be the first non-whitespace token on its line.
    ///
    /// Marks the token `lbegin` so the indentation pass treats its line as
    /// a statement line rather than a continuation.  Repair: delete the
    /// whitespace run separating it from the previous non-whitespace token
    /// on the same line, then break the line before it and indent.
    pub(crate) fn tok_lbegin(&mut self, id: TokId, scope: Scope, msg: &str) {
        {
            let ctok = self.toks.get_mut(id);
            ctok.indlvl = scope.indlvl;
            ctok.lbegin = true;
        }

        // Find out whether a non-whitespace token precedes on this line
        let mut run = Vec::new();
        let mut cur = self.toks.prev(id);
        let mut joined = false;
        while let Some(p) = cur {
            match self.toks.kind(p) {
                TokKind::Newline => break,
                TokKind::Space | TokKind::Tab => {
                    run.push(p);
                    cur = self.toks.prev(p);
                }
                _ => {
                    joined = true;
                    break;
                }
            }
        }
        if cur.is_none() || !joined {
            return;
        }

        if !self.fix {
            let pos = self.toks.get(id).tok.bpos;
            self.report(pos, pos, msg);
            return;
        }

        for ws in run {
            self.toks.remove(ws);
        }
        let pos = self.toks.get(id).tok.bpos;
        self.toks
            .insert_before(id, ws_tok(TokKind::Newline, "\n".to_string(), pos));
        if scope.indlvl > 0 {
            self.toks.insert_before(
                id,
                ws_tok(TokKind::Tab, "\t".repeat(scope.indlvl), pos),
            );
        }
    }

    /// No whitespace may precede the token.  Repair: remove the adjacent
    /// whitespace run.
    pub(crate) fn tok_nows_before(&mut self, id: TokId, scope: Scope, msg: &str) {
        self.tok_any(id, scope);

        let run = self.ws_run_before(id);
        if run.is_empty() {
            return;
        }

        if !self.fix {
            let bpos = self.toks.get(run[0]).tok.bpos;
            let epos = self.toks.get(run[run.len() - 1]).tok.epos;
            self.report(bpos, epos, msg);
            return;
        }

        for ws in run {
            self.toks.remove(ws);
        }
    }

    /// No whitespace may follow the token.  Repair: remove the adjacent
    /// whitespace run.
    pub(crate) fn tok_nows_after(&mut self, id: TokId, scope: Scope, msg: &str) {
        self.tok_any(id, scope);

        let run = self.ws_run_after(id);
        if run.is_empty() {
            return;
        }

        if !self.fix {
            let bpos = self.toks.get(run[0]).tok.bpos;
            let epos = self.toks.get(run[run.len() - 1]).tok.epos;
            self.report(bpos, epos, msg);
            return;
        }

        for ws in run {
            self.toks.remove(ws);
        }
    }

    /// Either nothing or a line break may follow the token; spaces and tabs
    /// before the break are violations.  Repair: remove the space/tab
    /// tokens between this token and the next newline or non-whitespace.
    pub(crate) fn tok_nsbrk_after(&mut self, id: TokId, scope: Scope, msg: &str) {
        self.tok_any(id, scope);

        let mut bad = Vec::new();
        let mut cur = self.toks.next(id);
        while let Some(n) = cur {
            match self.toks.kind(n) {
                TokKind::Space | TokKind::Tab => {
                    bad.push(n);
                    cur = self.toks.next(n);
                }
                _ => break,
            }
        }
        if bad.is_empty() {
            return;
        }

        if !self.fix {
            let bpos = self.toks.get(bad[0]).tok.bpos;
            let epos = self.toks.get(bad[bad.len() - 1]).tok.epos;
            self.report(bpos, epos, msg);
            return;
        }

        for ws in bad {
            self.toks.remove(ws);
        }
    }

    /// A single space or a line break must precede the token.  Repair: if
    /// no whitespace is present, insert a single space.
    pub(crate) fn tok_brkspace_before(&mut self, id: TokId, scope: Scope, msg: &str) {
        self.tok_any(id, scope);

        if !self.ws_run_before(id).is_empty() {
            return;
        }

        if !self.fix {
            let pos = self.toks.get(id).tok.bpos;
            self.report(pos, pos, msg);
            return;
        }

        let pos = self.toks.get(id).tok.bpos;
        self.toks
            .insert_before(id, ws_tok(TokKind::Space, " ".to_string(), pos));
    }

    /// A single space or a line break must follow the token.  Repair: if
    /// no whitespace is present, insert a single space.
    pub(crate) fn tok_brkspace_after(&mut self, id: TokId, scope: Scope, msg: &str) {
        self.tok_any(id, scope);

        if !self.ws_run_after(id).is_empty() {
            return;
        }

        if !self.fix {
            let pos = self.toks.get(id).tok.bpos;
            self.report(pos, pos, msg);
            return;
        }

        let pos = self.toks.get(id).tok.epos;
        self.toks
            .insert_after(id, ws_tok(TokKind::Space, " ".to_string(), pos));
    }

    /// Exactly one space must precede the token, which must not be first on
    /// its line.  Repair: remove the adjacent whitespace and insert one
    /// space.
    pub(crate) fn tok_nbspace_before(&mut self, id: TokId, scope: Scope, msg: &str) {
        self.tok_any(id, scope);

        let run = self.ws_run_before(id);
        let ok = run.len() == 1
            && self.toks.kind(run[0]) == TokKind::Space
            && self.toks.get(run[0]).tok.text == " ";
        if ok {
            return;
        }

        if !self.fix {
            let pos = self.toks.get(id).tok.bpos;
            self.report(pos, pos, msg);
            return;
        }

        for ws in run {
            self.toks.remove(ws);
        }
        let pos = self.toks.get(id).tok.bpos;
        self.toks
            .insert_before(id, ws_tok(TokKind::Space, " ".to_string(), pos));
    }

    // ===== Optional-slot conveniences =====

    pub(crate) fn tok_opt_any(&mut self, id: Option<TokId>, scope: Scope) {
        if let Some(id) = id {
            self.tok_any(id, scope);
        }
    }

    pub(crate) fn tok_opt_nows_before(&mut self, id: Option<TokId>, scope: Scope, msg: &str) {
        if let Some(id) = id {
            self.tok_nows_before(id, scope, msg);
        }
    }

    // ===== Whitespace run helpers =====

    /// Whitespace tokens immediately preceding `id`, in stream order.
    /// Includes newlines.
    pub(crate) fn ws_run_before(&self, id: TokId) -> Vec<TokId> {
        let mut run = Vec::new();
        let mut cur = self.toks.prev(id);
        while let Some(p) = cur {
            if self.toks.kind(p).is_wspace() {
                run.push(p);
                cur = self.toks.prev(p);
            } else {
                break;
            }
        }
        run.reverse();
        run
    }

    /// Whitespace tokens immediately following `id`, in stream order.
    pub(crate) fn ws_run_after(&self, id: TokId) -> Vec<TokId> {
        let mut run = Vec::new();
        let mut cur = self.toks.next(id);
        while let Some(n) = cur {
            if self.toks.kind(n).is_wspace() {
                run.push(n);
                cur = self.toks.next(n);
            } else {
                break;
            }
        }
        run
    }
}
