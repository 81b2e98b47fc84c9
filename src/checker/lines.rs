//! Physical-line pass
//!
//! After the AST walk has annotated every grammatical token with its
//! expected indentation level and line-begin flag, a linear scan over the
//! token sequence enforces per-line rules:
//!
//! - the indentation prefix is tabs, then spaces, then the first token;
//!   anything else is mixing tabs and spaces
//! - line-begin tokens take `indlvl` tabs and no spaces
//! - continuation lines take `indlvl` tabs plus exactly four spaces
//! - no trailing whitespace before the line ending
//! - lines must not extend past column 80 (diagnosed, never repaired)
//!
//! Blank lines and lines led by a comment are exempt from indentation
//! enforcement.  Preprocessor lines always begin a line, at level zero.

use crate::checker::Module;
use crate::parser::ast::TokId;
use crate::parser::lexer::{TokKind, Token};
use crate::srcpos::SrcPos;

const LINE_LIMIT: usize = 80;
const CONT_INDENT: usize = 4;

impl Module {
    /// Scan the token sequence line by line.
    pub(crate) fn check_lines(&mut self) {
        let mut line_start = self.toks.first();
        while let Some(start) = line_start {
            line_start = self.check_line(start);
        }
    }

    /// Check one physical line beginning at `start`.  Returns the first
    /// token of the next line.
    fn check_line(&mut self, start: TokId) -> Option<TokId> {
        // Measure the indentation prefix: tab bytes, then space bytes,
        // then anything further (mixing)
        let mut tabs = 0usize;
        let mut spaces = 0usize;
        let mut extra = 0usize;
        let mut prefix = Vec::new();
        let mut cur = Some(start);
        while let Some(id) = cur {
            let len = self.toks.get(id).tok.text.len();
            match self.toks.kind(id) {
                TokKind::Tab => {
                    if spaces == 0 && extra == 0 {
                        tabs += len;
                    } else {
                        extra += len;
                    }
                }
                TokKind::Space => {
                    if extra == 0 {
                        spaces += len;
                    } else {
                        extra += len;
                    }
                }
                _ => break,
            }
            prefix.push(id);
            cur = self.toks.next(id);
        }

        let tok = cur?;
        let kind = self.toks.kind(tok);

        // Blank line: no indentation or trailing-whitespace enforcement
        if kind == TokKind::Newline {
            return self.toks.next(tok);
        }
        if kind == TokKind::Eof {
            return None;
        }

        if kind == TokKind::Preproc {
            self.toks.get_mut(tok).lbegin = true;
        }

        if !kind.is_comment() && kind != TokKind::Invalid {
            self.check_line_indent(tok, &prefix, tabs, spaces, extra);
        }

        self.check_line_tail(tok)
    }

    /// Enforce the indentation rules for the line led by `tok`.
    fn check_line_indent(
        &mut self,
        tok: TokId,
        prefix: &[TokId],
        tabs: usize,
        spaces: usize,
        extra: usize,
    ) {
        let (lbegin, indlvl) = {
            let ctok = self.toks.get(tok);
            (ctok.lbegin, ctok.indlvl)
        };
        let pos = self.toks.get(tok).tok.bpos;

        let mut wrong = false;
        if extra > 0 {
            wrong = true;
            if !self.fix {
                self.report(pos, pos, "Mixing tabs and spaces for indentation");
            }
        } else {
            if tabs != indlvl {
                wrong = true;
                if !self.fix {
                    self.report(
                        pos,
                        pos,
                        &format!(
                            "Wrong indentation: found {} tabs, should be {} tabs",
                            tabs, indlvl
                        ),
                    );
                }
            }
            if lbegin && spaces != 0 {
                wrong = true;
                if !self.fix {
                    self.report(
                        pos,
                        pos,
                        &format!(
                            "Non-continuation line should not have any spaces \
                             for indentation (found {})",
                            spaces
                        ),
                    );
                }
            }
            if !lbegin && spaces != CONT_INDENT {
                wrong = true;
                if !self.fix {
                    self.report(
                        pos,
                        pos,
                        &format!(
                            "Continuation line should be indented by {} spaces (found {})",
                            CONT_INDENT, spaces
                        ),
                    );
                }
            }
        }

        if wrong && self.fix {
            for &ws in prefix {
                self.toks.remove(ws);
            }
            if indlvl > 0 {
                self.toks.insert_before(
                    tok,
                    Token {
                        kind: TokKind::Tab,
                        text: "\t".repeat(indlvl),
                        bpos: pos,
                        epos: pos,
                    },
                );
            }
            if !lbegin {
                self.toks.insert_before(
                    tok,
                    Token {
                        kind: TokKind::Space,
                        text: " ".repeat(CONT_INDENT),
                        bpos: pos,
                        epos: pos,
                    },
                );
            }
        }
    }

    /// Walk to the end of the line, handling trailing whitespace and the
    /// line-length limit.  Returns the first token of the next line.
    fn check_line_tail(&mut self, tok: TokId) -> Option<TokId> {
        let mut cur = Some(tok);
        let mut boundary = None;
        while let Some(id) = cur {
            match self.toks.kind(id) {
                TokKind::Newline | TokKind::Eof => {
                    boundary = Some(id);
                    break;
                }
                _ => cur = self.toks.next(id),
            }
        }
        let boundary = boundary?;

        // Trailing whitespace: non-whitespace followed by spaces or tabs
        // before the line ending
        let run = self.ws_run_before(boundary);
        if !run.is_empty() {
            if self.fix {
                for ws in run {
                    self.toks.remove(ws);
                }
            } else {
                let epos = self.toks.get(run[run.len() - 1]).tok.epos;
                self.report(epos, epos, "Whitespace at end of line");
            }
        }

        // Line length: the last byte before the line ending must not sit
        // past the limit.  Diagnosed only; there is no automatic repair.
        if !self.fix {
            if let Some(last) = self.toks.prev(boundary) {
                let epos = self.toks.get(last).tok.epos;
                if epos.col > LINE_LIMIT {
                    let pos = SrcPos::new(epos.line, LINE_LIMIT + 1);
                    self.report(
                        pos,
                        pos,
                        &format!(
                            "Line too long ({} characters above {}-character limit)",
                            epos.col - LINE_LIMIT,
                            LINE_LIMIT
                        ),
                    );
                }
            }
        }

        if self.toks.kind(boundary) == TokKind::Newline {
            self.toks.next(boundary)
        } else {
            None
        }
    }
}
