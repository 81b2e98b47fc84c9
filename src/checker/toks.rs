//! Ordered token sequence
//!
//! The checker keeps every lexed token, whitespace included, in a doubly
//! linked sequence.  Nodes live in an arena (`Vec`) and link to their
//! siblings by index, so a [`TokId`] handed out to the AST stays valid across
//! splices: repairs insert or unlink whitespace nodes but never move or
//! reuse existing ones.
//!
//! The sequence is strictly ordered by source position.  Repairs only ever
//! insert or remove whitespace adjacent to an addressed token; the set of
//! non-whitespace tokens is invariant.

use crate::parser::ast::TokId;
use crate::parser::lexer::{TokKind, Token};

/// One checker token: a lexer token plus its sibling links and the
/// annotations the AST walk assigns.
#[derive(Debug)]
pub struct CTok {
    pub tok: Token,
    prev: Option<TokId>,
    next: Option<TokId>,
    /// Expected indentation level (tab count) of this token's line.
    pub indlvl: usize,
    /// Whether this token must be the first non-whitespace token on its
    /// line (a statement head rather than a continuation).
    pub lbegin: bool,
}

/// Arena-backed doubly linked token sequence.
#[derive(Debug, Default)]
pub struct TokSeq {
    toks: Vec<CTok>,
    first: Option<TokId>,
    last: Option<TokId>,
}

impl TokSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token at the end of the sequence.
    pub fn append(&mut self, tok: Token) -> TokId {
        let id = self.toks.len();
        let prev = self.last;
        self.toks.push(CTok {
            tok,
            prev,
            next: None,
            indlvl: 0,
            lbegin: false,
        });
        match prev {
            Some(p) => self.toks[p].next = Some(id),
            None => self.first = Some(id),
        }
        self.last = Some(id);
        id
    }

    pub fn first(&self) -> Option<TokId> {
        self.first
    }

    pub fn next(&self, id: TokId) -> Option<TokId> {
        self.toks[id].next
    }

    pub fn prev(&self, id: TokId) -> Option<TokId> {
        self.toks[id].prev
    }

    pub fn get(&self, id: TokId) -> &CTok {
        &self.toks[id]
    }

    pub fn get_mut(&mut self, id: TokId) -> &mut CTok {
        &mut self.toks[id]
    }

    pub fn kind(&self, id: TokId) -> TokKind {
        self.toks[id].tok.kind
    }

    /// Splice a new token in immediately before `at`.
    pub fn insert_before(&mut self, at: TokId, tok: Token) -> TokId {
        let prev = self.toks[at].prev;
        let id = self.toks.len();
        self.toks.push(CTok {
            tok,
            prev,
            next: Some(at),
            indlvl: 0,
            lbegin: false,
        });
        self.toks[at].prev = Some(id);
        match prev {
            Some(p) => self.toks[p].next = Some(id),
            None => self.first = Some(id),
        }
        id
    }

    /// Splice a new token in immediately after `at`.
    pub fn insert_after(&mut self, at: TokId, tok: Token) -> TokId {
        let next = self.toks[at].next;
        let id = self.toks.len();
        self.toks.push(CTok {
            tok,
            prev: Some(at),
            next,
            indlvl: 0,
            lbegin: false,
        });
        self.toks[at].next = Some(id);
        match next {
            Some(n) => self.toks[n].prev = Some(id),
            None => self.last = Some(id),
        }
        id
    }

    /// Unlink a whitespace token from the sequence.  The node stays in the
    /// arena so outstanding ids remain valid, but it no longer contributes
    /// to the regenerated source.
    pub fn remove(&mut self, id: TokId) {
        debug_assert!(self.toks[id].tok.kind.is_wspace());
        let prev = self.toks[id].prev;
        let next = self.toks[id].next;
        match prev {
            Some(p) => self.toks[p].next = next,
            None => self.first = next,
        }
        match next {
            Some(n) => self.toks[n].prev = prev,
            None => self.last = prev,
        }
        self.toks[id].prev = None;
        self.toks[id].next = None;
    }

    /// Iterate token ids in sequence order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            seq: self,
            cur: self.first,
        }
    }

    /// Concatenation of every linked token's text, in order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for id in self.iter() {
            out.push_str(&self.toks[id].tok.text);
        }
        out
    }
}

pub struct Iter<'a> {
    seq: &'a TokSeq,
    cur: Option<TokId>,
}

impl Iterator for Iter<'_> {
    type Item = TokId;

    fn next(&mut self) -> Option<TokId> {
        let id = self.cur?;
        self.cur = self.seq.toks[id].next;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srcpos::SrcPos;

    fn tok(kind: TokKind, text: &str) -> Token {
        Token {
            kind,
            text: text.to_string(),
            bpos: SrcPos::default(),
            epos: SrcPos::default(),
        }
    }

    #[test]
    fn test_append_and_text() {
        let mut seq = TokSeq::new();
        seq.append(tok(TokKind::Int, "int"));
        seq.append(tok(TokKind::Space, " "));
        seq.append(tok(TokKind::Ident, "x"));
        assert_eq!(seq.text(), "int x");
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut seq = TokSeq::new();
        let a = seq.append(tok(TokKind::Ident, "a"));
        let c = seq.append(tok(TokKind::Ident, "c"));
        seq.insert_after(a, tok(TokKind::Space, " "));
        seq.insert_before(c, tok(TokKind::Space, " "));
        assert_eq!(seq.text(), "a  c");
        let head = seq.insert_before(a, tok(TokKind::Tab, "\t"));
        assert_eq!(seq.first(), Some(head));
        assert_eq!(seq.text(), "\ta  c");
    }

    #[test]
    fn test_remove_keeps_ids_valid() {
        let mut seq = TokSeq::new();
        let a = seq.append(tok(TokKind::Ident, "a"));
        let ws = seq.append(tok(TokKind::Space, " "));
        let b = seq.append(tok(TokKind::Ident, "b"));
        seq.remove(ws);
        assert_eq!(seq.text(), "ab");
        assert_eq!(seq.next(a), Some(b));
        assert_eq!(seq.prev(b), Some(a));
        // The removed node's arena slot is still addressable
        assert_eq!(seq.get(ws).tok.text, " ");
    }

    #[test]
    fn test_iter_order_after_splices() {
        let mut seq = TokSeq::new();
        let a = seq.append(tok(TokKind::Ident, "a"));
        let b = seq.append(tok(TokKind::Ident, "b"));
        let ws = seq.insert_before(b, tok(TokKind::Space, " "));
        let ids: Vec<TokId> = seq.iter().collect();
        assert_eq!(ids, vec![a, ws, b]);
    }
}
