//! Lexer (tokenizer) for C source code
//!
//! Converts raw source bytes into a flat [`Token`] stream.  Unlike a compiler
//! front end, this lexer is lossless: every byte of input lands in exactly
//! one token's `text`, including whitespace, comments and preprocessor lines,
//! so that concatenating all token texts reproduces the input verbatim.
//!
//! Malformed input (an unterminated literal, a stray byte) produces an
//! [`TokKind::Invalid`] token and lexing continues; the parser treats such a
//! token as a fatal syntax error when it reaches one.

use crate::input::Input;
use crate::srcpos::{format_range, SrcPos};
use rustc_hash::FxHashMap;
use std::fmt;
use std::io;

/// All token kinds produced by the lexer.
///
/// Whitespace kinds are split so the checker can reason about indentation
/// prefixes: a run of spaces, a run of tabs and a line ending are three
/// distinct tokens and distinct kinds never merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    // Whitespace and non-grammar text
    Space,
    Tab,
    Newline,
    Comment,
    DsComment,
    Preproc,
    Invalid,
    Eof,

    // Keywords
    Auto,
    Break,
    Case,
    Char,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extern,
    Float,
    For,
    Goto,
    If,
    Inline,
    Int,
    Long,
    Register,
    Restrict,
    Return,
    Short,
    Signed,
    Sizeof,
    Static,
    Struct,
    Switch,
    Typedef,
    Union,
    Unsigned,
    Void,
    Volatile,
    While,

    // Literals and identifiers
    Ident,
    Number,
    CharLit,
    StrLit,

    // Punctuators
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    SColon,
    Colon,
    QMark,
    Period,
    Ellipsis,
    Arrow,
    Inc,
    Dec,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Amper,
    BOr,
    BXor,
    BNot,
    LNot,
    Shl,
    Shr,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    Assign,
    PlusAssign,
    MinusAssign,
    TimesAssign,
    DivAssign,
    ModAssign,
    ShlAssign,
    ShrAssign,
    BAndAssign,
    BXorAssign,
    BOrAssign,
    LAnd,
    LOr,
    Hash,
    HashHash,
}

impl TokKind {
    /// Whitespace kinds (space, tab, newline).
    pub fn is_wspace(self) -> bool {
        matches!(self, TokKind::Space | TokKind::Tab | TokKind::Newline)
    }

    /// Comment kinds (plain and documentation).
    pub fn is_comment(self) -> bool {
        matches!(self, TokKind::Comment | TokKind::DsComment)
    }

    /// Tokens the grammar never sees: whitespace, comments and
    /// preprocessor lines.
    pub fn is_nongrammar(self) -> bool {
        self.is_wspace() || self.is_comment() || self == TokKind::Preproc
    }

    /// Canonical kind name, used by token dumps.
    pub fn name(self) -> &'static str {
        use TokKind::*;
        match self {
            Space => "space",
            Tab => "tab",
            Newline => "newline",
            Comment => "comment",
            DsComment => "dscomment",
            Preproc => "preproc",
            Invalid => "invalid",
            Eof => "eof",
            Auto => "auto",
            Break => "break",
            Case => "case",
            Char => "char",
            Const => "const",
            Continue => "continue",
            Default => "default",
            Do => "do",
            Double => "double",
            Else => "else",
            Enum => "enum",
            Extern => "extern",
            Float => "float",
            For => "for",
            Goto => "goto",
            If => "if",
            Inline => "inline",
            Int => "int",
            Long => "long",
            Register => "register",
            Restrict => "restrict",
            Return => "return",
            Short => "short",
            Signed => "signed",
            Sizeof => "sizeof",
            Static => "static",
            Struct => "struct",
            Switch => "switch",
            Typedef => "typedef",
            Union => "union",
            Unsigned => "unsigned",
            Void => "void",
            Volatile => "volatile",
            While => "while",
            Ident => "ident",
            Number => "number",
            CharLit => "charlit",
            StrLit => "strlit",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Comma => ",",
            SColon => ";",
            Colon => ":",
            QMark => "?",
            Period => ".",
            Ellipsis => "...",
            Arrow => "->",
            Inc => "++",
            Dec => "--",
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Slash => "/",
            Percent => "%",
            Amper => "&",
            BOr => "|",
            BXor => "^",
            BNot => "~",
            LNot => "!",
            Shl => "<<",
            Shr => ">>",
            Lt => "<",
            Gt => ">",
            LtEq => "<=",
            GtEq => ">=",
            EqEq => "==",
            NotEq => "!=",
            Assign => "=",
            PlusAssign => "+=",
            MinusAssign => "-=",
            TimesAssign => "*=",
            DivAssign => "/=",
            ModAssign => "%=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            BAndAssign => "&=",
            BXorAssign => "^=",
            BOrAssign => "|=",
            LAnd => "&&",
            LOr => "||",
            Hash => "#",
            HashHash => "##",
        }
    }
}

/// One lexer token: kind, exact source text, and the inclusive position
/// range of its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokKind,
    pub text: String,
    pub bpos: SrcPos,
    pub epos: SrcPos,
}

impl Token {
    /// Render the token for `--dump-toks` output.
    pub fn dump(&self, fname: &str) -> String {
        use TokKind::*;
        let range = format_range(fname, self.bpos, self.epos);
        match self.kind {
            Ident => format!("<{}:id:{}>", range, self.text),
            Number => format!("<{}:num:{}>", range, self.text),
            CharLit | StrLit => format!("<{}:{}:{}>", range, self.kind.name(), self.text),
            _ => format!("<{}:{}>", range, self.kind.name()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokKind::*;
        match self.kind {
            Ident => write!(f, "identifier '{}'", self.text),
            Number => write!(f, "number '{}'", self.text),
            CharLit => write!(f, "character literal {}", self.text),
            StrLit => write!(f, "string literal {}", self.text),
            Invalid => write!(f, "invalid token '{}'", self.text),
            Eof => write!(f, "end of file"),
            Space | Tab => write!(f, "whitespace"),
            Newline => write!(f, "end of line"),
            Comment | DsComment => write!(f, "comment"),
            Preproc => write!(f, "preprocessor line"),
            _ => write!(f, "'{}'", self.kind.name()),
        }
    }
}

const READ_CHUNK: usize = 4096;

/// Lossless lexer over a pull-based byte source.
pub struct Lexer<'a> {
    input: &'a mut dyn Input,
    buf: Vec<u8>,
    buf_pos: usize,
    in_eof: bool,
    /// Position of the next unconsumed byte.
    pos: SrcPos,
    /// Whether a non-whitespace token was already emitted on this line.
    /// Decides between a preprocessor line and a stray '#' punctuator.
    line_has_tok: bool,
    keywords: FxHashMap<&'static str, TokKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a mut dyn Input) -> Self {
        let pos = input.position();
        Self {
            input,
            buf: Vec::new(),
            buf_pos: 0,
            in_eof: false,
            pos,
            line_has_tok: false,
            keywords: keyword_table(),
        }
    }

    /// Produce the next token.  After the end of input every call returns
    /// an [`TokKind::Eof`] token.
    pub fn get_tok(&mut self) -> io::Result<Token> {
        use TokKind::*;

        let b = match self.peek(0)? {
            Some(b) => b,
            None => {
                return Ok(Token {
                    kind: Eof,
                    text: String::new(),
                    bpos: self.pos,
                    epos: self.pos,
                });
            }
        };

        let tok = match b {
            b' ' => self.lex_ws_run(b' ', Space)?,
            b'\t' => self.lex_ws_run(b'\t', Tab)?,
            b'\n' => self.make_tok(Newline, 1)?,
            b'\r' => {
                if self.peek(1)? == Some(b'\n') {
                    self.make_tok(Newline, 2)?
                } else {
                    self.make_tok(Invalid, 1)?
                }
            }
            b'/' => self.lex_slash()?,
            b'#' => {
                if !self.line_has_tok {
                    self.lex_preproc()?
                } else if self.peek(1)? == Some(b'#') {
                    self.make_tok(HashHash, 2)?
                } else {
                    self.make_tok(Hash, 1)?
                }
            }
            b'"' => self.lex_quoted(0, b'"', StrLit)?,
            b'\'' => self.lex_quoted(0, b'\'', CharLit)?,
            b'L' if matches!(self.peek(1)?, Some(b'"') | Some(b'\'')) => {
                let quote = self.peek(1)?.unwrap_or(b'"');
                let kind = if quote == b'"' { StrLit } else { CharLit };
                self.lex_quoted(1, quote, kind)?
            }
            b'0'..=b'9' => self.lex_number()?,
            _ if is_idbegin(b) => self.lex_ident()?,
            _ => self.lex_punct(b)?,
        };

        match tok.kind {
            Newline => self.line_has_tok = false,
            Space | Tab => {}
            _ => self.line_has_tok = true,
        }

        Ok(tok)
    }

    fn lex_ws_run(&mut self, b: u8, kind: TokKind) -> io::Result<Token> {
        let mut len = 1;
        while self.peek(len)? == Some(b) {
            len += 1;
        }
        self.make_tok(kind, len)
    }

    /// '/' starts a comment, a compound assignment or plain division.
    fn lex_slash(&mut self) -> io::Result<Token> {
        match self.peek(1)? {
            Some(b'*') => self.lex_block_comment(),
            Some(b'/') => self.lex_line_comment(),
            Some(b'=') => self.make_tok(TokKind::DivAssign, 2),
            _ => self.make_tok(TokKind::Slash, 1),
        }
    }

    /// `/* ... */`, possibly spanning lines, as one token.  A `/**` opener
    /// (but not the empty comment `/**/`) is a documentation comment.
    fn lex_block_comment(&mut self) -> io::Result<Token> {
        let doc = self.peek(2)? == Some(b'*') && self.peek(3)? != Some(b'/');
        let kind = if doc {
            TokKind::DsComment
        } else {
            TokKind::Comment
        };

        let mut i = 2;
        loop {
            match self.peek(i)? {
                None => {
                    // Unterminated comment runs to end of input
                    return self.make_tok(TokKind::Invalid, i);
                }
                Some(b'*') if self.peek(i + 1)? == Some(b'/') => {
                    return self.make_tok(kind, i + 2);
                }
                Some(_) => i += 1,
            }
        }
    }

    /// `//` up to (not including) the line ending.
    fn lex_line_comment(&mut self) -> io::Result<Token> {
        let mut i = 2;
        loop {
            match self.peek(i)? {
                None | Some(b'\n') | Some(b'\r') => {
                    return self.make_tok(TokKind::Comment, i);
                }
                Some(_) => i += 1,
            }
        }
    }

    /// A preprocessor line: '#' as the first non-whitespace byte on a line,
    /// up to but not including the terminating newline.  A backslash
    /// immediately before the newline continues the token onto the next
    /// line.
    fn lex_preproc(&mut self) -> io::Result<Token> {
        let mut i = 1;
        let mut prev = b'#';
        loop {
            match self.peek(i)? {
                None => return self.make_tok(TokKind::Preproc, i),
                Some(b'\n') => {
                    if prev != b'\\' {
                        return self.make_tok(TokKind::Preproc, i);
                    }
                    prev = b'\n';
                    i += 1;
                }
                Some(b'\r') if self.peek(i + 1)? == Some(b'\n') => {
                    if prev != b'\\' {
                        return self.make_tok(TokKind::Preproc, i);
                    }
                    prev = b'\n';
                    i += 2;
                }
                Some(b) => {
                    prev = b;
                    i += 1;
                }
            }
        }
    }

    /// A string or character literal, with `\`-escapes kept raw.  `start`
    /// is the index of the opening quote (1 for `L`-prefixed literals).
    /// A literal left open at the end of its line lexes as invalid.
    fn lex_quoted(&mut self, start: usize, quote: u8, kind: TokKind) -> io::Result<Token> {
        let mut i = start + 1;
        loop {
            match self.peek(i)? {
                None | Some(b'\n') | Some(b'\r') => {
                    return self.make_tok(TokKind::Invalid, i);
                }
                Some(b'\\') => {
                    // Escape: the next byte is taken verbatim
                    if self.peek(i + 1)?.is_none() {
                        return self.make_tok(TokKind::Invalid, i + 1);
                    }
                    i += 2;
                }
                Some(b) if b == quote => {
                    return self.make_tok(kind, i + 1);
                }
                Some(_) => i += 1,
            }
        }
    }

    /// Integer constant: decimal, octal or hex, with optional u/l/ll
    /// suffixes.  The text is kept raw; no value is computed.
    fn lex_number(&mut self) -> io::Result<Token> {
        let mut i = 1;
        let hex =
            self.peek(0)? == Some(b'0') && matches!(self.peek(1)?, Some(b'x') | Some(b'X'));
        if hex {
            i = 2;
            while matches!(self.peek(i)?, Some(b) if b.is_ascii_hexdigit()) {
                i += 1;
            }
        } else {
            while matches!(self.peek(i)?, Some(b) if b.is_ascii_digit()) {
                i += 1;
            }
        }
        while matches!(
            self.peek(i)?,
            Some(b'u') | Some(b'U') | Some(b'l') | Some(b'L')
        ) {
            i += 1;
        }
        self.make_tok(TokKind::Number, i)
    }

    fn lex_ident(&mut self) -> io::Result<Token> {
        let mut len = 1;
        while matches!(self.peek(len)?, Some(b) if is_idcnt(b)) {
            len += 1;
        }
        let mut tok = self.make_tok(TokKind::Ident, len)?;
        if let Some(&kw) = self.keywords.get(tok.text.as_str()) {
            tok.kind = kw;
        }
        Ok(tok)
    }

    /// Maximal-munch punctuator matching.  Anything unrecognized becomes a
    /// one-character (one UTF-8 sequence) invalid token.
    fn lex_punct(&mut self, b: u8) -> io::Result<Token> {
        use TokKind::*;
        let b1 = self.peek(1)?;
        let b2 = self.peek(2)?;

        let (kind, len) = match b {
            b'(' => (LParen, 1),
            b')' => (RParen, 1),
            b'{' => (LBrace, 1),
            b'}' => (RBrace, 1),
            b'[' => (LBracket, 1),
            b']' => (RBracket, 1),
            b',' => (Comma, 1),
            b';' => (SColon, 1),
            b':' => (Colon, 1),
            b'?' => (QMark, 1),
            b'~' => (BNot, 1),
            b'.' => {
                if b1 == Some(b'.') && b2 == Some(b'.') {
                    (Ellipsis, 3)
                } else {
                    (Period, 1)
                }
            }
            b'+' => match b1 {
                Some(b'+') => (Inc, 2),
                Some(b'=') => (PlusAssign, 2),
                _ => (Plus, 1),
            },
            b'-' => match b1 {
                Some(b'-') => (Dec, 2),
                Some(b'=') => (MinusAssign, 2),
                Some(b'>') => (Arrow, 2),
                _ => (Minus, 1),
            },
            b'*' => match b1 {
                Some(b'=') => (TimesAssign, 2),
                _ => (Asterisk, 1),
            },
            b'%' => match b1 {
                Some(b'=') => (ModAssign, 2),
                _ => (Percent, 1),
            },
            b'=' => match b1 {
                Some(b'=') => (EqEq, 2),
                _ => (Assign, 1),
            },
            b'!' => match b1 {
                Some(b'=') => (NotEq, 2),
                _ => (LNot, 1),
            },
            b'<' => match (b1, b2) {
                (Some(b'<'), Some(b'=')) => (ShlAssign, 3),
                (Some(b'<'), _) => (Shl, 2),
                (Some(b'='), _) => (LtEq, 2),
                _ => (Lt, 1),
            },
            b'>' => match (b1, b2) {
                (Some(b'>'), Some(b'=')) => (ShrAssign, 3),
                (Some(b'>'), _) => (Shr, 2),
                (Some(b'='), _) => (GtEq, 2),
                _ => (Gt, 1),
            },
            b'&' => match b1 {
                Some(b'&') => (LAnd, 2),
                Some(b'=') => (BAndAssign, 2),
                _ => (Amper, 1),
            },
            b'|' => match b1 {
                Some(b'|') => (LOr, 2),
                Some(b'=') => (BOrAssign, 2),
                _ => (BOr, 1),
            },
            b'^' => match b1 {
                Some(b'=') => (BXorAssign, 2),
                _ => (BXor, 1),
            },
            _ => (Invalid, utf8_len(b)),
        };

        self.make_tok(kind, len)
    }

    /// Consume `nbytes` bytes into a new token of the given kind.
    fn make_tok(&mut self, kind: TokKind, nbytes: usize) -> io::Result<Token> {
        self.ensure(nbytes)?;
        let bpos = self.pos;
        let mut epos = self.pos;
        let mut text = Vec::with_capacity(nbytes);
        for _ in 0..nbytes {
            epos = self.pos;
            text.push(self.take());
        }
        Ok(Token {
            kind,
            text: String::from_utf8_lossy(&text).into_owned(),
            bpos,
            epos,
        })
    }

    /// Consume one buffered byte, advancing the source position.
    fn take(&mut self) -> u8 {
        let b = self.buf[self.buf_pos];
        self.buf_pos += 1;
        self.pos.fwd(b);
        b
    }

    /// Look `n` bytes ahead without consuming.
    fn peek(&mut self, n: usize) -> io::Result<Option<u8>> {
        self.ensure(n + 1)?;
        Ok(self.buf.get(self.buf_pos + n).copied())
    }

    /// Fill the buffer until at least `n` unconsumed bytes are available
    /// or the input is exhausted.
    fn ensure(&mut self, n: usize) -> io::Result<()> {
        while !self.in_eof && self.buf.len() - self.buf_pos < n {
            if self.buf_pos >= READ_CHUNK {
                self.buf.drain(..self.buf_pos);
                self.buf_pos = 0;
            }
            let mut chunk = [0u8; READ_CHUNK];
            let nread = self.input.read(&mut chunk)?;
            if nread == 0 {
                self.in_eof = true;
                break;
            }
            self.buf.extend_from_slice(&chunk[..nread]);
        }
        Ok(())
    }
}

fn is_idbegin(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_idcnt(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Width of the UTF-8 sequence introduced by `b`, so invalid tokens never
/// split a multi-byte character.
fn utf8_len(b: u8) -> usize {
    match b {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

fn keyword_table() -> FxHashMap<&'static str, TokKind> {
    use TokKind::*;
    let mut kw = FxHashMap::default();
    kw.insert("auto", Auto);
    kw.insert("break", Break);
    kw.insert("case", Case);
    kw.insert("char", Char);
    kw.insert("const", Const);
    kw.insert("continue", Continue);
    kw.insert("default", Default);
    kw.insert("do", Do);
    kw.insert("double", Double);
    kw.insert("else", Else);
    kw.insert("enum", Enum);
    kw.insert("extern", Extern);
    kw.insert("float", Float);
    kw.insert("for", For);
    kw.insert("goto", Goto);
    kw.insert("if", If);
    kw.insert("inline", Inline);
    kw.insert("int", Int);
    kw.insert("long", Long);
    kw.insert("register", Register);
    kw.insert("restrict", Restrict);
    kw.insert("return", Return);
    kw.insert("short", Short);
    kw.insert("signed", Signed);
    kw.insert("sizeof", Sizeof);
    kw.insert("static", Static);
    kw.insert("struct", Struct);
    kw.insert("switch", Switch);
    kw.insert("typedef", Typedef);
    kw.insert("union", Union);
    kw.insert("unsigned", Unsigned);
    kw.insert("void", Void);
    kw.insert("volatile", Volatile);
    kw.insert("while", While);
    kw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StringInput;

    fn lex_all(src: &str) -> Vec<Token> {
        let mut input = StringInput::new(src);
        let mut lexer = Lexer::new(&mut input);
        let mut toks = Vec::new();
        loop {
            let tok = lexer.get_tok().unwrap();
            let eof = tok.kind == TokKind::Eof;
            toks.push(tok);
            if eof {
                break;
            }
        }
        toks
    }

    fn roundtrip(src: &str) {
        let text: String = lex_all(src).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(text, src);
    }

    #[test]
    fn test_simple_tokens() {
        let toks = lex_all("int main(void)");
        assert_eq!(toks[0].kind, TokKind::Int);
        assert_eq!(toks[1].kind, TokKind::Space);
        assert_eq!(toks[2].kind, TokKind::Ident);
        assert_eq!(toks[2].text, "main");
        assert_eq!(toks[3].kind, TokKind::LParen);
        assert_eq!(toks[4].kind, TokKind::Void);
        assert_eq!(toks[5].kind, TokKind::RParen);
        assert_eq!(toks[6].kind, TokKind::Eof);
    }

    #[test]
    fn test_positions() {
        let toks = lex_all("if (x)\n\ty;");
        assert_eq!(toks[0].bpos, SrcPos::new(1, 1));
        assert_eq!(toks[0].epos, SrcPos::new(1, 2));
        // newline token
        assert_eq!(toks[5].kind, TokKind::Newline);
        assert_eq!(toks[5].bpos, SrcPos::new(1, 7));
        // tab on line two
        assert_eq!(toks[6].kind, TokKind::Tab);
        assert_eq!(toks[6].bpos, SrcPos::new(2, 1));
        assert_eq!(toks[7].text, "y");
        assert_eq!(toks[7].bpos, SrcPos::new(2, 2));
    }

    #[test]
    fn test_whitespace_runs() {
        let toks = lex_all("a  \t\tb");
        assert_eq!(toks[1].kind, TokKind::Space);
        assert_eq!(toks[1].text, "  ");
        assert_eq!(toks[2].kind, TokKind::Tab);
        assert_eq!(toks[2].text, "\t\t");
        assert_eq!(toks[3].text, "b");
    }

    #[test]
    fn test_operators_maximal_munch() {
        let toks = lex_all("<<= >>= ... -> ++ -- == != <= >= && || <<");
        let kinds: Vec<TokKind> = toks
            .iter()
            .filter(|t| !t.kind.is_wspace() && t.kind != TokKind::Eof)
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokKind::ShlAssign,
                TokKind::ShrAssign,
                TokKind::Ellipsis,
                TokKind::Arrow,
                TokKind::Inc,
                TokKind::Dec,
                TokKind::EqEq,
                TokKind::NotEq,
                TokKind::LtEq,
                TokKind::GtEq,
                TokKind::LAnd,
                TokKind::LOr,
                TokKind::Shl,
            ]
        );
    }

    #[test]
    fn test_comments_kept() {
        let toks = lex_all("x /* a\nb */ y // tail\nz");
        assert_eq!(toks[2].kind, TokKind::Comment);
        assert_eq!(toks[2].text, "/* a\nb */");
        let line = toks.iter().find(|t| t.text.starts_with("//")).unwrap();
        assert_eq!(line.kind, TokKind::Comment);
        assert_eq!(line.text, "// tail");
    }

    #[test]
    fn test_doc_comment() {
        let toks = lex_all("/** doc */ /* plain */ /**/");
        assert_eq!(toks[0].kind, TokKind::DsComment);
        assert_eq!(toks[2].kind, TokKind::Comment);
        // The empty comment is not a doc comment
        assert_eq!(toks[4].kind, TokKind::Comment);
        assert_eq!(toks[4].text, "/**/");
    }

    #[test]
    fn test_preproc_line() {
        let toks = lex_all("#include <stdio.h>\nint x;");
        assert_eq!(toks[0].kind, TokKind::Preproc);
        assert_eq!(toks[0].text, "#include <stdio.h>");
        assert_eq!(toks[1].kind, TokKind::Newline);
        assert_eq!(toks[2].kind, TokKind::Int);
    }

    #[test]
    fn test_preproc_continuation() {
        let toks = lex_all("#define FOO \\\n\t1\nint x;");
        assert_eq!(toks[0].kind, TokKind::Preproc);
        assert_eq!(toks[0].text, "#define FOO \\\n\t1");
        assert_eq!(toks[1].kind, TokKind::Newline);
    }

    #[test]
    fn test_preproc_only_at_line_start() {
        let toks = lex_all("x # y");
        assert_eq!(toks[2].kind, TokKind::Hash);
    }

    #[test]
    fn test_string_and_char_literals() {
        let toks = lex_all(r#"char *s = "a\"b"; char c = '\n';"#);
        let s = toks.iter().find(|t| t.kind == TokKind::StrLit).unwrap();
        assert_eq!(s.text, r#""a\"b""#);
        let c = toks.iter().find(|t| t.kind == TokKind::CharLit).unwrap();
        assert_eq!(c.text, r"'\n'");
    }

    #[test]
    fn test_wide_literals() {
        let toks = lex_all("L'x' L\"y\" Lx");
        assert_eq!(toks[0].kind, TokKind::CharLit);
        assert_eq!(toks[0].text, "L'x'");
        assert_eq!(toks[2].kind, TokKind::StrLit);
        assert_eq!(toks[2].text, "L\"y\"");
        assert_eq!(toks[4].kind, TokKind::Ident);
        assert_eq!(toks[4].text, "Lx");
    }

    #[test]
    fn test_unterminated_string_is_invalid() {
        let toks = lex_all("\"abc\nx");
        assert_eq!(toks[0].kind, TokKind::Invalid);
        assert_eq!(toks[0].text, "\"abc");
        assert_eq!(toks[1].kind, TokKind::Newline);
    }

    #[test]
    fn test_number_suffixes() {
        let toks = lex_all("0x1f 077 42ul 1LL");
        let nums: Vec<&str> = toks
            .iter()
            .filter(|t| t.kind == TokKind::Number)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(nums, vec!["0x1f", "077", "42ul", "1LL"]);
    }

    #[test]
    fn test_keywords_vs_idents() {
        let toks = lex_all("interned if ifx");
        assert_eq!(toks[0].kind, TokKind::Ident);
        assert_eq!(toks[2].kind, TokKind::If);
        assert_eq!(toks[4].kind, TokKind::Ident);
    }

    #[test]
    fn test_crlf_newline() {
        let toks = lex_all("a\r\nb");
        assert_eq!(toks[1].kind, TokKind::Newline);
        assert_eq!(toks[1].text, "\r\n");
        assert_eq!(toks[2].bpos, SrcPos::new(2, 1));
    }

    #[test]
    fn test_roundtrip() {
        roundtrip("int main(void)\n{\n\treturn 0;\n}\n");
        roundtrip("#define X 1\n/* c */\t// d\nchar *s = \"\\n\"; \n");
        roundtrip("a+++b; x <<= 2; y = z ? 1 : 2;\n");
        roundtrip("");
        roundtrip("  \t \n\n\t");
    }

    #[test]
    fn test_invalid_byte() {
        let toks = lex_all("x @ y");
        assert_eq!(toks[2].kind, TokKind::Invalid);
        assert_eq!(toks[2].text, "@");
    }
}
