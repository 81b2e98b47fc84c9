//! Declaration parsing implementation
//!
//! This module handles the C declaration grammar:
//!
//! - Global declarations and function definitions: `dspecs dlist (';' | block)`
//! - Declaration specifiers: storage classes, type specifiers, qualifiers
//! - Struct/union and enum specifiers with member definitions
//! - Declarators: identifier, pointer, parenthesized, function, array
//! - Declarator lists with optional initializers
//!
//! # Grammar
//!
//! ```text
//! gdecln      ::= dspecs dlist? ( ';' | block )
//! dspecs      ::= ( sclass | tqual | fspec | tspec )+
//! declarator  ::= ( '*' tqual* )* direct
//! direct      ::= ( ident | '(' declarator ')' ) ( '(' args ')' | '[' size? ']' )*
//! dlist       ::= entry ( ',' entry )*
//! entry       ::= declarator ( '=' assignment-expr )?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a global declaration or function definition.
    pub(crate) fn parse_gdecln(&mut self) -> Result<Gdecln, ParseError> {
        let dspecs = self.parse_dspecs()?;

        let dlist = if self.check(TokKind::SColon) {
            Dlist::default()
        } else {
            self.parse_dlist()?
        };

        if self.check(TokKind::LBrace) {
            let body = self.parse_braced_block()?;
            return Ok(Gdecln {
                dspecs,
                dlist,
                body: Some(body),
                tscolon: None,
            });
        }

        let tscolon = self.expect(TokKind::SColon, "';' after declaration")?;
        self.register_typedefs(&dspecs.specs, &dlist);

        Ok(Gdecln {
            dspecs,
            dlist,
            body: None,
            tscolon: Some(tscolon),
        })
    }

    /// Parse declaration specifiers (any mix, order not enforced).
    pub(crate) fn parse_dspecs(&mut self) -> Result<Dspecs, ParseError> {
        let specs = self.parse_specs(true)?;
        Ok(Dspecs { specs })
    }

    /// Parse a specifier-qualifier list (no storage classes or function
    /// specifiers).
    pub(crate) fn parse_sqlist(&mut self) -> Result<Sqlist, ParseError> {
        let elems = self.parse_specs(false)?;
        Ok(Sqlist { elems })
    }

    fn parse_specs(&mut self, allow_sclass: bool) -> Result<Vec<Dspec>, ParseError> {
        use TokKind::*;

        let mut specs: Vec<Dspec> = Vec::new();
        let mut have_tspec = false;

        loop {
            let kind = self.peek_kind();
            let spec = match kind {
                Typedef | Extern | Static | Auto | Register if allow_sclass => {
                    let sctype = match kind {
                        Typedef => SclassType::Typedef,
                        Extern => SclassType::Extern,
                        Static => SclassType::Static,
                        Auto => SclassType::Auto,
                        _ => SclassType::Register,
                    };
                    Dspec::Sclass(Sclass {
                        sctype,
                        tsclass: self.consume(),
                    })
                }
                Const | Restrict | Volatile => {
                    let qtype = match kind {
                        Const => QualType::Const,
                        Restrict => QualType::Restrict,
                        _ => QualType::Volatile,
                    };
                    Dspec::Tqual(Tqual {
                        qtype,
                        tqual: self.consume(),
                    })
                }
                Inline if allow_sclass => Dspec::Fspec(Fspec {
                    tfspec: self.consume(),
                }),
                Void | Char | Short | Int | Long | Signed | Unsigned | Float | Double => {
                    have_tspec = true;
                    Dspec::Tspec(Tspec::Basic(TsBasic {
                        tbasic: self.consume(),
                    }))
                }
                Struct | Union => {
                    have_tspec = true;
                    Dspec::Tspec(Tspec::Record(self.parse_tsrecord()?))
                }
                Enum => {
                    have_tspec = true;
                    Dspec::Tspec(Tspec::Enum(self.parse_tsenum()?))
                }
                Ident if !have_tspec && self.is_typedef_name(&self.peek().tok.text) => {
                    have_tspec = true;
                    Dspec::Tspec(Tspec::Ident(TsIdent {
                        tident: self.consume(),
                    }))
                }
                _ => break,
            };
            specs.push(spec);
        }

        if specs.is_empty() {
            return Err(self.unexpected(if allow_sclass {
                "declaration specifier"
            } else {
                "type specifier"
            }));
        }

        Ok(specs)
    }

    /// Parse a struct or union specifier, with an optional member
    /// definition: `struct-or-union ident? ( '{' member* '}' )?`.
    fn parse_tsrecord(&mut self) -> Result<TsRecord, ParseError> {
        let rtype = if self.check(TokKind::Struct) {
            RecordType::Struct
        } else {
            RecordType::Union
        };
        let tsu = self.consume();
        let tident = self.accept(TokKind::Ident);

        let tlbrace = self.accept(TokKind::LBrace);
        let mut elems = Vec::new();
        let mut trbrace = None;

        if tlbrace.is_some() {
            while !self.check(TokKind::RBrace) && !self.at_end() {
                let sqlist = self.parse_sqlist()?;
                let dlist = self.parse_dlist()?;
                let tscolon = self.expect(TokKind::SColon, "';' after member declaration")?;
                elems.push(TsRecordElem {
                    sqlist,
                    dlist,
                    tscolon,
                });
            }
            trbrace = Some(self.expect(TokKind::RBrace, "'}' after member declarations")?);
        } else if tident.is_none() {
            return Err(self.unexpected("identifier or '{' after record keyword"));
        }

        Ok(TsRecord {
            rtype,
            tsu,
            tident,
            tlbrace,
            elems,
            trbrace,
        })
    }

    /// Parse an enum specifier: `enum ident? ( '{' enumerator* '}' )?`.
    fn parse_tsenum(&mut self) -> Result<TsEnum, ParseError> {
        let tenum = self.expect(TokKind::Enum, "'enum'")?;
        let tident = self.accept(TokKind::Ident);

        let tlbrace = self.accept(TokKind::LBrace);
        let mut elems = Vec::new();
        let mut trbrace = None;

        if tlbrace.is_some() {
            while !self.check(TokKind::RBrace) && !self.at_end() {
                let (tident, _) = self.expect_ident("enumerator name")?;
                let tequals = self.accept(TokKind::Assign);
                let init = if tequals.is_some() {
                    Some(self.parse_tcond()?)
                } else {
                    None
                };
                let tcomma = self.accept(TokKind::Comma);
                let done = tcomma.is_none();
                elems.push(TsEnumElem {
                    tident,
                    tequals,
                    init,
                    tcomma,
                });
                if done {
                    break;
                }
            }
            trbrace = Some(self.expect(TokKind::RBrace, "'}' after enumerators")?);
        } else if tident.is_none() {
            return Err(self.unexpected("identifier or '{' after 'enum'"));
        }

        Ok(TsEnum {
            tenum,
            tident,
            tlbrace,
            elems,
            trbrace,
        })
    }

    /// Parse a declarator list with optional initializers.
    pub(crate) fn parse_dlist(&mut self) -> Result<Dlist, ParseError> {
        let mut entries = Vec::new();

        let first = self.parse_dlist_entry(None)?;
        entries.push(first);

        while let Some(tcomma) = self.accept(TokKind::Comma) {
            entries.push(self.parse_dlist_entry(Some(tcomma))?);
        }

        Ok(Dlist { entries })
    }

    fn parse_dlist_entry(&mut self, tcomma: Option<TokId>) -> Result<DlistEntry, ParseError> {
        let decl = self.parse_decl()?;
        let tassign = self.accept(TokKind::Assign);
        let init = if tassign.is_some() {
            Some(self.parse_eassign()?)
        } else {
            None
        };

        Ok(DlistEntry {
            tcomma,
            decl,
            tassign,
            init,
        })
    }

    /// Parse a (possibly abstract) declarator.
    pub(crate) fn parse_decl(&mut self) -> Result<Dnode, ParseError> {
        if let Some(tasterisk) = self.accept(TokKind::Asterisk) {
            let mut tquals = Vec::new();
            loop {
                let kind = self.peek_kind();
                let qtype = match kind {
                    TokKind::Const => QualType::Const,
                    TokKind::Restrict => QualType::Restrict,
                    TokKind::Volatile => QualType::Volatile,
                    _ => break,
                };
                tquals.push(Tqual {
                    qtype,
                    tqual: self.consume(),
                });
            }
            let bdecl = self.parse_decl()?;
            return Ok(Dnode::Ptr(Box::new(Dptr {
                tasterisk,
                tquals,
                bdecl,
            })));
        }

        self.parse_direct_decl()
    }

    fn parse_direct_decl(&mut self) -> Result<Dnode, ParseError> {
        let mut decl = if let Some(tlparen) = self.accept(TokKind::LParen) {
            let bdecl = self.parse_decl()?;
            let trparen = self.expect(TokKind::RParen, "')' after declarator")?;
            Dnode::Paren(Box::new(Dparen {
                tlparen,
                bdecl,
                trparen,
            }))
        } else if self.check(TokKind::Ident) {
            let name = self.peek().tok.text.clone();
            Dnode::Ident(Dident {
                tident: self.consume(),
                name,
            })
        } else {
            // Abstract declarator base (unnamed argument, type name)
            Dnode::Noident
        };

        loop {
            if let Some(tlparen) = self.accept(TokKind::LParen) {
                let args = self.parse_dfun_args()?;
                let trparen = self.expect(TokKind::RParen, "')' after arguments")?;
                decl = Dnode::Fun(Box::new(Dfun {
                    bdecl: decl,
                    tlparen,
                    args,
                    trparen,
                }));
            } else if let Some(tlbracket) = self.accept(TokKind::LBracket) {
                let tsize = self
                    .accept(TokKind::Number)
                    .or_else(|| self.accept(TokKind::Ident));
                let trbracket = self.expect(TokKind::RBracket, "']' after array size")?;
                decl = Dnode::Array(Box::new(Darray {
                    bdecl: decl,
                    tlbracket,
                    tsize,
                    trbracket,
                }));
            } else {
                break;
            }
        }

        Ok(decl)
    }

    fn parse_dfun_args(&mut self) -> Result<Vec<DfunArg>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokKind::RParen) {
            return Ok(args);
        }

        loop {
            let dspecs = self.parse_dspecs()?;
            let decl = self.parse_decl()?;
            let tcomma = self.accept(TokKind::Comma);
            let done = tcomma.is_none();
            args.push(DfunArg {
                dspecs,
                decl,
                tcomma,
            });
            if done {
                break;
            }
        }

        Ok(args)
    }

    /// Whether the current token can start a declaration.  Declaration
    /// specifier keywords always do; an identifier only if a typedef with
    /// that name was already seen.
    pub(crate) fn starts_decln(&self) -> bool {
        use TokKind::*;
        match self.peek_kind() {
            Typedef | Extern | Static | Auto | Register | Inline | Const | Restrict
            | Volatile | Void | Char | Short | Int | Long | Signed | Unsigned | Float
            | Double | Struct | Union | Enum => true,
            Ident => self.is_typedef_name(&self.peek().tok.text),
            _ => false,
        }
    }

    /// Whether the current token can start a type name inside `sizeof`.
    pub(crate) fn starts_type_name(&self) -> bool {
        use TokKind::*;
        match self.peek_kind() {
            Const | Restrict | Volatile | Void | Char | Short | Int | Long | Signed
            | Unsigned | Float | Double | Struct | Union | Enum => true,
            Ident => self.is_typedef_name(&self.peek().tok.text),
            _ => false,
        }
    }
}
