//! Declaration checks
//!
//! AST walk over global and local declarations: declaration specifiers,
//! record and enum definitions, declarators and declarator lists.  Member
//! declarations of a record or enum definition live in a nested scope so
//! each member begins its own line one level in, with the closing brace
//! back at the outer level.

use crate::checker::rules::Scope;
use crate::checker::Module;
use crate::parser::ast::*;

/// First token of a declaration specifier.
pub(crate) fn dspec_first_tok(spec: &Dspec) -> TokId {
    match spec {
        Dspec::Sclass(sclass) => sclass.tsclass,
        Dspec::Tqual(tqual) => tqual.tqual,
        Dspec::Fspec(fspec) => fspec.tfspec,
        Dspec::Tspec(Tspec::Basic(ts)) => ts.tbasic,
        Dspec::Tspec(Tspec::Ident(ts)) => ts.tident,
        Dspec::Tspec(Tspec::Record(ts)) => ts.tsu,
        Dspec::Tspec(Tspec::Enum(ts)) => ts.tenum,
    }
}

/// First token of a declaration-specifier list, if any.
pub(crate) fn dspecs_first_tok(dspecs: &Dspecs) -> Option<TokId> {
    dspecs.specs.first().map(dspec_first_tok)
}

impl Module {
    /// Run checks on a global declaration or function definition.
    pub(crate) fn check_gdecln(&mut self, gdecln: &Gdecln, scope: Scope) {
        if let Some(first) = dspecs_first_tok(&gdecln.dspecs) {
            self.tok_lbegin(first, scope, "Declaration must start on a new line.");
        }
        self.check_dspecs(&gdecln.dspecs, scope);
        self.check_dlist(&gdecln.dlist, scope);

        if let Some(body) = &gdecln.body {
            self.check_fun_body(body, scope);
        }
        self.tok_opt_nows_before(gdecln.tscolon, scope, "Unexpected whitespace before ';'.");
    }

    /// A function definition's braces each begin their own line at the
    /// function's indentation; the body is one level deeper.
    fn check_fun_body(&mut self, body: &Block, scope: Scope) {
        if let Some(topen) = body.topen {
            self.tok_lbegin(topen, scope, "'{' must begin on a new line.");
        }
        self.check_block_stmts(body, scope.nested());
        if let Some(tclose) = body.tclose {
            self.tok_lbegin(tclose, scope, "'}' must begin on a new line.");
        }
    }

    pub(crate) fn check_dspecs(&mut self, dspecs: &Dspecs, scope: Scope) {
        for spec in &dspecs.specs {
            self.check_dspec(spec, scope);
        }
    }

    pub(crate) fn check_sqlist(&mut self, sqlist: &Sqlist, scope: Scope) {
        for spec in &sqlist.elems {
            self.check_dspec(spec, scope);
        }
    }

    fn check_dspec(&mut self, spec: &Dspec, scope: Scope) {
        match spec {
            Dspec::Sclass(sclass) => self.tok_any(sclass.tsclass, scope),
            Dspec::Tqual(tqual) => self.tok_any(tqual.tqual, scope),
            Dspec::Fspec(fspec) => self.tok_any(fspec.tfspec, scope),
            Dspec::Tspec(Tspec::Basic(ts)) => self.tok_any(ts.tbasic, scope),
            Dspec::Tspec(Tspec::Ident(ts)) => self.tok_any(ts.tident, scope),
            Dspec::Tspec(Tspec::Record(ts)) => self.check_tsrecord(ts, scope),
            Dspec::Tspec(Tspec::Enum(ts)) => self.check_tsenum(ts, scope),
        }
    }

    /// Struct/union specifier.  When a member list is present, members are
    /// indented one level past the record keyword.
    fn check_tsrecord(&mut self, tsrecord: &TsRecord, scope: Scope) {
        self.tok_any(tsrecord.tsu, scope);
        self.tok_opt_any(tsrecord.tident, scope);

        if let Some(tlbrace) = tsrecord.tlbrace {
            self.tok_nbspace_before(tlbrace, scope, "Expected single space before '{'.");

            let mscope = scope.nested();
            for elem in &tsrecord.elems {
                if let Some(first) = elem.sqlist.elems.first().map(dspec_first_tok) {
                    self.tok_lbegin(
                        first,
                        mscope,
                        "Member declaration must start on a new line.",
                    );
                }
                self.check_sqlist(&elem.sqlist, mscope);
                self.check_dlist(&elem.dlist, mscope);
                self.tok_nows_before(elem.tscolon, mscope, "Unexpected whitespace before ';'.");
            }
        }
        if let Some(trbrace) = tsrecord.trbrace {
            self.tok_lbegin(trbrace, scope, "'}' must begin on a new line.");
        }
    }

    /// Enum specifier.  Enumerators each begin their own line one level in.
    fn check_tsenum(&mut self, tsenum: &TsEnum, scope: Scope) {
        self.tok_any(tsenum.tenum, scope);
        self.tok_opt_any(tsenum.tident, scope);

        if let Some(tlbrace) = tsenum.tlbrace {
            self.tok_nbspace_before(tlbrace, scope, "Expected single space before '{'.");

            let escope = scope.nested();
            for elem in &tsenum.elems {
                self.tok_lbegin(elem.tident, escope, "Enumerator must start on a new line.");
                if let Some(tequals) = elem.tequals {
                    self.tok_brkspace_before(tequals, escope, "Expected space before '='.");
                    self.tok_brkspace_after(tequals, escope, "Expected space after '='.");
                }
                if let Some(init) = &elem.init {
                    self.check_expr(init, escope);
                }
                self.tok_opt_nows_before(
                    elem.tcomma,
                    escope,
                    "Unexpected whitespace before ','.",
                );
            }
        }
        if let Some(trbrace) = tsenum.trbrace {
            self.tok_lbegin(trbrace, scope, "'}' must begin on a new line.");
        }
    }

    /// Declarator list: commas cuddle the preceding declarator and are
    /// followed by a space or line break; initializers are spaced around
    /// '='.
    pub(crate) fn check_dlist(&mut self, dlist: &Dlist, scope: Scope) {
        for entry in &dlist.entries {
            if let Some(tcomma) = entry.tcomma {
                self.tok_nows_before(tcomma, scope, "Unexpected whitespace before ','.");
                self.tok_brkspace_after(tcomma, scope, "Expected space after ','.");
            }
            self.check_decl(&entry.decl, scope);
            if let Some(tassign) = entry.tassign {
                self.tok_brkspace_before(tassign, scope, "Expected space before '='.");
                self.tok_brkspace_after(tassign, scope, "Expected space after '='.");
            }
            if let Some(init) = &entry.init {
                self.check_expr(init, scope);
            }
        }
    }

    /// Declarator.  The asterisk of a pointer declarator cuddles the
    /// declared name; function and array suffixes cuddle their base.
    pub(crate) fn check_decl(&mut self, decl: &Dnode, scope: Scope) {
        match decl {
            Dnode::Ident(dident) => self.tok_any(dident.tident, scope),
            Dnode::Noident => {}
            Dnode::Paren(dparen) => {
                self.tok_nsbrk_after(
                    dparen.tlparen,
                    scope,
                    "Unexpected whitespace after '('.",
                );
                self.check_decl(&dparen.bdecl, scope);
                self.tok_nows_before(
                    dparen.trparen,
                    scope,
                    "Unexpected whitespace before ')'.",
                );
            }
            Dnode::Ptr(dptr) => {
                if dptr.tquals.is_empty() {
                    self.tok_nows_after(
                        dptr.tasterisk,
                        scope,
                        "Unexpected whitespace after '*'.",
                    );
                } else {
                    self.tok_any(dptr.tasterisk, scope);
                    for tqual in &dptr.tquals {
                        self.tok_any(tqual.tqual, scope);
                    }
                }
                self.check_decl(&dptr.bdecl, scope);
            }
            Dnode::Fun(dfun) => {
                self.check_decl(&dfun.bdecl, scope);
                self.tok_nows_before(
                    dfun.tlparen,
                    scope,
                    "Unexpected whitespace before '('.",
                );
                self.tok_nsbrk_after(dfun.tlparen, scope, "Unexpected whitespace after '('.");
                for arg in &dfun.args {
                    self.check_dspecs(&arg.dspecs, scope);
                    self.check_decl(&arg.decl, scope);
                    if let Some(tcomma) = arg.tcomma {
                        self.tok_nows_before(
                            tcomma,
                            scope,
                            "Unexpected whitespace before ','.",
                        );
                        self.tok_brkspace_after(tcomma, scope, "Expected space after ','.");
                    }
                }
                self.tok_nows_before(
                    dfun.trparen,
                    scope,
                    "Unexpected whitespace before ')'.",
                );
            }
            Dnode::Array(darray) => {
                self.check_decl(&darray.bdecl, scope);
                self.tok_nows_before(
                    darray.tlbracket,
                    scope,
                    "Unexpected whitespace before '['.",
                );
                self.tok_nsbrk_after(
                    darray.tlbracket,
                    scope,
                    "Unexpected whitespace after '['.",
                );
                self.tok_opt_any(darray.tsize, scope);
                self.tok_nows_before(
                    darray.trbracket,
                    scope,
                    "Unexpected whitespace before ']'.",
                );
            }
        }
    }
}
