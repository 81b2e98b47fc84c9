//! Diagnostic dumps
//!
//! Plain-text renderings of the token stream (`--dump-toks`) and the AST
//! (`--dump-ast`).  The AST dump is position-independent: it prints node
//! kinds and token texts only, so two parses of whitespace-equivalent
//! sources render identically.  Neither dump mutates the module.

use crate::checker::Module;
use crate::parser::ast::*;

impl Module {
    /// Render the token stream, one token per line.
    pub fn dump_toks(&self) -> String {
        let mut out = String::new();
        for id in self.toks.iter() {
            out.push_str(&self.toks.get(id).tok.dump(self.fname()));
            out.push('\n');
        }
        out
    }

    /// Render the AST as a parenthesized tree.
    pub fn dump_ast(&self) -> String {
        let decls: Vec<String> = self.ast.decls.iter().map(|d| self.dump_gdecln(d)).collect();
        format!("module({})", decls.join(", "))
    }

    fn ttext(&self, id: TokId) -> &str {
        &self.toks.get(id).tok.text
    }

    fn dump_gdecln(&self, gdecln: &Gdecln) -> String {
        let mut s = format!(
            "gdecln({}, {}",
            self.dump_dspecs(&gdecln.dspecs),
            self.dump_dlist(&gdecln.dlist)
        );
        if let Some(body) = &gdecln.body {
            s.push_str(", ");
            s.push_str(&self.dump_block(body));
        }
        s.push(')');
        s
    }

    fn dump_dspecs(&self, dspecs: &Dspecs) -> String {
        let specs: Vec<String> = dspecs.specs.iter().map(|s| self.dump_dspec(s)).collect();
        format!("dspecs({})", specs.join(" "))
    }

    fn dump_sqlist(&self, sqlist: &Sqlist) -> String {
        let specs: Vec<String> = sqlist.elems.iter().map(|s| self.dump_dspec(s)).collect();
        format!("sqlist({})", specs.join(" "))
    }

    fn dump_dspec(&self, spec: &Dspec) -> String {
        match spec {
            Dspec::Sclass(sclass) => self.ttext(sclass.tsclass).to_string(),
            Dspec::Tqual(tqual) => self.ttext(tqual.tqual).to_string(),
            Dspec::Fspec(fspec) => self.ttext(fspec.tfspec).to_string(),
            Dspec::Tspec(Tspec::Basic(ts)) => self.ttext(ts.tbasic).to_string(),
            Dspec::Tspec(Tspec::Ident(ts)) => self.ttext(ts.tident).to_string(),
            Dspec::Tspec(Tspec::Record(ts)) => self.dump_tsrecord(ts),
            Dspec::Tspec(Tspec::Enum(ts)) => self.dump_tsenum(ts),
        }
    }

    fn dump_tsrecord(&self, tsrecord: &TsRecord) -> String {
        let mut s = match tsrecord.rtype {
            RecordType::Struct => String::from("tsrecord:struct"),
            RecordType::Union => String::from("tsrecord:union"),
        };
        if let Some(tident) = tsrecord.tident {
            s.push(':');
            s.push_str(self.ttext(tident));
        }
        if tsrecord.have_def() {
            let members: Vec<String> = tsrecord
                .elems
                .iter()
                .map(|e| {
                    format!(
                        "member({}, {})",
                        self.dump_sqlist(&e.sqlist),
                        self.dump_dlist(&e.dlist)
                    )
                })
                .collect();
            s.push('(');
            s.push_str(&members.join(", "));
            s.push(')');
        }
        s
    }

    fn dump_tsenum(&self, tsenum: &TsEnum) -> String {
        let mut s = String::from("tsenum");
        if let Some(tident) = tsenum.tident {
            s.push(':');
            s.push_str(self.ttext(tident));
        }
        if tsenum.tlbrace.is_some() {
            let elems: Vec<String> = tsenum
                .elems
                .iter()
                .map(|e| match &e.init {
                    Some(init) => {
                        format!("{}={}", self.ttext(e.tident), self.dump_expr(init))
                    }
                    None => self.ttext(e.tident).to_string(),
                })
                .collect();
            s.push('(');
            s.push_str(&elems.join(", "));
            s.push(')');
        }
        s
    }

    fn dump_dlist(&self, dlist: &Dlist) -> String {
        let entries: Vec<String> = dlist
            .entries
            .iter()
            .map(|e| match &e.init {
                Some(init) => format!("{} = {}", self.dump_dnode(&e.decl), self.dump_expr(init)),
                None => self.dump_dnode(&e.decl),
            })
            .collect();
        format!("dlist({})", entries.join(", "))
    }

    fn dump_dnode(&self, decl: &Dnode) -> String {
        match decl {
            Dnode::Ident(dident) => format!("dident:{}", dident.name),
            Dnode::Noident => String::from("dnoident"),
            Dnode::Paren(dparen) => format!("dparen({})", self.dump_dnode(&dparen.bdecl)),
            Dnode::Ptr(dptr) => {
                let mut s = String::from("dptr(");
                for tqual in &dptr.tquals {
                    s.push_str(self.ttext(tqual.tqual));
                    s.push(' ');
                }
                s.push_str(&self.dump_dnode(&dptr.bdecl));
                s.push(')');
                s
            }
            Dnode::Fun(dfun) => {
                let args: Vec<String> = dfun
                    .args
                    .iter()
                    .map(|a| format!("{} {}", self.dump_dspecs(&a.dspecs), self.dump_dnode(&a.decl)))
                    .collect();
                format!("dfun({}, ({}))", self.dump_dnode(&dfun.bdecl), args.join(", "))
            }
            Dnode::Array(darray) => {
                let size = darray.tsize.map(|t| self.ttext(t)).unwrap_or("");
                format!("darray({}, [{}])", self.dump_dnode(&darray.bdecl), size)
            }
        }
    }

    fn dump_block(&self, block: &Block) -> String {
        let stmts: Vec<String> = block.stmts.iter().map(|s| self.dump_stmt(s)).collect();
        if block.braces {
            format!("block{{{}}}", stmts.join(" "))
        } else {
            format!("nobraces{{{}}}", stmts.join(" "))
        }
    }

    fn dump_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Break(_) => String::from("break"),
            Stmt::Continue(_) => String::from("continue"),
            Stmt::Goto(sgoto) => format!("goto:{}", self.ttext(sgoto.tident)),
            Stmt::Return(sreturn) => match &sreturn.arg {
                Some(arg) => format!("return({})", self.dump_expr(arg)),
                None => String::from("return"),
            },
            Stmt::If(sif) => {
                let mut s = format!(
                    "if({}, {}",
                    self.dump_expr(&sif.cond),
                    self.dump_block(&sif.tbranch)
                );
                if let Some(ebranch) = &sif.ebranch {
                    s.push_str(", else ");
                    s.push_str(&self.dump_block(ebranch));
                }
                s.push(')');
                s
            }
            Stmt::While(swhile) => format!(
                "while({}, {})",
                self.dump_expr(&swhile.cond),
                self.dump_block(&swhile.body)
            ),
            Stmt::Do(sdo) => format!(
                "do({}, {})",
                self.dump_block(&sdo.body),
                self.dump_expr(&sdo.cond)
            ),
            Stmt::For(sfor) => {
                let init = match &sfor.init {
                    Some(ForInit::Expr(expr)) => self.dump_expr(expr),
                    Some(ForInit::Decln { dspecs, dlist }) => {
                        format!("decln({}, {})", self.dump_dspecs(dspecs), self.dump_dlist(dlist))
                    }
                    None => String::new(),
                };
                let cond = sfor.cond.as_ref().map(|e| self.dump_expr(e)).unwrap_or_default();
                let next = sfor.next.as_ref().map(|e| self.dump_expr(e)).unwrap_or_default();
                format!(
                    "for({}; {}; {}, {})",
                    init,
                    cond,
                    next,
                    self.dump_block(&sfor.body)
                )
            }
            Stmt::Switch(sswitch) => format!(
                "switch({}, {})",
                self.dump_expr(&sswitch.sexpr),
                self.dump_block(&sswitch.body)
            ),
            Stmt::Clabel(sclabel) => match &sclabel.cexpr {
                Some(cexpr) => format!("case({})", self.dump_expr(cexpr)),
                None => String::from("default"),
            },
            Stmt::Glabel(sglabel) => format!("glabel:{}", self.ttext(sglabel.tlabel)),
            Stmt::Expr(sexpr) => format!("stexpr({})", self.dump_expr(&sexpr.expr)),
            Stmt::Decln(sdecln) => format!(
                "stdecln({}, {})",
                self.dump_dspecs(&sdecln.dspecs),
                self.dump_dlist(&sdecln.dlist)
            ),
        }
    }

    fn dump_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Int(eint) => format!("eint:{}", self.ttext(eint.tlit)),
            Expr::Char(echar) => format!("echar:{}", self.ttext(echar.tlit)),
            Expr::String(estring) => {
                let parts: Vec<&str> = estring.tlits.iter().map(|&t| self.ttext(t)).collect();
                format!("estring({})", parts.join(","))
            }
            Expr::Ident(eident) => format!("eident:{}", self.ttext(eident.tident)),
            Expr::Paren(eparen) => format!("eparen({})", self.dump_expr(&eparen.bexpr)),
            Expr::Binop(ebinop) => format!(
                "ebinop:{}({}, {})",
                self.ttext(ebinop.top),
                self.dump_expr(&ebinop.larg),
                self.dump_expr(&ebinop.rarg)
            ),
            Expr::Tcond(etcond) => format!(
                "etcond({}, {}, {})",
                self.dump_expr(&etcond.cond),
                self.dump_expr(&etcond.targ),
                self.dump_expr(&etcond.farg)
            ),
            Expr::Comma(ecomma) => format!(
                "ecomma({}, {})",
                self.dump_expr(&ecomma.larg),
                self.dump_expr(&ecomma.rarg)
            ),
            Expr::Funcall(efuncall) => {
                let args: Vec<String> = efuncall
                    .args
                    .iter()
                    .map(|a| self.dump_expr(&a.arg))
                    .collect();
                format!(
                    "efuncall({}, ({}))",
                    self.dump_expr(&efuncall.fexpr),
                    args.join(", ")
                )
            }
            Expr::Index(eindex) => format!(
                "eindex({}, {})",
                self.dump_expr(&eindex.bexpr),
                self.dump_expr(&eindex.iexpr)
            ),
            Expr::Deref(ederef) => format!("ederef({})", self.dump_expr(&ederef.bexpr)),
            Expr::Addr(eaddr) => format!("eaddr({})", self.dump_expr(&eaddr.bexpr)),
            Expr::Sizeof(esizeof) => match &esizeof.arg {
                SizeofArg::Type(tname) => {
                    let stars = "*".repeat(tname.tptrs.len());
                    format!("esizeof(type({}{}))", self.dump_sqlist(&tname.sqlist), stars)
                }
                SizeofArg::Expr(expr) => format!("esizeof(expr({}))", self.dump_expr(expr)),
            },
            Expr::Member(emember) => format!(
                "emember({}, {})",
                self.dump_expr(&emember.bexpr),
                self.ttext(emember.tmember)
            ),
            Expr::IndMember(eindmember) => format!(
                "eindmember({}, {})",
                self.dump_expr(&eindmember.bexpr),
                self.ttext(eindmember.tmember)
            ),
            Expr::Usign(eusign) => format!(
                "eusign:{}({})",
                self.ttext(eusign.tsign),
                self.dump_expr(&eusign.bexpr)
            ),
            Expr::Lnot(elnot) => format!("elnot({})", self.dump_expr(&elnot.bexpr)),
            Expr::Bnot(ebnot) => format!("ebnot({})", self.dump_expr(&ebnot.bexpr)),
            Expr::Preadj(epreadj) => format!(
                "epreadj:{}({})",
                self.ttext(epreadj.tadj),
                self.dump_expr(&epreadj.bexpr)
            ),
            Expr::Postadj(epostadj) => format!(
                "epostadj:{}({})",
                self.ttext(epostadj.tadj),
                self.dump_expr(&epostadj.bexpr)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::checker::Module;

    #[test]
    fn test_dump_ast_simple() {
        let module = Module::from_source("t.c", "int x;\n").unwrap();
        assert_eq!(module.dump_ast(), "module(gdecln(dspecs(int), dlist(dident:x)))");
    }

    #[test]
    fn test_dump_ast_function() {
        let module = Module::from_source("t.c", "int f(void)\n{\n\treturn 0;\n}\n").unwrap();
        assert_eq!(
            module.dump_ast(),
            "module(gdecln(dspecs(int), dlist(dfun(dident:f, (dspecs(void) dnoident))), \
             block{return(eint:0)}))"
        );
    }

    #[test]
    fn test_dump_ast_ignores_whitespace() {
        let a = Module::from_source("t.c", "int  x=1 ;\n").unwrap();
        let b = Module::from_source("t.c", "int x = 1;\n").unwrap();
        assert_eq!(a.dump_ast(), b.dump_ast());
    }

    #[test]
    fn test_dump_toks_format() {
        let module = Module::from_source("t.c", "int x;\n").unwrap();
        let dump = module.dump_toks();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(
            lines,
            vec![
                "<t.c:1:1-3:int>",
                "<t.c:1:4:space>",
                "<t.c:1:5:id:x>",
                "<t.c:1:6:;>",
                "<t.c:1:7:newline>",
                "<t.c:2:1:eof>",
            ]
        );
    }
}
