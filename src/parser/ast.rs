// AST (Abstract Syntax Tree) definitions for the C style checker

//! AST node definitions
//!
//! Nodes are grouped into families (declarations, declarators, statements,
//! expressions), each a tagged enum over per-kind structs.  Every concrete
//! syntactic token a production consumed is recorded in a named slot holding
//! a [`TokId`] back-reference into the checker's token sequence; `None` in an
//! optional slot means the grammar branch did not consume that token (the
//! comma after the last argument, the identifier of an anonymous struct).
//!
//! The AST never owns token text.  It annotates the token sequence, and the
//! checker resolves slots back to tokens when it walks the tree.

/// Back-reference to a token in the checker's token sequence.
pub type TokId = usize;

/// One parsed translation unit: a sequence of top-level declarations.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub decls: Vec<Gdecln>,
}

/// Global declaration or function definition:
/// `dspecs dlist (';' | block)`.
#[derive(Debug, Clone)]
pub struct Gdecln {
    pub dspecs: Dspecs,
    pub dlist: Dlist,
    /// Function body; present for function definitions only.
    pub body: Option<Block>,
    pub tscolon: Option<TokId>,
}

/// Declaration specifiers: any mix of storage classes, type specifiers,
/// qualifiers and function specifiers.  Order is not enforced.
#[derive(Debug, Clone, Default)]
pub struct Dspecs {
    pub specs: Vec<Dspec>,
}

/// Specifier-qualifier list (struct/union members, type names): like
/// [`Dspecs`] but never containing storage classes or function specifiers.
#[derive(Debug, Clone, Default)]
pub struct Sqlist {
    pub elems: Vec<Dspec>,
}

/// A single declaration specifier.
#[derive(Debug, Clone)]
pub enum Dspec {
    Sclass(Sclass),
    Tqual(Tqual),
    Fspec(Fspec),
    Tspec(Tspec),
}

/// Storage-class specifier (`typedef`, `extern`, `static`, `auto`,
/// `register`).
#[derive(Debug, Clone)]
pub struct Sclass {
    pub sctype: SclassType,
    pub tsclass: TokId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SclassType {
    Typedef,
    Extern,
    Static,
    Auto,
    Register,
}

/// Type qualifier (`const`, `restrict`, `volatile`).
#[derive(Debug, Clone)]
pub struct Tqual {
    pub qtype: QualType,
    pub tqual: TokId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualType {
    Const,
    Restrict,
    Volatile,
}

/// Function specifier (`inline`).
#[derive(Debug, Clone)]
pub struct Fspec {
    pub tfspec: TokId,
}

/// Type specifier.
#[derive(Debug, Clone)]
pub enum Tspec {
    Basic(TsBasic),
    Ident(TsIdent),
    Record(TsRecord),
    Enum(TsEnum),
}

/// Built-in type specifier keyword (`void`, `char`, `int`, ...).
#[derive(Debug, Clone)]
pub struct TsBasic {
    pub tbasic: TokId,
}

/// Type specifier naming a typedef'd type.
#[derive(Debug, Clone)]
pub struct TsIdent {
    pub tident: TokId,
}

/// Record kind of a [`TsRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Struct,
    Union,
}

/// Struct or union specifier, with an optional member definition.
#[derive(Debug, Clone)]
pub struct TsRecord {
    pub rtype: RecordType,
    pub tsu: TokId,
    pub tident: Option<TokId>,
    pub tlbrace: Option<TokId>,
    pub elems: Vec<TsRecordElem>,
    pub trbrace: Option<TokId>,
}

impl TsRecord {
    /// Whether this specifier defines the record (has a member list).
    pub fn have_def(&self) -> bool {
        self.tlbrace.is_some()
    }
}

/// One member declaration inside a struct/union definition.
#[derive(Debug, Clone)]
pub struct TsRecordElem {
    pub sqlist: Sqlist,
    pub dlist: Dlist,
    pub tscolon: TokId,
}

/// Enum specifier, with an optional enumerator list.
#[derive(Debug, Clone)]
pub struct TsEnum {
    pub tenum: TokId,
    pub tident: Option<TokId>,
    pub tlbrace: Option<TokId>,
    pub elems: Vec<TsEnumElem>,
    pub trbrace: Option<TokId>,
}

/// One enumerator: `NAME [= value][,]`.
#[derive(Debug, Clone)]
pub struct TsEnumElem {
    pub tident: TokId,
    pub tequals: Option<TokId>,
    pub init: Option<Expr>,
    pub tcomma: Option<TokId>,
}

/// Declarator.
#[derive(Debug, Clone)]
pub enum Dnode {
    /// Plain identifier declarator.
    Ident(Dident),
    /// Absent declarator (abstract declarator base, unnamed argument).
    Noident,
    /// Parenthesized declarator.
    Paren(Box<Dparen>),
    /// Pointer declarator: `* tqual* decl`.
    Ptr(Box<Dptr>),
    /// Function declarator: `decl ( args )`.
    Fun(Box<Dfun>),
    /// Array declarator: `decl [ size? ]`.
    Array(Box<Darray>),
}

impl Dnode {
    /// The identifier this declarator declares, if any.
    pub fn ident(&self) -> Option<&Dident> {
        match self {
            Dnode::Ident(dident) => Some(dident),
            Dnode::Noident => None,
            Dnode::Paren(dparen) => dparen.bdecl.ident(),
            Dnode::Ptr(dptr) => dptr.bdecl.ident(),
            Dnode::Fun(dfun) => dfun.bdecl.ident(),
            Dnode::Array(darray) => darray.bdecl.ident(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dident {
    pub tident: TokId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Dparen {
    pub tlparen: TokId,
    pub bdecl: Dnode,
    pub trparen: TokId,
}

#[derive(Debug, Clone)]
pub struct Dptr {
    pub tasterisk: TokId,
    pub tquals: Vec<Tqual>,
    pub bdecl: Dnode,
}

#[derive(Debug, Clone)]
pub struct Dfun {
    pub bdecl: Dnode,
    pub tlparen: TokId,
    pub args: Vec<DfunArg>,
    pub trparen: TokId,
}

/// One function declarator argument: `dspecs decl [,]`.
#[derive(Debug, Clone)]
pub struct DfunArg {
    pub dspecs: Dspecs,
    pub decl: Dnode,
    pub tcomma: Option<TokId>,
}

#[derive(Debug, Clone)]
pub struct Darray {
    pub bdecl: Dnode,
    pub tlbracket: TokId,
    /// Array size (number or identifier token), if present.
    pub tsize: Option<TokId>,
    pub trbracket: TokId,
}

/// Declarator list: `entry (, entry)*`, each entry optionally initialized.
#[derive(Debug, Clone, Default)]
pub struct Dlist {
    pub entries: Vec<DlistEntry>,
}

#[derive(Debug, Clone)]
pub struct DlistEntry {
    /// Comma preceding this entry (absent on the first).
    pub tcomma: Option<TokId>,
    pub decl: Dnode,
    pub tassign: Option<TokId>,
    pub init: Option<Expr>,
}

/// Statement block.  `braces` distinguishes a real `{ }` block from the
/// single-statement body of an unbraced `if`/`while`/...
#[derive(Debug, Clone)]
pub struct Block {
    pub braces: bool,
    pub topen: Option<TokId>,
    pub stmts: Vec<Stmt>,
    pub tclose: Option<TokId>,
}

/// Statement.
#[derive(Debug, Clone)]
pub enum Stmt {
    Break(SBreak),
    Continue(SContinue),
    Goto(SGoto),
    Return(Box<SReturn>),
    If(Box<SIf>),
    While(Box<SWhile>),
    Do(Box<SDo>),
    For(Box<SFor>),
    Switch(Box<SSwitch>),
    /// Case or default label.
    Clabel(Box<SClabel>),
    /// Goto label.
    Glabel(SGlabel),
    /// Expression statement.
    Expr(Box<SExpr>),
    /// Local declaration statement.
    Decln(Box<SDecln>),
}

#[derive(Debug, Clone)]
pub struct SBreak {
    pub tbreak: TokId,
    pub tscolon: TokId,
}

#[derive(Debug, Clone)]
pub struct SContinue {
    pub tcontinue: TokId,
    pub tscolon: TokId,
}

#[derive(Debug, Clone)]
pub struct SGoto {
    pub tgoto: TokId,
    pub tident: TokId,
    pub tscolon: TokId,
}

#[derive(Debug, Clone)]
pub struct SReturn {
    pub treturn: TokId,
    pub arg: Option<Expr>,
    pub tscolon: TokId,
}

#[derive(Debug, Clone)]
pub struct SIf {
    pub tif: TokId,
    pub tlparen: TokId,
    pub cond: Expr,
    pub trparen: TokId,
    pub tbranch: Block,
    pub telse: Option<TokId>,
    pub ebranch: Option<Block>,
}

#[derive(Debug, Clone)]
pub struct SWhile {
    pub twhile: TokId,
    pub tlparen: TokId,
    pub cond: Expr,
    pub trparen: TokId,
    pub body: Block,
}

#[derive(Debug, Clone)]
pub struct SDo {
    pub tdo: TokId,
    pub body: Block,
    pub twhile: TokId,
    pub tlparen: TokId,
    pub cond: Expr,
    pub trparen: TokId,
    pub tscolon: TokId,
}

#[derive(Debug, Clone)]
pub struct SFor {
    pub tfor: TokId,
    pub tlparen: TokId,
    pub init: Option<ForInit>,
    pub tscolon1: TokId,
    pub cond: Option<Expr>,
    pub tscolon2: TokId,
    pub next: Option<Expr>,
    pub trparen: TokId,
    pub body: Block,
}

/// Initializer clause of a `for` statement.
#[derive(Debug, Clone)]
pub enum ForInit {
    Expr(Expr),
    Decln { dspecs: Dspecs, dlist: Dlist },
}

#[derive(Debug, Clone)]
pub struct SSwitch {
    pub tswitch: TokId,
    pub tlparen: TokId,
    pub sexpr: Expr,
    pub trparen: TokId,
    pub body: Block,
}

/// `case expr :` or `default :`.
#[derive(Debug, Clone)]
pub struct SClabel {
    pub tslabel: TokId,
    pub cexpr: Option<Expr>,
    pub tcolon: TokId,
}

/// `label :`.
#[derive(Debug, Clone)]
pub struct SGlabel {
    pub tlabel: TokId,
    pub tcolon: TokId,
}

#[derive(Debug, Clone)]
pub struct SExpr {
    pub expr: Expr,
    pub tscolon: TokId,
}

/// Local declaration: `dspecs dlist ;`.
#[derive(Debug, Clone)]
pub struct SDecln {
    pub dspecs: Dspecs,
    pub dlist: Dlist,
    pub tscolon: TokId,
}

/// Expression.
#[derive(Debug, Clone)]
pub enum Expr {
    Int(EInt),
    Char(EChar),
    String(EString),
    Ident(EIdent),
    Paren(Box<EParen>),
    Binop(Box<EBinop>),
    Tcond(Box<ETcond>),
    Comma(Box<EComma>),
    Funcall(Box<EFuncall>),
    Index(Box<EIndex>),
    Deref(Box<EDeref>),
    Addr(Box<EAddr>),
    Sizeof(Box<ESizeof>),
    Member(Box<EMember>),
    IndMember(Box<EIndMember>),
    Usign(Box<EUsign>),
    Lnot(Box<ELnot>),
    Bnot(Box<EBnot>),
    Preadj(Box<EPreadj>),
    Postadj(Box<EPostadj>),
}

/// Integer constant.
#[derive(Debug, Clone)]
pub struct EInt {
    pub tlit: TokId,
}

/// Character literal.
#[derive(Debug, Clone)]
pub struct EChar {
    pub tlit: TokId,
}

/// String literal, possibly multipart (`"a" "b"`).
#[derive(Debug, Clone)]
pub struct EString {
    pub tlits: Vec<TokId>,
}

/// Identifier reference.
#[derive(Debug, Clone)]
pub struct EIdent {
    pub tident: TokId,
}

/// Parenthesized expression.
#[derive(Debug, Clone)]
pub struct EParen {
    pub tlparen: TokId,
    pub bexpr: Expr,
    pub trparen: TokId,
}

/// Binary operator expression.  The operator token's kind identifies the
/// operator; assignments are binops too.
#[derive(Debug, Clone)]
pub struct EBinop {
    pub larg: Expr,
    pub top: TokId,
    pub rarg: Expr,
}

/// Ternary conditional `cond ? targ : farg`.
#[derive(Debug, Clone)]
pub struct ETcond {
    pub cond: Expr,
    pub tqmark: TokId,
    pub targ: Expr,
    pub tcolon: TokId,
    pub farg: Expr,
}

/// Comma expression.
#[derive(Debug, Clone)]
pub struct EComma {
    pub larg: Expr,
    pub tcomma: TokId,
    pub rarg: Expr,
}

/// Function call.
#[derive(Debug, Clone)]
pub struct EFuncall {
    pub fexpr: Expr,
    pub tlparen: TokId,
    pub args: Vec<EFuncallArg>,
    pub trparen: TokId,
}

/// One call argument: `[,] expr` (the comma precedes every argument but
/// the first).
#[derive(Debug, Clone)]
pub struct EFuncallArg {
    pub tcomma: Option<TokId>,
    pub arg: Expr,
}

/// Array subscript.
#[derive(Debug, Clone)]
pub struct EIndex {
    pub bexpr: Expr,
    pub tlbracket: TokId,
    pub iexpr: Expr,
    pub trbracket: TokId,
}

/// Pointer dereference `*x`.
#[derive(Debug, Clone)]
pub struct EDeref {
    pub tasterisk: TokId,
    pub bexpr: Expr,
}

/// Address-of `&x`.
#[derive(Debug, Clone)]
pub struct EAddr {
    pub tamper: TokId,
    pub bexpr: Expr,
}

/// `sizeof ( type-name | expr )`.
#[derive(Debug, Clone)]
pub struct ESizeof {
    pub tsizeof: TokId,
    pub tlparen: TokId,
    pub arg: SizeofArg,
    pub trparen: TokId,
}

#[derive(Debug, Clone)]
pub enum SizeofArg {
    Type(TypeName),
    Expr(Expr),
}

/// Abstract type name inside `sizeof`: specifier-qualifier list plus
/// trailing asterisks.
#[derive(Debug, Clone)]
pub struct TypeName {
    pub sqlist: Sqlist,
    pub tptrs: Vec<TokId>,
}

/// Member access `x.m`.
#[derive(Debug, Clone)]
pub struct EMember {
    pub bexpr: Expr,
    pub tperiod: TokId,
    pub tmember: TokId,
}

/// Indirect member access `x->m`.
#[derive(Debug, Clone)]
pub struct EIndMember {
    pub bexpr: Expr,
    pub tarrow: TokId,
    pub tmember: TokId,
}

/// Unary sign `+x` / `-x`.
#[derive(Debug, Clone)]
pub struct EUsign {
    pub tsign: TokId,
    pub bexpr: Expr,
}

/// Logical not `!x`.
#[derive(Debug, Clone)]
pub struct ELnot {
    pub tlnot: TokId,
    pub bexpr: Expr,
}

/// Bitwise not `~x`.
#[derive(Debug, Clone)]
pub struct EBnot {
    pub tbnot: TokId,
    pub bexpr: Expr,
}

/// Pre-increment/decrement `++x` / `--x`.
#[derive(Debug, Clone)]
pub struct EPreadj {
    pub tadj: TokId,
    pub bexpr: Expr,
}

/// Post-increment/decrement `x++` / `x--`.
#[derive(Debug, Clone)]
pub struct EPostadj {
    pub bexpr: Expr,
    pub tadj: TokId,
}
