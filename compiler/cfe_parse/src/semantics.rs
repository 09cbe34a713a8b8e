//! Post-parse semantics: decl-specifier folding and declarator checking.
//!
//! These run as post-parse actions on every successful reduction of the
//! relevant nonterminals. The rest of the system (and optional host
//! integration) depends on the data they attach, so the conflict rules are
//! implemented exactly: a second, different type specifier reports a
//! conflict and keeps the first, except that an OTHER newcomer silently
//! rejects the reduction — that is the decl-specifier-seq vs
//! constructor-id disambiguation.

use crate::cxx::CxxGrammar;
use crate::sppf::{Forest, NodeId};
use bitflags::bitflags;
use cfe_diagnostic::{Diagnostic, DiagnosticHandler, Severity};
use cfe_ir::{StringInterner, Token, TokenKind, TokenList};
use std::fmt;

bitflags! {
    /// `const`, `volatile`, `restrict`, `_Atomic` and the two reference
    /// qualifiers (functions only).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Qualifiers: u8 {
        const CONST = 0x1;
        const VOLATILE = 0x2;
        const RESTRICT = 0x4;
        const ATOMIC = 0x8;
        const LVAL_REF = 0x40;
        const RVAL_REF = 0x80;
    }
}

/// `signed` / `unsigned` specifiers; apply to `char` and `int` only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    #[default]
    None,
    Signed,
    Unsigned,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sign::None => "none",
            Sign::Signed => "signed",
            Sign::Unsigned => "unsigned",
        })
    }
}

/// `short`, `long` and `long long`; apply to `int` and `double` only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeSpec {
    #[default]
    None,
    Short,
    Long,
    LongLong,
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SizeSpec::None => "none",
            SizeSpec::Short => "short",
            SizeSpec::Long => "long",
            SizeSpec::LongLong => "long long",
        })
    }
}

/// The core type named by a specifier sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeSpec {
    #[default]
    None,
    Void,
    Auto,
    Decltype,
    Bool,
    Char,
    Char16T,
    Char32T,
    WcharT,
    Int,
    Float,
    Double,
    NullptrT,
    Other,
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeSpec::None => "none",
            TypeSpec::Void => "void",
            TypeSpec::Auto => "auto",
            TypeSpec::Decltype => "decltype(...)",
            TypeSpec::Bool => "bool",
            TypeSpec::Char => "char",
            TypeSpec::Char16T => "char16_t",
            TypeSpec::Char32T => "char32_t",
            TypeSpec::WcharT => "wchar_t",
            TypeSpec::Int => "int",
            TypeSpec::Float => "float",
            TypeSpec::Double => "double",
            TypeSpec::NullptrT => "nullptr_t",
            TypeSpec::Other => "user-defined",
        })
    }
}

/// Data attached to `decl_specifier_seq`, `type_specifier_seq` and
/// `trailing_type_specifier_seq` nodes.
#[derive(Clone, Debug, Default)]
pub struct DeclSpecifier {
    pub qualifiers: Qualifiers,
    pub sign: Sign,
    pub size: SizeSpec,
    pub type_spec: TypeSpec,
    /// Forest nodes that contributed each choice.
    pub sign_node: Option<NodeId>,
    pub size_node: Option<NodeId>,
    pub type_node: Option<NodeId>,
}

/// Data attached to declarator / nested / abstract / new / conversion /
/// lambda declarator nodes.
#[derive(Clone, Debug, Default)]
pub struct Declarator {
    /// Raw token index of the rightmost `*`/`&`/`&&`/`X::*` directly under
    /// this declarator (nested declarators excluded).
    pub last_ptr: Option<u32>,
    /// Raw token index of the start of the function parameter list.
    pub begin_parms: Option<u32>,
    /// Whether the declarator ends with an array part.
    pub is_array: bool,
}

/// Data attached to `ptr_operator` and `parameters_and_qualifiers` nodes.
#[derive(Clone, Debug, Default)]
pub struct DeclaratorPart {
    /// Number of function parameters.
    pub count: u16,
    /// Whether the parameter list ends with `...`.
    pub variadic: bool,
    pub qualifiers: Qualifiers,
}

/// Auxiliary payloads on SPPF nodes; kept in a side table keyed by node id.
#[derive(Clone, Debug)]
pub enum AuxData {
    DeclSpecifier(DeclSpecifier),
    Declarator(Declarator),
    DeclaratorPart(DeclaratorPart),
}

/// Qualifier bit for a single token, or empty.
#[must_use]
pub fn qualifier_for_token(token: &Token) -> Qualifiers {
    match token.kind {
        TokenKind::KwConst => Qualifiers::CONST,
        TokenKind::KwVolatile => Qualifiers::VOLATILE,
        TokenKind::KwRestrict => Qualifiers::RESTRICT,
        TokenKind::KwAtomic => Qualifiers::ATOMIC,
        TokenKind::Amp => Qualifiers::LVAL_REF,
        TokenKind::AmpAmp => Qualifiers::RVAL_REF,
        _ => Qualifiers::empty(),
    }
}

/// Shared context for the semantic callbacks.
pub struct SemCtx<'a> {
    pub cxx: &'a CxxGrammar,
    pub forest: &'a Forest,
    pub tokens: &'a TokenList,
    pub interner: &'a StringInterner,
    pub handler: &'a dyn DiagnosticHandler,
}

impl<'a> SemCtx<'a> {
    fn first_token(&self, node: NodeId) -> Option<&Token> {
        self.forest
            .first_token(node)
            .and_then(|raw| self.tokens.get(raw))
    }

    fn last_token(&self, node: NodeId) -> Option<&Token> {
        self.forest
            .last_token(node)
            .and_then(|raw| self.tokens.get(raw))
    }

    /// Source text of a node: its tokens' spellings, space-separated.
    fn node_text(&self, node: NodeId) -> String {
        let n = self.forest.node(node);
        let mut out = String::new();
        for sig in n.start..n.end {
            if !out.is_empty() {
                out.push(' ');
            }
            let raw = self.forest.raw_index(sig);
            out.push_str(self.tokens[raw].spelling(self.interner));
        }
        out
    }

    fn error_at(&self, node: NodeId, message: String) {
        let (offset, length, line, column) = match self.first_token(node) {
            Some(t) => {
                let len = self
                    .last_token(node)
                    .map_or(1, |last| last.offset.saturating_sub(t.offset) + 1);
                (t.offset, len, t.line, t.column)
            }
            None => (0, 0, 1, 1),
        };
        self.handler.handle(Diagnostic::new(
            Severity::Error,
            offset,
            length,
            line,
            column,
            message,
        ));
    }

    fn is(&self, node: NodeId, nt: crate::grammar::NtId) -> bool {
        self.forest.node_is(node, nt)
    }
}

/// The `*_specifier_seq` post-parse action: fold the sequence into a
/// normalized (sign, size, core type, qualifiers) tuple.
///
/// Returns `None` to reject the reduction (an OTHER type specifier after a
/// type was already named — probably the beginning of a declarator).
pub fn fold_decl_specifier_seq(
    ctx: &SemCtx<'_>,
    seq: NodeId,
    alt_idx: usize,
) -> Option<DeclSpecifier> {
    let mut ds = DeclSpecifier::default();
    let mut specs = Vec::new();
    collect_seq_children(ctx, seq, Some(alt_idx), &mut specs);
    for spec in specs {
        if !add_decl_specifier(ctx, &mut ds, spec) {
            return None;
        }
    }
    Some(ds)
}

/// Flatten the recursive `X_seq -> X X_seq` shape into one left-to-right
/// list of specifier nodes.
fn collect_seq_children(
    ctx: &SemCtx<'_>,
    seq: NodeId,
    alt_idx: Option<usize>,
    out: &mut Vec<NodeId>,
) {
    let node = ctx.forest.node(seq);
    let crate::sppf::NodeSym::Nt(seq_nt) = node.sym else {
        return;
    };
    let children = match alt_idx {
        Some(i) => ctx
            .forest
            .sub_productions_of_alt(&ctx.cxx.grammar, seq, i),
        None => ctx.forest.sub_productions(&ctx.cxx.grammar, seq),
    };
    for child in children {
        let is_nested_seq = matches!(
            ctx.forest.node(child).sym,
            crate::sppf::NodeSym::Nt(nt) if nt == seq_nt
        );
        if is_nested_seq {
            collect_seq_children(ctx, child, None, out);
        } else {
            out.push(child);
        }
    }
}

/// Fold one specifier into the accumulator. Returns `false` to reject the
/// whole reduction.
fn add_decl_specifier(ctx: &SemCtx<'_>, ds: &mut DeclSpecifier, spec: NodeId) -> bool {
    let x = &ctx.cxx.nt;

    if ctx.is(spec, x.type_qualifier) {
        if let Some(token) = ctx.first_token(spec) {
            ds.qualifiers |= qualifier_for_token(token);
        }
        return true;
    }

    if ctx.is(spec, x.simple_type_specifier) {
        let mut type_spec = TypeSpec::None;
        let mut size = SizeSpec::None;
        let mut sign = Sign::None;

        let Some(first) = ctx.first_token(spec) else {
            return true;
        };
        match first.kind {
            TokenKind::KwVoid => type_spec = TypeSpec::Void,
            TokenKind::KwAuto => type_spec = TypeSpec::Auto,
            TokenKind::KwDecltype => type_spec = TypeSpec::Decltype,
            TokenKind::KwBool => type_spec = TypeSpec::Bool,
            TokenKind::KwChar => type_spec = TypeSpec::Char,
            TokenKind::KwChar16T => type_spec = TypeSpec::Char16T,
            TokenKind::KwChar32T => type_spec = TypeSpec::Char32T,
            TokenKind::KwWcharT => type_spec = TypeSpec::WcharT,
            TokenKind::KwInt => type_spec = TypeSpec::Int,
            TokenKind::KwFloat => type_spec = TypeSpec::Float,
            TokenKind::KwDouble => type_spec = TypeSpec::Double,
            TokenKind::KwShort => size = SizeSpec::Short,
            TokenKind::KwLong => {
                let node = ctx.forest.node(spec);
                // the two-token production is "long long"
                size = if node.end - node.start == 2 {
                    SizeSpec::LongLong
                } else {
                    SizeSpec::Long
                };
            }
            TokenKind::KwSigned => sign = Sign::Signed,
            TokenKind::KwUnsigned => sign = Sign::Unsigned,
            TokenKind::Identifier => {
                if first.spelling(ctx.interner) == "nullptr_t" {
                    type_spec = TypeSpec::NullptrT;
                } else {
                    type_spec = TypeSpec::Other;
                }
            }
            _ => type_spec = TypeSpec::Other,
        }

        if type_spec != TypeSpec::None {
            return apply_type(ctx, ds, spec, type_spec);
        }
        if size != SizeSpec::None {
            apply_size(ctx, ds, spec, size);
            return true;
        }
        if sign != Sign::None {
            apply_sign(ctx, ds, spec, sign);
        }
        return true;
    }

    if ctx.is(spec, x.type_specifier) {
        // elaborated-type-specifier, typename-specifier, enum-specifier or
        // class-specifier
        if ds.type_spec != TypeSpec::None {
            return false;
        }
        let mut apply = true;
        if ds.sign != Sign::None {
            ctx.error_at(
                spec,
                format!(
                    "\"{}\" modifier cannot be used with type \"{}\"",
                    ds.sign,
                    ctx.node_text(spec)
                ),
            );
            apply = false;
        } else if ds.size != SizeSpec::None {
            ctx.error_at(
                spec,
                format!(
                    "\"{}\" modifier cannot be used with type \"{}\"",
                    ds.size,
                    ctx.node_text(spec)
                ),
            );
            apply = false;
        }
        if apply {
            ds.type_spec = TypeSpec::Other;
            ds.type_node = Some(spec);
        }
    }

    true
}

fn apply_type(ctx: &SemCtx<'_>, ds: &mut DeclSpecifier, spec: NodeId, type_spec: TypeSpec) -> bool {
    if ds.type_spec != TypeSpec::None {
        if type_spec == TypeSpec::Other {
            // probably the beginning of a declarator: reject the reduction
            return false;
        }
        let earlier = ds.type_node.map_or_else(String::new, |n| ctx.node_text(n));
        ctx.error_at(
            spec,
            format!(
                "\"{}\" conflicts with earlier type specifier \"{earlier}\"",
                ctx.node_text(spec)
            ),
        );
        return true; // keep the first, carry on parsing
    }

    let mut apply = true;
    match type_spec {
        TypeSpec::Char => {
            if ds.size != SizeSpec::None {
                ctx.error_at(
                    spec,
                    format!("\"{}\" modifier cannot be used with type \"char\"", ds.size),
                );
                return true;
            }
        }
        TypeSpec::Int => {}
        TypeSpec::Double => {
            if ds.sign != Sign::None {
                ctx.error_at(
                    spec,
                    format!("\"{}\" modifier cannot be used with type \"double\"", ds.sign),
                );
                apply = false;
            }
            if ds.size != SizeSpec::None && ds.size != SizeSpec::Long {
                ctx.error_at(
                    spec,
                    format!("\"{}\" modifier cannot be used with type \"double\"", ds.size),
                );
                apply = false;
            }
        }
        _ => {
            // void, auto, decltype, bool, char16_t, char32_t, wchar_t,
            // float, nullptr_t, user-defined
            if ds.sign != Sign::None {
                ctx.error_at(
                    spec,
                    format!(
                        "\"{}\" modifier cannot be used with type \"{}\"",
                        ds.sign,
                        ctx.node_text(spec)
                    ),
                );
                apply = false;
            }
            if ds.size != SizeSpec::None {
                ctx.error_at(
                    spec,
                    format!(
                        "\"{}\" modifier cannot be used with type \"{}\"",
                        ds.size,
                        ctx.node_text(spec)
                    ),
                );
                apply = false;
            }
        }
    }

    if apply {
        ds.type_spec = type_spec;
        ds.type_node = Some(spec);
    }
    true
}

fn apply_size(ctx: &SemCtx<'_>, ds: &mut DeclSpecifier, spec: NodeId, size: SizeSpec) {
    if ds.size != SizeSpec::None && size != ds.size {
        ctx.error_at(
            spec,
            format!("\"{size}\" conflicts with earlier \"{}\" modifier", ds.size),
        );
        return;
    }
    match size {
        SizeSpec::Short | SizeSpec::LongLong => {
            if ds.type_spec != TypeSpec::None && ds.type_spec != TypeSpec::Int {
                ctx.error_at(
                    spec,
                    format!(
                        "\"{size}\" modifier cannot be used with type \"{}\"",
                        ds.type_node.map_or_else(String::new, |n| ctx.node_text(n))
                    ),
                );
                return;
            }
        }
        SizeSpec::Long => {
            if ds.type_spec != TypeSpec::None
                && ds.type_spec != TypeSpec::Int
                && ds.type_spec != TypeSpec::Double
            {
                ctx.error_at(
                    spec,
                    format!(
                        "\"{size}\" modifier cannot be used with type \"{}\"",
                        ds.type_node.map_or_else(String::new, |n| ctx.node_text(n))
                    ),
                );
                return;
            }
        }
        SizeSpec::None => unreachable!("caller checked"),
    }
    ds.size = size;
    ds.size_node = Some(spec);
}

fn apply_sign(ctx: &SemCtx<'_>, ds: &mut DeclSpecifier, spec: NodeId, sign: Sign) {
    let mut apply = true;
    if ds.sign != Sign::None && sign != ds.sign {
        ctx.error_at(
            spec,
            format!("\"{sign}\" conflicts with earlier modifier \"{}\"", ds.sign),
        );
        apply = false;
    }
    if ds.type_spec != TypeSpec::None
        && ds.type_spec != TypeSpec::Int
        && ds.type_spec != TypeSpec::Char
    {
        ctx.error_at(
            spec,
            format!(
                "\"{sign}\" modifier cannot be used with type \"{}\"",
                ds.type_node.map_or_else(String::new, |n| ctx.node_text(n))
            ),
        );
        apply = false;
    }
    if apply {
        ds.sign = sign;
        ds.sign_node = Some(spec);
    }
}

/// The declarator post-parse action: validate shape and record the
/// rightmost pointer operator, parameter-list start and array-ness.
///
/// Each violation is reported once per declarator; validation continues.
pub fn check_declarator(ctx: &SemCtx<'_>, node: NodeId, alt_idx: usize) -> Declarator {
    let mut me = Declarator::default();
    check_declarator_level(ctx, &mut me, node, Some(alt_idx), true);
    me
}

fn check_declarator_level(
    ctx: &SemCtx<'_>,
    me: &mut Declarator,
    node: NodeId,
    alt_idx: Option<usize>,
    top: bool,
) {
    let x = &ctx.cxx.nt;
    let parts = match alt_idx {
        Some(i) => ctx.forest.sub_productions_of_alt(&ctx.cxx.grammar, node, i),
        None => ctx.forest.sub_productions(&ctx.cxx.grammar, node),
    };

    let mut nested: Option<NodeId> = None;
    let mut ref_op = false;
    let mut ref_to_ref = false;
    let mut ptr_to_ref = false;
    let mut multi_fn_parms = false;
    let mut array_of_refs = false;

    for part in parts {
        if ctx.is(part, x.ptr_operator) {
            let is_ref = ctx
                .first_token(part)
                .is_some_and(|t| matches!(t.kind, TokenKind::Amp | TokenKind::AmpAmp));
            if is_ref {
                if !ref_op {
                    ref_op = true;
                } else if !ref_to_ref {
                    ctx.error_at(part, "reference to reference not permitted".into());
                    ref_to_ref = true;
                }
            } else if ref_op && !ptr_to_ref {
                ctx.error_at(part, "pointer to reference not permitted".into());
                ptr_to_ref = true;
            }
            if top {
                me.last_ptr = ctx.forest.first_token(part);
            }
        } else if ctx.is(part, x.parameters_and_qualifiers) {
            if me.begin_parms.is_none() {
                me.begin_parms = ctx.forest.first_token(part);
            } else if !multi_fn_parms {
                ctx.error_at(
                    part,
                    "multiple sets of function parameters/qualifiers".into(),
                );
                multi_fn_parms = true;
            }
        } else if ctx.is(part, x.array_declarator) {
            if ref_op && !array_of_refs {
                ctx.error_at(part, "array of references not permitted".into());
                array_of_refs = true;
            }
            me.is_array = true;
        } else if ctx.is(part, x.nested_declarator) || ctx.is(part, x.nested_abstract_declarator) {
            nested = Some(part);
        }
    }

    if let Some(nested) = nested {
        check_declarator_level(ctx, me, nested, None, false);
    }
}

/// The `ptr_operator` post-parse action: extract cv qualifiers from a
/// trailing `type_qualifier_seq`.
pub fn end_ptr_operator(ctx: &SemCtx<'_>, node: NodeId) -> DeclaratorPart {
    let mut part = DeclaratorPart::default();
    if let Some(quals) = ctx.forest.find(
        &ctx.cxx.grammar,
        node,
        ctx.cxx.nt.type_qualifier_seq,
        Some(1),
    ) {
        part.qualifiers = type_qualifiers_from_seq(ctx, quals);
    }
    part
}

/// The `parameters_and_qualifiers` / `lambda_declarator` post-parse
/// action: count parameters, detect a trailing `...`, fold trailing cv and
/// ref qualifiers.
pub fn end_parameters_and_qualifiers(
    ctx: &SemCtx<'_>,
    node: NodeId,
    alt_idx: usize,
) -> DeclaratorPart {
    let x = &ctx.cxx.nt;
    let mut me = DeclaratorPart::default();

    for child in ctx.forest.sub_productions_of_alt(&ctx.cxx.grammar, node, alt_idx) {
        if ctx.is(child, x.parameter_declaration_clause) {
            if !ctx.forest.node(child).is_empty() {
                me.count = count_parameters(ctx, child);
                me.variadic = ctx
                    .last_token(child)
                    .is_some_and(|t| t.kind == TokenKind::Ellipsis);
            }
        } else if ctx.is(child, x.type_qualifier_seq) {
            me.qualifiers |= type_qualifiers_from_seq(ctx, child);
        } else if ctx.is(child, x.ref_qualifier) {
            if let Some(token) = ctx.first_token(child) {
                me.qualifiers |= qualifier_for_token(token);
            }
        }
    }

    me
}

fn count_parameters(ctx: &SemCtx<'_>, clause: NodeId) -> u16 {
    let x = &ctx.cxx.nt;
    let mut count = 0u16;
    for child in ctx.forest.sub_productions(&ctx.cxx.grammar, clause) {
        if ctx.is(child, x.parameter_declaration) {
            count = count.saturating_add(1);
        }
    }
    count
}

/// Union of the qualifier bits of every `type_qualifier` in a sequence.
pub fn type_qualifiers_from_seq(ctx: &SemCtx<'_>, seq: NodeId) -> Qualifiers {
    let x = &ctx.cxx.nt;
    let mut qualifiers = Qualifiers::empty();
    for child in ctx.forest.sub_productions(&ctx.cxx.grammar, seq) {
        if ctx.is(child, x.type_qualifier) {
            if let Some(token) = ctx.first_token(child) {
                qualifiers |= qualifier_for_token(token);
            }
        } else if ctx.is(child, x.type_qualifier_seq) {
            qualifiers |= type_qualifiers_from_seq(ctx, child);
        }
    }
    qualifiers
}
