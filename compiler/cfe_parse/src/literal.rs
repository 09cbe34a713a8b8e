//! Literal reading and the literal-equivalence engine.
//!
//! A [`Literal`] is a tagged value: an arithmetic [`ExprType`] plus one of
//! `{i, u, d}` — which payload is active follows from the core type and
//! sign. [`are_equivalent`] implements the full C/C++ integer-promotion
//! and arithmetic-conversion matrix: both sides are converted to a target
//! type (or their best common type) and the converted payloads compared.
//!
//! Width model: `int` is 32 bits, `long` and `long long` are 64,
//! `wchar_t` and `char32_t` are 32, `char16_t` is 16 (LP64). `long double`
//! is represented as `f64`.

use crate::semantics::{AuxData, Sign, SizeSpec, TypeSpec};
use crate::sppf::NodeId;
use crate::semantics::SemCtx;
use cfe_ir::TokenKind;
use rustc_hash::FxHashMap;

/// Side table of auxiliary data attached to forest nodes.
pub type AuxTable = FxHashMap<NodeId, AuxData>;

/// The arithmetic type of an expression or literal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExprType {
    pub sign: Sign,
    pub size: SizeSpec,
    pub type_spec: TypeSpec,
}

impl ExprType {
    /// A sign or size without a core type implies `int`.
    #[must_use]
    pub fn new(sign: Sign, size: SizeSpec, type_spec: TypeSpec) -> ExprType {
        let type_spec = if type_spec == TypeSpec::None && (sign != Sign::None || size != SizeSpec::None)
        {
            TypeSpec::Int
        } else {
            type_spec
        };
        ExprType {
            sign,
            size,
            type_spec,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.type_spec != TypeSpec::None
    }

    #[must_use]
    pub fn is_signed(self) -> bool {
        match self.type_spec {
            TypeSpec::Char | TypeSpec::Int => self.sign != Sign::Unsigned,
            TypeSpec::Float | TypeSpec::Double => true,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_unsigned(self) -> bool {
        match self.type_spec {
            TypeSpec::Bool | TypeSpec::Char16T | TypeSpec::Char32T | TypeSpec::WcharT => true,
            TypeSpec::Char | TypeSpec::Int => self.sign == Sign::Unsigned,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_non_ptr_arithmetic(self) -> bool {
        self.type_spec >= TypeSpec::Bool && self.type_spec <= TypeSpec::Double
    }

    /// The standard's integer conversion rank:
    /// `bool < char < short < int < long < long long`, with the wide
    /// character types ranked by their underlying width.
    #[must_use]
    pub fn int_conv_rank(self) -> i32 {
        match self.type_spec {
            TypeSpec::Bool => 0,
            TypeSpec::Char => 1,
            TypeSpec::Char16T => 2, // 16-bit: same rank as short
            TypeSpec::Char32T => 3, // 32-bit: same rank as int
            TypeSpec::WcharT => 3,  // 32-bit: same rank as int
            TypeSpec::Int => match self.size {
                SizeSpec::Short => 2,
                SizeSpec::None => 3,
                SizeSpec::Long => 4,
                SizeSpec::LongLong => 5,
            },
            _ => -1,
        }
    }

    /// The type both literals convert to for comparison: the higher
    /// integer rank wins; at equal rank the unsigned type wins unless the
    /// signed operand is negative; any floating operand forces
    /// `long double`.
    #[must_use]
    pub fn best_common_type(a: &Literal, b: &Literal) -> ExprType {
        if a.ty == b.ty {
            return a.ty;
        }
        if !a.ty.is_non_ptr_arithmetic() || !b.ty.is_non_ptr_arithmetic() {
            return ExprType::default();
        }

        let a_rank = a.ty.int_conv_rank();
        let b_rank = b.ty.int_conv_rank();

        if a_rank >= 0 && b_rank >= 0 {
            if a_rank > b_rank {
                a.ty
            } else if b_rank > a_rank {
                b.ty
            } else if a.ty.is_unsigned() {
                if b.i() >= 0 {
                    a.ty
                } else {
                    b.ty
                }
            } else if a.i() >= 0 {
                b.ty
            } else {
                a.ty
            }
        } else {
            // floating point on either side: settle for long double
            ExprType::new(Sign::None, SizeSpec::Long, TypeSpec::Double)
        }
    }

    /// Read the type of a parsed declaration from its specifier-sequence
    /// auxiliary data.
    #[must_use]
    pub fn from_declaration(ctx: &SemCtx<'_>, aux: &AuxTable, declaration: NodeId) -> ExprType {
        let x = &ctx.cxx.nt;
        let seq = ctx
            .forest
            .find(&ctx.cxx.grammar, declaration, x.decl_specifier_seq, None)
            .or_else(|| {
                ctx.forest
                    .find(&ctx.cxx.grammar, declaration, x.type_specifier_seq, None)
            });
        let Some(seq) = seq else {
            return ExprType::default();
        };
        match aux.get(&seq) {
            Some(AuxData::DeclSpecifier(ds)) => ExprType::new(ds.sign, ds.size, ds.type_spec),
            _ => ExprType::default(),
        }
    }
}

/// Payload of a literal; the active variant follows the type.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Value {
    /// Integer bit pattern (two's complement).
    Int(i64),
    /// Floating value (stands in for `long double`).
    Float(f64),
}

/// A literal value with its arithmetic type.
#[derive(Clone, Copy, Debug)]
pub struct Literal {
    pub ty: ExprType,
    value: Value,
}

impl Literal {
    fn none() -> Literal {
        Literal {
            ty: ExprType::default(),
            value: Value::Int(0),
        }
    }

    fn int(ty: ExprType, bits: i64) -> Literal {
        Literal {
            ty,
            value: Value::Int(bits),
        }
    }

    fn float(ty: ExprType, d: f64) -> Literal {
        Literal {
            ty,
            value: Value::Float(d),
        }
    }

    /// Signed view of the payload.
    #[must_use]
    pub fn i(&self) -> i64 {
        match self.value {
            Value::Int(bits) => bits,
            Value::Float(d) => d as i64,
        }
    }

    /// Unsigned view of the payload (same bits as [`i`](Self::i)).
    #[must_use]
    pub fn u(&self) -> u64 {
        match self.value {
            Value::Int(bits) => bits as u64,
            Value::Float(d) => d as u64,
        }
    }

    /// Floating view of the payload.
    #[must_use]
    pub fn d(&self) -> f64 {
        match self.value {
            Value::Float(d) => d,
            Value::Int(bits) => bits as f64,
        }
    }

    /// Read a literal out of a parsed `literal` subtree. Non-literals and
    /// user-defined literals yield an invalid type.
    #[must_use]
    pub fn from_node(ctx: &SemCtx<'_>, node: NodeId) -> Literal {
        let x = &ctx.cxx.nt;
        let first = ctx
            .forest
            .first_token(node)
            .and_then(|raw| ctx.tokens.get(raw));
        let Some(token) = first else {
            return Literal::none();
        };

        if ctx.forest.node_is(node, x.numeric_literal) {
            return Literal::from_numeric_text(token.kind, token.spelling(ctx.interner));
        }
        if ctx.forest.node_is(node, x.character_literal) {
            // the lexer stores cooked content: the first scalar is the value
            let ty = match token.kind {
                TokenKind::CharLiteral => TypeSpec::Char,
                TokenKind::WcharLiteral => TypeSpec::WcharT,
                TokenKind::U16CharLiteral => TypeSpec::Char16T,
                TokenKind::U32CharLiteral => TypeSpec::Char32T,
                _ => return Literal::none(),
            };
            let value = token
                .spelling(ctx.interner)
                .chars()
                .next()
                .map_or(0, |c| c as i64);
            return Literal::int(ExprType::new(Sign::None, SizeSpec::None, ty), value);
        }
        if ctx.forest.node_is(node, x.boolean_literal) {
            return Literal::int(
                ExprType::new(Sign::None, SizeSpec::None, TypeSpec::Bool),
                i64::from(token.kind == TokenKind::KwTrue),
            );
        }
        if ctx.forest.node_is(node, x.pointer_literal) {
            return Literal::int(
                ExprType::new(Sign::None, SizeSpec::None, TypeSpec::NullptrT),
                0,
            );
        }
        // string literals and user-defined literals are not comparable
        Literal::none()
    }

    /// Parse a numeric literal from its spelling (prefix, digits,
    /// grouping separators, suffix; an optional leading `-`).
    #[must_use]
    pub fn from_numeric_text(kind: TokenKind, text: &str) -> Literal {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Literal::none();
        }

        let mut pos = 0usize;
        let negative = chars[0] == '-';
        if negative {
            pos += 1;
        }

        match kind {
            TokenKind::BinIntLiteral | TokenKind::HexIntLiteral => pos += 2, // 0b / 0x
            TokenKind::OctIntLiteral | TokenKind::DecIntLiteral | TokenKind::FloatLiteral => {}
            _ => return Literal::none(),
        }
        if pos >= chars.len() {
            return Literal::none();
        }

        if kind == TokenKind::FloatLiteral {
            return Self::parse_float(&chars, pos);
        }

        let mut bits: u64 = 0;
        let mut overflow = false;
        while pos < chars.len() {
            let c = chars[pos];
            if c == '\'' {
                pos += 1;
                continue;
            }
            let (radix, shift) = match kind {
                TokenKind::BinIntLiteral => (2, 1),
                TokenKind::OctIntLiteral => (8, 3),
                TokenKind::HexIntLiteral => (16, 4),
                _ => (10, 0),
            };
            let Some(digit) = c.to_digit(radix) else {
                break;
            };
            if shift > 0 {
                let top_mask = ((1u64 << shift) - 1) << (64 - shift);
                overflow = overflow || (bits & top_mask) != 0;
                bits = (bits << shift) | u64::from(digit);
            } else {
                overflow = overflow || bits > (u64::MAX - u64::from(digit)) / 10;
                bits = bits.wrapping_mul(10).wrapping_add(u64::from(digit));
            }
            pos += 1;
        }

        if negative {
            bits = (bits as i64).wrapping_neg() as u64;
        }

        // infer the type from the magnitude of the value
        let mut sign = Sign::Signed;
        let mut size = SizeSpec::None;
        if overflow {
            // just use the biggest allowable size
            size = SizeSpec::LongLong;
            if !negative {
                sign = Sign::Unsigned;
            }
        } else if negative {
            let value = bits as i64;
            if value < i64::from(i32::MIN) {
                size = SizeSpec::Long;
            }
        } else if bits <= i32::MAX as u64 {
            // plain int
        } else if bits <= u64::from(u32::MAX) {
            sign = Sign::Unsigned;
        } else if bits <= i64::MAX as u64 {
            size = SizeSpec::Long;
        } else {
            size = SizeSpec::LongLong;
            sign = Sign::Unsigned;
        }

        let mut lit = Literal::int(
            ExprType::new(sign, size, TypeSpec::Int),
            bits as i64,
        );
        lit.apply_suffix(&chars, pos, false);
        lit
    }

    fn parse_float(chars: &[char], start: usize) -> Literal {
        let mut mantissa = String::new();
        let mut pos = start;
        let mut prev_exp = false;
        while pos < chars.len() {
            let c = chars[pos];
            let take = c.is_ascii_digit()
                || c == '.'
                || c == 'e'
                || c == 'E'
                || ((c == '+' || c == '-') && prev_exp);
            if c == '\'' {
                pos += 1;
                continue;
            }
            if !take {
                break;
            }
            prev_exp = c == 'e' || c == 'E';
            mantissa.push(c);
            pos += 1;
        }
        if chars.first() == Some(&'-') {
            mantissa.insert(0, '-');
        }

        let d = mantissa.parse::<f64>().unwrap_or(0.0);
        let mut lit = Literal::float(
            ExprType::new(Sign::None, SizeSpec::None, TypeSpec::Double),
            d,
        );
        lit.apply_suffix(chars, pos, true);
        lit
    }

    /// Apply trailing `u`/`l`/`ll`/`f` suffixes in order; a contradictory
    /// suffix terminates the scan.
    fn apply_suffix(&mut self, chars: &[char], mut pos: usize, is_float: bool) {
        while pos < chars.len() {
            match chars[pos] {
                'U' | 'u' => {
                    if is_float {
                        return;
                    }
                    self.ty.sign = Sign::Unsigned;
                }
                'L' | 'l' => {
                    if self.ty.size == SizeSpec::None {
                        self.ty.size = SizeSpec::Long;
                        if is_float {
                            return; // long double
                        }
                    } else if self.ty.size == SizeSpec::Long {
                        self.ty.size = SizeSpec::LongLong;
                    } else {
                        return;
                    }
                }
                'F' | 'f' => {
                    if is_float {
                        self.ty.type_spec = TypeSpec::Float;
                    }
                    return;
                }
                _ => return,
            }
            pos += 1;
        }
    }

    /// Parse a character literal from its raw spelling including quotes
    /// (`'a'`, `L'\n'`, `u'\x41'`, ...): the standalone counterpart of the
    /// lexer's cooked content.
    #[must_use]
    pub fn from_character_text(kind: TokenKind, text: &str) -> Literal {
        let ty = match kind {
            TokenKind::CharLiteral => TypeSpec::Char,
            TokenKind::WcharLiteral => TypeSpec::WcharT,
            TokenKind::U16CharLiteral => TypeSpec::Char16T,
            TokenKind::U32CharLiteral => TypeSpec::Char32T,
            _ => return Literal::none(),
        };

        let chars: Vec<char> = text.chars().collect();
        // skip the opening quote
        let Some((&first, _)) = chars.split_first() else {
            return Literal::none();
        };
        if first != '\'' || chars.len() < 3 {
            return Literal::none();
        }

        let mut pos = 1usize;
        let mut value: i64 = 0;
        if chars[pos] == '\\' {
            pos += 1;
            match chars.get(pos) {
                Some(&c @ ('\'' | '"' | '?' | '\\')) => {
                    value = c as i64;
                    pos += 1;
                }
                Some('a') => {
                    value = 0x07;
                    pos += 1;
                }
                Some('b') => {
                    value = 0x08;
                    pos += 1;
                }
                Some('f') => {
                    value = 0x0c;
                    pos += 1;
                }
                Some('n') => {
                    value = i64::from(b'\n');
                    pos += 1;
                }
                Some('r') => {
                    value = i64::from(b'\r');
                    pos += 1;
                }
                Some('t') => {
                    value = i64::from(b'\t');
                    pos += 1;
                }
                Some('v') => {
                    value = 0x0b;
                    pos += 1;
                }
                Some(&e @ ('u' | 'U' | 'x')) => {
                    pos += 1;
                    let limit = match e {
                        'u' => pos + 4,
                        'U' => pos + 8,
                        _ => chars.len().saturating_sub(1), // 'x': until non-hex
                    };
                    while pos < limit && pos < chars.len() {
                        let Some(digit) = chars[pos].to_digit(16) else {
                            break;
                        };
                        value = (value << 4) | i64::from(digit);
                        pos += 1;
                    }
                }
                Some(_) => {
                    // up to 3 octal digits
                    let stop = (pos + 3).min(chars.len());
                    while pos < stop {
                        let Some(digit) = chars[pos].to_digit(8) else {
                            break;
                        };
                        value = (value << 3) | i64::from(digit);
                        pos += 1;
                    }
                }
                None => return Literal::none(),
            }
        } else if chars[pos] != '\'' {
            value = chars[pos] as i64;
            pos += 1;
        }

        if chars.get(pos) == Some(&'\'') {
            Literal::int(ExprType::new(Sign::None, SizeSpec::None, ty), value)
        } else {
            Literal::none()
        }
    }

    /// Convert to `to_type`, applying the standard's promotion, widening,
    /// narrowing and wraparound rules. Unreachable combinations yield the
    /// NoConversion sentinel (an invalid type).
    #[must_use]
    pub fn convert_to(&self, to_type: ExprType) -> Literal {
        let from = self.ty;
        if to_type == from {
            return *self;
        }

        match to_type.type_spec {
            TypeSpec::Bool => match from.type_spec {
                TypeSpec::Char
                | TypeSpec::Char16T
                | TypeSpec::Char32T
                | TypeSpec::WcharT
                | TypeSpec::Int
                | TypeSpec::NullptrT
                | TypeSpec::Bool => Literal::int(to_type, i64::from(self.u() != 0)),
                TypeSpec::Float | TypeSpec::Double => {
                    Literal::int(to_type, i64::from(self.d() != 0.0))
                }
                _ => Literal::none(),
            },
            TypeSpec::Char
            | TypeSpec::Char16T
            | TypeSpec::Char32T
            | TypeSpec::WcharT
            | TypeSpec::Int => self.convert_to_integer(to_type),
            TypeSpec::Float => match from.type_spec {
                TypeSpec::Bool
                | TypeSpec::Char
                | TypeSpec::Char16T
                | TypeSpec::Char32T
                | TypeSpec::WcharT
                | TypeSpec::Int => {
                    let d = if from.is_signed() {
                        self.i() as f64
                    } else {
                        self.u() as f64
                    };
                    Literal::float(to_type, (d as f32) as f64)
                }
                TypeSpec::Float | TypeSpec::Double => {
                    Literal::float(to_type, (self.d() as f32) as f64)
                }
                _ => Literal::none(),
            },
            TypeSpec::Double => match from.type_spec {
                TypeSpec::Bool
                | TypeSpec::Char
                | TypeSpec::Char16T
                | TypeSpec::Char32T
                | TypeSpec::WcharT
                | TypeSpec::Int => {
                    let d = if from.is_signed() {
                        self.i() as f64
                    } else {
                        self.u() as f64
                    };
                    Literal::float(to_type, d)
                }
                TypeSpec::Float | TypeSpec::Double => Literal::float(to_type, self.d()),
                _ => Literal::none(),
            },
            _ => Literal::none(),
        }
    }

    fn convert_to_integer(&self, to_type: ExprType) -> Literal {
        let mut from = self.ty;
        let mut bits = match self.value {
            Value::Int(b) => b,
            // float to integer: truncate through long long
            Value::Float(d) => {
                from = ExprType::new(Sign::Signed, SizeSpec::LongLong, TypeSpec::Int);
                d as i64
            }
        };

        if self.ty.type_spec == TypeSpec::Bool {
            return Literal::int(to_type, bits);
        }

        let from_rank = from.int_conv_rank();
        let to_rank = to_type.int_conv_rank();
        if from_rank < 0 || to_rank < 0 {
            return Literal::none();
        }

        let from_signed = from.is_signed();
        let to_signed = to_type.is_signed();

        if to_rank >= from_rank {
            if to_signed == from_signed {
                // same sign, same size or widening: value carries over
                return Literal::int(to_type, bits);
            }
            if !from_signed && to_rank > from_rank {
                // widening unsigned-to-signed: always representable
                return Literal::int(to_type, bits);
            }
            if from_signed && bits >= 0 {
                // nonnegative signed into unsigned of at least equal rank
                return Literal::int(to_type, bits);
            }
        }

        let u = bits as u64;
        bits = if to_signed {
            // narrowing to signed: truncate and sign-extend
            match (to_type.type_spec, to_type.size) {
                (TypeSpec::Char, _) => (u as u8 as i8) as i64,
                (TypeSpec::Int, SizeSpec::Short) => (u as u16 as i16) as i64,
                (TypeSpec::Int, SizeSpec::None) => (u as u32 as i32) as i64,
                _ => u as i64, // long / long long: full width
            }
        } else {
            // to unsigned: two's complement wraparound by masking at the
            // target width
            let masked = match (to_type.type_spec, to_type.size) {
                (TypeSpec::Char, _) => u64::from(u as u8),
                (TypeSpec::Char16T, _) | (TypeSpec::Int, SizeSpec::Short) => u64::from(u as u16),
                (TypeSpec::Char32T | TypeSpec::WcharT, _) | (TypeSpec::Int, SizeSpec::None) => {
                    u64::from(u as u32)
                }
                _ => u, // long / long long: full width
            };
            masked as i64
        };
        Literal::int(to_type, bits)
    }
}

/// Whether two literals are equal once both are converted to `target` (or,
/// when `target` is invalid or user-defined, to their best common type).
#[must_use]
pub fn are_equivalent(a: &Literal, b: &Literal, target: ExprType) -> bool {
    let target = if !target.is_valid() || target.type_spec == TypeSpec::Other {
        ExprType::best_common_type(a, b)
    } else {
        target
    };

    let a2 = a.convert_to(target);
    if !a2.ty.is_valid() {
        return false;
    }
    let b2 = b.convert_to(target);
    if !b2.ty.is_valid() {
        return false;
    }

    match target.type_spec {
        TypeSpec::Bool
        | TypeSpec::Char
        | TypeSpec::Char16T
        | TypeSpec::Char32T
        | TypeSpec::WcharT
        | TypeSpec::Int
        | TypeSpec::NullptrT => a2.i() == b2.i(),
        TypeSpec::Float | TypeSpec::Double => a2.d() == b2.d(),
        _ => false,
    }
}

/// Compare two constant-expression subtrees: strip parenthesis layers and,
/// when both sides are literals, delegate to [`are_equivalent`]. Anything
/// non-literal on either side is not equal.
#[must_use]
pub fn match_const_expr(
    ctx: &SemCtx<'_>,
    a: NodeId,
    b: NodeId,
    target: ExprType,
) -> bool {
    let a = strip_parens(ctx, a);
    let b = strip_parens(ctx, b);

    let x = &ctx.cxx.nt;
    if !ctx.forest.node_is(a, x.literal)
        || !ctx.forest.node_is(b, x.literal)
    {
        return false;
    }

    let a_lit = Literal::from_node(ctx, a);
    let b_lit = Literal::from_node(ctx, b);
    are_equivalent(&a_lit, &b_lit, target)
}

fn strip_parens(ctx: &SemCtx<'_>, mut node: NodeId) -> NodeId {
    let x = &ctx.cxx.nt;
    loop {
        let Some(paren) = ctx.forest.resolve_to(node, x.paren_expression) else {
            return node;
        };
        let inner = ctx.forest.sub_productions(&ctx.cxx.grammar, paren);
        match inner.first() {
            Some(&child) => node = child,
            None => return node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfe_ir::TokenKind::*;

    fn int_lit(text: &str) -> Literal {
        Literal::from_numeric_text(DecIntLiteral, text)
    }

    fn ty(sign: Sign, size: SizeSpec, t: TypeSpec) -> ExprType {
        ExprType::new(sign, size, t)
    }

    #[test]
    fn small_decimal_is_plain_int() {
        let lit = int_lit("42");
        assert_eq!(lit.ty, ty(Sign::Signed, SizeSpec::None, TypeSpec::Int));
        assert_eq!(lit.i(), 42);
    }

    #[test]
    fn value_above_int_max_is_unsigned() {
        let lit = int_lit("3000000000");
        assert_eq!(lit.ty.sign, Sign::Unsigned);
        assert_eq!(lit.ty.size, SizeSpec::None);
        assert_eq!(lit.u(), 3_000_000_000);
    }

    #[test]
    fn value_above_uint_max_is_long() {
        let lit = int_lit("5000000000");
        assert_eq!(lit.ty.sign, Sign::Signed);
        assert_eq!(lit.ty.size, SizeSpec::Long);
    }

    #[test]
    fn max_u64_is_unsigned_long_long() {
        // S5: 2^64 - 1
        let lit = int_lit("18446744073709551615");
        assert_eq!(lit.ty.type_spec, TypeSpec::Int);
        assert_eq!(lit.ty.size, SizeSpec::LongLong);
        assert_eq!(lit.ty.sign, Sign::Unsigned);
        assert_eq!(lit.u(), 0xFFFF_FFFF_FFFF_FFFF);
    }

    #[test]
    fn overflowing_accumulation_is_widest() {
        let lit = int_lit("99999999999999999999999999");
        assert_eq!(lit.ty.size, SizeSpec::LongLong);
        assert_eq!(lit.ty.sign, Sign::Unsigned);
    }

    #[test]
    fn hex_binary_and_octal() {
        let hex = Literal::from_numeric_text(HexIntLiteral, "0xFF");
        assert_eq!(hex.i(), 255);
        let bin = Literal::from_numeric_text(BinIntLiteral, "0b1010");
        assert_eq!(bin.i(), 10);
        let oct = Literal::from_numeric_text(OctIntLiteral, "017");
        assert_eq!(oct.i(), 15);
    }

    #[test]
    fn separators_are_skipped() {
        let lit = int_lit("1'000'000");
        assert_eq!(lit.i(), 1_000_000);
    }

    #[test]
    fn suffixes() {
        assert_eq!(int_lit("1u").ty.sign, Sign::Unsigned);
        assert_eq!(int_lit("1l").ty.size, SizeSpec::Long);
        assert_eq!(int_lit("1ll").ty.size, SizeSpec::LongLong);
        assert_eq!(int_lit("1ull").ty, ty(Sign::Unsigned, SizeSpec::LongLong, TypeSpec::Int));

        let f = Literal::from_numeric_text(FloatLiteral, "1.5f");
        assert_eq!(f.ty.type_spec, TypeSpec::Float);
        let ld = Literal::from_numeric_text(FloatLiteral, "1.5L");
        assert_eq!(ld.ty.size, SizeSpec::Long);
        assert_eq!(ld.ty.type_spec, TypeSpec::Double);
    }

    #[test]
    fn float_values() {
        let f = Literal::from_numeric_text(FloatLiteral, "2.5e3");
        assert_eq!(f.ty.type_spec, TypeSpec::Double);
        assert!((f.d() - 2500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn character_text_escapes() {
        assert_eq!(Literal::from_character_text(CharLiteral, "'a'").i(), 97);
        assert_eq!(Literal::from_character_text(CharLiteral, r"'\n'").i(), 10);
        assert_eq!(Literal::from_character_text(CharLiteral, r"'\x41'").i(), 0x41);
        assert_eq!(Literal::from_character_text(CharLiteral, r"'\101'").i(), 0o101);
        assert_eq!(
            Literal::from_character_text(WcharLiteral, r"'é'").i(),
            0xE9
        );
        assert_eq!(
            Literal::from_character_text(CharLiteral, "'a'").ty.type_spec,
            TypeSpec::Char
        );
        assert_eq!(
            Literal::from_character_text(U16CharLiteral, "'a'").ty.type_spec,
            TypeSpec::Char16T
        );
        // unterminated: invalid
        assert!(!Literal::from_character_text(CharLiteral, "'a").ty.is_valid());
    }

    #[test]
    fn rank_ordering() {
        let bool_ty = ty(Sign::None, SizeSpec::None, TypeSpec::Bool);
        let char_ty = ty(Sign::None, SizeSpec::None, TypeSpec::Char);
        let short_ty = ty(Sign::None, SizeSpec::Short, TypeSpec::Int);
        let int_ty = ty(Sign::None, SizeSpec::None, TypeSpec::Int);
        let long_ty = ty(Sign::None, SizeSpec::Long, TypeSpec::Int);
        let ll_ty = ty(Sign::None, SizeSpec::LongLong, TypeSpec::Int);
        let ranks: Vec<i32> = [bool_ty, char_ty, short_ty, int_ty, long_ty, ll_ty]
            .iter()
            .map(|t| t.int_conv_rank())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);

        assert_eq!(ty(Sign::None, SizeSpec::None, TypeSpec::Char16T).int_conv_rank(), 2);
        assert_eq!(ty(Sign::None, SizeSpec::None, TypeSpec::Char32T).int_conv_rank(), 3);
        assert_eq!(ty(Sign::None, SizeSpec::None, TypeSpec::Double).int_conv_rank(), -1);
    }

    #[test]
    fn best_common_type_prefers_higher_rank() {
        let a = int_lit("1");
        let b = int_lit("5000000000"); // long
        let common = ExprType::best_common_type(&a, &b);
        assert_eq!(common.size, SizeSpec::Long);
    }

    #[test]
    fn best_common_type_equal_rank_prefers_unsigned_for_nonnegative() {
        let a = int_lit("1");
        let b = int_lit("3000000000"); // unsigned int
        assert_eq!(ExprType::best_common_type(&a, &b).sign, Sign::Unsigned);

        // but a negative signed operand wins
        let neg = int_lit("-1");
        let common = ExprType::best_common_type(&neg, &b);
        assert_eq!(common.sign, Sign::Signed);
    }

    #[test]
    fn best_common_type_float_forces_long_double() {
        let a = Literal::from_numeric_text(FloatLiteral, "1.0");
        let b = int_lit("1");
        let common = ExprType::best_common_type(&a, &b);
        assert_eq!(common.type_spec, TypeSpec::Double);
        assert_eq!(common.size, SizeSpec::Long);
    }

    #[test]
    fn equivalence_is_reflexive_and_symmetric() {
        // invariants 9 and 10
        for text in ["0", "1", "-1", "42", "3000000000", "1.5"] {
            let kind = if text.contains('.') { FloatLiteral } else { DecIntLiteral };
            let lit = Literal::from_numeric_text(kind, text);
            assert!(are_equivalent(&lit, &lit, lit.ty), "reflexive for {text}");
        }

        let a = int_lit("7");
        let b = int_lit("7u");
        let target = ty(Sign::Unsigned, SizeSpec::None, TypeSpec::Int);
        assert_eq!(
            are_equivalent(&a, &b, target),
            are_equivalent(&b, &a, target)
        );
    }

    #[test]
    fn equivalence_under_best_common_type_is_value_equality() {
        // invariant 11
        let cases = [("1", "1", true), ("1", "2", false), ("255", "0xFF", true)];
        for (a_text, b_text, expected) in cases {
            let a = int_lit(a_text);
            let b = if b_text.starts_with("0x") {
                Literal::from_numeric_text(HexIntLiteral, b_text)
            } else {
                int_lit(b_text)
            };
            let common = ExprType::best_common_type(&a, &b);
            assert_eq!(are_equivalent(&a, &b, common), expected, "{a_text} vs {b_text}");
        }
    }

    #[test]
    fn s6_one_and_one_u_under_unsigned_long_long() {
        let a = int_lit("1");
        let b = int_lit("1u");
        let target = ty(Sign::Unsigned, SizeSpec::LongLong, TypeSpec::Int);
        assert!(are_equivalent(&a, &b, target));
    }

    #[test]
    fn s6_minus_one_wraps_to_ffffffff_under_unsigned() {
        let a = int_lit("-1");
        let b = Literal::from_numeric_text(HexIntLiteral, "0xFFFFFFFF");
        let target = ty(Sign::Unsigned, SizeSpec::None, TypeSpec::Int);
        assert!(are_equivalent(&a, &b, target));
    }

    #[test]
    fn s6_float_one_equals_int_one_under_common_type() {
        let a = Literal::from_numeric_text(FloatLiteral, "1.0f");
        let b = int_lit("1");
        assert!(are_equivalent(&a, &b, ExprType::default()));
    }

    #[test]
    fn bool_conversion_is_nonzero_test() {
        let target = ty(Sign::None, SizeSpec::None, TypeSpec::Bool);
        let zero = int_lit("0");
        let one = int_lit("1");
        let many = int_lit("42");
        assert!(are_equivalent(&one, &many, target));
        assert!(!are_equivalent(&zero, &many, target));
    }

    #[test]
    fn narrowing_wraps_at_target_width() {
        let big = int_lit("257");
        let target = ty(Sign::Unsigned, SizeSpec::None, TypeSpec::Char);
        let converted = big.convert_to(target);
        assert_eq!(converted.u(), 1); // 257 mod 256
    }

    #[test]
    fn float_to_int_truncates() {
        let f = Literal::from_numeric_text(FloatLiteral, "3.9");
        let target = ty(Sign::Signed, SizeSpec::None, TypeSpec::Int);
        assert_eq!(f.convert_to(target).i(), 3);
    }

    #[test]
    fn no_conversion_sentinel() {
        let n = int_lit("1");
        let target = ty(Sign::None, SizeSpec::None, TypeSpec::Other);
        assert!(!n.convert_to(target).ty.is_valid());
    }
}
