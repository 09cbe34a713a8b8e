//! Tokens, token flags and the token sequence.

use crate::{Name, StringInterner, TokenKind};
use bitflags::bitflags;
use std::fmt;
use std::ops::Index;

bitflags! {
    /// Per-token flag bits.
    ///
    /// The bit values are stable interface: `STARTS_LINE` and `SPACE_BEFORE`
    /// occupy the two base bits, the C/C++-specific flags sit in the user
    /// range directly above them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// First token on its line.
        const STARTS_LINE = 0x01;
        /// Whitespace appeared before this token.
        const SPACE_BEFORE = 0x02;
        /// Alternate form: a digraph or an alphabetic operator (`and`, ...).
        const ALTERNATE = 0x04;
        /// Part of a preprocessor directive.
        const PREPROCESS = 0x08;
        /// A `>>`, `>=` or `>>=` that may close a template-argument list.
        const SPLITABLE = 0x10;
    }
}

/// One lexed token.
///
/// `offset` is the byte index in the raw input; `line` and `column` are
/// 1-based. Once appended to the list a token's position never changes,
/// with the single exception of the parser's template-argument hook, which
/// splits a `>>`/`>=`/`>>=` into two tokens at offsets `(o, o + 1)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub flags: TokenFlags,
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    spelling: Option<Name>,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, offset: u32, line: u32, column: u32) -> Self {
        Token {
            kind,
            flags: TokenFlags::empty(),
            offset,
            line,
            column,
            spelling: None,
        }
    }

    /// A position-less token for tests and synthesized input.
    #[must_use]
    pub fn dummy(kind: TokenKind) -> Self {
        Token::new(kind, 0, 1, 1)
    }

    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn set_kind(&mut self, kind: TokenKind) -> &mut Self {
        self.kind = kind;
        self
    }

    /// Attach an interned spelling, overriding the kind's default.
    pub fn set_spelling(&mut self, name: Name) -> &mut Self {
        self.spelling = Some(name);
        self
    }

    /// Drop any interned spelling, reverting to the kind's default.
    pub fn clear_spelling(&mut self) -> &mut Self {
        self.spelling = None;
        self
    }

    /// The token text: the interned spelling if one was stored, otherwise
    /// the kind's default spelling.
    #[must_use]
    pub fn spelling(&self, interner: &StringInterner) -> &'static str {
        match self.spelling {
            Some(name) => interner.lookup(name),
            None => self.kind.default_spelling(),
        }
    }

    #[must_use]
    pub fn spelling_name(&self) -> Option<Name> {
        self.spelling
    }

    pub fn add_flags(&mut self, flags: TokenFlags) -> &mut Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn has_flags(&self, flags: TokenFlags) -> bool {
        self.flags.contains(flags)
    }

    /// Reset to an EOF token at the same position. Used when a fatal
    /// diagnostic abandons the token being lexed.
    pub fn reset(&mut self) -> &mut Self {
        self.kind = TokenKind::Eof;
        self.spelling = None;
        self
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}:{} (+{})",
            self.kind.name(),
            self.line,
            self.column,
            self.offset
        )
    }
}

/// The token sequence for one parse.
///
/// The parser is the sole owner and writer; the lexer appends through it
/// and the forest refers to tokens by index.
#[derive(Debug, Default, Clone)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) -> u32 {
        let idx = u32::try_from(self.tokens.len()).expect("token list overflow");
        self.tokens.push(token);
        idx
    }

    /// Insert `token` directly after position `idx`.
    ///
    /// Only the template-argument `>>`-split hook uses this; the inserted
    /// token's offset must be `self[idx].offset + 1` so the sequence stays
    /// offset-ordered.
    pub fn insert_after(&mut self, idx: u32, token: Token) {
        debug_assert!(
            token.offset == self.tokens[idx as usize].offset + 1,
            "split token must sit at the next offset"
        );
        self.tokens.insert(idx as usize + 1, token);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn get(&self, idx: u32) -> Option<&Token> {
        self.tokens.get(idx as usize)
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut Token> {
        self.tokens.get_mut(idx as usize)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

impl Index<u32> for TokenList {
    type Output = Token;

    fn index(&self, idx: u32) -> &Token {
        &self.tokens[idx as usize]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_bit_values() {
        assert_eq!(TokenFlags::STARTS_LINE.bits(), 0x01);
        assert_eq!(TokenFlags::SPACE_BEFORE.bits(), 0x02);
        assert_eq!(TokenFlags::ALTERNATE.bits(), 0x04);
        assert_eq!(TokenFlags::PREPROCESS.bits(), 0x08);
        assert_eq!(TokenFlags::SPLITABLE.bits(), 0x10);
    }

    #[test]
    fn spelling_defaults_and_overrides() {
        let interner = StringInterner::new();
        let mut t = Token::dummy(TokenKind::LBrace);
        assert_eq!(t.spelling(&interner), "{");

        // digraph spelling overrides the default
        t.set_spelling(interner.intern("<%"));
        assert_eq!(t.spelling(&interner), "<%");

        t.clear_spelling();
        assert_eq!(t.spelling(&interner), "{");
    }

    #[test]
    fn reset_becomes_eof() {
        let interner = StringInterner::new();
        let mut t = Token::new(TokenKind::Identifier, 12, 3, 4);
        t.set_spelling(interner.intern("abc"));
        t.reset();
        assert_eq!(t.kind, TokenKind::Eof);
        assert_eq!(t.spelling(&interner), "");
        // position survives the reset
        assert_eq!((t.offset, t.line, t.column), (12, 3, 4));
    }

    #[test]
    fn insert_after_keeps_offset_order() {
        let mut list = TokenList::new();
        list.push(Token::new(TokenKind::RShift, 5, 1, 6));
        let mut second = Token::new(TokenKind::Greater, 6, 1, 7);
        second.set_kind(TokenKind::Greater);
        list.insert_after(0, second);

        assert_eq!(list.len(), 2);
        assert!(list[0].offset < list[1].offset);
    }
}
