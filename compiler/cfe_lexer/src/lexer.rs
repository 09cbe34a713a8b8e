//! The C/C++ tokenizer.
//!
//! `Lexer::lex` produces one significant token per call, applying the
//! character-level transforms (trigraphs, line splicing, UCNs) inside its
//! own `peek`/`read` wrappers so the per-character dispatch only ever sees
//! logical characters. Raw string literal content bypasses the wrappers:
//! the standard says no transform applies there.

use crate::ident::{is_valid_ident_char, is_valid_initial_ident_char};
use crate::options::{Features, Options};
use cfe_diagnostic::{Diagnostic, DiagnosticHandler, Severity};
use cfe_ir::{Name, StringInterner, Token, TokenFlags, TokenKind};
use cfe_lexer_core::{CharSource, EOF_CHAR};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

/// Longest raw-string delimiter the standard allows.
const MAX_RAW_DELIMITER_LEN: usize = 16;

/// Decimal digit value, or `u32::MAX` for non-digits (so range checks like
/// `digit_val(c) <= 1` read naturally).
fn digit_val(c: char) -> u32 {
    c.to_digit(10).unwrap_or(u32::MAX)
}

/// The C/C++ lexer.
///
/// Owns the string arena (interner) for spellings, the keyword/identifier
/// table seeded from the dialect keywords, the closing-token stack and the
/// next-token flag accumulator. Borrowed by the parser for the duration of
/// a parse.
pub struct Lexer<'a> {
    options: &'a Options,
    source: CharSource,
    handler: &'a dyn DiagnosticHandler,
    interner: StringInterner,
    /// spelling → kind, seeded with dialect keywords, augmented with every
    /// identifier seen.
    kw_id_table: FxHashMap<Name, TokenKind>,
    /// Scratch spelling buffer.
    buf: String,
    /// Expected closing token for each unmatched `(`, `[`, `{`, `<`.
    closing_tokens: SmallVec<[TokenKind; 16]>,
    /// Flags for the token about to be lexed.
    next_flags: TokenFlags,
}

impl<'a> Lexer<'a> {
    pub fn new(options: &'a Options, source: CharSource, handler: &'a dyn DiagnosticHandler) -> Self {
        let interner = StringInterner::new();
        let mut kw_id_table = FxHashMap::default();
        for (&spelling, &kind) in options.keywords() {
            kw_id_table.insert(interner.intern(spelling), kind);
        }
        Lexer {
            options,
            source,
            handler,
            interner,
            kw_id_table,
            buf: String::new(),
            closing_tokens: SmallVec::new(),
            next_flags: TokenFlags::STARTS_LINE,
        }
    }

    #[must_use]
    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// The string arena holding every interned spelling.
    #[must_use]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Whether the top of the closing-token stack is `kind`.
    #[must_use]
    pub fn next_closing_token_is(&self, kind: TokenKind) -> bool {
        self.closing_tokens.last() == Some(&kind)
    }

    /// Reset the string arena and reseed the keyword table from the dialect
    /// keywords. Call only when no tokens referencing the old arena remain.
    pub fn clear_storage(&mut self) {
        self.interner = StringInterner::new();
        self.kw_id_table.clear();
        for (&spelling, &kind) in self.options.keywords() {
            self.kw_id_table
                .insert(self.interner.intern(spelling), kind);
        }
    }

    /// Lex the next significant token.
    ///
    /// Whitespace and comment tokens are consumed and skipped unless
    /// `KEEP_SPACE` / `KEEP_COMMENTS` ask for them; either way they feed
    /// the `SPACE_BEFORE` / `STARTS_LINE` accumulator for the token that
    /// follows.
    pub fn lex(&mut self) -> Token {
        loop {
            let offset = self.source.offset();
            let line = self.source.line();
            let column = self.source.column();
            let mut t = Token::new(TokenKind::Null, offset, line, column);
            t.flags = self.next_flags;
            self.next_flags
                .remove(TokenFlags::STARTS_LINE | TokenFlags::SPACE_BEFORE);

            self.read_token(&mut t);
            self.update_next_token_flags(&t);

            if self.source.is_bad() {
                self.emit(
                    Severity::FatalError,
                    t.offset,
                    1,
                    t.line,
                    t.column,
                    "input error",
                );
                t.reset();
                return t;
            }

            match t.kind {
                TokenKind::Whitespace => {
                    self.next_flags |= TokenFlags::SPACE_BEFORE;
                    if !self.options.have(Features::KEEP_SPACE) {
                        continue;
                    }
                }
                TokenKind::Comment => {
                    self.next_flags |= TokenFlags::SPACE_BEFORE;
                    if !self.options.have(Features::KEEP_COMMENTS) {
                        continue;
                    }
                }
                _ => {}
            }
            return t;
        }
    }

    /// Maintain the flag accumulator after a token has been read.
    fn update_next_token_flags(&mut self, t: &Token) {
        match t.kind {
            TokenKind::Whitespace => {
                if self.source.last_read() == '\n' {
                    // newline: next token starts a line, directive scope ends
                    self.next_flags |= TokenFlags::STARTS_LINE;
                    self.next_flags.remove(TokenFlags::PREPROCESS);
                }
            }
            TokenKind::Eof => {
                self.next_flags.remove(TokenFlags::PREPROCESS);
                self.next_flags |= TokenFlags::STARTS_LINE;
            }
            _ => {}
        }
    }

    // === Character-level transforms ===

    /// Fold a trigraph at the last-read `?`, leaving the stream collapsed
    /// when a fold happens.
    fn handle_trigraph(&mut self) -> char {
        let c = self.source.last_read();
        if c != '?' {
            return c;
        }
        if self.source.read() == '?' {
            let folded = match self.source.read() {
                '<' => '{',
                '>' => '}',
                '(' => '[',
                ')' => ']',
                '=' => '#',
                '/' => '\\',
                '\'' => '^',
                '!' => '|',
                '-' => '~',
                _ => {
                    self.source.backtrack(2);
                    return c;
                }
            };
            self.source.replace(3, folded);
            folded
        } else {
            self.source.backtrack(1);
            c
        }
    }

    /// Erase a `\` + newline pair ending at the last-read character.
    fn handle_escaped_newline(&mut self) -> bool {
        if self.source.last_read() == '\\' && self.source.peek() == '\n' {
            self.source.read();
            self.source.erase(2);
            return true;
        }
        false
    }

    /// Peek the next logical character. Idempotent: folds and splices
    /// triggered here are committed to the source, so the following
    /// `read()` sees the collapsed form.
    fn peek(&mut self) -> char {
        loop {
            let c = self.source.peek();
            if self.options.have(Features::TRIGRAPHS) && c == '?' {
                self.source.read();
                let folded = self.handle_trigraph();
                if self.handle_escaped_newline() {
                    continue;
                }
                self.source.backtrack(1);
                return folded;
            } else if c == '\\' {
                self.source.read();
                if self.handle_escaped_newline() {
                    continue;
                }
                self.source.backtrack(1);
                return c;
            }
            return c;
        }
    }

    /// Read the next logical character.
    fn read(&mut self) -> char {
        loop {
            let mut c = self.source.read();
            if self.options.have(Features::TRIGRAPHS) && c == '?' {
                c = self.handle_trigraph();
            }
            if !self.handle_escaped_newline() {
                return c;
            }
        }
    }

    /// Parse a universal character name; the backslash has already been
    /// consumed and the stream sits at `u` or `U`.
    ///
    /// On success the whole escape is collapsed to the named code point.
    /// On failure a diagnostic is emitted and [`EOF_CHAR`] returned; for the
    /// too-few-digits case the `u`/`U` and digits are unread so the caller
    /// can retry or report.
    fn ucn(&mut self) -> char {
        let start_offset = self.source.offset();
        let start_line = self.source.line();
        let start_column = self.source.column();

        let n: usize = match self.read() {
            'u' => 4,
            'U' => 8,
            _ => {
                self.source.backtrack(1);
                return EOF_CHAR;
            }
        };

        let mut value: u32 = 0;
        let mut i = 0usize;
        while i < n {
            let Some(digit) = self.peek().to_digit(16) else {
                break;
            };
            self.read();
            value = (value << 4) | digit;
            i += 1;
        }

        let length = self.source.offset().saturating_sub(start_offset);
        if i < n {
            self.emit(
                Severity::Error,
                start_offset,
                length,
                start_line,
                start_column,
                "not a UCN: insufficient digits given",
            );
            self.source.backtrack(i + 1);
            EOF_CHAR
        } else if (0xd800..=0xdfff).contains(&value) {
            self.emit(
                Severity::Error,
                start_offset,
                length,
                start_line,
                start_column,
                "illegal UCN: surrogate code point",
            );
            EOF_CHAR
        } else if value > 0x1fffff {
            self.emit(
                Severity::Error,
                start_offset,
                length,
                start_line,
                start_column,
                "not a UCN: code point out of range 0 - 0x1fffff",
            );
            EOF_CHAR
        } else {
            match char::from_u32(value) {
                Some(c) => {
                    self.source.replace(n + 2, c);
                    c
                }
                None => {
                    // 0x110000..=0x1fffff: legal per the grammar, not
                    // representable as a scalar value
                    self.emit(
                        Severity::Error,
                        start_offset,
                        length,
                        start_line,
                        start_column,
                        "not a UCN: code point not representable",
                    );
                    EOF_CHAR
                }
            }
        }
    }

    // === Diagnostics ===

    fn emit(
        &self,
        severity: Severity,
        offset: u32,
        length: u32,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) {
        self.handler
            .handle(Diagnostic::new(severity, offset, length, line, column, message));
    }

    /// Emit spanning from the token start to the current position.
    fn emit_span(&mut self, severity: Severity, t: &Token, message: impl Into<String>) {
        let length = self.source.offset().saturating_sub(t.offset).max(1);
        self.emit(severity, t.offset, length, t.line, t.column, message);
    }

    // === Closing-token stack ===

    fn push_closing_token(&mut self, kind: TokenKind) {
        self.closing_tokens.push(kind);
    }

    /// Pop the stack if its top matches `kind`. A non-`>` closer first pops
    /// every pending `>`: `<` openers are speculative and an intervening
    /// real closer proves they were comparisons, not brackets.
    fn pop_closing_token_if(&mut self, kind: TokenKind) -> bool {
        if self.closing_tokens.is_empty() {
            return false;
        }
        if kind != TokenKind::Greater {
            while self.closing_tokens.last() == Some(&TokenKind::Greater) {
                self.closing_tokens.pop();
            }
        }
        if self.closing_tokens.last() == Some(&kind) {
            self.closing_tokens.pop();
            true
        } else {
            false
        }
    }

    /// Mark a `>>`/`>=`/`>>=` splittable when a template-argument list may
    /// be open.
    fn mark_splittable(&mut self, t: &mut Token) {
        if self.next_closing_token_is(TokenKind::Greater) && self.options.std_cxx11() {
            t.add_flags(TokenFlags::SPLITABLE);
        }
    }

    // === Token-level dispatch ===

    fn set_kind(&self, t: &mut Token, kind: TokenKind) {
        t.set_kind(kind);
        t.clear_spelling();
    }

    fn read_token(&mut self, t: &mut Token) {
        let ch = self.read();

        if ch == EOF_CHAR {
            self.set_kind(t, TokenKind::Eof);
            return;
        }

        match ch {
            '#' => {
                if self.peek() == '#' {
                    self.set_kind(t, TokenKind::HashHash);
                    self.read();
                } else {
                    self.set_kind(t, TokenKind::Hash);
                    if !self.options.have(Features::NO_PP_DIRECTIVES)
                        && t.has_flags(TokenFlags::STARTS_LINE)
                    {
                        self.pp_directive(t);
                    }
                }
            }
            '/' => match self.peek() {
                '=' => {
                    self.set_kind(t, TokenKind::SlashEqual);
                    self.read();
                }
                '*' => self.comment(t),
                '/' => {
                    if self.options.have(Features::LINE_COMMENTS) {
                        self.comment(t);
                    } else {
                        self.set_kind(t, TokenKind::Slash);
                    }
                }
                _ => self.set_kind(t, TokenKind::Slash),
            },
            '.' => {
                if self.options.lang_cxx() && self.peek() == '*' {
                    self.set_kind(t, TokenKind::DotStar);
                    self.read();
                } else if self.peek().is_ascii_digit() {
                    self.numeric_literal(t);
                } else if self.peek() == '.' {
                    self.read(); // eat 2nd '.'
                    if self.peek() == '.' {
                        self.set_kind(t, TokenKind::Ellipsis);
                        self.read();
                    } else {
                        self.source.backtrack(1); // spit 2nd '.' back out
                        self.set_kind(t, TokenKind::Dot);
                    }
                } else {
                    self.set_kind(t, TokenKind::Dot);
                }
            }
            '<' => self.less_than(t),
            '>' => match self.peek() {
                '>' => {
                    self.read(); // consume 2nd '>'
                    if self.peek() == '=' {
                        self.set_kind(t, TokenKind::RShiftEqual);
                        self.read();
                    } else {
                        self.set_kind(t, TokenKind::RShift);
                    }
                    self.mark_splittable(t);
                }
                '=' => {
                    self.set_kind(t, TokenKind::GreaterEqual);
                    self.mark_splittable(t);
                    self.read();
                }
                _ => {
                    self.set_kind(t, TokenKind::Greater);
                    self.pop_closing_token_if(TokenKind::Greater);
                }
            },
            '+' => match self.peek() {
                '=' => {
                    self.set_kind(t, TokenKind::PlusEqual);
                    self.read();
                }
                '+' => {
                    self.set_kind(t, TokenKind::PlusPlus);
                    self.read();
                }
                _ => self.set_kind(t, TokenKind::Plus),
            },
            '-' => match self.peek() {
                '=' => {
                    self.set_kind(t, TokenKind::MinusEqual);
                    self.read();
                }
                '-' => {
                    self.set_kind(t, TokenKind::MinusMinus);
                    self.read();
                }
                '>' => {
                    self.read();
                    if self.options.lang_cxx() && self.peek() == '*' {
                        self.set_kind(t, TokenKind::ArrowStar);
                        self.read();
                    } else {
                        self.set_kind(t, TokenKind::Arrow);
                    }
                }
                _ => self.set_kind(t, TokenKind::Minus),
            },
            '*' => {
                if self.peek() == '=' {
                    self.set_kind(t, TokenKind::StarEqual);
                    self.read();
                } else {
                    self.set_kind(t, TokenKind::Star);
                }
            }
            '%' => self.percent(t),
            '&' => match self.peek() {
                '=' => {
                    self.set_kind(t, TokenKind::AmpEqual);
                    self.read();
                }
                '&' => {
                    self.set_kind(t, TokenKind::AmpAmp);
                    self.read();
                }
                _ => self.set_kind(t, TokenKind::Amp),
            },
            '|' => match self.peek() {
                '=' => {
                    self.set_kind(t, TokenKind::PipeEqual);
                    self.read();
                }
                '|' => {
                    self.set_kind(t, TokenKind::PipePipe);
                    self.read();
                }
                _ => self.set_kind(t, TokenKind::Pipe),
            },
            '^' => {
                if self.peek() == '=' {
                    self.set_kind(t, TokenKind::CaretEqual);
                    self.read();
                } else {
                    self.set_kind(t, TokenKind::Caret);
                }
            }
            '=' => {
                if self.peek() == '=' {
                    self.set_kind(t, TokenKind::EqualEqual);
                    self.read();
                } else {
                    self.set_kind(t, TokenKind::Equal);
                }
            }
            '!' => {
                if self.peek() == '=' {
                    self.set_kind(t, TokenKind::ExclaimEqual);
                    self.read();
                } else {
                    self.set_kind(t, TokenKind::Exclaim);
                }
            }
            ':' => match self.peek() {
                '>' => {
                    // ":>" digraph => ']'
                    if self.options.have(Features::DIGRAPHS) {
                        t.add_flags(TokenFlags::ALTERNATE);
                        t.set_kind(TokenKind::RSquare);
                        t.set_spelling(self.interner.intern(":>"));
                        self.pop_closing_token_if(TokenKind::RSquare);
                        self.read();
                    } else {
                        self.set_kind(t, TokenKind::Colon);
                    }
                }
                ':' if self.options.lang_cxx() => {
                    self.set_kind(t, TokenKind::ColonColon);
                    self.read();
                }
                _ => self.set_kind(t, TokenKind::Colon),
            },
            'u' => self.prefix_u(t),
            'U' => self.prefix_upper_u(t),
            'L' => self.prefix_l(t),
            'R' => {
                if self.peek() == '"' && self.options.std_cxx11() {
                    self.read();
                    t.set_kind(TokenKind::StrLiteral);
                    self.raw_string_literal(t);
                } else {
                    self.identifier_or_keyword(t);
                }
            }
            '"' => {
                t.set_kind(TokenKind::StrLiteral);
                self.string_or_char_literal(t);
            }
            '\'' => {
                t.set_kind(TokenKind::CharLiteral);
                self.string_or_char_literal(t);
            }
            ';' => self.set_kind(t, TokenKind::Semi),
            ',' => self.set_kind(t, TokenKind::Comma),
            '~' => self.set_kind(t, TokenKind::Tilde),
            '?' => self.set_kind(t, TokenKind::Question),
            '_' => self.identifier_or_keyword(t),
            '{' => {
                self.set_kind(t, TokenKind::LBrace);
                self.push_closing_token(TokenKind::RBrace);
            }
            '}' => {
                self.set_kind(t, TokenKind::RBrace);
                self.pop_closing_token_if(TokenKind::RBrace);
            }
            '(' => {
                self.set_kind(t, TokenKind::LParen);
                self.push_closing_token(TokenKind::RParen);
            }
            ')' => {
                self.set_kind(t, TokenKind::RParen);
                self.pop_closing_token_if(TokenKind::RParen);
            }
            '[' => {
                self.set_kind(t, TokenKind::LSquare);
                self.push_closing_token(TokenKind::RSquare);
            }
            ']' => {
                self.set_kind(t, TokenKind::RSquare);
                self.pop_closing_token_if(TokenKind::RSquare);
            }
            '$' => {
                if self.options.have(Features::IDENTIFIER_DOLLARS) {
                    self.identifier_or_keyword(t);
                } else {
                    self.set_kind(t, TokenKind::Dollar);
                }
            }
            '\\' => {
                // possible UCN as the start of an identifier
                if matches!(self.peek(), 'u' | 'U') && self.options.have(Features::UCNS) {
                    let c = self.ucn();
                    if c != EOF_CHAR
                        && is_valid_initial_ident_char(
                            c,
                            self.options.have(Features::IDENTIFIER_DOLLARS),
                        )
                    {
                        self.identifier_or_keyword(t);
                    }
                }
            }
            c if c.is_whitespace() => self.whitespace(t),
            c if c.is_ascii_digit() => self.numeric_literal(t),
            c if is_valid_initial_ident_char(c, self.options.have(Features::IDENTIFIER_DOLLARS)) => {
                self.identifier_or_keyword(t)
            }
            _ => {} // leave as Null
        }
    }

    /// `<`, `<<`, `<<=`, `<=`, and the `<%` / `<:` digraphs with the C++11
    /// `<::` carve-out.
    fn less_than(&mut self, t: &mut Token) {
        match self.peek() {
            '<' => {
                self.read(); // consume 2nd '<'
                if self.peek() == '=' {
                    self.set_kind(t, TokenKind::LShiftEqual);
                    self.read();
                } else {
                    self.set_kind(t, TokenKind::LShift);
                }
            }
            '=' => {
                self.set_kind(t, TokenKind::LessEqual);
                self.read();
            }
            '%' => {
                // "<%" digraph => '{'
                if self.options.have(Features::DIGRAPHS) {
                    t.add_flags(TokenFlags::ALTERNATE);
                    t.set_kind(TokenKind::LBrace);
                    t.set_spelling(self.interner.intern("<%"));
                    self.push_closing_token(TokenKind::RBrace);
                    self.read();
                } else {
                    self.set_kind(t, TokenKind::Less);
                    self.push_closing_token(TokenKind::Greater);
                }
            }
            ':' => {
                // "<:" digraph => '['
                if !self.options.have(Features::DIGRAPHS) {
                    self.set_kind(t, TokenKind::Less);
                    self.push_closing_token(TokenKind::Greater);
                    return;
                }
                self.read();

                // C++11: don't misinterpret a sequence like
                // std::set<::std::string> as std::set[:std::string>
                if self.options.std_cxx11() && self.peek() == ':' {
                    self.read();
                    match self.peek() {
                        ':' | '>' => {
                            // genuinely "<:" — treat as '['
                            self.source.backtrack(1);
                        }
                        _ => {
                            self.source.backtrack(2);
                            self.set_kind(t, TokenKind::Less);
                            self.push_closing_token(TokenKind::Greater);
                        }
                    }
                }

                if t.kind == TokenKind::Null {
                    t.add_flags(TokenFlags::ALTERNATE);
                    t.set_kind(TokenKind::LSquare);
                    t.set_spelling(self.interner.intern("<:"));
                    self.push_closing_token(TokenKind::RSquare);
                }
            }
            _ => {
                self.set_kind(t, TokenKind::Less);
                self.push_closing_token(TokenKind::Greater);
            }
        }
    }

    /// `%`, `%=`, and the `%>` / `%:` / `%:%:` digraphs.
    fn percent(&mut self, t: &mut Token) {
        match self.peek() {
            '=' => {
                self.set_kind(t, TokenKind::PercentEqual);
                self.read();
            }
            '>' => {
                // "%>" digraph => '}'
                if self.options.have(Features::DIGRAPHS) {
                    t.add_flags(TokenFlags::ALTERNATE);
                    t.set_kind(TokenKind::RBrace);
                    t.set_spelling(self.interner.intern("%>"));
                    self.pop_closing_token_if(TokenKind::RBrace);
                    self.read();
                } else {
                    self.set_kind(t, TokenKind::Percent);
                }
            }
            ':' => {
                // "%:" digraph => '#'
                if !self.options.have(Features::DIGRAPHS) {
                    self.set_kind(t, TokenKind::Percent);
                    return;
                }
                t.add_flags(TokenFlags::ALTERNATE);
                self.read();

                if self.peek() == '%' {
                    self.read();
                    if self.peek() == ':' {
                        // "%:%:" => "##"
                        t.set_kind(TokenKind::HashHash);
                        t.set_spelling(self.interner.intern("%:%:"));
                        self.read();
                        return;
                    }
                    self.source.backtrack(1);
                }

                t.set_kind(TokenKind::Hash);
                t.set_spelling(self.interner.intern("%:"));

                if !self.options.have(Features::NO_PP_DIRECTIVES)
                    && t.has_flags(TokenFlags::STARTS_LINE)
                {
                    self.pp_directive(t);
                }
            }
            _ => self.set_kind(t, TokenKind::Percent),
        }
    }

    /// `u`-prefixed literals: `u8'`, `u8"`, `u8R"`, `uR"`, `u"`, `u'`, or an
    /// identifier starting with `u`.
    fn prefix_u(&mut self, t: &mut Token) {
        let c11_or_cxx11 = self.options.std_c11() || self.options.std_cxx11();
        match self.peek() {
            '8' => {
                self.read();
                match self.peek() {
                    '\'' => {
                        if self.options.have(Features::UTF8_CHAR_LITERALS) {
                            self.read();
                            t.set_kind(TokenKind::U8CharLiteral);
                            self.string_or_char_literal(t);
                        } else {
                            self.source.backtrack(1);
                            self.identifier_or_keyword(t);
                        }
                    }
                    '"' => {
                        if c11_or_cxx11 {
                            self.read();
                            t.set_kind(TokenKind::U8StrLiteral);
                            self.string_or_char_literal(t);
                        } else {
                            self.source.backtrack(1);
                            self.identifier_or_keyword(t);
                        }
                    }
                    'R' => {
                        self.read();
                        if self.peek() == '"' && self.options.std_cxx11() {
                            self.read();
                            t.set_kind(TokenKind::U8StrLiteral);
                            self.raw_string_literal(t);
                        } else {
                            self.source.backtrack(2);
                            self.identifier_or_keyword(t);
                        }
                    }
                    _ => {
                        self.source.backtrack(1);
                        self.identifier_or_keyword(t);
                    }
                }
            }
            'R' => {
                self.read();
                if self.peek() == '"' && self.options.std_cxx11() {
                    self.read();
                    t.set_kind(TokenKind::U16StrLiteral);
                    self.raw_string_literal(t);
                } else {
                    self.source.backtrack(1);
                    self.identifier_or_keyword(t);
                }
            }
            '"' => {
                if c11_or_cxx11 {
                    self.read();
                    t.set_kind(TokenKind::U16StrLiteral);
                    self.string_or_char_literal(t);
                } else {
                    self.identifier_or_keyword(t);
                }
            }
            '\'' => {
                if c11_or_cxx11 {
                    self.read();
                    t.set_kind(TokenKind::U16CharLiteral);
                    self.string_or_char_literal(t);
                } else {
                    self.identifier_or_keyword(t);
                }
            }
            _ => self.identifier_or_keyword(t),
        }
    }

    /// `U`-prefixed literals or an identifier starting with `U`.
    fn prefix_upper_u(&mut self, t: &mut Token) {
        let c11_or_cxx11 = self.options.std_c11() || self.options.std_cxx11();
        match self.peek() {
            '"' => {
                if c11_or_cxx11 {
                    self.read();
                    t.set_kind(TokenKind::U32StrLiteral);
                    self.string_or_char_literal(t);
                } else {
                    self.identifier_or_keyword(t);
                }
            }
            '\'' => {
                if c11_or_cxx11 {
                    self.read();
                    t.set_kind(TokenKind::U32CharLiteral);
                    self.string_or_char_literal(t);
                } else {
                    self.identifier_or_keyword(t);
                }
            }
            'R' => {
                self.read();
                if self.peek() == '"' && self.options.std_cxx11() {
                    self.read();
                    t.set_kind(TokenKind::U32StrLiteral);
                    self.raw_string_literal(t);
                } else {
                    self.source.backtrack(1);
                    self.identifier_or_keyword(t);
                }
            }
            _ => self.identifier_or_keyword(t),
        }
    }

    /// `L`-prefixed wide literals or an identifier starting with `L`.
    fn prefix_l(&mut self, t: &mut Token) {
        match self.peek() {
            '"' => {
                self.read();
                t.set_kind(TokenKind::WstrLiteral);
                self.string_or_char_literal(t);
            }
            '\'' => {
                self.read();
                t.set_kind(TokenKind::WcharLiteral);
                self.string_or_char_literal(t);
            }
            'R' => {
                self.read();
                if self.peek() == '"' && self.options.std_cxx11() {
                    self.read();
                    t.set_kind(TokenKind::WstrLiteral);
                    self.raw_string_literal(t);
                } else {
                    self.source.backtrack(1);
                    self.identifier_or_keyword(t);
                }
            }
            _ => self.identifier_or_keyword(t),
        }
    }

    // === Token scanners ===

    /// Whitespace run. A newline is always a token of its own so line
    /// boundaries stay observable downstream.
    fn whitespace(&mut self, t: &mut Token) {
        t.set_kind(TokenKind::Whitespace);

        if self.source.last_read() == '\n' {
            t.set_spelling(self.interner.intern("\n"));
            return;
        }

        if self.options.have(Features::KEEP_SPACE) {
            self.buf.clear();
            self.buf.push(self.source.last_read());
            while self.peek().is_whitespace() && self.peek() != '\n' {
                let c = self.read();
                self.buf.push(c);
            }
            let name = self.store();
            t.set_spelling(name);
        } else {
            t.clear_spelling(); // default " "
            while self.peek().is_whitespace() && self.peek() != '\n' {
                self.read();
            }
        }
    }

    fn numeric_literal(&mut self, t: &mut Token) {
        self.buf.clear();
        self.buf.push(self.source.last_read());

        let mut octal = false;

        match self.source.last_read() {
            '0' => match self.peek() {
                'b' | 'B' => {
                    if self.options.have(Features::BINARY_LITERALS) {
                        self.read();
                        if digit_val(self.peek()) <= 1 {
                            self.binary_literal(t);
                            return;
                        }
                        // "0b" with no binary digit: plain zero, 'b' starts
                        // the next token
                        self.source.backtrack(1);
                        octal = true;
                    } else {
                        octal = true;
                    }
                }
                'x' | 'X' => {
                    self.read();
                    if self.peek().is_ascii_hexdigit() {
                        self.hexadecimal_literal(t);
                        return;
                    }
                    self.source.backtrack(1);
                    octal = true;
                }
                '.' => {
                    self.floating_literal(t, false);
                    return;
                }
                _ => octal = true,
            },
            '.' => {
                self.floating_literal(t, false);
                return;
            }
            _ => {} // digit, already checked by read_token()
        }

        loop {
            match self.peek() {
                '.' => {
                    self.read();
                    self.buf.push('.');
                    self.floating_literal(t, false);
                    return;
                }
                'E' | 'e' => {
                    let c = self.read();
                    self.buf.push(c);
                    let sign = self.peek();
                    if sign == '+' || sign == '-' {
                        self.read();
                        self.buf.push(sign);
                    }
                    self.floating_literal(t, true);
                    return;
                }
                '\'' => {
                    // grouping separator
                    self.read();
                    if self.peek().is_ascii_digit() {
                        self.buf.push('\'');
                    } else {
                        self.source.backtrack(1);
                    }
                }
                _ => {}
            }

            let c = self.peek();
            if let Some(v) = c.to_digit(10) {
                octal = octal && v < 8;
                self.read();
                self.buf.push(c);
            } else {
                break;
            }
        }

        self.check_for_integer_suffix();
        t.set_kind(if octal {
            TokenKind::OctIntLiteral
        } else {
            TokenKind::DecIntLiteral
        });
        let name = self.store();
        t.set_spelling(name);
    }

    fn binary_literal(&mut self, t: &mut Token) {
        self.buf.push(self.source.last_read()); // 'b' or 'B'

        loop {
            let c = self.peek();
            if digit_val(c) <= 1 {
                self.read();
                self.buf.push(c);
            } else if c == '\'' {
                self.read();
                let next = self.peek();
                if next == '0' || next == '1' {
                    self.buf.push('\'');
                } else {
                    self.source.backtrack(1);
                    break;
                }
            } else {
                break;
            }
        }

        self.check_for_integer_suffix();
        t.set_kind(TokenKind::BinIntLiteral);
        let name = self.store();
        t.set_spelling(name);
    }

    fn hexadecimal_literal(&mut self, t: &mut Token) {
        self.buf.push(self.source.last_read()); // 'x' or 'X'

        while self.peek().is_ascii_hexdigit() {
            let c = self.read();
            self.buf.push(c);
            if self.peek() == '\'' {
                // grouping separator
                self.read();
                if self.peek().is_ascii_hexdigit() {
                    self.buf.push('\'');
                } else {
                    self.source.backtrack(1);
                }
            }
        }

        self.check_for_integer_suffix();
        t.set_kind(TokenKind::HexIntLiteral);
        let name = self.store();
        t.set_spelling(name);
    }

    fn check_for_integer_suffix(&mut self) {
        match self.peek() {
            'u' | 'U' => {
                let c = self.read();
                self.buf.push(c);
                if self.peek().to_ascii_lowercase() == 'l' {
                    let l = self.read();
                    self.buf.push(l);
                    if self.options.have(Features::LONG_LONG) && self.peek() == l {
                        let c = self.read();
                        self.buf.push(c); // LL or ll
                    }
                }
            }
            'l' | 'L' => {
                let l = self.read();
                self.buf.push(l);
                if self.options.have(Features::LONG_LONG) && self.peek() == l {
                    let c = self.read();
                    self.buf.push(c); // LL or ll
                }
                if self.peek().to_ascii_lowercase() == 'u' {
                    let c = self.read();
                    self.buf.push(c);
                }
            }
            _ => {}
        }
    }

    fn floating_literal(&mut self, t: &mut Token, mut exp_part: bool) {
        let mut int_part = !exp_part && self.source.last_read() != '.';

        loop {
            let c = self.peek();
            match c {
                '.' => {
                    if !int_part {
                        break;
                    }
                    self.read();
                    self.buf.push('.');
                    int_part = false;
                }
                'E' | 'e' => {
                    if exp_part {
                        break;
                    }
                    self.read();
                    self.buf.push(c);
                    exp_part = true;
                    let sign = self.peek();
                    if sign == '+' || sign == '-' {
                        self.read();
                        self.buf.push(sign);
                    }
                }
                _ => {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    self.read();
                    self.buf.push(c);
                }
            }
        }

        match self.peek() {
            'F' | 'f' | 'L' | 'l' => {
                let c = self.read();
                self.buf.push(c); // consume suffix
            }
            _ => {}
        }

        t.set_kind(TokenKind::FloatLiteral);
        let name = self.store();
        t.set_spelling(name);
    }

    /// Ordinary (non-raw) string or character literal body. The opening
    /// delimiter has been consumed and the kind set by the caller; the
    /// stored spelling is the cooked content without delimiters.
    fn string_or_char_literal(&mut self, t: &mut Token) {
        self.buf.clear();
        let delimiter = self.source.last_read();

        loop {
            let mut c = self.read();
            if c == delimiter {
                break;
            }
            if c == EOF_CHAR || c == '\n' {
                let what = if delimiter == '"' { "string" } else { "character" };
                self.emit_span(Severity::Error, t, format!("unterminated {what} literal"));
                break;
            }
            if c != '\\' {
                self.buf.push(c);
                continue;
            }

            c = self.read();
            match c {
                '\'' | '"' | '?' | '\\' => {}
                'a' => c = '\x07',
                'b' => c = '\x08',
                'f' => c = '\x0c',
                'n' => c = '\n',
                'r' => c = '\r',
                't' => c = '\t',
                'v' => c = '\x0b',
                'x' => {
                    if self.peek().is_ascii_hexdigit() {
                        c = self.hex_escape_sequence();
                    }
                }
                'u' | 'U' => {
                    if self.options.have(Features::UCNS) {
                        self.source.backtrack(1);
                        c = self.ucn();
                        if c == EOF_CHAR {
                            // malformed UCN already reported; keep lexing
                            continue;
                        }
                    }
                }
                _ => {
                    if digit_val(c) < 8 {
                        // up to 3-digit octal character value
                        self.source.backtrack(1);
                        c = self.octal_escape_sequence();
                    }
                    // else: unrecognised escape, take the character itself
                }
            }
            self.buf.push(c);
        }

        let name = self.store();
        t.set_spelling(name);
    }

    fn octal_escape_sequence(&mut self) -> char {
        let mut value: u32 = 0;
        for _ in 0..3 {
            let d = digit_val(self.peek());
            if d < 8 {
                self.read();
                value = (value << 3) | d;
            } else {
                break;
            }
        }
        char::from_u32(value).unwrap_or(EOF_CHAR)
    }

    fn hex_escape_sequence(&mut self) -> char {
        let mut value: u32 = 0;
        for _ in 0..2 {
            let Some(d) = self.peek().to_digit(16) else {
                break;
            };
            self.read();
            value = (value << 4) | d;
        }
        char::from_u32(value).unwrap_or(EOF_CHAR)
    }

    /// Raw string literal: optional delimiter, `(`, verbatim content,
    /// `)delim"`. Trigraphs and line splices are not applied inside the
    /// content, so it is read from the underlying source directly.
    fn raw_string_literal(&mut self, t: &mut Token) {
        let start_offset = self.source.offset();
        let start_line = self.source.line();
        let start_column = self.source.column();

        let mut delimiter: SmallVec<[char; MAX_RAW_DELIMITER_LEN]> = SmallVec::new();

        loop {
            let c = self.read();
            match c {
                EOF_CHAR => {
                    self.emit_span(
                        Severity::Error,
                        t,
                        "end of file in raw string literal delimiter",
                    );
                    t.reset();
                    return;
                }
                '(' => break,
                '\\' | ')' => {
                    self.emit_span(
                        Severity::Error,
                        t,
                        format!("illegal character '{c}' in raw string literal delimiter"),
                    );
                }
                c if c.is_whitespace() => {
                    self.emit_span(
                        Severity::Error,
                        t,
                        "illegal whitespace character in raw string literal delimiter",
                    );
                }
                _ => {
                    if delimiter.len() >= MAX_RAW_DELIMITER_LEN {
                        let len = self.source.offset().saturating_sub(start_offset);
                        self.emit(
                            Severity::FatalError,
                            start_offset,
                            len,
                            start_line,
                            start_column,
                            format!(
                                "raw string literal delimiter longer than maximum ({MAX_RAW_DELIMITER_LEN})"
                            ),
                        );
                        t.reset();
                        return;
                    }
                    delimiter.push(c);
                }
            }
        }

        trace!(delimiter = %delimiter.iter().collect::<String>(), "raw string literal");

        self.buf.clear();
        // Progress through `)delim"`: None = no candidate terminator open.
        let mut matched: Option<usize> = None;
        let mut tentative_len = 0;

        loop {
            let c = self.source.read(); // no trigraphs, no splicing
            if c == EOF_CHAR {
                self.emit_span(Severity::Error, t, "unterminated raw string literal");
                break;
            }
            if c == '"' && matched == Some(delimiter.len()) {
                self.buf.truncate(tentative_len);
                break;
            }
            if c == ')' {
                tentative_len = self.buf.len();
                matched = Some(0);
            } else if let Some(k) = matched {
                matched = if k < delimiter.len() && delimiter[k] == c {
                    Some(k + 1)
                } else {
                    None
                };
            }
            self.buf.push(c);
        }

        let name = self.store();
        t.set_spelling(name);
    }

    fn identifier_or_keyword(&mut self, t: &mut Token) {
        let dollars = self.options.have(Features::IDENTIFIER_DOLLARS);
        self.buf.clear();
        self.buf.push(self.source.last_read());

        loop {
            let c = self.read();
            if c == '\\'
                && self.peek().to_ascii_lowercase() == 'u'
                && self.options.have(Features::UCNS)
            {
                let u = self.ucn();
                if u == EOF_CHAR {
                    break; // not a UCN; error already reported
                }
                if is_valid_ident_char(u, dollars) {
                    self.buf.push(u);
                } else {
                    // valid UCN but not a legal identifier character
                    self.source.backtrack(1);
                    break;
                }
            } else if is_valid_ident_char(c, dollars) {
                self.buf.push(c);
            } else {
                self.source.backtrack(1);
                break;
            }
        }

        let name = self.interner.intern(&self.buf);
        if let Some(&kind) = self.kw_id_table.get(&name) {
            t.set_kind(kind);
            t.set_spelling(name);
            if kind.is_punctuation() {
                // one of the alternative tokens "and", "bitand", "or", ...
                t.add_flags(TokenFlags::ALTERNATE);
            }
        } else {
            t.set_kind(TokenKind::Identifier);
            t.set_spelling(name);
            self.kw_id_table.insert(name, TokenKind::Identifier);
        }
    }

    fn comment(&mut self, t: &mut Token) {
        t.set_kind(TokenKind::Comment);
        let keep = self.options.have(Features::KEEP_COMMENTS);

        if keep {
            self.buf.clear();
            self.buf.push(self.source.last_read());
        }
        let second = self.read(); // '*' or '/'
        if keep {
            self.buf.push(second);
        }
        let is_line = second == '/';

        if is_line {
            while self.peek() != '\n' && self.peek() != EOF_CHAR {
                let c = self.read();
                if keep {
                    self.buf.push(c);
                }
            }
        } else {
            loop {
                let c = self.read();
                if c == EOF_CHAR {
                    self.emit_span(
                        Severity::Error,
                        t,
                        "unexpected end of file encountered in comment",
                    );
                    break;
                }
                if keep {
                    self.buf.push(c);
                }
                if c == '*' && self.peek() == '/' {
                    self.read();
                    if keep {
                        self.buf.push('/');
                    }
                    break;
                }
            }
        }

        if keep {
            let name = self.store();
            t.set_spelling(name);
        }
    }

    /// Preprocessor-directive recognition after a line-starting `#`/`%:`.
    ///
    /// A directive name matches at most one directive. Unknown names warn,
    /// the spelling is rolled back, and the token becomes `PP_NULL`.
    fn pp_directive(&mut self, t: &mut Token) {
        self.buf.clear();
        loop {
            let c = self.peek();
            if c.is_ascii_alphabetic() || c == '_' {
                self.read();
                self.buf.push(c);
            } else {
                break;
            }
        }

        let kind = match self.buf.as_str() {
            "define" => Some(TokenKind::PpDefine),
            "undef" => Some(TokenKind::PpUndef),
            "if" => Some(TokenKind::PpIf),
            "ifdef" => Some(TokenKind::PpIfdef),
            "ifndef" => Some(TokenKind::PpIfndef),
            "elif" => Some(TokenKind::PpElif),
            "else" => Some(TokenKind::PpElse),
            "endif" => Some(TokenKind::PpEndif),
            "line" => Some(TokenKind::PpLine),
            "error" => Some(TokenKind::PpError),
            "warning" => Some(TokenKind::PpWarning),
            "pragma" => Some(TokenKind::PpPragma),
            "include" => Some(TokenKind::PpInclude),
            "include_next" => Some(TokenKind::PpIncludeNext),
            _ => None,
        };

        match kind {
            Some(k) => {
                trace!(directive = %self.buf, "preprocessor directive");
                t.set_kind(k);
            }
            None => {
                self.emit_span(
                    Severity::Warning,
                    t,
                    format!("unrecognised preprocessor directive \"#{}\"", self.buf),
                );
                self.source.backtrack(self.buf.chars().count());
                t.set_kind(TokenKind::PpNull);
            }
        }

        t.add_flags(TokenFlags::PREPROCESS);
        t.clear_spelling(); // directive kinds spell themselves
        self.next_flags |= TokenFlags::PREPROCESS;
    }

    /// Intern the scratch buffer.
    fn store(&mut self) -> Name {
        self.interner.intern(&self.buf)
    }
}
