//! The C/C++ token-kind catalogue.
//!
//! A closed `#[repr(u8)]` enumeration partitioned into ordered ranges so
//! membership can be tested by a pair of comparisons:
//!
//! | Range                      | Category                          |
//! |----------------------------|-----------------------------------|
//! | `LParen..=ColonColon`      | punctuators (52)                  |
//! | `KwAlignas..=KwWhile`      | C/C++ keywords (80)               |
//! | `Identifier..=PpNumber`    | multi-spelling tokens             |
//! | `PpInclude..=PpPragma`     | preprocessor directives           |
//!
//! The ordering is load-bearing: every classification predicate below is
//! defined purely by range membership, so reordering variants breaks them.
//! The discriminant tests in this module pin the anchors down.

/// C/C++ token kinds, in catalogue order.
///
/// Each kind has a stable machine [`name()`](TokenKind::name) and a
/// [`default_spelling()`](TokenKind::default_spelling); kinds in the
/// multi-spelling range carry their actual spelling on the token instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    Null = 0,
    Eof,

    // === Punctuators ===
    LParen,
    RParen,
    LSquare,
    RSquare,
    LBrace,
    RBrace,
    Dollar,
    Dot,
    Ellipsis,
    Amp,
    AmpAmp,
    AmpEqual,
    Star,
    StarEqual,
    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    Arrow,
    MinusMinus,
    MinusEqual,
    Tilde,
    Exclaim,
    ExclaimEqual,
    Slash,
    SlashEqual,
    Percent,
    PercentEqual,
    Less,
    LessEqual,
    LShift,
    LShiftEqual,
    Greater,
    GreaterEqual,
    RShift,
    RShiftEqual,
    Caret,
    CaretEqual,
    Pipe,
    PipePipe,
    PipeEqual,
    Question,
    Colon,
    Semi,
    Equal,
    EqualEqual,
    Comma,
    Hash,
    HashHash,
    DotStar,
    ArrowStar,
    ColonColon,

    // === Keywords ===
    KwAlignas,
    KwAlignof,
    KwAsm,
    KwAtomic, // C11 _Atomic
    KwAuto,
    KwBool,
    KwBreak,
    KwCase,
    KwCatch,
    KwChar,
    KwChar16T,
    KwChar32T,
    KwClass,
    KwComplex, // C99 _Complex
    KwConst,
    KwConstCast,
    KwConstexpr,
    KwContinue,
    KwDecltype,
    KwDefault,
    KwDelete,
    KwDo,
    KwDouble,
    KwDynamicCast,
    KwElse,
    KwEnum,
    KwExplicit,
    KwExport,
    KwExtern,
    KwFalse,
    KwFloat,
    KwFor,
    KwFriend,
    KwFunc, // __func__
    KwGeneric, // C11 _Generic
    KwGoto,
    KwIf,
    KwImaginary, // C99 _Imaginary
    KwInline,
    KwInt,
    KwLong,
    KwMutable,
    KwNew,
    KwNamespace,
    KwNoexcept,
    KwNoreturn, // C11 _Noreturn
    KwNullptr,
    KwOperator,
    KwPrivate,
    KwProtected,
    KwPublic,
    KwRegister,
    KwReinterpretCast,
    KwRestrict,
    KwReturn,
    KwShort,
    KwSigned,
    KwSizeof,
    KwStatic,
    KwStaticAssert,
    KwStaticCast,
    KwStruct,
    KwSwitch,
    KwTemplate,
    KwThis,
    KwThreadLocal,
    KwThrow,
    KwTrue,
    KwTry,
    KwTypedef,
    KwTypeid,
    KwTypename,
    KwUnion,
    KwUnsigned,
    KwUsing,
    KwVirtual,
    KwVoid,
    KwVolatile,
    KwWcharT,
    KwWhile,

    // === Multi-spelling tokens ===
    Identifier,
    DecIntLiteral,
    HexIntLiteral,
    OctIntLiteral,
    BinIntLiteral,
    FloatLiteral,
    CharLiteral,
    WcharLiteral,
    U8CharLiteral,
    U16CharLiteral,
    U32CharLiteral,
    StrLiteral,
    WstrLiteral,
    U8StrLiteral,
    U16StrLiteral,
    U32StrLiteral,
    Whitespace,
    Comment,
    PpNumber,

    // === Preprocessor directives ===
    PpInclude,
    PpIncludeNext,
    PpDefine,
    PpUndef,
    PpIf,
    PpIfdef,
    PpIfndef,
    PpElif,
    PpElse,
    PpEndif,
    PpLine,
    PpError,
    PpWarning,
    PpPragma,
    PpNull,
}

impl TokenKind {
    /// `true` for the punctuator range `LParen..=ColonColon`.
    #[must_use]
    pub fn is_punctuation(self) -> bool {
        (TokenKind::LParen as u8..=TokenKind::ColonColon as u8).contains(&(self as u8))
    }

    /// `true` for the keyword range `KwAlignas..=KwWhile`.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (TokenKind::KwAlignas as u8..=TokenKind::KwWhile as u8).contains(&(self as u8))
    }

    /// `true` for kinds whose spelling varies (`Identifier..=PpNumber`).
    #[must_use]
    pub fn is_multi_spelling(self) -> bool {
        (TokenKind::Identifier as u8..=TokenKind::PpNumber as u8).contains(&(self as u8))
    }

    /// Keywords that can start or continue a decl-specifier-seq on their own.
    #[must_use]
    pub fn is_decl_specifier(self) -> bool {
        matches!(
            self,
            TokenKind::KwAtomic
                | TokenKind::KwAuto
                | TokenKind::KwBool
                | TokenKind::KwChar
                | TokenKind::KwChar16T
                | TokenKind::KwChar32T
                | TokenKind::KwComplex
                | TokenKind::KwConst
                | TokenKind::KwDouble
                | TokenKind::KwFloat
                | TokenKind::KwImaginary
                | TokenKind::KwInt
                | TokenKind::KwLong
                | TokenKind::KwRegister
                | TokenKind::KwRestrict
                | TokenKind::KwShort
                | TokenKind::KwSigned
                | TokenKind::KwThreadLocal
                | TokenKind::KwUnsigned
                | TokenKind::KwVirtual
                | TokenKind::KwVoid
                | TokenKind::KwVolatile
                | TokenKind::KwWcharT
        )
    }

    /// `#`, `##`, and `PpNumber..=PpPragma`.
    #[must_use]
    pub fn is_preprocessor_token(self) -> bool {
        self == TokenKind::Hash
            || self == TokenKind::HashHash
            || (TokenKind::PpNumber as u8..=TokenKind::PpPragma as u8).contains(&(self as u8))
    }

    /// `true` for the directive range `PpInclude..=PpPragma`.
    #[must_use]
    pub fn is_preprocessor_directive(self) -> bool {
        (TokenKind::PpInclude as u8..=TokenKind::PpPragma as u8).contains(&(self as u8))
    }

    /// Stable machine name, e.g. `KW_ALIGNAS` or `LPAREN`.
    #[must_use]
    pub fn name(self) -> &'static str {
        INFO[self as usize].0
    }

    /// Default spelling, e.g. `alignas` or `(`.
    ///
    /// Empty for kinds with no fixed text (`NULL`, `EOF`) and canonical for
    /// multi-spelling kinds (whitespace is `" "`, everything else `""`).
    #[must_use]
    pub fn default_spelling(self) -> &'static str {
        INFO[self as usize].1
    }
}

/// (machine name, default spelling), indexed by discriminant.
const INFO: &[(&str, &str)] = &[
    ("NULL", ""),
    ("EOF", ""),
    ("LPAREN", "("),
    ("RPAREN", ")"),
    ("LSQUARE", "["),
    ("RSQUARE", "]"),
    ("LBRACE", "{"),
    ("RBRACE", "}"),
    ("DOLLAR", "$"),
    ("DOT", "."),
    ("ELLIPSIS", "..."),
    ("AMP", "&"),
    ("AMPAMP", "&&"),
    ("AMPEQUAL", "&="),
    ("STAR", "*"),
    ("STAREQUAL", "*="),
    ("PLUS", "+"),
    ("PLUSPLUS", "++"),
    ("PLUSEQUAL", "+="),
    ("MINUS", "-"),
    ("ARROW", "->"),
    ("MINUSMINUS", "--"),
    ("MINUSEQUAL", "-="),
    ("TILDE", "~"),
    ("EXCLAIM", "!"),
    ("EXCLAIMEQUAL", "!="),
    ("SLASH", "/"),
    ("SLASHEQUAL", "/="),
    ("PERCENT", "%"),
    ("PERCENTEQUAL", "%="),
    ("LESS", "<"),
    ("LESSEQUAL", "<="),
    ("LSHIFT", "<<"),
    ("LSHIFTEQUAL", "<<="),
    ("GREATER", ">"),
    ("GREATEREQUAL", ">="),
    ("RSHIFT", ">>"),
    ("RSHIFTEQUAL", ">>="),
    ("CARET", "^"),
    ("CARETEQUAL", "^="),
    ("PIPE", "|"),
    ("PIPEPIPE", "||"),
    ("PIPEEQUAL", "|="),
    ("QUESTION", "?"),
    ("COLON", ":"),
    ("SEMI", ";"),
    ("EQUAL", "="),
    ("EQUALEQUAL", "=="),
    ("COMMA", ","),
    ("HASH", "#"),
    ("HASHHASH", "##"),
    ("DOTSTAR", ".*"),
    ("ARROWSTAR", "->*"),
    ("COLONCOLON", "::"),
    ("KW_ALIGNAS", "alignas"),
    ("KW_ALIGNOF", "alignof"),
    ("KW_ASM", "asm"),
    ("KW_ATOMIC", "_Atomic"),
    ("KW_AUTO", "auto"),
    ("KW_BOOL", "bool"),
    ("KW_BREAK", "break"),
    ("KW_CASE", "case"),
    ("KW_CATCH", "catch"),
    ("KW_CHAR", "char"),
    ("KW_CHAR16_T", "char16_t"),
    ("KW_CHAR32_T", "char32_t"),
    ("KW_CLASS", "class"),
    ("KW_COMPLEX", "_Complex"),
    ("KW_CONST", "const"),
    ("KW_CONST_CAST", "const_cast"),
    ("KW_CONSTEXPR", "constexpr"),
    ("KW_CONTINUE", "continue"),
    ("KW_DECLTYPE", "decltype"),
    ("KW_DEFAULT", "default"),
    ("KW_DELETE", "delete"),
    ("KW_DO", "do"),
    ("KW_DOUBLE", "double"),
    ("KW_DYNAMIC_CAST", "dynamic_cast"),
    ("KW_ELSE", "else"),
    ("KW_ENUM", "enum"),
    ("KW_EXPLICIT", "explicit"),
    ("KW_EXPORT", "export"),
    ("KW_EXTERN", "extern"),
    ("KW_FALSE", "false"),
    ("KW_FLOAT", "float"),
    ("KW_FOR", "for"),
    ("KW_FRIEND", "friend"),
    ("KW_FUNC", "__func__"),
    ("KW_GENERIC", "_Generic"),
    ("KW_GOTO", "goto"),
    ("KW_IF", "if"),
    ("KW_IMAGINARY", "_Imaginary"),
    ("KW_INLINE", "inline"),
    ("KW_INT", "int"),
    ("KW_LONG", "long"),
    ("KW_MUTABLE", "mutable"),
    ("KW_NEW", "new"),
    ("KW_NAMESPACE", "namespace"),
    ("KW_NOEXCEPT", "noexcept"),
    ("KW_NORETURN", "_Noreturn"),
    ("KW_NULLPTR", "nullptr"),
    ("KW_OPERATOR", "operator"),
    ("KW_PRIVATE", "private"),
    ("KW_PROTECTED", "protected"),
    ("KW_PUBLIC", "public"),
    ("KW_REGISTER", "register"),
    ("KW_REINTERPRET_CAST", "reinterpret_cast"),
    ("KW_RESTRICT", "restrict"),
    ("KW_RETURN", "return"),
    ("KW_SHORT", "short"),
    ("KW_SIGNED", "signed"),
    ("KW_SIZEOF", "sizeof"),
    ("KW_STATIC", "static"),
    ("KW_STATIC_ASSERT", "static_assert"),
    ("KW_STATIC_CAST", "static_cast"),
    ("KW_STRUCT", "struct"),
    ("KW_SWITCH", "switch"),
    ("KW_TEMPLATE", "template"),
    ("KW_THIS", "this"),
    ("KW_THREAD_LOCAL", "thread_local"),
    ("KW_THROW", "throw"),
    ("KW_TRUE", "true"),
    ("KW_TRY", "try"),
    ("KW_TYPEDEF", "typedef"),
    ("KW_TYPEID", "typeid"),
    ("KW_TYPENAME", "typename"),
    ("KW_UNION", "union"),
    ("KW_UNSIGNED", "unsigned"),
    ("KW_USING", "using"),
    ("KW_VIRTUAL", "virtual"),
    ("KW_VOID", "void"),
    ("KW_VOLATILE", "volatile"),
    ("KW_WCHAR_T", "wchar_t"),
    ("KW_WHILE", "while"),
    ("IDENTIFIER", ""),
    ("DEC_INT_LITERAL", ""),
    ("HEX_INT_LITERAL", ""),
    ("OCT_INT_LITERAL", ""),
    ("BIN_INT_LITERAL", ""),
    ("FLOAT_LITERAL", ""),
    ("CHAR_LITERAL", ""),
    ("WCHAR_LITERAL", ""),
    ("U8_CHAR_LITERAL", ""),
    ("U16_CHAR_LITERAL", ""),
    ("U32_CHAR_LITERAL", ""),
    ("STR_LITERAL", ""),
    ("WSTR_LITERAL", ""),
    ("U8_STR_LITERAL", ""),
    ("U16_STR_LITERAL", ""),
    ("U32_STR_LITERAL", ""),
    ("WHITESPACE", " "),
    ("COMMENT", ""),
    ("PP_NUMBER", ""),
    ("PP_INCLUDE", "include"),
    ("PP_INCLUDE_NEXT", "include_next"),
    ("PP_DEFINE", "define"),
    ("PP_UNDEF", "undef"),
    ("PP_IF", "if"),
    ("PP_IFDEF", "ifdef"),
    ("PP_IFNDEF", "ifndef"),
    ("PP_ELIF", "elif"),
    ("PP_ELSE", "else"),
    ("PP_ENDIF", "endif"),
    ("PP_LINE", "line"),
    ("PP_ERROR", "error"),
    ("PP_WARNING", "warning"),
    ("PP_PRAGMA", "pragma"),
    ("PP_NULL", ""),
];

/// The info table must cover exactly the enum.
const _: () = assert!(INFO.len() == TokenKind::PpNull as usize + 1);

/// `TokenKind` must stay a single byte.
const _: () = assert!(std::mem::size_of::<TokenKind>() == 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_anchors() {
        // Punctuators: 52 entries starting right after EOF.
        assert_eq!(TokenKind::LParen as u8, 2);
        assert_eq!(
            TokenKind::ColonColon as u8 - TokenKind::LParen as u8 + 1,
            52
        );
        // Keywords: 80 entries immediately after the punctuators.
        assert_eq!(TokenKind::KwAlignas as u8, TokenKind::ColonColon as u8 + 1);
        assert_eq!(TokenKind::KwWhile as u8 - TokenKind::KwAlignas as u8 + 1, 80);
        // Multi-spelling tokens immediately after the keywords.
        assert_eq!(TokenKind::Identifier as u8, TokenKind::KwWhile as u8 + 1);
        // Directives immediately after PP_NUMBER.
        assert_eq!(TokenKind::PpInclude as u8, TokenKind::PpNumber as u8 + 1);
    }

    #[test]
    fn punctuation_predicate() {
        assert!(TokenKind::LParen.is_punctuation());
        assert!(TokenKind::ColonColon.is_punctuation());
        assert!(TokenKind::RShiftEqual.is_punctuation());
        assert!(!TokenKind::Null.is_punctuation());
        assert!(!TokenKind::Eof.is_punctuation());
        assert!(!TokenKind::KwAlignas.is_punctuation());
        assert!(!TokenKind::Identifier.is_punctuation());
    }

    #[test]
    fn keyword_predicate() {
        assert!(TokenKind::KwAlignas.is_keyword());
        assert!(TokenKind::KwWhile.is_keyword());
        assert!(TokenKind::KwFunc.is_keyword());
        assert!(!TokenKind::ColonColon.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
    }

    #[test]
    fn multi_spelling_predicate() {
        assert!(TokenKind::Identifier.is_multi_spelling());
        assert!(TokenKind::DecIntLiteral.is_multi_spelling());
        assert!(TokenKind::U32StrLiteral.is_multi_spelling());
        assert!(TokenKind::Whitespace.is_multi_spelling());
        assert!(TokenKind::Comment.is_multi_spelling());
        assert!(TokenKind::PpNumber.is_multi_spelling());
        assert!(!TokenKind::PpInclude.is_multi_spelling());
        assert!(!TokenKind::KwWhile.is_multi_spelling());
    }

    #[test]
    fn preprocessor_predicates() {
        assert!(TokenKind::Hash.is_preprocessor_token());
        assert!(TokenKind::HashHash.is_preprocessor_token());
        assert!(TokenKind::PpNumber.is_preprocessor_token());
        assert!(TokenKind::PpPragma.is_preprocessor_token());
        assert!(!TokenKind::Identifier.is_preprocessor_token());

        assert!(TokenKind::PpInclude.is_preprocessor_directive());
        assert!(TokenKind::PpPragma.is_preprocessor_directive());
        assert!(!TokenKind::PpNumber.is_preprocessor_directive());
        assert!(!TokenKind::PpNull.is_preprocessor_directive());
        assert!(!TokenKind::Hash.is_preprocessor_directive());
    }

    #[test]
    fn decl_specifier_predicate() {
        assert!(TokenKind::KwInt.is_decl_specifier());
        assert!(TokenKind::KwUnsigned.is_decl_specifier());
        assert!(TokenKind::KwAtomic.is_decl_specifier());
        assert!(TokenKind::KwVirtual.is_decl_specifier());
        assert!(!TokenKind::KwTypedef.is_decl_specifier());
        assert!(!TokenKind::KwStatic.is_decl_specifier());
        assert!(!TokenKind::Identifier.is_decl_specifier());
    }

    #[test]
    fn names_and_spellings() {
        assert_eq!(TokenKind::KwAlignas.name(), "KW_ALIGNAS");
        assert_eq!(TokenKind::KwAlignas.default_spelling(), "alignas");
        assert_eq!(TokenKind::LParen.name(), "LPAREN");
        assert_eq!(TokenKind::LParen.default_spelling(), "(");
        assert_eq!(TokenKind::KwFunc.default_spelling(), "__func__");
        assert_eq!(TokenKind::KwAtomic.default_spelling(), "_Atomic");
        assert_eq!(TokenKind::KwNoreturn.default_spelling(), "_Noreturn");
        assert_eq!(TokenKind::RShiftEqual.default_spelling(), ">>=");
        assert_eq!(TokenKind::PpIncludeNext.default_spelling(), "include_next");
        assert_eq!(TokenKind::Eof.default_spelling(), "");
        assert_eq!(TokenKind::PpNull.name(), "PP_NULL");
    }
}
