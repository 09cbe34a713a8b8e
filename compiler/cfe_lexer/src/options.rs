//! Language dialect options.
//!
//! A dialect is a choice of C standard and/or C++ standard plus a feature
//! bit-set. Each standard brings a canonical default feature set and a
//! keyword table; [`Options::new`] unions them with caller-supplied extra
//! features. Options are constructed once and immutable afterwards, so they
//! can be shared between the lexer and the parser (and across threads).

use crate::keywords;
use bitflags::bitflags;
use cfe_ir::TokenKind;
use rustc_hash::FxHashMap;
use std::fmt;

/// C language standards, oldest first. The ordering is meaningful
/// (`C99 <= C11`), so dialect gates can be written as range checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CStandard {
    C89,
    C90,
    C95,
    C99,
    C11,
}

impl CStandard {
    pub const LATEST: CStandard = CStandard::C11;

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CStandard::C89 => "C89",
            CStandard::C90 => "C90",
            CStandard::C95 => "C95",
            CStandard::C99 => "C99",
            CStandard::C11 => "C11",
        }
    }
}

/// C++ language standards, oldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CxxStandard {
    Cxx98,
    Cxx03,
    Cxx11,
    Cxx14,
    Cxx17,
}

impl CxxStandard {
    pub const LATEST: CxxStandard = CxxStandard::Cxx17;

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CxxStandard::Cxx98 => "C++98",
            CxxStandard::Cxx03 => "C++03",
            CxxStandard::Cxx11 => "C++11",
            CxxStandard::Cxx14 => "C++14",
            CxxStandard::Cxx17 => "C++17",
        }
    }
}

/// A parsed `-std=` / `-x` selection: one concrete standard of one language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Standard {
    C(CStandard),
    Cxx(CxxStandard),
}

bitflags! {
    /// Optional features. Unless noted, any standard may enable any of them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Features: u32 {
        /// Lexer: record full content for whitespace tokens.
        const KEEP_SPACE = 1 << 0;
        /// Lexer: record full content for comments.
        const KEEP_COMMENTS = 1 << 1;
        /// Lexer: recognise `//` one-line comments.
        const LINE_COMMENTS = 1 << 2;
        /// `long long`; standard from C99 and C++11.
        const LONG_LONG = 1 << 3;
        /// Digraph tokens; standard in C++ and from C95.
        const DIGRAPHS = 1 << 4;
        /// Interpret trigraph sequences; standard until C++17.
        const TRIGRAPHS = 1 << 5;
        /// `0b`-prefixed binary integer literals; standard from C++14.
        const BINARY_LITERALS = 1 << 6;
        /// `u8'...'` character literals; standard from C++17, optional for
        /// C11 and C++11/14 only.
        const UTF8_CHAR_LITERALS = 1 << 7;
        /// Hexadecimal floating point literals; standard from C99 and C++17.
        const HEX_FLOAT_LITERALS = 1 << 8;
        /// Universal character names `\uXXXX` / `\UXXXXXXXX`; standard from
        /// C99 and C++11.
        const UCNS = 1 << 9;
        /// Allow `$` in identifiers.
        const IDENTIFIER_DOLLARS = 1 << 10;
        /// The `inline` function specifier; standard from C99 and in C++.
        const INLINE_FUNCTIONS = 1 << 11;
        /// Lexer: do not interpret preprocessor directives.
        const NO_PP_DIRECTIVES = 1 << 12;
    }
}

impl Features {
    /// Canonical default feature set of a C standard.
    #[must_use]
    pub fn c_defaults(std: CStandard) -> Features {
        let c95 = Features::DIGRAPHS.union(Features::TRIGRAPHS);
        let c99 = c95
            .union(Features::LINE_COMMENTS)
            .union(Features::UCNS)
            .union(Features::LONG_LONG)
            .union(Features::HEX_FLOAT_LITERALS)
            .union(Features::INLINE_FUNCTIONS);
        match std {
            CStandard::C89 | CStandard::C90 => Features::TRIGRAPHS,
            CStandard::C95 => c95,
            CStandard::C99 | CStandard::C11 => c99,
        }
    }

    /// Canonical default feature set of a C++ standard.
    #[must_use]
    pub fn cxx_defaults(std: CxxStandard) -> Features {
        let cxx98 = Features::LINE_COMMENTS
            .union(Features::DIGRAPHS)
            .union(Features::TRIGRAPHS)
            .union(Features::INLINE_FUNCTIONS);
        let cxx11 = cxx98.union(Features::LONG_LONG).union(Features::UCNS);
        let cxx14 = cxx11.union(Features::BINARY_LITERALS);
        match std {
            CxxStandard::Cxx98 | CxxStandard::Cxx03 => cxx98,
            CxxStandard::Cxx11 => cxx11,
            CxxStandard::Cxx14 => cxx14,
            // Trigraphs were removed in C++17.
            CxxStandard::Cxx17 => cxx14
                .difference(Features::TRIGRAPHS)
                .union(Features::UTF8_CHAR_LITERALS)
                .union(Features::HEX_FLOAT_LITERALS),
        }
    }
}

/// Errors from option construction and name parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionsError {
    /// The requested combination is not expressible (no language selected,
    /// or a feature requires a newer standard).
    InvalidConfiguration(String),
    /// `-std=` / `-x` name not recognised.
    UnknownStandard(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            OptionsError::UnknownStandard(name) => {
                write!(f, "unknown language standard \"{name}\"")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Keyword table: spelling → token kind.
pub type KeywordTable = FxHashMap<&'static str, TokenKind>;

/// An immutable dialect: standards, feature set, keyword table.
#[derive(Clone, Debug)]
pub struct Options {
    c: Option<CStandard>,
    cxx: Option<CxxStandard>,
    features: Features,
    keywords: KeywordTable,
}

impl Options {
    /// Build options for the given standards with `extra` features on top of
    /// the standards' defaults.
    ///
    /// At least one standard must be selected. `UTF8_CHAR_LITERALS` requires
    /// one of the standards to reach C11/C++11.
    pub fn new(
        c: Option<CStandard>,
        cxx: Option<CxxStandard>,
        extra: Features,
    ) -> Result<Options, OptionsError> {
        if c.is_none() && cxx.is_none() {
            return Err(OptionsError::InvalidConfiguration(
                "no language selected".into(),
            ));
        }

        let c11_plus = c.is_some_and(|s| s >= CStandard::C11);
        let cxx11_plus = cxx.is_some_and(|s| s >= CxxStandard::Cxx11);
        if extra.contains(Features::UTF8_CHAR_LITERALS) && !c11_plus && !cxx11_plus {
            return Err(OptionsError::InvalidConfiguration(
                "UTF-8 character literals not available before C11/C++11".into(),
            ));
        }

        let mut features = extra;
        let mut table = KeywordTable::default();

        if let Some(std) = c {
            features |= Features::c_defaults(std);
            match std {
                CStandard::C89 | CStandard::C90 | CStandard::C95 => {
                    keywords::add_c89_keywords(&mut table);
                }
                CStandard::C99 => {
                    keywords::add_c99_keywords(&mut table);
                }
                CStandard::C11 => {
                    keywords::add_c11_keywords(&mut table);
                }
            }
        }

        if let Some(std) = cxx {
            features |= Features::cxx_defaults(std);
            match std {
                CxxStandard::Cxx98 | CxxStandard::Cxx03 => {
                    keywords::add_cxx98_keywords(&mut table);
                }
                CxxStandard::Cxx11 | CxxStandard::Cxx14 | CxxStandard::Cxx17 => {
                    keywords::add_cxx11_keywords(&mut table);
                }
            }
        }

        if features.contains(Features::INLINE_FUNCTIONS) {
            table.insert("inline", TokenKind::KwInline);
        }

        Ok(Options {
            c,
            cxx,
            features,
            keywords: table,
        })
    }

    /// Parse a `-std=` name. C names are case-insensitive; C++ names are
    /// case-sensitive (`c++0x`, `c++1y` and `c++1z` are accepted aliases).
    pub fn parse_standard(name: &str) -> Result<Standard, OptionsError> {
        const CXX_NAMES: &[(&str, CxxStandard)] = &[
            ("c++98", CxxStandard::Cxx98),
            ("c++03", CxxStandard::Cxx03),
            ("c++0x", CxxStandard::Cxx11),
            ("c++11", CxxStandard::Cxx11),
            ("c++1y", CxxStandard::Cxx14),
            ("c++14", CxxStandard::Cxx14),
            ("c++1z", CxxStandard::Cxx17),
            ("c++17", CxxStandard::Cxx17),
        ];
        const C_NAMES: &[(&str, CStandard)] = &[
            ("c89", CStandard::C89),
            ("c90", CStandard::C90),
            ("c95", CStandard::C95),
            ("c99", CStandard::C99),
            ("c11", CStandard::C11),
        ];

        for (n, std) in CXX_NAMES {
            if name == *n {
                return Ok(Standard::Cxx(*std));
            }
        }
        for (n, std) in C_NAMES {
            if name.eq_ignore_ascii_case(n) {
                return Ok(Standard::C(*std));
            }
        }
        Err(OptionsError::UnknownStandard(name.into()))
    }

    /// Parse a `-x` language name (`c` or `c++`), yielding its latest
    /// standard.
    pub fn parse_language(name: &str) -> Result<Standard, OptionsError> {
        if name.eq_ignore_ascii_case("c") {
            Ok(Standard::C(CStandard::LATEST))
        } else if name.eq_ignore_ascii_case("c++") {
            Ok(Standard::Cxx(CxxStandard::LATEST))
        } else {
            Err(OptionsError::UnknownStandard(name.into()))
        }
    }

    #[must_use]
    pub fn c(&self) -> Option<CStandard> {
        self.c
    }

    #[must_use]
    pub fn cxx(&self) -> Option<CxxStandard> {
        self.cxx
    }

    #[must_use]
    pub fn features(&self) -> Features {
        self.features
    }

    /// `true` if every feature in `want` is enabled.
    #[must_use]
    pub fn have(&self, want: Features) -> bool {
        self.features.contains(want)
    }

    #[must_use]
    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    // Dialect predicates in the shape the grammar gates use.

    #[must_use]
    pub fn lang_c(&self) -> bool {
        self.c.is_some()
    }

    #[must_use]
    pub fn lang_cxx(&self) -> bool {
        self.cxx.is_some()
    }

    #[must_use]
    pub fn std_c99(&self) -> bool {
        self.c.is_some_and(|s| s >= CStandard::C99)
    }

    #[must_use]
    pub fn std_c11(&self) -> bool {
        self.c.is_some_and(|s| s >= CStandard::C11)
    }

    #[must_use]
    pub fn std_cxx11(&self) -> bool {
        self.cxx.is_some_and(|s| s >= CxxStandard::Cxx11)
    }

    #[must_use]
    pub fn std_cxx14(&self) -> bool {
        self.cxx.is_some_and(|s| s >= CxxStandard::Cxx14)
    }

    #[must_use]
    pub fn std_cxx17(&self) -> bool {
        self.cxx.is_some_and(|s| s >= CxxStandard::Cxx17)
    }

    /// "C", "C++" or "C/C++".
    #[must_use]
    pub fn language_name(&self) -> String {
        match (self.c, self.cxx) {
            (Some(_), Some(_)) => "C/C++".into(),
            (Some(_), None) => "C".into(),
            (None, Some(_)) => "C++".into(),
            (None, None) => "unknown".into(),
        }
    }

    /// "C11", "C++17" or "C11/C++17".
    #[must_use]
    pub fn standard_name(&self) -> String {
        match (self.c, self.cxx) {
            (Some(c), Some(cxx)) => format!("{}/{}", c.name(), cxx.name()),
            (Some(c), None) => c.name().into(),
            (None, Some(cxx)) => cxx.name().into(),
            (None, None) => "unknown".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cxx(std: CxxStandard) -> Options {
        Options::new(None, Some(std), Features::empty()).unwrap()
    }

    fn c(std: CStandard) -> Options {
        Options::new(Some(std), None, Features::empty()).unwrap()
    }

    #[test]
    fn at_least_one_standard() {
        let err = Options::new(None, None, Features::empty()).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidConfiguration(_)));
    }

    #[test]
    fn utf8_char_literals_need_c11_or_cxx11() {
        let err = Options::new(
            Some(CStandard::C99),
            None,
            Features::UTF8_CHAR_LITERALS,
        )
        .unwrap_err();
        assert!(matches!(err, OptionsError::InvalidConfiguration(_)));

        // either standard reaching the 2011 level is enough
        assert!(Options::new(
            Some(CStandard::C99),
            Some(CxxStandard::Cxx11),
            Features::UTF8_CHAR_LITERALS
        )
        .is_ok());
        assert!(Options::new(Some(CStandard::C11), None, Features::UTF8_CHAR_LITERALS).is_ok());
    }

    #[test]
    fn default_feature_sets() {
        assert_eq!(c(CStandard::C89).features(), Features::TRIGRAPHS);
        assert!(c(CStandard::C95).have(Features::DIGRAPHS | Features::TRIGRAPHS));
        assert!(c(CStandard::C99).have(
            Features::LINE_COMMENTS
                | Features::UCNS
                | Features::LONG_LONG
                | Features::HEX_FLOAT_LITERALS
                | Features::INLINE_FUNCTIONS
        ));

        assert!(cxx(CxxStandard::Cxx98).have(Features::DIGRAPHS | Features::TRIGRAPHS));
        assert!(!cxx(CxxStandard::Cxx98).have(Features::LONG_LONG));
        assert!(cxx(CxxStandard::Cxx11).have(Features::LONG_LONG | Features::UCNS));
        assert!(cxx(CxxStandard::Cxx14).have(Features::BINARY_LITERALS));

        // C++17 drops trigraphs and gains u8'...' and hex floats
        let cxx17 = cxx(CxxStandard::Cxx17);
        assert!(!cxx17.have(Features::TRIGRAPHS));
        assert!(cxx17.have(Features::UTF8_CHAR_LITERALS | Features::HEX_FLOAT_LITERALS));
    }

    #[test]
    fn keyword_tables_union_by_standard() {
        let c89 = c(CStandard::C89);
        assert_eq!(c89.keywords().get("int"), Some(&TokenKind::KwInt));
        assert_eq!(c89.keywords().get("_Bool"), None);
        assert_eq!(c89.keywords().get("inline"), None);

        let c99 = c(CStandard::C99);
        assert_eq!(c99.keywords().get("_Bool"), Some(&TokenKind::KwBool));
        assert_eq!(c99.keywords().get("restrict"), Some(&TokenKind::KwRestrict));
        // INLINE_FUNCTIONS is a C99 default, so the keyword appears
        assert_eq!(c99.keywords().get("inline"), Some(&TokenKind::KwInline));
        assert_eq!(c99.keywords().get("_Atomic"), None);

        let c11 = c(CStandard::C11);
        assert_eq!(c11.keywords().get("_Atomic"), Some(&TokenKind::KwAtomic));
        assert_eq!(
            c11.keywords().get("_Static_assert"),
            Some(&TokenKind::KwStaticAssert)
        );

        let cxx98 = cxx(CxxStandard::Cxx98);
        assert_eq!(cxx98.keywords().get("class"), Some(&TokenKind::KwClass));
        assert_eq!(cxx98.keywords().get("and"), Some(&TokenKind::AmpAmp));
        assert_eq!(cxx98.keywords().get("constexpr"), None);

        let cxx11 = cxx(CxxStandard::Cxx11);
        assert_eq!(
            cxx11.keywords().get("constexpr"),
            Some(&TokenKind::KwConstexpr)
        );
        assert_eq!(cxx11.keywords().get("nullptr"), Some(&TokenKind::KwNullptr));
    }

    #[test]
    fn extra_inline_functions_adds_keyword() {
        let opts = Options::new(Some(CStandard::C89), None, Features::INLINE_FUNCTIONS).unwrap();
        assert_eq!(opts.keywords().get("inline"), Some(&TokenKind::KwInline));
    }

    #[test]
    fn parse_standard_names() {
        assert_eq!(
            Options::parse_standard("c99").unwrap(),
            Standard::C(CStandard::C99)
        );
        // C names are case-insensitive
        assert_eq!(
            Options::parse_standard("C11").unwrap(),
            Standard::C(CStandard::C11)
        );
        assert_eq!(
            Options::parse_standard("c++0x").unwrap(),
            Standard::Cxx(CxxStandard::Cxx11)
        );
        assert_eq!(
            Options::parse_standard("c++1z").unwrap(),
            Standard::Cxx(CxxStandard::Cxx17)
        );
        // C++ names are case-sensitive
        assert!(Options::parse_standard("C++11").is_err());
        assert!(Options::parse_standard("c++20").is_err());
    }

    #[test]
    fn parse_language_names() {
        assert_eq!(
            Options::parse_language("c").unwrap(),
            Standard::C(CStandard::C11)
        );
        assert_eq!(
            Options::parse_language("C++").unwrap(),
            Standard::Cxx(CxxStandard::Cxx17)
        );
        assert!(Options::parse_language("fortran").is_err());
    }

    #[test]
    fn names() {
        let both = Options::new(
            Some(CStandard::C11),
            Some(CxxStandard::Cxx17),
            Features::empty(),
        )
        .unwrap();
        assert_eq!(both.language_name(), "C/C++");
        assert_eq!(both.standard_name(), "C11/C++17");
        assert_eq!(cxx(CxxStandard::Cxx03).standard_name(), "C++03");
    }
}
