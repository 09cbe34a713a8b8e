//! Lexer tests: dialect gating, digraphs/trigraphs, literal forms, the
//! closing-token stack and the preprocessor flag accumulator.

use crate::options::{CStandard, CxxStandard, Features, Options};
use crate::Lexer;
use cfe_diagnostic::{DiagnosticSink, Severity};
use cfe_ir::{TokenFlags, TokenKind};
use cfe_lexer_core::CharSource;
use pretty_assertions::assert_eq;
use TokenKind::*;

fn c89() -> Options {
    Options::new(Some(CStandard::C89), None, Features::empty()).unwrap()
}

fn c95() -> Options {
    Options::new(Some(CStandard::C95), None, Features::empty()).unwrap()
}

fn c99() -> Options {
    Options::new(Some(CStandard::C99), None, Features::empty()).unwrap()
}

fn c11() -> Options {
    Options::new(Some(CStandard::C11), None, Features::empty()).unwrap()
}

fn cxx98() -> Options {
    Options::new(None, Some(CxxStandard::Cxx98), Features::empty()).unwrap()
}

fn cxx11() -> Options {
    Options::new(None, Some(CxxStandard::Cxx11), Features::empty()).unwrap()
}

fn cxx17() -> Options {
    Options::new(None, Some(CxxStandard::Cxx17), Features::empty()).unwrap()
}

/// Lex everything, returning (kind, spelling, flags) triples.
fn lex_with(
    source: &str,
    options: &Options,
    sink: &DiagnosticSink,
) -> Vec<(TokenKind, String, TokenFlags)> {
    let mut lexer = Lexer::new(options, CharSource::from_str(source), sink);
    let mut out = Vec::new();
    loop {
        let t = lexer.lex();
        if t.kind == Eof {
            break;
        }
        out.push((t.kind, t.spelling(lexer.interner()).to_string(), t.flags));
        assert!(out.len() < 10_000, "runaway lexer on {source:?}");
    }
    out
}

fn lex(source: &str, options: &Options) -> Vec<(TokenKind, String, TokenFlags)> {
    let sink = DiagnosticSink::new();
    let tokens = lex_with(source, options, &sink);
    assert_eq!(sink.error_count(), 0, "unexpected errors for {source:?}");
    tokens
}

fn kinds(tokens: &[(TokenKind, String, TokenFlags)]) -> Vec<TokenKind> {
    tokens.iter().map(|(k, _, _)| *k).collect()
}

// === Basics ===

#[test]
fn empty_input_is_eof() {
    assert_eq!(lex("", &c89()), vec![]);
}

#[test]
fn punctuators_and_identifiers() {
    let tokens = lex("a += b->*c;", &cxx11());
    assert_eq!(
        kinds(&tokens),
        vec![Identifier, PlusEqual, Identifier, ArrowStar, Identifier, Semi]
    );
}

#[test]
fn arrow_star_requires_cxx() {
    assert_eq!(kinds(&lex("a->*b", &c89())), vec![Identifier, Arrow, Star, Identifier]);
    assert_eq!(kinds(&lex("a.*b", &c89())), vec![Identifier, Dot, Star, Identifier]);
    assert_eq!(kinds(&lex("a.*b", &cxx98())), vec![Identifier, DotStar, Identifier]);
}

#[test]
fn keywords_follow_dialect() {
    assert_eq!(kinds(&lex("class", &c89())), vec![Identifier]);
    assert_eq!(kinds(&lex("class", &cxx98())), vec![KwClass]);
    assert_eq!(kinds(&lex("restrict", &c89())), vec![Identifier]);
    assert_eq!(kinds(&lex("restrict", &c11())), vec![KwRestrict]);
    assert_eq!(kinds(&lex("_Generic", &c11())), vec![KwGeneric]);
    assert_eq!(kinds(&lex("constexpr", &cxx98())), vec![Identifier]);
    assert_eq!(kinds(&lex("constexpr", &cxx11())), vec![KwConstexpr]);
}

#[test]
fn alternative_tokens_carry_alternate_flag() {
    let tokens = lex("a and b", &cxx98());
    assert_eq!(kinds(&tokens), vec![Identifier, AmpAmp, Identifier]);
    let (_, spelling, flags) = &tokens[1];
    assert_eq!(spelling, "and");
    assert!(flags.contains(TokenFlags::ALTERNATE));
}

#[test]
fn identifiers_remember_dollar_option() {
    let opts = Options::new(Some(CStandard::C89), None, Features::IDENTIFIER_DOLLARS).unwrap();
    assert_eq!(
        lex("$foo", &opts),
        vec![(Identifier, "$foo".into(), TokenFlags::STARTS_LINE)]
    );
    assert_eq!(kinds(&lex("$foo", &c89())), vec![Dollar, Identifier]);
}

// === S1: digraphs ===

#[test]
fn digraphs_off_lexes_less_percent() {
    let tokens = lex("<%", &c89());
    assert_eq!(kinds(&tokens), vec![Less, Percent]);
}

#[test]
fn digraphs_on_lexes_alternate_lbrace() {
    let tokens = lex("<%", &c95());
    assert_eq!(tokens.len(), 1);
    let (kind, spelling, flags) = &tokens[0];
    assert_eq!(*kind, LBrace);
    assert_eq!(spelling, "<%");
    assert!(flags.contains(TokenFlags::ALTERNATE));
}

#[test]
fn remaining_digraphs() {
    assert_eq!(kinds(&lex("%> :> <: %:", &c95())), vec![RBrace, RSquare, LSquare, Hash]);
    let tokens = lex("x %:%: y", &c95());
    assert_eq!(kinds(&tokens), vec![Identifier, HashHash, Identifier]);
    assert_eq!(tokens[1].1, "%:%:");
}

// === S2: `<::` disambiguation ===

#[test]
fn less_colon_colon_in_cxx11() {
    let tokens = lex("A<::B>", &cxx11());
    assert_eq!(
        kinds(&tokens),
        vec![Identifier, Less, ColonColon, Identifier, Greater]
    );
}

#[test]
fn less_colon_colon_in_cxx98_is_digraph() {
    let tokens = lex("A<::B>", &cxx98());
    assert_eq!(
        kinds(&tokens),
        vec![Identifier, LSquare, Colon, Identifier, Greater]
    );
    assert_eq!(tokens[1].1, "<:");
    assert!(tokens[1].2.contains(TokenFlags::ALTERNATE));
}

#[test]
fn less_colon_stays_digraph_before_another_colon_or_greater() {
    // "<:::" = "[" "::", "<:>" = "[" ">"
    assert_eq!(kinds(&lex("A<:::B", &cxx11())), vec![Identifier, LSquare, ColonColon, Identifier]);
    assert_eq!(kinds(&lex("A<:>", &cxx11())), vec![Identifier, LSquare, Greater]);
}

// === S3 / invariant 4: SPLITABLE ===

#[test]
fn rshift_splittable_inside_template_brackets() {
    let tokens = lex("vector<vector<int>>", &cxx11());
    let (kind, _, flags) = tokens.last().unwrap();
    assert_eq!(*kind, RShift);
    assert!(flags.contains(TokenFlags::SPLITABLE));
}

#[test]
fn rshift_not_splittable_without_open_angle() {
    let tokens = lex("a >> b", &cxx11());
    assert!(!tokens[1].2.contains(TokenFlags::SPLITABLE));
}

#[test]
fn rshift_not_splittable_before_cxx11() {
    let tokens = lex("vector<vector<int>>", &cxx98());
    let (kind, _, flags) = tokens.last().unwrap();
    assert_eq!(*kind, RShift);
    assert!(!flags.contains(TokenFlags::SPLITABLE));
}

#[test]
fn greater_equal_splittable_inside_template_brackets() {
    let tokens = lex("A<B>=2", &cxx11());
    assert_eq!(kinds(&tokens), vec![Identifier, Less, Identifier, GreaterEqual, DecIntLiteral]);
    assert!(tokens[3].2.contains(TokenFlags::SPLITABLE));
}

#[test]
fn closed_angle_pops_and_disarms_splitting() {
    // the `>` closes the only open `<`, so the later `>>` is a plain shift
    let tokens = lex("A<B> x >> y", &cxx11());
    let shift = tokens.iter().find(|(k, _, _)| *k == RShift).unwrap();
    assert!(!shift.2.contains(TokenFlags::SPLITABLE));
}

#[test]
fn real_closer_pops_speculative_angles() {
    // ')' pops the pending `>` pushed for `<`: the parenthesis was opened
    // before the `<`, so the `>` expectations above it are abandoned
    let tokens = lex("f(a < b) >> c", &cxx11());
    let shift = tokens.iter().find(|(k, _, _)| *k == RShift).unwrap();
    assert!(!shift.2.contains(TokenFlags::SPLITABLE));
}

// === S4 / trigraphs and line splicing ===

#[test]
fn trigraph_then_splice_folds_to_equal() {
    let tokens = lex("??/\n=", &c89());
    assert_eq!(tokens, vec![(Equal, "=".into(), TokenFlags::STARTS_LINE)]);
}

#[test]
fn trigraph_braces() {
    assert_eq!(kinds(&lex("??<??>", &c89())), vec![LBrace, RBrace]);
    assert_eq!(kinds(&lex("??(??)", &c89())), vec![LSquare, RSquare]);
}

#[test]
fn trigraphs_off_in_cxx17() {
    let tokens = lex("??<", &cxx17());
    assert_eq!(kinds(&tokens), vec![Question, Question, Less]);
}

#[test]
fn splice_joins_identifier() {
    let tokens = lex("ab\\\ncd", &c89());
    assert_eq!(tokens, vec![(Identifier, "abcd".into(), TokenFlags::STARTS_LINE)]);
}

#[test]
fn idempotent_on_normalized_input() {
    // invariant 5: with transforms off, already-normalized text lexes the same
    let normalized = "int x = 1;";
    let with = lex(normalized, &c89());
    let without = lex(normalized, &cxx17()); // trigraphs off
    assert_eq!(
        kinds(&with),
        kinds(&without)
    );
}

// === Numeric literals ===

#[test]
fn integer_literal_kinds() {
    let tokens = lex("123 017 0x1F 0 9", &c89());
    assert_eq!(
        kinds(&tokens),
        vec![DecIntLiteral, OctIntLiteral, HexIntLiteral, OctIntLiteral, DecIntLiteral]
    );
    assert_eq!(tokens[2].1, "0x1F");
}

#[test]
fn binary_literals_gated() {
    let tokens = lex("0b101", &cxx11()); // C++11 has no binary literals
    assert_eq!(kinds(&tokens), vec![OctIntLiteral, Identifier]);

    let tokens = lex("0b101", &cxx17());
    assert_eq!(tokens[0], (BinIntLiteral, "0b101".into(), TokenFlags::STARTS_LINE));
}

#[test]
fn digit_separators_kept_in_spelling() {
    let tokens = lex("1'000'000", &cxx17());
    assert_eq!(tokens[0], (DecIntLiteral, "1'000'000".into(), TokenFlags::STARTS_LINE));
}

#[test]
fn integer_suffixes() {
    let tokens = lex("42u 42ul 42ull 42LL 42llu", &c11());
    for (kind, _, _) in &tokens {
        assert_eq!(*kind, DecIntLiteral);
    }
    let spellings: Vec<_> = tokens.iter().map(|(_, s, _)| s.as_str()).collect();
    assert_eq!(spellings, vec!["42u", "42ul", "42ull", "42LL", "42llu"]);
}

#[test]
fn long_long_suffix_gated() {
    // C89 has no long long: the second 'l' is not part of the literal
    let tokens = lex("42ll", &c89());
    assert_eq!(kinds(&tokens), vec![DecIntLiteral, Identifier]);
    assert_eq!(tokens[0].1, "42l");
}

#[test]
fn float_literals() {
    let tokens = lex("1.5 .5 0.5e10 1e-3 2.f 3.14L", &c89());
    assert_eq!(kinds(&tokens), vec![FloatLiteral; 6]);
    assert_eq!(tokens[1].1, ".5");
    assert_eq!(tokens[3].1, "1e-3");
    assert_eq!(tokens[4].1, "2.f");
}

// === String and character literals ===

#[test]
fn string_content_is_cooked() {
    let tokens = lex(r#""a\n\x41\101\\""#, &c89());
    assert_eq!(tokens[0].0, StrLiteral);
    assert_eq!(tokens[0].1, "a\nAA\\");
}

#[test]
fn char_literal_kinds_by_prefix() {
    let tokens = lex("'a' L'b'", &c89());
    assert_eq!(kinds(&tokens), vec![CharLiteral, WcharLiteral]);

    let tokens = lex("u'a' U'b' u\"s\" U\"t\" u8\"v\"", &c11());
    assert_eq!(
        kinds(&tokens),
        vec![U16CharLiteral, U32CharLiteral, U16StrLiteral, U32StrLiteral, U8StrLiteral]
    );
}

#[test]
fn unicode_prefixes_are_identifiers_in_old_dialects() {
    let tokens = lex("u'a'", &c89());
    assert_eq!(kinds(&tokens), vec![Identifier, CharLiteral]);
    assert_eq!(tokens[0].1, "u");

    let tokens = lex("u8\"x\"", &c89());
    assert_eq!(kinds(&tokens), vec![Identifier, StrLiteral]);
    assert_eq!(tokens[0].1, "u8");
}

#[test]
fn u8_char_literal_needs_feature() {
    // plain C++11: u8'x' is the identifier u8 followed by a char literal
    let tokens = lex("u8'x'", &cxx11());
    assert_eq!(kinds(&tokens), vec![Identifier, CharLiteral]);

    // standard in C++17
    let tokens = lex("u8'x'", &cxx17());
    assert_eq!(kinds(&tokens), vec![U8CharLiteral]);

    // or by explicit option from C11/C++11 on
    let opts = Options::new(Some(CStandard::C11), None, Features::UTF8_CHAR_LITERALS).unwrap();
    assert_eq!(kinds(&lex("u8'x'", &opts)), vec![U8CharLiteral]);
}

#[test]
fn unterminated_string_reports_error() {
    let sink = DiagnosticSink::new();
    let tokens = lex_with("\"abc", &c89(), &sink);
    assert_eq!(tokens[0].0, StrLiteral);
    assert_eq!(sink.error_count(), 1);
    sink.for_each(|d| {
        assert_eq!(d.severity, Severity::Error);
        assert!(d.message.contains("unterminated string literal"));
    });
}

#[test]
fn string_ucn_escape() {
    let source = "\"\\u0041\""; // "\u0041"
    let tokens = lex(source, &cxx11());
    assert_eq!(tokens[0].1, "A");
}

#[test]
fn string_ucn_escape_without_feature_is_literal() {
    // C89 has no UCNs: the unrecognised escape keeps the next character
    let source = "\"\\u0041\"";
    let tokens = lex(source, &c89());
    assert_eq!(tokens[0].1, "u0041");
}

// === Raw string literals ===

#[test]
fn raw_string_basic() {
    let tokens = lex(r#"R"(ab\c)""#, &cxx11());
    assert_eq!(tokens, vec![(StrLiteral, r"ab\c".into(), TokenFlags::STARTS_LINE)]);
}

#[test]
fn raw_string_with_delimiter() {
    let tokens = lex(r#"R"xy(a)x)xy""#, &cxx11());
    assert_eq!(tokens[0].1, "a)x");
}

#[test]
fn raw_string_content_ending_with_paren() {
    let tokens = lex(r#"R"(ab))""#, &cxx11());
    assert_eq!(tokens[0].1, "ab)");
}

#[test]
fn raw_string_no_transforms_inside() {
    // "??/" would fold to a backslash outside a raw literal; C++11 still
    // has trigraphs on by default
    let tokens = lex("R\"(??/ a\\\nb)\"", &cxx11());
    assert_eq!(tokens[0].1, "??/ a\\\nb");
}

#[test]
fn raw_string_prefixes() {
    let tokens = lex(r#"uR"(a)" u8R"(b)" UR"(c)" LR"(d)""#, &cxx17());
    assert_eq!(
        kinds(&tokens),
        vec![U16StrLiteral, U8StrLiteral, U32StrLiteral, WstrLiteral]
    );
}

#[test]
fn raw_string_needs_cxx11() {
    let tokens = lex(r#"R"(a)""#, &cxx98());
    // identifier R, then an ordinary string "(a)"
    assert_eq!(kinds(&tokens), vec![Identifier, StrLiteral]);
    assert_eq!(tokens[1].1, "(a)");
}

#[test]
fn raw_string_overlong_delimiter_is_fatal() {
    let opts = cxx11();
    let sink = DiagnosticSink::new();
    let mut lexer = Lexer::new(
        &opts,
        CharSource::from_str(r#"R"abcdefghijklmnopq(x)abcdefghijklmnopq""#),
        &sink,
    );
    let t = lexer.lex();
    assert_eq!(t.kind, Eof);
    assert!(sink.has_fatal());
}

// === Comments ===

#[test]
fn block_comments_skipped_by_default() {
    let tokens = lex("a /* comment */ b", &c89());
    assert_eq!(kinds(&tokens), vec![Identifier, Identifier]);
    assert!(tokens[1].2.contains(TokenFlags::SPACE_BEFORE));
}

#[test]
fn line_comments_gated() {
    // C89 has no line comments: "//" is two slashes
    assert_eq!(kinds(&lex("a // b", &c89())), vec![Identifier, Slash, Slash, Identifier]);
    assert_eq!(kinds(&lex("a // b", &c99())), vec![Identifier]);
}

#[test]
fn keep_comments_records_content() {
    let opts = Options::new(Some(CStandard::C99), None, Features::KEEP_COMMENTS).unwrap();
    let tokens = lex("/* x */ // y", &opts);
    assert_eq!(kinds(&tokens), vec![Comment, Comment]);
    assert_eq!(tokens[0].1, "/* x */");
    assert_eq!(tokens[1].1, "// y");
}

#[test]
fn exponent_sign_without_fraction() {
    let tokens = lex("1e-3", &c89());
    assert_eq!(tokens[0], (FloatLiteral, "1e-3".into(), TokenFlags::STARTS_LINE));
}

#[test]
fn unterminated_block_comment_reports_error() {
    let sink = DiagnosticSink::new();
    let tokens = lex_with("/* abc", &c89(), &sink);
    assert_eq!(kinds(&tokens), vec![]);
    assert_eq!(sink.error_count(), 1);
}

// === Whitespace and flags ===

#[test]
fn keep_space_emits_whitespace_tokens() {
    let opts = Options::new(Some(CStandard::C89), None, Features::KEEP_SPACE).unwrap();
    let tokens = lex("a  b\nc", &opts);
    assert_eq!(
        kinds(&tokens),
        vec![Identifier, Whitespace, Identifier, Whitespace, Identifier]
    );
    assert_eq!(tokens[1].1, "  ");
    // the newline is always its own token
    assert_eq!(tokens[3].1, "\n");
}

#[test]
fn starts_line_after_newline() {
    // invariant 3
    let tokens = lex("a\nb", &c89());
    assert!(tokens[0].2.contains(TokenFlags::STARTS_LINE));
    assert!(tokens[1].2.contains(TokenFlags::STARTS_LINE));
    assert!(!tokens[1].2.contains(TokenFlags::PREPROCESS));
}

#[test]
fn spelling_concatenation_reconstructs_input() {
    // invariant 1 on an input without cooked literals
    let opts = Options::new(
        Some(CStandard::C99),
        None,
        Features::KEEP_SPACE | Features::KEEP_COMMENTS,
    )
    .unwrap();
    let source = "int main(void) {\n    return 0; /* done */\n}\n";
    let tokens = lex(source, &opts);
    let rebuilt: String = tokens.iter().map(|(_, s, _)| s.as_str()).collect();
    assert_eq!(rebuilt, source);
}

// === Preprocessor directives ===

#[test]
fn include_directive_marks_line() {
    let tokens = lex("#include <stdio.h>\nint", &cxx11());
    assert_eq!(tokens[0].0, PpInclude);
    assert!(tokens[0].2.contains(TokenFlags::PREPROCESS));
    assert!(tokens[0].2.contains(TokenFlags::STARTS_LINE));

    // every token until the newline is part of the directive
    for (kind, _, flags) in &tokens[..tokens.len() - 1] {
        assert!(
            flags.contains(TokenFlags::PREPROCESS),
            "{kind:?} should be PREPROCESS"
        );
    }
    // the token after the newline is not
    let last = tokens.last().unwrap();
    assert_eq!(last.0, KwInt);
    assert!(last.2.contains(TokenFlags::STARTS_LINE));
    assert!(!last.2.contains(TokenFlags::PREPROCESS));
}

#[test]
fn directive_names() {
    for (src, kind) in [
        ("#define X", PpDefine),
        ("#undef X", PpUndef),
        ("#if 1", PpIf),
        ("#ifdef X", PpIfdef),
        ("#ifndef X", PpIfndef),
        ("#elif 1", PpElif),
        ("#else", PpElse),
        ("#endif", PpEndif),
        ("#line 7", PpLine),
        ("#pragma once", PpPragma),
        ("#include_next <x.h>", PpIncludeNext),
    ] {
        let tokens = lex(src, &cxx11());
        assert_eq!(tokens[0].0, kind, "for {src:?}");
    }
}

#[test]
fn error_and_warning_directives() {
    let sink = DiagnosticSink::new();
    let tokens = lex_with("#error boom\n#warning careful", &cxx11(), &sink);
    assert_eq!(tokens[0].0, PpError);
    assert!(tokens.iter().any(|(k, _, _)| *k == PpWarning));
    assert_eq!(sink.error_count(), 0);
}

#[test]
fn unknown_directive_warns_and_yields_pp_null() {
    let sink = DiagnosticSink::new();
    let tokens = lex_with("#frobnicate x", &cxx11(), &sink);
    assert_eq!(tokens[0].0, PpNull);
    assert!(tokens[0].2.contains(TokenFlags::PREPROCESS));
    // the name is rolled back and lexes as an ordinary (PREPROCESS) token
    assert_eq!(tokens[1].0, Identifier);
    assert_eq!(tokens[1].1, "frobnicate");
    assert_eq!(sink.warning_count(), 1);
}

#[test]
fn hash_mid_line_is_not_a_directive() {
    let tokens = lex("x #include", &cxx11());
    assert_eq!(kinds(&tokens), vec![Identifier, Hash, Identifier]);
}

#[test]
fn no_pp_directives_option() {
    let opts = Options::new(None, Some(CxxStandard::Cxx11), Features::NO_PP_DIRECTIVES).unwrap();
    let tokens = lex("#include <x>", &opts);
    assert_eq!(tokens[0].0, Hash);
    assert!(!tokens[0].2.contains(TokenFlags::PREPROCESS));
}

#[test]
fn percent_colon_directive() {
    let tokens = lex("%:define X", &c95());
    assert_eq!(tokens[0].0, PpDefine);
    assert!(tokens[0].2.contains(TokenFlags::PREPROCESS));
}

// === UCNs ===

#[test]
fn ucn_starts_identifier() {
    let source = "\\u00E9tat"; // état
    let tokens = lex(source, &cxx11());
    assert_eq!(tokens, vec![(Identifier, "état".into(), TokenFlags::STARTS_LINE)]);
}

#[test]
fn ucn_inside_identifier() {
    let source = "caf\\u00E9";
    let tokens = lex(source, &cxx11());
    assert_eq!(tokens[0].1, "café");
}

#[test]
fn ucn_with_too_few_digits_is_an_error() {
    let sink = DiagnosticSink::new();
    let source = "a\\u00G";
    let tokens = lex_with(source, &cxx11(), &sink);
    assert_eq!(tokens[0].1, "a");
    assert_eq!(sink.error_count(), 1);
}

#[test]
fn ucn_surrogate_is_an_error() {
    let sink = DiagnosticSink::new();
    let source = "\\uD800";
    let _ = lex_with(source, &cxx11(), &sink);
    assert_eq!(sink.error_count(), 1);
    sink.for_each(|d| assert!(d.message.contains("surrogate")));
}

#[test]
fn ucns_disabled_in_c89() {
    // without UCNS the backslash yields a null token and the rest lexes
    // as an ordinary identifier
    let source = "\\u0041";
    let tokens = lex(source, &c89());
    assert_eq!(kinds(&tokens), vec![Null, Identifier]);
    assert_eq!(tokens[1].1, "u0041");
}

// === Offsets ===

#[test]
fn token_positions() {
    let opts = c89();
    let sink = DiagnosticSink::new();
    let mut lexer = Lexer::new(&opts, CharSource::from_str("ab cd\nef"), &sink);
    let a = lexer.lex();
    let c = lexer.lex();
    let e = lexer.lex();
    assert_eq!((a.offset, a.line, a.column), (0, 1, 1));
    assert_eq!((c.offset, c.line, c.column), (3, 1, 4));
    assert_eq!((e.offset, e.line, e.column), (6, 2, 1));
}
