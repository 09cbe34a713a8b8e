//! Parser integration tests: grammar construction, declaration parsing,
//! semantic data attachment, the `>>` split and literal matching over
//! parsed subtrees.

use crate::cxx::CxxGrammar;
use crate::literal::{match_const_expr, ExprType};
use crate::parser::Parser;
use crate::semantics::{Qualifiers, Sign, SizeSpec, TypeSpec};
use crate::sppf::NodeId;
use cfe_diagnostic::DiagnosticSink;
use cfe_ir::TokenKind;
use cfe_lexer::{CStandard, CxxStandard, Features, Lexer, Options};
use cfe_lexer_core::CharSource;
use pretty_assertions::assert_eq;

fn cxx17() -> Options {
    Options::new(None, Some(CxxStandard::Cxx17), Features::empty()).unwrap()
}

fn cxx11() -> Options {
    Options::new(None, Some(CxxStandard::Cxx11), Features::empty()).unwrap()
}

fn c11() -> Options {
    Options::new(Some(CStandard::C11), None, Features::empty()).unwrap()
}

/// Parse one declaration; panics on failure with collected diagnostics.
fn parse_one(source: &str, options: &Options) -> (ParsedDecl, DiagnosticSink) {
    let sink = DiagnosticSink::new();
    let mut lexer = Lexer::new(options, CharSource::from_str(source), &sink);
    let mut parser = Parser::new(&mut lexer, &sink);
    let root = parser.parse_declaration();
    let Some(root) = root else {
        let mut messages = Vec::new();
        sink.for_each(|d| messages.push(d.render()));
        panic!("parse of {source:?} failed: {messages:?}");
    };
    (ParsedDecl::capture(&parser, root), sink)
}

/// Snapshot of the bits of parser state the assertions need (the parser
/// borrows the lexer, so it cannot outlive this helper).
struct ParsedDecl {
    token_kinds: Vec<TokenKind>,
    token_offsets: Vec<u32>,
    decl_spec: Option<crate::semantics::DeclSpecifier>,
    declarator: Option<crate::semantics::Declarator>,
    declarator_part: Option<crate::semantics::DeclaratorPart>,
    last_ptr_kind: Option<TokenKind>,
}

impl ParsedDecl {
    fn capture(parser: &Parser<'_, '_>, root: NodeId) -> ParsedDecl {
        let cxx = parser.cxx();
        let forest = parser.forest();
        let g = &cxx.grammar;

        let seq = forest
            .find(g, root, cxx.nt.decl_specifier_seq, None)
            .or_else(|| forest.find(g, root, cxx.nt.type_specifier_seq, None));
        let decl_spec = seq.and_then(|n| parser.decl_specifier(n).cloned());

        let dcl = forest.find(g, root, cxx.nt.declarator, None);
        let declarator = dcl.and_then(|n| parser.declarator(n).cloned());

        let parms = forest.find(g, root, cxx.nt.parameters_and_qualifiers, None);
        let declarator_part = parms.and_then(|n| parser.declarator_part(n).cloned());

        let last_ptr_kind = declarator
            .as_ref()
            .and_then(|d| d.last_ptr)
            .and_then(|raw| parser.tokens().get(raw))
            .map(|t| t.kind);

        ParsedDecl {
            token_kinds: parser.tokens().iter().map(|t| t.kind).collect(),
            token_offsets: parser.tokens().iter().map(|t| t.offset).collect(),
            decl_spec,
            declarator,
            declarator_part,
            last_ptr_kind,
        }
    }
}

#[test]
fn grammar_builds_for_every_dialect() {
    for options in [cxx17(), cxx11(), c11()] {
        let cxx = CxxGrammar::new(&options);
        assert!(cxx.grammar.nonterminal_count() > 150);
        assert!(cxx.grammar.rule_count() > 100);
    }

    // C-only grammars elide the C++ alternatives
    let c = CxxGrammar::new(&c11());
    let cpp = CxxGrammar::new(&cxx17());
    assert!(c.grammar.rule_count() < cpp.grammar.rule_count());
    assert!(c.grammar.rules_of(c.nt.lambda_expression).is_empty());
    assert!(!cpp.grammar.rules_of(cpp.nt.lambda_expression).is_empty());
}

#[test]
fn operator_rules_carry_tags() {
    use crate::grammar::RuleTag;
    let cxx = CxxGrammar::new(&cxx17());
    assert_eq!(cxx.grammar.rule(cxx.tags.equal).tag, Some(RuleTag::Equal));
    assert_eq!(
        cxx.grammar.rule(cxx.tags.right_shift).tag,
        Some(RuleTag::RightShift)
    );
    assert_eq!(cxx.grammar.rule(cxx.tags.modulo).tag, Some(RuleTag::Modulo));
}

#[test]
fn parses_simple_declaration() {
    let (decl, sink) = parse_one("int x;", &cxx17());
    assert_eq!(sink.error_count(), 0);
    let ds = decl.decl_spec.expect("decl-specifier data");
    assert_eq!(ds.type_spec, TypeSpec::Int);
    assert_eq!(ds.sign, Sign::None);
    assert_eq!(ds.size, SizeSpec::None);
}

#[test]
fn decl_specifier_data_is_always_populated() {
    // invariant 6: type, sign or size is set on every attached sequence
    for source in ["int x;", "unsigned x;", "short x;", "const long y;"] {
        let (decl, _) = parse_one(source, &cxx17());
        let ds = decl.decl_spec.expect("decl-specifier data");
        assert!(
            ds.type_spec != TypeSpec::None
                || ds.sign != Sign::None
                || ds.size != SizeSpec::None,
            "for {source:?}"
        );
    }
}

#[test]
fn folds_unsigned_long_long() {
    let (decl, _) = parse_one("unsigned long long x;", &c11());
    let ds = decl.decl_spec.unwrap();
    assert_eq!(ds.sign, Sign::Unsigned);
    assert_eq!(ds.size, SizeSpec::LongLong);
}

#[test]
fn folds_long_double() {
    let (decl, sink) = parse_one("long double x;", &cxx17());
    assert_eq!(sink.error_count(), 0);
    let ds = decl.decl_spec.unwrap();
    assert_eq!(ds.size, SizeSpec::Long);
    assert_eq!(ds.type_spec, TypeSpec::Double);
}

#[test]
fn folds_qualifiers() {
    let (decl, _) = parse_one("const volatile int x;", &cxx17());
    let ds = decl.decl_spec.unwrap();
    assert!(ds.qualifiers.contains(Qualifiers::CONST | Qualifiers::VOLATILE));
    assert_eq!(ds.type_spec, TypeSpec::Int);
}

#[test]
fn short_double_reports_conflict() {
    let (_, sink) = parse_one("short double x;", &cxx17());
    assert!(sink.error_count() >= 1);
    let mut saw = false;
    sink.for_each(|d| {
        saw = saw || d.message.contains("cannot be used with type \"double\"");
    });
    assert!(saw);
}

#[test]
fn signed_unsigned_conflict_keeps_first() {
    let (decl, sink) = parse_one("signed unsigned x;", &cxx17());
    assert!(sink.error_count() >= 1);
    assert_eq!(decl.decl_spec.unwrap().sign, Sign::Signed);
}

#[test]
fn int_int_reports_conflict() {
    let (_, sink) = parse_one("int int x;", &cxx17());
    let mut saw = false;
    sink.for_each(|d| {
        saw = saw || d.message.contains("conflicts with earlier type specifier");
    });
    assert!(saw);
}

#[test]
fn declarator_records_rightmost_pointer() {
    let (decl, _) = parse_one("int *p;", &cxx17());
    let d = decl.declarator.expect("declarator data");
    assert_eq!(decl.last_ptr_kind, Some(TokenKind::Star));
    assert!(!d.is_array);

    let (decl, _) = parse_one("int **q;", &cxx17());
    assert_eq!(decl.last_ptr_kind, Some(TokenKind::Star));

    let (decl, _) = parse_one("int &r;", &cxx17());
    assert_eq!(decl.last_ptr_kind, Some(TokenKind::Amp));
}

#[test]
fn declarator_records_array() {
    let (decl, _) = parse_one("int a[10];", &cxx17());
    let d = decl.declarator.expect("declarator data");
    assert!(d.is_array);
    assert!(d.last_ptr.is_none());
}

#[test]
fn parameters_are_counted() {
    let (decl, sink) = parse_one("int f(int a, char b);", &cxx17());
    assert_eq!(sink.error_count(), 0);
    let part = decl.declarator_part.expect("parameter data");
    assert_eq!(part.count, 2);
    assert!(!part.variadic);
    // the declarator remembers where the parameter list starts
    assert!(decl.declarator.unwrap().begin_parms.is_some());
}

#[test]
fn variadic_parameter_list() {
    let (decl, _) = parse_one("int f(int a, ...);", &cxx17());
    let part = decl.declarator_part.unwrap();
    assert_eq!(part.count, 1);
    assert!(part.variadic);
}

#[test]
fn empty_parameter_list() {
    let (decl, _) = parse_one("int f();", &cxx17());
    let part = decl.declarator_part.unwrap();
    assert_eq!(part.count, 0);
    assert!(!part.variadic);
}

#[test]
fn member_function_qualifiers() {
    let (decl, _) = parse_one("int f(int) const;", &cxx17());
    let part = decl.declarator_part.unwrap();
    assert!(part.qualifiers.contains(Qualifiers::CONST));
}

#[test]
fn reference_to_reference_is_reported() {
    let sink = DiagnosticSink::new();
    let options = cxx11();
    let mut lexer = Lexer::new(&options, CharSource::from_str("int && &r;"), &sink);
    let mut parser = Parser::new(&mut lexer, &sink);
    let root = parser.parse_declaration();
    assert!(root.is_some());
    let mut saw = false;
    sink.for_each(|d| {
        saw = saw || d.message.contains("reference to reference");
    });
    assert!(saw);
}

#[test]
fn array_of_references_is_reported() {
    let sink = DiagnosticSink::new();
    let options = cxx17();
    let mut lexer = Lexer::new(&options, CharSource::from_str("int &a[3];"), &sink);
    let mut parser = Parser::new(&mut lexer, &sink);
    let root = parser.parse_declaration();
    assert!(root.is_some());
    let mut saw = false;
    sink.for_each(|d| {
        saw = saw || d.message.contains("array of references");
    });
    assert!(saw);
}

#[test]
fn template_rshift_is_split() {
    // S3 and invariant 8
    let (decl, sink) = parse_one("A<B<int>> x;", &cxx17());
    assert_eq!(sink.error_count(), 0);
    // the >> token was rewritten into two adjacent > tokens
    assert!(!decl.token_kinds.contains(&TokenKind::RShift));
    let greaters: Vec<usize> = decl
        .token_kinds
        .iter()
        .enumerate()
        .filter(|(_, k)| **k == TokenKind::Greater)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(greaters.len(), 2);
    let (first, second) = (greaters[0], greaters[1]);
    assert_eq!(second, first + 1);
    assert_eq!(
        decl.token_offsets[second],
        decl.token_offsets[first] + 1
    );
    // offsets stay strictly ordered across the whole list
    for pair in decl.token_offsets.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn template_greater_equal_splits_into_equal() {
    // the >= closes the template list and leaves `=`:
    // `int x = A<B>=2;` reads as `int x = (A<B> = 2);`
    let (decl, sink) = parse_one("int x = A<B>=2;", &cxx11());
    assert_eq!(sink.error_count(), 0);
    assert!(!decl.token_kinds.contains(&TokenKind::GreaterEqual));
    assert!(decl.token_kinds.contains(&TokenKind::Greater));
}

#[test]
fn parses_function_definition() {
    let (decl, sink) = parse_one("int add(int a, int b) { return a; }", &cxx17());
    assert_eq!(sink.error_count(), 0);
    assert_eq!(decl.declarator_part.unwrap().count, 2);
}

#[test]
fn parses_using_directive_in_cxx_only() {
    let (_, sink) = parse_one("using namespace std;", &cxx17());
    assert_eq!(sink.error_count(), 0);

    // C has no using-directives
    let sink = DiagnosticSink::new();
    let options = c11();
    let mut lexer = Lexer::new(&options, CharSource::from_str("using namespace std;"), &sink);
    let mut parser = Parser::new(&mut lexer, &sink);
    assert!(parser.parse_declaration().is_none());
    assert_eq!(parser.error_count(), 1);
}

#[test]
fn parses_namespace_definition() {
    let (_, sink) = parse_one("namespace n { int x; }", &cxx17());
    assert_eq!(sink.error_count(), 0);
}

#[test]
fn parses_class_definition() {
    let (_, sink) = parse_one("struct S { int a; };", &cxx17());
    assert_eq!(sink.error_count(), 0);
}

#[test]
fn parses_template_declaration() {
    let (_, sink) = parse_one("template<class T> struct S { };", &cxx17());
    assert_eq!(sink.error_count(), 0);
}

#[test]
fn parses_empty_declaration() {
    let (_, sink) = parse_one(";", &cxx17());
    assert_eq!(sink.error_count(), 0);
}

#[test]
fn sequential_declarations_advance() {
    let sink = DiagnosticSink::new();
    let options = cxx17();
    let mut lexer = Lexer::new(&options, CharSource::from_str("int a; int b;"), &sink);
    let mut parser = Parser::new(&mut lexer, &sink);

    assert!(parser.parse_declaration().is_some());
    assert!(!parser.at_eof());
    assert!(parser.parse_declaration().is_some());
    assert!(parser.at_eof());
    assert_eq!(parser.error_count(), 0);
}

#[test]
fn parse_failure_counts_and_recovers() {
    let sink = DiagnosticSink::new();
    let options = cxx17();
    let mut lexer = Lexer::new(&options, CharSource::from_str("+ int a;"), &sink);
    let mut parser = Parser::new(&mut lexer, &sink);

    assert!(parser.parse_declaration().is_none());
    assert_eq!(parser.error_count(), 1);
    assert!(parser.skip_token());
    assert!(parser.parse_declaration().is_some());
}

#[test]
fn reset_clears_state() {
    let sink = DiagnosticSink::new();
    let options = cxx17();
    let mut lexer = Lexer::new(&options, CharSource::from_str("+ int a;"), &sink);
    let mut parser = Parser::new(&mut lexer, &sink);

    assert!(parser.parse_declaration().is_none());
    assert_eq!(parser.error_count(), 1);
    parser.reset();
    assert_eq!(parser.error_count(), 0);
    assert!(parser.forest().is_empty());
}

#[test]
fn match_const_expr_on_parsed_expressions() {
    let sink = DiagnosticSink::new();
    let options = cxx17();
    let mut lexer = Lexer::new(&options, CharSource::from_str("7; (7); 8;"), &sink);
    let mut parser = Parser::new(&mut lexer, &sink);
    let constant_expression = parser.cxx().nt.constant_expression;

    let a = parser.parse(constant_expression).expect("7");
    assert!(parser.skip_token()); // ;
    let b = parser.parse(constant_expression).expect("(7)");
    assert!(parser.skip_token());
    let c = parser.parse(constant_expression).expect("8");

    let ctx = parser.sem_ctx();
    assert!(match_const_expr(&ctx, a, b, ExprType::default()));
    assert!(!match_const_expr(&ctx, a, c, ExprType::default()));
}
