//! A.1 Keywords and A.2 Lexical conventions, plus the translation unit.
//!
//! The name-class nonterminals wrap a predicated identifier; the
//! predicates default to the host-semantics plug-in (which only answers
//! "undeclared"), so a real semantic analyzer can resolve the
//! typedef/class/enum ambiguities.

use super::{n, o, pn, t, Dialect, Nonterminals};
use crate::grammar::{GrammarBuilder, PredId};
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) {
    // A.1 Keywords [gram.key]
    b.rule(x.typedef_name, &[pn(x.identifier, PredId::TypedefName)]);

    b.rule(x.class_name, &[pn(x.identifier, PredId::ClassName)]);
    b.rule_if(d.cxx, x.class_name, &[n(x.simple_template_id)]);

    b.rule(x.enum_name, &[pn(x.identifier, PredId::EnumName)]);

    b.rule_if(d.cxx, x.namespace_name, &[n(x.original_namespace_name)]);
    b.rule_if(d.cxx, x.namespace_name, &[n(x.namespace_alias)]);

    b.rule_if(
        d.cxx,
        x.original_namespace_name,
        &[pn(x.identifier, PredId::NamespaceName)],
    );

    b.rule_if(
        d.cxx,
        x.namespace_alias,
        &[pn(x.identifier, PredId::NamespaceAlias)],
    );

    b.rule_if(
        d.cxx,
        x.template_name,
        &[pn(x.identifier, PredId::TemplateName)],
    );

    b.rule(x.undeclared_name, &[pn(x.identifier, PredId::UndeclaredName)]);

    // A.2 Lexical conventions [gram.lex]
    // NB: most of the lexical grammar is handled by the lexer
    b.rule(x.identifier, &[t(Identifier)]);

    b.rule(x.literal, &[n(x.numeric_literal)]);
    b.rule(x.literal, &[n(x.character_literal)]);
    b.rule(x.literal, &[n(x.string_literal)]);
    b.rule_if(d.cxx, x.literal, &[n(x.boolean_literal)]);
    b.rule_if(d.cxx11, x.literal, &[n(x.pointer_literal)]);
    b.rule_if(d.cxx11, x.literal, &[n(x.user_defined_literal)]);

    b.rule_if(d.cxx, x.boolean_literal, &[t(KwFalse)]);
    b.rule_if(d.cxx, x.boolean_literal, &[t(KwTrue)]);

    b.rule_if(d.cxx11, x.pointer_literal, &[t(KwNullptr)]);

    b.rule_if(
        d.cxx11,
        x.user_defined_literal,
        &[n(x.numeric_literal), n(x.ud_suffix)],
    );
    b.rule_if(
        d.cxx11,
        x.user_defined_literal,
        &[n(x.character_literal), n(x.ud_suffix)],
    );
    b.rule_if(
        d.cxx11,
        x.user_defined_literal,
        &[n(x.string_literal), n(x.ud_suffix)],
    );

    b.rule_if(d.cxx11, x.ud_suffix, &[n(x.identifier)]);

    b.rule(x.numeric_literal, &[t(DecIntLiteral)]);
    b.rule(x.numeric_literal, &[t(HexIntLiteral)]);
    b.rule(x.numeric_literal, &[t(OctIntLiteral)]);
    b.rule_if(d.binary_literals, x.numeric_literal, &[t(BinIntLiteral)]);
    b.rule(x.numeric_literal, &[t(FloatLiteral)]);

    b.rule(x.character_literal, &[t(CharLiteral)]);
    b.rule(x.character_literal, &[t(WcharLiteral)]);
    b.rule_if(d.utf8_char_literals, x.character_literal, &[t(U8CharLiteral)]);
    b.rule_if(d.c11_or_cxx11, x.character_literal, &[t(U16CharLiteral)]);
    b.rule_if(d.c11_or_cxx11, x.character_literal, &[t(U32CharLiteral)]);

    b.rule(x.string_literal, &[t(StrLiteral)]);
    b.rule(x.string_literal, &[t(WstrLiteral)]);
    b.rule_if(d.c11_or_cxx11, x.string_literal, &[t(U8StrLiteral)]);
    b.rule_if(d.c11_or_cxx11, x.string_literal, &[t(U16StrLiteral)]);
    b.rule_if(d.c11_or_cxx11, x.string_literal, &[t(U32StrLiteral)]);

    // A.3 Basic concepts [gram.basic]
    b.rule(x.translation_unit, &[o(x.declaration_seq)]);
}
