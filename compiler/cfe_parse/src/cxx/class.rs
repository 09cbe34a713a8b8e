//! A.8 Classes and A.9 Derived classes [gram.class] [gram.derived].
//!
//! `class_specifier` doubles as the C grammar's struct-or-union-specifier;
//! `member_specification` as its struct-declaration-list.

use super::{n, o, ot, p, t, Dialect, Nonterminals};
use crate::grammar::{GrammarBuilder, PredId};
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) {
    // class-name: see section A.1 Keywords [gram.key]

    b.rule(
        x.class_specifier,
        &[
            n(x.class_head),
            t(LBrace),
            o(x.member_specification),
            t(RBrace),
        ],
    );

    b.rule(
        x.class_head,
        &[
            n(x.class_key),
            o(x.attribute_specifier_seq),
            n(x.class_head_name),
            o(x.class_virt_specifier),
            o(x.base_clause),
        ],
    );
    b.rule(
        x.class_head,
        &[n(x.class_key), o(x.attribute_specifier_seq), o(x.base_clause)],
    );

    b.rule(
        x.class_head_name,
        &[o(x.nested_name_specifier), n(x.class_name)],
    );
    b.rule(
        x.class_head_name,
        &[o(x.nested_name_specifier), n(x.undeclared_name)],
    );
    b.rule(
        x.class_head_name,
        &[o(x.nested_name_specifier), n(x.simple_template_id)],
    );

    b.rule_if(
        d.cxx11,
        x.class_virt_specifier,
        &[p(Identifier, PredId::FinalSpecifier)],
    );

    b.rule(x.class_key, &[t(KwStruct)]);
    b.rule(x.class_key, &[t(KwUnion)]);
    b.rule_if(d.cxx, x.class_key, &[t(KwClass)]);

    b.rule_if(
        !d.cxx,
        x.member_declaration,
        &[n(x.decl_specifier_seq), o(x.member_declarator_list), t(Semi)],
    );
    // split so decl-specifier-seq is mandatory in the first C++ rule: the
    // declarator-ids of constructor declarations are otherwise mistaken
    // for a decl-specifier-seq
    b.rule_if(
        d.cxx,
        x.member_declaration,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            o(x.member_declarator_list),
            t(Semi),
        ],
    );
    b.rule_if(
        d.cxx,
        x.member_declaration,
        &[
            o(x.attribute_specifier_seq),
            o(x.member_declarator_list),
            t(Semi),
        ],
    );
    b.rule_if(
        d.cxx,
        x.member_declaration,
        &[n(x.function_definition), ot(Semi)],
    );
    b.rule_if(d.cxx, x.member_declaration, &[n(x.using_declaration)]);
    b.rule_if(d.cxx, x.member_declaration, &[n(x.template_declaration)]);
    b.rule_if(d.cxx, x.member_declaration, &[n(x.alias_declaration)]);
    b.rule_if(
        d.c11_or_cxx11,
        x.member_declaration,
        &[n(x.static_assert_declaration)],
    );

    b.rule(
        x.member_specification,
        &[n(x.member_declaration), o(x.member_specification)],
    );
    b.rule_if(
        d.cxx,
        x.member_specification,
        &[n(x.access_specifier), t(Colon), o(x.member_specification)],
    );

    b.rule(x.member_declarator_list, &[n(x.member_declarator)]);
    b.rule(
        x.member_declarator_list,
        &[n(x.member_declarator_list), t(Comma), n(x.member_declarator)],
    );

    b.rule(
        x.member_declarator,
        &[n(x.declarator), o(x.virt_specifier_seq), o(x.pure_specifier)],
    );
    // member with default value
    b.rule_if(
        d.cxx11,
        x.member_declarator,
        &[n(x.declarator), o(x.brace_or_equal_initializer)],
    );
    // C++ bitfield
    b.rule_if(
        d.cxx,
        x.member_declarator,
        &[
            o(x.identifier),
            o(x.attribute_specifier_seq),
            t(Colon),
            n(x.constant_expression),
        ],
    );
    // C bitfield
    b.rule_if(
        !d.cxx,
        x.member_declarator,
        &[o(x.declarator), t(Colon), n(x.constant_expression)],
    );

    b.rule_if(d.cxx11, x.virt_specifier_seq, &[n(x.virt_specifier)]);
    b.rule_if(
        d.cxx11,
        x.virt_specifier_seq,
        &[n(x.virt_specifier_seq), n(x.virt_specifier)],
    );

    b.rule_if(
        d.cxx11,
        x.virt_specifier,
        &[p(Identifier, PredId::OverrideSpecifier)],
    );
    b.rule_if(
        d.cxx11,
        x.virt_specifier,
        &[p(Identifier, PredId::FinalSpecifier)],
    );

    b.rule_if(
        d.cxx,
        x.pure_specifier,
        &[t(Equal), p(DecIntLiteral, PredId::ZeroLiteral)],
    );

    // A.9 Derived classes [gram.derived]
    b.rule_if(d.cxx, x.base_clause, &[t(Colon), n(x.base_specifier_list)]);

    b.rule_if(
        d.cxx,
        x.base_specifier_list,
        &[n(x.base_specifier), ot(Ellipsis)],
    );
    b.rule_if(
        d.cxx,
        x.base_specifier_list,
        &[
            n(x.base_specifier_list),
            t(Comma),
            n(x.base_specifier),
            ot(Ellipsis),
        ],
    );

    b.rule_if(
        d.cxx,
        x.base_specifier,
        &[o(x.attribute_specifier_seq), n(x.base_type_specifier)],
    );
    b.rule_if(
        d.cxx,
        x.base_specifier,
        &[
            o(x.attribute_specifier_seq),
            t(KwVirtual),
            o(x.access_specifier),
            n(x.base_type_specifier),
        ],
    );
    b.rule_if(
        d.cxx,
        x.base_specifier,
        &[
            o(x.attribute_specifier_seq),
            n(x.access_specifier),
            ot(KwVirtual),
            n(x.base_type_specifier),
        ],
    );

    b.rule_if(
        d.cxx,
        x.class_or_decltype,
        &[o(x.nested_name_specifier), n(x.class_name)],
    );
    b.rule_if(
        d.cxx,
        x.class_or_decltype,
        &[o(x.nested_name_specifier), n(x.undeclared_name)],
    );
    b.rule_if(d.cxx11, x.class_or_decltype, &[n(x.decltype_specifier)]);

    b.rule_if(d.cxx, x.base_type_specifier, &[n(x.class_or_decltype)]);

    b.rule_if(d.cxx, x.access_specifier, &[t(KwPrivate)]);
    b.rule_if(d.cxx, x.access_specifier, &[t(KwProtected)]);
    b.rule_if(d.cxx, x.access_specifier, &[t(KwPublic)]);
}
