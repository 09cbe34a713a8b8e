//! A.6 Declarations [gram.dcl].
//!
//! `simple_declaration` is split into four rules making
//! `decl_specifier_seq` mandatory in two of them: the declarator-ids of
//! constructor declarations are otherwise mistaken for a
//! decl-specifier-seq.

use super::{any, n, o, ot, t, Dialect, Nonterminals};
use crate::grammar::{GrammarBuilder, PredId};
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) {
    b.rule(x.declaration_seq, &[n(x.declaration)]);
    b.rule(x.declaration_seq, &[n(x.declaration_seq), n(x.declaration)]);

    b.rule(x.declaration, &[n(x.block_declaration)]);
    b.rule(x.declaration, &[n(x.function_definition)]);
    b.rule(x.declaration, &[n(x.empty_declaration)]);
    b.rule_if(d.cxx, x.declaration, &[n(x.template_declaration)]);
    b.rule_if(d.cxx, x.declaration, &[n(x.explicit_instantiation)]);
    b.rule_if(d.cxx, x.declaration, &[n(x.explicit_specialization)]);
    b.rule_if(d.cxx, x.declaration, &[n(x.linkage_specification)]);
    b.rule_if(d.cxx, x.declaration, &[n(x.namespace_definition)]);
    b.rule_if(d.cxx11, x.declaration, &[n(x.attribute_declaration)]);

    b.rule(x.block_declaration, &[n(x.simple_declaration)]);
    b.rule(x.block_declaration, &[n(x.asm_definition)]);
    b.rule_if(
        d.c11_or_cxx11,
        x.block_declaration,
        &[n(x.static_assert_declaration)],
    );
    b.rule_if(d.cxx, x.block_declaration, &[n(x.namespace_alias_definition)]);
    b.rule_if(d.cxx, x.block_declaration, &[n(x.using_declaration)]);
    b.rule_if(d.cxx, x.block_declaration, &[n(x.using_directive)]);
    b.rule_if(d.cxx11, x.block_declaration, &[n(x.alias_declaration)]);
    b.rule_if(d.cxx11, x.block_declaration, &[n(x.opaque_enum_declaration)]);

    b.rule(
        x.simple_declaration,
        &[n(x.decl_specifier_seq), o(x.init_declarator_list), t(Semi)],
    );
    // C++ constructors and pre-C99 implicit-int functions
    b.rule_if(
        d.cxx || !d.c99,
        x.simple_declaration,
        &[n(x.init_declarator_list), t(Semi)],
    );
    b.rule_if(
        d.cxx11,
        x.simple_declaration,
        &[
            n(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            n(x.init_declarator_list),
            t(Semi),
        ],
    );
    b.rule_if(
        d.cxx11,
        x.simple_declaration,
        &[n(x.attribute_specifier_seq), n(x.init_declarator_list), t(Semi)],
    );

    b.rule_if(
        d.c11_or_cxx11,
        x.static_assert_declaration,
        &[
            t(KwStaticAssert),
            t(LParen),
            n(x.constant_expression),
            t(Comma),
            n(x.string_literal),
            t(RParen),
            t(Semi),
        ],
    );

    b.rule(x.empty_declaration, &[t(Semi)]);

    b.rule(x.decl_specifier, &[n(x.storage_class_specifier)]);
    b.rule(x.decl_specifier, &[n(x.type_specifier)]);
    b.rule(x.decl_specifier, &[n(x.function_specifier)]);
    b.rule(x.decl_specifier, &[t(KwTypedef)]);
    b.rule_if(d.cxx, x.decl_specifier, &[t(KwFriend)]);
    b.rule_if(d.cxx11, x.decl_specifier, &[t(KwConstexpr)]);
    // NB: the alignment-specifier is parsed via attribute-specifier in C++11
    b.rule_if(d.c11, x.decl_specifier, &[n(x.alignment_specifier)]);

    b.rule(
        x.decl_specifier_seq,
        &[n(x.decl_specifier), o(x.attribute_specifier_seq)],
    );
    b.rule(
        x.decl_specifier_seq,
        &[n(x.decl_specifier), n(x.decl_specifier_seq)],
    );

    b.rule(x.storage_class_specifier, &[t(KwRegister)]);
    b.rule(x.storage_class_specifier, &[t(KwStatic)]);
    b.rule(x.storage_class_specifier, &[t(KwThreadLocal)]);
    b.rule(x.storage_class_specifier, &[t(KwExtern)]);
    b.rule(x.storage_class_specifier, &[t(KwMutable)]);
    // 'auto' means something else from C++11; see simple-type-specifier
    b.rule_if(d.c && !d.cxx11, x.storage_class_specifier, &[t(KwAuto)]);

    b.rule_if(d.inline_functions, x.function_specifier, &[t(KwInline)]);
    b.rule_if(d.cxx, x.function_specifier, &[t(KwVirtual)]);
    b.rule_if(d.cxx, x.function_specifier, &[t(KwExplicit)]);
    b.rule_if(d.c11, x.function_specifier, &[t(KwNoreturn)]);

    // typedef-name: see section A.1 Keywords [gram.key]

    b.rule(x.type_specifier, &[n(x.trailing_type_specifier)]);
    b.rule(x.type_specifier, &[n(x.class_specifier)]);
    b.rule(x.type_specifier, &[n(x.enum_specifier)]);

    b.rule(x.trailing_type_specifier, &[n(x.simple_type_specifier)]);
    b.rule(x.trailing_type_specifier, &[n(x.elaborated_type_specifier)]);
    b.rule(x.trailing_type_specifier, &[n(x.type_qualifier)]);
    b.rule_if(d.cxx11, x.trailing_type_specifier, &[n(x.typename_specifier)]);
    b.rule_if(d.c11, x.trailing_type_specifier, &[n(x.atomic_type_specifier)]);

    b.rule(
        x.type_specifier_seq,
        &[n(x.type_specifier), o(x.attribute_specifier_seq)],
    );
    b.rule(
        x.type_specifier_seq,
        &[n(x.type_specifier), n(x.type_specifier_seq)],
    );

    b.rule(
        x.trailing_type_specifier_seq,
        &[n(x.trailing_type_specifier), o(x.attribute_specifier_seq)],
    );
    b.rule(
        x.trailing_type_specifier_seq,
        &[n(x.trailing_type_specifier), n(x.trailing_type_specifier_seq)],
    );

    // user-defined type specifiers moved into a separate nonterminal
    b.rule_if(d.cxx, x.simple_type_specifier, &[n(x.ud_type_specifier)]);
    b.rule_if(!d.cxx, x.simple_type_specifier, &[n(x.typedef_name)]);
    b.rule_if(!d.cxx, x.simple_type_specifier, &[n(x.undeclared_name)]);
    b.rule(x.simple_type_specifier, &[t(KwChar)]);
    b.rule(x.simple_type_specifier, &[t(KwWcharT)]);
    b.rule_if(d.c11_or_cxx11, x.simple_type_specifier, &[t(KwChar16T)]);
    b.rule_if(d.c11_or_cxx11, x.simple_type_specifier, &[t(KwChar32T)]);
    b.rule(x.simple_type_specifier, &[t(KwSigned)]);
    b.rule(x.simple_type_specifier, &[t(KwUnsigned)]);
    b.rule(x.simple_type_specifier, &[t(KwFloat)]);
    b.rule(x.simple_type_specifier, &[t(KwDouble)]);
    b.rule(x.simple_type_specifier, &[t(KwVoid)]);
    b.rule(x.simple_type_specifier, &[t(KwShort)]);
    b.rule(x.simple_type_specifier, &[t(KwInt)]);
    b.rule(x.simple_type_specifier, &[t(KwLong)]);
    // parse "long long" separately
    b.rule_if(d.long_long, x.simple_type_specifier, &[t(KwLong), t(KwLong)]);
    b.rule_if(d.cxx || d.c99, x.simple_type_specifier, &[t(KwBool)]);
    b.rule_if(d.cxx11, x.simple_type_specifier, &[t(KwAuto)]);
    b.rule_if(d.cxx11, x.simple_type_specifier, &[n(x.decltype_specifier)]);
    b.rule_if(d.c99, x.simple_type_specifier, &[t(KwComplex)]);

    b.rule_if(
        d.cxx,
        x.ud_type_specifier,
        &[o(x.nested_name_specifier), n(x.type_name)],
    );
    b.rule_if(
        d.cxx,
        x.ud_type_specifier,
        &[n(x.nested_name_specifier), t(KwTemplate), n(x.simple_template_id)],
    );

    // C: see type-id
    b.rule_if(d.cxx, x.type_name, &[n(x.class_name)]);
    b.rule_if(d.cxx, x.type_name, &[n(x.enum_name)]);
    b.rule_if(d.cxx, x.type_name, &[n(x.typedef_name)]);
    b.rule_if(d.cxx, x.type_name, &[n(x.undeclared_name)]);
    b.rule_if(d.cxx, x.type_name, &[n(x.simple_template_id)]);

    b.rule(
        x.elaborated_type_specifier,
        &[
            n(x.class_key),
            o(x.attribute_specifier_seq),
            o(x.nested_name_specifier),
            n(x.identifier),
        ],
    );
    b.rule_if(
        d.cxx,
        x.elaborated_type_specifier,
        &[
            n(x.class_key),
            o(x.nested_name_specifier),
            t(KwTemplate),
            n(x.simple_template_id),
        ],
    );
    b.rule(
        x.elaborated_type_specifier,
        &[t(KwEnum), o(x.nested_name_specifier), n(x.identifier)],
    );

    b.rule_if(
        d.c11,
        x.atomic_type_specifier,
        &[t(KwAtomic), t(LParen), n(x.type_id), t(RParen)],
    );

    // enum-name: see section A.1 Keywords [gram.key]

    b.rule(
        x.enum_specifier,
        &[n(x.enum_head), t(LBrace), o(x.enumerator_list), t(RBrace)],
    );
    b.rule(
        x.enum_specifier,
        &[
            n(x.enum_head),
            t(LBrace),
            n(x.enumerator_list),
            t(Comma),
            t(RBrace),
        ],
    );
    b.rule_if(d.c, x.enum_specifier, &[n(x.enum_head)]);

    b.rule(
        x.enum_head,
        &[
            n(x.enum_key),
            o(x.attribute_specifier_seq),
            o(x.identifier),
            o(x.enum_base),
        ],
    );
    b.rule_if(
        d.cxx,
        x.enum_head,
        &[
            n(x.enum_key),
            o(x.attribute_specifier_seq),
            n(x.nested_name_specifier),
            n(x.identifier),
            o(x.enum_base),
        ],
    );

    b.rule(x.enum_key, &[t(KwEnum)]);
    // C++11 scoped enums
    b.rule_if(d.cxx11, x.enum_key, &[t(KwEnum), t(KwClass)]);
    b.rule_if(d.cxx11, x.enum_key, &[t(KwEnum), t(KwStruct)]);

    b.rule(x.enumerator_list, &[n(x.enumerator_definition)]);
    b.rule(
        x.enumerator_list,
        &[n(x.enumerator_list), t(Comma), n(x.enumerator_definition)],
    );

    b.rule(x.enumerator_definition, &[n(x.enumerator)]);
    b.rule(
        x.enumerator_definition,
        &[n(x.enumerator), t(Equal), n(x.constant_expression)],
    );

    b.rule(x.enumerator, &[n(x.identifier)]);

    b.rule_if(d.cxx, x.namespace_definition, &[n(x.named_namespace_definition)]);
    b.rule_if(d.cxx, x.namespace_definition, &[n(x.unnamed_namespace_definition)]);

    b.rule_if(
        d.cxx,
        x.named_namespace_definition,
        &[n(x.original_namespace_definition)],
    );
    b.rule_if(
        d.cxx,
        x.named_namespace_definition,
        &[n(x.extension_namespace_definition)],
    );

    b.rule_if(
        d.cxx,
        x.original_namespace_definition,
        &[
            ot(KwInline),
            t(KwNamespace),
            n(x.undeclared_name),
            t(LBrace),
            n(x.namespace_body),
            t(RBrace),
        ],
    );

    b.rule_if(
        d.cxx,
        x.extension_namespace_definition,
        &[
            ot(KwInline),
            t(KwNamespace),
            n(x.original_namespace_name),
            t(LBrace),
            n(x.namespace_body),
            t(RBrace),
        ],
    );

    b.rule_if(
        d.cxx,
        x.unnamed_namespace_definition,
        &[
            ot(KwInline),
            t(KwNamespace),
            t(LBrace),
            n(x.namespace_body),
            t(RBrace),
        ],
    );

    b.rule_if(d.cxx, x.namespace_body, &[o(x.declaration_seq)]);

    b.rule_if(
        d.cxx,
        x.namespace_alias_definition,
        &[
            t(KwNamespace),
            n(x.identifier),
            t(Equal),
            n(x.qualified_namespace_specifier),
            t(Semi),
        ],
    );

    b.rule_if(
        d.cxx,
        x.qualified_namespace_specifier,
        &[o(x.nested_name_specifier), n(x.namespace_name)],
    );
    b.rule_if(
        d.cxx,
        x.qualified_namespace_specifier,
        &[o(x.nested_name_specifier), n(x.undeclared_name)],
    );

    b.rule_if(
        d.cxx,
        x.using_declaration,
        &[
            t(KwUsing),
            ot(KwTypename),
            n(x.nested_name_specifier),
            n(x.unqualified_id),
            t(Semi),
        ],
    );
    b.rule_if(
        d.cxx,
        x.using_declaration,
        &[t(KwUsing), t(ColonColon), n(x.unqualified_id), t(Semi)],
    );

    b.rule_if(
        d.cxx,
        x.using_directive,
        &[
            o(x.attribute_specifier_seq),
            t(KwUsing),
            t(KwNamespace),
            o(x.nested_name_specifier),
            n(x.namespace_name),
            t(Semi),
        ],
    );
    b.rule_if(
        d.cxx,
        x.using_directive,
        &[
            o(x.attribute_specifier_seq),
            t(KwUsing),
            t(KwNamespace),
            o(x.nested_name_specifier),
            n(x.undeclared_name),
            t(Semi),
        ],
    );

    b.rule_if(
        d.cxx,
        x.linkage_specification,
        &[
            t(KwExtern),
            n(x.string_literal),
            t(LBrace),
            o(x.declaration_seq),
            t(RBrace),
        ],
    );
    b.rule_if(
        d.cxx,
        x.linkage_specification,
        &[t(KwExtern), n(x.string_literal), n(x.declaration)],
    );

    b.rule(
        x.asm_definition,
        &[t(KwAsm), t(LParen), n(x.string_literal), t(RParen), t(Semi)],
    );

    b.rule_if(
        d.c11_or_cxx11,
        x.alignment_specifier,
        &[
            t(KwAlignas),
            t(LParen),
            n(x.type_id),
            ot(Ellipsis),
            t(RParen),
        ],
    );
    b.rule_if(
        d.c11_or_cxx11,
        x.alignment_specifier,
        &[
            t(KwAlignas),
            t(LParen),
            n(x.assignment_expression),
            ot(Ellipsis),
            t(RParen),
        ],
    );

    b.rule_if(
        d.cxx11,
        x.decltype_specifier,
        &[t(KwDecltype), t(LParen), n(x.expression), t(RParen)],
    );
    b.rule_if(
        d.cxx11,
        x.decltype_specifier,
        &[t(KwDecltype), t(LParen), t(KwAuto), t(RParen)],
    );

    b.rule_if(
        d.cxx11,
        x.opaque_enum_declaration,
        &[
            n(x.enum_key),
            o(x.attribute_specifier_seq),
            n(x.identifier),
            o(x.enum_base),
            t(Semi),
        ],
    );

    b.rule_if(d.cxx11, x.enum_base, &[t(Colon), n(x.type_specifier_seq)]);

    b.rule_if(
        d.cxx11,
        x.alias_declaration,
        &[
            t(KwUsing),
            n(x.identifier),
            o(x.attribute_specifier_seq),
            t(Equal),
            n(x.type_id),
            t(Semi),
        ],
    );

    b.rule_if(
        d.cxx11,
        x.attribute_declaration,
        &[n(x.attribute_specifier_seq), t(Semi)],
    );

    b.rule_if(
        d.cxx11,
        x.attribute_specifier_seq,
        &[n(x.attribute_specifier_seq), n(x.attribute_specifier)],
    );
    b.rule_if(d.cxx11, x.attribute_specifier_seq, &[n(x.attribute_specifier)]);

    b.rule_if(
        d.cxx11,
        x.attribute_specifier,
        &[
            t(LSquare),
            t(LSquare),
            n(x.attribute_list),
            t(RSquare),
            t(RSquare),
        ],
    );
    b.rule_if(d.cxx11, x.attribute_specifier, &[n(x.alignment_specifier)]);

    b.rule_if(d.cxx11, x.attribute_list, &[o(x.attribute)]);
    b.rule_if(
        d.cxx11,
        x.attribute_list,
        &[n(x.attribute_list), t(Comma), o(x.attribute)],
    );
    b.rule_if(d.cxx11, x.attribute_list, &[n(x.attribute), t(Ellipsis)]);
    b.rule_if(
        d.cxx11,
        x.attribute_list,
        &[n(x.attribute_list), t(Comma), n(x.attribute), t(Ellipsis)],
    );

    b.rule_if(
        d.cxx11,
        x.attribute,
        &[n(x.attribute_token), o(x.attribute_argument_clause)],
    );

    b.rule_if(d.cxx11, x.attribute_token, &[n(x.identifier)]);
    b.rule_if(d.cxx11, x.attribute_token, &[n(x.attribute_scoped_token)]);

    b.rule_if(
        d.cxx11,
        x.attribute_scoped_token,
        &[n(x.attribute_namespace), t(ColonColon), n(x.identifier)],
    );

    b.rule_if(d.cxx11, x.attribute_namespace, &[n(x.identifier)]);

    b.rule_if(
        d.cxx11,
        x.attribute_argument_clause,
        &[t(LParen), n(x.balanced_token_seq), t(RParen)],
    );

    b.rule_if(d.cxx11, x.balanced_token_seq, &[o(x.balanced_token)]);
    b.rule_if(
        d.cxx11,
        x.balanced_token_seq,
        &[n(x.balanced_token_seq), n(x.balanced_token)],
    );

    b.rule_if(
        d.cxx11,
        x.balanced_token,
        &[t(LParen), n(x.balanced_token_seq), t(RParen)],
    );
    b.rule_if(
        d.cxx11,
        x.balanced_token,
        &[t(LSquare), n(x.balanced_token_seq), t(RSquare)],
    );
    b.rule_if(
        d.cxx11,
        x.balanced_token,
        &[t(LBrace), n(x.balanced_token_seq), t(RBrace)],
    );
    b.rule_if(d.cxx11, x.balanced_token, &[any(PredId::BalancedToken)]);
}
