//! A.7 Declarators [gram.decl].
//!
//! Deviations from a naive transcription: parameters-and-qualifiers is
//! only parsed via noptr-declarator, and the C++11 trailing-return-type
//! form is reachable only when the preceding declarator fragment actually
//! contains a parameter list (`IsFunction`), cutting off false
//! trailing-return matches.

use super::{n, o, ot, pn, t, Dialect, Nonterminals};
use crate::grammar::{GrammarBuilder, PredId};
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) {
    b.rule(x.init_declarator_list, &[n(x.init_declarator)]);
    b.rule(
        x.init_declarator_list,
        &[n(x.init_declarator_list), t(Comma), n(x.init_declarator)],
    );

    b.rule(x.init_declarator, &[n(x.declarator), o(x.initializer)]);

    b.rule(x.declarator, &[n(x.ptr_declarator)]);
    b.rule_if(
        d.cxx11,
        x.declarator,
        &[
            n(x.noptr_declarator),
            pn(x.trailing_return_type, PredId::IsFunction),
        ],
    );

    b.rule(x.ptr_declarator, &[n(x.noptr_declarator)]);
    b.rule(x.ptr_declarator, &[n(x.ptr_operator), n(x.ptr_declarator)]);

    b.rule(
        x.noptr_declarator,
        &[n(x.declarator_id), o(x.attribute_specifier_seq)],
    );
    b.rule(
        x.noptr_declarator,
        &[n(x.noptr_declarator), n(x.parameters_and_qualifiers)],
    );
    b.rule(
        x.noptr_declarator,
        &[n(x.noptr_declarator), n(x.array_declarator)],
    );
    b.rule(x.noptr_declarator, &[n(x.nested_declarator)]);

    b.rule(
        x.nested_declarator,
        &[t(LParen), n(x.ptr_declarator), t(RParen)],
    );

    b.rule_if(
        !d.c99,
        x.array_declarator,
        &[
            t(LSquare),
            o(x.constant_expression),
            t(RSquare),
            o(x.attribute_specifier_seq),
        ],
    );
    b.rule_if(
        d.c99,
        x.array_declarator,
        &[
            t(LSquare),
            o(x.type_qualifier_seq),
            o(x.assignment_expression),
            t(RSquare),
            o(x.attribute_specifier_seq),
        ],
    );
    b.rule_if(
        d.c99,
        x.array_declarator,
        &[
            t(LSquare),
            t(KwStatic),
            o(x.type_qualifier_seq),
            n(x.assignment_expression),
            t(RSquare),
            o(x.attribute_specifier_seq),
        ],
    );
    b.rule_if(
        d.c99,
        x.array_declarator,
        &[
            t(LSquare),
            n(x.type_qualifier_seq),
            t(KwStatic),
            n(x.assignment_expression),
            t(RSquare),
            o(x.attribute_specifier_seq),
        ],
    );
    b.rule_if(
        d.c99,
        x.array_declarator,
        &[
            t(LSquare),
            o(x.type_qualifier_seq),
            t(Star),
            t(RSquare),
            o(x.attribute_specifier_seq),
        ],
    );

    b.rule_if(
        d.cxx,
        x.parameters_and_qualifiers,
        &[
            t(LParen),
            n(x.parameter_declaration_clause),
            t(RParen),
            o(x.type_qualifier_seq),
            o(x.ref_qualifier),
            o(x.exception_specification),
            o(x.attribute_specifier_seq),
        ],
    );
    b.rule_if(
        !d.cxx,
        x.parameters_and_qualifiers,
        &[t(LParen), n(x.parameter_declaration_clause), t(RParen)],
    );

    b.rule(
        x.ptr_operator,
        &[t(Star), o(x.attribute_specifier_seq), o(x.type_qualifier_seq)],
    );
    // C++ lvalue reference
    b.rule_if(d.cxx, x.ptr_operator, &[t(Amp), o(x.attribute_specifier_seq)]);
    // C++11 rvalue reference
    b.rule_if(
        d.cxx11,
        x.ptr_operator,
        &[t(AmpAmp), o(x.attribute_specifier_seq)],
    );
    // C++ pointer-to-member
    b.rule_if(
        d.cxx,
        x.ptr_operator,
        &[
            n(x.nested_name_specifier),
            t(Star),
            o(x.attribute_specifier_seq),
            o(x.type_qualifier_seq),
        ],
    );

    // C++: cv-qualifier-seq
    b.rule(
        x.type_qualifier_seq,
        &[n(x.type_qualifier), o(x.type_qualifier_seq)],
    );

    // C++: cv-qualifier
    b.rule(x.type_qualifier, &[t(KwConst)]);
    b.rule(x.type_qualifier, &[t(KwVolatile)]);
    b.rule_if(d.c99, x.type_qualifier, &[t(KwRestrict)]);
    b.rule_if(d.c11, x.type_qualifier, &[t(KwAtomic)]);

    b.rule(x.declarator_id, &[ot(Ellipsis), n(x.id_expression)]);

    b.rule(x.type_id, &[n(x.type_specifier_seq), o(x.abstract_declarator)]);

    b.rule(x.abstract_declarator, &[n(x.ptr_abstract_declarator)]);
    // split so parameters-and-qualifiers is parsed via
    // noptr-abstract-declarator
    b.rule_if(
        d.cxx11,
        x.abstract_declarator,
        &[
            n(x.noptr_abstract_declarator),
            pn(x.trailing_return_type, PredId::IsFunction),
        ],
    );
    b.rule_if(
        d.cxx11,
        x.abstract_declarator,
        &[n(x.parameters_and_qualifiers), n(x.trailing_return_type)],
    );
    b.rule_if(d.cxx11, x.abstract_declarator, &[n(x.abstract_pack_declarator)]);

    b.rule(x.ptr_abstract_declarator, &[n(x.noptr_abstract_declarator)]);
    b.rule(
        x.ptr_abstract_declarator,
        &[n(x.ptr_operator), o(x.ptr_abstract_declarator)],
    );

    b.rule(
        x.noptr_abstract_declarator,
        &[o(x.noptr_abstract_declarator), n(x.parameters_and_qualifiers)],
    );
    b.rule(
        x.noptr_abstract_declarator,
        &[o(x.noptr_abstract_declarator), n(x.array_declarator)],
    );
    b.rule(x.noptr_abstract_declarator, &[n(x.nested_abstract_declarator)]);

    b.rule(
        x.nested_abstract_declarator,
        &[t(LParen), n(x.ptr_abstract_declarator), t(RParen)],
    );

    b.rule_if(
        d.cxx11,
        x.trailing_return_type,
        &[
            t(Arrow),
            n(x.trailing_type_specifier_seq),
            o(x.abstract_declarator),
        ],
    );

    b.rule_if(d.cxx11, x.ref_qualifier, &[t(Amp)]);
    b.rule_if(d.cxx11, x.ref_qualifier, &[t(AmpAmp)]);

    b.rule_if(
        d.cxx11,
        x.abstract_pack_declarator,
        &[n(x.noptr_abstract_pack_declarator)],
    );
    b.rule_if(
        d.cxx11,
        x.abstract_pack_declarator,
        &[n(x.ptr_operator), n(x.abstract_pack_declarator)],
    );

    b.rule_if(
        d.cxx11,
        x.noptr_abstract_pack_declarator,
        &[
            n(x.noptr_abstract_pack_declarator),
            n(x.parameters_and_qualifiers),
        ],
    );
    b.rule_if(
        d.cxx11,
        x.noptr_abstract_pack_declarator,
        &[n(x.noptr_abstract_pack_declarator), n(x.array_declarator)],
    );
    b.rule_if(d.cxx11, x.noptr_abstract_pack_declarator, &[t(Ellipsis)]);

    b.rule(
        x.parameter_declaration_clause,
        &[o(x.parameter_declaration_list), ot(Ellipsis)],
    );
    b.rule(
        x.parameter_declaration_clause,
        &[n(x.parameter_declaration_list), t(Comma), t(Ellipsis)],
    );

    b.rule(x.parameter_declaration_list, &[n(x.parameter_declaration)]);
    b.rule(
        x.parameter_declaration_list,
        &[
            n(x.parameter_declaration_list),
            t(Comma),
            n(x.parameter_declaration),
        ],
    );

    b.rule(
        x.parameter_declaration,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            n(x.declarator),
        ],
    );
    // parameter with default value
    b.rule_if(
        d.cxx,
        x.parameter_declaration,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            n(x.declarator),
            t(Equal),
            n(x.initializer_clause),
        ],
    );
    b.rule(
        x.parameter_declaration,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            o(x.abstract_declarator),
        ],
    );
    b.rule_if(
        d.cxx,
        x.parameter_declaration,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            o(x.abstract_declarator),
            t(Equal),
            n(x.initializer_clause),
        ],
    );

    // split so decl-specifier-seq is mandatory in the first rule: the
    // declarator-ids of constructor declarations are otherwise mistaken
    // for a decl-specifier-seq
    b.rule(
        x.function_definition,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            n(x.declarator),
            o(x.virt_specifier_seq),
            n(x.function_body),
        ],
    );
    b.rule(
        x.function_definition,
        &[
            o(x.attribute_specifier_seq),
            n(x.declarator),
            o(x.virt_specifier_seq),
            n(x.function_body),
        ],
    );

    b.rule(x.function_body, &[o(x.ctor_initializer), n(x.compound_statement)]);
    b.rule_if(d.cxx, x.function_body, &[n(x.function_try_block)]);
    // C++11 defaulted/deleted functions
    b.rule_if(
        d.cxx11,
        x.function_body,
        &[t(Equal), t(KwDefault), t(Semi)],
    );
    b.rule_if(d.cxx11, x.function_body, &[t(Equal), t(KwDelete), t(Semi)]);

    // C: see initializer-clause
    b.rule(x.initializer, &[n(x.brace_or_equal_initializer)]);
    b.rule_if(
        d.cxx,
        x.initializer,
        &[t(LParen), n(x.expression_list), t(RParen)],
    );

    b.rule(
        x.brace_or_equal_initializer,
        &[t(Equal), n(x.initializer_clause)],
    );
    // C++11 uniform initialisation
    b.rule_if(d.cxx11, x.brace_or_equal_initializer, &[n(x.braced_init_list)]);

    b.rule(x.initializer_clause, &[n(x.assignment_expression)]);
    b.rule(x.initializer_clause, &[n(x.braced_init_list)]);

    b.rule(
        x.initializer_list,
        &[o(x.designation), n(x.initializer_clause), ot(Ellipsis)],
    );
    b.rule(
        x.initializer_list,
        &[
            n(x.initializer_list),
            t(Comma),
            o(x.designation),
            n(x.initializer_clause),
            ot(Ellipsis),
        ],
    );

    b.rule(
        x.braced_init_list,
        &[t(LBrace), n(x.initializer_list), ot(Comma), t(RBrace)],
    );
    b.rule(x.braced_init_list, &[t(LBrace), t(RBrace)]);

    // C99 designated initializers
    b.rule_if(d.c99, x.designation, &[n(x.designator_list), t(Equal)]);

    b.rule_if(d.c99, x.designator_list, &[n(x.designator)]);
    b.rule_if(
        d.c99,
        x.designator_list,
        &[n(x.designator_list), n(x.designator)],
    );

    b.rule_if(
        d.c99,
        x.designator,
        &[t(LSquare), n(x.constant_expression), t(RSquare)],
    );
    b.rule_if(d.c99, x.designator, &[t(Dot), n(x.identifier)]);
}
