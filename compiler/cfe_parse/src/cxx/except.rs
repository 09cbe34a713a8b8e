//! A.13 Exception handling [gram.except].

use super::{n, o, ot, t, Dialect, Nonterminals};
use crate::grammar::GrammarBuilder;
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) {
    b.rule_if(
        d.cxx,
        x.try_block,
        &[t(KwTry), n(x.compound_statement), n(x.handler_seq)],
    );

    b.rule_if(
        d.cxx,
        x.function_try_block,
        &[
            t(KwTry),
            o(x.ctor_initializer),
            n(x.compound_statement),
            n(x.handler_seq),
        ],
    );

    b.rule_if(d.cxx, x.handler_seq, &[n(x.handler), o(x.handler_seq)]);

    b.rule_if(
        d.cxx,
        x.handler,
        &[
            t(KwCatch),
            t(LParen),
            n(x.exception_declaration),
            t(RParen),
            n(x.compound_statement),
        ],
    );

    b.rule_if(
        d.cxx,
        x.exception_declaration,
        &[
            o(x.attribute_specifier_seq),
            n(x.type_specifier_seq),
            n(x.declarator),
        ],
    );
    b.rule_if(
        d.cxx,
        x.exception_declaration,
        &[
            o(x.attribute_specifier_seq),
            n(x.type_specifier_seq),
            o(x.abstract_declarator),
        ],
    );

    b.rule_if(
        d.cxx,
        x.throw_expression,
        &[t(KwThrow), o(x.assignment_expression)],
    );

    b.rule_if(
        d.cxx,
        x.exception_specification,
        &[n(x.dynamic_exception_specification)],
    );
    b.rule_if(
        d.cxx11,
        x.exception_specification,
        &[n(x.noexcept_specification)],
    );

    b.rule_if(
        d.cxx,
        x.dynamic_exception_specification,
        &[t(KwThrow), t(LParen), o(x.type_id_list), t(RParen)],
    );

    b.rule_if(d.cxx, x.type_id_list, &[n(x.type_id), ot(Ellipsis)]);
    b.rule_if(
        d.cxx,
        x.type_id_list,
        &[n(x.type_id_list), n(x.type_id), ot(Ellipsis)],
    );

    b.rule_if(
        d.cxx11,
        x.noexcept_specification,
        &[t(KwNoexcept), t(LParen), n(x.constant_expression), t(RParen)],
    );
    b.rule_if(d.cxx11, x.noexcept_specification, &[t(KwNoexcept)]);
}
