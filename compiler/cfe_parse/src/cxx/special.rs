//! A.10 Special member functions and A.11 Overloading
//! [gram.special] [gram.over].

use super::{n, o, ot, t, Dialect, Nonterminals};
use crate::grammar::GrammarBuilder;
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) {
    b.rule_if(
        d.cxx,
        x.conversion_function_id,
        &[t(KwOperator), n(x.conversion_type_id)],
    );

    b.rule_if(
        d.cxx,
        x.conversion_type_id,
        &[n(x.type_specifier_seq), o(x.conversion_declarator)],
    );

    b.rule_if(
        d.cxx,
        x.conversion_declarator,
        &[n(x.ptr_operator), o(x.conversion_declarator)],
    );

    b.rule_if(d.cxx, x.ctor_initializer, &[t(Colon), n(x.mem_initializer_list)]);

    b.rule_if(
        d.cxx,
        x.mem_initializer_list,
        &[n(x.mem_initializer), ot(Ellipsis)],
    );
    b.rule_if(
        d.cxx,
        x.mem_initializer_list,
        &[
            n(x.mem_initializer),
            ot(Ellipsis),
            t(Comma),
            n(x.mem_initializer_list),
        ],
    );

    b.rule_if(
        d.cxx,
        x.mem_initializer,
        &[
            n(x.mem_initializer_id),
            t(LParen),
            o(x.expression_list),
            t(RParen),
        ],
    );
    b.rule_if(
        d.cxx11,
        x.mem_initializer,
        &[n(x.mem_initializer_id), n(x.braced_init_list)],
    );

    b.rule_if(d.cxx, x.mem_initializer_id, &[n(x.class_or_decltype)]);
    b.rule_if(d.cxx, x.mem_initializer_id, &[n(x.identifier)]);

    // rules moved from unqualified-id
    b.rule_if(d.cxx, x.destructor_id, &[t(Tilde), n(x.class_name)]);
    b.rule_if(d.cxx, x.destructor_id, &[t(Tilde), n(x.undeclared_name)]);
    b.rule_if(d.cxx11, x.destructor_id, &[t(Tilde), n(x.decltype_specifier)]);

    // A.11 Overloading [gram.over]
    b.rule_if(
        d.cxx,
        x.operator_function_id,
        &[t(KwOperator), n(x.overloadable_operator)],
    );

    b.rule_if(d.cxx, x.overloadable_operator, &[t(KwNew)]);
    b.rule_if(d.cxx, x.overloadable_operator, &[t(KwDelete)]);
    b.rule_if(
        d.cxx,
        x.overloadable_operator,
        &[t(KwNew), t(LSquare), t(RSquare)],
    );
    b.rule_if(
        d.cxx,
        x.overloadable_operator,
        &[t(KwDelete), t(LSquare), t(RSquare)],
    );
    for op in [
        Plus, Minus, Star, Slash, Percent, Caret, Amp, Pipe, Tilde, Exclaim, Equal, Less,
        Greater, PlusEqual, MinusEqual, StarEqual, SlashEqual, PercentEqual, CaretEqual,
        AmpEqual, PipeEqual, LShift, RShift, LShiftEqual, RShiftEqual, EqualEqual,
        ExclaimEqual, LessEqual, GreaterEqual, AmpAmp, PipePipe, PlusPlus, MinusMinus, Comma,
        ArrowStar, Arrow,
    ] {
        b.rule_if(d.cxx, x.overloadable_operator, &[t(op)]);
    }
    b.rule_if(d.cxx, x.overloadable_operator, &[t(LParen), t(RParen)]);
    b.rule_if(d.cxx, x.overloadable_operator, &[t(LSquare), t(RSquare)]);

    b.rule_if(
        d.cxx11,
        x.literal_operator_id,
        &[t(KwOperator), n(x.string_literal), n(x.identifier)],
    );
}
