//! A.4 Expressions [gram.expr].
//!
//! The binary-operator precedence ladder carries rule tags so the literal
//! engine can identify equality, relational, additive, multiplicative and
//! shift reductions.

use super::{n, o, ot, t, Dialect, Nonterminals, RuleTags};
use crate::grammar::{GrammarBuilder, RuleTag};
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) -> RuleTags {
    b.rule(x.primary_expression, &[n(x.literal)]);
    b.rule(x.primary_expression, &[n(x.paren_expression)]);
    b.rule(x.primary_expression, &[n(x.id_expression)]);
    b.rule_if(d.cxx, x.primary_expression, &[t(KwThis)]);
    b.rule_if(d.cxx11, x.primary_expression, &[n(x.lambda_expression)]);
    b.rule_if(d.c11, x.primary_expression, &[n(x.generic_selection)]);

    b.rule_if(
        d.c11,
        x.generic_selection,
        &[
            t(KwGeneric),
            t(LParen),
            n(x.assignment_expression),
            t(Comma),
            n(x.generic_assoc_list),
            t(RParen),
        ],
    );

    b.rule_if(d.c11, x.generic_assoc_list, &[n(x.generic_association)]);
    b.rule_if(
        d.c11,
        x.generic_assoc_list,
        &[n(x.generic_assoc_list), t(Comma), n(x.generic_association)],
    );

    b.rule_if(
        d.c11,
        x.generic_association,
        &[t(KwDefault), t(Colon), n(x.assignment_expression)],
    );
    b.rule_if(
        d.c11,
        x.generic_association,
        &[n(x.type_id), t(Colon), n(x.assignment_expression)],
    );

    b.rule(x.paren_expression, &[t(LParen), n(x.expression), t(RParen)]);

    b.rule(x.id_expression, &[n(x.unqualified_id)]);
    b.rule_if(d.cxx, x.id_expression, &[n(x.qualified_id)]);

    b.rule(x.unqualified_id, &[n(x.identifier)]);
    b.rule_if(d.cxx, x.unqualified_id, &[n(x.operator_function_id)]);
    b.rule_if(d.cxx, x.unqualified_id, &[n(x.conversion_function_id)]);
    b.rule_if(d.cxx11, x.unqualified_id, &[n(x.literal_operator_id)]);
    b.rule_if(d.cxx, x.unqualified_id, &[n(x.destructor_id)]);
    b.rule_if(d.cxx, x.unqualified_id, &[n(x.template_id)]);

    b.rule(x.postfix_expression, &[n(x.primary_expression)]);
    b.rule(x.postfix_expression, &[n(x.postfix_expression), n(x.array_subscript)]);
    b.rule(x.postfix_expression, &[n(x.postfix_expression), n(x.function_call)]);
    b.rule(x.postfix_expression, &[n(x.postfix_expression), n(x.member_access)]);
    // C++ function-style type casting / object construction
    b.rule_if(
        d.cxx,
        x.postfix_expression,
        &[
            n(x.simple_type_specifier),
            t(LParen),
            o(x.expression_list),
            t(RParen),
        ],
    );
    b.rule_if(
        d.cxx,
        x.postfix_expression,
        &[
            n(x.typename_specifier),
            t(LParen),
            o(x.expression_list),
            t(RParen),
        ],
    );
    // C++11 uniform initialisation
    b.rule_if(
        d.cxx11,
        x.postfix_expression,
        &[n(x.simple_type_specifier), n(x.braced_init_list)],
    );
    b.rule_if(
        d.cxx11,
        x.postfix_expression,
        &[n(x.typename_specifier), n(x.braced_init_list)],
    );
    // post-increment and decrement
    b.rule(x.postfix_expression, &[n(x.postfix_expression), t(PlusPlus)]);
    b.rule(x.postfix_expression, &[n(x.postfix_expression), t(MinusMinus)]);
    // C++ dynamic_/static_/reinterpret_/const_cast<T>(x)
    for cast in [KwDynamicCast, KwStaticCast, KwReinterpretCast, KwConstCast] {
        b.rule_if(
            d.cxx,
            x.postfix_expression,
            &[
                t(cast),
                t(Less),
                n(x.type_id),
                t(Greater),
                t(LParen),
                n(x.expression),
                t(RParen),
            ],
        );
    }
    // C++ typeid(x) and typeid(T)
    b.rule_if(
        d.cxx,
        x.postfix_expression,
        &[t(KwTypeid), t(LParen), n(x.expression), t(RParen)],
    );
    b.rule_if(
        d.cxx,
        x.postfix_expression,
        &[t(KwTypeid), t(LParen), n(x.type_id), t(RParen)],
    );
    // C99 compound literal
    b.rule_if(
        d.c99,
        x.postfix_expression,
        &[
            t(LParen),
            n(x.type_id),
            t(RParen),
            t(LBrace),
            n(x.initializer_list),
            ot(Comma),
            t(RBrace),
        ],
    );

    b.rule(x.array_subscript, &[t(LSquare), n(x.expression), t(RSquare)]);
    b.rule_if(
        d.cxx11,
        x.array_subscript,
        &[t(LSquare), n(x.braced_init_list), t(RSquare)],
    );

    b.rule(x.function_call, &[t(LParen), o(x.expression_list), t(RParen)]);

    b.rule(x.member_access, &[t(Dot), ot(KwTemplate), n(x.id_expression)]);
    b.rule_if(d.cxx, x.member_access, &[t(Dot), n(x.pseudo_destructor_name)]);
    b.rule(x.member_access, &[t(Arrow), ot(KwTemplate), n(x.id_expression)]);
    b.rule_if(d.cxx, x.member_access, &[t(Arrow), n(x.pseudo_destructor_name)]);

    b.rule(x.expression_list, &[n(x.initializer_list)]);

    b.rule(x.unary_expression, &[n(x.postfix_expression)]);
    // pre-increment and decrement
    b.rule(x.unary_expression, &[t(PlusPlus), n(x.cast_expression)]);
    b.rule(x.unary_expression, &[t(MinusMinus), n(x.cast_expression)]);
    b.rule(x.unary_expression, &[n(x.unary_operator), n(x.cast_expression)]);
    // sizeof(expr) and sizeof(type)
    b.rule(x.unary_expression, &[t(KwSizeof), n(x.unary_expression)]);
    b.rule(
        x.unary_expression,
        &[t(KwSizeof), t(LParen), n(x.type_id), t(RParen)],
    );
    // C++11 sizeof template parameter pack
    b.rule_if(
        d.cxx11,
        x.unary_expression,
        &[t(KwSizeof), t(Ellipsis), t(LParen), n(x.identifier), t(RParen)],
    );
    b.rule_if(
        d.c11_or_cxx11,
        x.unary_expression,
        &[t(KwAlignof), t(LParen), n(x.type_id), t(RParen)],
    );
    b.rule_if(d.cxx11, x.unary_expression, &[n(x.noexcept_expression)]);
    b.rule_if(d.cxx, x.unary_expression, &[n(x.new_expression)]);
    b.rule_if(d.cxx, x.unary_expression, &[n(x.delete_expression)]);

    for op in [Star, Amp, Plus, Minus, Exclaim, Tilde] {
        b.rule(x.unary_operator, &[t(op)]);
    }

    b.rule_if(
        d.cxx,
        x.qualified_id,
        &[n(x.nested_name_specifier), ot(KwTemplate), n(x.unqualified_id)],
    );

    b.rule_if(d.cxx, x.nested_name_specifier, &[t(ColonColon)]);
    b.rule_if(d.cxx, x.nested_name_specifier, &[n(x.type_name), t(ColonColon)]);
    b.rule_if(
        d.cxx,
        x.nested_name_specifier,
        &[n(x.namespace_name), t(ColonColon)],
    );
    b.rule_if(
        d.cxx,
        x.nested_name_specifier,
        &[n(x.decltype_specifier), t(ColonColon)],
    );
    b.rule_if(
        d.cxx,
        x.nested_name_specifier,
        &[n(x.nested_name_specifier), n(x.identifier), t(ColonColon)],
    );
    b.rule_if(
        d.cxx,
        x.nested_name_specifier,
        &[
            n(x.nested_name_specifier),
            ot(KwTemplate),
            n(x.simple_template_id),
            t(ColonColon),
        ],
    );

    b.rule_if(
        d.cxx,
        x.pseudo_destructor_name,
        &[
            o(x.nested_name_specifier),
            n(x.type_name),
            t(ColonColon),
            t(Tilde),
            n(x.type_name),
        ],
    );
    b.rule_if(
        d.cxx,
        x.pseudo_destructor_name,
        &[
            n(x.nested_name_specifier),
            t(KwTemplate),
            n(x.simple_template_id),
            t(ColonColon),
            t(Tilde),
            n(x.type_name),
        ],
    );
    b.rule_if(
        d.cxx,
        x.pseudo_destructor_name,
        &[o(x.nested_name_specifier), t(Tilde), n(x.type_name)],
    );
    b.rule_if(
        d.cxx11,
        x.pseudo_destructor_name,
        &[t(Tilde), n(x.decltype_specifier)],
    );

    b.rule_if(
        d.cxx,
        x.new_expression,
        &[
            ot(ColonColon),
            t(KwNew),
            o(x.new_placement),
            n(x.new_type_id),
            o(x.new_initializer),
        ],
    );
    b.rule_if(
        d.cxx,
        x.new_expression,
        &[
            ot(ColonColon),
            t(KwNew),
            o(x.new_placement),
            t(LParen),
            n(x.type_id),
            t(RParen),
            o(x.new_initializer),
        ],
    );

    b.rule_if(
        d.cxx,
        x.new_placement,
        &[t(LParen), n(x.expression_list), t(RParen)],
    );

    b.rule_if(
        d.cxx,
        x.new_type_id,
        &[n(x.type_specifier_seq), o(x.new_declarator)],
    );

    b.rule_if(d.cxx, x.new_declarator, &[n(x.ptr_operator), o(x.new_declarator)]);
    b.rule_if(d.cxx, x.new_declarator, &[n(x.noptr_new_declarator)]);

    b.rule_if(
        d.cxx,
        x.noptr_new_declarator,
        &[
            t(LSquare),
            n(x.expression),
            t(RSquare),
            o(x.attribute_specifier_seq),
        ],
    );
    b.rule_if(
        d.cxx,
        x.noptr_new_declarator,
        &[
            n(x.noptr_new_declarator),
            t(LSquare),
            n(x.constant_expression),
            t(RSquare),
            o(x.attribute_specifier_seq),
        ],
    );

    b.rule_if(
        d.cxx,
        x.new_initializer,
        &[t(LParen), o(x.expression_list), t(RParen)],
    );
    b.rule_if(d.cxx, x.new_initializer, &[n(x.braced_init_list)]);

    b.rule_if(
        d.cxx,
        x.delete_expression,
        &[ot(ColonColon), t(KwDelete), n(x.cast_expression)],
    );
    b.rule_if(
        d.cxx,
        x.delete_expression,
        &[
            ot(ColonColon),
            t(KwDelete),
            t(LSquare),
            t(RSquare),
            n(x.cast_expression),
        ],
    );

    b.rule_if(
        d.cxx11,
        x.lambda_expression,
        &[
            n(x.lambda_introducer),
            o(x.lambda_declarator),
            n(x.compound_statement),
        ],
    );

    b.rule_if(
        d.cxx11,
        x.lambda_introducer,
        &[t(LSquare), o(x.lambda_capture), t(RSquare)],
    );

    b.rule_if(d.cxx11, x.lambda_capture, &[n(x.capture_default)]);
    b.rule_if(d.cxx11, x.lambda_capture, &[n(x.capture_list)]);
    b.rule_if(
        d.cxx11,
        x.lambda_capture,
        &[n(x.capture_default), t(Comma), n(x.capture_list)],
    );

    b.rule_if(d.cxx11, x.capture_default, &[t(Amp)]);
    b.rule_if(d.cxx11, x.capture_default, &[t(Equal)]);

    b.rule_if(d.cxx11, x.capture_list, &[n(x.capture), ot(Ellipsis)]);
    b.rule_if(
        d.cxx11,
        x.capture_list,
        &[n(x.capture_list), t(Comma), n(x.capture), ot(Ellipsis)],
    );

    b.rule_if(d.cxx11, x.capture, &[n(x.simple_capture)]);
    b.rule_if(d.cxx11, x.capture, &[n(x.init_capture)]);

    b.rule_if(d.cxx11, x.simple_capture, &[n(x.identifier)]);
    b.rule_if(d.cxx11, x.simple_capture, &[t(Amp), n(x.identifier)]);
    b.rule_if(d.cxx11, x.simple_capture, &[t(KwThis)]);

    b.rule_if(d.cxx11, x.init_capture, &[n(x.identifier), n(x.initializer)]);
    b.rule_if(
        d.cxx11,
        x.init_capture,
        &[t(Amp), n(x.identifier), n(x.initializer)],
    );

    b.rule_if(
        d.cxx11,
        x.lambda_declarator,
        &[
            t(LParen),
            n(x.parameter_declaration_clause),
            t(RParen),
            ot(KwMutable),
            o(x.exception_specification),
            o(x.attribute_specifier_seq),
            o(x.trailing_return_type),
        ],
    );

    b.rule_if(
        d.cxx11,
        x.noexcept_expression,
        &[t(KwNoexcept), t(LBrace), n(x.expression), t(RBrace)],
    );

    b.rule(x.cast_expression, &[n(x.unary_expression)]);
    b.rule(
        x.cast_expression,
        &[t(LParen), n(x.type_id), t(RParen), n(x.cast_expression)],
    );

    b.rule(x.pm_expression, &[n(x.cast_expression)]);
    b.rule_if(
        d.cxx,
        x.pm_expression,
        &[n(x.pm_expression), t(DotStar), n(x.cast_expression)],
    );
    b.rule_if(
        d.cxx,
        x.pm_expression,
        &[n(x.pm_expression), t(ArrowStar), n(x.cast_expression)],
    );

    b.rule(x.multiplicative_expression, &[n(x.pm_expression)]);
    let multiply = b.tagged_rule(
        x.multiplicative_expression,
        &[n(x.multiplicative_expression), t(Star), n(x.pm_expression)],
        RuleTag::Multiply,
    );
    let divide = b.tagged_rule(
        x.multiplicative_expression,
        &[n(x.multiplicative_expression), t(Slash), n(x.pm_expression)],
        RuleTag::Divide,
    );
    let modulo = b.tagged_rule(
        x.multiplicative_expression,
        &[n(x.multiplicative_expression), t(Percent), n(x.pm_expression)],
        RuleTag::Modulo,
    );

    b.rule(x.additive_expression, &[n(x.multiplicative_expression)]);
    let binary_add = b.tagged_rule(
        x.additive_expression,
        &[n(x.additive_expression), t(Plus), n(x.multiplicative_expression)],
        RuleTag::BinaryAdd,
    );
    let binary_subtract = b.tagged_rule(
        x.additive_expression,
        &[n(x.additive_expression), t(Minus), n(x.multiplicative_expression)],
        RuleTag::BinarySubtract,
    );

    b.rule(x.shift_expression, &[n(x.additive_expression)]);
    let left_shift = b.tagged_rule(
        x.shift_expression,
        &[n(x.shift_expression), t(LShift), n(x.additive_expression)],
        RuleTag::LeftShift,
    );
    let right_shift = b.tagged_rule(
        x.shift_expression,
        &[n(x.shift_expression), t(RShift), n(x.additive_expression)],
        RuleTag::RightShift,
    );

    b.rule(x.relational_expression, &[n(x.shift_expression)]);
    let less = b.tagged_rule(
        x.relational_expression,
        &[n(x.relational_expression), t(Less), n(x.shift_expression)],
        RuleTag::Less,
    );
    let greater = b.tagged_rule(
        x.relational_expression,
        &[n(x.relational_expression), t(Greater), n(x.shift_expression)],
        RuleTag::Greater,
    );
    let less_or_equal = b.tagged_rule(
        x.relational_expression,
        &[n(x.relational_expression), t(LessEqual), n(x.shift_expression)],
        RuleTag::LessOrEqual,
    );
    let greater_or_equal = b.tagged_rule(
        x.relational_expression,
        &[n(x.relational_expression), t(GreaterEqual), n(x.shift_expression)],
        RuleTag::GreaterOrEqual,
    );

    b.rule(x.equality_expression, &[n(x.relational_expression)]);
    let equal = b.tagged_rule(
        x.equality_expression,
        &[n(x.equality_expression), t(EqualEqual), n(x.relational_expression)],
        RuleTag::Equal,
    );
    let not_equal = b.tagged_rule(
        x.equality_expression,
        &[n(x.equality_expression), t(ExclaimEqual), n(x.relational_expression)],
        RuleTag::NotEqual,
    );

    b.rule(x.and_expression, &[n(x.equality_expression)]);
    b.rule(
        x.and_expression,
        &[n(x.and_expression), t(Amp), n(x.equality_expression)],
    );

    b.rule(x.exclusive_or_expression, &[n(x.and_expression)]);
    b.rule(
        x.exclusive_or_expression,
        &[n(x.exclusive_or_expression), t(Caret), n(x.and_expression)],
    );

    b.rule(x.inclusive_or_expression, &[n(x.exclusive_or_expression)]);
    b.rule(
        x.inclusive_or_expression,
        &[n(x.inclusive_or_expression), t(Pipe), n(x.exclusive_or_expression)],
    );

    b.rule(x.logical_and_expression, &[n(x.inclusive_or_expression)]);
    b.rule(
        x.logical_and_expression,
        &[n(x.logical_and_expression), t(AmpAmp), n(x.inclusive_or_expression)],
    );

    b.rule(x.logical_or_expression, &[n(x.logical_and_expression)]);
    b.rule(
        x.logical_or_expression,
        &[n(x.logical_or_expression), t(PipePipe), n(x.logical_and_expression)],
    );

    b.rule(x.conditional_expression, &[n(x.logical_or_expression)]);
    b.rule_if(
        d.cxx,
        x.conditional_expression,
        &[
            n(x.logical_or_expression),
            t(Question),
            n(x.expression),
            t(Colon),
            n(x.assignment_expression),
        ],
    );
    b.rule_if(
        !d.cxx,
        x.conditional_expression,
        &[
            n(x.logical_or_expression),
            t(Question),
            n(x.expression),
            t(Colon),
            n(x.conditional_expression),
        ],
    );

    b.rule(x.assignment_expression, &[n(x.conditional_expression)]);
    b.rule_if(
        d.cxx,
        x.assignment_expression,
        &[
            n(x.logical_or_expression),
            n(x.assignment_operator),
            n(x.initializer_clause),
        ],
    );
    b.rule_if(d.cxx, x.assignment_expression, &[n(x.throw_expression)]);
    b.rule_if(
        !d.cxx,
        x.assignment_expression,
        &[
            n(x.unary_expression),
            n(x.assignment_operator),
            n(x.assignment_expression),
        ],
    );

    for op in [
        Equal, StarEqual, SlashEqual, PercentEqual, PlusEqual, MinusEqual, RShiftEqual,
        LShiftEqual, AmpEqual, CaretEqual, PipeEqual,
    ] {
        b.rule(x.assignment_operator, &[t(op)]);
    }

    b.rule(x.expression, &[n(x.assignment_expression)]);
    b.rule(
        x.expression,
        &[n(x.expression), t(Comma), n(x.assignment_expression)],
    );

    b.rule(x.constant_expression, &[n(x.conditional_expression)]);

    RuleTags {
        equal,
        not_equal,
        less,
        less_or_equal,
        greater,
        greater_or_equal,
        binary_add,
        binary_subtract,
        left_shift,
        right_shift,
        multiply,
        divide,
        modulo,
    }
}
