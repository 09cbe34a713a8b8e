//! A.12 Templates [gram.temp].
//!
//! Every list-closing `>` is a `TemplateCloseAngle`-predicated terminal in
//! C++11 and later: the predicate rewrites a SPLITABLE `>>`, `>=` or `>>=`
//! into `>` plus a residual token, letting nested argument lists close
//! without an ambiguous production explosion.

use super::{n, o, ot, p, t, Dialect, Nonterminals};
use crate::grammar::{GrammarBuilder, PredId};
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) {
    let close = p(Greater, PredId::TemplateCloseAngle);

    b.rule_if(
        d.cxx && !d.cxx11,
        x.template_declaration,
        &[
            ot(KwExport),
            t(KwTemplate),
            t(Less),
            n(x.template_parameter_list),
            t(Greater),
            n(x.declaration),
        ],
    );
    b.rule_if(
        d.cxx11,
        x.template_declaration,
        &[
            t(KwTemplate),
            t(Less),
            n(x.template_parameter_list),
            close,
            n(x.declaration),
        ],
    );

    b.rule_if(d.cxx, x.template_parameter_list, &[n(x.template_parameter)]);
    b.rule_if(
        d.cxx,
        x.template_parameter_list,
        &[
            n(x.template_parameter_list),
            t(Comma),
            n(x.template_parameter),
        ],
    );

    b.rule_if(d.cxx, x.template_parameter, &[n(x.type_parameter)]);
    // non-type template parameter
    b.rule_if(d.cxx, x.template_parameter, &[n(x.parameter_declaration)]);

    // template type parameters
    b.rule_if(
        d.cxx,
        x.type_parameter,
        &[t(KwClass), ot(Ellipsis), o(x.identifier)],
    );
    b.rule_if(
        d.cxx,
        x.type_parameter,
        &[t(KwClass), o(x.identifier), t(Equal), n(x.type_id)],
    );
    b.rule_if(
        d.cxx,
        x.type_parameter,
        &[t(KwTypename), ot(Ellipsis), o(x.identifier)],
    );
    b.rule_if(
        d.cxx,
        x.type_parameter,
        &[t(KwTypename), o(x.identifier), t(Equal), n(x.type_id)],
    );
    // template template parameters
    b.rule_if(
        d.cxx,
        x.type_parameter,
        &[
            t(KwTemplate),
            t(Less),
            n(x.template_parameter_list),
            close,
            t(KwClass),
            ot(Ellipsis),
            o(x.identifier),
        ],
    );
    b.rule_if(
        d.cxx,
        x.type_parameter,
        &[
            t(KwTemplate),
            t(Less),
            n(x.template_parameter_list),
            close,
            t(KwClass),
            o(x.identifier),
            t(Equal),
            n(x.id_expression),
        ],
    );

    b.rule_if(
        d.cxx,
        x.simple_template_id,
        &[
            n(x.template_name),
            t(Less),
            o(x.template_argument_list),
            close,
        ],
    );
    b.rule_if(
        d.cxx,
        x.simple_template_id,
        &[
            n(x.undeclared_name),
            t(Less),
            o(x.template_argument_list),
            close,
        ],
    );

    b.rule_if(d.cxx, x.template_id, &[n(x.simple_template_id)]);
    b.rule_if(
        d.cxx,
        x.template_id,
        &[
            n(x.operator_function_id),
            t(Less),
            o(x.template_argument_list),
            close,
        ],
    );
    b.rule_if(
        d.cxx11,
        x.template_id,
        &[
            n(x.literal_operator_id),
            t(Less),
            o(x.template_argument_list),
            close,
        ],
    );

    // template-name: see section A.1 Keywords [gram.key]

    b.rule_if(
        d.cxx,
        x.template_argument_list,
        &[n(x.template_argument), ot(Ellipsis)],
    );
    b.rule_if(
        d.cxx,
        x.template_argument_list,
        &[
            n(x.template_argument_list),
            t(Comma),
            n(x.template_argument),
            ot(Ellipsis),
        ],
    );

    b.rule_if(d.cxx, x.template_argument, &[n(x.type_id)]);
    b.rule_if(d.cxx, x.template_argument, &[n(x.constant_expression)]);
    b.rule_if(d.cxx, x.template_argument, &[n(x.id_expression)]);

    b.rule_if(
        d.cxx,
        x.typename_specifier,
        &[t(KwTypename), n(x.nested_name_specifier), n(x.identifier)],
    );
    b.rule_if(
        d.cxx,
        x.typename_specifier,
        &[
            t(KwTypename),
            n(x.nested_name_specifier),
            ot(KwTemplate),
            n(x.simple_template_id),
        ],
    );

    b.rule_if(
        d.cxx && !d.cxx11,
        x.explicit_instantiation,
        &[t(KwTemplate), n(x.declaration)],
    );
    b.rule_if(
        d.cxx11,
        x.explicit_instantiation,
        &[ot(KwExtern), t(KwTemplate), n(x.declaration)],
    );

    b.rule_if(
        d.cxx,
        x.explicit_specialization,
        &[t(KwTemplate), t(Less), t(Greater), n(x.declaration)],
    );
}
