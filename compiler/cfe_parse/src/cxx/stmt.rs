//! A.5 Statements [gram.stmt].

use super::{n, o, t, Dialect, Nonterminals};
use crate::grammar::GrammarBuilder;
use cfe_ir::TokenKind::*;

pub(super) fn rules(b: &mut GrammarBuilder, x: &Nonterminals, d: &Dialect) {
    b.rule(x.statement, &[n(x.labeled_statement)]);
    b.rule(
        x.statement,
        &[o(x.attribute_specifier_seq), n(x.expression_statement)],
    );
    b.rule(
        x.statement,
        &[o(x.attribute_specifier_seq), n(x.compound_statement)],
    );
    b.rule(
        x.statement,
        &[o(x.attribute_specifier_seq), n(x.selection_statement)],
    );
    b.rule(
        x.statement,
        &[o(x.attribute_specifier_seq), n(x.iteration_statement)],
    );
    b.rule(
        x.statement,
        &[o(x.attribute_specifier_seq), n(x.jump_statement)],
    );
    // intermixing of declarations with statements
    b.rule_if(d.cxx || d.c99, x.statement, &[n(x.declaration_statement)]);
    b.rule_if(
        d.cxx,
        x.statement,
        &[o(x.attribute_specifier_seq), n(x.try_block)],
    );

    b.rule(
        x.labeled_statement,
        &[
            o(x.attribute_specifier_seq),
            n(x.identifier),
            t(Colon),
            n(x.statement),
        ],
    );
    b.rule(
        x.labeled_statement,
        &[
            o(x.attribute_specifier_seq),
            t(KwCase),
            n(x.constant_expression),
            t(Colon),
            n(x.statement),
        ],
    );
    b.rule(
        x.labeled_statement,
        &[
            o(x.attribute_specifier_seq),
            t(KwDefault),
            t(Colon),
            n(x.statement),
        ],
    );

    b.rule(x.expression_statement, &[o(x.expression), t(Semi)]);

    b.rule_if(
        d.cxx || d.c99,
        x.compound_statement,
        &[t(LBrace), o(x.statement_seq), t(RBrace)],
    );
    // pre-C99: declarations at the top of the block only
    b.rule_if(
        !d.cxx && !d.c99,
        x.compound_statement,
        &[
            t(LBrace),
            o(x.block_declaration_seq),
            o(x.statement_seq),
            t(RBrace),
        ],
    );

    b.rule_if(!d.cxx && !d.c99, x.block_declaration_seq, &[n(x.block_declaration)]);
    b.rule_if(
        !d.cxx && !d.c99,
        x.block_declaration_seq,
        &[n(x.block_declaration_seq), n(x.block_declaration)],
    );

    b.rule(x.statement_seq, &[n(x.statement)]);
    b.rule(x.statement_seq, &[n(x.statement_seq), n(x.statement)]);

    b.rule(
        x.selection_statement,
        &[t(KwIf), t(LParen), n(x.condition), t(RParen), n(x.statement)],
    );
    b.rule(
        x.selection_statement,
        &[
            t(KwIf),
            t(LParen),
            n(x.condition),
            t(RParen),
            n(x.statement),
            t(KwElse),
            n(x.statement),
        ],
    );
    b.rule(
        x.selection_statement,
        &[t(KwSwitch), t(LParen), n(x.condition), t(RParen), n(x.statement)],
    );

    b.rule(x.condition, &[n(x.expression)]);
    // C++: variable declarations inside if/for/while/switch conditions
    b.rule_if(
        d.cxx && !d.cxx11,
        x.condition,
        &[
            n(x.decl_specifier_seq),
            n(x.declarator),
            t(Equal),
            n(x.assignment_expression),
        ],
    );
    // C++11 uniform initialisation
    b.rule_if(
        d.cxx11,
        x.condition,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            n(x.declarator),
            t(Equal),
            n(x.initializer_clause),
        ],
    );
    b.rule_if(
        d.cxx11,
        x.condition,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            n(x.declarator),
            n(x.braced_init_list),
        ],
    );

    b.rule(
        x.iteration_statement,
        &[t(KwWhile), t(LParen), n(x.condition), t(RParen), n(x.statement)],
    );
    b.rule(
        x.iteration_statement,
        &[
            t(KwDo),
            n(x.statement),
            t(KwWhile),
            t(LParen),
            n(x.expression),
            t(RParen),
            t(Semi),
        ],
    );
    b.rule(
        x.iteration_statement,
        &[
            t(KwFor),
            t(LParen),
            n(x.for_init_statement),
            o(x.condition),
            t(Semi),
            o(x.expression),
            t(RParen),
            n(x.statement),
        ],
    );
    // C++11 range-based for
    b.rule_if(
        d.cxx11,
        x.iteration_statement,
        &[
            t(KwFor),
            t(LParen),
            n(x.for_range_declaration),
            t(Colon),
            n(x.for_range_initializer),
            t(RParen),
            n(x.statement),
        ],
    );

    b.rule(x.for_init_statement, &[n(x.expression_statement)]);
    // C++/C99: variable declarations in 'for' statements
    b.rule_if(d.cxx || d.c99, x.for_init_statement, &[n(x.simple_declaration)]);

    b.rule(
        x.for_range_declaration,
        &[
            o(x.attribute_specifier_seq),
            n(x.decl_specifier_seq),
            n(x.declarator),
        ],
    );

    b.rule(x.for_range_initializer, &[n(x.expression)]);
    b.rule(x.for_range_initializer, &[n(x.braced_init_list)]);

    b.rule(x.jump_statement, &[t(KwBreak), t(Semi)]);
    b.rule(x.jump_statement, &[t(KwContinue), t(Semi)]);
    b.rule(x.jump_statement, &[t(KwGoto), n(x.identifier), t(Semi)]);
    b.rule(x.jump_statement, &[t(KwReturn), o(x.expression), t(Semi)]);
    b.rule_if(
        d.cxx11,
        x.jump_statement,
        &[t(KwReturn), n(x.braced_init_list), t(Semi)],
    );

    b.rule(x.declaration_statement, &[n(x.block_declaration)]);
}
