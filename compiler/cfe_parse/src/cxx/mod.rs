//! The combined C89–C11 / C++98–C++17 grammar.
//!
//! Transcribed from the C++17 standard's Annex A with the factorings that
//! keep the SPPF engine honest:
//!
//! - `simple_declaration`, `member_declaration` and `function_definition`
//!   are split into forms with a mandatory `decl_specifier_seq` and forms
//!   without one, because a constructor's declarator-id is otherwise
//!   mis-parsed as a decl-specifier-seq;
//! - `noptr_declarator` owns parameter lists, and the C++11
//!   trailing-return-type form is only reachable through an `IsFunction`
//!   predicate;
//! - the binary-operator expression rules carry tags so operator-aware
//!   tooling (the literal engine) can identify them.
//!
//! Every alternative is gated on the dialect; gated-off alternatives are
//! elided when the grammar is built.

mod class;
mod dcl;
mod decl;
mod except;
mod expr;
mod lexical;
mod special;
mod stmt;
mod template_;

use crate::grammar::{
    ActionId, Grammar, GrammarBuilder, NtFlags, NtId, PredId, RuleId, Symbol,
};
use cfe_lexer::Options;
use cfe_ir::TokenKind;

// Compact symbol constructors for the grammar sections.

fn t(kind: TokenKind) -> Symbol {
    Symbol::Token(kind)
}

fn n(id: NtId) -> Symbol {
    Symbol::Nt(id)
}

fn o(id: NtId) -> Symbol {
    Symbol::OptNt(id)
}

fn ot(kind: TokenKind) -> Symbol {
    Symbol::OptToken(kind)
}

fn p(kind: TokenKind, pred: PredId) -> Symbol {
    Symbol::PredToken(kind, pred)
}

fn pn(id: NtId, pred: PredId) -> Symbol {
    Symbol::PredNt(id, pred)
}

fn any(pred: PredId) -> Symbol {
    Symbol::AnyToken(pred)
}

/// Dialect gates in the shape the rule tables use.
#[derive(Clone, Copy, Debug)]
pub struct Dialect {
    pub c: bool,
    pub c99: bool,
    pub c11: bool,
    pub cxx: bool,
    pub cxx11: bool,
    pub cxx14: bool,
    pub cxx17: bool,
    pub long_long: bool,
    pub binary_literals: bool,
    pub utf8_char_literals: bool,
    pub inline_functions: bool,
    pub c11_or_cxx11: bool,
}

impl Dialect {
    fn from_options(options: &Options) -> Self {
        use cfe_lexer::Features;
        Dialect {
            c: options.lang_c(),
            c99: options.std_c99(),
            c11: options.std_c11(),
            cxx: options.lang_cxx(),
            cxx11: options.std_cxx11(),
            cxx14: options.std_cxx14(),
            cxx17: options.std_cxx17(),
            long_long: options.have(Features::LONG_LONG),
            binary_literals: options.have(Features::BINARY_LITERALS),
            utf8_char_literals: options.have(Features::UTF8_CHAR_LITERALS),
            inline_functions: options.have(Features::INLINE_FUNCTIONS),
            c11_or_cxx11: options.std_c11() || options.std_cxx11(),
        }
    }
}

/// Rule ids of the tagged binary-operator alternatives.
#[derive(Clone, Copy, Debug)]
pub struct RuleTags {
    pub equal: RuleId,
    pub not_equal: RuleId,
    pub less: RuleId,
    pub less_or_equal: RuleId,
    pub greater: RuleId,
    pub greater_or_equal: RuleId,
    pub binary_add: RuleId,
    pub binary_subtract: RuleId,
    pub left_shift: RuleId,
    pub right_shift: RuleId,
    pub multiply: RuleId,
    pub divide: RuleId,
    pub modulo: RuleId,
}

/// Every nonterminal of the grammar, by standard Annex A section.
#[allow(clippy::struct_field_names)]
pub struct Nonterminals {
    // A.1 Keywords [gram.key]
    pub typedef_name: NtId,
    pub namespace_name: NtId,
    pub original_namespace_name: NtId,
    pub namespace_alias: NtId,
    pub class_name: NtId,
    pub enum_name: NtId,
    pub template_name: NtId,
    pub undeclared_name: NtId,

    // A.2 Lexical conventions [gram.lex]
    pub identifier: NtId,
    pub literal: NtId,
    pub numeric_literal: NtId,
    pub character_literal: NtId,
    pub string_literal: NtId,
    pub boolean_literal: NtId,
    pub pointer_literal: NtId,
    pub user_defined_literal: NtId,
    pub ud_suffix: NtId,

    // A.3 Basic concepts [gram.basic]
    pub translation_unit: NtId,

    // A.4 Expressions [gram.expr]
    pub primary_expression: NtId,
    pub paren_expression: NtId,
    pub generic_selection: NtId,
    pub generic_assoc_list: NtId,
    pub generic_association: NtId,
    pub id_expression: NtId,
    pub unqualified_id: NtId,
    pub qualified_id: NtId,
    pub nested_name_specifier: NtId,
    pub lambda_expression: NtId,
    pub lambda_introducer: NtId,
    pub lambda_capture: NtId,
    pub capture_default: NtId,
    pub capture_list: NtId,
    pub capture: NtId,
    pub simple_capture: NtId,
    pub init_capture: NtId,
    pub lambda_declarator: NtId,
    pub postfix_expression: NtId,
    pub array_subscript: NtId,
    pub function_call: NtId,
    pub member_access: NtId,
    pub expression_list: NtId,
    pub pseudo_destructor_name: NtId,
    pub unary_expression: NtId,
    pub unary_operator: NtId,
    pub new_expression: NtId,
    pub new_placement: NtId,
    pub new_type_id: NtId,
    pub new_declarator: NtId,
    pub noptr_new_declarator: NtId,
    pub new_initializer: NtId,
    pub delete_expression: NtId,
    pub noexcept_expression: NtId,
    pub cast_expression: NtId,
    pub pm_expression: NtId,
    pub multiplicative_expression: NtId,
    pub additive_expression: NtId,
    pub shift_expression: NtId,
    pub relational_expression: NtId,
    pub equality_expression: NtId,
    pub and_expression: NtId,
    pub exclusive_or_expression: NtId,
    pub inclusive_or_expression: NtId,
    pub logical_and_expression: NtId,
    pub logical_or_expression: NtId,
    pub conditional_expression: NtId,
    pub assignment_expression: NtId,
    pub assignment_operator: NtId,
    pub expression: NtId,
    pub constant_expression: NtId,

    // A.5 Statements [gram.stmt]
    pub statement: NtId,
    pub labeled_statement: NtId,
    pub expression_statement: NtId,
    pub compound_statement: NtId,
    pub block_declaration_seq: NtId,
    pub statement_seq: NtId,
    pub selection_statement: NtId,
    pub condition: NtId,
    pub iteration_statement: NtId,
    pub for_init_statement: NtId,
    pub for_range_declaration: NtId,
    pub for_range_initializer: NtId,
    pub jump_statement: NtId,
    pub declaration_statement: NtId,

    // A.6 Declarations [gram.dcl]
    pub declaration_seq: NtId,
    pub declaration: NtId,
    pub block_declaration: NtId,
    pub alias_declaration: NtId,
    pub simple_declaration: NtId,
    pub static_assert_declaration: NtId,
    pub empty_declaration: NtId,
    pub attribute_declaration: NtId,
    pub decl_specifier: NtId,
    pub decl_specifier_seq: NtId,
    pub storage_class_specifier: NtId,
    pub function_specifier: NtId,
    pub type_specifier: NtId,
    pub trailing_type_specifier: NtId,
    pub type_specifier_seq: NtId,
    pub trailing_type_specifier_seq: NtId,
    pub simple_type_specifier: NtId,
    pub ud_type_specifier: NtId,
    pub type_name: NtId,
    pub decltype_specifier: NtId,
    pub elaborated_type_specifier: NtId,
    pub atomic_type_specifier: NtId,
    pub enum_specifier: NtId,
    pub enum_head: NtId,
    pub opaque_enum_declaration: NtId,
    pub enum_key: NtId,
    pub enum_base: NtId,
    pub enumerator_list: NtId,
    pub enumerator_definition: NtId,
    pub enumerator: NtId,
    pub namespace_definition: NtId,
    pub named_namespace_definition: NtId,
    pub original_namespace_definition: NtId,
    pub extension_namespace_definition: NtId,
    pub unnamed_namespace_definition: NtId,
    pub namespace_body: NtId,
    pub namespace_alias_definition: NtId,
    pub qualified_namespace_specifier: NtId,
    pub using_declaration: NtId,
    pub using_directive: NtId,
    pub asm_definition: NtId,
    pub linkage_specification: NtId,
    pub attribute_specifier_seq: NtId,
    pub attribute_specifier: NtId,
    pub alignment_specifier: NtId,
    pub attribute_list: NtId,
    pub attribute: NtId,
    pub attribute_token: NtId,
    pub attribute_scoped_token: NtId,
    pub attribute_namespace: NtId,
    pub attribute_argument_clause: NtId,
    pub balanced_token_seq: NtId,
    pub balanced_token: NtId,

    // A.7 Declarators [gram.decl]
    pub init_declarator_list: NtId,
    pub init_declarator: NtId,
    pub declarator: NtId,
    pub ptr_declarator: NtId,
    pub noptr_declarator: NtId,
    pub nested_declarator: NtId,
    pub array_declarator: NtId,
    pub parameters_and_qualifiers: NtId,
    pub trailing_return_type: NtId,
    pub ptr_operator: NtId,
    pub type_qualifier_seq: NtId,
    pub type_qualifier: NtId,
    pub ref_qualifier: NtId,
    pub declarator_id: NtId,
    pub type_id: NtId,
    pub abstract_declarator: NtId,
    pub ptr_abstract_declarator: NtId,
    pub noptr_abstract_declarator: NtId,
    pub nested_abstract_declarator: NtId,
    pub abstract_pack_declarator: NtId,
    pub noptr_abstract_pack_declarator: NtId,
    pub parameter_declaration_clause: NtId,
    pub parameter_declaration_list: NtId,
    pub parameter_declaration: NtId,
    pub function_definition: NtId,
    pub function_body: NtId,
    pub initializer: NtId,
    pub brace_or_equal_initializer: NtId,
    pub initializer_clause: NtId,
    pub initializer_list: NtId,
    pub braced_init_list: NtId,
    pub designation: NtId,
    pub designator_list: NtId,
    pub designator: NtId,

    // A.8 Classes / A.9 Derived classes [gram.class] [gram.derived]
    pub class_specifier: NtId,
    pub class_head: NtId,
    pub class_head_name: NtId,
    pub class_virt_specifier: NtId,
    pub class_key: NtId,
    pub member_specification: NtId,
    pub member_declaration: NtId,
    pub member_declarator_list: NtId,
    pub member_declarator: NtId,
    pub virt_specifier_seq: NtId,
    pub virt_specifier: NtId,
    pub pure_specifier: NtId,
    pub base_clause: NtId,
    pub base_specifier_list: NtId,
    pub base_specifier: NtId,
    pub class_or_decltype: NtId,
    pub base_type_specifier: NtId,
    pub access_specifier: NtId,

    // A.10 Special member functions / A.11 Overloading
    pub conversion_function_id: NtId,
    pub conversion_type_id: NtId,
    pub conversion_declarator: NtId,
    pub ctor_initializer: NtId,
    pub mem_initializer_list: NtId,
    pub mem_initializer: NtId,
    pub mem_initializer_id: NtId,
    pub destructor_id: NtId,
    pub operator_function_id: NtId,
    pub overloadable_operator: NtId,
    pub literal_operator_id: NtId,

    // A.12 Templates [gram.temp]
    pub template_declaration: NtId,
    pub template_parameter_list: NtId,
    pub template_parameter: NtId,
    pub type_parameter: NtId,
    pub simple_template_id: NtId,
    pub template_id: NtId,
    pub template_argument_list: NtId,
    pub template_argument: NtId,
    pub typename_specifier: NtId,
    pub explicit_instantiation: NtId,
    pub explicit_specialization: NtId,

    // A.13 Exception handling [gram.except]
    pub try_block: NtId,
    pub function_try_block: NtId,
    pub handler_seq: NtId,
    pub handler: NtId,
    pub exception_declaration: NtId,
    pub throw_expression: NtId,
    pub exception_specification: NtId,
    pub dynamic_exception_specification: NtId,
    pub type_id_list: NtId,
    pub noexcept_specification: NtId,
}

impl Nonterminals {
    fn declare(b: &mut GrammarBuilder) -> Nonterminals {
        Nonterminals {
            typedef_name: b.nonterminal("typedef-name"),
            namespace_name: b.nonterminal("namespace-name"),
            original_namespace_name: b.nonterminal("original-namespace-name"),
            namespace_alias: b.nonterminal("namespace-alias"),
            class_name: b.nonterminal("class-name"),
            enum_name: b.nonterminal("enum-name"),
            template_name: b.nonterminal("template-name"),
            undeclared_name: b.nonterminal("undeclared-name"),

            identifier: b.nonterminal("identifier"),
            literal: b.nonterminal("literal"),
            numeric_literal: b.nonterminal("numeric-literal"),
            character_literal: b.nonterminal("character-literal"),
            string_literal: b.nonterminal("string-literal"),
            boolean_literal: b.nonterminal("boolean-literal"),
            pointer_literal: b.nonterminal("pointer-literal"),
            user_defined_literal: b.nonterminal("user-defined-literal"),
            ud_suffix: b.nonterminal("ud-suffix"),

            translation_unit: b.nonterminal("translation-unit"),

            primary_expression: b.nonterminal("primary-expression"),
            paren_expression: b.nonterminal("paren-expression"),
            generic_selection: b.nonterminal("generic-selection"),
            generic_assoc_list: b.nonterminal("generic-assoc-list"),
            generic_association: b.nonterminal("generic-association"),
            id_expression: b.nonterminal("id-expression"),
            unqualified_id: b.nonterminal("unqualified-id"),
            qualified_id: b.nonterminal("qualified-id"),
            nested_name_specifier: b.nonterminal("nested-name-specifier"),
            lambda_expression: b.nonterminal("lambda-expression"),
            lambda_introducer: b.nonterminal("lambda-introducer"),
            lambda_capture: b.nonterminal("lambda-capture"),
            capture_default: b.nonterminal("capture-default"),
            capture_list: b.nonterminal("capture-list"),
            capture: b.nonterminal("capture"),
            simple_capture: b.nonterminal("simple-capture"),
            init_capture: b.nonterminal("init-capture"),
            lambda_declarator: b.nonterminal("lambda-declarator"),
            postfix_expression: b.nonterminal("postfix-expression"),
            array_subscript: b.nonterminal("array-subscript"),
            function_call: b.nonterminal("function-call"),
            member_access: b.nonterminal("member-access"),
            expression_list: b.nonterminal("expression-list"),
            pseudo_destructor_name: b.nonterminal("pseudo-destructor-name"),
            unary_expression: b.nonterminal("unary-expression"),
            unary_operator: b.nonterminal("unary-operator"),
            new_expression: b.nonterminal("new-expression"),
            new_placement: b.nonterminal("new-placement"),
            new_type_id: b.nonterminal("new-type-id"),
            new_declarator: b.nonterminal("new-declarator"),
            noptr_new_declarator: b.nonterminal("noptr-new-declarator"),
            new_initializer: b.nonterminal("new-initializer"),
            delete_expression: b.nonterminal("delete-expression"),
            noexcept_expression: b.nonterminal("noexcept-expression"),
            cast_expression: b.nonterminal("cast-expression"),
            pm_expression: b.nonterminal("pm-expression"),
            multiplicative_expression: b.nonterminal("multiplicative-expression"),
            additive_expression: b.nonterminal("additive-expression"),
            shift_expression: b.nonterminal("shift-expression"),
            relational_expression: b.nonterminal("relational-expression"),
            equality_expression: b.nonterminal("equality-expression"),
            and_expression: b.nonterminal("and-expression"),
            exclusive_or_expression: b.nonterminal("exclusive-or-expression"),
            inclusive_or_expression: b.nonterminal("inclusive-or-expression"),
            logical_and_expression: b.nonterminal("logical-and-expression"),
            logical_or_expression: b.nonterminal("logical-or-expression"),
            conditional_expression: b.nonterminal("conditional-expression"),
            assignment_expression: b.nonterminal("assignment-expression"),
            assignment_operator: b.nonterminal("assignment-operator"),
            expression: b.nonterminal("expression"),
            constant_expression: b.nonterminal("constant-expression"),

            statement: b.nonterminal("statement"),
            labeled_statement: b.nonterminal("labeled-statement"),
            expression_statement: b.nonterminal("expression-statement"),
            compound_statement: b.nonterminal("compound-statement"),
            block_declaration_seq: b.nonterminal("block-declaration-seq"),
            statement_seq: b.nonterminal("statement-seq"),
            selection_statement: b.nonterminal("selection-statement"),
            condition: b.nonterminal("condition"),
            iteration_statement: b.nonterminal("iteration-statement"),
            for_init_statement: b.nonterminal("for-init-statement"),
            for_range_declaration: b.nonterminal("for-range-declaration"),
            for_range_initializer: b.nonterminal("for-range-initializer"),
            jump_statement: b.nonterminal("jump-statement"),
            declaration_statement: b.nonterminal("declaration-statement"),

            declaration_seq: b.nonterminal("declaration-seq"),
            declaration: b.nonterminal("declaration"),
            block_declaration: b.nonterminal("block-declaration"),
            alias_declaration: b.nonterminal("alias-declaration"),
            simple_declaration: b.nonterminal("simple-declaration"),
            static_assert_declaration: b.nonterminal("static_assert-declaration"),
            empty_declaration: b.nonterminal("empty-declaration"),
            attribute_declaration: b.nonterminal("attribute-declaration"),
            decl_specifier: b.nonterminal("decl-specifier"),
            decl_specifier_seq: b.nonterminal("decl-specifier-seq"),
            storage_class_specifier: b.nonterminal("storage-class-specifier"),
            function_specifier: b.nonterminal("function-specifier"),
            type_specifier: b.nonterminal("type-specifier"),
            trailing_type_specifier: b.nonterminal("trailing-type-specifier"),
            type_specifier_seq: b.nonterminal("type-specifier-seq"),
            trailing_type_specifier_seq: b.nonterminal("trailing-type-specifier-seq"),
            simple_type_specifier: b.nonterminal("simple-type-specifier"),
            ud_type_specifier: b.nonterminal("ud-type-specifier"),
            type_name: b.nonterminal("type-name"),
            decltype_specifier: b.nonterminal("decltype-specifier"),
            elaborated_type_specifier: b.nonterminal("elaborated-type-specifier"),
            atomic_type_specifier: b.nonterminal("atomic-type-specifier"),
            enum_specifier: b.nonterminal("enum-specifier"),
            enum_head: b.nonterminal("enum-head"),
            opaque_enum_declaration: b.nonterminal("opaque-enum-declaration"),
            enum_key: b.nonterminal("enum-key"),
            enum_base: b.nonterminal("enum-base"),
            enumerator_list: b.nonterminal("enumerator-list"),
            enumerator_definition: b.nonterminal("enumerator-definition"),
            enumerator: b.nonterminal("enumerator"),
            namespace_definition: b.nonterminal("namespace-definition"),
            named_namespace_definition: b.nonterminal("named-namespace-definition"),
            original_namespace_definition: b.nonterminal("original-namespace-definition"),
            extension_namespace_definition: b.nonterminal("extension-namespace-definition"),
            unnamed_namespace_definition: b.nonterminal("unnamed-namespace-definition"),
            namespace_body: b.nonterminal("namespace-body"),
            namespace_alias_definition: b.nonterminal("namespace-alias-definition"),
            qualified_namespace_specifier: b.nonterminal("qualified-namespace-specifier"),
            using_declaration: b.nonterminal("using-declaration"),
            using_directive: b.nonterminal("using-directive"),
            asm_definition: b.nonterminal("asm-definition"),
            linkage_specification: b.nonterminal("linkage-specification"),
            attribute_specifier_seq: b.nonterminal("attribute-specifier-seq"),
            attribute_specifier: b.nonterminal("attribute-specifier"),
            alignment_specifier: b.nonterminal("alignment-specifier"),
            attribute_list: b.nonterminal("attribute-list"),
            attribute: b.nonterminal("attribute"),
            attribute_token: b.nonterminal("attribute-token"),
            attribute_scoped_token: b.nonterminal("attribute-scoped-token"),
            attribute_namespace: b.nonterminal("attribute-namespace"),
            attribute_argument_clause: b.nonterminal("attribute-argument-clause"),
            balanced_token_seq: b.nonterminal("balanced-token-seq"),
            balanced_token: b.nonterminal("balanced-token"),

            init_declarator_list: b.nonterminal("init-declarator-list"),
            init_declarator: b.nonterminal("init-declarator"),
            declarator: b.nonterminal("declarator"),
            ptr_declarator: b.nonterminal("ptr-declarator"),
            noptr_declarator: b.nonterminal("noptr-declarator"),
            nested_declarator: b.nonterminal("nested-declarator"),
            array_declarator: b.nonterminal("array-declarator"),
            parameters_and_qualifiers: b.nonterminal("parameters-and-qualifiers"),
            trailing_return_type: b.nonterminal("trailing-return-type"),
            ptr_operator: b.nonterminal("ptr-operator"),
            type_qualifier_seq: b.nonterminal("type-qualifier-seq"),
            type_qualifier: b.nonterminal("type-qualifier"),
            ref_qualifier: b.nonterminal("ref-qualifier"),
            declarator_id: b.nonterminal("declarator-id"),
            type_id: b.nonterminal("type-id"),
            abstract_declarator: b.nonterminal("abstract-declarator"),
            ptr_abstract_declarator: b.nonterminal("ptr-abstract-declarator"),
            noptr_abstract_declarator: b.nonterminal("noptr-abstract-declarator"),
            nested_abstract_declarator: b.nonterminal("nested-abstract-declarator"),
            abstract_pack_declarator: b.nonterminal("abstract-pack-declarator"),
            noptr_abstract_pack_declarator: b.nonterminal("noptr-abstract-pack-declarator"),
            parameter_declaration_clause: b.nonterminal("parameter-declaration-clause"),
            parameter_declaration_list: b.nonterminal("parameter-declaration-list"),
            parameter_declaration: b.nonterminal("parameter-declaration"),
            function_definition: b.nonterminal("function-definition"),
            function_body: b.nonterminal("function-body"),
            initializer: b.nonterminal("initializer"),
            brace_or_equal_initializer: b.nonterminal("brace-or-equal-initializer"),
            initializer_clause: b.nonterminal("initializer-clause"),
            initializer_list: b.nonterminal("initializer-list"),
            braced_init_list: b.nonterminal("braced-init-list"),
            designation: b.nonterminal("designation"),
            designator_list: b.nonterminal("designator-list"),
            designator: b.nonterminal("designator"),

            class_specifier: b.nonterminal("class-specifier"),
            class_head: b.nonterminal("class-head"),
            class_head_name: b.nonterminal("class-head-name"),
            class_virt_specifier: b.nonterminal("class-virt-specifier"),
            class_key: b.nonterminal("class-key"),
            member_specification: b.nonterminal("member-specification"),
            member_declaration: b.nonterminal("member-declaration"),
            member_declarator_list: b.nonterminal("member-declarator-list"),
            member_declarator: b.nonterminal("member-declarator"),
            virt_specifier_seq: b.nonterminal("virt-specifier-seq"),
            virt_specifier: b.nonterminal("virt-specifier"),
            pure_specifier: b.nonterminal("pure-specifier"),
            base_clause: b.nonterminal("base-clause"),
            base_specifier_list: b.nonterminal("base-specifier-list"),
            base_specifier: b.nonterminal("base-specifier"),
            class_or_decltype: b.nonterminal("class-or-decltype"),
            base_type_specifier: b.nonterminal("base-type-specifier"),
            access_specifier: b.nonterminal("access-specifier"),

            conversion_function_id: b.nonterminal("conversion-function-id"),
            conversion_type_id: b.nonterminal("conversion-type-id"),
            conversion_declarator: b.nonterminal("conversion-declarator"),
            ctor_initializer: b.nonterminal("ctor-initializer"),
            mem_initializer_list: b.nonterminal("mem-initializer-list"),
            mem_initializer: b.nonterminal("mem-initializer"),
            mem_initializer_id: b.nonterminal("mem-initializer-id"),
            destructor_id: b.nonterminal("destructor-id"),
            operator_function_id: b.nonterminal("operator-function-id"),
            overloadable_operator: b.nonterminal("overloadable-operator"),
            literal_operator_id: b.nonterminal("literal-operator-id"),

            template_declaration: b.nonterminal("template-declaration"),
            template_parameter_list: b.nonterminal("template-parameter-list"),
            template_parameter: b.nonterminal("template-parameter"),
            type_parameter: b.nonterminal("type-parameter"),
            simple_template_id: b.nonterminal("simple-template-id"),
            template_id: b.nonterminal("template-id"),
            template_argument_list: b.nonterminal("template-argument-list"),
            template_argument: b.nonterminal("template-argument"),
            typename_specifier: b.nonterminal("typename-specifier"),
            explicit_instantiation: b.nonterminal("explicit-instantiation"),
            explicit_specialization: b.nonterminal("explicit-specialization"),

            try_block: b.nonterminal("try-block"),
            function_try_block: b.nonterminal("function-try-block"),
            handler_seq: b.nonterminal("handler-seq"),
            handler: b.nonterminal("handler"),
            exception_declaration: b.nonterminal("exception-declaration"),
            throw_expression: b.nonterminal("throw-expression"),
            exception_specification: b.nonterminal("exception-specification"),
            dynamic_exception_specification: b.nonterminal("dynamic-exception-specification"),
            type_id_list: b.nonterminal("type-id-list"),
            noexcept_specification: b.nonterminal("noexcept-specification"),
        }
    }
}

/// The grammar for one dialect: rule tables, nonterminal ids, operator
/// rule tags.
pub struct CxxGrammar {
    pub grammar: Grammar,
    pub nt: Nonterminals,
    pub tags: RuleTags,
}

impl CxxGrammar {
    /// Build the grammar for `options`. Construction elides every
    /// alternative the dialect gates off.
    #[must_use]
    pub fn new(options: &Options) -> CxxGrammar {
        let d = Dialect::from_options(options);
        let mut b = GrammarBuilder::new();
        let x = Nonterminals::declare(&mut b);

        // flattened-traversal visibility
        for id in [
            x.generic_assoc_list,
            x.capture_list,
            x.block_declaration_seq,
            x.statement_seq,
            x.declaration_seq,
            x.trailing_type_specifier,
            x.enumerator_list,
            x.balanced_token_seq,
            x.ptr_declarator,
            x.noptr_declarator,
            x.ptr_abstract_declarator,
            x.noptr_abstract_declarator,
            x.parameter_declaration_list,
            x.member_specification,
            x.base_specifier_list,
            x.mem_initializer_list,
            x.type_id_list,
            x.designation,
        ] {
            b.set_flags(id, NtFlags::TRANSPARENT);
        }
        for id in [
            x.primary_expression,
            x.postfix_expression,
            x.unary_expression,
            x.cast_expression,
            x.pm_expression,
            x.multiplicative_expression,
            x.additive_expression,
            x.shift_expression,
            x.relational_expression,
            x.equality_expression,
            x.and_expression,
            x.exclusive_or_expression,
            x.inclusive_or_expression,
            x.logical_and_expression,
            x.logical_or_expression,
            x.conditional_expression,
            x.assignment_expression,
        ] {
            b.set_flags(id, NtFlags::HIDE_IF_DELEGATE);
        }

        // post-parse actions
        for id in [
            x.decl_specifier_seq,
            x.type_specifier_seq,
            x.trailing_type_specifier_seq,
        ] {
            b.set_action(id, ActionId::DeclSpecifierEnd);
        }
        for id in [
            x.declarator,
            x.nested_declarator,
            x.abstract_declarator,
            x.nested_abstract_declarator,
            x.new_declarator,
            x.conversion_declarator,
        ] {
            b.set_action(id, ActionId::DeclaratorEnd);
        }
        for id in [x.lambda_declarator, x.parameters_and_qualifiers] {
            b.set_action(id, ActionId::ParametersAndQualifiersEnd);
        }
        b.set_action(x.ptr_operator, ActionId::PtrOperatorEnd);

        lexical::rules(&mut b, &x, &d);
        let tags = expr::rules(&mut b, &x, &d);
        stmt::rules(&mut b, &x, &d);
        decl::rules(&mut b, &x, &d);
        dcl::rules(&mut b, &x, &d);
        class::rules(&mut b, &x, &d);
        special::rules(&mut b, &x, &d);
        template_::rules(&mut b, &x, &d);
        except::rules(&mut b, &x, &d);

        CxxGrammar {
            grammar: b.finish(),
            nt: x,
            tags,
        }
    }
}
