//! Grammar model: nonterminals, dialect-gated rules, predicated terminals
//! and post-parse actions.
//!
//! A grammar is built once per dialect by [`GrammarBuilder`]; alternatives
//! whose gate is off are simply never added, so the engine sees only the
//! rules the selected standards allow. `finish()` computes the nullable
//! set the recognizer and extractor need for optional symbols.

use bitflags::bitflags;
use cfe_ir::TokenKind;

/// Nonterminal id: an index into the grammar's nonterminal table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NtId(pub u32);

/// Rule id: an index into the grammar's rule table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleId(pub u32);

/// Terminal/nonterminal predicates referenced by the grammar.
///
/// Token predicates run at scan time against the input token;
/// `TemplateCloseAngle` may rewrite the token stream (the `>>` split).
/// Nonterminal predicates run during forest extraction: the name classes
/// consult the host-semantics plug-in on the node's first token, while
/// `IsFunction` inspects the sibling parsed just before the predicated
/// symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredId {
    // name classes (host plug-in)
    TypedefName,
    ClassName,
    EnumName,
    NamespaceName,
    NamespaceAlias,
    TemplateName,
    UndeclaredName,
    // spelled-identifier predicates
    FinalSpecifier,
    OverrideSpecifier,
    /// `= 0` pure specifier: the literal must spell exactly `0`.
    ZeroLiteral,
    /// Any token except `(` `)` `[` `]` `{` `}`.
    BalancedToken,
    /// `>` ending a template-parameter/argument list; splits a SPLITABLE
    /// `>>`/`>=`/`>>=` in place.
    TemplateCloseAngle,
    /// The preceding declarator fragment contains a parameter list.
    IsFunction,
}

/// One element on a rule's right-hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Token(TokenKind),
    /// Terminal accepted only when the predicate holds for the input token.
    PredToken(TokenKind, PredId),
    /// Any single token the predicate accepts.
    AnyToken(PredId),
    Nt(NtId),
    /// Nonterminal whose parse must satisfy the predicate.
    PredNt(NtId, PredId),
    OptToken(TokenKind),
    OptNt(NtId),
}

impl Symbol {
    /// Whether this symbol can match the empty string on its own.
    #[must_use]
    pub fn is_optional(self) -> bool {
        matches!(self, Symbol::OptToken(_) | Symbol::OptNt(_))
    }
}

/// Named rule tags for the binary-operator productions; the literal engine
/// and other operator-aware tooling look rules up by these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleTag {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    BinaryAdd,
    BinarySubtract,
    LeftShift,
    RightShift,
    Multiply,
    Divide,
    Modulo,
}

/// Post-parse actions attached to nonterminals. The parser runs the action
/// on every successful reduction; a `false` return invalidates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionId {
    DeclSpecifierEnd,
    DeclaratorEnd,
    PtrOperatorEnd,
    ParametersAndQualifiersEnd,
}

bitflags! {
    /// Nonterminal visibility in flattened SPPF traversals.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NtFlags: u8 {
        /// Never appears in `sub_productions`; children bubble up.
        const TRANSPARENT = 0x01;
        /// Hidden when its production is a single-nonterminal delegation.
        const HIDE_IF_DELEGATE = 0x02;
    }
}

#[derive(Debug)]
pub struct Rule {
    pub lhs: NtId,
    pub symbols: Vec<Symbol>,
    pub tag: Option<RuleTag>,
}

#[derive(Debug)]
pub struct NonTerminalDef {
    pub name: &'static str,
    pub flags: NtFlags,
    pub action: Option<ActionId>,
    pub rules: Vec<RuleId>,
}

/// An immutable grammar: nonterminal table, rule table, nullable set.
#[derive(Debug)]
pub struct Grammar {
    nonterminals: Vec<NonTerminalDef>,
    rules: Vec<Rule>,
    nullable: Vec<bool>,
}

impl Grammar {
    #[must_use]
    pub fn nt(&self, id: NtId) -> &NonTerminalDef {
        &self.nonterminals[id.0 as usize]
    }

    #[must_use]
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.0 as usize]
    }

    #[must_use]
    pub fn rules_of(&self, id: NtId) -> &[RuleId] {
        &self.nonterminals[id.0 as usize].rules
    }

    #[must_use]
    pub fn name(&self, id: NtId) -> &'static str {
        self.nonterminals[id.0 as usize].name
    }

    #[must_use]
    pub fn is_nullable(&self, id: NtId) -> bool {
        self.nullable[id.0 as usize]
    }

    #[must_use]
    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// Builder for [`Grammar`].
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    nonterminals: Vec<NonTerminalDef>,
    rules: Vec<Rule>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a nonterminal; rules are attached separately so forward
    /// references between nonterminals come for free.
    pub fn nonterminal(&mut self, name: &'static str) -> NtId {
        let id = NtId(u32::try_from(self.nonterminals.len()).expect("nonterminal overflow"));
        self.nonterminals.push(NonTerminalDef {
            name,
            flags: NtFlags::empty(),
            action: None,
            rules: Vec::new(),
        });
        id
    }

    pub fn set_flags(&mut self, id: NtId, flags: NtFlags) {
        self.nonterminals[id.0 as usize].flags = flags;
    }

    pub fn set_action(&mut self, id: NtId, action: ActionId) {
        self.nonterminals[id.0 as usize].action = Some(action);
    }

    /// Add an alternative for `lhs`.
    pub fn rule(&mut self, lhs: NtId, symbols: &[Symbol]) -> RuleId {
        let id = RuleId(u32::try_from(self.rules.len()).expect("rule overflow"));
        self.rules.push(Rule {
            lhs,
            symbols: symbols.to_vec(),
            tag: None,
        });
        self.nonterminals[lhs.0 as usize].rules.push(id);
        id
    }

    /// Add an alternative only when its dialect gate is on. Gated-off
    /// alternatives are elided entirely.
    pub fn rule_if(&mut self, cond: bool, lhs: NtId, symbols: &[Symbol]) {
        if cond {
            self.rule(lhs, symbols);
        }
    }

    /// Add an alternative carrying a semantic rule tag.
    pub fn tagged_rule(&mut self, lhs: NtId, symbols: &[Symbol], tag: RuleTag) -> RuleId {
        let id = self.rule(lhs, symbols);
        self.rules[id.0 as usize].tag = Some(tag);
        id
    }

    /// Compute the nullable set and freeze the grammar.
    #[must_use]
    pub fn finish(self) -> Grammar {
        let mut nullable = vec![false; self.nonterminals.len()];
        loop {
            let mut changed = false;
            for rule in &self.rules {
                if nullable[rule.lhs.0 as usize] {
                    continue;
                }
                let all_skippable = rule.symbols.iter().all(|s| match s {
                    Symbol::OptToken(_) | Symbol::OptNt(_) => true,
                    Symbol::Nt(n) | Symbol::PredNt(n, _) => nullable[n.0 as usize],
                    Symbol::Token(_) | Symbol::PredToken(..) | Symbol::AnyToken(_) => false,
                });
                if all_skippable {
                    nullable[rule.lhs.0 as usize] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        Grammar {
            nonterminals: self.nonterminals,
            rules: self.rules,
            nullable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_rules_are_elided() {
        let mut b = GrammarBuilder::new();
        let a = b.nonterminal("a");
        b.rule(a, &[Symbol::Token(TokenKind::Semi)]);
        b.rule_if(false, a, &[Symbol::Token(TokenKind::Comma)]);
        b.rule_if(true, a, &[Symbol::Token(TokenKind::Colon)]);
        let g = b.finish();
        assert_eq!(g.rules_of(a).len(), 2);
    }

    #[test]
    fn nullable_fixpoint() {
        let mut b = GrammarBuilder::new();
        let a = b.nonterminal("a");
        let s = b.nonterminal("seq");
        let c = b.nonterminal("concrete");
        // a -> [;]  (nullable via optional)
        b.rule(a, &[Symbol::OptToken(TokenKind::Semi)]);
        // seq -> a a  (nullable because a is)
        b.rule(s, &[Symbol::Nt(a), Symbol::Nt(a)]);
        // concrete -> ;
        b.rule(c, &[Symbol::Token(TokenKind::Semi)]);
        let g = b.finish();
        assert!(g.is_nullable(a));
        assert!(g.is_nullable(s));
        assert!(!g.is_nullable(c));
    }
}
