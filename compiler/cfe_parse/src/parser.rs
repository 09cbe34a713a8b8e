//! The parser driver.
//!
//! Owns the token list and the forest. Each `parse()` call recognizes the
//! longest prefix of the remaining token stream deriving the start symbol,
//! extracts its packed forest, and runs the post-parse semantic actions
//! bottom-up (rejected reductions drop out of the forest). Tokens are
//! pulled from the lexer on demand; whitespace and comment tokens stay in
//! the list but are invisible to the grammar.
//!
//! The template-argument `>>` split happens here: when the grammar expects
//! a closing `>` and the current token is a SPLITABLE `>>`, `>=` or `>>=`,
//! the token is rewritten in place to `>` and the residual token inserted
//! right after it at offset `+1`.

use crate::cxx::CxxGrammar;
use crate::engine::{self, ExtractOps, Extractor, ScanOps};
use crate::grammar::{NtId, PredId};
use crate::host::{DefaultHost, HostSemantics};
use crate::literal::AuxTable;
use crate::semantics::{
    self, AuxData, DeclSpecifier, Declarator, DeclaratorPart, SemCtx,
};
use crate::sppf::{Forest, NodeId, NodeSym};
use cfe_diagnostic::{Diagnostic, DiagnosticHandler, Severity};
use cfe_ir::{StringInterner, Token, TokenFlags, TokenKind, TokenList};
use cfe_lexer::{Lexer, Options};
use rustc_hash::FxHashMap;
use tracing::debug;

static DEFAULT_HOST: DefaultHost = DefaultHost;

/// The C/C++ parser.
///
/// Borrows the lexer for the duration of parsing; the parser is the sole
/// writer to the token list and the forest.
pub struct Parser<'p, 'o> {
    lexer: &'p mut Lexer<'o>,
    handler: &'p dyn DiagnosticHandler,
    host: &'p dyn HostSemantics,
    cxx: CxxGrammar,
    tokens: TokenList,
    /// Raw token index of each significant (non-trivia) token.
    sig: Vec<u32>,
    /// Significant position where the next parse starts.
    base: u32,
    eof_pulled: bool,
    forest: Forest,
    aux: AuxTable,
    error_count: usize,
}

impl<'p, 'o> Parser<'p, 'o> {
    pub fn new(lexer: &'p mut Lexer<'o>, handler: &'p dyn DiagnosticHandler) -> Self {
        let cxx = CxxGrammar::new(lexer.options());
        Parser {
            lexer,
            handler,
            host: &DEFAULT_HOST,
            cxx,
            tokens: TokenList::new(),
            sig: Vec::new(),
            base: 0,
            eof_pulled: false,
            forest: Forest::new(),
            aux: AuxTable::default(),
            error_count: 0,
        }
    }

    /// Install a host-semantics plug-in (name classes, type construction).
    pub fn set_host(&mut self, host: &'p dyn HostSemantics) {
        self.host = host;
    }

    #[must_use]
    pub fn options(&self) -> &'o Options {
        self.lexer.options()
    }

    #[must_use]
    pub fn cxx(&self) -> &CxxGrammar {
        &self.cxx
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    #[must_use]
    pub fn interner(&self) -> &StringInterner {
        self.lexer.interner()
    }

    /// Parse errors since construction or the last [`reset`](Self::reset).
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[must_use]
    pub fn aux(&self, node: NodeId) -> Option<&AuxData> {
        self.aux.get(&node)
    }

    #[must_use]
    pub fn aux_table(&self) -> &AuxTable {
        &self.aux
    }

    #[must_use]
    pub fn decl_specifier(&self, node: NodeId) -> Option<&DeclSpecifier> {
        match self.aux.get(&node) {
            Some(AuxData::DeclSpecifier(ds)) => Some(ds),
            _ => None,
        }
    }

    #[must_use]
    pub fn declarator(&self, node: NodeId) -> Option<&Declarator> {
        match self.aux.get(&node) {
            Some(AuxData::Declarator(d)) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn declarator_part(&self, node: NodeId) -> Option<&DeclaratorPart> {
        match self.aux.get(&node) {
            Some(AuxData::DeclaratorPart(p)) => Some(p),
            _ => None,
        }
    }

    /// Context for the semantic helpers and the literal engine.
    #[must_use]
    pub fn sem_ctx(&self) -> SemCtx<'_> {
        SemCtx {
            cxx: &self.cxx,
            forest: &self.forest,
            tokens: &self.tokens,
            interner: self.lexer.interner(),
            handler: self.handler,
        }
    }

    /// Parse one `declaration` from the remaining token stream.
    pub fn parse_declaration(&mut self) -> Option<NodeId> {
        self.parse(self.cxx.nt.declaration)
    }

    /// Parse the longest prefix of the remaining tokens deriving `start`.
    ///
    /// On success the forest gains a root spanning the consumed prefix and
    /// the parse position advances past it. On failure the position does
    /// not move, the error count rises and a diagnostic is emitted.
    pub fn parse(&mut self, start: NtId) -> Option<NodeId> {
        let origin = self.base;
        debug!(start = self.cxx.grammar.name(start), origin, "parse");

        let rec = {
            let mut stream = ScanAdapter {
                lexer: &mut *self.lexer,
                tokens: &mut self.tokens,
                sig: &mut self.sig,
                eof_pulled: &mut self.eof_pulled,
            };
            engine::recognize(&self.cxx.grammar, start, &mut stream, origin)
        };

        let Some(end) = rec.longest_root else {
            return self.parse_failed(start);
        };

        // the split hook may have grown the token list during recognition
        self.forest.set_sig_map(self.sig.clone());

        let root = {
            let ops = ExtractAdapter {
                cxx: &self.cxx,
                tokens: &self.tokens,
                sig: &self.sig,
                interner: self.lexer.interner(),
                host: self.host,
            };
            let mut extractor = Extractor::new(&self.cxx.grammar, &rec, &ops);
            extractor.extract(&mut self.forest, start, origin, end)
        };

        let Some(root) = root else {
            return self.parse_failed(start);
        };

        let mut memo = FxHashMap::default();
        if !self.validate(root, &mut memo) {
            return self.parse_failed(start);
        }

        self.base = end;
        Some(root)
    }

    fn parse_failed(&mut self, start: NtId) -> Option<NodeId> {
        self.error_count += 1;
        let (offset, line, column) = match self.sig.get(self.base as usize) {
            Some(&raw) => {
                let t = &self.tokens[raw];
                (t.offset, t.line, t.column)
            }
            None => (0, 1, 1),
        };
        self.handler.handle(Diagnostic::new(
            Severity::Error,
            offset,
            1,
            line,
            column,
            format!("expected {}", self.cxx.grammar.name(start)),
        ));
        None
    }

    /// Validate nodes bottom-up, running post-parse actions per packed
    /// alternative; a `false` action return invalidates the alternative,
    /// and a node with none left invalidates its parents.
    fn validate(&mut self, node: NodeId, memo: &mut FxHashMap<NodeId, bool>) -> bool {
        if let Some(&valid) = memo.get(&node) {
            return valid;
        }
        // optimistic seed; the forest is a DAG so this only matters if a
        // cyclic unit derivation slipped through
        memo.insert(node, true);

        if matches!(self.forest.node(node).sym, NodeSym::Token(_)) {
            return true;
        }

        let alt_count = self.forest.node(node).alts.len();
        let mut any_valid = false;
        for alt_idx in 0..alt_count {
            let children = self.forest.node(node).alts[alt_idx].children.clone();
            let mut ok = true;
            for child in children {
                if !self.validate(child, memo) {
                    ok = false;
                    break;
                }
            }
            if ok {
                ok = self.run_action(node, alt_idx);
            }
            if !ok {
                self.forest.node_mut(node).alts[alt_idx].valid = false;
            }
            any_valid |= ok;
        }

        memo.insert(node, any_valid);
        any_valid
    }

    fn run_action(&mut self, node: NodeId, alt_idx: usize) -> bool {
        let NodeSym::Nt(nt) = self.forest.node(node).sym else {
            return true;
        };
        let Some(action) = self.cxx.grammar.nt(nt).action else {
            return true;
        };

        // run at most once per (production, span) pair
        if self.aux.contains_key(&node) {
            return true;
        }

        use crate::grammar::ActionId;
        let result = {
            let ctx = SemCtx {
                cxx: &self.cxx,
                forest: &self.forest,
                tokens: &self.tokens,
                interner: self.lexer.interner(),
                handler: self.handler,
            };
            match action {
                ActionId::DeclSpecifierEnd => {
                    semantics::fold_decl_specifier_seq(&ctx, node, alt_idx)
                        .map(AuxData::DeclSpecifier)
                }
                ActionId::DeclaratorEnd => Some(AuxData::Declarator(
                    semantics::check_declarator(&ctx, node, alt_idx),
                )),
                ActionId::PtrOperatorEnd => Some(AuxData::DeclaratorPart(
                    semantics::end_ptr_operator(&ctx, node),
                )),
                ActionId::ParametersAndQualifiersEnd => Some(AuxData::DeclaratorPart(
                    semantics::end_parameters_and_qualifiers(&ctx, node, alt_idx),
                )),
            }
        };

        match result {
            Some(aux) => {
                self.aux.insert(node, aux);
                true
            }
            None => false,
        }
    }

    /// Whether the next significant token is end of input.
    pub fn at_eof(&mut self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Kind of the next unconsumed significant token.
    pub fn peek_kind(&mut self) -> TokenKind {
        let base = self.base;
        let mut stream = ScanAdapter {
            lexer: &mut *self.lexer,
            tokens: &mut self.tokens,
            sig: &mut self.sig,
            eof_pulled: &mut self.eof_pulled,
        };
        stream.kind_at(base)
    }

    /// Skip one significant token (error recovery after a failed parse).
    /// Returns `false` at end of input.
    pub fn skip_token(&mut self) -> bool {
        if self.at_eof() {
            return false;
        }
        self.base += 1;
        true
    }

    /// Drop the forest, auxiliary data, token list and error count. The
    /// next parse continues from the lexer's current position.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.sig.clear();
        self.base = 0;
        self.eof_pulled = false;
        self.forest = Forest::new();
        self.aux.clear();
        self.error_count = 0;
    }
}

/// Token access for the recognizer: pulls from the lexer on demand and
/// implements the scan-time predicates, including the `>>` split.
struct ScanAdapter<'x, 'o> {
    lexer: &'x mut Lexer<'o>,
    tokens: &'x mut TokenList,
    sig: &'x mut Vec<u32>,
    eof_pulled: &'x mut bool,
}

impl<'x, 'o> ScanAdapter<'x, 'o> {
    fn ensure(&mut self, pos: u32) {
        while self.sig.len() as u32 <= pos && !*self.eof_pulled {
            let token = self.lexer.lex();
            let kind = token.kind;
            let raw = self.tokens.push(token);
            match kind {
                TokenKind::Whitespace | TokenKind::Comment | TokenKind::Null => {}
                TokenKind::Eof => {
                    self.sig.push(raw);
                    *self.eof_pulled = true;
                }
                _ => self.sig.push(raw),
            }
        }
    }

    fn token_at(&mut self, pos: u32) -> Option<&Token> {
        self.ensure(pos);
        self.sig.get(pos as usize).map(|&raw| &self.tokens[raw])
    }

    /// Rewrite a SPLITABLE `>>`/`>=`/`>>=` at `pos` into `>` plus the
    /// residual token at offset `+1`.
    fn split_token(&mut self, pos: u32, residual: TokenKind) {
        let raw = self.sig[pos as usize];
        let original = self.tokens[raw];
        {
            let t = self.tokens.get_mut(raw).expect("split target exists");
            t.set_kind(TokenKind::Greater);
            t.clear_spelling();
            t.flags.remove(TokenFlags::SPLITABLE);
        }
        let mut inserted = Token::new(
            residual,
            original.offset + 1,
            original.line,
            original.column + 1,
        );
        inserted.flags = original.flags & TokenFlags::PREPROCESS;
        self.tokens.insert_after(raw, inserted);

        // raw indexes after the insertion point shift by one
        for r in self.sig.iter_mut() {
            if *r > raw {
                *r += 1;
            }
        }
        self.sig.insert(pos as usize + 1, raw + 1);
    }
}

impl<'x, 'o> ScanOps for ScanAdapter<'x, 'o> {
    fn kind_at(&mut self, pos: u32) -> TokenKind {
        self.token_at(pos).map_or(TokenKind::Eof, |t| t.kind)
    }

    fn token_pred(&mut self, pred: PredId, pos: u32) -> bool {
        match pred {
            PredId::TemplateCloseAngle => {
                let Some(&token) = self.token_at(pos) else {
                    return false;
                };
                match token.kind {
                    TokenKind::Greater => true,
                    TokenKind::RShift | TokenKind::GreaterEqual | TokenKind::RShiftEqual
                        if token.has_flags(TokenFlags::SPLITABLE)
                            && self.lexer.options().std_cxx11() =>
                    {
                        let residual = match token.kind {
                            TokenKind::RShift => TokenKind::Greater,
                            TokenKind::GreaterEqual => TokenKind::Equal,
                            _ => TokenKind::GreaterEqual,
                        };
                        debug!(pos, ?residual, "splitting template close token");
                        self.split_token(pos, residual);
                        true
                    }
                    _ => false,
                }
            }
            PredId::BalancedToken => {
                let kind = self.kind_at(pos);
                !matches!(
                    kind,
                    TokenKind::LParen
                        | TokenKind::RParen
                        | TokenKind::LSquare
                        | TokenKind::RSquare
                        | TokenKind::LBrace
                        | TokenKind::RBrace
                        | TokenKind::Eof
                )
            }
            PredId::FinalSpecifier => self.spelled(pos, "final"),
            PredId::OverrideSpecifier => self.spelled(pos, "override"),
            PredId::ZeroLiteral => self.spelled(pos, "0"),
            // nonterminal predicates are evaluated during extraction
            _ => true,
        }
    }
}

impl<'x, 'o> ScanAdapter<'x, 'o> {
    fn spelled(&mut self, pos: u32, expected: &str) -> bool {
        self.ensure(pos);
        let Some(&raw) = self.sig.get(pos as usize) else {
            return false;
        };
        self.tokens[raw].spelling(self.lexer.interner()) == expected
    }
}

/// Token and predicate access for forest extraction (read-only).
struct ExtractAdapter<'x> {
    cxx: &'x CxxGrammar,
    tokens: &'x TokenList,
    sig: &'x [u32],
    interner: &'x StringInterner,
    host: &'x dyn HostSemantics,
}

impl<'x> ExtractAdapter<'x> {
    fn spelling_at(&self, pos: u32) -> &str {
        self.sig
            .get(pos as usize)
            .map_or("", |&raw| self.tokens[raw].spelling(self.interner))
    }
}

impl<'x> ExtractOps for ExtractAdapter<'x> {
    fn kind_at(&self, pos: u32) -> TokenKind {
        self.sig
            .get(pos as usize)
            .map_or(TokenKind::Eof, |&raw| self.tokens[raw].kind)
    }

    fn token_pred_check(&self, pred: PredId, pos: u32) -> bool {
        match pred {
            // splits were applied during recognition; only `>` remains
            PredId::TemplateCloseAngle => self.kind_at(pos) == TokenKind::Greater,
            PredId::BalancedToken => !matches!(
                self.kind_at(pos),
                TokenKind::LParen
                    | TokenKind::RParen
                    | TokenKind::LSquare
                    | TokenKind::RSquare
                    | TokenKind::LBrace
                    | TokenKind::RBrace
                    | TokenKind::Eof
            ),
            PredId::FinalSpecifier => self.spelling_at(pos) == "final",
            PredId::OverrideSpecifier => self.spelling_at(pos) == "override",
            PredId::ZeroLiteral => self.spelling_at(pos) == "0",
            _ => true,
        }
    }

    fn nt_pred(&self, pred: PredId, forest: &Forest, node: NodeId, prev: Option<NodeId>) -> bool {
        match pred {
            PredId::IsFunction => prev.is_some_and(|p| {
                forest
                    .find(
                        &self.cxx.grammar,
                        p,
                        self.cxx.nt.parameters_and_qualifiers,
                        None,
                    )
                    .is_some()
            }),
            _ => {
                let Some(raw) = forest.first_token(node) else {
                    return false;
                };
                let name = self.tokens[raw].spelling(self.interner);
                match pred {
                    PredId::TypedefName => self.host.is_typedef_name(name),
                    PredId::ClassName => self.host.is_class_name(name),
                    PredId::EnumName => self.host.is_enum_name(name),
                    PredId::NamespaceName => self.host.is_namespace_name(name),
                    PredId::NamespaceAlias => self.host.is_namespace_alias(name),
                    PredId::TemplateName => self.host.is_template_name(name),
                    PredId::UndeclaredName => self.host.is_undeclared_name(name),
                    _ => true,
                }
            }
        }
    }
}
