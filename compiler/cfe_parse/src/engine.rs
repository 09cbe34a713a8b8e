//! Earley recognizer and forest extraction.
//!
//! The engine is an internal collaborator: the grammar, predicate, action
//! and token-splitting interfaces it honours are the contract; its
//! internals are free to change. Recognition runs the classic
//! predict/scan/complete loop with the nullable-prediction shortcut, over
//! tokens pulled on demand through [`ScanOps`]. Extraction then rebuilds
//! the shared packed parse forest for the chosen span, memoized per
//! `(nonterminal, start, end)` so ambiguity packs instead of multiplying.
//!
//! Scan-time predicates may rewrite the token stream (the template
//! `>>`-split); extraction re-checks terminal kinds against the final
//! stream, so parse threads that consumed a pre-split `>>` prune
//! themselves.

use crate::grammar::{Grammar, NtId, PredId, RuleId, Symbol};
use crate::sppf::{Forest, NodeId, NodeSym, PackedAlt, SppfNode};
use cfe_ir::TokenKind;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::trace;

/// Token access during recognition. Positions are significant-token
/// positions relative to the parse start; implementations pull from the
/// lexer as needed.
pub trait ScanOps {
    /// Kind at `pos`; `Eof` at or past end of input.
    fn kind_at(&mut self, pos: u32) -> TokenKind;
    /// Scan-time predicate; may rewrite the token stream.
    fn token_pred(&mut self, pred: PredId, pos: u32) -> bool;
}

/// Token and predicate access during extraction. No pulling, no rewriting.
pub trait ExtractOps {
    fn kind_at(&self, pos: u32) -> TokenKind;
    /// Re-check a terminal predicate without side effects.
    fn token_pred_check(&self, pred: PredId, pos: u32) -> bool;
    /// Nonterminal predicate on an extracted child. `prev` is the sibling
    /// parsed immediately before the predicated symbol.
    fn nt_pred(&self, pred: PredId, forest: &Forest, node: NodeId, prev: Option<NodeId>) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Item {
    rule: RuleId,
    dot: u16,
    start: u32,
}

/// Outcome of recognition: which rules completed over which spans.
#[derive(Debug, Default)]
pub struct Recognition {
    /// `(rule, start, end)` triples that completed.
    pub completed: FxHashSet<(RuleId, u32, u32)>,
    /// For each `(nonterminal, start)`: the ends it derived to.
    pub by_nt: FxHashMap<(NtId, u32), SmallVec<[u32; 4]>>,
    /// Longest end position of a completed start-symbol parse from 0.
    pub longest_root: Option<u32>,
}

fn next_symbol(grammar: &Grammar, item: Item) -> Option<Symbol> {
    grammar
        .rule(item.rule)
        .symbols
        .get(item.dot as usize)
        .copied()
}

/// Run the recognizer for `start` from absolute position `origin`.
///
/// All recorded spans are absolute, so forests from successive driver
/// calls can share one significant-token map.
pub fn recognize<S: ScanOps>(
    grammar: &Grammar,
    start: NtId,
    stream: &mut S,
    origin: u32,
) -> Recognition {
    let mut rec = Recognition::default();
    let mut sets: Vec<Vec<Item>> = vec![Vec::new()];
    let mut seen: Vec<FxHashSet<Item>> = vec![FxHashSet::default()];

    fn push_item(sets: &mut [Vec<Item>], seen: &mut [FxHashSet<Item>], at: usize, item: Item) {
        if seen[at].insert(item) {
            sets[at].push(item);
        }
    }

    for &rule in grammar.rules_of(start) {
        push_item(&mut sets, &mut seen, 0, Item { rule, dot: 0, start: origin });
    }

    let mut i: u32 = origin;
    loop {
        let at = (i - origin) as usize;

        // predict / complete closure of set i
        let mut idx = 0;
        while idx < sets[at].len() {
            let item = sets[at][idx];
            idx += 1;

            match next_symbol(grammar, item) {
                None => {
                    // completion
                    let lhs = grammar.rule(item.rule).lhs;
                    if rec.completed.insert((item.rule, item.start, i)) {
                        let ends = rec.by_nt.entry((lhs, item.start)).or_default();
                        if !ends.contains(&i) {
                            ends.push(i);
                        }
                    }
                    if lhs == start && item.start == origin {
                        rec.longest_root = Some(rec.longest_root.map_or(i, |n| n.max(i)));
                    }
                    let parents: Vec<Item> = sets[(item.start - origin) as usize]
                        .iter()
                        .filter(|p| {
                            matches!(
                                next_symbol(grammar, **p),
                                Some(Symbol::Nt(n) | Symbol::PredNt(n, _) | Symbol::OptNt(n))
                                    if n == lhs
                            )
                        })
                        .map(|p| Item {
                            rule: p.rule,
                            dot: p.dot + 1,
                            start: p.start,
                        })
                        .collect();
                    for parent in parents {
                        push_item(&mut sets, &mut seen, at, parent);
                    }
                }
                Some(Symbol::Nt(n) | Symbol::PredNt(n, _)) => {
                    for &rule in grammar.rules_of(n) {
                        push_item(&mut sets, &mut seen, at, Item { rule, dot: 0, start: i });
                    }
                    if grammar.is_nullable(n) {
                        push_item(
                            &mut sets,
                            &mut seen,
                            at,
                            Item { rule: item.rule, dot: item.dot + 1, start: item.start },
                        );
                    }
                }
                Some(Symbol::OptNt(n)) => {
                    push_item(
                        &mut sets,
                        &mut seen,
                        at,
                        Item { rule: item.rule, dot: item.dot + 1, start: item.start },
                    );
                    for &rule in grammar.rules_of(n) {
                        push_item(&mut sets, &mut seen, at, Item { rule, dot: 0, start: i });
                    }
                }
                Some(Symbol::OptToken(_)) => {
                    push_item(
                        &mut sets,
                        &mut seen,
                        at,
                        Item { rule: item.rule, dot: item.dot + 1, start: item.start },
                    );
                }
                Some(Symbol::Token(_) | Symbol::PredToken(..) | Symbol::AnyToken(_)) => {}
            }
        }

        // scan into set i+1
        if stream.kind_at(i) == TokenKind::Eof {
            break;
        }

        let mut next_set: Vec<Item> = Vec::new();
        let mut next_seen: FxHashSet<Item> = FxHashSet::default();
        let snapshot: Vec<Item> = sets[at].clone();
        for item in snapshot {
            let advanced = Item {
                rule: item.rule,
                dot: item.dot + 1,
                start: item.start,
            };
            let matched = match next_symbol(grammar, item) {
                Some(Symbol::Token(tk) | Symbol::OptToken(tk)) => stream.kind_at(i) == tk,
                Some(Symbol::PredToken(tk, pred)) => {
                    // predicate first: it may split the token in place
                    stream.token_pred(pred, i) && stream.kind_at(i) == tk
                }
                Some(Symbol::AnyToken(pred)) => stream.token_pred(pred, i),
                _ => false,
            };
            if matched && next_seen.insert(advanced) {
                next_set.push(advanced);
            }
        }

        if next_set.is_empty() {
            break;
        }
        sets.push(next_set);
        seen.push(next_seen);
        i += 1;

        debug_assert!(i - origin < 1_000_000, "runaway recognition");
    }

    trace!(positions = i - origin, root = ?rec.longest_root, "recognition finished");
    rec
}

/// Upper bound on packed alternatives kept per node; further derivations
/// of an already-ambiguous span add no information the callbacks use.
const MAX_ALTS: usize = 8;
/// Upper bound on distinct splits explored per rule and span.
const MAX_SPLITS: usize = 4;

#[derive(Clone, Copy)]
enum Memo {
    InProgress,
    Done(Option<NodeId>),
}

/// Memoized SPPF extraction over a finished recognition.
pub struct Extractor<'a, O: ExtractOps> {
    grammar: &'a Grammar,
    rec: &'a Recognition,
    ops: &'a O,
    memo: FxHashMap<(NtId, u32, u32), Memo>,
    token_memo: FxHashMap<u32, NodeId>,
}

impl<'a, O: ExtractOps> Extractor<'a, O> {
    pub fn new(grammar: &'a Grammar, rec: &'a Recognition, ops: &'a O) -> Self {
        Extractor {
            grammar,
            rec,
            ops,
            memo: FxHashMap::default(),
            token_memo: FxHashMap::default(),
        }
    }

    /// Build the node for `nt` spanning `start..end`, sharing sub-forests.
    pub fn extract(
        &mut self,
        forest: &mut Forest,
        nt: NtId,
        start: u32,
        end: u32,
    ) -> Option<NodeId> {
        let key = (nt, start, end);
        match self.memo.get(&key) {
            Some(Memo::InProgress) => return None, // cyclic unit derivation: prune
            Some(Memo::Done(result)) => return *result,
            None => {}
        }
        self.memo.insert(key, Memo::InProgress);

        let mut alts: Vec<PackedAlt> = Vec::new();
        for &rule_id in self.grammar.rules_of(nt) {
            if alts.len() >= MAX_ALTS {
                break;
            }
            // zero-width derivations are not always recorded by the
            // recognizer; try them regardless
            if start != end && !self.rec.completed.contains(&(rule_id, start, end)) {
                continue;
            }
            let symbols = &self.grammar.rule(rule_id).symbols;
            let mut found: Vec<Vec<NodeId>> = Vec::new();
            let mut acc: Vec<NodeId> = Vec::new();
            self.splits(forest, symbols, start, end, &mut acc, &mut found);
            for children in found {
                if alts.len() >= MAX_ALTS {
                    break;
                }
                alts.push(PackedAlt {
                    rule: rule_id,
                    children,
                    valid: true,
                });
            }
        }

        let result = if alts.is_empty() {
            None
        } else {
            let id = forest.add_node(SppfNode {
                sym: NodeSym::Nt(nt),
                start,
                end,
                alts,
            });
            Some(id)
        };
        self.memo.insert(key, Memo::Done(result));
        result
    }

    fn token_node(&mut self, forest: &mut Forest, pos: u32) -> NodeId {
        if let Some(&id) = self.token_memo.get(&pos) {
            return id;
        }
        let raw = forest.raw_index(pos);
        let id = forest.add_node(SppfNode {
            sym: NodeSym::Token(raw),
            start: pos,
            end: pos + 1,
            alts: Vec::new(),
        });
        self.token_memo.insert(pos, id);
        id
    }

    /// Candidate end positions for `nt` starting at `pos`, longest first.
    fn ends(&self, nt: NtId, pos: u32, max: u32) -> SmallVec<[u32; 4]> {
        let mut out: SmallVec<[u32; 4]> = self
            .rec
            .by_nt
            .get(&(nt, pos))
            .map(|ends| ends.iter().copied().filter(|&e| e <= max).collect())
            .unwrap_or_default();
        if self.grammar.is_nullable(nt) && !out.contains(&pos) {
            out.push(pos);
        }
        out.sort_unstable_by(|a, b| b.cmp(a));
        out
    }

    fn splits(
        &mut self,
        forest: &mut Forest,
        symbols: &[Symbol],
        pos: u32,
        end: u32,
        acc: &mut Vec<NodeId>,
        out: &mut Vec<Vec<NodeId>>,
    ) {
        if out.len() >= MAX_SPLITS {
            return;
        }
        let Some((&sym, rest)) = symbols.split_first() else {
            if pos == end {
                out.push(acc.clone());
            }
            return;
        };

        let mut take_token = |this: &mut Self, forest: &mut Forest, acc: &mut Vec<NodeId>, out: &mut Vec<Vec<NodeId>>| {
            let node = this.token_node(forest, pos);
            acc.push(node);
            this.splits(forest, rest, pos + 1, end, acc, out);
            acc.pop();
        };

        match sym {
            Symbol::Token(tk) => {
                if pos < end && self.ops.kind_at(pos) == tk {
                    take_token(self, forest, acc, out);
                }
            }
            Symbol::PredToken(tk, pred) => {
                if pos < end
                    && self.ops.kind_at(pos) == tk
                    && self.ops.token_pred_check(pred, pos)
                {
                    take_token(self, forest, acc, out);
                }
            }
            Symbol::AnyToken(pred) => {
                if pos < end && self.ops.token_pred_check(pred, pos) {
                    take_token(self, forest, acc, out);
                }
            }
            Symbol::OptToken(tk) => {
                if pos < end && self.ops.kind_at(pos) == tk {
                    take_token(self, forest, acc, out);
                }
                self.splits(forest, rest, pos, end, acc, out);
            }
            Symbol::Nt(nt) => {
                for e in self.ends(nt, pos, end) {
                    if let Some(child) = self.extract(forest, nt, pos, e) {
                        acc.push(child);
                        self.splits(forest, rest, e, end, acc, out);
                        acc.pop();
                    }
                }
            }
            Symbol::PredNt(nt, pred) => {
                let prev = acc.last().copied();
                for e in self.ends(nt, pos, end) {
                    if let Some(child) = self.extract(forest, nt, pos, e) {
                        if !self.ops.nt_pred(pred, forest, child, prev) {
                            continue;
                        }
                        acc.push(child);
                        self.splits(forest, rest, e, end, acc, out);
                        acc.pop();
                    }
                }
            }
            Symbol::OptNt(nt) => {
                for e in self.ends(nt, pos, end) {
                    if e == pos {
                        continue; // the skip branch below covers zero width
                    }
                    if let Some(child) = self.extract(forest, nt, pos, e) {
                        acc.push(child);
                        self.splits(forest, rest, e, end, acc, out);
                        acc.pop();
                    }
                }
                self.splits(forest, rest, pos, end, acc, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;
    use crate::sppf::Forest;
    use cfe_ir::TokenKind::{self, Comma, Identifier, Semi};

    /// Fixed token stream; every predicate passes.
    struct Toks(Vec<TokenKind>);

    impl ScanOps for Toks {
        fn kind_at(&mut self, pos: u32) -> TokenKind {
            self.0.get(pos as usize).copied().unwrap_or(TokenKind::Eof)
        }

        fn token_pred(&mut self, _pred: PredId, _pos: u32) -> bool {
            true
        }
    }

    impl ExtractOps for Toks {
        fn kind_at(&self, pos: u32) -> TokenKind {
            self.0.get(pos as usize).copied().unwrap_or(TokenKind::Eof)
        }

        fn token_pred_check(&self, _pred: PredId, _pos: u32) -> bool {
            true
        }

        fn nt_pred(&self, _pred: PredId, _f: &Forest, _n: NodeId, _p: Option<NodeId>) -> bool {
            true
        }
    }

    /// list -> ident | list ',' ident ; start -> list ';'
    fn list_grammar() -> (Grammar, NtId, NtId) {
        let mut b = GrammarBuilder::new();
        let start = b.nonterminal("start");
        let list = b.nonterminal("list");
        b.rule(start, &[Symbol::Nt(list), Symbol::Token(Semi)]);
        b.rule(list, &[Symbol::Token(Identifier)]);
        b.rule(list, &[Symbol::Nt(list), Symbol::Token(Comma), Symbol::Token(Identifier)]);
        (b.finish(), start, list)
    }

    #[test]
    fn recognizes_left_recursive_list() {
        let (grammar, start, list) = list_grammar();
        let mut toks = Toks(vec![Identifier, Comma, Identifier, Comma, Identifier, Semi]);
        let rec = recognize(&grammar, start, &mut toks, 0);

        assert_eq!(rec.longest_root, Some(6));
        // the list derived every odd-length prefix
        let ends = rec.by_nt.get(&(list, 0)).unwrap();
        assert!(ends.contains(&1) && ends.contains(&3) && ends.contains(&5));
    }

    #[test]
    fn rejects_bad_input() {
        let (grammar, start, _) = list_grammar();
        let mut toks = Toks(vec![Comma, Identifier]);
        let rec = recognize(&grammar, start, &mut toks, 0);
        assert_eq!(rec.longest_root, None);
    }

    #[test]
    fn extraction_builds_nested_lists() {
        let (grammar, start, list) = list_grammar();
        let input = vec![Identifier, Comma, Identifier, Semi];
        let mut toks = Toks(input.clone());
        let rec = recognize(&grammar, start, &mut toks, 0);
        assert_eq!(rec.longest_root, Some(4));

        let toks = Toks(input);
        let mut forest = Forest::new();
        forest.set_sig_map(vec![0, 1, 2, 3]);
        let mut extractor = Extractor::new(&grammar, &rec, &toks);
        let root = extractor.extract(&mut forest, start, 0, 4).expect("root");

        let root_node = forest.node(root);
        assert_eq!(root_node.start, 0);
        assert_eq!(root_node.end, 4);
        // start -> list ';' : two children, the list spanning 0..3
        let alt = root_node.first_alt().unwrap();
        assert_eq!(alt.children.len(), 2);
        let list_node = forest.node(alt.children[0]);
        assert!(matches!(list_node.sym, NodeSym::Nt(nt) if nt == list));
        assert_eq!((list_node.start, list_node.end), (0, 3));
    }

    #[test]
    fn optional_symbols_and_nullable_prediction() {
        // start -> opt(list) ';'
        let mut b = GrammarBuilder::new();
        let start = b.nonterminal("start");
        let list = b.nonterminal("list");
        b.rule(start, &[Symbol::OptNt(list), Symbol::Token(Semi)]);
        b.rule(list, &[Symbol::Token(Identifier)]);
        let grammar = b.finish();

        // with the list present
        let mut toks = Toks(vec![Identifier, Semi]);
        let rec = recognize(&grammar, start, &mut toks, 0);
        assert_eq!(rec.longest_root, Some(2));

        // and without
        let mut toks = Toks(vec![Semi]);
        let rec = recognize(&grammar, start, &mut toks, 0);
        assert_eq!(rec.longest_root, Some(1));

        let toks = Toks(vec![Semi]);
        let mut forest = Forest::new();
        forest.set_sig_map(vec![0]);
        let mut extractor = Extractor::new(&grammar, &rec, &toks);
        let root = extractor.extract(&mut forest, start, 0, 1).expect("root");
        // only the ';' child: the optional list was skipped
        assert_eq!(forest.node(root).first_alt().unwrap().children.len(), 1);
    }

    #[test]
    fn recognition_starts_at_origin() {
        let (grammar, start, _) = list_grammar();
        // position 0 holds an already-consumed token; parse from 1
        let mut toks = Toks(vec![Semi, Identifier, Semi]);
        let rec = recognize(&grammar, start, &mut toks, 1);
        assert_eq!(rec.longest_root, Some(3));
        assert!(rec.completed.iter().all(|&(_, s, _)| s >= 1));
    }
}
