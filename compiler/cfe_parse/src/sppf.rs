//! Shared packed parse forest.
//!
//! The forest is a DAG held in a flat arena; nodes reference each other by
//! [`NodeId`] and carry packed alternatives for ambiguity. Spans are in
//! significant-token positions with a side table translating to raw token
//! list indexes, so auxiliary data can point at real tokens.
//!
//! Traversal honours the grammar's visibility flags: `TRANSPARENT`
//! nonterminals and delegating `HIDE_IF_DELEGATE` nodes never appear in
//! [`Forest::sub_productions`]; their children bubble up, which gives the
//! semantic callbacks the flat, left-to-right view they expect.

use crate::grammar::{Grammar, NtFlags, NtId, RuleId};

/// Index of a node in the forest arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// What a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeSym {
    Nt(NtId),
    /// A terminal; the payload is the raw token-list index.
    Token(u32),
}

/// One packed alternative: a rule and its child nodes.
#[derive(Debug)]
pub struct PackedAlt {
    pub rule: RuleId,
    pub children: Vec<NodeId>,
    /// Cleared when a post-parse action rejects this reduction or a child
    /// becomes invalid.
    pub valid: bool,
}

#[derive(Debug)]
pub struct SppfNode {
    pub sym: NodeSym,
    /// Significant-token span, `start..end` (exclusive). Empty derivations
    /// have `start == end`.
    pub start: u32,
    pub end: u32,
    pub alts: Vec<PackedAlt>,
}

impl SppfNode {
    /// First alternative still considered valid.
    #[must_use]
    pub fn first_alt(&self) -> Option<&PackedAlt> {
        self.alts.iter().find(|a| a.valid)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Arena of SPPF nodes plus the significant→raw token index mapping.
#[derive(Debug, Default)]
pub struct Forest {
    nodes: Vec<SppfNode>,
    /// Raw token-list index of each significant token position.
    sig_to_raw: Vec<u32>,
}

impl Forest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: SppfNode) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("forest overflow"));
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &SppfNode {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SppfNode {
        &mut self.nodes[id.0 as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replace the significant→raw mapping (the parser maintains it as it
    /// pulls and splits tokens).
    pub fn set_sig_map(&mut self, map: Vec<u32>) {
        self.sig_to_raw = map;
    }

    /// Raw token index of significant position `sig`.
    #[must_use]
    pub fn raw_index(&self, sig: u32) -> u32 {
        self.sig_to_raw[sig as usize]
    }

    /// Raw index of the node's first token, unless the node is empty.
    #[must_use]
    pub fn first_token(&self, id: NodeId) -> Option<u32> {
        let node = self.node(id);
        (!node.is_empty()).then(|| self.raw_index(node.start))
    }

    /// Raw index of the node's last token, unless the node is empty.
    #[must_use]
    pub fn last_token(&self, id: NodeId) -> Option<u32> {
        let node = self.node(id);
        (!node.is_empty()).then(|| self.raw_index(node.end - 1))
    }

    /// Whether `id` is, or transparently delegates to, an `nt` node: the
    /// chain of single-nonterminal productions is followed downward.
    #[must_use]
    pub fn node_is(&self, id: NodeId, nt: NtId) -> bool {
        self.resolve_to(id, nt).is_some()
    }

    /// Follow single-nonterminal delegation chains until reaching an `nt`
    /// node, returning it.
    #[must_use]
    pub fn resolve_to(&self, id: NodeId, nt: NtId) -> Option<NodeId> {
        let mut current = id;
        loop {
            let node = self.node(current);
            let NodeSym::Nt(this_nt) = node.sym else {
                return None;
            };
            if this_nt == nt {
                return Some(current);
            }
            let alt = node.first_alt()?;
            match alt.children.as_slice() {
                [only] if matches!(self.node(*only).sym, NodeSym::Nt(_)) => current = *only,
                _ => return None,
            }
        }
    }

    /// The nonterminal children of `id`'s first valid alternative, with
    /// `TRANSPARENT` and delegating `HIDE_IF_DELEGATE` nodes flattened into
    /// their own children, left to right.
    #[must_use]
    pub fn sub_productions(&self, grammar: &Grammar, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(alt) = self.node(id).first_alt() {
            for &child in &alt.children {
                self.push_visible(grammar, child, &mut out);
            }
        }
        out
    }

    /// Like [`sub_productions`](Self::sub_productions), but for a specific
    /// packed alternative — post-parse actions walk the alternative being
    /// reduced, not whichever happens to be first.
    #[must_use]
    pub fn sub_productions_of_alt(
        &self,
        grammar: &Grammar,
        id: NodeId,
        alt_idx: usize,
    ) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(alt) = self.node(id).alts.get(alt_idx) {
            for &child in &alt.children {
                self.push_visible(grammar, child, &mut out);
            }
        }
        out
    }

    fn push_visible(&self, grammar: &Grammar, id: NodeId, out: &mut Vec<NodeId>) {
        let node = self.node(id);
        let NodeSym::Nt(nt) = node.sym else {
            return; // terminals are not productions
        };
        let flags = grammar.nt(nt).flags;
        let delegating = node.first_alt().is_some_and(|alt| {
            alt.children.len() == 1 && matches!(self.node(alt.children[0]).sym, NodeSym::Nt(_))
        });
        let hidden = flags.contains(NtFlags::TRANSPARENT)
            || (flags.contains(NtFlags::HIDE_IF_DELEGATE) && delegating);
        if hidden {
            if let Some(alt) = node.first_alt() {
                for &child in &alt.children {
                    self.push_visible(grammar, child, out);
                }
            }
        } else {
            out.push(id);
        }
    }

    /// Depth-first search for the first descendant that is (or delegates
    /// to) `nt`. `max_depth` counts visible levels; `None` is unbounded.
    #[must_use]
    pub fn find(
        &self,
        grammar: &Grammar,
        id: NodeId,
        nt: NtId,
        max_depth: Option<u32>,
    ) -> Option<NodeId> {
        for child in self.sub_productions(grammar, id) {
            if let Some(found) = self.resolve_to(child, nt) {
                return Some(found);
            }
            match max_depth {
                Some(0) | Some(1) => {}
                _ => {
                    let next = max_depth.map(|d| d - 1);
                    if let Some(found) = self.find(grammar, child, nt, next) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }
}
