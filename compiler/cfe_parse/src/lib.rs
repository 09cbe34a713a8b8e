//! Parser for the combined C89–C11 / C++98–C++17 grammar.
//!
//! The crate has four layers:
//!
//! - [`grammar`]: the dialect-gated rule model ([`grammar::Grammar`],
//!   symbols, predicates, post-parse actions) and [`cxx`], the C/C++
//!   grammar itself, transcribed section by section from the standard's
//!   Annex A with the factorings that make it parse deterministically
//!   enough for an SPPF engine.
//! - [`engine`]: a compact Earley recognizer plus memoized extraction into
//!   the shared packed parse forest ([`sppf::Forest`]).
//! - [`Parser`]: the driver. It owns the token list and forest, pulls
//!   tokens from the lexer on demand, evaluates terminal predicates
//!   (including the template-argument `>>` split hook) and runs the
//!   post-parse semantic actions.
//! - [`semantics`] / [`literal`]: the declaration-specifier and declarator
//!   callbacks, and the literal-equivalence engine with full integer
//!   promotion and arithmetic conversion rules.

pub mod cxx;
pub mod engine;
pub mod grammar;
pub mod host;
pub mod literal;
pub mod parser;
pub mod semantics;
pub mod sppf;

#[cfg(test)]
mod tests;

pub use cxx::CxxGrammar;
pub use host::{DefaultHost, HostSemantics};
pub use literal::{are_equivalent, match_const_expr, ExprType, Literal};
pub use parser::Parser;
pub use sppf::{Forest, NodeId};
