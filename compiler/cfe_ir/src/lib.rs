//! Token model for the combined C/C++ front end.
//!
//! This crate is the dependency-free core shared by the lexer and the
//! parser:
//!
//! - [`TokenKind`]: the closed token-kind catalogue, partitioned into
//!   ordered ranges so classification is a range comparison.
//! - [`Token`] / [`TokenList`]: tokens with flags and source positions.
//!   The parser owns the list; the lexer appends; the parse forest
//!   references tokens by index and never copies them.
//! - [`StringInterner`] / [`Name`]: the string arena backing identifier and
//!   literal spellings. Interned spellings live as long as the interner.

mod interner;
mod token;
mod token_kind;

pub use interner::{Name, StringInterner};
pub use token::{Token, TokenFlags, TokenList};
pub use token_kind::TokenKind;
