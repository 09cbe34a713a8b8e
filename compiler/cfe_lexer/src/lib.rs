//! Lexer for the combined C89–C11 / C++98–C++17 token language.
//!
//! The lexer reads code points from a [`cfe_lexer_core::CharSource`] and
//! produces [`cfe_ir::Token`]s under a configurable [`Options`] dialect.
//! The character-level transforms — trigraph folding, line splicing,
//! universal character names — happen inside the lexer's own `peek`/`read`
//! wrappers, so every token-level rule sees the logical character stream.
//!
//! Context that later phases need is tracked here too: the closing-token
//! stack that decides whether a `>>` may close a template-argument list
//! (`SPLITABLE`), and the `STARTS_LINE`/`PREPROCESS` flag accumulator that
//! drives preprocessor-directive recognition.
//!
//! # Modules
//!
//! - [`options`]: language standards, feature set, keyword tables
//! - [`ident`]: identifier character classes (standards' Annex E)
//! - `lexer`: the tokenizer itself

mod ident;
mod keywords;
mod lexer;
pub mod options;

#[cfg(test)]
mod tests;

pub use ident::{is_valid_ident_char, is_valid_initial_ident_char};
pub use lexer::Lexer;
pub use options::{CStandard, CxxStandard, Features, Options, OptionsError, Standard};
