//! Low-level character source for the C/C++ lexer.
//!
//! This crate is the "raw" half of the two-layer lexer: it presents a
//! UTF-32-oriented view over UTF-8 input with the primitives the
//! character-level transforms need — lookahead, backtracking, erasing
//! consumed code points (line splicing) and replacing a consumed run with a
//! single folded code point (trigraphs, universal character names) — while
//! tracking byte offset, line and column. It knows nothing about tokens,
//! dialects or diagnostics; the lexer crate layers those on top.

mod source;

pub use source::{CharSource, EOF_CHAR};
