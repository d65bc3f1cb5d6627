//! Versioned ADQL grammar
//!
//! A query goes through two steps here:
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Parser (recursive descent, one grammar per AdqlVersion) → syntax tree
//! ```
//!
//! Keywords unknown to the selected version are handed to the grammar as
//! plain words, so `OFFSET` is a column name in ADQL 2.0 but a clause in
//! ADQL 2.1. Errors carry the position of the offending token, the list of
//! tokens that would have been accepted, and a hint when a reserved word
//! was probably meant as an identifier.

#[allow(clippy::module_inception)]
mod parser;

mod errors;
pub mod grammar;
pub mod keywords;
mod lexer;
mod syntax_kind;
mod version;

pub use errors::{ErrorCode, ParseError, ParseErrorBuilder};
pub use grammar::{parse_from, parse_group_by, parse_order_by, parse_query, parse_select, parse_where};
pub use lexer::{Lexer, Token, tokenize};
pub use syntax_kind::TokenKind;
pub use version::AdqlVersion;
