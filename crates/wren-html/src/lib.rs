//! HTML tokenizer for the Wren toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, PLAINTEXT, and tag states
//!   - Script data states, including the escaped and double-escaped forms
//!   - DOCTYPE, comment, bogus comment, and CDATA section handling
//!   - Named and numeric character references
//!   - Attribute parsing with duplicate detection
//!   - Parse errors as tokens, or as a hard error in strict mode
//!
//! - **html5lib adapter**: projects tokens into the html5lib tokenizer test
//!   format and reads its fixture files.
//!
//! # Not Implemented
//!
//! - Tree construction; the tokenizer switches text states on its own instead
//! - Encoding sniffing; input is already a `&str`
//! - Incremental input and `document.write`

/// html5lib tokenizer test format.
pub mod html5lib;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use tokenizer::{
    Attribute, HTMLTokenizer, ParseErrorCode, Token, TokenizerError, TokenizerOptions,
    TokenizerState,
};
