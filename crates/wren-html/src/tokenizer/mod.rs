//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML standard.

/// Token builders for the "current token".
pub mod builder;
/// Character reference decoding per § 13.2.4.
pub mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// DOCTYPE states.
mod doctype;
/// Parse error codes and the strict-mode error.
pub mod error;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Newline-normalizing input cursor.
pub mod input;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Tokenizer configuration.
pub mod options;
/// Script data states.
mod script_data;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerState};
pub use error::{ParseErrorCode, TokenizerError};
pub use options::TokenizerOptions;
pub use token::{Attribute, Token};
