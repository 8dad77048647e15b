//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token")
//! - End tag helpers for the text content models
//! - Parse error reporting

use wren_common::warning::warn_once;

use super::builder::TokenBuilder;
use super::core::{HTMLTokenizer, TokenizerState};
use super::error::{ParseErrorCode, TokenizerError};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Steps the input back one position, so the new state sees the same
    /// character (or EOF) again.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.input.reconsume();
        self.state = new_state;
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// NOTE: The tokenizer uses a subset excluding CR (which is normalized earlier).
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        // "U+0009 CHARACTER TABULATION (tab)"
        // "U+000A LINE FEED (LF)"
        // "U+000C FORM FEED (FF)"
        // "U+0020 SPACE"
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }

    /// Apply `f` to the current token, if there is one.
    pub(super) fn with_current_token(&mut self, f: impl FnOnce(&mut TokenBuilder)) {
        if let Some(token) = self.current_token.as_mut() {
            f(token);
        }
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self, first: char) {
        self.with_current_token(|token| token.new_attribute(first));
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Emit the current token". Errors collected while the token was built are
    /// reported first, so they precede the token in the stream.
    pub(super) fn emit_token(&mut self) {
        let Some(builder) = self.current_token.take() else {
            return;
        };
        let (token, errors) = builder.finalize();
        for code in errors {
            self.parse_error(code);
        }

        if let Token::StartTag { ref name, .. } = token {
            self.last_start_tag_name = Some(name.clone());

            // NOTE: A tree builder would switch the tokenizer state on these start
            // tags. Standalone, the tokenizer does it itself unless told not to.
            if self.options.switch_text_modes {
                match name.as_str() {
                    // [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
                    // "Switch the tokenizer to the RCDATA state."
                    "title" | "textarea" => self.switch_to(TokenizerState::RCDATA),
                    // [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
                    // "Switch the tokenizer to the RAWTEXT state."
                    "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                        self.switch_to(TokenizerState::RAWTEXT);
                    }
                    "script" => self.switch_to(TokenizerState::ScriptData),
                    "plaintext" => self.switch_to(TokenizerState::PLAINTEXT),
                    _ => {}
                }
            }
        }
        self.token_stream.push(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.token_stream.push(Token::new_character(c));
    }

    /// "Emit an end-of-file token." Nothing is emitted after it.
    pub(super) fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::new_eof());
        self.at_eof = true;
    }
}

// =============================================================================
// End Tag Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_token) {
            (Some(last_start_tag), Some(token)) => token.is_end_tag_named(last_start_tag),
            _ => false,
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "Anything else":
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer... Reconsume in the RCDATA state."
    ///
    /// The RAWTEXT and script data variants only differ in `text_state`.
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        self.current_token = None;
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Report a parse error that leaves the state unchanged (or that the handler
    /// has already switched away from).
    pub(super) fn parse_error(&mut self, code: ParseErrorCode) {
        let to_state = self.state;
        self.report_parse_error(code, to_state);
    }

    /// Report a parse error, then switch to `to_state`.
    pub(super) fn error_state(&mut self, code: ParseErrorCode, to_state: TokenizerState) {
        self.switch_to(to_state);
        self.report_parse_error(code, to_state);
    }

    /// Report a parse error, then reconsume in `to_state`.
    pub(super) fn error_reconsume_in(&mut self, code: ParseErrorCode, to_state: TokenizerState) {
        self.reconsume_in(to_state);
        self.report_parse_error(code, to_state);
    }

    /// Strict mode keeps only the first error and stops the run; lenient mode
    /// records every error as a [`Token::ParseError`].
    fn report_parse_error(&mut self, code: ParseErrorCode, to_state: TokenizerState) {
        let from_state = self.dispatched_state;

        if self.options.log_parse_errors {
            let offset = self.input.position();
            let _ = warn_once(
                "HTML Tokenizer",
                &format!("{code} ({from_state} -> {to_state}) at offset {offset}"),
            );
        }

        if self.options.strict {
            if self.strict_failure.is_none() {
                self.strict_failure = Some(TokenizerError::StrictParseError {
                    code,
                    from_state,
                    to_state,
                    offset: self.input.position(),
                    tokens: self.token_stream.clone(),
                });
            }
            return;
        }

        self.token_stream.push(Token::ParseError {
            code,
            from_state,
            to_state,
        });
    }
}
