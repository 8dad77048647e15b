//! DOCTYPE states.
//!
//! [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//! through [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).

use super::builder::TokenBuilder;
use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ParseErrorCode;

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            // "EOF"
            // "Parse error. Create a new DOCTYPE token. Set its force-quirks flag to on.
            // Emit the token. Reconsume the EOF character in the data state."
            None => {
                self.current_token = Some(TokenBuilder::new_doctype());
                self.eof_in_doctype();
            }
            // "Anything else"
            // "Parse error. Reconsume the character in the before DOCTYPE name state."
            Some(_) => {
                self.error_reconsume_in(
                    ParseErrorCode::MissingWhitespaceBeforeDoctypeName,
                    TokenizerState::BeforeDOCTYPEName,
                );
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('\0') => {
                self.error_state(
                    ParseErrorCode::UnexpectedNullCharacter,
                    TokenizerState::DOCTYPEName,
                );
                self.start_doctype_name('\u{FFFD}');
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Parse error. Create a new DOCTYPE token. Set its force-quirks flag to on.
            // Switch to the data state. Emit the token."
            Some('>') => {
                self.current_token = Some(TokenBuilder::new_doctype());
                self.abrupt_doctype(ParseErrorCode::MissingDoctypeName);
            }
            None => {
                self.current_token = Some(TokenBuilder::new_doctype());
                self.eof_in_doctype();
            }
            // "Create a new DOCTYPE token. Set the token's name to the lowercase
            // version of the current input character."
            Some(c) => {
                self.start_doctype_name(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDOCTYPEName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_current_token(|token| token.push_doctype_name('\u{FFFD}'));
            }
            None => {
                self.eof_in_doctype();
            }
            Some(c) => {
                self.with_current_token(|token| token.push_doctype_name(c.to_ascii_lowercase()));
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_doctype();
            }
            // "If the six characters starting from the current input character are an
            // ASCII case-insensitive match for the word "PUBLIC", then consume those
            // characters and switch to the after DOCTYPE public keyword state."
            // Likewise for "SYSTEM".
            Some(c) => {
                let keyword: String = std::iter::once(c)
                    .chain(self.input.peek_chars(5).iter().copied())
                    .collect();
                if keyword.eq_ignore_ascii_case("public") {
                    self.input.advance(5);
                    self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
                } else if keyword.eq_ignore_ascii_case("system") {
                    self.input.advance(5);
                    self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
                } else {
                    self.bogus_doctype(ParseErrorCode::InvalidCharacterSequenceAfterDoctypeName);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn handle_after_doctype_public_keyword_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEPublicIdentifier);
            }
            Some(quote @ ('"' | '\'')) => {
                self.error_state(
                    ParseErrorCode::MissingWhitespaceAfterDoctypePublicKeyword,
                    Self::public_identifier_state(quote),
                );
                self.with_current_token(TokenBuilder::start_public_identifier);
            }
            Some('>') => {
                self.abrupt_doctype(ParseErrorCode::MissingDoctypePublicIdentifier);
            }
            None => {
                self.eof_in_doctype();
            }
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypePublicIdentifier);
            }
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => {
                self.with_current_token(TokenBuilder::start_public_identifier);
                self.switch_to(Self::public_identifier_state(quote));
            }
            Some('>') => {
                self.abrupt_doctype(ParseErrorCode::MissingDoctypePublicIdentifier);
            }
            None => {
                self.eof_in_doctype();
            }
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypePublicIdentifier);
            }
        }
    }

    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_public_identifier_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.switch_to(TokenizerState::AfterDOCTYPEPublicIdentifier);
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_current_token(|token| token.push_public_identifier('\u{FFFD}'));
            }
            Some('>') => {
                self.abrupt_doctype(ParseErrorCode::AbruptDoctypePublicIdentifier);
            }
            None => {
                self.eof_in_doctype();
            }
            Some(c) => {
                self.with_current_token(|token| token.push_public_identifier(c));
            }
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(quote @ ('"' | '\'')) => {
                self.error_state(
                    ParseErrorCode::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                    Self::system_identifier_state(quote),
                );
                self.with_current_token(TokenBuilder::start_system_identifier);
            }
            None => {
                self.eof_in_doctype();
            }
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier);
            }
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(quote @ ('"' | '\'')) => {
                self.with_current_token(TokenBuilder::start_system_identifier);
                self.switch_to(Self::system_identifier_state(quote));
            }
            None => {
                self.eof_in_doctype();
            }
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier);
            }
        }
    }

    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_system_keyword_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPESystemIdentifier);
            }
            Some(quote @ ('"' | '\'')) => {
                self.error_state(
                    ParseErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword,
                    Self::system_identifier_state(quote),
                );
                self.with_current_token(TokenBuilder::start_system_identifier);
            }
            Some('>') => {
                self.abrupt_doctype(ParseErrorCode::MissingDoctypeSystemIdentifier);
            }
            None => {
                self.eof_in_doctype();
            }
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier);
            }
        }
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => {
                self.with_current_token(TokenBuilder::start_system_identifier);
                self.switch_to(Self::system_identifier_state(quote));
            }
            Some('>') => {
                self.abrupt_doctype(ParseErrorCode::MissingDoctypeSystemIdentifier);
            }
            None => {
                self.eof_in_doctype();
            }
            Some(_) => {
                self.bogus_doctype(ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier);
            }
        }
    }

    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_system_identifier_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.switch_to(TokenizerState::AfterDOCTYPESystemIdentifier);
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_current_token(|token| token.push_system_identifier('\u{FFFD}'));
            }
            Some('>') => {
                self.abrupt_doctype(ParseErrorCode::AbruptDoctypeSystemIdentifier);
            }
            None => {
                self.eof_in_doctype();
            }
            Some(c) => {
                self.with_current_token(|token| token.push_system_identifier(c));
            }
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_doctype();
            }
            // "Parse error. Switch to the bogus DOCTYPE state. (This does not set the
            // DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.error_state(
                    ParseErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier,
                    TokenizerState::BogusDOCTYPE,
                );
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.reconsume_in(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
            }
            // "Ignore the character."
            Some(_) => {}
        }
    }

    fn start_doctype_name(&mut self, first: char) {
        let mut doctype = TokenBuilder::new_doctype();
        doctype.push_doctype_name(first);
        self.current_token = Some(doctype);
    }

    const fn public_identifier_state(quote: char) -> TokenizerState {
        if quote == '"' {
            TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted
        } else {
            TokenizerState::DOCTYPEPublicIdentifierSingleQuoted
        }
    }

    const fn system_identifier_state(quote: char) -> TokenizerState {
        if quote == '"' {
            TokenizerState::DOCTYPESystemIdentifierDoubleQuoted
        } else {
            TokenizerState::DOCTYPESystemIdentifierSingleQuoted
        }
    }

    /// "Parse error. Set the DOCTYPE token's force-quirks flag to on. Emit that
    /// DOCTYPE token. Reconsume the EOF character in the data state."
    fn eof_in_doctype(&mut self) {
        self.error_reconsume_in(ParseErrorCode::EofInDoctype, TokenizerState::Data);
        self.with_current_token(TokenBuilder::set_force_quirks);
        self.emit_token();
    }

    /// A `>` where more DOCTYPE was expected: quirks on, emit, back to data.
    fn abrupt_doctype(&mut self, code: ParseErrorCode) {
        self.error_state(code, TokenizerState::Data);
        self.with_current_token(TokenBuilder::set_force_quirks);
        self.emit_token();
    }

    /// Give up on the rest of the DOCTYPE, with force-quirks on.
    fn bogus_doctype(&mut self, code: ParseErrorCode) {
        self.error_state(code, TokenizerState::BogusDOCTYPE);
        self.with_current_token(TokenBuilder::set_force_quirks);
    }
}
