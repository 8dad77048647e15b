//! Character reference decoding for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The decoder runs with the `&` already consumed. It only looks ahead until it
//! knows what it has, so when nothing is returned the input is left exactly
//! where it was and the caller emits a literal `&`.

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ParseErrorCode;
use super::input::{ForbiddenCodePoint, classify_code_point};
use super::named_character_references::{
    LONGEST_ENTITY_NAME, lookup_entity, windows_1252_code_point,
};

/// The replacement a character reference decoded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterReference {
    /// A named reference. A few names expand to two code points.
    Named(&'static str),
    /// A numeric reference, after replacement-table mapping.
    Numeric(char),
}

impl CharacterReference {
    /// The characters to emit, in order.
    pub fn chars(self) -> impl Iterator<Item = char> {
        let (named, numeric) = match self {
            Self::Named(text) => (text, None),
            Self::Numeric(c) => ("", Some(c)),
        };
        named.chars().chain(numeric)
    }
}

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// Returns true if the return state is an attribute value state.
    /// "consumed as part of an attribute"
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// Shared handler for the three "character reference in ..." states.
    ///
    /// Switches back to the return state first, so errors raised while decoding
    /// report it as their destination.
    pub(super) fn handle_character_reference_state(&mut self) {
        let return_state = self.return_state.unwrap_or(match self.state {
            TokenizerState::CharacterReferenceInRCDATA => TokenizerState::RCDATA,
            TokenizerState::CharacterReferenceInAttributeValue => {
                TokenizerState::AttributeValueUnquoted
            }
            _ => TokenizerState::Data,
        });
        self.return_state = Some(return_state);
        self.switch_to(return_state);

        // "with the additional allowed character being U+0022 QUOTATION MARK ("),
        // U+0027 APOSTROPHE ('), or U+003E GREATER-THAN SIGN (>)" depending on the
        // kind of attribute value.
        let additional_allowed = match return_state {
            TokenizerState::AttributeValueDoubleQuoted => Some('"'),
            TokenizerState::AttributeValueSingleQuoted => Some('\''),
            TokenizerState::AttributeValueUnquoted => Some('>'),
            _ => None,
        };

        let reference = self.consume_character_reference(additional_allowed);
        self.flush_character_reference(reference);
        self.return_state = None;
    }

    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    ///
    /// A failed decode flushes the `&` itself.
    fn flush_character_reference(&mut self, reference: Option<CharacterReference>) {
        let in_attribute = self.is_consumed_as_part_of_attribute();
        let text: Vec<char> = match reference {
            Some(reference) => reference.chars().collect(),
            None => vec!['&'],
        };
        for c in text {
            if in_attribute {
                self.with_current_token(|token| token.push_attribute_value(c));
            } else {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.4 Tokenizing character references](https://html.spec.whatwg.org/multipage/parsing.html#consume-a-character-reference)
    ///
    /// "Consume a character reference". `None` means "not a character reference";
    /// nothing has been consumed in that case.
    pub(super) fn consume_character_reference(
        &mut self,
        additional_allowed: Option<char>,
    ) -> Option<CharacterReference> {
        match self.input.peek() {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF),
            // U+0020 SPACE, U+003C LESS-THAN SIGN, U+0026 AMPERSAND, EOF, The additional
            // allowed character, if there is one"
            // "Not a character reference. No characters are consumed, and nothing is
            // returned. (This is not an error, either.)"
            None => None,
            Some(c) if Self::is_whitespace_char(c) || c == '<' || c == '&' => None,
            Some(c) if Some(c) == additional_allowed => None,
            Some('#') => self.consume_numeric_character_reference(),
            Some(_) => self.consume_named_character_reference(),
        }
    }

    fn consume_numeric_character_reference(&mut self) -> Option<CharacterReference> {
        // Offsets are relative to the `#`.
        let (radix, digits_start) = match self.input.peek_nth(1) {
            Some('x' | 'X') => (16, 2),
            _ => (10, 1),
        };

        let mut value: u32 = 0;
        let mut digit_count = 0;
        while let Some(digit) = self
            .input
            .peek_nth(digits_start + digit_count)
            .and_then(|c| c.to_digit(radix))
        {
            value = value.saturating_mul(radix).saturating_add(digit);
            digit_count += 1;
        }

        // "If no characters match the range, then don't consume any characters
        // (and unconsume the U+0023 NUMBER SIGN character and, if appropriate, the
        // X character). This is a parse error; nothing is returned."
        if digit_count == 0 {
            self.parse_error(ParseErrorCode::AbsenceOfDigitsInNumericCharacterReference);
            return None;
        }
        self.input.advance(digits_start + digit_count);

        // "Otherwise, if the next character is a U+003B SEMICOLON, consume that too.
        // If it isn't, there is a parse error."
        if self.input.peek() == Some(';') {
            self.input.advance(1);
        } else {
            self.parse_error(ParseErrorCode::MissingSemicolonAfterCharacterReference);
        }

        Some(CharacterReference::Numeric(self.numeric_reference_value(value)))
    }

    /// Map the number of a numeric reference to the character it stands for,
    /// reporting the replacement-table and range errors.
    fn numeric_reference_value(&mut self, value: u32) -> char {
        match value {
            0 => {
                self.parse_error(ParseErrorCode::NullCharacterReference);
                '\u{FFFD}'
            }
            0x0D => {
                self.parse_error(ParseErrorCode::ControlCharacterReference);
                '\r'
            }
            // "If that number is one of the numbers in the first column of the
            // following table, then this is a parse error. Find the row with that
            // number in the first column, and return a character token for the
            // Unicode character given in the second column of that row."
            0x80..=0x9F => {
                self.parse_error(ParseErrorCode::ControlCharacterReference);
                windows_1252_code_point(value).unwrap_or('\u{FFFD}')
            }
            0xD800..=0xDFFF => {
                self.parse_error(ParseErrorCode::SurrogateCharacterReference);
                '\u{FFFD}'
            }
            v if v > 0x10_FFFF => {
                self.parse_error(ParseErrorCode::CharacterReferenceOutsideUnicodeRange);
                '\u{FFFD}'
            }
            v => {
                match classify_code_point(v) {
                    Some(ForbiddenCodePoint::Control) => {
                        self.parse_error(ParseErrorCode::ControlCharacterReference);
                    }
                    Some(ForbiddenCodePoint::Noncharacter) => {
                        self.parse_error(ParseErrorCode::NoncharacterCharacterReference);
                    }
                    None => {}
                }
                char::from_u32(v).unwrap_or('\u{FFFD}')
            }
        }
    }

    fn consume_named_character_reference(&mut self) -> Option<CharacterReference> {
        let window = self.input.peek_chars(LONGEST_ENTITY_NAME).to_vec();

        // "Consume the maximum number of characters possible, with the consumed
        // characters matching one of the identifiers in the named character
        // references table."
        for len in (2..=window.len()).rev() {
            let name: String = window[..len].iter().collect();
            let Some(text) = lookup_entity(&name) else {
                continue;
            };
            let terminated = name.ends_with(';');

            // "If the last character matched is not a U+003B SEMICOLON character
            // (;), this is a parse error."
            if !terminated {
                self.parse_error(ParseErrorCode::MissingSemicolonAfterCharacterReference);
            }

            // "If the character reference is being consumed as part of an attribute,
            // and the last character matched is not a U+003B SEMICOLON character (;),
            // and the next input character is either a U+003D EQUALS SIGN character
            // (=) or an alphanumeric ASCII character, then, for historical reasons,
            // all the characters that were matched after the U+0026 AMPERSAND
            // character (&) must be unconsumed, and nothing is returned."
            if !terminated
                && self.is_consumed_as_part_of_attribute()
                && self
                    .input
                    .peek_nth(len)
                    .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
            {
                return None;
            }

            self.input.advance(len);
            return Some(CharacterReference::Named(text));
        }

        // "If no match can be made, then no characters are consumed, and nothing
        // is returned." Every miss is reported.
        self.parse_error(ParseErrorCode::UnknownNamedCharacterReference);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_reference_yields_every_code_point() {
        let chars: Vec<char> = CharacterReference::Named("\u{2242}\u{338}").chars().collect();
        assert_eq!(chars, vec!['\u{2242}', '\u{338}']);
    }

    #[test]
    fn test_numeric_reference_yields_one_char() {
        let chars: Vec<char> = CharacterReference::Numeric('A').chars().collect();
        assert_eq!(chars, vec!['A']);
    }
}
