//! Parse error codes and the strict-mode error type.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether they are
//! syntactically correct or not. Certain points in the parsing algorithm are said to
//! be parse errors."

use strum_macros::Display;
use thiserror::Error;

use super::core::TokenizerState;
use super::token::Token;

/// Identifies which tokenizer rule a [`Token::ParseError`] reports.
///
/// Names follow the WHATWG parse error table and render in its kebab-case form,
/// e.g. `duplicate-attribute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseErrorCode {
    /// A literal U+0000 NULL in the input.
    UnexpectedNullCharacter,
    /// `<?` where a tag name was expected.
    UnexpectedQuestionMarkInsteadOfTagName,
    /// `<` followed by something that cannot start a tag.
    InvalidFirstCharacterOfTagName,
    /// `</>`
    MissingEndTagName,
    /// Input ends right after `<` or `</`.
    EofBeforeTagName,
    /// Input ends inside a start or end tag.
    EofInTag,
    /// `"`, `'` or `<` inside an attribute name.
    UnexpectedCharacterInAttributeName,
    /// `=` where an attribute name should start.
    UnexpectedEqualsSignBeforeAttributeName,
    /// `"`, `'`, `<`, `=` or `` ` `` inside an unquoted attribute value.
    UnexpectedCharacterInUnquotedAttributeValue,
    /// `>` right after `=`.
    MissingAttributeValue,
    /// Attribute starts directly after a quoted value.
    MissingWhitespaceBetweenAttributes,
    /// `/` not directly followed by `>`.
    UnexpectedSolidusInTag,
    /// An attribute name repeats within one tag; the first occurrence is kept.
    DuplicateAttribute,
    /// Attribute syntax on an end tag.
    EndTagWithAttributes,
    /// `</name/>`
    EndTagWithTrailingSolidus,
    /// `<!` not followed by `--`, `DOCTYPE` or an allowed `[CDATA[`.
    IncorrectlyOpenedComment,
    /// `<!-->` or `<!--->`
    AbruptClosingOfEmptyComment,
    /// Input ends inside a comment.
    EofInComment,
    /// `--!` inside a comment.
    IncorrectlyClosedComment,
    /// `--` followed by something other than `>` inside a comment.
    UnexpectedCharacterAfterDoubleDashInComment,
    /// Input ends inside an escaped script block.
    EofInScriptHtmlCommentLikeText,
    /// Input ends inside a DOCTYPE.
    EofInDoctype,
    /// `<!DOCTYPEhtml>`
    MissingWhitespaceBeforeDoctypeName,
    /// `<!DOCTYPE>`
    MissingDoctypeName,
    /// Something other than `PUBLIC` or `SYSTEM` after the DOCTYPE name.
    InvalidCharacterSequenceAfterDoctypeName,
    /// `PUBLIC"`
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// `SYSTEM"`
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// `PUBLIC>`
    MissingDoctypePublicIdentifier,
    /// `SYSTEM>`
    MissingDoctypeSystemIdentifier,
    /// Public identifier not introduced by a quote.
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// System identifier not introduced by a quote.
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// `>` inside a quoted public identifier.
    AbruptDoctypePublicIdentifier,
    /// `>` inside a quoted system identifier.
    AbruptDoctypeSystemIdentifier,
    /// Public and system identifiers with no whitespace between them.
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// Trailing garbage after the system identifier.
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// Input ends inside a CDATA section.
    EofInCdata,
    /// `&#` or `&#x` with no digits.
    AbsenceOfDigitsInNumericCharacterReference,
    /// A character reference not terminated by `;`.
    MissingSemicolonAfterCharacterReference,
    /// `&` followed by a name that matches nothing in the entity table.
    UnknownNamedCharacterReference,
    /// `&#0;`
    NullCharacterReference,
    /// Numeric reference above U+10FFFF.
    CharacterReferenceOutsideUnicodeRange,
    /// Numeric reference in the surrogate range.
    SurrogateCharacterReference,
    /// Numeric reference to a noncharacter.
    NoncharacterCharacterReference,
    /// Numeric reference to a control character (including CR and the C1 range).
    ControlCharacterReference,
    /// A control character in the input stream.
    ControlCharacterInInputStream,
    /// A noncharacter in the input stream.
    NoncharacterInInputStream,
}

/// Error returned by [`super::HTMLTokenizer::run`] in strict mode.
#[derive(Debug, Clone, Error)]
pub enum TokenizerError {
    /// The first parse error encountered, which aborts a strict run.
    #[error(
        "parse error ({code}) in {from_state} going to {to_state} at offset {offset}, tokens so far: [{}]",
        render_tokens(.tokens)
    )]
    StrictParseError {
        /// Which rule was broken.
        code: ParseErrorCode,
        /// State whose handler detected the error.
        from_state: TokenizerState,
        /// State the tokenizer would have recovered into.
        to_state: TokenizerState,
        /// Index of the input character being processed.
        offset: usize,
        /// Tokens emitted before the error.
        tokens: Vec<Token>,
    },
}

fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
