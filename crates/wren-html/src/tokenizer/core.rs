use strum_macros::{Display, EnumIter, EnumString};

use super::builder::TokenBuilder;
use super::error::{ParseErrorCode, TokenizerError};
use super::input::{ForbiddenCodePoint, InputStream, classify_code_point};
use super::options::TokenizerOptions;
use super::token::Token;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Exactly one state is current at a time.
///
/// `Display` renders the variant name, which is also what [`Token::ParseError`]
/// reports; `FromStr` parses it back (ASCII case-insensitively).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [Character reference in data state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReferenceInData,
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    RCDATA,
    /// [Character reference in RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReferenceInRCDATA,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RAWTEXT,
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ScriptData,
    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    PLAINTEXT,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    RCDATALessThanSign,
    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    RCDATAEndTagOpen,
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    RCDATAEndTagName,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RAWTEXTLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RAWTEXTEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RAWTEXTEndTagName,
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    ScriptDataLessThanSign,
    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    ScriptDataEndTagOpen,
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ScriptDataEndTagName,
    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    ScriptDataEscapeStart,
    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    ScriptDataEscapeStartDash,
    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    ScriptDataEscaped,
    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    ScriptDataEscapedDash,
    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    ScriptDataEscapedDashDash,
    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    ScriptDataEscapedLessThanSign,
    /// [§ 13.2.5.24 Script data escaped end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-open-state)
    ScriptDataEscapedEndTagOpen,
    /// [§ 13.2.5.25 Script data escaped end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-name-state)
    ScriptDataEscapedEndTagName,
    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    ScriptDataDoubleEscapeStart,
    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    ScriptDataDoubleEscaped,
    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    ScriptDataDoubleEscapedDash,
    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    ScriptDataDoubleEscapedDashDash,
    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    ScriptDataDoubleEscapedLessThanSign,
    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    ScriptDataDoubleEscapeEnd,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [Character reference in attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReferenceInAttributeValue,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    CommentEndBang,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    DOCTYPE,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDOCTYPEName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DOCTYPEName,
    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    AfterDOCTYPEName,
    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    AfterDOCTYPEPublicKeyword,
    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    BeforeDOCTYPEPublicIdentifier,
    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    DOCTYPEPublicIdentifierDoubleQuoted,
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    DOCTYPEPublicIdentifierSingleQuoted,
    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    AfterDOCTYPEPublicIdentifier,
    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    BetweenDOCTYPEPublicAndSystemIdentifiers,
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    AfterDOCTYPESystemKeyword,
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    BeforeDOCTYPESystemIdentifier,
    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    DOCTYPESystemIdentifierDoubleQuoted,
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    DOCTYPESystemIdentifierSingleQuoted,
    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    AfterDOCTYPESystemIdentifier,
    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    BogusDOCTYPE,
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    CDATASection,
    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    CDATASectionBracket,
    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    CDATASectionEnd,
}

impl TokenizerState {
    /// Whether the driver consumes a character before running this state.
    ///
    /// Markup declaration open and the character reference states decide by
    /// lookahead alone.
    #[must_use]
    pub const fn consumes_input(self) -> bool {
        !matches!(
            self,
            Self::MarkupDeclarationOpen
                | Self::CharacterReferenceInData
                | Self::CharacterReferenceInRCDATA
                | Self::CharacterReferenceInAttributeValue
        )
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The HTML tokenizer. Owns the input cursor, the current state, the single
/// in-progress token, and the output stream.
///
/// ```
/// use wren_html::{HTMLTokenizer, Token};
///
/// let tokens = HTMLTokenizer::tokenize("<br/>");
/// assert!(matches!(&tokens[0], Token::StartTag { name, self_closing: true, .. } if name == "br"));
/// assert!(tokens[1].is_eof());
/// ```
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    /// The state whose handler is currently running; parse errors report it as
    /// their origin even after the handler has switched states.
    pub(super) dispatched_state: TokenizerState,
    /// "lastState": where a character reference returns to.
    pub(super) return_state: Option<TokenizerState>,
    pub(super) input: InputStream,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<TokenBuilder>,
    pub(super) at_eof: bool,
    pub(super) token_stream: Vec<Token>,
    pub(super) last_start_tag_name: Option<String>,
    pub(super) temporary_buffer: String,
    pub(super) options: TokenizerOptions,
    pub(super) strict_failure: Option<TokenizerError>,
}

impl HTMLTokenizer {
    /// Create a tokenizer over `input` with default options.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_options(input, TokenizerOptions::default())
    }

    /// Create a tokenizer over `input` with the given options.
    #[must_use]
    pub fn with_options(input: &str, options: TokenizerOptions) -> Self {
        Self {
            state: options.initial_state,
            dispatched_state: options.initial_state,
            return_state: None,
            input: InputStream::new(input),
            current_input_character: None,
            current_token: None,
            at_eof: false,
            token_stream: Vec::new(),
            last_start_tag_name: options.last_start_tag.clone(),
            temporary_buffer: String::new(),
            options,
            strict_failure: None,
        }
    }

    /// Tokenize `input` leniently, recording parse errors as tokens.
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut tokenizer = Self::new(input);
        tokenizer.drive();
        tokenizer.into_tokens()
    }

    /// Tokenize `input` with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizerError::StrictParseError`] on the first parse error when
    /// `options.strict` is set.
    pub fn tokenize_with(
        input: &str,
        options: TokenizerOptions,
    ) -> Result<Vec<Token>, TokenizerError> {
        let mut tokenizer = Self::with_options(input, options);
        tokenizer.run()?;
        Ok(tokenizer.into_tokens())
    }

    /// Run the state machine until the end-of-file token has been emitted.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first parse error. Tokens emitted before it
    /// remain available through [`Self::tokens`].
    pub fn run(&mut self) -> Result<(), TokenizerError> {
        self.drive();
        let Some(error) = self.strict_failure.take() else {
            return Ok(());
        };
        // The failing handler may have emitted more before the loop stopped.
        let TokenizerError::StrictParseError { ref tokens, .. } = error;
        self.token_stream.truncate(tokens.len());
        Err(error)
    }

    /// Consume the tokenizer and return the emitted tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Switch state from outside, as a tree builder does when it sees a `<title>`
    /// or `<script>` start tag.
    pub const fn set_state(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// Override the name used by the appropriate-end-tag check.
    pub fn set_last_start_tag(&mut self, name: Option<String>) {
        self.last_start_tag_name = name;
    }

    fn drive(&mut self) {
        while !self.at_eof && self.strict_failure.is_none() {
            self.step();
        }
    }

    /// Run the current state once.
    fn step(&mut self) {
        self.dispatched_state = self.state;

        // "Consume the next input character"
        if self.state.consumes_input() {
            self.current_input_character = self.input.consume();
            if self.input.last_consume_was_fresh() {
                if let Some(c) = self.current_input_character {
                    self.validate_input_character(c);
                }
            }
        }

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::CharacterReferenceInData
            | TokenizerState::CharacterReferenceInRCDATA
            | TokenizerState::CharacterReferenceInAttributeValue => {
                self.handle_character_reference_state();
            }
            TokenizerState::RCDATA => self.handle_rcdata_state(),
            TokenizerState::RAWTEXT => self.handle_rawtext_state(),
            TokenizerState::ScriptData => self.handle_script_data_state(),
            TokenizerState::PLAINTEXT => self.handle_plaintext_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::RCDATALessThanSign => self.handle_rcdata_less_than_sign_state(),
            TokenizerState::RCDATAEndTagOpen => {
                self.handle_text_end_tag_open_state(
                    TokenizerState::RCDATAEndTagName,
                    TokenizerState::RCDATA,
                );
            }
            TokenizerState::RCDATAEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::RCDATA);
            }
            TokenizerState::RAWTEXTLessThanSign => self.handle_rawtext_less_than_sign_state(),
            TokenizerState::RAWTEXTEndTagOpen => {
                self.handle_text_end_tag_open_state(
                    TokenizerState::RAWTEXTEndTagName,
                    TokenizerState::RAWTEXT,
                );
            }
            TokenizerState::RAWTEXTEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::RAWTEXT);
            }
            TokenizerState::ScriptDataLessThanSign => {
                self.handle_script_data_less_than_sign_state();
            }
            TokenizerState::ScriptDataEndTagOpen => self.handle_text_end_tag_open_state(
                TokenizerState::ScriptDataEndTagName,
                TokenizerState::ScriptData,
            ),
            TokenizerState::ScriptDataEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::ScriptData);
            }
            TokenizerState::ScriptDataEscapeStart => self.handle_script_data_escape_start_state(),
            TokenizerState::ScriptDataEscapeStartDash => {
                self.handle_script_data_escape_start_dash_state();
            }
            TokenizerState::ScriptDataEscaped => self.handle_script_data_escaped_state(),
            TokenizerState::ScriptDataEscapedDash => self.handle_script_data_escaped_dash_state(),
            TokenizerState::ScriptDataEscapedDashDash => {
                self.handle_script_data_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataEscapedLessThanSign => {
                self.handle_script_data_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataEscapedEndTagOpen => self.handle_text_end_tag_open_state(
                TokenizerState::ScriptDataEscapedEndTagName,
                TokenizerState::ScriptDataEscaped,
            ),
            TokenizerState::ScriptDataEscapedEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::ScriptDataEscaped);
            }
            TokenizerState::ScriptDataDoubleEscapeStart => {
                self.handle_script_data_double_escape_start_state();
            }
            TokenizerState::ScriptDataDoubleEscaped => {
                self.handle_script_data_double_escaped_state();
            }
            TokenizerState::ScriptDataDoubleEscapedDash => {
                self.handle_script_data_double_escaped_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedDashDash => {
                self.handle_script_data_double_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedLessThanSign => {
                self.handle_script_data_double_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataDoubleEscapeEnd => {
                self.handle_script_data_double_escape_end_state();
            }
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::CommentStart => self.handle_comment_start_state(),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
            TokenizerState::CommentEnd => self.handle_comment_end_state(),
            TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(),
            TokenizerState::DOCTYPE => self.handle_doctype_state(),
            TokenizerState::BeforeDOCTYPEName => self.handle_before_doctype_name_state(),
            TokenizerState::DOCTYPEName => self.handle_doctype_name_state(),
            TokenizerState::AfterDOCTYPEName => self.handle_after_doctype_name_state(),
            TokenizerState::AfterDOCTYPEPublicKeyword => {
                self.handle_after_doctype_public_keyword_state();
            }
            TokenizerState::BeforeDOCTYPEPublicIdentifier => {
                self.handle_before_doctype_public_identifier_state();
            }
            TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted => {
                self.handle_doctype_public_identifier_quoted_state('"');
            }
            TokenizerState::DOCTYPEPublicIdentifierSingleQuoted => {
                self.handle_doctype_public_identifier_quoted_state('\'');
            }
            TokenizerState::AfterDOCTYPEPublicIdentifier => {
                self.handle_after_doctype_public_identifier_state();
            }
            TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers => {
                self.handle_between_doctype_public_and_system_identifiers_state();
            }
            TokenizerState::AfterDOCTYPESystemKeyword => {
                self.handle_after_doctype_system_keyword_state();
            }
            TokenizerState::BeforeDOCTYPESystemIdentifier => {
                self.handle_before_doctype_system_identifier_state();
            }
            TokenizerState::DOCTYPESystemIdentifierDoubleQuoted => {
                self.handle_doctype_system_identifier_quoted_state('"');
            }
            TokenizerState::DOCTYPESystemIdentifierSingleQuoted => {
                self.handle_doctype_system_identifier_quoted_state('\'');
            }
            TokenizerState::AfterDOCTYPESystemIdentifier => {
                self.handle_after_doctype_system_identifier_state();
            }
            TokenizerState::BogusDOCTYPE => self.handle_bogus_doctype_state(),
            TokenizerState::CDATASection => self.handle_cdata_section_state(),
            TokenizerState::CDATASectionBracket => self.handle_cdata_section_bracket_state(),
            TokenizerState::CDATASectionEnd => self.handle_cdata_section_end_state(),
        }
    }

    /// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
    ///
    /// Checked once per input position; reconsumed characters are skipped.
    fn validate_input_character(&mut self, c: char) {
        match classify_code_point(u32::from(c)) {
            Some(ForbiddenCodePoint::Control) => {
                self.parse_error(ParseErrorCode::ControlCharacterInInputStream);
            }
            Some(ForbiddenCodePoint::Noncharacter) => {
                self.parse_error(ParseErrorCode::NoncharacterInInputStream);
            }
            None => {}
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&)"
            // "Switch to the character reference in data state."
            Some('&') => {
                self.return_state = Some(TokenizerState::Data);
                self.switch_to(TokenizerState::CharacterReferenceInData);
            }
            // "U+003C LESS-THAN SIGN (<)"
            // "Switch to the tag open state."
            Some('<') => {
                self.switch_to(TokenizerState::TagOpen);
            }
            // "U+0000 NULL"
            // "Parse error. Emit the current input character as a character token."
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.emit_character_token('\0');
            }
            // "EOF"
            // "Emit an end-of-file token."
            None => {
                self.emit_eof_token();
            }
            // "Anything else"
            // "Emit the current input character as a character token."
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            Some('&') => {
                self.return_state = Some(TokenizerState::RCDATA);
                self.switch_to(TokenizerState::CharacterReferenceInRCDATA);
            }
            Some('<') => {
                self.switch_to(TokenizerState::RCDATALessThanSign);
            }
            // "U+0000 NULL"
            // "Parse error. Emit a U+FFFD REPLACEMENT CHARACTER character token."
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.emit_character_token('\u{FFFD}');
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<)"
            // "Switch to the RAWTEXT less-than sign state."
            Some('<') => {
                self.switch_to(TokenizerState::RAWTEXTLessThanSign);
            }
            // "U+0000 NULL"
            // "Parse error. Emit a U+FFFD REPLACEMENT CHARACTER character token."
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.emit_character_token('\u{FFFD}');
            }
            // "EOF"
            // "Emit an end-of-file token."
            None => {
                self.emit_eof_token();
            }
            // "Anything else"
            // "Emit the current input character as a character token."
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    ///
    /// There is no way out of PLAINTEXT.
    fn handle_plaintext_state(&mut self) {
        match self.current_input_character {
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.emit_character_token('\u{FFFD}');
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!)"
            // "Switch to the markup declaration open state."
            Some('!') => {
                self.switch_to(TokenizerState::MarkupDeclarationOpen);
            }
            // "U+002F SOLIDUS (/)"
            // "Switch to the end tag open state."
            Some('/') => {
                self.switch_to(TokenizerState::EndTagOpen);
            }
            // "ASCII alpha"
            // "Create a new start tag token, set its tag name to the empty string.
            // Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(TokenBuilder::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?)"
            // "Parse error. Switch to the bogus comment state." The comment starts
            // with the question mark itself.
            Some('?') => {
                self.current_token = Some(TokenBuilder::new_comment());
                self.error_reconsume_in(
                    ParseErrorCode::UnexpectedQuestionMarkInsteadOfTagName,
                    TokenizerState::BogusComment,
                );
            }
            None => {
                self.error_reconsume_in(ParseErrorCode::EofBeforeTagName, TokenizerState::Data);
                self.emit_character_token('<');
            }
            // "Anything else"
            // "Parse error. Emit a U+003C LESS-THAN SIGN character token and
            // reconsume the current input character in the data state."
            Some(_) => {
                self.error_reconsume_in(
                    ParseErrorCode::InvalidFirstCharacterOfTagName,
                    TokenizerState::Data,
                );
                self.emit_character_token('<');
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(TokenBuilder::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Parse error. Switch to the data state."
            Some('>') => {
                self.error_state(ParseErrorCode::MissingEndTagName, TokenizerState::Data);
            }
            // "EOF"
            // "Parse error. Emit a U+003C LESS-THAN SIGN character token and a U+002F
            // SOLIDUS character token. Reconsume the EOF character in the data state."
            None => {
                self.error_reconsume_in(ParseErrorCode::EofBeforeTagName, TokenizerState::Data);
                self.emit_character_token('<');
                self.emit_character_token('/');
            }
            // "Anything else"
            // "Parse error. Switch to the bogus comment state."
            Some(_) => {
                self.current_token = Some(TokenBuilder::new_comment());
                self.error_reconsume_in(
                    ParseErrorCode::InvalidFirstCharacterOfTagName,
                    TokenizerState::BogusComment,
                );
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)"
            // "U+000A LINE FEED (LF)"
            // "U+000C FORM FEED (FF)"
            // "U+0020 SPACE"
            // "Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/)"
            // "Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character to the
            // current tag token's tag name."
            Some(c) if c.is_ascii_uppercase() => {
                self.with_current_token(|token| token.push_tag_name(c.to_ascii_lowercase()));
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_current_token(|token| token.push_tag_name('\u{FFFD}'));
            }
            // "EOF"
            // "Parse error. Reconsume the EOF character in the data state."
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            Some(c) => {
                self.with_current_token(|token| token.push_tag_name(c));
            }
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    fn handle_rcdata_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+002F SOLIDUS (/)"
            // "Set the temporary buffer to the empty string. Switch to the RCDATA end
            // tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::RCDATAEndTagOpen);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token. Reconsume in the RCDATA state."
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::RCDATA);
            }
        }
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    fn handle_rawtext_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::RAWTEXTEndTagOpen);
            }
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::RAWTEXT);
            }
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    ///
    /// Shared by the RCDATA, RAWTEXT, script data and script data escaped end tag
    /// open states, which differ only in where they go next.
    fn handle_text_end_tag_open_state(
        &mut self,
        name_state: TokenizerState,
        text_state: TokenizerState,
    ) {
        match self.current_input_character {
            // "ASCII alpha"
            // "Create a new end tag token, set its tag name to the empty string.
            // Reconsume in the end tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(TokenBuilder::new_end_tag());
                self.reconsume_in(name_state);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token and a U+002F SOLIDUS
            // character token. Reconsume in the text state."
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// Shared by the RCDATA, RAWTEXT, script data and script data escaped end tag
    /// name states. `text_state` is where "anything else" reconsumes.
    fn handle_text_end_tag_name_state(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "If the current end tag token is an appropriate end tag token, then switch to the
            // before attribute name state. Otherwise, treat it as per the "anything else" entry below."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character to the
            // current tag token's tag name. Append the current input character to the
            // temporary buffer."
            Some(c) if c.is_ascii_uppercase() => {
                self.with_current_token(|token| token.push_tag_name(c.to_ascii_lowercase()));
                self.temporary_buffer.push(c);
            }
            Some(c) if c.is_ascii_lowercase() => {
                self.with_current_token(|token| token.push_tag_name(c));
                self.temporary_buffer.push(c);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
            // token, and a character token for each of the characters in the temporary
            // buffer (in the order they were added to the buffer). Reconsume in the
            // text state."
            _ => {
                self.emit_end_tag_name_anything_else(text_state);
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "ASCII upper alpha"
            // "Start a new attribute in the current tag token. Set that attribute's name
            // to the lowercase version of the current input character"
            Some(c) if c.is_ascii_uppercase() => {
                self.start_new_attribute(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::AttributeName);
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.start_new_attribute('\u{FFFD}');
                self.switch_to(TokenizerState::AttributeName);
            }
            // "U+0022 QUOTATION MARK (")"
            // "U+0027 APOSTROPHE (')"
            // "U+003C LESS-THAN SIGN (<)"
            // "U+003D EQUALS SIGN (=)"
            // "Parse error. Treat it as per the "anything else" entry below."
            Some(c @ ('"' | '\'' | '<' | '=')) => {
                let code = if c == '=' {
                    ParseErrorCode::UnexpectedEqualsSignBeforeAttributeName
                } else {
                    ParseErrorCode::UnexpectedCharacterInAttributeName
                };
                self.error_state(code, TokenizerState::AttributeName);
                self.start_new_attribute(c);
            }
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            Some(c) => {
                self.start_new_attribute(c);
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(c) if c.is_ascii_uppercase() => {
                self.with_current_token(|token| token.push_attribute_name(c.to_ascii_lowercase()));
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_current_token(|token| token.push_attribute_name('\u{FFFD}'));
            }
            Some(c @ ('"' | '\'' | '<')) => {
                self.parse_error(ParseErrorCode::UnexpectedCharacterInAttributeName);
                self.with_current_token(|token| token.push_attribute_name(c));
            }
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            Some(c) => {
                self.with_current_token(|token| token.push_attribute_name(c));
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(c) if c.is_ascii_uppercase() => {
                self.start_new_attribute(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::AttributeName);
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.start_new_attribute('\u{FFFD}');
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(c @ ('"' | '\'' | '<')) => {
                self.error_state(
                    ParseErrorCode::UnexpectedCharacterInAttributeName,
                    TokenizerState::AttributeName,
                );
                self.start_new_attribute(c);
            }
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            Some(c) => {
                self.start_new_attribute(c);
                self.switch_to(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => {
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            // "U+0026 AMPERSAND (&)"
            // "Switch to the attribute value (unquoted) state and reconsume this current
            // input character."
            Some('&') => {
                self.reconsume_in(TokenizerState::AttributeValueUnquoted);
            }
            Some('\'') => {
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            Some('\0') => {
                self.error_state(
                    ParseErrorCode::UnexpectedNullCharacter,
                    TokenizerState::AttributeValueUnquoted,
                );
                self.with_current_token(|token| token.push_attribute_value('\u{FFFD}'));
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Parse error. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.error_state(ParseErrorCode::MissingAttributeValue, TokenizerState::Data);
                self.emit_token();
            }
            Some(c @ ('<' | '=' | '`')) => {
                self.error_state(
                    ParseErrorCode::UnexpectedCharacterInUnquotedAttributeValue,
                    TokenizerState::AttributeValueUnquoted,
                );
                self.with_current_token(|token| token.push_attribute_value(c));
            }
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            Some(c) => {
                self.with_current_token(|token| token.push_attribute_value(c));
                self.switch_to(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            // The matching quote closes the value.
            Some(c) if c == quote => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            // "U+0026 AMPERSAND (&)"
            // "Switch to the character reference in attribute value state, with the
            // additional allowed character being the quote."
            Some('&') => {
                self.return_state = Some(self.state);
                self.switch_to(TokenizerState::CharacterReferenceInAttributeValue);
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_current_token(|token| token.push_attribute_value('\u{FFFD}'));
            }
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            Some(c) => {
                self.with_current_token(|token| token.push_attribute_value(c));
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueUnquoted);
                self.switch_to(TokenizerState::CharacterReferenceInAttributeValue);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_current_token(|token| token.push_attribute_value('\u{FFFD}'));
            }
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.parse_error(ParseErrorCode::UnexpectedCharacterInUnquotedAttributeValue);
                self.with_current_token(|token| token.push_attribute_value(c));
            }
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            Some(c) => {
                self.with_current_token(|token| token.push_attribute_value(c));
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            // "Anything else"
            // "Parse error. Reconsume the character in the before attribute name state."
            Some(_) => {
                self.error_reconsume_in(
                    ParseErrorCode::MissingWhitespaceBetweenAttributes,
                    TokenizerState::BeforeAttributeName,
                );
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)"
            // "Set the self-closing flag of the current tag token. Switch to the data
            // state. Emit the current tag token."
            Some('>') => {
                self.with_current_token(TokenBuilder::set_self_closing);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.current_token = None;
                self.error_reconsume_in(ParseErrorCode::EofInTag, TokenizerState::Data);
            }
            Some(_) => {
                self.error_reconsume_in(
                    ParseErrorCode::UnexpectedSolidusInTag,
                    TokenizerState::BeforeAttributeName,
                );
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    ///
    /// The comment token is created by whichever state switched here, so the
    /// data starts with the character that caused the switch.
    fn handle_bogus_comment_state(&mut self) {
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
                self.with_current_token(|token| token.push_comment('\u{FFFD}'));
            }
            Some(c) => {
                self.with_current_token(|token| token.push_comment(c));
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Decides by lookahead; nothing was consumed on entry.
    fn handle_markup_declaration_open_state(&mut self) {
        // "Two U+002D HYPHEN-MINUS characters (-)"
        // "Consume those two characters, create a comment token whose data is the
        // empty string, and switch to the comment start state."
        if self.input.next_few_characters_are("--") {
            self.input.advance(2);
            self.current_token = Some(TokenBuilder::new_comment());
            self.switch_to(TokenizerState::CommentStart);
        }
        // "ASCII case-insensitive match for the word "DOCTYPE""
        // "Consume those characters and switch to the DOCTYPE state."
        else if self.input.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.input.advance(7);
            self.switch_to(TokenizerState::DOCTYPE);
        }
        // "The string "[CDATA[" (the five uppercase letters "CDATA" with a U+005B LEFT
        // SQUARE BRACKET character before and after)"
        else if self.options.allow_cdata && self.input.next_few_characters_are("[CDATA[") {
            self.input.advance(7);
            self.switch_to(TokenizerState::CDATASection);
        }
        // "Anything else"
        // "Parse error. Switch to the bogus comment state. The next character that is
        // consumed, if any, is the first character that will be in the comment."
        else {
            self.current_token = Some(TokenBuilder::new_comment());
            self.error_state(
                ParseErrorCode::IncorrectlyOpenedComment,
                TokenizerState::BogusComment,
            );
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentStartDash);
            }
            Some('\0') => {
                self.error_state(ParseErrorCode::UnexpectedNullCharacter, TokenizerState::Comment);
                self.with_current_token(|token| token.push_comment('\u{FFFD}'));
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Parse error. Switch to the data state. Emit the comment token."
            Some('>') => {
                self.error_state(ParseErrorCode::AbruptClosingOfEmptyComment, TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.error_reconsume_in(ParseErrorCode::EofInComment, TokenizerState::Data);
                self.emit_token();
            }
            Some(c) => {
                self.with_current_token(|token| token.push_comment(c));
                self.switch_to(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            Some('\0') => {
                self.error_state(ParseErrorCode::UnexpectedNullCharacter, TokenizerState::Comment);
                self.with_current_token(|token| token.push_comment_str("-\u{FFFD}"));
            }
            Some('>') => {
                self.error_state(ParseErrorCode::AbruptClosingOfEmptyComment, TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.error_reconsume_in(ParseErrorCode::EofInComment, TokenizerState::Data);
                self.emit_token();
            }
            // "Anything else"
            // "Append a U+002D HYPHEN-MINUS character (-) and the current input character
            // to the comment token's data. Switch to the comment state."
            Some(c) => {
                self.with_current_token(|token| {
                    token.push_comment('-');
                    token.push_comment(c);
                });
                self.switch_to(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.with_current_token(|token| token.push_comment('\u{FFFD}'));
            }
            None => {
                self.error_reconsume_in(ParseErrorCode::EofInComment, TokenizerState::Data);
                self.emit_token();
            }
            Some(c) => {
                self.with_current_token(|token| token.push_comment(c));
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            Some('\0') => {
                self.error_state(ParseErrorCode::UnexpectedNullCharacter, TokenizerState::Comment);
                self.with_current_token(|token| token.push_comment_str("-\u{FFFD}"));
            }
            None => {
                self.error_reconsume_in(ParseErrorCode::EofInComment, TokenizerState::Data);
                self.emit_token();
            }
            Some(c) => {
                self.with_current_token(|token| {
                    token.push_comment('-');
                    token.push_comment(c);
                });
                self.switch_to(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.error_state(ParseErrorCode::UnexpectedNullCharacter, TokenizerState::Comment);
                self.with_current_token(|token| token.push_comment_str("--\u{FFFD}"));
            }
            // "U+0021 EXCLAMATION MARK (!)"
            // "Parse error. Switch to the comment end bang state."
            Some('!') => {
                self.error_state(
                    ParseErrorCode::IncorrectlyClosedComment,
                    TokenizerState::CommentEndBang,
                );
            }
            // "U+002D HYPHEN-MINUS (-)"
            // "Parse error. Append a U+002D HYPHEN-MINUS character (-) to the comment
            // token's data."
            Some('-') => {
                self.parse_error(ParseErrorCode::UnexpectedCharacterAfterDoubleDashInComment);
                self.with_current_token(|token| token.push_comment('-'));
            }
            None => {
                self.error_reconsume_in(ParseErrorCode::EofInComment, TokenizerState::Data);
                self.emit_token();
            }
            // "Anything else"
            // "Parse error. Append two U+002D HYPHEN-MINUS characters (-) and the current
            // input character to the comment token's data. Switch to the comment state."
            Some(c) => {
                self.error_state(
                    ParseErrorCode::UnexpectedCharacterAfterDoubleDashInComment,
                    TokenizerState::Comment,
                );
                self.with_current_token(|token| {
                    token.push_comment_str("--");
                    token.push_comment(c);
                });
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            // "Append two U+002D HYPHEN-MINUS characters (-) and a U+0021 EXCLAMATION
            // MARK character (!) to the comment token's data. Switch to the comment end
            // dash state."
            Some('-') => {
                self.with_current_token(|token| token.push_comment_str("--!"));
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.error_state(ParseErrorCode::UnexpectedNullCharacter, TokenizerState::Comment);
                self.with_current_token(|token| token.push_comment_str("--!\u{FFFD}"));
            }
            None => {
                self.error_reconsume_in(ParseErrorCode::EofInComment, TokenizerState::Data);
                self.emit_token();
            }
            Some(c) => {
                self.with_current_token(|token| {
                    token.push_comment_str("--!");
                    token.push_comment(c);
                });
                self.switch_to(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            Some(']') => {
                self.switch_to(TokenizerState::CDATASectionBracket);
            }
            None => {
                self.error_reconsume_in(ParseErrorCode::EofInCdata, TokenizerState::Data);
            }
            // NULL passes through unchanged here; the tree builder deals with it.
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    fn handle_cdata_section_bracket_state(&mut self) {
        if self.current_input_character == Some(']') {
            self.switch_to(TokenizerState::CDATASectionEnd);
        } else {
            self.emit_character_token(']');
            self.reconsume_in(TokenizerState::CDATASection);
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    fn handle_cdata_section_end_state(&mut self) {
        match self.current_input_character {
            Some(']') => {
                self.emit_character_token(']');
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
            }
            _ => {
                self.emit_character_token(']');
                self.emit_character_token(']');
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_state_names_round_trip() {
        for state in TokenizerState::iter() {
            assert_eq!(TokenizerState::from_str(&state.to_string()), Ok(state));
        }
        assert_eq!(TokenizerState::from_str("rcdata"), Ok(TokenizerState::RCDATA));
    }

    #[test]
    fn test_only_lookahead_states_skip_consumption() {
        let lookahead: HashSet<_> = TokenizerState::iter()
            .filter(|state| !state.consumes_input())
            .collect();
        assert_eq!(lookahead.len(), 4);
        assert!(lookahead.contains(&TokenizerState::MarkupDeclarationOpen));
    }

    #[test]
    fn test_run_stops_after_eof() {
        let mut tokenizer = HTMLTokenizer::new("a");
        assert!(tokenizer.run().is_ok());
        assert_eq!(tokenizer.tokens().len(), 2);
        assert!(tokenizer.tokens()[1].is_eof());
    }
}
