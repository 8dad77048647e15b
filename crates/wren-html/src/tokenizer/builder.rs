//! Builders for tokens that span several input characters.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! The tokenizer holds at most one live builder, the "current token". States
//! append to it, and emission moves it into the output stream through
//! [`TokenBuilder::finalize`], which also reports tag-level errors such as
//! duplicate attributes.

use super::error::ParseErrorCode;
use super::token::{Attribute, Token};

/// Shared state for start and end tags.
#[derive(Debug, Default)]
pub struct TagBuilder {
    name: String,
    attributes: Vec<Attribute>,
    pending: Option<Attribute>,
    self_closing: bool,
    saw_attributes: bool,
    errors: Vec<ParseErrorCode>,
}

impl TagBuilder {
    /// Move the pending attribute into the list unless its name is already taken.
    ///
    /// "if there is already an attribute on the token with the exact same name,
    /// then this is a duplicate-attribute parse error and the new attribute must
    /// be removed from the token."
    fn finalize_attribute(&mut self) {
        if let Some(attribute) = self.pending.take() {
            if self.attributes.iter().any(|a| a.name == attribute.name) {
                self.errors.push(ParseErrorCode::DuplicateAttribute);
            } else {
                self.attributes.push(attribute);
            }
        }
    }
}

/// Accumulates a DOCTYPE token. Every field starts out missing.
#[derive(Debug, Default)]
pub struct DoctypeBuilder {
    name: Option<String>,
    public_identifier: Option<String>,
    system_identifier: Option<String>,
    force_quirks: bool,
}

/// The "current token" while it is still being built.
#[derive(Debug)]
pub enum TokenBuilder {
    /// A start tag in progress.
    StartTag(TagBuilder),
    /// An end tag in progress. Attributes are parsed but not kept.
    EndTag(TagBuilder),
    /// Comment data so far.
    Comment(String),
    /// A DOCTYPE in progress.
    Doctype(DoctypeBuilder),
}

impl TokenBuilder {
    /// "Create a new start tag token, set its tag name to the empty string."
    #[must_use]
    pub fn new_start_tag() -> Self {
        Self::StartTag(TagBuilder::default())
    }

    /// "Create a new end tag token, set its tag name to the empty string."
    #[must_use]
    pub fn new_end_tag() -> Self {
        Self::EndTag(TagBuilder::default())
    }

    /// "Create a comment token whose data is the empty string."
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment(String::new())
    }

    /// "Create a new DOCTYPE token."
    #[must_use]
    pub fn new_doctype() -> Self {
        Self::Doctype(DoctypeBuilder::default())
    }

    /// Whether this is an end tag called `name`.
    #[must_use]
    pub fn is_end_tag_named(&self, name: &str) -> bool {
        matches!(self, Self::EndTag(tag) if tag.name == name)
    }

    /// "Append the current input character to the current tag token's tag name."
    pub fn push_tag_name(&mut self, c: char) {
        if let Self::StartTag(tag) | Self::EndTag(tag) = self {
            tag.name.push(c);
        }
    }

    /// "Start a new attribute in the current tag token."
    ///
    /// Finalizes the previous attribute first, which is where duplicate names are
    /// detected.
    pub fn new_attribute(&mut self, first: char) {
        if let Self::StartTag(tag) | Self::EndTag(tag) = self {
            tag.finalize_attribute();
            tag.saw_attributes = true;
            tag.pending = Some(Attribute::new(String::from(first), String::new()));
        }
    }

    /// "Append the current input character to the current attribute's name."
    pub fn push_attribute_name(&mut self, c: char) {
        if let Self::StartTag(tag) | Self::EndTag(tag) = self {
            if let Some(attribute) = tag.pending.as_mut() {
                attribute.name.push(c);
            }
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub fn push_attribute_value(&mut self, c: char) {
        if let Self::StartTag(tag) | Self::EndTag(tag) = self {
            if let Some(attribute) = tag.pending.as_mut() {
                attribute.value.push(c);
            }
        }
    }

    /// "Set the self-closing flag of the current tag token."
    pub fn set_self_closing(&mut self) {
        if let Self::StartTag(tag) | Self::EndTag(tag) = self {
            tag.self_closing = true;
        }
    }

    /// "Append the current input character to the comment token's data."
    pub fn push_comment(&mut self, c: char) {
        if let Self::Comment(data) = self {
            data.push(c);
        }
    }

    /// Append several characters to the comment data, e.g. the `--` of a
    /// rejected comment end.
    pub fn push_comment_str(&mut self, s: &str) {
        if let Self::Comment(data) = self {
            data.push_str(s);
        }
    }

    /// "Append the current input character to the current DOCTYPE token's name."
    pub fn push_doctype_name(&mut self, c: char) {
        if let Self::Doctype(doctype) = self {
            doctype.name.get_or_insert_with(String::new).push(c);
        }
    }

    /// "Set the DOCTYPE token's force-quirks flag to on."
    pub fn set_force_quirks(&mut self) {
        if let Self::Doctype(doctype) = self {
            doctype.force_quirks = true;
        }
    }

    /// "Set the DOCTYPE token's public identifier to the empty string (not missing)."
    pub fn start_public_identifier(&mut self) {
        if let Self::Doctype(doctype) = self {
            doctype.public_identifier = Some(String::new());
        }
    }

    /// "Append the current input character to the current DOCTYPE token's public identifier."
    pub fn push_public_identifier(&mut self, c: char) {
        if let Self::Doctype(doctype) = self {
            doctype
                .public_identifier
                .get_or_insert_with(String::new)
                .push(c);
        }
    }

    /// "Set the DOCTYPE token's system identifier to the empty string (not missing)."
    pub fn start_system_identifier(&mut self) {
        if let Self::Doctype(doctype) = self {
            doctype.system_identifier = Some(String::new());
        }
    }

    /// "Append the current input character to the current DOCTYPE token's system identifier."
    pub fn push_system_identifier(&mut self, c: char) {
        if let Self::Doctype(doctype) = self {
            doctype
                .system_identifier
                .get_or_insert_with(String::new)
                .push(c);
        }
    }

    /// Turn the builder into its token, together with any errors found while
    /// building it (duplicate attributes, attributes or `/` on an end tag).
    #[must_use]
    pub fn finalize(self) -> (Token, Vec<ParseErrorCode>) {
        match self {
            Self::StartTag(mut tag) => {
                tag.finalize_attribute();
                let token = Token::StartTag {
                    name: tag.name,
                    self_closing: tag.self_closing,
                    attributes: tag.attributes,
                };
                (token, tag.errors)
            }
            Self::EndTag(mut tag) => {
                tag.finalize_attribute();
                let mut errors = tag.errors;
                if tag.saw_attributes {
                    errors.push(ParseErrorCode::EndTagWithAttributes);
                }
                if tag.self_closing {
                    errors.push(ParseErrorCode::EndTagWithTrailingSolidus);
                }
                (Token::EndTag { name: tag.name }, errors)
            }
            Self::Comment(data) => (Token::Comment { data }, Vec::new()),
            Self::Doctype(doctype) => {
                let token = Token::Doctype {
                    name: doctype.name,
                    public_identifier: doctype.public_identifier,
                    system_identifier: doctype.system_identifier,
                    force_quirks: doctype.force_quirks,
                };
                (token, Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_tag_with(attributes: &[(&str, &str)]) -> TokenBuilder {
        let mut builder = TokenBuilder::new_start_tag();
        builder.push_tag_name('p');
        for (name, value) in attributes {
            let mut name_chars = name.chars();
            if let Some(first) = name_chars.next() {
                builder.new_attribute(first);
            }
            for c in name_chars {
                builder.push_attribute_name(c);
            }
            for c in value.chars() {
                builder.push_attribute_value(c);
            }
        }
        builder
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let (token, errors) = start_tag_with(&[("a", "1"), ("b", "2"), ("a", "3")]).finalize();
        assert_eq!(errors, vec![ParseErrorCode::DuplicateAttribute]);
        assert_eq!(token.attribute("a"), Some("1"));
        assert_eq!(token.attribute("b"), Some("2"));
        match token {
            Token::StartTag { attributes, .. } => assert_eq!(attributes.len(), 2),
            _ => panic!("Expected StartTag token"),
        }
    }

    #[test]
    fn test_end_tag_drops_attributes_and_reports_them() {
        let mut builder = TokenBuilder::new_end_tag();
        builder.push_tag_name('a');
        builder.new_attribute('x');
        builder.push_attribute_value('1');
        builder.set_self_closing();
        let (token, errors) = builder.finalize();
        assert_eq!(
            token,
            Token::EndTag {
                name: "a".to_string()
            }
        );
        assert_eq!(
            errors,
            vec![
                ParseErrorCode::EndTagWithAttributes,
                ParseErrorCode::EndTagWithTrailingSolidus
            ]
        );
    }

    #[test]
    fn test_doctype_distinguishes_empty_from_missing() {
        let mut builder = TokenBuilder::new_doctype();
        builder.push_doctype_name('h');
        builder.start_public_identifier();
        let (token, _) = builder.finalize();
        assert_eq!(
            token,
            Token::Doctype {
                name: Some("h".to_string()),
                public_identifier: Some(String::new()),
                system_identifier: None,
                force_quirks: false,
            }
        );
    }

    #[test]
    fn test_mutators_ignore_wrong_builder_kind() {
        let mut builder = TokenBuilder::new_comment();
        builder.push_tag_name('x');
        builder.set_force_quirks();
        builder.push_comment_str("ok");
        let (token, _) = builder.finalize();
        assert_eq!(
            token,
            Token::Comment {
                data: "ok".to_string()
            }
        );
    }
}
