//! The html5lib tokenizer test format.
//!
//! html5lib fixtures describe each expected token as a JSON array such as
//! `["StartTag", "a", {"href": "x"}]`. [`project`] turns tokenizer output into
//! that shape, and [`FixtureFile`] reads the `.test` files themselves.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::tokenizer::{HTMLTokenizer, Token, TokenizerOptions, TokenizerState};

/// One `.test` file: `{"tests": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureFile {
    /// The test cases in file order.
    pub tests: Vec<Fixture>,
}

impl FixtureFile {
    /// Parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `json` is not a valid fixture file.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A single tokenizer test case.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    /// Human-readable name of the case.
    pub description: String,
    /// Raw input.
    pub input: String,
    /// Expected tokens in html5lib form. Adjacent characters may be merged.
    pub output: Vec<Value>,
    /// html5lib state names to run the case in; empty means the data state.
    #[serde(default)]
    pub initial_states: Vec<String>,
    /// Seed for the appropriate-end-tag check.
    #[serde(default)]
    pub last_start_tag: Option<String>,
}

impl Fixture {
    /// The states this case runs in. Unknown state names are returned as `Err`
    /// so the caller can report them.
    #[must_use]
    pub fn states(&self) -> Vec<Result<TokenizerState, String>> {
        if self.initial_states.is_empty() {
            return vec![Ok(TokenizerState::Data)];
        }
        self.initial_states
            .iter()
            .map(|name| initial_state_from_name(name).ok_or_else(|| name.clone()))
            .collect()
    }

    /// Tokenize the input starting in `state` and project the result.
    ///
    /// Content-model switching is off: fixtures choose the state themselves.
    #[must_use]
    pub fn run_in(&self, state: TokenizerState) -> Vec<Value> {
        let options = TokenizerOptions::default()
            .with_initial_state(state)
            .with_last_start_tag(self.last_start_tag.clone())
            .with_switch_text_modes(false);
        let mut tokenizer = HTMLTokenizer::with_options(&self.input, options);
        // Lenient options never fail.
        let _ = tokenizer.run();
        project(tokenizer.tokens())
    }

    /// The expected output with merged characters split apart.
    #[must_use]
    pub fn expected(&self) -> Vec<Value> {
        normalize(&self.output)
    }
}

/// Map an html5lib state name (`"RCDATA state"`) to a tokenizer state.
#[must_use]
pub fn initial_state_from_name(name: &str) -> Option<TokenizerState> {
    match name {
        "Data state" => Some(TokenizerState::Data),
        "PLAINTEXT state" => Some(TokenizerState::PLAINTEXT),
        "RCDATA state" => Some(TokenizerState::RCDATA),
        "RAWTEXT state" => Some(TokenizerState::RAWTEXT),
        "Script data state" => Some(TokenizerState::ScriptData),
        "CDATA section state" => Some(TokenizerState::CDATASection),
        _ => None,
    }
}

/// Project tokens into html5lib form. One `Character` entry per scalar value;
/// the end-of-file token has no counterpart and is dropped.
#[must_use]
pub fn project(tokens: &[Token]) -> Vec<Value> {
    tokens.iter().filter_map(project_token).collect()
}

fn project_token(token: &Token) -> Option<Value> {
    let value = match token {
        Token::Character { data } => json!(["Character", data.to_string()]),
        Token::Comment { data } => json!(["Comment", data]),
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            let attributes: Map<String, Value> = attributes
                .iter()
                .map(|attr| (attr.name.clone(), Value::String(attr.value.clone())))
                .collect();
            let mut entry = vec![json!("StartTag"), json!(name), Value::Object(attributes)];
            if *self_closing {
                entry.push(Value::Bool(true));
            }
            Value::Array(entry)
        }
        Token::EndTag { name } => json!(["EndTag", name]),
        // The last field is "correctness", the inverse of force-quirks.
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => json!([
            "DOCTYPE",
            name,
            public_identifier,
            system_identifier,
            !force_quirks
        ]),
        Token::ParseError { .. } => json!("ParseError"),
        Token::EndOfFile => return None,
    };
    Some(value)
}

/// Split every multi-character `["Character", "..."]` entry into one entry per
/// scalar value, so expectations compare against [`project`] output directly.
#[must_use]
pub fn normalize(expected: &[Value]) -> Vec<Value> {
    let mut normalized = Vec::with_capacity(expected.len());
    for entry in expected {
        match entry.as_array().map(Vec::as_slice) {
            Some([kind, Value::String(data)]) if kind == "Character" => {
                normalized.extend(data.chars().map(|c| json!(["Character", c.to_string()])));
            }
            _ => normalized.push(entry.clone()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_splits_character_runs() {
        let expected = vec![json!(["Character", "ab"]), json!("ParseError")];
        assert_eq!(
            normalize(&expected),
            vec![
                json!(["Character", "a"]),
                json!(["Character", "b"]),
                json!("ParseError")
            ]
        );
    }

    #[test]
    fn test_project_doctype_reports_correctness() {
        let tokens = HTMLTokenizer::tokenize("<!DOCTYPE html>");
        assert_eq!(project(&tokens), vec![json!(["DOCTYPE", "html", null, null, true])]);
    }

    #[test]
    fn test_project_self_closing_start_tag() {
        let tokens = HTMLTokenizer::tokenize("<br/>");
        assert_eq!(project(&tokens), vec![json!(["StartTag", "br", {}, true])]);
    }

    #[test]
    fn test_unknown_state_name() {
        assert_eq!(initial_state_from_name("Bogus state"), None);
        assert_eq!(
            initial_state_from_name("Script data state"),
            Some(TokenizerState::ScriptData)
        );
    }
}
