//! Property tests over arbitrary input.

#![allow(clippy::needless_pass_by_value)]

use std::collections::HashSet;

use quickcheck_macros::quickcheck;
use wren_html::{HTMLTokenizer, Token, TokenizerError, TokenizerOptions};

#[quickcheck]
fn prop_tokenizing_is_deterministic(input: String) -> bool {
    HTMLTokenizer::tokenize(&input) == HTMLTokenizer::tokenize(&input)
}

#[quickcheck]
fn prop_exactly_one_eof_at_the_end(input: String) -> bool {
    let tokens = HTMLTokenizer::tokenize(&input);
    tokens.iter().filter(|t| t.is_eof()).count() == 1 && tokens.last().is_some_and(Token::is_eof)
}

#[quickcheck]
fn prop_no_carriage_returns_in_text(input: String) -> bool {
    // `&#13;` is the one way to produce a CR on purpose.
    let input = input.replace('&', "");
    HTMLTokenizer::tokenize(&input)
        .iter()
        .all(|t| !matches!(t, Token::Character { data: '\r' }))
}

#[quickcheck]
fn prop_attribute_names_are_unique(input: String) -> bool {
    HTMLTokenizer::tokenize(&input).iter().all(|t| match t {
        Token::StartTag { attributes, .. } => {
            let mut seen = HashSet::new();
            attributes.iter().all(|a| seen.insert(a.name.as_str()))
        }
        _ => true,
    })
}

#[quickcheck]
fn prop_strict_stops_where_lenient_reports(input: String) -> bool {
    let lenient = HTMLTokenizer::tokenize(&input);
    let first_error = lenient.iter().position(Token::is_parse_error);
    let strict =
        HTMLTokenizer::tokenize_with(&input, TokenizerOptions::default().with_strict(true));

    match (first_error, strict) {
        (None, Ok(tokens)) => tokens == lenient,
        (Some(index), Err(TokenizerError::StrictParseError { code, tokens, .. })) => {
            tokens == lenient[..index]
                && matches!(&lenient[index], Token::ParseError { code: c, .. } if *c == code)
        }
        _ => false,
    }
}
