//! Integration tests for the HTML tokenizer.

use wren_html::{
    HTMLTokenizer, ParseErrorCode, Token, TokenizerError, TokenizerOptions, TokenizerState,
};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::tokenize(input)
}

/// Concatenated character data, ignoring every other token.
fn text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| {
            if let Token::Character { data } = t {
                Some(*data)
            } else {
                None
            }
        })
        .collect()
}

/// Parse error codes in stream order.
fn errors(tokens: &[Token]) -> Vec<ParseErrorCode> {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::ParseError { code, .. } => Some(*code),
            _ => None,
        })
        .collect()
}

/// The token stream with parse errors removed.
fn without_errors(tokens: &[Token]) -> Vec<Token> {
    tokens.iter().filter(|t| !t.is_parse_error()).cloned().collect()
}

fn start_tag(name: &str, attributes: &[(&str, &str)], self_closing: bool) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing,
        attributes: attributes
            .iter()
            .map(|(n, v)| wren_html::Attribute::new((*n).to_string(), (*v).to_string()))
            .collect(),
    }
}

fn end_tag(name: &str) -> Token {
    Token::EndTag {
        name: name.to_string(),
    }
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens, vec![start_tag("div", &[], false), Token::EndOfFile]);
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens, vec![end_tag("div"), Token::EndOfFile]);
}

#[test]
fn test_end_tag_with_trailing_space() {
    let tokens = tokenize("</div >");
    assert_eq!(tokens, vec![end_tag("div"), Token::EndOfFile]);
}

#[test]
fn test_self_closing_tag() {
    assert_eq!(
        tokenize("<br/>"),
        vec![start_tag("br", &[], true), Token::EndOfFile]
    );
    assert_eq!(
        tokenize("<br>"),
        vec![start_tag("br", &[], false), Token::EndOfFile]
    );
}

#[test]
fn test_uppercase_names_are_lowercased() {
    let tokens = tokenize("<DIV ID=X>");
    assert_eq!(tokens[0], start_tag("div", &[("id", "X")], false));
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hi -->");
    assert_eq!(
        tokens,
        vec![
            Token::Comment {
                data: " hi ".to_string()
            },
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="foo">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "foo");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    assert_eq!(tokens[0].attribute("class"), Some("bar"));
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=baz>");
    assert_eq!(tokens[0].attribute("class"), Some("baz"));
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    assert_eq!(tokens[0].attribute("disabled"), Some(""));
    assert_eq!(tokens[0].attribute("checked"), None);
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<input type="text" id="name" disabled>"#);
    assert_eq!(
        tokens[0],
        start_tag(
            "input",
            &[("type", "text"), ("id", "name"), ("disabled", "")],
            false
        )
    );
}

#[test]
fn test_mixed_quoting_end_to_end() {
    let tokens = tokenize("<div id='1' class=foo>hi</div>");
    assert_eq!(
        tokens,
        vec![
            start_tag("div", &[("id", "1"), ("class", "foo")], false),
            Token::Character { data: 'h' },
            Token::Character { data: 'i' },
            end_tag("div"),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_duplicate_attribute_keeps_first_value() {
    let tokens = tokenize("<p a=1 a=2>");
    assert_eq!(
        tokens,
        vec![
            Token::ParseError {
                code: ParseErrorCode::DuplicateAttribute,
                from_state: TokenizerState::AttributeValueUnquoted,
                to_state: TokenizerState::Data,
            },
            start_tag("p", &[("a", "1")], false),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5); // <p>, H, i, </p>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
    assert!(matches!(tokens[1], Token::Character { data: 'H' }));
    assert!(matches!(tokens[2], Token::Character { data: 'i' }));
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(matches!(tokens[4], Token::EndOfFile));
}

#[test]
fn test_simple_html_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>"#;
    let tokens = tokenize(html);

    // Should have DOCTYPE as first token
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));

    // Should end with EOF
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));

    let start_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .count();
    let end_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .count();

    assert_eq!(start_tags, 4); // html, head, title, body
    assert_eq!(end_tags, 4); // /title, /head, /body, /html
    assert!(errors(&tokens).is_empty());
}

#[test]
fn test_newlines_are_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(text(&tokens), "a\nb\nc");
}

// ========== Raw text element (RCDATA/RAWTEXT) tests ==========

#[test]
fn test_style_element_rawtext() {
    // Style content should be treated as raw text, not parsed as tags
    let tokens = tokenize("<style>body { color: red; }</style>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));
    assert_eq!(text(&tokens), "body { color: red; }");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_title_element_rcdata() {
    let tokens = tokenize("<title>My Page</title>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "title"));
    assert_eq!(text(&tokens), "My Page");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "title"));
}

#[test]
fn test_style_with_fake_tags() {
    // Tags inside style should NOT be parsed as tags
    let tokens = tokenize("<style><div>not a tag</div></style>");
    assert_eq!(text(&tokens), "<div>not a tag</div>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_title_with_less_than() {
    let tokens = tokenize("<title>a < b</title>");
    assert_eq!(text(&tokens), "a < b");
}

#[test]
fn test_style_with_wrong_end_tag() {
    // </notastyle> inside style should NOT close the style element
    let tokens = tokenize("<style>a</notastyle>b</style>");
    assert_eq!(text(&tokens), "a</notastyle>b");
}

#[test]
fn test_textarea_element_rcdata() {
    let tokens = tokenize("<textarea><b>bold?</b></textarea>");
    assert_eq!(text(&tokens), "<b>bold?</b>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "textarea"));
}

#[test]
fn test_xmp_element_rawtext() {
    let tokens = tokenize("<xmp><html>is text</html></xmp>");
    assert_eq!(text(&tokens), "<html>is text</html>");
}

#[test]
fn test_iframe_element_rawtext() {
    let tokens = tokenize("<iframe>some content</iframe>");
    assert_eq!(text(&tokens), "some content");
}

#[test]
fn test_rcdata_decodes_references_but_rawtext_does_not() {
    assert_eq!(text(&tokenize("<title>&amp;</title>")), "&");
    assert_eq!(text(&tokenize("<style>&amp;</style>")), "&amp;");
}

#[test]
fn test_rcdata_null_becomes_replacement_character() {
    let tokens = tokenize("<title>\0</title>");
    assert_eq!(text(&tokens), "\u{FFFD}");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::UnexpectedNullCharacter]);
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize("<plaintext></plaintext><b>");
    assert_eq!(text(&tokens), "</plaintext><b>");
    assert!(errors(&tokens).is_empty());
}

#[test]
fn test_switching_can_be_disabled() {
    let options = TokenizerOptions::default().with_switch_text_modes(false);
    let tokens = HTMLTokenizer::tokenize_with("<title><b></title>", options)
        .expect("lenient run cannot fail");
    assert_eq!(
        tokens,
        vec![
            start_tag("title", &[], false),
            start_tag("b", &[], false),
            end_tag("title"),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_initial_state_with_last_start_tag() {
    let options = TokenizerOptions::default()
        .with_initial_state(TokenizerState::RCDATA)
        .with_last_start_tag(Some("textarea".to_string()))
        .with_switch_text_modes(false);
    let tokens = HTMLTokenizer::tokenize_with("a<b></textarea>c", options)
        .expect("lenient run cannot fail");
    assert_eq!(
        tokens,
        vec![
            Token::Character { data: 'a' },
            Token::Character { data: '<' },
            Token::Character { data: 'b' },
            Token::Character { data: '>' },
            end_tag("textarea"),
            Token::Character { data: 'c' },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_end_tag_is_text_without_last_start_tag() {
    let options = TokenizerOptions::default().with_initial_state(TokenizerState::RAWTEXT);
    let tokens =
        HTMLTokenizer::tokenize_with("</style>", options).expect("lenient run cannot fail");
    assert_eq!(text(&tokens), "</style>");
}

#[test]
fn test_set_state_from_outside() {
    let mut tokenizer = HTMLTokenizer::new("x</b>");
    tokenizer.set_state(TokenizerState::RAWTEXT);
    tokenizer.set_last_start_tag(Some("b".to_string()));
    assert_eq!(tokenizer.state(), TokenizerState::RAWTEXT);
    assert!(tokenizer.run().is_ok());
    assert_eq!(
        tokenizer.into_tokens(),
        vec![
            Token::Character { data: 'x' },
            end_tag("b"),
            Token::EndOfFile
        ]
    );
}

// ========== Script data tests ==========

#[test]
fn test_script_content_is_text() {
    let tokens = tokenize("<script>if (a</b) {}</script>");
    assert_eq!(text(&tokens), "if (a</b) {}");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_script_double_escape_hides_end_tag() {
    let tokens = tokenize("<script>a<!--<script>x</script>--></script>");
    assert_eq!(text(&tokens), "a<!--<script>x</script>-->");
    assert_eq!(
        without_errors(&tokens[tokens.len() - 2..]),
        vec![end_tag("script"), Token::EndOfFile]
    );
    assert!(errors(&tokens).is_empty());
}

#[test]
fn test_script_escaped_end_tag_still_closes() {
    let tokens = tokenize("<script><!--x</script>y");
    assert_eq!(
        without_errors(&tokens),
        vec![
            start_tag("script", &[], false),
            Token::Character { data: '<' },
            Token::Character { data: '!' },
            Token::Character { data: '-' },
            Token::Character { data: '-' },
            Token::Character { data: 'x' },
            end_tag("script"),
            Token::Character { data: 'y' },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_eof_in_escaped_script() {
    let tokens = tokenize("<script><!--a");
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::EofInScriptHtmlCommentLikeText]
    );
    assert_eq!(text(&tokens), "<!--a");
    assert!(tokens.last().is_some_and(Token::is_eof));
}

// ========== Tag error recovery ==========

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize(r#"<div class="x"#);
    assert_eq!(
        tokens,
        vec![
            Token::ParseError {
                code: ParseErrorCode::EofInTag,
                from_state: TokenizerState::AttributeValueDoubleQuoted,
                to_state: TokenizerState::Data,
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_lone_less_than_at_eof() {
    let tokens = tokenize("a<");
    assert_eq!(
        tokens,
        vec![
            Token::Character { data: 'a' },
            Token::ParseError {
                code: ParseErrorCode::EofBeforeTagName,
                from_state: TokenizerState::TagOpen,
                to_state: TokenizerState::Data,
            },
            Token::Character { data: '<' },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_less_than_before_non_letter_is_text() {
    let tokens = tokenize("1 < 2");
    assert_eq!(text(&tokens), "1 < 2");
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::InvalidFirstCharacterOfTagName]
    );
}

#[test]
fn test_missing_end_tag_name() {
    let tokens = tokenize("</>x");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::MissingEndTagName]);
    assert_eq!(text(&tokens), "x");
}

#[test]
fn test_end_tag_attributes_and_solidus_are_errors() {
    let tokens = tokenize("</a b></a/>");
    assert_eq!(
        errors(&tokens),
        vec![
            ParseErrorCode::EndTagWithAttributes,
            ParseErrorCode::EndTagWithTrailingSolidus
        ]
    );
    assert_eq!(
        without_errors(&tokens),
        vec![end_tag("a"), end_tag("a"), Token::EndOfFile]
    );
}

#[test]
fn test_missing_whitespace_between_attributes() {
    let tokens = tokenize(r#"<a b="1"c="2">"#);
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::MissingWhitespaceBetweenAttributes]
    );
    assert_eq!(tokens[1], start_tag("a", &[("b", "1"), ("c", "2")], false));
}

#[test]
fn test_stray_solidus_in_tag() {
    let tokens = tokenize("<a / b>");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::UnexpectedSolidusInTag]);
    assert_eq!(tokens[1], start_tag("a", &[("b", "")], false));
}

#[test]
fn test_odd_characters_in_attributes() {
    let tokens = tokenize(r#"<a ="x" b=c"d>"#);
    assert_eq!(
        errors(&tokens),
        vec![
            ParseErrorCode::UnexpectedEqualsSignBeforeAttributeName,
            ParseErrorCode::UnexpectedCharacterInAttributeName,
            ParseErrorCode::UnexpectedCharacterInAttributeName,
            ParseErrorCode::UnexpectedCharacterInUnquotedAttributeValue,
        ]
    );
    assert_eq!(
        without_errors(&tokens)[0],
        start_tag("a", &[("=\"x\"", ""), ("b", "c\"d")], false)
    );
}

#[test]
fn test_missing_attribute_value() {
    let tokens = tokenize("<a b=>");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::MissingAttributeValue]);
    assert_eq!(tokens[1], start_tag("a", &[("b", "")], false));
}

// ========== Comments ==========

#[test]
fn test_bogus_comment_keeps_its_first_character() {
    let tokens = tokenize("<?xml version?></3>");
    assert_eq!(
        without_errors(&tokens),
        vec![
            Token::Comment {
                data: "?xml version?".to_string()
            },
            Token::Comment {
                data: "3".to_string()
            },
            Token::EndOfFile,
        ]
    );
    assert_eq!(
        errors(&tokens),
        vec![
            ParseErrorCode::UnexpectedQuestionMarkInsteadOfTagName,
            ParseErrorCode::InvalidFirstCharacterOfTagName,
        ]
    );
}

#[test]
fn test_incorrectly_opened_comment() {
    let tokens = tokenize("<!x>");
    assert_eq!(
        tokens,
        vec![
            Token::ParseError {
                code: ParseErrorCode::IncorrectlyOpenedComment,
                from_state: TokenizerState::MarkupDeclarationOpen,
                to_state: TokenizerState::BogusComment,
            },
            Token::Comment {
                data: "x".to_string()
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_abrupt_empty_comment() {
    let tokens = tokenize("<!-->");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::AbruptClosingOfEmptyComment]);
    assert_eq!(
        without_errors(&tokens)[0],
        Token::Comment {
            data: String::new()
        }
    );
}

#[test]
fn test_comment_end_bang() {
    let tokens = tokenize("<!--a--!>");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::IncorrectlyClosedComment]);
    assert_eq!(
        without_errors(&tokens)[0],
        Token::Comment {
            data: "a".to_string()
        }
    );
}

#[test]
fn test_double_dash_inside_comment() {
    let tokens = tokenize("<!--a-- b-->");
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::UnexpectedCharacterAfterDoubleDashInComment]
    );
    assert_eq!(
        without_errors(&tokens)[0],
        Token::Comment {
            data: "a-- b".to_string()
        }
    );
}

#[test]
fn test_eof_in_comment_emits_comment() {
    let tokens = tokenize("<!--x");
    assert_eq!(
        tokens,
        vec![
            Token::ParseError {
                code: ParseErrorCode::EofInComment,
                from_state: TokenizerState::Comment,
                to_state: TokenizerState::Data,
            },
            Token::Comment {
                data: "x".to_string()
            },
            Token::EndOfFile,
        ]
    );
}

// ========== DOCTYPE ==========

#[test]
fn test_empty_doctype_reports_two_errors() {
    let tokens = tokenize("<!DOCTYPE>");
    assert_eq!(
        tokens,
        vec![
            Token::ParseError {
                code: ParseErrorCode::MissingWhitespaceBeforeDoctypeName,
                from_state: TokenizerState::DOCTYPE,
                to_state: TokenizerState::BeforeDOCTYPEName,
            },
            Token::ParseError {
                code: ParseErrorCode::MissingDoctypeName,
                from_state: TokenizerState::BeforeDOCTYPEName,
                to_state: TokenizerState::Data,
            },
            Token::Doctype {
                name: None,
                public_identifier: None,
                system_identifier: None,
                force_quirks: true,
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_doctype_with_public_and_system_identifiers() {
    let tokens = tokenize(
        r#"<!doctype HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
    );
    assert_eq!(
        tokens,
        vec![
            Token::Doctype {
                name: Some("html".to_string()),
                public_identifier: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
                system_identifier: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
                force_quirks: false,
            },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_doctype_system_keyword() {
    let tokens = tokenize(r#"<!DOCTYPE html SyStEm "about:legacy-compat">"#);
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            system_identifier: Some(s),
            public_identifier: None,
            force_quirks: false,
            ..
        } if s == "about:legacy-compat"
    ));
}

#[test]
fn test_doctype_eof_sets_quirks() {
    let tokens = tokenize("<!DOCTYPE html");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::EofInDoctype]);
    assert!(matches!(
        &tokens[1],
        Token::Doctype { name: Some(n), force_quirks: true, .. } if n == "html"
    ));
}

#[test]
fn test_bogus_doctype_after_name() {
    let tokens = tokenize("<!DOCTYPE html bogus>x");
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::InvalidCharacterSequenceAfterDoctypeName]
    );
    assert!(matches!(&tokens[1], Token::Doctype { force_quirks: true, .. }));
    assert_eq!(text(&tokens), "x");
}

#[test]
fn test_junk_after_system_identifier_keeps_no_quirks() {
    let tokens = tokenize(r#"<!DOCTYPE html SYSTEM "x" junk>"#);
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier]
    );
    assert!(matches!(&tokens[1], Token::Doctype { force_quirks: false, .. }));
}

// ========== CDATA ==========

#[test]
fn test_cdata_section_when_allowed() {
    let options = TokenizerOptions::default().with_allow_cdata(true);
    let tokens = HTMLTokenizer::tokenize_with("<![CDATA[a<b>]]b]]>c", options)
        .expect("lenient run cannot fail");
    assert_eq!(text(&tokens), "a<b>]]bc");
    assert!(errors(&tokens).is_empty());
}

#[test]
fn test_cdata_is_bogus_comment_by_default() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::IncorrectlyOpenedComment]);
    assert_eq!(
        without_errors(&tokens)[0],
        Token::Comment {
            data: "[CDATA[x]]".to_string()
        }
    );
}

#[test]
fn test_eof_in_cdata() {
    let options = TokenizerOptions::default().with_allow_cdata(true);
    let tokens =
        HTMLTokenizer::tokenize_with("<![CDATA[x", options).expect("lenient run cannot fail");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::EofInCdata]);
    assert_eq!(text(&tokens), "x");
}

// ========== Character references ==========

#[test]
fn test_character_reference_bare_ampersand() {
    // Bare ampersand followed by whitespace is flushed as a literal '&'
    let tokens = tokenize("a & b");
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[2], Token::Character { data: '&' }));
    assert!(errors(&tokens).is_empty());
}

#[test]
fn test_named_character_reference_amp() {
    assert_eq!(text(&tokenize("a &amp; b")), "a & b");
}

#[test]
fn test_named_character_reference_lt_gt() {
    assert_eq!(text(&tokenize("&lt;div&gt;")), "<div>");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    // Legacy entities without semicolon still decode, with a parse error
    let tokens = tokenize("&amp is ok");
    assert_eq!(text(&tokens), "& is ok");
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_longest_match_wins() {
    assert_eq!(text(&tokenize("&notin;")), "\u{2209}");
    assert_eq!(text(&tokenize("&noti")), "\u{AC}i");
}

#[test]
fn test_named_character_reference_unknown() {
    let tokens = tokenize("&xyzzy;");
    assert_eq!(text(&tokens), "&xyzzy;");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::UnknownNamedCharacterReference]);
}

#[test]
fn test_unknown_name_without_semicolon_is_reported() {
    let tokens = tokenize("&xyzzy");
    assert_eq!(text(&tokens), "&xyzzy");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::UnknownNamedCharacterReference]);
}

#[test]
fn test_ampersand_before_unknown_name_is_literal_with_error() {
    let tokens = tokenize("a&b");
    assert_eq!(
        tokens,
        vec![
            Token::Character { data: 'a' },
            Token::ParseError {
                code: ParseErrorCode::UnknownNamedCharacterReference,
                from_state: TokenizerState::CharacterReferenceInData,
                to_state: TokenizerState::Data,
            },
            Token::Character { data: '&' },
            Token::Character { data: 'b' },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_html5_only_entities() {
    assert_eq!(text(&tokenize("&check;")), "\u{2713}");
    assert_eq!(text(&tokenize("&angst;")), "\u{C5}");
    assert_eq!(text(&tokenize("&bigstar;")), "\u{2605}");
    assert_eq!(text(&tokenize("&larrb;")), "\u{21E4}");
    assert_eq!(text(&tokenize("&ncong;")), "\u{2247}");

    let tokens = tokenize("&Bopf;&fjlig;");
    assert_eq!(text(&tokens), "\u{1D539}fj");
    assert!(errors(&tokens).is_empty());
}

#[test]
fn test_names_longer_than_the_window_are_not_decoded() {
    let tokens = tokenize("&CounterClockwiseContourIntegral;");
    assert_eq!(text(&tokens), "&CounterClockwiseContourIntegral;");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::UnknownNamedCharacterReference]);
}

#[test]
fn test_two_code_point_entity() {
    assert_eq!(text(&tokenize("&nvlt;")), "<\u{20D2}");
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    assert_eq!(tokens[0].attribute("href"), Some("?a=1&b=2"));
}

#[test]
fn test_legacy_reference_followed_by_alphanumeric_in_attribute() {
    let tokens = tokenize(r#"<a title="&notit;">"#);
    assert_eq!(
        tokens,
        vec![
            Token::ParseError {
                code: ParseErrorCode::MissingSemicolonAfterCharacterReference,
                from_state: TokenizerState::CharacterReferenceInAttributeValue,
                to_state: TokenizerState::AttributeValueDoubleQuoted,
            },
            start_tag("a", &[("title", "&notit;")], false),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_legacy_reference_followed_by_equals_in_attribute() {
    let tokens = tokenize(r#"<a href="?x&copy=1">"#);
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::MissingSemicolonAfterCharacterReference]
    );
    assert_eq!(tokens[1].attribute("href"), Some("?x&copy=1"));
}

#[test]
fn test_legacy_reference_at_end_of_attribute_decodes() {
    let tokens = tokenize("<a b=&copy>");
    assert_eq!(tokens[1].attribute("b"), Some("\u{A9}"));
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_numeric_references() {
    assert_eq!(text(&tokenize("&#65;&#x41;&#X61;")), "AAa");

    let tokens = tokenize("&#65");
    assert_eq!(text(&tokens), "A");
    assert_eq!(
        errors(&tokens),
        vec![ParseErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_numeric_reference_to_null() {
    let tokens = tokenize("&#0;");
    assert_eq!(
        without_errors(&tokens),
        vec![Token::Character { data: '\u{FFFD}' }, Token::EndOfFile]
    );
    assert_eq!(errors(&tokens), vec![ParseErrorCode::NullCharacterReference]);
}

#[test]
fn test_numeric_reference_to_surrogate() {
    let tokens = tokenize("&#xD800;");
    assert_eq!(text(&tokens), "\u{FFFD}");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::SurrogateCharacterReference]);
}

#[test]
fn test_numeric_reference_out_of_range() {
    let tokens = tokenize("&#x110000;&#99999999999999;");
    assert_eq!(text(&tokens), "\u{FFFD}\u{FFFD}");
    assert_eq!(
        errors(&tokens),
        vec![
            ParseErrorCode::CharacterReferenceOutsideUnicodeRange,
            ParseErrorCode::CharacterReferenceOutsideUnicodeRange
        ]
    );
}

#[test]
fn test_numeric_reference_windows_1252_remap() {
    let tokens = tokenize("&#x80;&#150;");
    assert_eq!(text(&tokens), "\u{20AC}\u{2013}");
    assert_eq!(
        errors(&tokens),
        vec![
            ParseErrorCode::ControlCharacterReference,
            ParseErrorCode::ControlCharacterReference
        ]
    );
}

#[test]
fn test_numeric_reference_noncharacter_is_kept() {
    let tokens = tokenize("&#xFFFF;");
    assert_eq!(text(&tokens), "\u{FFFF}");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::NoncharacterCharacterReference]);
}

#[test]
fn test_numeric_reference_without_digits() {
    let tokens = tokenize("&#;&#x;");
    assert_eq!(text(&tokens), "&#;&#x;");
    assert_eq!(
        errors(&tokens),
        vec![
            ParseErrorCode::AbsenceOfDigitsInNumericCharacterReference,
            ParseErrorCode::AbsenceOfDigitsInNumericCharacterReference
        ]
    );
}

// ========== Input stream checks ==========

#[test]
fn test_data_null_is_passed_through() {
    let tokens = tokenize("a\0b");
    assert_eq!(
        tokens,
        vec![
            Token::Character { data: 'a' },
            Token::ParseError {
                code: ParseErrorCode::UnexpectedNullCharacter,
                from_state: TokenizerState::Data,
                to_state: TokenizerState::Data,
            },
            Token::Character { data: '\0' },
            Token::Character { data: 'b' },
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_control_character_reported_once_when_reconsumed() {
    let tokens = tokenize("<\u{1}");
    assert_eq!(
        errors(&tokens),
        vec![
            ParseErrorCode::ControlCharacterInInputStream,
            ParseErrorCode::InvalidFirstCharacterOfTagName
        ]
    );
    assert_eq!(text(&tokens), "<\u{1}");
}

#[test]
fn test_noncharacter_in_input() {
    let tokens = tokenize("\u{FDD0}");
    assert_eq!(errors(&tokens), vec![ParseErrorCode::NoncharacterInInputStream]);
    assert_eq!(text(&tokens), "\u{FDD0}");
}

// ========== Strict mode ==========

#[test]
fn test_strict_mode_stops_at_first_error() {
    let options = TokenizerOptions::default().with_strict(true);
    let err = HTMLTokenizer::tokenize_with("a<", options).expect_err("strict run must fail");
    let TokenizerError::StrictParseError {
        code,
        from_state,
        to_state,
        offset,
        tokens,
    } = &err;
    assert_eq!(*code, ParseErrorCode::EofBeforeTagName);
    assert_eq!(*from_state, TokenizerState::TagOpen);
    assert_eq!(*to_state, TokenizerState::Data);
    assert_eq!(*offset, 2);
    assert_eq!(tokens, &vec![Token::Character { data: 'a' }]);

    let message = err.to_string();
    assert!(message.contains("eof-before-tag-name"));
    assert!(message.contains("TagOpen going to Data"));
}

#[test]
fn test_strict_mode_accepts_clean_input() {
    let options = TokenizerOptions::default().with_strict(true);
    let tokens = HTMLTokenizer::tokenize_with("<p class=x>ok</p>", options)
        .expect("clean input has no parse errors");
    assert_eq!(tokens.len(), 5);
}

#[test]
fn test_strict_run_keeps_tokens_before_the_error() {
    let options = TokenizerOptions::default().with_strict(true);
    let mut tokenizer = HTMLTokenizer::with_options("ab<!--", options);
    assert!(tokenizer.run().is_err());
    assert!(!tokenizer.tokens().iter().any(Token::is_eof));
    assert!(!tokenizer.tokens().iter().any(Token::is_parse_error));
}

// ========== Diagnostics ==========

#[test]
fn test_parse_error_display() {
    let tokens = tokenize("\0");
    assert_eq!(
        tokens[0].to_string(),
        "ParseError(unexpected-null-character: Data -> Data)"
    );
}

#[test]
fn test_logging_does_not_change_output() {
    let options = TokenizerOptions::default().with_log_parse_errors(true);
    let logged =
        HTMLTokenizer::tokenize_with("<a b=1 b=2>", options).expect("lenient run cannot fail");
    assert_eq!(logged, tokenize("<a b=1 b=2>"));
    assert!(wren_common::warning::warning_count() >= 1);
}
