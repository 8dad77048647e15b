//! Integration tests for named character reference lookup.

use wren_html::tokenizer::named_character_references::{
    LONGEST_ENTITY_NAME, lookup_entity, windows_1252_code_point,
};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("gt;"), Some(">"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
    assert_eq!(lookup_entity("hellip;"), Some("\u{2026}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("gt"), Some(">"));
    assert_eq!(lookup_entity("copy"), Some("\u{00A9}"));
    assert_eq!(lookup_entity("AElig"), Some("\u{00C6}"));
}

#[test]
fn test_modern_entities_need_semicolon() {
    assert_eq!(lookup_entity("apos;"), Some("'"));
    assert_eq!(lookup_entity("apos"), None);
    assert_eq!(lookup_entity("hellip"), None);
}

#[test]
fn test_names_are_case_sensitive() {
    assert_eq!(lookup_entity("alpha;"), Some("\u{03B1}"));
    assert_eq!(lookup_entity("Alpha;"), Some("\u{0391}"));
    assert_eq!(lookup_entity("ALPHA;"), None);
}

#[test]
fn test_multi_code_point_entities() {
    assert_eq!(lookup_entity("nvlt;"), Some("<\u{20D2}"));
    assert_eq!(lookup_entity("bne;"), Some("=\u{20E5}"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
    assert_eq!(lookup_entity(";"), None);
}

#[test]
fn test_lookahead_window_fits_known_names() {
    for name in ["amp;", "hellip;", "notin;"] {
        assert!(name.len() <= LONGEST_ENTITY_NAME);
    }
}

#[test]
fn test_windows_1252_remapping() {
    assert_eq!(windows_1252_code_point(0x80), Some('\u{20AC}'));
    assert_eq!(windows_1252_code_point(0x96), Some('\u{2013}'));
    assert_eq!(windows_1252_code_point(0x99), Some('\u{2122}'));
    // Unassigned slots keep their own value.
    assert_eq!(windows_1252_code_point(0x81), Some('\u{0081}'));
    assert_eq!(windows_1252_code_point(0x41), None);
    assert_eq!(windows_1252_code_point(0x100), None);
}
