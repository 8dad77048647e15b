//! Runs the html5lib-format fixtures under `tests/fixtures/`.
//!
//! `basic.test`, `entities.test` and `text_states.test` are written by hand.
//! The other files take their expected output from the html5lib-python 1.1
//! tokenizer, which makes them an independent check; the cases where the two
//! tokenizers disagree are listed in [`EXPECTED_DIVERGENCES`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use wren_html::html5lib::FixtureFile;

/// `(file, description, reason)` for every case that must not match its
/// recorded output. A listed case that starts matching is reported as stale.
const EXPECTED_DIVERGENCES: &[(&str, &str, &str)] = &[
    (
        "comments.test",
        "Null after comment start dash",
        "html5lib-python stays in the comment start dash state after a NULL",
    ),
    (
        "comments.test",
        "Null in bogus comment",
        "html5lib-python does not report NULL in a bogus comment",
    ),
    (
        "doctype.test",
        "DOCTYPE without a name",
        "html5lib-python gives a missing DOCTYPE name as an empty string",
    ),
    (
        "doctype.test",
        "DOCTYPE at EOF",
        "html5lib-python gives a missing DOCTYPE name as an empty string",
    ),
    (
        "doctype.test",
        "Null in bogus DOCTYPE",
        "html5lib-python does not report NULL in a bogus DOCTYPE",
    ),
    (
        "char_refs.test",
        "Name longer than the lookahead window",
        "names longer than LONGEST_ENTITY_NAME are not decoded",
    ),
    (
        "text_modes.test",
        "CDATA section at EOF",
        "html5lib-python does not report EOF in a CDATA section",
    ),
    (
        "text_modes.test",
        "CDATA section single bracket at EOF",
        "html5lib-python does not report EOF in a CDATA section",
    ),
    (
        "text_modes.test",
        "CDATA section keeps null",
        "html5lib-python replaces NULL in a CDATA section",
    ),
    (
        "script_escapes.test",
        "Escape at EOF",
        "html5lib-python does not report EOF in escaped script data",
    ),
    (
        "script_escapes.test",
        "Escaped dashes at EOF",
        "html5lib-python does not report EOF in escaped script data",
    ),
];

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn divergence_reason(file: &str, description: &str) -> Option<&'static str> {
    EXPECTED_DIVERGENCES
        .iter()
        .find(|(f, d, _)| *f == file && *d == description)
        .map(|(_, _, reason)| *reason)
}

/// Run every case in one fixture file, collecting failures instead of stopping
/// at the first one.
fn run_fixture_file(name: &str) {
    let path = fixture_dir().join(name);
    let json = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    let file = FixtureFile::from_json(&json)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
    assert!(!file.tests.is_empty(), "{name} has no tests");

    let mut failures = Vec::new();
    let mut listed = HashSet::new();
    for fixture in &file.tests {
        let expected = fixture.expected();
        let divergence = divergence_reason(name, &fixture.description);
        if divergence.is_some() {
            let _ = listed.insert(fixture.description.as_str());
        }
        for state in fixture.states() {
            let state = state.unwrap_or_else(|s| {
                panic!("{name}: '{}' uses unknown state '{s}'", fixture.description)
            });
            let actual = fixture.run_in(state);
            match divergence {
                Some(reason) if actual == expected => failures.push(format!(
                    "{} [{state}] matches but is listed as a divergence: {reason}",
                    fixture.description,
                )),
                None if actual != expected => failures.push(format!(
                    "{} [{state}]\n  input:    {:?}\n  expected: {}\n  actual:   {}",
                    fixture.description,
                    fixture.input,
                    serde_json::Value::Array(expected.clone()),
                    serde_json::Value::Array(actual),
                )),
                _ => {}
            }
        }
    }

    for (_, description, _) in EXPECTED_DIVERGENCES.iter().filter(|(f, ..)| *f == name) {
        if !listed.contains(description) {
            failures.push(format!("{description} is listed as a divergence but missing"));
        }
    }

    assert!(
        failures.is_empty(),
        "{} failing case(s) in {name}:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn test_basic_fixtures() {
    run_fixture_file("basic.test");
}

#[test]
fn test_entity_fixtures() {
    run_fixture_file("entities.test");
}

#[test]
fn test_text_state_fixtures() {
    run_fixture_file("text_states.test");
}

#[test]
fn test_tag_fixtures() {
    run_fixture_file("tags.test");
}

#[test]
fn test_comment_fixtures() {
    run_fixture_file("comments.test");
}

#[test]
fn test_doctype_fixtures() {
    run_fixture_file("doctype.test");
}

#[test]
fn test_character_reference_fixtures() {
    run_fixture_file("char_refs.test");
}

#[test]
fn test_numeric_reference_fixtures() {
    run_fixture_file("numeric_refs.test");
}

#[test]
fn test_named_reference_fixtures() {
    run_fixture_file("named_refs.test");
}

#[test]
fn test_text_mode_fixtures() {
    run_fixture_file("text_modes.test");
}

#[test]
fn test_script_escape_fixtures() {
    run_fixture_file("script_escapes.test");
}
