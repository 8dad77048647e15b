//! Tokenizer diagnostics with colored terminal output.
//!
//! Provides deduplication so a document with the same malformation repeated
//! thousands of times does not flood stderr. Used by the HTML tokenizer to
//! report parse errors and by the CLI to surface recoverable problems.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Print a warning for `component` unless the identical message was already printed.
///
/// Returns `true` if the message was printed.
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "eof-in-tag (TagName -> Data) at offset 12");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        let line = format!("[Wren {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
    should_print
}

/// Number of distinct warnings printed since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call before tokenizing a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_warning_prints_once() {
        let first = warn_once("Test", "repeated message for dedup test");
        let second = warn_once("Test", "repeated message for dedup test");
        assert!(first);
        assert!(!second);
        assert!(warning_count() >= 1);
    }

    #[test]
    fn test_same_message_in_different_components_is_distinct() {
        assert!(warn_once("Alpha", "component scoped message"));
        assert!(warn_once("Beta", "component scoped message"));
    }
}
