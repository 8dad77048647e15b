//! The input stream the tokenizer pulls characters from.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! "Before the tokenization stage, the input stream must be preprocessed by
//! normalizing newlines. Thus, newlines in HTML DOMs are represented by U+000A LF
//! characters, and there are never any U+000D CR characters in the input to the
//! tokenization stage."

/// Why a code point is disallowed in the input or in a numeric reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenCodePoint {
    /// C0 controls other than whitespace and NULL, DEL, and the C1 range.
    Control,
    /// U+FDD0..U+FDEF and the last two code points of every plane.
    Noncharacter,
}

/// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
///
/// Classify `code_point` against the forbidden ranges. NULL is handled by the
/// individual states and is not reported here.
#[must_use]
pub const fn classify_code_point(code_point: u32) -> Option<ForbiddenCodePoint> {
    match code_point {
        0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F..=0x9F => Some(ForbiddenCodePoint::Control),
        0xFDD0..=0xFDEF => Some(ForbiddenCodePoint::Noncharacter),
        cp if cp & 0xFFFE == 0xFFFE && cp <= 0x10_FFFF => Some(ForbiddenCodePoint::Noncharacter),
        _ => None,
    }
}

/// A cursor over newline-normalized input.
///
/// End of input is reported as `None`. Consuming past the end still advances the
/// position, so a state that reconsumes EOF sees `None` again.
#[derive(Debug, Clone)]
pub struct InputStream {
    chars: Vec<char>,
    pos: usize,
    /// Highest position handed out by `consume` so far.
    high_water: usize,
    fresh: bool,
}

impl InputStream {
    /// Build a cursor over `input`, mapping CRLF pairs and lone CRs to LF.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut chars = Vec::with_capacity(input.len());
        let mut source = input.chars().peekable();
        while let Some(c) = source.next() {
            if c == '\r' {
                let _ = source.next_if_eq(&'\n');
                chars.push('\n');
            } else {
                chars.push(c);
            }
        }
        Self {
            chars,
            pos: 0,
            high_water: 0,
            fresh: false,
        }
    }

    /// "Consume the next input character"
    pub fn consume(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        self.pos += 1;
        self.fresh = self.pos > self.high_water;
        if self.fresh {
            self.high_water = self.pos;
        }
        c
    }

    /// Whether the character returned by the last [`Self::consume`] had never been
    /// consumed before. Reconsumed characters are not revalidated.
    #[must_use]
    pub const fn last_consume_was_fresh(&self) -> bool {
        self.fresh
    }

    /// "Reconsume": step back so the next `consume` returns the same character.
    pub const fn reconsume(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Next character without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    /// Character `offset` positions ahead without advancing.
    #[must_use]
    pub fn peek_nth(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Up to `n` upcoming characters; shorter near the end of input.
    #[must_use]
    pub fn peek_chars(&self, n: usize) -> &[char] {
        let start = self.pos.min(self.chars.len());
        let end = (self.pos + n).min(self.chars.len());
        &self.chars[start..end]
    }

    /// Advance past `n` characters and return them.
    ///
    /// Used after a lookahead has already matched a fixed literal such as
    /// `--`, `DOCTYPE` or `PUBLIC`.
    pub fn get_chars(&mut self, n: usize) -> &[char] {
        let start = self.pos.min(self.chars.len());
        self.pos += n;
        self.high_water = self.high_water.max(self.pos);
        let end = self.pos.min(self.chars.len());
        &self.chars[start..end]
    }

    /// Advance past `n` characters.
    pub fn advance(&mut self, n: usize) {
        let _ = self.get_chars(n);
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        let upcoming = self.peek_chars(target.chars().count());
        upcoming.len() == target.chars().count()
            && upcoming.iter().copied().eq(target.chars())
    }

    /// "ASCII case-insensitive match for the word ..."
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        let upcoming = self.peek_chars(target.chars().count());
        upcoming.len() == target.chars().count()
            && upcoming
                .iter()
                .zip(target.chars())
                .all(|(input_char, target_char)| input_char.eq_ignore_ascii_case(&target_char))
    }

    /// Index of the next character to be consumed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(input: &mut InputStream) -> String {
        let mut out = String::new();
        while let Some(c) = input.consume() {
            out.push(c);
        }
        out
    }

    #[test]
    fn test_crlf_and_lone_cr_become_lf() {
        let mut input = InputStream::new("a\r\nb\rc\n\rd");
        assert_eq!(drain(&mut input), "a\nb\nc\n\nd");
    }

    #[test]
    fn test_reconsume_returns_same_character() {
        let mut input = InputStream::new("xy");
        assert_eq!(input.consume(), Some('x'));
        input.reconsume();
        assert_eq!(input.consume(), Some('x'));
        assert_eq!(input.consume(), Some('y'));
    }

    #[test]
    fn test_eof_can_be_reconsumed() {
        let mut input = InputStream::new("");
        assert_eq!(input.consume(), None);
        input.reconsume();
        assert_eq!(input.consume(), None);
    }

    #[test]
    fn test_reconsumed_character_is_not_fresh() {
        let mut input = InputStream::new("ab");
        let _ = input.consume();
        assert!(input.last_consume_was_fresh());
        input.reconsume();
        let _ = input.consume();
        assert!(!input.last_consume_was_fresh());
        let _ = input.consume();
        assert!(input.last_consume_was_fresh());
    }

    #[test]
    fn test_lookahead_does_not_advance() {
        let mut input = InputStream::new("--DocType");
        assert!(input.next_few_characters_are("--"));
        assert!(!input.next_few_characters_are("---"));
        input.advance(2);
        assert!(input.next_few_characters_are_case_insensitive("DOCTYPE"));
        assert!(!input.next_few_characters_are("DOCTYPE"));
        assert_eq!(input.get_chars(3), &['D', 'o', 'c']);
        assert_eq!(input.peek(), Some('T'));
        assert_eq!(input.peek_chars(10).len(), 4);
    }

    #[test]
    fn test_forbidden_code_points() {
        assert_eq!(classify_code_point(0x0B), Some(ForbiddenCodePoint::Control));
        assert_eq!(classify_code_point(0x85), Some(ForbiddenCodePoint::Control));
        assert_eq!(
            classify_code_point(0xFDD5),
            Some(ForbiddenCodePoint::Noncharacter)
        );
        assert_eq!(
            classify_code_point(0x3_FFFE),
            Some(ForbiddenCodePoint::Noncharacter)
        );
        assert_eq!(
            classify_code_point(0x10_FFFF),
            Some(ForbiddenCodePoint::Noncharacter)
        );
        assert_eq!(classify_code_point(u32::from('\t')), None);
        assert_eq!(classify_code_point(0), None);
        assert_eq!(classify_code_point(u32::from('é')), None);
    }
}
