//! Byte cursor over segment text.
//!
//! Template markers (`{{`, `}}`, `{%`, `%}`) are all ASCII, so the cursor
//! works on bytes and only ever stops on ASCII boundaries; every slice it
//! hands out is valid UTF-8.

use memchr::memmem;

/// Cursor over a template string. [`Copy`] so callers can snapshot and
/// backtrack cheaply.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Cursor { text, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Text from the current position to the end.
    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Text between two absolute offsets.
    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// Move to an absolute offset (must be a char boundary).
    #[inline]
    pub(crate) fn seek(&mut self, pos: usize) {
        debug_assert!(self.text.is_char_boundary(pos));
        self.pos = pos.min(self.text.len());
    }

    /// Absolute offset of the next occurrence of `needle`, at or after the
    /// current position.
    pub(crate) fn find(&self, needle: &str) -> Option<usize> {
        memmem::find(self.rest().as_bytes(), needle.as_bytes()).map(|i| self.pos + i)
    }

    /// Like [`find`](Self::find), but ignores `needle` inside `'...'` and
    /// `"..."` string literals. A backslash escapes the next byte inside a
    /// literal.
    pub(crate) fn find_unquoted(&self, needle: &str) -> Option<usize> {
        let bytes = self.rest().as_bytes();
        let needle = needle.as_bytes();
        let mut quote = None;
        let mut i = 0;
        while i < bytes.len() {
            let byte = bytes[i];
            match quote {
                Some(_) if byte == b'\\' => i += 1,
                Some(open) if byte == open => quote = None,
                Some(_) => {}
                None if byte == b'"' || byte == b'\'' => quote = Some(byte),
                None if bytes[i..].starts_with(needle) => return Some(self.pos + i),
                None => {}
            }
            i += 1;
        }
        None
    }

    /// Consume `literal` if the remaining text starts with it.
    pub(crate) fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Skip ASCII whitespace, returning how many bytes were skipped.
    pub(crate) fn eat_whitespace(&mut self) -> usize {
        let skipped = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_whitespace)
            .count();
        self.pos += skipped;
        skipped
    }

    /// Consume a run of bytes that are neither whitespace nor the start of
    /// `stop`, returning the consumed text.
    pub(crate) fn eat_word(&mut self, stop: &str) -> &'a str {
        let start = self.pos;
        while !self.is_eof() {
            let rest = self.rest();
            if rest.starts_with(stop) || rest.as_bytes()[0].is_ascii_whitespace() {
                break;
            }
            // Advance a whole char so we never split UTF-8.
            self.pos += rest.chars().next().map_or(1, char::len_utf8);
        }
        self.slice(start, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_absolute() {
        let mut cursor = Cursor::new("ab{{cd}}{{");
        cursor.seek(4);
        assert_eq!(cursor.find("{{"), Some(8));
        assert_eq!(cursor.find("}}"), Some(6));
        assert_eq!(cursor.find("%}"), None);
    }

    #[test]
    fn test_find_unquoted_skips_string_literals() {
        let cursor = Cursor::new(r#"["a%}b", 'c%}', "d\"%}"] %} x"#);
        assert_eq!(cursor.find_unquoted("%}"), Some(25));
        assert_eq!(Cursor::new("'open %}").find_unquoted("%}"), None);
    }

    #[test]
    fn test_eat_word_stops_at_marker_and_space() {
        let mut cursor = Cursor::new("item%} rest");
        assert_eq!(cursor.eat_word("%}"), "item");
        assert!(cursor.eat("%}"));
        assert_eq!(cursor.eat_whitespace(), 1);
        assert_eq!(cursor.eat_word("%}"), "rest");
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_eat_word_keeps_utf8_intact() {
        let mut cursor = Cursor::new("héllo wörld");
        assert_eq!(cursor.eat_word("%}"), "héllo");
        cursor.eat_whitespace();
        assert_eq!(cursor.rest(), "wörld");
    }
}
