//! Character cursor shared by the compound and expression parsers.

use crate::error::{Result, SelectorSyntaxError, SyntaxErrorKind};

/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-3/#selector-syntax)
///
/// Whitespace that may separate tokens: space, tab, line feed, carriage
/// return, and form feed.
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Characters that may appear unescaped in an identifier.
#[must_use]
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// A read position over a slice of selector text.
///
/// Offsets reported by [`Cursor::offset`] are absolute: `base` is the
/// position of the slice's first character in the outermost input.
#[derive(Debug, Clone)]
pub struct Cursor {
    input: Vec<char>,
    position: usize,
    base: usize,
}

impl Cursor {
    /// Cursor at the start of `text`, which begins at `base` in the input.
    #[must_use]
    pub fn new(text: &str, base: usize) -> Self {
        Self {
            input: text.chars().collect(),
            position: 0,
            base,
        }
    }

    /// The current character.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// The character `ahead` positions past the current one.
    #[must_use]
    pub fn peek_at(&self, ahead: usize) -> Option<char> {
        self.input.get(self.position + ahead).copied()
    }

    /// Return the current character and advance past it.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Advance one character.
    pub fn bump(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    /// Advance past `expected` if it is the current character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Advance past any whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.position += 1;
        }
    }

    /// Whether every character has been consumed.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Absolute offset of the current character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.base + self.position
    }

    /// Text between two absolute offsets.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        let start = start.saturating_sub(self.base).min(self.input.len());
        let end = end.saturating_sub(self.base).clamp(start, self.input.len());
        self.input[start..end].iter().collect()
    }

    /// Read an identifier, unescaping `\x` to `x`.
    ///
    /// Returns an empty string when the cursor is not on an identifier.
    ///
    /// # Errors
    ///
    /// Fails with [`SyntaxErrorKind::Unterminated`] on a trailing `\`.
    pub fn read_identifier(&mut self) -> Result<String> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                let at = self.offset();
                self.bump();
                let escaped = self.consume().ok_or_else(|| {
                    SelectorSyntaxError::new(
                        SyntaxErrorKind::Unterminated,
                        "escape at end of input",
                        at,
                    )
                })?;
                ident.push(escaped);
            } else if is_ident_char(c) {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Ok(ident)
    }

    /// Read the body of a string opened by `quote` at absolute offset
    /// `open`, consuming the closing quote.
    ///
    /// `\` followed by the quote character yields the quote; any other
    /// escape is kept as written.
    ///
    /// # Errors
    ///
    /// Fails with [`SyntaxErrorKind::Unterminated`] when the closing quote
    /// is missing.
    pub fn read_quoted(&mut self, quote: char, open: usize) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.consume() {
                Some(c) if c == quote => return Ok(text),
                Some('\\') => match self.consume() {
                    Some(c) if c == quote => text.push(c),
                    Some(c) => {
                        text.push('\\');
                        text.push(c);
                    }
                    None => break,
                },
                Some(c) => text.push(c),
                None => break,
            }
        }
        Err(SelectorSyntaxError::new(
            SyntaxErrorKind::Unterminated,
            format!("unterminated string, missing closing {quote}"),
            open,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_unescapes() {
        let mut cursor = Cursor::new(r"itunes\:image.x", 0);
        assert_eq!(cursor.read_identifier().unwrap(), "itunes:image");
        assert_eq!(cursor.peek(), Some('.'));
        assert_eq!(cursor.offset(), 13);
    }

    #[test]
    fn test_identifier_dangling_escape() {
        let mut cursor = Cursor::new(r"abc\", 4);
        let err = cursor.read_identifier().unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::Unterminated);
        assert_eq!(err.position, Some(7));
    }

    #[test]
    fn test_quoted_keeps_foreign_escapes() {
        let mut cursor = Cursor::new(r#"a\'b\"c' rest"#, 0);
        assert_eq!(cursor.read_quoted('\'', 0).unwrap(), r#"a'b\"c"#);
        assert_eq!(cursor.peek(), Some(' '));
    }

    #[test]
    fn test_quoted_unterminated() {
        let mut cursor = Cursor::new("abc", 10);
        let err = cursor.read_quoted('"', 9).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::Unterminated);
        assert_eq!(err.position, Some(9));
    }

    #[test]
    fn test_slice_uses_absolute_offsets() {
        let cursor = Cursor::new("hello world", 5);
        assert_eq!(cursor.slice(11, 16), "world");
    }
}
