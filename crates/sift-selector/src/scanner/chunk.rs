use serde::Serialize;

use crate::selector::Combinator;

/// One compound selector's worth of source text, as cut by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// The raw text, escapes and quotes left intact.
    pub text: String,
    /// Character offset of the first character in the scanned input.
    pub offset: usize,
    /// Combinator joining the previous chunk to this one. `None` for the
    /// first chunk of a selector.
    pub leading: Option<Combinator>,
}

impl Chunk {
    /// Offset one past the last character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.text.chars().count()
    }
}
