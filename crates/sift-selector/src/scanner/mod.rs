//! Selector scanner.
//!
//! Cuts selector text into [`Chunk`]s, one per compound selector, recording
//! the combinator that joins each chunk to the one before it. The scanner
//! only understands structure: brackets, parentheses, quotes, and escapes.
//! What is inside a chunk is the compound parser's business.
//!
//! ```text
//! div.a > b[title="x > y"]  c:not(d e)
//! └─┬─┘   └──────┬───────┘  └────┬───┘
//!   │      leading: Child   leading: Descendant
//!   leading: None
//! ```

use crate::error::{Result, SelectorSyntaxError, SyntaxErrorKind};
use crate::parser::cursor::is_whitespace;
use crate::selector::Combinator;

mod chunk;
mod state;

pub use chunk::Chunk;
pub use state::ScanState;

/// Scan a single selector. A top-level `,` is an error.
///
/// # Errors
///
/// Returns a [`SelectorSyntaxError`] for unbalanced brackets or quotes, a
/// dangling escape, misplaced combinators, or empty input.
pub fn scan(input: &str) -> Result<Vec<Chunk>> {
    let mut selectors = Scanner::new(input).run()?;
    Ok(selectors.pop().unwrap_or_default())
}

/// Scan a comma-separated group of selectors.
///
/// # Errors
///
/// As [`scan`], and additionally when a member of the group is empty.
pub fn scan_group(input: &str) -> Result<Vec<Vec<Chunk>>> {
    Scanner::for_group(input).run()
}

/// The scanner state machine.
///
/// Fed one character at a time. `Normal` is the implicit bottom of the
/// state stack; an escape applies to the next character in any state.
#[derive(Debug)]
pub struct Scanner {
    input: Vec<char>,
    position: usize,
    base: usize,
    allow_groups: bool,
    stack: Vec<(ScanState, usize)>,
    escape_pending: Option<usize>,

    current: String,
    current_start: usize,
    current_leading: Option<Combinator>,
    pending_combinator: Option<(Combinator, usize)>,

    chunks: Vec<Chunk>,
    selectors: Vec<Vec<Chunk>>,
}

impl Scanner {
    /// Scanner for a single selector.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            base: 0,
            allow_groups: false,
            stack: Vec::new(),
            escape_pending: None,
            current: String::new(),
            current_start: 0,
            current_leading: None,
            pending_combinator: None,
            chunks: Vec::new(),
            selectors: Vec::new(),
        }
    }

    /// Scanner that splits on top-level commas.
    #[must_use]
    pub fn for_group(input: &str) -> Self {
        Self {
            allow_groups: true,
            ..Self::new(input)
        }
    }

    /// Report offsets relative to an enclosing input in which this text
    /// starts at `base`.
    #[must_use]
    pub const fn with_offset(mut self, base: usize) -> Self {
        self.base = base;
        self
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.stack.last().map_or(ScanState::Normal, |&(state, _)| state)
    }

    /// Run to the end of input. Returns one chunk list per selector; without
    /// group splitting that is exactly one list.
    ///
    /// # Errors
    ///
    /// See [`scan`] and [`scan_group`].
    pub fn run(mut self) -> Result<Vec<Vec<Chunk>>> {
        while let Some(&c) = self.input.get(self.position) {
            let at = self.base + self.position;
            self.position += 1;

            if self.escape_pending.take().is_some() {
                self.push_char(c, at);
                continue;
            }
            if c == '\\' {
                self.push_char(c, at);
                self.escape_pending = Some(at);
                continue;
            }

            match self.state() {
                ScanState::Normal => self.step_normal(c, at)?,
                ScanState::InBrackets => self.step_brackets(c, at)?,
                ScanState::InParens => self.step_parens(c, at)?,
                ScanState::InSingleQuote | ScanState::InDoubleQuote => self.step_quote(c, at),
            }
        }
        self.finish()
    }

    fn step_normal(&mut self, c: char, at: usize) -> Result<()> {
        if is_whitespace(c) {
            self.end_chunk();
            return Ok(());
        }
        if let Some(combinator) = Combinator::from_sign(c) {
            self.end_chunk();
            if self.chunks.is_empty() {
                return Err(SelectorSyntaxError::new(
                    SyntaxErrorKind::DanglingCombinator,
                    format!("selector cannot start with '{c}'"),
                    at,
                ));
            }
            if let Some((previous, _)) = self.pending_combinator {
                return Err(SelectorSyntaxError::new(
                    SyntaxErrorKind::DanglingCombinator,
                    format!("'{c}' follows combinator '{}'", previous.sign()),
                    at,
                ));
            }
            self.pending_combinator = Some((combinator, at));
            return Ok(());
        }
        match c {
            ',' if self.allow_groups => self.end_selector(at)?,
            ',' => {
                return Err(SelectorSyntaxError::new(
                    SyntaxErrorKind::UnexpectedCharacter,
                    "unexpected ',' in a single selector",
                    at,
                ));
            }
            '[' => {
                self.push_char(c, at);
                self.stack.push((ScanState::InBrackets, at));
            }
            '(' => {
                self.push_char(c, at);
                self.stack.push((ScanState::InParens, at));
            }
            ']' | ')' => return Err(unbalanced(c, at)),
            _ => self.push_char(c, at),
        }
        Ok(())
    }

    fn step_brackets(&mut self, c: char, at: usize) -> Result<()> {
        if c == '[' {
            return Err(SelectorSyntaxError::new(
                SyntaxErrorKind::UnexpectedCharacter,
                "unexpected '[' inside an attribute selector",
                at,
            ));
        }
        self.push_char(c, at);
        if let Some(quote) = ScanState::for_quote(c) {
            self.stack.push((quote, at));
        } else if Some(c) == ScanState::InBrackets.closer() {
            let _ = self.stack.pop();
        }
        Ok(())
    }

    fn step_parens(&mut self, c: char, at: usize) -> Result<()> {
        if c == ']' {
            return Err(unbalanced(c, at));
        }
        self.push_char(c, at);
        match c {
            '(' => self.stack.push((ScanState::InParens, at)),
            '[' => self.stack.push((ScanState::InBrackets, at)),
            ')' => {
                let _ = self.stack.pop();
            }
            _ => {
                if let Some(quote) = ScanState::for_quote(c) {
                    self.stack.push((quote, at));
                }
            }
        }
        Ok(())
    }

    fn step_quote(&mut self, c: char, at: usize) {
        self.push_char(c, at);
        if Some(c) == self.state().closer() {
            let _ = self.stack.pop();
        }
    }

    fn push_char(&mut self, c: char, at: usize) {
        if self.current.is_empty() {
            self.current_start = at;
            self.current_leading = if self.chunks.is_empty() {
                None
            } else {
                Some(
                    self.pending_combinator
                        .take()
                        .map_or(Combinator::Descendant, |(combinator, _)| combinator),
                )
            };
        }
        self.current.push(c);
    }

    fn end_chunk(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.chunks.push(Chunk {
            text: std::mem::take(&mut self.current),
            offset: self.current_start,
            leading: self.current_leading.take(),
        });
    }

    /// Close the current selector at a top-level comma or end of input.
    fn end_selector(&mut self, at: usize) -> Result<()> {
        self.end_chunk();
        if let Some((combinator, position)) = self.pending_combinator.take() {
            return Err(SelectorSyntaxError::new(
                SyntaxErrorKind::DanglingCombinator,
                format!("selector cannot end with '{}'", combinator.sign()),
                position,
            ));
        }
        if self.chunks.is_empty() {
            return Err(if self.allow_groups {
                SelectorSyntaxError::new(SyntaxErrorKind::Empty, "empty selector in group", at)
            } else {
                SelectorSyntaxError::unpositioned(SyntaxErrorKind::Empty, "empty selector")
            });
        }
        self.selectors.push(std::mem::take(&mut self.chunks));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Vec<Chunk>>> {
        if let Some(at) = self.escape_pending {
            return Err(SelectorSyntaxError::new(
                SyntaxErrorKind::Unterminated,
                "escape at end of input",
                at,
            ));
        }
        if let Some(&(state, opened_at)) = self.stack.last() {
            return Err(state.unterminated(opened_at));
        }
        if self.selectors.is_empty() && self.chunks.is_empty() && self.current.is_empty() {
            return Err(SelectorSyntaxError::unpositioned(
                SyntaxErrorKind::Empty,
                "empty selector",
            ));
        }
        let end = self.base + self.input.len();
        self.end_selector(end)?;
        Ok(self.selectors)
    }
}

fn unbalanced(c: char, at: usize) -> SelectorSyntaxError {
    SelectorSyntaxError::new(
        SyntaxErrorKind::Unbalanced,
        format!("unmatched '{c}'"),
        at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|chunk| chunk.text.as_str()).collect()
    }

    #[test]
    fn test_whitespace_collapses_to_descendant() {
        let chunks = scan("  div \t\n b  ").unwrap();
        assert_eq!(texts(&chunks), ["div", "b"]);
        assert_eq!(chunks[0].leading, None);
        assert_eq!(chunks[1].leading, Some(Combinator::Descendant));
        assert_eq!(chunks[0].offset, 2);
        assert_eq!(chunks[1].offset, 9);
    }

    #[test]
    fn test_explicit_combinator_wins_over_whitespace() {
        let chunks = scan("a > b+c ~ d").unwrap();
        assert_eq!(texts(&chunks), ["a", "b", "c", "d"]);
        assert_eq!(chunks[1].leading, Some(Combinator::Child));
        assert_eq!(chunks[2].leading, Some(Combinator::AdjacentSibling));
        assert_eq!(chunks[3].leading, Some(Combinator::GeneralSibling));
    }

    #[test]
    fn test_brackets_and_quotes_are_opaque() {
        let chunks = scan(r#"a[title="x > y, z"] b"#).unwrap();
        assert_eq!(texts(&chunks), [r#"a[title="x > y, z"]"#, "b"]);
    }

    #[test]
    fn test_nested_parens_are_opaque() {
        let chunks = scan("div:not(:has(a > b), c) p").unwrap();
        assert_eq!(texts(&chunks), ["div:not(:has(a > b), c)", "p"]);
    }

    #[test]
    fn test_escape_keeps_delimiters_in_chunk() {
        let chunks = scan(r"a\ b\>c").unwrap();
        assert_eq!(texts(&chunks), [r"a\ b\>c"]);
    }

    #[test]
    fn test_state_stack_tracks_nesting() {
        let mut scanner = Scanner::new("a:not([x='(");
        for _ in 0..7 {
            let at = scanner.position;
            let c = scanner.input[at];
            scanner.position += 1;
            match scanner.state() {
                ScanState::Normal => scanner.step_normal(c, at).unwrap(),
                ScanState::InParens => scanner.step_parens(c, at).unwrap(),
                ScanState::InBrackets => scanner.step_brackets(c, at).unwrap(),
                ScanState::InSingleQuote | ScanState::InDoubleQuote => scanner.step_quote(c, at),
            }
        }
        assert_eq!(scanner.state(), ScanState::InBrackets);
        assert_eq!(scanner.stack.len(), 2);
    }

    #[test]
    fn test_group_split() {
        let group = scan_group("a, b > c ,d").unwrap();
        assert_eq!(group.len(), 3);
        assert_eq!(texts(&group[1]), ["b", "c"]);
        assert_eq!(group[2][0].leading, None);
    }

    #[test]
    fn test_errors() {
        let cases = [
            ("", SyntaxErrorKind::Empty),
            ("   ", SyntaxErrorKind::Empty),
            ("> a", SyntaxErrorKind::DanglingCombinator),
            ("a >", SyntaxErrorKind::DanglingCombinator),
            ("a > + b", SyntaxErrorKind::DanglingCombinator),
            ("a[b", SyntaxErrorKind::Unterminated),
            ("a:not(b", SyntaxErrorKind::Unterminated),
            ("a[b='c]", SyntaxErrorKind::Unterminated),
            ("a\\", SyntaxErrorKind::Unterminated),
            ("a]", SyntaxErrorKind::Unbalanced),
            ("a)", SyntaxErrorKind::Unbalanced),
            ("a, b", SyntaxErrorKind::UnexpectedCharacter),
        ];
        for (input, kind) in cases {
            let err = scan(input).unwrap_err();
            assert_eq!(err.kind, kind, "input {input:?}: {err}");
        }
    }

    #[test]
    fn test_group_errors() {
        assert_eq!(scan_group("a,").unwrap_err().kind, SyntaxErrorKind::Empty);
        assert_eq!(scan_group(", a").unwrap_err().kind, SyntaxErrorKind::Empty);
        assert_eq!(scan_group("a,,b").unwrap_err().position, Some(2));
        assert_eq!(
            scan_group("a >, b").unwrap_err().kind,
            SyntaxErrorKind::DanglingCombinator
        );
    }

    #[test]
    fn test_offsets_are_rebased() {
        let group = Scanner::for_group("x y").with_offset(10).run().unwrap();
        assert_eq!(group[0][1].offset, 12);
    }
}
