//! Selector parser.
//!
//! Drives the [scanner](crate::scanner) and parses every chunk it produces
//! into a [`CompoundSelector`], then links the compounds into a
//! [`SelectorList`]. Pseudo-function arguments that hold selectors re-enter
//! the parser recursively, bounded by [`ParserConfig::max_nesting_depth`].

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::config::ParserConfig;
use crate::error::{Result, SelectorSyntaxError, SyntaxErrorKind};
use crate::scanner::{self, Chunk, Scanner};
use crate::selector::{Combinator, CompoundSelector, SelectorGroup, SelectorList};

mod compound;
pub(crate) mod cursor;

pub use compound::parse_compound;
use compound::parse_compound_at;

/// Input the parser accepted but rewrote, such as `::name` read as the
/// pseudo-class `:name`. Parsing itself never reports these anywhere;
/// callers decide whether to show them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseNotice {
    /// Human readable description.
    pub message: String,
    /// Character offset of the rewritten input.
    pub position: usize,
}

impl Display for ParseNotice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

/// Limits, current recursion depth, and the notices collected so far,
/// threaded through nested parses.
#[derive(Debug, Default)]
pub(crate) struct ParseContext {
    config: ParserConfig,
    depth: usize,
    notices: Vec<ParseNotice>,
}

impl ParseContext {
    pub(crate) const fn new(config: ParserConfig) -> Self {
        Self {
            config,
            depth: 0,
            notices: Vec::new(),
        }
    }

    /// Enter a selector argument that opens at offset `at`.
    pub(crate) fn descend(&mut self, at: usize) -> Result<()> {
        let depth = self.depth + 1;
        if depth > self.config.max_nesting_depth {
            return Err(SelectorSyntaxError::new(
                SyntaxErrorKind::NestingTooDeep,
                format!(
                    "selector arguments nested deeper than {} levels",
                    self.config.max_nesting_depth
                ),
                at,
            ));
        }
        self.depth = depth;
        Ok(())
    }

    /// Leave the selector argument entered by the matching [`Self::descend`].
    pub(crate) const fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn notice(&mut self, message: String, position: usize) {
        self.notices.push(ParseNotice { message, position });
    }
}

/// Parses selector text with a fixed [`ParserConfig`].
///
/// # Example
/// ```
/// use sift_selector::{Combinator, SelectorParser};
///
/// let list = SelectorParser::default().parse("ul > li.active").unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list[0].combinator, Some(Combinator::Child));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorParser {
    config: ParserConfig,
}

impl SelectorParser {
    /// Parser with the given limits.
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The limits this parser applies.
    #[must_use]
    pub const fn config(self) -> ParserConfig {
        self.config
    }

    /// Parse a single selector. A top-level comma is an error; use
    /// [`SelectorParser::parse_group`] for selector groups.
    ///
    /// # Errors
    ///
    /// Returns the first [`SelectorSyntaxError`] found. No partial result is
    /// produced.
    pub fn parse(self, input: &str) -> Result<SelectorList> {
        self.parse_with_notices(input).map(|(list, _)| list)
    }

    /// Like [`SelectorParser::parse`], also returning the spellings that were
    /// accepted but rewritten.
    ///
    /// # Errors
    ///
    /// See [`SelectorParser::parse`].
    pub fn parse_with_notices(self, input: &str) -> Result<(SelectorList, Vec<ParseNotice>)> {
        let mut context = ParseContext::new(self.config);
        let chunks = scanner::scan(input)?;
        let list = build_list(&chunks, &mut context)?;
        Ok((list, context.notices))
    }

    /// Parse a comma-separated selector group.
    ///
    /// # Errors
    ///
    /// Returns the first [`SelectorSyntaxError`] found in any member.
    pub fn parse_group(self, input: &str) -> Result<SelectorGroup> {
        self.parse_group_with_notices(input).map(|(group, _)| group)
    }

    /// Like [`SelectorParser::parse_group`], also returning the spellings
    /// that were accepted but rewritten.
    ///
    /// # Example
    /// ```
    /// use sift_selector::SelectorParser;
    ///
    /// let (group, notices) = SelectorParser::default()
    ///     .parse_group_with_notices("a::checked, b")
    ///     .unwrap();
    /// assert_eq!(group.to_string(), "a:checked, b");
    /// assert_eq!(notices[0].position, 1);
    /// ```
    ///
    /// # Errors
    ///
    /// See [`SelectorParser::parse_group`].
    pub fn parse_group_with_notices(
        self,
        input: &str,
    ) -> Result<(SelectorGroup, Vec<ParseNotice>)> {
        let mut context = ParseContext::new(self.config);
        let group = parse_group_at(input, 0, &mut context)?;
        Ok((group, context.notices))
    }
}

/// Parse a single selector with default limits.
///
/// # Errors
///
/// See [`SelectorParser::parse`].
pub fn parse_selector(input: &str) -> Result<SelectorList> {
    SelectorParser::default().parse(input)
}

/// Parse a comma-separated selector group with default limits.
///
/// # Errors
///
/// See [`SelectorParser::parse_group`].
pub fn parse_selector_group(input: &str) -> Result<SelectorGroup> {
    SelectorParser::default().parse_group(input)
}

/// Parse a group whose text starts at offset `base` of the outermost input.
pub(crate) fn parse_group_at(
    input: &str,
    base: usize,
    context: &mut ParseContext,
) -> Result<SelectorGroup> {
    let selectors = Scanner::for_group(input).with_offset(base).run()?;
    selectors
        .iter()
        .map(|chunks| build_list(chunks, context))
        .collect::<Result<Vec<_>>>()
        .map(SelectorGroup::new)
}

/// The combinator a chunk is introduced with belongs to the compound on its
/// left.
fn build_list(chunks: &[Chunk], context: &mut ParseContext) -> Result<SelectorList> {
    let mut compounds: Vec<CompoundSelector> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let compound = parse_compound_at(&chunk.text, chunk.offset, context)?;
        if let Some(previous) = compounds.last_mut() {
            previous.combinator = Some(chunk.leading.unwrap_or(Combinator::Descendant));
        }
        compounds.push(compound);
    }
    Ok(SelectorList::from_compounds(compounds))
}
