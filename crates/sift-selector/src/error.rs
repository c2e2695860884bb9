//! Selector syntax errors.
//!
//! Every failure the compiler can report is a syntax error: parsing is a pure
//! function of its input, so there is nothing to retry and no partial result.

use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;

/// Result alias used throughout the compiler.
pub type Result<T> = std::result::Result<T, SelectorSyntaxError>;

/// What kind of syntax problem a [`SelectorSyntaxError`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SyntaxErrorKind {
    /// The selector, or one member of a selector group, is empty.
    Empty,
    /// A character that cannot appear at this position, such as `^` outside
    /// of an attribute selector.
    UnexpectedCharacter,
    /// A combinator with no compound selector on one of its sides, or two
    /// explicit combinators in a row.
    DanglingCombinator,
    /// An unclosed `[`, `(`, quote, or a trailing `\`.
    Unterminated,
    /// A `]` or `)` without a matching opener.
    Unbalanced,
    /// A `:name` that is not a known pseudo-class.
    UnknownPseudoClass,
    /// A `:name(...)` that is not a known pseudo-function.
    UnknownPseudoFunction,
    /// An attribute selector with a missing name, operator, value, or `]`.
    MalformedAttribute,
    /// A pseudo-function argument that does not fit the function's grammar.
    MalformedExpression,
    /// Selector-valued arguments nested deeper than the configured limit.
    NestingTooDeep,
}

/// A malformed selector.
///
/// `position` is a character offset into the string handed to the parser;
/// errors found inside pseudo-function arguments are reported relative to the
/// outermost selector, not to the argument text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}{}", describe_position(.position))]
pub struct SelectorSyntaxError {
    /// Error category.
    pub kind: SyntaxErrorKind,
    /// Human readable description.
    pub message: String,
    /// Character offset of the offending input, when known.
    pub position: Option<usize>,
}

impl SelectorSyntaxError {
    /// Create an error pointing at a character offset.
    #[must_use]
    pub fn new(kind: SyntaxErrorKind, message: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            position: Some(position),
        }
    }

    /// Create an error that does not point at any particular character.
    #[must_use]
    pub fn unpositioned(kind: SyntaxErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
        }
    }
}

#[allow(clippy::ref_option)]
fn describe_position(position: &Option<usize>) -> String {
    position.map_or_else(String::new, |at| format!(" at position {at}"))
}
